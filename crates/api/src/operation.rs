//! Closed set of operations and their argument shapes.
//!
//! Function names are the ones callers already send. Parsing checks the call class
//! and the positional argument count before anything is decoded.

use serde::{Deserialize, Serialize};

use procura_core::{OrderId, ProcureError, ProcureResult, SupplierId};
use procura_purchasing::Attachment;

/// Which entry point a call came through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CallClass {
    Init,
    /// Read-only functions.
    Query,
    /// Mutating functions.
    Invoke,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    /// The leading order ID argument is accepted but the payload's `po_id` is the key.
    CreateOrder { order_id: OrderId, payload: String },
    GetOrder { order_id: OrderId },
    ListOrdersForSupplier { supplier_id: SupplierId },
    ListAllOrders,
    GetInventoryForSupplier { supplier_id: SupplierId },
    SeedInventory,
    UpdateInventoryItem { supplier_id: SupplierId, payload: String },
    Attach {
        order_id: OrderId,
        kind: Attachment,
        document: String,
    },
    RecordGoodsReceipt { order_id: OrderId, received: String },
    ResetOrders,
}

struct Args<'a> {
    function: &'static str,
    values: &'a [String],
}

impl<'a> Args<'a> {
    fn get(&self, position: usize, name: &'static str) -> ProcureResult<&'a str> {
        self.values
            .get(position)
            .map(String::as_str)
            .ok_or_else(|| ProcureError::missing_argument(self.function, position, name))
    }
}

impl Operation {
    /// `Ok(None)` when `function` is not known under `class`; callers treat that as
    /// an empty response, not an error.
    pub fn parse(class: CallClass, function: &str, args: &[String]) -> ProcureResult<Option<Self>> {
        let Some(function) = Self::resolve(class, function) else {
            return Ok(None);
        };
        let args = Args {
            function,
            values: args,
        };

        let op = match function {
            "CreatePurchaseOrder" => Operation::CreateOrder {
                order_id: args.get(0, "order_id")?.into(),
                payload: args.get(1, "purchase_order")?.to_string(),
            },
            "GetPurchaseOrder" => Operation::GetOrder {
                order_id: args.get(0, "order_id")?.into(),
            },
            "GetPOForSupplier" => Operation::ListOrdersForSupplier {
                supplier_id: args.get(0, "supplier_id")?.into(),
            },
            "GetAllPurchaseOrders" => Operation::ListAllOrders,
            "GetItemForSupplier" => Operation::GetInventoryForSupplier {
                supplier_id: args.get(0, "supplier_id")?.into(),
            },
            "CreateItems" => Operation::SeedInventory,
            "UpdateItemForSupplier" => Operation::UpdateInventoryItem {
                supplier_id: args.get(0, "supplier_id")?.into(),
                payload: args.get(1, "item")?.to_string(),
            },
            "UpdateBillOfLading" => Self::attach(&args, Attachment::BillOfLading)?,
            "UpdatePoECustoms" => Self::attach(&args, Attachment::CustomsDocument)?,
            "UpdateInvoice" => Self::attach(&args, Attachment::Invoice)?,
            "CreateGNR" => Operation::RecordGoodsReceipt {
                order_id: args.get(0, "order_id")?.into(),
                received: args.get(1, "quantity_received")?.to_string(),
            },
            "DeleteAllPOs" => Operation::ResetOrders,
            _ => return Ok(None),
        };
        Ok(Some(op))
    }

    /// Function name on the wire.
    pub fn function_name(&self) -> &'static str {
        match self {
            Operation::CreateOrder { .. } => "CreatePurchaseOrder",
            Operation::GetOrder { .. } => "GetPurchaseOrder",
            Operation::ListOrdersForSupplier { .. } => "GetPOForSupplier",
            Operation::ListAllOrders => "GetAllPurchaseOrders",
            Operation::GetInventoryForSupplier { .. } => "GetItemForSupplier",
            Operation::SeedInventory => "CreateItems",
            Operation::UpdateInventoryItem { .. } => "UpdateItemForSupplier",
            Operation::Attach { kind, .. } => match kind {
                Attachment::BillOfLading => "UpdateBillOfLading",
                Attachment::CustomsDocument => "UpdatePoECustoms",
                Attachment::Invoice => "UpdateInvoice",
            },
            Operation::RecordGoodsReceipt { .. } => "CreateGNR",
            Operation::ResetOrders => "DeleteAllPOs",
        }
    }

    pub fn class(&self) -> CallClass {
        match self {
            Operation::GetOrder { .. }
            | Operation::ListOrdersForSupplier { .. }
            | Operation::ListAllOrders
            | Operation::GetInventoryForSupplier { .. }
            | Operation::RecordGoodsReceipt { .. } => CallClass::Query,
            _ => CallClass::Invoke,
        }
    }

    fn resolve(class: CallClass, function: &str) -> Option<&'static str> {
        const QUERY: &[&str] = &[
            "GetPurchaseOrder",
            "GetItemForSupplier",
            "GetPOForSupplier",
            "GetAllPurchaseOrders",
            "CreateGNR",
        ];
        const INVOKE: &[&str] = &[
            "CreatePurchaseOrder",
            "UpdateItemForSupplier",
            "UpdateBillOfLading",
            "UpdatePoECustoms",
            "UpdateInvoice",
            "CreateItems",
            "DeleteAllPOs",
        ];

        let names = match class {
            CallClass::Init => return None,
            CallClass::Query => QUERY,
            CallClass::Invoke => INVOKE,
        };
        names.iter().copied().find(|n| *n == function)
    }

    fn attach(args: &Args<'_>, kind: Attachment) -> ProcureResult<Self> {
        Ok(Operation::Attach {
            order_id: args.get(0, "order_id")?.into(),
            kind,
            document: args.get(1, "document")?.to_string(),
        })
    }
}
