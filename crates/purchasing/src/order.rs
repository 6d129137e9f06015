use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use procura_core::{ItemId, OrderId, SupplierId};

/// Status written by invoice attachment, whatever the previous status was.
pub const INVOICED_STATUS: &str = "sent";

/// Purchase order record.
///
/// Field names on the wire are fixed; missing fields decode to zero values, which
/// is also what `PurchaseOrder::default()` produces.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PurchaseOrder {
    #[serde(rename = "po_id")]
    pub id: OrderId,
    pub supplier_id: SupplierId,
    #[serde(rename = "qty")]
    pub quantity: i64,
    #[serde(rename = "price_unit")]
    pub unit_price: f64,
    pub item_details: String,
    pub item_id: ItemId,
    #[serde(rename = "date")]
    pub order_date: String,
    /// Free-form, caller supplied.
    pub status: String,
    #[serde(rename = "poe_Customs")]
    pub customs_document: String,
    #[serde(rename = "billOflading")]
    pub bill_of_lading: String,
    #[serde(rename = "invoice")]
    pub invoice_document: String,
}

/// Shipping documents that can be attached to an order after creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attachment {
    BillOfLading,
    CustomsDocument,
    Invoice,
}

impl Attachment {
    pub fn as_str(self) -> &'static str {
        match self {
            Attachment::BillOfLading => "bill_of_lading",
            Attachment::CustomsDocument => "customs_document",
            Attachment::Invoice => "invoice",
        }
    }
}

impl PurchaseOrder {
    /// Set the document field for `kind`. Attaching an invoice also marks the
    /// order as sent.
    pub fn attach(&mut self, kind: Attachment, document: impl Into<String>) {
        let document = document.into();
        match kind {
            Attachment::BillOfLading => self.bill_of_lading = document,
            Attachment::CustomsDocument => self.customs_document = document,
            Attachment::Invoice => {
                self.invoice_document = document;
                self.status = INVOICED_STATUS.to_string();
            }
        }
    }
}

/// Order ID → purchase order. Iteration order is unspecified.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderTable {
    orders: HashMap<OrderId, PurchaseOrder>,
}

impl OrderTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert under the order's own ID, fully replacing any previous record.
    pub fn upsert(&mut self, order: PurchaseOrder) -> Option<PurchaseOrder> {
        self.orders.insert(order.id.clone(), order)
    }

    /// Store `order` under `key`, which need not equal `order.id`.
    pub fn put(&mut self, key: OrderId, order: PurchaseOrder) {
        self.orders.insert(key, order);
    }

    pub fn get(&self, key: &OrderId) -> Option<&PurchaseOrder> {
        self.orders.get(key)
    }

    /// Copy of the record under `key`, or the zero-value order when absent.
    /// The flag tells the caller which one it got.
    pub fn get_or_blank(&self, key: &OrderId) -> (PurchaseOrder, bool) {
        match self.orders.get(key) {
            Some(order) => (order.clone(), true),
            None => (PurchaseOrder::default(), false),
        }
    }

    pub fn for_supplier(&self, supplier_id: &SupplierId) -> Vec<PurchaseOrder> {
        self.orders
            .values()
            .filter(|o| &o.supplier_id == supplier_id)
            .cloned()
            .collect()
    }

    pub fn all(&self) -> Vec<PurchaseOrder> {
        self.orders.values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }
}
