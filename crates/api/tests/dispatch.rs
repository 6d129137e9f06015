use std::sync::Arc;

use serde_json::{Value, json};

use procura_api::{CallClass, Dispatcher};
use procura_core::ProcureError;
use procura_infra::{InMemoryLedger, LifecycleEngine, StoreConfig};

struct Harness {
    ledger: Arc<InMemoryLedger>,
    dispatcher: Dispatcher<Arc<InMemoryLedger>>,
}

impl Harness {
    fn new() -> Self {
        let ledger = Arc::new(InMemoryLedger::new());
        let dispatcher = Dispatcher::new(LifecycleEngine::new(
            ledger.clone(),
            StoreConfig::default(),
        ));
        Self { ledger, dispatcher }
    }

    fn invoke(&self, function: &str, args: &[&str]) -> Option<Value> {
        self.call(CallClass::Invoke, function, args)
            .unwrap_or_else(|e| panic!("{function} failed: {e}"))
    }

    fn query(&self, function: &str, args: &[&str]) -> Option<Value> {
        self.call(CallClass::Query, function, args)
            .unwrap_or_else(|e| panic!("{function} failed: {e}"))
    }

    fn call(
        &self,
        class: CallClass,
        function: &str,
        args: &[&str],
    ) -> Result<Option<Value>, ProcureError> {
        let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();
        let response = self.dispatcher.dispatch(class, function, &args)?;
        Ok(response
            .payload()
            .map(|bytes| serde_json::from_slice(bytes).unwrap()))
    }
}

fn order_json(order_id: &str, supplier: &str, qty: i64) -> String {
    json!({
        "po_id": order_id,
        "supplier_id": supplier,
        "qty": qty,
        "price_unit": 150,
        "item_details": "Coffee Beans",
        "item_id": "CFBEAN",
        "date": "2017-03-01",
        "status": "created",
        "poe_Customs": "",
        "billOflading": "",
        "invoice": ""
    })
    .to_string()
}

#[test]
fn procure_to_pay_happy_path() {
    let h = Harness::new();

    assert_eq!(h.invoke("CreateItems", &[]), None);
    assert_eq!(
        h.invoke(
            "CreatePurchaseOrder",
            &["PO-1", &order_json("PO-1", "8888", 1000)]
        ),
        None
    );

    let items = h.query("GetItemForSupplier", &["8888"]).unwrap();
    assert_eq!(items[0]["quantity"], 4000);

    assert_eq!(h.invoke("UpdateBillOfLading", &["PO-1", "BOL-1"]), None);
    assert_eq!(h.invoke("UpdatePoECustoms", &["PO-1", "POE-1"]), None);
    assert_eq!(h.invoke("UpdateInvoice", &["PO-1", "INV-1"]), None);

    let po = h.query("GetPurchaseOrder", &["PO-1"]).unwrap();
    assert_eq!(po["billOflading"], "BOL-1");
    assert_eq!(po["poe_Customs"], "POE-1");
    assert_eq!(po["invoice"], "INV-1");
    assert_eq!(po["status"], "sent");
    assert_eq!(po["qty"], 1000);

    let gnr = h.query("CreateGNR", &["PO-1", "800"]).unwrap();
    assert_eq!(gnr["isgenerated"], 1);
}

#[test]
fn goods_receipt_responses() {
    let h = Harness::new();
    h.invoke(
        "CreatePurchaseOrder",
        &["PO-1", &order_json("PO-1", "8888", 100)],
    );

    let rejected = h.query("CreateGNR", &["PO-1", "74"]).unwrap();
    assert_eq!(rejected["isgenerated"], 0);
    assert!(rejected["message"].as_str().unwrap().starts_with("GNR failed"));

    let accepted = h.query("CreateGNR", &["PO-1", "75"]).unwrap();
    assert_eq!(accepted["isgenerated"], 1);

    let not_short = h.query("CreateGNR", &["PO-1", "100"]).unwrap();
    assert_eq!(not_short, json!({"isgenerated": 0, "message": ""}));
}

#[test]
fn malformed_order_payload_is_silently_dropped() {
    let h = Harness::new();

    assert_eq!(h.invoke("CreatePurchaseOrder", &["PO-1", "{oops"]), None);

    assert_eq!(h.query("GetAllPurchaseOrders", &[]), Some(json!([])));
}

#[test]
fn bill_of_lading_on_unknown_order_creates_blank_entry() {
    let h = Harness::new();

    h.invoke("UpdateBillOfLading", &["PO-9", "BOL-9"]);

    let po = h.query("GetPurchaseOrder", &["PO-9"]).unwrap();
    assert_eq!(po["billOflading"], "BOL-9");
    assert_eq!(po["po_id"], "");
    assert_eq!(po["qty"], 0);
    assert_eq!(po["status"], "");
}

#[test]
fn unknown_lookups_are_not_found() {
    let h = Harness::new();
    h.invoke("CreateItems", &[]);

    assert!(matches!(
        h.call(CallClass::Query, "GetPurchaseOrder", &["nope"]),
        Err(ProcureError::NotFound(_))
    ));
    assert!(matches!(
        h.call(CallClass::Query, "GetItemForSupplier", &["0000"]),
        Err(ProcureError::NotFound(_))
    ));
}

#[test]
fn unknown_and_misrouted_functions_return_empty() {
    let h = Harness::new();

    assert_eq!(h.invoke("NoSuchFunction", &[]), None);
    assert_eq!(h.query("NoSuchFunction", &[]), None);
    // Mutation through the query entry point does nothing.
    assert_eq!(h.query("CreateItems", &[]), None);
    assert_eq!(h.ledger.revision("SupplierItemMap").unwrap(), 0);
}

#[test]
fn missing_arguments_are_reported() {
    let h = Harness::new();

    match h.call(CallClass::Invoke, "UpdateInvoice", &["PO-1"]) {
        Err(ProcureError::MissingArgument {
            operation,
            position,
            name,
        }) => {
            assert_eq!(operation, "UpdateInvoice");
            assert_eq!(position, 1);
            assert_eq!(name, "document");
        }
        other => panic!("expected MissingArgument, got {other:?}"),
    }
}

#[test]
fn seeding_twice_duplicates_lines() {
    let h = Harness::new();
    h.invoke("CreateItems", &[]);
    h.invoke("CreateItems", &[]);

    let items = h.query("GetItemForSupplier", &["7777"]).unwrap();
    assert_eq!(items.as_array().unwrap().len(), 2);
}

#[test]
fn update_item_then_order_uses_new_stock() {
    let h = Harness::new();
    h.invoke("CreateItems", &[]);
    h.invoke(
        "UpdateItemForSupplier",
        &["9999", r#"{"item_id":"CFBEAN","item":"Coffee Beans","quantity":10,"price_unit":120}"#],
    );
    h.invoke(
        "CreatePurchaseOrder",
        &["PO-1", &order_json("PO-1", "9999", 25)],
    );

    let items = h.query("GetItemForSupplier", &["9999"]).unwrap();
    assert_eq!(items[0]["quantity"], -15);
    assert_eq!(items[0]["price_unit"], 120.0);
}

#[test]
fn delete_all_returns_empty_table_and_clears_lists() {
    let h = Harness::new();
    h.invoke(
        "CreatePurchaseOrder",
        &["PO-1", &order_json("PO-1", "8888", 1)],
    );
    h.invoke(
        "CreatePurchaseOrder",
        &["PO-2", &order_json("PO-2", "8888", 1)],
    );
    assert_eq!(
        h.query("GetPOForSupplier", &["8888"])
            .unwrap()
            .as_array()
            .unwrap()
            .len(),
        2
    );

    assert_eq!(h.invoke("DeleteAllPOs", &[]), Some(json!({})));
    assert_eq!(h.query("GetAllPurchaseOrders", &[]), Some(json!([])));
    assert_eq!(h.query("GetPOForSupplier", &["8888"]), Some(json!([])));
}
