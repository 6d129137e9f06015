//! Order lifecycle engine.
//!
//! Every operation follows the same pipeline:
//!
//! ```text
//! lock → load table(s) from ledger → mutate in memory → save mutated table(s) → unlock
//! ```
//!
//! The engine-wide lock is the only serialization point. There is no multi-key
//! transaction underneath, so `create_order` writes inventory and then orders as two
//! separate puts; if the second put fails the first one stays.

use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{debug, info, instrument, warn};

use procura_core::{OrderId, ProcureError, ProcureResult, SupplierId};
use procura_inventory::{InventoryTable, Item, seed_catalog};
use procura_purchasing::{
    Attachment, OrderTable, PurchaseOrder, ReceiptDecision, parse_received_quantity,
};

use crate::cache::CollectionCache;
use crate::config::StoreConfig;
use crate::ledger::Ledger;

/// Result of `create_order`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateOrderOutcome {
    /// Order stored; `decremented` inventory lines matched its supplier and item.
    Created { order_id: OrderId, decremented: usize },
    /// Payload did not decode. Nothing was read or written.
    Ignored { reason: String },
}

/// Result of attaching a document to an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachOutcome {
    Updated,
    /// No order existed under the key; a zero-value order now holds the document.
    CreatedBlank,
}

#[derive(Debug)]
pub struct LifecycleEngine<L> {
    cache: CollectionCache<L>,
    serial: Mutex<()>,
}

impl<L: Ledger> LifecycleEngine<L> {
    pub fn new(ledger: L, config: StoreConfig) -> Self {
        Self {
            cache: CollectionCache::new(ledger, config),
            serial: Mutex::new(()),
        }
    }

    pub fn cache(&self) -> &CollectionCache<L> {
        &self.cache
    }

    /// Decode `payload` as a purchase order, upsert it and take its quantity out of
    /// every matching inventory line of its supplier.
    ///
    /// A JSON `null` payload decodes to the zero-value order (stored under `""`).
    #[instrument(skip_all)]
    pub fn create_order(&self, payload: &str) -> ProcureResult<CreateOrderOutcome> {
        let order: PurchaseOrder = match serde_json::from_str::<Option<PurchaseOrder>>(payload) {
            Ok(order) => order.unwrap_or_default(),
            Err(e) => {
                warn!(error = %e, "ignoring malformed purchase order payload");
                return Ok(CreateOrderOutcome::Ignored {
                    reason: e.to_string(),
                });
            }
        };

        let _guard = self.lock();
        let mut orders = self.cache.load_orders()?;
        let mut inventory = self.cache.load_inventory()?;

        let decremented =
            inventory.decrement_matching(&order.supplier_id, &order.item_id, order.quantity);
        let order_id = order.id.clone();
        info!(
            order_id = %order_id,
            supplier_id = %order.supplier_id,
            item_id = %order.item_id,
            quantity = order.quantity,
            decremented,
            "saving purchase order"
        );
        orders.upsert(order);

        self.cache.save_inventory(&inventory)?;
        self.cache.save_orders(&orders)?;

        Ok(CreateOrderOutcome::Created {
            order_id,
            decremented,
        })
    }

    #[instrument(skip_all, fields(order_id = %order_id))]
    pub fn get_order(&self, order_id: &OrderId) -> ProcureResult<PurchaseOrder> {
        let orders = self.read_orders()?;
        orders
            .get(order_id)
            .cloned()
            .ok_or_else(|| ProcureError::not_found(format!("purchase order '{order_id}'")))
    }

    pub fn list_orders_for_supplier(
        &self,
        supplier_id: &SupplierId,
    ) -> ProcureResult<Vec<PurchaseOrder>> {
        let orders = self.read_orders()?;
        let found = orders.for_supplier(supplier_id);
        debug!(supplier_id = %supplier_id, count = found.len(), "orders for supplier");
        Ok(found)
    }

    pub fn list_all_orders(&self) -> ProcureResult<Vec<PurchaseOrder>> {
        Ok(self.read_orders()?.all())
    }

    #[instrument(skip_all, fields(supplier_id = %supplier_id))]
    pub fn get_inventory_for_supplier(&self, supplier_id: &SupplierId) -> ProcureResult<Vec<Item>> {
        let _guard = self.lock();
        let inventory = self.cache.load_inventory()?;
        inventory
            .items_for(supplier_id)
            .map(<[Item]>::to_vec)
            .ok_or_else(|| ProcureError::not_found(format!("items for supplier '{supplier_id}'")))
    }

    /// Append the seed catalog. Calling this twice appends the lines twice.
    pub fn seed_inventory(&self) -> ProcureResult<usize> {
        let _guard = self.lock();
        let mut inventory = self.cache.load_inventory()?;

        let catalog = seed_catalog();
        let appended = catalog.len();
        for (supplier_id, item) in catalog {
            inventory.append(supplier_id, item);
        }

        self.cache.save_inventory(&inventory)?;
        info!(appended, suppliers = inventory.supplier_count(), "seeded inventory");
        Ok(appended)
    }

    /// Overwrite quantity and unit price of the supplier's lines matching the payload's
    /// `item_id`. Returns how many lines changed; zero is not an error.
    #[instrument(skip_all, fields(supplier_id = %supplier_id))]
    pub fn update_inventory_item(
        &self,
        supplier_id: &SupplierId,
        payload: &str,
    ) -> ProcureResult<usize> {
        let update: Item = serde_json::from_str(payload)
            .map_err(|e| ProcureError::decode(format!("item payload: {e}")))?;

        let _guard = self.lock();
        let mut inventory: InventoryTable = self.cache.load_inventory()?;
        let updated = inventory.update_matching(supplier_id, &update);
        self.cache.save_inventory(&inventory)?;

        info!(item_id = %update.id, updated, "updated inventory item");
        Ok(updated)
    }

    /// Set one document field on the order under `order_id`.
    ///
    /// A missing order is not an error: a zero-value order is stored under the key.
    #[instrument(skip_all, fields(order_id = %order_id, kind = kind.as_str()))]
    pub fn attach(
        &self,
        order_id: &OrderId,
        kind: Attachment,
        document: &str,
    ) -> ProcureResult<AttachOutcome> {
        let _guard = self.lock();
        let mut orders = self.cache.load_orders()?;

        let (mut order, existed) = orders.get_or_blank(order_id);
        order.attach(kind, document);
        orders.put(order_id.clone(), order);
        self.cache.save_orders(&orders)?;

        if existed {
            Ok(AttachOutcome::Updated)
        } else {
            warn!("attached document to unknown order; stored blank record");
            Ok(AttachOutcome::CreatedBlank)
        }
    }

    pub fn attach_bill_of_lading(
        &self,
        order_id: &OrderId,
        document: &str,
    ) -> ProcureResult<AttachOutcome> {
        self.attach(order_id, Attachment::BillOfLading, document)
    }

    pub fn attach_customs_document(
        &self,
        order_id: &OrderId,
        document: &str,
    ) -> ProcureResult<AttachOutcome> {
        self.attach(order_id, Attachment::CustomsDocument, document)
    }

    /// Attach the invoice and mark the order as sent.
    pub fn attach_invoice(&self, order_id: &OrderId, document: &str) -> ProcureResult<AttachOutcome> {
        self.attach(order_id, Attachment::Invoice, document)
    }

    /// Compare a received quantity with the order's requested quantity.
    ///
    /// Advisory only; the order is not modified. An unknown order behaves as a
    /// zero-value order (requested 0).
    #[instrument(skip_all, fields(order_id = %order_id))]
    pub fn record_goods_receipt(
        &self,
        order_id: &OrderId,
        received: &str,
    ) -> ProcureResult<ReceiptDecision> {
        let orders = self.read_orders()?;
        let (order, _) = orders.get_or_blank(order_id);
        let received = parse_received_quantity(received);

        let decision = ReceiptDecision::evaluate(order.quantity, received);
        info!(requested = order.quantity, received, ?decision, "goods receipt evaluated");
        Ok(decision)
    }

    /// Replace the order table with an empty one and read it back.
    pub fn reset_orders(&self) -> ProcureResult<OrderTable> {
        let _guard = self.lock();
        self.cache.load_orders()?;
        self.cache.save_orders(&OrderTable::new())?;
        let confirmed = self.cache.load_orders()?;
        info!(orders = confirmed.len(), "order table reset");
        Ok(confirmed)
    }

    fn read_orders(&self) -> ProcureResult<OrderTable> {
        let _guard = self.lock();
        self.cache.load_orders()
    }

    // The guard protects no data and tables are reloaded per call, so a poisoned
    // lock carries no stale state.
    fn lock(&self) -> MutexGuard<'_, ()> {
        self.serial.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
