//! Executes parsed operations on the lifecycle engine and encodes their results.

use serde::Serialize;
use tracing::{debug, info_span};

use procura_core::{InvocationId, ProcureError, ProcureResult};
use procura_infra::{CreateOrderOutcome, Ledger, LifecycleEngine};

use crate::operation::{CallClass, Operation};

/// Encoded result of a call. Mutations usually carry no payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Response {
    payload: Option<Vec<u8>>,
}

impl Response {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn encode<T: Serialize + ?Sized>(value: &T) -> ProcureResult<Self> {
        let bytes = serde_json::to_vec(value).map_err(ProcureError::encode)?;
        Ok(Self {
            payload: Some(bytes),
        })
    }

    pub fn payload(&self) -> Option<&[u8]> {
        self.payload.as_deref()
    }

    pub fn into_payload(self) -> Option<Vec<u8>> {
        self.payload
    }

    pub fn is_empty(&self) -> bool {
        self.payload.is_none()
    }
}

#[derive(Debug)]
pub struct Dispatcher<L> {
    engine: LifecycleEngine<L>,
}

impl<L: Ledger> Dispatcher<L> {
    pub fn new(engine: LifecycleEngine<L>) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &LifecycleEngine<L> {
        &self.engine
    }

    /// Handle one named call.
    ///
    /// Unknown function names (including names sent under the wrong class) and
    /// `Init` calls return an empty response without error.
    pub fn dispatch(
        &self,
        class: CallClass,
        function: &str,
        args: &[String],
    ) -> ProcureResult<Response> {
        let invocation_id = InvocationId::new();
        let span = info_span!("dispatch", %invocation_id, ?class, function);
        let _entered = span.enter();

        match Operation::parse(class, function, args)? {
            Some(op) => self.execute(op),
            None => {
                debug!("function not found; ignoring");
                Ok(Response::empty())
            }
        }
    }

    pub fn execute(&self, op: Operation) -> ProcureResult<Response> {
        debug!(operation = op.function_name(), class = ?op.class(), "executing");
        let engine = &self.engine;
        match op {
            Operation::CreateOrder { order_id, payload } => {
                if let CreateOrderOutcome::Created { order_id: stored, .. } =
                    engine.create_order(&payload)?
                {
                    if stored != order_id {
                        debug!(argument = %order_id, stored = %stored, "order key taken from payload");
                    }
                }
                Ok(Response::empty())
            }
            Operation::GetOrder { order_id } => Response::encode(&engine.get_order(&order_id)?),
            Operation::ListOrdersForSupplier { supplier_id } => {
                Response::encode(&engine.list_orders_for_supplier(&supplier_id)?)
            }
            Operation::ListAllOrders => Response::encode(&engine.list_all_orders()?),
            Operation::GetInventoryForSupplier { supplier_id } => {
                Response::encode(&engine.get_inventory_for_supplier(&supplier_id)?)
            }
            Operation::SeedInventory => {
                engine.seed_inventory()?;
                Ok(Response::empty())
            }
            Operation::UpdateInventoryItem {
                supplier_id,
                payload,
            } => {
                engine.update_inventory_item(&supplier_id, &payload)?;
                Ok(Response::empty())
            }
            Operation::Attach {
                order_id,
                kind,
                document,
            } => {
                engine.attach(&order_id, kind, &document)?;
                Ok(Response::empty())
            }
            Operation::RecordGoodsReceipt { order_id, received } => {
                let decision = engine.record_goods_receipt(&order_id, &received)?;
                Response::encode(&decision.to_message())
            }
            Operation::ResetOrders => Response::encode(&engine.reset_orders()?),
        }
    }
}
