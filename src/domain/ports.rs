use uuid::Uuid;

use super::errors::OrderError;
use super::order::{OrderItemRequest, OrderView};

/// Persistence seam for the order flow. `place` must be atomic: either the
/// order, all of its lines, and every stock decrement are committed, or
/// nothing is.
pub trait OrderStore: Send + Sync + 'static {
    fn place(&self, customer_id: Uuid, items: Vec<OrderItemRequest>) -> Result<Uuid, OrderError>;
    fn find_by_id(&self, id: Uuid) -> Result<Option<OrderView>, OrderError>;
}
