use uuid::Uuid;

use crate::domain::errors::OrderError;
use crate::domain::order::{OrderItemRequest, OrderView};
use crate::domain::ports::OrderStore;

pub struct OrderService<S> {
    store: S,
}

impl<S: OrderStore> OrderService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Place an order for `customer_id`. Shape validation happens here,
    /// before any store access: an empty item list or a non-positive
    /// quantity is rejected without opening a transaction.
    pub fn place_order(
        &self,
        customer_id: Uuid,
        items: Vec<OrderItemRequest>,
    ) -> Result<Uuid, OrderError> {
        if items.is_empty() {
            return Err(OrderError::InvalidInput(
                "order must contain at least one item".to_string(),
            ));
        }
        for item in &items {
            if item.quantity <= 0 {
                return Err(OrderError::InvalidInput(format!(
                    "quantity for product {} must be positive, got {}",
                    item.product_id, item.quantity
                )));
            }
        }

        let items = aggregate_items(items)?;
        self.store.place(customer_id, items)
    }

    pub fn get_order(&self, id: Uuid) -> Result<Option<OrderView>, OrderError> {
        self.store.find_by_id(id)
    }
}

/// Merge duplicate product ids, summing their quantities, so stock
/// validation sees each product's cumulative demand once. Naive per-line
/// checks would let two lines for the same product both pass against the
/// same pre-decrement stock. First-occurrence order is preserved.
fn aggregate_items(items: Vec<OrderItemRequest>) -> Result<Vec<OrderItemRequest>, OrderError> {
    let mut merged: Vec<OrderItemRequest> = Vec::with_capacity(items.len());
    for item in items {
        match merged.iter_mut().find(|m| m.product_id == item.product_id) {
            Some(existing) => {
                existing.quantity = existing.quantity.checked_add(item.quantity).ok_or_else(
                    || {
                        OrderError::InvalidInput(format!(
                            "total quantity for product {} overflows",
                            item.product_id
                        ))
                    },
                )?;
            }
            None => merged.push(item),
        }
    }
    Ok(merged)
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    /// Fake store recording what the service handed to it.
    struct RecordingStore {
        placed: Mutex<Vec<(Uuid, Vec<OrderItemRequest>)>>,
    }

    impl RecordingStore {
        fn new() -> Self {
            Self {
                placed: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<(Uuid, Vec<OrderItemRequest>)> {
            self.placed.lock().unwrap().clone()
        }
    }

    impl OrderStore for std::sync::Arc<RecordingStore> {
        fn place(
            &self,
            customer_id: Uuid,
            items: Vec<OrderItemRequest>,
        ) -> Result<Uuid, OrderError> {
            self.placed.lock().unwrap().push((customer_id, items));
            Ok(Uuid::new_v4())
        }

        fn find_by_id(&self, _id: Uuid) -> Result<Option<OrderView>, OrderError> {
            Ok(None)
        }
    }

    fn item(product_id: Uuid, quantity: i32) -> OrderItemRequest {
        OrderItemRequest {
            product_id,
            quantity,
        }
    }

    #[test]
    fn empty_item_list_is_rejected_before_store_access() {
        let store = std::sync::Arc::new(RecordingStore::new());
        let service = OrderService::new(store.clone());

        let err = service.place_order(Uuid::new_v4(), vec![]).unwrap_err();

        assert!(matches!(err, OrderError::InvalidInput(_)));
        assert!(store.calls().is_empty(), "store must not be touched");
    }

    #[test]
    fn zero_quantity_is_rejected_before_store_access() {
        let store = std::sync::Arc::new(RecordingStore::new());
        let service = OrderService::new(store.clone());

        let err = service
            .place_order(Uuid::new_v4(), vec![item(Uuid::new_v4(), 0)])
            .unwrap_err();

        assert!(matches!(err, OrderError::InvalidInput(_)));
        assert!(store.calls().is_empty());
    }

    #[test]
    fn negative_quantity_is_rejected_even_when_other_lines_are_valid() {
        let store = std::sync::Arc::new(RecordingStore::new());
        let service = OrderService::new(store.clone());

        let err = service
            .place_order(
                Uuid::new_v4(),
                vec![item(Uuid::new_v4(), 3), item(Uuid::new_v4(), -1)],
            )
            .unwrap_err();

        assert!(matches!(err, OrderError::InvalidInput(_)));
        assert!(store.calls().is_empty());
    }

    #[test]
    fn duplicate_product_lines_are_aggregated() {
        let store = std::sync::Arc::new(RecordingStore::new());
        let service = OrderService::new(store.clone());
        let headphones = Uuid::new_v4();
        let keyboard = Uuid::new_v4();

        service
            .place_order(
                Uuid::new_v4(),
                vec![item(headphones, 2), item(keyboard, 1), item(headphones, 3)],
            )
            .expect("place failed");

        let calls = store.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(
            calls[0].1,
            vec![item(headphones, 5), item(keyboard, 1)],
            "duplicates merged, first-occurrence order kept"
        );
    }

    #[test]
    fn quantity_overflow_across_duplicates_is_invalid_input() {
        let store = std::sync::Arc::new(RecordingStore::new());
        let service = OrderService::new(store.clone());
        let product = Uuid::new_v4();

        let err = service
            .place_order(
                Uuid::new_v4(),
                vec![item(product, i32::MAX), item(product, 1)],
            )
            .unwrap_err();

        assert!(matches!(err, OrderError::InvalidInput(_)));
        assert!(store.calls().is_empty());
    }

    #[test]
    fn valid_request_reaches_the_store_unchanged() {
        let store = std::sync::Arc::new(RecordingStore::new());
        let service = OrderService::new(store.clone());
        let customer_id = Uuid::new_v4();
        let product = Uuid::new_v4();

        service
            .place_order(customer_id, vec![item(product, 2)])
            .expect("place failed");

        let calls = store.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, customer_id);
        assert_eq!(calls[0].1, vec![item(product, 2)]);
    }
}
