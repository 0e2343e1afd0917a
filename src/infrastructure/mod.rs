pub mod catalog;
pub mod models;
pub mod order_store;
