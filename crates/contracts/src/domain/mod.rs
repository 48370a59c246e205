pub mod a001_purchase_draft;
pub mod a002_purchase_order;
pub mod common;
