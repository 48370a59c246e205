pub mod items_modal;
pub mod list;
pub mod payment_modal;
pub mod receipt;
pub mod table;
