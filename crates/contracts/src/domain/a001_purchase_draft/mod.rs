pub mod aggregate;
pub mod dto;

pub use aggregate::{DraftItemSummary, DraftStatus, PurchaseDraft};
pub use dto::{parse_converted_order, ConvertDraftRequest, ConvertedOrder};
