pub mod amount_words;
pub mod api_utils;
pub mod components;
pub mod date_utils;
pub mod dialogs;
pub mod errors;
pub mod export;
pub mod icons;
pub mod list_utils;
pub mod modal_frame;
pub mod money;
pub mod page_frame;
