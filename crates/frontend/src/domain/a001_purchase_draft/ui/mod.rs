pub mod convert_dialog;
pub mod table;
