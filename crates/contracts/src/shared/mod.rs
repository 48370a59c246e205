pub mod list;
pub mod response;
