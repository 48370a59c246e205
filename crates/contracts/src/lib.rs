//! Общие контракты между frontend и backend POS:
//! сущности закупок, формат списков и чистые бизнес-правила над ними.

pub mod domain;
pub mod shared;
