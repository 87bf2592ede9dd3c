//! Domain model structs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - An input struct carrying the writable columns, used for both insert
//!   and full update

pub mod blog;
pub mod category;
pub mod entry;
pub mod tag;
