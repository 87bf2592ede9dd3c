//! Domain types shared by the persistence and HTTP layers.
//!
//! - [`types`]: primary key and timestamp aliases
//! - [`error`]: domain-level [`error::CoreError`]
//! - [`dto`]: wire representations of every resource, with validation rules
//! - [`pagination`]: page requests, sorting and result pages

pub mod dto;
pub mod error;
pub mod pagination;
pub mod types;
