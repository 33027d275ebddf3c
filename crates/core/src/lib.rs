//! `stockpilot-core` — domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns)
//! shared by the stock-adjustment workflow crates.

pub mod aggregate;
pub mod error;
pub mod id;
pub mod value_object;

pub use aggregate::{Aggregate, AggregateRoot, ExpectedVersion};
pub use error::{DomainError, DomainResult, ValidationError};
pub use id::{AggregateId, ProductId, StoreId, UserId};
pub use value_object::ValueObject;
