//! DataObj Core
//!
//! This crate provides the object model that validation runs over:
//! - Value types (the Value enum with scalars, collections, nested objects and predicates)
//! - The DataObject accessor trait and the dynamic Record object
//! - Type descriptors with copy-on-write constraint tables
//! - Value-object equality, field-priority ordering and display rendering
//! - Common error types

pub mod display;
mod error;
mod id;
mod object;
pub mod semantics;
mod table;
mod types;
mod value;

pub use error::*;
pub use id::*;
pub use object::*;
pub use semantics::Comparison;
pub use table::*;
pub use types::*;
pub use value::*;
