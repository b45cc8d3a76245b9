//! Core mapping logic: records, predicates, and SQL synthesis.

pub mod mapper;
pub mod predicate;
pub mod record;
pub mod sql;
pub mod transfer;

pub use mapper::Database;
pub use predicate::{IntoValue, Predicate};
pub use record::Record;
