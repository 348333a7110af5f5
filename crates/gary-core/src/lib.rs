#![deny(missing_docs)]
#![doc = "Core error types and unit systems for gary potential documents."]

pub mod errors;
pub mod units;

pub use errors::{ErrorInfo, GaryError};
pub use units::{BaseDimension, PhysicalType, Unit, UnitExpr, UnitSystem};
