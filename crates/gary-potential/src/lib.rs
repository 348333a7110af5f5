#![deny(missing_docs)]
#![doc = "Potential models and their human-readable documents: construction, reading and writing."]

/// Composite potentials and the single-or-composite sum type.
pub mod composite;
/// Document shape, encodings and the read/write traits.
pub mod document;
/// Canonical hashing helpers.
pub mod hash;
/// Path and stream entry points for reading and writing.
pub mod io;
/// Potential families and their parameter schemas.
pub mod kind;
/// Validated potential models.
pub mod model;
/// JSON and YAML serde helpers.
pub mod serde;

pub use composite::{CompositePotential, Potential};
pub use document::{DocumentFormat, FromDocument, PotentialDocument, ToDocument};
pub use hash::{fingerprint, stable_hash_string};
pub use io::{read, read_from, write, write_to};
pub use kind::{ParameterSpec, PotentialKind};
pub use model::PotentialModel;
