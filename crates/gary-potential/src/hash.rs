use gary_core::errors::GaryError;
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::document::ToDocument;
use crate::serde::to_canonical_json_bytes;

/// Computes a stable SHA256 hash for the provided serializable value.
pub fn stable_hash_string<T: Serialize>(value: &T) -> Result<String, GaryError> {
    let bytes = to_canonical_json_bytes(value)?;
    let digest = Sha256::digest(&bytes);
    Ok(format!("{:x}", digest))
}

/// Fingerprint of a potential's document form, independent of the on-disk format.
pub fn fingerprint<P: ToDocument + ?Sized>(potential: &P) -> Result<String, GaryError> {
    stable_hash_string(&potential.to_document()?)
}
