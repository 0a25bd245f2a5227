//! Dataset fingerprinting.

use sha2::{Digest, Sha256};

use crate::models::FactRow;

/// Calculate a SHA-256 fingerprint of the loaded fact rows.
///
/// Row order is significant: two loads yielding the same rows in a different
/// order produce different option orderings and therefore different fingerprints.
///
/// # Returns
/// Hexadecimal string representation of the SHA-256 hash.
pub fn dataset_fingerprint(rows: &[FactRow]) -> String {
    let mut hasher = Sha256::new();
    for row in rows {
        for field in [
            &row.indicator_code,
            &row.indicator_name,
            &row.region_code,
            &row.region_name,
            &row.sector_code,
            &row.sector_name,
            &row.gender_code,
            &row.gender_name,
            &row.status_code,
            &row.status_name,
        ] {
            hasher.update(field.as_bytes());
            hasher.update([0x1fu8]);
        }
        hasher.update(row.year.to_le_bytes());
        hasher.update(row.value.to_bits().to_le_bytes());
        hasher.update([0x1eu8]);
    }
    hex::encode(hasher.finalize())
}
