//! CRC32 checksums for log records
//!
//! Every record carries a checksum over its framing and body. Replay
//! verifies it on every read; a mismatch aborts the store open.

use crc32fast::Hasher;

/// Computes a CRC32 checksum over the provided bytes.
///
/// Deterministic: the same input always produces the same output.
pub fn compute_checksum(data: &[u8]) -> u32 {
    let mut hasher = Hasher::new();
    hasher.update(data);
    hasher.finalize()
}

/// Returns whether the computed checksum matches the expected one.
pub fn verify_checksum(data: &[u8], expected: u32) -> bool {
    compute_checksum(data) == expected
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checksum_deterministic() {
        let data = b"book record bytes";
        assert_eq!(compute_checksum(data), compute_checksum(data));
    }

    #[test]
    fn test_checksum_detects_single_bit_flip() {
        let data = b"book record bytes".to_vec();
        let checksum = compute_checksum(&data);

        let mut corrupted = data.clone();
        corrupted[3] ^= 0x01;
        assert!(!verify_checksum(&corrupted, checksum));
    }

    #[test]
    fn test_verify_matches_compute() {
        let data = b"another payload";
        assert!(verify_checksum(data, compute_checksum(data)));
    }
}
