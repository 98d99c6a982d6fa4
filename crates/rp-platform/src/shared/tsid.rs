//! TSID Generator
//!
//! Time-sorted 64-bit identifiers rendered as 13 Crockford Base32 characters.
//! Layout: 42 bits of epoch milliseconds, 10 random bits, 12 counter bits.

use std::sync::atomic::{AtomicU16, Ordering};

use chrono::Utc;

const ALPHABET: &[u8; 32] = b"0123456789ABCDEFGHJKMNPQRSTVWXYZ";
const ENCODED_LEN: usize = 13;

static COUNTER: AtomicU16 = AtomicU16::new(0);

pub struct TsidGenerator;

impl TsidGenerator {
    /// Generate a new TSID, e.g. "0HZXEQ5Y8JY5Z"
    pub fn generate() -> String {
        let now = Utc::now();
        let millis = now.timestamp_millis().max(0) as u64;
        let counter = COUNTER.fetch_add(1, Ordering::Relaxed) as u64;
        let random = Self::noise(now.timestamp_subsec_nanos(), counter) & 0x3FF;

        let value = ((millis & 0x3FF_FFFF_FFFF) << 22) | (random << 12) | (counter & 0xFFF);
        encode(value)
    }

    /// Epoch milliseconds embedded in a TSID.
    pub fn timestamp_millis(tsid: &str) -> Option<i64> {
        decode(tsid).map(|value| (value >> 22) as i64)
    }

    pub fn is_valid(tsid: &str) -> bool {
        decode(tsid).is_some()
    }

    fn noise(nanos: u32, counter: u64) -> u64 {
        (nanos as u64 ^ counter.wrapping_mul(0x5851_F42D_4C95_7F2D)).rotate_left(17)
    }
}

fn encode(mut value: u64) -> String {
    let mut out = [b'0'; ENCODED_LEN];
    for slot in out.iter_mut().rev() {
        *slot = ALPHABET[(value & 0x1F) as usize];
        value >>= 5;
    }
    out.iter().map(|&b| b as char).collect()
}

fn decode(s: &str) -> Option<u64> {
    if s.len() != ENCODED_LEN {
        return None;
    }

    s.chars().try_fold(0u64, |acc, c| {
        let c = match c.to_ascii_uppercase() {
            'O' => '0',
            'I' | 'L' => '1',
            other => other,
        };
        let digit = ALPHABET.iter().position(|&b| b as char == c)? as u64;
        Some((acc << 5) | digit)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generate_length_and_alphabet() {
        let id = TsidGenerator::generate();
        assert_eq!(id.len(), ENCODED_LEN);
        assert!(TsidGenerator::is_valid(&id));
    }

    #[test]
    fn test_uniqueness() {
        let ids: HashSet<String> = (0..1000).map(|_| TsidGenerator::generate()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn test_embedded_timestamp() {
        let before = Utc::now().timestamp_millis();
        let id = TsidGenerator::generate();
        let after = Utc::now().timestamp_millis();

        let ts = TsidGenerator::timestamp_millis(&id).unwrap();
        assert!(ts >= before && ts <= after);
    }

    #[test]
    fn test_sortability() {
        let id1 = TsidGenerator::generate();
        std::thread::sleep(std::time::Duration::from_millis(2));
        let id2 = TsidGenerator::generate();
        assert!(id1 < id2);
    }

    #[test]
    fn test_rejects_malformed() {
        assert!(!TsidGenerator::is_valid("1"));
        assert!(!TsidGenerator::is_valid("0HZXEQ5Y8JY5U"));
        assert!(TsidGenerator::is_valid("0hzxeq5y8jy5z"));
    }
}
