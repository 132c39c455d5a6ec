//! Shard routing for settlement workers
//!
//! Account ids are projected onto a fixed-width hex key space; each worker
//! owns one contiguous half-open interval of that space. All keys have the
//! same width, so lexicographic order on keys equals numeric order and the
//! store can range-scan them directly.

use sha2::{Digest, Sha256};

/// Width of a shard key in hex characters (64 bits)
pub const SHARD_KEY_LEN: usize = 16;

const KEY_SPACE: u128 = 1 << 64;

/// Map an account id to its shard key
///
/// Deterministic and uniform: the first 8 bytes of SHA-256 over the id,
/// zero-padded lowercase hex.
pub fn shard_key(account_id: &str) -> String {
    let digest = Sha256::digest(account_id.as_bytes());
    let mut prefix = [0u8; 8];
    prefix.copy_from_slice(&digest[..8]);
    format!("{:016x}", u64::from_be_bytes(prefix))
}

/// A half-open interval `[start, end)` of the shard key space
///
/// `end` is `None` for the last shard, whose interval is unbounded above.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShardRange {
    pub start: String,
    pub end: Option<String>,
}

impl ShardRange {
    /// Whether a shard key falls inside this range
    pub fn contains(&self, key: &str) -> bool {
        key >= self.start.as_str()
            && match &self.end {
                Some(end) => key < end.as_str(),
                None => true,
            }
    }
}

/// A settlement worker's shard assignment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShardAssignment {
    index: u32,
    count: u32,
}

impl ShardAssignment {
    /// Validate and build an assignment
    pub fn new(index: u32, count: u32) -> Result<Self, String> {
        if count == 0 {
            return Err("shard count must be at least 1".to_string());
        }
        if index >= count {
            return Err(format!(
                "shard index {} out of range for {} shards",
                index, count
            ));
        }
        Ok(Self { index, count })
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    /// The key interval this worker settles
    pub fn range(&self) -> ShardRange {
        let start = (KEY_SPACE * self.index as u128 / self.count as u128) as u64;
        let end = if self.index + 1 == self.count {
            None
        } else {
            Some(format!(
                "{:016x}",
                (KEY_SPACE * (self.index + 1) as u128 / self.count as u128) as u64
            ))
        };

        ShardRange {
            start: format!("{:016x}", start),
            end,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_deterministic_and_fixed_width() {
        let a = shard_key("account-1");
        let b = shard_key("account-1");
        assert_eq!(a, b);
        assert_eq!(a.len(), SHARD_KEY_LEN);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn distinct_ids_spread_across_keys() {
        let a = shard_key("account-1");
        let b = shard_key("account-2");
        assert_ne!(a, b);
    }

    #[test]
    fn every_key_falls_in_exactly_one_range() {
        for count in [1u32, 2, 3, 7, 16] {
            let ranges: Vec<ShardRange> = (0..count)
                .map(|i| ShardAssignment::new(i, count).unwrap().range())
                .collect();

            for n in 0..200 {
                let key = shard_key(&format!("account-{}", n));
                let owners = ranges.iter().filter(|r| r.contains(&key)).count();
                assert_eq!(owners, 1, "key {} owned by {} ranges of {}", key, owners, count);
            }
        }
    }

    #[test]
    fn ranges_tile_the_key_space() {
        let count = 4;
        let ranges: Vec<ShardRange> = (0..count)
            .map(|i| ShardAssignment::new(i, count).unwrap().range())
            .collect();

        assert_eq!(ranges[0].start, "0000000000000000");
        assert!(ranges.last().unwrap().end.is_none());
        for pair in ranges.windows(2) {
            assert_eq!(pair[0].end.as_deref(), Some(pair[1].start.as_str()));
        }
    }

    #[test]
    fn rejects_invalid_assignments() {
        assert!(ShardAssignment::new(0, 0).is_err());
        assert!(ShardAssignment::new(2, 2).is_err());
        assert!(ShardAssignment::new(1, 2).is_ok());
    }
}
