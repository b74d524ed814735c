use sha2::{Digest, Sha256};

/// Deterministic random source keyed by a string seed.
///
/// Every value is a pure function of `(seed, index)`: there is no internal
/// state to advance, so the same seed always produces the same sequence no
/// matter in which order values are asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeededRng {
    key: u64,
}

impl SeededRng {
    pub fn new(seed: &str) -> Self {
        let hash = Sha256::digest(seed.as_bytes());
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&hash[..8]);
        Self {
            key: u64::from_le_bytes(bytes),
        }
    }

    /// Value in `[0, 1)` for the given index.
    pub fn value(&self, index: usize) -> f64 {
        let bits = splitmix64(self.key ^ splitmix64(index as u64));
        // 53 significant bits, so the result is strictly below 1.0
        (bits >> 11) as f64 / (1u64 << 53) as f64
    }

    /// `floor(value(index) * bound)`, always below `bound`.
    pub fn index_below(&self, index: usize, bound: usize) -> usize {
        if bound == 0 {
            return 0;
        }
        ((self.value(index) * bound as f64) as usize).min(bound - 1)
    }

    /// Fisher–Yates: walking from the last element down, swap `i` with
    /// `floor(value(i) * (i + 1))`.
    pub fn shuffle<T>(&self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.index_below(i, i + 1);
            items.swap(i, j);
        }
    }
}

/// `seededRandom(seed, index)` as a free function.
pub fn seeded_random(seed: &str, index: usize) -> f64 {
    SeededRng::new(seed).value(index)
}

fn splitmix64(x: u64) -> u64 {
    let mut z = x.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
