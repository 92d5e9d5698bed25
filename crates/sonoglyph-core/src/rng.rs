// Copyright 2026 The Sonoglyph Authors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

/// A minimal, zero-dependency, completely insecure PRNG to shuffle the cards.
pub struct TinyRng {
    state: u64,
}

const A: u64 = 6364136223846793005;
const C: u64 = 1442695040888963407;

impl TinyRng {
    /// Initialize the RNG from a seed.
    pub fn from_seed(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Seed from the wall clock's sub-second nanoseconds.
    #[cfg(feature = "clock")]
    pub fn from_clock() -> Self {
        let now = chrono::Utc::now();
        let seed = now.timestamp_nanos_opt().unwrap_or_else(|| now.timestamp_millis());
        Self::from_seed(seed as u64)
    }

    pub fn next_u32(&mut self) -> u32 {
        let new = self.state.wrapping_mul(A).wrapping_add(C);
        self.state = new;
        (new >> 32) as u32
    }

    /// Generate a uniformly distributed number in [0, max). Draws falling in
    /// the final partial block are rejected so that no value is favoured.
    pub fn generate(&mut self, max: u32) -> u32 {
        assert!(max > 0, "empty range");
        let zone = u32::MAX - (u32::MAX % max);
        loop {
            let n = self.next_u32();
            if n < zone {
                return n % max;
            }
        }
    }
}

/// Fisher-Yates shuffle.
pub fn shuffle<T>(v: Vec<T>, rng: &mut TinyRng) -> Vec<T> {
    let mut v = v;
    for i in (1..v.len()).rev() {
        let j = rng.generate(i as u32 + 1) as usize;
        v.swap(i, j);
    }
    v
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn test_generate_in_range() {
        let mut rng = TinyRng::from_seed(42);
        for max in 1..50 {
            for _ in 0..100 {
                assert!(rng.generate(max) < max);
            }
        }
    }

    #[test]
    fn test_shuffle_is_permutation() {
        let mut rng = TinyRng::from_seed(7);
        let v: Vec<u32> = (0..100).collect();
        let mut shuffled = shuffle(v.clone(), &mut rng);
        assert_ne!(shuffled, v);
        shuffled.sort();
        assert_eq!(shuffled, v);
    }

    #[test]
    fn test_shuffle_empty_and_single() {
        let mut rng = TinyRng::from_seed(1);
        assert_eq!(shuffle(Vec::<u8>::new(), &mut rng), Vec::<u8>::new());
        assert_eq!(shuffle(vec![9], &mut rng), vec![9]);
    }

    /// Every ordering of three elements should show up about 1/6 of the time.
    #[test]
    fn test_shuffle_uniformity() {
        let mut rng = TinyRng::from_seed(0xC0FFEE);
        let trials = 60_000;
        let mut counts: HashMap<Vec<u8>, usize> = HashMap::new();
        for _ in 0..trials {
            *counts.entry(shuffle(vec![0, 1, 2], &mut rng)).or_default() += 1;
        }
        assert_eq!(counts.len(), 6);
        let expected = trials / 6;
        for count in counts.values() {
            let deviation = (*count as f64 - expected as f64).abs() / expected as f64;
            assert!(deviation < 0.05, "count {count} too far from {expected}");
        }
    }
}
