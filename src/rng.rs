/// Injectable random-roll source for encounter scheduling, loot tables, and
/// combat variance. Production code draws fresh entropy per roll; tests
/// construct a scripted sequence so every outcome is predictable.
#[derive(Debug, Clone)]
pub struct RollRng {
    scripted: Option<Vec<u8>>,
    index: usize,
}

impl RollRng {
    /// A source backed by real entropy.
    pub fn new_random() -> Self {
        Self {
            scripted: None,
            index: 0,
        }
    }

    /// A source that replays the given rolls (each in 0..=99) in order.
    /// Exhausting the script is a test bug and panics with the reason of the
    /// roll that failed.
    pub fn new_scripted(rolls: Vec<u8>) -> Self {
        Self {
            scripted: Some(rolls),
            index: 0,
        }
    }

    /// Draw the next roll, uniform in 0..=99.
    pub fn next_roll(&mut self, reason: &str) -> u8 {
        match &self.scripted {
            Some(rolls) => {
                if self.index >= rolls.len() {
                    panic!(
                        "RollRng script exhausted! Tried to get a value for: '{}'. Need more rolls.",
                        reason
                    );
                }
                let roll = rolls[self.index];

                #[cfg(test)]
                println!("[RNG] Consumed {} for: {}", roll, reason);

                self.index += 1;
                roll % 100
            }
            None => {
                use rand::Rng;
                rand::rng().random_range(0..100)
            }
        }
    }

    /// True with the given percent probability.
    pub fn chance(&mut self, percent: u8, reason: &str) -> bool {
        self.next_roll(reason) < percent
    }

    /// A multiplicative factor uniform in [lo, hi). A scripted roll of 0
    /// yields exactly `lo`.
    pub fn factor(&mut self, lo: f64, hi: f64, reason: &str) -> f64 {
        lo + (hi - lo) * f64::from(self.next_roll(reason)) / 100.0
    }

    /// An integer uniform across the inclusive range [lo, hi].
    pub fn pick_range(&mut self, lo: u32, hi: u32, reason: &str) -> u32 {
        if hi <= lo {
            return lo;
        }
        let span = hi - lo + 1;
        lo + (u32::from(self.next_roll(reason)) * span) / 100
    }

    /// Pick an index from a weighted table. Zero-weight entries are never
    /// selected; an all-zero table falls back to index 0.
    pub fn weighted_index(&mut self, weights: &[u32], reason: &str) -> usize {
        let total: u32 = weights.iter().sum();
        if total == 0 {
            return 0;
        }
        let mut point = (u32::from(self.next_roll(reason)) * total) / 100;
        for (i, &weight) in weights.iter().enumerate() {
            if point < weight {
                return i;
            }
            point -= weight;
        }
        weights.len() - 1
    }
}
