// src/simulation/results.rs
use std::collections::BTreeMap;
use std::fmt;

/// Histogram of measured outcome integers over a number of shots.
///
/// Outcomes are the integers assembled from classical bits (bit `j` has
/// weight `2^j`); the sum of all counts equals `shots()`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MeasurementCounts {
    counts: BTreeMap<u64, u64>,
    shots: u64,
    num_clbits: u32,
}

impl MeasurementCounts {
    /// Creates an empty histogram for outcomes `num_clbits` bits wide.
    pub fn new(num_clbits: u32) -> Self {
        Self {
            counts: BTreeMap::new(),
            shots: 0,
            num_clbits,
        }
    }

    /// Builds a histogram from `(outcome, count)` pairs. Repeated outcomes
    /// accumulate; the classical width is the smallest that fits every outcome.
    pub fn from_counts<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (u64, u64)>,
    {
        let mut result = Self::new(0);
        for (outcome, count) in pairs {
            result.record_many(outcome, count);
            result.num_clbits = result.num_clbits.max(64 - outcome.leading_zeros());
        }
        result
    }

    /// Records one shot.
    pub(crate) fn record(&mut self, outcome: u64) {
        self.record_many(outcome, 1);
    }

    fn record_many(&mut self, outcome: u64, count: u64) {
        if count == 0 {
            return;
        }
        *self.counts.entry(outcome).or_insert(0) += count;
        self.shots += count;
    }

    /// Occurrences of `outcome` (0 if never observed).
    pub fn get(&self, outcome: u64) -> u64 {
        self.counts.get(&outcome).copied().unwrap_or(0)
    }

    /// Total number of shots recorded.
    pub fn shots(&self) -> u64 {
        self.shots
    }

    /// Width of the outcome integers in bits.
    pub fn num_clbits(&self) -> u32 {
        self.num_clbits
    }

    /// Number of distinct outcomes observed.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Returns `true` if no shot was recorded.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Observed `(outcome, count)` pairs in ascending outcome order.
    pub fn iter(&self) -> impl Iterator<Item = (u64, u64)> + '_ {
        self.counts.iter().map(|(outcome, count)| (*outcome, *count))
    }

    /// The outcome observed most often; ties go to the smaller outcome.
    pub fn most_frequent(&self) -> Option<(u64, u64)> {
        self.iter()
            .fold(None, |best: Option<(u64, u64)>, (outcome, count)| match best {
                Some((_, best_count)) if best_count >= count => best,
                _ => Some((outcome, count)),
            })
    }
}

impl fmt::Display for MeasurementCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Measurement counts ({} shots):", self.shots)?;
        if self.counts.is_empty() {
            return writeln!(f, "  No outcomes recorded.");
        }
        const BAR_WIDTH: u64 = 40;
        let width = self.num_clbits.max(1) as usize;
        let peak = self.counts.values().copied().max().unwrap_or(1);
        for (outcome, count) in &self.counts {
            let bar = "#".repeat((count * BAR_WIDTH / peak) as usize);
            writeln!(f, "  {:0width$b} ({:>5}): {:>6} {}", outcome, outcome, count, bar, width = width)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_counts_accumulates() {
        let counts = MeasurementCounts::from_counts([(5, 10), (2, 3), (5, 1), (7, 0)]);
        assert_eq!(counts.get(5), 11);
        assert_eq!(counts.get(2), 3);
        assert_eq!(counts.get(7), 0);
        assert_eq!(counts.shots(), 14);
        assert_eq!(counts.len(), 2);
        assert_eq!(counts.num_clbits(), 3);
    }

    #[test]
    fn test_most_frequent_prefers_smaller_outcome_on_tie() {
        let counts = MeasurementCounts::from_counts([(6, 4), (1, 4), (3, 2)]);
        assert_eq!(counts.most_frequent(), Some((1, 4)));
        assert_eq!(MeasurementCounts::new(2).most_frequent(), None);
    }

    #[test]
    fn test_display_lists_binary_outcomes() {
        let counts = MeasurementCounts::from_counts([(5, 2)]);
        let text = counts.to_string();
        assert!(text.contains("101"));
        assert!(text.contains("2 shots"));
    }
}
