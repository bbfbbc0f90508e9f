/// Number of assigned students per preference rank (0 is the first choice).
/// Every assigned student is counted at exactly one rank.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct RankHistogram {
    counts: Vec<usize>,
}

impl RankHistogram {
    pub fn record(&mut self, rank: usize) {
        if self.counts.len() <= rank {
            self.counts.resize(rank + 1, 0);
        }
        self.counts[rank] += 1;
    }

    pub fn count(&self, rank: usize) -> usize {
        self.counts.get(rank).copied().unwrap_or(0)
    }

    /// Counts up to the last non-empty rank.
    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// Percentage of assigned students who got this rank, 0 when nobody
    /// has been assigned.
    pub fn percent(&self, rank: usize) -> f64 {
        match self.total() {
            0 => 0.0,
            total => self.count(rank) as f64 * 100.0 / total as f64,
        }
    }

    pub fn first_choice_percent(&self) -> f64 {
        self.percent(0)
    }

    /// Running totals and their percentage, one entry per rank.
    pub fn cumulative(&self) -> Vec<(usize, f64)> {
        let total = self.total();
        self.counts
            .iter()
            .scan(0, |s, &r| {
                *s += r;
                Some(*s)
            })
            .map(|c| (c, 100.0 * c as f64 / total as f64))
            .collect()
    }
}
