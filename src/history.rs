use crate::util::{mean, std_dev};

/// Adjusted reaction times recorded this session, oldest first.
///
/// Append-only: entries are never reordered, deduplicated or removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
    entries: Vec<u64>,
}

/// How the latest result relates to the session best
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BestComparison {
    NewBest,
    Slower { best: u64, by: u64 },
    Faster { best: u64, by: u64 },
}

impl BestComparison {
    pub fn describe(&self) -> String {
        match self {
            BestComparison::NewBest => "New best time! 🏆".to_string(),
            BestComparison::Slower { best, by } => format!("Best: {best}ms ({by}ms slower)"),
            BestComparison::Faster { best, by } => format!("Best: {best}ms ({by}ms faster)"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Summary {
    pub rounds: usize,
    pub best: u64,
    pub mean: f64,
    pub std_dev: f64,
}

impl History {
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn push(&mut self, ms: u64) {
        self.entries.push(ms);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn as_slice(&self) -> &[u64] {
        &self.entries
    }

    pub fn last(&self) -> Option<u64> {
        self.entries.last().copied()
    }

    /// Lowest recorded time, recomputed on every call
    pub fn best(&self) -> Option<u64> {
        self.entries.iter().copied().min()
    }

    pub fn is_best(&self, ms: u64) -> bool {
        self.best() == Some(ms)
    }

    /// The last `n` entries, oldest first
    pub fn recent(&self, n: usize) -> &[u64] {
        let start = self.entries.len().saturating_sub(n);
        &self.entries[start..]
    }

    /// Compare `latest` against the best. Only meaningful once there is
    /// something to compare against, so `None` with fewer than two entries.
    pub fn compare(&self, latest: u64) -> Option<BestComparison> {
        if self.entries.len() < 2 {
            return None;
        }
        let best = self.best()?;
        Some(if latest == best {
            BestComparison::NewBest
        } else if latest > best {
            BestComparison::Slower {
                best,
                by: latest.abs_diff(best),
            }
        } else {
            BestComparison::Faster {
                best,
                by: latest.abs_diff(best),
            }
        })
    }

    pub fn summary(&self) -> Option<Summary> {
        Some(Summary {
            rounds: self.entries.len(),
            best: self.best()?,
            mean: mean(&self.entries)?,
            std_dev: std_dev(&self.entries)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn history(values: &[u64]) -> History {
        let mut h = History::new();
        for &v in values {
            h.push(v);
        }
        h
    }

    #[test]
    fn best_is_minimum() {
        assert_eq!(History::new().best(), None);
        assert_eq!(history(&[250, 180, 320, 180]).best(), Some(180));
    }

    #[test]
    fn keeps_insertion_order_and_duplicates() {
        let h = history(&[300, 100, 300]);
        assert_eq!(h.as_slice(), &[300, 100, 300]);
        assert_eq!(h.last(), Some(300));
    }

    #[test]
    fn recent_takes_tail() {
        let h = history(&[1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(h.recent(5), &[3, 4, 5, 6, 7]);
        assert_eq!(h.recent(50), &[1, 2, 3, 4, 5, 6, 7]);
        assert_eq!(h.recent(0), &[] as &[u64]);
    }

    #[test]
    fn compare_needs_two_results() {
        assert_eq!(history(&[200]).compare(200), None);
    }

    #[test]
    fn compare_new_best() {
        let h = history(&[250, 200]);
        assert_eq!(h.compare(200), Some(BestComparison::NewBest));
    }

    #[test]
    fn compare_slower() {
        let h = history(&[200, 260]);
        assert_matches!(h.compare(260), Some(BestComparison::Slower { best: 200, by: 60 }));
        assert_eq!(
            h.compare(260).map(|c| c.describe()),
            Some("Best: 200ms (60ms slower)".to_string())
        );
    }

    #[test]
    fn compare_faster_when_latest_not_recorded() {
        // a zero result is shown but never recorded, so it can undercut best
        let h = history(&[200, 260]);
        assert_matches!(h.compare(0), Some(BestComparison::Faster { best: 200, by: 200 }));
    }

    #[test]
    fn summary_stats() {
        assert_eq!(History::new().summary(), None);

        let s = history(&[100, 200, 300]).summary().unwrap();
        assert_eq!(s.rounds, 3);
        assert_eq!(s.best, 100);
        assert_eq!(s.mean, 200.0);
        assert!((s.std_dev - 81.64965809277261).abs() < 1e-9);
    }
}
