use chrono::{DateTime, Utc};

use crate::models::LanguageStat;

const MILLIS_PER_YEAR: f64 = 1000.0 * 60.0 * 60.0 * 24.0 * 365.0;

/// Repository counts per primary language, in first-seen order so that
/// equal counts keep a stable order after sorting.
#[derive(Debug, Clone, Default)]
pub struct LanguageTally {
    counts: Vec<(String, u32)>,
}

impl LanguageTally {
    pub fn add(&mut self, language: &str) {
        match self.counts.iter_mut().find(|(name, _)| name.as_str() == language) {
            Some((_, count)) => *count += 1,
            None => self.counts.push((language.to_string(), 1)),
        }
    }

    pub fn total(&self) -> u32 {
        self.counts.iter().map(|(_, count)| count).sum()
    }

    /// Most used first; percentages are relative to classified repositories
    /// only and rounded to two decimals.
    pub fn into_stats(self) -> Vec<LanguageStat> {
        let total = self.total();
        if total == 0 {
            return Vec::new();
        }

        let mut counts = self.counts;
        counts.sort_by(|a, b| b.1.cmp(&a.1));

        counts
            .into_iter()
            .map(|(language, count)| LanguageStat {
                language,
                count,
                percentage: round_to(count as f64 / total as f64 * 100.0, 2),
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RepoTotals {
    pub stars: u64,
    pub forks: u64,
    pub size_kb: u64,
    pub open_issues: u64,
    pub watchers: u64,
}

pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Continuous account age in 365-day years. Negative spans clamp to zero.
pub fn account_age_years(created_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> f64 {
    created_at
        .map(|created| (now - created).num_milliseconds() as f64 / MILLIS_PER_YEAR)
        .unwrap_or(0.0)
        .max(0.0)
}
