//! Derived intent tallies for the admin dashboard.

use std::collections::HashMap;

use shopmate_core::QueryLogEntry;

use crate::classifier::{classify, Intent};

/// Replays the query log through the classifier and tallies intents, sorted
/// by count descending (label ascending on ties). Nothing is cached: the
/// report always reflects the log as it stands.
pub fn intent_tallies(log: &[QueryLogEntry]) -> Vec<(Intent, usize)> {
    let mut counts: HashMap<Intent, usize> = HashMap::new();
    for entry in log {
        *counts.entry(classify(&entry.query)).or_insert(0) += 1;
    }

    let mut tallies: Vec<(Intent, usize)> = counts.into_iter().collect();
    tallies.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.label().cmp(b.0.label())));
    tallies
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use shopmate_core::QueryLogEntry;

    use super::intent_tallies;
    use crate::classifier::Intent;

    fn entry(query: &str) -> QueryLogEntry {
        QueryLogEntry { query: query.to_string(), response: String::new(), at: Utc::now() }
    }

    #[test]
    fn tallies_sort_by_count_then_label() {
        let log = vec![
            entry("search shoes"),
            entry("search coffee"),
            entry("view cart"),
            entry("track order 1"),
        ];

        let tallies = intent_tallies(&log);
        assert_eq!(tallies[0], (Intent::ProductSearch, 2));
        // The two singletons tie on count and fall back to label order.
        assert_eq!(tallies[1], (Intent::TrackOrder, 1));
        assert_eq!(tallies[2], (Intent::ViewCart, 1));
    }

    #[test]
    fn empty_log_produces_no_tallies() {
        assert!(intent_tallies(&[]).is_empty());
    }

    #[test]
    fn report_reflects_the_current_log_only() {
        let mut log = vec![entry("any coupon today")];
        assert_eq!(intent_tallies(&log).len(), 1);

        log.push(entry("any promo codes"));
        assert_eq!(intent_tallies(&log), vec![(Intent::Coupon, 2)]);
    }
}
