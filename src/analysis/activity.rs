use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;

use crate::models::{Event, LanguageCount};

pub const TOP_LANGUAGE_LIMIT: usize = 6;

/// Distinct UTC dates with at least one push, oldest first.
pub fn push_dates(events: &[Event]) -> Vec<NaiveDate> {
    events
        .iter()
        .filter(|e| e.is_push())
        .map(|e| e.created_at.date_naive())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Length of the longest run of consecutive push days.
pub fn longest_streak(events: &[Event]) -> u32 {
    let dates = push_dates(events);
    let Some(first) = dates.first() else {
        return 0;
    };

    let mut longest = 1;
    let mut current = 1;
    let mut previous = *first;

    for date in dates.iter().skip(1) {
        if previous.succ_opt() == Some(*date) {
            current += 1;
        } else {
            current = 1;
        }
        longest = longest.max(current);
        previous = *date;
    }

    longest
}

/// Languages by repository count, most used first.
///
/// The sort is stable over the map's alphabetical order, so equal counts list
/// alphabetically.
pub fn top_languages(languages: &BTreeMap<String, u32>, limit: usize) -> Vec<LanguageCount> {
    let mut ranked: Vec<LanguageCount> = languages
        .iter()
        .map(|(name, count)| LanguageCount {
            name: name.clone(),
            count: *count,
        })
        .collect();

    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked.truncate(limit);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    fn event(kind: &str, timestamp: &str) -> Event {
        Event {
            event_type: kind.to_string(),
            created_at: DateTime::parse_from_rfc3339(timestamp)
                .unwrap()
                .with_timezone(&Utc),
        }
    }

    fn push(timestamp: &str) -> Event {
        event("PushEvent", timestamp)
    }

    #[test]
    fn test_streak_with_gap() {
        let events = vec![
            push("2024-01-10T08:00:00Z"),
            push("2024-01-02T08:00:00Z"),
            push("2024-01-01T08:00:00Z"),
            push("2024-01-03T23:59:59Z"),
            push("2024-01-02T18:30:00Z"),
        ];
        assert_eq!(longest_streak(&events), 3);
    }

    #[test]
    fn test_streak_no_pushes() {
        assert_eq!(longest_streak(&[]), 0);
        let events = vec![event("IssuesEvent", "2024-01-01T08:00:00Z")];
        assert_eq!(longest_streak(&events), 0);
    }

    #[test]
    fn test_streak_single_day() {
        assert_eq!(longest_streak(&[push("2024-03-05T08:00:00Z")]), 1);
    }

    #[test]
    fn test_streak_final_run_is_longest() {
        let events = vec![
            push("2024-01-01T08:00:00Z"),
            push("2024-01-05T08:00:00Z"),
            push("2024-01-06T08:00:00Z"),
            push("2024-01-07T08:00:00Z"),
            push("2024-01-08T08:00:00Z"),
        ];
        assert_eq!(longest_streak(&events), 4);
    }

    #[test]
    fn test_streak_crosses_month_boundary() {
        let events = vec![
            push("2024-02-28T08:00:00Z"),
            push("2024-02-29T08:00:00Z"),
            push("2024-03-01T08:00:00Z"),
        ];
        assert_eq!(longest_streak(&events), 3);
    }

    #[test]
    fn test_streak_uses_utc_dates() {
        // Same UTC day despite different offsets
        let events = vec![
            push("2024-01-01T23:30:00-01:00"),
            push("2024-01-02T05:00:00Z"),
        ];
        assert_eq!(push_dates(&events).len(), 1);
        assert_eq!(longest_streak(&events), 1);
    }

    #[test]
    fn test_top_languages_sorted_and_capped() {
        let languages: BTreeMap<String, u32> = [
            ("Rust", 5),
            ("Go", 2),
            ("Python", 7),
            ("C", 1),
            ("Java", 2),
            ("Shell", 1),
            ("TypeScript", 3),
            ("Zig", 1),
        ]
        .into_iter()
        .map(|(n, c)| (n.to_string(), c))
        .collect();

        let top = top_languages(&languages, TOP_LANGUAGE_LIMIT);
        assert_eq!(top.len(), 6);
        let names: Vec<_> = top.iter().map(|l| l.name.as_str()).collect();
        // Ties keep alphabetical order
        assert_eq!(names, vec!["Python", "Rust", "TypeScript", "Go", "Java", "C"]);
        assert!(top.windows(2).all(|w| w[0].count >= w[1].count));
    }

    #[test]
    fn test_top_languages_empty() {
        assert!(top_languages(&BTreeMap::new(), TOP_LANGUAGE_LIMIT).is_empty());
    }
}
