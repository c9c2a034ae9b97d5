use std::collections::HashSet;

use chrono::{DateTime, Duration, Utc};

use crate::models::analysis::{
    BestPracticesDetails, ConsistencyDetails, Details, DimensionScore, DocumentationDetails,
    ImpactDetails,
};
use crate::models::{Event, RepoDetail, Repository};

/// READMEs longer than this count as detailed.
pub const DETAILED_README_CHARS: usize = 500;
pub const CONSISTENCY_WINDOW_DAYS: i64 = 30;
/// Distinct active days in the window that earn a perfect consistency score.
pub const FULL_ACTIVITY_DAYS: f64 = 15.0;

pub(crate) fn clamp_score(raw: f64) -> u8 {
    raw.round().clamp(0.0, 100.0) as u8
}

fn ratio(part: usize, whole: usize) -> f64 {
    part as f64 / whole as f64
}

pub fn score_documentation(
    repo_details: &[RepoDetail],
) -> DimensionScore<Details<DocumentationDetails>> {
    if repo_details.is_empty() {
        return DimensionScore {
            score: 0,
            details: Details::Empty {},
        };
    }

    let checked = repo_details.len();
    let with_readme = repo_details.iter().filter(|r| r.readme.exists).count();
    let with_detailed_readme = repo_details
        .iter()
        .filter(|r| r.readme.length > DETAILED_README_CHARS)
        .count();

    // Having a README at all matters more than its depth
    let raw = ratio(with_readme, checked) * 70.0 + ratio(with_detailed_readme, checked) * 30.0;

    DimensionScore {
        score: clamp_score(raw),
        details: Details::Counted(DocumentationDetails {
            repos_checked: checked,
            with_readme,
            with_detailed_readme,
        }),
    }
}

pub fn score_consistency(events: &[Event], now: DateTime<Utc>) -> DimensionScore<ConsistencyDetails> {
    let window_start = now - Duration::days(CONSISTENCY_WINDOW_DAYS);

    let recent_pushes: Vec<&Event> = events
        .iter()
        .filter(|e| e.is_push() && e.created_at >= window_start)
        .collect();

    let active_days = recent_pushes
        .iter()
        .map(|e| e.created_at.date_naive())
        .collect::<HashSet<_>>()
        .len();

    let raw = active_days as f64 / FULL_ACTIVITY_DAYS * 100.0;

    DimensionScore {
        score: clamp_score(raw),
        details: ConsistencyDetails {
            push_events_last30_days: recent_pushes.len(),
            active_days,
        },
    }
}

pub fn score_impact(repos: &[Repository]) -> DimensionScore<ImpactDetails> {
    let total_stars: u64 = repos.iter().map(|r| r.stargazers_count as u64).sum();
    let total_forks: u64 = repos.iter().map(|r| r.forks_count as u64).sum();
    let total_repos = repos.len();

    // Log scaling so a single viral repo cannot carry the whole dimension.
    // The caps add up to exactly 100.
    let star_score = ((total_stars as f64 + 1.0).log2() * 5.0).min(40.0);
    let fork_score = ((total_forks as f64 + 1.0).log2() * 5.0).min(30.0);
    let repo_score = ((total_repos as f64 + 1.0).log2() * 6.0).min(30.0);

    DimensionScore {
        score: clamp_score(star_score + fork_score + repo_score),
        details: ImpactDetails {
            total_stars,
            total_forks,
            total_repos,
        },
    }
}

pub fn score_best_practices(
    repo_details: &[RepoDetail],
) -> DimensionScore<Details<BestPracticesDetails>> {
    if repo_details.is_empty() {
        return DimensionScore {
            score: 0,
            details: Details::Empty {},
        };
    }

    let checked = repo_details.len();
    let with_gitignore = repo_details.iter().filter(|r| r.has_gitignore).count();
    let with_description = repo_details.iter().filter(|r| r.has_description()).count();

    let raw = ratio(with_gitignore, checked) * 50.0 + ratio(with_description, checked) * 50.0;

    DimensionScore {
        score: clamp_score(raw),
        details: Details::Counted(BestPracticesDetails {
            repos_checked: checked,
            with_gitignore,
            with_description,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ReadmeInfo;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 30, 12, 0, 0).unwrap()
    }

    fn repo(name: &str, stars: u32, forks: u32) -> Repository {
        Repository {
            id: 0,
            name: name.to_string(),
            full_name: String::new(),
            description: Some(format!("{} description", name)),
            language: None,
            stargazers_count: stars,
            forks_count: forks,
            fork: false,
            html_url: String::new(),
            updated_at: None,
        }
    }

    fn detail(readme_len: Option<usize>, gitignore: bool, description: Option<&str>) -> RepoDetail {
        let mut r = repo("r", 0, 0);
        r.description = description.map(str::to_string);
        let readme = match readme_len {
            Some(len) => ReadmeInfo { exists: true, length: len },
            None => ReadmeInfo::missing(),
        };
        RepoDetail::new(&r, readme, gitignore)
    }

    fn push_at(days_ago: i64, hour: u32) -> Event {
        let day = (now() - Duration::days(days_ago)).date_naive();
        Event {
            event_type: "PushEvent".to_string(),
            created_at: day.and_hms_opt(hour, 0, 0).unwrap().and_utc(),
        }
    }

    #[test]
    fn test_documentation_empty_is_zero() {
        let score = score_documentation(&[]);
        assert_eq!(score.score, 0);
        assert_eq!(score.details, Details::Empty {});
    }

    #[test]
    fn test_documentation_mixed() {
        let details = vec![
            detail(Some(1200), true, Some("a")),
            detail(Some(100), true, Some("b")),
            detail(None, true, Some("c")),
            detail(None, true, Some("d")),
        ];
        // readme 2/4 * 70 = 35, detailed 1/4 * 30 = 7.5 -> 42.5 rounds to 43
        let score = score_documentation(&details);
        assert_eq!(score.score, 43);
        let counted = score.details.counted().unwrap();
        assert_eq!(counted.repos_checked, 4);
        assert_eq!(counted.with_readme, 2);
        assert_eq!(counted.with_detailed_readme, 1);
    }

    #[test]
    fn test_documentation_length_threshold_is_strict() {
        let score = score_documentation(&[detail(Some(DETAILED_README_CHARS), true, None)]);
        assert_eq!(score.score, 70);
        let score = score_documentation(&[detail(Some(DETAILED_README_CHARS + 1), true, None)]);
        assert_eq!(score.score, 100);
    }

    #[test]
    fn test_consistency_no_events() {
        let score = score_consistency(&[], now());
        assert_eq!(score.score, 0);
        assert_eq!(score.details.active_days, 0);
        assert_eq!(score.details.push_events_last30_days, 0);
    }

    #[test]
    fn test_consistency_counts_distinct_days_in_window() {
        let events = vec![
            push_at(0, 9),
            push_at(0, 15), // same day
            push_at(1, 10),
            push_at(29, 13),
            push_at(45, 10), // outside window
            Event {
                event_type: "WatchEvent".to_string(),
                created_at: now(),
            },
        ];
        let score = score_consistency(&events, now());
        assert_eq!(score.details.push_events_last30_days, 4);
        assert_eq!(score.details.active_days, 3);
        // 3 / 15 * 100 = 20
        assert_eq!(score.score, 20);
    }

    #[test]
    fn test_consistency_caps_at_100() {
        let events: Vec<_> = (0..25).map(|d| push_at(d, 12)).collect();
        let score = score_consistency(&events, now());
        assert_eq!(score.details.active_days, 25);
        assert_eq!(score.score, 100);
    }

    #[test]
    fn test_impact_zero() {
        let score = score_impact(&[]);
        assert_eq!(score.score, 0);
        assert_eq!(score.details.total_repos, 0);
    }

    #[test]
    fn test_impact_formula() {
        // stars 7 -> log2(8)*5 = 15, forks 3 -> log2(4)*5 = 10, repos 3 -> log2(4)*6 = 12
        let repos = vec![repo("a", 4, 1), repo("b", 2, 2), repo("c", 1, 0)];
        let score = score_impact(&repos);
        assert_eq!(score.details.total_stars, 7);
        assert_eq!(score.details.total_forks, 3);
        assert_eq!(score.score, 37);
    }

    #[test]
    fn test_impact_caps_at_100() {
        let repos: Vec<_> = (0..200).map(|i| repo(&i.to_string(), 10_000, 5_000)).collect();
        assert_eq!(score_impact(&repos).score, 100);
    }

    #[test]
    fn test_impact_is_monotonic() {
        let mut previous = 0;
        for stars in [0, 1, 5, 20, 100, 1_000, 100_000] {
            let score = score_impact(&[repo("a", stars, 0)]).score;
            assert!(score >= previous);
            previous = score;
        }

        let mut previous = 0;
        for count in [0usize, 1, 2, 5, 10, 50, 500] {
            let repos: Vec<_> = (0..count).map(|i| repo(&i.to_string(), 1, 1)).collect();
            let score = score_impact(&repos).score;
            assert!(score >= previous);
            previous = score;
        }
    }

    #[test]
    fn test_impact_monotonic_in_forks() {
        let mut previous = 0;
        for forks in [0, 1, 3, 7, 50, 1_000, 100_000, u32::MAX] {
            let score = score_impact(&[repo("a", 2, forks)]).score;
            assert!(score >= previous, "forks={} dropped the score", forks);
            previous = score;
        }
        // Fork component saturates at 30; one repo adds log2(2)*6 = 6
        assert_eq!(score_impact(&[repo("a", 0, u32::MAX)]).score, 36);
    }

    #[test]
    fn test_consistency_window_start_is_inclusive() {
        let push = |created_at| Event {
            event_type: "PushEvent".to_string(),
            created_at,
        };
        let window_start = now() - Duration::days(CONSISTENCY_WINDOW_DAYS);

        let score = score_consistency(&[push(window_start)], now());
        assert_eq!(score.details.push_events_last30_days, 1);
        assert_eq!(score.details.active_days, 1);

        let score = score_consistency(&[push(window_start - Duration::seconds(1))], now());
        assert_eq!(score.details.push_events_last30_days, 0);
        assert_eq!(score.details.active_days, 0);
    }

    #[test]
    fn test_best_practices_empty_is_zero() {
        let score = score_best_practices(&[]);
        assert_eq!(score.score, 0);
        assert!(score.details.counted().is_none());
    }

    #[test]
    fn test_best_practices_blank_description_does_not_count() {
        let details = vec![
            detail(None, true, Some("real description")),
            detail(None, false, Some("   ")),
        ];
        // gitignore 1/2 * 50 + description 1/2 * 50
        let score = score_best_practices(&details);
        assert_eq!(score.score, 50);
        let counted = score.details.counted().unwrap();
        assert_eq!(counted.with_gitignore, 1);
        assert_eq!(counted.with_description, 1);
    }
}
