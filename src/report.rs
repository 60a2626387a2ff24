use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::models::{Overview, ResumeAnalysis, TabSwitching};

// Everything the server left for the client to derive: stage series, the
// handful of percentage/rounding rules, and label formatting. Shared by the
// dashboard and the plain-text printer so both render identical numbers.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Overview,
    Assessment,
    Technical,
    Demographics,
}

impl Tab {
    pub const ALL: [Tab; 4] = [
        Tab::Overview,
        Tab::Assessment,
        Tab::Technical,
        Tab::Demographics,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Tab::Overview => "Overview",
            Tab::Assessment => "Assessment Performance",
            Tab::Technical => "Technical Insights",
            Tab::Demographics => "Demographics",
        }
    }

    pub fn index(self) -> usize {
        Self::ALL.iter().position(|t| *t == self).unwrap_or(0)
    }

    pub fn next(self) -> Tab {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Tab {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Application-progress bars in display order: everyone who applied, then
/// submissions still in flight, then finished ones.
pub fn stage_series(overview: &Overview) -> [(&'static str, u64); 3] {
    [
        ("Applied", overview.total_applications.max(0) as u64),
        ("Started", overview.incomplete_submissions.max(0) as u64),
        ("Completed", overview.complete_submissions.max(0) as u64),
    ]
}

/// Share of candidates who switched tabs at least once, rounded to the
/// nearest integer. `None` when nothing was recorded in either bucket.
pub fn non_compliant_pct(tabs: &TabSwitching) -> Option<u32> {
    let total = tabs.compliant + tabs.non_compliant;
    if total <= 0 {
        return None;
    }
    Some((tabs.non_compliant as f64 / total as f64 * 100.0).round() as u32)
}

pub fn success_pct(successes: i64, total: i64) -> Option<u32> {
    if total <= 0 {
        return None;
    }
    Some((successes as f64 / total as f64 * 100.0).round() as u32)
}

pub fn integrity_lines(tabs: &TabSwitching) -> Vec<String> {
    let concern = match non_compliant_pct(tabs) {
        Some(pct) => format!("{pct}% of candidates showed potential integrity concerns"),
        None => "Integrity concern rate: N/A".to_string(),
    };
    vec![
        format!("Average tab switches per candidate: {:.1}", tabs.average),
        format!("Maximum tab switches detected: {}", tabs.max),
        concern,
    ]
}

/// Keyword coverage split for the match-vs-gap chart, clamped to 0-100.
pub fn match_gap(resume: &ResumeAnalysis) -> (u64, u64) {
    let matched = resume.keyword_match.clamp(0.0, 100.0).round() as u64;
    (matched, 100 - matched)
}

// The backend serializes created_date three ways depending on the column
// type: RFC 2822 (jsonify on datetime), RFC 3339, or a bare date.
pub fn parse_created_date(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(dt.and_utc());
    }
    if let Ok(d) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(d.and_hms_opt(0, 0, 0)?.and_utc());
    }
    None
}

pub fn posted_label(created_date: &str, now: DateTime<Utc>) -> String {
    match parse_created_date(created_date) {
        Some(created) => {
            let days = (now - created).num_days().max(0);
            format!("Posted {days} days ago")
        }
        None => "Posted recently".to_string(),
    }
}

/// Compact MM-DD label for the timeline axis.
pub fn short_date(raw: &str) -> String {
    match parse_created_date(raw) {
        Some(dt) => dt.format("%m-%d").to_string(),
        None => truncate(raw, 5),
    }
}

pub fn company_initial(comp_name: Option<&str>) -> char {
    comp_name
        .and_then(|name| name.chars().next())
        .unwrap_or('C')
}

pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn sample_tabs() -> TabSwitching {
        TabSwitching {
            average: 1.256,
            max: 9,
            compliant: 80,
            non_compliant: 20,
        }
    }

    #[test]
    fn test_stage_series_order_and_mapping() {
        let overview = Overview {
            total_applications: 100,
            complete_submissions: 40,
            incomplete_submissions: 35,
            not_started: 25,
        };
        assert_eq!(
            stage_series(&overview),
            [("Applied", 100), ("Started", 35), ("Completed", 40)]
        );
    }

    #[test]
    fn test_integrity_lines_formatting() {
        let lines = integrity_lines(&sample_tabs());
        assert_eq!(lines[0], "Average tab switches per candidate: 1.3");
        assert_eq!(lines[1], "Maximum tab switches detected: 9");
        assert!(lines[2].starts_with("20%"));
    }

    #[test]
    fn test_non_compliant_pct_zero_denominator() {
        let tabs = TabSwitching {
            average: 0.0,
            max: 0,
            compliant: 0,
            non_compliant: 0,
        };
        assert_eq!(non_compliant_pct(&tabs), None);
        assert_eq!(integrity_lines(&tabs)[2], "Integrity concern rate: N/A");
    }

    #[test]
    fn test_success_pct_rounding() {
        assert_eq!(success_pct(90, 100), Some(90));
        assert_eq!(success_pct(1, 3), Some(33));
        assert_eq!(success_pct(2, 3), Some(67));
        assert_eq!(success_pct(0, 0), None);
        assert_eq!(success_pct(5, 0), None);
    }

    #[test]
    fn test_match_gap_split() {
        let resume = ResumeAnalysis {
            keyword_match: 72.0,
            relevance_score: 81.0,
        };
        assert_eq!(match_gap(&resume), (72, 28));
    }

    #[test]
    fn test_posted_label_three_days() {
        let now = Utc::now();
        let created = (now - Duration::days(3)).to_rfc3339();
        assert_eq!(posted_label(&created, now), "Posted 3 days ago");
    }

    #[test]
    fn test_posted_label_partial_day_floors() {
        let now = Utc::now();
        let created = (now - Duration::hours(71)).to_rfc3339();
        assert_eq!(posted_label(&created, now), "Posted 2 days ago");
    }

    #[test]
    fn test_parse_created_date_formats() {
        assert!(parse_created_date("Wed, 02 Oct 2024 00:00:00 GMT").is_some());
        assert!(parse_created_date("2024-10-02T00:00:00+00:00").is_some());
        assert!(parse_created_date("2024-10-02 14:30:00").is_some());
        assert!(parse_created_date("2024-10-02").is_some());
        assert!(parse_created_date("last tuesday").is_none());
    }

    #[test]
    fn test_tab_cycle() {
        assert_eq!(Tab::Overview.next(), Tab::Assessment);
        assert_eq!(Tab::Demographics.next(), Tab::Overview);
        assert_eq!(Tab::Overview.prev(), Tab::Demographics);
        assert_eq!(Tab::Technical.title(), "Technical Insights");
    }

    #[test]
    fn test_truncate_char_safe() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a very long job title here", 10), "a very ...");
        // Multi-byte input must not split a char boundary.
        assert_eq!(truncate("ステージエンジニア職", 8), "ステージエ...");
    }

    #[test]
    fn test_company_initial() {
        assert_eq!(company_initial(Some("PeppyPick")), 'P');
        assert_eq!(company_initial(None), 'C');
        assert_eq!(company_initial(Some("")), 'C');
    }
}
