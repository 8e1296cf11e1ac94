//! Deadline and renewal-window alerting
//!
//! Two independent scans: date mentions that resolve inside the alert window
//! become deadline alerts, and durations surrounded by renewal vocabulary
//! become renewal-window alerts.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use lazy_static::lazy_static;
use regex::Regex;
use shared_types::Alert;
use tracing::debug;

use crate::extractors::entities::{DATE, DURATION};
use crate::patterns::context_window;

/// Default look-ahead for deadline alerts
pub const DEFAULT_WINDOW_DAYS: i64 = 60;

/// Characters inspected on each side of a duration
const RENEWAL_CONTEXT_CHARS: usize = 60;

lazy_static! {
    static ref RENEWAL_VOCAB: Regex = Regex::new(r"(?i)renew|term|expire").unwrap();
    static ref NUMERIC_DATE: Regex =
        Regex::new(r"^(\d{1,2})[-/. ](\d{1,2})[-/. ](\d{2,4})$").unwrap();
    static ref ISO_DATE: Regex = Regex::new(r"^(\d{4})-(\d{2})-(\d{2})$").unwrap();
    static ref SPELLED_DATE: Regex = Regex::new(r"^([A-Za-z]+)\.? (\d{1,2}), (\d{4})$").unwrap();
}

fn month_from_name(name: &str) -> Option<u32> {
    const MONTHS: [&str; 12] = [
        "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
    ];
    let lower = name.to_lowercase();
    let prefix = lower.get(..3)?;
    MONTHS
        .iter()
        .position(|m| *m == prefix)
        .map(|idx| idx as u32 + 1)
}

/// Two-digit years pivot at 70: `24` is 2024, `85` is 1985
fn expand_year(raw: &str) -> Option<i32> {
    let year: i32 = raw.parse().ok()?;
    match raw.len() {
        2 if year < 70 => Some(2000 + year),
        2 => Some(1900 + year),
        4 => Some(year),
        _ => None,
    }
}

/// Resolve a matched date excerpt to a calendar date
///
/// Numeric dates are read month-first; when the first field cannot be a
/// month they are read day-first instead. Unresolvable text yields `None`.
pub fn parse_lenient_date(excerpt: &str) -> Option<NaiveDate> {
    let excerpt = excerpt.trim();

    if let Some(caps) = ISO_DATE.captures(excerpt) {
        return NaiveDate::from_ymd_opt(
            caps[1].parse().ok()?,
            caps[2].parse().ok()?,
            caps[3].parse().ok()?,
        );
    }

    if let Some(caps) = NUMERIC_DATE.captures(excerpt) {
        let first: u32 = caps[1].parse().ok()?;
        let second: u32 = caps[2].parse().ok()?;
        let year = expand_year(&caps[3])?;
        return NaiveDate::from_ymd_opt(year, first, second)
            .or_else(|| NaiveDate::from_ymd_opt(year, second, first));
    }

    if let Some(caps) = SPELLED_DATE.captures(excerpt) {
        let month = month_from_name(&caps[1])?;
        return NaiveDate::from_ymd_opt(caps[3].parse().ok()?, month, caps[2].parse().ok()?);
    }

    None
}

/// Alerts relative to an explicit `now`
pub fn upcoming_alerts_at(text: &str, now: NaiveDateTime, window_days: i64) -> Vec<Alert> {
    let mut alerts = Vec::new();
    let horizon = now + Duration::days(window_days);

    for m in DATE.find_iter(text) {
        let excerpt = m.as_str();
        let Some(date) = parse_lenient_date(excerpt) else {
            debug!("Skipping unparseable date {:?}", excerpt);
            continue;
        };
        let Some(when) = date.and_hms_opt(0, 0, 0) else {
            continue;
        };
        if now <= when && when <= horizon {
            alerts.push(Alert::Deadline {
                when,
                excerpt: excerpt.to_string(),
            });
        }
    }

    for m in DURATION.find_iter(text) {
        let context = context_window(text, m.start(), m.end(), RENEWAL_CONTEXT_CHARS);
        if RENEWAL_VOCAB.is_match(context) {
            alerts.push(Alert::RenewalWindow {
                duration: m.as_str().to_string(),
                context: context.trim().to_string(),
            });
        }
    }

    alerts
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_parses_each_date_form() {
        let d = |y, m, dd| NaiveDate::from_ymd_opt(y, m, dd);
        assert_eq!(parse_lenient_date("2024-02-15"), d(2024, 2, 15));
        assert_eq!(parse_lenient_date("02/03/2024"), d(2024, 2, 3));
        assert_eq!(parse_lenient_date("15/01/2024"), d(2024, 1, 15));
        assert_eq!(parse_lenient_date("3.4.24"), d(2024, 3, 4));
        assert_eq!(parse_lenient_date("January 5, 2024"), d(2024, 1, 5));
        assert_eq!(parse_lenient_date("Sept. 30, 2024"), d(2024, 9, 30));
    }

    #[test]
    fn test_impossible_dates_do_not_parse() {
        assert_eq!(parse_lenient_date("2024-13-45"), None);
        assert_eq!(parse_lenient_date("31/31/2024"), None);
        assert_eq!(parse_lenient_date("February 30, 2024"), None);
        assert_eq!(parse_lenient_date("01/02/123"), None);
    }

    #[test]
    fn test_deadline_inside_window_alerts() {
        let now = at(2024, 1, 1);
        let alerts = upcoming_alerts_at("Payment due 2024-02-15.", now, 60);
        assert_eq!(
            alerts,
            vec![Alert::Deadline {
                when: at(2024, 2, 15),
                excerpt: "2024-02-15".to_string(),
            }]
        );
    }

    #[test]
    fn test_deadline_outside_window_is_ignored() {
        let now = at(2024, 1, 1);
        assert!(upcoming_alerts_at("Payment due 2024-06-01.", now, 60).is_empty());
        assert!(upcoming_alerts_at("Signed 2023-12-01.", now, 60).is_empty());
    }

    #[test]
    fn test_unparseable_dates_are_skipped() {
        let now = at(2024, 1, 1);
        let alerts = upcoming_alerts_at("Dated 2024-13-45 and 2024-01-20.", now, 60);
        assert_eq!(alerts.len(), 1);
    }

    #[test]
    fn test_duration_near_renewal_vocabulary_alerts() {
        let now = at(2024, 1, 1);
        let text = "This agreement renews automatically for 12 months unless cancelled.";
        assert_eq!(
            upcoming_alerts_at(text, now, 60),
            vec![Alert::RenewalWindow {
                duration: "12 months".to_string(),
                context: text.to_string(),
            }]
        );
    }

    #[test]
    fn test_duration_without_renewal_vocabulary_is_ignored() {
        let now = at(2024, 1, 1);
        assert!(upcoming_alerts_at("Deliver the goods within 10 days.", now, 60).is_empty());
    }

    #[test]
    fn test_dates_are_reported_before_durations() {
        let now = at(2024, 1, 1);
        let text = "The term is 2 years. It expires on 2024-01-31.";
        let alerts = upcoming_alerts_at(text, now, 60);
        assert_eq!(alerts.len(), 2);
        assert!(matches!(alerts[0], Alert::Deadline { .. }));
        assert!(matches!(alerts[1], Alert::RenewalWindow { .. }));
    }
}
