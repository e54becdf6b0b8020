//! Per-project notification rule semantics.
//!
//! A project either has a stored rule or falls back to the system
//! default. `days_before` is clamped to [`RULE_DAYS_MIN`, `RULE_DAYS_MAX`]
//! at write time only; resolved values are read verbatim.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

/// Days-before fallback when a project has no stored rule and no
/// `DAYS_BEFORE` override is configured.
pub const DEFAULT_DAYS_BEFORE: i32 = 3;

/// Lower clamp bound for `days_before` (remind on the due date itself).
pub const RULE_DAYS_MIN: i32 = 0;

/// Upper clamp bound for `days_before`.
pub const RULE_DAYS_MAX: i32 = 365;

/// The rule in effect for one project during one dispatch run.
///
/// Always a value: absence of a stored row resolves to
/// [`EffectiveRule::fallback`], never to a nullable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectiveRule {
    /// How many days before the due date reminders begin.
    pub days_before: i32,
    /// Whether the LINE channel is enabled.
    pub notify_line: bool,
    /// Whether the email channel is enabled.
    pub notify_email: bool,
}

impl EffectiveRule {
    /// The system default for projects without a stored rule: the given
    /// days-before window with both channels enabled.
    pub fn fallback(days_before: i32) -> Self {
        Self {
            days_before,
            notify_line: true,
            notify_email: true,
        }
    }
}

impl Default for EffectiveRule {
    fn default() -> Self {
        Self::fallback(DEFAULT_DAYS_BEFORE)
    }
}

/// Clamp a requested `days_before` into the valid range.
///
/// Applied on the rule write path; stored values are trusted thereafter.
pub fn clamp_days_before(days: i32) -> i32 {
    days.clamp(RULE_DAYS_MIN, RULE_DAYS_MAX)
}

/// Whether a deadline due on `due_date` falls inside the reminder window
/// for a run dated `today`.
///
/// Pure calendar-date comparison: `due_date <= today + days_before`.
/// Both dates must come from the same date source within one run.
pub fn within_window(due_date: NaiveDate, today: NaiveDate, days_before: i32) -> bool {
    // days_before is clamped non-negative at write time; saturate here
    // so the predicate is total over raw inputs too.
    let cutoff = today
        .checked_add_days(Days::new(days_before.max(0) as u64))
        .unwrap_or(NaiveDate::MAX);
    due_date <= cutoff
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn clamp_bounds() {
        assert_eq!(clamp_days_before(400), 365);
        assert_eq!(clamp_days_before(-5), 0);
        assert_eq!(clamp_days_before(0), 0);
        assert_eq!(clamp_days_before(365), 365);
        assert_eq!(clamp_days_before(14), 14);
    }

    #[test]
    fn window_includes_cutoff_day_and_excludes_the_next() {
        let today = d("2024-01-01");
        assert!(within_window(d("2024-01-06"), today, 5));
        assert!(!within_window(d("2024-01-07"), today, 5));
    }

    #[test]
    fn window_with_zero_days_only_matches_today() {
        let today = d("2024-06-15");
        assert!(within_window(d("2024-06-15"), today, 0));
        assert!(!within_window(d("2024-06-16"), today, 0));
    }

    #[test]
    fn past_due_dates_stay_inside_the_window() {
        // The selector never queries dates before today, but the predicate
        // itself treats overdue items as in-window.
        assert!(within_window(d("2024-01-01"), d("2024-01-05"), 0));
    }

    #[test]
    fn fallback_enables_both_channels() {
        let rule = EffectiveRule::fallback(7);
        assert_eq!(rule.days_before, 7);
        assert!(rule.notify_line);
        assert!(rule.notify_email);
        assert_eq!(EffectiveRule::default().days_before, DEFAULT_DAYS_BEFORE);
    }
}
