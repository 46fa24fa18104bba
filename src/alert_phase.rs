//! # Alert Phase Clock
//!
//! How urgent a ticket looks, derived from its age. Phases are never stored: every
//! board recomputation asks again with the current time, so a ticket changes
//! colour even when nothing on the feed changes.
//!
//! | Age (minutes) | Phase |
//! |---|---|
//! | `< 2` | red |
//! | `[2, 4)` | orange |
//! | `>= 4`, auto-hide 0 | green |
//! | `>= 4`, `>= auto-hide` | expired |
//! | `>= 4`, `< auto-hide` | green |
//!
//! The comparisons are applied literally. With an auto-hide of 3, a ticket is
//! orange at 3.5 minutes and expired at 4.

use crate::config::Language;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const MINUTE_MS: i64 = 60_000;
const RED_UNTIL_MINUTES: i64 = 2;
const ORANGE_UNTIL_MINUTES: i64 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertPhase {
    Red,
    Orange,
    Green,
    Expired,
}

/// Phase of a ticket created at `timestamp`, as seen at `now`.
///
/// Age is measured in milliseconds so fractional minutes compare exactly. A
/// timestamp in the future (clock skew between devices) counts as brand new.
pub fn phase(timestamp: DateTime<Utc>, now: DateTime<Utc>, auto_hide_minutes: u32) -> AlertPhase {
    let elapsed_ms = (now - timestamp).num_milliseconds();

    if elapsed_ms < RED_UNTIL_MINUTES * MINUTE_MS {
        AlertPhase::Red
    } else if elapsed_ms < ORANGE_UNTIL_MINUTES * MINUTE_MS {
        AlertPhase::Orange
    } else if auto_hide_minutes == 0 {
        AlertPhase::Green
    } else if elapsed_ms >= i64::from(auto_hide_minutes) * MINUTE_MS {
        AlertPhase::Expired
    } else {
        AlertPhase::Green
    }
}

impl AlertPhase {
    pub fn label(self, language: Language) -> &'static str {
        match (language, self) {
            (Language::En, AlertPhase::Red) => "New",
            (Language::En, AlertPhase::Orange) => "Waiting",
            (Language::En, AlertPhase::Green) => "In progress",
            (Language::En, AlertPhase::Expired) => "Expired",
            (Language::De, AlertPhase::Red) => "Neu",
            (Language::De, AlertPhase::Orange) => "Wartet",
            (Language::De, AlertPhase::Green) => "In Arbeit",
            (Language::De, AlertPhase::Expired) => "Abgelaufen",
        }
    }

    pub fn is_expired(self) -> bool {
        self == AlertPhase::Expired
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use rstest::rstest;

    fn t0() -> DateTime<Utc> {
        DateTime::from_timestamp(1_760_000_000, 0).unwrap()
    }

    fn at(seconds: i64, auto_hide: u32) -> AlertPhase {
        phase(t0(), t0() + Duration::seconds(seconds), auto_hide)
    }

    #[rstest]
    #[case(0, 10, AlertPhase::Red)]
    #[case(119, 10, AlertPhase::Red)]
    #[case(120, 10, AlertPhase::Orange)]
    #[case(239, 10, AlertPhase::Orange)]
    #[case(240, 10, AlertPhase::Green)]
    #[case(599, 10, AlertPhase::Green)]
    #[case(600, 10, AlertPhase::Expired)]
    #[case(240, 4, AlertPhase::Expired)]
    #[case(240, 5, AlertPhase::Green)]
    #[case(600_000, 0, AlertPhase::Green)]
    fn phase_boundaries(#[case] seconds: i64, #[case] auto_hide: u32, #[case] expected: AlertPhase) {
        assert_eq!(at(seconds, auto_hide), expected);
    }

    #[rstest]
    #[case(1)]
    #[case(2)]
    #[case(3)]
    fn small_thresholds_still_show_red_and_orange_first(#[case] auto_hide: u32) {
        assert_eq!(at(60, auto_hide), AlertPhase::Red);
        assert_eq!(at(150, auto_hide), AlertPhase::Orange);
        assert_eq!(at(210, auto_hide), AlertPhase::Orange);
        assert_eq!(at(240, auto_hide), AlertPhase::Expired);
    }

    #[test]
    fn matches_the_phase_rule_for_every_minute_and_threshold() {
        for minutes in 0..=30i64 {
            for auto_hide in 0..=12u32 {
                let got = at(minutes * 60, auto_hide);
                let expected = if minutes < 2 {
                    AlertPhase::Red
                } else if minutes < 4 {
                    AlertPhase::Orange
                } else if auto_hide == 0 || minutes < i64::from(auto_hide) {
                    AlertPhase::Green
                } else {
                    AlertPhase::Expired
                };
                assert_eq!(got, expected, "minute {minutes}, auto-hide {auto_hide}");
            }
        }
    }

    #[test]
    fn ticket_ages_through_every_phase() {
        assert_eq!(at(90, 6), AlertPhase::Red);
        assert_eq!(at(150, 6), AlertPhase::Orange);
        assert_eq!(at(5 * 60, 6), AlertPhase::Green);
        assert_eq!(at(6 * 60, 6), AlertPhase::Expired);
    }

    #[test]
    fn future_timestamps_read_as_new() {
        assert_eq!(at(-30, 10), AlertPhase::Red);
    }

    #[test]
    fn labels_follow_language() {
        assert_eq!(AlertPhase::Orange.label(Language::En), "Waiting");
        assert_eq!(AlertPhase::Expired.label(Language::De), "Abgelaufen");
    }
}
