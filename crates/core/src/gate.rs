//! Weekly send gate.
//!
//! The gate is a point-in-time predicate: it is true only on Sunday at the
//! exact configured minute. The external scheduler is expected to call it about
//! once per minute, which yields one firing per week without any stored
//! "already sent" marker. A skipped minute means no announcement that week and
//! two calls inside the same minute can fire twice.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Days, NaiveDate, TimeZone, Timelike, Weekday};

use crate::config::RotationLabels;
use crate::error::ConfigError;
use crate::rotation::{rotation_index, RotationIndex};

/// Product name used in announcements when the config does not set one.
pub const DEFAULT_PRODUCT_NAME: &str = "WeekRoster";

// ── SendTime ──────────────────────────────────────────────────

/// Local wall-clock minute at which the Sunday announcement goes out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SendTime {
    hour: u32,
    minute: u32,
}

impl SendTime {
    pub fn new(hour: u32, minute: u32) -> Option<Self> {
        (hour < 24 && minute < 60).then_some(Self { hour, minute })
    }

    pub fn hour(&self) -> u32 {
        self.hour
    }

    pub fn minute(&self) -> u32 {
        self.minute
    }
}

impl FromStr for SendTime {
    type Err = ConfigError;

    /// Parses `"HH:MM"` (24h). A single-digit hour is accepted, minutes must
    /// have two digits.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidSendTime(s.to_string());
        let (h, m) = s.trim().split_once(':').ok_or_else(invalid)?;

        let digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
        if !digits(h) || h.len() > 2 || !digits(m) || m.len() != 2 {
            return Err(invalid());
        }

        let hour: u32 = h.parse().map_err(|_| invalid())?;
        let minute: u32 = m.parse().map_err(|_| invalid())?;
        Self::new(hour, minute).ok_or_else(invalid)
    }
}

impl fmt::Display for SendTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

// ── LocalInstant ──────────────────────────────────────────────

/// "Now" as seen in the configured timezone.
///
/// Weekday, hour and minute drive the gate; `date` drives the rotation lookup.
/// Both come from the same zoned timestamp so they can never disagree around
/// midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocalInstant {
    pub weekday: Weekday,
    pub hour: u32,
    pub minute: u32,
    pub date: NaiveDate,
}

impl LocalInstant {
    /// Decompose a zoned timestamp. The caller picks the zone.
    pub fn from_zoned<Tz: TimeZone>(at: &DateTime<Tz>) -> Self {
        Self {
            weekday: at.weekday(),
            hour: at.hour(),
            minute: at.minute(),
            date: at.date_naive(),
        }
    }

    /// Build from a local date and wall-clock time; the weekday is derived
    /// from the date.
    pub fn at(date: NaiveDate, hour: u32, minute: u32) -> Self {
        Self {
            weekday: date.weekday(),
            hour,
            minute,
            date,
        }
    }
}

impl fmt::Display for LocalInstant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {:02}:{:02}",
            self.weekday, self.date, self.hour, self.minute
        )
    }
}

// ── Gate ──────────────────────────────────────────────────────

/// True only on Sunday at exactly `send_time`.
pub fn should_fire_now(local: &LocalInstant, send_time: SendTime) -> bool {
    local.weekday == Weekday::Sun
        && local.hour == send_time.hour
        && local.minute == send_time.minute
}

/// The date whose rotation slot is announced: today plus seven calendar days.
///
/// Calendar-day arithmetic on a naive date, so DST transitions in the
/// configured zone have no effect. `None` only at the end of chrono's range.
pub fn announcement_target(today: NaiveDate) -> Option<NaiveDate> {
    today.checked_add_days(Days::new(7))
}

// ── Announcement ──────────────────────────────────────────────

/// The message produced when the gate fires, plus what it was computed from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Announcement {
    /// Local date on which the gate fired.
    pub today: NaiveDate,
    /// `today + 7`, the date whose week type is announced.
    pub target: NaiveDate,
    pub index: RotationIndex,
    pub label: String,
    /// Final text handed to the transport.
    pub text: String,
}

/// Render the announcement text.
pub fn format_announcement(product_name: &str, label: &str, anchor: NaiveDate) -> String {
    format!(
        "{product_name} · Next week type: {label} (anchor {})",
        anchor.format("%Y-%m-%d")
    )
}

/// Build the announcement for a gate that fired on `today`.
pub fn compose_announcement(
    product_name: &str,
    labels: &RotationLabels,
    anchor: NaiveDate,
    today: NaiveDate,
) -> Option<Announcement> {
    let target = announcement_target(today)?;
    let index = rotation_index(target, anchor);
    let label = labels.get(index).to_string();
    Some(Announcement {
        today,
        target,
        index,
        text: format_announcement(product_name, &label, anchor),
        label,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn labels() -> RotationLabels {
        RotationLabels::new(vec!["A".into(), "B".into(), "C".into(), "D".into()]).unwrap()
    }

    // -- SendTime ----------------------------------------------------------

    #[test]
    fn parse_send_time() {
        let t: SendTime = "09:00".parse().unwrap();
        assert_eq!((t.hour(), t.minute()), (9, 0));
        let t: SendTime = "23:59".parse().unwrap();
        assert_eq!((t.hour(), t.minute()), (23, 59));
        let t: SendTime = "7:05".parse().unwrap();
        assert_eq!(t.to_string(), "07:05");
    }

    #[test]
    fn parse_send_time_rejects_garbage() {
        for bad in ["", "9", "24:00", "12:60", "12:5", "ab:cd", "12:00:00", "-1:00", "123:00"] {
            assert!(bad.parse::<SendTime>().is_err(), "accepted {bad:?}");
        }
    }

    // -- should_fire_now ---------------------------------------------------

    #[test]
    fn fires_on_sunday_at_exact_minute() {
        let send: SendTime = "09:00".parse().unwrap();
        // 2025-09-21 is a Sunday.
        let sunday = date("2025-09-21");
        assert!(should_fire_now(&LocalInstant::at(sunday, 9, 0), send));
        assert!(!should_fire_now(&LocalInstant::at(sunday, 9, 1), send));
        assert!(!should_fire_now(&LocalInstant::at(sunday, 8, 59), send));
        assert!(!should_fire_now(&LocalInstant::at(date("2025-09-22"), 9, 0), send));
    }

    #[test]
    fn fires_exactly_once_per_week() {
        let send: SendTime = "18:30".parse().unwrap();
        let monday = date("2025-09-15");
        let mut hits = 0;
        for day in 0..7 {
            let d = monday + Days::new(day);
            for hour in 0..24 {
                for minute in 0..60 {
                    if should_fire_now(&LocalInstant::at(d, hour, minute), send) {
                        hits += 1;
                    }
                }
            }
        }
        assert_eq!(hits, 1);
    }

    #[test]
    fn local_instant_uses_zoned_fields() {
        // 2025-09-20 23:30 UTC is already Sunday 01:30 in Madrid (UTC+2).
        let utc = chrono::Utc.with_ymd_and_hms(2025, 9, 20, 23, 30, 0).unwrap();
        let madrid = utc.with_timezone(&chrono_tz::Europe::Madrid);
        let local = LocalInstant::from_zoned(&madrid);
        assert_eq!(local.weekday, Weekday::Sun);
        assert_eq!((local.hour, local.minute), (1, 30));
        assert_eq!(local.date, date("2025-09-21"));
    }

    // -- announcements -----------------------------------------------------

    #[test]
    fn announces_the_week_seven_days_out() {
        let anchor = date("2025-09-20");
        let a = compose_announcement("WeekRoster", &labels(), anchor, date("2025-09-21")).unwrap();
        assert_eq!(a.target, date("2025-09-28"));
        // 2025-09-28 is 8 days after the anchor: week 1.
        assert_eq!(a.index.get(), 1);
        assert_eq!(a.label, "B");
        assert_eq!(a.text, "WeekRoster · Next week type: B (anchor 2025-09-20)");
    }

    #[test]
    fn target_is_calendar_days_across_dst() {
        // Europe switches back to winter time on 2025-10-26.
        assert_eq!(announcement_target(date("2025-10-26")), Some(date("2025-11-02")));
        assert_eq!(announcement_target(date("2025-12-28")), Some(date("2026-01-04")));
    }

    #[test]
    fn target_past_end_of_calendar_is_none() {
        assert_eq!(announcement_target(NaiveDate::MAX), None);
        let last = NaiveDate::MAX - Days::new(3);
        assert!(compose_announcement("WeekRoster", &labels(), date("2025-09-20"), last).is_none());
    }

    #[test]
    fn custom_product_name() {
        let text = format_announcement("Rota", "Remote", date("2024-01-07"));
        assert_eq!(text, "Rota · Next week type: Remote (anchor 2024-01-07)");
    }
}
