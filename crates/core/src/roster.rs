//! Weekly roster table: who is where on each weekday of each week type.
//!
//! The roster is display data. It is optional in the config and never feeds
//! back into rotation or gate logic; renderers combine it with a [`WeekPair`]
//! to mark the current and next rows.

use std::collections::HashMap;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::rotation::{RotationIndex, WeekPair, ROTATION_WEEKS};
use crate::search::{self, Segment};

/// Weekday columns used when the config does not list any.
pub const DEFAULT_WEEKDAYS: [&str; 5] = ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday"];

/// One row of the schedule as written in the config file.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ScheduleWeek {
    /// 1-based week type number.
    pub week: u8,
    /// Weekday column name → free-text assignment.
    #[serde(default)]
    pub days: HashMap<String, String>,
}

/// Where a row sits relative to today.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowStatus {
    Current,
    Next,
    Other,
}

impl RowStatus {
    pub fn label(self) -> &'static str {
        match self {
            RowStatus::Current => "Current",
            RowStatus::Next => "Next",
            RowStatus::Other => "",
        }
    }
}

/// A cell prepared for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellView<'a> {
    pub weekday: &'a str,
    pub text: &'a str,
    /// Text split around mentions of the roster member.
    pub segments: Vec<Segment<'a>>,
    /// The whole cell matches one of the configured highlight phrases.
    pub emphasized: bool,
}

/// A row prepared for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView<'a> {
    pub index: RotationIndex,
    pub status: RowStatus,
    pub cells: Vec<CellView<'a>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Roster {
    weekdays: Vec<String>,
    /// Empty, or exactly one row per week type ordered by index.
    weeks: Vec<ScheduleWeek>,
    member: Option<String>,
    highlights: Vec<String>,
}

impl Roster {
    /// Validate and order the schedule.
    ///
    /// An empty schedule is allowed. Otherwise there must be one row for each
    /// of weeks 1 to 4; rows may appear in any order in the file.
    pub fn new(
        weekdays: Vec<String>,
        mut weeks: Vec<ScheduleWeek>,
        member: Option<String>,
        highlights: Vec<String>,
    ) -> Result<Self, ConfigError> {
        if !weeks.is_empty() {
            if weeks.len() != ROTATION_WEEKS as usize {
                return Err(ConfigError::Schedule(format!(
                    "expected {ROTATION_WEEKS} weeks, found {}",
                    weeks.len()
                )));
            }
            weeks.sort_by_key(|w| w.week);
            for (expected, row) in (1..=ROTATION_WEEKS).zip(&weeks) {
                if row.week != expected {
                    return Err(ConfigError::Schedule(format!(
                        "weeks must be numbered 1 to {ROTATION_WEEKS} once each (found week {})",
                        row.week
                    )));
                }
            }
        }

        let weekdays = if weekdays.is_empty() {
            DEFAULT_WEEKDAYS.iter().map(|d| d.to_string()).collect()
        } else {
            weekdays
        };

        Ok(Self {
            weekdays,
            weeks,
            member: member.filter(|m| !m.trim().is_empty()),
            highlights,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.weeks.is_empty()
    }

    pub fn weekdays(&self) -> &[String] {
        &self.weekdays
    }

    pub fn member(&self) -> Option<&str> {
        self.member.as_deref()
    }

    /// Same roster, highlighting a different member.
    pub fn with_member(mut self, member: Option<String>) -> Self {
        self.member = member.filter(|m| !m.trim().is_empty());
        self
    }

    pub fn week(&self, index: RotationIndex) -> Option<&ScheduleWeek> {
        self.weeks.get(index.as_usize())
    }

    /// Assignment for one weekday of one week type; empty when unset.
    pub fn cell(&self, index: RotationIndex, weekday: &str) -> &str {
        self.week(index)
            .and_then(|w| w.days.get(weekday))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// Weekdays of the given week type whose cell mentions `member`.
    pub fn days_for(&self, index: RotationIndex, member: &str) -> Vec<&str> {
        self.weekdays
            .iter()
            .filter(|d| search::mentions(self.cell(index, d), member))
            .map(String::as_str)
            .collect()
    }

    fn is_emphasized(&self, text: &str) -> bool {
        self.highlights.iter().any(|h| search::mentions(text, h))
    }

    /// All rows in rotation order, annotated for display.
    pub fn rows(&self, pair: WeekPair) -> Vec<RowView<'_>> {
        if self.is_empty() {
            return Vec::new();
        }
        RotationIndex::all()
            .map(|index| {
                let status = if index == pair.current {
                    RowStatus::Current
                } else if index == pair.next {
                    RowStatus::Next
                } else {
                    RowStatus::Other
                };
                let cells = self
                    .weekdays
                    .iter()
                    .map(|day| {
                        let text = self.cell(index, day);
                        let segments = match self.member.as_deref() {
                            Some(m) => search::highlight_segments(text, m),
                            None => vec![Segment { text, matched: false }],
                        };
                        CellView {
                            weekday: day.as_str(),
                            text,
                            segments,
                            emphasized: self.is_emphasized(text),
                        }
                    })
                    .collect();
                RowView { index, status, cells }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn week(n: u8, days: &[(&str, &str)]) -> ScheduleWeek {
        ScheduleWeek {
            week: n,
            days: days
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    fn sample() -> Roster {
        Roster::new(
            vec!["Mon".into(), "Tue".into()],
            vec![
                week(3, &[("Mon", "Ana"), ("Tue", "TODOS presencial (planificación)")]),
                week(1, &[("Mon", "José, Ana"), ("Tue", "Luis")]),
                week(4, &[("Mon", "Luis")]),
                week(2, &[("Tue", "Jose")]),
            ],
            Some("josé".into()),
            vec!["todos presencial".into()],
        )
        .unwrap()
    }

    fn idx(n: u8) -> RotationIndex {
        RotationIndex::new(n).unwrap()
    }

    #[test]
    fn rows_are_sorted_by_week_number() {
        let roster = sample();
        assert_eq!(roster.cell(idx(0), "Mon"), "José, Ana");
        assert_eq!(roster.cell(idx(2), "Mon"), "Ana");
        assert_eq!(roster.cell(idx(3), "Tue"), "");
    }

    #[test]
    fn rejects_wrong_week_count_or_numbering() {
        let err = Roster::new(vec![], vec![week(1, &[])], None, vec![]).unwrap_err();
        assert!(matches!(err, ConfigError::Schedule(_)));

        let dup = vec![week(1, &[]), week(1, &[]), week(2, &[]), week(3, &[])];
        assert!(Roster::new(vec![], dup, None, vec![]).is_err());
    }

    #[test]
    fn empty_schedule_uses_default_weekdays() {
        let roster = Roster::new(vec![], vec![], None, vec![]).unwrap();
        assert!(roster.is_empty());
        assert_eq!(roster.weekdays().len(), 5);
        assert!(roster.rows(WeekPair { current: idx(0), next: idx(1) }).is_empty());
    }

    #[test]
    fn rows_mark_current_and_next() {
        let roster = sample();
        let rows = roster.rows(WeekPair { current: idx(3), next: idx(0) });
        let statuses: Vec<_> = rows.iter().map(|r| r.status).collect();
        assert_eq!(
            statuses,
            vec![RowStatus::Next, RowStatus::Other, RowStatus::Other, RowStatus::Current]
        );
    }

    #[test]
    fn member_mentions_are_segmented() {
        let roster = sample();
        let rows = roster.rows(WeekPair { current: idx(0), next: idx(1) });
        let mon = &rows[0].cells[0];
        assert_eq!(mon.segments[0], Segment { text: "José", matched: true });
        assert!(rows[1].cells[1].segments[0].matched);
    }

    #[test]
    fn highlight_phrases_emphasize_whole_cell() {
        let roster = sample();
        let rows = roster.rows(WeekPair { current: idx(0), next: idx(1) });
        assert!(rows[2].cells[1].emphasized);
        assert!(!rows[2].cells[0].emphasized);
    }

    #[test]
    fn days_for_member() {
        let roster = sample();
        assert_eq!(roster.days_for(idx(0), "jose"), vec!["Mon"]);
        assert_eq!(roster.days_for(idx(1), "JOSÉ"), vec!["Tue"]);
        assert!(roster.days_for(idx(3), "jose").is_empty());
    }

    #[test]
    fn blank_member_is_ignored() {
        let roster = sample().with_member(Some("  ".into()));
        assert_eq!(roster.member(), None);
    }
}
