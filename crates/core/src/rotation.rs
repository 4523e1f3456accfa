//! Rotation math: maps a calendar date onto one of four recurring week types.
//!
//! Everything here works on [`NaiveDate`] so that daylight-saving shifts and the
//! time of day at which "now" was sampled can never move a date into another
//! week. Weeks are counted from the anchor date, not from a fixed weekday.

use std::fmt;

use chrono::{Days, NaiveDate};
/// Number of week types in the rotation.
pub const ROTATION_WEEKS: u8 = 4;

/// Position of a week inside the rotation, always in `0..ROTATION_WEEKS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RotationIndex(u8);

impl RotationIndex {
    /// Returns `None` when `value` is outside the rotation.
    pub fn new(value: u8) -> Option<Self> {
        (value < ROTATION_WEEKS).then_some(Self(value))
    }

    pub fn get(self) -> u8 {
        self.0
    }

    /// Index into label and schedule slices.
    pub fn as_usize(self) -> usize {
        self.0 as usize
    }

    /// The week type that follows this one, wrapping after the last.
    pub fn next(self) -> Self {
        Self((self.0 + 1) % ROTATION_WEEKS)
    }

    /// 1-based number shown to people ("Type 1" .. "Type 4").
    pub fn week_type(self) -> u8 {
        self.0 + 1
    }

    /// All indices in rotation order.
    pub fn all() -> impl Iterator<Item = Self> {
        (0..ROTATION_WEEKS).map(Self)
    }
}

impl fmt::Display for RotationIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Type {}", self.week_type())
    }
}

/// The week type active now and the one active a week later.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekPair {
    pub current: RotationIndex,
    pub next: RotationIndex,
}

/// Whole rotation weeks elapsed from `anchor` to `reference`, floored.
///
/// Negative for dates before the anchor: the day before the anchor is week -1.
fn weeks_since(reference: NaiveDate, anchor: NaiveDate) -> i64 {
    reference
        .signed_duration_since(anchor)
        .num_days()
        .div_euclid(7)
}

/// Rotation index of the week containing `reference`.
///
/// Total over all dates; dates before the anchor wrap backwards through the
/// rotation instead of producing a negative remainder.
pub fn rotation_index(reference: NaiveDate, anchor: NaiveDate) -> RotationIndex {
    let weeks = weeks_since(reference, anchor);
    RotationIndex(weeks.rem_euclid(i64::from(ROTATION_WEEKS)) as u8)
}

/// Current and next rotation index for `reference`.
pub fn current_and_next(reference: NaiveDate, anchor: NaiveDate) -> WeekPair {
    let current = rotation_index(reference, anchor);
    WeekPair {
        current,
        next: current.next(),
    }
}

/// Rotation calculator bound to one anchor date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationClock {
    anchor: NaiveDate,
}

impl RotationClock {
    pub fn new(anchor: NaiveDate) -> Self {
        Self { anchor }
    }

    pub fn index_for(&self, reference: NaiveDate) -> RotationIndex {
        rotation_index(reference, self.anchor)
    }

    pub fn current_and_next(&self, reference: NaiveDate) -> WeekPair {
        current_and_next(reference, self.anchor)
    }

    /// First day of the rotation week that contains `reference`.
    ///
    /// Rotation weeks start on the anchor's weekday. Returns `None` only if
    /// the result falls outside chrono's representable range.
    pub fn week_start(&self, reference: NaiveDate) -> Option<NaiveDate> {
        let offset_days = weeks_since(reference, self.anchor) * 7;
        let magnitude = Days::new(offset_days.unsigned_abs());
        if offset_days >= 0 {
            self.anchor.checked_add_days(magnitude)
        } else {
            self.anchor.checked_sub_days(magnitude)
        }
    }
}
