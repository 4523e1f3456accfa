//! Where "now" comes from.
//!
//! Nothing else in the crate reads the system clock; callers hand a
//! [`TimeSource`] to whatever needs the local time so tests can pin it.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::gate::LocalInstant;

/// Supplies the current moment already decomposed in the configured zone.
pub trait TimeSource: Send + Sync {
    fn local_now(&self) -> LocalInstant;
}

/// Reads the system clock and converts it into `timezone`.
#[derive(Debug, Clone, Copy)]
pub struct SystemTimeSource {
    timezone: Tz,
}

impl SystemTimeSource {
    pub fn new(timezone: Tz) -> Self {
        Self { timezone }
    }
}

impl TimeSource for SystemTimeSource {
    fn local_now(&self) -> LocalInstant {
        LocalInstant::from_zoned(&Utc::now().with_timezone(&self.timezone))
    }
}

/// Always returns the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedTimeSource {
    instant: LocalInstant,
}

impl FixedTimeSource {
    pub fn new(instant: LocalInstant) -> Self {
        Self { instant }
    }

    /// Pin to a UTC timestamp as seen from `timezone`.
    pub fn at_utc(at: DateTime<Utc>, timezone: Tz) -> Self {
        Self::new(LocalInstant::from_zoned(&at.with_timezone(&timezone)))
    }
}

impl TimeSource for FixedTimeSource {
    fn local_now(&self) -> LocalInstant {
        self.instant
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Weekday};

    #[test]
    fn fixed_source_converts_into_zone() {
        // 2025-09-21 07:00 UTC is 09:00 in Madrid (CEST).
        let at = Utc.with_ymd_and_hms(2025, 9, 21, 7, 0, 0).unwrap();
        let source = FixedTimeSource::at_utc(at, chrono_tz::Europe::Madrid);
        let local = source.local_now();
        assert_eq!(local.weekday, Weekday::Sun);
        assert_eq!((local.hour, local.minute), (9, 0));
        assert_eq!(local.date, NaiveDate::from_ymd_opt(2025, 9, 21).unwrap());
    }

    #[test]
    fn date_follows_the_zone_not_utc() {
        // Saturday 22:00 in Buenos Aires is already Sunday in UTC.
        let at = Utc.with_ymd_and_hms(2025, 9, 21, 1, 0, 0).unwrap();
        let local = FixedTimeSource::at_utc(at, chrono_tz::America::Argentina::Buenos_Aires)
            .local_now();
        assert_eq!(local.weekday, Weekday::Sat);
        assert_eq!(local.date, NaiveDate::from_ymd_opt(2025, 9, 20).unwrap());
        assert_eq!(local.hour, 22);
    }

    #[test]
    fn trait_object_works() {
        let instant = LocalInstant::at(NaiveDate::from_ymd_opt(2025, 9, 21).unwrap(), 9, 0);
        let source: Box<dyn TimeSource> = Box::new(FixedTimeSource::new(instant));
        assert_eq!(source.local_now(), instant);
    }
}
