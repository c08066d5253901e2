//! Source of "today" for the `current_*` conversions.

use chrono::{FixedOffset, Utc};

use crate::date::Date;

/// Supplies the current calendar date.
pub trait Clock {
    fn today(&self) -> Date;
}

/// Wall clock read in a fixed UTC offset.
///
/// The calendar date depends on where "now" is observed; content keyed by
/// solar-term month is published on Beijing time, hence the default.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct SystemClock {
    offset: FixedOffset,
}

impl SystemClock {
    /// Creates a clock `utc_offset_minutes` minutes east of UTC.
    ///
    /// Returns `None` unless the offset lies strictly within one day.
    pub fn new(utc_offset_minutes: i32) -> Option<Self> {
        FixedOffset::east_opt(utc_offset_minutes.checked_mul(60)?).map(|offset| Self { offset })
    }
    /// Offset east of UTC, in minutes.
    pub fn utc_offset_minutes(&self) -> i32 {
        self.offset.local_minus_utc() / 60
    }
}

impl Default for SystemClock {
    /// Beijing time (UTC+8).
    fn default() -> Self {
        Self {
            offset: FixedOffset::east_opt(8 * 3600).expect("UTC+8 is a valid offset"),
        }
    }
}

impl Clock for SystemClock {
    fn today(&self) -> Date {
        let now = Utc::now().with_timezone(&self.offset).date_naive();
        Date::from_naive(now).expect("system clock set before 4713 BC")
    }
}

/// A clock stopped at one date.
///
/// ```
/// use nongli::Date;
/// use nongli::clock::{Clock, FixedClock};
///
/// let date = Date::from_gregorian(2024, 2, 3).unwrap();
/// assert_eq!(date, FixedClock(date).today());
/// ```
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct FixedClock(pub Date);

impl Clock for FixedClock {
    fn today(&self) -> Date {
        self.0
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn today(&self) -> Date {
        (**self).today()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets() {
        assert_eq!(480, SystemClock::default().utc_offset_minutes());
        assert_eq!(Some(-300), SystemClock::new(-300).map(|c| c.utc_offset_minutes()));
        assert_eq!(None, SystemClock::new(24 * 60));
        assert_eq!(None, SystemClock::new(i32::MAX));
    }

    #[test]
    fn system_clock_agrees_with_chrono() {
        let clock = SystemClock::new(0).unwrap();
        let before = Utc::now().date_naive();
        let today = clock.today();
        let after = Utc::now().date_naive();
        let today = today.gregorian();
        assert!(
            [before, after]
                .iter()
                .any(|d| Date::from_naive(*d).map(|d| d.gregorian()) == Some(today))
        );
    }
}
