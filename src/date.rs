//! Calendar-independant date.

use std::fmt;
use std::ops::{Add, Sub};

use chrono::{Datelike, NaiveDate};

/// A calendar-independant date.
///
/// Supported range begins from January 1, 4713 BC, proleptic Julian calendar.
/// Lunar conversions only accept a small part of it, see [`crate::lunar`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Date {
    jdn: u32,
}

impl Date {
    /// Creates a `Date` with a Julian day number (JDN).
    pub const fn from_jdn(jdn: u32) -> Self {
        Self { jdn }
    }
    /// Returns the Julian day number (JDN) of the date.
    pub const fn jdn(&self) -> u32 {
        self.jdn
    }

    /// Creates a `Date` with a Gregorian calendar date.
    ///
    /// `year` should be an astronomical year number, i.e. 1 BC is `0`, 2
    /// BC is `-1`, etc.
    ///
    /// Returns `None` if `(year, month, day)` does not name a day of the
    /// Gregorian calendar, or if the result is out of supported range.
    ///
    /// # Example
    ///
    /// ```
    /// use nongli::Date;
    ///
    /// let date = Date::from_gregorian(2000, 1, 1).unwrap();
    /// assert_eq!(2451545, date.jdn());
    /// assert_eq!(None, Date::from_gregorian(2023, 2, 29));
    /// ```
    pub fn from_gregorian(year: i32, month: i32, day: i32) -> Option<Self> {
        if !(1..=12).contains(&month) || day < 1 || day > days_in_month(year, month) {
            return None;
        }
        let (y, m, d) = (i64::from(year), i64::from(month), i64::from(day));
        u32::try_from(
            (1461 * (y + 4800 + (m - 14) / 12)) / 4 + (367 * (m - 2 - 12 * ((m - 14) / 12))) / 12
                - (3 * ((y + 4900 + (m - 14) / 12) / 100)) / 4
                + d
                - 32075,
        )
        .map(Self::from_jdn)
        .ok()
    }
    /// Converts a [`chrono::NaiveDate`].
    ///
    /// ```
    /// use chrono::NaiveDate;
    /// use nongli::Date;
    ///
    /// let naive = NaiveDate::from_ymd_opt(2017, 7, 23).unwrap();
    /// assert_eq!("2017-07-23", Date::from_naive(naive).unwrap().iso_gregorian());
    /// ```
    pub fn from_naive(date: NaiveDate) -> Option<Self> {
        Self::from_gregorian(date.year(), date.month() as i32, date.day() as i32)
    }
    /// Represents the date in Gregorian calendar.
    ///
    /// Returns in `(year, month, day)` format.
    ///
    /// # Example
    ///
    /// ```
    /// use nongli::Date;
    ///
    /// let date = Date::from_jdn(2451545);
    /// assert_eq!((2000, 1, 1), date.gregorian());
    /// ```
    pub fn gregorian(&self) -> (i32, i32, i32) {
        let jdn = i64::from(self.jdn);
        let f = jdn + 1401 + (((4 * jdn + 274277) / 146097) * 3) / 4 - 38;
        let e = 4 * f + 3;
        let g = (e % 1461) / 4;
        let h = 5 * g + 2;
        let day = (h % 153) / 5 + 1;
        let month = (h / 153 + 2) % 12 + 1;
        let year = e / 1461 - 4716 + (12 + 2 - month) / 12;
        // u32 JDN keeps the year within a few million
        (year as i32, month as i32, day as i32)
    }
    /// Moves the date by `days`, `None` if the result leaves the
    /// supported range.
    ///
    /// ```
    /// use nongli::Date;
    ///
    /// assert_eq!(None, Date::from_jdn(0).checked_add(-1));
    /// assert_eq!(Some(Date::from_jdn(9)), Date::from_jdn(10).checked_add(-1));
    /// ```
    pub fn checked_add(self, days: i32) -> Option<Self> {
        self.jdn.checked_add_signed(days).map(Self::from_jdn)
    }
    /// Formats the date in ISO 8601 format.
    ///
    /// # Example
    ///
    /// ```
    /// use nongli::Date;
    ///
    /// let date = Date::from_gregorian(2000, 1, 1).unwrap();
    /// assert_eq!("2000-01-01", date.iso_gregorian());
    /// ```
    pub fn iso_gregorian(&self) -> String {
        let (y, m, d) = self.gregorian();
        format!("{:04}-{:02}-{:02}", y, m, d)
    }

    /// Returns the day of week of the date, in ISO-8601 numbering (i.e.
    /// `1..=7` for Monday through Sunday)
    ///
    /// # Example
    ///
    /// ```
    /// use nongli::Date;
    ///
    /// let date = Date::from_gregorian(2000, 1, 1).unwrap();
    /// assert_eq!(6, date.day_of_week()); // Saturday
    /// ```
    pub fn day_of_week(&self) -> i32 {
        (self.jdn % 7 + 1) as i32
    }
    /// Returns the Chinese sexagenary day number of the date, numbered from 1
    /// (甲子) to 60 (癸亥).
    ///
    /// # Example
    ///
    /// ```
    /// use nongli::Date;
    ///
    /// let date = Date::from_gregorian(2000, 1, 1).unwrap();
    /// assert_eq!(55, date.sexagenary()); // 戊午
    /// ```
    pub fn sexagenary(&self) -> u32 {
        (self.jdn + 49) % 60 + 1
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (y, m, d) = self.gregorian();
        write!(f, "{:04}-{:02}-{:02}", y, m, d)
    }
}

/// # Panics
///
/// Panics if the result leaves the supported range, see [`Date::checked_add`].
impl Add<i32> for Date {
    type Output = Date;
    fn add(self, rhs: i32) -> Self::Output {
        self.checked_add(rhs).expect("date out of range")
    }
}
/// # Panics
///
/// Panics if the two dates are more than `i32::MAX` days apart.
impl Sub<Date> for Date {
    type Output = i32;
    fn sub(self, rhs: Date) -> Self::Output {
        i32::try_from(i64::from(self.jdn) - i64::from(rhs.jdn))
            .expect("date difference overflows i32")
    }
}

/// Indicates whether a year is a leap year or common year.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum YearType {
    Common,
    Leap,
}

impl YearType {
    /// Determines if `year` is a leap year in Gregorian calendar.
    pub fn from_gregorian(year: i32) -> Self {
        if year % 4 == 0 && year % 100 != 0 || year % 400 == 0 {
            Self::Leap
        } else {
            Self::Common
        }
    }
    /// Returns `true` if `self` is `Leap`, otherwise `false`.
    pub fn is_leap(&self) -> bool {
        matches!(self, YearType::Leap)
    }
}

/// Number of days in a Gregorian month, `0` if `month` is not in `1..=12`.
pub fn days_in_month(year: i32, month: i32) -> i32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 => 28 + YearType::from_gregorian(year).is_leap() as i32,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_gregorian() {
        let date = Date::from_gregorian(1970, 1, 1).unwrap();
        assert_eq!(2440588, date.jdn());
        let date = Date::from_gregorian(1900, 1, 31).unwrap();
        assert_eq!(2415051, date.jdn());
    }

    #[test]
    fn rejects_invalid() {
        for (y, m, d) in [
            (2021, 2, 29),
            (1900, 2, 29),
            (2021, 4, 31),
            (2021, 0, 1),
            (2021, 13, 1),
            (2021, 1, 0),
        ] {
            assert_eq!(None, Date::from_gregorian(y, m, d), "{y:04}-{m:02}-{d:02}");
        }
        assert!(Date::from_gregorian(2000, 2, 29).is_some());
        assert!(Date::from_gregorian(2024, 2, 29).is_some());
    }

    #[test]
    fn to_gregorian() {
        let date = Date::from_jdn(2440588);
        assert_eq!((1970, 1, 1), date.gregorian());
        let date = Date::from_jdn(2459466);
        assert_eq!((2021, 9, 8), date.gregorian());
        let date = Date::from_jdn(2415051);
        assert_eq!((1900, 1, 31), date.gregorian());
    }

    #[test]
    fn from_naive() {
        let naive = NaiveDate::from_ymd_opt(2100, 12, 31).unwrap();
        let date = Date::from_naive(naive).unwrap();
        assert_eq!((2100, 12, 31), date.gregorian());
    }

    #[test]
    fn to_day_of_week() {
        let date = Date::from_gregorian(1970, 1, 1).unwrap();
        assert_eq!(4, date.day_of_week());
        let date = Date::from_gregorian(2021, 9, 8).unwrap();
        assert_eq!(3, date.day_of_week());
    }

    #[test]
    fn to_sexagenary() {
        let date = Date::from_gregorian(1970, 1, 1).unwrap();
        assert_eq!(18, date.sexagenary());
        let date = Date::from_gregorian(2021, 9, 8).unwrap();
        assert_eq!(56, date.sexagenary());
    }

    #[test]
    fn arithmetic() {
        let a = Date::from_gregorian(2000, 2, 28).unwrap();
        assert_eq!("2000-03-01", (a + 2).to_string());
        assert_eq!("2000-02-26", (a + -2).to_string());
        assert_eq!(2, (a + 2) - a);
    }

    #[test]
    fn extreme_inputs() {
        for year in [i32::MIN, -4714, i32::MAX] {
            assert_eq!(None, Date::from_gregorian(year, 1, 1), "{year}");
        }
        assert_eq!((-4713, 11, 24), Date::from_jdn(0).gregorian());
        assert_eq!((11754508, 12, 13), Date::from_jdn(u32::MAX).gregorian());
        assert_eq!(Some(Date::from_jdn(u32::MAX)), Date::from_gregorian(11754508, 12, 13));
        assert_eq!(None, Date::from_gregorian(11754508, 12, 14));

        assert_eq!(None, Date::from_jdn(0).checked_add(-1));
        assert_eq!(None, Date::from_jdn(u32::MAX).checked_add(1));
        assert_eq!(
            Some(Date::from_jdn(u32::MAX - i32::MAX as u32)),
            Date::from_jdn(u32::MAX).checked_add(-i32::MAX)
        );
    }

    #[test]
    #[should_panic(expected = "date out of range")]
    fn add_past_range() {
        let _ = Date::from_jdn(0) + -1;
    }

    #[test]
    fn month_lengths() {
        assert_eq!(29, days_in_month(2000, 2));
        assert_eq!(28, days_in_month(2100, 2));
        assert_eq!(31, days_in_month(2100, 12));
        assert_eq!(0, days_in_month(2100, 13));
    }
}
