//! Error type shared by all conversions.

/// Reasons a conversion or lookup cannot produce a value.
///
/// Out-of-range input is an ordinary outcome here: every variant is returned
/// as a value and no operation in this crate panics on user input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("year {year} outside supported range 1900..=2100")]
    YearOutOfRange { year: i32 },
    #[error("month {month} outside 1..=12")]
    MonthOutOfRange { month: u32 },
    #[error("day {day} outside 1..={max}")]
    DayOutOfRange { day: u32, max: u32 },
    #[error("{year:04}-{month:02}-{day:02} is not a Gregorian date")]
    InvalidDate { year: i32, month: i32, day: i32 },
    #[error("date precedes 1900-01-31, the first day of lunar year 1900")]
    BeforeEpoch,
    #[error("lunar year {year} has no leap month after month {month}")]
    NoLeapMonth { year: i32, month: u32 },
    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;
