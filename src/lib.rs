//! Chinese lunar calendar arithmetic for 1900–2100, driven by a packed
//! year-data table, plus the solar-term months used to address monthly
//! content.
//!
//! Two calendars live here and they must not be mixed up:
//!
//! - [`lunar`]: the true lunar calendar (months begin at new moon, with leap
//!   months), converted from Gregorian dates via a static table.
//! - [`jieqi`]: months bounded by the twelve 节 solar terms (立春, 惊蛰, …),
//!   approximated by fixed Gregorian days. The year turns at 立春.
//!
//! # Examples
//!
//! Basic usage with [`Date`]:
//!
//! ```
//! use nongli::Date;
//!
//! let date = Date::from_gregorian(2000, 1, 1).unwrap();
//!
//! assert_eq!(6, date.day_of_week()); // Saturday
//! assert_eq!(2451545, date.jdn());
//! ```
//!
//! Lunar calendar:
//!
//! ```
//! use nongli::lunar::{self, Month::*};
//!
//! let date = lunar::solar_to_lunar(2000, 1, 1).unwrap();
//!
//! assert_eq!((1999, Common(11), 25), (date.year(), date.lunar_month(), date.day()));
//! assert_eq!("己卯年冬月廿五", date.to_string());
//! ```
//!
//! Solar-term month of a date:
//!
//! ```
//! use nongli::Date;
//! use nongli::jieqi::SolarTermMonth;
//!
//! let stm = SolarTermMonth::for_date(Date::from_gregorian(2024, 3, 10).unwrap());
//! assert_eq!((2024, 2, "卯月"), (stm.year(), stm.month(), stm.name()));
//! ```
//!
//! Conversions are pure and report out-of-range input as an [`Error`]. The
//! `Date` operators `+` and `-` panic when the result leaves the supported
//! range; use [`Date::checked_add`] where that can happen. Events are emitted
//! through [`tracing`].

pub mod clock;
pub mod config;
pub mod date;
pub mod error;
pub mod jieqi;
pub mod lunar;

pub use config::Config;
pub use date::{Date, YearType};
pub use error::{Error, Result};
