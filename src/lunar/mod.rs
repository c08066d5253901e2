//! Chinese lunar calendar
//!
//! Note: 为方便处理诸多术语，本模块文档用中文。
//!
//! 本模块依预制的农历年表（1900–2100，见 [`table`]）换算公历与农历，不做天文计算。
//! 以公历 1900-01-31（农历 1900 年正月初一）为起点，逐年、逐月累减日数定位日期。
//!
//! 注意：此处的「月」为朔望月，与 [`crate::jieqi`] 按节气划分的「节月」不同，不可混用。

use tracing::{debug, error, trace};

use crate::clock::Clock;
use crate::date::Date;
use crate::error::{Error, Result};

pub mod fmt;
pub mod table;

use table::{FIRST_YEAR, LAST_YEAR};

/// 农历 1900 年正月初一，即公历 1900-01-31。
pub const EPOCH: Date = Date::from_jdn(2415051);

/// 月名，`Common` 为平月，`Leap` 为闰月。
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Month {
    Common(u32),
    Leap(u32),
}
impl Month {
    /// 取得月序号，无论平闰。
    pub fn num(&self) -> u32 {
        use Month::*;
        *match self {
            Common(v) | Leap(v) => v,
        }
    }
    /// 闰月为 `true`，平月为 `false`
    pub fn is_leap(&self) -> bool {
        matches!(self, Self::Leap(_))
    }
    /// 取得月名的文本形式，十一、十二月称「冬月」「腊月」。
    pub fn name(&self) -> String {
        fmt::month(*self)
    }
}

/// 年干支。天干序 `(year - 4) mod 10`，地支及生肖序 `(year - 4) mod 12`，公元 4 年为甲子。
///
/// # 用例
///
/// ```
/// use nongli::lunar::StemBranch;
///
/// let sb = StemBranch::for_year(2024);
/// assert_eq!("甲辰", sb.name());
/// assert_eq!("龙", sb.animal_name());
/// ```
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct StemBranch {
    stem: u32,
    branch: u32,
}
impl StemBranch {
    pub fn for_year(year: i32) -> Self {
        let n = ((year.rem_euclid(60) + 56) % 60) as u32;
        Self {
            stem: n % 10,
            branch: n % 12,
        }
    }
    /// 天干序号，`0..=9`，0 为甲。
    pub fn stem(&self) -> u32 {
        self.stem
    }
    /// 地支序号，`0..=11`，0 为子。
    pub fn branch(&self) -> u32 {
        self.branch
    }
    /// 生肖序号，与地支相同。
    pub fn animal(&self) -> u32 {
        self.branch
    }
    pub fn name(&self) -> String {
        fmt::STEMS[self.stem as usize].to_owned() + fmt::BRANCHES[self.branch as usize]
    }
    pub fn animal_name(&self) -> &'static str {
        fmt::ANIMALS[self.branch as usize]
    }
}

/// 取得所给公元年的干支序号，`1` 为甲子。
///
/// # 用例
///
/// ```
/// use nongli::lunar::sexagenary_for_year;
///
/// assert_eq!(1, sexagenary_for_year(-2696));
/// assert_eq!(17, sexagenary_for_year(2000)); // 庚辰
/// ```
pub fn sexagenary_for_year(year: i32) -> u32 {
    ((year.rem_euclid(60) + 56) % 60) as u32 + 1
}

/// 农历日期。
///
/// 恒有 `1 <= month <= 12`、`1 <= day <= month_days`，且仅当该年闰月序号等于月序时方可为闰月。
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawLunarDate"))]
pub struct LunarDate {
    year: i32,
    month: Month,
    day: u32,
    month_days: u32,
}

/// 反序列化的中间形式；`month_days` 由年表重算，不取输入值。
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawLunarDate {
    year: i32,
    month: Month,
    day: u32,
}

#[cfg(feature = "serde")]
impl TryFrom<RawLunarDate> for LunarDate {
    type Error = Error;
    fn try_from(raw: RawLunarDate) -> Result<Self> {
        let range = month_solar_range(raw.year, raw.month)?;
        if !(1..=range.days).contains(&raw.day) {
            return Err(Error::DayOutOfRange {
                day: raw.day,
                max: range.days,
            });
        }
        Ok(LunarDate {
            year: raw.year,
            month: raw.month,
            day: raw.day,
            month_days: range.days,
        })
    }
}

impl LunarDate {
    /// 将日期换算为农历。
    ///
    /// 公历年不在 1900–2100 间，或早于 1900-01-31，则回报 `Err`。
    ///
    /// # 用例
    ///
    /// ```
    /// use nongli::Date;
    /// use nongli::lunar::{LunarDate, Month::*};
    ///
    /// let date = Date::from_gregorian(2017, 7, 23).unwrap();
    /// let lunar = LunarDate::from_date(date).unwrap();
    ///
    /// assert_eq!((2017, Leap(6), 1), (lunar.year(), lunar.lunar_month(), lunar.day()));
    /// ```
    pub fn from_date(date: Date) -> Result<Self> {
        let (gy, _, _) = date.gregorian();
        if !(FIRST_YEAR..=LAST_YEAR).contains(&gy) {
            debug!(year = gy, "gregorian year outside lunar table");
            return Err(Error::YearOutOfRange { year: gy });
        }
        let offset = date.jdn().checked_sub(EPOCH.jdn()).ok_or_else(|| {
            debug!(%date, "date precedes lunar table epoch");
            Error::BeforeEpoch
        })?;

        let (year, offset) = table::locate_year(offset).ok_or_else(|| table_defect(gy))?;
        let months = table::months(year).ok_or_else(|| table_defect(year))?;
        let (slot, offset) =
            table::locate(offset, months.map(|s| (s, s.days))).ok_or_else(|| table_defect(year))?;

        let month = if slot.leap {
            Month::Leap(slot.month)
        } else {
            Month::Common(slot.month)
        };
        let lunar = LunarDate {
            year,
            month,
            day: offset + 1,
            month_days: slot.days,
        };
        trace!(%date, ?lunar, "converted to lunar");
        Ok(lunar)
    }

    /// 农历年，正月初一起算。
    pub fn year(&self) -> i32 {
        self.year
    }
    /// 月序号 `1..=12`，无论平闰。
    pub fn month(&self) -> u32 {
        self.month.num()
    }
    /// 含平闰信息的月。
    pub fn lunar_month(&self) -> Month {
        self.month
    }
    pub fn is_leap_month(&self) -> bool {
        self.month.is_leap()
    }
    pub fn day(&self) -> u32 {
        self.day
    }
    /// 所在月的日数，29 或 30。
    pub fn month_days(&self) -> u32 {
        self.month_days
    }
    /// 所在农历年的干支。
    pub fn stem_branch(&self) -> StemBranch {
        StemBranch::for_year(self.year)
    }
    pub fn stem(&self) -> u32 {
        self.stem_branch().stem()
    }
    pub fn branch(&self) -> u32 {
        self.stem_branch().branch()
    }
    pub fn animal(&self) -> u32 {
        self.stem_branch().animal()
    }
    pub fn month_name(&self) -> String {
        self.month.name()
    }
    pub fn day_name(&self) -> String {
        fmt::day(self.day)
    }

    /// 换算回公历日期。
    pub fn to_date(&self) -> Result<Date> {
        lunar_to_solar(self.year, self.month, self.day)
    }
}

impl std::fmt::Display for LunarDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}年{}{}",
            self.stem_branch().name(),
            self.month_name(),
            self.day_name()
        )
    }
}

/// 将公历 `(year, month, day)` 换算为农历。
///
/// # 用例
///
/// ```
/// use nongli::Error;
/// use nongli::lunar::{self, Month::*};
///
/// let epoch = lunar::solar_to_lunar(1900, 1, 31).unwrap();
/// assert_eq!((1900, Common(1), 1), (epoch.year(), epoch.lunar_month(), epoch.day()));
///
/// assert_eq!(Err(Error::YearOutOfRange { year: 2101 }), lunar::solar_to_lunar(2101, 1, 1));
/// ```
pub fn solar_to_lunar(year: i32, month: i32, day: i32) -> Result<LunarDate> {
    if !(FIRST_YEAR..=LAST_YEAR).contains(&year) {
        debug!(year, "gregorian year outside lunar table");
        return Err(Error::YearOutOfRange { year });
    }
    let date = Date::from_gregorian(year, month, day)
        .ok_or(Error::InvalidDate { year, month, day })?;
    LunarDate::from_date(date)
}

/// 农历某月对应的公历区间，首尾两日均含在内。
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MonthRange {
    pub start: Date,
    pub end: Date,
    pub days: u32,
}

/// 取得农历 `year` 年 `month` 月的公历起止日期。
///
/// 闰月紧随同序平月之后，故 `Common(n)` 之前不含 `Leap(n)`，`Common(n + 1)` 之前则含。
///
/// # 用例
///
/// ```
/// use nongli::lunar::{self, Month::*};
///
/// let range = lunar::month_solar_range(2017, Leap(6)).unwrap();
/// assert_eq!("2017-07-23", range.start.iso_gregorian());
/// assert_eq!("2017-08-21", range.end.iso_gregorian());
/// assert_eq!(30, range.days);
/// ```
pub fn month_solar_range(year: i32, month: Month) -> Result<MonthRange> {
    let num = month.num();
    if !(1..=12).contains(&num) {
        return Err(Error::MonthOutOfRange { month: num });
    }
    let days_before_year =
        table::days_before_year(year).ok_or(Error::YearOutOfRange { year })?;
    let months = table::months(year).ok_or(Error::YearOutOfRange { year })?;

    let mut offset = days_before_year;
    for slot in months {
        if slot.month == num && slot.leap == month.is_leap() {
            let start = EPOCH + offset as i32;
            return Ok(MonthRange {
                start,
                end: start + (slot.days as i32 - 1),
                days: slot.days,
            });
        }
        offset += slot.days;
    }
    Err(Error::NoLeapMonth { year, month: num })
}

/// 将农历日期换算为公历。
///
/// # 用例
///
/// ```
/// use nongli::Error;
/// use nongli::lunar::{self, Month::*};
///
/// assert_eq!("2023-01-22", lunar::lunar_to_solar(2023, Common(1), 1).unwrap().iso_gregorian());
/// assert_eq!(
///     Err(Error::NoLeapMonth { year: 2023, month: 3 }),
///     lunar::lunar_to_solar(2023, Leap(3), 1)
/// );
/// ```
pub fn lunar_to_solar(year: i32, month: Month, day: u32) -> Result<Date> {
    let range = month_solar_range(year, month)?;
    if !(1..=range.days).contains(&day) {
        return Err(Error::DayOutOfRange {
            day,
            max: range.days,
        });
    }
    Ok(range.start + (day as i32 - 1))
}

/// 当前农历年月及其标签。
#[derive(Debug, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LunarYearMonth {
    pub year: i32,
    pub month: Month,
    pub month_name: String,
    pub year_stem_branch: String,
    pub animal: String,
}

impl From<LunarDate> for LunarYearMonth {
    fn from(date: LunarDate) -> Self {
        let sb = date.stem_branch();
        LunarYearMonth {
            year: date.year,
            month: date.month,
            month_name: date.month_name(),
            year_stem_branch: sb.name(),
            animal: sb.animal_name().to_owned(),
        }
    }
}

/// 依 `clock` 给出的今日取得农历年月。
///
/// ```
/// use nongli::Date;
/// use nongli::clock::FixedClock;
/// use nongli::lunar;
///
/// let clock = FixedClock(Date::from_gregorian(2024, 2, 10).unwrap());
/// let ym = lunar::current_year_month(&clock).unwrap();
/// assert_eq!((2024, "正月", "甲辰", "龙"), (ym.year, &*ym.month_name, &*ym.year_stem_branch, &*ym.animal));
/// ```
pub fn current_year_month<C: Clock + ?Sized>(clock: &C) -> Result<LunarYearMonth> {
    LunarDate::from_date(clock.today()).map(LunarYearMonth::from)
}

/// 年表数据自相矛盾时调用，开发期直接断言失败。
fn table_defect(year: i32) -> Error {
    debug_assert!(false, "lunar year table inconsistent near {year}");
    error!(year, "lunar year table inconsistent");
    Error::YearOutOfRange { year }
}
