//! 节月（按「节」划分的月份）
//!
//! 以十二「节」为月界：立春起寅月（1），惊蛰起卯月（2）……小寒起丑月（12）；
//! 立春为年界。各节交节日取固定的公历月日近似，不做天文计算，故实际交节前后一日内可能有出入。
//! 内容按 `(节年, 节月)` 编址，改用精确交节时刻会改变边界日期的编址，因此保持近似。
//!
//! 节月与 [`crate::lunar`] 的朔望月是两套体系，不可混用。

use tracing::trace;

use crate::clock::Clock;
use crate::date::Date;
use crate::error::{Error, Result};
use crate::lunar::StemBranch;
use crate::lunar::table::{FIRST_YEAR, LAST_YEAR};

/// 各节月起始的近似公历 `(月, 日)`，第 0 项为寅月。
const STARTS: [(u32, u32); 12] = [
    (2, 4),
    (3, 6),
    (4, 5),
    (5, 6),
    (6, 6),
    (7, 7),
    (8, 8),
    (9, 8),
    (10, 8),
    (11, 7),
    (12, 7),
    (1, 6),
];

const NAMES: [&str; 12] = [
    "寅月", "卯月", "辰月", "巳月", "午月", "未月", "申月", "酉月", "戌月", "亥月", "子月", "丑月",
];

const TERMS: [&str; 12] = [
    "立春", "惊蛰", "清明", "立夏", "芒种", "小暑", "立秋", "白露", "寒露", "立冬", "大雪", "小寒",
];

/// 节月名，如 `1` 为「寅月」。月序不在 `1..=12` 间则返回空串。
///
/// ```
/// use nongli::jieqi;
///
/// assert_eq!("寅月", jieqi::month_name(1));
/// assert_eq!("丑月", jieqi::month_name(12));
/// assert_eq!("", jieqi::month_name(13));
/// ```
pub fn month_name(month: u32) -> &'static str {
    lookup(&NAMES, month)
}

/// 节月简称，即月建地支，如 `1` 为「寅」。月序不在 `1..=12` 间则返回空串。
pub fn month_short_name(month: u32) -> &'static str {
    let name = lookup(&NAMES, month);
    name.strip_suffix("月").unwrap_or(name)
}

/// 开启该节月的节名，如 `1` 为「立春」。月序不在 `1..=12` 间则返回空串。
pub fn start_term_name(month: u32) -> &'static str {
    lookup(&TERMS, month)
}

fn lookup(table: &[&'static str; 12], month: u32) -> &'static str {
    month
        .checked_sub(1)
        .and_then(|i| table.get(i as usize))
        .copied()
        .unwrap_or("")
}

/// 节年与节月。
///
/// 节年以立春为界：立春（约 2 月 4 日）前的日期属上一节年。
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawSolarTermMonth"))]
pub struct SolarTermMonth {
    year: i32,
    month: u32,
}

/// 反序列化须经 [`SolarTermMonth::new`] 校验。
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawSolarTermMonth {
    year: i32,
    month: u32,
}

#[cfg(feature = "serde")]
impl TryFrom<RawSolarTermMonth> for SolarTermMonth {
    type Error = Error;
    fn try_from(raw: RawSolarTermMonth) -> Result<Self> {
        Self::new(raw.year, raw.month)
    }
}

impl SolarTermMonth {
    /// 以节年、节月直接编址，供按 `/{year}/{month}` 查询内容时校验参数。
    ///
    /// 年不在 1900–2100 间或月不在 `1..=12` 间则回报 `Err`。
    pub fn new(year: i32, month: u32) -> Result<Self> {
        if !(FIRST_YEAR..=LAST_YEAR).contains(&year) {
            return Err(Error::YearOutOfRange { year });
        }
        if !(1..=12).contains(&month) {
            return Err(Error::MonthOutOfRange { month });
        }
        Ok(Self { year, month })
    }

    /// 取得日期所在节月，对任意日期均有结果。
    ///
    /// # 用例
    ///
    /// ```
    /// use nongli::Date;
    /// use nongli::jieqi::SolarTermMonth;
    ///
    /// let feb3 = SolarTermMonth::for_date(Date::from_gregorian(2024, 2, 3).unwrap());
    /// assert_eq!((2023, 12), (feb3.year(), feb3.month()));
    /// let feb4 = SolarTermMonth::for_date(Date::from_gregorian(2024, 2, 4).unwrap());
    /// assert_eq!((2024, 1), (feb4.year(), feb4.month()));
    /// ```
    pub fn for_date(date: Date) -> Self {
        let (y, m, d) = date.gregorian();
        let today = (m as u32, d as u32);
        // 1 月 1–5 日仍在上一年大雪所起的子月
        let month = STARTS
            .iter()
            .zip(1..)
            .filter(|(start, _)| **start <= today)
            .max_by_key(|(start, _)| **start)
            .map_or(11, |(_, month)| month);
        let year = if today < STARTS[0] { y - 1 } else { y };
        let stm = Self { year, month };
        trace!(%date, year, month, "resolved solar-term month");
        stm
    }

    pub fn year(&self) -> i32 {
        self.year
    }
    /// 节月序号，`1..=12`，1 为寅月。
    pub fn month(&self) -> u32 {
        self.month
    }
    pub fn name(&self) -> &'static str {
        month_name(self.month)
    }
    pub fn short_name(&self) -> &'static str {
        month_short_name(self.month)
    }
    pub fn start_term(&self) -> &'static str {
        start_term_name(self.month)
    }
    /// 节年的干支。
    pub fn stem_branch(&self) -> StemBranch {
        StemBranch::for_year(self.year)
    }

    /// 下一个节月。
    pub fn succ(&self) -> Self {
        match self.month {
            12 => Self {
                year: self.year + 1,
                month: 1,
            },
            m => Self {
                year: self.year,
                month: m + 1,
            },
        }
    }

    /// 该节月首日的近似公历日期。丑月落在次一公历年。
    ///
    /// ```
    /// use nongli::jieqi::SolarTermMonth;
    ///
    /// let chou = SolarTermMonth::new(2023, 12).unwrap();
    /// assert_eq!("2024-01-06", chou.start().unwrap().iso_gregorian());
    /// assert_eq!("2024-02-03", chou.end().unwrap().iso_gregorian());
    /// ```
    pub fn start(&self) -> Option<Date> {
        let (m, d) = *STARTS.get(self.month.checked_sub(1)? as usize)?;
        let y = if m < STARTS[0].0 { self.year + 1 } else { self.year };
        Date::from_gregorian(y, m as i32, d as i32)
    }

    /// 该节月末日的近似公历日期。
    pub fn end(&self) -> Option<Date> {
        self.succ().start()?.checked_add(-1)
    }
}

/// 当前节月及其标签，用作月度内容的编址键。
#[derive(Debug, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct JieQiYearMonth {
    pub year: i32,
    pub month: u32,
    pub month_name: String,
    pub short_name: String,
    pub year_stem_branch: String,
}

impl From<SolarTermMonth> for JieQiYearMonth {
    fn from(stm: SolarTermMonth) -> Self {
        JieQiYearMonth {
            year: stm.year,
            month: stm.month,
            month_name: stm.name().to_owned(),
            short_name: stm.short_name().to_owned(),
            year_stem_branch: stm.stem_branch().name(),
        }
    }
}

/// 依 `clock` 给出的今日取得节年、节月。
///
/// ```
/// use nongli::Date;
/// use nongli::clock::FixedClock;
/// use nongli::jieqi;
///
/// let clock = FixedClock(Date::from_gregorian(2024, 2, 5).unwrap());
/// let ym = jieqi::current_year_month(&clock);
/// assert_eq!((2024, 1), (ym.year, ym.month));
/// assert_eq!(("寅月", "甲辰"), (&*ym.month_name, &*ym.year_stem_branch));
/// ```
pub fn current_year_month<C: Clock + ?Sized>(clock: &C) -> JieQiYearMonth {
    SolarTermMonth::for_date(clock.today()).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;

    fn ymd(y: i32, m: i32, d: i32) -> Date {
        Date::from_gregorian(y, m, d).unwrap()
    }

    #[test]
    fn lichun_boundary() {
        for year in [1900, 1999, 2024, 2100] {
            let ym = current_year_month(&FixedClock(ymd(year, 2, 3)));
            assert_eq!((year - 1, 12, "丑月"), (ym.year, ym.month, &*ym.month_name));
            let ym = current_year_month(&FixedClock(ymd(year, 2, 5)));
            assert_eq!((year, 1, "寅月"), (ym.year, ym.month, &*ym.month_name));
        }
    }

    #[test]
    fn month_boundaries() {
        let data = [
            ((2024, 1, 1), (2023, 11)),
            ((2024, 1, 5), (2023, 11)),
            ((2024, 1, 6), (2023, 12)),
            ((2024, 2, 4), (2024, 1)),
            ((2024, 3, 5), (2024, 1)),
            ((2024, 3, 6), (2024, 2)),
            ((2024, 4, 4), (2024, 2)),
            ((2024, 4, 5), (2024, 3)),
            ((2024, 5, 6), (2024, 4)),
            ((2024, 6, 6), (2024, 5)),
            ((2024, 7, 7), (2024, 6)),
            ((2024, 8, 8), (2024, 7)),
            ((2024, 9, 8), (2024, 8)),
            ((2024, 10, 8), (2024, 9)),
            ((2024, 11, 7), (2024, 10)),
            ((2024, 12, 6), (2024, 10)),
            ((2024, 12, 7), (2024, 11)),
            ((2024, 12, 31), (2024, 11)),
        ];
        for ((y, m, d), std) in data {
            let stm = SolarTermMonth::for_date(ymd(y, m, d));
            assert_eq!(std, (stm.year(), stm.month()), "{y:04}-{m:02}-{d:02}");
        }
    }

    #[test]
    fn every_day_resolves_once() {
        // 逐日推进时节月只在固定边界上前进一步
        let mut prev = SolarTermMonth::for_date(ymd(1999, 12, 31));
        let mut date = ymd(2000, 1, 1);
        while date <= ymd(2001, 12, 31) {
            let stm = SolarTermMonth::for_date(date);
            assert!((1..=12).contains(&stm.month()));
            if stm != prev {
                assert_eq!(prev.succ(), stm, "{date}");
                assert_eq!(Some(date), stm.start(), "{date}");
                assert_eq!(Some(date + -1), prev.end(), "{date}");
            }
            prev = stm;
            date = date + 1;
        }
    }

    #[test]
    fn names() {
        for (m, (name, short, term)) in (1..).zip([
            ("寅月", "寅", "立春"),
            ("卯月", "卯", "惊蛰"),
            ("辰月", "辰", "清明"),
            ("巳月", "巳", "立夏"),
            ("午月", "午", "芒种"),
            ("未月", "未", "小暑"),
            ("申月", "申", "立秋"),
            ("酉月", "酉", "白露"),
            ("戌月", "戌", "寒露"),
            ("亥月", "亥", "立冬"),
            ("子月", "子", "大雪"),
            ("丑月", "丑", "小寒"),
        ]) {
            assert_eq!(
                (name, short, term),
                (month_name(m), month_short_name(m), start_term_name(m))
            );
        }
        for m in [0, 13, u32::MAX] {
            assert_eq!(("", "", ""), (month_name(m), month_short_name(m), start_term_name(m)));
        }
    }

    #[test]
    fn direct_addressing() {
        assert_eq!(Ok((2024, 3)), SolarTermMonth::new(2024, 3).map(|s| (s.year(), s.month())));
        assert_eq!(Err(Error::YearOutOfRange { year: 1899 }), SolarTermMonth::new(1899, 3));
        assert_eq!(Err(Error::YearOutOfRange { year: 2101 }), SolarTermMonth::new(2101, 3));
        assert_eq!(Err(Error::MonthOutOfRange { month: 0 }), SolarTermMonth::new(2024, 0));
        assert_eq!(Err(Error::MonthOutOfRange { month: 13 }), SolarTermMonth::new(2024, 13));
    }

    #[test]
    fn extreme_dates() {
        let first = SolarTermMonth::for_date(Date::from_jdn(0));
        assert_eq!((-4713, 10), (first.year(), first.month()));
        // 11754508-12-13
        let last = SolarTermMonth::for_date(Date::from_jdn(u32::MAX));
        assert_eq!((11754508, 11), (last.year(), last.month()));
    }

    #[test]
    fn year_labels() {
        let ym = current_year_month(&FixedClock(ymd(2024, 1, 20)));
        assert_eq!("癸卯", ym.year_stem_branch);
        assert_eq!("丑", ym.short_name);
        let ym = current_year_month(&FixedClock(ymd(2026, 10, 18)));
        assert_eq!(
            (2026, 9, "戌月", "丙午"),
            (ym.year, ym.month, &*ym.month_name, &*ym.year_stem_branch)
        );
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn round_trip() {
        let stm = SolarTermMonth::new(2024, 3).unwrap();
        let json = serde_json::to_string(&stm).unwrap();
        assert_eq!(r#"{"year":2024,"month":3}"#, json);
        assert_eq!(stm, serde_json::from_str::<SolarTermMonth>(&json).unwrap());
    }

    #[test]
    fn rejects_invalid() {
        for json in [
            r#"{"year":2024,"month":0}"#,
            r#"{"year":2024,"month":13}"#,
            r#"{"year":2024,"month":4294967295}"#,
            r#"{"year":1899,"month":1}"#,
            r#"{"month":3}"#,
        ] {
            assert!(serde_json::from_str::<SolarTermMonth>(json).is_err(), "{json}");
        }
    }

    #[test]
    fn labels_serialize() {
        let ym = JieQiYearMonth::from(SolarTermMonth::new(2024, 1).unwrap());
        assert_eq!(
            r#"{"year":2024,"month":1,"month_name":"寅月","short_name":"寅","year_stem_branch":"甲辰"}"#,
            serde_json::to_string(&ym).unwrap()
        );
    }
}
