//! 农历年表及其解码
//!
//! 每年一个压缩整数（实用 17 位），自低位起：
//!
//! - 第 0–3 位：闰月月序，`0` 为无闰月
//! - 第 4–15 位：平月大小，第 15 位为正月、第 4 位为腊月，`1` 为大月（30 日），`0` 为小月（29 日）
//! - 第 16 位：闰月大小，`1` 为 30 日，`0` 为 29 日
//!
//! 月序 `m` 对应的掩码为 `0x10000 >> m`。

/// 年表首年，其正月初一为公历 1900-01-31。
pub const FIRST_YEAR: i32 = 1900;
/// 年表末年。
pub const LAST_YEAR: i32 = 2100;

#[rustfmt::skip]
static YEARS: [u32; 201] = [
    0x04bd8, 0x04ae0, 0x0a570, 0x054d5, 0x0d260, 0x0d950, 0x16554, 0x056a0, 0x09ad0, 0x055d2, // 1900
    0x04ae0, 0x0a5b6, 0x0a4d0, 0x0d250, 0x1d255, 0x0b540, 0x0d6a0, 0x0ada2, 0x095b0, 0x14977, // 1910
    0x04970, 0x0a4b0, 0x0b4b5, 0x06a50, 0x06d40, 0x1ab54, 0x02b60, 0x09570, 0x052f2, 0x04970, // 1920
    0x06566, 0x0d4a0, 0x0ea50, 0x16a95, 0x05ad0, 0x02b60, 0x186e3, 0x092e0, 0x1c8d7, 0x0c950, // 1930
    0x0d4a0, 0x1d8a6, 0x0b550, 0x056a0, 0x1a5b4, 0x025d0, 0x092d0, 0x0d2b2, 0x0a950, 0x0b557, // 1940
    0x06ca0, 0x0b550, 0x15355, 0x04da0, 0x0a5b0, 0x14573, 0x052b0, 0x0a9a8, 0x0e950, 0x06aa0, // 1950
    0x0aea6, 0x0ab50, 0x04b60, 0x0aae4, 0x0a570, 0x05260, 0x0f263, 0x0d950, 0x05b57, 0x056a0, // 1960
    0x096d0, 0x04dd5, 0x04ad0, 0x0a4d0, 0x0d4d4, 0x0d250, 0x0d558, 0x0b540, 0x0b6a0, 0x195a6, // 1970
    0x095b0, 0x049b0, 0x0a974, 0x0a4b0, 0x0b27a, 0x06a50, 0x06d40, 0x0af46, 0x0ab60, 0x09570, // 1980
    0x04af5, 0x04970, 0x064b0, 0x074a3, 0x0ea50, 0x06b58, 0x05ac0, 0x0ab60, 0x096d5, 0x092e0, // 1990
    0x0c960, 0x0d954, 0x0d4a0, 0x0da50, 0x07552, 0x056a0, 0x0abb7, 0x025d0, 0x092d0, 0x0cab5, // 2000
    0x0a950, 0x0b4a0, 0x0baa4, 0x0ad50, 0x055d9, 0x04ba0, 0x0a5b0, 0x15176, 0x052b0, 0x0a930, // 2010
    0x07954, 0x06aa0, 0x0ad50, 0x05b52, 0x04b60, 0x0a6e6, 0x0a4e0, 0x0d260, 0x0ea65, 0x0d530, // 2020
    0x05aa0, 0x076a3, 0x096d0, 0x04afb, 0x04ad0, 0x0a4d0, 0x1d0b6, 0x0d250, 0x0d520, 0x0dd45, // 2030
    0x0b5a0, 0x056d0, 0x055b2, 0x049b0, 0x0a577, 0x0a4b0, 0x0aa50, 0x1b255, 0x06d20, 0x0ada0, // 2040
    0x14b63, 0x09370, 0x049f8, 0x04970, 0x064b0, 0x168a6, 0x0ea50, 0x06b20, 0x1a6c4, 0x0aae0, // 2050
    0x092e0, 0x0d2e3, 0x0c960, 0x0d557, 0x0d4a0, 0x0da50, 0x05d55, 0x056a0, 0x0a6d0, 0x055d4, // 2060
    0x052d0, 0x0a9b8, 0x0a950, 0x0b4a0, 0x0b6a6, 0x0ad50, 0x055a0, 0x0aba4, 0x0a5b0, 0x052b0, // 2070
    0x0b273, 0x06930, 0x07337, 0x06aa0, 0x0ad50, 0x14b55, 0x04b60, 0x0a570, 0x054e4, 0x0d160, // 2080
    0x0e968, 0x0d520, 0x0daa0, 0x16aa6, 0x056d0, 0x04ae0, 0x0a9d4, 0x0a2d0, 0x0d150, 0x0f252, // 2090
    0x0d520,                                                                                   // 2100
];

/// 取得该年的压缩数据，年表外返回 `None`。
pub fn encoding(year: i32) -> Option<u32> {
    year.checked_sub(FIRST_YEAR)
        .and_then(|i| usize::try_from(i).ok())
        .and_then(|i| YEARS.get(i))
        .copied()
}

/// 闰月月序，`0` 为无闰月。
///
/// # 用例
///
/// ```
/// use nongli::lunar::table;
///
/// assert_eq!(Some(6), table::leap_month(2017));
/// assert_eq!(Some(0), table::leap_month(2000));
/// assert_eq!(None, table::leap_month(1899));
/// ```
pub fn leap_month(year: i32) -> Option<u32> {
    encoding(year).map(|info| info & 0xf)
}

/// 闰月日数，无闰月为 `0`，否则为 29 或 30。
pub fn leap_month_days(year: i32) -> Option<u32> {
    let info = encoding(year)?;
    Some(match info & 0xf {
        0 => 0,
        _ => days(info, 0x10000),
    })
}

/// 平月 `month`（`1..=12`）的日数。
///
/// ```
/// use nongli::lunar::table;
///
/// assert_eq!(Some(29), table::month_days(2017, 6));
/// assert_eq!(None, table::month_days(2017, 13));
/// ```
pub fn month_days(year: i32, month: u32) -> Option<u32> {
    if !(1..=12).contains(&month) {
        return None;
    }
    encoding(year).map(|info| days(info, 0x10000 >> month))
}

fn days(info: u32, mask: u32) -> u32 {
    if info & mask != 0 { 30 } else { 29 }
}

/// 全年日数，含闰月。
///
/// ```
/// use nongli::lunar::table;
///
/// assert_eq!(Some(354), table::total_days_in_year(2000));
/// assert_eq!(Some(384), table::total_days_in_year(2017));
/// ```
pub fn total_days_in_year(year: i32) -> Option<u32> {
    encoding(year).map(year_days)
}

fn year_days(info: u32) -> u32 {
    let leap = if info & 0xf == 0 { 0 } else { days(info, 0x10000) };
    348 + (info & 0xfff0).count_ones() + leap
}

/// 月份位置：月序及是否为闰月。
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Slot {
    pub month: u32,
    pub leap: bool,
    pub days: u32,
}

/// 按时间顺序列出该年各月，闰月紧随同序平月之后。
///
/// ```
/// use nongli::lunar::table;
///
/// let months: Vec<_> = table::months(2017).unwrap().map(|s| (s.month, s.leap)).collect();
/// assert_eq!(13, months.len());
/// assert_eq!(&[(6, false), (6, true), (7, false)], &months[5..8]);
/// ```
pub fn months(year: i32) -> Option<impl Iterator<Item = Slot>> {
    let info = encoding(year)?;
    let leap = info & 0xf;
    Some((1..=12u32).flat_map(move |month| {
        let common = Slot {
            month,
            leap: false,
            days: days(info, 0x10000 >> month),
        };
        let leap = (leap == month).then(|| Slot {
            month,
            leap: true,
            days: days(info, 0x10000),
        });
        std::iter::once(common).chain(leap)
    }))
}

/// 逐项扣减日数，找出 `offset` 落在哪一项。
///
/// 前置条件：`offset >= 0`。返回命中项及其内的剩余偏移，满足
/// `0 <= 剩余 < 该项日数`；偏移恰好用尽于某项末尾时归入下一项首日
/// （如闰月前一平月用尽即落在闰月初一）。项目耗尽仍未命中则返回 `None`。
pub fn locate<T, I>(mut offset: u32, items: I) -> Option<(T, u32)>
where
    I: IntoIterator<Item = (T, u32)>,
{
    for (item, len) in items {
        if offset < len {
            return Some((item, offset));
        }
        offset -= len;
    }
    None
}

/// `year` 正月初一距年表首日的日数。
pub fn days_before_year(year: i32) -> Option<u32> {
    if !(FIRST_YEAR..=LAST_YEAR).contains(&year) {
        return None;
    }
    (FIRST_YEAR..year).map(total_days_in_year).sum()
}

/// 自年表首日起第 `offset` 日所在农历年，及该日在年内的偏移。
pub fn locate_year(offset: u32) -> Option<(i32, u32)> {
    locate(offset, (FIRST_YEAR..).zip(YEARS).map(|(y, info)| (y, year_days(info))))
}
