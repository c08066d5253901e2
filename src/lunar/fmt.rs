//! 格式化日期相关功能

/// 汉数字，第 `1..=9` 项分别为「一」到「九」。为便于格式化日期，第 0 项为「十」。
pub const NUM_CHINESE: &[&str] = &["十", "一", "二", "三", "四", "五", "六", "七", "八", "九"];

/// 十天干，自甲起。
pub const STEMS: [&str; 10] = ["甲", "乙", "丙", "丁", "戊", "己", "庚", "辛", "壬", "癸"];
/// 十二地支，自子起。
pub const BRANCHES: [&str; 12] = [
    "子", "丑", "寅", "卯", "辰", "巳", "午", "未", "申", "酉", "戌", "亥",
];
/// 十二生肖，与地支同序。
pub const ANIMALS: [&str; 12] = [
    "鼠", "牛", "虎", "兔", "龙", "蛇", "马", "羊", "猴", "鸡", "狗", "猪",
];

/// 干支序号转为文本形式，`1` 为甲子，`60` 为癸亥。
///
/// # 用例
///
/// ```
/// use nongli::lunar;
///
/// assert_eq!("乙巳", lunar::fmt::sexagenary(42));
/// ```
pub fn sexagenary(num: u32) -> String {
    let idx = (num + 59) % 60;
    STEMS[(idx % 10) as usize].to_owned() + BRANCHES[(idx % 12) as usize]
}

/// 取得月名（含「月」字）。十一、十二月称「冬月」「腊月」。
///
/// 月序不在 `1..=12` 间则返回空串。
///
/// # 用例
///
/// ```
/// use nongli::lunar::{self, Month::*};
///
/// assert_eq!("冬月", lunar::fmt::month(Common(11)));
/// assert_eq!("闰正月", lunar::fmt::month(Leap(1)));
/// ```
pub fn month(m: super::Month) -> String {
    let num = m.num();
    let name = match num {
        1 => "正",
        2..=9 => NUM_CHINESE[num as usize],
        10 => "十",
        11 => "冬",
        12 => "腊",
        _ => return String::new(),
    };
    let mut rt = String::new();
    if m.is_leap() {
        rt += "闰";
    }
    rt += name;
    rt += "月";
    rt
}

/// 取得日名，前十日为「初一」到「初十」，第 21 至 29 日为「廿一」到「廿九」。
///
/// 日序不在 `1..=30` 间则返回空串。
///
/// # 用例
///
/// ```
/// use nongli::lunar;
///
/// assert_eq!("初十", lunar::fmt::day(10));
/// assert_eq!("廿五", lunar::fmt::day(25));
/// assert_eq!("三十", lunar::fmt::day(30));
/// ```
pub fn day(d: u32) -> String {
    let prefix = match d {
        1..=10 => "初",
        11..=19 => "十",
        20 => "二",
        21..=29 => "廿",
        30 => "三",
        _ => return String::new(),
    };
    prefix.to_owned() + NUM_CHINESE[(d % 10) as usize]
}
