//! Formatting dates into their traditional names.
//!
//! Years are named by the sexagenary (stem-branch) cycle with the zodiac
//! animal appended, months and days by fixed name tables. All cycles key
//! off the conventional alignment where year 4 is 甲子.

use super::{LunisolarDate, Month};

/// Returns the stem-branch name of a year.
///
/// # Example
///
/// ```
/// use lunkalendaro::chinese::fmt;
///
/// assert_eq!("甲子", fmt::stem_branch(1984));
/// assert_eq!("癸卯", fmt::stem_branch(2023));
/// ```
pub fn stem_branch(year: i32) -> String {
    static STEMS: &[&str] = &["甲", "乙", "丙", "丁", "戊", "己", "庚", "辛", "壬", "癸"];
    static BRANCHES: &[&str] = &[
        "子", "丑", "寅", "卯", "辰", "巳", "午", "未", "申", "酉", "戌", "亥",
    ];
    STEMS[(year - 4).rem_euclid(10) as usize].to_owned()
        + BRANCHES[(year - 4).rem_euclid(12) as usize]
}

/// Returns the zodiac animal of a year.
///
/// # Example
///
/// ```
/// use lunkalendaro::chinese::fmt;
///
/// assert_eq!("龙", fmt::zodiac(2024));
/// ```
pub fn zodiac(year: i32) -> &'static str {
    static ANIMALS: &[&str] = &[
        "鼠", "牛", "虎", "兔", "龙", "蛇", "马", "羊", "猴", "鸡", "狗", "猪",
    ];
    ANIMALS[(year - 4).rem_euclid(12) as usize]
}

/// Returns the full year name, stem-branch with the zodiac animal in
/// parentheses.
///
/// # Example
///
/// ```
/// use lunkalendaro::chinese::fmt;
///
/// assert_eq!("癸卯(兔)", fmt::year(2023));
/// ```
pub fn year(year: i32) -> String {
    format!("{}({})", stem_branch(year), zodiac(year))
}

/// Returns the month name, 闰-prefixed for a leap month.
///
/// # Example
///
/// ```
/// use lunkalendaro::chinese::{fmt, Month::*};
///
/// assert_eq!("正月", fmt::month(Common(1)));
/// assert_eq!("闰二月", fmt::month(Leap(2)));
/// assert_eq!("十二月", fmt::month(Common(12)));
/// ```
///
/// # Panics
///
/// Panics if the month index is not in `1..=12`.
pub fn month(m: Month) -> String {
    static NAMES: &[&str] = &[
        "正月", "二月", "三月", "四月", "五月", "六月", "七月", "八月", "九月", "十月", "十一月",
        "十二月",
    ];
    let num = m.num();
    assert!((1..=12).contains(&num), "month {} not in 1..=12", num);
    let mut rt = String::new();
    if m.is_leap() {
        rt += "闰";
    }
    rt += NAMES[(num - 1) as usize];
    rt
}

/// Returns the day name, 初一 through 三十.
///
/// # Example
///
/// ```
/// use lunkalendaro::chinese::fmt;
///
/// assert_eq!("初一", fmt::day(1));
/// assert_eq!("廿五", fmt::day(25));
/// assert_eq!("三十", fmt::day(30));
/// ```
///
/// # Panics
///
/// Panics if the day is not in `1..=30`.
pub fn day(d: u32) -> &'static str {
    static NAMES: &[&str] = &[
        "", "初一", "初二", "初三", "初四", "初五", "初六", "初七", "初八", "初九", "初十",
        "十一", "十二", "十三", "十四", "十五", "十六", "十七", "十八", "十九", "二十", "廿一",
        "廿二", "廿三", "廿四", "廿五", "廿六", "廿七", "廿八", "廿九", "三十",
    ];
    assert!((1..=30).contains(&d), "day {} not in 1..=30", d);
    NAMES[d as usize]
}

/// Returns the full traditional form of a lunisolar date.
///
/// # Example
///
/// ```
/// use lunkalendaro::chinese::{fmt, LunisolarDate, Month::*};
///
/// let lunar = LunisolarDate { year: 2023, month: Leap(2), day: 5 };
/// assert_eq!("癸卯(兔)年闰二月初五", fmt::lunisolar(&lunar));
/// ```
pub fn lunisolar(date: &LunisolarDate) -> String {
    year(date.year) + "年" + &month(date.month) + day(date.day)
}
