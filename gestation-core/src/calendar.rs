//! Chuyển đổi lịch Gregorian <-> Jalali (lịch Hijri mặt trời) và phép tính số ngày.
//!
//! Mọi khoảng thời gian lâm sàng được tính bằng số ngày lịch trên `NaiveDate`,
//! không bao giờ bằng hiệu mili giây, nên không bị ảnh hưởng bởi giờ mùa hè.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Days, Duration, NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};

use crate::DatingError;

/// Các năm mốc của chu kỳ 33 năm; năm Jalali hợp lệ nằm trong `[-61, 3178)`.
const BREAKS: [i32; 20] = [
    -61, 9, 38, 199, 426, 686, 756, 818, 1111, 1181, 1210, 1635, 2060, 2097, 2192, 2262, 2324,
    2394, 2456, 3178,
];

const JALALI_MONTHS: [&str; 12] = [
    "فروردین",
    "اردیبهشت",
    "خرداد",
    "تیر",
    "مرداد",
    "شهریور",
    "مهر",
    "آبان",
    "آذر",
    "دی",
    "بهمن",
    "اسفند",
];

const GREGORIAN_MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Ngày theo lịch Jalali.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct JalaliDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl JalaliDate {
    /// Tạo ngày đã kiểm tra hợp lệ.
    pub fn new(year: i32, month: u32, day: u32) -> Result<Self, DatingError> {
        if is_valid_jalali(i64::from(year), i64::from(month), i64::from(day)) {
            Ok(Self { year, month, day })
        } else {
            Err(DatingError::InvalidJalaliDate {
                year: i64::from(year),
                month: i64::from(month),
                day: i64::from(day),
            })
        }
    }

    pub fn is_valid(&self) -> bool {
        is_valid_jalali(
            i64::from(self.year),
            i64::from(self.month),
            i64::from(self.day),
        )
    }
}

impl fmt::Display for JalaliDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}/{:02}/{:02}", self.year, self.month, self.day)
    }
}

impl FromStr for JalaliDate {
    type Err = DatingError;

    /// Nhận `1403/01/05` hoặc `1403-1-5`.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = value.trim().split(['/', '-']).collect();
        let [year, month, day] = parts.as_slice() else {
            return Err(DatingError::Parse(format!("Ngày Jalali không đúng định dạng: {value}")));
        };

        let parse = |part: &str| {
            part.trim()
                .parse::<i64>()
                .map_err(|err| DatingError::Parse(format!("{value}: {err}")))
        };
        let (year, month, day) = (parse(*year)?, parse(*month)?, parse(*day)?);

        if !is_valid_jalali(year, month, day) {
            return Err(DatingError::InvalidJalaliDate { year, month, day });
        }
        Ok(Self {
            year: year as i32,
            month: month as u32,
            day: day as u32,
        })
    }
}

/// Kết quả trung gian của thuật toán chu kỳ 33 năm.
struct JalaliYearInfo {
    /// Năm Gregorian chứa ngày 1 Farvardin.
    gregorian_year: i32,
    /// Ngày trong tháng 3 Gregorian ứng với 1 Farvardin.
    march_day: i32,
    /// Số năm kể từ năm nhuận gần nhất (0 nghĩa là năm nhuận).
    years_since_leap: i32,
}

fn jalali_year_info(year: i32) -> Result<JalaliYearInfo, DatingError> {
    let first = BREAKS[0];
    let last = BREAKS[BREAKS.len() - 1];
    if year < first || year >= last {
        return Err(DatingError::UnsupportedJalaliYear(i64::from(year)));
    }

    let gregorian_year = year + 621;
    let mut leap_jalali = -14;
    let mut previous_break = first;
    let mut jump = 0;

    for &current_break in &BREAKS[1..] {
        jump = current_break - previous_break;
        if year < current_break {
            break;
        }
        leap_jalali += jump / 33 * 8 + (jump % 33) / 4;
        previous_break = current_break;
    }

    let mut n = year - previous_break;
    leap_jalali += n / 33 * 8 + (n % 33 + 3) / 4;
    if jump % 33 == 4 && jump - n == 4 {
        leap_jalali += 1;
    }

    let leap_gregorian = gregorian_year / 4 - (gregorian_year / 100 + 1) * 3 / 4 - 150;
    let march_day = 20 + leap_jalali - leap_gregorian;

    if jump - n < 6 {
        n = n - jump + (jump + 4) / 33 * 33;
    }
    let mut years_since_leap = ((n + 1) % 33 - 1) % 4;
    if years_since_leap == -1 {
        years_since_leap = 4;
    }

    Ok(JalaliYearInfo {
        gregorian_year,
        march_day,
        years_since_leap,
    })
}

fn farvardin_first(info: &JalaliYearInfo) -> Result<NaiveDate, DatingError> {
    let day = u32::try_from(info.march_day)
        .map_err(|_| DatingError::UnsupportedJalaliYear(i64::from(info.gregorian_year - 621)))?;
    NaiveDate::from_ymd_opt(info.gregorian_year, 3, day)
        .ok_or(DatingError::UnsupportedJalaliYear(i64::from(info.gregorian_year - 621)))
}

pub fn is_leap_jalali_year(year: i32) -> bool {
    matches!(jalali_year_info(year), Ok(info) if info.years_since_leap == 0)
}

/// Số ngày của tháng Jalali; `None` nếu tháng hoặc năm không hợp lệ.
pub fn jalali_month_length(year: i32, month: u32) -> Option<u32> {
    match month {
        1..=6 => Some(31),
        7..=11 => Some(30),
        12 => {
            let info = jalali_year_info(year).ok()?;
            Some(if info.years_since_leap == 0 { 30 } else { 29 })
        }
        _ => None,
    }
}

/// Kiểm tra ngày Jalali: tháng trong [1, 12], ngày trong độ dài của tháng đó.
pub fn is_valid_jalali(year: i64, month: i64, day: i64) -> bool {
    let (Ok(year), Ok(month)) = (i32::try_from(year), u32::try_from(month)) else {
        return false;
    };
    if year < BREAKS[0] || year >= BREAKS[BREAKS.len() - 1] {
        return false;
    }
    match jalali_month_length(year, month) {
        Some(length) => day >= 1 && day <= i64::from(length),
        None => false,
    }
}

/// Dựng ngày Jalali từ số thực (ví dụ dữ liệu nhập từ JavaScript).
///
/// Từ chối NaN, vô cực và số có phần thập phân trước khi kiểm tra lịch.
pub fn jalali_from_components(year: f64, month: f64, day: f64) -> Result<JalaliDate, DatingError> {
    let whole = |value: f64| value.is_finite() && value.fract() == 0.0;
    if !(whole(year) && whole(month) && whole(day)) {
        return Err(DatingError::NonFiniteComponent);
    }
    let (year, month, day) = (year as i64, month as i64, day as i64);
    if !is_valid_jalali(year, month, day) {
        return Err(DatingError::InvalidJalaliDate { year, month, day });
    }
    Ok(JalaliDate {
        year: year as i32,
        month: month as u32,
        day: day as u32,
    })
}

/// Gregorian -> Jalali. Lỗi chỉ khi ngày nằm ngoài khoảng năm hỗ trợ.
pub fn to_jalali(date: NaiveDate) -> Result<JalaliDate, DatingError> {
    let out_of_range = || DatingError::DateOutOfRange(date);

    let mut year = date.year() - 621;
    let info = jalali_year_info(year).map_err(|_| out_of_range())?;
    let start = farvardin_first(&info).map_err(|_| out_of_range())?;

    let mut offset = date.signed_duration_since(start).num_days();
    if offset >= 0 {
        if offset <= 185 {
            return Ok(JalaliDate {
                year,
                month: 1 + (offset / 31) as u32,
                day: (offset % 31) as u32 + 1,
            });
        }
        offset -= 186;
    } else {
        year -= 1;
        if year < BREAKS[0] {
            return Err(out_of_range());
        }
        offset += 179;
        if info.years_since_leap == 1 {
            offset += 1;
        }
    }

    Ok(JalaliDate {
        year,
        month: 7 + (offset / 30) as u32,
        day: (offset % 30) as u32 + 1,
    })
}

/// Jalali -> Gregorian. Ngày không hợp lệ trả về lỗi, không bao giờ trả ngày thay thế.
pub fn from_jalali(date: JalaliDate) -> Result<NaiveDate, DatingError> {
    if !date.is_valid() {
        return Err(DatingError::InvalidJalaliDate {
            year: i64::from(date.year),
            month: i64::from(date.month),
            day: i64::from(date.day),
        });
    }

    let info = jalali_year_info(date.year)?;
    let start = farvardin_first(&info)?;
    let month = i64::from(date.month);
    let offset = (month - 1) * 31 - (month / 7) * (month - 7) + i64::from(date.day) - 1;
    Ok(start + Duration::days(offset))
}

/// Ngày lịch (theo múi giờ của chính thời điểm) dùng cho mọi phép tính khoảng ngày.
pub fn calendar_day<Tz: TimeZone>(instant: &DateTime<Tz>) -> NaiveDate {
    instant.date_naive()
}

/// Hiệu có dấu `b - a` theo ngày; dương khi `b` sau `a`.
pub fn diff_days(a: NaiveDate, b: NaiveDate) -> i64 {
    b.signed_duration_since(a).num_days()
}

/// Số ngày tuyệt đối giữa hai ngày.
pub fn days_between(a: NaiveDate, b: NaiveDate) -> i64 {
    diff_days(a, b).abs()
}

/// Cộng `days` ngày (có thể âm), tự xử lý qua tháng, năm và năm nhuận.
///
/// Lỗi khi kết quả vượt khoảng `NaiveDate` biểu diễn được.
pub fn add_days(date: NaiveDate, days: i64) -> Result<NaiveDate, DatingError> {
    let step = Days::new(days.unsigned_abs());
    let moved = if days >= 0 {
        date.checked_add_days(step)
    } else {
        date.checked_sub_days(step)
    };
    moved.ok_or(DatingError::DayOffsetOutOfRange { date, days })
}

/// `Mar 20, 2024`
pub fn format_gregorian(date: NaiveDate) -> String {
    format!(
        "{} {}, {}",
        GREGORIAN_MONTHS[date.month0() as usize],
        date.day(),
        date.year()
    )
}

/// `1 فروردین 1403`
pub fn format_jalali(date: JalaliDate) -> String {
    match JALALI_MONTHS.get((date.month as usize).wrapping_sub(1)) {
        Some(month) => format!("{} {} {}", date.day, month, date.year),
        None => "Invalid Date".to_string(),
    }
}
