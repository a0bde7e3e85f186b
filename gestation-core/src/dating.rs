//! Ước tính tuổi thai (GA) và ngày dự sinh (EDC) từ số đo lâm sàng.
//!
//! Các công thức là xấp xỉ tuyến tính đơn giản, không thay thế biểu đồ đã kiểm định
//! (ví dụ Hadlock).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar::{add_days, diff_days};
use crate::{DatingError, TERM_DAYS};

/// Khoảng CRL (mm) dùng được để định tuổi, xấp xỉ 6-14 tuần.
const CRL_RANGE_MM: std::ops::RangeInclusive<f64> = 5.0..=84.0;

/// Các số đo sinh trắc thai kỳ sau (mm).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq)]
pub struct Biometry {
    pub bpd: Option<f64>,
    pub hc: Option<f64>,
    pub ac: Option<f64>,
    pub fl: Option<f64>,
}

impl Biometry {
    pub fn is_empty(&self) -> bool {
        self.bpd.is_none() && self.hc.is_none() && self.ac.is_none() && self.fl.is_none()
    }
}

/// Tuổi thai tách thành tuần và ngày lẻ.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct GaBreakdown {
    pub weeks: i64,
    pub days: i64,
}

impl GaBreakdown {
    /// Chia Euclid: `days` luôn trong `0..7` kể cả khi tổng âm.
    pub fn from_days(total_days: i64) -> Self {
        Self {
            weeks: total_days.div_euclid(7),
            days: total_days.rem_euclid(7),
        }
    }

    pub fn total_days(&self) -> i64 {
        self.weeks * 7 + self.days
    }
}

/// GA (ngày) từ chiều dài đầu mông; `None` khi CRL ngoài khoảng [5, 84] mm.
pub fn ga_from_crl(crl_mm: f64) -> Option<i64> {
    if !CRL_RANGE_MM.contains(&crl_mm) {
        return None;
    }
    Some((crl_mm + 42.0).round() as i64)
}

/// GA (ngày) trung bình từ các số đo vượt ngưỡng hợp lý.
///
/// `None` khi không có thông số nào dùng được, hoặc khi kết quả vượt quá
/// `max_weeks` tuần (số đo phi lý, kể cả vô hạn).
pub fn ga_from_biometry(biometry: &Biometry, max_weeks: i64) -> Option<i64> {
    let estimates: Vec<f64> = [
        biometry
            .bpd
            .filter(|v| *v > 20.0)
            .map(|v| 1.266 * v + 64.14),
        biometry
            .hc
            .filter(|v| *v > 80.0)
            .map(|v| 0.762 * v + 66.86),
        biometry
            .ac
            .filter(|v| *v > 60.0)
            .map(|v| 0.793 * v + 70.01),
        biometry
            .fl
            .filter(|v| *v > 15.0)
            .map(|v| 2.396 * v + 65.65),
    ]
    .into_iter()
    .flatten()
    .collect();

    if estimates.is_empty() {
        return None;
    }

    let mean = estimates.iter().sum::<f64>() / estimates.len() as f64;
    let ga = mean.round();
    if ga.is_nan() || ga > (max_weeks * 7) as f64 {
        return None;
    }
    Some(ga as i64)
}

/// GA (ngày) đọc từ phiếu siêu âm cũ: `weeks` trong [0, max_weeks], `days` trong [0, 6].
pub fn ga_from_report(weeks: i64, days: i64, max_weeks: i64) -> Option<i64> {
    if !(0..=max_weeks).contains(&weeks) || !(0..=6).contains(&days) {
        return None;
    }
    Some(weeks * 7 + days)
}

/// Quy tắc Naegele: LMP + 280 ngày.
pub fn edc_from_lmp(lmp: NaiveDate) -> Result<NaiveDate, DatingError> {
    add_days(lmp, TERM_DAYS)
}

pub fn edc_from_ga(ga_days: i64, reference: NaiveDate) -> Result<NaiveDate, DatingError> {
    let remaining = TERM_DAYS
        .checked_sub(ga_days)
        .ok_or(DatingError::DayOffsetOutOfRange {
            date: reference,
            days: ga_days,
        })?;
    add_days(reference, remaining)
}

/// GA suy ra từ EDC tại một ngày bất kỳ; vượt 280 khi đã quá ngày dự sinh.
pub fn ga_on(edc: NaiveDate, date: NaiveDate) -> i64 {
    TERM_DAYS - diff_days(date, edc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("ngày hợp lệ")
    }

    #[test]
    fn crl_range_is_inclusive() {
        assert_eq!(ga_from_crl(4.0), None);
        assert_eq!(ga_from_crl(4.99), None);
        assert_eq!(ga_from_crl(5.0), Some(47));
        assert_eq!(ga_from_crl(45.6), Some(88));
        assert_eq!(ga_from_crl(84.0), Some(126));
        assert_eq!(ga_from_crl(85.0), None);
        assert_eq!(ga_from_crl(f64::NAN), None);
    }

    #[test]
    fn biometry_uses_only_plausible_parameters() {
        let single = Biometry {
            bpd: Some(50.0),
            ..Biometry::default()
        };
        assert_eq!(ga_from_biometry(&single, 44), Some(127));

        // BPD 127.44 + FL 149.51, trung bình 138.475
        let pair = Biometry {
            bpd: Some(50.0),
            fl: Some(35.0),
            hc: Some(80.0),
            ac: None,
        };
        assert_eq!(ga_from_biometry(&pair, 44), Some(138));

        let all = Biometry {
            bpd: Some(48.0),
            hc: Some(180.0),
            ac: Some(150.0),
            fl: Some(32.0),
        };
        assert_eq!(ga_from_biometry(&all, 44), Some(165));
    }

    #[test]
    fn biometry_below_floors_yields_nothing() {
        let floors = Biometry {
            bpd: Some(20.0),
            hc: Some(80.0),
            ac: Some(60.0),
            fl: Some(15.0),
        };
        assert_eq!(ga_from_biometry(&floors, 44), None);
        assert_eq!(ga_from_biometry(&Biometry::default(), 44), None);
        assert!(Biometry::default().is_empty());
    }

    #[test]
    fn implausible_biometry_yields_nothing() {
        let huge = Biometry {
            bpd: Some(1e9),
            ..Biometry::default()
        };
        assert_eq!(ga_from_biometry(&huge, 44), None);

        let infinite = Biometry {
            fl: Some(f64::INFINITY),
            ..Biometry::default()
        };
        assert_eq!(ga_from_biometry(&infinite, 44), None);

        // BPD 180 mm -> 292.02 ngày: nằm trong 44 tuần nhưng vượt 40 tuần.
        let large = Biometry {
            bpd: Some(180.0),
            ..Biometry::default()
        };
        assert_eq!(ga_from_biometry(&large, 44), Some(292));
        assert_eq!(ga_from_biometry(&large, 40), None);
    }

    #[test]
    fn reported_ga_bounds() {
        assert_eq!(ga_from_report(10, 0, 44), Some(70));
        assert_eq!(ga_from_report(44, 6, 44), Some(314));
        assert_eq!(ga_from_report(45, 0, 44), None);
        assert_eq!(ga_from_report(10, 7, 44), None);
        assert_eq!(ga_from_report(-1, 0, 44), None);
    }

    #[test]
    fn edc_from_reference_date() {
        assert_eq!(edc_from_lmp(date(2024, 1, 1)), Ok(date(2024, 10, 7)));
        assert_eq!(edc_from_ga(70, date(2024, 5, 10)), Ok(date(2024, 12, 6)));
        assert!(edc_from_ga(i64::MIN, date(2024, 5, 10)).is_err());
        assert!(edc_from_ga(-1_000_000_000, date(2024, 5, 10)).is_err());
        assert_eq!(ga_on(date(2024, 10, 7), date(2024, 4, 10)), 100);
        assert_eq!(ga_on(date(2024, 10, 7), date(2024, 10, 10)), 283);
    }

    #[test]
    fn breakdown_handles_negative_totals() {
        assert_eq!(
            GaBreakdown::from_days(100),
            GaBreakdown { weeks: 14, days: 2 }
        );
        assert_eq!(
            GaBreakdown::from_days(-3),
            GaBreakdown { weeks: -1, days: 4 }
        );
    }

    proptest! {
        #[test]
        fn naegele_is_exactly_280_days(offset in 0i64..73_000) {
            let lmp = date(1900, 1, 1) + chrono::Duration::days(offset);
            prop_assert_eq!(diff_days(lmp, edc_from_lmp(lmp).unwrap()), TERM_DAYS);
        }

        #[test]
        fn edc_from_ga_inverts_ga_on(ga in 0i64..320, offset in 0i64..40_000) {
            let reference = date(1950, 1, 1) + chrono::Duration::days(offset);
            prop_assert_eq!(ga_on(edc_from_ga(ga, reference).unwrap(), reference), ga);
        }

        #[test]
        fn breakdown_recomposes(total in -400i64..400) {
            let split = GaBreakdown::from_days(total);
            prop_assert!((0..7).contains(&split.days));
            prop_assert_eq!(split.total_days(), total);
        }
    }
}
