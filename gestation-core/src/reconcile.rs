//! Đối chiếu EDC theo LMP và theo siêu âm (ngưỡng ACOG).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar::days_between;
use crate::dating::{edc_from_ga, edc_from_lmp};
use crate::{DatingError, DatingMethod, MessageKey, UltrasoundSnapshot};

/// Kết luận đối chiếu, ánh xạ tới khóa dịch ở tầng trình bày.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ReconcileMessage {
    #[serde(rename = "reconcile_useLMP")]
    UseLmp,
    #[serde(rename = "reconcile_t1_early")]
    T1Early,
    #[serde(rename = "reconcile_t1_late")]
    T1Late,
    #[serde(rename = "reconcile_t2_early")]
    T2Early,
    #[serde(rename = "reconcile_t2_mid")]
    T2Mid,
    #[serde(rename = "reconcile_t2_late")]
    T2Late,
    #[serde(rename = "reconcile_t3")]
    T3,
}

impl MessageKey for ReconcileMessage {
    fn key(&self) -> &'static str {
        match self {
            ReconcileMessage::UseLmp => "reconcile_useLMP",
            ReconcileMessage::T1Early => "reconcile_t1_early",
            ReconcileMessage::T1Late => "reconcile_t1_late",
            ReconcileMessage::T2Early => "reconcile_t2_early",
            ReconcileMessage::T2Mid => "reconcile_t2_mid",
            ReconcileMessage::T2Late => "reconcile_t2_late",
            ReconcileMessage::T3 => "reconcile_t3",
        }
    }
}

/// Ngưỡng chênh lệch theo tuổi thai (tính từ LMP) vào ngày siêu âm.
struct Band {
    min_ga_days: i64,
    max_discrepancy_days: i64,
    message: ReconcileMessage,
}

/// Xếp từ muộn tới sớm; band đầu tiên có `min_ga_days <= ga` được chọn.
const BANDS: &[Band] = &[
    Band {
        min_ga_days: 28 * 7,
        max_discrepancy_days: 21,
        message: ReconcileMessage::T3,
    },
    Band {
        min_ga_days: 22 * 7,
        max_discrepancy_days: 14,
        message: ReconcileMessage::T2Late,
    },
    Band {
        min_ga_days: 16 * 7,
        max_discrepancy_days: 10,
        message: ReconcileMessage::T2Mid,
    },
    Band {
        min_ga_days: 14 * 7,
        max_discrepancy_days: 7,
        message: ReconcileMessage::T2Early,
    },
    Band {
        min_ga_days: 9 * 7,
        max_discrepancy_days: 7,
        message: ReconcileMessage::T1Late,
    },
    Band {
        min_ga_days: 0,
        max_discrepancy_days: 5,
        message: ReconcileMessage::T1Early,
    },
];

fn band_for(ga_days: i64) -> &'static Band {
    BANDS
        .iter()
        .find(|band| ga_days >= band.min_ga_days)
        .unwrap_or(&BANDS[BANDS.len() - 1])
}

/// Kết quả đối chiếu đầy đủ khi có cả LMP và siêu âm.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Reconciliation {
    pub final_edc: NaiveDate,
    pub method: DatingMethod,
    pub message: ReconcileMessage,
    pub edc_by_lmp: NaiveDate,
    pub edc_by_ultrasound: NaiveDate,
    pub ga_by_lmp_on_scan_date: i64,
    pub discrepancy_days: i64,
}

/// Quyết định định tuổi dùng khi tạo hồ sơ.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DatingDecision {
    pub edc: NaiveDate,
    pub method: DatingMethod,
    pub message: Option<ReconcileMessage>,
    pub reconciliation: Option<Reconciliation>,
}

/// Chọn EDC cuối cùng giữa LMP và siêu âm.
///
/// Band được chọn theo tuổi thai mà LMP cho ra vào ngày siêu âm, xét từ band muộn
/// nhất trở xuống; EDC siêu âm thay thế EDC theo LMP khi chênh lệch vượt quá
/// (strictly) ngưỡng của band.
pub fn reconcile_dates(
    lmp: NaiveDate,
    ultrasound: &UltrasoundSnapshot,
) -> Result<Reconciliation, DatingError> {
    if ultrasound.scan_date < lmp {
        log::warn!(
            "Ngày siêu âm {} trước LMP {}, vẫn dùng khoảng cách tuyệt đối",
            ultrasound.scan_date,
            lmp
        );
    }

    let ga_us = ultrasound.ga_on_scan_date_days;
    let edc_by_lmp = edc_from_lmp(lmp)?;
    let edc_by_ultrasound = edc_from_ga(ga_us, ultrasound.scan_date)?;

    let ga_by_lmp_on_scan_date = days_between(lmp, ultrasound.scan_date);
    let discrepancy_days = (ga_us - ga_by_lmp_on_scan_date).abs();

    let band = band_for(ga_by_lmp_on_scan_date);
    let (final_edc, method, message) = if discrepancy_days > band.max_discrepancy_days {
        (edc_by_ultrasound, DatingMethod::Ultrasound, band.message)
    } else {
        (edc_by_lmp, DatingMethod::Lmp, ReconcileMessage::UseLmp)
    };

    log::debug!(
        "Đối chiếu: GA theo LMP {ga_by_lmp_on_scan_date}, GA siêu âm {ga_us}, chênh {discrepancy_days}, chọn {method:?}"
    );

    Ok(Reconciliation {
        final_edc,
        method,
        message,
        edc_by_lmp,
        edc_by_ultrasound,
        ga_by_lmp_on_scan_date,
        discrepancy_days,
    })
}

/// Quyết định EDC từ các nguồn đang có; lỗi khi thiếu cả hai.
pub fn establish_dating(
    lmp: Option<NaiveDate>,
    ultrasound: Option<&UltrasoundSnapshot>,
) -> Result<DatingDecision, DatingError> {
    match (lmp, ultrasound) {
        (Some(lmp), Some(ultrasound)) => {
            let reconciliation = reconcile_dates(lmp, ultrasound)?;
            Ok(DatingDecision {
                edc: reconciliation.final_edc,
                method: reconciliation.method,
                message: Some(reconciliation.message),
                reconciliation: Some(reconciliation),
            })
        }
        (Some(lmp), None) => Ok(DatingDecision {
            edc: edc_from_lmp(lmp)?,
            method: DatingMethod::Lmp,
            message: None,
            reconciliation: None,
        }),
        (None, Some(ultrasound)) => Ok(DatingDecision {
            edc: edc_from_ga(ultrasound.ga_on_scan_date_days, ultrasound.scan_date)?,
            method: DatingMethod::Ultrasound,
            message: None,
            reconciliation: None,
        }),
        (None, None) => Err(DatingError::MissingDatingSource),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::add_days;
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("ngày hợp lệ")
    }

    /// Siêu âm có GA `ga_us`, chụp vào ngày mà GA theo LMP là `ga_lmp`.
    fn scan(lmp: NaiveDate, ga_lmp: i64, ga_us: i64) -> UltrasoundSnapshot {
        UltrasoundSnapshot::reported(add_days(lmp, ga_lmp).unwrap(), ga_us)
    }

    fn reconcile(lmp: NaiveDate, ga_lmp: i64, ga_us: i64) -> Reconciliation {
        reconcile_dates(lmp, &scan(lmp, ga_lmp, ga_us)).unwrap()
    }

    #[test]
    fn third_trimester_needs_more_than_three_weeks() {
        let lmp = date(2024, 1, 1);

        let redated = reconcile(lmp, 196, 174);
        assert_eq!(redated.ga_by_lmp_on_scan_date, 196);
        assert_eq!(redated.discrepancy_days, 22);
        assert_eq!(redated.method, DatingMethod::Ultrasound);
        assert_eq!(redated.message, ReconcileMessage::T3);
        assert_eq!(redated.final_edc, redated.edc_by_ultrasound);

        let kept = reconcile(lmp, 196, 175);
        assert_eq!(kept.discrepancy_days, 21);
        assert_eq!(kept.method, DatingMethod::Lmp);
        assert_eq!(kept.message, ReconcileMessage::UseLmp);
        assert_eq!(kept.final_edc, date(2024, 10, 7));
    }

    #[test]
    fn first_trimester_band_edges() {
        let lmp = date(2024, 1, 1);

        let early = reconcile(lmp, 62, 68);
        assert_eq!(early.discrepancy_days, 6);
        assert_eq!(early.method, DatingMethod::Ultrasound);
        assert_eq!(early.message, ReconcileMessage::T1Early);
        let expected = add_days(add_days(lmp, 62).unwrap(), 280 - 68).unwrap();
        assert_eq!(early.final_edc, expected);

        let late = reconcile(lmp, 63, 69);
        assert_eq!(late.discrepancy_days, 6);
        assert_eq!(late.method, DatingMethod::Lmp);
        assert_eq!(late.message, ReconcileMessage::UseLmp);
        assert_eq!(late.final_edc, date(2024, 10, 7));
    }

    #[test]
    fn band_follows_lmp_ga_on_scan_date() {
        let lmp = date(2024, 1, 1);

        // LMP cho 200 ngày (band T3, ngưỡng 21): chênh 15 ngày vẫn giữ LMP.
        let kept = reconcile(lmp, 200, 185);
        assert_eq!(kept.discrepancy_days, 15);
        assert_eq!(kept.method, DatingMethod::Lmp);

        // LMP cho 185 ngày (band 22-27 tuần, ngưỡng 14): cùng độ chênh thì đổi sang siêu âm.
        let redated = reconcile(lmp, 185, 200);
        assert_eq!(redated.discrepancy_days, 15);
        assert_eq!(redated.method, DatingMethod::Ultrasound);
        assert_eq!(redated.message, ReconcileMessage::T2Late);
    }

    #[test]
    fn each_band_redates_just_past_its_threshold() {
        let lmp = date(2024, 3, 1);
        let cases = [
            (196, 21, ReconcileMessage::T3),
            (154, 14, ReconcileMessage::T2Late),
            (195, 14, ReconcileMessage::T2Late),
            (112, 10, ReconcileMessage::T2Mid),
            (98, 7, ReconcileMessage::T2Early),
            (63, 7, ReconcileMessage::T1Late),
            (0, 5, ReconcileMessage::T1Early),
        ];
        for (ga_lmp, threshold, expected) in cases {
            let redated = reconcile(lmp, ga_lmp, ga_lmp + threshold + 1);
            assert_eq!(redated.message, expected, "GA theo LMP {ga_lmp}");
            assert_eq!(redated.method, DatingMethod::Ultrasound);

            let kept = reconcile(lmp, ga_lmp, ga_lmp + threshold);
            assert_eq!(kept.message, ReconcileMessage::UseLmp, "GA theo LMP {ga_lmp}");
            assert_eq!(kept.method, DatingMethod::Lmp);
        }
    }

    #[test]
    fn scan_before_lmp_uses_absolute_distance() {
        let lmp = date(2024, 1, 11);
        let result =
            reconcile_dates(lmp, &UltrasoundSnapshot::reported(date(2024, 1, 1), 70)).unwrap();
        assert_eq!(result.ga_by_lmp_on_scan_date, 10);
        assert_eq!(result.discrepancy_days, 60);
        assert_eq!(result.method, DatingMethod::Ultrasound);
        assert_eq!(result.message, ReconcileMessage::T1Early);
    }

    #[test]
    fn unrepresentable_ultrasound_edc_is_an_error() {
        let lmp = date(2024, 1, 1);
        let absurd = UltrasoundSnapshot::reported(date(2024, 3, 1), i64::MIN);
        assert!(matches!(
            reconcile_dates(lmp, &absurd),
            Err(DatingError::DayOffsetOutOfRange { .. })
        ));
        assert!(establish_dating(None, Some(&absurd)).is_err());
    }

    #[test]
    fn single_source_decisions() {
        let lmp_only = establish_dating(Some(date(2024, 1, 1)), None).unwrap();
        assert_eq!(lmp_only.edc, date(2024, 10, 7));
        assert_eq!(lmp_only.method, DatingMethod::Lmp);
        assert_eq!(lmp_only.message, None);

        let us = UltrasoundSnapshot::reported(date(2024, 5, 10), 70);
        let us_only = establish_dating(None, Some(&us)).unwrap();
        assert_eq!(us_only.edc, date(2024, 12, 6));
        assert_eq!(us_only.method, DatingMethod::Ultrasound);
        assert_eq!(us_only.reconciliation, None);

        assert_eq!(
            establish_dating(None, None),
            Err(DatingError::MissingDatingSource)
        );
    }

    #[test]
    fn both_sources_carry_the_reconciliation() {
        let lmp = date(2024, 1, 1);
        let us = scan(lmp, 70, 70);
        let decision = establish_dating(Some(lmp), Some(&us)).unwrap();
        assert_eq!(decision.message, Some(ReconcileMessage::UseLmp));
        let reconciliation = decision.reconciliation.expect("có đối chiếu");
        assert_eq!(reconciliation.discrepancy_days, 0);
        assert_eq!(reconciliation.edc_by_lmp, reconciliation.edc_by_ultrasound);
    }

    #[test]
    fn message_keys_match_serde_names() {
        for message in [
            ReconcileMessage::UseLmp,
            ReconcileMessage::T1Early,
            ReconcileMessage::T2Mid,
            ReconcileMessage::T3,
        ] {
            let json = serde_json::to_string(&message).unwrap();
            assert_eq!(json, format!("\"{}\"", message.key()));
        }
    }
}
