use chrono::{Duration, NaiveDate};
use gestation_core::{
    DatingConfig, DatingMethod, GestationPhase, JalaliDate, PregnancyRecord, ReconcileMessage,
    Trimester, UltrasoundSnapshot, TERM_DAYS,
};
use gestation_engine::{derive_view, translate_key};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("ngày hợp lệ")
}

fn lmp_record() -> PregnancyRecord {
    let lmp = date(2024, 1, 1);
    PregnancyRecord::create("case-1", "Sara", Some(lmp), None, lmp).expect("Không tạo được hồ sơ")
}

#[test]
fn second_trimester_snapshot() {
    let view = derive_view(&lmp_record(), date(2024, 4, 10), &DatingConfig::default());

    assert_eq!(view.edc, date(2024, 10, 7));
    assert_eq!(view.ga_days, 100);
    assert_eq!((view.ga_weeks, view.ga_remainder_days), (14, 2));
    assert_eq!(view.days_remaining, 180);
    assert_eq!(view.trimester, Trimester::Second);
    assert_eq!(view.phase, GestationPhase::Pregnant);
    assert_eq!(view.days_passed_from_lmp, Some(100));
    assert_eq!(view.today_jalali, Some(JalaliDate { year: 1403, month: 1, day: 22 }));
    assert_eq!(view.red_flags.len(), 3);
    assert_eq!(view.red_flags[0].title.en, "Preeclampsia Signs");
    assert_eq!(view.visit_schedule.len(), 15);

    let upcoming: Vec<&str> = view.care_plan.upcoming.iter().map(|e| e.id).collect();
    assert_eq!(upcoming, Vec::<&str>::new());
    // NT scan ended at week 13; week 14 is still inside the grace week.
    assert!(view.care_plan.missed.is_empty());
    assert!(view
        .care_plan
        .completed
        .iter()
        .any(|event| event.id == "nt-scan"));
}

#[test]
fn critical_event_missed_until_confirmed() {
    let record = lmp_record();
    // 2024-04-22: GA 112 days = 16w0d; NT scan window ended at 13.
    let today = date(2024, 4, 22);
    let view = derive_view(&record, today, &DatingConfig::default());
    let missed: Vec<&str> = view.care_plan.missed.iter().map(|e| e.id).collect();
    assert_eq!(missed, vec!["nt-scan"]);

    let confirmed = record.with_completed_event("nt-scan");
    let view = derive_view(&confirmed, today, &DatingConfig::default());
    assert!(view.care_plan.missed.is_empty());
}

#[test]
fn third_trimester_upcoming_events() {
    // 2024-09-09: GA 252 days = 36w0d.
    let view = derive_view(&lmp_record(), date(2024, 9, 9), &DatingConfig::default());
    assert_eq!(view.trimester, Trimester::Third);
    assert_eq!(view.red_flags.len(), 4);

    let upcoming: Vec<&str> = view.care_plan.upcoming.iter().map(|e| e.id).collect();
    assert_eq!(
        upcoming,
        vec![
            "iron-supplementation",
            "tdap-vaccine",
            "fetal-movement-monitoring",
            "gbs-screening",
            "biophysical-profile",
            "labor-signs-counseling",
        ]
    );
}

#[test]
fn ultrasound_only_record_has_no_days_passed() {
    let record = PregnancyRecord::create(
        "case-2",
        "Maryam",
        None,
        Some(UltrasoundSnapshot::reported(date(2024, 5, 10), 70)),
        date(2024, 5, 10),
    )
    .expect("Không tạo được hồ sơ");

    let view = derive_view(&record, date(2024, 5, 10), &DatingConfig::default());
    assert_eq!(view.edc, date(2024, 12, 6));
    assert_eq!(view.ga_days, 70);
    assert_eq!(view.dating_method, DatingMethod::Ultrasound);
    assert_eq!(view.days_passed_from_lmp, None);
}

#[test]
fn reconciled_record_derives_from_final_edc() {
    let lmp = date(2024, 1, 1);
    // Scan on 2024-03-11 (LMP GA 70) measuring 84 days: redated.
    let record = PregnancyRecord::create(
        "case-3",
        "Leila",
        Some(lmp),
        Some(UltrasoundSnapshot::reported(date(2024, 3, 11), 84)),
        date(2024, 3, 11),
    )
    .expect("Không tạo được hồ sơ");
    assert_eq!(record.reconciliation_note, Some(ReconcileMessage::T1Late));

    let view = derive_view(&record, date(2024, 3, 11), &DatingConfig::default());
    assert_eq!(view.edc, date(2024, 9, 23));
    assert_eq!(view.ga_days, 84);
    assert_eq!(view.days_passed_from_lmp, Some(84));
    assert_eq!(view.visit_schedule[0].date, date(2024, 3, 11));
    assert_eq!(
        translate_key(&view.dating_method, gestation_core::Locale::En),
        "Ultrasound Based"
    );
}

#[test]
fn view_serializes_with_camel_case_keys() {
    let view = derive_view(&lmp_record(), date(2024, 4, 10), &DatingConfig::default());
    let value = serde_json::to_value(&view).expect("serialize");
    assert_eq!(value["gaWeeks"], 14);
    assert_eq!(value["trimester"], 2);
    assert_eq!(value["phase"], "pregnant");
    assert_eq!(value["visitSchedule"][0]["tasks"][0], "taskBP");
    assert_eq!(value["visitSchedule"][0]["isPast"], true);
}

proptest! {
    #[test]
    fn ga_and_remaining_always_sum_to_term(offset in -60i64..400) {
        let record = lmp_record();
        let today = date(2024, 1, 1) + Duration::days(offset);
        let view = derive_view(&record, today, &DatingConfig::default());

        prop_assert_eq!(view.ga_days + view.days_remaining, TERM_DAYS);
        prop_assert_eq!(view.days_passed_from_lmp, Some(view.ga_days));
        prop_assert_eq!(view.ga_weeks * 7 + view.ga_remainder_days, view.ga_days);
        prop_assert!((0..7).contains(&view.ga_remainder_days));
        prop_assert!((0.0..=100.0).contains(&view.progress.percent));
    }

    #[test]
    fn care_plan_buckets_are_disjoint(offset in 0i64..320) {
        let today = date(2024, 1, 1) + Duration::days(offset);
        let view = derive_view(&lmp_record(), today, &DatingConfig::default());
        let plan = &view.care_plan;

        for event in &plan.missed {
            prop_assert!(event.is_critical);
            prop_assert!(!plan.completed.iter().any(|e| e.id == event.id));
            prop_assert!(!plan.upcoming.iter().any(|e| e.id == event.id));
        }
        for event in &plan.upcoming {
            prop_assert!(!plan.completed.iter().any(|e| e.id == event.id));
        }
    }
}
