use std::fs;

use chrono::NaiveDate;
use gestation_core::{DatingMethod, PregnancyRecord, ReconcileMessage};
use gestation_engine::{load_case_list_str, CaseList};
use pretty_assertions::assert_eq;

fn fixture_path(name: &str) -> String {
    format!("{}/tests/data/{name}", env!("CARGO_MANIFEST_DIR"))
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn load_fixture() -> CaseList {
    let _ = env_logger::builder().is_test(true).try_init();
    let json = fs::read_to_string(fixture_path("case_list.json")).expect("Không đọc được case list mẫu");
    load_case_list_str(&json).expect("Không tải được case list")
}

#[test]
fn malformed_cases_are_discarded() {
    let list = load_fixture();
    let ids: Vec<&str> = list.cases.iter().map(|record| record.id.as_str()).collect();
    assert_eq!(ids, vec!["case-lmp", "case-reconciled", "case-bad-optional"]);
    assert_eq!(list.active_id.as_deref(), Some("case-reconciled"));
}

#[test]
fn malformed_entries_are_dropped_individually() {
    let list = load_fixture();
    let record = list.get("case-lmp").expect("case-lmp");

    assert_eq!(record.name, "Sara");
    assert_eq!(record.ga_days, 100);
    assert_eq!(record.vitals.len(), 2);
    assert_eq!(record.vitals[0].weight_kg, Some(61.5));
    assert_eq!(record.vitals[1].bp_systolic, Some(118));
    assert_eq!(record.vitals[1].bp_diastolic, None);
    assert_eq!(record.fetal_biometry.len(), 1);
    assert_eq!(record.fetal_biometry[0].ga_weeks, 20);
    assert_eq!(record.completed_events, vec!["nt-scan".to_string()]);
}

#[test]
fn timestamps_are_reduced_to_dates() {
    let list = load_fixture();
    let record = list.active().expect("active case");

    assert_eq!(record.lmp, Some(date(2024, 1, 1)));
    let scan = record.ultrasound.as_ref().expect("ultrasound");
    assert_eq!(scan.scan_date, date(2024, 3, 11));
    assert_eq!(scan.ga_on_scan_date_days, 84);
    assert_eq!(scan.crl, Some(42.0));
    assert_eq!(scan.bpd, None);
    assert_eq!(record.edc, date(2024, 9, 23));
    assert_eq!(record.dating_method, DatingMethod::Ultrasound);
    assert_eq!(record.reconciliation_note, Some(ReconcileMessage::T1Late));
}

#[test]
fn stored_edc_is_never_recomputed() {
    let list = load_fixture();
    let record = list.get("case-reconciled").expect("case-reconciled");
    let recomputed = PregnancyRecord::create(
        "x",
        "x",
        record.lmp,
        record.ultrasound.clone(),
        date(2024, 3, 11),
    )
    .expect("record");
    assert_eq!(recomputed.edc, record.edc);

    let record = list.get("case-bad-optional").expect("case-bad-optional");
    assert_eq!(record.lmp, None);
    assert_eq!(record.ultrasound, None);
    assert_eq!(record.reconciliation_note, None);
    assert_eq!(record.dating_method, DatingMethod::Ultrasound);
    assert_eq!(record.edc, date(2024, 12, 6));
}

#[test]
fn saved_list_loads_back_unchanged() {
    let list = load_fixture();
    let json = list.to_json_string().expect("serialize");
    assert!(json.contains("\"activeId\": \"case-reconciled\""));
    assert!(json.contains("\"scanDate\": \"2024-03-11\""));

    let reloaded = load_case_list_str(&json).expect("reload");
    assert_eq!(reloaded, list);
}

#[test]
fn upsert_replaces_by_id() {
    let list = load_fixture();
    let renamed = list
        .get("case-lmp")
        .expect("case-lmp")
        .with_name("Sara R.");

    let updated = list.upsert(renamed);
    assert_eq!(updated.cases.len(), 3);
    assert_eq!(updated.get("case-lmp").map(|r| r.name.as_str()), Some("Sara R."));

    let fresh = PregnancyRecord::create(
        "case-new",
        "New",
        Some(date(2024, 2, 1)),
        None,
        date(2024, 4, 1),
    )
    .expect("record");
    let grown = updated.upsert(fresh).with_active("case-new");
    assert_eq!(grown.cases.len(), 4);
    assert_eq!(grown.active().map(|r| r.id.as_str()), Some("case-new"));

    let unchanged = grown.with_active("missing");
    assert_eq!(unchanged.active_id.as_deref(), Some("case-new"));
}

#[test]
fn unknown_active_id_is_cleared() {
    let list = load_case_list_str(
        r#"{ "cases": [{ "id": "a", "name": "A", "edc": "2024-10-07" }], "activeId": "b" }"#,
    )
    .expect("load");
    assert_eq!(list.active_id, None);
    assert!(list.active().is_none());
}
