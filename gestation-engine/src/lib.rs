//! Pregnancy-state derivation: a `PregnancyRecord` and a calendar day in,
//! a `PregnancyView` out. Nothing derived here is ever persisted.

use chrono::NaiveDate;
use gestation_core::{
    add_days, diff_days, to_jalali, CarePlan, ClinicalEvent, DatingConfig, GaBreakdown,
    GestationPhase, Milestone, MilestoneMarker, PregnancyRecord, PregnancyView, TimelineProgress,
    Trimester, Visit, VisitTask, TERM_DAYS,
};

pub mod catalog;
pub mod i18n;
pub mod intake;
pub mod store;

pub use catalog::Catalog;
pub use i18n::{translate, translate_key};
pub use intake::{calculate, DatingForm, IntakeError, IntakeOutcome, UltrasoundEntry};
pub use store::{load_case_list_str, load_case_list_value, CaseList};

const STANDARD_TASKS: &[VisitTask] = &[
    VisitTask::BloodPressure,
    VisitTask::Weight,
    VisitTask::Urinalysis,
    VisitTask::FetalHeartRate,
    VisitTask::FundalHeight,
];

const LATE_TASKS: &[VisitTask] = &[
    VisitTask::BloodPressure,
    VisitTask::Weight,
    VisitTask::Urinalysis,
    VisitTask::FetalHeartRate,
    VisitTask::FundalHeight,
    VisitTask::FetalMovement,
];

const FINAL_TASKS: &[VisitTask] = &[
    VisitTask::BloodPressure,
    VisitTask::Weight,
    VisitTask::Urinalysis,
    VisitTask::FetalHeartRate,
    VisitTask::FundalHeight,
    VisitTask::FetalMovement,
    VisitTask::CervicalExam,
];

/// Derive the view for `today` using the standard clinical catalog.
pub fn derive_view(
    record: &PregnancyRecord,
    today: NaiveDate,
    config: &DatingConfig,
) -> PregnancyView {
    derive_view_with(record, today, config, &Catalog::standard())
}

/// Derive the view for `today` against an explicit catalog.
pub fn derive_view_with(
    record: &PregnancyRecord,
    today: NaiveDate,
    config: &DatingConfig,
    catalog: &Catalog<'_>,
) -> PregnancyView {
    let days_remaining = diff_days(today, record.edc);
    let ga_days = TERM_DAYS - days_remaining;
    let ga = GaBreakdown::from_days(ga_days);
    let trimester = Trimester::from_ga_weeks(ga.weeks);

    let phase = if ga_days < 0 {
        GestationPhase::BeforeLmp
    } else if days_remaining < 0 {
        GestationPhase::Overdue
    } else {
        GestationPhase::Pregnant
    };

    PregnancyView {
        record_id: record.id.clone(),
        today,
        today_jalali: to_jalali(today).ok(),
        edc: record.edc,
        edc_jalali: to_jalali(record.edc).ok(),
        dating_method: record.dating_method,
        reconciliation_note: record.reconciliation_note,
        ga_days,
        ga_weeks: ga.weeks,
        ga_remainder_days: ga.days,
        days_remaining,
        phase,
        trimester,
        care_plan: build_care_plan(record, ga.weeks, catalog.events, config),
        visit_schedule: visit_schedule(record.edc, ga.weeks),
        red_flags: catalog.red_flags(trimester).to_vec(),
        days_passed_from_lmp: record.lmp.map(|_| ga_days),
        progress: timeline_progress(ga.weeks, config),
    }
}

fn build_care_plan(
    record: &PregnancyRecord,
    ga_weeks: i64,
    events: &[ClinicalEvent],
    config: &DatingConfig,
) -> CarePlan {
    let mut plan = CarePlan::default();

    for event in events {
        if (event.start_week..=event.end_week).contains(&ga_weeks) {
            plan.upcoming.push(*event);
        } else if ga_weeks > event.end_week {
            if is_missed(record, event, ga_weeks, config) {
                plan.missed.push(*event);
            } else {
                plan.completed.push(*event);
            }
        }
    }

    plan
}

fn is_missed(
    record: &PregnancyRecord,
    event: &ClinicalEvent,
    ga_weeks: i64,
    config: &DatingConfig,
) -> bool {
    event.is_critical
        && ga_weeks > event.end_week + config.missed_grace_weeks
        && ga_weeks < event.end_week + config.missed_visible_weeks
        && !record.is_event_completed(event.id)
}

/// Fixed-cadence schedule anchored on the LMP implied by the EDC.
///
/// Visits that fall outside the representable calendar are left out.
fn visit_schedule(edc: NaiveDate, ga_weeks: i64) -> Vec<Visit> {
    let Ok(virtual_lmp) = add_days(edc, -TERM_DAYS) else {
        log::warn!("EDC {edc} is too close to the calendar limit for a visit schedule");
        return Vec::new();
    };

    let cadence = (8..=28)
        .step_by(4)
        .map(|week| (week, STANDARD_TASKS))
        .chain((30..=36).step_by(2).map(|week| (week, LATE_TASKS)))
        .chain((37..=41).map(|week| (week, FINAL_TASKS)));

    cadence
        .filter_map(|(week, tasks): (i64, &[VisitTask])| {
            let date = add_days(virtual_lmp, week * 7).ok()?;
            Some(Visit {
                week,
                date,
                jalali_date: to_jalali(date).ok(),
                tasks: tasks.to_vec(),
                is_past: week < ga_weeks,
            })
        })
        .collect()
}

fn timeline_progress(ga_weeks: i64, config: &DatingConfig) -> TimelineProgress {
    let total_weeks = config.timeline_total_weeks.max(1) as f64;
    let percent = (ga_weeks as f64 / total_weeks * 100.0).clamp(0.0, 100.0);

    let milestones = Milestone::ALL
        .iter()
        .map(|milestone| MilestoneMarker {
            milestone: *milestone,
            week: milestone.week(),
            reached: ga_weeks >= milestone.week(),
        })
        .collect();

    TimelineProgress {
        percent,
        milestones,
    }
}
