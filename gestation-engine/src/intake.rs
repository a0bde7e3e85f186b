//! Form-level dating calculation: raw Jalali inputs and measurements in,
//! a dating decision plus the LMP-vs-ultrasound comparison out.

use chrono::NaiveDate;
use gestation_core::{
    edc_from_ga, edc_from_lmp, establish_dating, format_gregorian, from_jalali, ga_from_biometry,
    ga_from_crl, ga_from_report, ga_on, to_jalali, Biometry, DatingConfig, DatingDecision,
    DatingError, JalaliDate, Locale, MessageKey, PregnancyRecord, UltrasoundSnapshot,
};
use serde::{Deserialize, Serialize};

use crate::i18n::translate;

/// Raw dating input as entered on the form.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DatingForm {
    #[serde(default)]
    pub patient_name: String,
    #[serde(default)]
    pub lmp: Option<JalaliDate>,
    #[serde(default)]
    pub scan_date: Option<JalaliDate>,
    #[serde(default)]
    pub ultrasound: UltrasoundEntry,
}

/// Ultrasound input mode. Only one mode is active at a time.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum UltrasoundEntry {
    #[default]
    None,
    /// Measurements in millimetres.
    Biometry {
        #[serde(default)]
        crl: Option<f64>,
        #[serde(default)]
        bpd: Option<f64>,
        #[serde(default)]
        hc: Option<f64>,
        #[serde(default)]
        ac: Option<f64>,
        #[serde(default)]
        fl: Option<f64>,
    },
    /// GA copied from a previous report.
    Report {
        #[serde(default)]
        weeks: Option<i64>,
        #[serde(default)]
        days: Option<i64>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IntakeError {
    #[error("invalid Jalali date: {0}")]
    InvalidDate(JalaliDate),
    #[error("reported gestational age {weeks}w{days}d is out of range")]
    InvalidGa { weeks: i64, days: i64 },
    #[error("at least an LMP or ultrasound data is required")]
    NoInput,
    #[error("ultrasound values need a valid scan date")]
    ScanDateMissing,
    #[error("the computed due date falls outside the supported calendar")]
    OutOfRange,
}

impl MessageKey for IntakeError {
    fn key(&self) -> &'static str {
        match self {
            IntakeError::InvalidDate(_) => "invalidDateError",
            IntakeError::InvalidGa { .. } => "invalidGAError",
            IntakeError::NoInput => "noInputError",
            IntakeError::ScanDateMissing => "ultrasoundDateMissing",
            IntakeError::OutOfRange => "invalidDateError",
        }
    }
}

/// Result of a successful form calculation, before a case is created.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IntakeOutcome {
    pub patient_name: String,
    pub lmp: Option<NaiveDate>,
    pub ultrasound: Option<UltrasoundSnapshot>,
    pub decision: DatingDecision,
    pub edc_by_lmp: Option<NaiveDate>,
    pub edc_by_ultrasound: Option<NaiveDate>,
    pub ga_on_scan_date: Option<i64>,
    /// GA today implied by the ultrasound alone; exceeds 280 once past that EDC.
    pub projected_ga_today: Option<i64>,
}

impl IntakeOutcome {
    /// Creates the case record. A blank patient name becomes
    /// `"<untitled case> - <today>"` in the requested locale.
    pub fn into_record(
        self,
        id: impl Into<String>,
        locale: Locale,
        today: NaiveDate,
    ) -> Result<PregnancyRecord, DatingError> {
        let name = match self.patient_name.trim() {
            "" => untitled_name(locale, today),
            trimmed => trimmed.to_string(),
        };
        PregnancyRecord::create(id, name, self.lmp, self.ultrasound, today)
    }
}

/// Runs the dating calculation for one form submission.
pub fn calculate(
    form: &DatingForm,
    today: NaiveDate,
    config: &DatingConfig,
) -> Result<IntakeOutcome, IntakeError> {
    let lmp = form
        .lmp
        .map(|date| from_jalali(date).map_err(|_| IntakeError::InvalidDate(date)))
        .transpose()?;
    let ultrasound = read_ultrasound(form, config)?;

    let decision = establish_dating(lmp, ultrasound.as_ref()).map_err(|err| match err {
        DatingError::MissingDatingSource => IntakeError::NoInput,
        _ => IntakeError::OutOfRange,
    })?;

    let edc_by_lmp = lmp
        .map(edc_from_lmp)
        .transpose()
        .map_err(|_| IntakeError::OutOfRange)?;
    let edc_by_ultrasound = ultrasound
        .as_ref()
        .map(|scan| edc_from_ga(scan.ga_on_scan_date_days, scan.scan_date))
        .transpose()
        .map_err(|_| IntakeError::OutOfRange)?;

    Ok(IntakeOutcome {
        patient_name: form.patient_name.trim().to_string(),
        lmp,
        ga_on_scan_date: ultrasound.as_ref().map(|scan| scan.ga_on_scan_date_days),
        ultrasound,
        decision,
        edc_by_lmp,
        edc_by_ultrasound,
        projected_ga_today: edc_by_ultrasound.map(|edc| ga_on(edc, today)),
    })
}

fn read_ultrasound(
    form: &DatingForm,
    config: &DatingConfig,
) -> Result<Option<UltrasoundSnapshot>, IntakeError> {
    match form.ultrasound {
        UltrasoundEntry::None => Ok(None),
        UltrasoundEntry::Biometry {
            crl,
            bpd,
            hc,
            ac,
            fl,
        } => {
            let biometry = Biometry { bpd, hc, ac, fl };
            if crl.is_none() && biometry.is_empty() {
                return Ok(None);
            }
            let scan_date = scan_date(form)?;

            let by_crl = crl.filter(|value| *value > 0.0).and_then(ga_from_crl);
            let ga = match by_crl {
                Some(ga) => {
                    log::debug!("GA {ga} from CRL");
                    Some(ga)
                }
                None => {
                    let ga = ga_from_biometry(&biometry, config.max_reported_ga_weeks);
                    log::debug!("GA {ga:?} from biometry");
                    ga
                }
            };

            Ok(ga.map(|ga| UltrasoundSnapshot::measured(scan_date, ga, crl, &biometry)))
        }
        UltrasoundEntry::Report { weeks, days } => {
            if weeks.is_none() && days.is_none() {
                return Ok(None);
            }
            let scan_date = scan_date(form)?;
            let weeks = weeks.unwrap_or(0);
            let days = days.unwrap_or(0);
            let ga = ga_from_report(weeks, days, config.max_reported_ga_weeks)
                .ok_or(IntakeError::InvalidGa { weeks, days })?;
            log::debug!("GA {ga} from report");
            Ok(Some(UltrasoundSnapshot::reported(scan_date, ga)))
        }
    }
}

fn scan_date(form: &DatingForm) -> Result<NaiveDate, IntakeError> {
    form.scan_date
        .and_then(|date| from_jalali(date).ok())
        .ok_or(IntakeError::ScanDateMissing)
}

fn untitled_name(locale: Locale, today: NaiveDate) -> String {
    let date = match locale {
        Locale::Fa => to_jalali(today)
            .map(|jalali| jalali.to_string())
            .unwrap_or_else(|_| today.to_string()),
        Locale::En => format_gregorian(today),
    };
    format!("{} - {date}", translate("untitledCase", locale))
}
