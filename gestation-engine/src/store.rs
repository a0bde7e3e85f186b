//! Case-list storage boundary.
//!
//! Loading is tolerant: a malformed case is discarded, a malformed optional
//! field or list entry is dropped, and every drop is logged. Saving always
//! writes the canonical camelCase layout with `YYYY-MM-DD` dates.

use chrono::{DateTime, NaiveDate};
use gestation_core::{
    DatingError, DatingMethod, FetalBiometryEntry, PregnancyRecord, ReconcileMessage,
    UltrasoundSnapshot, Vital,
};
use serde::Serialize;
use serde_json::Value;

/// Saved cases plus the id of the case currently open.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CaseList {
    pub cases: Vec<PregnancyRecord>,
    pub active_id: Option<String>,
}

impl CaseList {
    pub fn get(&self, id: &str) -> Option<&PregnancyRecord> {
        self.cases.iter().find(|record| record.id == id)
    }

    pub fn active(&self) -> Option<&PregnancyRecord> {
        self.active_id.as_deref().and_then(|id| self.get(id))
    }

    /// Replaces the case with the same id, or appends it.
    pub fn upsert(&self, record: PregnancyRecord) -> Self {
        let mut next = self.clone();
        match next.cases.iter_mut().find(|existing| existing.id == record.id) {
            Some(existing) => *existing = record,
            None => next.cases.push(record),
        }
        next
    }

    /// Removes a case; clears the active id when it pointed at that case.
    pub fn remove(&self, id: &str) -> Self {
        let mut next = self.clone();
        next.cases.retain(|record| record.id != id);
        if next.active_id.as_deref() == Some(id) {
            next.active_id = None;
        }
        next
    }

    /// Sets the active case; an unknown id leaves the list unchanged.
    pub fn with_active(&self, id: &str) -> Self {
        let mut next = self.clone();
        if next.get(id).is_some() {
            next.active_id = Some(id.to_string());
        } else {
            log::warn!("ignoring unknown active case id {id}");
        }
        next
    }

    pub fn to_json_string(&self) -> Result<String, DatingError> {
        serde_json::to_string_pretty(self).map_err(|err| DatingError::Parse(err.to_string()))
    }
}

/// Load a case list from a JSON string.
pub fn load_case_list_str(json: &str) -> Result<CaseList, DatingError> {
    let value: Value =
        serde_json::from_str(json).map_err(|err| DatingError::Parse(err.to_string()))?;
    load_case_list_value(&value)
}

/// Load a case list from a `serde_json::Value`.
pub fn load_case_list_value(document: &Value) -> Result<CaseList, DatingError> {
    let entries = document
        .get("cases")
        .and_then(Value::as_array)
        .ok_or_else(|| DatingError::Parse("expected a `cases` array".to_string()))?;

    let mut cases: Vec<PregnancyRecord> = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        match parse_record(entry) {
            Ok(record) if cases.iter().any(|existing| existing.id == record.id) => {
                log::warn!("discarding case #{index}: duplicate id {}", record.id);
            }
            Ok(record) => cases.push(record),
            Err(reason) => log::warn!("discarding case #{index}: {reason}"),
        }
    }

    let active_id = match document.get("activeId").and_then(Value::as_str) {
        Some(id) if cases.iter().any(|record| record.id == id) => Some(id.to_string()),
        Some(id) => {
            log::warn!("clearing active id {id}: no such case");
            None
        }
        None => None,
    };

    Ok(CaseList { cases, active_id })
}

fn parse_record(entry: &Value) -> Result<PregnancyRecord, String> {
    let id = entry
        .get("id")
        .and_then(Value::as_str)
        .ok_or("missing string `id`")?
        .to_string();
    let name = entry
        .get("name")
        .and_then(Value::as_str)
        .ok_or_else(|| format!("case {id}: missing string `name`"))?
        .to_string();
    let edc = entry
        .get("edc")
        .and_then(Value::as_str)
        .and_then(parse_date)
        .ok_or_else(|| format!("case {id}: missing or unparseable `edc`"))?;

    let lmp = optional_field(entry, &id, "lmp", |value| value.as_str().and_then(parse_date));
    let ultrasound = optional_field(entry, &id, "ultrasound", parse_ultrasound);
    let reconciliation_note = optional_field(entry, &id, "reconciliationNote", |value| {
        serde_json::from_value::<ReconcileMessage>(value.clone()).ok()
    });

    let dating_method = optional_field(entry, &id, "datingMethod", |value| {
        serde_json::from_value::<DatingMethod>(value.clone()).ok()
    })
    .unwrap_or(if lmp.is_some() {
        DatingMethod::Lmp
    } else {
        DatingMethod::Ultrasound
    });

    Ok(PregnancyRecord {
        ga_days: entry.get("gaDays").and_then(whole_number).unwrap_or(0),
        vitals: collect_entries(entry, &id, "vitals", parse_vital),
        fetal_biometry: collect_entries(entry, &id, "fetalBiometry", parse_fetal_biometry),
        completed_events: collect_entries(entry, &id, "completedEvents", |value| {
            value.as_str().map(str::to_string)
        }),
        id,
        name,
        lmp,
        ultrasound,
        edc,
        dating_method,
        reconciliation_note,
    })
}

/// Parses `field` when present and non-null; a value that fails to parse is dropped.
fn optional_field<T>(
    entry: &Value,
    id: &str,
    field: &str,
    parse: impl Fn(&Value) -> Option<T>,
) -> Option<T> {
    let value = entry.get(field).filter(|value| !value.is_null())?;
    let parsed = parse(value);
    if parsed.is_none() {
        log::warn!("case {id}: dropping unparseable `{field}`");
    }
    parsed
}

fn collect_entries<T>(
    entry: &Value,
    id: &str,
    field: &str,
    parse: impl Fn(&Value) -> Option<T>,
) -> Vec<T> {
    let Some(items) = entry.get(field).and_then(Value::as_array) else {
        return Vec::new();
    };

    items
        .iter()
        .enumerate()
        .filter_map(|(index, item)| {
            let parsed = parse(item);
            if parsed.is_none() {
                log::warn!("case {id}: dropping malformed `{field}` entry #{index}");
            }
            parsed
        })
        .collect()
}

fn parse_ultrasound(value: &Value) -> Option<UltrasoundSnapshot> {
    let scan_date = value
        .get("scanDate")
        .and_then(Value::as_str)
        .and_then(parse_date)?;
    let ga_on_scan_date_days = value.get("gaOnScanDateDays").and_then(whole_number)?;

    Some(UltrasoundSnapshot {
        scan_date,
        ga_on_scan_date_days,
        crl: measurement(value, "crl"),
        bpd: measurement(value, "bpd"),
        hc: measurement(value, "hc"),
        ac: measurement(value, "ac"),
        fl: measurement(value, "fl"),
    })
}

fn parse_vital(value: &Value) -> Option<Vital> {
    let date = value
        .get("date")
        .and_then(Value::as_str)
        .and_then(parse_date)?;

    Some(Vital {
        date,
        weight_kg: measurement(value, "weightKg").or_else(|| measurement(value, "weight")),
        bp_systolic: pressure(value, "bpSystolic"),
        bp_diastolic: pressure(value, "bpDiastolic"),
    })
}

fn parse_fetal_biometry(value: &Value) -> Option<FetalBiometryEntry> {
    let date = value
        .get("date")
        .and_then(Value::as_str)
        .and_then(parse_date)?;
    let ga_weeks = value
        .get("gaWeeks")
        .and_then(whole_number)
        .and_then(|weeks| u32::try_from(weeks).ok())?;

    Some(FetalBiometryEntry {
        date,
        ga_weeks,
        bpd: measurement(value, "bpd"),
        hc: measurement(value, "hc"),
        ac: measurement(value, "ac"),
        fl: measurement(value, "fl"),
    })
}

fn measurement(value: &Value, field: &str) -> Option<f64> {
    value
        .get(field)
        .and_then(Value::as_f64)
        .filter(|number| number.is_finite())
}

fn pressure(value: &Value, field: &str) -> Option<u32> {
    value
        .get(field)
        .and_then(whole_number)
        .and_then(|number| u32::try_from(number).ok())
}

/// Integer, or a float with no fractional part (as written by JavaScript).
fn whole_number(value: &Value) -> Option<i64> {
    value.as_i64().or_else(|| {
        value
            .as_f64()
            .filter(|number| number.is_finite() && number.fract() == 0.0)
            .map(|number| number as i64)
    })
}

/// `YYYY-MM-DD`, or an RFC 3339 timestamp reduced to its date in its own offset.
fn parse_date(text: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(text, "%Y-%m-%d").ok().or_else(|| {
        DateTime::parse_from_rfc3339(text)
            .map(|instant| instant.date_naive())
            .ok()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn rfc3339_dates_keep_their_own_offset() {
        assert_eq!(
            parse_date("2024-03-19T22:30:00-05:00"),
            NaiveDate::from_ymd_opt(2024, 3, 19)
        );
        assert_eq!(
            parse_date("2024-03-20"),
            NaiveDate::from_ymd_opt(2024, 3, 20)
        );
        assert_eq!(parse_date("20/03/2024"), None);
    }

    #[test]
    fn javascript_numbers_are_accepted() {
        assert_eq!(whole_number(&json!(127)), Some(127));
        assert_eq!(whole_number(&json!(127.0)), Some(127));
        assert_eq!(whole_number(&json!(127.5)), None);
        assert_eq!(whole_number(&json!("127")), None);
    }

    #[test]
    fn missing_cases_array_is_an_error() {
        assert!(matches!(
            load_case_list_value(&json!({ "activeId": null })),
            Err(DatingError::Parse(_))
        ));
        assert!(load_case_list_str("not json").is_err());
    }

    #[test]
    fn dating_method_is_inferred() {
        let list = load_case_list_value(&json!({
            "cases": [
                { "id": "a", "name": "A", "edc": "2024-10-07", "lmp": "2024-01-01" },
                { "id": "b", "name": "B", "edc": "2024-12-06" }
            ]
        }))
        .unwrap();
        assert_eq!(list.cases[0].dating_method, DatingMethod::Lmp);
        assert_eq!(list.cases[1].dating_method, DatingMethod::Ultrasound);
        assert_eq!(list.active_id, None);
    }

    #[test]
    fn remove_clears_the_active_case() {
        let list = load_case_list_value(&json!({
            "cases": [{ "id": "a", "name": "A", "edc": "2024-10-07" }],
            "activeId": "a"
        }))
        .unwrap();
        assert_eq!(list.active().map(|record| record.name.as_str()), Some("A"));

        let emptied = list.remove("a");
        assert!(emptied.cases.is_empty());
        assert_eq!(emptied.active_id, None);
        assert_eq!(list.cases.len(), 1);
    }
}
