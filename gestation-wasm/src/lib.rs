//! Bridge WASM <-> JavaScript cho engine định tuổi thai, trung lập framework.

use std::str::FromStr;

use chrono::NaiveDate;
use gestation_core::{DatingConfig, Locale, MessageKey, PregnancyRecord};
use gestation_engine::{DatingForm, IntakeError};
use serde::Deserialize;
use serde_wasm_bindgen::{from_value, to_value};
use wasm_bindgen::prelude::*;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct JsDatingConfig {
    #[serde(default)]
    missed_grace_weeks: Option<i64>,
    #[serde(default)]
    missed_visible_weeks: Option<i64>,
    #[serde(default)]
    timeline_total_weeks: Option<i64>,
    #[serde(default)]
    max_reported_ga_weeks: Option<i64>,
}

impl From<JsDatingConfig> for DatingConfig {
    fn from(cfg: JsDatingConfig) -> Self {
        let mut base = DatingConfig::default();
        if let Some(weeks) = cfg.missed_grace_weeks {
            base.missed_grace_weeks = weeks;
        }
        if let Some(weeks) = cfg.missed_visible_weeks {
            base.missed_visible_weeks = weeks;
        }
        if let Some(weeks) = cfg.timeline_total_weeks {
            base.timeline_total_weeks = weeks;
        }
        if let Some(weeks) = cfg.max_reported_ga_weeks {
            base.max_reported_ga_weeks = weeks;
        }
        base
    }
}

/// Tính EDC từ dữ liệu form; lỗi nhập liệu trả về khóa thông điệp để UI tự dịch.
#[wasm_bindgen]
pub fn calculate_dating(
    form: JsValue,
    today: &str,
    config: Option<JsValue>,
) -> Result<JsValue, JsValue> {
    install_panic_hook();

    let form: DatingForm = from_value(form)
        .map_err(|err| JsValue::from_str(&format!("Không đọc được form: {err}")))?;
    let today = parse_day(today).map_err(|err| JsValue::from_str(&err))?;
    let cfg = read_config(config)?;

    let outcome = gestation_engine::calculate(&form, today, &cfg)
        .map_err(|err| JsValue::from_str(intake_error_key(&err)))?;

    to_value(&outcome).map_err(|err| JsValue::from_str(&format!("Không serialize kết quả: {err}")))
}

/// Tính lại form và tạo hồ sơ mới với `id` do phía JS cấp.
#[wasm_bindgen]
pub fn create_case(
    form: JsValue,
    id: &str,
    locale: &str,
    today: &str,
    config: Option<JsValue>,
) -> Result<JsValue, JsValue> {
    install_panic_hook();

    let form: DatingForm = from_value(form)
        .map_err(|err| JsValue::from_str(&format!("Không đọc được form: {err}")))?;
    let today = parse_day(today).map_err(|err| JsValue::from_str(&err))?;
    let cfg = read_config(config)?;

    let record = gestation_engine::calculate(&form, today, &cfg)
        .map_err(|err| JsValue::from_str(intake_error_key(&err)))?
        .into_record(id, parse_locale(locale), today)
        .map_err(|err| JsValue::from_str(&err.to_string()))?;

    to_value(&record).map_err(|err| JsValue::from_str(&format!("Không serialize hồ sơ: {err}")))
}

#[wasm_bindgen]
pub fn derive_view(
    record: JsValue,
    today: &str,
    config: Option<JsValue>,
) -> Result<JsValue, JsValue> {
    install_panic_hook();

    let record: PregnancyRecord = from_value(record)
        .map_err(|err| JsValue::from_str(&format!("Không đọc được hồ sơ: {err}")))?;
    let today = parse_day(today).map_err(|err| JsValue::from_str(&err))?;
    let cfg = read_config(config)?;

    let view = gestation_engine::derive_view(&record, today, &cfg);

    to_value(&view).map_err(|err| JsValue::from_str(&format!("Không serialize view: {err}")))
}

/// Đọc danh sách hồ sơ đã lưu; bản ghi hỏng bị loại bỏ.
#[wasm_bindgen]
pub fn load_case_list(json: &str) -> Result<JsValue, JsValue> {
    install_panic_hook();

    let list = gestation_engine::load_case_list_str(json)
        .map_err(|err| JsValue::from_str(&err.to_string()))?;

    to_value(&list)
        .map_err(|err| JsValue::from_str(&format!("Không serialize danh sách hồ sơ: {err}")))
}

/// `YYYY-MM-DD` -> `{ year, month, day }` theo lịch Jalali.
#[wasm_bindgen]
pub fn to_jalali(iso: &str) -> Result<JsValue, JsValue> {
    let day = parse_day(iso).map_err(|err| JsValue::from_str(&err))?;
    let jalali = gestation_core::to_jalali(day).map_err(|err| JsValue::from_str(&err.to_string()))?;

    to_value(&jalali).map_err(|err| JsValue::from_str(&format!("Không serialize ngày: {err}")))
}

/// Ngày Jalali (số JS) -> `YYYY-MM-DD`.
#[wasm_bindgen]
pub fn from_jalali(year: f64, month: f64, day: f64) -> Result<String, JsValue> {
    jalali_to_iso(year, month, day).map_err(|err| JsValue::from_str(&err))
}

#[wasm_bindgen]
pub fn translate(key: &str, locale: &str) -> String {
    gestation_engine::translate(key, parse_locale(locale)).to_string()
}

fn install_panic_hook() {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();
}

fn read_config(config: Option<JsValue>) -> Result<DatingConfig, JsValue> {
    match config {
        Some(js_cfg) if !js_cfg.is_undefined() && !js_cfg.is_null() => {
            let cfg: JsDatingConfig = from_value(js_cfg)
                .map_err(|err| JsValue::from_str(&format!("Không đọc được config: {err}")))?;
            Ok(DatingConfig::from(cfg))
        }
        _ => Ok(DatingConfig::default()),
    }
}

fn parse_day(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|err| format!("Ngày không hợp lệ `{value}`: {err}"))
}

/// Ngôn ngữ lạ rơi về mặc định (Ba Tư).
fn parse_locale(value: &str) -> Locale {
    Locale::from_str(value).unwrap_or_default()
}

fn jalali_to_iso(year: f64, month: f64, day: f64) -> Result<String, String> {
    let jalali =
        gestation_core::jalali_from_components(year, month, day).map_err(|err| err.to_string())?;
    let date = gestation_core::from_jalali(jalali).map_err(|err| err.to_string())?;
    Ok(date.format("%Y-%m-%d").to_string())
}

fn intake_error_key(err: &IntakeError) -> &'static str {
    err.key()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_overrides_defaults() {
        let cfg = DatingConfig::from(JsDatingConfig {
            missed_grace_weeks: Some(2),
            missed_visible_weeks: None,
            timeline_total_weeks: Some(40),
            max_reported_ga_weeks: None,
        });
        assert_eq!(cfg.missed_grace_weeks, 2);
        assert_eq!(cfg.missed_visible_weeks, 4);
        assert_eq!(cfg.timeline_total_weeks, 40);
        assert_eq!(cfg.max_reported_ga_weeks, 44);
    }

    #[test]
    fn jalali_components_from_javascript() {
        assert_eq!(jalali_to_iso(1403.0, 1.0, 1.0).as_deref(), Ok("2024-03-20"));
        assert!(jalali_to_iso(1403.0, 1.5, 1.0).is_err());
        assert!(jalali_to_iso(f64::NAN, 1.0, 1.0).is_err());
        assert!(jalali_to_iso(1402.0, 12.0, 30.0).is_err());
    }

    #[test]
    fn day_and_locale_parsing() {
        assert_eq!(parse_day(" 2024-03-20 "), Ok(NaiveDate::from_ymd_opt(2024, 3, 20).unwrap()));
        assert!(parse_day("1403/01/01").is_err());
        assert_eq!(parse_locale("EN"), Locale::En);
        assert_eq!(parse_locale("de"), Locale::Fa);
    }

    #[test]
    fn intake_errors_map_to_message_keys() {
        assert_eq!(intake_error_key(&IntakeError::NoInput), "noInputError");
        assert_eq!(
            intake_error_key(&IntakeError::InvalidGa { weeks: 50, days: 0 }),
            "invalidGAError"
        );
        assert_eq!(intake_error_key(&IntakeError::OutOfRange), "invalidDateError");
    }
}
