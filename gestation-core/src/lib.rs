//! Logic lõi tính tuổi thai, ngày dự sinh và đối chiếu các nguồn định tuổi thai.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub mod calendar;
pub mod dating;
pub mod reconcile;

pub use calendar::{
    add_days, calendar_day, days_between, diff_days, format_gregorian, format_jalali,
    from_jalali, is_leap_jalali_year, is_valid_jalali, jalali_from_components,
    jalali_month_length, to_jalali, JalaliDate,
};
pub use dating::{
    edc_from_ga, edc_from_lmp, ga_from_biometry, ga_from_crl, ga_from_report, ga_on, Biometry,
    GaBreakdown,
};
pub use reconcile::{
    establish_dating, reconcile_dates, DatingDecision, ReconcileMessage, Reconciliation,
};

/// Độ dài thai kỳ đủ tháng tính từ LMP (quy tắc Naegele), đơn vị ngày.
pub const TERM_DAYS: i64 = 280;

/// Cấu hình các ngưỡng hiển thị của engine. Trường thiếu lấy giá trị mặc định.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DatingConfig {
    /// Số tuần ân hạn sau cửa sổ trước khi sự kiện quan trọng bị coi là bỏ lỡ.
    pub missed_grace_weeks: i64,
    /// Sự kiện bỏ lỡ chỉ còn hiển thị khi tuổi thai nhỏ hơn `end_week + missed_visible_weeks`.
    pub missed_visible_weeks: i64,
    /// Tổng số tuần của thanh tiến trình.
    pub timeline_total_weeks: i64,
    /// Số tuần tối đa của tuổi thai đọc từ phiếu siêu âm.
    pub max_reported_ga_weeks: i64,
}

impl Default for DatingConfig {
    fn default() -> Self {
        Self {
            missed_grace_weeks: 1,
            missed_visible_weeks: 4,
            timeline_total_weeks: 42,
            max_reported_ga_weeks: 44,
        }
    }
}

/// Khóa thông điệp ổn định, dịch ở tầng trình bày.
pub trait MessageKey {
    fn key(&self) -> &'static str;
}

/// Ngôn ngữ hiển thị được hỗ trợ.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Fa,
    En,
}

impl std::str::FromStr for Locale {
    type Err = DatingError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "fa" => Ok(Locale::Fa),
            "en" => Ok(Locale::En),
            other => Err(DatingError::Parse(format!("Ngôn ngữ không hỗ trợ: {other}"))),
        }
    }
}

/// Chuỗi song ngữ tĩnh (Ba Tư / Anh).
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct BilingualText {
    pub fa: &'static str,
    pub en: &'static str,
}

impl BilingualText {
    /// Lấy chuỗi theo ngôn ngữ, rơi về tiếng Anh khi bản dịch trống.
    pub fn get(&self, locale: Locale) -> &'static str {
        match locale {
            Locale::Fa if !self.fa.is_empty() => self.fa,
            _ => self.en,
        }
    }
}

/// Nguồn định tuổi thai được chọn cuối cùng.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DatingMethod {
    Lmp,
    Ultrasound,
}

impl MessageKey for DatingMethod {
    fn key(&self) -> &'static str {
        match self {
            DatingMethod::Lmp => "lmpBased",
            DatingMethod::Ultrasound => "ultrasoundBased",
        }
    }
}

/// Một lần siêu âm, ghi nhận một lần khi tạo hồ sơ.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UltrasoundSnapshot {
    pub scan_date: NaiveDate,
    pub ga_on_scan_date_days: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crl: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bpd: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hc: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ac: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fl: Option<f64>,
}

impl UltrasoundSnapshot {
    /// Snapshot chỉ có tuổi thai (ví dụ đọc từ phiếu kết quả).
    pub fn reported(scan_date: NaiveDate, ga_on_scan_date_days: i64) -> Self {
        Self {
            scan_date,
            ga_on_scan_date_days,
            crl: None,
            bpd: None,
            hc: None,
            ac: None,
            fl: None,
        }
    }

    /// Snapshot kèm các số đo sinh trắc đã dùng để tính tuổi thai.
    pub fn measured(
        scan_date: NaiveDate,
        ga_on_scan_date_days: i64,
        crl: Option<f64>,
        biometry: &Biometry,
    ) -> Self {
        Self {
            scan_date,
            ga_on_scan_date_days,
            crl,
            bpd: biometry.bpd,
            hc: biometry.hc,
            ac: biometry.ac,
            fl: biometry.fl,
        }
    }
}

/// Chỉ số sống của mẹ ghi nhận trong một lần khám.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Vital {
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bp_systolic: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bp_diastolic: Option<u32>,
}

/// Một lần đo sinh trắc thai theo thời gian.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FetalBiometryEntry {
    pub date: NaiveDate,
    pub ga_weeks: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bpd: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hc: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ac: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fl: Option<f64>,
}

/// Hồ sơ thai kỳ.
///
/// `edc` được đặt đúng một lần trong [`PregnancyRecord::create`]; mọi cập nhật
/// sau đó trả về một bản ghi mới và không đụng tới các trường định tuổi.
/// `ga_days` chỉ là giá trị đệm để hiển thị, engine luôn tính lại từ `edc`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PregnancyRecord {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lmp: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ultrasound: Option<UltrasoundSnapshot>,
    pub edc: NaiveDate,
    pub dating_method: DatingMethod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reconciliation_note: Option<ReconcileMessage>,
    #[serde(default)]
    pub ga_days: i64,
    #[serde(default)]
    pub vitals: Vec<Vital>,
    #[serde(default)]
    pub fetal_biometry: Vec<FetalBiometryEntry>,
    #[serde(default)]
    pub completed_events: Vec<String>,
}

impl PregnancyRecord {
    /// Tạo hồ sơ mới; cần ít nhất LMP hoặc siêu âm. `ga_days` được tính cho `today`.
    pub fn create(
        id: impl Into<String>,
        name: impl Into<String>,
        lmp: Option<NaiveDate>,
        ultrasound: Option<UltrasoundSnapshot>,
        today: NaiveDate,
    ) -> Result<Self, DatingError> {
        let decision = establish_dating(lmp, ultrasound.as_ref())?;
        Ok(Self {
            id: id.into(),
            name: name.into(),
            lmp,
            ultrasound,
            edc: decision.edc,
            dating_method: decision.method,
            reconciliation_note: decision.message,
            ga_days: ga_on(decision.edc, today),
            vitals: Vec::new(),
            fetal_biometry: Vec::new(),
            completed_events: Vec::new(),
        })
    }

    pub fn with_name(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..self.clone()
        }
    }

    /// Thêm chỉ số sống, giữ danh sách theo thứ tự ngày.
    pub fn with_vital(&self, vital: Vital) -> Self {
        let mut next = self.clone();
        next.vitals.push(vital);
        next.vitals.sort_by_key(|entry| entry.date);
        next
    }

    pub fn with_fetal_biometry(&self, entry: FetalBiometryEntry) -> Self {
        let mut next = self.clone();
        next.fetal_biometry.push(entry);
        next.fetal_biometry.sort_by_key(|item| item.date);
        next
    }

    /// Đánh dấu một sự kiện chăm sóc (theo id ổn định) là đã thực hiện.
    pub fn with_completed_event(&self, event_id: impl Into<String>) -> Self {
        let event_id = event_id.into();
        let mut next = self.clone();
        if !next.completed_events.contains(&event_id) {
            next.completed_events.push(event_id);
        }
        next
    }

    pub fn is_event_completed(&self, event_id: &str) -> bool {
        self.completed_events.iter().any(|id| id == event_id)
    }

    /// Bản sao với `ga_days` được tính lại cho ngày `today`.
    pub fn refreshed(&self, today: NaiveDate) -> Self {
        Self {
            ga_days: ga_on(self.edc, today),
            ..self.clone()
        }
    }
}

/// Tam cá nguyệt.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(into = "u8", try_from = "u8")]
pub enum Trimester {
    First,
    Second,
    Third,
}

impl Trimester {
    /// Tuổi thai âm (trước LMP) được xếp vào tam cá nguyệt thứ nhất.
    pub fn from_ga_weeks(ga_weeks: i64) -> Self {
        if ga_weeks < 14 {
            Trimester::First
        } else if ga_weeks < 28 {
            Trimester::Second
        } else {
            Trimester::Third
        }
    }

    pub fn number(self) -> u8 {
        match self {
            Trimester::First => 1,
            Trimester::Second => 2,
            Trimester::Third => 3,
        }
    }
}

impl From<Trimester> for u8 {
    fn from(value: Trimester) -> Self {
        value.number()
    }
}

impl TryFrom<u8> for Trimester {
    type Error = DatingError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Trimester::First),
            2 => Ok(Trimester::Second),
            3 => Ok(Trimester::Third),
            other => Err(DatingError::Parse(format!("Tam cá nguyệt không hợp lệ: {other}"))),
        }
    }
}

/// Nhóm sự kiện trong kế hoạch chăm sóc.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum EventCategory {
    Test,
    Ultrasound,
    Screening,
    Medication,
    Counseling,
    Milestone,
}

/// Sự kiện lâm sàng trong danh mục tĩnh.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClinicalEvent {
    /// Định danh ổn định, không phụ thuộc tên hiển thị.
    pub id: &'static str,
    pub name: BilingualText,
    pub description: BilingualText,
    pub category: EventCategory,
    pub start_week: i64,
    pub end_week: i64,
    pub is_critical: bool,
}

/// Dấu hiệu nguy hiểm theo tam cá nguyệt.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct RedFlag {
    pub title: BilingualText,
    pub details: BilingualText,
    pub symptoms: &'static [BilingualText],
}

/// Kế hoạch chăm sóc chia theo trạng thái.
#[derive(Debug, Clone, Serialize, Default, PartialEq)]
pub struct CarePlan {
    pub upcoming: Vec<ClinicalEvent>,
    pub completed: Vec<ClinicalEvent>,
    pub missed: Vec<ClinicalEvent>,
}

/// Việc cần làm trong một lần khám thai.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum VisitTask {
    #[serde(rename = "taskBP")]
    BloodPressure,
    #[serde(rename = "taskWeight")]
    Weight,
    #[serde(rename = "taskUA")]
    Urinalysis,
    #[serde(rename = "taskFHR")]
    FetalHeartRate,
    #[serde(rename = "taskFH")]
    FundalHeight,
    #[serde(rename = "taskFetalMovement")]
    FetalMovement,
    #[serde(rename = "taskCervicalExam")]
    CervicalExam,
}

impl MessageKey for VisitTask {
    fn key(&self) -> &'static str {
        match self {
            VisitTask::BloodPressure => "taskBP",
            VisitTask::Weight => "taskWeight",
            VisitTask::Urinalysis => "taskUA",
            VisitTask::FetalHeartRate => "taskFHR",
            VisitTask::FundalHeight => "taskFH",
            VisitTask::FetalMovement => "taskFetalMovement",
            VisitTask::CervicalExam => "taskCervicalExam",
        }
    }
}

/// Một lần khám trong lịch khám thai.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Visit {
    pub week: i64,
    pub date: NaiveDate,
    pub jalali_date: Option<JalaliDate>,
    pub tasks: Vec<VisitTask>,
    pub is_past: bool,
}

/// Giai đoạn của thai kỳ so với ngày hiện tại.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GestationPhase {
    /// Ngày hiện tại còn trước LMP (suy ra từ EDC).
    BeforeLmp,
    Pregnant,
    /// Đã qua EDC.
    Overdue,
}

/// Mốc hiển thị trên thanh tiến trình.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Milestone {
    NtScan,
    AnatomyScan,
    GdmScreen,
    GbsScreen,
    DueDate,
}

impl Milestone {
    pub const ALL: [Milestone; 5] = [
        Milestone::NtScan,
        Milestone::AnatomyScan,
        Milestone::GdmScreen,
        Milestone::GbsScreen,
        Milestone::DueDate,
    ];

    pub fn week(self) -> i64 {
        match self {
            Milestone::NtScan => 12,
            Milestone::AnatomyScan => 20,
            Milestone::GdmScreen => 26,
            Milestone::GbsScreen => 36,
            Milestone::DueDate => 40,
        }
    }
}

impl MessageKey for Milestone {
    fn key(&self) -> &'static str {
        match self {
            Milestone::NtScan => "ntScan",
            Milestone::AnatomyScan => "anatomyScan",
            Milestone::GdmScreen => "gdmScreen",
            Milestone::GbsScreen => "gbsScreen",
            Milestone::DueDate => "dueDate",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
pub struct MilestoneMarker {
    pub milestone: Milestone,
    pub week: i64,
    pub reached: bool,
}

/// Tiến trình thai kỳ trên thang tuần cố định.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TimelineProgress {
    pub percent: f64,
    pub milestones: Vec<MilestoneMarker>,
}

/// Trạng thái dẫn xuất của thai kỳ tại một ngày; không bao giờ được lưu.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PregnancyView {
    pub record_id: String,
    pub today: NaiveDate,
    pub today_jalali: Option<JalaliDate>,
    pub edc: NaiveDate,
    pub edc_jalali: Option<JalaliDate>,
    pub dating_method: DatingMethod,
    pub reconciliation_note: Option<ReconcileMessage>,
    pub ga_days: i64,
    pub ga_weeks: i64,
    pub ga_remainder_days: i64,
    pub days_remaining: i64,
    pub phase: GestationPhase,
    pub trimester: Trimester,
    pub care_plan: CarePlan,
    pub visit_schedule: Vec<Visit>,
    pub red_flags: Vec<RedFlag>,
    pub days_passed_from_lmp: Option<i64>,
    pub progress: TimelineProgress,
}

/// Lỗi chung của lõi định tuổi thai.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DatingError {
    #[error("Ngày Jalali không hợp lệ: {year}/{month}/{day}")]
    InvalidJalaliDate { year: i64, month: i64, day: i64 },
    #[error("Năm Jalali {0} nằm ngoài khoảng hỗ trợ")]
    UnsupportedJalaliYear(i64),
    #[error("Ngày {0} nằm ngoài khoảng lịch hỗ trợ")]
    DateOutOfRange(NaiveDate),
    #[error("Cộng {days} ngày vào {date} vượt khoảng lịch hỗ trợ")]
    DayOffsetOutOfRange { date: NaiveDate, days: i64 },
    #[error("Thành phần ngày không phải số nguyên hữu hạn")]
    NonFiniteComponent,
    #[error("Cần ít nhất LMP hoặc dữ liệu siêu âm để định tuổi thai")]
    MissingDatingSource,
    #[error("Không đọc được dữ liệu: {0}")]
    Parse(String),
}
