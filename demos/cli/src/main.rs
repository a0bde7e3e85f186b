use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context};
use chrono::{Local, NaiveDate, Utc};
use clap::{Args as ClapArgs, Parser, Subcommand};
use gestation_core::{
    calendar_day, format_gregorian, format_jalali, to_jalali, DatingConfig, JalaliDate, Locale,
    PregnancyView,
};
use gestation_engine::{
    calculate, derive_view, load_case_list_str, translate, translate_key, CaseList, DatingForm,
    IntakeOutcome, UltrasoundEntry,
};

#[derive(Parser, Debug)]
#[command(
    name = "gestation-cli",
    about = "Tính tuổi thai, ngày dự sinh và kế hoạch chăm sóc thai kỳ."
)]
struct Args {
    /// Ngôn ngữ hiển thị (fa | en).
    #[arg(long, global = true, default_value = "fa")]
    locale: Locale,
    /// Ngày hiện tại (YYYY-MM-DD), mặc định là hôm nay theo giờ máy.
    #[arg(long, global = true)]
    today: Option<NaiveDate>,
    /// File JSON cấu hình `DatingConfig`.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// In kết quả dạng JSON.
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Định tuổi thai từ LMP và/hoặc siêu âm.
    Date(DateArgs),
    /// Tính trạng thái thai kỳ hôm nay cho một hồ sơ đã lưu.
    View {
        /// File danh sách hồ sơ.
        #[arg(long)]
        cases: PathBuf,
        /// Id hồ sơ, mặc định là hồ sơ đang mở.
        #[arg(long)]
        id: Option<String>,
    },
    /// Chuyển đổi ngày giữa hai lịch.
    #[command(subcommand)]
    Convert(Convert),
}

#[derive(ClapArgs, Debug)]
struct DateArgs {
    /// Tên hoặc mã bệnh nhân.
    #[arg(long, default_value = "")]
    name: String,
    /// Ngày đầu kỳ kinh cuối.
    #[arg(long)]
    lmp: Option<String>,
    /// Ngày siêu âm.
    #[arg(long)]
    scan_date: Option<String>,
    /// Nhập ngày theo lịch Gregorian (YYYY-MM-DD) thay vì Jalali.
    #[arg(long)]
    gregorian: bool,
    #[arg(long)]
    crl: Option<f64>,
    #[arg(long)]
    bpd: Option<f64>,
    #[arg(long)]
    hc: Option<f64>,
    #[arg(long)]
    ac: Option<f64>,
    #[arg(long)]
    fl: Option<f64>,
    /// Tuổi thai (tuần) ghi trên phiếu siêu âm cũ.
    #[arg(long, conflicts_with_all = ["crl", "bpd", "hc", "ac", "fl"])]
    ga_weeks: Option<i64>,
    /// Số ngày lẻ của tuổi thai trên phiếu siêu âm cũ.
    #[arg(long, conflicts_with_all = ["crl", "bpd", "hc", "ac", "fl"])]
    ga_days: Option<i64>,
    /// Lưu hồ sơ mới vào file danh sách và đặt làm hồ sơ đang mở.
    #[arg(long)]
    cases: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Convert {
    /// YYYY-MM-DD -> Jalali.
    ToJalali { date: NaiveDate },
    /// YYYY/MM/DD (Jalali) -> Gregorian.
    ToGregorian { date: JalaliDate },
}

struct Settings {
    locale: Locale,
    today: NaiveDate,
    config: DatingConfig,
    json: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();
    let settings = Settings {
        locale: args.locale,
        today: args.today.unwrap_or_else(|| calendar_day(&Local::now())),
        config: load_config(args.config.as_deref())?,
        json: args.json,
    };
    log::debug!(
        "locale {:?}, today {}, config {:?}",
        settings.locale,
        settings.today,
        settings.config
    );

    match args.command {
        Command::Date(date_args) => run_date(&date_args, &settings),
        Command::View { cases, id } => run_view(&cases, id.as_deref(), &settings),
        Command::Convert(convert) => run_convert(convert, &settings),
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<DatingConfig> {
    let Some(path) = path else {
        return Ok(DatingConfig::default());
    };
    let data = std::fs::read_to_string(path)
        .with_context(|| format!("Không đọc được file cấu hình {path:?}"))?;
    serde_json::from_str(&data).with_context(|| format!("Cấu hình không hợp lệ trong {path:?}"))
}

fn run_date(args: &DateArgs, settings: &Settings) -> anyhow::Result<()> {
    let form = DatingForm {
        patient_name: args.name.clone(),
        lmp: args
            .lmp
            .as_deref()
            .map(|text| read_form_date(text, args.gregorian))
            .transpose()?,
        scan_date: args
            .scan_date
            .as_deref()
            .map(|text| read_form_date(text, args.gregorian))
            .transpose()?,
        ultrasound: ultrasound_entry(args),
    };

    let outcome = calculate(&form, settings.today, &settings.config)
        .map_err(|err| anyhow!("{}", translate_key(&err, settings.locale)))?;

    if settings.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        print_outcome(&outcome, settings.locale);
    }

    if let Some(path) = &args.cases {
        let list = read_case_list(path)?;
        let id = format!("case-{}", Utc::now().timestamp_millis());
        let record = outcome.into_record(id.as_str(), settings.locale, settings.today)?;
        let name = record.name.clone();
        let list = list.upsert(record).with_active(&id);
        std::fs::write(path, list.to_json_string()?)
            .with_context(|| format!("Không ghi được file {path:?}"))?;
        if !settings.json {
            println!("{name} {}", translate("caseSaved", settings.locale));
        }
    }

    Ok(())
}

fn run_view(path: &Path, id: Option<&str>, settings: &Settings) -> anyhow::Result<()> {
    let list = read_case_list(path)?;
    let record = match id {
        Some(id) => list.get(id),
        None => list.active(),
    }
    .ok_or_else(|| anyhow!("Không tìm thấy hồ sơ trong {path:?}"))?;

    let view = derive_view(record, settings.today, &settings.config);

    if settings.json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        println!("{} {}", translate("patientName", settings.locale), record.name);
        print_view(&view, settings.locale);
    }
    Ok(())
}

fn run_convert(convert: Convert, settings: &Settings) -> anyhow::Result<()> {
    match convert {
        Convert::ToJalali { date } => {
            let jalali = to_jalali(date)?;
            if settings.json {
                println!("{}", serde_json::to_string(&jalali)?);
            } else {
                println!("{jalali}  ({})", format_jalali(jalali));
            }
        }
        Convert::ToGregorian { date } => {
            let gregorian = gestation_core::from_jalali(date)?;
            if settings.json {
                println!("{}", serde_json::to_string(&gregorian)?);
            } else {
                println!("{gregorian}  ({})", format_gregorian(gregorian));
            }
        }
    }
    Ok(())
}

fn read_case_list(path: &Path) -> anyhow::Result<CaseList> {
    if !path.exists() {
        return Ok(CaseList::default());
    }
    let data = std::fs::read_to_string(path)
        .with_context(|| format!("Không đọc được file {path:?}"))?;
    Ok(load_case_list_str(&data)?)
}

fn read_form_date(text: &str, gregorian: bool) -> anyhow::Result<JalaliDate> {
    if gregorian {
        let date = NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d")
            .with_context(|| format!("Ngày Gregorian không hợp lệ: {text}"))?;
        Ok(to_jalali(date)?)
    } else {
        Ok(text.parse()?)
    }
}

fn ultrasound_entry(args: &DateArgs) -> UltrasoundEntry {
    if args.ga_weeks.is_some() || args.ga_days.is_some() {
        return UltrasoundEntry::Report {
            weeks: args.ga_weeks,
            days: args.ga_days,
        };
    }
    let measurements = [args.crl, args.bpd, args.hc, args.ac, args.fl];
    if measurements.iter().any(Option::is_some) {
        UltrasoundEntry::Biometry {
            crl: args.crl,
            bpd: args.bpd,
            hc: args.hc,
            ac: args.ac,
            fl: args.fl,
        }
    } else {
        UltrasoundEntry::None
    }
}

fn display_date(date: NaiveDate, locale: Locale) -> String {
    match locale {
        Locale::Fa => to_jalali(date)
            .map(format_jalali)
            .unwrap_or_else(|_| date.to_string()),
        Locale::En => format_gregorian(date),
    }
}

fn format_ga(days: i64) -> String {
    format!("{}w {}d", days.div_euclid(7), days.rem_euclid(7))
}

fn print_outcome(outcome: &IntakeOutcome, locale: Locale) {
    let t = |key: &str| translate(key, locale).to_string();
    let decision = &outcome.decision;

    println!("{}", t("calculationResults"));
    println!(
        "  {}: {}",
        t("datingMethod"),
        translate_key(&decision.method, locale)
    );
    println!("  {}: {}", t("finalEDC"), display_date(decision.edc, locale));
    if let Some(message) = &decision.message {
        println!(
            "  {}: {}",
            t("reconciliationNote"),
            translate_key(message, locale)
        );
    }
    if let Some(edc) = outcome.edc_by_lmp {
        println!("  {}: {}", t("edcByLMP"), display_date(edc, locale));
    }
    if let Some(edc) = outcome.edc_by_ultrasound {
        println!("  {}: {}", t("edcByUS"), display_date(edc, locale));
    }
    if let Some(ga) = outcome.ga_on_scan_date {
        println!("  {}: {}", t("gaAtScan"), format_ga(ga));
    }
    if let Some(ga) = outcome.projected_ga_today {
        println!("  {}: {}", t("projectedGAToday"), format_ga(ga));
    }
}

fn print_view(view: &PregnancyView, locale: Locale) {
    let t = |key: &str| translate(key, locale).to_string();

    println!("{}: {}", t("todaysDate"), display_date(view.today, locale));
    println!("{}: {}", t("ga"), format_ga(view.ga_days));
    println!("{}: {}", t("trimester"), view.trimester.number());
    println!("{}: {}", t("edc"), display_date(view.edc, locale));
    println!("{}: {}", t("daysRemaining"), view.days_remaining);
    if let Some(days) = view.days_passed_from_lmp {
        println!("{}: {days}", t("daysPassed"));
    }
    println!(
        "{}: {}",
        t("datingMethod"),
        translate_key(&view.dating_method, locale)
    );
    println!("{}: {:.0}%", t("progress"), view.progress.percent);

    if !view.care_plan.missed.is_empty() {
        println!("\n{}", t("missedItemsTitle"));
        for event in &view.care_plan.missed {
            println!("  ! {}", event.name.get(locale));
        }
    }

    println!("\n{}", t("upcomingTasksTitle"));
    if view.care_plan.upcoming.is_empty() {
        println!("  {}", t("noUpcomingTasks"));
    }
    for event in &view.care_plan.upcoming {
        println!(
            "  - {} ({} {}-{})",
            event.name.get(locale),
            t("dueWeeksLabel"),
            event.start_week,
            event.end_week
        );
    }

    println!("\n{}", t("upcomingVisits"));
    for visit in view.visit_schedule.iter().filter(|visit| !visit.is_past).take(3) {
        let tasks: Vec<&str> = visit
            .tasks
            .iter()
            .map(|task| translate_key(task, locale))
            .collect();
        println!(
            "  {} {}: {} [{}]",
            t("week"),
            visit.week,
            display_date(visit.date, locale),
            tasks.join(", ")
        );
    }

    println!("\n{}", t("redFlagsTitle"));
    for flag in &view.red_flags {
        println!("  * {}", flag.title.get(locale));
    }
}
