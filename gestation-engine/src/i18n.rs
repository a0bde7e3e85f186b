//! Bilingual (Persian / English) message lookup by stable key.

use gestation_core::{BilingualText, Locale};

pub use gestation_core::MessageKey;

const fn text(fa: &'static str, en: &'static str) -> BilingualText {
    BilingualText { fa, en }
}

/// Looks up `key`; falls back to English, then to the key itself.
pub fn translate(key: &str, locale: Locale) -> &str {
    match lookup(key) {
        Some(entry) => entry.get(locale),
        None => key,
    }
}

pub fn translate_key(message: &impl MessageKey, locale: Locale) -> &'static str {
    let key = message.key();
    match lookup(key) {
        Some(entry) => entry.get(locale),
        None => key,
    }
}

pub fn contains_key(key: &str) -> bool {
    lookup(key).is_some()
}

fn lookup(key: &str) -> Option<&'static BilingualText> {
    TRANSLATIONS
        .iter()
        .find(|(candidate, _)| *candidate == key)
        .map(|(_, entry)| entry)
}

const TRANSLATIONS: &[(&str, BilingualText)] = &[
    ("appName", text("دستیار مامایی و زنان", "Obstetrics & Midwifery Assistant")),
    ("newCase", text("پرونده جدید", "New Case")),
    ("saveCase", text("ذخیره پرونده", "Save Case")),
    ("save", text("ذخیره", "Save")),
    ("manageCases", text("مدیریت پرونده‌ها", "Manage Cases")),
    ("cases", text("پرونده‌ها", "Cases")),
    ("patientManagerTitle", text("لیست پرونده‌های ذخیره شده", "Saved Case List")),
    ("loadCase", text("مشاهده", "View")),
    ("deleteCase", text("حذف", "Delete")),
    ("noSavedCases", text("هیچ پرونده ذخیره شده‌ای وجود ندارد.", "No saved cases found.")),
    (
        "enterPatientName",
        text(
            "لطفا نام یا شناسه بیمار را وارد کنید:",
            "Please enter a patient name or identifier:",
        ),
    ),
    ("caseSaved", text("با موفقیت ذخیره شد.", "saved successfully.")),
    (
        "confirmDeleteCase",
        text(
            "آیا از حذف این پرونده مطمئن هستید؟ این عمل غیرقابل بازگشت است.",
            "Are you sure you want to delete this case? This action cannot be undone.",
        ),
    ),
    ("untitledCase", text("پرونده بدون نام", "Untitled Case")),
    ("addPatient", text("افزودن بیمار جدید", "Add New Patient")),
    ("patientNamePrompt", text("نام یا شناسه بیمار", "Patient Name / ID")),
    ("backToPatientList", text("لیست بیماران", "Patient List")),
    ("cancel", text("انصراف", "Cancel")),
    (
        "welcomeMessage",
        text(
            "به دستیار مامایی و زنان خوش آمدید!",
            "Welcome to the Obstetrics & Midwifery Assistant!",
        ),
    ),
    (
        "welcomeCTA",
        text(
            "برای شروع، اولین بیمار خود را اضافه کنید.",
            "Add your first patient to get started.",
        ),
    ),
    ("gaCalculatorTitle", text("محاسبه و تعیین سن بارداری", "Pregnancy Dating & Reconciliation")),
    (
        "gaCalculatorSubtitle",
        text(
            "اطلاعات بیمار، LMP و/یا سونوگرافی را برای محاسبه دقیق سن بارداری وارد کنید.",
            "Enter patient info, LMP, and/or Ultrasound data for accurate GA calculation.",
        ),
    ),
    ("lmpDatingTab", text("اطلاعات LMP", "LMP Data")),
    ("ultrasoundDatingTab", text("اطلاعات سونوگرافی", "Ultrasound Data")),
    (
        "lmpInstruction",
        text(
            "اولین روز آخرین قاعدگی (LMP) را به شمسی وارد کنید.",
            "Enter the First Day of the Last Menstrual Period (LMP) in Jalali.",
        ),
    ),
    ("day", text("روز", "Day")),
    ("month", text("ماه", "Month")),
    ("year", text("سال", "Year")),
    ("weeks", text("هفته", "Weeks")),
    ("days", text("روز", "Days")),
    ("crlLabel", text("CRL (mm)", "CRL (mm)")),
    ("bpdLabel", text("BPD (mm)", "BPD (mm)")),
    ("hcLabel", text("HC (mm)", "HC (mm)")),
    ("acLabel", text("AC (mm)", "AC (mm)")),
    ("flLabel", text("FL (mm)", "FL (mm)")),
    (
        "usBiometryInstruction",
        text(
            "برای محاسبه سن، اندازه‌گیری‌های بیومتری را وارد کنید.",
            "Enter biometry measurements to calculate GA.",
        ),
    ),
    (
        "usReportInstruction",
        text(
            "سن بارداری گزارش شده در سونوگرافی قبلی را وارد کنید.",
            "Enter the GA from a previous ultrasound report.",
        ),
    ),
    ("biometryEntry", text("ورود اندازه‌ها", "Biometry Entry")),
    ("reportEntry", text("ورود گزارش", "Report Entry")),
    ("scanDate", text("تاریخ سونوگرافی", "Date of Scan")),
    ("gaAtScan", text("سن بارداری در زمان سونوگرافی", "GA at time of scan")),
    ("calculateButton", text("محاسبه و تطبیق", "Calculate & Reconcile")),
    (
        "invalidDateError",
        text(
            "تاریخ شمسی وارد شده معتبر نیست. لطفا مقادیر را بررسی کنید.",
            "The entered Jalali date is not valid. Please check the values.",
        ),
    ),
    (
        "invalidGAError",
        text(
            "مقادیر هفته و روز سن بارداری معتبر نیست.",
            "The GA weeks and days values are not valid.",
        ),
    ),
    (
        "noInputError",
        text(
            "لطفا حداقل اطلاعات LMP یا سونوگرافی را وارد کنید.",
            "Please enter at least LMP or Ultrasound data.",
        ),
    ),
    (
        "calculationError",
        text(
            "خطا در محاسبه. لطفا ورودی‌ها را بررسی کنید.",
            "Calculation error. Please check your inputs.",
        ),
    ),
    (
        "ultrasoundDateMissing",
        text(
            "لطفا تاریخ سونوگرافی را برای مقادیر بیومتری وارد کنید.",
            "Please enter the scan date for the biometry values.",
        ),
    ),
    ("calculationResults", text("نتایج محاسبه", "Calculation Results")),
    ("datingMethod", text("روش نهایی تعیین سن", "Final Dating Method")),
    ("lmpBased", text("بر اساس LMP", "LMP Based")),
    ("ultrasoundBased", text("بر اساس سونوگرافی", "Ultrasound Based")),
    ("reconciliationNote", text("توضیحات تطبیق", "Reconciliation Note")),
    ("finalEDC", text("تاریخ تخمینی زایمان (EDC)", "Final Estimated Due Date (EDC)")),
    ("confirmAndStart", text("ایجاد پرونده و شروع پایش", "Create Case & Start Monitoring")),
    ("usVsLMPComparison", text("مقایسه LMP با سونوگرافی", "LMP vs. Ultrasound Comparison")),
    ("edcByLMP", text("EDC بر اساس LMP", "EDC from LMP")),
    ("edcByUS", text("EDC بر اساس سونوگرافی", "EDC from Ultrasound")),
    ("projectedGAToday", text("سن تخمینی امروز (بر اساس سونو)", "Projected GA Today (from US)")),
    (
        "reconcile_t1_early",
        text(
            "مغایرت >۵ روز در سه ماهه اول (<9هفته). EDC سونوگرافی طبق ACOG معتبرتر است.",
            "Discrepancy >5 days in early first trimester (<9w). Ultrasound EDC is more reliable per ACOG.",
        ),
    ),
    (
        "reconcile_t1_late",
        text(
            "مغایرت >۷ روز در سه ماهه اول (9-13هفته و ۶ روز). EDC سونوگرافی طبق ACOG معتبرتر است.",
            "Discrepancy >7 days in late first trimester (9w-13w6d). Ultrasound EDC is more reliable per ACOG.",
        ),
    ),
    (
        "reconcile_t2_early",
        text(
            "مغایرت >۷ روز در اوایل سه ماهه دوم (14-15هفته و ۶ روز). EDC سونوگرافی طبق ACOG معتبرتر است.",
            "Discrepancy >7 days in early second trimester (14w-15w6d). Ultrasound EDC is more reliable per ACOG.",
        ),
    ),
    (
        "reconcile_t2_mid",
        text(
            "مغایرت >۱۰ روز در اواسط سه ماهه دوم (16-21هفته و ۶ روز). EDC سونوگرافی طبق ACOG معتبرتر است.",
            "Discrepancy >10 days in mid second trimester (16w-21w6d). Ultrasound EDC is more reliable per ACOG.",
        ),
    ),
    (
        "reconcile_t2_late",
        text(
            "مغایرت >۱۴ روز در اواخر سه ماهه دوم (22-27هفته و ۶ روز). EDC سونوگرافی طبق ACOG معتبرتر است.",
            "Discrepancy >14 days in late second trimester (22w-27w6d). Ultrasound EDC is more reliable per ACOG.",
        ),
    ),
    (
        "reconcile_t3",
        text(
            "مغایرت >۲۱ روز در سه ماهه سوم (>=28هفته). EDC سونوگرافی طبق ACOG معتبرتر است.",
            "Discrepancy >21 days in third trimester (>=28w). Ultrasound EDC is more reliable per ACOG.",
        ),
    ),
    (
        "reconcile_useLMP",
        text(
            "مغایرت در محدوده قابل قبول طبق ACOG است. تعیین سن بر اساس LMP انجام می‌شود.",
            "Discrepancy is within acceptable limits based on ACOG guidelines. Dating is based on LMP.",
        ),
    ),
    ("patientName", text("نام بیمار:", "Patient Name:")),
    ("ga", text("سن بارداری", "Gestational Age")),
    ("trimester", text("سه ماهه", "Trimester")),
    ("edc", text("تاریخ تخمینی زایمان", "Estimated Delivery Date")),
    ("daysRemaining", text("روزهای باقیمانده", "Days Remaining")),
    ("until40w", text("تا ۴۰ هفتگی", "until 40 weeks")),
    ("todaysDate", text("تاریخ امروز", "Today's Date")),
    ("progress", text("وضعیت پیشرفت", "Progress")),
    ("daysPassed", text("روزهای گذشته", "Days Passed")),
    ("sinceLMP", text("از LMP", "since LMP")),
    ("carePlan", text("برنامه مراقبتی", "Care Plan")),
    ("visitPlanner", text("برنامه ویزیت‌ها", "Visit Planner")),
    ("redFlags", text("علائم خطر", "Red Flags")),
    ("visitScheduleTitle", text("برنامه ویزیت‌های پیش از زایمان", "Prenatal Visit Schedule")),
    ("upcomingVisits", text("ویزیت‌های آتی", "Upcoming Visits")),
    ("pastVisits", text("ویزیت‌های گذشته", "Past Visits")),
    ("redFlagsTitle", text("علائم خطر مهم در این مرحله", "Important Red Flags for this Stage")),
    ("keySymptoms", text("علائم کلیدی:", "Key Symptoms:")),
    ("taskBP", text("فشار خون", "BP")),
    ("taskWeight", text("وزن", "Weight")),
    ("taskUA", text("آنالیز ادرار", "UA")),
    ("taskFHR", text("صدای قلب جنین", "FHR")),
    ("taskFH", text("ارتفاع رحم", "FH")),
    ("taskFetalMovement", text("بررسی حرکات جنین", "Fetal Movement")),
    ("taskCervicalExam", text("معاینه سرویکس (در صورت لزوم)", "Cervical Exam (if indicated)")),
    (
        "missedItemsTitle",
        text(
            "موارد حیاتی بالقوه فراموش شده",
            "Potentially Missed Critical Items",
        ),
    ),
    ("upcomingTasksTitle", text("وظایف و رویدادهای پیش رو", "Upcoming Tasks & Milestones")),
    (
        "noUpcomingTasks",
        text(
            "در بازه‌های زمانی تعریف شده، وظیفه فوری وجود ندارد. لطفاً به برنامه ویزیت‌ها مراجعه کنید.",
            "No immediate upcoming tasks within the defined windows. Please refer to the visit planner.",
        ),
    ),
    ("completedMilestonesTitle", text("رویدادهای تکمیل شده", "Completed Milestones")),
    ("dueWeeksLabel", text("موعد: هفته‌های", "Due: Weeks")),
    ("timelineTitle", text("خط زمانی بارداری", "Pregnancy Timeline")),
    ("week", text("هفته", "Week")),
    ("w", text("هفته", "w")),
    ("start", text("شروع", "Start")),
    ("trimester1", text("سه ماهه اول", "Trimester 1")),
    ("trimester2", text("سه ماهه دوم", "Trimester 2")),
    ("trimester3", text("سه ماهه سوم", "Trimester 3")),
    ("ntScan", text("غربالگری NT\n(۱۱-۱۳هفته)", "NT Scan\n(11-13w)")),
    ("anatomyScan", text("سونوگرافی آنومالی\n(۱۸-۲۲هفته)", "Anatomy Scan\n(18-22w)")),
    ("gdmScreen", text("غربالگری دیابت\n(۲۴-۲۸هفته)", "GDM Screen\n(24-28w)")),
    ("gbsScreen", text("غربالگری GBS\n(۳۶-۳۷هفته)", "GBS Screen\n(36-37w)")),
    ("dueDate", text("موعد زایمان\n(۴۰هفته)", "Due Date\n(40w)")),
];
