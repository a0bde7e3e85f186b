//! Static clinical catalogs: care-plan events and red flags by trimester.

use gestation_core::{BilingualText, ClinicalEvent, EventCategory, RedFlag, Trimester};

/// Event and red-flag tables consumed by the derivation engine.
#[derive(Debug, Clone, Copy)]
pub struct Catalog<'a> {
    pub events: &'a [ClinicalEvent],
    /// Indexed by trimester number minus one.
    pub red_flags_by_trimester: [&'a [RedFlag]; 3],
}

impl Catalog<'static> {
    pub fn standard() -> Self {
        Self {
            events: CLINICAL_EVENTS,
            red_flags_by_trimester: [
                FIRST_TRIMESTER_RED_FLAGS,
                SECOND_TRIMESTER_RED_FLAGS,
                THIRD_TRIMESTER_RED_FLAGS,
            ],
        }
    }
}

impl<'a> Catalog<'a> {
    pub fn red_flags(&self, trimester: Trimester) -> &'a [RedFlag] {
        self.red_flags_by_trimester[usize::from(trimester.number()) - 1]
    }

    pub fn event(&self, id: &str) -> Option<&'a ClinicalEvent> {
        self.events.iter().find(|event| event.id == id)
    }
}

const fn text(fa: &'static str, en: &'static str) -> BilingualText {
    BilingualText { fa, en }
}

pub const CLINICAL_EVENTS: &[ClinicalEvent] = &[
    ClinicalEvent {
        id: "first-prenatal-visit",
        name: text("اولین ویزیت بارداری", "First Prenatal Visit"),
        description: text(
            "ویزیت جامع اولیه شامل تاریخچه پزشکی، معاینه فیزیکی و آزمایشات اولیه.",
            "Initial comprehensive visit including history, physical exam, and initial lab work.",
        ),
        category: EventCategory::Milestone,
        start_week: 6,
        end_week: 10,
        is_critical: false,
    },
    ClinicalEvent {
        id: "folic-acid",
        name: text("مصرف مکمل اسید فولیک", "Folic Acid Supplementation"),
        description: text(
            "حیاتی برای جلوگیری از نقص لوله عصبی. روزانه ۴۰۰-۸۰۰ میکروگرم.",
            "Crucial for preventing neural tube defects. 400-800 mcg daily.",
        ),
        category: EventCategory::Medication,
        start_week: 0,
        end_week: 13,
        is_critical: false,
    },
    ClinicalEvent {
        id: "dating-ultrasound",
        name: text("سونوگرافی تعیین سن", "Dating Ultrasound"),
        description: text(
            "تایید بارداری، تعیین سن (معمولاً با CRL) و بررسی چندقلویی.",
            "Confirms pregnancy, dates the pregnancy (usually via CRL), and checks for multiples.",
        ),
        category: EventCategory::Ultrasound,
        start_week: 7,
        end_week: 11,
        is_critical: false,
    },
    ClinicalEvent {
        id: "initial-blood-work",
        name: text("آزمایشات خون اولیه", "Initial Blood Work"),
        description: text(
            "پنل جامع شامل: گروه خونی و Rh، غربالگری آنتی‌بادی، CBC (برای کم‌خونی)، ایمنی سرخجه، سیفلیس (RPR/VDRL)، HIV و هپاتیت B (HBsAg). برای ریسک دیابت، FBS یا HbA1c در نظر گرفته شود.",
            "Comprehensive panel including: Blood type & Rh factor, Antibody screen, CBC (for anemia), Rubella immunity, Syphilis (RPR/VDRL), HIV, and Hepatitis B (HBsAg). Consider FBS or HbA1c for GDM risk.",
        ),
        category: EventCategory::Test,
        start_week: 8,
        end_week: 12,
        is_critical: false,
    },
    ClinicalEvent {
        id: "initial-urine-tests",
        name: text("آزمایشات اولیه ادرار", "Initial Urine Tests"),
        description: text(
            "کشت ادرار برای غربالگری باکتریوری بدون علامت و آنالیز ادرار برای پروتئین و گلوکز.",
            "Urine culture to screen for asymptomatic bacteriuria and a urinalysis for protein and glucose.",
        ),
        category: EventCategory::Test,
        start_week: 8,
        end_week: 12,
        is_critical: false,
    },
    ClinicalEvent {
        id: "nt-scan",
        name: text("سونوگرافی NT", "Nuchal Translucency (NT) Scan"),
        description: text(
            "سونوگرافی برای غربالگری ناهنجاری‌های کروموزومی مانند سندرم داون.",
            "Ultrasound to screen for chromosomal abnormalities like Down syndrome.",
        ),
        category: EventCategory::Screening,
        start_week: 11,
        end_week: 13,
        is_critical: true,
    },
    ClinicalEvent {
        id: "first-trimester-screen",
        name: text("غربالگری سه ماهه اول", "First Trimester Screen"),
        description: text(
            "ترکیب سونوگرافی NT با آزمایش خون (hCG, PAPP-A) برای ریسک آنیوپلوئیدی.",
            "Combines NT scan with blood tests (hCG, PAPP-A) for aneuploidy risk.",
        ),
        category: EventCategory::Screening,
        start_week: 11,
        end_week: 13,
        is_critical: false,
    },
    ClinicalEvent {
        id: "quad-screen",
        name: text("غربالگری کوآد مارکر", "Quad Screen"),
        description: text(
            "آزمایش خون برای غربالگری سندرم داون، تریزومی ۱۸ و نقص لوله عصبی در صورت انجام نشدن غربالگری اول.",
            "Blood test to screen for Down syndrome, trisomy 18, and neural tube defects if first trimester screen was missed.",
        ),
        category: EventCategory::Screening,
        start_week: 15,
        end_week: 22,
        is_critical: false,
    },
    ClinicalEvent {
        id: "anatomy-ultrasound",
        name: text("سونوگرافی آنومالی", "Anatomy Ultrasound"),
        description: text(
            "اسکن دقیق برای ارزیابی آناتومی جنین، جفت و مایع آمنیوتیک.",
            "Detailed scan to assess fetal anatomy, placenta, and amniotic fluid.",
        ),
        category: EventCategory::Ultrasound,
        start_week: 18,
        end_week: 22,
        is_critical: true,
    },
    ClinicalEvent {
        id: "glucose-challenge-test",
        name: text("تست چالش گلوکز (OGTT)", "Glucose Challenge Test (OGTT)"),
        description: text(
            "تست غربالگری دیابت بارداری (GDM).",
            "Screening test for gestational diabetes mellitus (GDM).",
        ),
        category: EventCategory::Screening,
        start_week: 24,
        end_week: 28,
        is_critical: true,
    },
    ClinicalEvent {
        id: "iron-supplementation",
        name: text("مکمل آهن", "Iron Supplementation"),
        description: text(
            "اغلب برای پیشگیری یا درمان کم‌خونی توصیه می‌شود.",
            "Often recommended to prevent or treat anemia.",
        ),
        category: EventCategory::Medication,
        start_week: 20,
        end_week: 40,
        is_critical: false,
    },
    ClinicalEvent {
        id: "rhogam",
        name: text("تزریق روگام برای مادران Rh منفی", "RhoGAM for Rh-Negative Mothers"),
        description: text(
            "جلوگیری از تولید آنتی‌بادی که می‌تواند بر بارداری‌های آینده تأثیر بگذارد.",
            "Prevents antibody formation that could affect future pregnancies.",
        ),
        category: EventCategory::Medication,
        start_week: 28,
        end_week: 28,
        is_critical: true,
    },
    ClinicalEvent {
        id: "tdap-vaccine",
        name: text("واکسن سه‌گانه (Tdap)", "Tdap Vaccine"),
        description: text(
            "محافظت از نوزاد در برابر سیاه‌سرفه.",
            "Protects the newborn from pertussis (whooping cough).",
        ),
        category: EventCategory::Medication,
        start_week: 27,
        end_week: 36,
        is_critical: false,
    },
    ClinicalEvent {
        id: "fetal-movement-monitoring",
        name: text("شمارش حرکات جنین", "Kick Counts / Fetal Movement Monitoring"),
        description: text(
            "نظارت مادر بر سلامت جنین.",
            "Maternal monitoring of fetal well-being.",
        ),
        category: EventCategory::Counseling,
        start_week: 28,
        end_week: 42,
        is_critical: false,
    },
    ClinicalEvent {
        id: "gbs-screening",
        name: text("غربالگری استرپتوکوک گروه B (GBS)", "Group B Strep (GBS) Screening"),
        description: text(
            "نمونه‌برداری برای بررسی باکتری GBS جهت جلوگیری از عفونت نوزاد.",
            "Swab to check for GBS bacteria to prevent newborn infection.",
        ),
        category: EventCategory::Screening,
        start_week: 36,
        end_week: 37,
        is_critical: true,
    },
    ClinicalEvent {
        id: "biophysical-profile",
        name: text("بیوفیزیکال پروفایل (BPP)", "Biophysical Profile (BPP)"),
        description: text(
            "سونوگرافی برای ارزیابی سلامت جنین در بارداری‌های پرخطر.",
            "Ultrasound to assess fetal well-being in high-risk pregnancies.",
        ),
        category: EventCategory::Ultrasound,
        start_week: 32,
        end_week: 42,
        is_critical: false,
    },
    ClinicalEvent {
        id: "labor-signs-counseling",
        name: text("مشاوره علائم زایمان", "Counseling on Labor Signs"),
        description: text(
            "آموزش علائم زایمان واقعی و زمان مراجعه به بیمارستان.",
            "Educating on signs of true labor, when to go to the hospital.",
        ),
        category: EventCategory::Counseling,
        start_week: 36,
        end_week: 42,
        is_critical: false,
    },
    ClinicalEvent {
        id: "induction-discussion",
        name: text("بحث در مورد القای زایمان", "Induction of Labor Discussion"),
        description: text(
            "بحث در مورد بارداری‌هایی که از ۴۱ هفته فراتر می‌روند.",
            "Discussion for pregnancies extending beyond 41 weeks.",
        ),
        category: EventCategory::Milestone,
        start_week: 41,
        end_week: 42,
        is_critical: false,
    },
];

pub const FIRST_TRIMESTER_RED_FLAGS: &[RedFlag] = &[
    RedFlag {
        title: text("خونریزی واژینال", "Vaginal Bleeding"),
        details: text(
            "هرگونه خونریزی باید ارزیابی شود. می‌تواند نشانه سقط یا حاملگی خارج رحمی باشد.",
            "Any bleeding should be evaluated. Can indicate miscarriage or ectopic pregnancy.",
        ),
        symptoms: &[
            text("لکه بینی یا خونریزی شدید", "Spotting or heavy bleeding"),
            text("درد یا گرفتگی شکم", "Abdominal cramping or pain"),
        ],
    },
    RedFlag {
        title: text("تهوع و استفراغ شدید", "Severe Nausea/Vomiting"),
        details: text(
            "هیپرامزیس گراویداروم می‌تواند منجر به کم‌آبی و کاهش وزن شود.",
            "Hyperemesis Gravidarum can lead to dehydration and weight loss.",
        ),
        symptoms: &[
            text("ناتوانی در نگه داشتن مایعات برای بیش از ۱۲ ساعت", "Inability to keep down fluids for >12 hours"),
            text("کاهش وزن قابل توجه", "Significant weight loss"),
        ],
    },
    RedFlag {
        title: text("علائم حاملگی خارج رحمی", "Ectopic Pregnancy Signs"),
        details: text(
            "یک اورژانس تهدیدکننده حیات که در آن جنین خارج از رحم رشد می‌کند.",
            "A life-threatening emergency where the fetus grows outside the uterus.",
        ),
        symptoms: &[
            text("درد شدید و یک طرفه شکم", "Sharp, one-sided abdominal pain"),
            text("درد سرشانه", "Shoulder tip pain"),
            text("سرگیجه یا غش", "Dizziness or fainting"),
        ],
    },
];

pub const SECOND_TRIMESTER_RED_FLAGS: &[RedFlag] = &[
    RedFlag {
        title: text("علائم پره‌اکلامپسی", "Preeclampsia Signs"),
        details: text(
            "یک اختلال فشار خون جدی که نیاز به توجه فوری دارد.",
            "A serious blood pressure disorder. Requires immediate attention.",
        ),
        symptoms: &[
            text("سردرد شدیدی که برطرف نمی‌شود", "Severe headache that won't go away"),
            text("تغییرات بینایی (تاری دید، دیدن لکه‌ها)", "Vision changes (blurriness, spots)"),
            text("درد ربع فوقانی راست شکم (RUQ)", "Upper right quadrant (RUQ) abdominal pain"),
            text("تورم ناگهانی دست‌ها/صورت", "Sudden swelling of hands/face"),
        ],
    },
    RedFlag {
        title: text("علائم زایمان زودرس", "Preterm Labor Signs"),
        details: text(
            "زایمانی که قبل از هفته ۳۷ بارداری شروع می‌شود.",
            "Labor that begins before 37 weeks of pregnancy.",
        ),
        symptoms: &[
            text("انقباضات منظم (هر ۱۰ دقیقه یا کمتر)", "Regular contractions (every 10 min or closer)"),
            text("کمردرد مداوم و مبهم", "Constant low, dull backache"),
            text("فشار در لگن", "Pelvic pressure"),
            text("نشت مایع یا خونریزی واژینال", "Leaking fluid or vaginal bleeding"),
        ],
    },
    RedFlag {
        title: text("کاهش حرکات جنین", "Decreased Fetal Movement"),
        details: text(
            "پس از شروع حرکات، کاهش قابل توجه نیاز به ارزیابی دارد.",
            "Once movement is established, a significant reduction needs evaluation.",
        ),
        symptoms: &[
            text("کمتر از ۱۰ حرکت در ۲ ساعت (بعد از هفته ۲۸)", "Fewer than 10 movements in 2 hours (after 28 weeks)"),
        ],
    },
];

pub const THIRD_TRIMESTER_RED_FLAGS: &[RedFlag] = &[
    RedFlag {
        title: text("پره‌اکلامپسی / سندرم HELLP", "Preeclampsia / HELLP Syndrome"),
        details: text(
            "پیشرفت پره‌اکلامپسی می‌تواند سریع و خطرناک باشد.",
            "Progression of preeclampsia can be rapid and dangerous.",
        ),
        symptoms: &[
            text("سردرد شدید", "Severe headache"),
            text("تغییرات بینایی", "Vision changes"),
            text("درد RUQ", "RUQ pain"),
            text("تهوع/استفراغ", "Nausea/vomiting"),
            text("تنگی نفس", "Shortness of breath"),
        ],
    },
    RedFlag {
        title: text("دکولمان جفت", "Placental Abruption"),
        details: text(
            "جدا شدن جفت از دیواره رحم. یک وضعیت اورژانسی.",
            "The placenta separates from the uterine wall. An emergency.",
        ),
        symptoms: &[
            text("درد ناگهانی و مداوم شکم یا کمر", "Sudden, constant abdominal or back pain"),
            text("خونریزی واژینال (ممکن است وجود نداشته باشد)", "Vaginal bleeding (can be absent)"),
            text("حساسیت یا سفتی رحم", "Uterine tenderness or rigidity"),
        ],
    },
    RedFlag {
        title: text("پارگی کیسه آب (PPROM/PROM)", "Rupture of Membranes (PPROM/PROM)"),
        details: text(
            "پاره شدن کیسه آب قبل از شروع دردهای زایمان.",
            "Water breaking before labor starts.",
        ),
        symptoms: &[
            text("خروج ناگهانی یا نشت قطره‌ای مایع از واژن", "A gush or a steady trickle of fluid from the vagina"),
        ],
    },
    RedFlag {
        title: text("کاهش حرکات جنین", "Decreased Fetal Movement"),
        details: text(
            "یک شاخص کلیدی برای سلامت جنین.",
            "A key indicator of fetal well-being.",
        ),
        symptoms: &[
            text("کمتر از ۱۰ حرکت در ۲ ساعت", "Fewer than 10 movements in 2 hours"),
        ],
    },
];
