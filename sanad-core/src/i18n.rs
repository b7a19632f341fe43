//! Bilingual message catalog.
//!
//! The catalog covers the strings the wizard, the validation layer, the CLI
//! and the server actually consume. Lookup falls back to English and then to
//! the key itself, so an untranslated key degrades visibly instead of
//! crashing.

use serde::{Deserialize, Serialize};

/// UI language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Ar,
}

impl Language {
    pub fn as_str(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Ar => "ar",
        }
    }

    /// Arabic renders right-to-left.
    pub fn is_rtl(self) -> bool {
        matches!(self, Language::Ar)
    }

    /// Parse a language tag, defaulting to English for anything unknown.
    pub fn from_tag(tag: &str) -> Self {
        match tag.trim().to_ascii_lowercase().as_str() {
            "ar" => Language::Ar,
            _ => Language::En,
        }
    }
}

/// Look up a catalog string. Unknown keys come back verbatim.
pub fn translate(language: Language, key: &str) -> &str {
    let table = match language {
        Language::En => EN,
        Language::Ar => AR,
    };
    table
        .iter()
        .find(|(k, _)| *k == key)
        .or_else(|| EN.iter().find(|(k, _)| *k == key))
        .map(|(_, v)| *v)
        .unwrap_or(key)
}

static EN: &[(&str, &str)] = &[
    ("applicationTitle", "Social Support Application"),
    ("step", "Step"),
    ("of", "of"),
    ("next", "Next"),
    ("previous", "Previous"),
    ("submit", "Submit Application"),
    ("saving", "Saving..."),
    ("submitting", "Submitting..."),
    ("applicationSubmitted", "Application Submitted Successfully!"),
    ("applicationNumber", "Your application number is"),
    ("error", "An error occurred. Please try again."),
    ("helpMeWrite", "Help Me Write"),
    ("aiSuggestion", "AI Suggestion"),
    ("accept", "Accept"),
    ("edit", "Edit"),
    ("discard", "Discard"),
    ("required", "This field is required"),
    ("invalidEmail", "Invalid email address"),
    ("invalidPhone", "Invalid phone number"),
    ("dateCannotBeFuture", "Date cannot be in the future"),
    ("invalidDateOfBirth", "Please enter a valid date of birth"),
    ("minLength", "Please provide at least 50 characters"),
    ("provideBasicInfo", "Please provide your basic information"),
    ("completeInSteps", "Complete your application in a few simple steps"),
    // Step 1
    ("personalInformation", "Personal Information"),
    ("name", "Full Name"),
    ("nationalId", "National ID"),
    ("dateOfBirth", "Date of Birth"),
    ("gender", "Gender"),
    ("male", "Male"),
    ("female", "Female"),
    ("address", "Address"),
    ("city", "City"),
    ("state", "State"),
    ("country", "Country"),
    ("phone", "Phone Number"),
    ("email", "Email Address"),
    // Step 2
    ("familyFinancialInfo", "Family & Financial Information"),
    ("maritalStatus", "Marital Status"),
    ("single", "Single"),
    ("married", "Married"),
    ("divorced", "Divorced"),
    ("widowed", "Widowed"),
    ("dependents", "Number of Dependents"),
    ("employmentStatus", "Employment Status"),
    ("employed", "Employed"),
    ("unemployed", "Unemployed"),
    ("selfEmployed", "Self-Employed"),
    ("retired", "Retired"),
    ("monthlyIncome", "Monthly Income"),
    ("housingStatus", "Housing Status"),
    ("owned", "Owned"),
    ("rented", "Rented"),
    ("withFamily", "Living with Family"),
    // Step 3
    ("situationDescriptions", "Situation Descriptions"),
    ("currentSituation", "Current Financial Situation"),
    ("employmentCircumstances", "Employment Circumstances"),
    ("reasonForApplying", "Reason for Applying"),
    // Step 4
    ("reviewAndSubmit", "Review and Submit"),
    ("reviewYourInfo", "Please review your information carefully before submitting"),
    ("readyToSubmit", "Ready to Submit?"),
    (
        "submitWarning",
        "Please ensure all information is correct as changes cannot be made after submission.",
    ),
    ("submitApplication", "Submit Application"),
    // Draft assist
    (
        "assistWriteFirst",
        "Please write at least a few words first, then I can help improve your text.",
    ),
    (
        "assistUnavailable",
        "Sorry, I could not generate a suggestion at this time. Please try again.",
    ),
];

static AR: &[(&str, &str)] = &[
    ("applicationTitle", "طلب الدعم الاجتماعي"),
    ("step", "الخطوة"),
    ("of", "من"),
    ("next", "التالي"),
    ("previous", "السابق"),
    ("submit", "إرسال الطلب"),
    ("saving", "جاري الحفظ..."),
    ("submitting", "جاري الإرسال..."),
    ("applicationSubmitted", "تم إرسال الطلب بنجاح!"),
    ("applicationNumber", "رقم طلبك هو"),
    ("error", "حدث خطأ. يرجى المحاولة مرة أخرى."),
    ("helpMeWrite", "ساعدني في الكتابة"),
    ("aiSuggestion", "اقتراح الذكاء الاصطناعي"),
    ("accept", "قبول"),
    ("edit", "تعديل"),
    ("discard", "رفض"),
    ("required", "هذا الحقل مطلوب"),
    ("invalidEmail", "عنوان البريد الإلكتروني غير صالح"),
    ("invalidPhone", "رقم الهاتف غير صالح"),
    ("dateCannotBeFuture", "لا يمكن أن يكون التاريخ في المستقبل"),
    ("invalidDateOfBirth", "يرجى إدخال تاريخ ميلاد صحيح"),
    ("minLength", "يرجى كتابة 50 حرفاً على الأقل"),
    ("provideBasicInfo", "يرجى تقديم معلوماتك الأساسية"),
    ("completeInSteps", "أكمل طلبك في خطوات بسيطة"),
    // Step 1
    ("personalInformation", "المعلومات الشخصية"),
    ("name", "الاسم الكامل"),
    ("nationalId", "الهوية الوطنية"),
    ("dateOfBirth", "تاريخ الميلاد"),
    ("gender", "الجنس"),
    ("male", "ذكر"),
    ("female", "أنثى"),
    ("address", "العنوان"),
    ("city", "المدينة"),
    ("state", "المحافظة"),
    ("country", "الدولة"),
    ("phone", "رقم الهاتف"),
    ("email", "البريد الإلكتروني"),
    // Step 2
    ("familyFinancialInfo", "معلومات الأسرة والمالية"),
    ("maritalStatus", "الحالة الاجتماعية"),
    ("single", "أعزب"),
    ("married", "متزوج"),
    ("divorced", "مطلق"),
    ("widowed", "أرمل"),
    ("dependents", "عدد المعالين"),
    ("employmentStatus", "حالة التوظيف"),
    ("employed", "موظف"),
    ("unemployed", "عاطل عن العمل"),
    ("selfEmployed", "عمل حر"),
    ("retired", "متقاعد"),
    ("monthlyIncome", "الدخل الشهري"),
    ("housingStatus", "وضع السكن"),
    ("owned", "ملك"),
    ("rented", "إيجار"),
    ("withFamily", "مع العائلة"),
    // Step 3
    ("situationDescriptions", "وصف الحالة"),
    ("currentSituation", "الوضع المالي الحالي"),
    ("employmentCircumstances", "ظروف العمل"),
    ("reasonForApplying", "سبب التقديم"),
    // Step 4
    ("reviewAndSubmit", "مراجعة وإرسال"),
    ("reviewYourInfo", "يرجى مراجعة معلوماتك بعناية قبل الإرسال"),
    ("readyToSubmit", "جاهز للإرسال؟"),
    (
        "submitWarning",
        "يرجى التأكد من صحة جميع المعلومات حيث لا يمكن إجراء تغييرات بعد الإرسال.",
    ),
    ("submitApplication", "إرسال الطلب"),
    // Draft assist
    (
        "assistWriteFirst",
        "يرجى كتابة بضع كلمات على الأقل أولاً، ثم يمكنني مساعدتك في تحسين النص.",
    ),
    (
        "assistUnavailable",
        "عذراً، لم أتمكن من إنشاء اقتراح في هذا الوقت. يرجى المحاولة مرة أخرى.",
    ),
];
