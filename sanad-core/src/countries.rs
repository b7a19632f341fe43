//! Curated country lookup table.
//!
//! A fixed list of countries with English and Arabic names. The first block
//! is the "popular" set surfaced at the top of the country picker; the rest
//! are listed alphabetically-ish by region as the product team ordered them.

use crate::i18n::Language;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Country {
    /// ISO 3166-1 alpha-2 code.
    pub code: &'static str,
    pub name: &'static str,
    pub name_ar: &'static str,
    /// Surfaced in the "Popular Countries" section of the picker.
    pub popular: bool,
}

pub static COUNTRIES: &[Country] = &[
    // Popular countries (top 10)
    Country { code: "AE", name: "United Arab Emirates", name_ar: "الإمارات العربية المتحدة", popular: true },
    Country { code: "SA", name: "Saudi Arabia", name_ar: "المملكة العربية السعودية", popular: true },
    Country { code: "QA", name: "Qatar", name_ar: "قطر", popular: true },
    Country { code: "KW", name: "Kuwait", name_ar: "الكويت", popular: true },
    Country { code: "BH", name: "Bahrain", name_ar: "البحرين", popular: true },
    Country { code: "OM", name: "Oman", name_ar: "عُمان", popular: true },
    Country { code: "EG", name: "Egypt", name_ar: "مصر", popular: true },
    Country { code: "JO", name: "Jordan", name_ar: "الأردن", popular: true },
    Country { code: "LB", name: "Lebanon", name_ar: "لبنان", popular: true },
    Country { code: "IQ", name: "Iraq", name_ar: "العراق", popular: true },
    // All other countries
    Country { code: "SY", name: "Syria", name_ar: "سوريا", popular: false },
    Country { code: "YE", name: "Yemen", name_ar: "اليمن", popular: false },
    Country { code: "PS", name: "Palestine", name_ar: "فلسطين", popular: false },
    Country { code: "MA", name: "Morocco", name_ar: "المغرب", popular: false },
    Country { code: "DZ", name: "Algeria", name_ar: "الجزائر", popular: false },
    Country { code: "TN", name: "Tunisia", name_ar: "تونس", popular: false },
    Country { code: "SD", name: "Sudan", name_ar: "السودان", popular: false },
    Country { code: "LY", name: "Libya", name_ar: "ليبيا", popular: false },
    Country { code: "US", name: "United States", name_ar: "الولايات المتحدة الأمريكية", popular: false },
    Country { code: "GB", name: "United Kingdom", name_ar: "المملكة المتحدة", popular: false },
    Country { code: "CA", name: "Canada", name_ar: "كندا", popular: false },
    Country { code: "AU", name: "Australia", name_ar: "أستراليا", popular: false },
    Country { code: "DE", name: "Germany", name_ar: "ألمانيا", popular: false },
    Country { code: "FR", name: "France", name_ar: "فرنسا", popular: false },
    Country { code: "IT", name: "Italy", name_ar: "إيطاليا", popular: false },
    Country { code: "ES", name: "Spain", name_ar: "إسبانيا", popular: false },
    Country { code: "NL", name: "Netherlands", name_ar: "هولندا", popular: false },
    Country { code: "BE", name: "Belgium", name_ar: "بلجيكا", popular: false },
    Country { code: "CH", name: "Switzerland", name_ar: "سويسرا", popular: false },
    Country { code: "AT", name: "Austria", name_ar: "النمسا", popular: false },
    Country { code: "SE", name: "Sweden", name_ar: "السويد", popular: false },
    Country { code: "NO", name: "Norway", name_ar: "النرويج", popular: false },
    Country { code: "DK", name: "Denmark", name_ar: "الدنمارك", popular: false },
    Country { code: "FI", name: "Finland", name_ar: "فنلندا", popular: false },
    Country { code: "IE", name: "Ireland", name_ar: "أيرلندا", popular: false },
    Country { code: "PT", name: "Portugal", name_ar: "البرتغال", popular: false },
    Country { code: "GR", name: "Greece", name_ar: "اليونان", popular: false },
    Country { code: "PL", name: "Poland", name_ar: "بولندا", popular: false },
    Country { code: "RO", name: "Romania", name_ar: "رومانيا", popular: false },
    Country { code: "CZ", name: "Czech Republic", name_ar: "جمهورية التشيك", popular: false },
    Country { code: "HU", name: "Hungary", name_ar: "المجر", popular: false },
    Country { code: "RU", name: "Russia", name_ar: "روسيا", popular: false },
    Country { code: "UA", name: "Ukraine", name_ar: "أوكرانيا", popular: false },
    Country { code: "TR", name: "Turkey", name_ar: "تركيا", popular: false },
    Country { code: "CN", name: "China", name_ar: "الصين", popular: false },
    Country { code: "JP", name: "Japan", name_ar: "اليابان", popular: false },
    Country { code: "KR", name: "South Korea", name_ar: "كوريا الجنوبية", popular: false },
    Country { code: "IN", name: "India", name_ar: "الهند", popular: false },
    Country { code: "PK", name: "Pakistan", name_ar: "باكستان", popular: false },
    Country { code: "BD", name: "Bangladesh", name_ar: "بنغلاديش", popular: false },
    Country { code: "PH", name: "Philippines", name_ar: "الفلبين", popular: false },
    Country { code: "ID", name: "Indonesia", name_ar: "إندونيسيا", popular: false },
    Country { code: "MY", name: "Malaysia", name_ar: "ماليزيا", popular: false },
    Country { code: "SG", name: "Singapore", name_ar: "سنغافورة", popular: false },
    Country { code: "TH", name: "Thailand", name_ar: "تايلاند", popular: false },
    Country { code: "VN", name: "Vietnam", name_ar: "فيتنام", popular: false },
    Country { code: "NZ", name: "New Zealand", name_ar: "نيوزيلندا", popular: false },
    Country { code: "LK", name: "Sri Lanka", name_ar: "سريلانكا", popular: false },
    Country { code: "NP", name: "Nepal", name_ar: "نيبال", popular: false },
    Country { code: "IR", name: "Iran", name_ar: "إيران", popular: false },
    Country { code: "AF", name: "Afghanistan", name_ar: "أفغانستان", popular: false },
    Country { code: "ZA", name: "South Africa", name_ar: "جنوب أفريقيا", popular: false },
    Country { code: "NG", name: "Nigeria", name_ar: "نيجيريا", popular: false },
    Country { code: "KE", name: "Kenya", name_ar: "كينيا", popular: false },
    Country { code: "ET", name: "Ethiopia", name_ar: "إثيوبيا", popular: false },
    Country { code: "GH", name: "Ghana", name_ar: "غانا", popular: false },
    Country { code: "TZ", name: "Tanzania", name_ar: "تنزانيا", popular: false },
    Country { code: "UG", name: "Uganda", name_ar: "أوغندا", popular: false },
    Country { code: "MX", name: "Mexico", name_ar: "المكسيك", popular: false },
    Country { code: "BR", name: "Brazil", name_ar: "البرازيل", popular: false },
    Country { code: "AR", name: "Argentina", name_ar: "الأرجنتين", popular: false },
    Country { code: "CL", name: "Chile", name_ar: "تشيلي", popular: false },
    Country { code: "CO", name: "Colombia", name_ar: "كولومبيا", popular: false },
    Country { code: "PE", name: "Peru", name_ar: "بيرو", popular: false },
    Country { code: "VE", name: "Venezuela", name_ar: "فنزويلا", popular: false },
    Country { code: "HR", name: "Croatia", name_ar: "كرواتيا", popular: false },
    Country { code: "RS", name: "Serbia", name_ar: "صربيا", popular: false },
    Country { code: "BG", name: "Bulgaria", name_ar: "بلغاريا", popular: false },
    Country { code: "SK", name: "Slovakia", name_ar: "سلوفاكيا", popular: false },
    Country { code: "SI", name: "Slovenia", name_ar: "سلوفينيا", popular: false },
];

/// Look up a country by its alpha-2 code, case-insensitively.
pub fn get_by_code(code: &str) -> Option<&'static Country> {
    COUNTRIES
        .iter()
        .find(|c| c.code.eq_ignore_ascii_case(code))
}

/// The countries surfaced in the "Popular Countries" section, in table order.
pub fn popular() -> Vec<&'static Country> {
    COUNTRIES.iter().filter(|c| c.popular).collect()
}

/// Case-insensitive substring search over names and codes.
///
/// The active language's name is checked first, but a hit on the other
/// language's name or the code also matches, so a user typing Latin letters
/// on the Arabic UI still finds their country. An empty query returns the
/// whole table.
pub fn search(query: &str, language: Language) -> Vec<&'static Country> {
    let term = query.trim().to_lowercase();
    if term.is_empty() {
        return COUNTRIES.iter().collect();
    }

    COUNTRIES
        .iter()
        .filter(|c| {
            let primary = match language {
                Language::Ar => c.name_ar,
                Language::En => c.name,
            };
            primary.to_lowercase().contains(&term)
                || c.code.to_lowercase().contains(&term)
                || c.name.to_lowercase().contains(&term)
                || c.name_ar.contains(&term)
        })
        .collect()
}
