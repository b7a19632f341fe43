//! Draft-assist prompt construction.
//!
//! The assist endpoint forwards an applicant's text to a chat-completion
//! model under a system instruction that varies by UI language and by how
//! strictly the deployment scopes the feature: financial topics only, any
//! life hardship, or unrestricted. The instruction texts live in
//! `prompts/` and redirect out-of-scope input with a fixed guidance message
//! instead of failing.

use std::str::FromStr;

use crate::i18n::Language;

/// Completion budget for a suggestion.
pub const ASSIST_MAX_TOKENS: u32 = 300;

/// Sampling temperature for suggestions.
pub const ASSIST_TEMPERATURE: f32 = 0.7;

/// Relayed when the model answers with no choices.
pub const FALLBACK_SUGGESTION: &str = "Unable to generate suggestion";

/// How strictly the assist feature scopes acceptable input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AssistScope {
    /// Only financial matters (income, debts, expenses, ...).
    #[default]
    FinancialOnly,
    /// Any life hardship (unemployment, illness, housing, ...).
    LifeHardship,
    /// No topical restriction.
    Unrestricted,
}

impl AssistScope {
    pub fn as_str(self) -> &'static str {
        match self {
            AssistScope::FinancialOnly => "financial",
            AssistScope::LifeHardship => "hardship",
            AssistScope::Unrestricted => "open",
        }
    }
}

impl FromStr for AssistScope {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "financial" => Ok(AssistScope::FinancialOnly),
            "hardship" => Ok(AssistScope::LifeHardship),
            "open" => Ok(AssistScope::Unrestricted),
            other => anyhow::bail!(
                "unknown assist scope {other:?} (expected financial, hardship or open)"
            ),
        }
    }
}

/// The system instruction for a given language and scope.
pub fn system_prompt(language: Language, scope: AssistScope) -> &'static str {
    match (language, scope) {
        (Language::En, AssistScope::FinancialOnly) => {
            include_str!("../prompts/assist_en_financial.txt")
        }
        (Language::Ar, AssistScope::FinancialOnly) => {
            include_str!("../prompts/assist_ar_financial.txt")
        }
        (Language::En, AssistScope::LifeHardship) => {
            include_str!("../prompts/assist_en_hardship.txt")
        }
        (Language::Ar, AssistScope::LifeHardship) => {
            include_str!("../prompts/assist_ar_hardship.txt")
        }
        (Language::En, AssistScope::Unrestricted) => include_str!("../prompts/assist_en_open.txt"),
        (Language::Ar, AssistScope::Unrestricted) => include_str!("../prompts/assist_ar_open.txt"),
    }
}
