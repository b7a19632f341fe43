//! Application draft data model.
//!
//! The draft holds the accumulated answers for all four wizard steps. The set
//! of fields is fixed and known in advance; serde renames keep the persisted
//! JSON keys identical to the mirror layout consumed by older sessions.
//! Following the principle of "make illegal states unrepresentable", step
//! numbers are a newtype that cannot leave the `[1, 4]` range.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the four wizard steps. Always within `[1, 4]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Step(u8);

impl Step {
    /// Personal information.
    pub const FIRST: Step = Step(1);
    /// Review and submit.
    pub const LAST: Step = Step(4);

    /// Clamp an arbitrary requested step into the valid range.
    pub fn clamp(requested: i64) -> Self {
        if requested <= i64::from(Self::FIRST.0) {
            Self::FIRST
        } else if requested >= i64::from(Self::LAST.0) {
            Self::LAST
        } else {
            Step(requested as u8)
        }
    }

    /// The following step, saturating at the last one.
    pub fn next(self) -> Self {
        Step(self.0.saturating_add(1).min(Self::LAST.0))
    }

    /// The preceding step, saturating at the first one.
    pub fn prev(self) -> Self {
        Step(self.0.saturating_sub(1).max(Self::FIRST.0))
    }

    /// 1-based step number.
    pub fn number(self) -> u8 {
        self.0
    }

    /// Parse the persisted step mirror (a bare decimal string).
    ///
    /// Anything that is not a number in `[1, 4]` is treated as "no saved
    /// step" so a corrupted mirror falls back to the default.
    pub fn from_mirror(raw: &str) -> Option<Self> {
        match raw.trim().parse::<u8>() {
            Ok(n) if (Self::FIRST.0..=Self::LAST.0).contains(&n) => Some(Step(n)),
            _ => None,
        }
    }

    /// The persisted step mirror representation.
    pub fn to_mirror(self) -> String {
        self.0.to_string()
    }
}

impl Default for Step {
    fn default() -> Self {
        Self::FIRST
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifies a single draft field.
///
/// `as_str` returns the wire/mirror key (camelCase, matching the persisted
/// JSON), and `step` says which wizard step the field belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    NationalId,
    DateOfBirth,
    Gender,
    Address,
    City,
    State,
    Country,
    Phone,
    Email,
    MaritalStatus,
    Dependents,
    EmploymentStatus,
    MonthlyIncome,
    HousingStatus,
    CurrentSituation,
    EmploymentCircumstances,
    ReasonForApplying,
}

impl Field {
    /// Every draft field, in form order.
    pub const ALL: [Field; 18] = [
        Field::Name,
        Field::NationalId,
        Field::DateOfBirth,
        Field::Gender,
        Field::Address,
        Field::City,
        Field::State,
        Field::Country,
        Field::Phone,
        Field::Email,
        Field::MaritalStatus,
        Field::Dependents,
        Field::EmploymentStatus,
        Field::MonthlyIncome,
        Field::HousingStatus,
        Field::CurrentSituation,
        Field::EmploymentCircumstances,
        Field::ReasonForApplying,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::NationalId => "nationalId",
            Field::DateOfBirth => "dateOfBirth",
            Field::Gender => "gender",
            Field::Address => "address",
            Field::City => "city",
            Field::State => "state",
            Field::Country => "country",
            Field::Phone => "phone",
            Field::Email => "email",
            Field::MaritalStatus => "maritalStatus",
            Field::Dependents => "dependents",
            Field::EmploymentStatus => "employmentStatus",
            Field::MonthlyIncome => "monthlyIncome",
            Field::HousingStatus => "housingStatus",
            Field::CurrentSituation => "currentSituation",
            Field::EmploymentCircumstances => "employmentCircumstances",
            Field::ReasonForApplying => "reasonForApplying",
        }
    }

    /// The wizard step this field is collected on.
    pub fn step(self) -> Step {
        match self {
            Field::Name
            | Field::NationalId
            | Field::DateOfBirth
            | Field::Gender
            | Field::Address
            | Field::City
            | Field::State
            | Field::Country
            | Field::Phone
            | Field::Email => Step::FIRST,
            Field::MaritalStatus
            | Field::Dependents
            | Field::EmploymentStatus
            | Field::MonthlyIncome
            | Field::HousingStatus => Step(2),
            Field::CurrentSituation
            | Field::EmploymentCircumstances
            | Field::ReasonForApplying => Step(3),
        }
    }

    pub fn parse(name: &str) -> Option<Field> {
        Field::ALL.iter().copied().find(|f| f.as_str() == name)
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The in-progress, not-yet-submitted application data.
///
/// All values are strings exactly as entered; empty string means "not
/// answered yet". `#[serde(default)]` lets a mirror written by an older
/// schema rehydrate with the missing fields empty instead of failing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApplicationDraft {
    // Step 1 - personal information
    pub name: String,
    pub national_id: String,
    pub date_of_birth: String,
    pub gender: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub phone: String,
    pub email: String,
    // Step 2 - family and financial information
    pub marital_status: String,
    pub dependents: String,
    pub employment_status: String,
    pub monthly_income: String,
    pub housing_status: String,
    // Step 3 - situation descriptions
    pub current_situation: String,
    pub employment_circumstances: String,
    pub reason_for_applying: String,
}

impl ApplicationDraft {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::NationalId => &self.national_id,
            Field::DateOfBirth => &self.date_of_birth,
            Field::Gender => &self.gender,
            Field::Address => &self.address,
            Field::City => &self.city,
            Field::State => &self.state,
            Field::Country => &self.country,
            Field::Phone => &self.phone,
            Field::Email => &self.email,
            Field::MaritalStatus => &self.marital_status,
            Field::Dependents => &self.dependents,
            Field::EmploymentStatus => &self.employment_status,
            Field::MonthlyIncome => &self.monthly_income,
            Field::HousingStatus => &self.housing_status,
            Field::CurrentSituation => &self.current_situation,
            Field::EmploymentCircumstances => &self.employment_circumstances,
            Field::ReasonForApplying => &self.reason_for_applying,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::Name => self.name = value,
            Field::NationalId => self.national_id = value,
            Field::DateOfBirth => self.date_of_birth = value,
            Field::Gender => self.gender = value,
            Field::Address => self.address = value,
            Field::City => self.city = value,
            Field::State => self.state = value,
            Field::Country => self.country = value,
            Field::Phone => self.phone = value,
            Field::Email => self.email = value,
            Field::MaritalStatus => self.marital_status = value,
            Field::Dependents => self.dependents = value,
            Field::EmploymentStatus => self.employment_status = value,
            Field::MonthlyIncome => self.monthly_income = value,
            Field::HousingStatus => self.housing_status = value,
            Field::CurrentSituation => self.current_situation = value,
            Field::EmploymentCircumstances => self.employment_circumstances = value,
            Field::ReasonForApplying => self.reason_for_applying = value,
        }
    }

    /// Shallow merge: overwrite only the given fields, leave the rest alone.
    pub fn merge(&mut self, patch: &[(Field, String)]) {
        for (field, value) in patch {
            self.set(*field, value.clone());
        }
    }

    /// True when every field is still at its empty default.
    pub fn is_empty(&self) -> bool {
        Field::ALL.iter().all(|f| self.get(*f).is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_clamp() {
        assert_eq!(Step::clamp(0), Step::FIRST);
        assert_eq!(Step::clamp(-3), Step::FIRST);
        assert_eq!(Step::clamp(1), Step::FIRST);
        assert_eq!(Step::clamp(2).number(), 2);
        assert_eq!(Step::clamp(4), Step::LAST);
        assert_eq!(Step::clamp(10), Step::LAST);
    }

    #[test]
    fn test_step_saturating_navigation() {
        assert_eq!(Step::FIRST.prev(), Step::FIRST);
        assert_eq!(Step::LAST.next(), Step::LAST);
        assert_eq!(Step::FIRST.next().number(), 2);
        assert_eq!(Step::LAST.prev().number(), 3);
    }

    #[test]
    fn test_step_mirror_round_trip() {
        for n in 1..=4 {
            let step = Step::clamp(n);
            assert_eq!(Step::from_mirror(&step.to_mirror()), Some(step));
        }
    }

    #[test]
    fn test_step_mirror_rejects_garbage() {
        assert_eq!(Step::from_mirror("0"), None);
        assert_eq!(Step::from_mirror("5"), None);
        assert_eq!(Step::from_mirror("two"), None);
        assert_eq!(Step::from_mirror(""), None);
    }

    #[test]
    fn test_field_names_round_trip() {
        for field in Field::ALL {
            assert_eq!(Field::parse(field.as_str()), Some(field));
        }
        assert_eq!(Field::parse("notAField"), None);
    }

    #[test]
    fn test_draft_serde_uses_mirror_keys() {
        let mut draft = ApplicationDraft::default();
        draft.set(Field::NationalId, "784-1990-1234567-1");
        let json = serde_json::to_value(&draft).unwrap();
        assert_eq!(json["nationalId"], "784-1990-1234567-1");
        assert!(json.get("national_id").is_none());
    }

    #[test]
    fn test_draft_rehydrates_with_missing_keys() {
        let draft: ApplicationDraft =
            serde_json::from_str(r#"{"name": "Jane", "email": "jane@x.com"}"#).unwrap();
        assert_eq!(draft.name, "Jane");
        assert_eq!(draft.email, "jane@x.com");
        assert_eq!(draft.phone, "");
    }

    #[test]
    fn test_merge_leaves_unrelated_fields() {
        let mut draft = ApplicationDraft::default();
        draft.merge(&[(Field::Name, "John Doe".to_string())]);
        draft.merge(&[(Field::Email, "john@example.com".to_string())]);
        assert_eq!(draft.name, "John Doe");
        assert_eq!(draft.email, "john@example.com");
    }

    #[test]
    fn test_is_empty() {
        let mut draft = ApplicationDraft::default();
        assert!(draft.is_empty());
        draft.set(Field::City, "Dubai");
        assert!(!draft.is_empty());
    }
}
