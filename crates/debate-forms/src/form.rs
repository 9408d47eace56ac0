// File: src/form.rs
// Purpose: Field identifiers, required-field schema and validation results

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Every named control of the registration form, in document order
///
/// The derived `Ord` follows declaration order, so sorted collections of
/// fields iterate top to bottom the way the page renders them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldId {
    FullName,
    Email,
    Phone,
    RollNumber,
    Batch,
    Branch,
    Semester,
    Experience,
    Interests,
    Motivation,
    TeamPreference,
    PartnerName,
    PreferredRole,
    Achievements,
    SpecialRequirements,
    Newsletter,
    Agreement,
}

/// How a control stores its value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    TextArea,
    Select,
    Checkbox,
    CheckboxGroup,
}

impl FieldId {
    pub const ALL: [FieldId; 17] = [
        FieldId::FullName,
        FieldId::Email,
        FieldId::Phone,
        FieldId::RollNumber,
        FieldId::Batch,
        FieldId::Branch,
        FieldId::Semester,
        FieldId::Experience,
        FieldId::Interests,
        FieldId::Motivation,
        FieldId::TeamPreference,
        FieldId::PartnerName,
        FieldId::PreferredRole,
        FieldId::Achievements,
        FieldId::SpecialRequirements,
        FieldId::Newsletter,
        FieldId::Agreement,
    ];

    /// The control's `name`/`id` attribute on the page
    pub fn name(self) -> &'static str {
        match self {
            FieldId::FullName => "fullName",
            FieldId::Email => "email",
            FieldId::Phone => "phone",
            FieldId::RollNumber => "rollNumber",
            FieldId::Batch => "batch",
            FieldId::Branch => "branch",
            FieldId::Semester => "semester",
            FieldId::Experience => "experience",
            FieldId::Interests => "interests",
            FieldId::Motivation => "motivation",
            FieldId::TeamPreference => "teamPreference",
            FieldId::PartnerName => "partnerName",
            FieldId::PreferredRole => "preferredRole",
            FieldId::Achievements => "achievements",
            FieldId::SpecialRequirements => "specialRequirements",
            FieldId::Newsletter => "newsletter",
            FieldId::Agreement => "agreement",
        }
    }

    pub fn kind(self) -> FieldKind {
        match self {
            FieldId::Batch
            | FieldId::Branch
            | FieldId::Semester
            | FieldId::Experience
            | FieldId::TeamPreference
            | FieldId::PreferredRole => FieldKind::Select,
            FieldId::Motivation | FieldId::Achievements | FieldId::SpecialRequirements => {
                FieldKind::TextArea
            }
            FieldId::Newsletter | FieldId::Agreement => FieldKind::Checkbox,
            FieldId::Interests => FieldKind::CheckboxGroup,
            _ => FieldKind::Text,
        }
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for FieldId {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FieldId::ALL
            .iter()
            .copied()
            .find(|field| field.name() == s)
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

/// Returned when a UI event names a control this form does not have
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown form field: {0}")]
pub struct UnknownField(pub String);

/// Visual validation state of a control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldMark {
    #[default]
    Neutral,
    Valid,
    Invalid,
}

/// Fields carrying the `required` attribute when the page loads
pub const DEFAULT_REQUIRED: [FieldId; 11] = [
    FieldId::FullName,
    FieldId::Email,
    FieldId::Phone,
    FieldId::RollNumber,
    FieldId::Batch,
    FieldId::Branch,
    FieldId::Semester,
    FieldId::Experience,
    FieldId::TeamPreference,
    FieldId::PreferredRole,
    FieldId::Agreement,
];

/// Which fields are currently required
///
/// Only the partner name moves in and out of this set at runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSchema {
    required: BTreeSet<FieldId>,
}

impl FormSchema {
    pub fn new() -> Self {
        Self {
            required: DEFAULT_REQUIRED.into_iter().collect(),
        }
    }

    pub fn is_required(&self, field: FieldId) -> bool {
        self.required.contains(&field)
    }

    pub fn set_required(&mut self, field: FieldId, required: bool) {
        if required {
            self.required.insert(field);
        } else {
            self.required.remove(&field);
        }
    }

    /// Required fields in document order
    pub fn required_fields(&self) -> impl Iterator<Item = FieldId> + '_ {
        self.required.iter().copied()
    }

    pub fn required_count(&self) -> usize {
        self.required.len()
    }
}

impl Default for FormSchema {
    fn default() -> Self {
        Self::new()
    }
}

/// Outcome of a full-form check: every failed field with its messages
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    errors: BTreeMap<FieldId, Vec<String>>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: FieldId, message: impl Into<String>) {
        self.errors.entry(field).or_default().push(message.into());
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn is_invalid(&self, field: FieldId) -> bool {
        self.errors.contains_key(&field)
    }

    /// First failed field in document order
    pub fn first_invalid(&self) -> Option<FieldId> {
        self.errors.keys().next().copied()
    }

    pub fn invalid_fields(&self) -> impl Iterator<Item = FieldId> + '_ {
        self.errors.keys().copied()
    }

    pub fn messages(&self, field: FieldId) -> &[String] {
        self.errors.get(&field).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Errors keyed by the control's page name
    pub fn to_map(&self) -> BTreeMap<String, Vec<String>> {
        self.errors
            .iter()
            .map(|(field, messages)| (field.name().to_string(), messages.clone()))
            .collect()
    }
}
