//! Registration records and their identifiers.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Whether the participant registers alone or with a partner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TeamPreference {
    #[default]
    Solo,
    WithPartner,
}

impl TeamPreference {
    /// Maps the select's raw value; anything but `WithPartner` is solo
    pub fn from_form_value(value: &str) -> Self {
        match value.trim() {
            "WithPartner" => TeamPreference::WithPartner,
            _ => TeamPreference::Solo,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TeamPreference::Solo => "Solo",
            TeamPreference::WithPartner => "WithPartner",
        }
    }
}

/// One participant's registration as it is persisted
///
/// Field order matters: it is the column order of CSV exports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub roll_number: String,
    pub batch: String,
    pub branch: String,
    pub semester: String,
    pub experience: String,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub motivation: Option<String>,
    pub team_preference: TeamPreference,
    #[serde(default)]
    pub partner_name: Option<String>,
    pub preferred_role: String,
    #[serde(default)]
    pub achievements: Option<String>,
    #[serde(default)]
    pub special_requirements: Option<String>,
    #[serde(default)]
    pub newsletter: bool,
    pub timestamp: DateTime<Utc>,
}

/// Turns a blank optional text into `None`
pub fn optional_text(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Identifier handed to the participant after a successful save
///
/// Format: prefix followed by the upper-cased base-36 epoch milliseconds of
/// the creation instant, e.g. `MIT-DB-LZ1K9Q2A`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegistrationId(String);

impl RegistrationId {
    pub fn from_millis(prefix: &str, millis: i64) -> Self {
        // Pre-epoch instants cannot come from a real clock
        let millis = u64::try_from(millis).unwrap_or(0);
        Self(format!("{}{}", prefix, to_base36(millis).to_uppercase()))
    }

    pub fn from_instant(prefix: &str, instant: DateTime<Utc>) -> Self {
        Self::from_millis(prefix, instant.timestamp_millis())
    }

    /// Wraps an identifier recovered from a storage key
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RegistrationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn to_base36(mut value: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

    if value == 0 {
        return "0".to_string();
    }

    let mut out = Vec::new();
    while value > 0 {
        out.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    out.reverse();
    // Only ASCII digits were pushed
    String::from_utf8(out).unwrap_or_default()
}

/// A stored submission together with the identifier recovered from its key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationRecord {
    #[serde(flatten)]
    pub submission: Submission,
    pub registration_id: RegistrationId,
}

/// Source of "now" for timestamps, identifiers and export file names
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock pinned to one instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
