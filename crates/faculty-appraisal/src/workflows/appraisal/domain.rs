use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Identifier wrapper for a faculty member's appraisal record.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FacultyId(pub String);

impl fmt::Display for FacultyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Academic rank that drives the role policy table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Designation {
    #[serde(rename = "Professor")]
    Professor,
    #[serde(rename = "Associate Professor")]
    AssociateProfessor,
    #[serde(rename = "Assistant Professor")]
    AssistantProfessor,
}

impl Designation {
    pub const fn ordered() -> [Self; 3] {
        [
            Self::Professor,
            Self::AssociateProfessor,
            Self::AssistantProfessor,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Professor => "Professor",
            Self::AssociateProfessor => "Associate Professor",
            Self::AssistantProfessor => "Assistant Professor",
        }
    }
}

impl FromStr for Designation {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let wanted = raw.trim();
        Self::ordered()
            .into_iter()
            .find(|designation| designation.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("unknown designation '{raw}'"))
    }
}

/// Administrative overlay held on top of an academic rank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AdministrativeRole {
    #[serde(rename = "HOD")]
    Hod,
    #[serde(rename = "Dean")]
    Dean,
    #[serde(rename = "Associate Dean")]
    AssociateDean,
    #[serde(rename = "Director")]
    Director,
    #[serde(rename = "Associate Director")]
    AssociateDirector,
}

impl AdministrativeRole {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::Hod,
            Self::Dean,
            Self::AssociateDean,
            Self::Director,
            Self::AssociateDirector,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Hod => "HOD",
            Self::Dean => "Dean",
            Self::AssociateDean => "Associate Dean",
            Self::Director => "Director",
            Self::AssociateDirector => "Associate Director",
        }
    }
}

impl FromStr for AdministrativeRole {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let wanted = raw.trim();
        Self::ordered()
            .into_iter()
            .find(|role| role.label().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| format!("unknown administrative role '{raw}'"))
    }
}

/// Who is being appraised: academic rank plus any administrative overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacultyProfile {
    pub designation: Designation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub administrative_role: Option<AdministrativeRole>,
}

impl FacultyProfile {
    pub const fn academic(designation: Designation) -> Self {
        Self {
            designation,
            administrative_role: None,
        }
    }

    pub const fn with_role(designation: Designation, role: AdministrativeRole) -> Self {
        Self {
            designation,
            administrative_role: Some(role),
        }
    }
}

/// The five independently saved parts of an appraisal form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PartId {
    #[serde(rename = "partA")]
    A,
    #[serde(rename = "partB")]
    B,
    #[serde(rename = "partC")]
    C,
    #[serde(rename = "partD")]
    D,
    #[serde(rename = "partE")]
    E,
}

impl PartId {
    pub const fn ordered() -> [Self; 5] {
        [Self::A, Self::B, Self::C, Self::D, Self::E]
    }

    /// Key used for the part in stored appraisal documents.
    pub const fn document_key(self) -> &'static str {
        match self {
            Self::A => "partA",
            Self::B => "partB",
            Self::C => "partC",
            Self::D => "partD",
            Self::E => "partE",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::A => "Part A",
            Self::B => "Part B",
            Self::C => "Part C",
            Self::D => "Part D",
            Self::E => "Part E",
        }
    }

    pub const fn title(self) -> &'static str {
        match self {
            Self::A => "Academic Involvement",
            Self::B => "Research",
            Self::C => "Self-Development",
            Self::D => "Portfolio",
            Self::E => "Extraordinary Contributions",
        }
    }
}

impl fmt::Display for PartId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PartId {
    type Err = String;

    /// Accepts `a`, `A`, `part-a` and `partA`.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let lowered = raw.trim().to_ascii_lowercase();
        let letter = lowered
            .strip_prefix("part-")
            .or_else(|| lowered.strip_prefix("part"))
            .unwrap_or(&lowered);
        match letter {
            "a" => Ok(Self::A),
            "b" => Ok(Self::B),
            "c" => Ok(Self::C),
            "d" => Ok(Self::D),
            "e" => Ok(Self::E),
            _ => Err(format!("unknown appraisal part '{raw}'")),
        }
    }
}

/// Workflow status as reported by the backend.
///
/// Only `Draft` is editable. Statuses this crate does not know about are kept
/// verbatim in `Other` and are locked like every other non-draft status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FormStatus {
    Draft,
    Submitted,
    Verified,
    Certified,
    SentToDirector,
    Done,
    Other(String),
}

impl FormStatus {
    pub fn label(&self) -> &str {
        match self {
            Self::Draft => "DRAFT",
            Self::Submitted => "SUBMITTED",
            Self::Verified => "VERIFIED",
            Self::Certified => "CERTIFIED",
            Self::SentToDirector => "SENT_TO_DIRECTOR",
            Self::Done => "DONE",
            Self::Other(raw) => raw,
        }
    }

    pub fn is_editable(&self) -> bool {
        matches!(self, Self::Draft)
    }
}

impl From<String> for FormStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "DRAFT" => Self::Draft,
            "SUBMITTED" => Self::Submitted,
            "VERIFIED" => Self::Verified,
            "CERTIFIED" => Self::Certified,
            "SENT_TO_DIRECTOR" => Self::SentToDirector,
            "DONE" => Self::Done,
            _ => Self::Other(raw),
        }
    }
}

impl From<&str> for FormStatus {
    fn from(raw: &str) -> Self {
        Self::from(raw.to_string())
    }
}

impl From<FormStatus> for String {
    fn from(status: FormStatus) -> Self {
        match status {
            FormStatus::Other(raw) => raw,
            known => known.label().to_string(),
        }
    }
}

impl fmt::Display for FormStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Opaque version token that changes on every backend write.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordVersion(pub String);

impl fmt::Display for RecordVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Current lock state of a record, read fresh before every gated write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusSnapshot {
    pub status: FormStatus,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub parts: BTreeMap<PartId, FormStatus>,
    pub version: RecordVersion,
}

impl StatusSnapshot {
    pub fn new(status: FormStatus, version: RecordVersion) -> Self {
        Self {
            status,
            parts: BTreeMap::new(),
            version,
        }
    }

    /// Status governing one part; a per-part status overrides the record status.
    pub fn for_part(&self, part: PartId) -> &FormStatus {
        self.parts.get(&part).unwrap_or(&self.status)
    }
}
