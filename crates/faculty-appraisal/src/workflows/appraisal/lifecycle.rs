//! Editability gate for faculty-side writes.
//!
//! The backend owns every transition; this module only decides whether a
//! part may still be changed given the latest status snapshot.

use serde::Serialize;

use super::domain::{FormStatus, PartId, StatusSnapshot};
use super::scoring::policy::MANDATORY_SECTIONS;
use super::scoring::PartScore;

/// Raised when a mutation targets a part that is no longer in `DRAFT`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{part} can no longer be edited: the appraisal is {status}")]
pub struct FormLockedError {
    pub part: PartId,
    pub status: FormStatus,
}

/// Raised by submit when mandatory sections are still empty.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("mandatory sections are not filled in: {}", .missing.join(", "))]
pub struct ValidationError {
    pub missing: Vec<String>,
}

pub struct FormGuard;

impl FormGuard {
    pub fn ensure_editable(part: PartId, snapshot: &StatusSnapshot) -> Result<(), FormLockedError> {
        let status = snapshot.for_part(part);
        if status.is_editable() {
            Ok(())
        } else {
            Err(FormLockedError {
                part,
                status: status.clone(),
            })
        }
    }

    /// Parts still open for editing, in form order.
    pub fn editable_parts(snapshot: &StatusSnapshot) -> Vec<PartId> {
        PartId::ordered()
            .into_iter()
            .filter(|part| snapshot.for_part(*part).is_editable())
            .collect()
    }

    /// Check the mandatory-section table against freshly computed scores.
    /// A part with no score at all fails every mandatory section it owns.
    pub fn ensure_complete(scores: &[PartScore]) -> Result<(), ValidationError> {
        let missing: Vec<String> = MANDATORY_SECTIONS
            .iter()
            .filter_map(|(part, key)| {
                let filled = scores
                    .iter()
                    .find(|score| score.part == *part)
                    .and_then(|score| score.section(key))
                    .map(|section| section.marks > 0.0)
                    .unwrap_or(false);
                if filled {
                    None
                } else {
                    Some(format!("{}: {}", part.label(), section_label(*part, key)))
                }
            })
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { missing })
        }
    }
}

fn section_label(part: PartId, key: &str) -> &'static str {
    use super::scoring::sections::{PartASection, PartDSection, Section};

    let found = match part {
        PartId::A => PartASection::ordered()
            .into_iter()
            .find(|section| section.key() == key)
            .map(Section::label),
        PartId::D => [PartDSection::SelfAwardedMarks, PartDSection::SuperiorMarks]
            .into_iter()
            .find(|section| section.key() == key)
            .map(Section::label),
        _ => None,
    };
    found.unwrap_or("Unknown Section")
}

/// Lock summary exposed alongside scored appraisals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LockState {
    pub status: FormStatus,
    pub editable_parts: Vec<PartId>,
}

impl From<&StatusSnapshot> for LockState {
    fn from(snapshot: &StatusSnapshot) -> Self {
        Self {
            status: snapshot.status.clone(),
            editable_parts: FormGuard::editable_parts(snapshot),
        }
    }
}
