use clap::Args;
use faculty_appraisal::error::AppError;
use faculty_appraisal::workflows::appraisal::scoring::part_policy;
use faculty_appraisal::workflows::appraisal::{
    AdministrativeRole, AppraisalInputs, AppraisalScore, Designation, FacultyProfile, FormGuard,
    ScoreOrigin, ScoringEngine,
};
use serde::Deserialize;
use std::fmt::Write as _;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// JSON file holding any of the partA..partE inputs, optionally with a `profile`
    #[arg(long)]
    pub(crate) input: PathBuf,
    /// Academic designation, overriding the file's profile
    #[arg(long, value_parser = parse_designation)]
    pub(crate) designation: Option<Designation>,
    /// Administrative role, overriding the file's profile
    #[arg(long, value_parser = parse_role)]
    pub(crate) administrative_role: Option<AdministrativeRole>,
    /// Print the scores as JSON instead of a table
    #[arg(long)]
    pub(crate) json: bool,
}

fn parse_designation(raw: &str) -> Result<Designation, String> {
    raw.parse()
}

fn parse_role(raw: &str) -> Result<AdministrativeRole, String> {
    raw.parse()
}

#[derive(Debug, Deserialize)]
struct ScoreFile {
    #[serde(default)]
    profile: Option<FacultyProfile>,
    #[serde(flatten)]
    inputs: AppraisalInputs,
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let raw = std::fs::read(&args.input)?;
    let file: ScoreFile = serde_json::from_slice(&raw)?;
    let profile = resolve_profile(file.profile, args.designation, args.administrative_role);

    let score = ScoringEngine::new(profile).score_all(&file.inputs);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&score)?);
    } else {
        print!("{}", render_breakdown(&score));
    }
    Ok(())
}

fn resolve_profile(
    from_file: Option<FacultyProfile>,
    designation: Option<Designation>,
    role: Option<AdministrativeRole>,
) -> FacultyProfile {
    let mut profile =
        from_file.unwrap_or(FacultyProfile::academic(Designation::AssistantProfessor));
    if let Some(designation) = designation {
        profile.designation = designation;
    }
    if role.is_some() {
        profile.administrative_role = role;
    }
    profile
}

pub(crate) fn render_breakdown(score: &AppraisalScore) -> String {
    let mut out = String::new();
    let designation = score.profile.designation;
    let _ = write!(out, "Appraisal score for {}", designation.label());
    if let Some(role) = score.profile.administrative_role {
        let _ = write!(out, " ({})", role.label());
    }
    out.push('\n');

    for part in &score.parts {
        let max = part_policy(part.part, designation).max;
        let _ = writeln!(
            out,
            "\n{}: {}  {:.2} / {:.0}",
            part.part.label(),
            part.part.title(),
            part.total,
            max
        );
        for section in &part.sections {
            let cap = section
                .max
                .map(|max| format!(" / {max:.0}"))
                .unwrap_or_default();
            let origin = match section.origin {
                ScoreOrigin::Manual => "  [manual]",
                ScoreOrigin::Computed => "",
            };
            let _ = writeln!(
                out,
                "  - {:<36} {:>8.2}{cap}{origin}",
                section.label, section.marks
            );
        }
        if (part.raw_total - part.total).abs() > f64::EPSILON {
            let _ = writeln!(out, "  raw section sum {:.2}", part.raw_total);
        }
    }

    let _ = writeln!(out, "\nTotal: {:.2} / {:.0}", score.total, score.max);
    if let Err(err) = FormGuard::ensure_complete(&score.parts) {
        let _ = writeln!(out, "Not ready to submit, missing:");
        for section in err.missing {
            let _ = writeln!(out, "  - {section}");
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use faculty_appraisal::workflows::appraisal::{
        ExtraordinaryContribution, PortfolioEvaluation, PortfolioType,
    };

    fn sample() -> AppraisalInputs {
        AppraisalInputs {
            part_d: Some(PortfolioEvaluation {
                portfolio_type: PortfolioType::Institute,
                self_awarded_marks: 40.0,
                dean_marks: Some(50.0),
                ..PortfolioEvaluation::default()
            }),
            part_e: Some(ExtraordinaryContribution {
                description: "Industry MoU".to_string(),
                self_awarded_marks: 70.0,
            }),
            ..AppraisalInputs::default()
        }
    }

    #[test]
    fn flags_override_the_file_profile() {
        let from_file = FacultyProfile::with_role(Designation::Professor, AdministrativeRole::Hod);
        let profile = resolve_profile(Some(from_file), Some(Designation::AssociateProfessor), None);
        assert_eq!(profile.designation, Designation::AssociateProfessor);
        assert_eq!(profile.administrative_role, Some(AdministrativeRole::Hod));

        let fallback = resolve_profile(None, None, None);
        assert_eq!(fallback.designation, Designation::AssistantProfessor);
    }

    #[test]
    fn breakdown_lists_parts_sections_and_missing_items() {
        let score = ScoringEngine::new(FacultyProfile::academic(Designation::Professor))
            .score_all(&sample());
        let rendered = render_breakdown(&score);

        assert!(rendered.starts_with("Appraisal score for Professor"));
        assert!(rendered.contains("Part D: Portfolio  90.00 / 120"));
        assert!(rendered.contains("Part E: Extraordinary Contributions  50.00 / 50"));
        assert!(rendered.contains("Total: 140.00 / 1000"));
        assert!(rendered.contains("Not ready to submit"));
    }

    #[test]
    fn score_file_accepts_inputs_beside_a_profile() {
        let file: ScoreFile = serde_json::from_value(serde_json::json!({
            "profile": { "designation": "Associate Professor", "administrativeRole": "Dean" },
            "partE": { "description": "", "selfAwardedMarks": 12 }
        }))
        .expect("score file parses");
        let profile = file.profile.expect("profile present");
        assert_eq!(profile.administrative_role, Some(AdministrativeRole::Dean));
        assert!(file.inputs.part_e.is_some());
        assert!(file.inputs.part_a.is_none());
    }
}
