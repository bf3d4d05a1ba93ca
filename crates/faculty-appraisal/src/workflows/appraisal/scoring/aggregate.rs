use super::normalizer::{self, ClaimBasis};
use super::policy::{minimum_teaching_load, part_policy};
use super::sections::{PartASection, PartBSection, PartCSection, PartESection};
use super::{PartScore, SectionMark};
use crate::workflows::appraisal::domain::{Designation, PartId};
use crate::workflows::appraisal::forms::{
    ExtraordinaryContribution, PartAInputs, PartBInputs, PartCInputs,
};

pub fn score_part_a(inputs: &PartAInputs, designation: Designation) -> PartScore {
    let sections = PartASection::ordered()
        .into_iter()
        .map(|section| {
            let computed = match section {
                PartASection::ResultAnalysis => normalizer::result_analysis(&inputs.courses),
                PartASection::CourseOutcome => normalizer::course_outcome(&inputs.courses),
                PartASection::AcademicEngagement => {
                    normalizer::academic_engagement(&inputs.courses)
                }
                PartASection::StudentFeedback => normalizer::student_feedback(&inputs.courses),
                PartASection::TeachingLoad => normalizer::teaching_load(
                    inputs.weekly_load_sem1,
                    inputs.weekly_load_sem2,
                    inputs.phd_scholar,
                    minimum_teaching_load(designation),
                ),
                PartASection::ELearning => normalizer::linear(inputs.e_learning_modules, 10.0),
                PartASection::ProjectsGuided => normalizer::linear(inputs.projects_guided, 4.0),
                PartASection::PtgMeetings => normalizer::linear(inputs.ptg_meetings, 10.0),
            };
            SectionMark::resolve(section, computed, inputs.manual.get(section))
        })
        .collect();

    PartScore::from_sections(PartId::A, sections, part_policy(PartId::A, designation))
}

/// Research score. Saves always use [`ClaimBasis::Claimed`]; the verified
/// basis exists for the committee's side-by-side view.
pub fn score_part_b(inputs: &PartBInputs, designation: Designation, basis: ClaimBasis) -> PartScore {
    let sections = PartBSection::ordered()
        .into_iter()
        .map(|section| {
            let computed = inputs
                .claims(section)
                .map(|claims| normalizer::research_claims(claims, section.rule(), basis))
                .unwrap_or(0.0);
            SectionMark::resolve(section, computed, inputs.manual.get(section))
        })
        .collect();

    PartScore::from_sections(PartId::B, sections, part_policy(PartId::B, designation))
}

pub fn score_part_c(inputs: &PartCInputs, designation: Designation) -> PartScore {
    let sections = PartCSection::ordered()
        .into_iter()
        .map(|section| {
            let computed = match section {
                PartCSection::Qualification => normalizer::qualification(inputs.qualification),
                PartCSection::TrainingAttended => normalizer::training(&inputs.trainings_attended),
                PartCSection::TrainingOrganized => {
                    normalizer::training(&inputs.trainings_organized)
                }
                PartCSection::PhdGuided => normalizer::phd_guided(&inputs.phd_guided),
            };
            SectionMark::resolve(section, computed, inputs.manual.get(section))
        })
        .collect();

    PartScore::from_sections(PartId::C, sections, part_policy(PartId::C, designation))
}

pub fn score_part_e(contribution: &ExtraordinaryContribution) -> PartScore {
    let section = SectionMark::resolve(
        PartESection::SelfAwardedMarks,
        contribution.self_awarded_marks,
        None,
    );
    // Part E has no role dependency; any designation reads the same policy.
    PartScore::from_sections(
        PartId::E,
        vec![section],
        part_policy(PartId::E, Designation::AssistantProfessor),
    )
}
