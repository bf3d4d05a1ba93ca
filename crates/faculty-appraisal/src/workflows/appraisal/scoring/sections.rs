use serde::{Deserialize, Serialize};

/// A named, independently capped sub-category of an appraisal part.
pub trait Section: Copy + Ord + 'static {
    /// Key under which the section's marks are stored (`sectionMarks`).
    fn key(self) -> &'static str;
    fn label(self) -> &'static str;
    /// Section cap; `None` means the section is bounded only by the part cap.
    fn cap(self) -> Option<f64>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PartASection {
    ResultAnalysis,
    CourseOutcome,
    AcademicEngagement,
    StudentFeedback,
    TeachingLoad,
    ELearning,
    ProjectsGuided,
    PtgMeetings,
}

impl PartASection {
    pub const fn ordered() -> [Self; 8] {
        [
            Self::ResultAnalysis,
            Self::CourseOutcome,
            Self::AcademicEngagement,
            Self::StudentFeedback,
            Self::TeachingLoad,
            Self::ELearning,
            Self::ProjectsGuided,
            Self::PtgMeetings,
        ]
    }
}

impl Section for PartASection {
    fn key(self) -> &'static str {
        match self {
            Self::ResultAnalysis => "resultAnalysis",
            Self::CourseOutcome => "courseOutcome",
            Self::AcademicEngagement => "academicEngagement",
            Self::StudentFeedback => "studentFeedback",
            Self::TeachingLoad => "teachingLoad",
            Self::ELearning => "eLearning",
            Self::ProjectsGuided => "projectsGuided",
            Self::PtgMeetings => "ptgMeetings",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::ResultAnalysis => "Result Analysis",
            Self::CourseOutcome => "Course Outcome",
            Self::AcademicEngagement => "Academic Engagement",
            Self::StudentFeedback => "Student Feedback",
            Self::TeachingLoad => "Teaching Load",
            Self::ELearning => "E-Learning",
            Self::ProjectsGuided => "Projects Guided",
            Self::PtgMeetings => "PTG Meetings",
        }
    }

    fn cap(self) -> Option<f64> {
        Some(match self {
            Self::ResultAnalysis
            | Self::CourseOutcome
            | Self::AcademicEngagement
            | Self::TeachingLoad
            | Self::ELearning
            | Self::PtgMeetings => 50.0,
            Self::StudentFeedback => 100.0,
            Self::ProjectsGuided => 40.0,
        })
    }
}

/// How a research section turns its claims into marks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ClaimRule {
    /// Sum of `value × weight` over known sub-categories.
    Weighted(&'static [(&'static str, f64)]),
    /// `amount × marks / per` read from the `amount` sub-category.
    Amount { marks: f64, per: f64 },
}

/// Sub-category key read by [`ClaimRule::Amount`] sections.
pub const AMOUNT_CATEGORY: &str = "amount";

const JOURNAL_WEIGHTS: &[(&str, f64)] = &[
    ("sci", 100.0),
    ("esci", 50.0),
    ("scopus", 50.0),
    ("ugc", 10.0),
    ("other", 5.0),
];
const CONFERENCE_WEIGHTS: &[(&str, f64)] =
    &[("scopus", 30.0), ("international", 15.0), ("national", 10.0)];
const BOOK_CHAPTER_WEIGHTS: &[(&str, f64)] = &[("scopus", 50.0), ("other", 5.0)];
const BOOK_WEIGHTS: &[(&str, f64)] = &[("scopus", 100.0), ("national", 50.0), ("local", 10.0)];
const CITATION_WEIGHTS: &[(&str, f64)] = &[
    ("wos", 1.0),
    ("scopus", 1.0),
    ("scholar", 1.0 / 3.0),
];
const COPYRIGHT_INDIVIDUAL_WEIGHTS: &[(&str, f64)] = &[("registered", 5.0), ("granted", 15.0)];
const COPYRIGHT_INSTITUTIONAL_WEIGHTS: &[(&str, f64)] =
    &[("registered", 10.0), ("granted", 30.0)];
const PATENT_INDIVIDUAL_WEIGHTS: &[(&str, f64)] = &[
    ("filed", 15.0),
    ("published", 30.0),
    ("granted", 100.0),
    ("commercialized", 100.0),
];
const PATENT_INSTITUTIONAL_WEIGHTS: &[(&str, f64)] = &[
    ("filed", 30.0),
    ("published", 60.0),
    ("granted", 200.0),
    ("commercialized", 200.0),
];
const PRODUCT_WEIGHTS: &[(&str, f64)] = &[
    ("commercialized", 100.0),
    ("developed", 40.0),
    ("poc", 10.0),
];
const STARTUP_WEIGHTS: &[(&str, f64)] =
    &[("revenue", 100.0), ("funded", 50.0), ("registered", 20.0)];
const AWARD_WEIGHTS: &[(&str, f64)] = &[
    ("international", 30.0),
    ("government", 20.0),
    ("national", 15.0),
    ("state", 5.0),
];
const INDUSTRY_WEIGHTS: &[(&str, f64)] = &[("mou", 10.0), ("lab", 20.0), ("consultancy", 10.0)];
const PLACEMENT_WEIGHTS: &[(&str, f64)] = &[("offer", 10.0)];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PartBSection {
    Journals,
    Conferences,
    BookChapters,
    Books,
    Citations,
    CopyrightIndividual,
    CopyrightInstitutional,
    PatentIndividual,
    PatentInstitutional,
    ResearchGrants,
    TrainingRevenue,
    NonResearchGrants,
    Products,
    Startups,
    Awards,
    IndustryInteraction,
    InternshipPlacements,
}

impl PartBSection {
    pub const fn ordered() -> [Self; 17] {
        [
            Self::Journals,
            Self::Conferences,
            Self::BookChapters,
            Self::Books,
            Self::Citations,
            Self::CopyrightIndividual,
            Self::CopyrightInstitutional,
            Self::PatentIndividual,
            Self::PatentInstitutional,
            Self::ResearchGrants,
            Self::TrainingRevenue,
            Self::NonResearchGrants,
            Self::Products,
            Self::Startups,
            Self::Awards,
            Self::IndustryInteraction,
            Self::InternshipPlacements,
        ]
    }

    pub const fn rule(self) -> ClaimRule {
        match self {
            Self::Journals => ClaimRule::Weighted(JOURNAL_WEIGHTS),
            Self::Conferences => ClaimRule::Weighted(CONFERENCE_WEIGHTS),
            Self::BookChapters => ClaimRule::Weighted(BOOK_CHAPTER_WEIGHTS),
            Self::Books => ClaimRule::Weighted(BOOK_WEIGHTS),
            Self::Citations => ClaimRule::Weighted(CITATION_WEIGHTS),
            Self::CopyrightIndividual => ClaimRule::Weighted(COPYRIGHT_INDIVIDUAL_WEIGHTS),
            Self::CopyrightInstitutional => ClaimRule::Weighted(COPYRIGHT_INSTITUTIONAL_WEIGHTS),
            Self::PatentIndividual => ClaimRule::Weighted(PATENT_INDIVIDUAL_WEIGHTS),
            Self::PatentInstitutional => ClaimRule::Weighted(PATENT_INSTITUTIONAL_WEIGHTS),
            Self::ResearchGrants => ClaimRule::Amount {
                marks: 10.0,
                per: 200_000.0,
            },
            Self::TrainingRevenue | Self::NonResearchGrants => ClaimRule::Amount {
                marks: 5.0,
                per: 10_000.0,
            },
            Self::Products => ClaimRule::Weighted(PRODUCT_WEIGHTS),
            Self::Startups => ClaimRule::Weighted(STARTUP_WEIGHTS),
            Self::Awards => ClaimRule::Weighted(AWARD_WEIGHTS),
            Self::IndustryInteraction => ClaimRule::Weighted(INDUSTRY_WEIGHTS),
            Self::InternshipPlacements => ClaimRule::Weighted(PLACEMENT_WEIGHTS),
        }
    }
}

impl Section for PartBSection {
    fn key(self) -> &'static str {
        match self {
            Self::Journals => "journals",
            Self::Conferences => "conferences",
            Self::BookChapters => "bookChapters",
            Self::Books => "books",
            Self::Citations => "citations",
            Self::CopyrightIndividual => "copyrightIndividual",
            Self::CopyrightInstitutional => "copyrightInstitutional",
            Self::PatentIndividual => "patentIndividual",
            Self::PatentInstitutional => "patentInstitutional",
            Self::ResearchGrants => "researchGrants",
            Self::TrainingRevenue => "trainingRevenue",
            Self::NonResearchGrants => "nonResearchGrants",
            Self::Products => "products",
            Self::Startups => "startups",
            Self::Awards => "awards",
            Self::IndustryInteraction => "industryInteraction",
            Self::InternshipPlacements => "internshipPlacements",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Journals => "Journals",
            Self::Conferences => "Conferences",
            Self::BookChapters => "Book Chapters",
            Self::Books => "Books",
            Self::Citations => "Citations",
            Self::CopyrightIndividual => "Copyrights (Individual)",
            Self::CopyrightInstitutional => "Copyrights (Institutional)",
            Self::PatentIndividual => "Patents (Individual)",
            Self::PatentInstitutional => "Patents (Institutional)",
            Self::ResearchGrants => "Research Grants",
            Self::TrainingRevenue => "Training Revenue",
            Self::NonResearchGrants => "Non-Research Grants",
            Self::Products => "Products Developed",
            Self::Startups => "Startups",
            Self::Awards => "Awards & Fellowships",
            Self::IndustryInteraction => "Industry Interaction",
            Self::InternshipPlacements => "Internships & Placements",
        }
    }

    fn cap(self) -> Option<f64> {
        match self {
            Self::Journals
            | Self::CopyrightInstitutional
            | Self::PatentInstitutional
            | Self::ResearchGrants => None,
            Self::Conferences => Some(180.0),
            Self::BookChapters => Some(150.0),
            Self::Books => Some(200.0),
            Self::Citations | Self::Awards | Self::IndustryInteraction => Some(50.0),
            Self::CopyrightIndividual | Self::InternshipPlacements => Some(30.0),
            Self::PatentIndividual | Self::Products | Self::Startups => Some(100.0),
            Self::TrainingRevenue | Self::NonResearchGrants => Some(40.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PartCSection {
    Qualification,
    TrainingAttended,
    TrainingOrganized,
    PhdGuided,
}

impl PartCSection {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::Qualification,
            Self::TrainingAttended,
            Self::TrainingOrganized,
            Self::PhdGuided,
        ]
    }
}

impl Section for PartCSection {
    fn key(self) -> &'static str {
        match self {
            Self::Qualification => "qualification",
            Self::TrainingAttended => "trainingAttended",
            Self::TrainingOrganized => "trainingOrganized",
            Self::PhdGuided => "phdGuided",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Qualification => "Qualification",
            Self::TrainingAttended => "Training Attended",
            Self::TrainingOrganized => "Training Organized",
            Self::PhdGuided => "PhD Guided",
        }
    }

    fn cap(self) -> Option<f64> {
        match self {
            Self::Qualification => Some(40.0),
            Self::TrainingAttended => Some(60.0),
            Self::TrainingOrganized => Some(40.0),
            Self::PhdGuided => None,
        }
    }
}

/// Part D is scored as two sections: the faculty member's own marks and the
/// reconciled superior marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PartDSection {
    SelfAwardedMarks,
    SuperiorMarks,
}

impl Section for PartDSection {
    fn key(self) -> &'static str {
        match self {
            Self::SelfAwardedMarks => "selfAwardedMarks",
            Self::SuperiorMarks => "superiorMarks",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::SelfAwardedMarks => "Self-Awarded Marks",
            Self::SuperiorMarks => "Superior Marks",
        }
    }

    fn cap(self) -> Option<f64> {
        Some(60.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PartESection {
    SelfAwardedMarks,
}

impl Section for PartESection {
    fn key(self) -> &'static str {
        "selfAwardedMarks"
    }

    fn label(self) -> &'static str {
        "Extraordinary Contribution"
    }

    fn cap(self) -> Option<f64> {
        Some(50.0)
    }
}
