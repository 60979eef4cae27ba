//! Evaluation constants: the standard weighted criteria, the interpretation
//! bands, the role taxonomy and the per-role criteria tables.
//!
//! The model does the scoring; these tables are what the prompts promise it
//! will follow, and what the fallback payloads are built from.

use serde::Serialize;

/// A named, weighted evaluation criterion as returned to API callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Criterion {
    pub name: &'static str,
    pub weight: u32,
}

/// One of the seven standard scoring dimensions of a match.
#[derive(Debug, Clone, Copy)]
pub struct ScoringDimension {
    /// Key of this dimension under `details` in a match result.
    pub key: &'static str,
    pub name: &'static str,
    pub weight: u32,
    pub description: &'static str,
}

pub const STANDARD_DIMENSIONS: [ScoringDimension; 7] = [
    ScoringDimension {
        key: "skills_match",
        name: "Skills Match",
        weight: 35,
        description: "Alignment of technical, soft, and domain-specific skills with job requirements",
    },
    ScoringDimension {
        key: "relevant_experience",
        name: "Relevant Experience",
        weight: 25,
        description: "Years and type of work experience related to the role or industry",
    },
    ScoringDimension {
        key: "education",
        name: "Education",
        weight: 10,
        description: "Degree level, field of study, and institution relevance",
    },
    ScoringDimension {
        key: "certifications",
        name: "Certifications",
        weight: 10,
        description: "Relevant professional certifications that enhance qualifications",
    },
    ScoringDimension {
        key: "cultural_fit",
        name: "Cultural Fit",
        weight: 10,
        description: "Alignment with company values, mission, and team environment",
    },
    ScoringDimension {
        key: "language_proficiency",
        name: "Language Proficiency",
        weight: 5,
        description: "Required language fluency for communication and documentation",
    },
    ScoringDimension {
        key: "achievements_projects",
        name: "Achievements/Projects",
        weight: 5,
        description: "Notable accomplishments, publications, or standout projects",
    },
];

/// Key of the only dimension that also lists matching and missing skills.
pub const SKILLS_DIMENSION_KEY: &str = "skills_match";

// ────────────────────────────────────────────────────────────────────────────
// Interpretation bands
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FitBand {
    Excellent,
    Good,
    Moderate,
    Poor,
}

impl FitBand {
    pub const ALL: [FitBand; 4] = [
        FitBand::Excellent,
        FitBand::Good,
        FitBand::Moderate,
        FitBand::Poor,
    ];

    /// Band for a 0–100 score.
    pub fn from_score(score: f64) -> Self {
        if score >= 85.0 {
            FitBand::Excellent
        } else if score >= 70.0 {
            FitBand::Good
        } else if score >= 50.0 {
            FitBand::Moderate
        } else {
            FitBand::Poor
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FitBand::Excellent => "Excellent Fit – Highly recommended",
            FitBand::Good => "Good Fit – Strong candidate, minor gaps",
            FitBand::Moderate => "Moderate Fit – May need development/support",
            FitBand::Poor => "Poor Fit – Likely not a match",
        }
    }

    pub fn range(self) -> &'static str {
        match self {
            FitBand::Excellent => "85-100",
            FitBand::Good => "70-84",
            FitBand::Moderate => "50-69",
            FitBand::Poor => "Below 50",
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Role taxonomy
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleCategory {
    EngineeringTechnical,
    MarketingSales,
    DesignCreative,
    LeadershipManagement,
    HealthcareMedical,
    FinanceAccounting,
    Legal,
    EducationTraining,
    CustomerService,
    Other,
}

impl RoleCategory {
    pub const ALL: [RoleCategory; 10] = [
        RoleCategory::EngineeringTechnical,
        RoleCategory::MarketingSales,
        RoleCategory::DesignCreative,
        RoleCategory::LeadershipManagement,
        RoleCategory::HealthcareMedical,
        RoleCategory::FinanceAccounting,
        RoleCategory::Legal,
        RoleCategory::EducationTraining,
        RoleCategory::CustomerService,
        RoleCategory::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            RoleCategory::EngineeringTechnical => "Engineering/Technical",
            RoleCategory::MarketingSales => "Marketing/Sales",
            RoleCategory::DesignCreative => "Design/Creative",
            RoleCategory::LeadershipManagement => "Leadership/Management",
            RoleCategory::HealthcareMedical => "Healthcare/Medical",
            RoleCategory::FinanceAccounting => "Finance/Accounting",
            RoleCategory::Legal => "Legal",
            RoleCategory::EducationTraining => "Education/Training",
            RoleCategory::CustomerService => "Customer Service/Support",
            RoleCategory::Other => "Other",
        }
    }

    /// Exact (whitespace-trimmed) label match. Free-form "Other" variants are `None`.
    pub fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL.into_iter().find(|c| c.label() == label)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Criteria tables
// ────────────────────────────────────────────────────────────────────────────

pub const DEFAULT_CRITERIA: [Criterion; 7] = [
    Criterion { name: "Skills Match", weight: 35 },
    Criterion { name: "Relevant Experience", weight: 25 },
    Criterion { name: "Education", weight: 10 },
    Criterion { name: "Certifications", weight: 10 },
    Criterion { name: "Cultural Fit", weight: 10 },
    Criterion { name: "Language Proficiency", weight: 5 },
    Criterion { name: "Achievements/Projects", weight: 5 },
];

const ENGINEERING_CRITERIA: [Criterion; 7] = [
    Criterion { name: "Technical Skills Match", weight: 40 },
    Criterion { name: "Relevant Experience", weight: 20 },
    Criterion { name: "Problem Solving Capability", weight: 10 },
    Criterion { name: "Education", weight: 10 },
    Criterion { name: "Technical Certifications", weight: 10 },
    Criterion { name: "Development Tools/Frameworks", weight: 5 },
    Criterion { name: "Open Source Contributions", weight: 5 },
];

const MARKETING_CRITERIA: [Criterion; 7] = [
    Criterion { name: "Skills Match", weight: 30 },
    Criterion { name: "Results & Metrics", weight: 25 },
    Criterion { name: "Relevant Experience", weight: 20 },
    Criterion { name: "Communication Skills", weight: 10 },
    Criterion { name: "Industry Knowledge", weight: 5 },
    Criterion { name: "Education", weight: 5 },
    Criterion { name: "CRM/Tool Experience", weight: 5 },
];

const DESIGN_CRITERIA: [Criterion; 7] = [
    Criterion { name: "Portfolio Quality", weight: 35 },
    Criterion { name: "Technical Skills Match", weight: 25 },
    Criterion { name: "Relevant Experience", weight: 15 },
    Criterion { name: "Creativity & Innovation", weight: 10 },
    Criterion { name: "Communication Skills", weight: 5 },
    Criterion { name: "Tools/Software Mastery", weight: 5 },
    Criterion { name: "Education", weight: 5 },
];

const LEADERSHIP_CRITERIA: [Criterion; 7] = [
    Criterion { name: "Leadership Experience", weight: 30 },
    Criterion { name: "Team Management", weight: 20 },
    Criterion { name: "Strategic Vision", weight: 15 },
    Criterion { name: "Industry Experience", weight: 15 },
    Criterion { name: "Skills Match", weight: 10 },
    Criterion { name: "Education", weight: 5 },
    Criterion { name: "Communication Skills", weight: 5 },
];

const HEALTHCARE_CRITERIA: [Criterion; 6] = [
    Criterion { name: "Certifications & Licenses", weight: 25 },
    Criterion { name: "Clinical Experience", weight: 25 },
    Criterion { name: "Skills Match", weight: 20 },
    Criterion { name: "Education", weight: 15 },
    Criterion { name: "Compliance Knowledge", weight: 10 },
    Criterion { name: "Interpersonal Skills", weight: 5 },
];

/// Criteria weighting for a role type label. Pure lookup, no model call.
/// Only five categories have adapted tables; everything else, including
/// free-form labels, gets the default seven-criterion weighting.
pub fn get_adapted_evaluation_criteria(role_type: &str) -> &'static [Criterion] {
    match RoleCategory::from_label(role_type) {
        Some(RoleCategory::EngineeringTechnical) => &ENGINEERING_CRITERIA,
        Some(RoleCategory::MarketingSales) => &MARKETING_CRITERIA,
        Some(RoleCategory::DesignCreative) => &DESIGN_CRITERIA,
        Some(RoleCategory::LeadershipManagement) => &LEADERSHIP_CRITERIA,
        Some(RoleCategory::HealthcareMedical) => &HEALTHCARE_CRITERIA,
        _ => &DEFAULT_CRITERIA,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn total(criteria: &[Criterion]) -> u32 {
        criteria.iter().map(|c| c.weight).sum()
    }

    #[test]
    fn test_every_table_sums_to_100() {
        for category in RoleCategory::ALL {
            let criteria = get_adapted_evaluation_criteria(category.label());
            assert_eq!(total(criteria), 100, "{} weights", category.label());
        }
        let dims: u32 = STANDARD_DIMENSIONS.iter().map(|d| d.weight).sum();
        assert_eq!(dims, 100);
    }

    #[test]
    fn test_default_criteria_mirror_standard_dimensions() {
        for (criterion, dim) in DEFAULT_CRITERIA.iter().zip(STANDARD_DIMENSIONS.iter()) {
            assert_eq!(criterion.name, dim.name);
            assert_eq!(criterion.weight, dim.weight);
        }
    }

    #[test]
    fn test_unadapted_roles_get_default_weighting() {
        for label in ["Legal", "Finance/Accounting", "Other", "Other (Data Science)", ""] {
            assert_eq!(get_adapted_evaluation_criteria(label), &DEFAULT_CRITERIA[..]);
        }
    }

    #[test]
    fn test_engineering_table_leads_with_technical_skills() {
        let criteria = get_adapted_evaluation_criteria("Engineering/Technical");
        assert_eq!(criteria[0], Criterion { name: "Technical Skills Match", weight: 40 });
    }

    #[test]
    fn test_healthcare_has_six_criteria() {
        assert_eq!(get_adapted_evaluation_criteria(" Healthcare/Medical ").len(), 6);
    }

    #[test]
    fn test_band_boundaries() {
        assert_eq!(FitBand::from_score(100.0), FitBand::Excellent);
        assert_eq!(FitBand::from_score(85.0), FitBand::Excellent);
        assert_eq!(FitBand::from_score(84.9), FitBand::Good);
        assert_eq!(FitBand::from_score(70.0), FitBand::Good);
        assert_eq!(FitBand::from_score(69.0), FitBand::Moderate);
        assert_eq!(FitBand::from_score(50.0), FitBand::Moderate);
        assert_eq!(FitBand::from_score(49.5), FitBand::Poor);
        assert_eq!(FitBand::from_score(0.0), FitBand::Poor);
    }

    #[test]
    fn test_role_labels_round_trip() {
        for category in RoleCategory::ALL {
            assert_eq!(RoleCategory::from_label(category.label()), Some(category));
        }
        assert_eq!(RoleCategory::from_label("engineering/technical"), None);
    }
}
