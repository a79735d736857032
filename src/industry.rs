//! Industry strategy profiles.
//! Maps a free-text industry string to a fixed bundle of keywords, pain points
//! and selling points used to personalize outreach.

use serde::Serialize;

/// Industries with a dedicated strategy profile, plus the generic default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Industry {
    Technology,
    Finance,
    Healthcare,
    Retail,
    Manufacturing,
    Generic,
}

/// Catalog match order. Partial matches are tried in this order, so earlier
/// entries win when several keys match one input.
pub const CATALOG: [Industry; 5] = [
    Industry::Technology,
    Industry::Finance,
    Industry::Healthcare,
    Industry::Retail,
    Industry::Manufacturing,
];

impl Industry {
    /// Catalog key (lower-case). The generic profile has no key.
    pub fn key(&self) -> Option<&'static str> {
        match self {
            Industry::Technology => Some("technology"),
            Industry::Finance => Some("finance"),
            Industry::Healthcare => Some("healthcare"),
            Industry::Retail => Some("retail"),
            Industry::Manufacturing => Some("manufacturing"),
            Industry::Generic => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        self.key().unwrap_or("generic")
    }

    /// Exact key match first, then partial containment in either direction.
    pub fn classify(industry: &str) -> Self {
        let lower = industry.to_lowercase();

        if let Some(exact) = CATALOG.iter().find(|i| i.key() == Some(lower.as_str())) {
            return *exact;
        }

        // An empty input is contained in every key and lands on the first entry.
        CATALOG
            .iter()
            .copied()
            .find(|i| {
                i.key()
                    .is_some_and(|key| lower.contains(key) || key.contains(lower.as_str()))
            })
            .unwrap_or(Industry::Generic)
    }
}

/// Personalization bundle for one industry. Every list is non-empty.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IndustryProfile {
    pub industry: Industry,
    pub keywords: &'static [&'static str],
    pub pain_points: &'static [&'static str],
    pub selling_points: &'static [&'static str],
}

impl IndustryProfile {
    pub fn primary_pain_point(&self) -> &'static str {
        self.pain_points[0]
    }

    pub fn primary_selling_point(&self) -> &'static str {
        self.selling_points[0]
    }
}

pub fn profile_for(industry: Industry) -> IndustryProfile {
    match industry {
        Industry::Technology => IndustryProfile {
            industry,
            keywords: &[
                "innovation",
                "digital transformation",
                "security",
                "scalability",
            ],
            pain_points: &["data breaches", "tech obsolescence", "rapid growth risks"],
            selling_points: &[
                "Tech-specific liability coverage",
                "Cyber insurance tailored for tech companies",
                "Coverage that scales with your company",
            ],
        },
        Industry::Finance => IndustryProfile {
            industry,
            keywords: &["security", "compliance", "ROI", "risk management"],
            pain_points: &[
                "regulatory compliance",
                "financial liability",
                "client trust",
            ],
            selling_points: &[
                "Comprehensive financial liability protection",
                "Specialized coverage for financial institutions",
                "Client trust protection insurance",
            ],
        },
        Industry::Healthcare => IndustryProfile {
            industry,
            keywords: &[
                "compliance",
                "patient care",
                "efficiency",
                "risk mitigation",
            ],
            pain_points: &["medical malpractice", "HIPAA compliance", "healthcare costs"],
            selling_points: &[
                "HIPAA-compliant insurance solutions",
                "Medical malpractice coverage",
                "Healthcare-specific liability insurance",
            ],
        },
        Industry::Retail => IndustryProfile {
            industry,
            keywords: &[
                "customer experience",
                "inventory",
                "liability",
                "business continuity",
            ],
            pain_points: &[
                "property damage",
                "business interruption",
                "product liability",
            ],
            selling_points: &[
                "Retail-specific property insurance",
                "Business interruption coverage",
                "Product liability protection",
            ],
        },
        Industry::Manufacturing => IndustryProfile {
            industry,
            keywords: &["efficiency", "safety", "supply chain", "equipment"],
            pain_points: &[
                "workplace injuries",
                "equipment failure",
                "supply chain disruptions",
            ],
            selling_points: &[
                "Worker's compensation tailored for manufacturing",
                "Equipment breakdown coverage",
                "Supply chain interruption insurance",
            ],
        },
        Industry::Generic => IndustryProfile {
            industry,
            keywords: &["protection", "coverage", "risk management"],
            pain_points: &[
                "liability risks",
                "unexpected costs",
                "business interruptions",
            ],
            selling_points: &[
                "Comprehensive business insurance",
                "Customized insurance solutions",
                "Risk management expertise",
            ],
        },
    }
}

/// Resolve a free-text industry into its strategy profile. Total and pure.
pub fn resolve_industry_profile(industry: &str) -> IndustryProfile {
    profile_for(Industry::classify(industry))
}
