//! Likely objections per industry.
//!
//! Uses its own catalog and a looser matching rule than the profile resolver:
//! only "key contained in input" counts, with no exact-match step and no
//! reverse containment.

/// Ordered catalog; the first key contained in the input wins.
const OBJECTION_CATALOG: [(&str, [&str; 3]); 5] = [
    (
        "technology",
        [
            "We already have cyber insurance",
            "Our tech stack is secure",
            "Insurance is too expensive",
        ],
    ),
    (
        "finance",
        [
            "We're already heavily insured",
            "We handle risk internally",
            "Regulatory compliance is sufficient",
        ],
    ),
    (
        "healthcare",
        [
            "Our existing malpractice coverage is enough",
            "We're too small to need comprehensive coverage",
            "HIPAA compliance is our priority",
        ],
    ),
    (
        "retail",
        [
            "Our business is too small",
            "We don't have valuable physical assets",
            "Online retail has different needs",
        ],
    ),
    (
        "manufacturing",
        [
            "We have long-standing insurance partners",
            "Our safety record is excellent",
            "Our equipment is well-maintained",
        ],
    ),
];

const GENERIC_OBJECTIONS: [&str; 3] = [
    "We already have insurance",
    "It's too expensive",
    "We don't see the value",
];

/// Pick the three objections most relevant to the industry.
pub fn select_objections(industry: &str) -> [String; 3] {
    let lower = industry.to_lowercase();
    let picked = OBJECTION_CATALOG
        .iter()
        .find(|(key, _)| lower.contains(*key))
        .map(|(_, objections)| objections)
        .unwrap_or(&GENERIC_OBJECTIONS);
    (*picked).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contained_key_selects_catalog_entry() {
        let picked = select_objections("Regional Finance Group");
        assert_eq!(picked[0], "We're already heavily insured");
        assert_eq!(picked[2], "Regulatory compliance is sufficient");
    }

    #[test]
    fn abbreviation_does_not_match() {
        // The profile resolver would accept "tech"; objections need the full key.
        assert_eq!(select_objections("tech").to_vec(), GENERIC_OBJECTIONS.to_vec());
    }

    #[test]
    fn empty_input_gets_generic_list() {
        assert_eq!(select_objections("")[1], "It's too expensive");
    }

    #[test]
    fn catalog_order_breaks_ties() {
        let picked = select_objections("healthcare retail");
        assert_eq!(picked[0], "Our existing malpractice coverage is enough");
    }

    #[test]
    fn always_three() {
        for input in ["", "x", "TECHNOLOGY", "manufacturing & retail", "??"] {
            assert_eq!(select_objections(input).len(), 3);
        }
    }
}
