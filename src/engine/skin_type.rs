//! Skin-type categories
//!
//! The variant order matches the classifier's output layer; the prediction
//! vector is positionally aligned to `SkinType::ALL`.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkinType {
    Oily,
    Dry,
    Combination,
    Normal,
    Sensitive,
}

impl SkinType {
    pub const COUNT: usize = 5;

    /// Classifier output order. Do not reorder.
    pub const ALL: [SkinType; Self::COUNT] = [
        SkinType::Oily,
        SkinType::Dry,
        SkinType::Combination,
        SkinType::Normal,
        SkinType::Sensitive,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SkinType::Oily => "Oily Skin",
            SkinType::Dry => "Dry Skin",
            SkinType::Combination => "Combination Skin",
            SkinType::Normal => "Normal Skin",
            SkinType::Sensitive => "Sensitive Skin",
        }
    }

    /// URL-friendly identifier used by the REST API.
    pub fn slug(&self) -> &'static str {
        match self {
            SkinType::Oily => "oily",
            SkinType::Dry => "dry",
            SkinType::Combination => "combination",
            SkinType::Normal => "normal",
            SkinType::Sensitive => "sensitive",
        }
    }

    pub fn from_index(idx: usize) -> Option<SkinType> {
        Self::ALL.get(idx).copied()
    }

    pub fn from_slug(slug: &str) -> Option<SkinType> {
        Self::ALL.iter().copied().find(|t| t.slug() == slug)
    }

    /// Short description of the category shown alongside predictions.
    pub fn summary(&self) -> &'static str {
        match self {
            SkinType::Oily => {
                "Oily skin tends to look slick and shiny because of excess sebum, \
                 which the sebaceous glands beneath the skin surface produce naturally."
            }
            SkinType::Dry => {
                "Dry skin comes from low moisture in the outermost skin layer. The \
                 surface cracks easily, looks rough and dull, and is less elastic; \
                 pores are barely visible and the skin reddens, itches and flakes \
                 more readily."
            }
            SkinType::Combination => {
                "Combination skin is a mix of oily and dry: oily across the T-zone \
                 (forehead, nose and chin) with drier skin on the cheeks."
            }
            SkinType::Normal => {
                "Normal skin keeps a balance between water and oil content, so it is \
                 neither too dry nor too oily. It rarely develops problems, is not \
                 overly sensitive, looks radiant, and its pores are barely visible."
            }
            SkinType::Sensitive => {
                "Sensitive skin is highly reactive and quick to develop allergies, \
                 irritation and rashes in response to the environment, food or \
                 cosmetic products."
            }
        }
    }

    /// Care guidance shown on the category detail panel.
    pub fn care(&self) -> &'static str {
        match self {
            SkinType::Oily => {
                "Wash with a facial foam and rinse thoroughly, then apply a face tonic."
            }
            SkinType::Dry => {
                "Apply moisturizer as often as possible, day and night. Use sunscreen \
                 during the day, since dry skin picks up brown spots easily, and avoid \
                 washing with facial soap too frequently."
            }
            SkinType::Combination => {
                "Use a facial foam, milk cleanser and face tonic routinely, get a \
                 salon facial once a month, and apply a thin layer of comedo-prevention \
                 lotion at night."
            }
            SkinType::Normal => {
                "Plain water is enough to cleanse when not wearing make-up; otherwise \
                 use a milk cleanser, face tonic and facial foam. Add a moisturizing \
                 cream in hot weather, when normal skin tends to dry out. A salon \
                 facial once every three months is plenty, plus sunscreen against sun \
                 exposure."
            }
            SkinType::Sensitive => {
                "Care focuses on protecting the skin and reducing irritation. \
                 Sensitivity cannot be judged by eye; a dermatologist can confirm it \
                 with allergy-immunology testing."
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_order_matches_model_output() {
        let labels: Vec<&str> = SkinType::ALL.iter().map(|t| t.label()).collect();
        assert_eq!(
            labels,
            vec![
                "Oily Skin",
                "Dry Skin",
                "Combination Skin",
                "Normal Skin",
                "Sensitive Skin"
            ]
        );
    }

    #[test]
    fn test_from_index() {
        assert_eq!(SkinType::from_index(0), Some(SkinType::Oily));
        assert_eq!(SkinType::from_index(4), Some(SkinType::Sensitive));
        assert_eq!(SkinType::from_index(5), None);
    }

    #[test]
    fn test_slug_roundtrip() {
        for skin_type in SkinType::ALL {
            assert_eq!(SkinType::from_slug(skin_type.slug()), Some(skin_type));
        }
        assert_eq!(SkinType::from_slug("unknown"), None);
    }

    #[test]
    fn test_descriptions_present() {
        for skin_type in SkinType::ALL {
            assert!(!skin_type.summary().is_empty());
            assert!(!skin_type.care().is_empty());
        }
    }
}
