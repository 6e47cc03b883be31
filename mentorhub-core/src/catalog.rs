//! Fixed option lists offered by the multi-select fields.

use core::fmt::{self, Display};

/// Language value that reveals the free-text "other languages" field.
pub const OTHER_LANGUAGE: &str = "other";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CatalogName {
    Regions,
    Languages,
    Functions,
    Strengths,
    Availability,
    LearningGoals,
}

impl Display for CatalogName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Regions => "regions",
            Self::Languages => "languages",
            Self::Functions => "functions",
            Self::Strengths => "strengths",
            Self::Availability => "availability",
            Self::LearningGoals => "learning goals",
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SelectOption {
    pub value: &'static str,
    pub label: &'static str,
}

const fn option(value: &'static str, label: &'static str) -> SelectOption {
    SelectOption { value, label }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Catalog {
    pub name: CatalogName,
    pub options: &'static [SelectOption],
}

impl Catalog {
    #[must_use]
    pub fn contains(&self, value: &str) -> bool {
        self.options.iter().any(|option| option.value == value)
    }

    /// Label shown for `value`, falling back to the raw value.
    #[must_use]
    pub fn label<'a>(&self, value: &'a str) -> &'a str {
        self.options
            .iter()
            .find(|option| option.value == value)
            .map_or(value, |option| option.label)
    }
}

pub const REGIONS: Catalog = Catalog {
    name: CatalogName::Regions,
    options: &[
        option("north-america", "North America"),
        option("europe", "Europe"),
        option("asia-pacific", "Asia Pacific"),
        option("emea", "EMEA"),
    ],
};

pub const LANGUAGES: Catalog = Catalog {
    name: CatalogName::Languages,
    options: &[
        option("english", "English"),
        option("spanish", "Spanish"),
        option("french", "French"),
        option("mandarin", "Mandarin"),
        option("german", "German"),
        option(OTHER_LANGUAGE, "Other"),
    ],
};

/// Business functions, also offered as "expertise".
pub const FUNCTIONS: Catalog = Catalog {
    name: CatalogName::Functions,
    options: &[
        option("technology", "Technology"),
        option("finance", "Finance"),
        option("operations", "Operations"),
        option("hr", "HR"),
        option("marketing", "Marketing"),
    ],
};

pub const STRENGTHS: Catalog = Catalog {
    name: CatalogName::Strengths,
    options: &[
        option("leadership", "Leadership"),
        option("communication", "Communication"),
        option("problem-solving", "Problem Solving"),
        option("strategic-thinking", "Strategic Thinking"),
        option("mentoring", "Mentoring"),
    ],
};

pub const AVAILABILITY: Catalog = Catalog {
    name: CatalogName::Availability,
    options: &[
        option("weekdays", "Weekdays"),
        option("weekends", "Weekends"),
        option("evenings", "Evenings"),
        option("flexible", "Flexible"),
    ],
};

pub const LEARNING_GOALS: Catalog = Catalog {
    name: CatalogName::LearningGoals,
    options: &[
        option("career-growth", "Career Growth"),
        option("leadership-dev", "Leadership Development"),
        option("technical-skills", "Technical Skills"),
        option("work-life-balance", "Work-Life Balance"),
    ],
};

#[cfg(test)]
mod tests {
    use super::{FUNCTIONS, LANGUAGES, OTHER_LANGUAGE, REGIONS};

    #[test]
    fn labels_fall_back_to_the_value() {
        assert_eq!(REGIONS.label("asia-pacific"), "Asia Pacific");
        assert_eq!(FUNCTIONS.label("hr"), "HR");
        assert_eq!(REGIONS.label("antarctica"), "antarctica");
    }

    #[test]
    fn languages_offer_the_other_sentinel() {
        assert!(LANGUAGES.contains(OTHER_LANGUAGE));
        assert!(!REGIONS.contains(OTHER_LANGUAGE));
    }
}
