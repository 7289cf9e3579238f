use std::{fmt, slice::Iter};

/// Fixed internal exercise categories. External provider vocabulary is
/// folded onto these via [`Category::from_provider`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Category {
    Strength,
    Cardio,
    Flexibility,
    Balance,
}

impl Category {
    #[must_use]
    pub fn iter() -> Iter<'static, Category> {
        static CATEGORIES: [Category; 4] = [
            Category::Strength,
            Category::Cardio,
            Category::Flexibility,
            Category::Balance,
        ];
        CATEGORIES.iter()
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Category::Strength => "Strength",
            Category::Cardio => "Cardio",
            Category::Flexibility => "Flexibility",
            Category::Balance => "Balance",
        }
    }

    /// Maps free-text provider vocabulary onto the fixed categories.
    ///
    /// The rules are checked in this exact order and the first match
    /// wins. A value may contain several keywords, so the order is
    /// load-bearing and must not be rearranged.
    #[must_use]
    pub fn from_provider(raw: &str) -> Self {
        let raw = raw.to_uppercase();
        if raw.contains("CARDIO") {
            return Category::Cardio;
        }
        if raw.contains("STRENGTH") || raw.contains("POWER") || raw.contains("OLYMPIC") {
            return Category::Strength;
        }
        if raw.contains("PLYOMETRICS") {
            return Category::Cardio;
        }
        if raw.contains("STRETCHING") {
            return Category::Flexibility;
        }
        Category::Strength
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl TryFrom<&str> for Category {
    type Error = TaxonomyError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Category::iter()
            .find(|category| category.name() == value)
            .copied()
            .ok_or_else(|| TaxonomyError::UnknownCategory(value.to_string()))
    }
}

/// Fixed internal muscle groups.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum MuscleGroup {
    Chest,
    Back,
    Legs,
    Arms,
    Shoulders,
    Abs,
    FullBody,
}

impl MuscleGroup {
    #[must_use]
    pub fn iter() -> Iter<'static, MuscleGroup> {
        static MUSCLE_GROUPS: [MuscleGroup; 7] = [
            MuscleGroup::Chest,
            MuscleGroup::Back,
            MuscleGroup::Legs,
            MuscleGroup::Arms,
            MuscleGroup::Shoulders,
            MuscleGroup::Abs,
            MuscleGroup::FullBody,
        ];
        MUSCLE_GROUPS.iter()
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            MuscleGroup::Chest => "Chest",
            MuscleGroup::Back => "Back",
            MuscleGroup::Legs => "Legs",
            MuscleGroup::Arms => "Arms",
            MuscleGroup::Shoulders => "Shoulders",
            MuscleGroup::Abs => "Abs",
            MuscleGroup::FullBody => "Full Body",
        }
    }

    /// Maps free-text provider vocabulary onto the fixed muscle groups.
    /// Same ordered first-match-wins contract as
    /// [`Category::from_provider`].
    #[must_use]
    pub fn from_provider(raw: &str) -> Self {
        let raw = raw.to_uppercase();
        if raw.contains("CHEST") || raw.contains("PECTORALIS") {
            return MuscleGroup::Chest;
        }
        if raw.contains("BACK") || raw.contains("LATS") || raw.contains("TRAPEZIUS") {
            return MuscleGroup::Back;
        }
        if raw.contains("LEG")
            || raw.contains("QUAD")
            || raw.contains("CALF")
            || raw.contains("GLUTE")
            || raw.contains("HAMSTRING")
        {
            return MuscleGroup::Legs;
        }
        if raw.contains("ARM")
            || raw.contains("BICEP")
            || raw.contains("TRICEP")
            || raw.contains("FOREARM")
        {
            return MuscleGroup::Arms;
        }
        if raw.contains("SHOULDER") || raw.contains("DELTOID") {
            return MuscleGroup::Shoulders;
        }
        if raw.contains("ABS") || raw.contains("ABDOMINAL") {
            return MuscleGroup::Abs;
        }
        MuscleGroup::FullBody
    }
}

impl fmt::Display for MuscleGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl TryFrom<&str> for MuscleGroup {
    type Error = TaxonomyError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        MuscleGroup::iter()
            .find(|muscle_group| muscle_group.name() == value)
            .copied()
            .ok_or_else(|| TaxonomyError::UnknownMuscleGroup(value.to_string()))
    }
}

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum TaxonomyError {
    #[error("Unknown category: {0}")]
    UnknownCategory(String),
    #[error("Unknown muscle group: {0}")]
    UnknownMuscleGroup(String),
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[test]
    fn test_category_name() {
        let mut names = HashSet::new();

        for category in Category::iter() {
            let name = category.name();

            assert!(!name.is_empty());
            assert!(!names.contains(name));

            names.insert(name);
        }
    }

    #[test]
    fn test_muscle_group_name() {
        let mut names = HashSet::new();

        for muscle_group in MuscleGroup::iter() {
            let name = muscle_group.name();

            assert!(!name.is_empty());
            assert!(!names.contains(name));

            names.insert(name);
        }
    }

    #[rstest]
    #[case("cardio", Category::Cardio)]
    #[case("Olympic_Weightlifting", Category::Strength)]
    #[case("Olympic Weightlifting", Category::Strength)]
    #[case("Powerlifting", Category::Strength)]
    #[case("Plyometrics", Category::Cardio)]
    #[case("Stretching", Category::Flexibility)]
    #[case("cardio strength", Category::Cardio)]
    #[case("strength plyometrics", Category::Strength)]
    #[case("", Category::Strength)]
    #[case("something else", Category::Strength)]
    fn test_category_from_provider(#[case] raw: &str, #[case] expected: Category) {
        assert_eq!(Category::from_provider(raw), expected);
    }

    #[rstest]
    #[case("Strength", Ok(Category::Strength))]
    #[case("Balance", Ok(Category::Balance))]
    #[case("strength", Err(TaxonomyError::UnknownCategory("strength".to_string())))]
    #[case("Other", Err(TaxonomyError::UnknownCategory("Other".to_string())))]
    fn test_category_try_from(#[case] raw: &str, #[case] expected: Result<Category, TaxonomyError>) {
        assert_eq!(Category::try_from(raw), expected);
    }

    #[rstest]
    #[case("pectoralis major", MuscleGroup::Chest)]
    #[case("upper back", MuscleGroup::Back)]
    #[case("lats", MuscleGroup::Back)]
    #[case("trapezius", MuscleGroup::Back)]
    #[case("HAMSTRINGS", MuscleGroup::Legs)]
    #[case("quads", MuscleGroup::Legs)]
    #[case("calf raise", MuscleGroup::Legs)]
    #[case("calves", MuscleGroup::FullBody)]
    #[case("glutes", MuscleGroup::Legs)]
    #[case("biceps", MuscleGroup::Arms)]
    #[case("forearms", MuscleGroup::Arms)]
    #[case("delts", MuscleGroup::FullBody)]
    #[case("deltoids", MuscleGroup::Shoulders)]
    #[case("abdominals", MuscleGroup::Abs)]
    #[case("unknown-text", MuscleGroup::FullBody)]
    #[case("", MuscleGroup::FullBody)]
    fn test_muscle_group_from_provider(#[case] raw: &str, #[case] expected: MuscleGroup) {
        assert_eq!(MuscleGroup::from_provider(raw), expected);
    }

    #[rstest]
    #[case("Full Body", Ok(MuscleGroup::FullBody))]
    #[case("Abs", Ok(MuscleGroup::Abs))]
    #[case(
        "FullBody",
        Err(TaxonomyError::UnknownMuscleGroup("FullBody".to_string()))
    )]
    fn test_muscle_group_try_from(
        #[case] raw: &str,
        #[case] expected: Result<MuscleGroup, TaxonomyError>,
    ) {
        assert_eq!(MuscleGroup::try_from(raw), expected);
    }
}
