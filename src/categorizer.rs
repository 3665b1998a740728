//! Guess the category of an expense from its description.
//!
//! This is a cosmetic heuristic used by the analytics views when an expense
//! was saved without an explicit category. It never affects how an expense
//! is split.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    FoodAndDining,
    Transportation,
    Entertainment,
    Utilities,
    Groceries,
    Shopping,
    Other,
}

/// Checked in order, the first rule with a matching keyword wins.
const RULES: &[(Category, &[&str])] = &[
    (
        Category::FoodAndDining,
        &["food", "restaurant", "dinner", "lunch"],
    ),
    (
        Category::Transportation,
        &["transport", "taxi", "fuel", "uber"],
    ),
    (
        Category::Entertainment,
        &["movie", "entertainment", "game", "concert"],
    ),
    (
        Category::Utilities,
        &["utility", "electric", "water", "internet"],
    ),
    (Category::Shopping, &["shopping", "clothes", "mall"]),
];

pub fn categorize(description: &str) -> Category {
    let description = description.to_lowercase();
    RULES
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| description.contains(k)))
        .map(|(category, _)| *category)
        .unwrap_or(Category::Other)
}

impl Category {
    pub fn label(&self) -> &'static str {
        match self {
            Category::FoodAndDining => "Food & Dining",
            Category::Transportation => "Transportation",
            Category::Entertainment => "Entertainment",
            Category::Utilities => "Utilities",
            Category::Groceries => "Groceries",
            Category::Shopping => "Shopping",
            Category::Other => "Other",
        }
    }

    /// The short name used in commands and in the database.
    pub fn name(&self) -> &'static str {
        match self {
            Category::FoodAndDining => "food",
            Category::Transportation => "transport",
            Category::Entertainment => "entertainment",
            Category::Utilities => "utilities",
            Category::Groceries => "groceries",
            Category::Shopping => "shopping",
            Category::Other => "other",
        }
    }

    pub fn from_name(name: &str) -> Option<Category> {
        match name.trim().to_lowercase().as_str() {
            "food" | "dining" => Some(Category::FoodAndDining),
            "transport" | "transportation" => Some(Category::Transportation),
            "entertainment" => Some(Category::Entertainment),
            "utilities" | "bills" => Some(Category::Utilities),
            "groceries" => Some(Category::Groceries),
            "shopping" => Some(Category::Shopping),
            "other" => Some(Category::Other),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categorize() {
        assert_eq!(categorize("Dinner at Restaurant"), Category::FoodAndDining);
        assert_eq!(categorize("Uber to the airport"), Category::Transportation);
        assert_eq!(categorize("Movie Tickets"), Category::Entertainment);
        assert_eq!(categorize("Electricity bill"), Category::Utilities);
        assert_eq!(categorize("New clothes"), Category::Shopping);
        assert_eq!(categorize("Rent"), Category::Other);
        assert_eq!(categorize(""), Category::Other);
    }

    #[test]
    fn test_categorize_rule_order() {
        // Both "lunch" and "taxi" match: food rules come first.
        assert_eq!(categorize("taxi to lunch"), Category::FoodAndDining);
        // Groceries has no keywords, "shopping" decides.
        assert_eq!(categorize("Grocery Shopping"), Category::Shopping);
        // Substring match, not word match.
        assert_eq!(categorize("Board games night"), Category::Entertainment);
    }

    #[test]
    fn test_category_names() {
        for category in [
            Category::FoodAndDining,
            Category::Transportation,
            Category::Entertainment,
            Category::Utilities,
            Category::Groceries,
            Category::Shopping,
            Category::Other,
        ] {
            assert_eq!(Category::from_name(category.name()), Some(category));
        }
        assert_eq!(Category::from_name(" Bills "), Some(Category::Utilities));
        assert_eq!(Category::from_name("pets"), None);
    }
}
