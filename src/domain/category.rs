//! Static category catalog used to classify expenses.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// A fixed spending category. Loaded once and never mutated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    pub id: String,
    pub name: String,
}

impl Category {
    fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

static CATALOG: Lazy<Vec<Category>> = Lazy::new(|| {
    vec![
        Category::new("savings", "Savings"),
        Category::new("food", "Food"),
        Category::new("housing", "Housing"),
        Category::new("miscellaneous", "Miscellaneous"),
        Category::new("leisure", "Leisure"),
        Category::new("health", "Health"),
        Category::new("subscriptions", "Subscriptions"),
    ]
});

/// Returns the ordered category catalog.
pub fn catalog() -> &'static [Category] {
    &CATALOG
}

/// Looks up a category by identifier.
pub fn find(id: &str) -> Option<&'static Category> {
    CATALOG.iter().find(|category| category.id == id)
}
