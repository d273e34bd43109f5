//! Category lookup collection

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::CategoryId;

/// A known item category (name is unique)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: CategoryId::new_v7(),
            name: name.into(),
            created_at: Utc::now(),
        }
    }

    /// Case-insensitive name match, the way the create-post form resolves
    /// its free-text category input.
    pub fn matches_name(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name.trim())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_name_is_case_insensitive() {
        let category = Category::new("Electronics");
        assert!(category.matches_name("electronics"));
        assert!(category.matches_name("  ELECTRONICS "));
        assert!(!category.matches_name("books"));
    }
}
