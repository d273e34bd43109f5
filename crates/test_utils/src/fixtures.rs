//! Test Data Fixtures
//!
//! Pre-built values for the common entity fields so tests only spell out
//! what they actually assert on.

use chrono::{Days, NaiveDate, Utc};
use fake::faker::address::en::CityName;
use fake::faker::lorem::en::Sentence;
use fake::Fake;
use once_cell::sync::Lazy;

use core_kernel::{ClaimId, PostId, UserId};

/// Canned category names matching the seeded category collection
pub static CATEGORY_NAMES: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec!["Electronics", "Keys", "Wallets", "Clothing", "Documents", "Other"]
});

/// String fixtures for entity fields
pub struct StringFixtures;

impl StringFixtures {
    /// A plausible location string
    pub fn location() -> String {
        CityName().fake()
    }

    /// A plausible item description
    pub fn description() -> String {
        Sentence(4..10).fake()
    }

    /// A plausible claim message
    pub fn claim_message() -> String {
        Sentence(6..14).fake()
    }

    /// A category name from the canned collection
    pub fn category_name() -> &'static str {
        CATEGORY_NAMES[0]
    }
}

/// Date fixtures
pub struct DateFixtures;

impl DateFixtures {
    /// A date a few days in the past, the typical "when was it lost" value
    pub fn recent() -> NaiveDate {
        Utc::now().date_naive() - Days::new(3)
    }
}

/// Identifier fixtures
pub struct IdFixtures;

impl IdFixtures {
    pub fn post_id() -> PostId {
        PostId::new_v7()
    }

    pub fn claim_id() -> ClaimId {
        ClaimId::new_v7()
    }

    pub fn user_id() -> UserId {
        UserId::new_v7()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixtures_produce_non_empty_values() {
        assert!(!StringFixtures::location().is_empty());
        assert!(!StringFixtures::description().is_empty());
        assert!(!StringFixtures::claim_message().is_empty());
        assert!(DateFixtures::recent() < Utc::now().date_naive());
    }
}
