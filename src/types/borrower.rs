//! Borrower types for the circulation engine

use serde::{Deserialize, Serialize};

/// Type alias for borrower identifiers
pub type BorrowerId = u32;

/// A registered borrower
///
/// Names are unique across the registry. Borrowers own their checkout
/// history: deleting a borrower cascades into the loan ledger.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Borrower {
    /// Unique borrower identifier
    pub id: BorrowerId,
    /// Unique borrower name
    pub name: String,
    /// Free-text status category (e.g. "good", "suspended")
    pub standing: String,
}

/// Payload for creating a borrower
///
/// `name` is required and must not collide with an existing borrower.
/// `standing` defaults to an empty string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BorrowerDraft {
    /// Unique borrower name (required)
    pub name: String,
    /// Free-text status category
    #[serde(default)]
    pub standing: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_deserializes_with_defaults() {
        let draft: BorrowerDraft = serde_json::from_str(r#"{"name": "Ada"}"#).unwrap();
        assert_eq!(draft.name, "Ada");
        assert_eq!(draft.standing, "");
    }

    #[test]
    fn test_draft_requires_name() {
        let result: Result<BorrowerDraft, _> = serde_json::from_str(r#"{"standing": "good"}"#);
        assert!(result.is_err());
    }
}
