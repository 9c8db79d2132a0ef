//! Ledger audit tokens.
//!
//! Every credit transaction carries an opaque token computed as a SHA-256
//! chain: the token of the previous transaction on the same lot lineage is
//! folded into the current entry's canonical content, so any rewrite of
//! history invalidates every later token. The first link in a chain uses a
//! known seed. Tokens are audit artifacts only; there is no external ledger
//! anchoring.

use crate::hashing;
use crate::types::DbId;

/// Known seed value for the first entry in a lot's token chain.
const CHAIN_SEED: &str = "BLUE_CARBON_LEDGER_SEED_V1";

/// Compute the audit token for a ledger entry.
///
/// `prev_token` is the token of the previous transaction on the same lot
/// lineage, or `None` for the opening `issue` entry.
pub fn compute_ledger_token(prev_token: Option<&str>, entry: &str) -> String {
    let prev = prev_token.unwrap_or(CHAIN_SEED);
    let combined = format!("{prev}|{entry}");
    hashing::sha256_hex(combined.as_bytes())
}

/// Canonical string representation of a transaction's content.
///
/// Field order is part of the token contract; changing it invalidates
/// existing chains.
pub fn canonical_entry(
    credit_id: DbId,
    tx_type: &str,
    amount: f64,
    from_profile: Option<DbId>,
    to_profile: Option<DbId>,
) -> String {
    let from = from_profile.map_or_else(|| "-".to_string(), |id| id.to_string());
    let to = to_profile.map_or_else(|| "-".to_string(), |id| id.to_string());
    format!("{credit_id}|{tx_type}|{amount}|{from}|{to}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn some_id() -> DbId {
        uuid::Uuid::from_u128(7)
    }

    #[test]
    fn first_entry_uses_seed() {
        let token = compute_ledger_token(None, "entry");
        assert_eq!(token.len(), 64);
    }

    #[test]
    fn chained_entry_differs_from_first() {
        let first = compute_ledger_token(None, "entry_1");
        let second = compute_ledger_token(Some(&first), "entry_2");
        assert_ne!(first, second);
        assert_eq!(second.len(), 64);
    }

    #[test]
    fn same_input_produces_same_token() {
        assert_eq!(
            compute_ledger_token(None, "same"),
            compute_ledger_token(None, "same")
        );
    }

    #[test]
    fn different_prev_token_produces_different_result() {
        let a = compute_ledger_token(Some("token_a"), "same");
        let b = compute_ledger_token(Some("token_b"), "same");
        assert_ne!(a, b);
    }

    #[test]
    fn canonical_entry_is_order_sensitive() {
        let id = some_id();
        let issue = canonical_entry(id, "issue", 100.0, None, Some(id));
        let retire = canonical_entry(id, "retire", 100.0, Some(id), None);
        assert_ne!(issue, retire);
    }

    #[test]
    fn canonical_entry_marks_missing_parties() {
        let entry = canonical_entry(some_id(), "issue", 42.0, None, None);
        assert!(entry.ends_with("|-|-"));
    }
}
