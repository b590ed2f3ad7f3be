//! Credit issuance rules
//!
//! The demo bank approves every credit. The decision lives behind a named
//! placeholder so a real scoring rule can replace it without touching the
//! dashboard flow.

use crate::models::CreditRequest;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "decision", rename_all = "lowercase")]
pub enum CreditDecision {
    Approved,
    Declined { reason: String },
}

impl CreditDecision {
    pub fn is_approved(&self) -> bool {
        matches!(self, CreditDecision::Approved)
    }
}

/// Placeholder approval rule: always approves.
pub fn placeholder_credit_decision(_request: &CreditRequest) -> CreditDecision {
    CreditDecision::Approved
}
