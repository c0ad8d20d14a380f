//! Session draft store
//!
//! Remembers the in-progress draft per `(merchant, operation kind)` so a
//! user returning to a checkout screen resumes where they left off. The
//! store is owned by the session flow and injected where needed; there is
//! no global state.

use crate::builder::OperationDraft;
use shared::operation::request::OperationKind;
use std::collections::HashMap;

#[derive(Debug, Default)]
pub struct DraftStore {
    drafts: HashMap<(String, OperationKind), OperationDraft>,
}

impl DraftStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn save(&mut self, merchant_id: &str, kind: OperationKind, draft: OperationDraft) {
        self.drafts.insert((merchant_id.to_string(), kind), draft);
    }

    pub fn get(&self, merchant_id: &str, kind: OperationKind) -> Option<&OperationDraft> {
        self.drafts.get(&(merchant_id.to_string(), kind))
    }

    /// Remove and return the draft, typically after a successful submission
    pub fn take(&mut self, merchant_id: &str, kind: OperationKind) -> Option<OperationDraft> {
        self.drafts.remove(&(merchant_id.to_string(), kind))
    }

    pub fn clear(&mut self) {
        self.drafts.clear();
    }

    pub fn len(&self) -> usize {
        self.drafts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drafts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_draft(amount: f64) -> OperationDraft {
        let mut draft = OperationDraft::default();
        draft.plan.amount = amount;
        draft
    }

    #[test]
    fn test_save_and_get_keyed_by_merchant_and_kind() {
        let mut store = DraftStore::new();
        store.save("m_1", OperationKind::Checkout, create_test_draft(10.0));
        store.save("m_1", OperationKind::Payment, create_test_draft(20.0));
        store.save("m_2", OperationKind::Checkout, create_test_draft(30.0));

        assert_eq!(
            store.get("m_1", OperationKind::Checkout).unwrap().plan.amount,
            10.0
        );
        assert_eq!(
            store.get("m_1", OperationKind::Payment).unwrap().plan.amount,
            20.0
        );
        assert_eq!(
            store.get("m_2", OperationKind::Checkout).unwrap().plan.amount,
            30.0
        );
        assert!(store.get("m_2", OperationKind::Payment).is_none());
    }

    #[test]
    fn test_save_overwrites_existing() {
        let mut store = DraftStore::new();
        store.save("m_1", OperationKind::Send, create_test_draft(10.0));
        store.save("m_1", OperationKind::Send, create_test_draft(99.0));
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("m_1", OperationKind::Send).unwrap().plan.amount, 99.0);
    }

    #[test]
    fn test_take_removes_draft() {
        let mut store = DraftStore::new();
        store.save("m_1", OperationKind::Checkout, create_test_draft(10.0));
        let taken = store.take("m_1", OperationKind::Checkout);
        assert!(taken.is_some());
        assert!(store.is_empty());
    }
}
