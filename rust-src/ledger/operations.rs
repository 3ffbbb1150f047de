//! Ledger operations: the mutations and queries callers run against a year.

use thiserror::Error;

use crate::models::{now_iso, HistoryAction, HistoryEntry, Month, MonthFlags, YearRecord};
use crate::storage::{RecordStore, StoreError};


const NAME_MAX_LEN: usize = 50;
const NAME_FORBIDDEN: [char; 9] = ['/', '\\', ':', '*', '?', '"', '<', '>', '|'];


#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("{0}")]
    InvalidName(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}


/// Validate and normalize a member display name.
///
/// Callers run this before any mutation; the store itself accepts any
/// string that made it into a record.
pub fn validate_member_name(name: &str) -> Result<String, LedgerError> {
    let name = name.trim();

    if name.is_empty() {
        return Err(LedgerError::InvalidName(
            "member name cannot be empty".to_string(),
        ));
    }
    if name.chars().count() > NAME_MAX_LEN {
        return Err(LedgerError::InvalidName(format!(
            "member name must be {NAME_MAX_LEN} characters or less"
        )));
    }
    if let Some(c) = name.chars().find(|c| NAME_FORBIDDEN.contains(c)) {
        return Err(LedgerError::InvalidName(format!(
            "member name cannot contain '{c}'"
        )));
    }

    Ok(name.to_string())
}


/// Ledger operations over a record store.
///
/// Every mutation is one load→mutate→save transaction via
/// [`RecordStore::with_year`]; operations are not atomic with respect
/// to each other.
pub struct Ledger<'a> {
    store: &'a RecordStore,
}


impl<'a> Ledger<'a> {
    pub fn new(store: &'a RecordStore) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &RecordStore {
        self.store
    }

    /// Add a member to a year's roster.
    ///
    /// Returns `false` without writing when the name is already present.
    pub fn add_member(&self, year: i32, name: &str) -> Result<bool, LedgerError> {
        let name = validate_member_name(name)?;

        let added = self.store.with_year_opt(year, |record| {
            if record.has_member(&name) {
                return None;
            }
            record.members.push(name.clone());
            record.payments.entry(name.clone()).or_default();
            Some(())
        })?;

        Ok(added.is_some())
    }

    /// Remove a member and their payment flags.
    ///
    /// History entries referencing the member are retained unchanged.
    /// Returns `false` without writing when the name is absent.
    pub fn remove_member(&self, year: i32, name: &str) -> Result<bool, LedgerError> {
        let removed = self.store.with_year_opt(year, |record| {
            if !record.has_member(name) {
                return None;
            }
            record.members.retain(|m| m != name);
            record.payments.remove(name);
            Some(())
        })?;

        Ok(removed.is_some())
    }

    /// Set one member/month paid flag.
    ///
    /// A history entry is appended only when the flag actually changes;
    /// the flag itself is written either way. Returns whether the status
    /// changed.
    pub fn set_payment(
        &self,
        year: i32,
        member: &str,
        month: Month,
        paid: bool,
    ) -> Result<bool, LedgerError> {
        Ok(self
            .store
            .with_year(year, |record| apply_payment(record, member, month, paid))?)
    }

    /// Apply [`Ledger::set_payment`] semantics to several months in one
    /// transaction.
    ///
    /// Each month whose status actually changes gets its own history
    /// entry; no-op months get none. Returns the number of changed
    /// months.
    pub fn bulk_set_payments(
        &self,
        year: i32,
        member: &str,
        months: &[Month],
        paid: bool,
    ) -> Result<usize, LedgerError> {
        Ok(self.store.with_year(year, |record| {
            months
                .iter()
                .filter(|month| apply_payment(record, member, **month, paid))
                .count()
        })?)
    }

    /// Copy the member roster from one year into another.
    ///
    /// Overwrites the target's roster and resets every copied member's
    /// payment flags to empty. The target's history and settings are
    /// untouched.
    pub fn copy_members_forward(
        &self,
        source_year: i32,
        target_year: i32,
    ) -> Result<usize, LedgerError> {
        let members = self.store.load(source_year).members;

        Ok(self.store.with_year(target_year, |record| {
            record.payments = members
                .iter()
                .map(|name| (name.clone(), MonthFlags::new()))
                .collect();
            record.members = members.clone();
            record.members.len()
        })?)
    }

    /// Overwrite both subscription settings for a year.
    ///
    /// Validation (total price ≥ 0, slots ≥ 1) is the caller's contract.
    pub fn update_settings(
        &self,
        year: i32,
        total_price: f64,
        max_slots: u32,
    ) -> Result<(), LedgerError> {
        self.store.with_year(year, |record| {
            record.settings.total_price = total_price;
            record.settings.max_slots = max_slots;
        })?;
        Ok(())
    }

    /// Payment change history for a year, newest first.
    ///
    /// The fixed-width timestamp format makes string comparison match
    /// chronological order. `limit` truncates after sorting.
    pub fn get_history(
        &self,
        year: i32,
        member: Option<&str>,
        limit: Option<usize>,
    ) -> Vec<HistoryEntry> {
        let mut history: Vec<HistoryEntry> = self
            .store
            .load(year)
            .payment_history
            .into_iter()
            .filter(|entry| member.map_or(true, |m| entry.member == m))
            .collect();

        history.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

        if let Some(limit) = limit {
            history.truncate(limit);
        }
        history
    }

    /// One member's month → paid map (empty when unknown).
    #[allow(dead_code)]
    pub fn member_payments(&self, year: i32, member: &str) -> MonthFlags {
        self.store
            .load(year)
            .payments
            .get(member)
            .cloned()
            .unwrap_or_default()
    }
}


fn apply_payment(record: &mut YearRecord, member: &str, month: Month, paid: bool) -> bool {
    let old_status = record.payment_status(member, month);

    if old_status != paid {
        record.payment_history.push(HistoryEntry {
            timestamp: now_iso(),
            member: member.to_string(),
            month,
            action: HistoryAction::for_paid(paid),
            old_status,
            new_status: paid,
        });
    }

    record
        .payments
        .entry(member.to_string())
        .or_default()
        .insert(month, paid);

    old_status != paid
}


#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn test_ledger() -> (TempDir, RecordStore) {
        let tmp_dir = TempDir::new().unwrap();
        let store = RecordStore::open(tmp_dir.path()).unwrap();
        (tmp_dir, store)
    }

    #[test]
    fn test_add_member_creates_empty_payments_entry() {
        let (_tmp, store) = test_ledger();
        let ledger = Ledger::new(&store);

        assert!(ledger.add_member(2024, "Alice").unwrap());

        let record = store.load(2024);
        assert_eq!(record.members, vec!["Alice".to_string()]);
        assert_eq!(record.payments.get("Alice"), Some(&MonthFlags::new()));
    }

    #[test]
    fn test_add_member_twice_is_noop() {
        let (_tmp, store) = test_ledger();
        let ledger = Ledger::new(&store);

        assert!(ledger.add_member(2024, "Alice").unwrap());
        assert!(!ledger.add_member(2024, "Alice").unwrap());
        assert_eq!(store.load(2024).members.len(), 1);
    }

    #[test]
    fn test_add_member_trims_name() {
        let (_tmp, store) = test_ledger();
        let ledger = Ledger::new(&store);

        ledger.add_member(2024, "  Alice  ").unwrap();
        assert_eq!(store.load(2024).members, vec!["Alice".to_string()]);
    }

    #[test]
    fn test_validate_member_name_rejections() {
        assert!(validate_member_name("").is_err());
        assert!(validate_member_name("   ").is_err());
        assert!(validate_member_name(&"x".repeat(51)).is_err());
        assert!(validate_member_name("a/b").is_err());
        assert!(validate_member_name("a|b").is_err());
        assert!(validate_member_name("Alice").is_ok());
        assert!(validate_member_name(&"x".repeat(50)).is_ok());
    }

    #[test]
    fn test_remove_member_keeps_history() {
        let (_tmp, store) = test_ledger();
        let ledger = Ledger::new(&store);

        ledger.add_member(2024, "Alice").unwrap();
        ledger.set_payment(2024, "Alice", Month::Jan, true).unwrap();
        let members_before = store.load(2024).members.clone();

        assert!(ledger.remove_member(2024, "Alice").unwrap());
        assert!(!ledger.remove_member(2024, "Alice").unwrap());

        let record = store.load(2024);
        assert!(record.members.is_empty());
        assert!(!record.payments.contains_key("Alice"));
        // History survives the removal.
        assert_eq!(record.payment_history.len(), 1);
        assert_eq!(record.payment_history[0].member, "Alice");

        // add then remove restored the roster to its prior (empty) state
        // less the member, matching the pre-add roster.
        assert_eq!(members_before, vec!["Alice".to_string()]);
    }

    #[test]
    fn test_set_payment_logs_only_on_change() {
        let (_tmp, store) = test_ledger();
        let ledger = Ledger::new(&store);

        ledger.add_member(2024, "Alice").unwrap();

        assert!(ledger.set_payment(2024, "Alice", Month::Jan, true).unwrap());
        assert!(!ledger.set_payment(2024, "Alice", Month::Jan, true).unwrap());

        let record = store.load(2024);
        assert!(record.payment_status("Alice", Month::Jan));
        assert_eq!(record.payment_history.len(), 1);

        let entry = &record.payment_history[0];
        assert_eq!(entry.action, HistoryAction::MarkedPaid);
        assert!(!entry.old_status);
        assert!(entry.new_status);
    }

    #[test]
    fn test_set_payment_unpaid_logs_marked_unpaid() {
        let (_tmp, store) = test_ledger();
        let ledger = Ledger::new(&store);

        ledger.set_payment(2024, "Alice", Month::Jan, true).unwrap();
        ledger.set_payment(2024, "Alice", Month::Jan, false).unwrap();

        let history = store.load(2024).payment_history;
        assert_eq!(history.len(), 2);
        assert_eq!(history[1].action, HistoryAction::MarkedUnpaid);
        assert!(history[1].old_status);
        assert!(!history[1].new_status);
    }

    #[test]
    fn test_bulk_set_payments_touches_only_named_months() {
        let (_tmp, store) = test_ledger();
        let ledger = Ledger::new(&store);

        ledger.add_member(2024, "Bob").unwrap();
        let months = Month::cycle_from(Month::Nov, 3);
        let changed = ledger.bulk_set_payments(2024, "Bob", &months, true).unwrap();
        assert_eq!(changed, 3);

        let record = store.load(2024);
        for month in [Month::Nov, Month::Dec, Month::Jan] {
            assert!(record.payment_status("Bob", month));
        }
        for month in [Month::Feb, Month::Oct] {
            assert!(!record.payment_status("Bob", month));
        }
    }

    #[test]
    fn test_bulk_set_payments_logs_per_changed_month() {
        let (_tmp, store) = test_ledger();
        let ledger = Ledger::new(&store);

        ledger.set_payment(2024, "Bob", Month::Nov, true).unwrap();

        let months = [Month::Nov, Month::Dec];
        let changed = ledger.bulk_set_payments(2024, "Bob", &months, true).unwrap();
        assert_eq!(changed, 1);

        // One entry from the single set, one from the bulk change; the
        // already-paid November gets no second entry.
        let history = store.load(2024).payment_history;
        assert_eq!(history.len(), 2);
        assert_eq!(history[1].month, Month::Dec);
    }

    #[test]
    fn test_copy_members_forward_resets_payments() {
        let (_tmp, store) = test_ledger();
        let ledger = Ledger::new(&store);

        ledger.add_member(2023, "Alice").unwrap();
        ledger.add_member(2023, "Bob").unwrap();
        ledger.set_payment(2023, "Alice", Month::Jan, true).unwrap();

        ledger.add_member(2024, "Carol").unwrap();
        ledger.set_payment(2024, "Carol", Month::Feb, true).unwrap();
        ledger.update_settings(2024, 150.0, 8).unwrap();

        let copied = ledger.copy_members_forward(2023, 2024).unwrap();
        assert_eq!(copied, 2);

        let record = store.load(2024);
        assert_eq!(record.members, vec!["Alice".to_string(), "Bob".to_string()]);
        assert_eq!(record.payments.get("Alice"), Some(&MonthFlags::new()));
        assert!(!record.payments.contains_key("Carol"));
        // Target history and settings are untouched.
        assert_eq!(record.payment_history.len(), 1);
        assert_eq!(record.settings.total_price, 150.0);
        assert_eq!(record.settings.max_slots, 8);
    }

    #[test]
    fn test_get_history_filters_sorts_and_limits() {
        let (_tmp, store) = test_ledger();
        let ledger = Ledger::new(&store);

        ledger.set_payment(2024, "Alice", Month::Jan, true).unwrap();
        ledger.set_payment(2024, "Bob", Month::Jan, true).unwrap();
        ledger.set_payment(2024, "Alice", Month::Feb, true).unwrap();

        let all = ledger.get_history(2024, None, None);
        assert_eq!(all.len(), 3);
        // Newest first.
        assert!(all[0].timestamp >= all[1].timestamp);
        assert!(all[1].timestamp >= all[2].timestamp);

        let alice = ledger.get_history(2024, Some("Alice"), None);
        assert_eq!(alice.len(), 2);
        assert!(alice.iter().all(|entry| entry.member == "Alice"));

        let limited = ledger.get_history(2024, None, Some(2));
        assert_eq!(limited.len(), 2);
    }

    #[test]
    fn test_member_payments_defaults_empty() {
        let (_tmp, store) = test_ledger();
        let ledger = Ledger::new(&store);

        assert!(ledger.member_payments(2024, "Ghost").is_empty());

        ledger.set_payment(2024, "Alice", Month::Mar, true).unwrap();
        let flags = ledger.member_payments(2024, "Alice");
        assert_eq!(flags.get(&Month::Mar), Some(&true));
    }
}
