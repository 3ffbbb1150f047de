//! Payment summaries derived from year records.

use crate::models::{Month, YearRecord};


/// Summary statistics for one member at the current slot price.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MemberSummary {
    pub months_paid: usize,
    pub months_unpaid: usize,
    pub amount_paid: f64,
    pub amount_owed: f64,
    pub payment_rate: f64,
}


/// Aggregate payment state across a whole year.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct YearSummary {
    pub total_members: usize,
    pub price_per_slot: f64,
    pub total_possible_amount: f64,
    pub total_paid_amount: f64,
    pub total_outstanding_amount: f64,
    pub overall_payment_rate: f64,
}


/// Per-member breakdown: months paid/unpaid, amounts, and payment rate.
pub fn member_summary(record: &YearRecord, member: &str) -> MemberSummary {
    let price_per_slot = record.price_per_slot();
    let months_paid = record.months_paid(member);
    let months_unpaid = Month::ALL.len() - months_paid;

    MemberSummary {
        months_paid,
        months_unpaid,
        amount_paid: months_paid as f64 * price_per_slot,
        amount_owed: months_unpaid as f64 * price_per_slot,
        payment_rate: months_paid as f64 / Month::ALL.len() as f64 * 100.0,
    }
}


/// Whole-year aggregate. All zeros when the roster is empty, with no
/// division performed.
pub fn summarize(record: &YearRecord) -> YearSummary {
    if record.members.is_empty() {
        return YearSummary::default();
    }

    let price_per_slot = record.price_per_slot();
    let months = Month::ALL.len() as f64;
    let total_possible = record.members.len() as f64 * months * price_per_slot;
    let total_paid: f64 = record
        .members
        .iter()
        .map(|member| record.months_paid(member) as f64 * price_per_slot)
        .sum();

    YearSummary {
        total_members: record.members.len(),
        price_per_slot,
        total_possible_amount: total_possible,
        total_paid_amount: total_paid,
        total_outstanding_amount: total_possible - total_paid,
        overall_payment_rate: if total_possible > 0.0 {
            total_paid / total_possible * 100.0
        } else {
            0.0
        },
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn scenario_record() -> YearRecord {
        // Two members on a $100 subscription: $50 per slot.
        let mut record = YearRecord::new(2024);
        record.members.push("Alice".to_string());
        record.members.push("Bob".to_string());
        record.settings.total_price = 100.0;
        record.settings.max_slots = 10;

        let alice = record.payments.entry("Alice".to_string()).or_default();
        for month in [Month::Jan, Month::Feb, Month::Mar] {
            alice.insert(month, true);
        }
        record.payments.entry("Bob".to_string()).or_default();
        record
    }

    #[test]
    fn test_empty_roster_summarizes_to_zero() {
        let record = YearRecord::new(2024);
        let summary = summarize(&record);

        assert_eq!(summary.total_members, 0);
        assert_eq!(summary.total_possible_amount, 0.0);
        assert_eq!(summary.total_paid_amount, 0.0);
        assert_eq!(summary.total_outstanding_amount, 0.0);
        assert_eq!(summary.overall_payment_rate, 0.0);
    }

    #[test]
    fn test_member_summary_scenario() {
        let record = scenario_record();
        let summary = member_summary(&record, "Alice");

        assert_eq!(summary.months_paid, 3);
        assert_eq!(summary.months_unpaid, 9);
        assert_eq!(summary.amount_paid, 150.0);
        assert_eq!(summary.amount_owed, 450.0);
        assert_eq!(summary.payment_rate, 25.0);
    }

    #[test]
    fn test_member_summary_unknown_member_is_all_unpaid() {
        let record = scenario_record();
        let summary = member_summary(&record, "Ghost");

        assert_eq!(summary.months_paid, 0);
        assert_eq!(summary.months_unpaid, 12);
        assert_eq!(summary.amount_paid, 0.0);
        assert_eq!(summary.payment_rate, 0.0);
    }

    #[test]
    fn test_summarize_scenario() {
        let record = scenario_record();
        let summary = summarize(&record);

        assert_eq!(summary.total_members, 2);
        assert_eq!(summary.price_per_slot, 50.0);
        assert_eq!(summary.total_possible_amount, 1200.0);
        assert_eq!(summary.total_paid_amount, 150.0);
        assert_eq!(summary.total_outstanding_amount, 1050.0);
        assert_eq!(summary.overall_payment_rate, 12.5);
    }
}
