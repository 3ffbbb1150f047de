//! Persisted ledger record for one year.

use std::collections::BTreeMap;

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::models::Month;


/// Current time as a fixed-width ISO-8601 UTC string.
///
/// Microsecond precision keeps every timestamp the same width, so
/// lexicographic order on stored timestamps is chronological order.
pub fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}


fn default_total_price() -> f64 {
    100.0
}

fn default_max_slots() -> u32 {
    10
}


/// Subscription settings for one year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_total_price")]
    pub total_price: f64,
    #[serde(default = "default_max_slots")]
    pub max_slots: u32,
}


impl Default for Settings {
    fn default() -> Self {
        Self {
            total_price: default_total_price(),
            max_slots: default_max_slots(),
        }
    }
}


/// What a history entry recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoryAction {
    MarkedPaid,
    MarkedUnpaid,
}


impl HistoryAction {
    /// Action matching a new paid flag.
    pub fn for_paid(paid: bool) -> Self {
        if paid {
            HistoryAction::MarkedPaid
        } else {
            HistoryAction::MarkedUnpaid
        }
    }

    /// The wire token, also used for display.
    pub fn as_str(&self) -> &'static str {
        match self {
            HistoryAction::MarkedPaid => "marked_paid",
            HistoryAction::MarkedUnpaid => "marked_unpaid",
        }
    }
}


/// One paid/unpaid toggle event. Never edited or deleted once appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub timestamp: String,
    pub member: String,
    pub month: Month,
    pub action: HistoryAction,
    pub old_status: bool,
    pub new_status: bool,
}


/// Per-member paid flags. Absent months mean unpaid.
pub type MonthFlags = BTreeMap<Month, bool>;


/// Complete ledger state for one year.
///
/// Collection fields and settings carry schema-level defaults, so a
/// record written by an older version (or with fields stripped) still
/// loads instead of failing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearRecord {
    pub year: i32,
    #[serde(default)]
    pub members: Vec<String>,
    #[serde(default)]
    pub payments: BTreeMap<String, MonthFlags>,
    #[serde(default)]
    pub payment_history: Vec<HistoryEntry>,
    #[serde(default)]
    pub settings: Settings,
    #[serde(default = "now_iso")]
    pub created_at: String,
    #[serde(default = "now_iso")]
    pub updated_at: String,
}


impl YearRecord {
    /// Fresh empty record with default settings.
    pub fn new(year: i32) -> Self {
        let now = now_iso();
        Self {
            year,
            members: Vec::new(),
            payments: BTreeMap::new(),
            payment_history: Vec::new(),
            settings: Settings::default(),
            created_at: now.clone(),
            updated_at: now,
        }
    }

    /// Cost of one slot: total price split evenly across the roster.
    /// Recomputed on demand, never stored.
    pub fn price_per_slot(&self) -> f64 {
        self.settings.total_price / self.members.len().max(1) as f64
    }

    pub fn has_member(&self, name: &str) -> bool {
        self.members.iter().any(|m| m == name)
    }

    /// Paid flag for a member and month. Unset means unpaid.
    pub fn payment_status(&self, member: &str, month: Month) -> bool {
        self.payments
            .get(member)
            .and_then(|flags| flags.get(&month))
            .copied()
            .unwrap_or(false)
    }

    /// Number of months flagged paid for a member.
    pub fn months_paid(&self, member: &str) -> usize {
        self.payments
            .get(member)
            .map(|flags| flags.values().filter(|paid| **paid).count())
            .unwrap_or(0)
    }
}


/// Snapshot of the entire store, keyed by decimal year string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupBundle {
    pub backup_timestamp: String,
    pub years: BTreeMap<String, YearRecord>,
}
