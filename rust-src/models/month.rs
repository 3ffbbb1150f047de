//! Calendar month codes used as payment keys.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;


/// A month code outside the fixed Jan..Dec set.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown month code '{0}' (expected Jan..Dec)")]
pub struct MonthParseError(String);


/// One of the twelve fixed month codes of a year record.
///
/// Declared in calendar order so month-keyed maps iterate and serialize
/// Jan through Dec.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Month {
    Jan,
    Feb,
    Mar,
    Apr,
    May,
    Jun,
    Jul,
    Aug,
    Sep,
    Oct,
    Nov,
    Dec,
}


impl Month {
    /// All twelve months in calendar order.
    pub const ALL: [Month; 12] = [
        Month::Jan,
        Month::Feb,
        Month::Mar,
        Month::Apr,
        Month::May,
        Month::Jun,
        Month::Jul,
        Month::Aug,
        Month::Sep,
        Month::Oct,
        Month::Nov,
        Month::Dec,
    ];

    /// The three-letter token stored on disk.
    pub fn code(&self) -> &'static str {
        match self {
            Month::Jan => "Jan",
            Month::Feb => "Feb",
            Month::Mar => "Mar",
            Month::Apr => "Apr",
            Month::May => "May",
            Month::Jun => "Jun",
            Month::Jul => "Jul",
            Month::Aug => "Aug",
            Month::Sep => "Sep",
            Month::Oct => "Oct",
            Month::Nov => "Nov",
            Month::Dec => "Dec",
        }
    }

    /// Parse a three-letter code, rejecting anything outside the fixed set.
    pub fn from_code(code: &str) -> Option<Month> {
        Month::ALL
            .iter()
            .copied()
            .find(|m| m.code().eq_ignore_ascii_case(code))
    }

    /// Month number, 1 through 12.
    #[allow(dead_code)]
    pub fn number(&self) -> u32 {
        *self as u32 + 1
    }

    /// Month for a 1-based number.
    #[allow(dead_code)]
    pub fn from_number(n: u32) -> Option<Month> {
        Month::ALL.get(n.checked_sub(1)? as usize).copied()
    }

    /// `count` consecutive months starting at `start`, wrapping December
    /// into January.
    pub fn cycle_from(start: Month, count: usize) -> Vec<Month> {
        (0..count)
            .map(|i| Month::ALL[(start as usize + i) % Month::ALL.len()])
            .collect()
    }
}


impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}


impl FromStr for Month {
    type Err = MonthParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Month::from_code(s).ok_or_else(|| MonthParseError(s.to_string()))
    }
}
