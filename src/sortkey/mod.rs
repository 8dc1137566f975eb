//! Natural-sort key extraction for directory rows.
//!
//! Pages and house numbers are stored as free text upstream, so plain lexical
//! ordering puts "10" before "2". These extractors pull the numeric parts out
//! once per record and hand back plain scalar keys the query layer (or a SQL
//! ORDER BY) can sort on directly.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::DirectoryRecord;

/// Reserved placeholder for a missing street or last name. Sorts after every
/// real value under ASCII collation; callers must treat it as "missing", not
/// as a street that happens to be named `~~~~`.
pub const STREET_SENTINEL: &str = "~~~~";

/// Reserved placeholder for a missing house or page number.
pub const NUMERIC_SENTINEL: u32 = 999_999;

fn rear_prefix_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)^(?:r\.|rear)\s*").unwrap())
}

fn leading_number_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\d+)\s*").unwrap())
}

fn first_number_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\d+").unwrap())
}

/// Split an address into `(street_name, house_number)` for ordering.
///
/// Blank input maps to the sentinels. A leading "r." or "rear" marker (rear
/// building) is stripped before the house number is read, so "r. 12 Duane"
/// sorts with the other entries on Duane. Addresses with no leading number
/// get house number 0.
///
/// A numeric-only address ("12") yields `("~~~~", 12)`: it lands in the same
/// street bucket as blank addresses but keeps its own house number. That
/// matches the historical dataset's established ordering, so it is kept
/// rather than split into a separate bucket.
pub fn parse_address_for_sort(addr: &str) -> (String, u32) {
    let trimmed = addr.trim();
    if trimmed.is_empty() {
        return (STREET_SENTINEL.to_string(), NUMERIC_SENTINEL);
    }

    let rest = rear_prefix_re().replace(trimmed, "");

    let (house, remainder) = match leading_number_re().captures(&rest) {
        Some(caps) => {
            let digits = caps.get(1).unwrap().as_str();
            let number = digits.parse::<u32>().unwrap_or(NUMERIC_SENTINEL);
            (number, &rest[caps.get(0).unwrap().end()..])
        }
        None => (0, rest.as_ref()),
    };

    let street = remainder.trim().to_lowercase();
    if street.is_empty() {
        (STREET_SENTINEL.to_string(), house)
    } else {
        (street, house)
    }
}

/// Extract a sortable page number from a free-text page label.
///
/// Takes the first digit run anywhere in the string, so "12a" and "p. 7"
/// order numerically. Blank or digit-free labels sort last.
pub fn parse_page_for_sort(page: &str) -> u32 {
    match first_number_re().find(page) {
        Some(m) => m.as_str().parse().unwrap_or(NUMERIC_SENTINEL),
        None => NUMERIC_SENTINEL,
    }
}

/// Lowercased, trimmed surname for ordering; blank names sort last via the
/// same sentinel as missing streets.
pub fn last_name_sort_key(last_name: &str) -> String {
    let trimmed = last_name.trim();
    if trimmed.is_empty() {
        STREET_SENTINEL.to_string()
    } else {
        trimmed.to_lowercase()
    }
}

/// The plain ledger ordering: year, then street, house number, surname.
/// Field order is the comparison order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LedgerKey {
    pub year: i32,
    pub street: String,
    pub house: u32,
    pub last_name: String,
}

/// Ledger ordering with the printed page slotted between house number and
/// surname, for consumers that group by year and page.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PageKey {
    pub year: i32,
    pub street: String,
    pub house: u32,
    pub page: u32,
    pub last_name: String,
}

/// Build the 4-component ledger key for a record.
pub fn ledger_key(record: &DirectoryRecord) -> LedgerKey {
    let (street, house) = parse_address_for_sort(record.display_address());
    LedgerKey {
        year: record.year,
        street,
        house,
        last_name: last_name_sort_key(&record.last_name),
    }
}

/// Build the 5-component key including the printed page.
pub fn page_key(record: &DirectoryRecord) -> PageKey {
    let (street, house) = parse_address_for_sort(record.display_address());
    PageKey {
        year: record.year,
        street,
        house,
        page: parse_page_for_sort(&record.printed_page),
        last_name: last_name_sort_key(&record.last_name),
    }
}
