//! OCR noise heuristics for directory rows.
//!
//! Each heuristic encodes a distinct, debatable data-quality assumption, so
//! each lives in its own named predicate rather than one inlined pattern
//! match. `classify` is the OR of the three; `audit` evaluates all of them
//! to report per-rule hit counts over a dataset.

use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::DirectoryRecord;

fn split_number_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d+\s+\d+\s+").unwrap())
}

/// Two separate digit groups at the start of an address ("5 1 Reade") are a
/// hallmark of OCR splitting a multi-digit house number across tokens.
pub fn has_split_house_number(address: &str) -> bool {
    split_number_re().is_match(address)
}

/// Any character outside letters, digits, whitespace, `.`, `,` and `'` in
/// the text fields. Historical directory entries never legitimately contain
/// other symbols; anything else came from the scanner.
pub fn has_illegal_symbol(blob: &str) -> bool {
    blob.chars()
        .any(|c| !(c.is_ascii_alphanumeric() || c.is_whitespace() || matches!(c, '.' | ',' | '\'')))
}

/// A token longer than four letters with no vowel at all (counting `y`).
/// Real English words of that length almost always contain one.
pub fn has_gibberish_token(blob: &str) -> bool {
    blob.to_lowercase().split_whitespace().any(|token| {
        token.chars().count() > 4
            && token.chars().all(|c| c.is_ascii_alphabetic())
            && !token.chars().any(|c| matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y'))
    })
}

/// Space-joined text fields in a fixed order; empty fields contribute
/// nothing but their separator.
fn field_blob(record: &DirectoryRecord) -> String {
    [
        record.last_name.as_str(),
        record.first_name.as_str(),
        record.occupation.as_str(),
        record.business_address.as_str(),
        record.home_address.as_str(),
    ]
    .join(" ")
}

/// Pure quality gate: `true` when the record passes every noise heuristic.
///
/// The rules are an independent OR of failure conditions, so evaluation
/// order never changes the answer; this short-circuits on the first hit.
pub fn classify(record: &DirectoryRecord) -> bool {
    if has_split_house_number(&record.business_address)
        || has_split_house_number(&record.home_address)
    {
        return false;
    }
    let blob = field_blob(record);
    !(has_illegal_symbol(&blob) || has_gibberish_token(&blob))
}

/// The individual heuristic a record failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QualityIssue {
    /// A house number split across digit groups in either address field.
    SplitHouseNumber,
    /// A character outside the directory alphabet.
    IllegalSymbol,
    /// A vowel-less alphabetic token longer than four characters.
    GibberishToken,
}

/// Evaluate every heuristic, not just the first failing one.
pub fn issues_for(record: &DirectoryRecord) -> Vec<QualityIssue> {
    let mut issues = Vec::new();
    if has_split_house_number(&record.business_address)
        || has_split_house_number(&record.home_address)
    {
        issues.push(QualityIssue::SplitHouseNumber);
    }
    let blob = field_blob(record);
    if has_illegal_symbol(&blob) {
        issues.push(QualityIssue::IllegalSymbol);
    }
    if has_gibberish_token(&blob) {
        issues.push(QualityIssue::GibberishToken);
    }
    issues
}

/// Per-rule hit counts over a dataset, produced by the `audit` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QualityReport {
    pub assessed_at: DateTime<Utc>,
    pub total_records: usize,
    pub high_quality: usize,
    pub split_house_number: usize,
    pub illegal_symbol: usize,
    pub gibberish_token: usize,
}

impl QualityReport {
    /// Fraction of records passing all heuristics, 0.0 when the set is empty.
    pub fn high_quality_share(&self) -> f64 {
        if self.total_records == 0 {
            0.0
        } else {
            self.high_quality as f64 / self.total_records as f64
        }
    }
}

/// Run every heuristic over the whole dataset and tally the hits.
pub fn audit(records: &[DirectoryRecord]) -> QualityReport {
    let mut report = QualityReport {
        assessed_at: Utc::now(),
        total_records: records.len(),
        high_quality: 0,
        split_house_number: 0,
        illegal_symbol: 0,
        gibberish_token: 0,
    };

    for record in records {
        let issues = issues_for(record);
        if issues.is_empty() {
            report.high_quality += 1;
        }
        for issue in issues {
            match issue {
                QualityIssue::SplitHouseNumber => report.split_house_number += 1,
                QualityIssue::IllegalSymbol => report.illegal_symbol += 1,
                QualityIssue::GibberishToken => report.gibberish_token += 1,
            }
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clean_record() -> DirectoryRecord {
        DirectoryRecord {
            last_name: "Smith".to_string(),
            first_name: "John".to_string(),
            occupation: "grocer".to_string(),
            business_address: "125 Reade St".to_string(),
            home_address: "12 Duane".to_string(),
            year: 1850,
            publisher: "Doggett".to_string(),
            printed_page: "12".to_string(),
        }
    }

    #[test]
    fn test_clean_record_is_high_quality() {
        assert!(classify(&clean_record()));
    }

    #[test]
    fn test_classify_is_deterministic() {
        let record = clean_record();
        assert_eq!(classify(&record), classify(&record));
    }

    #[test]
    fn test_split_house_number_fails() {
        let mut record = clean_record();
        record.business_address = "5 1 READE ST".to_string();
        assert!(!classify(&record));
        assert_eq!(issues_for(&record), vec![QualityIssue::SplitHouseNumber]);
    }

    #[test]
    fn test_split_house_number_checked_in_home_address_too() {
        let mut record = clean_record();
        record.home_address = "5 1 Read".to_string();
        assert!(!classify(&record));
    }

    #[test]
    fn test_single_house_number_is_fine() {
        assert!(!has_split_house_number("51 Reade St"));
        assert!(!has_split_house_number("Broadway"));
    }

    #[test]
    fn test_illegal_symbol_fails() {
        let mut record = clean_record();
        record.occupation = "grc#er".to_string();
        assert!(!classify(&record));
        assert_eq!(issues_for(&record), vec![QualityIssue::IllegalSymbol]);
    }

    #[test]
    fn test_directory_punctuation_is_allowed() {
        let mut record = clean_record();
        record.last_name = "O'Brien".to_string();
        record.occupation = "boots, shoes".to_string();
        record.business_address = "r. 12 Duane".to_string();
        assert!(classify(&record));
    }

    #[test]
    fn test_non_ascii_counts_as_illegal_symbol() {
        let mut record = clean_record();
        record.first_name = "Jos\u{00e9}".to_string();
        assert!(!classify(&record));
    }

    #[test]
    fn test_gibberish_token_fails() {
        let mut record = clean_record();
        record.last_name = "Xqzpfv".to_string();
        assert!(!classify(&record));
        assert_eq!(issues_for(&record), vec![QualityIssue::GibberishToken]);
    }

    #[test]
    fn test_short_consonant_tokens_pass() {
        // Four letters or fewer never trips the vowel rule.
        let mut record = clean_record();
        record.last_name = "Schmd".to_string();
        assert!(!classify(&record));
        record.last_name = "Schm".to_string();
        assert!(classify(&record));
    }

    #[test]
    fn test_y_counts_as_a_vowel() {
        let mut record = clean_record();
        record.last_name = "Smyth".to_string();
        assert!(classify(&record));
    }

    #[test]
    fn test_tokens_with_digits_are_not_gibberish() {
        // Only all-alphabetic tokens are subject to the vowel rule.
        assert!(!has_gibberish_token("b1234x"));
        assert!(has_gibberish_token("xqzpfv"));
    }

    #[test]
    fn test_empty_record_is_high_quality() {
        let record = DirectoryRecord {
            year: 1850,
            ..Default::default()
        };
        assert!(classify(&record));
    }

    #[test]
    fn test_audit_counts_per_rule() {
        let mut bad_symbol = clean_record();
        bad_symbol.occupation = "grc#er".to_string();
        let mut bad_split = clean_record();
        bad_split.business_address = "5 1 Reade".to_string();
        let records = vec![clean_record(), bad_symbol, bad_split];

        let report = audit(&records);
        assert_eq!(report.total_records, 3);
        assert_eq!(report.high_quality, 1);
        assert_eq!(report.illegal_symbol, 1);
        assert_eq!(report.split_house_number, 1);
        assert_eq!(report.gibberish_token, 0);
        assert!((report.high_quality_share() - 1.0 / 3.0).abs() < 1e-9);
    }
}
