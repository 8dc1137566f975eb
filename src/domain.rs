use serde::{Deserialize, Deserializer, Serialize};

use crate::sortkey::PageKey;

/// A raw directory row as captured by upstream OCR/transcription.
///
/// Every text field is free text and may be empty; nothing here is cleaned
/// or validated before it reaches the classifier and sort-key extractors.
/// Text fields deserialize leniently: a numeric value where text was
/// expected coerces to its string form, and null becomes empty, matching
/// the permissive shape of transcribed historical data.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DirectoryRecord {
    #[serde(default, deserialize_with = "lenient_string")]
    pub last_name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub first_name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub occupation: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub business_address: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub home_address: String,
    pub year: i32,
    #[serde(default, deserialize_with = "lenient_string")]
    pub publisher: String,
    /// Printed page label, not guaranteed numeric (e.g. "12a").
    #[serde(default, deserialize_with = "lenient_string")]
    pub printed_page: String,
}

impl DirectoryRecord {
    /// The address shown in the ledger and used for sort-key extraction:
    /// home address when present, otherwise business address.
    pub fn display_address(&self) -> &str {
        if self.home_address.trim().is_empty() {
            &self.business_address
        } else {
            &self.home_address
        }
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    struct LenientVisitor;

    impl<'de> serde::de::Visitor<'de> for LenientVisitor {
        type Value = String;

        fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
            f.write_str("a string, number, or null")
        }

        fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_string<E: serde::de::Error>(self, v: String) -> Result<String, E> {
            Ok(v)
        }

        fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_f64<E: serde::de::Error>(self, v: f64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_unit<E: serde::de::Error>(self) -> Result<String, E> {
            Ok(String::new())
        }

        fn visit_none<E: serde::de::Error>(self) -> Result<String, E> {
            Ok(String::new())
        }
    }

    deserializer.deserialize_any(LenientVisitor)
}

/// Derived per-record output, recomputed per query and never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassificationResult {
    /// Whether the record passed all OCR noise heuristics.
    pub is_high_quality: bool,
    /// Canonical ordering key for the record (year, street, house, page, name).
    pub sort_key: PageKey,
}

impl ClassificationResult {
    pub fn for_record(record: &DirectoryRecord) -> Self {
        Self {
            is_high_quality: crate::quality::classify(record),
            sort_key: crate::sortkey::page_key(record),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_address_prefers_home() {
        let record = DirectoryRecord {
            business_address: "12 Broadway".to_string(),
            home_address: "5 Pine".to_string(),
            ..Default::default()
        };
        assert_eq!(record.display_address(), "5 Pine");
    }

    #[test]
    fn test_display_address_falls_back_to_business() {
        let record = DirectoryRecord {
            business_address: "12 Broadway".to_string(),
            home_address: "   ".to_string(),
            ..Default::default()
        };
        assert_eq!(record.display_address(), "12 Broadway");
    }

    #[test]
    fn test_numeric_page_coerces_to_text() {
        let record: DirectoryRecord =
            serde_json::from_str(r#"{"last_name":"Smith","year":1850,"printed_page":12}"#).unwrap();
        assert_eq!(record.printed_page, "12");
    }

    #[test]
    fn test_null_text_field_becomes_empty() {
        let record: DirectoryRecord =
            serde_json::from_str(r#"{"last_name":null,"year":1850}"#).unwrap();
        assert_eq!(record.last_name, "");
    }

    #[test]
    fn test_classification_result_carries_flag_and_key() {
        let record = DirectoryRecord {
            last_name: "Smith".to_string(),
            home_address: "12 Duane".to_string(),
            printed_page: "3".to_string(),
            year: 1850,
            ..Default::default()
        };
        let result = ClassificationResult::for_record(&record);
        assert!(result.is_high_quality);
        assert_eq!(result.sort_key.street, "duane");
        assert_eq!(result.sort_key.house, 12);
        assert_eq!(result.sort_key.page, 3);
        assert_eq!(result.sort_key.last_name, "smith");
    }
}
