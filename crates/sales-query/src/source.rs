//! Record retrieval boundary.
//!
//! The dispatcher never talks to a database directly. It builds a
//! [`RecordFilter`] and hands it to a [`RecordSource`]. Any closure of the
//! shape `Fn(&RecordFilter) -> Result<Vec<SaleRecord>, SourceError>` is a
//! source, and [`InMemorySource`] serves records loaded from a JSON file.

use std::fs;
use std::path::Path;

use crate::error::SourceError;
use crate::model::{DateRange, SaleRecord};

/// Selection criteria for sale records. Every predicate is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordFilter {
    /// Inclusive date bounds; an unresolved range selects every date.
    pub date_range: DateRange,
    /// Case-insensitive substring of the store name.
    pub store_name_contains: Option<String>,
    /// Case-insensitive substring of the item name.
    pub item_name_contains: Option<String>,
}

impl RecordFilter {
    /// Whether `record` satisfies every predicate present on this filter.
    pub fn matches(&self, record: &SaleRecord) -> bool {
        self.date_range.contains(record.date)
            && contains_ignore_case(&record.store, self.store_name_contains.as_deref())
            && contains_ignore_case(&record.item_name, self.item_name_contains.as_deref())
    }
}

fn contains_ignore_case(haystack: &str, needle: Option<&str>) -> bool {
    match needle {
        Some(needle) => haystack.to_lowercase().contains(&needle.to_lowercase()),
        None => true,
    }
}

/// Something that can return the sale records matching a filter.
pub trait RecordSource {
    fn fetch(&self, filter: &RecordFilter) -> Result<Vec<SaleRecord>, SourceError>;
}

impl<F> RecordSource for F
where
    F: Fn(&RecordFilter) -> Result<Vec<SaleRecord>, SourceError>,
{
    fn fetch(&self, filter: &RecordFilter) -> Result<Vec<SaleRecord>, SourceError> {
        self(filter)
    }
}

/// A record source backed by records held in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    records: Vec<SaleRecord>,
}

impl InMemorySource {
    pub fn new(records: Vec<SaleRecord>) -> Self {
        Self { records }
    }

    /// Load a JSON array of sale records.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Io`] if the file cannot be read, or
    /// [`SourceError::Decode`] if it is not an array of records.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, SourceError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| SourceError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    pub fn from_json_str(text: &str) -> Result<Self, SourceError> {
        Ok(Self::new(serde_json::from_str(text)?))
    }

    pub fn records(&self) -> &[SaleRecord] {
        &self.records
    }
}

impl RecordSource for InMemorySource {
    fn fetch(&self, filter: &RecordFilter) -> Result<Vec<SaleRecord>, SourceError> {
        Ok(self
            .records
            .iter()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::io::Write;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn record(date: NaiveDate, store: &str, item: &str) -> SaleRecord {
        SaleRecord {
            date,
            store: store.to_string(),
            item_name: item.to_string(),
            revenue: 10.0,
            quantity: 1,
        }
    }

    fn source() -> InMemorySource {
        InMemorySource::new(vec![
            record(d(2025, 7, 13), "Store A", "Wireless Mouse"),
            record(d(2025, 7, 14), "Store A", "Laptop"),
            record(d(2025, 7, 20), "Store B", "mouse pad"),
            record(d(2025, 7, 21), "Store B", "Laptop"),
        ])
    }

    #[test]
    fn test_empty_filter_selects_everything() {
        let rows = source().fetch(&RecordFilter::default()).unwrap();
        assert_eq!(rows.len(), 4);
    }

    #[test]
    fn test_date_bounds_are_inclusive() {
        let filter = RecordFilter {
            date_range: DateRange::between(d(2025, 7, 14), d(2025, 7, 20)),
            ..Default::default()
        };
        let rows = source().fetch(&filter).unwrap();
        let dates: Vec<NaiveDate> = rows.iter().map(|r| r.date).collect();
        assert_eq!(dates, vec![d(2025, 7, 14), d(2025, 7, 20)]);
    }

    #[test]
    fn test_store_and_item_match_case_insensitive_substrings() {
        let filter = RecordFilter {
            store_name_contains: Some("store b".to_string()),
            item_name_contains: Some("MOUSE".to_string()),
            ..Default::default()
        };
        let rows = source().fetch(&filter).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].item_name, "mouse pad");
    }

    #[test]
    fn test_closure_is_a_source() {
        let failing = |_: &RecordFilter| -> Result<Vec<SaleRecord>, SourceError> {
            Err(SourceError::Unavailable("connection refused".to_string()))
        };
        assert!(failing.fetch(&RecordFilter::default()).is_err());
    }

    #[test]
    fn test_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"date": "2025-07-20", "store": "A", "item_name": "mouse", "revenue": 100, "quantity": 2}}]"#
        )
        .unwrap();
        file.flush().unwrap();

        let source = InMemorySource::from_json_file(file.path()).unwrap();
        assert_eq!(source.records().len(), 1);
        assert_eq!(source.records()[0].revenue, 100.0);
    }

    #[test]
    fn test_from_json_file_missing() {
        let err = InMemorySource::from_json_file("/nonexistent/sales.json").unwrap_err();
        assert!(matches!(err, SourceError::Io { .. }));
    }

    #[test]
    fn test_from_json_str_rejects_non_records() {
        let err = InMemorySource::from_json_str(r#"{"rows": []}"#).unwrap_err();
        assert!(matches!(err, SourceError::Decode(_)));
    }
}
