use chrono::{DateTime, Utc};
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// One CSV row: the header's columns, in order, each paired with a cell value.
///
/// A value is `None` when the source row was shorter than the header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    columns: Arc<[String]>,
    values: Vec<Option<String>>,
}

impl Record {
    pub fn get(&self, column: &str) -> Option<&str> {
        let idx = self.columns.iter().position(|c| c == column)?;
        self.values[idx].as_deref()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.columns
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().map(Option::as_deref))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (key, value) in self.iter() {
            map.serialize_entry(key, &value)?;
        }
        map.end()
    }
}

/// Rows in source order sharing one header.
///
/// Serializes as a JSON array of objects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dataset {
    columns: Arc<[String]>,
    records: Vec<Record>,
}

impl Dataset {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns: columns.into(),
            records: Vec::new(),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Appends a row, padding it with `None` up to the column count.
    ///
    /// Rows longer than the header are handed back unchanged.
    pub fn try_push_row(
        &mut self,
        mut values: Vec<Option<String>>,
    ) -> std::result::Result<(), Vec<Option<String>>> {
        if values.len() > self.columns.len() {
            return Err(values);
        }
        values.resize(self.columns.len(), None);
        self.records.push(Record {
            columns: Arc::clone(&self.columns),
            values,
        });
        Ok(())
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The first `min(n, len)` records as a new dataset with the same columns.
    pub fn preview(&self, n: usize) -> Dataset {
        let end = n.min(self.records.len());
        Dataset {
            columns: Arc::clone(&self.columns),
            records: self.records[..end].to_vec(),
        }
    }
}

impl Serialize for Dataset {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(&self.records)
    }
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Raw uploaded CSV content together with the name it was submitted under.
#[derive(Debug, Clone)]
pub struct CsvSource {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl CsvSource {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes: bytes.into(),
        }
    }
}

/// Identifier of one conversion; also names its output file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ConversionId(String);

impl ConversionId {
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Accepts only canonical UUIDs, so an id is always safe to use as a file name.
    pub fn parse(raw: &str) -> Option<Self> {
        uuid::Uuid::parse_str(raw)
            .ok()
            .map(|id| Self(id.hyphenated().to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn file_name(&self) -> String {
        format!("{}.json", self.0)
    }
}

impl fmt::Display for ConversionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone)]
pub struct TransformResult {
    pub dataset: Dataset,
    pub json_output: String,
}

#[derive(Debug, Clone)]
pub struct ConversionOutput {
    pub id: ConversionId,
    pub dataset: Dataset,
    pub output_path: String,
    pub converted_at: DateTime<Utc>,
    pub bytes_written: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Dataset {
        let mut dataset = Dataset::new(vec!["name".to_string(), "age".to_string()]);
        dataset
            .try_push_row(vec![Some("Ada".to_string()), Some("36".to_string())])
            .unwrap();
        dataset
            .try_push_row(vec![Some("Linus".to_string())])
            .unwrap();
        dataset
    }

    #[test]
    fn test_record_keeps_header_order() {
        let dataset = sample();
        let keys: Vec<&str> = dataset.records()[0].keys().collect();
        assert_eq!(keys, vec!["name", "age"]);
        assert_eq!(dataset.records()[0].get("age"), Some("36"));
    }

    #[test]
    fn test_short_row_is_padded() {
        let dataset = sample();
        let record = &dataset.records()[1];
        assert_eq!(record.len(), 2);
        assert_eq!(record.get("age"), None);
        assert_eq!(
            record.iter().collect::<Vec<_>>(),
            vec![("name", Some("Linus")), ("age", None)]
        );
    }

    #[test]
    fn test_long_row_is_rejected() {
        let mut dataset = Dataset::new(vec!["a".to_string()]);
        let rejected = dataset
            .try_push_row(vec![Some("1".to_string()), Some("2".to_string())])
            .unwrap_err();
        assert_eq!(rejected.len(), 2);
        assert!(dataset.is_empty());
    }

    #[test]
    fn test_preview_leaves_source_untouched() {
        let dataset = sample();
        let before = dataset.clone();

        let head = dataset.preview(1);
        assert_eq!(head.len(), 1);
        assert_eq!(head.columns(), dataset.columns());
        assert_eq!(dataset, before);

        assert_eq!(dataset.preview(10).len(), 2);
        assert!(dataset.preview(0).is_empty());
    }

    #[test]
    fn test_serializes_in_column_order_with_nulls() {
        let json = serde_json::to_string(&sample()).unwrap();
        assert_eq!(
            json,
            r#"[{"name":"Ada","age":"36"},{"name":"Linus","age":null}]"#
        );
    }

    #[test]
    fn test_conversion_id_parse_rejects_paths() {
        assert!(ConversionId::parse("../etc/passwd").is_none());
        let id = ConversionId::generate();
        assert_eq!(ConversionId::parse(id.as_str()), Some(id.clone()));
        assert!(id.file_name().ends_with(".json"));
    }
}
