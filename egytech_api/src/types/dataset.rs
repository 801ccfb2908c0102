use serde::ser::SerializeSeq;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

/// A JSON record as returned by the API: open-schema field name to value.
pub type Record = Map<String, Value>;

/// Tabular view over a list of JSON records.
///
/// The column set is not declared up front: it is the union of every record's
/// keys, in the order they are first seen. A record lacking a column holds
/// `Value::Null` in that cell, as does a record whose value is an explicit
/// `null`. Columns are never dropped, even when every cell is null.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Dataset {
    /// Builds a dataset from records, deriving the columns from their keys.
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = Record>,
    {
        let records: Vec<Record> = records.into_iter().collect();
        let mut columns: Vec<String> = Vec::new();
        for record in &records {
            for key in record.keys() {
                if !columns.iter().any(|c| c == key) {
                    columns.push(key.clone());
                }
            }
        }
        let rows = records
            .into_iter()
            .map(|mut record| {
                columns
                    .iter()
                    .map(|c| record.remove(c).unwrap_or(Value::Null))
                    .collect()
            })
            .collect();
        Self { columns, rows }
    }

    /// Stacks datasets vertically in iteration order, unioning their columns.
    ///
    /// Every column of every input survives, including columns whose cells
    /// are all null. Rows missing a column get `Value::Null` there.
    pub fn concat<I>(datasets: I) -> Self
    where
        I: IntoIterator<Item = Dataset>,
    {
        let datasets: Vec<Dataset> = datasets.into_iter().collect();
        let mut columns: Vec<String> = Vec::new();
        for ds in &datasets {
            for name in &ds.columns {
                if !columns.contains(name) {
                    columns.push(name.clone());
                }
            }
        }

        let mut rows = Vec::with_capacity(datasets.iter().map(Dataset::len).sum());
        for ds in datasets {
            let positions: Vec<Option<usize>> = columns
                .iter()
                .map(|name| ds.columns.iter().position(|c| c == name))
                .collect();
            for row in ds.rows {
                let mut cells: Vec<Option<Value>> = row.into_iter().map(Some).collect();
                rows.push(
                    positions
                        .iter()
                        .map(|pos| pos.and_then(|i| cells[i].take()).unwrap_or(Value::Null))
                        .collect(),
                );
            }
        }
        Self { columns, rows }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns every cell of the named column, or `None` if it does not exist.
    pub fn column(&self, name: &str) -> Option<Vec<&Value>> {
        let idx = self.columns.iter().position(|c| c == name)?;
        Some(self.rows.iter().map(|row| &row[idx]).collect())
    }

    /// Converts rows back to records. Every record carries every column,
    /// with `null` where the cell is empty.
    pub fn records(&self) -> Vec<Record> {
        self.rows.iter().map(|row| self.row_to_record(row)).collect()
    }

    pub fn into_records(self) -> Vec<Record> {
        let Dataset { columns, rows } = self;
        rows.into_iter()
            .map(|row| columns.iter().cloned().zip(row).collect())
            .collect()
    }

    fn row_to_record(&self, row: &[Value]) -> Record {
        self.columns
            .iter()
            .zip(row)
            .map(|(c, v)| (c.clone(), v.clone()))
            .collect()
    }
}

impl Serialize for Dataset {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.rows.len()))?;
        for row in &self.rows {
            seq.serialize_element(&self.row_to_record(row))?;
        }
        seq.end()
    }
}
