use crate::error::{ChartError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One entry of the table index (the X-axis domain).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum IndexValue {
    /// Numeric index such as a year or a measurement.
    Number(f64),
    /// Categorical index such as a country or product name.
    Text(String),
}

impl IndexValue {
    /// Interpret a raw cell: finite numbers become `Number`, anything else `Text`.
    pub fn parse(raw: &str) -> Self {
        let t = raw.trim();
        match t.parse::<f64>() {
            Ok(v) if v.is_finite() => IndexValue::Number(v),
            _ => IndexValue::Text(t.to_string()),
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match *self {
            IndexValue::Number(v) => Some(v),
            IndexValue::Text(_) => None,
        }
    }
}

impl fmt::Display for IndexValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Whole numbers print without a trailing ".0" (years, counts).
            IndexValue::Number(v) if v.fract() == 0.0 && v.abs() < 1e15 => {
                write!(f, "{}", *v as i64)
            }
            IndexValue::Number(v) => write!(f, "{v}"),
            IndexValue::Text(s) => f.write_str(s),
        }
    }
}

/// Parse a numeric cell. Empty, non-numeric, and non-finite cells are missing.
pub fn parse_cell(raw: &str) -> Option<f64> {
    let t = raw.trim();
    if t.is_empty() {
        return None;
    }
    t.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// A named Y-series candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub values: Vec<Option<f64>>,
}

impl Column {
    pub fn new(name: impl Into<String>, values: Vec<Option<f64>>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// A column is usable when at least one cell holds a number.
    pub fn is_usable(&self) -> bool {
        self.values.iter().any(Option::is_some)
    }
}

/// Tabular data indexed by the X-axis values, one column per candidate series.
///
/// Column order is preserved exactly as given; stacked charts depend on it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputTable {
    index_name: Option<String>,
    index: Vec<IndexValue>,
    columns: Vec<Column>,
}

impl InputTable {
    /// Build a table; every column must have one cell per index entry.
    pub fn new(
        index_name: Option<String>,
        index: Vec<IndexValue>,
        columns: Vec<Column>,
    ) -> Result<Self> {
        for c in &columns {
            if c.values.len() != index.len() {
                return Err(ChartError::render(format!(
                    "column '{}' has {} values but the index has {}",
                    c.name,
                    c.values.len(),
                    index.len()
                )));
            }
        }
        let index_name = index_name.filter(|n| !n.trim().is_empty());
        Ok(Self {
            index_name,
            index,
            columns,
        })
    }

    /// Convenience constructor for fully numeric data.
    pub fn numeric(
        index_name: Option<&str>,
        index: &[f64],
        columns: Vec<(&str, Vec<f64>)>,
    ) -> Result<Self> {
        Self::new(
            index_name.map(str::to_string),
            index.iter().map(|v| IndexValue::Number(*v)).collect(),
            columns
                .into_iter()
                .map(|(name, vals)| Column::new(name, vals.into_iter().map(Some).collect()))
                .collect(),
        )
    }

    pub fn index_name(&self) -> Option<&str> {
        self.index_name.as_deref()
    }

    pub fn index(&self) -> &[IndexValue] {
        &self.index
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn n_rows(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Columns with at least one numeric cell, in their original order.
    pub fn usable_columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|c| c.is_usable())
    }

    /// The index as numbers, or `None` if any entry is categorical.
    pub fn numeric_index(&self) -> Option<Vec<f64>> {
        self.index.iter().map(IndexValue::as_number).collect()
    }

    /// Index entries rendered as tick/category labels.
    pub fn index_labels(&self) -> Vec<String> {
        self.index.iter().map(ToString::to_string).collect()
    }

    /// A copy with columns rearranged into the given order (names must exist).
    pub fn with_column_order(&self, names: &[&str]) -> Result<Self> {
        let mut columns = Vec::with_capacity(names.len());
        for name in names {
            let col = self
                .columns
                .iter()
                .find(|c| c.name == *name)
                .ok_or_else(|| ChartError::render(format!("no column named '{name}'")))?;
            columns.push(col.clone());
        }
        Self::new(self.index_name.clone(), self.index.clone(), columns)
    }
}
