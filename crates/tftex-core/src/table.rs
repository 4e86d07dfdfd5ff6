//! Decoded column tables handed over by the I/O layer.
//!
//! Instruments label columns inconsistently: a drain-current column may
//! arrive as `DrainI` or `DrainI(1)`, and output sweeps carry one indexed
//! drain-current column per gate-voltage step. [`DataTable`] normalizes
//! the lookup without copying the data.

use indexmap::IndexMap;

use crate::error::{Error, Result};

/// A table of named numeric columns, in input order.
#[derive(Debug, Clone, Default)]
pub struct DataTable {
    columns: IndexMap<String, Vec<f64>>,
}

impl DataTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a column. Replaces any column of the same name.
    pub fn insert(&mut self, name: impl Into<String>, values: Vec<f64>) {
        self.columns.insert(name.into(), values);
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with_column(mut self, name: impl Into<String>, values: Vec<f64>) -> Self {
        self.insert(name, values);
        self
    }

    /// Number of columns.
    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// Look up a column by exact name (case-insensitive).
    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.columns
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_slice())
    }

    /// Look up a column under any of its known aliases.
    ///
    /// `base` resolves `base` itself and `base(1)`, in that order.
    pub fn column_aliased(&self, base: &str) -> Option<&[f64]> {
        self.column(base)
            .or_else(|| self.column(&format!("{base}(1)")))
    }

    /// Like [`column_aliased`](Self::column_aliased) but an error when absent.
    pub fn require_column(&self, base: &str) -> Result<&[f64]> {
        self.column_aliased(base)
            .ok_or_else(|| Error::ColumnNotFound(base.to_string()))
    }

    /// All columns of an indexed family `base(1)`, `base(2)`, ... in
    /// ascending index order. `base` alone counts as index 1.
    pub fn indexed_family(&self, base: &str) -> Vec<(usize, &[f64])> {
        let mut family: Vec<(usize, &[f64])> = Vec::new();
        for (name, values) in &self.columns {
            if name.eq_ignore_ascii_case(base) {
                family.push((1, values.as_slice()));
                continue;
            }
            if let Some(index) = parse_indexed_name(name, base) {
                family.push((index, values.as_slice()));
            }
        }
        family.sort_by_key(|(index, _)| *index);
        family.dedup_by_key(|(index, _)| *index);
        family
    }

    /// Check that the named columns all share `expected` rows.
    pub fn check_lengths(&self, names: &[&str], expected: usize) -> Result<()> {
        for name in names {
            if let Some(values) = self.column_aliased(name) {
                if values.len() != expected {
                    return Err(Error::ColumnLengthMismatch {
                        name: (*name).to_string(),
                        expected,
                        actual: values.len(),
                    });
                }
            }
        }
        Ok(())
    }
}

/// Parse `base(k)` into `k`, case-insensitively.
fn parse_indexed_name(name: &str, base: &str) -> Option<usize> {
    let rest = name
        .get(..base.len())
        .filter(|prefix| prefix.eq_ignore_ascii_case(base))
        .map(|_| &name[base.len()..])?;
    let inner = rest.strip_prefix('(')?.strip_suffix(')')?;
    inner.parse().ok()
}
