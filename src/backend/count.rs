use std::{fmt, str::FromStr};

use anyhow::Context as _;

use crate::foundation::error::{SillageError, SillageResult};

/// Equality predicate on one column, e.g. `active=true`.
#[derive(Clone, Debug, PartialEq)]
pub struct Filter {
    /// Column name.
    pub column: String,
    /// Expected value.
    pub value: serde_json::Value,
}

impl Filter {
    /// `column = value`.
    pub fn equals(column: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        Self {
            column: column.into(),
            value: value.into(),
        }
    }

    /// Whether `row` satisfies the predicate. A missing column never matches.
    pub fn matches(&self, row: &serde_json::Map<String, serde_json::Value>) -> bool {
        row.get(&self.column) == Some(&self.value)
    }
}

impl FromStr for Filter {
    type Err = SillageError;

    /// Parse `column=value`. The value is read as JSON when it parses, otherwise as a string.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let Some((column, raw)) = s.split_once('=') else {
            return Err(SillageError::validation(format!(
                "filter must look like column=value, got '{s}'"
            )));
        };
        let column = column.trim();
        if column.is_empty() {
            return Err(SillageError::validation("filter column must not be empty"));
        }
        let raw = raw.trim();
        let value = serde_json::from_str(raw)
            .unwrap_or_else(|_| serde_json::Value::String(raw.to_string()));
        Ok(Self::equals(column, value))
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.column, self.value)
    }
}

/// A remote aggregate query. Its failures (network, auth, missing table) are its own.
pub trait CountSource {
    /// Number of rows in `table` matching `filter`.
    fn count(&self, table: &str, filter: &Filter) -> anyhow::Result<u64>;
}

/// Outcome of a count request as shown to an operator.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CountReport {
    /// Matching rows.
    Count(u64),
    /// Error message from the source.
    Error(String),
}

impl fmt::Display for CountReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Count(n) => write!(f, "count: {n}"),
            Self::Error(msg) => write!(f, "error: {msg}"),
        }
    }
}

/// Ask `source` once and report either the count or the error. Never retries.
pub fn report_count(source: &dyn CountSource, table: &str, filter: &Filter) -> CountReport {
    match source.count(table, filter) {
        Ok(n) => {
            tracing::info!(table, %filter, count = n, "count query succeeded");
            CountReport::Count(n)
        }
        Err(err) => {
            tracing::error!(table, %filter, error = %format!("{err:#}"), "count query failed");
            CountReport::Error(format!("{err:#}"))
        }
    }
}

/// In-memory table of JSON object rows.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct JsonTable {
    name: String,
    rows: Vec<serde_json::Value>,
}

impl JsonTable {
    /// Table `name` holding `rows`.
    pub fn new(name: impl Into<String>, rows: Vec<serde_json::Value>) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }

    /// Parse a JSON array of rows.
    pub fn from_json(name: impl Into<String>, json: &str) -> SillageResult<Self> {
        let rows: Vec<serde_json::Value> = serde_json::from_str(json)?;
        Ok(Self::new(name, rows))
    }

    /// Table name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

impl CountSource for JsonTable {
    fn count(&self, table: &str, filter: &Filter) -> anyhow::Result<u64> {
        if table != self.name {
            anyhow::bail!("relation \"{table}\" does not exist");
        }
        let mut n = 0u64;
        for (i, row) in self.rows.iter().enumerate() {
            let row = row
                .as_object()
                .with_context(|| format!("row {i} of \"{table}\" is not an object"))?;
            if filter.matches(row) {
                n += 1;
            }
        }
        Ok(n)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/backend/count.rs"]
mod tests;
