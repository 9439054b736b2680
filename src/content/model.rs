//! Page content lists handed to the layout layer untouched.
//!
//! Effects never read these records; they exist so a page description can carry its content
//! alongside its motion configuration.

use crate::foundation::error::SillageResult;

/// One item of a content list.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum DisplayRecord {
    /// A labelled figure, e.g. a statistic.
    Metric {
        /// Caption.
        label: String,
        /// Displayed value, already formatted.
        value: String,
        /// Optional secondary line.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        detail: Option<String>,
    },
    /// A titled card.
    Card {
        /// Heading.
        title: String,
        /// Body text.
        description: String,
        /// Icon identifier.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        icon: Option<String>,
    },
}

impl DisplayRecord {
    /// Primary text: the label of a metric or the title of a card.
    pub fn heading(&self) -> &str {
        match self {
            Self::Metric { label, .. } => label,
            Self::Card { title, .. } => title,
        }
    }
}

/// Parse a JSON array of records.
pub fn parse_records(json: &str) -> SillageResult<Vec<DisplayRecord>> {
    Ok(serde_json::from_str(json)?)
}

#[cfg(test)]
#[path = "../../tests/unit/content/model.rs"]
mod tests;
