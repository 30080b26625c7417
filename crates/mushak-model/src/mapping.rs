use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::field::TaxField;

/// A persisted choice of raw header for one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldMapping {
    pub field: TaxField,
    pub header: String,
}

impl FromStr for FieldMapping {
    type Err = ModelError;

    /// Parses `FIELD=HEADER`; the header keeps its inner spacing.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (field, header) = s
            .split_once('=')
            .ok_or_else(|| ModelError::InvalidMappingSpec(s.to_string()))?;
        let header = header.trim();
        if header.is_empty() {
            return Err(ModelError::InvalidMappingSpec(s.to_string()));
        }
        Ok(Self {
            field: field.parse()?,
            header: header.to_string(),
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingConfig {
    /// Overrides the suggestion threshold when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_distance: Option<usize>,
    #[serde(default)]
    pub mappings: Vec<FieldMapping>,
}

impl MappingConfig {
    pub fn header_for(&self, field: TaxField) -> Option<&str> {
        self.mappings
            .iter()
            .find(|mapping| mapping.field == field)
            .map(|mapping| mapping.header.as_str())
    }
}
