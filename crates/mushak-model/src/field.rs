//! The closed set of tax-line columns every import must populate.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ModelError;

/// A required tax-line column.
///
/// Variants are declared in display order; [`TaxField::ALL`] preserves it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TaxField {
    /// Harmonized System commodity code.
    #[serde(rename = "HSCode")]
    HsCode,
    /// Free-text goods description.
    Description,
    /// Customs duty.
    #[serde(rename = "CD")]
    Cd,
    /// Supplementary duty.
    #[serde(rename = "SD")]
    Sd,
    /// Regulatory duty.
    #[serde(rename = "RD")]
    Rd,
    /// Value added tax.
    #[serde(rename = "VAT")]
    Vat,
    /// Advance income tax.
    #[serde(rename = "AIT")]
    Ait,
    /// Total tax incidence.
    #[serde(rename = "TTI")]
    Tti,
}

impl TaxField {
    /// Every required field, in display order.
    pub const ALL: [TaxField; 8] = [
        Self::HsCode,
        Self::Description,
        Self::Cd,
        Self::Sd,
        Self::Rd,
        Self::Vat,
        Self::Ait,
        Self::Tti,
    ];

    /// Canonical column name, also used as the fallback lookup key.
    #[must_use]
    pub const fn canonical_name(self) -> &'static str {
        match self {
            Self::HsCode => "HSCode",
            Self::Description => "Description",
            Self::Cd => "CD",
            Self::Sd => "SD",
            Self::Rd => "RD",
            Self::Vat => "VAT",
            Self::Ait => "AIT",
            Self::Tti => "TTI",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::HsCode => "HS Code",
            Self::Description => "Description",
            Self::Cd => "Customs Duty",
            Self::Sd => "Supplementary Duty",
            Self::Rd => "Regulatory Duty",
            Self::Vat => "Value Added Tax",
            Self::Ait => "Advance Income Tax",
            Self::Tti => "Total Tax Incidence",
        }
    }
}

impl fmt::Display for TaxField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.canonical_name())
    }
}

impl FromStr for TaxField {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Self::ALL
            .into_iter()
            .find(|field| field.canonical_name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ModelError::UnknownField(trimmed.to_string()))
    }
}
