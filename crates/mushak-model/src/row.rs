//! Fixed-shape output records.

use serde::{Deserialize, Serialize};

use crate::cell::CellValue;
use crate::field::TaxField;

/// One value per [`TaxField`].
///
/// This is also the submission payload shape.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TaxLine {
    #[serde(rename = "HSCode")]
    pub hs_code: CellValue,
    #[serde(rename = "Description")]
    pub description: CellValue,
    #[serde(rename = "CD")]
    pub cd: CellValue,
    #[serde(rename = "SD")]
    pub sd: CellValue,
    #[serde(rename = "RD")]
    pub rd: CellValue,
    #[serde(rename = "VAT")]
    pub vat: CellValue,
    #[serde(rename = "AIT")]
    pub ait: CellValue,
    #[serde(rename = "TTI")]
    pub tti: CellValue,
}

impl TaxLine {
    pub fn get(&self, field: TaxField) -> &CellValue {
        match field {
            TaxField::HsCode => &self.hs_code,
            TaxField::Description => &self.description,
            TaxField::Cd => &self.cd,
            TaxField::Sd => &self.sd,
            TaxField::Rd => &self.rd,
            TaxField::Vat => &self.vat,
            TaxField::Ait => &self.ait,
            TaxField::Tti => &self.tti,
        }
    }

    pub fn set(&mut self, field: TaxField, value: CellValue) {
        let slot = match field {
            TaxField::HsCode => &mut self.hs_code,
            TaxField::Description => &mut self.description,
            TaxField::Cd => &mut self.cd,
            TaxField::Sd => &mut self.sd,
            TaxField::Rd => &mut self.rd,
            TaxField::Vat => &mut self.vat,
            TaxField::Ait => &mut self.ait,
            TaxField::Tti => &mut self.tti,
        };
        *slot = value;
    }
}

/// A projected tax line tagged with its spreadsheet row number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectedRow {
    /// 1-based sheet row; the first data row is 2.
    #[serde(rename = "__rowIndex")]
    pub row_index: usize,
    #[serde(flatten)]
    pub line: TaxLine,
}

impl ProjectedRow {
    pub fn get(&self, field: TaxField) -> &CellValue {
        self.line.get(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn projected_row_serializes_with_row_index() {
        let mut line = TaxLine::default();
        line.set(TaxField::HsCode, CellValue::from("8471"));
        for field in TaxField::ALL.into_iter().skip(1) {
            line.set(field, CellValue::ZERO);
        }
        let row = ProjectedRow { row_index: 2, line };
        let value = serde_json::to_value(&row).unwrap();
        assert_eq!(value["__rowIndex"], 2);
        assert_eq!(value["HSCode"], "8471");
        assert_eq!(value["TTI"], 0);
    }
}
