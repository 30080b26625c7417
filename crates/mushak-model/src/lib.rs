pub mod cell;
pub mod error;
pub mod field;
pub mod mapping;
pub mod row;

pub use cell::{CellValue, ParsedSheet, RawRow};
pub use error::{ModelError, Result};
pub use field::TaxField;
pub use mapping::{FieldMapping, MappingConfig};
pub use row::{ProjectedRow, TaxLine};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_mapping_parses_from_cli_syntax() {
        let mapping: FieldMapping = "vat=VAT Amount".parse().expect("parse mapping");
        assert_eq!(mapping.field, TaxField::Vat);
        assert_eq!(mapping.header, "VAT Amount");

        assert!("VAT".parse::<FieldMapping>().is_err());
        assert!("VAT=".parse::<FieldMapping>().is_err());
        assert!("GST=Tax".parse::<FieldMapping>().is_err());
    }

    #[test]
    fn mapping_config_round_trips_through_json() {
        let config = MappingConfig {
            max_distance: Some(3),
            mappings: vec![FieldMapping {
                field: TaxField::Tti,
                header: "TTII".to_string(),
            }],
        };
        let json = serde_json::to_string(&config).expect("serialize config");
        assert!(json.contains(r#""field":"TTI""#));
        let round: MappingConfig = serde_json::from_str(&json).expect("deserialize config");
        assert_eq!(round, config);
        assert_eq!(round.header_for(TaxField::Tti), Some("TTII"));
        assert_eq!(round.header_for(TaxField::Vat), None);
    }

    #[test]
    fn mapping_config_defaults_missing_keys() {
        let config: MappingConfig = serde_json::from_str("{}").expect("deserialize empty");
        assert_eq!(config, MappingConfig::default());
    }
}
