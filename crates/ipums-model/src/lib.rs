//! Data model for census microdata extracts: the fixed-width layout parsed
//! from a syntax file, coded value labels, and the shared error taxonomy.

pub mod error;
pub mod labels;
pub mod layout;
pub mod lookup;

pub use error::{ExtractError, Result};
pub use labels::ValueLabel;
pub use layout::{ColumnRange, FLAT_RECORD_TYPE, Variable, VariableFormat, VariableSpec};
pub use lookup::VariableIndex;

#[cfg(test)]
mod tests {
    use super::*;

    fn range(start: usize, end: usize) -> ColumnRange {
        ColumnRange::new(start, end).expect("valid range")
    }

    #[test]
    fn flat_spec_registers_placeholder_record_type() {
        let spec = VariableSpec::new(
            None,
            vec![],
            vec![Variable::new("YEAR", range(1, 4))],
        );
        assert!(!spec.is_hierarchical());
        assert_eq!(spec.record_types(), [FLAT_RECORD_TYPE.to_string()]);
        assert_eq!(spec.variables_for("anything").count(), 1);
    }

    #[test]
    fn hierarchical_spec_filters_by_record_type() {
        let spec = VariableSpec::new(
            Some(range(1, 1)),
            vec!["H".to_string(), "P".to_string(), "H".to_string()],
            vec![
                Variable::new("RECTYPE", range(1, 1)).with_record_type("H"),
                Variable::new("SERIAL", range(2, 9)).with_record_type("H"),
                Variable::new("RECTYPE", range(1, 1)).with_record_type("P"),
                Variable::new("AGE", range(10, 12)).with_record_type("P"),
            ],
        );
        assert_eq!(spec.record_types(), ["H".to_string(), "P".to_string()]);
        let person: Vec<&str> = spec
            .variables_for("P")
            .map(|variable| variable.name.as_str())
            .collect();
        assert_eq!(person, ["RECTYPE", "AGE"]);
    }

    #[test]
    fn variable_lookup_returns_first_declaration() {
        let spec = VariableSpec::new(
            Some(range(1, 1)),
            vec!["H".to_string(), "P".to_string()],
            vec![
                Variable::new("RECTYPE", range(1, 1)).with_record_type("H"),
                Variable::new("RECTYPE", range(1, 1)).with_record_type("P"),
            ],
        );
        let found = spec.variable("rectype").expect("declared");
        assert_eq!(found.record_type.as_deref(), Some("H"));
        assert!(spec.variable("MISSING").is_none());
    }

    #[test]
    fn column_range_rejects_inverted_or_zero_bounds() {
        assert!(ColumnRange::new(0, 3).is_none());
        assert!(ColumnRange::new(5, 4).is_none());
        assert_eq!(range(10, 15).width(), 6);
        assert_eq!(range(7, 7).to_string(), "7");
        assert_eq!(range(2, 5).to_string(), "2-5");
    }

    #[test]
    fn column_range_slices_one_based_inclusive() {
        let line = "H0000123401";
        assert_eq!(range(1, 1).slice(line), Some("H"));
        assert_eq!(range(2, 9).slice(line), Some("00001234"));
        assert_eq!(range(10, 12).slice(line), None);
    }

    #[test]
    fn format_accessors_are_exclusive() {
        let alpha = Variable::new("NAME", range(1, 3)).with_format(VariableFormat::Alpha);
        assert!(alpha.is_alpha());
        assert_eq!(alpha.implied_decimals(), None);

        let money =
            Variable::new("HHWT", range(1, 10)).with_format(VariableFormat::ImpliedDecimals(2));
        assert!(!money.is_alpha());
        assert_eq!(money.implied_decimals(), Some(2));
    }

    #[test]
    fn variable_serializes() {
        let variable = Variable::new("HHWT", range(18, 27))
            .with_label("Household weight")
            .with_format(VariableFormat::ImpliedDecimals(2));
        let json = serde_json::to_string(&variable).expect("serialize variable");
        let round: Variable = serde_json::from_str(&json).expect("deserialize variable");
        assert_eq!(round, variable);
    }

    #[test]
    fn invalid_ranges_do_not_deserialize() {
        let inverted = r#"{"name":"AGE","columns":{"start":5,"end":2},"record_type":null,"label":null,"format":"numeric"}"#;
        assert!(serde_json::from_str::<Variable>(inverted).is_err());
        assert!(serde_json::from_str::<ColumnRange>(r#"{"start":0,"end":3}"#).is_err());
        let valid: ColumnRange = serde_json::from_str(r#"{"start":2,"end":4}"#).unwrap();
        assert_eq!(valid.width(), 3);
        assert_eq!(valid.slice("abcdef"), Some("bcd"));
    }
}
