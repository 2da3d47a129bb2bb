//! CSV-based limits loader
//!
//! Loads input range overrides from data/assumptions/input_limits.csv

use super::InputLimits;
use crate::error::LoadError;
use std::fs::File;
use std::path::Path;

/// Default path to assumptions directory
pub const DEFAULT_ASSUMPTIONS_PATH: &str = "data/assumptions";

/// File name of the limits table inside the assumptions directory
pub const LIMITS_FILE: &str = "input_limits.csv";

/// Load input limits from `<dir>/input_limits.csv`
///
/// Rows are `field,min,max`. Fields not listed keep their built-in range.
pub fn load_input_limits(path: &Path) -> Result<InputLimits, LoadError> {
    let file = File::open(path.join(LIMITS_FILE))?;
    load_input_limits_from_reader(file)
}

/// Load input limits from any reader
pub fn load_input_limits_from_reader<R: std::io::Read>(reader: R) -> Result<InputLimits, LoadError> {
    let mut reader = csv::Reader::from_reader(reader);
    let mut limits = InputLimits::default();

    for result in reader.records() {
        let record = result?;
        let line = record.position().map_or(0, |p| p.line());
        let column = |index: usize, name: &'static str| {
            record
                .get(index)
                .ok_or(LoadError::MissingColumn { column: name, line })
        };

        let field = column(0, "field")?.trim();
        let min = parse_number(field, column(1, "min")?)?;
        let max = parse_number(field, column(2, "max")?)?;

        if min > max {
            return Err(LoadError::InvertedLimit {
                field: field.to_string(),
                min,
                max,
            });
        }

        let bounds = limits
            .get_mut(field)
            .ok_or_else(|| LoadError::UnknownLimitField(field.to_string()))?;
        bounds.min = min;
        bounds.max = max;
    }

    Ok(limits)
}

fn parse_number(field: &str, raw: &str) -> Result<f64, LoadError> {
    raw.trim().parse().map_err(|_| LoadError::InvalidNumber {
        field: field.to_string(),
        value: raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_listed_fields_only() {
        let data = "field,min,max\nnet_return_rate,0,0.12\nduration_years,1,30\n";
        let limits = load_input_limits_from_reader(data.as_bytes()).unwrap();

        assert_eq!(limits.net_return_cap(), 0.12);
        assert_eq!(limits.duration_years.max, 30.0);
        assert_eq!(limits.start_age, InputLimits::default().start_age);
    }

    #[test]
    fn test_rejects_unknown_and_inverted() {
        let unknown = "field,min,max\nplan_c,0,1\n";
        assert!(matches!(
            load_input_limits_from_reader(unknown.as_bytes()),
            Err(LoadError::UnknownLimitField(_))
        ));

        let inverted = "field,min,max\nbuffer_rate,0.5,0.1\n";
        assert!(matches!(
            load_input_limits_from_reader(inverted.as_bytes()),
            Err(LoadError::InvertedLimit { .. })
        ));

        let bad_number = "field,min,max\nbuffer_rate,zero,0.1\n";
        assert!(matches!(
            load_input_limits_from_reader(bad_number.as_bytes()),
            Err(LoadError::InvalidNumber { .. })
        ));
    }

    #[test]
    fn test_short_rows_are_an_error() {
        let two_columns = "field,min\nbuffer_rate,0\n";
        assert!(matches!(
            load_input_limits_from_reader(two_columns.as_bytes()),
            Err(LoadError::MissingColumn { column: "max", line: 2 })
        ));

        let one_column = "field\nbuffer_rate\n";
        assert!(matches!(
            load_input_limits_from_reader(one_column.as_bytes()),
            Err(LoadError::MissingColumn { column: "min", .. })
        ));
    }

    #[test]
    fn test_load_default_file() {
        let limits = load_input_limits(Path::new(DEFAULT_ASSUMPTIONS_PATH))
            .expect("Failed to load input limits");
        assert_eq!(limits.start_age.min, 40.0);
        assert_eq!(limits.start_age.max, 110.0);
    }
}
