//! JSON line codec
//!
//! Each input line is a JSON array of operations and each output line is a
//! JSON array of `{"tax": <number>}` objects in the same order.

use rust_decimal::Decimal;

use crate::error::CapitalGainsError;
use crate::models::{Operation, TaxResult};

/// Parse one input line into the operations of a batch
pub fn parse_batch(line: &str) -> Result<Vec<Operation>, CapitalGainsError> {
    let operations: Vec<Operation> = serde_json::from_str(line.trim())
        .map_err(|e| CapitalGainsError::ParseError(e.to_string()))?;

    if let Some((index, op)) = operations
        .iter()
        .enumerate()
        .find(|(_, op)| op.unit_cost <= Decimal::ZERO)
    {
        return Err(CapitalGainsError::ParseError(format!(
            "operation {}: unit-cost must be positive, got {}",
            index + 1,
            op.unit_cost
        )));
    }

    Ok(operations)
}

/// Render a batch of results as a single JSON line (without trailing newline)
pub fn format_results(results: &[TaxResult]) -> Result<String, CapitalGainsError> {
    serde_json::to_string(results).map_err(encode_error)
}

fn encode_error(err: serde_json::Error) -> CapitalGainsError {
    CapitalGainsError::EncodeError(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OperationKind;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_batch() {
        let line = r#"[{"operation":"buy", "unit-cost":10.00, "quantity": 10000},{"operation":"Sell", "unit-cost":20.00, "quantity": 5000}]"#;
        let operations = parse_batch(line).unwrap();

        assert_eq!(operations.len(), 2);
        assert_eq!(operations[0], Operation::buy(dec!(10), 10000));
        assert_eq!(operations[1].kind, OperationKind::Sell);
        assert_eq!(operations[1].unit_cost, dec!(20));
        assert_eq!(operations[1].quantity, 5000);
    }

    #[test]
    fn test_parse_empty_array() {
        assert!(parse_batch("[]").unwrap().is_empty());
    }

    #[test]
    fn test_parse_malformed_json() {
        let err = parse_batch(r#"[{"operation":"buy""#).unwrap_err();
        assert!(matches!(err, CapitalGainsError::ParseError(_)));
    }

    #[test]
    fn test_parse_unknown_operation() {
        let err = parse_batch(r#"[{"operation":"lend","unit-cost":1,"quantity":1}]"#).unwrap_err();
        assert!(err.to_string().contains("unknown operation"));
    }

    #[test]
    fn test_parse_negative_quantity() {
        let err = parse_batch(r#"[{"operation":"buy","unit-cost":1,"quantity":-5}]"#).unwrap_err();
        assert!(matches!(err, CapitalGainsError::ParseError(_)));
    }

    #[test]
    fn test_parse_non_positive_unit_cost() {
        let err = parse_batch(r#"[{"operation":"buy","unit-cost":0,"quantity":5}]"#).unwrap_err();
        assert!(err.to_string().contains("operation 1: unit-cost must be positive"));
    }

    #[test]
    fn test_format_results() {
        let results = vec![TaxResult::zero(), TaxResult::new(dec!(80000)), TaxResult::new(dec!(0.5))];
        assert_eq!(
            format_results(&results).unwrap(),
            r#"[{"tax":0.0},{"tax":80000.0},{"tax":0.5}]"#
        );
    }

    #[test]
    fn test_output_failure_is_not_a_parse_error() {
        // JSON object keys must be strings
        let unencodable = std::collections::BTreeMap::from([(vec![1u8], 0u8)]);
        let source = serde_json::to_string(&unencodable).unwrap_err();
        let err = encode_error(source);

        assert!(matches!(err, CapitalGainsError::EncodeError(_)));
        assert!(err.to_string().starts_with("encode error: "));
    }
}
