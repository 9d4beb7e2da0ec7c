//! Single-tuple analysis: generate a sequence, check it, bundle the result.

use num_bigint::BigInt;
use serde::{Deserialize, Serialize};
use serde::ser::Serializer;

use crate::sequence;

/// Default largest index to generate and test
pub const DEFAULT_MAX_N: usize = 20;

/// Recurrence coefficients for x_n = P·x_{n-1} − Q·x_{n-2}
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecurrenceParams {
    pub p: i64,
    pub q: i64,
}

impl RecurrenceParams {
    pub fn new(p: i64, q: i64) -> Self {
        Self { p, q }
    }

    /// Discriminant of the characteristic polynomial x² − Px + Q
    pub fn discriminant(&self) -> i128 {
        let p = self.p as i128;
        let q = self.q as i128;
        p * p - 4 * q
    }
}

/// Seed terms x_0 and x_1; any pair is legal, including (0, 0)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitialConditions {
    pub x0: i64,
    pub x1: i64,
}

impl InitialConditions {
    pub fn new(x0: i64, x1: i64) -> Self {
        Self { x0, x1 }
    }

    /// U-type seeds (0, 1), the fundamental Lucas sequence
    pub fn u_type() -> Self {
        Self { x0: 0, x1: 1 }
    }
}

/// Immutable result of analyzing one parameter tuple.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisResult {
    pub params: RecurrenceParams,
    pub initial: InitialConditions,
    /// Generated terms x_0..x_max_n; serialized as decimal strings
    #[serde(serialize_with = "serialize_terms")]
    pub terms: Vec<BigInt>,
    pub is_divisibility: bool,
    pub is_strong_divisibility: bool,
    /// First (m, n) violating the divisibility property, if any
    pub first_failure: Option<(usize, usize)>,
    /// First (m, n) violating the strong property, if any
    pub first_strong_failure: Option<(usize, usize)>,
}

impl AnalysisResult {
    /// Largest generated index
    pub fn max_n(&self) -> usize {
        self.terms.len().saturating_sub(1)
    }
}

fn serialize_terms<S: Serializer>(terms: &[BigInt], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(terms.iter().map(|t| t.to_string()))
}

/// Analyze one parameter tuple: generate x_0..x_max_n, then check both
/// divisibility predicates. Pure composition with no failure modes.
pub fn analyze_sequence(p: i64, q: i64, x0: i64, x1: i64, max_n: usize) -> AnalysisResult {
    let terms = sequence::generate(p, q, x0, x1, max_n);
    let outcome = sequence::check(&terms);
    AnalysisResult {
        params: RecurrenceParams::new(p, q),
        initial: InitialConditions::new(x0, x1),
        terms,
        is_divisibility: outcome.is_divisibility,
        is_strong_divisibility: outcome.is_strong_divisibility,
        first_failure: outcome.first_failure,
        first_strong_failure: outcome.first_strong_failure,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fibonacci_analysis() {
        let result = analyze_sequence(1, -1, 0, 1, 20);
        assert!(result.is_divisibility);
        assert!(result.is_strong_divisibility);
        assert_eq!(result.first_failure, None);

        let expected: Vec<i64> = vec![
            0, 1, 1, 2, 3, 5, 8, 13, 21, 34, 55, 89, 144, 233, 377, 610, 987, 1597, 2584,
            4181, 6765,
        ];
        let terms: Vec<i64> = result.terms.iter().map(|t| t.try_into().unwrap()).collect();
        assert_eq!(terms, expected);
    }

    #[test]
    fn test_lucas_numbers_analysis() {
        let result = analyze_sequence(1, -1, 2, 1, 20);
        assert!(!result.is_divisibility);
        assert!(!result.is_strong_divisibility);
        assert_eq!(result.first_failure, Some((2, 4)));
        assert_eq!(result.max_n(), 20);
    }

    #[test]
    fn test_discriminant() {
        assert_eq!(RecurrenceParams::new(1, -1).discriminant(), 5);
        assert_eq!(RecurrenceParams::new(2, 1).discriminant(), 0);
        assert_eq!(RecurrenceParams::new(0, 1).discriminant(), -4);
        // No overflow at the i64 extremes
        assert_eq!(
            RecurrenceParams::new(i64::MIN, i64::MAX).discriminant(),
            (i64::MIN as i128).pow(2) - 4 * (i64::MAX as i128)
        );
    }

    #[test]
    fn test_result_bundles_inputs() {
        let result = analyze_sequence(3, 2, 0, 1, 8);
        assert_eq!(result.params, RecurrenceParams::new(3, 2));
        assert_eq!(result.initial, InitialConditions::new(0, 1));
        assert_eq!(result.terms.len(), 9);
    }

    #[test]
    fn test_json_serialization_uses_decimal_strings() {
        let result = analyze_sequence(10, 0, 0, 1, 25);
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["terms"][25], format!("1{}", "0".repeat(24)));
        assert_eq!(json["is_divisibility"], true);
    }

    #[test]
    fn test_u_type_seeds() {
        assert_eq!(InitialConditions::u_type(), InitialConditions::new(0, 1));
    }
}
