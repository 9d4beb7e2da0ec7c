use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{Signed, Zero};

/// Outcome of checking both divisibility predicates over one sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckOutcome {
    /// m | n implies x_m | x_n for all tested pairs
    pub is_divisibility: bool,
    /// gcd(x_m, x_n) = |x_gcd(m,n)| for all tested pairs
    pub is_strong_divisibility: bool,
    /// First (m, n) violating the divisibility property, in iteration order
    pub first_failure: Option<(usize, usize)>,
    /// First (m, n) violating the strong property, in iteration order
    pub first_strong_failure: Option<(usize, usize)>,
}

/// Divisibility convention over the full integers:
/// 0 divides only 0; otherwise a | b iff b mod a == 0.
fn divides(a: &BigInt, b: &BigInt) -> bool {
    if a.is_zero() {
        return b.is_zero();
    }
    (b % a).is_zero()
}

/// Check both divisibility predicates over `terms` (indices 0..=max_n).
///
/// Pairs are visited with n ascending, then m ascending, so the reported
/// first failure is deterministic. Each property short-circuits at its own
/// first failure; the other keeps being evaluated independently.
///
/// The divisibility pass only visits pairs where m properly divides n;
/// non-dividing pairs are vacuously satisfied and cannot change the result
/// or the first-failure pair. Index 0 never participates (no n >= 1 is a
/// multiple of 0), and m = n pairs cannot fail under the convention above,
/// 0 | 0 included.
pub fn check(terms: &[BigInt]) -> CheckOutcome {
    let max_n = terms.len().saturating_sub(1);

    let mut first_failure = None;
    'div: for n in 2..=max_n {
        for m in 1..n {
            if n % m != 0 {
                continue;
            }
            if !divides(&terms[m], &terms[n]) {
                first_failure = Some((m, n));
                break 'div;
            }
        }
    }

    let mut first_strong_failure = None;
    'strong: for n in 2..=max_n {
        for m in 1..n {
            let g = m.gcd(&n);
            // BigInt gcd is non-negative; gcd(0, 0) is 0
            if terms[m].gcd(&terms[n]) != terms[g].abs() {
                first_strong_failure = Some((m, n));
                break 'strong;
            }
        }
    }

    CheckOutcome {
        is_divisibility: first_failure.is_none(),
        is_strong_divisibility: first_strong_failure.is_none(),
        first_failure,
        first_strong_failure,
    }
}
