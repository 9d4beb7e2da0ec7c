use num_bigint::BigInt;

/// Generate the first `max_n + 1` terms of x_n = P·x_{n-1} − Q·x_{n-2}.
///
/// Terms x_0 and x_1 are taken verbatim from the inputs; the recurrence
/// applies from n = 2. Arithmetic is exact, so terms may grow without bound.
///
/// # Arguments
/// * `p`, `q` - Recurrence coefficients
/// * `x0`, `x1` - Initial conditions
/// * `max_n` - Largest index to generate (inclusive); `max_n = 0` yields a
///   one-term sequence
///
/// # Returns
/// A vector of length `max_n + 1`, index-aligned with n.
pub fn generate(p: i64, q: i64, x0: i64, x1: i64, max_n: usize) -> Vec<BigInt> {
    let mut terms = Vec::with_capacity(max_n + 1);
    terms.push(BigInt::from(x0));
    if max_n == 0 {
        return terms;
    }
    terms.push(BigInt::from(x1));

    let p = BigInt::from(p);
    let q = BigInt::from(q);
    for n in 2..=max_n {
        let next = &p * &terms[n - 1] - &q * &terms[n - 2];
        terms.push(next);
    }
    terms
}
