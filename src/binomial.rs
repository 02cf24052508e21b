/// Binomial coefficient `C(n, k)` in floating point.
///
/// Exact while the result fits in the 53-bit mantissa (all `n <= 56`), and accurate to a
/// few ulps beyond that.
pub fn binomial_coefficient(n: usize, mut k: usize) -> f64 {
    if k > n {
        return 0.0;
    }
    k = k.min(n - k);
    if k == 0 {
        return 1.0;
    }
    let mut res = 1.0f64;
    for i in 0..k {
        res = res * (n - i) as f64 / (i + 1) as f64;
    }
    res
}

/// All coefficients `C(n, 0), ..., C(n, n)` of one row of Pascal's triangle.
pub fn binomial_row(n: usize) -> Vec<f64> {
    let mut row = Vec::with_capacity(n + 1);
    let mut current = 1.0f64;
    row.push(current);
    for k in 0..n {
        current = current * (n - k) as f64 / (k + 1) as f64;
        row.push(current);
    }
    row
}

/// Weight of `B^n_i * B^m_j` in the basis of degree `n + m`:
/// `C(n, i) C(m, j) / C(n + m, i + j)`.
pub fn product_weight(n: usize, i: usize, m: usize, j: usize) -> f64 {
    binomial_coefficient(n, i) * binomial_coefficient(m, j) / binomial_coefficient(n + m, i + j)
}

pub(crate) fn factorial(n: usize) -> f64 {
    (1..=n).fold(1.0, |acc, i| acc * i as f64)
}
