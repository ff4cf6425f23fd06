//! Integrals of a field over the ring

use crate::physics::Field;

/// Trapezoidal integral `(h/2)·(y₀ + y_{N-1} + 2·Σ_{i=1}^{N-2} yᵢ)`
///
/// This is the "mass" reported in the diagnostics. It treats the samples as
/// an open interval, so it is not exactly what the periodic scheme
/// conserves; see [`periodic_integral`].
///
/// # Example
///
/// ```rust
/// use kdv_rs::diagnostics::trapezoidal_mass;
/// use kdv_rs::physics::Field;
///
/// let field = Field::from_vec(vec![1.0, 2.0, 3.0]);
/// assert_eq!(trapezoidal_mass(&field, 0.5), 0.25 * (1.0 + 3.0 + 4.0));
/// ```
pub fn trapezoidal_mass(field: &Field, h: f64) -> f64 {
    let n = field.len();
    if n == 0 {
        return 0.0;
    }

    let ends = field[0] + field[n - 1];
    let interior: f64 = field.iter().skip(1).take(n.saturating_sub(2)).sum();

    (h / 2.0) * (ends + 2.0 * interior)
}

/// Rectangle rule on the ring, `h·Σ yᵢ`
///
/// Every operator variant is a telescoping sum over the ring, so this
/// quantity is conserved by the scheme up to rounding.
pub fn periodic_integral(field: &Field, h: f64) -> f64 {
    h * field.sum()
}
