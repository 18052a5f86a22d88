use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistanceError {
    #[error("length mismatch: |a| = {a}, |b| = {b}, |w| = {weights}")]
    LengthMismatch { a: usize, b: usize, weights: usize },
}

/// Weighted squared Euclidean distance, `Σ w[i]·(a[i] − b[i])²`.
///
/// The square root is omitted since only the ordering of distances matters
/// for neighbor selection. All three slices must have the same length.
pub fn weighted_squared_distance(a: &[f64], b: &[f64], weights: &[f64]) -> Result<f64, DistanceError> {
    if a.len() != b.len() || a.len() != weights.len() {
        return Err(DistanceError::LengthMismatch {
            a: a.len(),
            b: b.len(),
            weights: weights.len(),
        });
    }
    Ok(a.iter()
        .zip(b)
        .zip(weights)
        .map(|((x, y), w)| w * (x - y) * (x - y))
        .sum())
}
