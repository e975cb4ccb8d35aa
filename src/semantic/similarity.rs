//! Cosine similarity and best-match selection.
//!
//! Pure vector math, independent of any embedding model.

/// Errors that can occur while scoring vectors.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum SimilarityError {
    #[error("Dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },
}

/// Compute L2 norm of a vector.
fn l2_norm(v: &[f32]) -> f32 {
    v.iter().map(|x| x * x).sum::<f32>().sqrt()
}

/// Compute cosine similarity between two vectors.
///
/// Returns the raw cosine in [-1.0, 1.0] without clamping.
/// A zero-norm operand scores 0.0.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f32, SimilarityError> {
    if a.len() != b.len() {
        return Err(SimilarityError::DimensionMismatch {
            expected: a.len(),
            got: b.len(),
        });
    }

    let norm_a = l2_norm(a);
    let norm_b = l2_norm(b);
    if norm_a < f32::EPSILON || norm_b < f32::EPSILON {
        return Ok(0.0);
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    Ok(dot_product / (norm_a * norm_b))
}

/// Select the index of the highest score.
///
/// Ties go to the lowest index. NaN never beats a number.
/// Returns `None` for an empty slice.
pub fn best_match(scores: &[f32]) -> Option<(usize, f32)> {
    let mut best: Option<(usize, f32)> = None;

    for (idx, &score) in scores.iter().enumerate() {
        let replace = match best {
            None => true,
            Some((_, current)) => score > current || (current.is_nan() && !score.is_nan()),
        };
        if replace {
            best = Some((idx, score));
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_vectors() {
        let score = cosine_similarity(&[1.0, 2.0, 3.0], &[1.0, 2.0, 3.0]).unwrap();
        assert!((score - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_orthogonal_vectors() {
        let score = cosine_similarity(&[1.0, 0.0, 0.0], &[0.0, 1.0, 0.0]).unwrap();
        assert!(score.abs() < 1e-6);
    }

    #[test]
    fn test_opposite_vectors_not_clamped() {
        let score = cosine_similarity(&[1.0, 0.0], &[-1.0, 0.0]).unwrap();
        assert!((score + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_scale_invariance() {
        let a = cosine_similarity(&[1.0, 0.1, 0.0], &[1.0, 0.0, 0.0]).unwrap();
        let b = cosine_similarity(&[10.0, 1.0, 0.0], &[1.0, 0.0, 0.0]).unwrap();
        assert!((a - b).abs() < 1e-6);
    }

    #[test]
    fn test_symmetry() {
        let a = [0.3, -0.2, 0.9];
        let b = [0.1, 0.4, 0.5];
        let ab = cosine_similarity(&a, &b).unwrap();
        let ba = cosine_similarity(&b, &a).unwrap();
        assert!((ab - ba).abs() < 1e-6);
    }

    #[test]
    fn test_zero_norm_scores_zero() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]).unwrap(), 0.0);
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[0.0, 0.0]).unwrap(), 0.0);
    }

    #[test]
    fn test_dimension_mismatch() {
        let result = cosine_similarity(&[1.0, 0.0, 0.0], &[1.0, 0.0]);
        assert_eq!(
            result,
            Err(SimilarityError::DimensionMismatch {
                expected: 3,
                got: 2
            })
        );
    }

    #[test]
    fn test_best_match_empty() {
        assert_eq!(best_match(&[]), None);
    }

    #[test]
    fn test_best_match_picks_maximum() {
        assert_eq!(best_match(&[0.1, 0.7, 0.3]), Some((1, 0.7)));
    }

    #[test]
    fn test_best_match_tie_goes_to_first() {
        assert_eq!(best_match(&[0.2, 0.9, 0.5, 0.9]), Some((1, 0.9)));
    }

    #[test]
    fn test_best_match_negative_scores() {
        assert_eq!(best_match(&[-0.5, -0.1, -0.9]), Some((1, -0.1)));
    }

    #[test]
    fn test_best_match_skips_nan() {
        assert_eq!(best_match(&[f32::NAN, 0.4, f32::NAN]), Some((1, 0.4)));

        let (idx, score) = best_match(&[f32::NAN, f32::NAN]).unwrap();
        assert_eq!(idx, 0);
        assert!(score.is_nan());
    }
}
