// ============================================================
// Layer 5 — Min-Max Normalizer (zero fixed)
// ============================================================
// Scales every slot by 1 / max(|min|, |max|) over the training
// vectors. There is no offset, so 0 stays 0 and sparse one-hot
// slots stay sparse; every finite training value lands in
// [-1, 1].
//
// Non-finite values are ignored while fitting. A slot whose
// finite training values are all zero keeps scale 1.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MinMaxNormalizer {
    scales: Vec<f32>,
}

impl MinMaxNormalizer {
    /// Fit per-slot scales over `vectors`, each of length `dimension`.
    pub fn fit(vectors: &[Vec<f32>], dimension: usize) -> Self {
        let mut max_abs = vec![0.0f32; dimension];
        for v in vectors {
            for (m, x) in max_abs.iter_mut().zip(v) {
                if x.is_finite() {
                    *m = m.max(x.abs());
                }
            }
        }

        let scales = max_abs
            .into_iter()
            .map(|m| if m > 0.0 { 1.0 / m } else { 1.0 })
            .collect();
        Self { scales }
    }

    pub fn scales(&self) -> &[f32] {
        &self.scales
    }

    pub fn apply(&self, v: &mut [f32]) {
        for (x, s) in v.iter_mut().zip(&self.scales) {
            *x *= s;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scales_into_unit_range() {
        let rows = vec![vec![10.0, -4.0, 0.0], vec![-20.0, 2.0, 0.0]];
        let norm = MinMaxNormalizer::fit(&rows, 3);
        assert_eq!(norm.scales(), &[0.05, 0.25, 1.0]);

        let mut v = vec![-20.0, 2.0, 0.0];
        norm.apply(&mut v);
        assert_eq!(v, vec![-1.0, 0.5, 0.0]);
    }

    #[test]
    fn test_ignores_non_finite_values() {
        let rows = vec![vec![f32::NAN], vec![4.0], vec![f32::INFINITY]];
        let norm = MinMaxNormalizer::fit(&rows, 1);
        assert_eq!(norm.scales(), &[0.25]);
    }
}
