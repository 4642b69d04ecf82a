// ============================================================
// Layer 5 — One-Hot Encoder
// ============================================================
// Maps a categorical text value to an indicator vector.
//
// Fitting:
//   - categories are numbered in order of first occurrence
//   - empty values are treated as missing and never become a
//     category
//   - fit_min_count additionally drops categories seen fewer
//     than `min_count` times (count-based slot selection)
//
// Encoding:
//   known category  → 1.0 in its slot, 0.0 elsewhere
//   unknown/missing → all zeros

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OneHotEncoder {
    categories: Vec<String>,
}

impl OneHotEncoder {
    /// Learn every non-empty category from `values`.
    pub fn fit<'a>(values: impl IntoIterator<Item = &'a str>) -> Self {
        Self::fit_min_count(values, 1)
    }

    /// Learn categories that occur at least `min_count` times.
    pub fn fit_min_count<'a>(values: impl IntoIterator<Item = &'a str>, min_count: usize) -> Self {
        let mut index:  HashMap<&str, usize> = HashMap::new();
        let mut order:  Vec<&str>            = Vec::new();
        let mut counts: Vec<usize>           = Vec::new();

        for value in values {
            if value.is_empty() {
                continue;
            }
            let slot = *index.entry(value).or_insert_with(|| {
                order.push(value);
                counts.push(0);
                order.len() - 1
            });
            counts[slot] += 1;
        }

        let categories: Vec<String> = order
            .into_iter()
            .zip(counts)
            .filter(|(_, count)| *count >= min_count)
            .map(|(value, _)| value.to_string())
            .collect();

        Self { categories }
    }

    pub fn dimension(&self) -> usize {
        self.categories.len()
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Append the indicator vector for `value` to `out`.
    pub fn encode_into(&self, value: &str, out: &mut Vec<f32>) {
        let start = out.len();
        out.resize(start + self.categories.len(), 0.0);
        if let Some(slot) = self.categories.iter().position(|c| c == value) {
            out[start + slot] = 1.0;
        }
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_occurrence_order() {
        let enc = OneHotEncoder::fit(["Male", "Female", "Male", ""]);
        assert_eq!(enc.categories(), &["Male".to_string(), "Female".to_string()]);
    }

    #[test]
    fn test_encode_known_and_unknown() {
        let enc = OneHotEncoder::fit(["a", "b", "c"]);
        let mut out = vec![9.0];
        enc.encode_into("b", &mut out);
        assert_eq!(out, vec![9.0, 0.0, 1.0, 0.0]);

        let mut out = Vec::new();
        enc.encode_into("zzz", &mut out);
        assert_eq!(out, vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_min_count_drops_rare_categories() {
        let values = ["us", "us", "cuba", "us", "india", "india"];
        let enc = OneHotEncoder::fit_min_count(values, 2);
        assert_eq!(enc.categories(), &["us".to_string(), "india".to_string()]);

        // A dropped category encodes like an unknown one
        let mut out = Vec::new();
        enc.encode_into("cuba", &mut out);
        assert_eq!(out, vec![0.0, 0.0]);
    }
}
