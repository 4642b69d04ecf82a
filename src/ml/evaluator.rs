// ============================================================
// Layer 5 — Binary Classification Evaluator
// ============================================================
// Computes the metrics report and the precision/recall curve
// from scored test examples.
//
// Decision threshold for the scalar metrics: score > 0.
//
// PR curve: sort by score (descending), walk the distinct
// scores and emit one point per score t, describing the
// classifier "predict positive iff score >= t":
//
//   precision = tp / (tp + fp)
//   recall    = tp / P
//   FPR       = fp / N
//
// AUC is the probability that a random positive outscores a
// random negative (ties count one half), computed in the same
// descending pass. AUPRC is the average precision over the
// curve: Σ (recall_k − recall_{k−1}) · precision_k.
//
// Examples with a missing label or a non-finite score are
// ignored throughout.

use anyhow::{bail, Result};

use crate::domain::metrics::{BinaryMetrics, ConfusionMatrix, PrCurvePoint, ScoredExample};

const PROBABILITY_EPSILON: f64 = 1e-15;

pub fn evaluate_with_pr_curve(examples: &[ScoredExample]) -> Result<(BinaryMetrics, Vec<PrCurvePoint>)> {
    let mut usable: Vec<(f32, bool, f32)> = examples
        .iter()
        .filter(|e| e.score.is_finite())
        .filter_map(|e| e.label.map(|label| (e.score, label, e.probability)))
        .collect();

    let ignored = examples.len() - usable.len();
    if ignored > 0 {
        tracing::warn!("Evaluator ignored {} examples with a missing label or score", ignored);
    }

    let positives = usable.iter().filter(|e| e.1).count();
    let negatives = usable.len() - positives;
    if positives == 0 || negatives == 0 {
        bail!(
            "AUC is undefined: test set has {} positive and {} negative examples",
            positives,
            negatives
        );
    }

    // ── Threshold-0 confusion matrix ──────────────────────────────────────────
    let mut confusion = ConfusionMatrix::default();
    for &(score, label, _) in &usable {
        match (score > 0.0, label) {
            (true, true)   => confusion.true_positives  += 1,
            (true, false)  => confusion.false_positives += 1,
            (false, false) => confusion.true_negatives  += 1,
            (false, true)  => confusion.false_negatives += 1,
        }
    }

    // ── Log-loss against the calibrated probabilities ────────────────────────
    let log_loss = usable
        .iter()
        .map(|&(_, label, p)| {
            let p = (p as f64).clamp(PROBABILITY_EPSILON, 1.0 - PROBABILITY_EPSILON);
            if label { -p.log2() } else { -(1.0 - p).log2() }
        })
        .sum::<f64>()
        / usable.len() as f64;

    let prior   = positives as f64 / usable.len() as f64;
    let entropy = -(prior * prior.log2() + (1.0 - prior) * (1.0 - prior).log2());

    // ── Descending pass: PR curve, AUC, AUPRC ────────────────────────────────
    usable.sort_by(|a, b| b.0.total_cmp(&a.0));

    let p_total = positives as f64;
    let n_total = negatives as f64;

    let mut curve       = Vec::new();
    let mut tp          = 0usize;
    let mut fp          = 0usize;
    let mut auc_pairs   = 0.0f64;
    let mut auprc       = 0.0f64;
    let mut last_recall = 0.0f64;

    let mut start = 0;
    while start < usable.len() {
        let threshold = usable[start].0;
        let mut end = start;
        while end < usable.len() && usable[end].0 == threshold {
            end += 1;
        }

        let group_pos = usable[start..end].iter().filter(|e| e.1).count();
        let group_neg = (end - start) - group_pos;

        // Every negative in this group loses to all positives above it
        // and ties with the positives in the group
        auc_pairs += group_neg as f64 * (tp as f64 + group_pos as f64 / 2.0);

        tp += group_pos;
        fp += group_neg;

        let precision = tp as f64 / (tp + fp) as f64;
        let recall    = tp as f64 / p_total;
        auprc += (recall - last_recall) * precision;
        last_recall = recall;

        curve.push(PrCurvePoint {
            threshold,
            precision,
            recall,
            false_positive_rate: fp as f64 / n_total,
        });

        start = end;
    }

    let positive_precision = ratio(confusion.true_positives, confusion.true_positives + confusion.false_positives);
    let positive_recall    = ratio(confusion.true_positives, confusion.positives());
    let negative_precision = ratio(confusion.true_negatives, confusion.true_negatives + confusion.false_negatives);
    let negative_recall    = ratio(confusion.true_negatives, confusion.negatives());

    let f1_score = if positive_precision + positive_recall > 0.0 {
        2.0 * positive_precision * positive_recall / (positive_precision + positive_recall)
    } else {
        0.0
    };

    let metrics = BinaryMetrics {
        accuracy: ratio(confusion.true_positives + confusion.true_negatives, confusion.total()),
        area_under_roc_curve: auc_pairs / (p_total * n_total),
        area_under_pr_curve: auprc,
        f1_score,
        positive_precision,
        positive_recall,
        negative_precision,
        negative_recall,
        log_loss,
        log_loss_reduction: (entropy - log_loss) / entropy,
        entropy,
        confusion,
    };

    Ok((metrics, curve))
}

/// a / b, or 0 when b is 0
fn ratio(a: usize, b: usize) -> f64 {
    if b == 0 { 0.0 } else { a as f64 / b as f64 }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::ml::model::sigmoid;

    fn ex(score: f32, label: bool) -> ScoredExample {
        ScoredExample { label: Some(label), score, probability: sigmoid(score) }
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn six_examples() -> Vec<ScoredExample> {
        vec![
            ex(2.0, true),
            ex(1.0, false),
            ex(0.5, true),
            ex(-0.5, false),
            ex(-1.0, true),
            ex(-2.0, false),
        ]
    }

    #[test]
    fn test_scalar_metrics() {
        let (m, _) = evaluate_with_pr_curve(&six_examples()).unwrap();

        assert_eq!(
            m.confusion,
            ConfusionMatrix { true_positives: 2, false_positives: 1, true_negatives: 2, false_negatives: 1 }
        );
        assert!(close(m.accuracy, 4.0 / 6.0));
        assert!(close(m.positive_precision, 2.0 / 3.0));
        assert!(close(m.positive_recall, 2.0 / 3.0));
        assert!(close(m.negative_precision, 2.0 / 3.0));
        assert!(close(m.negative_recall, 2.0 / 3.0));
        assert!(close(m.f1_score, 2.0 / 3.0));
        assert!(close(m.area_under_roc_curve, 6.0 / 9.0));
        assert!(close(m.area_under_pr_curve, 34.0 / 45.0));
        assert!(close(m.entropy, 1.0));
    }

    #[test]
    fn test_log_loss_on_six_examples() {
        let (m, _) = evaluate_with_pr_curve(&six_examples()).unwrap();

        // Per-example loss is log2(1 + e^(−y·s)); the margins y·s are
        // 2, 0.5, −1 for both classes.
        let per_margin = |margin: f64| (1.0 + (-margin).exp()).log2();
        let expected = 2.0 * (per_margin(2.0) + per_margin(0.5) + per_margin(-1.0)) / 6.0;

        assert!((m.log_loss - expected).abs() < 1e-6);
        assert!((m.log_loss - 0.920_567_68).abs() < 1e-6);
        // Balanced classes: entropy is exactly 1 bit
        assert!((m.log_loss_reduction - (1.0 - expected)).abs() < 1e-6);
        assert!((m.log_loss_reduction - 0.079_432_32).abs() < 1e-6);
    }

    #[test]
    fn test_pr_curve_points() {
        let (_, curve) = evaluate_with_pr_curve(&six_examples()).unwrap();
        assert_eq!(curve.len(), 6);

        assert_eq!(curve[0].threshold, 2.0);
        assert!(close(curve[0].precision, 1.0));
        assert!(close(curve[0].recall, 1.0 / 3.0));
        assert!(close(curve[0].false_positive_rate, 0.0));

        assert_eq!(curve[2].threshold, 0.5);
        assert!(close(curve[2].precision, 2.0 / 3.0));
        assert!(close(curve[2].recall, 2.0 / 3.0));
        assert!(close(curve[2].false_positive_rate, 1.0 / 3.0));

        let last = curve.last().unwrap();
        assert!(close(last.recall, 1.0));
        assert!(close(last.false_positive_rate, 1.0));
        assert!(close(last.precision, 0.5));
    }

    #[test]
    fn test_ties_share_one_point_and_half_credit() {
        let (m, curve) = evaluate_with_pr_curve(&[ex(1.0, true), ex(1.0, false)]).unwrap();
        assert_eq!(curve.len(), 1);
        assert!(close(m.area_under_roc_curve, 0.5));
    }

    #[test]
    fn test_perfect_ranking() {
        let data = vec![ex(3.0, true), ex(2.0, true), ex(-1.0, false), ex(-4.0, false)];
        let (m, _) = evaluate_with_pr_curve(&data).unwrap();
        assert!(close(m.area_under_roc_curve, 1.0));
        assert!(close(m.area_under_pr_curve, 1.0));
        assert!(close(m.accuracy, 1.0));
        assert!(m.log_loss < m.entropy);
        assert!(m.log_loss_reduction > 0.0);
    }

    #[test]
    fn test_ignores_missing_labels_and_nan_scores() {
        let mut data = six_examples();
        data.push(ScoredExample { label: None, score: 5.0, probability: 0.99 });
        data.push(ScoredExample { label: Some(true), score: f32::NAN, probability: f32::NAN });
        let (m, curve) = evaluate_with_pr_curve(&data).unwrap();
        assert_eq!(m.confusion.total(), 6);
        assert_eq!(curve.len(), 6);
    }

    #[test]
    fn test_single_class_is_an_error() {
        assert!(evaluate_with_pr_curve(&[ex(1.0, true), ex(-1.0, true)]).is_err());
        assert!(evaluate_with_pr_curve(&[]).is_err());
    }
}
