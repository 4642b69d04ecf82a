// ============================================================
// Layer 5 — SDCA Binary Trainer
// ============================================================
// Stochastic Dual Coordinate Ascent for L1/L2-regularised
// logistic regression (Shalev-Shwartz & Zhang, prox-SDCA).
//
// Primal:
//   P(w) = 1/n Σ log(1 + exp(-y_i w·x_i)) + λ (½‖w‖² + t‖w‖₁)
//
// Dual variables β_i ∈ (0, 1), one per example, starting at 0.
// We keep
//   v = 1/(λn) Σ β_i y_i x_i
// and read the primal weights off it by soft thresholding:
//   w_j = sign(v_j) · max(|v_j| − t, 0)
// where t is the L1 threshold. The bias is a constant 1
// appended to every x; it is L2-regularised but never
// thresholded.
//
// One epoch visits every example once (shuffled) and maximises
// the dual along its coordinate. With u = logit(β') the 1-D
// optimality condition is
//   −u − a − q·σ(u) = 0,   a = y·(w·x) − β·q,   q = ‖x‖²/(λn)
// whose root lies in [−a − q, −a]; a safeguarded Newton
// iteration inside that bracket finds it. After each
// epoch the duality gap P − D bounds the distance to the
// optimum; training stops once the relative gap drops below
// the tolerance or the iteration budget is spent.

use anyhow::{bail, Result};
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::domain::traits::Estimator;
use crate::ml::model::LinearBinaryModel;

/// Keeps β away from 0 and 1 where log terms blow up.
const DUAL_EPSILON: f64 = 1e-12;

const MAX_COORDINATE_STEPS: usize = 50;
const COORDINATE_TOLERANCE: f64 = 1e-10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SdcaOptions {
    /// Soft threshold applied to v; larger values give sparser weights
    pub l1_threshold:          f32,

    /// λ, the L2 regularisation constant (must be > 0)
    pub l2_regularization:     f32,

    /// Maximum number of passes over the data
    pub max_iterations:        usize,

    /// Stop when duality_gap / |primal| falls below this
    pub convergence_tolerance: f64,

    pub shuffle:               bool,
    pub seed:                  u64,
}

impl Default for SdcaOptions {
    fn default() -> Self {
        Self {
            l1_threshold:          0.25,
            l2_regularization:     1e-4,
            max_iterations:        100,
            convergence_tolerance: 0.1,
            shuffle:               true,
            seed:                  42,
        }
    }
}

/// A feature vector with its (possibly missing) label.
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledVector {
    pub features: Vec<f32>,
    pub label:    Option<bool>,
}

impl LabeledVector {
    pub fn new(features: Vec<f32>, label: Option<bool>) -> Self {
        Self { features, label }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingSummary {
    pub epochs:           usize,
    pub converged:        bool,
    pub primal_objective: f64,
    pub duality_gap:      f64,
    pub used_rows:        usize,
    pub skipped_rows:     usize,
    pub nonzero_weights:  usize,
}

#[derive(Debug, Clone)]
pub struct SdcaFit {
    pub model:   LinearBinaryModel,
    pub summary: TrainingSummary,
}

#[derive(Debug, Clone, Default)]
pub struct SdcaTrainer {
    options: SdcaOptions,
}

impl SdcaTrainer {
    pub fn new(options: SdcaOptions) -> Self {
        Self { options }
    }

    fn validate(&self) -> Result<()> {
        let o = &self.options;
        if !(o.l2_regularization > 0.0 && o.l2_regularization.is_finite()) {
            bail!("L2 regularization must be positive, got {}", o.l2_regularization);
        }
        if !(o.l1_threshold >= 0.0 && o.l1_threshold.is_finite()) {
            bail!("L1 threshold must be non-negative, got {}", o.l1_threshold);
        }
        if o.max_iterations == 0 {
            bail!("SDCA needs at least one iteration");
        }
        Ok(())
    }
}

impl Estimator<LabeledVector> for SdcaTrainer {
    type Fitted = SdcaFit;

    fn fit(&self, data: &[LabeledVector]) -> Result<SdcaFit> {
        self.validate()?;

        // ── Keep rows with a label and finite features ────────────────────────
        let mut xs: Vec<&[f32]> = Vec::with_capacity(data.len());
        let mut ys: Vec<f64>    = Vec::with_capacity(data.len());
        let mut dim: Option<usize> = None;

        for row in data {
            let Some(label) = row.label else { continue };
            if !row.features.iter().all(|x| x.is_finite()) {
                continue;
            }
            match dim {
                None => dim = Some(row.features.len()),
                Some(d) if d != row.features.len() => {
                    bail!("Inconsistent feature length: expected {}, found {}", d, row.features.len())
                }
                Some(_) => {}
            }
            xs.push(&row.features);
            ys.push(if label { 1.0 } else { -1.0 });
        }

        let skipped = data.len() - xs.len();
        if skipped > 0 {
            tracing::warn!("SDCA skipped {} rows with a missing label or non-finite features", skipped);
        }

        let n = xs.len();
        let d = match dim {
            Some(d) if n > 0 => d,
            _ => bail!("No usable training rows"),
        };
        if d == 0 {
            bail!("Training rows have no features");
        }

        let solver = Solver::new(&self.options, &xs, &ys, d);
        Ok(solver.run(&self.options, skipped))
    }
}

// ─── Solver state ─────────────────────────────────────────────────────────────
// v has d + 1 entries: the last one belongs to the bias.
struct Solver<'a> {
    xs:        &'a [&'a [f32]],
    ys:        &'a [f64],
    d:         usize,
    lambda:    f64,
    threshold: f64,
    /// 1 / (λ n)
    scale:     f64,
    sq_norms:  Vec<f64>,
    beta:      Vec<f64>,
    v:         Vec<f64>,
}

impl<'a> Solver<'a> {
    fn new(options: &SdcaOptions, xs: &'a [&'a [f32]], ys: &'a [f64], d: usize) -> Self {
        let n      = xs.len();
        let lambda = options.l2_regularization as f64;
        let scale  = 1.0 / (lambda * n as f64);

        let sq_norms = xs
            .iter()
            .map(|x| x.iter().map(|v| (*v as f64) * (*v as f64)).sum::<f64>() + 1.0)
            .collect();

        Self {
            xs,
            ys,
            d,
            lambda,
            threshold: options.l1_threshold as f64,
            scale,
            sq_norms,
            beta: vec![0.0; n],
            v:    vec![0.0; d + 1],
        }
    }

    fn run(mut self, options: &SdcaOptions, skipped: usize) -> SdcaFit {
        let n = self.xs.len();
        let mut order: Vec<usize> = (0..n).collect();
        let mut rng = StdRng::seed_from_u64(options.seed);

        let mut epochs    = 0;
        let mut converged = false;
        let mut primal    = f64::NAN;
        let mut gap       = f64::NAN;

        for epoch in 1..=options.max_iterations {
            if options.shuffle {
                order.shuffle(&mut rng);
            }
            for &i in &order {
                self.coordinate_step(i);
            }

            let (p, dual) = self.objectives();
            primal = p;
            gap    = p - dual;
            epochs = epoch;

            tracing::debug!("SDCA epoch {:>3}: primal={:.6} gap={:.3e}", epoch, primal, gap);

            if gap / primal.abs().max(1e-12) < options.convergence_tolerance {
                converged = true;
                break;
            }
        }

        let weights: Vec<f32> = (0..self.d).map(|j| self.weight(j) as f32).collect();
        let model = LinearBinaryModel::new(weights, self.v[self.d] as f32);

        let summary = TrainingSummary {
            epochs,
            converged,
            primal_objective: primal,
            duality_gap:      gap,
            used_rows:        n,
            skipped_rows:     skipped,
            nonzero_weights:  model.nonzero_weights(),
        };

        tracing::info!(
            "SDCA finished after {} epochs (converged: {}, gap {:.3e}, {} non-zero weights)",
            summary.epochs,
            summary.converged,
            summary.duality_gap,
            summary.nonzero_weights,
        );

        SdcaFit { model, summary }
    }

    /// Primal weight j read off v by soft thresholding.
    fn weight(&self, j: usize) -> f64 {
        let v = self.v[j];
        v.signum() * (v.abs() - self.threshold).max(0.0)
    }

    fn margin(&self, i: usize) -> f64 {
        let dot: f64 = self.xs[i]
            .iter()
            .enumerate()
            .map(|(j, x)| self.weight(j) * (*x as f64))
            .sum();
        dot + self.v[self.d]
    }

    fn add_to_v(&mut self, i: usize, step: f64) {
        for (vj, x) in self.v.iter_mut().zip(self.xs[i].iter()) {
            *vj += step * (*x as f64);
        }
        self.v[self.d] += step;
    }

    fn coordinate_step(&mut self, i: usize) {
        let y = self.ys[i];
        let b = self.beta[i];

        let q     = self.sq_norms[i] * self.scale;
        let a     = y * self.margin(i) - b * q;
        let new_b = solve_coordinate(a, q).clamp(DUAL_EPSILON, 1.0 - DUAL_EPSILON);

        let delta = new_b - b;
        if delta != 0.0 {
            self.beta[i] = new_b;
            self.add_to_v(i, delta * y * self.scale);
        }
    }

    /// (primal, dual) objective values at the current iterate.
    fn objectives(&self) -> (f64, f64) {
        let n = self.xs.len() as f64;

        let loss: f64 = (0..self.xs.len())
            .map(|i| softplus(-self.ys[i] * self.margin(i)))
            .sum::<f64>()
            / n;

        let mut sq_w = 0.0;
        let mut l1_w = 0.0;
        for j in 0..self.d {
            let w = self.weight(j);
            sq_w += w * w;
            l1_w += w.abs();
        }
        let bias = self.v[self.d];
        sq_w += bias * bias;

        let primal = loss + self.lambda * (0.5 * sq_w + self.threshold * l1_w);

        let entropy: f64 = self.beta.iter().map(|b| binary_entropy(*b)).sum::<f64>() / n;
        let dual = entropy - self.lambda * 0.5 * sq_w;

        (primal, dual)
    }
}

/// Root of −u − a − q·σ(u), returned as σ(u).
fn solve_coordinate(a: f64, q: f64) -> f64 {
    let mut lo = -a - q;
    let mut hi = -a;
    let mut u  = 0.5 * (lo + hi);

    for _ in 0..MAX_COORDINATE_STEPS {
        let s = logistic(u);
        let f = -u - a - q * s;
        if f.abs() < COORDINATE_TOLERANCE {
            break;
        }
        if f > 0.0 { lo = u } else { hi = u }

        let next = u + f / (1.0 + q * s * (1.0 - s));
        u = if next >= lo && next <= hi { next } else { 0.5 * (lo + hi) };
    }
    logistic(u)
}

fn logistic(u: f64) -> f64 {
    if u >= 0.0 {
        1.0 / (1.0 + (-u).exp())
    } else {
        let e = u.exp();
        e / (1.0 + e)
    }
}

/// log(1 + e^z) without overflow.
fn softplus(z: f64) -> f64 {
    z.max(0.0) + (-z.abs()).exp().ln_1p()
}

/// Natural-log binary entropy −β ln β − (1−β) ln(1−β).
fn binary_entropy(b: f64) -> f64 {
    let b = b.clamp(DUAL_EPSILON, 1.0 - DUAL_EPSILON);
    -(b * b.ln() + (1.0 - b) * (1.0 - b).ln())
}
