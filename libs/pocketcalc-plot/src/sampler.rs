//! Fixed-step function sampling
//!
//! Walks the domain in `steps` equal sub-intervals and evaluates the
//! expression at each of the `steps + 1` abscissas. Points without a
//! finite value are dropped individually.

use crate::error::{PlotError, Result};
use crate::range::Domain;
use pocketcalc_eval::{AngleMode, CalcEngine, CalcError, Expression};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Sub-intervals per plot
pub const DEFAULT_STEPS: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub x: f64,
    pub y: f64,
}

/// Non-empty, x-ordered sampled points
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Samples(Vec<DataPoint>);

impl Samples {
    /// Wrap sampled points; an empty set has nothing to plot.
    pub fn new(points: Vec<DataPoint>) -> Result<Self> {
        if points.is_empty() {
            return Err(PlotError::NoPlottablePoints);
        }
        Ok(Self(points))
    }

    pub fn points(&self) -> &[DataPoint] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DataPoint> {
        self.0.iter()
    }

    /// Smallest and largest `y`
    pub fn y_extent(&self) -> (f64, f64) {
        self.0
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
                (lo.min(p.y), hi.max(p.y))
            })
    }

    pub fn into_inner(self) -> Vec<DataPoint> {
        self.0
    }
}

impl<'a> IntoIterator for &'a Samples {
    type Item = &'a DataPoint;
    type IntoIter = std::slice::Iter<'a, DataPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// What happened at one abscissa
#[derive(Debug, Clone, PartialEq)]
pub enum SampleOutcome {
    /// Finite value
    Plotted(DataPoint),
    /// Well-formed but no finite value here (division by zero, log of a negative)
    Undefined { x: f64 },
    /// Evaluation itself failed (unbound symbol, type mismatch)
    Failed { x: f64, error: CalcError },
}

impl SampleOutcome {
    pub fn x(&self) -> f64 {
        match self {
            SampleOutcome::Plotted(point) => point.x,
            SampleOutcome::Undefined { x } | SampleOutcome::Failed { x, .. } => *x,
        }
    }

    pub fn point(&self) -> Option<DataPoint> {
        match self {
            SampleOutcome::Plotted(point) => Some(*point),
            _ => None,
        }
    }
}

/// The `steps + 1` abscissas from `domain.min` to exactly `domain.max`.
pub fn abscissas(domain: Domain, steps: usize) -> Result<Vec<f64>> {
    if steps == 0 {
        return Err(PlotError::InvalidStepCount);
    }
    let xs = (0..=steps)
        .map(|i| {
            if i == steps {
                domain.max
            } else {
                domain.lerp(i as f64 / steps as f64)
            }
        })
        .collect();
    Ok(xs)
}

/// Evaluate at every abscissa and report each result.
pub fn sample_outcomes(
    expression: &Expression,
    domain: Domain,
    angle_mode: AngleMode,
    steps: usize,
) -> Result<Vec<SampleOutcome>> {
    let xs = abscissas(domain, steps)?;
    let mut engine = CalcEngine::new(angle_mode)?;

    let outcomes = xs
        .into_iter()
        .map(|x| match engine.evaluate_at(expression, x) {
            Ok(y) => SampleOutcome::Plotted(DataPoint { x, y }),
            Err(error) if error.is_domain() => SampleOutcome::Undefined { x },
            Err(error) => SampleOutcome::Failed { x, error },
        })
        .collect();
    Ok(outcomes)
}

/// Sample the expression over the domain, keeping finite points only.
pub fn sample(
    expression: &Expression,
    domain: Domain,
    angle_mode: AngleMode,
    steps: usize,
) -> Result<Samples> {
    let outcomes = sample_outcomes(expression, domain, angle_mode, steps)?;
    let total = outcomes.len();
    let points: Vec<DataPoint> = outcomes.iter().filter_map(SampleOutcome::point).collect();

    debug!(
        expression = expression.source(),
        %domain,
        total,
        plotted = points.len(),
        "sampled"
    );
    Samples::new(points)
}
