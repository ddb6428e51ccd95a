//! The displayed plot
//!
//! A [`PlotSession`] holds at most one plot. A successful request replaces
//! it wholesale; a failed request leaves it untouched. Requests run the
//! checks in a fixed order: function present, x range, syntax, sampling,
//! y range.

use crate::error::{PlotError, Result};
use crate::grid::GridPlan;
use crate::mapper::{CoordinateMapper, PixelPoint, Surface};
use crate::range::{resolve_domain, resolve_range, Domain, Range, RangeWarning};
use crate::sampler::{sample, DataPoint, Samples, DEFAULT_STEPS};
use pocketcalc_eval::{AngleMode, CalcError, Expression};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Text as typed into the grapher form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotRequest {
    pub expression: String,
    pub x_min: String,
    pub x_max: String,
    pub y_min: String,
    pub y_max: String,
}

impl PlotRequest {
    pub fn new(
        expression: impl Into<String>,
        x_min: impl Into<String>,
        x_max: impl Into<String>,
    ) -> Self {
        Self {
            expression: expression.into(),
            x_min: x_min.into(),
            x_max: x_max.into(),
            ..Default::default()
        }
    }

    pub fn with_y_range(mut self, y_min: impl Into<String>, y_max: impl Into<String>) -> Self {
        self.y_min = y_min.into();
        self.y_max = y_max.into();
        self
    }
}

/// A resolved, sampled plot
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Plot {
    pub expression: String,
    pub angle_mode: AngleMode,
    pub domain: Domain,
    pub range: Range,
    pub samples: Samples,
    pub warning: Option<RangeWarning>,
}

impl Plot {
    /// Run a request through validation, sampling and range resolution.
    pub fn build(request: &PlotRequest, angle_mode: AngleMode, steps: usize) -> Result<Self> {
        if request.expression.trim().is_empty() {
            return Err(PlotError::EmptyExpression);
        }
        let domain = resolve_domain(&request.x_min, &request.x_max)?;
        let expression = Expression::parse(&request.expression).map_err(|e| match e {
            CalcError::Empty => PlotError::EmptyExpression,
            other => PlotError::Expression(other),
        })?;

        let samples = sample(&expression, domain, angle_mode, steps)?;
        let resolution = resolve_range(&request.y_min, &request.y_max, &samples);

        Ok(Self {
            expression: expression.body().to_string(),
            angle_mode,
            domain,
            range: resolution.range,
            samples,
            warning: resolution.warning,
        })
    }

    pub fn mapper(&self, surface: Surface) -> CoordinateMapper {
        CoordinateMapper::new(self.domain, self.range, surface)
    }

    /// Geometry for the renderer
    pub fn frame(&self, surface: Surface, tick_count: usize) -> PlotFrame {
        let mapper = self.mapper(surface);
        PlotFrame {
            expression: self.expression.clone(),
            angle_mode: self.angle_mode,
            domain: self.domain,
            range: self.range,
            surface,
            points: self.samples.points().to_vec(),
            polyline: mapper.polyline(&self.samples),
            grid: GridPlan::new(&mapper, tick_count),
            warning: self.warning.as_ref().map(ToString::to_string),
        }
    }
}

/// Output boundary handed to a renderer or printed as JSON
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlotFrame {
    pub expression: String,
    pub angle_mode: AngleMode,
    pub domain: Domain,
    pub range: Range,
    pub surface: Surface,
    pub points: Vec<DataPoint>,
    pub polyline: Vec<PixelPoint>,
    pub grid: GridPlan,
    pub warning: Option<String>,
}

#[derive(Debug, Clone)]
pub struct PlotSession {
    angle_mode: AngleMode,
    steps: usize,
    current: Option<Plot>,
}

impl Default for PlotSession {
    fn default() -> Self {
        Self {
            angle_mode: AngleMode::default(),
            steps: DEFAULT_STEPS,
            current: None,
        }
    }
}

impl PlotSession {
    pub fn new(angle_mode: AngleMode, steps: usize) -> Result<Self> {
        if steps == 0 {
            return Err(PlotError::InvalidStepCount);
        }
        Ok(Self {
            angle_mode,
            steps,
            current: None,
        })
    }

    pub fn angle_mode(&self) -> AngleMode {
        self.angle_mode
    }

    /// Applies to the next plot; the displayed one keeps its mode.
    pub fn set_angle_mode(&mut self, mode: AngleMode) {
        self.angle_mode = mode;
    }

    pub fn toggle_angle_mode(&mut self) -> AngleMode {
        self.angle_mode = self.angle_mode.toggled();
        self.angle_mode
    }

    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Plot a request, replacing the displayed plot on success.
    pub fn plot(&mut self, request: &PlotRequest) -> Result<&Plot> {
        let plot = Plot::build(request, self.angle_mode, self.steps).map_err(|e| {
            debug!(expression = %request.expression, error = %e, "plot rejected");
            e
        })?;
        info!(
            expression = %plot.expression,
            domain = %plot.domain,
            range = %plot.range,
            points = plot.samples.len(),
            "plotted"
        );
        Ok(self.current.insert(plot))
    }

    /// Remove the displayed plot, returning it.
    pub fn clear(&mut self) -> Option<Plot> {
        self.current.take()
    }

    pub fn current(&self) -> Option<&Plot> {
        self.current.as_ref()
    }

    pub fn frame(&self, surface: Surface, tick_count: usize) -> Option<PlotFrame> {
        self.current
            .as_ref()
            .map(|plot| plot.frame(surface, tick_count))
    }
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)]
mod tests {
    use super::*;
    use crate::error::RangeError;
    use crate::grid::DEFAULT_TICKS;
    use crate::range::Interval;
    use tracing_test::traced_test;

    fn session() -> PlotSession {
        PlotSession::new(AngleMode::Radians, 4).unwrap()
    }

    #[test]
    fn test_validation_order() {
        let mut session = session();

        let empty = PlotRequest::new("  ", "", "");
        assert_eq!(session.plot(&empty), Err(PlotError::EmptyExpression));

        let no_range = PlotRequest::new("x^2", "", "5");
        assert_eq!(
            session.plot(&no_range),
            Err(PlotError::Range(RangeError::Missing))
        );

        // range is checked before syntax
        let both_bad = PlotRequest::new("(x", "5", "1");
        assert!(matches!(
            session.plot(&both_bad),
            Err(PlotError::Range(RangeError::Inverted { .. }))
        ));

        let bad_syntax = PlotRequest::new("(x", "1", "5");
        assert!(matches!(
            session.plot(&bad_syntax),
            Err(PlotError::Expression(CalcError::Syntax { .. }))
        ));

        let nothing = PlotRequest::new("sqrt(x)", "-5", "-1");
        assert_eq!(session.plot(&nothing), Err(PlotError::NoPlottablePoints));
    }

    #[test]
    fn test_bare_prefix_is_empty() {
        let mut session = session();
        assert_eq!(
            session.plot(&PlotRequest::new("y=", "0", "1")),
            Err(PlotError::EmptyExpression)
        );
    }

    #[test]
    fn test_success_replaces_failure_keeps() {
        let mut session = session();
        session.plot(&PlotRequest::new("x^2", "-2", "2")).unwrap();
        let first = session.current().cloned().unwrap();
        assert_eq!(first.range, Interval { min: 0.0, max: 4.0 });

        assert!(session.plot(&PlotRequest::new("x +", "-2", "2")).is_err());
        assert_eq!(session.current(), Some(&first));

        session.plot(&PlotRequest::new("y = 2*x", "0", "1")).unwrap();
        let second = session.current().unwrap();
        assert_eq!(second.expression, "2.0*x");
        assert_eq!(second.domain, Interval { min: 0.0, max: 1.0 });
    }

    #[test]
    fn test_clear() {
        let mut session = session();
        assert!(session.clear().is_none());

        session.plot(&PlotRequest::new("x", "0", "1")).unwrap();
        assert!(session.clear().is_some());
        assert!(session.current().is_none());
        assert!(session.frame(Surface::default(), DEFAULT_TICKS).is_none());
    }

    #[test]
    fn test_user_y_range_used() {
        let mut session = session();
        let request = PlotRequest::new("x", "0", "1").with_y_range("-10", "10");
        let plot = session.plot(&request).unwrap();
        assert_eq!(plot.range, Interval { min: -10.0, max: 10.0 });
        assert!(plot.warning.is_none());
    }

    #[traced_test]
    #[test]
    fn test_invalid_y_range_warns_and_plots() {
        let mut session = session();
        let request = PlotRequest::new("x", "0", "1").with_y_range("ten", "20");
        let plot = session.plot(&request).unwrap();

        assert_eq!(plot.range, Interval { min: 0.0, max: 1.0 });
        assert!(plot.warning.is_some());
        assert!(logs_contain("Invalid Y range values"));
    }

    #[test]
    fn test_angle_mode_applies_to_next_plot() {
        let mut session = PlotSession::new(AngleMode::Degrees, 2).unwrap();
        let request = PlotRequest::new("sin(x)", "0", "180");

        let degrees = session.plot(&request).unwrap().clone();
        assert!((degrees.samples.points()[1].y - 1.0).abs() < 1e-12);

        assert_eq!(session.toggle_angle_mode(), AngleMode::Radians);
        assert_eq!(session.current().unwrap().angle_mode, AngleMode::Degrees);

        let radians = session.plot(&request).unwrap();
        assert_eq!(radians.angle_mode, AngleMode::Radians);
        assert!((radians.samples.points()[1].y - 90f64.sin()).abs() < 1e-12);
    }

    #[test]
    fn test_frame() {
        let mut session = session();
        session.plot(&PlotRequest::new("x", "-1", "1")).unwrap();
        let frame = session.frame(Surface::default(), DEFAULT_TICKS).unwrap();

        assert_eq!(frame.points.len(), 5);
        assert_eq!(frame.polyline.len(), 5);
        assert_eq!(frame.polyline[0], PixelPoint { x: 30.0, y: 270.0 });
        assert_eq!(frame.polyline[4], PixelPoint { x: 305.0, y: 30.0 });
        assert_eq!(frame.grid.x_ticks.len(), DEFAULT_TICKS + 1);
        assert_eq!(frame.grid.y_axis, Some(167.5));

        let json = serde_json::to_value(&frame).unwrap();
        assert_eq!(json["angle_mode"], "radians");
        assert_eq!(json["domain"]["min"], -1.0);
    }

    #[test]
    fn test_zero_steps_rejected() {
        assert!(matches!(
            PlotSession::new(AngleMode::Degrees, 0),
            Err(PlotError::InvalidStepCount)
        ));
    }
}
