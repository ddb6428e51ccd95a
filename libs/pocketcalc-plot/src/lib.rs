//! pocketcalc-plot - Function plotting for pocketcalc
//!
//! Turns a formula and user-entered bounds into plot geometry:
//!
//! 1. [`range::resolve_domain`] validates the x bounds
//! 2. [`sampler::sample`] evaluates the formula at `steps + 1` points
//! 3. [`range::resolve_range`] picks the y bounds (user or derived)
//! 4. [`mapper::CoordinateMapper`] and [`grid::GridPlan`] produce pixels
//!
//! [`session::PlotSession`] wraps the pipeline and holds the displayed plot.
//!
//! ```rust
//! use pocketcalc_eval::AngleMode;
//! use pocketcalc_plot::{PlotRequest, PlotSession, Surface};
//!
//! let mut session = PlotSession::new(AngleMode::Radians, 200).unwrap();
//! session.plot(&PlotRequest::new("x^2", "-2", "2")).unwrap();
//!
//! let frame = session.frame(Surface::default(), 5).unwrap();
//! assert_eq!(frame.points.len(), 201);
//! ```

pub mod error;
pub mod grid;
pub mod mapper;
pub mod range;
pub mod sampler;
pub mod session;

pub use error::{Bound, PlotError, RangeError, Result};
pub use grid::{ticks, zero_axis_visible, GridPlan, Tick, DEFAULT_TICKS};
pub use mapper::{map_point, CoordinateMapper, PixelPoint, Surface};
pub use range::{
    resolve_domain, resolve_range, Domain, Interval, Range, RangeResolution, RangeWarning,
};
pub use sampler::{sample, sample_outcomes, DataPoint, SampleOutcome, Samples, DEFAULT_STEPS};
pub use session::{Plot, PlotFrame, PlotRequest, PlotSession};
