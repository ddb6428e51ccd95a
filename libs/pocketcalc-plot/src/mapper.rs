//! Data to pixel mapping
//!
//! Affine map from (domain, range) onto the drawable part of a surface,
//! leaving `margin` pixels on every side. Pixel `y` grows downward.

use crate::error::{PlotError, Result};
use crate::range::{Domain, Range};
use crate::sampler::{DataPoint, Samples};
use serde::{Deserialize, Serialize};

pub const DEFAULT_WIDTH: f64 = 335.0;
pub const DEFAULT_HEIGHT: f64 = 300.0;
pub const DEFAULT_MARGIN: f64 = 30.0;

/// Drawing area in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Surface {
    pub width: f64,
    pub height: f64,
    pub margin: f64,
}

impl Surface {
    /// Fails unless the margins leave a drawable area on both axes.
    pub fn new(width: f64, height: f64, margin: f64) -> Result<Self> {
        let valid = [width, height, margin].iter().all(|v| v.is_finite())
            && margin >= 0.0
            && width > 2.0 * margin
            && height > 2.0 * margin;
        if !valid {
            return Err(PlotError::InvalidSurface {
                width,
                height,
                margin,
            });
        }
        Ok(Self {
            width,
            height,
            margin,
        })
    }

    pub fn plot_width(&self) -> f64 {
        self.width - 2.0 * self.margin
    }

    pub fn plot_height(&self) -> f64 {
        self.height - 2.0 * self.margin
    }
}

impl Default for Surface {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            margin: DEFAULT_MARGIN,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

/// Map a single data point onto the surface.
pub fn map_point(point: DataPoint, domain: Domain, range: Range, surface: Surface) -> PixelPoint {
    CoordinateMapper::new(domain, range, surface).map(point)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateMapper {
    domain: Domain,
    range: Range,
    surface: Surface,
}

impl CoordinateMapper {
    pub fn new(domain: Domain, range: Range, surface: Surface) -> Self {
        Self {
            domain,
            range,
            surface,
        }
    }

    pub fn domain(&self) -> Domain {
        self.domain
    }

    pub fn range(&self) -> Range {
        self.range
    }

    pub fn surface(&self) -> Surface {
        self.surface
    }

    /// Horizontal pixel for a data `x`
    pub fn px(&self, x: f64) -> f64 {
        self.surface.margin + self.domain.fraction(x) * self.surface.plot_width()
    }

    /// Vertical pixel for a data `y`
    pub fn py(&self, y: f64) -> f64 {
        self.surface.height
            - (self.surface.margin + self.range.fraction(y) * self.surface.plot_height())
    }

    pub fn map(&self, point: DataPoint) -> PixelPoint {
        PixelPoint {
            x: self.px(point.x),
            y: self.py(point.y),
        }
    }

    /// Map every sample, keeping x order.
    pub fn polyline(&self, samples: &Samples) -> Vec<PixelPoint> {
        samples.iter().map(|point| self.map(*point)).collect()
    }
}
