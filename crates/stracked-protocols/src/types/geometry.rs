//! Page geometry: element boxes and viewport size.

use serde::{Deserialize, Serialize};

use crate::error::ElementReadError;

/// Element box in rendered page pixels at capture time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub top: f64,
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
}

impl BoundingBox {
    /// Create a box, rejecting inverted or non-finite edges.
    pub fn new(top: f64, left: f64, bottom: f64, right: f64) -> Result<Self, ElementReadError> {
        let bbox = Self {
            top,
            left,
            bottom,
            right,
        };
        if bbox.is_valid() {
            Ok(bbox)
        } else {
            Err(ElementReadError::InvalidBox {
                top,
                left,
                bottom,
                right,
            })
        }
    }

    /// Build a box from an 8-value quad `[x1, y1, x2, y2, x3, y3, x4, y4]`.
    pub fn from_quad(quad: &[f64]) -> Result<Self, ElementReadError> {
        if quad.len() < 8 {
            return Err(ElementReadError::Backend(format!(
                "quad has {} values, expected 8",
                quad.len()
            )));
        }

        let xs = [quad[0], quad[2], quad[4], quad[6]];
        let ys = [quad[1], quad[3], quad[5], quad[7]];
        let left = xs.iter().copied().fold(f64::INFINITY, f64::min);
        let right = xs.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let top = ys.iter().copied().fold(f64::INFINITY, f64::min);
        let bottom = ys.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        Self::new(top, left, bottom, right)
    }

    /// `right >= left`, `bottom >= top` and every edge finite.
    pub fn is_valid(&self) -> bool {
        [self.top, self.left, self.bottom, self.right]
            .iter()
            .all(|v| v.is_finite())
            && self.right >= self.left
            && self.bottom >= self.top
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// Map a position given in percent of this box to absolute page pixels.
    pub fn point_at(&self, relative_x: f64, relative_y: f64) -> (f64, f64) {
        let x = self.left + self.width() * relative_x / 100.0;
        let y = self.top + self.height() * relative_y / 100.0;
        (x, y)
    }
}

/// Viewport the page is rendered into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    /// Width in CSS pixels.
    pub width: u32,
    /// Height in CSS pixels.
    pub height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
        }
    }
}

#[cfg(test)]
#[path = "geometry_tests.rs"]
mod tests;
