//! Document-space rectangles and viewport intersection math

use serde::{Deserialize, Serialize};

/// An axis-aligned box in document coordinates (y grows downwards)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    #[inline]
    pub fn area(&self) -> f64 {
        self.width.max(0.0) * self.height.max(0.0)
    }

    /// Finite coordinates and non-negative size
    pub fn is_valid(&self) -> bool {
        [self.x, self.y, self.width, self.height]
            .iter()
            .all(|v| v.is_finite())
            && self.width >= 0.0
            && self.height >= 0.0
    }

    /// Overlapping box, or `None` when the two do not overlap
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        if right < x || bottom < y {
            return None;
        }
        Some(Rect::new(x, y, right - x, bottom - y))
    }
}

/// The visible window onto the document
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Vertical scroll offset from the top of the document
    pub scroll_y: f64,
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            scroll_y: 0.0,
            width,
            height,
        }
    }

    pub fn scrolled_to(mut self, scroll_y: f64) -> Self {
        self.scroll_y = scroll_y;
        self
    }

    /// Visible region in document coordinates
    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, self.scroll_y, self.width, self.height)
    }
}

/// Fraction of `region`'s area currently inside the viewport, in [0, 1].
///
/// Degenerate regions (zero area or invalid geometry) always report 0.
pub fn intersection_ratio(region: &Rect, viewport: &Viewport) -> f64 {
    if !region.is_valid() {
        return 0.0;
    }
    let area = region.area();
    if area <= 0.0 {
        return 0.0;
    }
    match region.intersection(&viewport.bounds()) {
        Some(overlap) => (overlap.area() / area).clamp(0.0, 1.0),
        None => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport_at(scroll_y: f64) -> Viewport {
        Viewport::new(1280.0, 800.0).scrolled_to(scroll_y)
    }

    #[test]
    fn test_fully_visible_region() {
        let region = Rect::new(0.0, 100.0, 1280.0, 200.0);
        assert!((intersection_ratio(&region, &viewport_at(0.0)) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_region_below_fold() {
        let region = Rect::new(0.0, 900.0, 1280.0, 400.0);
        assert_eq!(intersection_ratio(&region, &viewport_at(0.0)), 0.0);
    }

    #[test]
    fn test_partial_overlap() {
        // 400px tall region starting at 700: 100px visible at scroll 0
        let region = Rect::new(0.0, 700.0, 1280.0, 400.0);
        assert!((intersection_ratio(&region, &viewport_at(0.0)) - 0.25).abs() < 1e-9);
        assert!((intersection_ratio(&region, &viewport_at(300.0)) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_area_never_intersects() {
        let region = Rect::new(0.0, 100.0, 1280.0, 0.0);
        assert_eq!(intersection_ratio(&region, &viewport_at(0.0)), 0.0);
    }

    #[test]
    fn test_invalid_geometry() {
        let region = Rect::new(0.0, f64::NAN, 10.0, 10.0);
        assert!(!region.is_valid());
        assert_eq!(intersection_ratio(&region, &viewport_at(0.0)), 0.0);
        assert!(!Rect::new(0.0, 0.0, -1.0, 10.0).is_valid());
    }

    #[test]
    fn test_region_taller_than_viewport() {
        let region = Rect::new(0.0, 0.0, 1280.0, 8000.0);
        assert!((intersection_ratio(&region, &viewport_at(2000.0)) - 0.1).abs() < 1e-9);
    }
}
