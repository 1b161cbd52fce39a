// Copyright 2026 the Linewright Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Conversions between points, layout units and device pixels.
//!
//! Layout units are points multiplied by a fixed factor (20 by default), so that
//! line breaking happens in integer arithmetic that does not depend on the zoom
//! level. Only rendering converts layout units to pixels.

use crate::util::{floor_to_i32, round_to_i32};

/// Dots per inch at which one point is exactly one pixel.
pub const POINTS_PER_INCH: f64 = 72.0;

/// Construction parameters for a [`ZoomHandler`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ZoomConfig {
    /// Layout units per point.
    pub layout_unit_factor: u32,
    /// Horizontal device resolution in dots per inch.
    pub dpi_x: f64,
    /// Vertical device resolution in dots per inch.
    pub dpi_y: f64,
    /// Zoom level in percent.
    pub zoom: u32,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            layout_unit_factor: 20,
            dpi_x: POINTS_PER_INCH,
            dpi_y: POINTS_PER_INCH,
            zoom: 100,
        }
    }
}

/// Converts between layout units and pixels at a given zoom and resolution.
///
/// The layout unit factor is fixed for the lifetime of the handler. The zoom and
/// resolution may change; doing so never changes where lines break, only where
/// they are drawn.
#[derive(Clone, Debug)]
pub struct ZoomHandler {
    factor: u32,
    dpi_x: f64,
    dpi_y: f64,
    zoom: u32,
    zoomed_dpi_x: f64,
    zoomed_dpi_y: f64,
}

impl Default for ZoomHandler {
    fn default() -> Self {
        Self::new(ZoomConfig::default())
    }
}

impl ZoomHandler {
    /// Creates a handler from `config`.
    ///
    /// A layout unit factor of zero is replaced by one.
    pub fn new(config: ZoomConfig) -> Self {
        let factor = if config.layout_unit_factor == 0 {
            log::warn!("layout unit factor of 0 replaced by 1");
            1
        } else {
            config.layout_unit_factor
        };
        let mut zh = Self {
            factor,
            dpi_x: config.dpi_x,
            dpi_y: config.dpi_y,
            zoom: config.zoom,
            zoomed_dpi_x: 0.,
            zoomed_dpi_y: 0.,
        };
        zh.update_zoomed_resolution();
        zh
    }

    /// Layout units per point.
    pub fn layout_unit_factor(&self) -> u32 {
        self.factor
    }

    /// Current zoom level in percent.
    pub fn zoom(&self) -> u32 {
        self.zoom
    }

    /// Sets the zoom level in percent.
    pub fn set_zoom(&mut self, zoom: u32) {
        self.zoom = zoom;
        self.update_zoomed_resolution();
    }

    /// Sets the device resolution in dots per inch.
    pub fn set_resolution(&mut self, dpi_x: f64, dpi_y: f64) {
        self.dpi_x = dpi_x;
        self.dpi_y = dpi_y;
        self.update_zoomed_resolution();
    }

    /// Horizontal resolution including zoom, in dots per inch.
    pub fn zoomed_resolution_x(&self) -> f64 {
        self.zoomed_dpi_x
    }

    /// Vertical resolution including zoom, in dots per inch.
    pub fn zoomed_resolution_y(&self) -> f64 {
        self.zoomed_dpi_y
    }

    fn update_zoomed_resolution(&mut self) {
        let zoom = f64::from(self.zoom) / 100.0;
        self.zoomed_dpi_x = self.dpi_x * zoom;
        self.zoomed_dpi_y = self.dpi_y * zoom;
    }

    fn lu_per_inch(&self) -> f64 {
        f64::from(self.factor) * POINTS_PER_INCH
    }

    /// Converts a horizontal layout-unit coordinate to pixels.
    pub fn layout_unit_to_pixel_x(&self, lu: i32) -> i32 {
        floor_to_i32(f64::from(lu) * self.zoomed_dpi_x / self.lu_per_inch())
    }

    /// Converts a vertical layout-unit coordinate to pixels.
    pub fn layout_unit_to_pixel_y(&self, lu: i32) -> i32 {
        floor_to_i32(f64::from(lu) * self.zoomed_dpi_y / self.lu_per_inch())
    }

    /// Converts the horizontal span `origin..origin + size` to a pixel width.
    ///
    /// Both ends are converted separately, so adjacent spans always tile without
    /// gaps or overlaps regardless of rounding.
    pub fn layout_unit_to_pixel_x_span(&self, origin: i32, size: i32) -> i32 {
        self.layout_unit_to_pixel_x(origin + size) - self.layout_unit_to_pixel_x(origin)
    }

    /// Converts the vertical span `origin..origin + size` to a pixel height.
    pub fn layout_unit_to_pixel_y_span(&self, origin: i32, size: i32) -> i32 {
        self.layout_unit_to_pixel_y(origin + size) - self.layout_unit_to_pixel_y(origin)
    }

    /// Converts a horizontal pixel coordinate to layout units.
    pub fn pixel_to_layout_unit_x(&self, px: i32) -> i32 {
        if self.zoomed_dpi_x <= 0. {
            return 0;
        }
        round_to_i32(f64::from(px) * self.lu_per_inch() / self.zoomed_dpi_x)
    }

    /// Converts a vertical pixel coordinate to layout units.
    pub fn pixel_to_layout_unit_y(&self, px: i32) -> i32 {
        if self.zoomed_dpi_y <= 0. {
            return 0;
        }
        round_to_i32(f64::from(px) * self.lu_per_inch() / self.zoomed_dpi_y)
    }

    /// Scales a point value into the layout-unit point space. Zoom independent.
    pub fn pt_to_layout_unit_pt(&self, pt: f64) -> f64 {
        pt * f64::from(self.factor)
    }

    /// Scales a point value into whole layout units, rounded.
    pub fn pt_to_layout_unit(&self, pt: f64) -> i32 {
        round_to_i32(self.pt_to_layout_unit_pt(pt))
    }

    /// Converts layout units back to points.
    pub fn layout_unit_to_pt(&self, lu: i32) -> f64 {
        f64::from(lu) / f64::from(self.factor)
    }

    /// Converts points to horizontal pixels at the current zoom.
    pub fn pt_to_pixel_x(&self, pt: f64) -> i32 {
        round_to_i32(pt * self.zoomed_dpi_x / POINTS_PER_INCH)
    }

    /// Converts points to vertical pixels at the current zoom.
    pub fn pt_to_pixel_y(&self, pt: f64) -> i32 {
        round_to_i32(pt * self.zoomed_dpi_y / POINTS_PER_INCH)
    }

    /// Converts horizontal pixels to points at the current zoom.
    pub fn pixel_to_pt_x(&self, px: i32) -> f64 {
        if self.zoomed_dpi_x <= 0. {
            return 0.;
        }
        f64::from(px) * POINTS_PER_INCH / self.zoomed_dpi_x
    }

    /// Converts vertical pixels to points at the current zoom.
    pub fn pixel_to_pt_y(&self, px: i32) -> f64 {
        if self.zoomed_dpi_y <= 0. {
            return 0.;
        }
        f64::from(px) * POINTS_PER_INCH / self.zoomed_dpi_y
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handler(zoom: u32, dpi: f64) -> ZoomHandler {
        ZoomHandler::new(ZoomConfig {
            zoom,
            dpi_x: dpi,
            dpi_y: dpi,
            ..ZoomConfig::default()
        })
    }

    #[test]
    fn identity_at_72_dpi() {
        let zh = ZoomHandler::default();
        assert_eq!(zh.layout_unit_to_pixel_x(200), 10, "20 LU per pixel at 100%");
        assert_eq!(zh.layout_unit_to_pixel_y(219), 10, "conversion floors");
        assert_eq!(zh.pixel_to_layout_unit_x(10), 200);
        assert_eq!(zh.pt_to_layout_unit(12.0), 240);
        assert_eq!(zh.layout_unit_to_pt(30), 1.5);
    }

    #[test]
    fn zoom_scales_pixels_not_layout_units() {
        let mut zh = handler(100, 96.0);
        let lu = zh.pt_to_layout_unit(72.0);
        assert_eq!(zh.layout_unit_to_pixel_x(lu), 96);
        zh.set_zoom(200);
        assert_eq!(zh.pt_to_layout_unit(72.0), lu, "layout units ignore zoom");
        assert_eq!(zh.layout_unit_to_pixel_x(lu), 192);
    }

    #[test]
    fn negative_coordinates_floor_down() {
        let zh = ZoomHandler::default();
        assert_eq!(zh.layout_unit_to_pixel_x(-1), -1, "floor, not truncation");
    }

    #[test]
    fn spans_tile_without_gaps() {
        for (zoom, dpi) in [(100, 72.0), (75, 96.0), (133, 96.0), (250, 120.0), (33, 72.0)] {
            let zh = handler(zoom, dpi);
            let widths = [30, 7, 13, 1, 45, 22, 9, 30, 30, 11];
            let mut x = 17;
            let mut px = zh.layout_unit_to_pixel_x(x);
            let start_px = px;
            for w in widths {
                px += zh.layout_unit_to_pixel_x_span(x, w);
                x += w;
                assert_eq!(px, zh.layout_unit_to_pixel_x(x), "gap at zoom {zoom} dpi {dpi}");
            }
            let total: i32 = widths.iter().sum();
            assert_eq!(
                px - start_px,
                zh.layout_unit_to_pixel_x_span(17, total),
                "span sum must equal total span at zoom {zoom}"
            );
        }
    }

    #[test]
    fn zero_factor_is_replaced() {
        let zh = ZoomHandler::new(ZoomConfig {
            layout_unit_factor: 0,
            ..ZoomConfig::default()
        });
        assert_eq!(zh.layout_unit_factor(), 1);
    }
}
