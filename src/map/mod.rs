use geo_types::Coord;

use crate::util::geo::{GeoBounds, MERCATOR_HALF_EXTENT_M};

pub mod editor;
pub mod focus;
pub mod layer;
pub mod style;

// Bali, where the network lives
pub const DEFAULT_CENTER: Coord = Coord {
    x: 115.188919,
    y: -8.409518,
};
pub const DEFAULT_ZOOM: f64 = 13.0;

const MIN_ZOOM: f64 = 0.0;
const MAX_ZOOM: f64 = 19.0;
const TILE_SIZE_PX: f64 = 256.0;

/// The visible slice of the map: a pixel surface looking at a center and
/// zoom level. The crate never draws tiles itself; it only decides where
/// the surface should look.
#[derive(Debug, Clone, PartialEq)]
pub struct Viewport {
    width_px: u32,
    height_px: u32,
    center: Coord,
    zoom: f64,
}

impl Viewport {
    pub fn new(width_px: u32, height_px: u32) -> Self {
        Self {
            width_px,
            height_px,
            center: DEFAULT_CENTER,
            zoom: DEFAULT_ZOOM,
        }
    }

    pub fn center(&self) -> Coord {
        self.center
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Recenters on the box and picks the largest zoom at which the box,
    /// inset by `padding_px` on each side, still fits the surface. A box
    /// with no extent only recenters.
    pub fn fit_bounds(&mut self, bounds: &GeoBounds, padding_px: u32) {
        self.center = bounds.center();

        let (span_w, span_h) = bounds.mercator_span();
        if span_w <= 0.0 && span_h <= 0.0 {
            return;
        }

        let avail_w = (self.width_px as f64 - 2.0 * padding_px as f64).max(1.0);
        let avail_h = (self.height_px as f64 - 2.0 * padding_px as f64).max(1.0);

        // Meters each pixel must cover so the whole box fits
        let needed = f64::max(span_w / avail_w, span_h / avail_h);

        let zoom = (2.0 * MERCATOR_HALF_EXTENT_M / (TILE_SIZE_PX * needed)).log2();
        self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
    }

    /// Meters per pixel at the current zoom, for anyone sizing overlays.
    pub fn meters_per_pixel(&self) -> f64 {
        2.0 * MERCATOR_HALF_EXTENT_M / (TILE_SIZE_PX * 2f64.powf(self.zoom))
    }
}
