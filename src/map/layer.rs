//! Builds the renderable layer for the full set of road segments.

use std::fmt;

use geo_types::LineString;

use crate::codec;
use crate::data_types::common::{Identifiable, SegmentId};
use crate::data_types::road::segment::RuasJalan;
use crate::logvbln;
use crate::map::style::{LineStyle, StyleResolver};
use crate::map::Viewport;
use crate::util::geo::GeoBounds;

/// Hover/tap information for one rendered segment.
#[derive(Debug, Clone, PartialEq)]
pub struct TooltipInfo {
    pub nama_ruas: String,
    pub kode_ruas: String,
    pub jenis: &'static str,
    pub panjang: f64,
    pub lebar: f64,
    pub keterangan: String,
}

impl TooltipInfo {
    fn for_segment(ruas: &RuasJalan) -> Self {
        Self {
            nama_ruas: ruas.nama_ruas.clone(),
            kode_ruas: ruas.kode_ruas.clone(),
            jenis: ruas.jenis_label(),
            panjang: ruas.panjang,
            lebar: ruas.lebar,
            keterangan: ruas.keterangan.clone(),
        }
    }
}

impl fmt::Display for TooltipInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.nama_ruas)?;
        writeln!(f, "Kode: {}", self.kode_ruas)?;
        writeln!(f, "Jenis: {}", self.jenis)?;
        writeln!(f, "Panjang: {} m", self.panjang)?;
        writeln!(f, "Lebar: {} m", self.lebar)?;
        write!(f, "Ket: {}", self.keterangan)
    }
}

#[derive(Debug, Clone)]
pub struct RoadShape {
    pub id: SegmentId,
    pub path: LineString<f64>,
    pub style: LineStyle,
    pub tooltip: TooltipInfo,
}

/// Every decodable segment as a styled shape, plus the combined extent.
/// `bounds` is `None` when nothing produced a coordinate.
#[derive(Debug, Clone, Default)]
pub struct RoadLayer {
    pub shapes: Vec<RoadShape>,
    pub bounds: Option<GeoBounds>,
}

impl RoadLayer {
    const CC: &str = "RoadLayer";

    /// Pure rebuild from records already in memory. A segment whose
    /// geometry fails to decode, or decodes to fewer than two points, is
    /// skipped; one bad record never takes the whole layer down.
    pub fn build(segments: &[RuasJalan], selected: Option<SegmentId>) -> Self {
        let mut layer = RoadLayer::default();

        for (index, ruas) in segments.iter().enumerate() {
            let path = match codec::decode(&ruas.paths) {
                Ok(path) => path,
                Err(err) => {
                    logvbln!("Skipping ruas {}: {}", ruas.id, err);
                    continue;
                }
            };

            if path.0.len() < 2 {
                logvbln!("Skipping ruas {}: degenerate path", ruas.id);
                continue;
            }

            for coord in path.coords() {
                match layer.bounds.as_mut() {
                    Some(bounds) => bounds.extend(*coord),
                    None => layer.bounds = Some(GeoBounds::new(*coord)),
                }
            }

            let highlighted = selected == Some(ruas.segment_id());

            layer.shapes.push(RoadShape {
                id: ruas.segment_id(),
                style: StyleResolver::line_style(index, ruas.jenisjalan_id, highlighted),
                tooltip: TooltipInfo::for_segment(ruas),
                path,
            });
        }

        layer
    }

    /// Fits the viewport to the combined extent. With no coordinates at
    /// all the viewport stays wherever it was.
    pub fn fit(&self, viewport: &mut Viewport) {
        if let Some(bounds) = &self.bounds {
            viewport.fit_bounds(bounds, 0);
        }
    }
}
