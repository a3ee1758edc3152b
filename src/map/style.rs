//! Line styling policy for rendered road segments.

pub const DEFAULT_WEIGHT: u32 = 3;
pub const HIGHLIGHT_WEIGHT: u32 = 6;

// Reserved for the selected segment, deliberately absent from the palette
pub const HIGHLIGHT_COLOR: &str = "yellow";

const PALETTE: [&str; 10] = [
    "red", "blue", "green", "orange", "purple", "brown", "black", "teal", "maroon", "cyan",
];

const DASH_DESA: &[u32] = &[5, 10];
const DASH_KABUPATEN: &[u32] = &[5, 5, 10];
const DASH_UNKNOWN: &[u32] = &[1, 5];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineStyle {
    pub color: &'static str,
    pub weight: u32,
    /// `None` renders solid.
    pub dash_array: Option<&'static [u32]>,
}

pub struct StyleResolver;

impl StyleResolver {
    /// Dash pattern by administrative road class. Anything outside the
    /// known classes gets a tight dash so it stands out as unclassified.
    pub fn dash_for_class(jenisjalan_id: Option<i64>) -> Option<&'static [u32]> {
        match jenisjalan_id {
            Some(1) => Some(DASH_DESA),
            Some(2) => Some(DASH_KABUPATEN),
            // Provincial roads render solid
            Some(3) => None,
            _ => Some(DASH_UNKNOWN),
        }
    }

    /// Colors cycle by list position so neighbouring rows stay apart.
    pub fn palette_color(index: usize) -> &'static str {
        PALETTE[index % PALETTE.len()]
    }

    pub fn line_style(index: usize, jenisjalan_id: Option<i64>, highlighted: bool) -> LineStyle {
        if highlighted {
            return LineStyle {
                color: HIGHLIGHT_COLOR,
                weight: HIGHLIGHT_WEIGHT,
                dash_array: Self::dash_for_class(jenisjalan_id),
            };
        }

        LineStyle {
            color: Self::palette_color(index),
            weight: DEFAULT_WEIGHT,
            dash_array: Self::dash_for_class(jenisjalan_id),
        }
    }
}
