//! Encoded-polyline codec at the de-facto standard 1e-5 degree precision.
//!
//! The wire format stores each coordinate as a delta against the previous
//! one, quantized to 1e-5 degree units, zig-zag encoded and packed into
//! 5-bit groups offset into printable ASCII by 63. Deltas accumulate in
//! integer space so long paths cannot drift.

use geo_types::{Coord, LineString};
use thiserror::Error;

const PRECISION: f64 = 1e5;

// Printable range of a 5-bit group: 63 ('?') through 63 + 0x3f ('~')
const OFFSET: u8 = 63;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("malformed polyline at byte {offset}")]
pub struct MalformedPolyline {
    pub offset: usize,
}

/// Encodes a path into polyline text. An empty path encodes to `""`.
///
/// Coordinates follow the geo-types convention, `x` = longitude and
/// `y` = latitude; the wire format stores latitude first.
pub fn encode(path: &LineString<f64>) -> String {
    let mut encoded = String::new();

    let mut prev_lat: i64 = 0;
    let mut prev_lon: i64 = 0;

    for coord in path.coords() {
        let lat = scale(coord.y);
        let lon = scale(coord.x);

        write_delta(lat - prev_lat, &mut encoded);
        write_delta(lon - prev_lon, &mut encoded);

        prev_lat = lat;
        prev_lon = lon;
    }

    encoded
}

/// Decodes polyline text back into a path. `""` decodes to an empty path.
///
/// Inverts `encode` exactly for any string it produced. Inputs that stop
/// mid-group or carry bytes outside the printable group range fail with
/// [`MalformedPolyline`].
pub fn decode(text: &str) -> Result<LineString<f64>, MalformedPolyline> {
    let bytes = text.as_bytes();
    let mut coords: Vec<Coord> = Vec::new();

    let mut index = 0;
    let mut lat: i64 = 0;
    let mut lon: i64 = 0;

    while index < bytes.len() {
        lat += read_delta(bytes, &mut index)?;
        lon += read_delta(bytes, &mut index)?;

        coords.push(Coord {
            x: lon as f64 / PRECISION,
            y: lat as f64 / PRECISION,
        });
    }

    Ok(LineString::new(coords))
}

fn scale(degrees: f64) -> i64 {
    (degrees * PRECISION).round() as i64
}

fn write_delta(delta: i64, out: &mut String) {
    // Zig-zag so small negative deltas stay short
    let mut value = ((delta << 1) ^ (delta >> 63)) as u64;

    while value >= 0x20 {
        out.push((((value & 0x1f) | 0x20) as u8 + OFFSET) as char);
        value >>= 5;
    }

    out.push((value as u8 + OFFSET) as char);
}

fn read_delta(bytes: &[u8], index: &mut usize) -> Result<i64, MalformedPolyline> {
    let mut result: i64 = 0;
    let mut shift = 0;

    loop {
        let byte = match bytes.get(*index) {
            Some(byte) => *byte,
            // Ran out of input inside a group
            None => return Err(MalformedPolyline { offset: *index }),
        };

        if !(OFFSET..=OFFSET + 0x3f).contains(&byte) || shift >= 60 {
            return Err(MalformedPolyline { offset: *index });
        }

        *index += 1;

        let group = (byte - OFFSET) as i64;
        result |= (group & 0x1f) << shift;
        shift += 5;

        if group & 0x20 == 0 {
            return Ok((result >> 1) ^ -(result & 1));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(points: &[(f64, f64)]) -> LineString<f64> {
        // (lat, lon) pairs, as sources usually quote them
        LineString::new(points.iter().map(|p| Coord { x: p.1, y: p.0 }).collect())
    }

    #[test]
    fn encodes_the_reference_vector() {
        let line = path(&[(38.5, -120.2), (40.7, -120.95), (43.252, -126.453)]);

        assert_eq!(encode(&line), "_p~iF~ps|U_ulLnnqC_mqNvxq`@");
    }

    #[test]
    fn decodes_the_reference_vector() {
        let line = decode("_p~iF~ps|U_ulLnnqC_mqNvxq`@").unwrap();

        assert_eq!(line, path(&[(38.5, -120.2), (40.7, -120.95), (43.252, -126.453)]));
    }

    #[test]
    fn empty_both_ways() {
        assert_eq!(encode(&LineString::new(vec![])), "");
        assert_eq!(decode("").unwrap().0.len(), 0);
    }

    #[test]
    fn round_trips_a_bali_segment() {
        let original = path(&[(-8.409518, 115.188919), (-8.41, 115.19)]);

        let decoded = decode(&encode(&original)).unwrap();

        assert_eq!(decoded.0.len(), 2);
        for (got, want) in decoded.coords().zip(original.coords()) {
            assert!((got.x - want.x).abs() <= 1e-5);
            assert!((got.y - want.y).abs() <= 1e-5);
        }
    }

    #[test]
    fn round_trips_exactly_at_wire_precision() {
        let original = path(&[(-8.40952, 115.18892), (-8.41, 115.19), (-8.40013, 115.20145)]);

        assert_eq!(decode(&encode(&original)).unwrap(), original);
    }

    #[test]
    fn truncated_input_is_malformed() {
        let mut text = encode(&path(&[(-8.409518, 115.188919), (-8.41, 115.19)]));
        text.pop();

        assert!(decode(&text).is_err());
    }

    #[test]
    fn out_of_range_byte_is_malformed() {
        let err = decode("_p~iF~ps U").unwrap_err();

        assert_eq!(err.offset, 8);
    }

    #[test]
    fn missing_longitude_is_malformed() {
        // A single complete value is only half a coordinate
        let mut text = String::new();
        write_delta(100, &mut text);

        assert!(decode(&text).is_err());
    }

    #[test]
    fn overlong_group_is_malformed() {
        // Fourteen continuation groups would shift past 60 bits
        let text: String = std::iter::repeat((0x20u8 + OFFSET) as char).take(14).collect();

        assert!(decode(&text).is_err());
    }

    #[test]
    fn matches_the_reference_decoder() {
        let original = path(&[(-8.409518, 115.188919), (-8.41, 115.19), (-8.4235, 115.2371)]);
        let encoded = encode(&original);

        let reference = polyline::decode_polyline(&encoded, 5).expect("reference decode");
        let ours = decode(&encoded).unwrap();

        assert_eq!(reference.0.len(), ours.0.len());
        for (theirs, mine) in reference.coords().zip(ours.coords()) {
            assert!((theirs.x - mine.x).abs() < 1e-9);
            assert!((theirs.y - mine.y).abs() < 1e-9);
        }
    }
}
