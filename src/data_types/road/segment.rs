use serde_json::Value;

use crate::data_types::common::{value_to_f64, value_to_i64, value_to_string, Identifiable, SegmentId};
use crate::data_types::road::master;

/// One registered road segment, as kept in memory after boundary validation.
///
/// `paths` is the encoded-polyline form of the geometry and stays encoded
/// here; decoding happens where a renderable line is actually needed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuasJalan {
    pub id: SegmentId,
    pub paths: String,

    pub desa_id: Option<i64>,
    pub kode_ruas: String,
    pub nama_ruas: String,

    // Meters
    pub panjang: f64,
    pub lebar: f64,

    pub eksisting_id: Option<i64>,
    pub kondisi_id: Option<i64>,
    pub jenisjalan_id: Option<i64>,

    pub keterangan: String,
}

impl RuasJalan {
    /// Validates one raw wire record. Records without a usable id are
    /// dropped here so nothing downstream has to re-check shapes.
    pub fn from_value(value: &Value) -> Option<Self> {
        let id = value_to_i64(value.get("id")?)?;

        Some(Self {
            id,
            paths: value.get("paths").map(value_to_string).unwrap_or_default(),
            desa_id: value.get("desa_id").and_then(value_to_i64),
            kode_ruas: value.get("kode_ruas").map(value_to_string).unwrap_or_default(),
            nama_ruas: value.get("nama_ruas").map(value_to_string).unwrap_or_default(),
            panjang: value.get("panjang").and_then(value_to_f64).unwrap_or(0.),
            lebar: value.get("lebar").and_then(value_to_f64).unwrap_or(0.),
            eksisting_id: value.get("eksisting_id").and_then(value_to_i64),
            kondisi_id: value.get("kondisi_id").and_then(value_to_i64),
            jenisjalan_id: value.get("jenisjalan_id").and_then(value_to_i64),
            keterangan: value.get("keterangan").map(value_to_string).unwrap_or_default(),
        })
    }

    pub fn jenis_label(&self) -> &'static str {
        master::jenis_label(self.jenisjalan_id)
    }
}

impl Identifiable for RuasJalan {
    fn segment_id(&self) -> SegmentId {
        self.id
    }
}

/// Outbound form body for create/update. The API wants every field as a
/// form-urlencoded string, so the payload keeps them that way.
#[derive(Debug, Clone, Default)]
pub struct RuasJalanPayload {
    pub paths: String,
    pub desa_id: String,
    pub kode_ruas: String,
    pub nama_ruas: String,
    pub panjang: String,
    pub lebar: String,
    pub eksisting_id: String,
    pub kondisi_id: String,
    pub jenisjalan_id: String,
    pub keterangan: String,
}

impl RuasJalanPayload {
    pub fn form_fields(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("paths", &self.paths),
            ("desa_id", &self.desa_id),
            ("kode_ruas", &self.kode_ruas),
            ("nama_ruas", &self.nama_ruas),
            ("panjang", &self.panjang),
            ("lebar", &self.lebar),
            ("eksisting_id", &self.eksisting_id),
            ("kondisi_id", &self.kondisi_id),
            ("jenisjalan_id", &self.jenisjalan_id),
            ("keterangan", &self.keterangan),
        ]
    }
}

/// Table-view filter: free-text term over code/name plus the three
/// classification dropdowns, all optional.
#[derive(Debug, Clone, Default)]
pub struct SegmentFilter {
    pub term: String,
    pub kondisi_id: Option<i64>,
    pub jenisjalan_id: Option<i64>,
    pub eksisting_id: Option<i64>,
}

impl SegmentFilter {
    pub fn matches(&self, ruas: &RuasJalan) -> bool {
        let term = self.term.to_lowercase();
        let match_term = term.is_empty()
            || ruas.nama_ruas.to_lowercase().contains(&term)
            || ruas.kode_ruas.to_lowercase().contains(&term);

        let match_kondisi = self.kondisi_id.is_none() || ruas.kondisi_id == self.kondisi_id;
        let match_jenis = self.jenisjalan_id.is_none() || ruas.jenisjalan_id == self.jenisjalan_id;
        let match_eksisting = self.eksisting_id.is_none() || ruas.eksisting_id == self.eksisting_id;

        match_term && match_kondisi && match_jenis && match_eksisting
    }
}
