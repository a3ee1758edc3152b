//! Closed classification tables for road segments. The authoritative lists
//! live server-side; the labels here are the fixed fallbacks the console
//! renders without a master-data round trip.

/// One row of a master-data table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MasterEntry {
    pub id: i64,
    pub label: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MasterKind {
    Eksisting,
    Kondisi,
    JenisJalan,
}

impl MasterKind {
    pub fn endpoint(&self) -> &'static str {
        match self {
            MasterKind::Eksisting => "meksisting",
            MasterKind::Kondisi => "mkondisi",
            MasterKind::JenisJalan => "mjenisjalan",
        }
    }

    /// Key of the human-readable column inside a list item.
    pub fn label_key(&self) -> &'static str {
        match self {
            MasterKind::Eksisting => "eksisting",
            MasterKind::Kondisi => "kondisi",
            MasterKind::JenisJalan => "jenisjalan",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Desa {
    pub id: i64,
    pub desa: String,
}

pub fn jenis_label(jenisjalan_id: Option<i64>) -> &'static str {
    match jenisjalan_id {
        Some(1) => "Desa",
        Some(2) => "Kabupaten",
        Some(3) => "Provinsi",
        _ => "Lainnya",
    }
}

pub fn kondisi_label(kondisi_id: Option<i64>) -> &'static str {
    match kondisi_id {
        Some(1) => "Baik",
        Some(2) => "Sedang",
        Some(3) => "Rusak",
        _ => "-",
    }
}

pub fn eksisting_label(eksisting_id: Option<i64>) -> &'static str {
    match eksisting_id {
        Some(1) => "Tanah",
        Some(2) => "Tanah/Beton",
        Some(3) => "Perkerasan",
        Some(4) => "Koral",
        Some(5) => "Lapen",
        Some(6) => "Paving",
        Some(7) => "Hotmix",
        Some(8) => "Beton",
        Some(9) => "Beton/Lapen",
        _ => "-",
    }
}
