//! The road-segment REST client.
//!
//! Every raw wire record is validated into a typed [`RuasJalan`] right
//! here at the boundary, so the view layer only ever deals with decode
//! and style questions.

use serde_json::Value;

use crate::api::auth::{Auth, Config};
use crate::api::{self, ApiError, Method};
use crate::data_types::common::{value_to_i64, SegmentId};
use crate::data_types::road::master::{Desa, MasterEntry, MasterKind};
use crate::data_types::road::segment::{RuasJalan, RuasJalanPayload};
use crate::logvbln;

pub struct RoadApi {
    auth: Auth,
}

impl RoadApi {
    const CC: &str = "RoadApi";

    pub async fn login(config: Config) -> Result<Self, ApiError> {
        Ok(Self {
            auth: Auth::login(config).await?,
        })
    }

    async fn get(&mut self, path: &str) -> Result<Value, ApiError> {
        let url = format!("{}/{}", self.auth.base_url(), path);
        let token = self.auth.access_token().await?.to_string();

        let body = api::request(Method::Get, url, Some(token), None).await?;

        Ok(serde_json::from_slice(&body)?)
    }

    async fn send(
        &mut self,
        method: Method,
        path: &str,
        fields: Option<&[(&str, &str)]>,
    ) -> Result<(), ApiError> {
        let url = format!("{}/{}", self.auth.base_url(), path);
        let token = self.auth.access_token().await?.to_string();
        let body = fields.map(api::form_encode);

        api::request(method, url, Some(token), body).await?;

        Ok(())
    }

    pub async fn fetch_all_segments(&mut self) -> Result<Vec<RuasJalan>, ApiError> {
        let response = self.get("ruasjalan").await?;

        Ok(Self::parse_segment_list(&response))
    }

    pub async fn fetch_segment(&mut self, id: SegmentId) -> Result<Option<RuasJalan>, ApiError> {
        let response = self.get(&format!("ruasjalan/{}", id)).await?;

        // Some deployments wrap the record, some return it bare
        let record = response.get("ruasjalan").unwrap_or(&response);

        Ok(RuasJalan::from_value(record))
    }

    pub async fn create_segment(&mut self, payload: &RuasJalanPayload) -> Result<(), ApiError> {
        self.send(Method::Post, "ruasjalan", Some(&payload.form_fields()))
            .await
    }

    pub async fn update_segment(
        &mut self,
        id: SegmentId,
        payload: &RuasJalanPayload,
    ) -> Result<(), ApiError> {
        self.send(
            Method::Put,
            &format!("ruasjalan/{}", id),
            Some(&payload.form_fields()),
        )
        .await
    }

    pub async fn delete_segment(&mut self, id: SegmentId) -> Result<(), ApiError> {
        self.send(Method::Delete, &format!("ruasjalan/{}", id), None)
            .await
    }

    pub async fn fetch_master(&mut self, kind: MasterKind) -> Result<Vec<MasterEntry>, ApiError> {
        let response = self.get(kind.endpoint()).await?;

        Ok(Self::parse_master_list(&response, kind))
    }

    pub async fn fetch_desa_by_kecamatan(
        &mut self,
        kecamatan_id: i64,
    ) -> Result<Vec<Desa>, ApiError> {
        let response = self.get(&format!("desa/{}", kecamatan_id)).await?;

        Ok(Self::parse_desa_list(&response))
    }

    /// A response without the `ruasjalan` list means an empty network, not
    /// a broken one.
    fn parse_segment_list(response: &Value) -> Vec<RuasJalan> {
        let items = match response.get("ruasjalan").and_then(|r| r.as_array()) {
            Some(items) => items,
            None => return Vec::new(),
        };

        let mut segments = Vec::with_capacity(items.len());

        for item in items {
            match RuasJalan::from_value(item) {
                Some(ruas) => segments.push(ruas),
                None => logvbln!("Discarding a ruasjalan record without a usable id"),
            }
        }

        segments
    }

    // All three master tables arrive under the `eksisting` key; only the
    // label column is named after the table
    fn parse_master_list(response: &Value, kind: MasterKind) -> Vec<MasterEntry> {
        let items = match response.get("eksisting").and_then(|e| e.as_array()) {
            Some(items) => items,
            None => return Vec::new(),
        };

        items
            .iter()
            .filter_map(|item| {
                Some(MasterEntry {
                    id: value_to_i64(item.get("id")?)?,
                    label: item.get(kind.label_key())?.as_str()?.to_string(),
                })
            })
            .collect()
    }

    fn parse_desa_list(response: &Value) -> Vec<Desa> {
        let items = match response.get("desa").and_then(|d| d.as_array()) {
            Some(items) => items,
            None => return Vec::new(),
        };

        items
            .iter()
            .filter_map(|item| {
                Some(Desa {
                    id: value_to_i64(item.get("id")?)?,
                    desa: item.get("desa")?.as_str()?.to_string(),
                })
            })
            .collect()
    }
}
