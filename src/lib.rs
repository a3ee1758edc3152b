use std::cell::RefCell;
use std::rc::Rc;

use api::auth::Config;
use api::client::RoadApi;
use api::ApiError;
use data_types::common::SegmentId;
use data_types::road::master::{Desa, MasterEntry, MasterKind};
use data_types::road::segment::{RuasJalan, RuasJalanPayload, SegmentFilter};
use map::focus::SelectionFocus;
use map::layer::RoadLayer;
use map::Viewport;
use selection::SelectionStore;
use util::logging;

pub mod api;
pub mod codec;
pub mod data_types;
pub mod map;
pub mod selection;
pub mod util;

/// The console core: one API client, one in-memory copy of the network,
/// one selection slot. Everything a UI renders is derived from here.
pub struct App {
    road_api: RoadApi,
    segments: Vec<RuasJalan>,
    pub selection: SelectionStore,
}

impl App {
    const CC: &str = "App";

    pub async fn login(config: Config) -> Result<Self, ApiError> {
        logging::set_global_level(logging::LogLevel::INFO);

        Ok(Self {
            road_api: RoadApi::login(config).await?,
            segments: Vec::new(),
            selection: SelectionStore::new(),
        })
    }

    /// Creates an account with the same credentials `login` will use.
    pub async fn register(config: &Config, name: &str) -> Result<(), ApiError> {
        api::auth::Auth::register(config, name).await
    }

    /// The bulk fetch lives here and nowhere else. Building a layer never
    /// touches the network; hosts call this on mount or explicit refresh.
    pub async fn refresh(&mut self) -> Result<usize, ApiError> {
        self.segments = self.road_api.fetch_all_segments().await?;

        crate::logln!("Loaded {} ruas jalan", self.segments.len());

        Ok(self.segments.len())
    }

    pub fn segments(&self) -> &[RuasJalan] {
        &self.segments
    }

    /// Styled shapes for the whole network, highlighting the current
    /// selection if there is one.
    pub fn layer(&self) -> RoadLayer {
        RoadLayer::build(&self.segments, self.selection.current().map(|r| r.id))
    }

    pub fn filter(&self, filter: &SegmentFilter) -> Vec<&RuasJalan> {
        self.segments
            .iter()
            .filter(|ruas| filter.matches(ruas))
            .collect()
    }

    /// Wires the shared viewport to selection changes.
    pub fn attach_focus(&mut self, viewport: Rc<RefCell<Viewport>>) {
        SelectionFocus::attach(&mut self.selection, viewport);
    }

    /// Editing always starts from a fresh copy fetched by id. The
    /// selection store is a display concern and may be stale; it is never
    /// used as form state.
    pub async fn begin_edit(&mut self, id: SegmentId) -> Result<Option<RuasJalan>, ApiError> {
        self.road_api.fetch_segment(id).await
    }

    pub async fn create_segment(&mut self, payload: &RuasJalanPayload) -> Result<(), ApiError> {
        self.road_api.create_segment(payload).await
    }

    pub async fn update_segment(
        &mut self,
        id: SegmentId,
        payload: &RuasJalanPayload,
    ) -> Result<(), ApiError> {
        self.road_api.update_segment(id, payload).await
    }

    pub async fn delete_segment(&mut self, id: SegmentId) -> Result<(), ApiError> {
        self.road_api.delete_segment(id).await?;

        // A deleted segment cannot stay selected
        if self.selection.current().map(|r| r.id) == Some(id) {
            self.selection.clear();
        }

        Ok(())
    }

    pub async fn master_list(&mut self, kind: MasterKind) -> Result<Vec<MasterEntry>, ApiError> {
        self.road_api.fetch_master(kind).await
    }

    pub async fn desa_list(&mut self, kecamatan_id: i64) -> Result<Vec<Desa>, ApiError> {
        self.road_api.fetch_desa_by_kecamatan(kecamatan_id).await
    }
}
