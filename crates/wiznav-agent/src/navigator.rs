//! Navigation cycles: zone mesh to teleport target
//!
//! A cycle loads the current zone's navigation mesh, projects the quest
//! target onto it and teleports the player to the projected point. Every
//! failure is contained in the cycle; callers get a [`CycleOutcome`] and the
//! control loop keeps running.

use std::collections::HashMap;
use std::sync::Arc;

use glam::Vec3;
use wiznav_common::Result;
use wiznav_mesh::{NavData, SegmentSet};

use crate::archive::{archive_name_for_zone, read_archive_asset, ZoneArchive};
use crate::client::{Actuator, GameClient, PositionSource};
use crate::config::NavigatorConfig;

/// What a navigation cycle ended up doing
#[derive(Debug, Clone, PartialEq)]
pub enum CycleOutcome {
    /// The player was sent to this point on the mesh
    Teleported(Vec3),
    /// The target position is still the origin placeholder
    TargetUnavailable,
    /// The mesh has no usable segment
    NoResult,
    /// Loading, decoding or a client call failed
    Skipped(String),
}

impl CycleOutcome {
    pub fn is_teleport(&self) -> bool {
        matches!(self, CycleOutcome::Teleported(_))
    }
}

/// Runs navigation cycles against one archive source
pub struct Navigator<A: ZoneArchive> {
    archive: A,
    config: NavigatorConfig,
    cache: HashMap<String, Arc<SegmentSet>>,
}

impl<A: ZoneArchive> Navigator<A> {
    pub fn new(archive: A, config: NavigatorConfig) -> Self {
        Self {
            archive,
            config,
            cache: HashMap::new(),
        }
    }

    pub fn config(&self) -> &NavigatorConfig {
        &self.config
    }

    pub fn archive(&self) -> &A {
        &self.archive
    }

    /// Number of zones with a cached segment set
    pub fn cached_zones(&self) -> usize {
        self.cache.len()
    }

    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// Loads, decodes and builds the segment set for `zone_name`
    pub async fn load_segments(&mut self, zone_name: &str) -> Result<Arc<SegmentSet>> {
        if let Some(segments) = self.cache.get(zone_name) {
            return Ok(Arc::clone(segments));
        }

        log::info!("Loading navmesh for zone: {}", zone_name);

        let archive_name = archive_name_for_zone(zone_name);
        let bytes =
            read_archive_asset(&mut self.archive, &archive_name, &self.config.asset_name).await?;

        let nav_data = NavData::from_bytes(bytes)?;
        if nav_data.discarded_records > 0 {
            log::debug!(
                "Zone {} dropped {} out-of-sequence vertex records",
                zone_name,
                nav_data.discarded_records
            );
        }

        let segments = Arc::new(SegmentSet::build(&nav_data)?);
        log::info!(
            "Loaded navmesh for {}: {} vertices, {} segments",
            zone_name,
            nav_data.vertex_count(),
            segments.len()
        );

        if self.config.cache_meshes {
            self.cache
                .insert(zone_name.to_string(), Arc::clone(&segments));
        }

        Ok(segments)
    }

    /// Runs one cycle for the client's current zone
    pub async fn run_cycle<C: GameClient>(&mut self, client: &mut C) -> CycleOutcome {
        let zone_name = match client.zone_name().await {
            Ok(zone_name) => zone_name,
            Err(e) => return Self::skip(e),
        };

        self.navigate_zone(&zone_name, client).await
    }

    /// Runs one cycle for `zone_name`, reading the target from and sending
    /// the teleport to `client`
    pub async fn navigate_zone<C>(&mut self, zone_name: &str, client: &mut C) -> CycleOutcome
    where
        C: PositionSource + Actuator,
    {
        match self.try_navigate(zone_name, client).await {
            Ok(outcome) => outcome,
            Err(e) => Self::skip(e),
        }
    }

    async fn try_navigate<C>(&mut self, zone_name: &str, client: &mut C) -> Result<CycleOutcome>
    where
        C: PositionSource + Actuator,
    {
        let segments = self.load_segments(zone_name).await?;

        let target = client.current_target_position().await?;
        if target == Vec3::ZERO {
            log::debug!("Quest position not available yet");
            tokio::time::sleep(self.config.origin_retry_delay).await;
            return Ok(CycleOutcome::TargetUnavailable);
        }

        let Some(nearest) = segments.nearest_point(target) else {
            log::info!("Navmesh for {} has no usable segments", zone_name);
            return Ok(CycleOutcome::NoResult);
        };

        log::info!(
            "Teleporting to closest navmesh point: {:?} (segment {}, {:.2} from target)",
            nearest.point,
            nearest.segment,
            nearest.distance_squared.sqrt()
        );
        client.teleport(nearest.point).await?;

        Ok(CycleOutcome::Teleported(nearest.point))
    }

    fn skip(error: wiznav_common::Error) -> CycleOutcome {
        log::warn!("Navigation cycle skipped: {}", error);
        CycleOutcome::Skipped(error.to_string())
    }
}
