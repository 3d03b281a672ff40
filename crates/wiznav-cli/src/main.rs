//! CLI utility for zone navigation meshes

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use glam::Vec3;
use std::path::{Path, PathBuf};

use wiznav_agent::{
    Actuator, CycleOutcome, DirArchive, Keycode, Navigator, NavigatorConfig, PositionSource,
};
use wiznav_mesh::{NavData, SegmentSet};

/// Inspect and query zone navigation meshes
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Decode a navigation mesh and print a summary
    Inspect {
        /// Input navigation mesh file (zone.nav)
        #[clap(long, value_parser)]
        mesh: PathBuf,

        /// Write the decoded vertices and edges as JSON
        #[clap(long, value_parser)]
        json: Option<PathBuf>,
    },

    /// Find the closest point on a navigation mesh
    Nearest {
        /// Input navigation mesh file (zone.nav)
        #[clap(long, value_parser)]
        mesh: PathBuf,

        /// Query position (x,y,z)
        #[clap(long, value_parser = parse_vector, allow_hyphen_values = true)]
        target: Vec3,
    },

    /// Run one navigation cycle against extracted zone archives
    Cycle {
        /// Directory holding one extracted directory per zone archive
        #[clap(long, value_parser)]
        archive_root: PathBuf,

        /// Zone name as reported by the client, e.g. WizardCity/WC_Hub
        #[clap(long)]
        zone: String,

        /// Quest position (x,y,z)
        #[clap(long, value_parser = parse_vector, allow_hyphen_values = true)]
        target: Vec3,

        /// Asset name of the navigation mesh inside the archive
        #[clap(long, default_value = "zone.nav")]
        asset: String,
    },
}

/// Parse a comma-separated vector
fn parse_vector(s: &str) -> Result<Vec3, String> {
    let parts: Vec<&str> = s.split(',').collect();

    if parts.len() != 3 {
        return Err(format!(
            "Vector must have 3 components, got {}",
            parts.len()
        ));
    }

    let x = parts[0].trim().parse::<f32>().map_err(|e| e.to_string())?;
    let y = parts[1].trim().parse::<f32>().map_err(|e| e.to_string())?;
    let z = parts[2].trim().parse::<f32>().map_err(|e| e.to_string())?;

    Ok(Vec3::new(x, y, z))
}

/// Stand-in client with a fixed quest position; teleports are only printed
struct FixedTarget {
    target: Vec3,
}

impl PositionSource for FixedTarget {
    async fn current_target_position(&mut self) -> wiznav_common::Result<Vec3> {
        Ok(self.target)
    }
}

impl Actuator for FixedTarget {
    async fn teleport(&mut self, position: Vec3) -> wiznav_common::Result<()> {
        println!("teleport {},{},{}", position.x, position.y, position.z);
        Ok(())
    }

    async fn send_key(&mut self, key: Keycode) -> wiznav_common::Result<()> {
        println!("key {}", key);
        Ok(())
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    match args.command {
        Commands::Inspect { mesh, json } => inspect(&mesh, json.as_deref()),
        Commands::Nearest { mesh, target } => nearest(&mesh, target),
        Commands::Cycle {
            archive_root,
            zone,
            target,
            asset,
        } => {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_time()
                .build()
                .context("Failed to start async runtime")?;
            runtime.block_on(cycle(archive_root, &zone, target, asset))
        }
    }
}

fn load_nav_data(path: &Path) -> Result<NavData> {
    let bytes = std::fs::read(path)
        .with_context(|| format!("Failed to read navigation mesh: {}", path.display()))?;
    NavData::from_bytes(bytes).map_err(|e| anyhow!("Failed to decode {}: {}", path.display(), e))
}

/// Decode a navigation mesh and print a summary
fn inspect(mesh_path: &Path, json: Option<&Path>) -> Result<()> {
    let nav_data = load_nav_data(mesh_path)?;

    println!("Navigation mesh {}", mesh_path.display());
    println!(
        "  vertices: {} accepted, {} declared, {} rejected records",
        nav_data.vertex_count(),
        nav_data.declared_vertex_count,
        nav_data.discarded_records
    );
    println!("  edges: {}", nav_data.edge_count());

    let dangling = nav_data.dangling_edges().count();
    if dangling > 0 {
        println!("  dangling edges: {} (geometry cannot be built)", dangling);
    } else {
        let segments = SegmentSet::build(&nav_data)?;
        println!("  degenerate segments: {}", segments.degenerate_count());
        if let Some((min, max)) = segments.bounds() {
            println!("  bounds: min={:?}, max={:?}", min, max);
        }
    }

    if let Some(json_path) = json {
        let file = std::fs::File::create(json_path)
            .with_context(|| format!("Failed to create output file: {}", json_path.display()))?;
        serde_json::to_writer_pretty(file, &nav_data)
            .with_context(|| format!("Failed to write JSON: {}", json_path.display()))?;
        println!("Saved navigation mesh as JSON to {}", json_path.display());
    }

    Ok(())
}

/// Find the closest point on a navigation mesh
fn nearest(mesh_path: &Path, target: Vec3) -> Result<()> {
    let nav_data = load_nav_data(mesh_path)?;
    let segments = SegmentSet::build(&nav_data)
        .map_err(|e| anyhow!("Failed to build mesh geometry: {}", e))?;

    let nearest = segments
        .nearest_point_or_err(target)
        .map_err(|e| anyhow!("Query for {:?} failed: {}", target, e))?;

    let edge = segments
        .get(nearest.segment)
        .map(|s| s.edge)
        .ok_or_else(|| anyhow!("Segment {} missing", nearest.segment))?;

    println!(
        "{},{},{}",
        nearest.point.x, nearest.point.y, nearest.point.z
    );
    println!(
        "# edge {} ({:?}), distance {}",
        edge,
        nav_data.edges[edge],
        nearest.distance_squared.sqrt()
    );

    Ok(())
}

/// Run one navigation cycle against extracted zone archives
async fn cycle(archive_root: PathBuf, zone: &str, target: Vec3, asset: String) -> Result<()> {
    let config = NavigatorConfig::default().with_asset_name(asset);
    config.validate().map_err(|e| anyhow!(e))?;

    log::info!("Running navigation cycle for {} from {}", zone, archive_root.display());
    let mut navigator = Navigator::new(DirArchive::new(archive_root), config);
    let mut client = FixedTarget { target };

    match navigator.navigate_zone(zone, &mut client).await {
        CycleOutcome::Teleported(_) => Ok(()),
        CycleOutcome::TargetUnavailable => {
            println!("Target is at the origin; nothing to do");
            Ok(())
        }
        CycleOutcome::NoResult => Err(anyhow!("Navigation mesh for {} has no usable segments", zone)),
        CycleOutcome::Skipped(reason) => Err(anyhow!("Navigation cycle skipped: {}", reason)),
    }
}
