//! Navigation orchestration for the wiznav automation agent
//!
//! This crate connects the navigation mesh core to the outside world:
//! zone archives, the hooked game client and the combat logic. All three are
//! reached through traits so that backends can be swapped and tested.
//!
//! # Features
//!
//! - **Navigation cycles**: load a zone's `zone.nav`, project the quest target
//!   onto it and teleport there ([`Navigator`])
//! - **Contained failures**: every cycle ends in a [`CycleOutcome`], never an error
//! - **Scoped archive access**: archives are closed on every path once opened
//! - **Control loop**: explore, talk and fight based on client state ([`Agent`])
//!
//! # Example
//!
//! ```rust,no_run
//! use wiznav_agent::{DirArchive, Navigator, NavigatorConfig};
//! # use wiznav_agent::GameClient;
//!
//! # async fn example<C: GameClient>(client: &mut C) {
//! let archive = DirArchive::new("/games/wizard101/Data/GameData/extracted");
//! let mut navigator = Navigator::new(archive, NavigatorConfig::default());
//!
//! let outcome = navigator.run_cycle(client).await;
//! println!("cycle finished: {:?}", outcome);
//! # }
//! ```

pub mod agent;
pub mod archive;
pub mod client;
pub mod config;
pub mod navigator;

#[cfg(test)]
mod test_helpers;

pub use agent::{Agent, AgentReport, TickAction};
pub use archive::{
    archive_name_for_zone, read_archive_asset, DirArchive, DirArchiveHandle, OpenArchive,
    ZoneArchive,
};
pub use client::{Actuator, ClientSource, CombatDriver, GameClient, Keycode, PositionSource};
pub use config::{AgentConfig, NavigatorConfig};
pub use navigator::{CycleOutcome, Navigator};
