//! Test doubles for archives, game clients and combat

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use glam::Vec3;
use tokio::sync::watch;
use wiznav_common::{Error, Result};
use wiznav_mesh::NavDataWriter;

use crate::archive::ZoneArchive;
use crate::client::{Actuator, ClientSource, CombatDriver, GameClient, Keycode, PositionSource};

/// Encoded mesh with a single segment from (0,0,0) to (10,0,0)
pub fn line_mesh() -> Vec<u8> {
    let mut writer = NavDataWriter::new();
    writer
        .push_vertex(Vec3::new(0.0, 0.0, 0.0))
        .push_vertex(Vec3::new(10.0, 0.0, 0.0))
        .push_edge(0, 1);
    writer.to_bytes().unwrap()
}

/// In-memory archives that count open and close calls
#[derive(Debug, Default)]
pub struct MemoryArchive {
    archives: HashMap<String, HashMap<String, Vec<u8>>>,
    pub opened: usize,
    pub closed: usize,
    /// Reads never complete
    pub stall_reads: bool,
}

impl MemoryArchive {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, archive: &str, asset: &str, bytes: Vec<u8>) {
        self.archives
            .entry(archive.to_string())
            .or_default()
            .insert(asset.to_string(), bytes);
    }
}

impl ZoneArchive for MemoryArchive {
    type Handle = String;

    async fn open(&mut self, archive_name: &str) -> Result<Self::Handle> {
        if !self.archives.contains_key(archive_name) {
            return Err(Error::Archive(format!("no archive named {}", archive_name)));
        }
        self.opened += 1;
        Ok(archive_name.to_string())
    }

    async fn read_asset(&mut self, handle: &Self::Handle, asset_name: &str) -> Result<Vec<u8>> {
        if self.stall_reads {
            std::future::pending::<()>().await;
        }
        self.archives
            .get(handle)
            .and_then(|assets| assets.get(asset_name))
            .cloned()
            .ok_or_else(|| Error::Archive(format!("{} has no asset {}", handle, asset_name)))
    }

    fn close(&mut self, _handle: Self::Handle) {
        self.closed += 1;
    }
}

/// Everything a [`MockClient`] was asked to do
#[derive(Debug, Default)]
pub struct ClientLog {
    pub teleports: Vec<Vec3>,
    pub keys: Vec<Keycode>,
    pub hooks_activated: bool,
    pub closed: bool,
}

/// Scripted game client.
///
/// Each `in_battle` call advances to the next `(in_battle, in_dialog)` state.
/// Once the script runs out the client reports battle + dialog (an idle
/// tick) and, if a shutdown sender was attached, requests shutdown.
#[derive(Debug)]
pub struct MockClient {
    pub zone: String,
    pub target: Vec3,
    pub in_npc_range: bool,
    pub fail_teleport: bool,
    pub fail_hooks: bool,
    /// State queries never complete
    pub stall: bool,
    pub script: VecDeque<(bool, bool)>,
    pub shutdown: Option<watch::Sender<bool>>,
    current: (bool, bool),
    pub log: Arc<Mutex<ClientLog>>,
}

impl MockClient {
    pub fn new(zone: &str, target: Vec3) -> Self {
        Self {
            zone: zone.to_string(),
            target,
            in_npc_range: false,
            fail_teleport: false,
            fail_hooks: false,
            stall: false,
            script: VecDeque::new(),
            shutdown: None,
            current: (false, false),
            log: Arc::new(Mutex::new(ClientLog::default())),
        }
    }

    pub fn with_script(mut self, script: &[(bool, bool)], shutdown: watch::Sender<bool>) -> Self {
        self.script = script.iter().copied().collect();
        self.shutdown = Some(shutdown);
        self
    }

    pub fn teleports(&self) -> Vec<Vec3> {
        self.log.lock().unwrap().teleports.clone()
    }
}

impl PositionSource for MockClient {
    async fn current_target_position(&mut self) -> Result<Vec3> {
        Ok(self.target)
    }
}

impl Actuator for MockClient {
    async fn teleport(&mut self, position: Vec3) -> Result<()> {
        if self.fail_teleport {
            return Err(Error::Client("teleport rejected".to_string()));
        }
        self.log.lock().unwrap().teleports.push(position);
        Ok(())
    }

    async fn send_key(&mut self, key: Keycode) -> Result<()> {
        self.log.lock().unwrap().keys.push(key);
        Ok(())
    }
}

impl GameClient for MockClient {
    async fn zone_name(&mut self) -> Result<String> {
        Ok(self.zone.clone())
    }

    async fn in_battle(&mut self) -> Result<bool> {
        if self.stall {
            std::future::pending::<()>().await;
        }
        self.current = match self.script.pop_front() {
            Some(state) => state,
            None => {
                if let Some(shutdown) = &self.shutdown {
                    let _ = shutdown.send(true);
                }
                (true, true)
            }
        };
        Ok(self.current.0)
    }

    async fn is_in_dialog(&mut self) -> Result<bool> {
        Ok(self.current.1)
    }

    async fn is_in_npc_range(&mut self) -> Result<bool> {
        Ok(self.in_npc_range)
    }

    async fn activate_hooks(&mut self) -> Result<()> {
        if self.fail_hooks {
            return Err(Error::Client("hook injection failed".to_string()));
        }
        self.log.lock().unwrap().hooks_activated = true;
        Ok(())
    }

    async fn close(&mut self) -> Result<()> {
        self.log.lock().unwrap().closed = true;
        Ok(())
    }
}

/// Hands out queued clients, one per poll
#[derive(Debug, Default)]
pub struct QueuedClients {
    pub polls: VecDeque<Option<MockClient>>,
}

impl ClientSource for QueuedClients {
    type Client = MockClient;

    async fn poll_new_client(&mut self) -> Option<Self::Client> {
        self.polls.pop_front().flatten()
    }
}

/// Counts combat turns, optionally failing each one
#[derive(Debug, Default)]
pub struct CountingCombat {
    pub turns: usize,
    pub fail: bool,
}

impl CombatDriver<MockClient> for CountingCombat {
    async fn run_turn(&mut self, _client: &mut MockClient) -> Result<()> {
        self.turns += 1;
        if self.fail {
            return Err(Error::Client("no castable cards".to_string()));
        }
        Ok(())
    }
}
