//! Agent control loop
//!
//! Waits for a game client, hooks it, then on every tick picks one action
//! from the client's battle/dialog state: explore (navigation cycle plus NPC
//! interaction), advance dialog, or play a combat turn. Runs until the
//! shutdown signal flips to `true` and always releases the client.
//!
//! The hooked client is owned by the [`Agent`], not by the `run` future. If
//! `run` is dropped mid-tick the client stays attached; [`Agent::release_client`]
//! (or the next `run`) closes it.

use tokio::sync::watch;
use wiznav_common::Result;

use crate::archive::ZoneArchive;
use crate::client::{Actuator, ClientSource, CombatDriver, GameClient, Keycode};
use crate::config::AgentConfig;
use crate::navigator::{CycleOutcome, Navigator};

/// Action chosen for one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickAction {
    Explore,
    AdvanceDialog,
    Combat,
    Idle,
}

impl TickAction {
    pub fn select(in_battle: bool, in_dialog: bool) -> Self {
        match (in_battle, in_dialog) {
            (false, false) => TickAction::Explore,
            (false, true) => TickAction::AdvanceDialog,
            (true, false) => TickAction::Combat,
            (true, true) => TickAction::Idle,
        }
    }
}

/// Counters collected over one agent run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AgentReport {
    pub ticks: usize,
    pub navigation_cycles: usize,
    pub teleports: usize,
    pub skipped_cycles: usize,
    pub npc_interactions: usize,
    pub dialog_advances: usize,
    pub combat_turns: usize,
    pub failed_ticks: usize,
}

pub struct Agent<S, A, D>
where
    S: ClientSource,
    A: ZoneArchive,
    D: CombatDriver<S::Client>,
{
    source: S,
    navigator: Navigator<A>,
    combat: D,
    config: AgentConfig,
    client: Option<S::Client>,
}

/// True once shutdown was requested or the sender is gone
fn shutdown_requested(shutdown: &watch::Receiver<bool>) -> bool {
    *shutdown.borrow() || shutdown.has_changed().is_err()
}

/// Sleeps for `duration` unless shutdown is signalled first
async fn pause(duration: std::time::Duration, shutdown: &mut watch::Receiver<bool>) {
    tokio::select! {
        _ = tokio::time::sleep(duration) => {}
        _ = shutdown.changed() => {}
    }
}

impl<S, A, D> Agent<S, A, D>
where
    S: ClientSource,
    A: ZoneArchive,
    D: CombatDriver<S::Client>,
{
    pub fn new(source: S, archive: A, combat: D, config: AgentConfig) -> Self {
        let navigator = Navigator::new(archive, config.navigator.clone());
        Self {
            source,
            navigator,
            combat,
            config,
            client: None,
        }
    }

    pub fn navigator(&self) -> &Navigator<A> {
        &self.navigator
    }

    pub fn combat(&self) -> &D {
        &self.combat
    }

    /// Polls the client source until a client shows up or shutdown is requested
    pub async fn wait_for_client(
        &mut self,
        shutdown: &mut watch::Receiver<bool>,
    ) -> Option<S::Client> {
        loop {
            if shutdown_requested(shutdown) {
                return None;
            }
            if let Some(client) = self.source.poll_new_client().await {
                log::info!("Found game client");
                return Some(client);
            }
            log::info!("Waiting for game client...");
            pause(self.config.client_poll_interval, shutdown).await;
        }
    }

    /// True while a hooked client is attached
    pub fn has_client(&self) -> bool {
        self.client.is_some()
    }

    /// Closes the attached client, if any. Returns whether one was closed.
    pub async fn release_client(&mut self) -> bool {
        let Some(mut client) = self.client.take() else {
            return false;
        };

        log::info!("Deactivating hooks...");
        if let Err(e) = client.close().await {
            log::warn!("Failed to close game client: {}", e);
        }
        true
    }

    /// Runs the agent until shutdown
    pub async fn run(&mut self, mut shutdown: watch::Receiver<bool>) -> Result<AgentReport> {
        if self.release_client().await {
            log::warn!("Released client left over from a cancelled run");
        }

        let Some(client) = self.wait_for_client(&mut shutdown).await else {
            return Ok(AgentReport::default());
        };
        self.client = Some(client);

        let result = self.drive(&mut shutdown).await;
        self.release_client().await;
        result
    }

    async fn drive(&mut self, shutdown: &mut watch::Receiver<bool>) -> Result<AgentReport> {
        let Self {
            navigator,
            combat,
            config,
            client,
            ..
        } = self;
        let Some(client) = client.as_mut() else {
            return Ok(AgentReport::default());
        };

        if let Err(e) = client.activate_hooks().await {
            log::error!("Failed to activate hooks: {}", e);
            return Err(e);
        }
        log::info!("Successfully activated hooks");

        let mut report = AgentReport::default();
        while !shutdown_requested(shutdown) {
            report.ticks += 1;
            if let Err(e) = Self::tick(navigator, combat, client, &mut report).await {
                log::warn!("Tick failed: {}", e);
                report.failed_ticks += 1;
            }
            pause(config.tick_interval, shutdown).await;
        }

        log::info!("Shutdown signal received");
        Ok(report)
    }

    async fn tick(
        navigator: &mut Navigator<A>,
        combat: &mut D,
        client: &mut S::Client,
        report: &mut AgentReport,
    ) -> Result<()> {
        let in_battle = client.in_battle().await?;
        let in_dialog = client.is_in_dialog().await?;

        match TickAction::select(in_battle, in_dialog) {
            TickAction::Explore => {
                report.navigation_cycles += 1;
                match navigator.run_cycle(client).await {
                    CycleOutcome::Teleported(_) => report.teleports += 1,
                    CycleOutcome::Skipped(_) => report.skipped_cycles += 1,
                    CycleOutcome::TargetUnavailable | CycleOutcome::NoResult => {}
                }

                if client.is_in_npc_range().await? {
                    client.send_key(Keycode::X).await?;
                    report.npc_interactions += 1;
                }
            }
            TickAction::AdvanceDialog => {
                client.send_key(Keycode::Spacebar).await?;
                report.dialog_advances += 1;
            }
            TickAction::Combat => {
                report.combat_turns += 1;
                combat.run_turn(client).await?;
            }
            TickAction::Idle => {}
        }

        Ok(())
    }
}
