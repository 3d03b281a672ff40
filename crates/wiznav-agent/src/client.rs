//! Interfaces to the running game client
//!
//! Memory reading, hooking and input simulation live outside this crate.
//! The agent only sees them through these traits, which every backend (and
//! the test doubles) implements.

use glam::Vec3;
use wiznav_common::Result;

/// Keys the agent presses on its own
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keycode {
    /// Interact with a nearby NPC
    X,
    /// Advance dialog
    Spacebar,
}

impl std::fmt::Display for Keycode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Keycode::X => write!(f, "X"),
            Keycode::Spacebar => write!(f, "Spacebar"),
        }
    }
}

/// Source of the position the agent steers toward
#[allow(async_fn_in_trait)]
pub trait PositionSource {
    /// Current quest target; `(0, 0, 0)` means no target is known yet
    async fn current_target_position(&mut self) -> Result<Vec3>;
}

/// Commands sent to the game client
#[allow(async_fn_in_trait)]
pub trait Actuator {
    async fn teleport(&mut self, position: Vec3) -> Result<()>;

    async fn send_key(&mut self, key: Keycode) -> Result<()>;
}

/// A hooked game client
#[allow(async_fn_in_trait)]
pub trait GameClient: PositionSource + Actuator {
    /// Name of the zone the player is in, e.g. `WizardCity/WC_Ravenwood`
    async fn zone_name(&mut self) -> Result<String>;

    async fn in_battle(&mut self) -> Result<bool>;

    async fn is_in_dialog(&mut self) -> Result<bool>;

    async fn is_in_npc_range(&mut self) -> Result<bool>;

    /// Installs the memory hooks the other queries depend on
    async fn activate_hooks(&mut self) -> Result<()>;

    /// Removes hooks and releases the client
    async fn close(&mut self) -> Result<()>;
}

/// Discovers running game clients
#[allow(async_fn_in_trait)]
pub trait ClientSource {
    type Client: GameClient;

    /// Returns a newly started client, if any appeared since the last call
    async fn poll_new_client(&mut self) -> Option<Self::Client>;
}

/// Plays one combat turn; card selection is up to the implementation
#[allow(async_fn_in_trait)]
pub trait CombatDriver<C: GameClient> {
    async fn run_turn(&mut self, client: &mut C) -> Result<()>;
}
