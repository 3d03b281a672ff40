use std::time::Duration;

use wiznav_mesh::NAV_ASSET_NAME;

/// Settings for one navigation cycle
#[derive(Debug, Clone)]
pub struct NavigatorConfig {
    /// Asset holding the navigation mesh inside a zone archive
    pub asset_name: String,
    /// Pause before giving up on a cycle whose target sits at the origin
    pub origin_retry_delay: Duration,
    /// Keep built segment sets per zone instead of reloading every cycle
    pub cache_meshes: bool,
}

impl NavigatorConfig {
    pub fn new() -> Self {
        NavigatorConfig {
            asset_name: NAV_ASSET_NAME.to_string(),
            origin_retry_delay: Duration::from_millis(500),
            cache_meshes: false,
        }
    }

    pub fn with_asset_name(mut self, asset_name: impl Into<String>) -> Self {
        self.asset_name = asset_name.into();
        self
    }

    pub fn with_origin_retry_delay(mut self, origin_retry_delay: Duration) -> Self {
        self.origin_retry_delay = origin_retry_delay;
        self
    }

    pub fn with_cache_meshes(mut self, cache_meshes: bool) -> Self {
        self.cache_meshes = cache_meshes;
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.asset_name.is_empty() {
            return Err("Asset name cannot be empty".to_string());
        }
        Ok(())
    }
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Settings for the agent control loop
#[derive(Debug, Clone)]
pub struct AgentConfig {
    /// Delay between checks for a new game client
    pub client_poll_interval: Duration,
    /// Delay between control loop iterations
    pub tick_interval: Duration,
    pub navigator: NavigatorConfig,
}

impl AgentConfig {
    pub fn new() -> Self {
        AgentConfig {
            client_poll_interval: Duration::from_secs(2),
            tick_interval: Duration::from_millis(100),
            navigator: NavigatorConfig::default(),
        }
    }

    pub fn with_client_poll_interval(mut self, client_poll_interval: Duration) -> Self {
        self.client_poll_interval = client_poll_interval;
        self
    }

    pub fn with_tick_interval(mut self, tick_interval: Duration) -> Self {
        self.tick_interval = tick_interval;
        self
    }

    pub fn with_navigator(mut self, navigator: NavigatorConfig) -> Self {
        self.navigator = navigator;
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        self.navigator.validate()
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AgentConfig::default();
        assert_eq!(config.client_poll_interval, Duration::from_secs(2));
        assert_eq!(config.tick_interval, Duration::from_millis(100));
        assert_eq!(config.navigator.asset_name, "zone.nav");
        assert_eq!(config.navigator.origin_retry_delay, Duration::from_millis(500));
        assert!(!config.navigator.cache_meshes);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder_and_validation() {
        let config = NavigatorConfig::default()
            .with_asset_name("")
            .with_cache_meshes(true);
        assert!(config.cache_meshes);
        assert!(config.validate().is_err());
    }
}
