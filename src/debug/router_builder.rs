/*!
 * Router Builder
 * Builder pattern for DebugEventRouter construction
 */

use super::adapter::AdapterRegistry;
use super::router::DebugEventRouter;
use crate::presentation::{PresentationBridge, SnapshotBridge};
use crate::sampler::{PtyLauncher, SamplerConfig, SamplerEventSender, SamplerLauncher};
use std::sync::Arc;
use tracing::info;

/// Builder for DebugEventRouter
pub struct RouterBuilder {
    sampler_config: SamplerConfig,
    profiles: AdapterRegistry,
    launcher: Option<Box<dyn SamplerLauncher>>,
    bridge: Option<Arc<dyn PresentationBridge>>,
}

impl RouterBuilder {
    pub fn new(sampler_config: SamplerConfig) -> Self {
        Self {
            sampler_config,
            profiles: AdapterRegistry::default(),
            launcher: None,
            bridge: None,
        }
    }

    /// Replace the adapter profiles
    pub fn with_profiles(mut self, profiles: AdapterRegistry) -> Self {
        self.profiles = profiles;
        self
    }

    /// Use a custom launcher instead of the native pty launcher
    pub fn with_launcher(mut self, launcher: Box<dyn SamplerLauncher>) -> Self {
        self.launcher = Some(launcher);
        self
    }

    /// Where update snapshots go
    pub fn with_bridge(mut self, bridge: Arc<dyn PresentationBridge>) -> Self {
        self.bridge = Some(bridge);
        self
    }

    /// Build the router; sampler output will be sent on `sampler_events`
    pub fn build(self, sampler_events: SamplerEventSender) -> DebugEventRouter {
        let launcher = self.launcher.unwrap_or_else(|| Box::new(PtyLauncher));
        let bridge = self
            .bridge
            .unwrap_or_else(|| Arc::new(SnapshotBridge::new()));

        let debug_types: Vec<&str> = self.profiles.debug_types().collect();
        info!(
            sampler = %self.sampler_config.executable.display(),
            debug_types = ?debug_types,
            "Debug event router initialized"
        );

        DebugEventRouter::from_parts(
            self.profiles,
            self.sampler_config,
            launcher,
            bridge,
            sampler_events,
        )
    }
}
