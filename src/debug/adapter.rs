/*!
 * Adapter Profiles
 * Per-backend capability records for the router
 *
 * Debug adapters speak structurally identical protocol messages; what varies
 * is how the sampler is driven for their targets. One profile per backend
 * instead of one router per backend.
 */

use crate::core::limits::BYTES_TO_MIB;
use crate::sampler::ControlBytes;
use crate::telemetry::SampleLineParser;
use serde::{Deserialize, Serialize};

/// How to drive the sampler for one debugger backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct AdapterProfile {
    pub debug_type: String,
    pub controls: ControlBytes,
    /// Multiplier applied to the raw memory reading
    pub memory_scale: f64,
    /// Extra sampler arguments after `-p <pid>`
    pub sampler_args: Vec<String>,
}

impl AdapterProfile {
    #[must_use]
    pub fn new(debug_type: impl Into<String>) -> Self {
        Self {
            debug_type: debug_type.into(),
            controls: ControlBytes::default(),
            memory_scale: 1.0,
            sampler_args: vec![],
        }
    }

    /// Delve: sampler reports bytes, shown as MiB
    pub fn go() -> Self {
        Self::new("go").with_memory_scale(BYTES_TO_MIB)
    }

    /// cpptools: memory passed through unscaled
    pub fn cppdbg() -> Self {
        Self::new("cppdbg")
    }

    #[must_use]
    pub fn with_memory_scale(mut self, memory_scale: f64) -> Self {
        self.memory_scale = memory_scale;
        self
    }

    #[must_use]
    pub fn with_controls(mut self, controls: ControlBytes) -> Self {
        self.controls = controls;
        self
    }

    #[must_use]
    pub fn with_sampler_args(mut self, args: Vec<String>) -> Self {
        self.sampler_args = args;
        self
    }

    /// Line parser using this profile's scale
    pub fn parser(&self) -> SampleLineParser {
        SampleLineParser::with_memory_scale(self.memory_scale)
    }
}

/// Known backends plus the profile for sessions that do not name one
#[derive(Debug, Clone, PartialEq)]
pub struct AdapterRegistry {
    profiles: Vec<AdapterProfile>,
    fallback: AdapterProfile,
}

impl AdapterRegistry {
    pub fn new(fallback: AdapterProfile) -> Self {
        Self {
            profiles: vec![],
            fallback,
        }
    }

    /// Add or replace the profile for its debug type
    #[must_use]
    pub fn with_profile(mut self, profile: AdapterProfile) -> Self {
        self.profiles.retain(|p| p.debug_type != profile.debug_type);
        self.profiles.push(profile);
        self
    }

    /// Profile for `debug_type`
    ///
    /// `None` selects the fallback; an unknown type is unsupported.
    pub fn resolve(&self, debug_type: Option<&str>) -> Option<&AdapterProfile> {
        match debug_type {
            None => Some(&self.fallback),
            Some(kind) => self.profiles.iter().find(|p| p.debug_type == kind),
        }
    }

    /// Apply `f` to every profile, fallback included
    pub fn map_profiles(mut self, f: impl Fn(&mut AdapterProfile)) -> Self {
        self.profiles.iter_mut().for_each(&f);
        f(&mut self.fallback);
        self
    }

    pub fn debug_types(&self) -> impl Iterator<Item = &str> + '_ {
        self.profiles.iter().map(|p| p.debug_type.as_str())
    }
}

impl Default for AdapterRegistry {
    fn default() -> Self {
        Self::new(AdapterProfile::new("default"))
            .with_profile(AdapterProfile::go())
            .with_profile(AdapterProfile::cppdbg())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_known_and_unknown() {
        let registry = AdapterRegistry::default();

        assert_eq!(
            registry.resolve(Some("go")).map(|p| p.memory_scale),
            Some(BYTES_TO_MIB)
        );
        assert_eq!(
            registry.resolve(Some("cppdbg")).map(|p| p.memory_scale),
            Some(1.0)
        );
        assert!(registry.resolve(Some("python")).is_none());
        assert_eq!(
            registry.resolve(None).map(|p| p.debug_type.as_str()),
            Some("default")
        );
    }

    #[test]
    fn test_with_profile_replaces_same_type() {
        let registry = AdapterRegistry::default()
            .with_profile(AdapterProfile::new("go").with_memory_scale(2.0));

        assert_eq!(registry.debug_types().filter(|t| *t == "go").count(), 1);
        assert_eq!(registry.resolve(Some("go")).map(|p| p.memory_scale), Some(2.0));
    }

    #[test]
    fn test_map_profiles_reaches_fallback() {
        let registry = AdapterRegistry::default().map_profiles(|p| p.memory_scale = 0.5);
        assert_eq!(registry.resolve(None).map(|p| p.memory_scale), Some(0.5));
        assert_eq!(registry.resolve(Some("go")).map(|p| p.memory_scale), Some(0.5));
    }
}
