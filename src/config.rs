/*!
 * Configuration
 * Monitor settings loaded from the environment
 *
 * Environment variables:
 * - DBGMON_SAMPLER_PATH: sampler executable (required)
 * - DBGMON_SAMPLER_ARGS: extra sampler arguments, whitespace separated
 * - DBGMON_MEMORY_SCALE: memory multiplier, a float or `mib` (overrides profiles)
 * - DBGMON_WORKDIR: sampler working directory (default: inherited)
 * - DBGMON_PTY_COLS / DBGMON_PTY_ROWS: nominal pty geometry
 */

use crate::core::errors::{ConfigError, ConfigResult};
use crate::core::limits::{
    BYTES_TO_MIB, ENV_MEMORY_SCALE, ENV_PTY_COLS, ENV_PTY_ROWS, ENV_SAMPLER_ARGS,
    ENV_SAMPLER_PATH, ENV_WORKDIR,
};
use crate::debug::{AdapterRegistry, RouterBuilder};
use crate::sampler::{SamplerConfig, TerminalSize};
use std::str::FromStr;

/// Everything needed to build the router
#[derive(Debug, Clone, PartialEq)]
pub struct MonitorConfig {
    pub sampler: SamplerConfig,
    /// Replaces every profile's memory scale when set
    pub memory_scale: Option<f64>,
    /// Replaces every profile's sampler args when set
    pub sampler_args: Option<Vec<String>>,
    pub profiles: AdapterRegistry,
}

impl MonitorConfig {
    pub fn new(sampler: SamplerConfig) -> Self {
        Self {
            sampler,
            memory_scale: None,
            sampler_args: None,
            profiles: AdapterRegistry::default(),
        }
    }

    /// Load from process environment variables
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using `lookup` to resolve variable names
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> ConfigResult<Self> {
        let executable = lookup(ENV_SAMPLER_PATH)
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::Missing(ENV_SAMPLER_PATH))?;

        let mut sampler = SamplerConfig::new(executable);
        if let Some(dir) = lookup(ENV_WORKDIR).filter(|v| !v.trim().is_empty()) {
            sampler = sampler.with_working_dir(dir);
        }

        let defaults = TerminalSize::default();
        sampler = sampler.with_terminal(TerminalSize {
            cols: parse_var(&lookup, ENV_PTY_COLS)?.unwrap_or(defaults.cols),
            rows: parse_var(&lookup, ENV_PTY_ROWS)?.unwrap_or(defaults.rows),
        });

        let memory_scale = lookup(ENV_MEMORY_SCALE)
            .map(|raw| parse_memory_scale(&raw))
            .transpose()?;

        let sampler_args = lookup(ENV_SAMPLER_ARGS)
            .map(|raw| raw.split_whitespace().map(str::to_string).collect());

        Ok(Self {
            sampler,
            memory_scale,
            sampler_args,
            profiles: AdapterRegistry::default(),
        })
    }

    #[must_use]
    pub fn with_memory_scale(mut self, scale: f64) -> Self {
        self.memory_scale = Some(scale);
        self
    }

    #[must_use]
    pub fn with_profiles(mut self, profiles: AdapterRegistry) -> Self {
        self.profiles = profiles;
        self
    }

    /// Profiles with the global overrides applied
    pub fn effective_profiles(&self) -> AdapterRegistry {
        let memory_scale = self.memory_scale;
        let sampler_args = self.sampler_args.clone();
        self.profiles.clone().map_profiles(|profile| {
            if let Some(scale) = memory_scale {
                profile.memory_scale = scale;
            }
            if let Some(args) = &sampler_args {
                profile.sampler_args = args.clone();
            }
        })
    }

    /// Router builder preloaded with this configuration
    pub fn router_builder(&self) -> RouterBuilder {
        RouterBuilder::new(self.sampler.clone()).with_profiles(self.effective_profiles())
    }
}

/// `mib` selects bytes-to-MiB; otherwise a positive finite float
pub fn parse_memory_scale(raw: &str) -> ConfigResult<f64> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("mib") {
        return Ok(BYTES_TO_MIB);
    }
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v > 0.0)
        .ok_or_else(|| ConfigError::InvalidValue {
            key: ENV_MEMORY_SCALE,
            value: raw.to_string(),
        })
}

fn parse_var<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
) -> ConfigResult<Option<T>> {
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidValue { key, value: raw }),
    }
}
