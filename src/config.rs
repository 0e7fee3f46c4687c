use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result, ensure};
use serde::Deserialize;

pub use config_model::{Presentation, RegionConfig, RegionKind};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case", default, deny_unknown_fields)]
pub struct Configuration {
    /// Interactive regions on the page, each driven by its own engine.
    pub regions: Vec<RegionConfig>,
    /// Pending user commands buffered per region.
    pub command_buffer: usize,
    /// Index-change events buffered between the regions and the view layer.
    pub event_buffer: usize,
}

impl Configuration {
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let s = std::fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&s)?)
    }

    /// Validate runtime invariants that cannot be expressed via serde defaults alone.
    pub fn validated(self) -> Result<Self> {
        ensure!(
            self.command_buffer > 0,
            "command-buffer must be greater than zero"
        );
        ensure!(
            self.event_buffer > 0,
            "event-buffer must be greater than zero"
        );
        let mut names = HashSet::new();
        for (idx, region) in self.regions.iter().enumerate() {
            let prefix = format!("regions[{idx}]");
            region
                .validate(&prefix)
                .with_context(|| format!("invalid region configuration '{}'", region.name))?;
            ensure!(
                names.insert(region.name.as_str()),
                "{}.name '{}' is used by more than one region",
                prefix,
                region.name
            );
        }
        Ok(self)
    }

    pub fn region(&self, name: &str) -> Option<&RegionConfig> {
        self.regions.iter().find(|region| region.name == name)
    }
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            regions: Vec::new(),
            command_buffer: 16,
            event_buffer: 64,
        }
    }
}
