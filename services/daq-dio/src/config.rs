//! Configuration types for the DAQ digital-I/O driver

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::catalog::PortGroup;
use crate::io::InterfaceType;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub device: DeviceConfig,
    #[serde(default)]
    pub ports: PortSelection,
    #[serde(default)]
    pub hardware: HardwareConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

/// Device identification configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceConfig {
    pub name: String,
    pub unique_id: String,
    pub description: String,
    #[serde(default)]
    pub device_number: u32,
}

/// Which port groups are exposed as attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortSelection {
    #[serde(default = "default_true")]
    pub port_types_a: bool,
    #[serde(default = "default_true")]
    pub port_types_b: bool,
    #[serde(default = "default_true")]
    pub port_types_c: bool,
    #[serde(default = "default_true")]
    pub port_types_counter: bool,
}

/// Hardware binding configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HardwareConfig {
    /// Index into the discovered device inventory
    #[serde(default)]
    pub descriptor_index: usize,
    #[serde(default)]
    pub interface_type: InterfaceType,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
}

fn default_true() -> bool {
    true
}

impl PortSelection {
    /// Selection with every group disabled
    pub fn none() -> Self {
        Self {
            port_types_a: false,
            port_types_b: false,
            port_types_c: false,
            port_types_counter: false,
        }
    }

    /// Whether a group's own flag is set
    pub fn is_enabled(&self, group: PortGroup) -> bool {
        match group {
            PortGroup::A => self.port_types_a,
            PortGroup::B => self.port_types_b,
            PortGroup::C => self.port_types_c,
            PortGroup::Counter => self.port_types_counter,
        }
    }

    /// Builder-style toggle of a single group
    pub fn with(mut self, group: PortGroup, enabled: bool) -> Self {
        match group {
            PortGroup::A => self.port_types_a = enabled,
            PortGroup::B => self.port_types_b = enabled,
            PortGroup::C => self.port_types_c = enabled,
            PortGroup::Counter => self.port_types_counter = enabled,
        }
        self
    }
}

impl Default for PortSelection {
    fn default() -> Self {
        Self {
            port_types_a: true,
            port_types_b: true,
            port_types_c: true,
            port_types_counter: true,
        }
    }
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            name: "MCC DAQ Digital I/O".to_string(),
            unique_id: "daq-dio-001".to_string(),
            description: "Digital input ports of a Measurement Computing DAQ device".to_string(),
            device_number: 0,
        }
    }
}

impl Default for HardwareConfig {
    fn default() -> Self {
        Self {
            descriptor_index: 0,
            interface_type: InterfaceType::Any,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: 11116 }
    }
}

/// Load configuration from a JSON file
pub fn load_config(path: &PathBuf) -> std::result::Result<Config, Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(path)?;
    let config: Config = serde_json::from_str(&content)?;
    Ok(config)
}
