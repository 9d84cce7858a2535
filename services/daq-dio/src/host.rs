//! Host framework interface
//!
//! The device publishes its attributes and its operational state through a
//! [`DeviceHost`]. [`AttributeRegistry`] is the in-process host used by the
//! Alpaca switch device.

use std::collections::HashSet;
use std::fmt;

use tracing::{debug, warn};

use crate::attribute::Attr;

/// Operational state reported to operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DevState {
    On,
    Off,
    Init,
    Running,
    Alarm,
    Fault,
    #[default]
    Unknown,
}

impl DevState {
    pub fn as_str(&self) -> &'static str {
        match self {
            DevState::On => "ON",
            DevState::Off => "OFF",
            DevState::Init => "INIT",
            DevState::Running => "RUNNING",
            DevState::Alarm => "ALARM",
            DevState::Fault => "FAULT",
            DevState::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for DevState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Services the host framework provides to a device
#[cfg_attr(test, mockall::automock)]
pub trait DeviceHost: Send {
    /// Set the operational state
    fn set_state(&mut self, state: DevState);

    /// Set the free-text status
    fn set_status(&mut self, status: &str);

    fn state(&self) -> DevState;

    fn status(&self) -> String;

    /// Replace every registered attribute with the given set
    ///
    /// All attributes share the device's single read entry point.
    fn install_attributes(&mut self, attributes: Vec<Attr>);

    /// Names of the registered attributes, in registration order
    fn attribute_names(&self) -> Vec<String>;
}

/// In-process attribute registry and state/status holder
#[derive(Debug, Clone, Default)]
pub struct AttributeRegistry {
    state: DevState,
    status: String,
    attributes: Vec<Attr>,
}

impl AttributeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attributes(&self) -> &[Attr] {
        &self.attributes
    }

    pub fn attribute(&self, name: &str) -> Option<&Attr> {
        self.attributes.iter().find(|a| a.name == name)
    }

    /// Attribute at a registration position
    pub fn get(&self, index: usize) -> Option<&Attr> {
        self.attributes.get(index)
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

impl DeviceHost for AttributeRegistry {
    fn set_state(&mut self, state: DevState) {
        if self.state != state {
            debug!("State {} -> {}", self.state, state);
        }
        self.state = state;
    }

    fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }

    fn state(&self) -> DevState {
        self.state
    }

    fn status(&self) -> String {
        self.status.clone()
    }

    fn install_attributes(&mut self, attributes: Vec<Attr>) {
        let mut seen = HashSet::new();
        let mut installed = Vec::with_capacity(attributes.len());
        for attr in attributes {
            if seen.insert(attr.name.clone()) {
                installed.push(attr);
            } else {
                warn!("Attribute {} registered twice, keeping the first", attr.name);
            }
        }
        debug!("Installed {} attributes", installed.len());
        self.attributes = installed;
    }

    fn attribute_names(&self) -> Vec<String> {
        self.attributes.iter().map(|a| a.name.clone()).collect()
    }
}
