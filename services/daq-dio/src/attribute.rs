//! Attribute descriptors and channel identities
//!
//! A channel is one readable value exposed to the host: a single bit of a
//! digital port (`A0`..`C7`) or the counter (`CTR`). Each channel is
//! published through an [`AttributeDescriptor`] which carries the three
//! required properties (name, value type, access mode) and any number of
//! optional default properties.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::catalog::{PortGroup, BITS_PER_PORT, COUNTER_CHANNEL};
use crate::error::{DaqDioError, Result};

/// Identity of one exposed channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChannelId {
    group: PortGroup,
    bit: Option<u8>,
}

impl ChannelId {
    /// A bit channel of a digital port group
    pub fn bit(group: PortGroup, bit: u8) -> Result<Self> {
        if group == PortGroup::Counter {
            return Err(DaqDioError::InvalidChannel(format!(
                "counter has no bit channels (bit {})",
                bit
            )));
        }
        if bit >= BITS_PER_PORT {
            return Err(DaqDioError::InvalidChannel(format!(
                "bit index {} out of range for {}",
                bit,
                group.label()
            )));
        }
        Ok(Self {
            group,
            bit: Some(bit),
        })
    }

    /// The counter channel
    pub fn counter() -> Self {
        Self {
            group: PortGroup::Counter,
            bit: None,
        }
    }

    pub fn group(&self) -> PortGroup {
        self.group
    }

    pub fn bit_index(&self) -> Option<u8> {
        self.bit
    }

    /// Channel name as published to the host
    pub fn name(&self) -> String {
        match (self.group.letter(), self.bit) {
            (Some(letter), Some(bit)) => format!("{}{}", letter, bit),
            _ => COUNTER_CHANNEL.to_string(),
        }
    }

    pub fn value_type(&self) -> ValueType {
        self.group.value_type()
    }
}

impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

/// Data type of an attribute value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValueType {
    Boolean,
    Integer,
}

/// Access mode of an attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccessMode {
    Read,
    Write,
    ReadWrite,
}

impl AccessMode {
    pub fn is_writable(&self) -> bool {
        matches!(self, AccessMode::Write | AccessMode::ReadWrite)
    }
}

/// A decoded channel value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttrValue {
    Boolean(bool),
    Integer(u64),
}

impl AttrValue {
    pub fn value_type(&self) -> ValueType {
        match self {
            AttrValue::Boolean(_) => ValueType::Boolean,
            AttrValue::Integer(_) => ValueType::Integer,
        }
    }

    /// Numeric view of the value (booleans map to 0.0 / 1.0)
    pub fn as_f64(&self) -> f64 {
        match self {
            AttrValue::Boolean(true) => 1.0,
            AttrValue::Boolean(false) => 0.0,
            AttrValue::Integer(raw) => *raw as f64,
        }
    }

    /// Truth view of the value (integers are true when non-zero)
    pub fn as_bool(&self) -> bool {
        match self {
            AttrValue::Boolean(state) => *state,
            AttrValue::Integer(raw) => *raw > 0,
        }
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Boolean(state) => write!(f, "{}", state),
            AttrValue::Integer(raw) => write!(f, "{}", raw),
        }
    }
}

/// Optional default properties of an attribute
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttrProperties {
    pub label: Option<String>,
    pub description: Option<String>,
    pub unit: Option<String>,
    pub format: Option<String>,
}

impl AttrProperties {
    /// Apply a single optional property by key
    pub fn apply(&mut self, attribute: &str, key: &str, value: &str) -> Result<()> {
        let slot = match key {
            "label" => &mut self.label,
            "description" => &mut self.description,
            "unit" => &mut self.unit,
            "format" => &mut self.format,
            _ => {
                return Err(DaqDioError::UnknownProperty {
                    attribute: attribute.to_string(),
                    property: key.to_string(),
                })
            }
        };
        *slot = Some(value.to_string());
        Ok(())
    }
}

/// Description of an attribute to register with the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeDescriptor {
    name: String,
    value_type: ValueType,
    access: AccessMode,
    properties: Vec<(String, String)>,
}

impl AttributeDescriptor {
    /// Create a descriptor from its required properties
    pub fn new(name: impl Into<String>, value_type: ValueType, access: AccessMode) -> Result<Self> {
        let name = name.into();
        if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(DaqDioError::InvalidChannel(name));
        }
        Ok(Self {
            name,
            value_type,
            access,
            properties: Vec::new(),
        })
    }

    /// Read-only descriptor for a channel
    pub fn for_channel(channel: ChannelId) -> Self {
        let (label, description) = match channel.bit_index() {
            Some(bit) => (
                format!("{} bit {}", channel.group().label(), bit),
                format!("Digital input {} of {}", bit, channel.group().label()),
            ),
            None => (
                "Counter".to_string(),
                "Raw value of the counter port".to_string(),
            ),
        };
        Self {
            name: channel.name(),
            value_type: channel.value_type(),
            access: AccessMode::Read,
            properties: Vec::new(),
        }
        .with_property("label", label)
        .with_property("description", description)
    }

    /// Attach an optional default property
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.push((key.into(), value.into()));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value_type(&self) -> ValueType {
        self.value_type
    }

    pub fn access(&self) -> AccessMode {
        self.access
    }

    pub fn properties(&self) -> &[(String, String)] {
        &self.properties
    }
}

/// An attribute as held by the host's registry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attr {
    pub name: String,
    pub value_type: ValueType,
    pub access: AccessMode,
    pub properties: AttrProperties,
}

impl Attr {
    pub fn new(name: impl Into<String>, value_type: ValueType, access: AccessMode) -> Self {
        Self {
            name: name.into(),
            value_type,
            access,
            properties: AttrProperties::default(),
        }
    }
}
