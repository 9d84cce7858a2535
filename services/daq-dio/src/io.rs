//! Hardware access traits
//!
//! This module provides trait abstractions over the vendor DAQ library:
//! device discovery, device handles and their digital-I/O sub-device.
//! These traits enable mockall-based testing without requiring actual
//! hardware. All calls are blocking.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Interface filter used for device discovery
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InterfaceType {
    Usb,
    Bluetooth,
    Ethernet,
    #[default]
    Any,
}

impl InterfaceType {
    /// Whether a device on `interface` passes this filter
    pub fn matches(&self, interface: InterfaceType) -> bool {
        *self == InterfaceType::Any || *self == interface
    }
}

/// Identifies one physically discovered DAQ device
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DaqDeviceDescriptor {
    pub product_name: String,
    pub product_id: u32,
    pub dev_interface: InterfaceType,
    pub dev_string: String,
    pub unique_id: String,
}

/// Digital port types, in the order the vendor library reports them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DigitalPortType {
    AuxPort,
    FirstPortA,
    FirstPortB,
    FirstPortCL,
    FirstPortCH,
    SecondPortA,
    SecondPortB,
}

/// I/O capability of a digital port
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DigitalPortIoType {
    /// Fixed input
    In,
    /// Fixed output
    Out,
    /// Port-wide configurable direction
    Io,
    /// Per-bit configurable direction
    BitIo,
    /// Not configurable
    NonConfig,
}

impl DigitalPortIoType {
    /// Whether the port's direction can be configured
    pub fn is_configurable(&self) -> bool {
        matches!(self, DigitalPortIoType::Io | DigitalPortIoType::BitIo)
    }
}

/// Direction of a configurable digital port
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DigitalDirection {
    Input,
    Output,
}

/// Metadata of one digital port
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DioPortInfo {
    pub port_type: DigitalPortType,
    pub port_io_type: DigitalPortIoType,
    pub number_of_bits: u32,
}

/// Entry point of the vendor DAQ library
#[cfg_attr(test, mockall::automock)]
pub trait DaqLibrary: Send + Sync {
    /// Descriptors of every device reachable through `interface_type`
    fn device_inventory(&self, interface_type: InterfaceType) -> Result<Vec<DaqDeviceDescriptor>>;

    /// Create a handle for a discovered device
    fn create_device(&self, descriptor: &DaqDeviceDescriptor) -> Result<Box<dyn DaqDevice>>;
}

/// Handle to one DAQ device
#[cfg_attr(test, mockall::automock)]
pub trait DaqDevice: Send {
    fn descriptor(&self) -> DaqDeviceDescriptor;

    /// Establish the physical connection
    fn connect(&mut self, connection_code: u32) -> Result<()>;

    fn disconnect(&mut self) -> Result<()>;

    fn is_connected(&self) -> bool;

    /// Release the handle's resources
    fn release(&mut self);

    /// Digital-I/O sub-device, or `None` if the device has no digital ports
    fn dio_device(&self) -> Option<Box<dyn DioDevice>>;
}

/// Digital-I/O sub-device of a DAQ device
#[cfg_attr(test, mockall::automock)]
pub trait DioDevice: Send {
    /// Supported port types in hardware order
    fn port_types(&self) -> Result<Vec<DigitalPortType>>;

    fn port_info(&self, port_type: DigitalPortType) -> Result<DioPortInfo>;

    /// Configure a port's direction
    fn config_port(&mut self, port_type: DigitalPortType, direction: DigitalDirection) -> Result<()>;

    /// Read the full value of a port
    fn d_in(&mut self, port_type: DigitalPortType) -> Result<u64>;
}
