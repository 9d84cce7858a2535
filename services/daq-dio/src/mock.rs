//! Simulated DAQ hardware for testing
//!
//! This module provides implementations of the hardware traits backed by an
//! in-memory model of one or more DAQ devices, allowing the driver to be
//! tested and run without real hardware.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::debug;

use crate::error::{DaqDioError, Result};
use crate::io::{
    DaqDevice, DaqDeviceDescriptor, DaqLibrary, DigitalDirection, DigitalPortIoType,
    DigitalPortType, DioDevice, DioPortInfo, InterfaceType,
};

/// Description of one simulated device
#[derive(Debug, Clone)]
pub struct MockDeviceSpec {
    pub descriptor: DaqDeviceDescriptor,
    /// Whether the device has a digital-I/O sub-device
    pub has_dio: bool,
    /// Ports in hardware order with their initial values
    pub ports: Vec<(DioPortInfo, u64)>,
    /// Port whose value increments on every read
    pub counter_port: Option<DigitalPortType>,
}

impl MockDeviceSpec {
    /// A USB-1208FS-like device with ports A, B, CL and a counter on CH
    pub fn usb_1208fs(serial: &str) -> Self {
        let port = |port_type, port_io_type| DioPortInfo {
            port_type,
            port_io_type,
            number_of_bits: 8,
        };
        Self {
            descriptor: DaqDeviceDescriptor {
                product_name: "USB-1208FS-Plus".to_string(),
                product_id: 0xE8,
                dev_interface: InterfaceType::Usb,
                dev_string: format!("USB-1208FS-Plus ({})", serial),
                unique_id: serial.to_string(),
            },
            has_dio: true,
            ports: vec![
                (port(DigitalPortType::FirstPortA, DigitalPortIoType::Io), 0b1001_0110),
                (port(DigitalPortType::FirstPortB, DigitalPortIoType::Io), 0x00),
                (port(DigitalPortType::FirstPortCL, DigitalPortIoType::BitIo), 0xff),
                (port(DigitalPortType::FirstPortCH, DigitalPortIoType::In), 0),
            ],
            counter_port: Some(DigitalPortType::FirstPortCH),
        }
    }

    /// A device without digital ports
    pub fn analog_only(serial: &str) -> Self {
        Self {
            has_dio: false,
            ports: Vec::new(),
            counter_port: None,
            ..Self::usb_1208fs(serial)
        }
    }
}

/// Counters of the calls made against a simulated device
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MockDeviceStats {
    pub connects: usize,
    pub disconnects: usize,
    pub releases: usize,
    pub reads: usize,
    pub input_configurations: usize,
}

#[derive(Debug)]
struct MockDeviceState {
    spec: MockDeviceSpec,
    values: HashMap<DigitalPortType, u64>,
    directions: HashMap<DigitalPortType, DigitalDirection>,
    connected: bool,
    stats: MockDeviceStats,
}

impl MockDeviceState {
    fn new(spec: MockDeviceSpec) -> Self {
        let values = spec
            .ports
            .iter()
            .map(|(info, value)| (info.port_type, *value))
            .collect();
        Self {
            spec,
            values,
            directions: HashMap::new(),
            connected: false,
            stats: MockDeviceStats::default(),
        }
    }

    fn port_info(&self, port_type: DigitalPortType) -> Result<DioPortInfo> {
        self.spec
            .ports
            .iter()
            .map(|(info, _)| *info)
            .find(|info| info.port_type == port_type)
            .ok_or_else(|| DaqDioError::Hardware(format!("Port {:?} not supported", port_type)))
    }
}

#[derive(Debug, Default)]
struct MockHardware {
    devices: Vec<MockDeviceState>,
}

type SharedHardware = Arc<Mutex<MockHardware>>;

fn lock(hardware: &SharedHardware) -> MutexGuard<'_, MockHardware> {
    hardware.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Simulated vendor library
#[derive(Debug, Clone)]
pub struct MockDaqLibrary {
    hardware: SharedHardware,
}

impl Default for MockDaqLibrary {
    fn default() -> Self {
        Self::new(vec![MockDeviceSpec::usb_1208fs("01D8A1C2")])
    }
}

impl MockDaqLibrary {
    pub fn new(devices: Vec<MockDeviceSpec>) -> Self {
        let hardware = MockHardware {
            devices: devices.into_iter().map(MockDeviceState::new).collect(),
        };
        Self {
            hardware: Arc::new(Mutex::new(hardware)),
        }
    }

    /// A library that discovers no devices
    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Set the value a port returns on the next read
    pub fn set_port_value(&self, device: usize, port_type: DigitalPortType, value: u64) {
        if let Some(state) = lock(&self.hardware).devices.get_mut(device) {
            state.values.insert(port_type, value);
        }
    }

    pub fn stats(&self, device: usize) -> MockDeviceStats {
        lock(&self.hardware)
            .devices
            .get(device)
            .map(|state| state.stats)
            .unwrap_or_default()
    }

    /// Direction a port was last configured for
    pub fn direction(&self, device: usize, port_type: DigitalPortType) -> Option<DigitalDirection> {
        lock(&self.hardware)
            .devices
            .get(device)
            .and_then(|state| state.directions.get(&port_type).copied())
    }
}

impl DaqLibrary for MockDaqLibrary {
    fn device_inventory(&self, interface_type: InterfaceType) -> Result<Vec<DaqDeviceDescriptor>> {
        let hardware = lock(&self.hardware);
        Ok(hardware
            .devices
            .iter()
            .map(|state| state.spec.descriptor.clone())
            .filter(|d| interface_type.matches(d.dev_interface))
            .collect())
    }

    fn create_device(&self, descriptor: &DaqDeviceDescriptor) -> Result<Box<dyn DaqDevice>> {
        let hardware = lock(&self.hardware);
        let index = hardware
            .devices
            .iter()
            .position(|state| state.spec.descriptor.unique_id == descriptor.unique_id)
            .ok_or_else(|| {
                DaqDioError::Hardware(format!("Unknown device {}", descriptor.unique_id))
            })?;
        debug!("Mock: created device {}", descriptor.dev_string);
        Ok(Box::new(MockDaqDeviceHandle {
            hardware: Arc::clone(&self.hardware),
            index,
            released: false,
        }))
    }
}

/// Handle to a simulated device
#[derive(Debug)]
struct MockDaqDeviceHandle {
    hardware: SharedHardware,
    index: usize,
    released: bool,
}

impl MockDaqDeviceHandle {
    fn with_state<T>(&self, f: impl FnOnce(&mut MockDeviceState) -> T) -> Result<T> {
        if self.released {
            return Err(DaqDioError::Hardware("Device handle released".to_string()));
        }
        let mut hardware = lock(&self.hardware);
        let state = hardware
            .devices
            .get_mut(self.index)
            .ok_or_else(|| DaqDioError::Hardware("Device vanished".to_string()))?;
        Ok(f(state))
    }
}

impl DaqDevice for MockDaqDeviceHandle {
    fn descriptor(&self) -> DaqDeviceDescriptor {
        lock(&self.hardware)
            .devices
            .get(self.index)
            .map(|state| state.spec.descriptor.clone())
            .unwrap_or_else(|| DaqDeviceDescriptor {
                product_name: String::new(),
                product_id: 0,
                dev_interface: InterfaceType::Any,
                dev_string: String::new(),
                unique_id: String::new(),
            })
    }

    fn connect(&mut self, connection_code: u32) -> Result<()> {
        debug!("Mock: connect with code {}", connection_code);
        self.with_state(|state| {
            state.connected = true;
            state.stats.connects += 1;
        })
    }

    fn disconnect(&mut self) -> Result<()> {
        self.with_state(|state| {
            state.connected = false;
            state.stats.disconnects += 1;
        })
    }

    fn is_connected(&self) -> bool {
        self.with_state(|state| state.connected).unwrap_or(false)
    }

    fn release(&mut self) {
        if self.released {
            return;
        }
        let _ = self.with_state(|state| {
            state.connected = false;
            state.stats.releases += 1;
        });
        self.released = true;
    }

    fn dio_device(&self) -> Option<Box<dyn DioDevice>> {
        let has_dio = self.with_state(|state| state.spec.has_dio).unwrap_or(false);
        has_dio.then(|| {
            Box::new(MockDioHandle {
                hardware: Arc::clone(&self.hardware),
                index: self.index,
            }) as Box<dyn DioDevice>
        })
    }
}

/// Digital-I/O sub-device of a simulated device
#[derive(Debug)]
struct MockDioHandle {
    hardware: SharedHardware,
    index: usize,
}

impl MockDioHandle {
    fn with_connected<T>(&self, f: impl FnOnce(&mut MockDeviceState) -> Result<T>) -> Result<T> {
        let mut hardware = lock(&self.hardware);
        let state = hardware
            .devices
            .get_mut(self.index)
            .ok_or_else(|| DaqDioError::Hardware("Device vanished".to_string()))?;
        if !state.connected {
            return Err(DaqDioError::NotConnected);
        }
        f(state)
    }
}

impl DioDevice for MockDioHandle {
    fn port_types(&self) -> Result<Vec<DigitalPortType>> {
        self.with_connected(|state| {
            Ok(state
                .spec
                .ports
                .iter()
                .map(|(info, _)| info.port_type)
                .collect())
        })
    }

    fn port_info(&self, port_type: DigitalPortType) -> Result<DioPortInfo> {
        self.with_connected(|state| state.port_info(port_type))
    }

    fn config_port(&mut self, port_type: DigitalPortType, direction: DigitalDirection) -> Result<()> {
        self.with_connected(|state| {
            let info = state.port_info(port_type)?;
            if !info.port_io_type.is_configurable() {
                return Err(DaqDioError::Hardware(format!(
                    "Port {:?} is not configurable",
                    port_type
                )));
            }
            state.directions.insert(port_type, direction);
            if direction == DigitalDirection::Input {
                state.stats.input_configurations += 1;
            }
            Ok(())
        })
    }

    fn d_in(&mut self, port_type: DigitalPortType) -> Result<u64> {
        self.with_connected(|state| {
            state.port_info(port_type)?;
            state.stats.reads += 1;
            let value = state.values.get(&port_type).copied().unwrap_or(0);
            if state.spec.counter_port == Some(port_type) {
                state.values.insert(port_type, value.wrapping_add(1));
            }
            debug!("Mock: d_in({:?}) = {}", port_type, value);
            Ok(value)
        })
    }
}
