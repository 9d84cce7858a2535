//! DAQ digital-I/O device lifecycle
//!
//! [`DaqDioDevice`] owns the connection to one DAQ device and drives the
//! operational state reported through its [`DeviceHost`]:
//!
//! ```text
//! Init -> NoDevicesFound | DescriptorNotFound | NoDigitalSupport | ConnectionFailed
//! Init -> Connected -> Running <-> Fault
//! Connected | Running | Fault -> Disconnected
//! ```
//!
//! Discovery and capability problems never surface as errors. The device
//! stays instantiated but inert and the cause is published as status text.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::attribute::AttrValue;
use crate::config::Config;
use crate::decoder::{decode, read_channel};
use crate::enumerator::enumerate_attributes;
use crate::error::{DaqDioError, Result};
use crate::host::{AttributeRegistry, DevState, DeviceHost};
use crate::io::{DaqDevice, DaqDeviceDescriptor, DaqLibrary, DioDevice};
use crate::registrar::{self, RegistrationSummary};

/// Connection code passed to the vendor library on connect
const CONNECTION_CODE: u32 = 0;

/// Status published while a read is in progress
pub const READING_STATUS: &str = "Reading data";

/// Lifecycle of the device's hardware binding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Init,
    NoDevicesFound,
    DescriptorNotFound,
    NoDigitalSupport,
    ConnectionFailed,
    Connected,
    Running,
    Fault,
    Disconnected,
}

impl LifecycleState {
    /// Whether initialization failed and the device is waiting for a restart
    pub fn is_inert(&self) -> bool {
        matches!(
            self,
            LifecycleState::NoDevicesFound
                | LifecycleState::DescriptorNotFound
                | LifecycleState::NoDigitalSupport
                | LifecycleState::ConnectionFailed
        )
    }
}

/// DAQ digital-I/O device
pub struct DaqDioDevice<H: DeviceHost = AttributeRegistry> {
    config: Config,
    library: Arc<dyn DaqLibrary>,
    host: H,
    lifecycle: LifecycleState,
    daq_device: Option<Box<dyn DaqDevice>>,
    dio_device: Option<Box<dyn DioDevice>>,
    descriptor: Option<DaqDeviceDescriptor>,
}

impl<H: DeviceHost> fmt::Debug for DaqDioDevice<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DaqDioDevice")
            .field("config", &self.config)
            .field("lifecycle", &self.lifecycle)
            .field("descriptor", &self.descriptor)
            .finish_non_exhaustive()
    }
}

impl DaqDioDevice<AttributeRegistry> {
    /// Create a device publishing into an in-process attribute registry
    pub fn new(config: Config, library: Arc<dyn DaqLibrary>) -> Self {
        Self::with_host(config, library, AttributeRegistry::new())
    }
}

impl<H: DeviceHost> DaqDioDevice<H> {
    /// Create a device publishing into a custom host
    pub fn with_host(config: Config, library: Arc<dyn DaqLibrary>, host: H) -> Self {
        Self {
            config,
            library,
            host,
            lifecycle: LifecycleState::Init,
            daq_device: None,
            dio_device: None,
            descriptor: None,
        }
    }

    /// Discover the configured DAQ device and connect to it
    pub fn init_device(&mut self) {
        if self.daq_device.is_some() {
            debug!("Re-initializing, releasing the previous connection first");
            self.delete_device();
        }

        self.host.set_state(DevState::Init);
        self.lifecycle = LifecycleState::Init;

        match self.bind() {
            Ok(descriptor) => {
                info!(
                    "Connected to DAQ device {} ({})",
                    descriptor.dev_string, descriptor.unique_id
                );
                self.host.set_state(DevState::Init);
                self.host.set_status(&format!(
                    "Established a connection to the DAQ device {}",
                    descriptor.dev_string
                ));
                self.descriptor = Some(descriptor);
                self.lifecycle = LifecycleState::Connected;
            }
            Err(e) => self.report_init_failure(e),
        }
    }

    /// Walk inventory, descriptor selection, capability check and connect
    fn bind(&mut self) -> Result<DaqDeviceDescriptor> {
        let devices = self
            .library
            .device_inventory(self.config.hardware.interface_type)
            .map_err(|e| {
                warn!("DAQ device inventory failed: {}", e);
                DaqDioError::NoDevicesFound
            })?;
        debug!("Found {} DAQ devices", devices.len());
        if devices.is_empty() {
            return Err(DaqDioError::NoDevicesFound);
        }

        let index = self.config.hardware.descriptor_index;
        let descriptor = devices
            .get(index)
            .cloned()
            .ok_or(DaqDioError::DescriptorNotFound {
                index,
                available: devices.len(),
            })?;

        let mut device = self.library.create_device(&descriptor)?;
        let Some(dio) = device.dio_device() else {
            device.release();
            return Err(DaqDioError::NoDigitalSupport);
        };

        if let Err(e) = device.connect(CONNECTION_CODE) {
            device.release();
            return Err(e);
        }

        let descriptor = device.descriptor();
        self.daq_device = Some(device);
        self.dio_device = Some(dio);
        Ok(descriptor)
    }

    fn report_init_failure(&mut self, err: DaqDioError) {
        let (state, lifecycle) = match err {
            DaqDioError::NoDevicesFound => (DevState::Alarm, LifecycleState::NoDevicesFound),
            DaqDioError::DescriptorNotFound { .. } => {
                (DevState::Alarm, LifecycleState::DescriptorNotFound)
            }
            DaqDioError::NoDigitalSupport => (DevState::Alarm, LifecycleState::NoDigitalSupport),
            _ => (DevState::Fault, LifecycleState::ConnectionFailed),
        };
        let status = match lifecycle {
            LifecycleState::ConnectionFailed => {
                format!("Error: Failed to connect to the DAQ device: {}", err)
            }
            _ => format!("Error: {}", err),
        };
        warn!("DAQ device initialization failed: {}", err);
        self.host.set_state(state);
        self.host.set_status(&status);
        self.lifecycle = lifecycle;
    }

    /// Register one attribute per enabled channel
    ///
    /// An inert device keeps its failure status; the selection status is
    /// only published once the hardware is bound.
    pub fn initialize_dynamic_attributes(&mut self) -> RegistrationSummary {
        let descriptors = enumerate_attributes(&self.config.ports);
        if self.lifecycle.is_inert() {
            debug!("Registering attributes on an inert device ({:?})", self.lifecycle);
            registrar::install_all(&mut self.host, &descriptors)
        } else {
            registrar::register_all(&mut self.host, &descriptors)
        }
    }

    /// Rebuild the attribute set from the configuration
    pub fn refresh_attributes(&mut self) -> RegistrationSummary {
        info!("Refreshing dynamic attributes");
        self.initialize_dynamic_attributes()
    }

    /// Read a channel by attribute name
    ///
    /// This is the single read entry point shared by every registered
    /// attribute.
    pub fn read_attribute(&mut self, name: &str) -> Result<AttrValue> {
        let channel = decode(name)?;
        let dio = self.dio_device.as_mut().ok_or(DaqDioError::NotConnected)?;

        self.host.set_state(DevState::Running);
        self.host.set_status(READING_STATUS);
        self.lifecycle = LifecycleState::Running;

        match read_channel(dio.as_mut(), channel) {
            Ok(value) => {
                debug!("{} = {}", name, value);
                Ok(value)
            }
            Err(e) => {
                warn!("Reading {} failed: {}", name, e);
                self.host.set_state(DevState::Fault);
                self.host
                    .set_status(&format!("Error: Reading {} failed: {}", name, e));
                self.lifecycle = LifecycleState::Fault;
                Err(e)
            }
        }
    }

    /// Disconnect and release the DAQ device
    ///
    /// A no-op when no device was ever created.
    pub fn delete_device(&mut self) {
        self.dio_device = None;
        let Some(mut device) = self.daq_device.take() else {
            return;
        };

        let was_connected = device.is_connected();
        if was_connected {
            if let Err(e) = device.disconnect() {
                warn!("Failed to disconnect from DAQ device: {}", e);
            }
        }
        device.release();
        self.descriptor = None;

        if !was_connected {
            debug!("Released DAQ device that was no longer connected");
            return;
        }

        info!("Released DAQ device");
        self.lifecycle = LifecycleState::Disconnected;
        self.host.set_state(DevState::Off);
        self.host.set_status("Disconnected from the DAQ device");
    }

    /// Whether a digital-I/O capable device is connected
    pub fn is_connected(&self) -> bool {
        self.dio_device.is_some()
            && self
                .daq_device
                .as_ref()
                .is_some_and(|device| device.is_connected())
    }

    pub fn state(&self) -> DevState {
        self.host.state()
    }

    pub fn status(&self) -> String {
        self.host.status()
    }

    pub fn lifecycle(&self) -> LifecycleState {
        self.lifecycle
    }

    pub fn descriptor(&self) -> Option<&DaqDeviceDescriptor> {
        self.descriptor.as_ref()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn host(&self) -> &H {
        &self.host
    }
}

impl<H: DeviceHost> Drop for DaqDioDevice<H> {
    fn drop(&mut self) {
        self.delete_device();
    }
}
