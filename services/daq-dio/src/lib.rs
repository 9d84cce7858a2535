//! DAQ Digital-I/O Driver
//!
//! ASCOM Alpaca driver exposing the digital ports of a Measurement
//! Computing DAQ device.
//!
//! The enabled port groups decide which channels are published:
//!
//! | Port types | Channels | Type |
//! |------------|----------|------|
//! | A, B, C (counter off) | `A0`..`A7`, `B0`..`B7`, `C0`..`C7` | Boolean |
//! | Counter on | `CTR` | Integer |
//!
//! Each channel is exposed as one read-only switch of an ASCOM Switch
//! device. Every read goes to the hardware.

pub mod attribute;
pub mod catalog;
pub mod config;
pub mod decoder;
pub mod device;
pub mod enumerator;
pub mod error;
pub mod host;
pub mod io;
#[cfg(feature = "mock")]
pub mod mock;
pub mod registrar;
pub mod switch_device;

pub use attribute::{AccessMode, Attr, AttrValue, AttributeDescriptor, ChannelId, ValueType};
pub use catalog::{PortGroup, BITS_PER_PORT, COUNTER_CHANNEL};
pub use config::{
    load_config, Config, DeviceConfig, HardwareConfig, PortSelection, ServerConfig,
};
pub use device::{DaqDioDevice, LifecycleState};
pub use enumerator::{enumerate_attributes, enumerate_channels};
pub use error::{DaqDioError, Result};
pub use host::{AttributeRegistry, DevState, DeviceHost};
pub use io::DaqLibrary;
pub use registrar::RegistrationSummary;
pub use switch_device::DaqSwitchDevice;

#[cfg(feature = "mock")]
pub use mock::{MockDaqLibrary, MockDeviceSpec};

use std::net::SocketAddr;
use std::sync::Arc;

use ascom_alpaca::api::CargoServerInfo;
use ascom_alpaca::Server;
use tokio::sync::Mutex;
use tracing::info;

/// Builder for the ASCOM Alpaca server.
///
/// Initializes the DAQ device against the given library, registers its
/// attributes, then binds the server.
pub struct ServerBuilder {
    config: Config,
    library: Arc<dyn DaqLibrary>,
}

impl ServerBuilder {
    pub fn new(config: Config, library: Arc<dyn DaqLibrary>) -> Self {
        Self { config, library }
    }

    pub async fn build(
        self,
    ) -> std::result::Result<ascom_alpaca::BoundServer, Box<dyn std::error::Error>> {
        let mut server = Server::new(CargoServerInfo!());
        server.listen_addr = SocketAddr::from(([0, 0, 0, 0], self.config.server.port));

        let config = self.config.clone();
        let library = self.library;
        let device = tokio::task::spawn_blocking(move || {
            let mut device = DaqDioDevice::new(config, library);
            device.init_device();
            device.initialize_dynamic_attributes();
            device
        })
        .await?;

        info!(
            "DAQ device state {}: {}",
            device.state(),
            device.status()
        );

        let switch_device =
            DaqSwitchDevice::new(self.config.device.clone(), Arc::new(Mutex::new(device)));
        server.devices.register(switch_device);
        info!(
            "Registered Switch device: {} (device number {})",
            self.config.device.name, self.config.device.device_number
        );

        let bound = server.bind().await?;
        println!("Bound Alpaca server bound_addr={}", bound.listen_addr());
        info!("Bound Alpaca server bound_addr={}", bound.listen_addr());
        Ok(bound)
    }
}
