//! World struct for DAQ DIO BDD tests

use std::sync::Arc;

use cucumber::World;
use daq_dio::{Config, DaqDioDevice, DaqSwitchDevice, MockDaqLibrary, PortSelection};
use tokio::sync::Mutex;

#[derive(Debug, Default, World)]
pub struct DaqDioWorld {
    pub library: MockDaqLibrary,
    pub config: Config,
    pub device: Option<DaqDioDevice>,
    pub switch_device: Option<DaqSwitchDevice>,
    pub last_value: Option<String>,
    pub last_error: Option<String>,
    pub last_error_code: Option<u16>,
}

impl DaqDioWorld {
    /// Start every scenario from an empty port selection.
    pub fn reset_ports(&mut self) {
        self.config.ports = PortSelection::none();
    }

    /// Build the device engine from the current library and config.
    pub fn build_device(&mut self) {
        self.device = Some(DaqDioDevice::new(
            self.config.clone(),
            Arc::new(self.library.clone()),
        ));
    }

    pub fn device_mut(&mut self) -> &mut DaqDioDevice {
        if self.device.is_none() {
            self.build_device();
        }
        self.device.as_mut().expect("device not created")
    }

    pub fn device(&self) -> &DaqDioDevice {
        self.device.as_ref().expect("device not created")
    }

    /// Move the initialized engine behind an Alpaca switch device.
    pub fn build_switch_device(&mut self) {
        let device = self.device.take().expect("device not created");
        self.switch_device = Some(DaqSwitchDevice::new(
            self.config.device.clone(),
            Arc::new(Mutex::new(device)),
        ));
    }

    pub fn switch_device(&self) -> &DaqSwitchDevice {
        self.switch_device
            .as_ref()
            .expect("switch device not created")
    }
}
