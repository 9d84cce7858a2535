//! DAQ digital-I/O switch device implementation
//!
//! This module implements the ASCOM Alpaca Device and Switch traits on top
//! of a [`DaqDioDevice`]. Every registered attribute is published as one
//! read-only switch, numbered in registration order. The `refreshatt`
//! action rebuilds the attribute set; the `state` and `status` actions
//! expose the device's operational state and status text.

use std::fmt;
use std::sync::Arc;

use ascom_alpaca::api::{Device, Switch};
use ascom_alpaca::{ASCOMError, ASCOMErrorCode, ASCOMResult};
use async_trait::async_trait;
use tokio::sync::{Mutex, RwLock};
use tracing::debug;

use crate::attribute::{Attr, AttrValue, ValueType};
use crate::config::DeviceConfig;
use crate::device::DaqDioDevice;
use crate::error::DaqDioError;

/// Upper bound reported for the counter switch
const COUNTER_MAX: f64 = u64::MAX as f64;

/// Alpaca actions understood by the device
pub const SUPPORTED_ACTIONS: [&str; 3] = ["refreshatt", "state", "status"];

/// Guard macro that returns NOT_CONNECTED if the device is not connected.
macro_rules! ensure_connected {
    ($self:ident) => {
        if !$self.connected().await.is_ok_and(|connected| connected) {
            debug!("Switch device not connected");
            return Err(ASCOMError::NOT_CONNECTED);
        }
    };
}

/// DAQ digital-I/O device for ASCOM Alpaca
pub struct DaqSwitchDevice {
    config: DeviceConfig,
    requested_connection: Arc<RwLock<bool>>,
    device: Arc<Mutex<DaqDioDevice>>,
}

impl fmt::Debug for DaqSwitchDevice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DaqSwitchDevice")
            .field("config", &self.config)
            .field("requested_connection", &self.requested_connection)
            .finish_non_exhaustive()
    }
}

impl DaqSwitchDevice {
    /// Create a switch device over an initialized DAQ device
    pub fn new(config: DeviceConfig, device: Arc<Mutex<DaqDioDevice>>) -> Self {
        Self {
            config,
            requested_connection: Arc::new(RwLock::new(false)),
            device,
        }
    }

    /// Run an engine call on the blocking pool
    ///
    /// Hardware reads block, and the engine expects one call at a time.
    async fn with_device<T, F>(&self, f: F) -> ASCOMResult<T>
    where
        F: FnOnce(&mut DaqDioDevice) -> T + Send + 'static,
        T: Send + 'static,
    {
        let device = Arc::clone(&self.device);
        tokio::task::spawn_blocking(move || {
            let mut guard = device.blocking_lock();
            f(&mut guard)
        })
        .await
        .map_err(|e| ASCOMError::invalid_operation(format!("Device task failed: {}", e)))
    }

    /// Registered attribute behind a switch ID
    async fn attribute(&self, id: usize) -> ASCOMResult<Attr> {
        let device = self.device.lock().await;
        device.host().get(id).cloned().ok_or_else(|| {
            ASCOMError::new(
                ASCOMErrorCode::INVALID_VALUE,
                format!("Invalid switch ID: {}", id),
            )
        })
    }

    /// Read the live value of a switch
    async fn read_switch(&self, id: usize) -> ASCOMResult<AttrValue> {
        let attr = self.attribute(id).await?;
        self.with_device(move |device| device.read_attribute(&attr.name))
            .await?
            .map_err(Self::to_ascom_error)
    }

    /// Rebuild the attribute set, returning the resulting status
    pub async fn refresh_attributes(&self) -> ASCOMResult<String> {
        self.with_device(|device| {
            device.refresh_attributes();
            device.status()
        })
        .await
    }

    /// Convert internal error to ASCOM error
    fn to_ascom_error(err: DaqDioError) -> ASCOMError {
        err.to_ascom_error()
    }
}

#[async_trait]
impl Device for DaqSwitchDevice {
    fn static_name(&self) -> &str {
        &self.config.name
    }

    fn unique_id(&self) -> &str {
        &self.config.unique_id
    }

    async fn description(&self) -> ASCOMResult<String> {
        Ok(self.config.description.clone())
    }

    async fn connected(&self) -> ASCOMResult<bool> {
        let requested = *self.requested_connection.read().await;
        let hardware_ok = self.device.lock().await.is_connected();
        Ok(requested && hardware_ok)
    }

    async fn set_connected(&self, connected: bool) -> ASCOMResult<()> {
        if self.connected().await? == connected {
            return Ok(());
        }
        match connected {
            true => {
                let device = self.device.lock().await;
                if !device.is_connected() {
                    return Err(ASCOMError::new(
                        ASCOMErrorCode::NOT_CONNECTED,
                        device.status(),
                    ));
                }
                *self.requested_connection.write().await = true;
                debug!("Switch device connected");
            }
            false => {
                *self.requested_connection.write().await = false;
                debug!("Switch device disconnected");
            }
        }
        Ok(())
    }

    async fn driver_info(&self) -> ASCOMResult<String> {
        Ok("DAQ DIO Driver - Switch interface for MCC DAQ digital ports".to_string())
    }

    async fn driver_version(&self) -> ASCOMResult<String> {
        Ok(env!("CARGO_PKG_VERSION").to_string())
    }

    async fn action(&self, action: String, _parameters: String) -> ASCOMResult<String> {
        match action.to_ascii_lowercase().as_str() {
            "refreshatt" => self.refresh_attributes().await,
            "state" => Ok(self.device.lock().await.state().to_string()),
            "status" => Ok(self.device.lock().await.status()),
            _ => Err(ASCOMError::new(
                ASCOMErrorCode::ACTION_NOT_IMPLEMENTED,
                format!("Action {} is not supported", action),
            )),
        }
    }

    async fn supported_actions(&self) -> ASCOMResult<Vec<String>> {
        Ok(SUPPORTED_ACTIONS.iter().map(|a| a.to_string()).collect())
    }
}

#[async_trait]
impl Switch for DaqSwitchDevice {
    async fn max_switch(&self) -> ASCOMResult<usize> {
        Ok(self.device.lock().await.host().len())
    }

    async fn can_write(&self, id: usize) -> ASCOMResult<bool> {
        ensure_connected!(self);
        Ok(self.attribute(id).await?.access.is_writable())
    }

    async fn get_switch(&self, id: usize) -> ASCOMResult<bool> {
        ensure_connected!(self);
        Ok(self.read_switch(id).await?.as_bool())
    }

    async fn set_switch(&self, id: usize, _state: bool) -> ASCOMResult<()> {
        ensure_connected!(self);
        let attr = self.attribute(id).await?;
        Err(ASCOMError::new(
            ASCOMErrorCode::NOT_IMPLEMENTED,
            format!("Switch {} is read-only", attr.name),
        ))
    }

    async fn get_switch_description(&self, id: usize) -> ASCOMResult<String> {
        ensure_connected!(self);
        let attr = self.attribute(id).await?;
        Ok(attr.properties.description.unwrap_or(attr.name))
    }

    async fn get_switch_name(&self, id: usize) -> ASCOMResult<String> {
        ensure_connected!(self);
        Ok(self.attribute(id).await?.name)
    }

    async fn set_switch_name(&self, _id: usize, _name: String) -> ASCOMResult<()> {
        Err(ASCOMError::new(
            ASCOMErrorCode::NOT_IMPLEMENTED,
            "Setting switch names is not supported",
        ))
    }

    async fn get_switch_value(&self, id: usize) -> ASCOMResult<f64> {
        ensure_connected!(self);
        Ok(self.read_switch(id).await?.as_f64())
    }

    async fn set_switch_value(&self, id: usize, _value: f64) -> ASCOMResult<()> {
        ensure_connected!(self);
        let attr = self.attribute(id).await?;
        Err(ASCOMError::new(
            ASCOMErrorCode::NOT_IMPLEMENTED,
            format!("Switch {} is read-only", attr.name),
        ))
    }

    async fn min_switch_value(&self, id: usize) -> ASCOMResult<f64> {
        ensure_connected!(self);
        self.attribute(id).await?;
        Ok(0.0)
    }

    async fn max_switch_value(&self, id: usize) -> ASCOMResult<f64> {
        ensure_connected!(self);
        match self.attribute(id).await?.value_type {
            ValueType::Boolean => Ok(1.0),
            ValueType::Integer => Ok(COUNTER_MAX),
        }
    }

    async fn switch_step(&self, id: usize) -> ASCOMResult<f64> {
        ensure_connected!(self);
        self.attribute(id).await?;
        Ok(1.0)
    }

    async fn can_async(&self, id: usize) -> ASCOMResult<bool> {
        ensure_connected!(self);
        self.attribute(id).await?;
        Ok(false)
    }

    async fn state_change_complete(&self, id: usize) -> ASCOMResult<bool> {
        ensure_connected!(self);
        self.attribute(id).await?;
        Ok(true)
    }

    async fn cancel_async(&self, id: usize) -> ASCOMResult<()> {
        ensure_connected!(self);
        self.attribute(id).await?;
        Ok(())
    }

    async fn set_async(&self, id: usize, state: bool) -> ASCOMResult<()> {
        ensure_connected!(self);
        self.set_switch(id, state).await
    }

    async fn set_async_value(&self, id: usize, value: f64) -> ASCOMResult<()> {
        ensure_connected!(self);
        self.set_switch_value(id, value).await
    }
}
