//! Error types for the DAQ digital-I/O driver

use ascom_alpaca::{ASCOMError, ASCOMErrorCode};

/// Errors that can occur when interacting with the DAQ device
#[derive(Debug, thiserror::Error)]
pub enum DaqDioError {
    #[error("Not connected to a DAQ device")]
    NotConnected,

    #[error("No DAQ devices found")]
    NoDevicesFound,

    #[error("The DAQ device does not support digital input")]
    NoDigitalSupport,

    #[error("Descriptor index {index} out of range ({available} devices found)")]
    DescriptorNotFound { index: usize, available: usize },

    #[error("Invalid channel name: {0}")]
    InvalidChannel(String),

    #[error("Unknown property '{property}' for attribute {attribute}")]
    UnknownProperty { attribute: String, property: String },

    #[error("The DAQ device reports no digital port types")]
    NoPorts,

    #[error("Hardware error: {0}")]
    Hardware(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DaqDioError {
    /// Convert this error to an ASCOM error
    pub fn to_ascom_error(self) -> ASCOMError {
        match self {
            DaqDioError::NotConnected
            | DaqDioError::NoDevicesFound
            | DaqDioError::NoDigitalSupport
            | DaqDioError::DescriptorNotFound { .. } => {
                ASCOMError::new(ASCOMErrorCode::NOT_CONNECTED, self.to_string())
            }
            DaqDioError::InvalidChannel(_) => {
                ASCOMError::new(ASCOMErrorCode::INVALID_VALUE, self.to_string())
            }
            _ => ASCOMError::invalid_operation(self.to_string()),
        }
    }
}

/// Result type alias for DAQ digital-I/O operations
pub type Result<T> = std::result::Result<T, DaqDioError>;
