//! Channel decoding and hardware reads
//!
//! Maps a channel name back to its port group and bit, resolves the group to
//! a hardware port type, reads the port and extracts the requested value.
//!
//! Bit channels number from the most significant end of the port byte:
//! channel bit `n` is physical bit `7 - n`, so `A0` is the MSB of port A and
//! `A7` its LSB.

use tracing::debug;

use crate::attribute::{AttrValue, ChannelId};
use crate::catalog::{PortGroup, BITS_PER_PORT, COUNTER_CHANNEL};
use crate::error::{DaqDioError, Result};
use crate::io::{DigitalDirection, DigitalPortType, DioDevice};

/// Decode a channel name into its identity
///
/// `CTR` is the counter. A leading `A`, `B` or `C` is a bit channel whose
/// second character is the bit index. Any other leading character is the
/// counter.
pub fn decode(name: &str) -> Result<ChannelId> {
    if name == COUNTER_CHANNEL {
        return Ok(ChannelId::counter());
    }

    let mut chars = name.chars();
    let first = chars
        .next()
        .ok_or_else(|| DaqDioError::InvalidChannel(name.to_string()))?;

    match PortGroup::from_letter(first) {
        PortGroup::Counter => Ok(ChannelId::counter()),
        group => {
            let bit = match (chars.next(), chars.next()) {
                (Some(digit), None) => digit
                    .to_digit(10)
                    .ok_or_else(|| DaqDioError::InvalidChannel(name.to_string()))?,
                _ => return Err(DaqDioError::InvalidChannel(name.to_string())),
            };
            ChannelId::bit(group, bit as u8)
        }
    }
}

/// Resolve a port group to one of the device's port types
///
/// Devices with fewer port types than the catalog expects fall back to the
/// last available port type.
pub fn resolve_port(port_types: &[DigitalPortType], group: PortGroup) -> Result<DigitalPortType> {
    let last = port_types.last().ok_or(DaqDioError::NoPorts)?;
    let port = port_types
        .get(group.catalog_index())
        .copied()
        .unwrap_or(*last);
    debug!("Resolved {:?} to port {:?}", group, port);
    Ok(port)
}

/// Extract the value of channel bit `bit` from a port byte
pub fn extract_bit(byte: u8, bit: u8) -> Result<bool> {
    if bit >= BITS_PER_PORT {
        return Err(DaqDioError::InvalidChannel(format!(
            "bit index {} out of range",
            bit
        )));
    }
    let physical_bit = BITS_PER_PORT - 1 - bit;
    Ok((byte >> physical_bit) & 1 == 1)
}

/// Read a channel from the digital-I/O device
pub fn read_channel(dio: &mut dyn DioDevice, channel: ChannelId) -> Result<AttrValue> {
    let port_types = dio.port_types()?;
    let port = resolve_port(&port_types, channel.group())?;

    let info = dio.port_info(port)?;
    if info.port_io_type.is_configurable() {
        dio.config_port(port, DigitalDirection::Input)?;
    }

    let raw = dio.d_in(port)?;
    debug!("Read {:#x} from port {:?} for {}", raw, port, channel);

    match channel.bit_index() {
        None => Ok(AttrValue::Integer(raw)),
        Some(bit) => {
            let byte = (raw & 0xff) as u8;
            Ok(AttrValue::Boolean(extract_bit(byte, bit)?))
        }
    }
}
