//! Channel enumeration
//!
//! Turns a [`PortSelection`] into the ordered list of attribute descriptors
//! to publish. An enabled counter takes precedence over every other group:
//! the device then exposes the single `CTR` channel and no bit channels.

use tracing::debug;

use crate::attribute::{AttributeDescriptor, ChannelId};
use crate::catalog::{PortGroup, BITS_PER_PORT};
use crate::config::PortSelection;

/// Enumerate the channels exposed for a port selection
pub fn enumerate_channels(selection: &PortSelection) -> Vec<ChannelId> {
    let mut channels = Vec::new();

    if selection.is_enabled(PortGroup::Counter) {
        channels.push(ChannelId::counter());
    } else {
        for group in PortGroup::ALL {
            if group == PortGroup::Counter || !selection.is_enabled(group) {
                continue;
            }
            channels.extend(
                (0..BITS_PER_PORT).filter_map(|bit| ChannelId::bit(group, bit).ok()),
            );
        }
    }

    debug!(
        "Enumerated {} channels for selection {:?}",
        channels.len(),
        selection
    );
    channels
}

/// Enumerate the attribute descriptors exposed for a port selection
pub fn enumerate_attributes(selection: &PortSelection) -> Vec<AttributeDescriptor> {
    enumerate_channels(selection)
        .into_iter()
        .map(AttributeDescriptor::for_channel)
        .collect()
}
