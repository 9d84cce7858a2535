//! Attribute registration
//!
//! Builds host attributes from descriptors and installs them as one set.
//! An unknown optional property is skipped with a warning; it never stops
//! the attribute or the rest of the pass from being registered.

use tracing::{debug, info, warn};

use crate::attribute::{Attr, AttributeDescriptor};
use crate::config::PortSelection;
use crate::enumerator::enumerate_attributes;
use crate::host::DeviceHost;

/// Status published when at least one channel was registered
pub const PORTS_SELECTED_STATUS: &str = "Ports have been selected.";

/// Status published when the selection is empty
pub const NO_PORTS_SELECTED_STATUS: &str = "No ports are selected. Select a port type, refresh the attributes and restart the host interface to see changes.";

/// Outcome of a registration pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationSummary {
    /// Names of the registered attributes
    pub registered: Vec<String>,
    /// `(attribute, property)` pairs that could not be applied
    pub skipped_properties: Vec<(String, String)>,
}

impl RegistrationSummary {
    pub fn is_empty(&self) -> bool {
        self.registered.is_empty()
    }
}

/// Build the host attribute for a descriptor
fn build_attribute(
    descriptor: &AttributeDescriptor,
    skipped: &mut Vec<(String, String)>,
) -> Attr {
    let mut attr = Attr::new(
        descriptor.name(),
        descriptor.value_type(),
        descriptor.access(),
    );
    for (key, value) in descriptor.properties() {
        if let Err(e) = attr.properties.apply(descriptor.name(), key, value) {
            warn!("Error setting attribute property: {}", e);
            skipped.push((descriptor.name().to_string(), key.clone()));
        }
    }
    attr
}

/// Install every descriptor into the host, replacing what was there
///
/// Leaves the host's status untouched.
pub fn install_all<H: DeviceHost + ?Sized>(
    host: &mut H,
    descriptors: &[AttributeDescriptor],
) -> RegistrationSummary {
    let mut summary = RegistrationSummary::default();

    let attributes: Vec<Attr> = descriptors
        .iter()
        .map(|d| build_attribute(d, &mut summary.skipped_properties))
        .collect();
    summary.registered = attributes.iter().map(|a| a.name.clone()).collect();

    host.install_attributes(attributes);
    summary
}

/// Publish the selection status for a registration pass
pub fn publish_status<H: DeviceHost + ?Sized>(host: &mut H, summary: &RegistrationSummary) {
    if summary.is_empty() {
        info!("No port types selected, no attributes registered");
        host.set_status(NO_PORTS_SELECTED_STATUS);
    } else {
        debug!("Registered attributes: {:?}", summary.registered);
        host.set_status(PORTS_SELECTED_STATUS);
    }
}

/// Register every descriptor with the host and publish the selection status
pub fn register_all<H: DeviceHost + ?Sized>(
    host: &mut H,
    descriptors: &[AttributeDescriptor],
) -> RegistrationSummary {
    let summary = install_all(host, descriptors);
    publish_status(host, &summary);
    summary
}

/// Enumerate the selection again and re-register the result
pub fn refresh<H: DeviceHost + ?Sized>(
    host: &mut H,
    selection: &PortSelection,
) -> RegistrationSummary {
    let descriptors = enumerate_attributes(selection);
    register_all(host, &descriptors)
}
