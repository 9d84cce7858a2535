//! Step definitions for dynamic_attributes.feature

use crate::world::DaqDioWorld;
use cucumber::{given, then, when};
use daq_dio::io::DigitalPortType;
use daq_dio::{AttributeRegistry, PortGroup};

fn port_group(name: &str) -> PortGroup {
    match name {
        "A" => PortGroup::A,
        "B" => PortGroup::B,
        "C" => PortGroup::C,
        "Counter" => PortGroup::Counter,
        other => panic!("unknown port group {}", other),
    }
}

fn port_type(name: &str) -> DigitalPortType {
    match name {
        "FirstPortA" => DigitalPortType::FirstPortA,
        "FirstPortB" => DigitalPortType::FirstPortB,
        "FirstPortCL" => DigitalPortType::FirstPortCL,
        "FirstPortCH" => DigitalPortType::FirstPortCH,
        other => panic!("unknown port type {}", other),
    }
}

fn registry(world: &DaqDioWorld) -> &AttributeRegistry {
    world.device().host()
}

// ============================================================================
// Given steps
// ============================================================================

#[given("no port types are selected")]
fn no_port_types(world: &mut DaqDioWorld) {
    world.reset_ports();
}

#[given(expr = "port type {word} is selected")]
fn port_type_selected(world: &mut DaqDioWorld, group: String) {
    world.config.ports = world.config.ports.with(port_group(&group), true);
}

#[given(expr = "port {word} reads {int}")]
fn port_reads(world: &mut DaqDioWorld, port: String, value: u64) {
    world.library.set_port_value(0, port_type(&port), value);
}

// ============================================================================
// When steps
// ============================================================================

#[when("the dynamic attributes are initialized")]
fn initialize_attributes(world: &mut DaqDioWorld) {
    world.device_mut().initialize_dynamic_attributes();
}

#[when("the attributes are refreshed")]
fn refresh_attributes(world: &mut DaqDioWorld) {
    world.device_mut().refresh_attributes();
}

#[when(expr = "attribute {word} is read")]
fn read_attribute(world: &mut DaqDioWorld, name: String) {
    match world.device_mut().read_attribute(&name) {
        Ok(value) => {
            world.last_value = Some(value.to_string());
            world.last_error = None;
        }
        Err(e) => {
            world.last_value = None;
            world.last_error = Some(e.to_string());
        }
    }
}

// ============================================================================
// Then steps
// ============================================================================

#[then(expr = "{int} attributes should be registered")]
fn attribute_count(world: &mut DaqDioWorld, expected: usize) {
    assert_eq!(registry(world).len(), expected);
}

#[then(expr = "the attributes should start with {string}")]
fn attributes_start_with(world: &mut DaqDioWorld, expected: String) {
    let expected: Vec<&str> = expected.split(", ").collect();
    let names: Vec<&str> = registry(world)
        .attributes()
        .iter()
        .take(expected.len())
        .map(|attr| attr.name.as_str())
        .collect();
    assert_eq!(names, expected);
}

#[then(expr = "attribute {word} should have type {word}")]
fn attribute_type(world: &mut DaqDioWorld, name: String, value_type: String) {
    let attr = registry(world)
        .attribute(&name)
        .unwrap_or_else(|| panic!("attribute {} not registered", name));
    assert_eq!(format!("{:?}", attr.value_type), value_type);
}

#[then(expr = "the value should be {string}")]
fn value_should_be(world: &mut DaqDioWorld, expected: String) {
    assert_eq!(world.last_value.as_deref(), Some(expected.as_str()));
}

#[then(expr = "the read should fail with {string}")]
fn read_should_fail(world: &mut DaqDioWorld, expected: String) {
    let error = world.last_error.as_deref().expect("read did not fail");
    assert!(
        error.contains(&expected),
        "error {:?} does not contain {:?}",
        error,
        expected
    );
}
