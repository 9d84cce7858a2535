//! Step definitions for device_lifecycle.feature

use crate::world::DaqDioWorld;
use cucumber::{given, then, when};
use daq_dio::{MockDaqLibrary, MockDeviceSpec};

// ============================================================================
// Given steps
// ============================================================================

#[given(expr = "a simulated DAQ library with a USB-1208FS-Plus device {string}")]
fn library_with_device(world: &mut DaqDioWorld, serial: String) {
    world.library = MockDaqLibrary::new(vec![MockDeviceSpec::usb_1208fs(&serial)]);
}

#[given("a simulated DAQ library with no devices")]
fn library_without_devices(world: &mut DaqDioWorld) {
    world.library = MockDaqLibrary::empty();
}

#[given(expr = "a simulated DAQ library with an analog-only device {string}")]
fn library_with_analog_device(world: &mut DaqDioWorld, serial: String) {
    world.library = MockDaqLibrary::new(vec![MockDeviceSpec::analog_only(&serial)]);
}

#[given(expr = "the descriptor index is {int}")]
fn descriptor_index(world: &mut DaqDioWorld, index: usize) {
    world.config.hardware.descriptor_index = index;
}

// ============================================================================
// When steps
// ============================================================================

#[when("the device is initialized")]
fn initialize_device(world: &mut DaqDioWorld) {
    world.build_device();
    world.device_mut().init_device();
}

#[when("the device is deleted")]
fn delete_device(world: &mut DaqDioWorld) {
    world.device_mut().delete_device();
}

#[when("the device is dropped")]
fn drop_device(world: &mut DaqDioWorld) {
    world.device = None;
}

// ============================================================================
// Then steps
// ============================================================================

#[then(expr = "the lifecycle state should be {string}")]
fn lifecycle_state_should_be(world: &mut DaqDioWorld, expected: String) {
    assert_eq!(format!("{:?}", world.device().lifecycle()), expected);
}

#[then(expr = "the device state should be {string}")]
fn device_state_should_be(world: &mut DaqDioWorld, expected: String) {
    assert_eq!(world.device().state().as_str(), expected);
}

#[then(expr = "the status should be {string}")]
fn status_should_be(world: &mut DaqDioWorld, expected: String) {
    assert_eq!(world.device().status(), expected);
}

#[then(expr = "the status should contain {string}")]
fn status_should_contain(world: &mut DaqDioWorld, expected: String) {
    let status = world.device().status();
    assert!(
        status.contains(&expected),
        "status {:?} does not contain {:?}",
        status,
        expected
    );
}

#[then("the device should be connected")]
fn device_should_be_connected(world: &mut DaqDioWorld) {
    assert!(world.device().is_connected());
}

#[then("the device should not be connected")]
fn device_should_not_be_connected(world: &mut DaqDioWorld) {
    assert!(!world.device().is_connected());
}

#[then(expr = "the hardware should have been connected {int} time(s)")]
fn hardware_connects(world: &mut DaqDioWorld, expected: usize) {
    assert_eq!(world.library.stats(0).connects, expected);
}

#[then(expr = "the hardware should have been disconnected {int} time(s)")]
fn hardware_disconnects(world: &mut DaqDioWorld, expected: usize) {
    assert_eq!(world.library.stats(0).disconnects, expected);
}

#[then(expr = "the hardware should have been released {int} time(s)")]
fn hardware_releases(world: &mut DaqDioWorld, expected: usize) {
    assert_eq!(world.library.stats(0).releases, expected);
}
