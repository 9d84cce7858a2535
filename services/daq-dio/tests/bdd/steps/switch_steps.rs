//! Step definitions for alpaca_switch.feature

use crate::world::DaqDioWorld;
use ascom_alpaca::api::{Device, Switch};
use ascom_alpaca::ASCOMErrorCode;
use cucumber::{given, then, when};

// ============================================================================
// Given steps
// ============================================================================

#[given("the device is published as an Alpaca switch")]
fn published_as_switch(world: &mut DaqDioWorld) {
    world.build_device();
    let device = world.device_mut();
    device.init_device();
    device.initialize_dynamic_attributes();
    world.build_switch_device();
}

// ============================================================================
// When steps
// ============================================================================

#[when("I connect the switch device")]
async fn connect_switch_device(world: &mut DaqDioWorld) {
    world.switch_device().set_connected(true).await.unwrap();
}

#[when("I try to connect the switch device")]
async fn try_connect_switch_device(world: &mut DaqDioWorld) {
    match world.switch_device().set_connected(true).await {
        Ok(()) => {
            world.last_error = None;
            world.last_error_code = None;
        }
        Err(e) => {
            world.last_error = Some(e.to_string());
            world.last_error_code = Some(e.code.raw());
        }
    }
}

#[when(expr = "I read switch {int}")]
async fn read_switch(world: &mut DaqDioWorld, id: usize) {
    match world.switch_device().get_switch_value(id).await {
        Ok(value) => {
            world.last_value = Some(value.to_string());
            world.last_error = None;
            world.last_error_code = None;
        }
        Err(e) => {
            world.last_value = None;
            world.last_error = Some(e.to_string());
            world.last_error_code = Some(e.code.raw());
        }
    }
}

#[when(expr = "I try to set switch {int} on")]
async fn try_set_switch(world: &mut DaqDioWorld, id: usize) {
    match world.switch_device().set_switch(id, true).await {
        Ok(()) => world.last_error_code = None,
        Err(e) => {
            world.last_error = Some(e.to_string());
            world.last_error_code = Some(e.code.raw());
        }
    }
}

#[when(expr = "I invoke the {string} action")]
async fn invoke_action(world: &mut DaqDioWorld, action: String) {
    match world.switch_device().action(action, String::new()).await {
        Ok(value) => {
            world.last_value = Some(value);
            world.last_error_code = None;
        }
        Err(e) => {
            world.last_value = None;
            world.last_error = Some(e.to_string());
            world.last_error_code = Some(e.code.raw());
        }
    }
}

// ============================================================================
// Then steps
// ============================================================================

#[then(expr = "the switch device should report {int} switches")]
async fn switch_count(world: &mut DaqDioWorld, expected: usize) {
    assert_eq!(world.switch_device().max_switch().await.unwrap(), expected);
}

#[then(expr = "switch {int} should be named {string}")]
async fn switch_name(world: &mut DaqDioWorld, id: usize, expected: String) {
    assert_eq!(
        world.switch_device().get_switch_name(id).await.unwrap(),
        expected
    );
}

#[then(expr = "switch {int} should not be writable")]
async fn switch_not_writable(world: &mut DaqDioWorld, id: usize) {
    assert!(!world.switch_device().can_write(id).await.unwrap());
}

#[then(expr = "the action result should be {string}")]
fn action_result(world: &mut DaqDioWorld, expected: String) {
    assert_eq!(world.last_value.as_deref(), Some(expected.as_str()));
}

#[then("the operation should fail with not connected")]
fn fails_not_connected(world: &mut DaqDioWorld) {
    assert_eq!(
        world.last_error_code,
        Some(ASCOMErrorCode::NOT_CONNECTED.raw())
    );
}

#[then("the operation should fail with not implemented")]
fn fails_not_implemented(world: &mut DaqDioWorld) {
    assert_eq!(
        world.last_error_code,
        Some(ASCOMErrorCode::NOT_IMPLEMENTED.raw())
    );
}

#[then("the operation should fail with invalid value")]
fn fails_invalid_value(world: &mut DaqDioWorld) {
    assert_eq!(
        world.last_error_code,
        Some(ASCOMErrorCode::INVALID_VALUE.raw())
    );
}

#[then("the operation should fail with action not implemented")]
fn fails_action_not_implemented(world: &mut DaqDioWorld) {
    assert_eq!(
        world.last_error_code,
        Some(ASCOMErrorCode::ACTION_NOT_IMPLEMENTED.raw())
    );
}

#[then(expr = "the error should mention {string}")]
fn error_mentions(world: &mut DaqDioWorld, expected: String) {
    let error = world.last_error.as_deref().expect("no error recorded");
    assert!(
        error.contains(&expected),
        "error {:?} does not contain {:?}",
        error,
        expected
    );
}
