use crate::Config;
use crate::tests::{EnvGuard, setup_config_dir};

use googletest::assert_that;
use googletest::prelude::{anything, err, ok};
use serial_test::serial;

#[test]
#[serial]
fn given_zero_sends_per_second_when_validate_then_error() {
    // Given
    let (_temp, _dir, _pass) = setup_config_dir();
    let _rate = EnvGuard::set("ML_RATE_LIMIT_SENDS_PER_SECOND", "0");

    // When
    let result = Config::load().unwrap().validate();

    // Then
    assert_that!(result, err(anything()));
}

#[test]
#[serial]
fn given_burst_over_max_when_validate_then_error() {
    // Given
    let (_temp, _dir, _pass) = setup_config_dir();
    let _burst = EnvGuard::set("ML_RATE_LIMIT_BURST", "1001");

    // When
    let result = Config::load().unwrap().validate();

    // Then
    assert_that!(result, err(anything()));
}

#[test]
#[serial]
fn given_valid_rate_limit_when_validate_then_ok() {
    // Given
    let (_temp, _dir, _pass) = setup_config_dir();
    let _rate = EnvGuard::set("ML_RATE_LIMIT_SENDS_PER_SECOND", "14");
    let _burst = EnvGuard::set("ML_RATE_LIMIT_BURST", "3");

    // When
    let result = Config::load().unwrap().validate();

    // Then
    assert_that!(result, ok(anything()));
}
