use crate::tests::{EnvGuard, setup_config_dir};
use crate::{Config, LogLevel};

use std::str::FromStr;

use googletest::assert_that;
use googletest::prelude::{anything, eq, err};
use log::LevelFilter;
use serial_test::serial;

#[test]
#[serial]
fn given_absolute_database_path_when_validate_then_error() {
    // Given
    let (_temp, _dir, _pass) = setup_config_dir();
    let _db = EnvGuard::set("ML_DATABASE_PATH", "/etc/mailer.db");

    // When
    let result = Config::load().unwrap().validate();

    // Then
    assert_that!(result, err(anything()));
}

#[test]
#[serial]
fn given_parent_traversal_in_database_path_when_validate_then_error() {
    // Given
    let (_temp, _dir, _pass) = setup_config_dir();
    let _db = EnvGuard::set("ML_DATABASE_PATH", "../escape.db");

    // When
    let result = Config::load().unwrap().validate();

    // Then
    assert_that!(result, err(anything()));
}

#[test]
#[serial]
fn given_unparseable_port_env_when_load_then_default_kept() {
    // Given
    let (_temp, _dir, _pass) = setup_config_dir();
    let _port = EnvGuard::set("ML_SERVER_PORT", "not-a-port");

    // When
    let config = Config::load().unwrap();

    // Then
    assert_that!(config.server.port, eq(crate::DEFAULT_PORT));
}

#[test]
fn given_unknown_log_level_when_parsed_then_info() {
    let level = LogLevel::from_str("chatty").unwrap();

    assert_that!(level.0, eq(LevelFilter::Info));
}

#[test]
fn given_mixed_case_log_level_when_parsed_then_recognised() {
    let level = LogLevel::from_str("DeBuG").unwrap();

    assert_that!(level.0, eq(LevelFilter::Debug));
}

#[test]
#[serial]
fn given_log_level_in_toml_when_load_then_applied() {
    // Given
    let (temp, _dir, _pass) = setup_config_dir();
    std::fs::write(
        temp.path().join("config.toml"),
        "[logging]\nlevel = \"warn\"\nfile = \"mailer.log\"",
    )
    .unwrap();

    // When
    let config = Config::load().unwrap();

    // Then
    assert_that!(config.logging.level.0, eq(LevelFilter::Warn));
    assert_that!(config.logging.file.as_deref(), eq(Some("mailer.log")));
}
