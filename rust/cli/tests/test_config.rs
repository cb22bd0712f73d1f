use std::io::Write;

use serde_json::Value;
use serial_test::serial;

const ENV_KEYS: &[&str] = &[
    "SHOWDOWN_CONFIG",
    "SHOWDOWN_SEED",
    "SHOWDOWN_DURATION",
    "SHOWDOWN_JOIN_CUTOFF",
    "SHOWDOWN_MAX_PARTICIPANTS",
    "SHOWDOWN_MAX_BETTORS",
    "SHOWDOWN_FEE_PERCENT",
];

fn clear_env() {
    for key in ENV_KEYS {
        unsafe {
            std::env::remove_var(key);
        }
    }
}

fn cfg() -> (i32, String, String) {
    let mut out = Vec::new();
    let mut err = Vec::new();
    let code = showdown_cli::run(["showdown", "cfg"], &mut out, &mut err);
    (
        code,
        String::from_utf8(out).unwrap(),
        String::from_utf8(err).unwrap(),
    )
}

#[test]
#[serial]
fn cfg_shows_defaults() {
    clear_env();
    let (code, out, _) = cfg();
    assert_eq!(code, 0);
    let json: Value = serde_json::from_str(&out).unwrap();
    assert!(json["seed"]["value"].is_null());
    assert_eq!(json["join_cutoff_secs"]["value"], 30);
    assert_eq!(json["max_participants"]["value"], 20);
    assert_eq!(json["max_bettors"]["value"], 9);
    assert_eq!(json["fee_percent"]["value"], 1);
    assert_eq!(json["duration_secs"]["value"], 300);
    for key in ["seed", "fee_percent", "duration_secs"] {
        assert_eq!(json[key]["source"], "default", "{key}");
    }
}

#[test]
#[serial]
fn env_overrides_file() {
    clear_env();
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "seed = 11\nfee_percent = 3\nmax_bettors = 4").unwrap();
    unsafe {
        std::env::set_var("SHOWDOWN_CONFIG", file.path());
        std::env::set_var("SHOWDOWN_FEE_PERCENT", "5");
    }

    let (code, out, _) = cfg();
    clear_env();
    assert_eq!(code, 0);
    let json: Value = serde_json::from_str(&out).unwrap();
    assert_eq!(json["seed"]["value"], 11);
    assert_eq!(json["seed"]["source"], "file");
    assert_eq!(json["max_bettors"]["value"], 4);
    assert_eq!(json["max_bettors"]["source"], "file");
    assert_eq!(json["fee_percent"]["value"], 5);
    assert_eq!(json["fee_percent"]["source"], "env");
    assert_eq!(json["join_cutoff_secs"]["source"], "default");
}

#[test]
#[serial]
fn invalid_env_value_is_rejected() {
    clear_env();
    unsafe {
        std::env::set_var("SHOWDOWN_SEED", "not-a-number");
    }
    let (code, out, err) = cfg();
    clear_env();
    assert_eq!(code, 2);
    assert!(out.is_empty());
    assert!(err.contains("SHOWDOWN_SEED"));
}

#[test]
#[serial]
fn fee_above_hundred_is_rejected() {
    clear_env();
    unsafe {
        std::env::set_var("SHOWDOWN_FEE_PERCENT", "101");
    }
    let (code, _, err) = cfg();
    clear_env();
    assert_eq!(code, 2);
    assert!(err.contains("Configuration error"));
}

#[test]
#[serial]
fn duration_not_beyond_cutoff_is_rejected() {
    clear_env();
    unsafe {
        std::env::set_var("SHOWDOWN_DURATION", "20");
    }
    let (code, _, err) = cfg();
    clear_env();
    assert_eq!(code, 2);
    assert!(err.contains("duration_secs"));
}

#[test]
#[serial]
fn malformed_config_file_is_rejected() {
    clear_env();
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "fee_percent = \"lots\"").unwrap();
    unsafe {
        std::env::set_var("SHOWDOWN_CONFIG", file.path());
    }
    let (code, _, err) = cfg();
    clear_env();
    assert_eq!(code, 2);
    assert!(err.contains("cannot parse config file"));
}
