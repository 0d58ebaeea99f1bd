#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use synthpulse_core::error::PulseError;
use synthpulse_server::config;

#[test]
fn deny_unknown_fields_nested() {
    let bad = r#"
version: 1
server:
  listen: "0.0.0.0:8000"
updater:
  interval_mz: 5000 # typo should fail
"#;

    let err = config::load_from_str(bad).expect_err("must fail");
    assert!(matches!(err, PulseError::InvalidConfig(_)));
}

#[test]
fn ok_minimal_config() {
    let ok = "version: 1\n";
    let cfg = config::load_from_str(ok).expect("must parse");
    assert_eq!(cfg.version, 1);
    assert_eq!(cfg.server.listen, "0.0.0.0:8000");
    assert_eq!(cfg.updater.interval_ms, 5000);
    assert_eq!(cfg.updater.min_active_users, 50);
    assert_eq!(cfg.updater.max_active_users, 200);
    assert_eq!(cfg.updater.seed, None);
}

#[test]
fn rejects_unsupported_version() {
    let err = config::load_from_str("version: 2\n").expect_err("must fail");
    assert!(matches!(err, PulseError::InvalidConfig(_)));
}

#[test]
fn rejects_interval_out_of_range() {
    let bad = r#"
version: 1
updater:
  interval_ms: 50
"#;
    let err = config::load_from_str(bad).expect_err("must fail");
    assert!(matches!(err, PulseError::InvalidConfig(_)));
}

#[test]
fn rejects_inverted_user_bounds() {
    let bad = r#"
version: 1
updater:
  min_active_users: 300
  max_active_users: 200
"#;
    let err = config::load_from_str(bad).expect_err("must fail");
    assert!(matches!(err, PulseError::InvalidConfig(_)));
}

#[test]
fn parses_fixed_seed() {
    let ok = r#"
version: 1
updater:
  seed: 42
"#;
    let cfg = config::load_from_str(ok).expect("must parse");
    assert_eq!(cfg.updater.seed, Some(42));
}
