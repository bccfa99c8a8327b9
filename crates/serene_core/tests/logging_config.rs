use serene_core::config::{LOG_DIR_ENV, LOG_LEVEL_ENV};
use serene_core::{logging_status, CoreConfig};
use std::time::{SystemTime, UNIX_EPOCH};

#[test]
fn configured_level_and_dir_drive_logging() {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system time should be after unix epoch")
        .as_nanos();
    let log_dir = std::env::temp_dir().join(format!(
        "serene-config-logs-{}-{nanos}",
        std::process::id()
    ));
    let log_dir_text = log_dir.to_string_lossy().into_owned();

    let config = CoreConfig::from_lookup(|name| match name {
        LOG_LEVEL_ENV => Some("ERROR".to_string()),
        LOG_DIR_ENV => Some(log_dir_text.clone()),
        _ => None,
    })
    .unwrap();
    assert_eq!(config.log_level, "error");

    config.start_logging().expect("logging should start");
    config.start_logging().expect("restart with same config is a no-op");

    let (level, dir) = logging_status().expect("logging should be active");
    assert_eq!(level, "error");
    assert_eq!(dir, log_dir);
    assert!(log_dir.is_dir());
}
