mod support;

use std::time::Duration;

use dockshift::app_dirs::APP_DIR_NAME;
use dockshift::config::{self, CONFIG_FILE_NAME, ConfigError, DockConfig};
use dockshift::egui_app::DockApp;
use dockshift::feedback::Easing;
use support::dockshift_env::DockshiftEnvGuard;

#[test]
fn config_home_without_file_yields_defaults() {
    let temp = tempfile::tempdir().expect("create tempdir");
    let _env = DockshiftEnvGuard::set_config_home(temp.path().to_path_buf());

    let loaded = config::load_or_default().expect("load config");

    assert_eq!(loaded, DockConfig::default());
    assert!(temp.path().join(APP_DIR_NAME).is_dir());
    assert_eq!(
        config::config_path().expect("config path"),
        temp.path().join(APP_DIR_NAME).join(CONFIG_FILE_NAME)
    );
}

#[test]
fn config_home_file_drives_dock_settings() {
    let temp = tempfile::tempdir().expect("create tempdir");
    let _env = DockshiftEnvGuard::set_config_home(temp.path().to_path_buf());
    let app_dir = temp.path().join(APP_DIR_NAME);
    std::fs::create_dir_all(&app_dir).expect("create app dir");
    std::fs::write(
        app_dir.join(CONFIG_FILE_NAME),
        r#"
[animation]
duration_ms = 120
lifted_scale = 1.5
easing = "linear"

[gesture]
hold_delay_ms = 300

[dock]
items = ["call", "photo", "settings"]
"#,
    )
    .expect("write config");

    let loaded = config::load_or_default().expect("load config");
    let settings = loaded.dock_settings();

    assert_eq!(settings.feedback.duration, Duration::from_millis(120));
    assert_eq!(settings.feedback.lifted_scale, 1.5);
    assert_eq!(settings.feedback.easing, Easing::Linear);
    assert_eq!(settings.gesture.hold_delay, Duration::from_millis(300));
    assert_eq!(loaded.dock.items, vec!["call", "photo", "settings"]);
    assert!(DockApp::new(&loaded).is_ok());
}

#[test]
fn malformed_file_surfaces_parse_error() {
    let temp = tempfile::tempdir().expect("create tempdir");
    let _env = DockshiftEnvGuard::set_config_home(temp.path().to_path_buf());
    let app_dir = temp.path().join(APP_DIR_NAME);
    std::fs::create_dir_all(&app_dir).expect("create app dir");
    std::fs::write(app_dir.join(CONFIG_FILE_NAME), "[dock]\nitems = 3\n").expect("write config");

    let err = config::load_or_default().unwrap_err();

    assert!(matches!(err, ConfigError::ParseToml { .. }));
}
