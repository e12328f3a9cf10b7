use carepot::config::{AppConfig, DatabaseSection, LogFormat};

#[test]
fn defaults_match_device_expectations() {
    let config = AppConfig::default();

    assert_eq!(config.server.port, 3000);
    assert_eq!(config.server.host, "0.0.0.0");
    assert!(config.server.permissive_cors);
    assert!(!config.pot.reject_unknown_instructions);
    assert_eq!(config.logging.format, LogFormat::Json);

    let options = config
        .database_runtime()
        .expect("default database section should be valid");
    assert_eq!(options.path.to_str(), Some("./database.db"));
    assert_eq!(options.max_connections, 5);
}

#[test]
fn empty_database_path_is_rejected() {
    let config = AppConfig {
        database: DatabaseSection {
            path: "   ".into(),
            ..Default::default()
        },
        ..Default::default()
    };

    assert!(
        config.database_runtime().is_err(),
        "Expected blank database path to fail validation"
    );
}

#[test]
fn zero_connections_is_rejected() {
    let config = AppConfig {
        database: DatabaseSection {
            max_connections: 0,
            ..Default::default()
        },
        ..Default::default()
    };

    assert!(config.database_runtime().is_err());
}

#[test]
fn database_path_is_trimmed() {
    let config = AppConfig {
        database: DatabaseSection {
            path: " /var/lib/carepot/state.db ".into(),
            max_connections: 2,
        },
        ..Default::default()
    };

    let options = config.database_runtime().unwrap();
    assert_eq!(options.path.to_str(), Some("/var/lib/carepot/state.db"));
    assert_eq!(options.max_connections, 2);
}

#[test]
fn sections_deserialize_from_toml() {
    let raw = r#"
        [server]
        port = 8080

        [database]
        path = "/tmp/pot.db"

        [pot]
        reject_unknown_instructions = true

        [logging]
        level = "debug"
        format = "text"
    "#;

    let config: AppConfig = config::Config::builder()
        .add_source(config::File::from_str(raw, config::FileFormat::Toml))
        .build()
        .unwrap()
        .try_deserialize()
        .unwrap();

    assert_eq!(config.server.port, 8080);
    assert_eq!(config.server.host, "0.0.0.0");
    assert_eq!(config.database.path, "/tmp/pot.db");
    assert_eq!(config.database.max_connections, 5);
    assert!(config.pot.reject_unknown_instructions);
    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.logging.format, LogFormat::Text);
}
