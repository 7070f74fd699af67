//! End-to-end behaviour of config loading, relocation and rendering.

mod common;

use common::TempConfig;
use limbo::config::loader::{
    load_config, load_config_observed, load_or_init, parse_config, save_config,
};
use limbo::config::node::{render, ConfigNode};
use limbo::config::validation::validate_schema;
use limbo::config::{
    default_of, ConfigError, ConfigHandle, ForwardMode, LimboConfig, ListenerConfig,
    ResolutionTrace, Source, World,
};

#[test]
fn test_partial_document_overrides_only_given_fields() {
    let config = parse_config(
        r#"
bind-ports = [25565, 25575]
forward-mode = "GUARD"
forward-key = "abc|def"
"#,
    )
    .unwrap();

    let mut expected = default_of::<LimboConfig>();
    expected.listener.bind_ports = vec![25565, 25575];
    expected.listener.forward_mode = ForwardMode::Guard;
    expected.listener.forward_key = "abc|def".to_string();
    assert_eq!(config, expected);
}

#[test]
fn test_unknown_enum_name_is_rejected_with_path() {
    let err = parse_config("forward-mode = \"UNKNOWN_MODE\"").unwrap_err();
    match err {
        ConfigError::InvalidFieldValue { path, expected, .. } => {
            assert_eq!(path, "forward-mode");
            assert!(expected.contains("GUARD"), "{expected}");
        }
        other => panic!("expected InvalidFieldValue, got {other:?}"),
    }
}

#[test]
fn test_wrong_type_is_rejected_not_defaulted() {
    let err = parse_config("[motd]\nmax = \"lots\"").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidFieldValue { ref path, .. } if path == "motd.max"));
}

#[test]
fn test_out_of_range_float_is_rejected() {
    let err = parse_config("[position]\nyaw = 1e39").unwrap_err();
    match err {
        ConfigError::InvalidFieldValue { path, .. } => assert_eq!(path, "position.yaw"),
        other => panic!("expected InvalidFieldValue, got {other:?}"),
    }
}

#[test]
fn test_relocated_key_reads_like_current_key() {
    let old = parse_config("listener-name = \"lobby\"").unwrap();
    let new = parse_config("name = \"lobby\"").unwrap();
    assert_eq!(old, new);
    assert_eq!(old.listener.name, "lobby");
}

#[test]
fn test_current_key_wins_over_relocated_key() {
    let config = parse_config("name = \"current\"\nlistener-name = \"legacy\"").unwrap();
    assert_eq!(config.listener.name, "current");
}

#[test]
fn test_camel_case_revision_is_read() {
    let config = parse_config(
        r#"
bindAddress = "127.0.0.1"
port = 25570
forwardMode = "LEGACY"
playerName = "Guest"
disableFall = false

[motd]
showBrand = true

[message]
actionBar = "welcome"

[message.title]
title = "hi"
subTitle = "there"
fadeIn = 10
stay = 40
fadeOut = 10
"#,
    )
    .unwrap();

    let listener = &config.listener;
    assert_eq!(listener.bind_address, "127.0.0.1");
    assert_eq!(listener.bind_ports, vec![25570]);
    assert_eq!(listener.forward_mode, ForwardMode::Legacy);
    assert_eq!(listener.player_name, "Guest");
    assert!(!listener.disable_fall);
    assert!(listener.motd.show_brand);
    assert_eq!(listener.message.action_bar, "welcome");
    assert_eq!(listener.message.title.sub_title, "there");
    assert_eq!(listener.message.title.fade_in, 10);
    assert!(listener.message.title.enabled());
}

#[test]
fn test_empty_sequence_is_not_absent() {
    let mut present = ResolutionTrace::new();
    let file = TempConfig::with("[message]\nchat = []");
    let config = load_config_observed(&file.path, &mut present).unwrap();
    assert!(config.listener.message.chat.is_empty());
    assert_eq!(present.source_of("message.chat"), Some(&Source::Current));

    let mut absent = ResolutionTrace::new();
    load_config_observed(&TempConfig::with("").path, &mut absent).unwrap();
    assert_eq!(absent.source_of("message.chat"), Some(&Source::Default));
}

#[test]
fn test_trace_reports_relocation_source() {
    let mut trace = ResolutionTrace::new();
    load_config_observed(&TempConfig::with("forwardKey = \"secret\"").path, &mut trace).unwrap();

    assert_eq!(
        trace.source_of("forward-key"),
        Some(&Source::Relocated {
            from: "forwardKey".to_string()
        })
    );
    assert_eq!(trace.relocated().count(), 1);
}

#[test]
fn test_defaults_survive_render_and_parse() {
    let defaults = default_of::<LimboConfig>();
    let text = render(&defaults);
    assert_eq!(parse_config(&text).unwrap(), defaults);
}

#[test]
fn test_largest_durations_survive_render_and_parse() {
    let mut config = default_of::<LimboConfig>();
    config.listener.timeout = i64::MAX;
    config.listener.delay = i64::MAX;

    let back = parse_config(&render(&config)).unwrap();
    assert_eq!(back.listener.timeout, i64::MAX);
    assert_eq!(back, config);
}

#[test]
fn test_customized_config_survives_render_and_parse() {
    let mut config = default_of::<LimboConfig>();
    config.listener.world = World::TheEnd;
    config.listener.motd.sample = Vec::new();
    config.listener.message.chat = vec!["hello".to_string(), "".to_string()];
    config.listener.position.y = 64.5;

    let mut lobby = ListenerConfig::default();
    lobby.name = "lobby".to_string();
    lobby.bind_address = "::".to_string();
    lobby.bind_ports = vec![25566, 25567];
    lobby.message.tab.header = vec!["limbo".to_string()];
    config.listeners.push(lobby);

    let text = render(&config);
    assert!(text.contains("[[listeners]]"), "{text}");
    assert_eq!(parse_config(&text).unwrap(), config);
}

#[test]
fn test_render_includes_descriptions() {
    let text = render(&default_of::<LimboConfig>());
    assert!(text.contains("# The name must be unique."), "{text}");
    assert!(text.contains("# GUARD: Handle the forward from BungeeGuard."), "{text}");
    assert!(text.contains("actionBar = \"\""), "{text}");
    assert!(
        text.contains("# If none of the top-level listener keys are present, the first entry"),
        "{text}"
    );
}

#[test]
fn test_load_or_init_writes_defaults_once() {
    let file = TempConfig::missing();

    let config = load_or_init(&file.path).unwrap();
    assert_eq!(config, LimboConfig::default());
    assert!(file.path.exists());

    file.write("name = \"edited\"");
    let reloaded = load_or_init(&file.path).unwrap();
    assert_eq!(reloaded.listener.name, "edited");
    assert_eq!(file.read(), "name = \"edited\"");
}

#[test]
fn test_missing_file_is_an_io_error() {
    let file = TempConfig::missing();
    assert!(matches!(load_config(&file.path), Err(ConfigError::Io { .. })));
}

#[test]
fn test_migrate_rewrites_legacy_keys() {
    let file = TempConfig::with("listener-name = \"old\"\nport = 25570\nunrelated = 1\n");

    let config = load_config(&file.path).unwrap();
    save_config(&file.path, &config).unwrap();

    let text = file.read();
    assert!(text.contains("name = \"old\""), "{text}");
    assert!(text.contains("bind-ports = ["), "{text}");
    assert_eq!(config.listener.bind_ports, vec![25570]);
    assert!(!text.contains("listener-name"), "{text}");
    assert!(!text.contains("unrelated"), "{text}");

    let mut trace = ResolutionTrace::new();
    assert_eq!(load_config_observed(&file.path, &mut trace).unwrap(), config);
    assert_eq!(trace.relocated().count(), 0);
}

#[test]
fn test_legacy_listener_list_becomes_primary_and_extra() {
    let config = parse_config(
        r#"
[[listeners]]
listener-name = "first"
port = 25570

[[listeners]]
name = "second"
"#,
    )
    .unwrap();

    assert_eq!(config.listener.name, "first");
    assert_eq!(config.listener.bind_ports, vec![25570]);
    assert_eq!(config.listeners.len(), 1);
    assert_eq!(config.listeners[0].name, "second");
}

#[test]
fn test_listener_list_alone_replaces_primary() {
    let config = parse_config("[[listeners]]\nname = \"lobby\"").unwrap();
    assert_eq!(config.listener.name, "lobby");
    assert!(config.listeners.is_empty());
    assert!(config.listener_named("main").is_none());
}

#[test]
fn test_declared_schema_passes_validation() {
    assert_eq!(validate_schema(LimboConfig::schema()), Ok(()));
}

#[test]
fn test_handle_reload_picks_up_file_changes() {
    let file = TempConfig::with("name = \"main\"");
    let handle = ConfigHandle::open(&file.path).unwrap();
    let before = handle.current();

    file.write("name = \"main\"\n\n[[listeners]]\nname = \"lobby\"\n");
    let report = handle.reload().unwrap();

    assert_eq!(report.added, vec!["lobby"]);
    assert_eq!(report.unchanged, vec!["main"]);
    assert_eq!(before.listeners.len(), 0);
    assert_eq!(handle.current().listeners.len(), 1);

    file.write("name = 5");
    assert!(handle.reload().is_err());
    assert_eq!(handle.current().listeners.len(), 1);
}
