//! Runner options loaded from config files drive the copy action

use predicates::prelude::*;
use pretty_assertions::assert_eq;
use prov_core::{CopyAction, LocalConnection, RunnerOptions, TaskContext};
use prov_fs::NormalizedPath;
use prov_test_utils::{Fixture, LocalHarness};
use std::sync::Arc;

#[test]
fn toml_yaml_and_json_load_the_same_options() {
    let fx = Fixture::new();
    let toml = fx.write(
        "opts.toml",
        "basedir = \"/srv/play\"\ncheck = true\nsudo = true\nsudo_user = \"deploy\"\n",
    );
    let yaml = fx.write(
        "opts.yaml",
        "basedir: /srv/play\ncheck: true\nsudo: true\nsudo_user: deploy\n",
    );
    let json = fx.write(
        "opts.json",
        r#"{"basedir": "/srv/play", "check": true, "sudo": true, "sudo_user": "deploy"}"#,
    );

    let expected = RunnerOptions::new()
        .with_basedir("/srv/play")
        .with_check(true)
        .with_sudo("deploy");
    for path in [toml, yaml, json] {
        let loaded = RunnerOptions::load(&NormalizedPath::new(&path)).unwrap();
        assert_eq!(loaded, expected, "loading {}", path.display());
    }
}

#[test]
fn empty_file_yields_defaults() {
    let fx = Fixture::new();
    let path = fx.write("opts.toml", "");

    let loaded = RunnerOptions::load(&NormalizedPath::new(&path)).unwrap();

    assert_eq!(loaded, RunnerOptions::default());
    assert!(!loaded.escalates_to_unprivileged());
}

#[test]
fn unknown_extension_is_rejected() {
    let fx = Fixture::new();
    let path = fx.write("opts.ini", "check = true\n");

    let err = RunnerOptions::load(&NormalizedPath::new(&path)).unwrap_err();

    assert!(predicate::str::contains("ini").eval(&err.to_string()));
}

#[test]
fn check_mode_from_config_prevents_install() {
    let fx = Fixture::new();
    fx.write("files/motd", "hello\n");
    fx.mkdir("stage");
    let config = fx.write(
        "opts.toml",
        &format!("basedir = {:?}\ncheck = true\n", fx.path_str("files")),
    );
    let options = RunnerOptions::load(&NormalizedPath::new(&config)).unwrap();
    let action = CopyAction::new(options, Arc::new(LocalHarness::new()));

    let result = action.run(
        &LocalConnection::new(),
        &fx.path_str("stage/"),
        "copy",
        &format!("src=motd dest={}", fx.path_str("host/motd")),
        &TaskContext::new(),
    );

    assert!(result.is_changed());
    assert!(!fx.exists("host/motd"));
}
