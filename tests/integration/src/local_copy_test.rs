//! End-to-end runs of the copy action against the local host
//!
//! Controller files, the staging directory and the destination all live in
//! one temporary directory: `files/` plays the controller, `stage/` the
//! remote temp dir and `host/` the managed host.

use pretty_assertions::assert_eq;
use prov_core::{CopyAction, LocalConnection, ResultRecord, RunnerOptions, TaskContext};
use prov_fs::compute_content_checksum;
use prov_test_utils::{Fixture, LocalHarness};
use serde_json::json;
use std::sync::Arc;

struct Host {
    fx: Fixture,
    conn: LocalConnection,
}

impl Host {
    fn new() -> Self {
        // Fails harmlessly once an earlier test has installed it
        let _ = prov_core::logging::init();
        let fx = Fixture::new();
        fx.mkdir("stage");
        fx.mkdir("host");
        Self {
            fx,
            conn: LocalConnection::new(),
        }
    }

    fn action(&self, options: RunnerOptions) -> CopyAction {
        CopyAction::new(
            options.with_basedir(self.fx.path("files")),
            Arc::new(LocalHarness::new()),
        )
    }

    fn copy(&self, options: RunnerOptions, args: &str) -> ResultRecord {
        self.copy_with(options, args, &TaskContext::new())
    }

    fn copy_with(&self, options: RunnerOptions, args: &str, context: &TaskContext) -> ResultRecord {
        self.action(options).run(
            &self.conn,
            &self.fx.path_str("stage/"),
            "copy",
            args,
            context,
        )
    }
}

#[test]
fn first_run_installs_and_second_run_is_unchanged() {
    let host = Host::new();
    host.fx.write("files/motd", "welcome\n");
    let args = format!("src=motd dest={}", host.fx.path_str("host/motd"));

    let first = host.copy(RunnerOptions::new(), &args);
    assert!(!first.is_failed(), "{first:?}");
    assert!(first.is_changed());
    assert_eq!(
        first.extra.get("checksum"),
        Some(&json!(compute_content_checksum("welcome\n").as_str()))
    );
    assert_eq!(host.fx.read("host/motd"), "welcome\n");
    assert!(host.fx.exists("stage/motd"));

    let second = host.copy(RunnerOptions::new(), &args);
    assert!(!second.is_failed(), "{second:?}");
    assert!(!second.is_changed());
    assert_eq!(
        second.extra.get("path"),
        Some(&json!(host.fx.path_str("host/motd")))
    );
}

#[test]
fn changed_source_is_pushed_again() {
    let host = Host::new();
    host.fx.write("files/motd", "new\n");
    host.fx.write("host/motd", "old\n");
    let args = format!("src=motd dest={}", host.fx.path_str("host/motd"));

    let result = host.copy(RunnerOptions::new(), &args);

    assert!(result.is_changed());
    assert_eq!(host.fx.read("host/motd"), "new\n");
}

#[test]
fn existing_directory_destination_receives_source_name() {
    let host = Host::new();
    host.fx.write("files/app.conf", "port = 80\n");
    host.fx.mkdir("host/conf");
    let args = format!("src=app.conf dest={}", host.fx.path_str("host/conf"));

    let result = host.copy(RunnerOptions::new(), &args);

    assert!(!result.is_failed(), "{result:?}");
    assert_eq!(host.fx.read("host/conf/app.conf"), "port = 80\n");
}

#[test]
fn trailing_separator_destination_receives_source_name() {
    let host = Host::new();
    host.fx.write("files/app.conf", "port = 80\n");
    let args = format!("src=app.conf dest={}", host.fx.path_str("host/new-dir/"));

    let result = host.copy(RunnerOptions::new(), &args);

    assert!(!result.is_failed(), "{result:?}");
    assert_eq!(host.fx.read("host/new-dir/app.conf"), "port = 80\n");
}

#[test]
fn check_mode_leaves_destination_untouched() {
    let host = Host::new();
    host.fx.write("files/motd", "new\n");
    host.fx.write("host/motd", "old\n");
    let args = format!("src=motd dest={}", host.fx.path_str("host/motd"));

    let result = host.copy(RunnerOptions::new().with_check(true), &args);

    assert_eq!(result, ResultRecord::changed(true));
    assert_eq!(host.fx.read("host/motd"), "old\n");
    assert!(!host.fx.exists("stage/motd"));
}

#[test]
fn first_available_file_falls_through_to_existing_candidate() {
    let host = Host::new();
    host.fx.write("files/default.conf", "default\n");
    let context = TaskContext::new()
        .with_var("env", "staging")
        .with_first_available_file(["{{ env }}.conf", "default.conf"]);
    let args = format!("dest={}", host.fx.path_str("host/app.conf"));

    let result = host.copy_with(RunnerOptions::new(), &args, &context);

    assert!(!result.is_failed(), "{result:?}");
    assert_eq!(host.fx.read("host/app.conf"), "default\n");
}

#[test]
fn unprivileged_sudo_runs_fixup_and_installs() {
    let host = Host::new();
    host.fx.write("files/secret", "token\n");
    let args = format!("src=secret dest={}", host.fx.path_str("host/secret"));

    let result = host.copy(RunnerOptions::new().with_sudo("deploy"), &args);

    assert!(!result.is_failed(), "{result:?}");
    assert_eq!(host.fx.read("host/secret"), "token\n");
}

#[test]
fn missing_source_fails_without_touching_host() {
    let host = Host::new();
    let args = format!("src=nope dest={}", host.fx.path_str("host/nope"));

    let result = host.copy(RunnerOptions::new(), &args);

    assert!(result.is_failed());
    assert!(result.msg.unwrap().starts_with("could not find src="));
    assert!(!host.fx.exists("host/nope"));
}

#[test]
fn source_name_with_whitespace_is_installed() {
    let host = Host::new();
    host.fx.write("files/my file.txt", "spaced\n");
    let args = format!("src='my file.txt' dest={}", host.fx.path_str("host/"));

    let result = host.copy(RunnerOptions::new(), &args);

    assert!(!result.is_failed(), "{result:?}");
    assert!(result.is_changed());
    assert!(host.fx.exists("stage/my file.txt"));
    assert_eq!(host.fx.read("host/my file.txt"), "spaced\n");
}
