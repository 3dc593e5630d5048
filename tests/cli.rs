use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use assert_cmd::Command;
use inspector::cli::{self, CliArgs, PluginCall};
use inspector::display::{DisplaySession, Viewer};
use inspector::PluginRegistry;
use predicates::prelude::*;

/// `inspector` with an empty home, so no user configuration is picked up.
fn inspector_cmd(home: &tempfile::TempDir) -> Command {
    let mut cmd = Command::cargo_bin("inspector").unwrap();
    cmd.env("HOME", home.path()).env_remove("RUST_LOG");
    cmd
}

fn parse(args: &[&str]) -> Result<CliArgs, clap::Error> {
    let argv = std::iter::once("inspector").chain(args.iter().copied());
    cli::parse_from(&PluginRegistry::with_builtin(), argv)
}

#[test]
fn parses_files_plugin_calls_and_flags() {
    let args = parse(&[
        "a.json",
        "--SineGenerator",
        "generate",
        "--RandomGenerator",
        "generate",
        r#"{"days": 2}"#,
        "b.json",
        "--config",
        "cfg.yaml",
        "-v",
    ])
    .unwrap();
    assert_eq!(args.files, vec![PathBuf::from("a.json"), PathBuf::from("b.json")]);
    assert_eq!(
        args.plugin_calls,
        vec![
            PluginCall {
                plugin: "SineGenerator".into(),
                command: "generate".into(),
                config: None,
            },
            PluginCall {
                plugin: "RandomGenerator".into(),
                command: "generate".into(),
                config: Some(r#"{"days": 2}"#.into()),
            },
        ]
    );
    assert_eq!(args.config, Some(PathBuf::from("cfg.yaml")));
    assert!(args.verbose);
}

#[test]
fn repeated_plugin_flag_gives_one_call_each() {
    let args = parse(&[
        "--RandomGenerator",
        "generate",
        r#"{"days": 1}"#,
        "--RandomGenerator",
        "generate",
        r#"{"days": 3}"#,
    ])
    .unwrap();
    let configs: Vec<_> = args.plugin_calls.iter().map(|c| c.config.clone()).collect();
    assert_eq!(
        configs,
        vec![Some(r#"{"days": 1}"#.into()), Some(r#"{"days": 3}"#.into())]
    );
}

#[test]
fn unknown_plugin_flag_is_a_usage_error() {
    let err = parse(&["--NoSuchPlugin", "generate"]).unwrap_err();
    assert_eq!(err.kind(), clap::error::ErrorKind::UnknownArgument);
    assert!(parse(&["--RandomGenerator"]).is_err());
}

#[derive(Clone, Default)]
struct Recorder {
    names: Rc<RefCell<Vec<String>>>,
}

impl Viewer for Recorder {
    fn show(&mut self, session: DisplaySession) -> inspector::Result<()> {
        self.names
            .borrow_mut()
            .extend(session.model.items().iter().map(|it| it.name.clone()));
        Ok(())
    }
}

#[test]
fn run_loads_files_then_plugins() {
    let dir = tempfile::tempdir().unwrap();
    let data = dir.path().join("data.json");
    std::fs::write(&data, r#"{"first": [1, 2, 3]}"#).unwrap();
    let cfg = dir.path().join("cfg.yaml");
    std::fs::write(&cfg, "title: test\n").unwrap();

    let args = CliArgs {
        files: vec![data],
        plugin_calls: vec![PluginCall {
            plugin: "SineGenerator".into(),
            command: "generate".into(),
            config: Some(r#"{"n_samples": 10, "scales": [1]}"#.into()),
        }],
        config: Some(cfg),
        verbose: false,
    };
    let viewer = Recorder::default();
    cli::run(args, PluginRegistry::with_builtin(), viewer.clone()).unwrap();
    assert_eq!(*viewer.names.borrow(), vec!["first".to_string(), "sine 1 (x1)".to_string()]);
}

#[test]
fn help_lists_plugin_flags() {
    let home = tempfile::tempdir().unwrap();
    inspector_cmd(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--RandomGenerator"))
        .stdout(predicate::str::contains("--SineGenerator"));
}

#[test]
fn unknown_plugin_exits_with_usage_error() {
    let home = tempfile::tempdir().unwrap();
    inspector_cmd(&home)
        .args(["--NoSuchPlugin", "generate", "{}"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--NoSuchPlugin"));
}

#[test]
fn malformed_json_exits_with_failure() {
    let home = tempfile::tempdir().unwrap();
    inspector_cmd(&home)
        .args(["--RandomGenerator", "generate", r#"{"days": 2"#])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("not valid JSON"));
}

#[test]
fn unknown_config_key_exits_with_failure() {
    let home = tempfile::tempdir().unwrap();
    inspector_cmd(&home)
        .args(["--RandomGenerator", "generate", r#"{"dayz": 2}"#])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("unknown field"));
}

#[test]
fn unknown_command_exits_with_failure() {
    let home = tempfile::tempdir().unwrap();
    inspector_cmd(&home)
        .args(["--RandomGenerator", "frobnicate"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("unknown command"));
}

#[test]
fn bad_data_file_exits_with_failure() {
    let home = tempfile::tempdir().unwrap();
    let data = home.path().join("bad.json");
    std::fs::write(&data, r#"[1, "two"]"#).unwrap();
    inspector_cmd(&home)
        .arg(&data)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid input"));

    inspector_cmd(&home)
        .arg(home.path().join("missing.json"))
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Failed to access file"));
}

#[test]
fn missing_config_file_exits_with_failure() {
    let home = tempfile::tempdir().unwrap();
    inspector_cmd(&home)
        .args(["--config"])
        .arg(home.path().join("nope.yaml"))
        .assert()
        .code(1);
}
