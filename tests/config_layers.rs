use std::io::Write;

use agoat::config::{self, CliArgs, LoadError};
use clap::Parser;
use tempfile::NamedTempFile;

fn config_file(contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".toml")
        .tempfile()
        .expect("tmp file");
    file.write_all(contents.as_bytes()).expect("write config");
    file
}

#[test]
fn file_values_are_loaded_and_cli_wins() {
    let file = config_file(
        r#"
[viewer]
api_url = "https://blog.example.com/api"
list_max_content_length = 120
show_login_prompt = false
per_page = 4

[http]
timeout_seconds = 3
"#,
    );
    let path = file.path().to_string_lossy().into_owned();

    let cli = CliArgs::parse_from([
        "agoat",
        "--config-file",
        path.as_str(),
        "list",
        "--per-page",
        "6",
    ]);
    let settings = config::load(&cli).expect("settings load");

    assert_eq!(settings.viewer.api_url.as_str(), "https://blog.example.com/api");
    assert_eq!(settings.viewer.list_max_content_length, 120);
    assert_eq!(settings.viewer.single_max_content_length, 800);
    assert!(!settings.viewer.show_login_prompt);
    assert_eq!(settings.viewer.per_page.get(), 6);
    assert_eq!(settings.http.timeout.as_secs(), 3);
}

#[test]
fn negative_limit_in_file_is_rejected() {
    let file = config_file("[viewer]\nsingle_max_content_length = -10\n");
    let path = file.path().to_string_lossy().into_owned();

    let cli = CliArgs::parse_from(["agoat", "--config-file", path.as_str(), "preview"]);
    let err = config::load(&cli).expect_err("negative limit rejected");

    assert!(matches!(
        err,
        LoadError::Invalid {
            key: "viewer.single_max_content_length",
            ..
        }
    ));
}

#[test]
fn missing_config_file_is_an_error() {
    let cli = CliArgs::parse_from([
        "agoat",
        "--config-file",
        "/nonexistent/agoat.toml",
        "preview",
    ]);
    assert!(matches!(config::load(&cli), Err(LoadError::Build(_))));
}
