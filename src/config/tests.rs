use super::*;

fn parse(args: &[&str]) -> CliArgs {
    CliArgs::parse_from(args)
}

#[test]
fn defaults_follow_the_viewer_components() {
    let settings = Settings::from_raw(RawSettings::default()).expect("valid settings");

    assert_eq!(settings.viewer.api_url.as_str(), "http://localhost:8080/api");
    assert_eq!(settings.viewer.list_max_content_length, 300);
    assert_eq!(settings.viewer.single_max_content_length, 800);
    assert!(settings.viewer.show_login_prompt);
    assert!(settings.viewer.show_published_only);
    assert_eq!(settings.viewer.page.get(), 1);
    assert_eq!(settings.viewer.per_page.get(), 10);
    assert_eq!(settings.http.timeout, Duration::from_secs(10));
    assert_eq!(settings.logging.level, LevelFilter::INFO);
}

#[test]
fn cli_overrides_take_highest_precedence() {
    let mut raw = RawSettings::default();
    raw.viewer.per_page = Some(25);
    raw.logging.level = Some("info".to_string());

    let cli = parse(&[
        "agoat",
        "--log-level",
        "debug",
        "list",
        "--per-page",
        "5",
        "--page",
        "3",
    ]);
    raw.apply_cli(&cli);
    let settings = Settings::from_raw(raw).expect("valid settings");

    assert_eq!(settings.viewer.per_page.get(), 5);
    assert_eq!(settings.viewer.page.get(), 3);
    assert_eq!(settings.logging.level, LevelFilter::DEBUG);
}

#[test]
fn zero_preview_length_is_rejected() {
    let mut raw = RawSettings::default();
    raw.viewer.list_max_content_length = Some(0);

    let err = Settings::from_raw(raw).expect_err("zero length rejected");
    assert!(matches!(
        err,
        LoadError::Invalid {
            key: "viewer.list_max_content_length",
            ..
        }
    ));
}

#[test]
fn negative_length_from_cli_is_rejected() {
    let mut raw = RawSettings::default();
    let cli = parse(&["agoat", "show", "12", "--max-content-length", "-1"]);
    raw.apply_cli(&cli);

    let err = Settings::from_raw(raw).expect_err("negative length rejected");
    assert!(matches!(
        err,
        LoadError::Invalid {
            key: "viewer.single_max_content_length",
            ..
        }
    ));
}

#[test]
fn api_url_must_be_http() {
    let mut raw = RawSettings::default();
    raw.viewer.api_url = Some("ftp://example.com/api".into());
    assert!(Settings::from_raw(raw).is_err());
}

#[test]
fn list_all_disables_published_filter() {
    let mut raw = RawSettings::default();
    raw.apply_cli(&parse(&["agoat", "list", "--all", "--authenticated"]));
    let settings = Settings::from_raw(raw).expect("valid settings");
    assert!(!settings.viewer.show_published_only);
    assert!(!settings.viewer.listing().published_filter(true));
    assert!(settings.viewer.listing().published_filter(false));
}

#[test]
fn global_flags_apply_after_subcommand() {
    let cli = parse(&[
        "agoat",
        "preview",
        "post.md",
        "--show-login-prompt",
        "false",
        "--log-json",
        "true",
    ]);
    let mut raw = RawSettings::default();
    raw.apply_cli(&cli);
    let settings = Settings::from_raw(raw).expect("valid settings");

    assert!(!settings.viewer.gate().show_login_prompt);
    assert!(matches!(settings.logging.format, LogFormat::Json));
}

#[test]
fn preview_length_override_targets_selected_budget() {
    let mut raw = RawSettings::default();
    raw.apply_cli(&parse(&[
        "agoat",
        "preview",
        "--list",
        "--max-content-length",
        "120",
    ]));
    let settings = Settings::from_raw(raw).expect("valid settings");
    assert_eq!(settings.viewer.list_max_content_length, 120);
    assert_eq!(settings.viewer.single_max_content_length, 800);
}

#[test]
fn parse_show_arguments() {
    let cli = parse(&["agoat", "show", "42", "--slug", "hello-world", "--authenticated"]);
    match cli.command {
        Command::Show(show) => {
            assert_eq!(show.id.as_deref(), Some("42"));
            assert_eq!(show.slug.as_deref(), Some("hello-world"));
            assert!(show.viewer.authenticated);
        }
        _ => panic!("wrong command parsed"),
    }
}

#[test]
fn parse_show_by_path() {
    let cli = parse(&["agoat", "show", "--path", "hello-world/42"]);
    match cli.command {
        Command::Show(show) => {
            assert_eq!(show.id, None);
            assert_eq!(show.path.as_deref(), Some("hello-world/42"));
        }
        _ => panic!("wrong command parsed"),
    }
}

#[test]
fn show_requires_id_or_path() {
    assert!(CliArgs::try_parse_from(["agoat", "show"]).is_err());
}
