use std::{path::Path, process, sync::Arc};

use agoat::{
    application::{
        error::AppError,
        listing::ListingService,
        pipeline::PreviewPipeline,
        repos::PostSource,
    },
    config::{self, ListArgs, PreviewArgs, Settings, ShowArgs},
    domain::{slug::PostPath, viewer::ViewerContext},
    infra::{error::InfraError, http::PostsClient, telemetry},
};
use agoat_api_types::PostId;
use serde::Serialize;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tracing::{Dispatch, Level, dispatcher, error, info};
use tracing_subscriber::fmt as tracing_fmt;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        report_application_error(&error);
        eprintln!("{}", error.presentation_message());
        process::exit(error.exit_code());
    }
}

fn report_application_error(error: &AppError) {
    if dispatcher::has_been_set() {
        error!(error = %error, "application error");
        return;
    }

    let subscriber = tracing_fmt()
        .with_writer(std::io::stderr)
        .with_max_level(Level::ERROR)
        .finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(error = %error, "application error");
    });
}

async fn run() -> Result<(), AppError> {
    let (cli_args, settings) = config::load_with_cli()
        .map_err(|err| AppError::configuration(err.to_string()))?;

    telemetry::init(&settings.logging).map_err(AppError::from)?;

    info!(
        target = "agoat::startup",
        api_url = %settings.viewer.api_url,
        list_max_content_length = settings.viewer.list_max_content_length,
        single_max_content_length = settings.viewer.single_max_content_length,
        "Configuration resolved"
    );

    match cli_args.command {
        config::Command::List(args) => run_list(&settings, args).await,
        config::Command::Show(args) => run_show(&settings, args).await,
        config::Command::Preview(args) => run_preview(&settings, args).await,
    }
}

fn build_listing_service(settings: &Settings) -> Result<ListingService, AppError> {
    let client = PostsClient::new(&settings.viewer.api_url, settings.http.timeout)?;
    let source: Arc<dyn PostSource> = Arc::new(client);
    let pipeline = PreviewPipeline::with_default_renderer(settings.viewer.gate());
    Ok(ListingService::new(
        source,
        pipeline,
        settings.viewer.listing(),
    ))
}

async fn run_list(settings: &Settings, args: ListArgs) -> Result<(), AppError> {
    let service = build_listing_service(settings)?;
    let listing = service
        .list(settings.viewer.page.get(), args.viewer.authenticated)
        .await?;
    print_json(&listing).await
}

async fn run_show(settings: &Settings, args: ShowArgs) -> Result<(), AppError> {
    let service = build_listing_service(settings)?;
    let authenticated = args.viewer.authenticated;

    let view = match (args.path.as_deref(), args.id) {
        (Some(raw), _) => {
            let path = PostPath::parse(raw)?;
            service.view_path(&path, authenticated).await?
        }
        (None, Some(id)) => {
            let id = PostId::from(id);
            if id.is_empty() {
                return Err(AppError::validation("post id must not be empty"));
            }
            service
                .view(&id, args.slug.as_deref(), authenticated)
                .await?
        }
        (None, None) => return Err(AppError::validation("either an id or --path is required")),
    };

    print_json(&view).await
}

async fn run_preview(settings: &Settings, args: PreviewArgs) -> Result<(), AppError> {
    let content = read_markdown(&args.file).await?;
    let limit = if args.list {
        settings.viewer.list_max_content_length
    } else {
        settings.viewer.single_max_content_length
    };

    let pipeline = PreviewPipeline::with_default_renderer(settings.viewer.gate());
    let viewer = ViewerContext::new(args.viewer.authenticated, limit);
    let rendered = pipeline.render(&content, &viewer)?;

    print_json(&rendered).await
}

async fn read_markdown(path: &Path) -> Result<String, AppError> {
    if path.as_os_str() == "-" {
        let mut buffer = String::new();
        tokio::io::stdin()
            .read_to_string(&mut buffer)
            .await
            .map_err(InfraError::from)?;
        return Ok(buffer);
    }

    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(InfraError::from)?;
    Ok(content)
}

async fn print_json<T: Serialize>(value: &T) -> Result<(), AppError> {
    let mut rendered = serde_json::to_string_pretty(value)
        .map_err(|err| AppError::unexpected(format!("failed to encode output: {err}")))?;
    rendered.push('\n');

    let mut stdout = tokio::io::stdout();
    stdout
        .write_all(rendered.as_bytes())
        .await
        .map_err(InfraError::from)?;
    stdout.flush().await.map_err(InfraError::from)?;
    Ok(())
}
