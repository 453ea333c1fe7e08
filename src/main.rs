use std::{
    io::{self, Write},
    process,
    sync::Arc,
};

use cms_pages::{
    application::{
        articles::ArticleService,
        error::AppError,
        render::{ProfileOptions, article_rules},
    },
    config,
    infra::{
        cms::GraphQlContentSource,
        error::InfraError,
        http::{self, HttpState},
        telemetry,
    },
    presentation::views::LayoutChrome,
};
use tracing::{Dispatch, Level, dispatcher, error, info, warn};
use tracing_subscriber::fmt as tracing_fmt;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        report_application_error(&error);
        process::exit(1);
    }
}

fn report_application_error(error: &AppError) {
    if dispatcher::has_been_set() {
        error!(error = %error, "application error");
        return;
    }

    let subscriber = tracing_fmt()
        .with_max_level(Level::ERROR)
        .with_writer(io::stderr)
        .finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(error = %error, "application error");
    });
}

async fn run() -> Result<(), AppError> {
    let (cli_args, settings) = config::load_with_cli()
        .map_err(|err| AppError::unexpected(format!("failed to load configuration: {err}")))?;

    let command = cli_args
        .command
        .unwrap_or(config::Command::Serve(Box::<config::ServeArgs>::default()));

    telemetry::init(&settings.logging)?;

    let source = GraphQlContentSource::new(&settings.cms)?;
    info!(
        target: "cms_pages::startup",
        endpoint = %source.endpoint(),
        environment = settings.cms.environment.as_deref().unwrap_or("primary"),
        "content source ready"
    );
    let articles = Arc::new(ArticleService::new(
        Arc::new(source),
        Arc::new(article_rules(ProfileOptions::from(&settings.render))),
    ));

    match command {
        config::Command::Serve(_) => run_serve(settings, articles).await,
        config::Command::Render(args) => run_render(&articles, &args.slug).await,
        config::Command::List(_) => run_list(&articles).await,
    }
}

async fn run_serve(settings: config::Settings, articles: Arc<ArticleService>) -> Result<(), AppError> {
    let state = HttpState::new(articles, LayoutChrome::new(settings.site.title.clone()))
        .with_dump_route(settings.server.dump_route);
    let router = http::build_router(state);

    let listener = tokio::net::TcpListener::bind(settings.server.addr)
        .await
        .map_err(InfraError::from)?;
    info!(
        target: "cms_pages::startup",
        addr = %settings.server.addr,
        "listening"
    );

    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|err| AppError::unexpected(format!("server error: {err}")))?;

    info!(target: "cms_pages::startup", "server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        warn!(error = %err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}

async fn run_render(articles: &ArticleService, slug: &str) -> Result<(), AppError> {
    let view = articles.article_page(slug).await?;

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", view.content_html).map_err(InfraError::from)?;
    Ok(())
}

async fn run_list(articles: &ArticleService) -> Result<(), AppError> {
    let listing = articles.listing().await?;

    let mut stdout = io::stdout().lock();
    for link in listing.articles {
        writeln!(stdout, "{}\t{}", link.slug, link.title).map_err(InfraError::from)?;
    }
    Ok(())
}
