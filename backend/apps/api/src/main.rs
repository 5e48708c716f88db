//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors; request errors are rendered by the
//! submission crate.

use anyhow::{Context, bail};
use axum::{
    Router, http,
    http::{Method, header},
};
use sqlx::postgres::PgPoolOptions;
use std::env;
use std::net::SocketAddr;
use std::time::Duration;
use submission::{
    HttpLinkChecker, MailApiConfig, PgSubmissionRepository, ReviewerMailer, SubmissionConfig,
    submission_router,
};
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_PORT: u16 = 31113;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,submission=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Database connection
    let database_url = env::var("DATABASE_URL").context("DATABASE_URL must be set in environment")?;

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    let config = load_submission_config()?;
    let mailer = load_mailer()?;
    let link_checker = HttpLinkChecker::new(config.probe_timeout)?;

    tracing::info!(
        content_base_path = %config.content_base_path,
        verify_reachability = config.verify_reachability,
        "Submission service configured"
    );

    // CORS configuration
    let frontend_origins = env::var("FRONTEND_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:3000,http://127.0.0.1:3000".to_string());

    let allowed_origins: Vec<http::HeaderValue> = frontend_origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([Method::POST, Method::OPTIONS]))
        .allow_headers(AllowHeaders::list([header::CONTENT_TYPE, header::ACCEPT]))
        .allow_credentials(true);

    // Build router
    let app = Router::new()
        .nest(
            "/submitted_hyperlink",
            submission_router(
                PgSubmissionRepository::new(pool.clone()),
                mailer,
                link_checker,
                config,
            ),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let port = match env::var("PORT") {
        Ok(port) => port.parse().context("PORT must be a number")?,
        Err(_) => DEFAULT_PORT,
    };
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

fn load_submission_config() -> anyhow::Result<SubmissionConfig> {
    let base = if cfg!(debug_assertions) {
        SubmissionConfig::development()
    } else {
        // In production, the secret is shared with the host application
        let secret_b64 =
            env::var("SESSION_SECRET").context("SESSION_SECRET must be set in production")?;
        let secret_bytes = platform::crypto::from_base64_standard(secret_b64.trim())?;
        let Ok(secret) = <[u8; 32]>::try_from(secret_bytes.as_slice()) else {
            bail!("SESSION_SECRET must decode to 32 bytes");
        };
        SubmissionConfig {
            session_secret: secret,
            ..SubmissionConfig::default()
        }
    };

    let verify_reachability = env::var("VERIFY_LINK_REACHABILITY")
        .map(|v| matches!(v.trim(), "1" | "true" | "yes"))
        .unwrap_or(base.verify_reachability);

    Ok(SubmissionConfig {
        content_base_path: env::var("CONTENT_BASE_PATH").unwrap_or(base.content_base_path.clone()),
        verify_reachability,
        ..base
    })
}

fn load_mailer() -> anyhow::Result<ReviewerMailer> {
    let Ok(api_key) = env::var("MAIL_API_KEY") else {
        tracing::warn!("MAIL_API_KEY not set, reviewer mail will only be logged");
        return Ok(ReviewerMailer::log_only());
    };

    let mailer = ReviewerMailer::http(MailApiConfig {
        endpoint: env::var("MAIL_API_URL")
            .unwrap_or_else(|_| "https://api.resend.com/emails".to_string()),
        api_key,
        from: env::var("MAIL_FROM").context("MAIL_FROM must be set when MAIL_API_KEY is")?,
        timeout: Duration::from_secs(30),
    })?;

    Ok(mailer)
}
