use anyhow::{Context, Result};
use clap::Parser;
use prompt_gallery::{
    adapters::inbound::http::{middleware::RateLimitConfig, router::create_router},
    app::{AppBuilder, AppConfig, RepositoryBackend},
    CloudinaryConfig, MediaFallback,
};
use std::{net::SocketAddr, time::Duration};
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "gallery-server")]
#[command(about = "Server for the AI image community gallery", long_about = None)]
struct Cli {
    /// Server port to listen on
    #[arg(short, long, env = "PORT", default_value = "8080")]
    port: u16,

    /// Server host to bind to
    #[arg(long, env = "SERVER_HOST", default_value = "0.0.0.0")]
    host: String,

    /// Repository backend type (memory or database)
    #[arg(long, env = "REPOSITORY_BACKEND", default_value = "memory")]
    repository_backend: String,

    /// Connection string for the record store (PostgreSQL)
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    /// API key for the image generation provider
    #[arg(long, env = "OPENAI_API_KEY")]
    openai_api_key: Option<String>,

    /// Generation model override
    #[arg(long, env = "OPENAI_MODEL")]
    openai_model: Option<String>,

    /// Cloudinary cloud name
    #[arg(long, env = "CLOUDINARY_CLOUD_NAME")]
    cloudinary_cloud_name: Option<String>,

    /// Cloudinary API key
    #[arg(long, env = "CLOUDINARY_API_KEY")]
    cloudinary_api_key: Option<String>,

    /// Cloudinary API secret
    #[arg(long, env = "CLOUDINARY_API_SECRET")]
    cloudinary_api_secret: Option<String>,

    /// Fail publishes when the media upload fails, instead of falling back
    /// to inline storage with a warning
    #[arg(long, env = "STRICT_MEDIA", default_value = "false")]
    strict_media: bool,

    /// Requests allowed per client address per window on the post routes
    #[arg(long, env = "RATE_LIMIT_MAX", default_value = "100")]
    rate_limit_max: u32,

    /// Rate limit window in seconds
    #[arg(long, env = "RATE_LIMIT_WINDOW_SECS", default_value = "900")]
    rate_limit_window_secs: u64,

    /// Log level
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,
}

impl Cli {
    fn to_app_config(&self) -> Result<AppConfig> {
        let repository_backend = match self.repository_backend.as_str() {
            "memory" => RepositoryBackend::InMemory,
            "database" | "db" => {
                let connection_string = self
                    .database_url
                    .clone()
                    .context("DATABASE_URL is required for the database backend")?;
                RepositoryBackend::Database { connection_string }
            }
            other => anyhow::bail!("Unknown repository backend: {}", other),
        };

        let cloudinary = match (
            self.cloudinary_cloud_name.clone(),
            self.cloudinary_api_key.clone(),
            self.cloudinary_api_secret.clone(),
        ) {
            (Some(cloud_name), Some(api_key), Some(api_secret)) => Some(CloudinaryConfig {
                cloud_name,
                api_key,
                api_secret,
            }),
            (None, None, None) => None,
            _ => {
                warn!("partial Cloudinary credentials supplied, media uploads will fail");
                None
            }
        };

        let media_fallback = if self.strict_media {
            MediaFallback::Strict
        } else {
            MediaFallback::InlineWithWarning
        };

        Ok(AppConfig {
            repository_backend,
            openai_api_key: self.openai_api_key.clone(),
            openai_model: self.openai_model.clone(),
            cloudinary,
            media_fallback,
            rate_limit: RateLimitConfig {
                max_requests: self.rate_limit_max,
                window: Duration::from_secs(self.rate_limit_window_secs),
            },
        })
    }

    fn init_logging(&self) {
        let filter = EnvFilter::try_new(&self.log_level)
            .unwrap_or_else(|_| EnvFilter::new("info"));

        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists
    dotenvy::dotenv().ok();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    cli.init_logging();

    info!("Starting gallery server");
    info!("Repository backend: {}", cli.repository_backend);
    if cli.openai_api_key.is_none() {
        warn!("OPENAI_API_KEY is not set, generation requests will fail");
    }

    // Create app configuration
    let config = cli.to_app_config()?;
    let rate_limit = config.rate_limit.clone();

    // Build the application
    let services = AppBuilder::new()
        .with_config(config)
        .build()
        .await
        .context("Failed to build application")?;

    // Create the router
    let router = create_router(services.into_state(), rate_limit);

    // Bind to address
    let addr: SocketAddr = format!("{}:{}", cli.host, cli.port).parse()?;
    let listener = TcpListener::bind(addr).await?;

    info!("Server listening on http://{}", addr);
    info!("API endpoints available:");
    info!("- GET  /api/v1/post: fetch all posts");
    info!("- POST /api/v1/post: publish a post");
    info!("- GET  /api/v1/dalle: generation API greeting");
    info!("- POST /api/v1/dalle: generate an image");

    // Start the server; connect info feeds the per-address rate limiter
    axum::serve(
        listener,
        router.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .context("Failed to start server")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::parse_from([
            "gallery-server",
            "--port",
            "9090",
            "--repository-backend",
            "memory",
            "--rate-limit-max",
            "5",
        ]);

        assert_eq!(cli.port, 9090);
        assert_eq!(cli.repository_backend, "memory");
        assert_eq!(cli.rate_limit_max, 5);
    }

    #[test]
    fn test_memory_config() {
        let cli = Cli::parse_from(["gallery-server"]);
        let config = cli.to_app_config().unwrap();

        match config.repository_backend {
            RepositoryBackend::InMemory => (),
            _ => panic!("Expected InMemory backend"),
        }
        assert_eq!(config.media_fallback, MediaFallback::InlineWithWarning);
    }

    #[test]
    fn test_database_backend_requires_a_connection_string() {
        let cli = Cli::parse_from(["gallery-server", "--repository-backend", "database"]);
        assert!(cli.to_app_config().is_err());
    }

    #[test]
    fn test_strict_media_flag() {
        let cli = Cli::parse_from(["gallery-server", "--strict-media"]);
        let config = cli.to_app_config().unwrap();
        assert_eq!(config.media_fallback, MediaFallback::Strict);
    }
}
