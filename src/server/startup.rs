use std::sync::Arc;

use axum::{response::IntoResponse, Router};
use chrono::Duration;
use sea_orm::DatabaseConnection;
use tower_governor::{governor::GovernorConfigBuilder, GovernorError, GovernorLayer};
use tracing_subscriber::EnvFilter;

use crate::server::{
    config::Config,
    error::{config::ConfigError, AppError},
    service::{
        auth::token::TokenService,
        email::{Mailer, SmtpMailer},
    },
    state::AppState,
};

/// Installs the `fmt` subscriber, filtered by `RUST_LOG` (default `info`).
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

/// Connects to the Sqlite database and runs pending migrations.
///
/// Establishes a connection pool to the Sqlite database using the connection string from
/// configuration, then automatically runs all pending SeaORM migrations to ensure the database
/// schema is up-to-date. This function must complete successfully before the application can
/// access the database.
///
/// # Arguments
/// - `config` - Application configuration containing the database URL
///
/// # Returns
/// - `Ok(DatabaseConnection)` - Connected database with migrations applied
/// - `Err(Error)` - Failed to connect to database or run migrations
pub async fn connect_to_database(config: &Config) -> Result<DatabaseConnection, AppError> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Builds the shared state: token service, SMTP mailer and the database handle.
///
/// # Returns
/// - `Ok(AppState)` - State ready to hand to the router
/// - `Err(AppError::ConfigErr)` - `EMAIL_FROM` is not a valid mailbox
pub fn build_state(config: &Config, db: DatabaseConnection) -> Result<AppState, AppError> {
    let tokens = TokenService::new(
        &config.jwt_secret,
        Duration::days(config.jwt_expires_in_days),
    );
    let mailer: Arc<dyn Mailer> = Arc::new(SmtpMailer::new(&config.email)?);

    Ok(AppState::new(
        db,
        tokens,
        mailer,
        config.bcrypt_cost,
        config.app_url.clone(),
    ))
}

/// Limits each client IP to `max` requests in any `window_secs` window.
///
/// Half of the quota is an initial burst and the rest refills evenly across the window, so a
/// client never gets more than `max` requests into one window. Clients are keyed on the peer
/// address from `ConnectInfo`. Rejections are the JSON 429 with a `Retry-After` header.
///
/// # Returns
/// - `Ok(Router)` - `api` wrapped in the limiter
/// - `Err(AppError::ConfigErr)` - Zero requests or a zero-length window
pub fn rate_limit(
    api: Router<AppState>,
    max: u32,
    window_secs: u64,
) -> Result<Router<AppState>, AppError> {
    let invalid = || {
        ConfigError::InvalidRateLimit(format!("{} requests per {} seconds", max, window_secs))
    };
    if max == 0 || window_secs == 0 {
        return Err(invalid().into());
    }

    let refill = max / 2;
    let (burst, period) = if refill == 0 {
        (1, std::time::Duration::from_secs(window_secs))
    } else {
        let window_ms = window_secs.saturating_mul(1000);
        (
            max - refill,
            std::time::Duration::from_millis(window_ms.div_ceil(u64::from(refill))),
        )
    };

    let quota = GovernorConfigBuilder::default()
        .period(period)
        .burst_size(burst)
        .finish()
        .ok_or_else(invalid)?;

    let layer = GovernorLayer::new(Arc::new(quota)).error_handler(|err| match err {
        GovernorError::TooManyRequests { wait_time, .. } => AppError::TooManyRequests {
            retry_after: wait_time,
        }
        .into_response(),
        other => AppError::InternalError(other.to_string()).into_response(),
    });

    Ok(api.layer(layer))
}

/// Resolves on Ctrl+C, or SIGTERM on unix.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutting down");
}
