//! Application state shared across all request handlers.
//!
//! `AppState` is built once during startup and cloned into every handler through Axum's
//! state extraction. Every field is cheap to clone: the database handle is a pool, the
//! token service holds reference-counted keys and the mailer sits behind an `Arc`.

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::server::service::{auth::token::TokenService, email::Mailer};

#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub db: DatabaseConnection,

    /// Signs and verifies access tokens.
    pub tokens: TokenService,

    /// Outgoing email transport.
    ///
    /// SMTP in production, a recording mailer in tests.
    pub mailer: Arc<dyn Mailer>,

    /// bcrypt cost used when hashing new passwords.
    pub password_cost: u32,

    /// Public base URL, used to build links in emails.
    pub app_url: String,
}

impl AppState {
    /// Creates a new application state with the provided dependencies.
    ///
    /// # Arguments
    /// - `db` - Database connection pool
    /// - `tokens` - Token signer and verifier
    /// - `mailer` - Outgoing email transport
    /// - `password_cost` - bcrypt cost factor
    /// - `app_url` - Application base URL
    pub fn new(
        db: DatabaseConnection,
        tokens: TokenService,
        mailer: Arc<dyn Mailer>,
        password_cost: u32,
        app_url: String,
    ) -> Self {
        Self {
            db,
            tokens,
            mailer,
            password_cost,
            app_url,
        }
    }
}
