use axum::http::{header::AUTHORIZATION, HeaderMap, HeaderValue};
use chrono::{Duration, Utc};
use test_utils::{
    builder::TestBuilder,
    factory::{self, user::UserFactory},
};

use crate::server::{
    error::{auth::AuthError, AppError},
    middleware::auth::AuthGuard,
    model::user::Role,
    service::auth::token::TokenService,
};

mod require;

fn tokens() -> TokenService {
    TokenService::new("middleware-test-secret", Duration::days(1))
}

fn bearer(token: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {}", token)).unwrap(),
    );
    headers
}
