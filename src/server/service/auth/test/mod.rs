use chrono::Duration;
use sea_orm::{DatabaseConnection, EntityTrait};
use test_utils::{
    builder::TestBuilder,
    factory::{
        self,
        user::{UserFactory, DEFAULT_PASSWORD, TEST_HASH_COST},
    },
};

use crate::server::{
    error::{auth::AuthError, AppError},
    model::user::{Role, SignupParams},
    service::{
        auth::{token::TokenService, AuthService},
        email::RecordingMailer,
    },
};


const APP_URL: &str = "http://localhost:3000";

fn tokens() -> TokenService {
    TokenService::new("test-secret-that-is-long-enough", Duration::days(90))
}

fn service<'a>(db: &'a DatabaseConnection, tokens: &'a TokenService) -> AuthService<'a> {
    AuthService::new(db, tokens, TEST_HASH_COST)
}

/// Pulls the plain reset token out of the last link a mailer delivered.
fn sent_reset_token(mailer: &RecordingMailer) -> String {
    let sent = mailer.sent();
    let text = &sent.last().unwrap().text;
    let start = text.find("/resetPassword/").unwrap() + "/resetPassword/".len();

    text[start..]
        .split_whitespace()
        .next()
        .unwrap()
        .to_string()
}
