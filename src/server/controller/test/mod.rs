use std::{net::SocketAddr, sync::Arc};

use axum::{
    body::Body,
    extract::ConnectInfo,
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::Duration;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use test_utils::{
    builder::TestBuilder,
    context::TestContext,
    factory::{
        self,
        tour::TourFactory,
        user::{UserFactory, DEFAULT_PASSWORD, TEST_HASH_COST},
    },
};
use tower::ServiceExt;

use crate::server::{
    config::Environment,
    error::AppError,
    router, startup,
    service::{auth::token::TokenService, email::RecordingMailer},
    state::AppState,
};


const BODY_LIMIT: usize = 10 * 1024;

/// A migrated in-memory database with the router wired to it.
struct TestApp {
    /// Keeps the database alive for the duration of the test.
    _context: TestContext,
    state: AppState,
    mailer: Arc<RecordingMailer>,
    environment: Environment,
}

impl TestApp {
    async fn new() -> Self {
        Self::with_environment(Environment::Production).await
    }

    async fn with_environment(environment: Environment) -> Self {
        let context = TestBuilder::new().with_all_tables().build().await.unwrap();
        let db = context.db.clone().unwrap();
        let mailer = Arc::new(RecordingMailer::new());

        let state = AppState::new(
            db,
            TokenService::new("controller-test-secret", Duration::days(90)),
            mailer.clone(),
            TEST_HASH_COST,
            "http://localhost:3000".to_string(),
        );

        Self {
            _context: context,
            state,
            mailer,
            environment,
        }
    }

    fn db(&self) -> &sea_orm::DatabaseConnection {
        &self.state.db
    }

    fn router(&self) -> Router {
        router::app(
            router::api_routes(),
            self.state.clone(),
            self.environment,
            BODY_LIMIT,
        )
    }

    /// Creates a user with the given role and returns a token for it.
    async fn login_as(&self, role: &str) -> (entity::user::Model, String) {
        let user = factory::user::create_user_with_role(self.db(), role)
            .await
            .unwrap();
        let token = self.state.tokens.sign(user.id).unwrap();

        (user, token)
    }

    /// Sends a request and returns the status and JSON body (`Null` when empty).
    async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();

        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        (status, json)
    }

    async fn get(&self, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.send(Method::GET, uri, token, None).await
    }
}

fn tour_body(name: &str) -> Value {
    json!({
        "name": name,
        "duration": 5,
        "maxGroupSize": 25,
        "difficulty": "easy",
        "price": 397,
        "summary": "Breathtaking hike through the Canadian Banff National Park",
        "imageCover": "tour-1-cover.jpg",
        "startLocation": {
            "type": "Point",
            "coordinates": [-115.570154, 51.178456],
            "address": "224 Banff Ave, Banff, AB, Canada",
            "description": "Banff, CAN"
        }
    })
}
