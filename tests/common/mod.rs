#![allow(dead_code)]

use axum_test::TestServer;
use chrono::{Duration, Utc};
use estate_pay::application::payments::PaymentService;
use estate_pay::domain::ports::PropertyStore;
use estate_pay::domain::pricing::PriceCatalog;
use estate_pay::domain::property::PropertySummary;
use estate_pay::infrastructure::in_memory::{InMemoryPropertyStore, InMemoryTransactionStore};
use estate_pay::infrastructure::simulated::SimulatedProvider;
use estate_pay::interfaces::auth::{AUDIENCE, Claims, SessionVerifier};
use estate_pay::interfaces::http::{AppState, create_router};
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use rust_decimal_macros::dec;
use secrecy::SecretString;

pub const JWT_SECRET: &str = "test-jwt-secret-that-is-long-enough-123";

pub struct TestApp {
    pub server: TestServer,
    pub provider: SimulatedProvider,
}

pub fn token_for(user_id: &str) -> String {
    let claims = Claims {
        sub: user_id.to_string(),
        aud: AUDIENCE.to_string(),
        exp: (Utc::now() + Duration::hours(1)).timestamp(),
        email: Some(format!("{user_id}@example.com")),
        role: Some("authenticated".to_string()),
    };
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(JWT_SECRET.as_bytes()),
    )
    .unwrap()
}

pub async fn spawn_app() -> TestApp {
    let properties = InMemoryPropertyStore::new();
    properties
        .store(PropertySummary {
            id: "prop-lekki".to_string(),
            title: "Lekki Phase 1 Terrace".to_string(),
            price: dec!(120000000),
            address: "5 Fola Osibo Rd".to_string(),
            city: "Lagos".to_string(),
            images: vec!["https://img.example/lekki-1.jpg".to_string()],
        })
        .await
        .unwrap();

    let provider = SimulatedProvider::new();
    let service = PaymentService::new(
        Box::new(properties),
        Box::new(InMemoryTransactionStore::new()),
        Box::new(provider.clone()),
        PriceCatalog::default(),
    );
    let sessions = SessionVerifier::new(&SecretString::from(JWT_SECRET.to_string()));
    let router = create_router(AppState::new(service, sessions), None);

    TestApp {
        server: TestServer::new(router).unwrap(),
        provider,
    }
}
