#![allow(dead_code)]

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::Service;

use server::routes::{self, auth::ServerState};
use service::auth::service::AuthConfig;
use service::tratamientos::repository::mock::MockTratamientoRepository;
use service::users::repository::mock::MockUserRepository;
use service::users::ExtraFields;

pub struct TestApp {
    pub router: Router,
    pub state: ServerState,
}

/// Router over in-memory repositories.
pub fn app() -> TestApp {
    let state = ServerState::new(
        Arc::new(MockUserRepository::default()),
        Arc::new(MockTratamientoRepository::default()),
        AuthConfig { jwt_secret: "test-secret".into(), token_ttl_hours: 1 },
    );
    let router = routes::build_router(state.clone(), tower_http::cors::CorsLayer::very_permissive());
    TestApp { router, state }
}

impl TestApp {
    pub async fn send(&self, method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(t) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {t}"));
        }
        let body = match body {
            Some(v) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(serde_json::to_vec(&v).unwrap())
            }
            None => Body::empty(),
        };
        let resp = self.router.clone().call(builder.body(body).unwrap()).await.unwrap();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
        (status, json)
    }

    /// Create an active user and return a token for it.
    pub async fn login_as(&self, email: &str) -> String {
        self.state
            .users
            .create_user(email, Some("testpass123"), ExtraFields::named("Test"))
            .await
            .unwrap();
        let (status, body) = self
            .send("POST", "/api/user/token/", None, Some(json!({"email": email, "password": "testpass123"})))
            .await;
        assert_eq!(status, StatusCode::OK, "{body}");
        body["token"].as_str().unwrap().to_string()
    }
}

pub fn indiba() -> Value {
    json!({
        "codigo": "INDIBA30",
        "nombre": "INDIBA 30 MINUTOS",
        "descripcion": "Sesión de radiofrecuencia INDIBA de 30 minutos",
        "duracion_minutos": 30,
        "familia": "IN",
        "precio_base": "47.50"
    })
}
