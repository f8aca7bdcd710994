use std::net::SocketAddr;

use migration::MigratorTrait;
use reqwest::StatusCode;
use serde_json::{json, Value};
use service::auth::service::AuthConfig;
use tokio::net::TcpListener;
use uuid::Uuid;

use server::routes::{self, auth::ServerState};

struct TestApp {
    base_url: String,
}

/// Spawn the real router against Postgres; `None` when no database is configured.
async fn start_server() -> anyhow::Result<Option<TestApp>> {
    if std::env::var("SKIP_DB_TESTS").is_ok() || std::env::var("DATABASE_URL").is_err() {
        eprintln!("DATABASE_URL missing or SKIP_DB_TESTS set; skip e2e tests");
        return Ok(None);
    }
    let db = models::db::connect().await?;
    migration::Migrator::up(&db, None).await?;

    let state = ServerState::from_db(db, AuthConfig { jwt_secret: "test-secret".into(), token_ttl_hours: 1 });
    let app = routes::build_router(state, tower_http::cors::CorsLayer::very_permissive());
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });

    Ok(Some(TestApp { base_url: format!("http://{}", addr) }))
}

#[tokio::test]
async fn e2e_tratamiento_lifecycle() -> anyhow::Result<()> {
    let Some(app) = start_server().await? else { return Ok(()); };
    let client = reqwest::Client::new();
    let tag = Uuid::new_v4().simple().to_string();
    let email = format!("e2e-{tag}@example.com");

    let res = client.get(format!("{}/api/tratamientos/", app.base_url)).send().await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = client
        .post(format!("{}/api/user/create/", app.base_url))
        .json(&json!({"email": email, "password": "testpass123", "name": "E2E"}))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);

    let token: Value = client
        .post(format!("{}/api/user/token/", app.base_url))
        .json(&json!({"email": email, "password": "testpass123"}))
        .send()
        .await?
        .json()
        .await?;
    let token = token["token"].as_str().unwrap_or_default().to_string();

    let codigo = format!("E{}", &tag[..7]).to_uppercase();
    let res = client
        .post(format!("{}/api/tratamientos/", app.base_url))
        .bearer_auth(&token)
        .json(&json!({
            "codigo": codigo,
            "nombre": "Presoterapia",
            "descripcion": "Drenaje linfático",
            "duracion_minutos": 45,
            "familia": "PR",
            "precio_base": 35.5
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let created: Value = res.json().await?;
    assert_eq!(created["precio_base"], "35.50");
    let uri = format!("{}/api/tratamientos/{}/", app.base_url, created["id"]);

    let res = client.patch(&uri).bearer_auth(&token).json(&json!({"precio_base": "50"})).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    let patched: Value = res.json().await?;
    assert_eq!(patched["precio_base"], "50.00");
    assert_eq!(patched["descripcion"], "Drenaje linfático");

    let res = client.delete(&uri).bearer_auth(&token).send().await?;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
    let res = client.get(&uri).bearer_auth(&token).send().await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    Ok(())
}
