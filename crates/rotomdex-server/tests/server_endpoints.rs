use std::sync::Arc;

use rotomdex_auth::{AuthState, Claims, TokenService};
use rotomdex_db_memory::MemoryStorage;
use rotomdex_server::{AppConfig, AppState, Pokedex, build_app};
use rotomdex_storage::{DynStorage, PokedexStorage};
use rotomdex_upstream::{ImageBases, PokeApiClient, UpstreamConfig};
use serde_json::{Value, json};
use time::{Duration, OffsetDateTime};
use tokio::task::JoinHandle;
use url::Url;

const TEST_SECRET: &str = "a-string-secret-at-least-256-bits-long";

/// State wired to a throwaway upstream address; endpoints under test here
/// never reach upstream.
fn test_state(upstream_base: &str) -> AppState {
    let api = Arc::new(PokeApiClient::new(
        UpstreamConfig::new()
            .with_base_url(Url::parse(upstream_base).expect("upstream url"))
            .with_request_timeout(std::time::Duration::from_secs(2)),
    ));
    let storage: DynStorage = Arc::new(MemoryStorage::new());
    let images = ImageBases::new("https://img.example/official", "https://img.example/home");
    let pokedex = Arc::new(Pokedex::new(api, storage.clone(), images, 1025));
    AppState::new(pokedex, storage, AuthState::from_secret(TEST_SECRET))
}

async fn start_server(
    state: AppState,
) -> (String, tokio::sync::oneshot::Sender<()>, JoinHandle<()>) {
    let app = build_app(&AppConfig::default(), state);

    // Bind to an ephemeral port
    let listener = tokio::net::TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0))
        .await
        .expect("bind");
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = tokio::sync::oneshot::channel::<()>();

    let server = tokio::spawn(async move {
        let _ = axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = rx.await;
            })
            .await;
    });

    (format!("http://{addr}"), tx, server)
}

fn token_for(subject: &str) -> String {
    TokenService::new(TEST_SECRET)
        .sign(&Claims::new(subject, Duration::hours(1)))
        .expect("sign token")
}

fn expired_token() -> String {
    let now = OffsetDateTime::now_utc().unix_timestamp();
    let claims = Claims {
        sub: "ash@example.com".to_string(),
        exp: now - 3600,
        iat: now - 7200,
    };
    TokenService::new(TEST_SECRET)
        .sign(&claims)
        .expect("sign token")
}

fn game_body(generation: i32) -> Value {
    json!({
        "generation": generation,
        "gamesReleased": ["Red", "Blue", "Yellow"],
        "platforms": "Game Boy",
        "yearReleased": "1996",
        "region": "Kanto",
        "wellKnownPokemon": "Pikachu",
        "image": "https://img.example/gen1.png"
    })
}

fn pokemon_body(id: u32, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "types": ["normal"],
        "abilities": ["glitch"],
        "baseStats": {
            "hp": 33,
            "attack": 136,
            "defense": 0,
            "specialAttack": 6,
            "specialDefense": 6,
            "speed": 29
        },
        "image": "https://img.example/custom/9001.png"
    })
}

#[tokio::test]
async fn welcome_and_health_endpoints() {
    let (base, shutdown_tx, handle) = start_server(test_state("http://127.0.0.1:9")).await;
    let client = reqwest::Client::new();

    // GET /
    let resp = client.get(format!("{base}/")).send().await.unwrap();
    assert!(resp.status().is_success());
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({ "message": "Welcome to the Pokedex" }));

    // GET /health
    let resp = client.get(format!("{base}/health")).send().await.unwrap();
    assert!(resp.status().is_success());
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["backend"], "memory");

    // Responses carry a request id
    let resp = client.get(format!("{base}/health")).send().await.unwrap();
    assert!(resp.headers().contains_key("x-request-id"));

    // An inbound request id is preserved
    let resp = client
        .get(format!("{base}/health"))
        .header("x-request-id", "trace-me-123")
        .send()
        .await
        .unwrap();
    assert_eq!(
        resp.headers().get("x-request-id").unwrap(),
        "trace-me-123"
    );

    let _ = shutdown_tx.send(());
    let _ = handle.await;
}

#[tokio::test]
async fn protected_routes_collapse_auth_failures() {
    let (base, shutdown_tx, handle) = start_server(test_state("http://127.0.0.1:9")).await;
    let client = reqwest::Client::new();
    let unauthorized = json!({ "message": "Unauthorized" });

    // No token
    let resp = client
        .post(format!("{base}/pokemon/add"))
        .json(&pokemon_body(9001, "missingno"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, unauthorized);

    // Garbage token: identical body, nothing about the cause leaks
    let resp = client
        .post(format!("{base}/games/add"))
        .header("authorization", "garbage")
        .json(&game_body(1))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, unauthorized);

    // Expired token
    let resp = client
        .delete(format!("{base}/pokemon/25"))
        .header("authorization", expired_token())
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, unauthorized);

    // The scheme prefix corrupts the raw token
    let resp = client
        .put(format!("{base}/pokemon/9001"))
        .header("authorization", format!("Bearer {}", token_for("ash@example.com")))
        .json(&pokemon_body(9001, "missingno"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);

    // Reads stay open
    let resp = client.get(format!("{base}/games")).send().await.unwrap();
    assert_eq!(resp.status(), 200);

    let _ = shutdown_tx.send(());
    let _ = handle.await;
}

#[tokio::test]
async fn games_catalog_crud_flow() {
    let (base, shutdown_tx, handle) = start_server(test_state("http://127.0.0.1:9")).await;
    let client = reqwest::Client::new();
    let token = token_for("ash@example.com");

    // Empty catalog
    let resp = client.get(format!("{base}/games")).send().await.unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!([]));

    // Create two games, out of generation order
    let resp = client
        .post(format!("{base}/games/add"))
        .header("authorization", &token)
        .json(&game_body(3))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let gen3: Value = resp.json().await.unwrap();
    assert_eq!(gen3["generation"], 3);
    assert_eq!(gen3["region"], "Kanto");
    let gen3_id = gen3["id"].as_str().expect("game id").to_string();

    let resp = client
        .post(format!("{base}/games/add"))
        .header("authorization", &token)
        .json(&game_body(1))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    // Listed ascending by generation regardless of insertion order
    let resp = client.get(format!("{base}/games")).send().await.unwrap();
    let listing: Value = resp.json().await.unwrap();
    let listing = listing.as_array().expect("array");
    assert_eq!(listing.len(), 2);
    assert_eq!(listing[0]["generation"], 1);
    assert_eq!(listing[1]["generation"], 3);

    // Fetch one by id
    let resp = client
        .get(format!("{base}/games/{gen3_id}"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["id"], gen3_id.as_str());

    // Unknown id
    let resp = client
        .get(format!("{base}/games/00000000-0000-0000-0000-000000000000"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({ "message": "Game not found" }));

    // Update
    let mut updated = game_body(3);
    updated["region"] = json!("Hoenn");
    let resp = client
        .put(format!("{base}/games/{gen3_id}"))
        .header("authorization", &token)
        .json(&updated)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["region"], "Hoenn");
    assert_eq!(body["id"], gen3_id.as_str());

    // Update of an unknown id
    let resp = client
        .put(format!("{base}/games/00000000-0000-0000-0000-000000000000"))
        .header("authorization", &token)
        .json(&updated)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);

    // Delete, then delete again
    let resp = client
        .delete(format!("{base}/games/{gen3_id}"))
        .header("authorization", &token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let resp = client
        .delete(format!("{base}/games/{gen3_id}"))
        .header("authorization", &token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);

    let _ = shutdown_tx.send(());
    let _ = handle.await;
}

#[tokio::test]
async fn login_upserts_one_identity_per_email() {
    let state = test_state("http://127.0.0.1:9");
    let storage = state.storage.clone();
    let (base, shutdown_tx, handle) = start_server(state).await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/user/login"))
        .json(&json!({ "userEmail": "ash@example.com" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let first = storage
        .find_user_by_email("ash@example.com")
        .await
        .unwrap()
        .expect("identity created");

    let resp = client
        .post(format!("{base}/user/login"))
        .json(&json!({ "userEmail": "ash@example.com" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let second = storage
        .find_user_by_email("ash@example.com")
        .await
        .unwrap()
        .expect("identity still present");

    // Same identity, refreshed login stamp
    assert_eq!(first.id, second.id);
    assert!(second.last_login >= first.last_login);

    let _ = shutdown_tx.send(());
    let _ = handle.await;
}

#[tokio::test]
async fn custom_pokemon_lifecycle() {
    let state = test_state("http://127.0.0.1:9");
    let storage = state.storage.clone();
    let (base, shutdown_tx, handle) = start_server(state).await;
    let client = reqwest::Client::new();
    let token = token_for("ash@example.com");

    // Register the owning user first
    client
        .post(format!("{base}/user/login"))
        .json(&json!({ "userEmail": "ash@example.com" }))
        .send()
        .await
        .unwrap();
    let user = storage
        .find_user_by_email("ash@example.com")
        .await
        .unwrap()
        .expect("identity created");

    // Submit a custom Pokémon linked to that user
    let mut body = pokemon_body(9001, "missingno");
    body["userId"] = json!(user.id);
    let resp = client
        .post(format!("{base}/pokemon/add"))
        .header("authorization", &token)
        .json(&body)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);
    let created: Value = resp.json().await.unwrap();
    assert_eq!(created["message"], "Pokemon added successfully");
    assert_eq!(created["pokemon"]["id"], 9001);
    assert_eq!(created["pokemon"]["owner"], json!(user.id));

    // The owner's back-reference points at the submission
    let user = storage
        .find_user_by_email("ash@example.com")
        .await
        .unwrap()
        .expect("identity present");
    assert_eq!(user.pokedex, Some(9001));

    // An unknown owner fails and leaves nothing behind
    let mut orphan = pokemon_body(9002, "glitchmon");
    orphan["userId"] = json!("00000000-0000-0000-0000-000000000000");
    let resp = client
        .post(format!("{base}/pokemon/add"))
        .header("authorization", &token)
        .json(&orphan)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 500);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "Internal Server Error");
    assert!(storage.find_pokemon_by_id(9002).await.unwrap().is_none());

    // The stored record serves reads without touching upstream
    let resp = client
        .get(format!("{base}/pokemon/9001"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["name"], "missingno");

    // Replace it
    let resp = client
        .put(format!("{base}/pokemon/9001"))
        .header("authorization", &token)
        .json(&pokemon_body(9001, "missingno-fixed"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let resp = client
        .get(format!("{base}/pokemon/9001"))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["name"], "missingno-fixed");

    // Delete is idempotent
    let resp = client
        .delete(format!("{base}/pokemon/9001"))
        .header("authorization", &token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let resp = client
        .delete(format!("{base}/pokemon/9001"))
        .header("authorization", &token)
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let _ = shutdown_tx.send(());
    let _ = handle.await;
}
