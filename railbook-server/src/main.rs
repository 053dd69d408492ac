use std::net::SocketAddr;
use std::path::PathBuf;

use railbook_server::catalog::Catalog;
use railbook_server::storage::{BackendCandidate, Storage};
use railbook_server::web::{AppState, create_router};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "railbook_server=info,tower_http=info".into()),
        )
        .init();

    // Data directory for the JSON file backend; falls back to in-memory
    // storage when it is unusable.
    let data_dir =
        PathBuf::from(std::env::var("RAILBOOK_DATA_DIR").unwrap_or_else(|_| "data".to_string()));
    let storage = Storage::open(&[
        BackendCandidate::JsonDir(data_dir),
        BackendCandidate::Memory,
    ]);
    println!("Storage backend: {}", storage.backend_name());

    let catalog = Catalog::load(&storage).expect("Failed to load station/train catalog");
    println!(
        "Catalog: {} stations, {} trains",
        catalog.stations().len(),
        catalog.trains().len()
    );

    let state = AppState::new(storage, catalog);
    let app = create_router(state, "static");

    let addr = SocketAddr::from(([127, 0, 0, 1], 3000));
    println!("RailBook listening on http://{addr}");
    println!();
    println!("Open http://{addr} in your browser for the web interface.");
    println!();
    println!("Pages:");
    println!("  GET  /health    - Health check");
    println!("  GET  /schedule  - Train schedule lookup");
    println!("  GET  /search    - Find trains between stations");
    println!("  GET  /trains    - All trains");
    println!("  GET  /book      - Book a ticket (login required)");

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
