//! leadpress application entry point.
//!
//! Bootstraps the server:
//! 1. Load configuration from environment
//! 2. Connect to Redis
//! 3. Build router (public API, gated admin area, static files)
//! 4. Start Axum server
//!
//! Also supports a `gen-secret` subcommand for producing a JWT_SECRET_KEY.

use leadpress::{auth::AppState, config::Config, routes};

/// Generate a random 32-byte signing secret, base64-encoded.
fn gen_secret() -> String {
    let mut bytes = [0u8; 32];
    rand::fill(&mut bytes);
    let secret = base64::Engine::encode(&base64::engine::general_purpose::STANDARD, bytes);
    bytes.fill(0);
    secret
}

fn print_usage() {
    eprintln!("Usage: leadpress [gen-secret]");
    eprintln!();
    eprintln!("With no arguments, starts the server.");
    eprintln!("gen-secret prints a random value for JWT_SECRET_KEY:");
    eprintln!();
    eprintln!("  JWT_SECRET_KEY=$(leadpress gen-secret)");
}

#[tokio::main]
async fn main() {
    let args: Vec<String> = std::env::args().collect();
    match args.get(1).map(String::as_str) {
        None => {}
        Some("gen-secret") if args.len() == 2 => {
            println!("{}", gen_secret());
            return;
        }
        Some(_) => {
            print_usage();
            std::process::exit(1);
        }
    }

    // Initialize tracing with env filter support (RUST_LOG)
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::from_env().expect("Failed to load config");
    tracing::info!(production = config.production, "Starting leadpress on {}", config.bind_addr);

    if config.using_fallback_secret {
        tracing::warn!(
            "JWT_SECRET_KEY is not set; signing sessions with the insecure development fallback key"
        );
    }

    let redis_client = redis::Client::open(config.redis_url.as_str()).expect("Invalid Redis URL");

    // Fail fast if Redis is unreachable
    redis_client
        .get_multiplexed_async_connection()
        .await
        .expect("Failed to connect to Redis");

    let bind_addr = config.bind_addr;
    let state = AppState::new(redis_client, config);
    let app = routes::app(state, "static");

    let listener = tokio::net::TcpListener::bind(bind_addr)
        .await
        .expect("Failed to bind");
    tracing::info!("Listening on {}", bind_addr);

    axum::serve(listener, app).await.expect("Server error");
}
