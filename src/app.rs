/*
 * Responsibility
 * - Config読み込み → 依存生成 (decoder / provider) → Router 組み立て
 * - Middleware の適用 (HTTP 共通 / Bearer)
 * - axum::serve() で起動
 */
use std::{net::SocketAddr, panic, process};

use anyhow::Result;
use axum::Router;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api;
use crate::config::Config;
use crate::error::AppError;
use crate::middleware::http::{self, HttpLimits};
use crate::services::auth::build_auth_state;
use crate::state::AppState;

fn init_tracing() {
    // Prefer RUST_LOG if set; otherwise use a sensible default.
    // Ex:
    // RUST_LOG=info,resource_server=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        // Always surface panic via tracing so they don't get "lost"
        tracing::error!(?info, "panic");

        // In development, fail fast: crash the whole process so we notice immediately.
        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    init_tracing();
    let config = Config::from_env()?;

    init_panic_hook(!config.app_env.is_production());

    tracing::info!(
        "starting resource server in {:?} mode on {}",
        config.app_env,
        config.addr
    );

    let state = AppState::new(build_auth_state(&config)?);
    let app = build_router(state, HttpLimits::from_config(&config));

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    // ConnectInfo feeds the peer address into authentication details.
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

fn build_router(state: AppState, limits: HttpLimits) -> Router {
    async fn fallback() -> AppError {
        AppError::not_found("route")
    }

    let router = Router::new()
        .nest("/api/v1", api::v1::routes(&state))
        .fallback(fallback)
        .with_state(state);

    http::apply(router, limits)
}
