use anyhow::{Context, Result};
use axum::{
    Router,
    routing::{get, post},
};

use lookbook_core::Lookbook;

mod dto;
mod error;
mod handlers;

#[cfg(test)]
mod tests;

#[derive(Clone)]
pub(crate) struct WebState {
    pub(crate) app: Lookbook,
}

impl WebState {
    fn new(app: Lookbook) -> Self {
        Self { app }
    }
}

/// Start the lookbook API server and block until shutdown.
///
/// # Errors
/// Returns an error when the runtime cannot be created, the socket cannot
/// be bound, or the server exits with a runtime failure.
pub fn serve_web(app: Lookbook, host: &str, port: u16) -> Result<()> {
    let seeded = app
        .seed_if_empty()
        .context("failed to seed catalog before serving")?;
    if seeded > 0 {
        println!("seeded catalog with {seeded} sample styles");
    }

    let state = WebState::new(app);
    let bind_addr = format!("{host}:{port}");
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to build web runtime")?;

    runtime.block_on(async move {
        let listener = tokio::net::TcpListener::bind(&bind_addr)
            .await
            .with_context(|| format!("failed to bind web server at {bind_addr}"))?;
        println!("lookbook api listening on http://{}", listener.local_addr()?);

        axum::serve(listener, app_router(state))
            .with_graceful_shutdown(async {
                let _ = tokio::signal::ctrl_c().await;
            })
            .await
            .context("web server failed")
    })
}

pub(crate) fn app_router(state: WebState) -> Router {
    Router::new()
        .route("/api/filters", get(handlers::list_filters))
        .route(
            "/api/hairstyles",
            get(handlers::list_hairstyles).post(handlers::create_hairstyle),
        )
        .route("/api/hairstyles/{id}", get(handlers::get_hairstyle))
        .route("/api/search/preview", post(handlers::preview_search))
        .route("/api/favorites/{user_id}", get(handlers::list_favorites))
        .route(
            "/api/favorites/{user_id}/{hairstyle_id}",
            get(handlers::check_favorite)
                .post(handlers::add_favorite)
                .delete(handlers::remove_favorite),
        )
        .with_state(state)
}
