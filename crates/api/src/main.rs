use anyhow::Context;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    taproom_observability::init();

    let addr = std::env::var("TAPROOM_ADDR").unwrap_or_else(|_| {
        tracing::info!("TAPROOM_ADDR not set; defaulting to 0.0.0.0:8080");
        "0.0.0.0:8080".to_string()
    });

    let app = taproom_api::app::build_app();

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
