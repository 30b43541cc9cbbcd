use anyhow::Context;

use inbox_triage::config::ServerConfig;
use inbox_triage::llm::create_provider;
use inbox_triage::server::relay_routes;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = ServerConfig::from_env().unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        eprintln!("  export KEY=<your model API key>");
        std::process::exit(1);
    });

    eprintln!("📬 Inbox Triage v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Backend: {}", config.llm.backend.as_str());
    eprintln!("   Model: {}", config.llm.model);
    eprintln!("   Form: http://{}/", config.bind_addr());

    // The provider is built once and shared read-only by every request.
    let llm = create_provider(&config.llm)?;
    let app = relay_routes(llm);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!(addr = %addr, "Inbox Triage server started");

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
