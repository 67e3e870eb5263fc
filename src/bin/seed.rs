use bandbook::{config::SeedConfig, seed, telemetry};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    telemetry::init("bandbook=info,sqlx=warn");

    let config = SeedConfig::from_env();
    let report = seed::run(&config).await;
    tracing::info!(
        connected = report.connected,
        dropped = report.dropped,
        inserted = report.inserted,
        "seed finished"
    );
}
