pub mod aggregator_core;
pub mod cmc_client;
pub mod config;
pub mod output;
pub mod rate_limiter;

use {
    cmc_client::CmcClient, config::Config, rate_limiter::RateLimiter,
};

#[tokio::main]
pub async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    dotenv::dotenv().ok();

    let config = Config::from_env()?;

    // NOTE: Workaround for rustls issue
    rustls::crypto::aws_lc_rs::default_provider()
        .install_default()
        .expect("Can't set crypto provider to aws_lc_rs");

    log::info!("🚀 Starting token metadata aggregation");
    log::info!("   Host: {}", config.api_host);
    log::info!("   Rate: {} requests/minute", config.requests_per_minute);
    log::info!("   Output: {}", config.output_path.display());

    let client = CmcClient::new(&config.api_host, &config.api_key)?;
    let limiter = RateLimiter::per_minute(config.requests_per_minute);

    let report = aggregator_core::run(&client, &client, &limiter).await?;

    for failure in &report.failures {
        log::warn!(
            "⚠️  Batch {}/{} ({} ids) missing from aggregate: {}",
            failure.batch_index + 1,
            report.batches_total,
            failure.batch_len,
            failure.error
        );
    }

    output::write_token_map(&config.output_path, &report.tokens)?;

    log::info!(
        "✅ Wrote {} tokens from {}/{} batches to {}",
        report.tokens.len(),
        report.batches_total - report.failures.len(),
        report.batches_total,
        config.output_path.display()
    );

    Ok(())
}
