#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
mod arg_parse;
mod common;
mod config;
mod enrich;
mod feeds;
mod hackernews;
mod newsapi;
mod pipeline;
mod scheduler;
mod sender;

use arg_parse::CmdArgs;
use config::AppConfig;
use pipeline::Pipeline;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = CmdArgs::parse(std::env::args().collect())?;
    let config = AppConfig::from_file(&args.config)?;
    let options = args.pipeline_options(&config);

    if args.daily {
        return scheduler::run_daily(&config, &options).await;
    }

    let (articles, stats) = Pipeline::new(&config).run(&options).await;
    config.get_sender().send_digest(&articles, &stats).await?;
    println!(
        "Found {} unique articles ({} duplicates removed, {} keyword-filtered)",
        articles.len(),
        stats.removed_duplicates,
        stats.removed_by_keyword,
    );

    Ok(())
}
