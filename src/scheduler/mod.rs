use chrono::{Duration, Local, NaiveDateTime};
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::pipeline::{Pipeline, PipelineOptions};

/// Local hour at which the daily digest goes out.
pub const DAILY_RUN_HOUR: u32 = 8;

/// Time left until the next daily run.
fn until_next_run(now: NaiveDateTime) -> std::time::Duration {
    let today_run = now
        .date()
        .and_hms_opt(DAILY_RUN_HOUR, 0, 0)
        .expect("static run hour is valid");
    let next_run = if now < today_run {
        today_run
    } else {
        today_run + Duration::days(1)
    };
    (next_run - now).to_std().unwrap_or_default()
}

/// Deliver a digest once a day until interrupted. Serializes runs by
/// construction: the next sleep only starts after the previous run and
/// delivery finished. An empty run or a failed delivery skips a day rather
/// than aborting the loop.
pub async fn run_daily(
    config: &AppConfig,
    options: &PipelineOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let pipeline = Pipeline::new(config);
    let sender = config.get_sender();

    loop {
        let wait = until_next_run(Local::now().naive_local());
        info!("next digest run in {}s", wait.as_secs());
        tokio::time::sleep(wait).await;

        let (articles, stats) = pipeline.run(options).await;
        if articles.is_empty() {
            warn!("no articles for the daily digest");
            continue;
        }
        if let Err(e) = sender.send_digest(&articles, &stats).await {
            warn!("could not deliver the daily digest: {e}");
        }
    }
}
