use log::error;
use yml_feed_rs::{error::BatchError, feed::config::FeedConfig, feed::job::run_feed};

fn main() -> Result<(), BatchError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = FeedConfig::default();
    run_feed(&config)
        .map(|_| ())
        .inspect_err(|err| error!("Feed generation failed: {}", err))
}
