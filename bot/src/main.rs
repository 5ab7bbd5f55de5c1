#![warn(
    clippy::cognitive_complexity,
    clippy::missing_const_for_fn,
    clippy::option_if_let_else
)]

mod config;
mod errors;
mod event_log;
mod handler;
mod server;
mod structs;
mod telegram;
#[cfg(test)]
mod testing;

use log::LevelFilter;
use log::error;
use simple_logger::SimpleLogger;

use std::process;
use std::sync::Arc;
use std::time::Duration;

use config::Config;
use db::Db;
use handler::links::HttpTitleResolver;
use handler::Handler;
use server::AppState;
use telegram::TelegramClient;

const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

fn open_db(config: &Config) -> Db {
    match Db::open(&config.db_path) {
        Ok(db) => db,
        Err(why) => {
            error!("Failed to open db, exiting {why}");
            process::exit(-1);
        }
    }
}

#[tokio::main]
async fn main() {
    let config = Config::from_env();
    let level = config
        .as_ref()
        .map_or(LevelFilter::Info, |config| config.log_level);
    if let Err(why) = SimpleLogger::new()
        .with_level(LevelFilter::Warn)
        .with_module_level("linkbot", level)
        .with_module_level("db", level)
        .with_utc_timestamps()
        .init()
    {
        eprintln!("failed to init logger: {why}");
    }

    let config = match config {
        Ok(config) => config,
        Err(why) => {
            error!("Bad configuration, exiting: {why}");
            process::exit(-1);
        }
    };

    let db = open_db(&config);
    let http = match reqwest::Client::builder().timeout(HTTP_TIMEOUT).build() {
        Ok(http) => http,
        Err(why) => {
            error!("Failed to build http client, exiting: {why}");
            process::exit(-1);
        }
    };

    let handler = Handler::new(
        Arc::new(db),
        Arc::new(HttpTitleResolver::new(http.clone())),
    );
    let telegram = TelegramClient::new(http, &config.token);
    let app = server::router(
        Arc::new(AppState::new(handler, telegram)),
        &config.webhook_url_id,
    );

    if let Err(why) = server::serve(config.listen_addr, app).await {
        error!("Server error: {why}");
    }
}
