mod api;
mod app;
mod error;
mod events;
mod logger;
mod persist;
mod state;
mod ui;

use app::{App, Options};
use clap::{App as Cli, Arg};
use error::AppResult;

const DEFAULT_API_URL: &str = "http://localhost:4000/api";

#[tokio::main]
async fn main() -> AppResult<()> {
    let matches = Cli::new("pulse")
        .version(env!("CARGO_PKG_VERSION"))
        .about("A terminal dashboard for personal productivity")
        .arg(
            Arg::with_name("config-dir")
                .long("config-dir")
                .value_name("DIR")
                .help("Override the storage directory")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("api-url")
                .long("api-url")
                .value_name("URL")
                .help("Override the data API base URL")
                .takes_value(true),
        )
        .get_matches();

    let options = Options {
        api_url: matches
            .value_of("api-url")
            .unwrap_or(DEFAULT_API_URL)
            .to_string(),
        access_token: std::env::var("PULSE_API_TOKEN").unwrap_or_default(),
        storage_dir: matches.value_of("config-dir").map(str::to_string),
    };
    App::start(options).await
}
