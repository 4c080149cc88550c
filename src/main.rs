use std::io::Error;

use clap::Parser;
use simplelog::{ColorChoice, Config as LogConfig, LevelFilter, TermLogger, TerminalMode};

use sitebox::args::Args;
use sitebox::assets::{self, AssetConfig};
use sitebox::server;
use sitebox::server::{Config, Router};
use sitebox::server::ListenerResult::SendResponse;
use sitebox::setup;

fn main() -> Result<(), Error> {
    TermLogger::init(LevelFilter::Info, LogConfig::default(), TerminalMode::Mixed, ColorChoice::Auto)
        .expect("logger already initialized");

    let args = Args::parse();

    setup::check_asset_root(&args);

    let mut router = Router::new();

    // Future API routes land under this prefix.
    router.on_prefix(assets::API_PREFIX, |_, _| SendResponse(assets::api_not_implemented()));

    let assets = AssetConfig::new(args.root.clone(), args.index.clone());
    router.on_prefix("", move |path, _| SendResponse(assets.response(path)));

    let addr = format!("{}:{}", args.host, args.port);

    server::listen_http(Config {
        addr,
        connection_handler_threads: args.threads,
        router,
    })
}
