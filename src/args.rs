use clap::Parser;

/// An HTTP server for a small static website. Point it at a directory of
/// assets to get started!
#[derive(Parser)]
#[command(version, about)]
pub struct Args {
    /// (Optional) Host name or IP address to serve from.
    #[arg(long, default_value_t = String::from("127.0.0.1"))]
    pub host: String,
    /// (Optional) Port number to open on host.
    #[arg(short, long, default_value_t = 3000)]
    pub port: usize,
    /// (Optional) Directory holding the servable assets.
    #[arg(short, long, default_value_t = String::from("./public"))]
    pub root: String,
    /// (Optional) Document served when the request path is "/".
    #[arg(long, default_value_t = String::from("index.html"))]
    pub index: String,
    /// (Optional) Number of connection handler threads.
    #[arg(short, long, default_value_t = 5)]
    pub threads: usize,
}
