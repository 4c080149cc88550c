/// Command-line argument parser.
pub mod args;
/// Static asset resolution and the content-type table.
pub mod assets;
/// HTTP data types.
pub mod common;
/// Components for running an HTTP server and handling requests.
pub mod server;
/// First-run scaffolding for the asset root.
pub mod setup;

/// Utility components.
pub mod util;

/// Components for parsing HTTP requests.
pub(crate) mod parse;
