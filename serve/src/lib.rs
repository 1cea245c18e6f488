//! A static file server that appends a fixed suffix to every resolved path.
//!
//! A request for `/foo` is answered from `<root>/foo.json` with the default suffix. Connections
//! are accepted on `0.0.0.0:32400` and served one at a time.

pub mod config;
pub mod error;
pub mod path;
pub mod response;
pub mod server;

pub use config::Config;
pub use error::{Error, Result};
pub use path::{resolve_path, translate_path};
pub use server::Server;

/// Bind the configured address and serve until the process is stopped.
pub async fn run(config: Config) -> Result<()> {
    Server::bind(config).await?.run().await
}
