use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Request, Response};
use hyper_util::rt::TokioIo;
use tokio::net::TcpListener;

use crate::config::Config;
use crate::error::Result;
use crate::path::resolve_path;
use crate::response::{self, Body};

pub struct Server {
    listener: TcpListener,
    config: Arc<Config>,
}

impl Server {
    pub async fn bind(config: Config) -> Result<Self> {
        let listener = TcpListener::bind(config.address()).await?;

        Ok(Server::from_listener(listener, config))
    }

    pub fn from_listener(listener: TcpListener, config: Config) -> Self {
        Server {
            listener,
            config: Arc::new(config),
        }
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Accept connections and serve them one at a time, until the process is stopped.
    pub async fn run(self) -> Result<()> {
        let addr = self.local_addr()?;
        log::info!(
            "serving {} on http://{addr} (suffix {:?})",
            self.config.root.display(),
            self.config.suffix
        );

        // accept connections and process them serially
        for i in 0usize.. {
            let (stream, peer) = match self.listener.accept().await {
                Ok(accepted) => accepted,
                Err(e) => {
                    log::warn!("failed to accept connection {i}: {e}");
                    continue;
                }
            };

            log::debug!("new connection {i} from {peer}");

            let config = Arc::clone(&self.config);
            let service = service_fn(move |request| handle(request, Arc::clone(&config)));

            let connection = http1::Builder::new()
                .keep_alive(false)
                .serve_connection(TokioIo::new(stream), service);

            if let Err(e) = connection.await {
                log::warn!("connection {i}: {e}");
            }
        }

        Ok(())
    }
}

async fn handle(
    request: Request<Incoming>,
    config: Arc<Config>,
) -> Result<Response<Body>, Infallible> {
    let resolved = resolve_path(&config.root, request.uri().path(), &config.suffix);
    log::info!(
        "{} {} -> {}",
        request.method(),
        request.uri(),
        resolved.display()
    );

    let response = response::respond(request.method(), request.headers(), &resolved).await;
    log::debug!("{} for {}", response.status(), resolved.display());

    Ok(response)
}
