/*!
 * HTTP Server
 * Exposes the allocation workload over HTTP/1.1 using hyper
 */

use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::{TokioIo, TokioTimer};
use std::future::Future;
use std::net::SocketAddr;
use tokio::net::{TcpListener, TcpStream};
use tracing::{debug, error, info, warn, Instrument};

use crate::api::handlers::route;
use crate::api::http::{HttpRequest, ResponseBody};
use crate::api::types::{ServerConfig, ServerError};
use crate::monitoring::span_request;
use crate::workload::AllocationDriver;

/// Connection-per-task HTTP server around an [`AllocationDriver`]
pub struct AllocationServer {
    config: ServerConfig,
    driver: AllocationDriver,
}

impl AllocationServer {
    pub fn new(config: ServerConfig, driver: AllocationDriver) -> Self {
        Self { config, driver }
    }

    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Bind the configured address
    pub async fn bind(&self) -> Result<TcpListener, ServerError> {
        TcpListener::bind(self.config.address)
            .await
            .map_err(|source| ServerError::Bind {
                address: self.config.address,
                source,
            })
    }

    /// Bind and serve until Ctrl+C
    pub async fn run(self) -> Result<(), ServerError> {
        let listener = self.bind().await?;
        self.serve(listener, shutdown_signal()).await
    }

    /// Accept connections on `listener` until `shutdown` resolves
    ///
    /// Requests already being handled keep running on their own tasks.
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> Result<(), ServerError>
    where
        F: Future<Output = ()> + Send,
    {
        let local_addr = listener.local_addr()?;
        info!(addr = %local_addr, "Server is starting...");

        let mut http = http1::Builder::new();
        http.timer(TokioTimer::new())
            .header_read_timeout(self.config.read_timeout);

        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    info!("Shutdown signal received, no longer accepting connections");
                    break;
                }
                accepted = listener.accept() => match accepted {
                    Ok((stream, peer)) => {
                        let driver = self.driver.clone();
                        let http = http.clone();
                        tokio::spawn(serve_connection(http, stream, peer, driver));
                    }
                    Err(e) => {
                        warn!(error = %e, "Failed to accept connection");
                    }
                },
            }
        }

        Ok(())
    }
}

/// Resolves on Ctrl+C; never resolves if the handler cannot be installed
pub async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}

async fn serve_connection(
    http: http1::Builder,
    stream: TcpStream,
    peer: SocketAddr,
    driver: AllocationDriver,
) {
    let service = service_fn(move |request: hyper::Request<Incoming>| {
        let driver = driver.clone();
        async move { dispatch(&driver, request).await }
    });

    if let Err(e) = http.serve_connection(TokioIo::new(stream), service).await {
        debug!(peer = %peer, error = %e, "Connection error");
    }
}

/// Route one request inside its span
///
/// An aborted workload surfaces as an error so the connection closes without
/// a response.
async fn dispatch(
    driver: &AllocationDriver,
    request: hyper::Request<Incoming>,
) -> Result<hyper::Response<ResponseBody>, ServerError> {
    let request = HttpRequest::from(&request);
    let span = span_request(&request.method, &request.path);

    let response = route(driver, &request)
        .instrument(span.span().clone())
        .await
        .ok_or(ServerError::WorkloadAborted)?;

    span.record_status(response.status.code());
    Ok(response.into_hyper())
}
