use std::{future::Future, io, net::SocketAddr};

use axum::Router;
use tokio::net::TcpListener;
use tracing::info;

use crate::error::ApiError;

/// Bound TCP listener ready to serve the exposition router.
///
/// Binding is a separate step so that startup can fail fast (and exit
/// non-zero) before any other work is scheduled.
#[derive(Debug)]
pub struct MetricsServer {
    listener: TcpListener,
    addr: SocketAddr,
}

impl MetricsServer {
    /// Bind `addr`.
    ///
    /// # Errors
    /// - [`ApiError::PortInUse`] if another socket already holds the address.
    /// - [`ApiError::Bind`] for any other bind failure.
    pub async fn bind(addr: SocketAddr) -> Result<Self, ApiError> {
        let listener = TcpListener::bind(addr).await.map_err(|e| match e.kind() {
            io::ErrorKind::AddrInUse => ApiError::PortInUse { addr },
            _ => ApiError::Bind { addr, source: e },
        })?;
        let addr = listener.local_addr()?;

        Ok(Self { listener, addr })
    }

    /// Actual bound address (resolves port `0`).
    #[inline]
    pub fn local_addr(&self) -> SocketAddr {
        self.addr
    }

    /// Serve `router` until `shutdown` completes.
    pub async fn serve<F>(self, router: Router, shutdown: F) -> Result<(), ApiError>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        info!(addr = %self.addr, "metrics endpoint listening");
        axum::serve(self.listener, router)
            .with_graceful_shutdown(shutdown)
            .await?;
        info!(addr = %self.addr, "metrics endpoint stopped");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use metrix_core::Registry;
    use tokio::{
        io::{AsyncReadExt, AsyncWriteExt},
        net::TcpStream,
        sync::oneshot,
    };

    use super::*;
    use crate::HttpApi;

    fn loopback() -> SocketAddr {
        SocketAddr::from(([127, 0, 0, 1], 0))
    }

    async fn http_get(addr: SocketAddr, path: &str) -> String {
        let mut stream = TcpStream::connect(addr).await.unwrap();
        let req = format!("GET {path} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n");
        stream.write_all(req.as_bytes()).await.unwrap();

        let mut out = String::new();
        stream.read_to_string(&mut out).await.unwrap();
        out
    }

    #[tokio::test]
    async fn second_bind_reports_port_in_use() {
        let first = MetricsServer::bind(loopback()).await.unwrap();
        let taken = first.local_addr();

        let err = MetricsServer::bind(taken).await.unwrap_err();
        match err {
            ApiError::PortInUse { addr } => assert_eq!(addr, taken),
            other => panic!("expected PortInUse, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn serves_scrapes_over_tcp_and_shuts_down() {
        let registry = Arc::new(Registry::new());
        let requests = registry
            .counter_vec("http_requests", "Total HTTP requests served", ["method", "status_code"])
            .unwrap();
        for _ in 0..5 {
            requests.inc(&["get", "200"]).unwrap();
        }

        let server = MetricsServer::bind(loopback()).await.unwrap();
        let addr = server.local_addr();
        let (stop_tx, stop_rx) = oneshot::channel::<()>();
        let handle = tokio::spawn(server.serve(HttpApi::new(registry).router(), async move {
            let _ = stop_rx.await;
        }));

        let ok = http_get(addr, "/metrics").await;
        assert!(ok.starts_with("HTTP/1.1 200"), "{ok}");
        assert!(ok.to_ascii_lowercase().contains("content-type: text/plain; version=0.0.4"));
        assert!(ok.contains("http_requests{method=\"get\",status_code=\"200\"} 5\n"));

        let missing = http_get(addr, "/nope").await;
        assert!(missing.starts_with("HTTP/1.1 404"), "{missing}");

        stop_tx.send(()).unwrap();
        let res = tokio::time::timeout(std::time::Duration::from_secs(5), handle)
            .await
            .expect("server did not stop")
            .unwrap();
        assert!(res.is_ok());
    }
}
