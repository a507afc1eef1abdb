// Server loop module
// Accepts connections until shutdown is requested

use std::sync::atomic::AtomicUsize;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Notify;

use super::connection::accept_connection;
use crate::config::ServerContext;
use crate::logger;

/// Accept connections until `shutdown` is notified
///
/// Accept errors are logged and the loop keeps going. The listener is dropped
/// on return, so no new connection is accepted after shutdown; connections
/// already in flight are left to the runtime.
pub async fn start_server_loop(
    listener: TcpListener,
    server: Arc<ServerContext>,
    shutdown: Arc<Notify>,
) {
    let active_connections = Arc::new(AtomicUsize::new(0));

    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        accept_connection(stream, peer_addr, &server, &active_connections);
                    }
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }

            () = shutdown.notified() => {
                break;
            }
        }
    }

    drop(listener);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{HttpConfig, PerformanceConfig};
    use crate::handler::testing::ScratchDir;
    use crate::server::create_listener;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpStream;

    fn server_context(scratch: &ScratchDir) -> Arc<ServerContext> {
        Arc::new(ServerContext::new(
            scratch.root().to_path_buf(),
            HttpConfig {
                server_name: "devserve/test".to_string(),
                enable_cors: true,
                no_cache_suffixes: vec!["sw.js".to_string()],
                index_files: vec!["index.html".to_string()],
                directory_listing: true,
            },
            PerformanceConfig {
                keep_alive: false,
                connection_timeout: 5,
                max_connections: None,
            },
            None,
        ))
    }

    #[tokio::test]
    async fn test_serves_over_tcp_until_shutdown() {
        let scratch = ScratchDir::new("loop");
        scratch.write("sw.js", "// worker");

        let listener = create_listener("127.0.0.1:0".parse().unwrap()).unwrap();
        let addr = listener.local_addr().unwrap();
        let shutdown = Arc::new(Notify::new());
        let server = tokio::spawn(start_server_loop(
            listener,
            server_context(&scratch),
            Arc::clone(&shutdown),
        ));

        let mut stream = TcpStream::connect(addr).await.unwrap();
        stream
            .write_all(b"GET /sw.js HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
            .await
            .unwrap();
        let mut raw = String::new();
        stream.read_to_string(&mut raw).await.unwrap();
        let lower = raw.to_ascii_lowercase();

        assert!(raw.starts_with("HTTP/1.1 200 OK"));
        assert!(lower.contains("content-type: application/javascript\r\n"));
        assert!(lower.contains("access-control-allow-origin: *\r\n"));
        assert!(lower.contains("access-control-allow-methods: get, post, options\r\n"));
        assert!(lower.contains("access-control-allow-headers: content-type\r\n"));
        assert!(lower.contains("cache-control: no-cache, no-store, must-revalidate\r\n"));
        assert!(raw.ends_with("// worker"));

        shutdown.notify_one();
        server.await.unwrap();
        assert!(TcpStream::connect(addr).await.is_err());
    }
}
