// Server loop module
// Accepts connections until shutdown, then drains in-flight connections

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

use super::connection::accept_connection;
use super::signal::SignalHandler;
use crate::config;
use crate::logger;

/// How often the drain phase re-checks the connection counter
const DRAIN_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Accept connections until a shutdown signal arrives.
///
/// After shutdown the listener is closed and in-flight connections get
/// `performance.shutdown_timeout` seconds to finish.
pub async fn start_server_loop(
    listener: TcpListener,
    state: Arc<config::AppState>,
    active_connections: Arc<AtomicUsize>,
    signals: Arc<SignalHandler>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        if signals.shutdown_requested.load(Ordering::SeqCst) {
            break;
        }

        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        accept_connection(stream, peer_addr, &state, &active_connections);
                    }
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }

            () = signals.shutdown.notified() => {
                break;
            }
        }
    }

    drop(listener);
    logger::log_shutdown_started(active_connections.load(Ordering::SeqCst));

    let grace = Duration::from_secs(state.config.performance.shutdown_timeout);
    let remaining = drain_connections(&active_connections, grace).await;
    logger::log_shutdown_complete(remaining);
    Ok(())
}

/// Wait until no connections are active or `grace` elapses.
///
/// Returns the number of connections still open.
async fn drain_connections(active_connections: &AtomicUsize, grace: Duration) -> usize {
    let wait = async {
        while active_connections.load(Ordering::SeqCst) > 0 {
            tokio::time::sleep(DRAIN_POLL_INTERVAL).await;
        }
    };
    // Timing out just means connections are abandoned at exit
    let _ = tokio::time::timeout(grace, wait).await;
    active_connections.load(Ordering::SeqCst)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_drain_returns_immediately_when_idle() {
        let counter = AtomicUsize::new(0);
        assert_eq!(drain_connections(&counter, Duration::from_secs(5)).await, 0);
    }

    #[tokio::test]
    async fn test_drain_gives_up_after_grace() {
        let counter = AtomicUsize::new(2);
        assert_eq!(drain_connections(&counter, Duration::from_millis(120)).await, 2);
    }

    #[tokio::test]
    async fn test_drain_waits_for_connections() {
        let counter = Arc::new(AtomicUsize::new(1));
        let worker = Arc::clone(&counter);
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            worker.fetch_sub(1, Ordering::SeqCst);
        });
        assert_eq!(drain_connections(&counter, Duration::from_secs(5)).await, 0);
    }
}
