// Server module entry point
// Accept loop, connection handling and shutdown signals

pub mod connection;
pub mod listener;
pub mod signal;

use std::sync::atomic::Ordering;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Notify;

use crate::config::AppState;
use crate::logger;

// Re-export commonly used items
pub use listener::create_reusable_listener;
pub use signal::start_signal_handler;

/// Accept connections until `shutdown` is notified
pub async fn run(listener: TcpListener, state: Arc<AppState>, shutdown: Arc<Notify>) {
    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        connection::accept_connection(stream, peer_addr, &state);
                    }
                    Err(e) => logger::log_error(&format!("Failed to accept connection: {e}")),
                }
            }

            () = shutdown.notified() => {
                logger::log_shutdown(state.active_connections.load(Ordering::SeqCst));
                return;
            }
        }
    }
}
