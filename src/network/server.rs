//! TCP Server
//!
//! Accepts connections and dispatches each one to its own worker thread.

use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr, TcpListener, TcpStream};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

use crossbeam::channel::{self, Sender};

use super::connection::Connection;
use super::reaper::{self, WorkerEvent};
use crate::config::Config;
use crate::error::{OtpError, Result};
use crate::protocol::ServerKind;

/// TCP daemon for one transform kind
pub struct Server {
    config: Config,
    kind: ServerKind,
    listener: TcpListener,
    local_addr: SocketAddr,

    /// Set once shutdown has been requested
    shutdown: Arc<AtomicBool>,

    /// Workers currently running
    active: Arc<AtomicUsize>,

    next_id: u64,
}

/// Stops a running [`Server`] from another thread
#[derive(Debug, Clone)]
pub struct ShutdownHandle {
    flag: Arc<AtomicBool>,
    wake_addr: SocketAddr,
}

impl Server {
    /// Bind the listening socket
    pub fn bind(config: Config, kind: ServerKind) -> Result<Self> {
        config.validate()?;

        let listener = TcpListener::bind(&config.listen_addr).map_err(|e| {
            OtpError::Config(format!("cannot listen on {}: {}", config.listen_addr, e))
        })?;
        let local_addr = listener.local_addr()?;

        Ok(Self {
            config,
            kind,
            listener,
            local_addr,
            shutdown: Arc::new(AtomicBool::new(false)),
            active: Arc::new(AtomicUsize::new(0)),
            next_id: 0,
        })
    }

    /// Start the server (blocking)
    ///
    /// Returns after shutdown once every worker has been joined.
    pub fn run(&mut self) -> Result<()> {
        tracing::info!("{} daemon listening on {}", self.kind, self.local_addr);

        let (events, reaper_rx) = channel::unbounded();
        let reaper = reaper::spawn(reaper_rx)?;

        loop {
            let accepted = self.listener.accept();
            if self.shutdown.load(Ordering::SeqCst) {
                break;
            }

            match accepted {
                Ok((stream, _)) => self.dispatch(stream, &events),
                Err(e) => tracing::warn!("Accept failed: {}", e),
            }
        }

        drop(events);
        match reaper.join() {
            Ok(reaped) => tracing::info!("{} daemon stopped, {} workers joined", self.kind, reaped),
            Err(_) => tracing::warn!("Reaper thread panicked"),
        }

        Ok(())
    }

    /// Hand an accepted stream to a fresh worker
    fn dispatch(&mut self, stream: TcpStream, events: &Sender<WorkerEvent>) {
        if self.active.load(Ordering::SeqCst) >= self.config.max_connections {
            tracing::warn!(
                "Rejecting connection: {} workers already running",
                self.config.max_connections
            );
            return;
        }

        let mut connection = match Connection::new(stream, self.kind, &self.config) {
            Ok(c) => c,
            Err(e) => {
                tracing::warn!("Failed to set up connection: {}", e);
                return;
            }
        };

        let id = self.next_id;
        self.next_id += 1;

        let active = Arc::clone(&self.active);
        let finished = events.clone();
        active.fetch_add(1, Ordering::SeqCst);

        let spawned = thread::Builder::new()
            .name(format!("otp-worker-{}", id))
            .spawn(move || {
                // Errors are logged by the connection itself
                let _ = connection.handle();
                active.fetch_sub(1, Ordering::SeqCst);
                let _ = finished.send(WorkerEvent::Finished(id));
            });

        match spawned {
            Ok(handle) => {
                let _ = events.send(WorkerEvent::Spawned(id, handle));
            }
            Err(e) => {
                self.active.fetch_sub(1, Ordering::SeqCst);
                tracing::warn!("Failed to spawn worker: {}", e);
            }
        }
    }

    /// Address the listener is bound to
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Transform this daemon performs
    pub fn kind(&self) -> ServerKind {
        self.kind
    }

    /// Number of workers currently running
    pub fn active_connections(&self) -> usize {
        self.active.load(Ordering::SeqCst)
    }

    /// Handle for signalling shutdown from another thread
    pub fn shutdown_handle(&self) -> ShutdownHandle {
        let mut wake_addr = self.local_addr;
        if wake_addr.ip().is_unspecified() {
            let loopback = match wake_addr.ip() {
                IpAddr::V4(_) => IpAddr::V4(Ipv4Addr::LOCALHOST),
                IpAddr::V6(_) => IpAddr::V6(Ipv6Addr::LOCALHOST),
            };
            wake_addr.set_ip(loopback);
        }

        ShutdownHandle {
            flag: Arc::clone(&self.shutdown),
            wake_addr,
        }
    }
}

impl ShutdownHandle {
    /// Signal the server to shutdown gracefully
    ///
    /// Running workers finish their exchange first.
    pub fn shutdown(&self) {
        if !self.flag.swap(true, Ordering::SeqCst) {
            // Unblock the accept call so the loop sees the flag
            let _ = TcpStream::connect(self.wake_addr);
        }
    }
}
