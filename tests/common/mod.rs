//! Shared utilities for integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::future::Future;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use website_monitor::{Endpoint, Notifier, ProbeOutcome, Prober};

/// Start a programmable mock HTTP server on an ephemeral port.
///
/// `f` receives the request line (e.g. `GET /path HTTP/1.1`) and returns the
/// status code and body to answer with.
pub async fn start_programmable_backend<F, Fut>(f: F) -> SocketAddr
where
    F: Fn(String) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let f = Arc::new(f);

    tokio::spawn(async move {
        loop {
            match listener.accept().await {
                Ok((mut socket, _)) => {
                    let f = f.clone();
                    tokio::spawn(async move {
                        let mut buf = vec![0u8; 8192];
                        let n = socket.read(&mut buf).await.unwrap_or(0);
                        let head = String::from_utf8_lossy(&buf[..n]);
                        let request_line = head.lines().next().unwrap_or_default().to_string();

                        let (status, body) = f(request_line).await;
                        let response_str = format!(
                            "HTTP/1.1 {} Mock\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                            status,
                            body.len(),
                            body
                        );
                        let _ = socket.write_all(response_str.as_bytes()).await;
                        let _ = socket.shutdown().await;
                    });
                }
                Err(_) => break,
            }
        }
    });

    addr
}

/// Start a mock backend that always answers with `status`.
pub async fn start_status_backend(status: u16) -> SocketAddr {
    start_programmable_backend(move |_| async move { (status, "mock".to_string()) }).await
}

/// Start a server that accepts connections but never responds.
pub async fn start_silent_backend() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });

    addr
}

/// An address with nothing listening on it.
pub async fn closed_port() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}

/// One scripted probe result.
#[derive(Debug, Clone)]
pub enum Step {
    Outcome(ProbeOutcome),
    Delayed(Duration, ProbeOutcome),
    Panic(&'static str),
}

/// Prober that replays a per-endpoint script. Exhausted scripts report `Success(200)`.
#[derive(Default)]
pub struct ScriptedProber {
    scripts: Mutex<HashMap<Endpoint, VecDeque<Step>>>,
}

impl ScriptedProber {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, endpoint: &Endpoint, step: Step) {
        self.scripts
            .lock()
            .unwrap()
            .entry(endpoint.clone())
            .or_default()
            .push_back(step);
    }

    pub fn repeat(&self, endpoint: &Endpoint, outcome: ProbeOutcome, times: usize) {
        for _ in 0..times {
            self.push(endpoint, Step::Outcome(outcome.clone()));
        }
    }
}

#[async_trait]
impl Prober for ScriptedProber {
    async fn probe(&self, endpoint: &Endpoint) -> ProbeOutcome {
        let step = self
            .scripts
            .lock()
            .unwrap()
            .get_mut(endpoint)
            .and_then(VecDeque::pop_front);

        match step {
            None => ProbeOutcome::Success(200),
            Some(Step::Outcome(outcome)) => outcome,
            Some(Step::Delayed(delay, outcome)) => {
                tokio::time::sleep(delay).await;
                outcome
            }
            Some(Step::Panic(msg)) => panic!("{}", msg),
        }
    }
}

/// Notifier that records every message.
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
    succeed: bool,
    delay: Duration,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::with(true, Duration::ZERO)
    }

    pub fn with(succeed: bool, delay: Duration) -> Self {
        Self {
            messages: Mutex::new(Vec::new()),
            succeed,
            delay,
        }
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn send(&self, message: &str) -> bool {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.messages.lock().unwrap().push(message.to_string());
        self.succeed
    }
}
