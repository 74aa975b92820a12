//! Stub transports for exercising the control client without sockets

#![allow(dead_code)]

use std::fs;
use std::io::{self, Cursor};
use std::path::PathBuf;
use std::pin::Pin;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};

use async_trait::async_trait;
use soap_client::{
    CancellationToken, ControlRequest, HttpTransport, TransportError, TransportResponse,
};
use tokio::io::{AsyncRead, ReadBuf};

/// Load a fixture from the fixtures directory
pub fn load_fixture(filename: &str) -> String {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests/fixtures");
    path.push(filename);

    fs::read_to_string(&path).unwrap_or_else(|e| panic!("Failed to load fixture {}: {}", filename, e))
}

/// What the stub does when asked to perform a request
#[derive(Clone)]
pub enum Behavior {
    /// Answer with the given status and body
    Respond(u16, String),
    /// Fail before any response exists
    Fail(fn() -> TransportError),
    /// Answer 200 with a body whose read fails
    BrokenBody,
    /// Answer 200 with a body that never yields data
    StalledBody,
    /// Never answer; honour cancellation if a token was passed
    Hang,
}

/// A recorded call to [`StubTransport::perform`]
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub request: ControlRequest,
    pub had_cancel_token: bool,
}

/// Transport that records requests and tracks every body it hands out
pub struct StubTransport {
    behavior: Behavior,
    calls: Mutex<Vec<RecordedCall>>,
    open_bodies: Arc<AtomicUsize>,
    bodies_created: AtomicUsize,
}

impl StubTransport {
    pub fn new(behavior: Behavior) -> Arc<Self> {
        Arc::new(Self {
            behavior,
            calls: Mutex::new(Vec::new()),
            open_bodies: Arc::new(AtomicUsize::new(0)),
            bodies_created: AtomicUsize::new(0),
        })
    }

    pub fn ok(body: &str) -> Arc<Self> {
        Self::new(Behavior::Respond(200, body.to_string()))
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> ControlRequest {
        self.calls().last().expect("no request was performed").request.clone()
    }

    pub fn perform_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Bodies handed out and not yet dropped
    pub fn open_bodies(&self) -> usize {
        self.open_bodies.load(Ordering::SeqCst)
    }

    pub fn bodies_created(&self) -> usize {
        self.bodies_created.load(Ordering::SeqCst)
    }

    fn response(&self, body: BodyKind) -> TransportResponse {
        self.bodies_created.fetch_add(1, Ordering::SeqCst);
        self.open_bodies.fetch_add(1, Ordering::SeqCst);
        TransportResponse::new(
            200,
            Box::pin(TrackedBody {
                kind: body,
                open: self.open_bodies.clone(),
            }),
        )
    }
}

#[async_trait]
impl HttpTransport for StubTransport {
    async fn perform(
        &self,
        request: ControlRequest,
        cancel: Option<&CancellationToken>,
    ) -> Result<TransportResponse, TransportError> {
        self.calls.lock().unwrap().push(RecordedCall {
            request,
            had_cancel_token: cancel.is_some(),
        });

        match &self.behavior {
            Behavior::Respond(status, body) => {
                let mut response = self.response(BodyKind::Data(Cursor::new(body.clone().into_bytes())));
                response.status = *status;
                Ok(response)
            }
            Behavior::Fail(error) => Err(error()),
            Behavior::BrokenBody => Ok(self.response(BodyKind::Broken)),
            Behavior::StalledBody => Ok(self.response(BodyKind::Stalled)),
            Behavior::Hang => match cancel {
                Some(token) => {
                    token.cancelled().await;
                    Err(TransportError::Cancelled)
                }
                None => std::future::pending().await,
            },
        }
    }
}

enum BodyKind {
    Data(Cursor<Vec<u8>>),
    Broken,
    Stalled,
}

/// Body stream that decrements the open counter when dropped
struct TrackedBody {
    kind: BodyKind,
    open: Arc<AtomicUsize>,
}

impl AsyncRead for TrackedBody {
    fn poll_read(
        self: Pin<&mut Self>,
        cx: &mut Context<'_>,
        buf: &mut ReadBuf<'_>,
    ) -> Poll<io::Result<()>> {
        match &mut self.get_mut().kind {
            BodyKind::Data(cursor) => Pin::new(cursor).poll_read(cx, buf),
            BodyKind::Broken => Poll::Ready(Err(io::Error::new(
                io::ErrorKind::ConnectionReset,
                "connection reset by peer",
            ))),
            BodyKind::Stalled => Poll::Pending,
        }
    }
}

impl Drop for TrackedBody {
    fn drop(&mut self) {
        self.open.fetch_sub(1, Ordering::SeqCst);
    }
}
