//! Response body that streams an object to the client.
//!
//! Wraps the backend [`ObjectBody`], counts bytes as they pass through and
//! logs the outcome of the copy. The wrapped stream is dropped together with
//! this body, which releases the backend handle on every exit path: normal
//! completion, backend read failure, or client disconnect.

use std::pin::Pin;
use std::task::{Context, Poll};

use bytes::Bytes;
use futures::Stream;
use tracing::{info, warn};

use crate::error::StreamError;
use crate::io::ObjectBody;

/// Streaming copy state for one response.
pub struct TransferBody {
    inner: ObjectBody,
    raw_path: String,
    bytes_copied: u64,
    finished: bool,
}

impl TransferBody {
    pub fn new(inner: ObjectBody, raw_path: impl Into<String>) -> Self {
        Self {
            inner,
            raw_path: raw_path.into(),
            bytes_copied: 0,
            finished: false,
        }
    }

    /// Number of bytes handed to the transport so far.
    pub fn bytes_copied(&self) -> u64 {
        self.bytes_copied
    }
}

impl Stream for TransferBody {
    type Item = Result<Bytes, StreamError>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        if this.finished {
            return Poll::Ready(None);
        }

        match this.inner.as_mut().poll_next(cx) {
            Poll::Ready(Some(Ok(chunk))) => {
                this.bytes_copied += chunk.len() as u64;
                Poll::Ready(Some(Ok(chunk)))
            }
            Poll::Ready(Some(Err(e))) => {
                // Headers are already on the wire, so the response can only be cut short.
                this.finished = true;
                warn!(
                    path = %this.raw_path,
                    bytes = this.bytes_copied,
                    error = %e,
                    "Backend stream failed, truncating response"
                );
                Poll::Ready(Some(Err(e)))
            }
            Poll::Ready(None) => {
                this.finished = true;
                info!(
                    path = %this.raw_path,
                    bytes = this.bytes_copied,
                    "{}: {} bytes are copied",
                    this.raw_path,
                    this.bytes_copied
                );
                Poll::Ready(None)
            }
            Poll::Pending => Poll::Pending,
        }
    }
}

impl Drop for TransferBody {
    fn drop(&mut self) {
        if !self.finished {
            warn!(
                path = %self.raw_path,
                bytes = self.bytes_copied,
                "Response dropped before completion (client disconnected)"
            );
        }
    }
}
