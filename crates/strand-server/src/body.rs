//! Response body plumbing.
//!
//! Buffered responses use a `Full` body; streaming responses are fed
//! through a bounded channel so the render driver can keep writing after
//! the response head has gone out.

use std::convert::Infallible;

use bytes::Bytes;
use futures::channel::mpsc;
use futures::{future, SinkExt};
use http_body_util::combinators::BoxBody;
use http_body_util::{BodyExt, Full, StreamBody};
use hyper::body::Frame;

/// Boxed response body used across the server.
pub type ResponseBody = BoxBody<Bytes, Infallible>;

type FrameResult = Result<Frame<Bytes>, Infallible>;
type WrapFuture = future::Ready<Result<FrameResult, mpsc::SendError>>;

/// Byte sink feeding a streaming response body. Dropping it ends the body.
pub type BodySink = futures::sink::With<
    mpsc::Sender<FrameResult>,
    FrameResult,
    Bytes,
    WrapFuture,
    fn(Bytes) -> WrapFuture,
>;

/// Build a complete (buffered) response body.
pub fn full_body(bytes: impl Into<Bytes>) -> ResponseBody {
    Full::new(bytes.into()).boxed()
}

fn wrap_frame(chunk: Bytes) -> WrapFuture {
    future::ready(Ok(Ok(Frame::data(chunk))))
}

/// Create a channel-backed streaming body.
///
/// Chunks pushed into the sink appear as body frames in order. Closing or
/// dropping the sink completes the body, which is how an aborted render
/// ends the connection instead of holding it open.
pub fn body_channel(capacity: usize) -> (BodySink, ResponseBody) {
    let (tx, rx) = mpsc::channel::<FrameResult>(capacity);
    let sink = tx.with(wrap_frame as fn(Bytes) -> WrapFuture);
    (sink, StreamBody::new(rx).boxed())
}
