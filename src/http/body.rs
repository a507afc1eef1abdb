//! Response body module
//!
//! Buffered pages and streamed files share one boxed body type so every
//! builder and hook works on the same `Response`.

use futures_util::TryStreamExt;
use http_body_util::combinators::UnsyncBoxBody;
use http_body_util::{BodyExt, Empty, Full, StreamBody};
use hyper::body::{Bytes, Frame};
use std::convert::Infallible;
use std::io;
use tokio::fs::File;
use tokio_util::io::ReaderStream;

/// Read buffer size for streamed files
const FILE_CHUNK_SIZE: usize = 64 * 1024;

pub type ResponseBody = UnsyncBoxBody<Bytes, io::Error>;

fn infallible(never: Infallible) -> io::Error {
    match never {}
}

pub fn empty() -> ResponseBody {
    Empty::<Bytes>::new().map_err(infallible).boxed_unsync()
}

pub fn full(data: impl Into<Bytes>) -> ResponseBody {
    Full::new(data.into()).map_err(infallible).boxed_unsync()
}

/// Stream an opened file in `FILE_CHUNK_SIZE` frames
pub fn file_stream(file: File) -> ResponseBody {
    let frames = ReaderStream::with_capacity(file, FILE_CHUNK_SIZE).map_ok(Frame::data);
    StreamBody::new(frames).boxed_unsync()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::testing::ScratchDir;
    use hyper::body::Body;

    #[tokio::test]
    async fn test_file_stream_yields_whole_file() {
        let scratch = ScratchDir::new("stream");
        let content = "0123456789".repeat(20_000);
        scratch.write("big.txt", &content);

        let file = File::open(scratch.root().join("big.txt")).await.unwrap();
        let body = file_stream(file);
        assert!(body.size_hint().exact().is_none());

        let bytes = body.collect().await.unwrap().to_bytes();
        assert_eq!(bytes.len(), content.len());
        assert_eq!(bytes, Bytes::from(content));
    }

    #[test]
    fn test_buffered_bodies_have_exact_size() {
        assert_eq!(empty().size_hint().exact(), Some(0));
        assert_eq!(full("404 Not Found").size_hint().exact(), Some(13));
    }
}
