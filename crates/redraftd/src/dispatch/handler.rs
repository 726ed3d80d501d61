//! Connection handler that serves one JSONL request per connection.

use std::io::{self, Read};

use tracing::{debug, info, warn};

use crate::transport::{ConnectionHandler, ConnectionStream};

use super::errors::DispatchError;
use super::request::ApiRequest;
use super::response::ResponseWriter;
use super::router::{ApiRouter, DISPATCH_TARGET};

/// Maximum size of a single request line in bytes.
pub(crate) const MAX_REQUEST_BYTES: usize = 1024 * 1024;

/// Reads a request, routes it, and writes exactly one response line.
pub struct DispatchConnectionHandler {
    router: ApiRouter,
}

impl DispatchConnectionHandler {
    /// Creates a handler around `router`.
    #[must_use]
    pub const fn new(router: ApiRouter) -> Self {
        Self { router }
    }

    fn dispatch(&self, mut stream: ConnectionStream) {
        let line = match read_request_line(&mut stream) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => {
                debug!(target: DISPATCH_TARGET, "client disconnected without request");
                return;
            }
            Err(error) => {
                warn!(target: DISPATCH_TARGET, %error, "failed to read request");
                reply_error(&mut stream, &error);
                return;
            }
        };

        let result = ApiRequest::parse(&line).and_then(|request| {
            debug!(
                target: DISPATCH_TARGET,
                method = request.method(),
                path = request.path(),
                "dispatching request"
            );
            self.router.route(request)
        });

        let mut writer = ResponseWriter::new(&mut stream);
        match result {
            Ok(response) => {
                info!(target: DISPATCH_TARGET, status = response.status(), "request served");
                if let Err(error) = writer.write(&response) {
                    warn!(target: DISPATCH_TARGET, %error, "failed to write response");
                }
            }
            Err(error) => {
                warn!(
                    target: DISPATCH_TARGET,
                    %error,
                    status = error.status(),
                    "request failed"
                );
                if let Err(write_error) = writer.write_error(&error) {
                    warn!(target: DISPATCH_TARGET, error = %write_error, "failed to write error");
                }
            }
        }
    }
}

impl ConnectionHandler for DispatchConnectionHandler {
    fn handle(&self, stream: ConnectionStream) {
        self.dispatch(stream);
    }
}

fn reply_error(stream: &mut ConnectionStream, error: &DispatchError) {
    if let Err(write_error) = ResponseWriter::new(stream).write_error(error) {
        warn!(target: DISPATCH_TARGET, error = %write_error, "failed to write error");
    }
}

/// Reads a bounded JSONL request line.
///
/// Returns `Ok(None)` when the client disconnects without sending data and
/// the partial line when the client closes before a newline.
fn read_request_line(stream: &mut impl Read) -> Result<Option<Vec<u8>>, DispatchError> {
    let mut buffer = Vec::new();
    let mut chunk = [0_u8; 1024];

    loop {
        let bytes_read = read_with_retry(stream, &mut chunk)?;
        let Some(received) = chunk.get(..bytes_read) else {
            return Err(DispatchError::malformed("read past buffer"));
        };
        if received.is_empty() {
            return Ok((!buffer.is_empty()).then_some(buffer));
        }

        if let Some(newline) = received.iter().position(|byte| *byte == b'\n') {
            buffer.extend(received.iter().take(newline + 1));
            enforce_limit(buffer.len())?;
            return Ok(Some(buffer));
        }

        buffer.extend_from_slice(received);
        enforce_limit(buffer.len())?;
    }
}

fn read_with_retry(stream: &mut impl Read, buf: &mut [u8]) -> io::Result<usize> {
    loop {
        match stream.read(buf) {
            Ok(read) => return Ok(read),
            Err(error) if error.kind() == io::ErrorKind::Interrupted => {}
            Err(error) => return Err(error),
        }
    }
}

const fn enforce_limit(size: usize) -> Result<(), DispatchError> {
    if size > MAX_REQUEST_BYTES {
        return Err(DispatchError::request_too_large(size, MAX_REQUEST_BYTES));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::{BufRead, BufReader, Cursor, Write};
    use std::net::{Shutdown, TcpListener, TcpStream};
    use std::sync::Arc;
    use std::thread::{self, JoinHandle};

    use redraft_providers::EchoProvider;
    use rstest::{fixture, rstest};
    use serde_json::Value;

    use crate::revision::{Orchestrator, RevisionPolicy};

    use super::*;

    struct HandlerTestHarness {
        client: TcpStream,
        server_handle: JoinHandle<()>,
    }

    impl HandlerTestHarness {
        fn send_and_collect(mut self, request: &[u8]) -> Vec<Value> {
            self.client.write_all(request).expect("write request");
            self.client.flush().expect("flush");
            self.client
                .shutdown(Shutdown::Write)
                .expect("close write half");

            let reader = BufReader::new(&mut self.client);
            let lines: Vec<Value> = reader
                .lines()
                .map(|line| serde_json::from_str(&line.expect("read line")).expect("json line"))
                .collect();
            self.server_handle.join().expect("server join");
            lines
        }
    }

    #[fixture]
    fn harness() -> HandlerTestHarness {
        let listener = TcpListener::bind(("127.0.0.1", 0)).expect("bind");
        let addr = listener.local_addr().expect("addr");
        let server_handle = thread::spawn(move || {
            let (stream, _) = listener.accept().expect("accept");
            let provider: Arc<dyn redraft_providers::RewriteProvider> = Arc::new(EchoProvider);
            let router = ApiRouter::new(Orchestrator::new(provider, RevisionPolicy::default()));
            DispatchConnectionHandler::new(router).handle(ConnectionStream::Tcp(stream));
        });
        let client = TcpStream::connect(addr).expect("connect");
        HandlerTestHarness {
            client,
            server_handle,
        }
    }

    #[rstest]
    fn serves_metrics_request(harness: HandlerTestHarness) {
        let lines = harness.send_and_collect(
            b"{\"method\":\"POST\",\"path\":\"/metrics\",\"body\":{\"text\":\"The cat sat.\"}}\n",
        );
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0]["status"], 200);
        assert_eq!(lines[0]["body"]["sentenceLengths"], serde_json::json!([3]));
    }

    #[rstest]
    fn malformed_json_is_400(harness: HandlerTestHarness) {
        let lines = harness.send_and_collect(b"not valid json\n");
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0]["status"], 400);
    }

    #[rstest]
    fn request_without_newline_is_served(harness: HandlerTestHarness) {
        let lines = harness.send_and_collect(b"{\"method\":\"GET\",\"path\":\"/metrics\"}");
        assert_eq!(lines[0]["status"], 405);
    }

    #[test]
    fn oversized_lines_are_rejected() {
        let mut input = Cursor::new(vec![b'a'; MAX_REQUEST_BYTES + 10]);
        let error = read_request_line(&mut input).expect_err("too large");
        assert_eq!(error.status(), 413);
    }

    #[test]
    fn empty_stream_yields_nothing() {
        let mut input = Cursor::new(Vec::new());
        assert!(read_request_line(&mut input).expect("read").is_none());
    }
}
