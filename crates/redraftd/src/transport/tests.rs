//! Tests for the socket listener.

use std::io::{BufRead, BufReader, Write};
use std::net::TcpStream;
use std::sync::Arc;

use rstest::{fixture, rstest};

use redraft_config::SocketEndpoint;

use super::{ListenerError, RecordingHandler, SocketListener, wait_for};

#[fixture]
fn handler() -> Arc<RecordingHandler> {
    Arc::new(RecordingHandler::default())
}

fn exchange(stream: &mut (impl std::io::Read + Write), line: &str) -> String {
    stream.write_all(line.as_bytes()).expect("write line");
    let mut reader = BufReader::new(stream);
    let mut reply = String::new();
    reader.read_line(&mut reply).expect("read reply");
    reply
}

#[rstest]
fn tcp_listener_serves_each_connection(handler: Arc<RecordingHandler>) {
    let listener =
        SocketListener::bind(&SocketEndpoint::tcp("127.0.0.1", 0)).expect("bind tcp listener");
    let addr = listener.local_addr().expect("tcp listeners report an address");
    let handle = listener.start(handler.clone()).expect("start listener");

    for line in ["first\n", "second\n"] {
        let mut client = TcpStream::connect(addr).expect("connect");
        assert_eq!(exchange(&mut client, line), line);
    }

    assert!(wait_for(|| handler.lines().len() == 2));
    handle.shutdown();
    handle.join().expect("join listener");
}

#[cfg(unix)]
mod unix {
    use std::os::unix::net::{UnixListener, UnixStream};

    use tempfile::TempDir;

    use super::*;

    #[fixture]
    fn socket_dir() -> TempDir {
        tempfile::tempdir().expect("temp dir")
    }

    fn endpoint(dir: &TempDir) -> SocketEndpoint {
        let path = dir.path().join("redraftd.sock");
        SocketEndpoint::unix(path.to_str().expect("utf8 path"))
    }

    #[rstest]
    fn stale_socket_is_replaced_and_removed_on_shutdown(
        socket_dir: TempDir,
        handler: Arc<RecordingHandler>,
    ) {
        let path = socket_dir.path().join("redraftd.sock");
        drop(UnixListener::bind(&path).expect("bind stale listener"));
        assert!(path.exists());

        let listener = SocketListener::bind(&endpoint(&socket_dir)).expect("rebind");
        let handle = listener.start(handler.clone()).expect("start listener");
        let mut client = UnixStream::connect(&path).expect("connect");
        assert_eq!(exchange(&mut client, "ping\n"), "ping\n");

        handle.shutdown();
        handle.join().expect("join listener");
        assert!(!path.exists(), "socket file should be removed");
    }

    #[rstest]
    fn live_socket_is_not_taken_over(socket_dir: TempDir) {
        let path = socket_dir.path().join("redraftd.sock");
        let _live = UnixListener::bind(&path).expect("bind live listener");

        let error = SocketListener::bind(&endpoint(&socket_dir)).expect_err("socket in use");
        assert!(matches!(error, ListenerError::UnixInUse { .. }));
    }

    #[rstest]
    fn regular_file_is_not_replaced(socket_dir: TempDir) {
        let path = socket_dir.path().join("redraftd.sock");
        std::fs::write(&path, b"data").expect("write file");

        let error = SocketListener::bind(&endpoint(&socket_dir)).expect_err("not a socket");
        assert!(matches!(error, ListenerError::UnixNotSocket { .. }));
        assert!(path.exists());
    }
}
