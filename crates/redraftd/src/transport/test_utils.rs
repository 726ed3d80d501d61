//! Helpers shared by transport tests.

use std::io::{BufRead, BufReader, Write};
use std::sync::Mutex;
use std::thread;
use std::time::{Duration, Instant};

use super::{ConnectionHandler, ConnectionStream};

/// Echoes the first line of each connection back and records it.
#[derive(Debug, Default)]
pub(crate) struct RecordingHandler {
    lines: Mutex<Vec<String>>,
}

impl RecordingHandler {
    pub(crate) fn lines(&self) -> Vec<String> {
        self.lines.lock().expect("lines mutex").clone()
    }
}

impl ConnectionHandler for RecordingHandler {
    fn handle(&self, stream: ConnectionStream) {
        let mut reader = BufReader::new(stream);
        let mut line = String::new();
        if reader.read_line(&mut line).is_err() {
            return;
        }
        if reader.get_mut().write_all(line.as_bytes()).is_ok() {
            self.lines.lock().expect("lines mutex").push(line);
        }
    }
}

/// Polls `condition` for up to two seconds.
pub(crate) fn wait_for(condition: impl Fn() -> bool) -> bool {
    let deadline = Instant::now() + Duration::from_secs(2);
    while Instant::now() < deadline {
        if condition() {
            return true;
        }
        thread::sleep(Duration::from_millis(10));
    }
    false
}
