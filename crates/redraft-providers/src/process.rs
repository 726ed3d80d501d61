//! Provider backed by an external process speaking the JSONL protocol.
//!
//! [`ProcessProvider`] spawns the configured executable with piped stdio,
//! writes one request line, reads one response line, and waits for the
//! process to exit. The whole exchange is bounded by the smaller of the
//! command's timeout and the directive's remaining time budget; on expiry
//! the child is killed.

use std::io::{self, BufRead, BufReader, ErrorKind, Read, Write};
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::command::ProviderCommand;
use crate::directive::RewriteDirective;
use crate::error::ProviderError;
use crate::protocol::{ProviderRequest, ProviderResponse};
use crate::provider::RewriteProvider;

const PROVIDER_TARGET: &str = concat!(env!("CARGO_PKG_NAME"), "::process");

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Runs an external executable for every rewrite.
///
/// # Example
///
/// ```rust,no_run
/// use std::time::Duration;
///
/// use redraft_core::Controls;
/// use redraft_providers::{ProcessProvider, ProviderCommand, RewriteDirective, RewriteProvider};
///
/// let command = ProviderCommand::new("llm", "/usr/local/bin/llm-rewrite")
///     .with_timeout(Duration::from_secs(20));
/// let provider = ProcessProvider::new(command);
/// let directive = RewriteDirective::new(&Controls::default(), Vec::new());
/// let revised = provider.rewrite("Some text.", &directive);
/// ```
#[derive(Debug, Clone)]
pub struct ProcessProvider {
    command: ProviderCommand,
}

impl ProcessProvider {
    /// Creates a provider for `command`.
    #[must_use]
    pub const fn new(command: ProviderCommand) -> Self {
        Self { command }
    }

    /// The launched command.
    #[must_use]
    pub const fn command(&self) -> &ProviderCommand {
        &self.command
    }
}

impl RewriteProvider for ProcessProvider {
    fn name(&self) -> &str {
        self.command.name()
    }

    fn rewrite(&self, text: &str, directive: &RewriteDirective) -> Result<String, ProviderError> {
        let timeout = self.command.timeout().min(directive.time_budget());
        let request = ProviderRequest::new(text, directive);
        exchange(&self.command, &request, timeout)?.into_text(self.command.name())
    }
}

fn exchange(
    command: &ProviderCommand,
    request: &ProviderRequest,
    timeout: Duration,
) -> Result<ProviderResponse, ProviderError> {
    let name = command.name();
    let started = Instant::now();

    debug!(
        target: PROVIDER_TARGET,
        provider = name,
        executable = %command.executable().display(),
        attempt = request.directive().attempt(),
        timeout_ms = millis(timeout),
        "spawning provider process"
    );

    let mut child = Command::new(command.executable())
        .args(command.args())
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|err| spawn_error(command, err))?;

    let result = converse(name, &mut child, request, started, timeout);
    if result.is_err() {
        terminate(&mut child);
    }
    result
}

fn converse(
    name: &str,
    child: &mut Child,
    request: &ProviderRequest,
    started: Instant,
    timeout: Duration,
) -> Result<ProviderResponse, ProviderError> {
    let stdin = child.stdin.take().ok_or_else(|| missing_pipe(name, "stdin"))?;
    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| missing_pipe(name, "stdout"))?;
    if let Some(stderr) = child.stderr.take() {
        drain_stderr(name, stderr);
    }

    let written = write_request(name, stdin, request)?;
    let line = read_response(name, stdout, started, timeout)?;
    await_write(name, &written, started, timeout)?;
    wait_for_exit(name, child, started, timeout)?;
    parse_response(name, &line)
}

fn spawn_error(command: &ProviderCommand, err: io::Error) -> ProviderError {
    if err.kind() == ErrorKind::NotFound {
        return ProviderError::ExecutableNotFound {
            name: command.name().to_owned(),
            path: command.executable().to_path_buf(),
        };
    }
    ProviderError::SpawnFailed {
        name: command.name().to_owned(),
        message: err.to_string(),
        source: Some(Arc::new(err)),
    }
}

fn missing_pipe(name: &str, pipe: &str) -> ProviderError {
    ProviderError::SpawnFailed {
        name: name.to_owned(),
        message: format!("failed to capture {pipe}"),
        source: None,
    }
}

fn io_error(name: &str, err: io::Error) -> ProviderError {
    ProviderError::Io {
        name: name.to_owned(),
        source: Arc::new(err),
    }
}

/// Writes the request line and closes stdin on a helper thread, so a child
/// that never drains its stdin cannot hold the exchange past the timeout.
fn write_request(
    name: &str,
    mut stdin: ChildStdin,
    request: &ProviderRequest,
) -> Result<Receiver<io::Result<()>>, ProviderError> {
    let json = serde_json::to_string(request).map_err(ProviderError::SerializeRequest)?;

    debug!(
        target: PROVIDER_TARGET,
        provider = name,
        request_bytes = json.len(),
        "writing request to provider stdin"
    );

    let (sender, receiver) = mpsc::channel();
    thread::spawn(move || {
        let outcome = stdin
            .write_all(json.as_bytes())
            .and_then(|()| stdin.write_all(b"\n"))
            .and_then(|()| stdin.flush());
        drop(stdin);
        drop(sender.send(outcome));
    });
    Ok(receiver)
}

fn await_write(
    name: &str,
    written: &Receiver<io::Result<()>>,
    started: Instant,
    timeout: Duration,
) -> Result<(), ProviderError> {
    match written.recv_timeout(timeout.saturating_sub(started.elapsed())) {
        Ok(Ok(())) => Ok(()),
        Ok(Err(err)) => Err(io_error(name, err)),
        Err(RecvTimeoutError::Timeout) => Err(timed_out(name, timeout)),
        Err(RecvTimeoutError::Disconnected) => Err(ProviderError::InvalidOutput {
            name: name.to_owned(),
            message: String::from("stdin writer stopped unexpectedly"),
        }),
    }
}

/// Reads one line from stdout on a helper thread so the wait can time out.
fn read_response(
    name: &str,
    stdout: ChildStdout,
    started: Instant,
    timeout: Duration,
) -> Result<String, ProviderError> {
    let (sender, receiver) = mpsc::channel();
    thread::spawn(move || {
        let mut line = String::new();
        let outcome = BufReader::new(stdout).read_line(&mut line).map(|_| line);
        drop(sender.send(outcome));
    });

    match receiver.recv_timeout(timeout.saturating_sub(started.elapsed())) {
        Ok(Ok(line)) if line.is_empty() => Err(ProviderError::InvalidOutput {
            name: name.to_owned(),
            message: String::from("provider produced no output on stdout"),
        }),
        Ok(Ok(line)) => {
            debug!(
                target: PROVIDER_TARGET,
                provider = name,
                bytes_read = line.len(),
                "read response from provider stdout"
            );
            Ok(line)
        }
        Ok(Err(err)) => Err(io_error(name, err)),
        Err(RecvTimeoutError::Timeout) => Err(timed_out(name, timeout)),
        Err(RecvTimeoutError::Disconnected) => Err(ProviderError::InvalidOutput {
            name: name.to_owned(),
            message: String::from("stdout reader stopped unexpectedly"),
        }),
    }
}

/// Logs stderr on a helper thread so a chatty child never blocks.
fn drain_stderr(name: &str, stderr: impl Read + Send + 'static) {
    let provider = name.to_owned();
    thread::spawn(move || {
        let mut buffer = String::new();
        if BufReader::new(stderr).read_to_string(&mut buffer).is_ok() && !buffer.is_empty() {
            debug!(
                target: PROVIDER_TARGET,
                provider = %provider,
                stderr = %buffer.trim(),
                "provider stderr output"
            );
        }
    });
}

fn wait_for_exit(
    name: &str,
    child: &mut Child,
    started: Instant,
    timeout: Duration,
) -> Result<(), ProviderError> {
    loop {
        match child.try_wait() {
            Ok(Some(status)) => {
                debug!(target: PROVIDER_TARGET, provider = name, ?status, "provider exited");
                if status.success() {
                    return Ok(());
                }
                return Err(ProviderError::NonZeroExit {
                    name: name.to_owned(),
                    status: status.code().unwrap_or(-1),
                });
            }
            Ok(None) if started.elapsed() > timeout => {
                return Err(timed_out(name, timeout));
            }
            Ok(None) => thread::sleep(POLL_INTERVAL),
            Err(err) => return Err(io_error(name, err)),
        }
    }
}

fn terminate(child: &mut Child) {
    if matches!(child.try_wait(), Ok(Some(_))) {
        return;
    }
    warn!(target: PROVIDER_TARGET, pid = child.id(), "killing provider process");
    drop(child.kill());
    drop(child.wait());
}

fn timed_out(name: &str, timeout: Duration) -> ProviderError {
    ProviderError::Timeout {
        name: name.to_owned(),
        timeout_ms: millis(timeout),
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

fn parse_response(name: &str, line: &str) -> Result<ProviderResponse, ProviderError> {
    serde_json::from_str(line.trim()).map_err(|err| ProviderError::DeserializeResponse {
        message: format!("provider '{name}' produced invalid JSON: {err}"),
        source: Some(err),
    })
}

#[cfg(all(test, unix))]
mod tests {
    use std::time::Duration;

    use redraft_core::Controls;
    use rstest::rstest;

    use super::*;

    fn shell(script: &str) -> ProcessProvider {
        ProcessProvider::new(
            ProviderCommand::new("shell", "/bin/sh")
                .with_args(["-c", script])
                .with_timeout(Duration::from_secs(5)),
        )
    }

    fn directive() -> RewriteDirective {
        RewriteDirective::new(&Controls::default(), vec!["[1]".into()])
    }

    #[test]
    fn returns_candidate_text() {
        let provider =
            shell(r#"read -r _line; printf '%s\n' '{"success":true,"text":"Better [1]."}'"#);
        let text = provider.rewrite("Good [1].", &directive()).expect("rewrite");
        assert_eq!(text, "Better [1].");
    }

    #[test]
    fn request_line_reaches_the_provider() {
        let provider = shell(
            r#"read -r line; case "$line" in *'"operation":"rewrite"'*) printf '%s\n' '{"success":true,"text":"ok"}';; *) exit 9;; esac"#,
        );
        assert_eq!(provider.rewrite("x", &directive()).expect("rewrite"), "ok");
    }

    #[rstest]
    #[case::rejection(
        r#"read -r _l; printf '%s\n' '{"success":false,"message":"busy"}'"#,
        "rejected"
    )]
    #[case::invalid_json(r"read -r _l; echo not-json", "invalid JSON")]
    #[case::silent(r"read -r _l", "no output")]
    #[case::non_zero(
        r#"read -r _l; printf '%s\n' '{"success":true,"text":"t"}'; exit 3"#,
        "status 3"
    )]
    fn maps_failures(#[case] script: &str, #[case] expected: &str) {
        let error = shell(script)
            .rewrite("x", &directive())
            .expect_err("script should fail");
        assert!(error.to_string().contains(expected), "got: {error}");
    }

    #[test]
    fn kills_slow_providers() {
        let provider = ProcessProvider::new(
            ProviderCommand::new("sleepy", "/bin/sh")
                .with_args(["-c", "sleep 5"])
                .with_timeout(Duration::from_millis(200)),
        );
        let started = Instant::now();
        let error = provider
            .rewrite("x", &directive())
            .expect_err("must time out");
        assert!(error.is_timeout(), "got: {error}");
        assert!(started.elapsed() < Duration::from_secs(4));
    }

    #[test]
    fn unread_stdin_does_not_outlast_the_timeout() {
        let provider = ProcessProvider::new(
            ProviderCommand::new("deaf", "/bin/sh")
                .with_args(["-c", "sleep 4"])
                .with_timeout(Duration::from_millis(200)),
        );
        let text = "word ".repeat(60_000);
        let started = Instant::now();
        let error = provider
            .rewrite(&text, &directive())
            .expect_err("must time out");
        assert!(error.is_timeout(), "got: {error}");
        assert!(started.elapsed() < Duration::from_secs(3));
    }

    #[test]
    fn directive_budget_caps_the_timeout() {
        let provider = shell("sleep 5");
        let tight = directive().with_time_budget(Duration::from_millis(100));
        let error = provider.rewrite("x", &tight).expect_err("must time out");
        assert!(
            matches!(error, ProviderError::Timeout { timeout_ms: 100, .. }),
            "got: {error}"
        );
    }

    #[test]
    fn missing_executable_is_reported() {
        let provider = ProcessProvider::new(ProviderCommand::new(
            "ghost",
            "/nonexistent/redraft-provider",
        ));
        let error = provider.rewrite("x", &directive()).expect_err("must fail");
        assert!(matches!(error, ProviderError::ExecutableNotFound { .. }));
    }
}
