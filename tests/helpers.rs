use nix::sys::signal::{kill, Signal};
use nix::unistd::Pid;
use std::process::Stdio;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tokio::sync::Mutex;
use tokio::sync::Notify;

pub type OutputLines<T> = Arc<Mutex<tokio::io::Lines<BufReader<T>>>>;

/// Builds a command running the compiled binary with the given arguments and
/// environment, capturing its output.
pub fn healthcheckup(args: &[&str], env_vars: &[(&str, &str)]) -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_healthcheckup"));
    command
        .args(args)
        .env("RUST_LOG", "info")
        .envs(env_vars.to_owned())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    command
}

/// Runs the binary and returns the process with its captured stdout and stderr.
#[allow(dead_code)] // Not dead code, used in tests.
pub fn execute(
    args: &[&str],
    env_vars: &[(&str, &str)],
) -> (
    tokio::process::Child,
    OutputLines<tokio::process::ChildStdout>,
    OutputLines<tokio::process::ChildStderr>,
) {
    let mut child = healthcheckup(args, env_vars)
        .spawn()
        .expect("The command should spawn a child process.");

    let stdout = child
        .stdout
        .take()
        .expect("Stdout output should be captured.");
    let stdout_lines = Arc::new(Mutex::new(BufReader::new(stdout).lines()));

    let stderr = child
        .stderr
        .take()
        .expect("Stderr output should be captured.");
    let stderr_lines = Arc::new(Mutex::new(BufReader::new(stderr).lines()));

    (child, stdout_lines, stderr_lines)
}

/// Returns a local port that nothing is listening on.
#[allow(dead_code)] // Not dead code, used in tests.
pub fn free_port() -> u16 {
    std::net::TcpListener::bind("127.0.0.1:0")
        .expect("A local port should be available.")
        .local_addr()
        .expect("The listener should have a local address.")
        .port()
}

#[allow(dead_code)] // Not dead code, used in tests.
pub async fn start_server(
    env_vars: &[(&str, &str)],
) -> (
    tokio::process::Child,
    OutputLines<tokio::process::ChildStderr>,
) {
    let (server, _stdout, lines) = execute(&["server", "start"], env_vars);

    // Wait for the server to start by checking for the log message "Server started." in an
    // asynchronous task.
    let notify = Arc::new(Notify::new());
    let notify_clone = notify.clone();
    let lines_clone = Arc::clone(&lines);
    tokio::spawn(async move {
        while let Ok(Some(line)) = lines_clone.lock().await.next_line().await {
            if line.contains("Server started.") {
                notify_clone.notify_one();
                break;
            }
        }
    });
    notify.notified().await;

    (server, lines)
}

#[allow(dead_code)] // Not dead code, used in tests.
pub async fn stop_server(server: &mut tokio::process::Child) {
    let pid = Pid::from_raw(
        server
            .id()
            .expect("The server process should be running and have a process ID.") as i32,
    );
    kill(pid, Signal::SIGINT).expect("The SIGINT signal should be sent.");

    // Wait for the server to shut down.
    let status = server
        .wait()
        .await
        .expect("The server process should exit.");
    assert!(status.success(), "Server did not shut down gracefully");
}

#[allow(dead_code)] // Not dead code, used in tests.
pub async fn assert_exit_code(mut child: tokio::process::Child, expected: i32) {
    let status = child.wait().await.expect("The command should exit.");
    assert_eq!(
        Some(expected),
        status.code(),
        "The command should exit with code {}.",
        expected
    );
}

#[allow(dead_code)] // Not dead code, used in tests.
pub async fn check_log_output_regex<T>(lines: OutputLines<T>, regex_expected_lines: Vec<&str>)
where
    T: tokio::io::AsyncRead + Unpin,
{
    let mut captured_lines = Vec::new();
    while let Ok(Some(line)) = lines.lock().await.next_line().await {
        captured_lines.push(line);
    }

    for expected_line in regex_expected_lines {
        let re = regex::Regex::new(expected_line).expect("Failed to compile regex");
        let found = captured_lines.iter().any(|line| re.is_match(line.as_ref()));
        assert!(
            found,
            "The output contains the line '{}'. Captured: {:?}",
            expected_line, captured_lines
        );
    }
}

#[allow(dead_code)] // Not dead code, used in tests.
pub async fn check_log_output<T>(lines: OutputLines<T>, expected_lines: Vec<&str>)
where
    T: tokio::io::AsyncRead + Unpin,
{
    let mut captured_lines = Vec::new();
    while let Ok(Some(line)) = lines.lock().await.next_line().await {
        captured_lines.push(line);
    }

    for expected_line in expected_lines {
        let found = captured_lines.iter().any(|line| line == expected_line);
        assert!(
            found,
            "The output contains the line '{}'. Captured: {:?}",
            expected_line, captured_lines
        );
    }
}
