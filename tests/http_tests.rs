//! HTTP prober tests against a throwaway server on 127.0.0.1.

use pathprobe::engine::{HttpProber, Probe};
use pathprobe::pipeline::{CancelToken, Sinks};
use pathprobe::{Method, ProbeOpts, ProbeOutcome, ResultRecord, ScanOpts, probe_host};
use std::io::{BufRead, BufReader, Cursor, Write};
use std::net::{TcpListener, TcpStream};
use std::thread;
use std::time::Duration;

/// Maps (method, request target) to a status line; `None` never answers.
type Handler = fn(&str, &str) -> Option<&'static str>;

fn routes(method: &str, target: &str) -> Option<&'static str> {
    match target {
        "/admin.php" => Some("200 OK"),
        "/backup.zip" => Some("404 Not Found"),
        "/old/" => Some("500 Internal Server Error"),
        "/fine" => Some("200 Everything Is Fine"),
        "/get-only" if method == "GET" => Some("200 OK"),
        "/get-only" => Some("405 Method Not Allowed"),
        "/hang" => None,
        _ => Some("404 Not Found"),
    }
}

fn serve(stream: TcpStream, handler: Handler) {
    let Ok(read_half) = stream.try_clone() else {
        return;
    };
    let mut reader = BufReader::new(read_half);
    let mut request_line = String::new();
    if reader.read_line(&mut request_line).is_err() {
        return;
    }
    loop {
        let mut header = String::new();
        match reader.read_line(&mut header) {
            Ok(0) => break,
            Ok(_) if header == "\r\n" || header == "\n" => break,
            Ok(_) => continue,
            Err(_) => return,
        }
    }
    let mut parts = request_line.split_whitespace();
    let method = parts.next().unwrap_or("GET");
    let target = parts.next().unwrap_or("/");
    match handler(method, target) {
        Some(status_line) => {
            let body = "hello";
            let resp = format!(
                "HTTP/1.1 {status_line}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                body.len(),
                if method == "HEAD" { "" } else { body }
            );
            let mut stream = stream;
            let _ = stream.write_all(resp.as_bytes());
            let _ = stream.flush();
        }
        None => thread::sleep(Duration::from_secs(3)),
    }
}

/// Start a server on an ephemeral port; returns the port. The server lives for the test process.
fn spawn_server(handler: Handler) -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            thread::spawn(move || serve(stream, handler));
        }
    });
    port
}

fn target(port: u16, method: Method, timeout: Duration) -> ProbeOpts {
    ProbeOpts {
        host: "127.0.0.1".to_string(),
        port,
        method,
        timeout,
        use_env_proxy: false,
        ..Default::default()
    }
}

fn lines(buf: &[u8]) -> Vec<String> {
    let mut v: Vec<String> = String::from_utf8_lossy(buf)
        .lines()
        .map(str::to_string)
        .collect();
    v.sort();
    v
}

// --- HttpProber ---

#[test]
fn test_probe_reports_status_regardless_of_code() {
    let port = spawn_server(routes);
    let prober = HttpProber::new(&target(port, Method::Head, Duration::from_secs(5))).unwrap();
    assert_eq!(
        prober.probe("old/"),
        ProbeOutcome::Responded {
            version: "HTTP/1.1".to_string(),
            status: 500,
            status_text: "Internal Server Error".to_string(),
        }
    );
    let rec = ResultRecord::new("backup.zip".to_string(), &prober.probe("backup.zip"));
    assert_eq!(rec.line, "backup.zip\tHTTP/1.1 404 Not Found");
}

#[test]
fn test_probe_uses_canonical_reason_phrase() {
    let port = spawn_server(routes);
    let prober = HttpProber::new(&target(port, Method::Get, Duration::from_secs(5))).unwrap();
    let rec = ResultRecord::new("fine".to_string(), &prober.probe("fine"));
    assert_eq!(rec.line, "fine\tHTTP/1.1 200 OK");
}

#[test]
fn test_probe_method_selection() {
    let port = spawn_server(routes);
    let head = HttpProber::new(&target(port, Method::Head, Duration::from_secs(5))).unwrap();
    let get = HttpProber::new(&target(port, Method::Get, Duration::from_secs(5))).unwrap();
    assert!(matches!(
        head.probe("get-only"),
        ProbeOutcome::Responded { status: 405, .. }
    ));
    assert!(matches!(
        get.probe("get-only"),
        ProbeOutcome::Responded { status: 200, .. }
    ));
}

#[test]
fn test_probe_timeout_is_reported_as_error() {
    let port = spawn_server(routes);
    let prober =
        HttpProber::new(&target(port, Method::Head, Duration::from_millis(300))).unwrap();
    let rec = ResultRecord::new("hang".to_string(), &prober.probe("hang"));
    assert!(rec.is_error());
    assert!(rec.line.starts_with("hang\t---ERROR: timeout:"), "{}", rec.line);
}

#[test]
fn test_probe_connection_refused_is_reported_as_error() {
    // Bind then drop to get a port with nothing listening.
    let port = {
        let l = TcpListener::bind("127.0.0.1:0").unwrap();
        l.local_addr().unwrap().port()
    };
    let prober = HttpProber::new(&target(port, Method::Head, Duration::from_secs(2))).unwrap();
    match prober.probe("admin.php") {
        ProbeOutcome::Failed { description } => assert!(!description.is_empty()),
        other => panic!("expected failure, got {other:?}"),
    }
}

// --- End-to-end scan ---

#[test]
fn test_scan_against_server() {
    let port = spawn_server(routes);
    let dict = "admin.php\n\nbackup.zip\nold/\n";
    let report = probe_host(
        Cursor::new(dict),
        &target(port, Method::Head, Duration::from_secs(5)),
        Sinks::new(Vec::new(), Vec::new(), Vec::new()),
        &ScanOpts::default(),
        &CancelToken::new(),
    )
    .unwrap();

    assert_eq!(
        lines(&report.sinks.raw),
        vec![
            "admin.php\tHTTP/1.1 200 OK",
            "backup.zip\tHTTP/1.1 404 Not Found",
            "old/\tHTTP/1.1 500 Internal Server Error",
        ]
    );
    assert_eq!(lines(&report.sinks.success), vec!["admin.php\tHTTP/1.1 200 OK"]);
    assert_eq!(
        lines(&report.sinks.ex404),
        vec![
            "admin.php\tHTTP/1.1 200 OK",
            "old/\tHTTP/1.1 500 Internal Server Error",
        ]
    );
}

#[test]
fn test_scan_timeout_line_lands_in_ex404_only() {
    let port = spawn_server(routes);
    let report = probe_host(
        Cursor::new("hang\nadmin.php\n"),
        &target(port, Method::Get, Duration::from_millis(300)),
        Sinks::new(Vec::new(), Vec::new(), Vec::new()),
        &ScanOpts {
            concurrency: 2,
            ..Default::default()
        },
        &CancelToken::new(),
    )
    .unwrap();

    let raw = lines(&report.sinks.raw);
    let hang = raw.iter().find(|l| l.starts_with("hang\t")).unwrap();
    assert!(hang.contains("---ERROR:"));
    assert!(lines(&report.sinks.ex404).contains(hang));
    assert!(!lines(&report.sinks.success).contains(hang));
    assert_eq!(report.summary.counts.errors, 1);
}
