//! Minimal HTTP/1.1 fixture server for integration tests.
//!
//! Serves canned replies per (method, path), counts hits and keeps the request
//! bodies it received. Every reply closes the connection.

#![allow(dead_code)]

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::{Shutdown, TcpListener, TcpStream};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use spotydown::config::Config;

#[derive(Debug, Clone)]
pub struct Reply {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
    /// Omit `Content-Length` and end the body by closing the connection.
    pub close_delimited: bool,
}

impl Reply {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: body.into(),
            close_delimited: false,
        }
    }

    pub fn json(body: &str) -> Self {
        Self::new(200, body).header("Content-Type", "application/json")
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    pub fn close_delimited(mut self) -> Self {
        self.close_delimited = true;
        self
    }
}

#[derive(Default)]
struct State {
    routes: HashMap<(String, String), Reply>,
    hits: HashMap<(String, String), usize>,
    bodies: HashMap<String, Vec<Vec<u8>>>,
}

pub struct FixtureServer {
    base: String,
    state: Arc<Mutex<State>>,
}

impl FixtureServer {
    /// Starts a server in a background thread. It runs until the process exits.
    pub fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
        let port = listener.local_addr().unwrap().port();
        let state = Arc::new(Mutex::new(State::default()));

        let shared = Arc::clone(&state);
        thread::spawn(move || {
            for stream in listener.incoming().flatten() {
                let state = Arc::clone(&shared);
                thread::spawn(move || handle(stream, &state));
            }
        });

        Self {
            base: format!("http://127.0.0.1:{}", port),
            state,
        }
    }

    pub fn base_url(&self) -> String {
        self.base.clone()
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    pub fn route(&self, method: &str, path: &str, reply: Reply) {
        self.state
            .lock()
            .unwrap()
            .routes
            .insert((method.to_string(), path.to_string()), reply);
    }

    pub fn hits(&self, method: &str, path: &str) -> usize {
        self.state
            .lock()
            .unwrap()
            .hits
            .get(&(method.to_string(), path.to_string()))
            .copied()
            .unwrap_or(0)
    }

    pub fn request_bodies(&self, path: &str) -> Vec<Vec<u8>> {
        self.state
            .lock()
            .unwrap()
            .bodies
            .get(path)
            .cloned()
            .unwrap_or_default()
    }

    /// A quiet, fast configuration pointing at this server.
    pub fn config(&self, output_dir: &std::path::Path) -> Config {
        Config {
            api_base_url: self.base_url(),
            timeout_seconds: 5,
            download_timeout_seconds: 10,
            output_dir: output_dir.to_path_buf(),
            chunk_size: 1024,
            ..Config::default()
        }
    }
}

fn handle(mut stream: TcpStream, state: &Mutex<State>) {
    let _ = stream.set_read_timeout(Some(Duration::from_secs(5)));
    let _ = stream.set_write_timeout(Some(Duration::from_secs(5)));

    let Some((method, path, body)) = read_request(&mut stream) else {
        return;
    };

    let reply = {
        let mut state = state.lock().unwrap();
        let key = (method.clone(), path.clone());
        *state.hits.entry(key.clone()).or_insert(0) += 1;
        state.bodies.entry(path.clone()).or_default().push(body);
        state.routes.get(&key).cloned()
    };
    let reply = reply.unwrap_or_else(|| Reply::new(404, "not found"));

    let mut head = format!("HTTP/1.1 {} {}\r\n", reply.status, reason(reply.status));
    for (name, value) in &reply.headers {
        head.push_str(&format!("{}: {}\r\n", name, value));
    }
    let has_length = reply
        .headers
        .iter()
        .any(|(name, _)| name.eq_ignore_ascii_case("content-length"));
    if !has_length && !reply.close_delimited {
        head.push_str(&format!("Content-Length: {}\r\n", reply.body.len()));
    }
    head.push_str("Connection: close\r\n\r\n");

    let _ = stream.write_all(head.as_bytes());
    if method != "HEAD" {
        let _ = stream.write_all(&reply.body);
    }
    let _ = stream.flush();
    let _ = stream.shutdown(Shutdown::Write);
}

fn read_request(stream: &mut TcpStream) -> Option<(String, String, Vec<u8>)> {
    let mut data = Vec::new();
    let mut buf = [0u8; 4096];

    let header_end = loop {
        let n = stream.read(&mut buf).ok()?;
        if n == 0 {
            return None;
        }
        data.extend_from_slice(&buf[..n]);
        if let Some(pos) = data.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&data[..header_end]).to_string();
    let mut lines = head.lines();
    let mut request_line = lines.next()?.split_whitespace();
    let method = request_line.next()?.to_string();
    let path = request_line.next()?.to_string();

    let content_length = lines
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
        .unwrap_or(0);

    let mut body = data[header_end..].to_vec();
    while body.len() < content_length {
        let n = stream.read(&mut buf).ok()?;
        if n == 0 {
            break;
        }
        body.extend_from_slice(&buf[..n]);
    }

    Some((method, path, body))
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "Status",
    }
}

pub fn brotli(data: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    {
        let mut writer = brotli::CompressorWriter::new(&mut out, 4096, 5, 22);
        writer.write_all(data).unwrap();
    }
    out
}

pub const TRACK_JSON: &str = r#"{
  "name": "Song",
  "artist": "Artist",
  "album_name": "Album",
  "album_artist": "Album Artist",
  "cover_url": "https://i.scdn.co/image/cover",
  "url": "https://open.spotify.com/track/abc123",
  "duration": "3:21"
}"#;

pub fn metadata_body(records: &[&str]) -> String {
    format!(r#"{{"apiResponse": {{"data": [{}]}}}}"#, records.join(","))
}
