//! Mock Twelve Data API server for testing
//!
//! Serves the two endpoints the quote provider uses:
//! - GET /exchange_rate?symbol=USD/RUB&apikey=... returns { symbol, rate, timestamp }
//! - GET /price?symbol=AAPL&apikey=... returns { price: "..." }
//!
//! Unknown symbols and bad keys get the API's in-body error shape.

use std::collections::HashMap;
use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use serde_json::json;
use url::Url;

/// Mock Twelve Data server for testing
pub struct MockTwelveDataServer {
    port: u16,
    running: Arc<AtomicBool>,
    thread_handle: Option<thread::JoinHandle<()>>,
}

/// Configuration for mock responses
#[derive(Debug, Clone)]
pub struct MockConfig {
    /// Known pairs (`USD/RUB`) and their rates
    pub rates: HashMap<String, f64>,
    /// Known stocks and their prices
    pub prices: HashMap<String, f64>,
    /// Answer every request with this HTTP status and an empty object
    pub http_status: Option<u16>,
    /// Delay in milliseconds before responding
    pub delay_ms: u64,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            rates: HashMap::from([
                ("USD/RUB".to_string(), 81.7265),
                ("EUR/RUB".to_string(), 89.1),
            ]),
            prices: HashMap::from([
                ("AAPL".to_string(), 189.98765),
                ("MSFT".to_string(), 410.5),
            ]),
            http_status: None,
            delay_ms: 0,
        }
    }
}

impl MockTwelveDataServer {
    /// Start a new mock server on a random available port
    pub fn start(config: MockConfig) -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0")?;
        let port = listener.local_addr()?.port();
        let running = Arc::new(AtomicBool::new(true));
        let running_clone = running.clone();

        // Non-blocking so the accept loop can observe shutdown
        listener.set_nonblocking(true)?;

        let thread_handle = thread::spawn(move || {
            while running_clone.load(Ordering::SeqCst) {
                match listener.accept() {
                    Ok((stream, _)) => {
                        let cfg = config.clone();
                        thread::spawn(move || handle_connection(stream, &cfg));
                    }
                    Err(ref e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                        thread::sleep(std::time::Duration::from_millis(10));
                    }
                    Err(_) => break,
                }
            }
        });

        Ok(Self {
            port,
            running,
            thread_handle: Some(thread_handle),
        })
    }

    /// Get the base URL for this mock server
    pub fn base_url(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }

    /// Stop the mock server
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(handle) = self.thread_handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for MockTwelveDataServer {
    fn drop(&mut self) {
        self.stop();
    }
}

fn handle_connection(mut stream: TcpStream, config: &MockConfig) {
    // Accepted sockets may inherit non-blocking mode on some platforms
    let _ = stream.set_nonblocking(false);
    let mut buffer = [0; 4096];

    let Ok(n) = stream.read(&mut buffer) else {
        return;
    };
    let request = String::from_utf8_lossy(&buffer[..n]);

    if config.delay_ms > 0 {
        thread::sleep(std::time::Duration::from_millis(config.delay_ms));
    }

    if let Some(status) = config.http_status {
        send_response(&mut stream, status, "{}");
        return;
    }

    let target = request
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .unwrap_or("/");
    let Ok(url) = Url::parse(&format!("http://mock{target}")) else {
        send_response(&mut stream, 400, r#"{"error": "Invalid request"}"#);
        return;
    };
    let query: HashMap<String, String> = url.query_pairs().into_owned().collect();
    let symbol = query.get("symbol").cloned().unwrap_or_default();

    if !query
        .get("apikey")
        .is_some_and(|key| key.starts_with("test_"))
    {
        send_response(
            &mut stream,
            200,
            &error_body(401, "**apikey** parameter is incorrect or not specified."),
        );
        return;
    }

    let body = match url.path() {
        "/exchange_rate" => match config.rates.get(&symbol) {
            Some(rate) => json!({"symbol": symbol, "rate": rate, "timestamp": 1700000000}).to_string(),
            None => error_body(400, &format!("**symbol** {symbol} not found")),
        },
        "/price" => match config.prices.get(&symbol) {
            Some(price) => json!({"price": price.to_string()}).to_string(),
            None => error_body(400, &format!("**symbol** {symbol} not found")),
        },
        _ => {
            send_response(&mut stream, 404, error_body(404, "not found").as_str());
            return;
        }
    };

    send_response(&mut stream, 200, &body);
}

fn error_body(code: u16, message: &str) -> String {
    json!({"code": code, "message": message, "status": "error"}).to_string()
}

fn send_response(stream: &mut TcpStream, status: u16, body: &str) {
    let status_text = match status {
        200 => "OK",
        400 => "Bad Request",
        404 => "Not Found",
        429 => "Too Many Requests",
        _ => "Error",
    };
    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        status_text,
        body.len(),
        body
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.flush();
}
