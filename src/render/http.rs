use std::io::{Read, Write};
use std::net::{Shutdown, SocketAddr, TcpListener, TcpStream};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context as _;

use crate::config::ServerConfig;
use crate::foundation::error::{SvgvidgenError, SvgvidgenResult};
use crate::render::service::{HttpRequest, HttpResponse, RenderService};

const MAX_HEADER_BYTES: usize = 16 * 1024;
/// Unread input discarded after an early error response before the socket is dropped.
const DRAIN_LIMIT_BYTES: usize = 8 * 1024 * 1024;
const DRAIN_TIMEOUT: Duration = Duration::from_secs(2);

/// Blocking HTTP/1.1 front of a [`RenderService`]; one thread per connection.
#[derive(Debug)]
pub struct RenderServer {
    listener: TcpListener,
    service: Arc<RenderService>,
    max_body_bytes: usize,
    read_timeout: Duration,
}

impl RenderServer {
    /// Bind the address in `cfg`.
    pub fn bind(cfg: &ServerConfig) -> SvgvidgenResult<Self> {
        cfg.validate()?;
        let listener = TcpListener::bind((cfg.addr.as_str(), cfg.port))
            .with_context(|| format!("bind {}:{}", cfg.addr, cfg.port))?;
        Ok(Self {
            listener,
            service: Arc::new(RenderService::new(cfg.template, cfg.defaults.clone())),
            max_body_bytes: cfg.max_body_bytes,
            read_timeout: Duration::from_secs(cfg.read_timeout_secs),
        })
    }

    /// Bound address (useful with port `0`).
    pub fn local_addr(&self) -> SvgvidgenResult<SocketAddr> {
        Ok(self.listener.local_addr().context("query local address")?)
    }

    /// Accept connections forever.
    #[tracing::instrument(skip(self), fields(template = self.service.template().name()))]
    pub fn serve(self) -> SvgvidgenResult<()> {
        tracing::info!(addr = %self.local_addr()?, "render service listening");
        for incoming in self.listener.incoming() {
            let stream = match incoming {
                Ok(stream) => stream,
                Err(err) => {
                    tracing::warn!(%err, "accept error");
                    continue;
                }
            };
            let service = Arc::clone(&self.service);
            let max_body = self.max_body_bytes;
            let timeout = self.read_timeout;
            std::thread::spawn(move || {
                if let Err(err) = handle_connection(stream, &service, max_body, timeout) {
                    tracing::warn!(%err, "request error");
                }
            });
        }
        Ok(())
    }
}

fn handle_connection(
    mut stream: TcpStream,
    service: &RenderService,
    max_body: usize,
    timeout: Duration,
) -> SvgvidgenResult<()> {
    stream
        .set_read_timeout(Some(timeout))
        .context("set read timeout")?;

    let (resp, unread_input) = match read_http_request(&mut stream, max_body) {
        Ok(req) => {
            let resp = service.handle(&req);
            tracing::debug!(method = %req.method, path = %req.path, status = resp.status, "handled");
            (resp, false)
        }
        Err(ReadError::TooLarge) => (
            HttpResponse::error(
                413,
                "Payload Too Large",
                format!("request body exceeds {max_body} bytes"),
            ),
            true,
        ),
        Err(ReadError::Malformed(msg)) => (HttpResponse::error(400, "Bad Request", msg), true),
        Err(ReadError::Io(err)) => {
            return Err(SvgvidgenError::http(format!("read request: {err}")));
        }
    };

    write_http_response(&mut stream, &resp)?;

    // Closing with unread input makes the kernel reset the connection, which can discard the
    // response before the client reads it.
    if unread_input {
        let _ = stream.shutdown(Shutdown::Write);
        let _ = stream.set_read_timeout(Some(DRAIN_TIMEOUT.min(timeout)));
        let drained = drain_input(&mut stream, DRAIN_LIMIT_BYTES);
        tracing::debug!(drained, status = resp.status, "discarded unread request input");
    }
    Ok(())
}

/// Read and discard input until EOF, an error (including a read timeout), or `limit` bytes.
fn drain_input(stream: &mut impl Read, limit: usize) -> usize {
    let mut chunk = [0u8; 8192];
    let mut total = 0usize;
    while total < limit {
        match stream.read(&mut chunk) {
            Ok(0) | Err(_) => break,
            Ok(n) => total += n,
        }
    }
    total
}

#[derive(Debug)]
enum ReadError {
    TooLarge,
    Malformed(String),
    Io(std::io::Error),
}

fn read_http_request(stream: &mut impl Read, max_body: usize) -> Result<HttpRequest, ReadError> {
    let mut buf = Vec::with_capacity(4096);
    let mut chunk = [0u8; 1024];

    let header_end = loop {
        if let Some(idx) = find_header_end(&buf) {
            break idx;
        }
        if buf.len() > MAX_HEADER_BYTES {
            return Err(ReadError::Malformed("request header too large".to_string()));
        }
        let n = stream.read(&mut chunk).map_err(ReadError::Io)?;
        if n == 0 {
            return Err(ReadError::Malformed("incomplete http request".to_string()));
        }
        buf.extend_from_slice(&chunk[..n]);
    };

    let header_text = String::from_utf8_lossy(&buf[..header_end]);
    let mut lines = header_text.split("\r\n");
    let request_line = lines.next().unwrap_or_default();
    let mut parts = request_line.split_whitespace();
    let (Some(method), Some(path)) = (parts.next(), parts.next()) else {
        return Err(ReadError::Malformed(format!(
            "malformed request line '{request_line}'"
        )));
    };

    let mut content_length = 0usize;
    for line in lines {
        if let Some((key, value)) = line.split_once(':')
            && key.trim().eq_ignore_ascii_case("content-length")
        {
            content_length = value
                .trim()
                .parse()
                .map_err(|_| ReadError::Malformed(format!("bad content-length '{value}'")))?;
        }
    }
    if content_length > max_body {
        return Err(ReadError::TooLarge);
    }

    let mut body = buf[(header_end + 4)..].to_vec();
    while body.len() < content_length {
        let n = stream.read(&mut chunk).map_err(ReadError::Io)?;
        if n == 0 {
            break;
        }
        body.extend_from_slice(&chunk[..n]);
    }
    body.truncate(content_length);

    Ok(HttpRequest {
        method: method.to_string(),
        path: path.to_string(),
        body,
    })
}

fn find_header_end(buf: &[u8]) -> Option<usize> {
    buf.windows(4).position(|w| w == b"\r\n\r\n")
}

fn write_http_response(stream: &mut impl Write, resp: &HttpResponse) -> SvgvidgenResult<()> {
    let header = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nCache-Control: no-store\r\nConnection: close\r\n\r\n",
        resp.status,
        resp.reason,
        resp.content_type,
        resp.body.len()
    );
    stream
        .write_all(header.as_bytes())
        .and_then(|_| stream.write_all(&resp.body))
        .and_then(|_| stream.flush())
        .map_err(|e| SvgvidgenError::http(format!("write response: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/render/http.rs"]
mod tests;
