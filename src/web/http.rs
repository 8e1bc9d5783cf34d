//! Minimal HTTP/1.1 responder.
//!
//! One listener, polled from the control loop.  Each call to
//! [`HttpResponder::poll`] accepts at most one queued connection, answers
//! it with a single response and closes it.  Nothing here blocks waiting
//! for a client to show up, and one slow client costs the loop at most
//! one read timeout per pass.

use std::fmt::Write as _;
use std::io::{self, ErrorKind, Read, Write};
use std::net::{Ipv4Addr, SocketAddr, TcpListener, TcpStream};
use std::time::Duration;

use log::{debug, info, warn};

use crate::error::{CommsError, Result};

/// Largest request head we buffer; anything beyond is not read.
const MAX_HEAD: usize = 1024;

/// Response bodies are small fixed pages.
pub type Body = heapless::String<1024>;

// ───────────────────────────────────────────────────────────────
// Request
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Request<'a> {
    pub method: &'a str,
    /// Path without the query string.
    pub path: &'a str,
}

/// Parse `METHOD SP PATH SP HTTP/x.y`.  Returns `None` for anything else.
pub fn parse_request_line(line: &str) -> Option<Request<'_>> {
    let mut parts = line.split(' ');
    let method = parts.next()?;
    let target = parts.next()?;
    let version = parts.next()?;
    if parts.next().is_some()
        || method.is_empty()
        || !method.bytes().all(|b| b.is_ascii_uppercase())
        || !target.starts_with('/')
        || !version.starts_with("HTTP/")
    {
        return None;
    }
    let path = target.split_once('?').map_or(target, |(p, _)| p);
    Some(Request { method, path })
}

// ───────────────────────────────────────────────────────────────
// Response
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub content_type: &'static str,
    pub body: Body,
}

impl Response {
    pub fn html(body: Body) -> Self {
        Self { status: 200, content_type: "text/html", body }
    }

    /// Plain-text response whose body is the reason phrase.
    pub fn plain(status: u16) -> Self {
        let mut body = Body::new();
        let _ = body.push_str(reason_phrase(status));
        Self { status, content_type: "text/plain", body }
    }

    pub fn not_found() -> Self {
        Self::plain(404)
    }

    /// Serialize the response.  `send_body = false` answers a HEAD request:
    /// same headers, including the body's Content-Length, but no body.
    pub fn write_to(&self, w: &mut impl Write, send_body: bool) -> io::Result<()> {
        let mut head = heapless::String::<256>::new();
        let _ = write!(
            head,
            "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\n",
            self.status,
            reason_phrase(self.status),
            self.content_type,
            self.body.len(),
        );
        let _ = head.push_str("Connection: close\r\n\r\n");
        w.write_all(head.as_bytes())?;
        if send_body {
            w.write_all(self.body.as_bytes())?;
        }
        w.flush()
    }
}

pub fn reason_phrase(status: u16) -> &'static str {
    match status {
        200 => "OK",
        400 => "Bad Request",
        404 => "Not Found",
        _ => "Internal Server Error",
    }
}

/// Turns a parsed request into a response.
pub trait RequestHandler {
    fn handle(&self, req: &Request<'_>) -> Response;
}

// ───────────────────────────────────────────────────────────────
// Responder
// ───────────────────────────────────────────────────────────────

pub struct HttpResponder {
    listener: TcpListener,
    read_timeout: Duration,
}

impl HttpResponder {
    /// Listen on every interface at `port` (0 picks a free port).
    pub fn bind(port: u16, read_timeout_ms: u32) -> Result<Self> {
        let listener = TcpListener::bind((Ipv4Addr::UNSPECIFIED, port)).map_err(|e| {
            warn!("HTTP: bind :{} failed — {}", port, e);
            CommsError::HttpBindFailed
        })?;
        listener
            .set_nonblocking(true)
            .map_err(|_| CommsError::HttpBindFailed)?;
        info!("HTTP: listening on :{}", port);
        Ok(Self {
            listener,
            read_timeout: Duration::from_millis(u64::from(read_timeout_ms.max(1))),
        })
    }

    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr().map_err(|_| CommsError::HttpIo)?)
    }

    /// Serve at most one waiting connection.  Returns `true` if a response
    /// was written.  Further clients stay queued for the next pass.
    pub fn poll(&mut self, handler: &impl RequestHandler) -> bool {
        match self.listener.accept() {
            Ok((stream, peer)) => match self.serve(stream, handler) {
                Ok(status) => {
                    debug!("HTTP: {} -> {}", peer, status);
                    true
                }
                Err(e) => {
                    warn!("HTTP: {} dropped — {}", peer, e);
                    false
                }
            },
            Err(e) if e.kind() == ErrorKind::WouldBlock => false,
            Err(e) => {
                warn!("HTTP: accept failed — {}", e);
                false
            }
        }
    }

    fn serve(&self, mut stream: TcpStream, handler: &impl RequestHandler) -> io::Result<u16> {
        stream.set_nonblocking(false)?;
        stream.set_read_timeout(Some(self.read_timeout))?;

        let mut buf = [0u8; MAX_HEAD];
        let len = read_head(&mut stream, &mut buf)?;

        let request = core::str::from_utf8(&buf[..len])
            .ok()
            .and_then(|head| head.split("\r\n").next())
            .and_then(parse_request_line);
        let (response, send_body) = match request {
            Some(req) => (handler.handle(&req), req.method != "HEAD"),
            None => (Response::plain(400), true),
        };

        response.write_to(&mut stream, send_body)?;
        Ok(response.status)
    }
}

/// Read until the blank line ending the head, EOF, a full buffer or the
/// read timeout.  A timeout with a partial head is not an error here.
fn read_head(stream: &mut TcpStream, buf: &mut [u8]) -> io::Result<usize> {
    let mut len = 0;
    while len < buf.len() {
        match stream.read(&mut buf[len..]) {
            Ok(0) => break,
            Ok(n) => {
                len += n;
                if buf[..len].windows(4).any(|w| w == b"\r\n\r\n") {
                    break;
                }
            }
            Err(e) if matches!(e.kind(), ErrorKind::WouldBlock | ErrorKind::TimedOut) => break,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(len)
}
