//! HTTP front for the fish generator.
//!
//! One route: the whole path after the leading slash is the fish input.
//! OPTIONS answers the CORS preflight and stops there; every other method
//! draws a fish.

use crate::config::ServeConfig;
use crate::render::{FishTemplate, render_svg};
use crate::seed::FishSource;
use anyhow::{Context, Result, anyhow};
use percent_encoding::percent_decode_str;
use std::borrow::Cow;
use std::io::Read;
use std::net::SocketAddr;
use std::sync::Arc;
use tiny_http::{Header, Method, Request, Response, Server, StatusCode};
use tracing::{Level, debug, error, info, warn};

const SVG: &str = "image/svg+xml";
const PLAIN: &str = "text/plain; charset=utf-8";

const CORS_HEADERS: [(&str, &str); 4] = [
    ("Access-Control-Allow-Origin", "*"),
    ("Access-Control-Allow-Credentials", "true"),
    (
        "Access-Control-Allow-Headers",
        "Content-Type, Content-Length, Accept-Encoding, X-CSRF-Token, Authorization, accept, origin, Cache-Control, X-Requested-With",
    ),
    ("Access-Control-Allow-Methods", "POST, GET, OPTIONS, PUT, DELETE"),
];

/// Bound listener plus the shared template, ready to serve.
pub struct FishServer {
    server: Server,
    template: Arc<FishTemplate>,
    workers: usize,
}

pub fn bind(config: &ServeConfig, template: FishTemplate) -> Result<FishServer> {
    let server = Server::http(config.addr.as_str())
        .map_err(|e| anyhow!("Failed to bind {}: {}", config.addr, e))?;
    Ok(FishServer {
        server,
        template: Arc::new(template),
        workers: config.workers.max(1),
    })
}

impl FishServer {
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.server.server_addr().to_ip()
    }

    /// Start the request loop (blocking).
    pub fn run(self) -> Result<()> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.workers)
            .thread_name(|i| format!("fish-worker-{i}"))
            .build()
            .context("Failed to create worker pool")?;

        match self.local_addr() {
            Some(addr) => info!(%addr, workers = self.workers, "serving fish"),
            None => info!(workers = self.workers, "serving fish"),
        }

        for request in self.server.incoming_requests() {
            let template = Arc::clone(&self.template);
            pool.spawn(move || {
                if let Err(e) = handle_request(request, &template) {
                    warn!("request error: {e:#}");
                }
            });
        }
        Ok(())
    }
}

/// Answer one request. Errors are write failures; render faults are turned
/// into a 500 for this request alone.
pub fn handle_request(request: Request, template: &FishTemplate) -> Result<()> {
    if request.method() == &Method::Options {
        debug!(url = request.url(), "preflight");
        let response = with_cors(Response::empty(StatusCode(204)))?;
        request.respond(response)?;
        return Ok(());
    }

    let path = seed_path(request.url()).into_owned();
    let source = FishSource::from_path(&path);
    let path = String::from_utf8_lossy(&path);
    let params = source.params();
    if tracing::enabled!(Level::DEBUG) {
        debug!(
            method = %request.method(),
            path = %path,
            source = source.kind(),
            params = %serde_json::to_string(&params)?,
            "drawing fish"
        );
    }

    match render_svg(&params, template) {
        Ok(svg) => send(request, 200, SVG, svg),
        Err(e) => {
            error!(path = %path, "render failed: {e}");
            send(request, 500, PLAIN, format!("500 Internal Server Error: {e}"))
        }
    }
}

/// Request target minus query, fragment and leading slash, percent-decoded
/// to raw bytes. Invalid UTF-8 is kept as-is so it still seeds its own fish.
pub fn seed_path(url: &str) -> Cow<'_, [u8]> {
    let path = url.split(['?', '#']).next().unwrap_or_default();
    let path = path.strip_prefix('/').unwrap_or(path);
    percent_decode_str(path).into()
}

fn send(request: Request, status: u16, content_type: &'static str, body: String) -> Result<()> {
    let response = Response::from_string(body)
        .with_status_code(StatusCode(status))
        .with_header(make_header("Content-Type", content_type)?);
    request.respond(with_cors(response)?)?;
    Ok(())
}

fn with_cors<R: Read>(mut response: Response<R>) -> Result<Response<R>> {
    for (key, value) in CORS_HEADERS {
        response.add_header(make_header(key, value)?);
    }
    Ok(response)
}

fn make_header(key: &'static str, value: &'static str) -> Result<Header> {
    Header::from_bytes(key, value).map_err(|()| anyhow!("invalid header {key}: {value}"))
}
