//! Embedded web dashboard.
//!
//! Provides a lightweight HTTP server (sync, via `tiny_http`) that serves:
//! - The server-rendered dashboard pages, one per session cookie
//! - JSON API endpoints exposing the same views, forms and navigation
//!
//! Launched via `fundadmin serve` (default: `http://127.0.0.1:8501`).

mod api;
mod charts;
mod frontend;
pub mod html;

use std::io::{self, Cursor, Read};
use std::sync::LazyLock;
use std::time::Instant;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use colored::Colorize;
use rand::rngs::StdRng;
use regex::Regex;
use tiny_http::{Header, Method, Request, Response, Server, StatusCode};

use crate::analytics::events::{self, Action, RequestEvent};
use crate::config::{FundAdminConfig, LogLevel};
use crate::forms;
use crate::navigation::{Page, SessionStore};
use crate::sample;
use crate::view::{self, FormState};

/// Name of the cookie carrying the session id.
pub const SESSION_COOKIE: &str = "fundadmin_session";

/// Request bodies beyond this many bytes are truncated.
const MAX_BODY_BYTES: u64 = 1024 * 1024;

static NAVIGATE_ROUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^/navigate/([^/]+)$").expect("navigate route regex must compile")
});

static SUBMIT_ROUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^/submit/([^/]+)$").expect("submit route regex must compile")
});

/// `/api/forms/{slug}` and `/api/forms/{slug}/submit`.
static API_FORM_ROUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^/api/forms/([^/]+)(/submit)?$").expect("form route regex must compile")
});

// ---------------------------------------------------------------------------
// Request / reply
// ---------------------------------------------------------------------------

/// The parts of an HTTP request the dashboard looks at.
#[derive(Debug, Clone)]
pub struct Incoming {
    pub method: Method,
    pub url: String,
    /// Raw `Cookie` header, if any.
    pub cookie: Option<String>,
    pub body: String,
}

impl Incoming {
    pub fn new(method: Method, url: &str) -> Self {
        Self {
            method,
            url: url.to_string(),
            cookie: None,
            body: String::new(),
        }
    }

    pub fn with_cookie(mut self, cookie: &str) -> Self {
        self.cookie = Some(cookie.to_string());
        self
    }

    pub fn with_body(mut self, body: &str) -> Self {
        self.body = body.to_string();
        self
    }

    /// Read method, url, cookie and (capped) body from a live request.
    fn read(request: &mut Request) -> io::Result<Self> {
        let method = request.method().clone();
        let url = request.url().to_string();
        let cookie = request
            .headers()
            .iter()
            .find(|h| h.field.equiv("Cookie"))
            .map(|h| h.value.as_str().to_string());

        // Read body up-front for methods that carry one
        let body = if matches!(method, Method::Post | Method::Put | Method::Patch) {
            read_body(request.as_reader())?
        } else {
            String::new()
        };

        Ok(Self {
            method,
            url,
            cookie,
            body,
        })
    }

    /// Path without the query string.
    pub fn path(&self) -> &str {
        self.url.split('?').next().unwrap_or(&self.url)
    }

    /// The session id presented in the `Cookie` header.
    pub fn session_id(&self) -> Option<&str> {
        self.cookie.as_deref().and_then(session_cookie)
    }
}

/// A response, independent of the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub status: u16,
    pub content_type: &'static str,
    pub body: String,
    pub location: Option<String>,
    pub set_cookie: Option<String>,
}

impl Reply {
    pub fn html(body: String) -> Self {
        Self {
            status: 200,
            content_type: "text/html; charset=utf-8",
            body,
            location: None,
            set_cookie: None,
        }
    }

    pub fn json_body(status: u16, body: String) -> Self {
        Self {
            status,
            content_type: "application/json; charset=utf-8",
            body,
            location: None,
            set_cookie: None,
        }
    }

    /// `{"error": message}` with the given status.
    pub fn error(status: u16, message: &str) -> Self {
        Self::json_body(status, serde_json::json!({ "error": message }).to_string())
    }

    pub fn not_found() -> Self {
        Self::error(404, "not found")
    }

    /// `303 See Other` to `location`.
    pub fn redirect(location: &str) -> Self {
        Self {
            status: 303,
            content_type: "text/plain; charset=utf-8",
            body: String::new(),
            location: Some(location.to_string()),
            set_cookie: None,
        }
    }

    fn with_session_cookie(mut self, id: &str) -> Self {
        self.set_cookie = Some(format!(
            "{SESSION_COOKIE}={id}; Path=/; HttpOnly; SameSite=Lax"
        ));
        self
    }

    pub fn into_response(self) -> Response<Cursor<Vec<u8>>> {
        let mut resp =
            Response::from_data(self.body.into_bytes()).with_status_code(StatusCode(self.status));
        let headers = [
            ("Content-Type", Some(self.content_type.to_string())),
            ("Location", self.location),
            ("Set-Cookie", self.set_cookie),
        ];
        for (name, value) in headers {
            if let Some(value) = value
                && let Ok(header) = Header::from_bytes(name, value)
            {
                resp = resp.with_header(header);
            }
        }
        resp
    }
}

/// Read at most [`MAX_BODY_BYTES`] of a request body. Invalid UTF-8, such as
/// a character split by the cap, decodes as U+FFFD instead of dropping the
/// whole body.
fn read_body(reader: impl Read) -> io::Result<String> {
    let mut bytes = Vec::new();
    reader.take(MAX_BODY_BYTES).read_to_end(&mut bytes)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Extract the session id from a `Cookie` header value.
fn session_cookie(header: &str) -> Option<&str> {
    header.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == SESSION_COOKIE && !value.is_empty()).then_some(value)
    })
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// Everything the server keeps between requests.
pub struct App {
    config: FundAdminConfig,
    sessions: SessionStore,
    rng: StdRng,
    started: DateTime<Utc>,
}

impl App {
    pub fn new(config: FundAdminConfig) -> Self {
        let sessions = SessionStore::new(
            config.sessions.idle_timeout_secs,
            config.sessions.max_sessions,
        );
        let rng = sample::rng_from_seed(config.sample.seed);
        Self {
            config,
            sessions,
            rng,
            started: Utc::now(),
        }
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// Handle one request, returning the reply and its log event.
    ///
    /// Handler errors become a `500` JSON body; nothing here panics on bad
    /// input.
    pub fn handle(&mut self, req: &Incoming) -> (Reply, RequestEvent) {
        let start = Instant::now();
        let mut event = RequestEvent::new(&req.method.to_string(), req.path(), 200, Action::Other);

        let reply = match self.dispatch(req, &mut event) {
            Ok(reply) => reply,
            Err(e) => Reply::error(500, &format!("{e:#}")),
        };

        event.status = reply.status;
        event.duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
        (reply, event)
    }

    /// Dispatch an incoming request to the appropriate handler.
    fn dispatch(&mut self, req: &Incoming, event: &mut RequestEvent) -> Result<Reply> {
        let path = req.path();

        match (&req.method, path) {
            // Pages
            (Method::Get, "/") | (Method::Get, "/index.html") => Ok(self.show_page(req, event)),
            (Method::Post, p) if NAVIGATE_ROUTE.is_match(p) => {
                let slug = capture(&NAVIGATE_ROUTE, p);
                Ok(self.navigate(req, event, &slug))
            }
            (Method::Post, p) if SUBMIT_ROUTE.is_match(p) => {
                let slug = capture(&SUBMIT_ROUTE, p);
                Ok(self.submit(req, event, &slug))
            }

            // API: navigation and views
            (Method::Get, "/api/pages") => api::get_pages(),
            (Method::Get, "/api/view") => {
                let (id, fresh) = self.session(req, event);
                let page = self.current_page(&id);
                event.action = Action::View;
                event.page = Some(page.slug().to_string());
                let reply = api::get_view(page, &mut self.rng)?;
                Ok(cookie_if(reply, fresh, &id))
            }
            (Method::Post, "/api/navigate") => {
                event.action = Action::Navigate;
                let Some(page) = api::parse_navigate(&req.body)? else {
                    return Ok(Reply::error(404, "unknown page"));
                };
                let (id, fresh) = self.session(req, event);
                if let Some(session) = self.sessions.get_mut(&id) {
                    session.navigate(page);
                }
                event.page = Some(page.slug().to_string());
                let reply = api::get_view(page, &mut self.rng)?;
                Ok(cookie_if(reply, fresh, &id))
            }

            // API: forms
            (Method::Get, "/api/forms") => api::get_forms(),
            (method, p) if API_FORM_ROUTE.is_match(p) => {
                let slug = capture(&API_FORM_ROUTE, p);
                let is_submit = p.ends_with("/submit");
                match (method, is_submit) {
                    (Method::Get, false) => api::get_form(&slug),
                    (Method::Post, true) => {
                        event.action = Action::Submit;
                        event.page = Some(slug.clone());
                        let (reply, outcome) = api::post_submit(&slug, &req.body)?;
                        event.outcome = outcome.map(|o| o.kind().to_string());
                        Ok(reply)
                    }
                    _ => Ok(Reply::not_found()),
                }
            }

            // API: health
            (Method::Get, "/api/health") => api::get_health(self.sessions.len(), self.started),

            // 404
            _ => Ok(Reply::not_found()),
        }
    }

    // -----------------------------------------------------------------------
    // HTML handlers
    // -----------------------------------------------------------------------

    /// `GET /`: render the session's active page.
    fn show_page(&mut self, req: &Incoming, event: &mut RequestEvent) -> Reply {
        let (id, fresh) = self.session(req, event);
        let page = self.current_page(&id);
        event.action = Action::View;
        event.page = Some(page.slug().to_string());

        let view = view::render(Some(page), None, &mut self.rng);
        cookie_if(Reply::html(html::page(&view)), fresh, &id)
    }

    /// `POST /navigate/{slug}`: switch page, then redirect to `/`.
    fn navigate(&mut self, req: &Incoming, event: &mut RequestEvent, slug: &str) -> Reply {
        event.action = Action::Navigate;
        let Some(page) = Page::from_slug(slug) else {
            return Reply::not_found();
        };

        let (id, fresh) = self.session(req, event);
        if let Some(session) = self.sessions.get_mut(&id) {
            session.navigate(page);
        }
        event.page = Some(page.slug().to_string());
        cookie_if(Reply::redirect("/"), fresh, &id)
    }

    /// `POST /submit/{slug}`: evaluate the active form and re-render it
    /// with the outcome notice and the submitted values.
    fn submit(&mut self, req: &Incoming, event: &mut RequestEvent, slug: &str) -> Reply {
        event.action = Action::Submit;
        let Some(def) = Page::from_slug(slug).and_then(forms::for_page) else {
            return Reply::not_found();
        };

        let (id, fresh) = self.session(req, event);
        event.page = Some(def.page.slug().to_string());

        // A form that is no longer on screen (stale tab, other session)
        if self.current_page(&id) != def.page {
            return cookie_if(Reply::redirect("/"), fresh, &id);
        }

        let pairs: Vec<(String, String)> = url::form_urlencoded::parse(req.body.as_bytes())
            .into_owned()
            .collect();
        let values = def.normalize(&pairs, view::today());
        let state = FormState::submitted(def, values);
        event.outcome = state.outcome.as_ref().map(|o| o.kind().to_string());

        let view = view::render(Some(def.page), Some(state), &mut self.rng);
        cookie_if(Reply::html(html::page(&view)), fresh, &id)
    }

    // -----------------------------------------------------------------------
    // Sessions
    // -----------------------------------------------------------------------

    /// Resolve the request's session, creating one if needed. Returns the
    /// id and whether a cookie must be (re)issued.
    fn session(&mut self, req: &Incoming, event: &mut RequestEvent) -> (String, bool) {
        let presented = req.session_id();
        let id = self.sessions.touch(presented, Utc::now()).id.clone();
        event.session = Some(events::session_prefix(&id));
        let fresh = presented != Some(id.as_str());
        (id, fresh)
    }

    fn current_page(&self, id: &str) -> Page {
        self.sessions.get(id).map(|s| s.page()).unwrap_or_default()
    }

    // -----------------------------------------------------------------------
    // Logging
    // -----------------------------------------------------------------------

    /// Console access line (level-gated) plus the JSONL event.
    fn log(&self, event: &RequestEvent) {
        let logging = &self.config.logging;
        if logging.level >= LogLevel::Info {
            let status = match event.status {
                200..=299 => event.status.to_string().green(),
                300..=399 => event.status.to_string().cyan(),
                400..=499 => event.status.to_string().yellow(),
                _ => event.status.to_string().red(),
            };
            let time = chrono::Local::now().format("%H:%M:%S");
            if logging.level >= LogLevel::Debug {
                println!(
                    "{time} {} {} {status} {} {}ms",
                    event.method,
                    event.path,
                    event.session.as_deref().unwrap_or("-").dimmed(),
                    event.duration_ms
                );
            } else {
                println!("{time} {} {} {status}", event.method, event.path);
            }
        }
        events::record(logging, event);
    }
}

fn capture(re: &Regex, path: &str) -> String {
    re.captures(path)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

fn cookie_if(reply: Reply, fresh: bool, id: &str) -> Reply {
    if fresh {
        reply.with_session_cookie(id)
    } else {
        reply
    }
}

// ---------------------------------------------------------------------------
// Server entry point
// ---------------------------------------------------------------------------

/// Start the dashboard server with the given configuration.
///
/// Blocks the current thread. Handles requests sequentially (sufficient for
/// a local demo). Errors are handled per-request without stopping the
/// server.
pub fn serve(config: FundAdminConfig) -> Result<()> {
    let addr = config.server.addr.clone();
    let server = Server::http(addr.as_str())
        .map_err(|e| anyhow::anyhow!("failed to start HTTP server on {addr}: {e}"))?;

    let url = match server.server_addr().to_ip() {
        Some(ip) => format!("http://{ip}"),
        None => format!("http://{addr}"),
    };
    println!("{} running at {}", "fundadmin".bold(), url.cyan());
    println!("Press Ctrl+C to stop.\n");

    // Best-effort
    if config.server.open_browser {
        let _ = open_browser(&url);
    }

    let mut app = App::new(config);
    run(&server, &mut app);
    Ok(())
}

/// Serve requests from `server` until it shuts down.
pub fn run(server: &Server, app: &mut App) {
    for mut request in server.incoming_requests() {
        let reply = match Incoming::read(&mut request) {
            Ok(incoming) => {
                let (reply, event) = app.handle(&incoming);
                app.log(&event);
                reply
            }
            Err(e) => Reply::error(400, &format!("failed to read request: {e}")),
        };
        let _ = request.respond(reply.into_response());
    }
}

/// Attempt to open a URL in the system default browser.
fn open_browser(url: &str) -> Result<()> {
    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/C", "start", url])
            .spawn()
            .context("failed to open browser")?;
    }

    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open")
            .arg(url)
            .spawn()
            .context("failed to open browser")?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open")
            .arg(url)
            .spawn()
            .context("failed to open browser")?;
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn app() -> App {
        let mut config = FundAdminConfig::default();
        config.sample.seed = Some(7);
        config.logging.enabled = false;
        App::new(config)
    }

    fn cookie_of(reply: &Reply) -> String {
        let header = reply.set_cookie.as_deref().unwrap();
        header.split(';').next().unwrap().to_string()
    }

    #[test]
    fn session_cookie_is_found_among_others() {
        assert_eq!(session_cookie("a=1; fundadmin_session=abc; b=2"), Some("abc"));
        assert_eq!(session_cookie("fundadmin_session="), None);
        assert_eq!(session_cookie("other=1"), None);
    }

    #[test]
    fn first_visit_sets_cookie_and_shows_dashboard() {
        let mut app = app();
        let (reply, event) = app.handle(&Incoming::new(Method::Get, "/"));
        assert_eq!(reply.status, 200);
        assert!(reply.set_cookie.is_some());
        assert!(reply.body.contains("Dashboard Overview"));
        assert_eq!(event.action, Action::View);
        assert_eq!(event.page.as_deref(), Some("dashboard"));
    }

    #[test]
    fn known_cookie_is_not_reissued() {
        let mut app = app();
        let (first, _) = app.handle(&Incoming::new(Method::Get, "/"));
        let cookie = cookie_of(&first);
        let (again, _) = app.handle(&Incoming::new(Method::Get, "/").with_cookie(&cookie));
        assert!(again.set_cookie.is_none());
        assert_eq!(app.sessions().len(), 1);
    }

    #[test]
    fn navigate_redirects_and_switches_page() {
        let mut app = app();
        let (first, _) = app.handle(&Incoming::new(Method::Get, "/"));
        let cookie = cookie_of(&first);

        let (nav, event) =
            app.handle(&Incoming::new(Method::Post, "/navigate/aml-kyc").with_cookie(&cookie));
        assert_eq!(nav.status, 303);
        assert_eq!(nav.location.as_deref(), Some("/"));
        assert_eq!(event.action, Action::Navigate);

        let (page, _) = app.handle(&Incoming::new(Method::Get, "/").with_cookie(&cookie));
        assert!(page.body.contains("AML / KYC Compliance"));
        assert!(!page.body.contains("Dashboard Overview</h1>"));
    }

    #[test]
    fn unknown_slug_is_404_and_keeps_page() {
        let mut app = app();
        let (first, _) = app.handle(&Incoming::new(Method::Get, "/"));
        let cookie = cookie_of(&first);
        let (nav, _) =
            app.handle(&Incoming::new(Method::Post, "/navigate/reports").with_cookie(&cookie));
        assert_eq!(nav.status, 404);
        let (page, _) = app.handle(&Incoming::new(Method::Get, "/").with_cookie(&cookie));
        assert!(page.body.contains("Dashboard Overview</h1>"));
    }

    #[test]
    fn html_submit_renders_outcome() {
        let mut app = app();
        let (first, _) = app.handle(&Incoming::new(Method::Get, "/"));
        let cookie = cookie_of(&first);
        app.handle(
            &Incoming::new(Method::Post, "/navigate/investor-onboarding").with_cookie(&cookie),
        );

        let (rejected, event) = app.handle(
            &Incoming::new(Method::Post, "/submit/investor-onboarding")
                .with_cookie(&cookie)
                .with_body("first_name=Ann&kyc_completed=on&aml_check=on"),
        );
        assert_eq!(rejected.status, 200);
        assert!(rejected.body.contains("Please complete all required documentation"));
        assert!(rejected.body.contains(r#"value="Ann""#));
        assert_eq!(event.outcome.as_deref(), Some("rejected"));

        let (accepted, event) = app.handle(
            &Incoming::new(Method::Post, "/submit/investor-onboarding")
                .with_cookie(&cookie)
                .with_body("kyc_completed=on&aml_check=on&suitability_assessment=on"),
        );
        assert!(accepted.body.contains("Investor onboarding application submitted successfully!"));
        assert_eq!(event.outcome.as_deref(), Some("accepted"));
    }

    #[test]
    fn submit_for_inactive_form_redirects() {
        let mut app = app();
        let (first, _) = app.handle(&Incoming::new(Method::Get, "/"));
        let cookie = cookie_of(&first);
        let (reply, event) = app.handle(
            &Incoming::new(Method::Post, "/submit/fund-onboarding").with_cookie(&cookie),
        );
        assert_eq!(reply.status, 303);
        assert!(event.outcome.is_none());
    }

    #[test]
    fn unknown_route_is_json_404() {
        let mut app = app();
        let (reply, event) = app.handle(&Incoming::new(Method::Get, "/nope"));
        assert_eq!(reply.status, 404);
        assert!(reply.content_type.starts_with("application/json"));
        assert_eq!(event.status, 404);
        assert_eq!(event.action, Action::Other);
    }

    #[test]
    fn malformed_api_body_is_500_json() {
        let mut app = app();
        let (reply, _) = app.handle(&Incoming::new(Method::Post, "/api/navigate").with_body("{"));
        assert_eq!(reply.status, 500);
        let json: serde_json::Value = serde_json::from_str(&reply.body).unwrap();
        assert!(json["error"].as_str().unwrap().contains("navigate"));
    }

    #[test]
    fn body_cut_inside_a_character_keeps_its_fields() {
        let mut raw = b"kyc_completed=on&aml_check=on&suitability_assessment=on&notes=".to_vec();
        let cap = usize::try_from(MAX_BODY_BYTES).unwrap();
        raw.resize(cap - 1, b'a');
        raw.extend_from_slice("é".as_bytes());

        let body = read_body(Cursor::new(raw)).unwrap();
        assert_eq!(body.len(), cap - 1 + '\u{FFFD}'.len_utf8());
        assert!(body.ends_with('\u{FFFD}'));

        let pairs: Vec<(String, String)> = url::form_urlencoded::parse(body.as_bytes())
            .into_owned()
            .collect();
        let def = forms::for_page(Page::InvestorOnboarding).unwrap();
        let values = def.normalize(&pairs, view::today());
        assert!(def.submit(&values).is_accepted());
    }

    #[test]
    fn short_body_reads_whole() {
        let body = read_body(Cursor::new("first_name=Zoë".as_bytes().to_vec())).unwrap();
        assert_eq!(body, "first_name=Zoë");
    }

    #[test]
    fn path_strips_query() {
        let req = Incoming::new(Method::Get, "/api/view?x=1");
        assert_eq!(req.path(), "/api/view");
    }
}
