/// HTTP surface tests.
///
/// The first group drives `App::handle` directly; the second runs the real
/// `tiny_http` loop on an ephemeral port and talks to it with `ureq`.
use std::thread;

use tiny_http::{Method, Server};

use fundadmin::config::{FundAdminConfig, LogLevel};
use fundadmin::web::{self, App, Incoming, SESSION_COOKIE};

fn quiet_config() -> FundAdminConfig {
    let mut config = FundAdminConfig::default();
    config.sample.seed = Some(42);
    config.logging.enabled = false;
    config.logging.level = LogLevel::Quiet;
    config.server.open_browser = false;
    config
}

/// `name=value` part of a `Set-Cookie` header.
fn cookie_pair(set_cookie: &str) -> String {
    set_cookie.split(';').next().unwrap().trim().to_string()
}

// ---------------------------------------------------------------------------
// In-process
// ---------------------------------------------------------------------------

#[test]
fn every_nav_route_switches_the_rendered_page() {
    let mut app = App::new(quiet_config());
    let (first, _) = app.handle(&Incoming::new(Method::Get, "/"));
    let cookie = cookie_pair(first.set_cookie.as_deref().unwrap());

    for page in fundadmin::navigation::Page::ALL {
        let path = format!("/navigate/{}", page.slug());
        let (nav, _) = app.handle(&Incoming::new(Method::Post, &path).with_cookie(&cookie));
        assert_eq!(nav.status, 303, "{path}");

        let (view, _) = app.handle(&Incoming::new(Method::Get, "/api/view").with_cookie(&cookie));
        let json: serde_json::Value = serde_json::from_str(&view.body).unwrap();
        assert_eq!(json["page"], page.slug());
    }
}

#[test]
fn sessions_are_isolated_over_http() {
    let mut app = App::new(quiet_config());
    let (a, _) = app.handle(&Incoming::new(Method::Get, "/"));
    let (b, _) = app.handle(&Incoming::new(Method::Get, "/"));
    let a = cookie_pair(a.set_cookie.as_deref().unwrap());
    let b = cookie_pair(b.set_cookie.as_deref().unwrap());
    assert_ne!(a, b);

    app.handle(&Incoming::new(Method::Post, "/navigate/person-onboarding").with_cookie(&a));

    let (page_a, _) = app.handle(&Incoming::new(Method::Get, "/").with_cookie(&a));
    let (page_b, _) = app.handle(&Incoming::new(Method::Get, "/").with_cookie(&b));
    assert!(page_a.body.contains("Person Onboarding</h1>"));
    assert!(page_b.body.contains("Dashboard Overview</h1>"));
}

#[test]
fn api_navigate_sets_page_and_returns_view() {
    let mut app = App::new(quiet_config());
    let (reply, event) = app.handle(
        &Incoming::new(Method::Post, "/api/navigate").with_body(r#"{"page": "AML / KYC"}"#),
    );
    assert_eq!(reply.status, 200);
    let cookie = cookie_pair(reply.set_cookie.as_deref().unwrap());
    assert_eq!(event.page.as_deref(), Some("aml-kyc"));

    let (html, _) = app.handle(&Incoming::new(Method::Get, "/").with_cookie(&cookie));
    assert!(html.body.contains("AML / KYC Compliance"));

    let (missing, _) = app.handle(
        &Incoming::new(Method::Post, "/api/navigate")
            .with_cookie(&cookie)
            .with_body(r#"{"page": "Reports"}"#),
    );
    assert_eq!(missing.status, 404);
}

#[test]
fn api_submit_is_stateless() {
    let mut app = App::new(quiet_config());
    let (reply, event) = app.handle(
        &Incoming::new(Method::Post, "/api/forms/investor-onboarding/submit")
            .with_body(r#"{"values": {"kyc_completed": true}}"#),
    );
    assert_eq!(reply.status, 200);
    assert!(reply.set_cookie.is_none());
    assert_eq!(event.outcome.as_deref(), Some("rejected"));
    assert!(app.sessions().is_empty());
}

#[test]
fn api_form_definitions_are_served() {
    let mut app = App::new(quiet_config());
    let (all, _) = app.handle(&Incoming::new(Method::Get, "/api/forms"));
    let json: serde_json::Value = serde_json::from_str(&all.body).unwrap();
    assert_eq!(json.as_array().unwrap().len(), 6);

    let (one, _) = app.handle(&Incoming::new(Method::Get, "/api/forms/fund-onboarding"));
    let json: serde_json::Value = serde_json::from_str(&one.body).unwrap();
    assert_eq!(json["submit_label"], "Submit Fund Application");
    assert_eq!(json["gate"]["type"], "open");

    let (none, _) = app.handle(&Incoming::new(Method::Get, "/api/forms/aml-kyc"));
    assert_eq!(none.status, 404);
}

#[test]
fn events_never_carry_field_values() {
    let mut app = App::new(quiet_config());
    let (_, event) = app.handle(
        &Incoming::new(Method::Post, "/api/forms/client-onboarding/submit")
            .with_body(r#"{"values": {"first_name": "Secret Name"}}"#),
    );
    let line = serde_json::to_string(&event).unwrap();
    assert!(!line.contains("Secret Name"));
    assert!(line.contains("\"outcome\":\"accepted\""));
}

// ---------------------------------------------------------------------------
// Live server
// ---------------------------------------------------------------------------

/// Start the server loop on an ephemeral port; returns its base URL.
fn spawn_server() -> String {
    let server = Server::http("127.0.0.1:0").unwrap();
    let addr = server.server_addr().to_ip().unwrap();
    thread::spawn(move || {
        let mut app = App::new(quiet_config());
        web::run(&server, &mut app);
    });
    format!("http://{addr}")
}

#[test]
fn browser_flow_over_real_http() {
    let base = spawn_server();
    let agent = ureq::AgentBuilder::new().redirects(0).build();

    // First visit: dashboard plus a session cookie.
    let resp = agent.get(&format!("{base}/")).call().unwrap();
    assert_eq!(resp.status(), 200);
    let set_cookie = resp.header("Set-Cookie").unwrap().to_string();
    assert!(set_cookie.starts_with(&format!("{SESSION_COOKIE}=")));
    let cookie = cookie_pair(&set_cookie);
    assert!(resp.into_string().unwrap().contains("Dashboard Overview</h1>"));

    // Navigate: 303 back to /.
    let resp = agent
        .post(&format!("{base}/navigate/investor-onboarding"))
        .set("Cookie", &cookie)
        .call()
        .unwrap();
    assert_eq!(resp.status(), 303);
    assert_eq!(resp.header("Location"), Some("/"));

    // Submit without documentation: rejection notice.
    let resp = agent
        .post(&format!("{base}/submit/investor-onboarding"))
        .set("Cookie", &cookie)
        .send_form(&[("first_name", "Ada"), ("kyc_completed", "on")])
        .unwrap();
    let body = resp.into_string().unwrap();
    assert!(body.contains("Please complete all required documentation before submitting."));
    assert!(body.contains(r#"value="Ada""#));

    // Submit with all three: success.
    let resp = agent
        .post(&format!("{base}/submit/investor-onboarding"))
        .set("Cookie", &cookie)
        .send_form(&[
            ("kyc_completed", "on"),
            ("aml_check", "on"),
            ("suitability_assessment", "on"),
        ])
        .unwrap();
    let body = resp.into_string().unwrap();
    assert!(body.contains("Investor onboarding application submitted successfully!"));
}

#[test]
fn unknown_routes_answer_json_404() {
    let base = spawn_server();
    let agent = ureq::AgentBuilder::new().redirects(0).build();

    match agent.get(&format!("{base}/does-not-exist")).call() {
        Err(ureq::Error::Status(404, resp)) => {
            let json: serde_json::Value = resp.into_json().unwrap();
            assert_eq!(json["error"], "not found");
        }
        other => panic!("expected 404, got {other:?}"),
    }

    match agent.post(&format!("{base}/navigate/nowhere")).call() {
        Err(ureq::Error::Status(404, _)) => {}
        other => panic!("expected 404, got {other:?}"),
    }
}

#[test]
fn health_endpoint_reports_ok() {
    let base = spawn_server();
    let json: serde_json::Value = ureq::get(&format!("{base}/api/health"))
        .call()
        .unwrap()
        .into_json()
        .unwrap();
    assert_eq!(json["status"], "ok");
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
}
