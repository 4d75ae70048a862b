//! JSON API handlers for the web dashboard.
//!
//! Each handler corresponds to an API endpoint and returns a [`Reply`]
//! with JSON content. The API renders the same [`View`](crate::view::View)
//! the HTML pages do; it adds no behaviour of its own.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::forms::{self, FormDef, FormValues, Outcome};
use crate::navigation::{self, Page};
use crate::view;

use super::Reply;

// ---------------------------------------------------------------------------
// JSON request / response types
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct PageEntry {
    slug: &'static str,
    title: &'static str,
    group: &'static str,
    label: &'static str,
    key: &'static str,
}

#[derive(Deserialize)]
struct NavigateRequest {
    /// Slug, display identifier or sidebar widget key.
    page: String,
}

#[derive(Deserialize)]
struct SubmitRequest {
    #[serde(default)]
    values: serde_json::Map<String, Value>,
}

#[derive(Serialize)]
struct SubmitResponse<'a> {
    form: &'static str,
    values: &'a FormValues,
    #[serde(flatten)]
    outcome: &'a Outcome,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
    sessions: usize,
    uptime_secs: i64,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Build a JSON success response.
fn json_response<T: Serialize>(data: &T) -> Result<Reply> {
    let body = serde_json::to_string(data).context("failed to serialize JSON response")?;
    Ok(Reply::json_body(200, body))
}

/// Flatten a JSON submission into the `(key, value)` pairs a browser would
/// send: arrays repeat the key, `true` ticks a checkbox, `false` and `null`
/// leave the field absent.
fn submitted_pairs(values: &serde_json::Map<String, Value>) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    for (key, value) in values {
        match value {
            Value::Array(items) => {
                pairs.extend(items.iter().filter_map(scalar).map(|v| (key.clone(), v)));
            }
            other => {
                if let Some(v) = scalar(other) {
                    pairs.push((key.clone(), v));
                }
            }
        }
    }
    pairs
}

fn scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(true) => Some("on".to_string()),
        Value::Bool(false) | Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

// ---------------------------------------------------------------------------
// API handlers
// ---------------------------------------------------------------------------

/// `GET /api/pages`: every page in sidebar order.
pub fn get_pages() -> Result<Reply> {
    let entries: Vec<PageEntry> = navigation::sidebar()
        .iter()
        .flat_map(|group| {
            group.buttons.iter().map(|b| PageEntry {
                slug: b.page.slug(),
                title: b.page.title(),
                group: group.title,
                label: b.label,
                key: b.key,
            })
        })
        .collect();
    json_response(&entries)
}

/// `GET /api/view`: the rendered view of `page`.
pub fn get_view<R: Rng + ?Sized>(page: Page, rng: &mut R) -> Result<Reply> {
    json_response(&view::render(Some(page), None, rng))
}

/// Parse a `POST /api/navigate` body. `Ok(None)` means the identifier named
/// no page.
pub fn parse_navigate(body: &str) -> Result<Option<Page>> {
    let req: NavigateRequest =
        serde_json::from_str(body).context("invalid navigate request body")?;
    Ok(view::resolve(&req.page))
}

/// `GET /api/forms`: every form definition.
pub fn get_forms() -> Result<Reply> {
    json_response(&forms::all())
}

/// `GET /api/forms/{slug}`.
pub fn get_form(slug: &str) -> Result<Reply> {
    match form_for_slug(slug) {
        Some(def) => json_response(def),
        None => Ok(Reply::error(404, "unknown form")),
    }
}

/// `POST /api/forms/{slug}/submit`. Stateless: the session's page is
/// neither read nor changed.
pub fn post_submit(slug: &str, body: &str) -> Result<(Reply, Option<Outcome>)> {
    let Some(def) = form_for_slug(slug) else {
        return Ok((Reply::error(404, "unknown form"), None));
    };
    let req: SubmitRequest = if body.trim().is_empty() {
        SubmitRequest {
            values: serde_json::Map::new(),
        }
    } else {
        serde_json::from_str(body).context("invalid submit request body")?
    };

    let values = def.normalize(&submitted_pairs(&req.values), view::today());
    let outcome = def.submit(&values);
    let reply = json_response(&SubmitResponse {
        form: def.page.slug(),
        values: &values,
        outcome: &outcome,
    })?;
    Ok((reply, Some(outcome)))
}

/// `GET /api/health`.
pub fn get_health(sessions: usize, started: DateTime<Utc>) -> Result<Reply> {
    json_response(&HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        sessions,
        uptime_secs: (Utc::now() - started).num_seconds(),
    })
}

fn form_for_slug(slug: &str) -> Option<&'static FormDef> {
    Page::from_slug(slug).and_then(forms::for_page)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn body(reply: &Reply) -> Value {
        serde_json::from_str(&reply.body).unwrap()
    }

    #[test]
    fn pages_lists_all_eight_in_order() {
        let json = body(&get_pages().unwrap());
        let slugs: Vec<&str> = json
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["slug"].as_str().unwrap())
            .collect();
        let expected: Vec<&str> = Page::ALL.iter().map(|p| p.slug()).collect();
        assert_eq!(slugs, expected);
    }

    #[test]
    fn view_json_has_blocks() {
        let reply = get_view(Page::Dashboard, &mut StdRng::seed_from_u64(9)).unwrap();
        let json = body(&reply);
        assert_eq!(json["page"], "dashboard");
        assert_eq!(json["blocks"][1]["cards"][0]["value"], "$4,990M");
    }

    #[test]
    fn navigate_accepts_slug_title_or_key() {
        assert_eq!(
            parse_navigate(r#"{"page": "aml-kyc"}"#).unwrap(),
            Some(Page::AmlKyc)
        );
        assert_eq!(
            parse_navigate(r#"{"page": "Fund/Company Relationship"}"#).unwrap(),
            Some(Page::FundCompanyRelationship)
        );
        assert_eq!(
            parse_navigate(r#"{"page": "indiv_fund_btn"}"#).unwrap(),
            Some(Page::IndividualFundRelationship)
        );
        assert_eq!(parse_navigate(r#"{"page": "Reports"}"#).unwrap(), None);
        assert!(parse_navigate("not json").is_err());
    }

    #[test]
    fn unknown_form_is_404() {
        assert_eq!(get_form("dashboard").unwrap().status, 404);
        let (reply, outcome) = post_submit("nope", "{}").unwrap();
        assert_eq!(reply.status, 404);
        assert!(outcome.is_none());
    }

    #[test]
    fn submit_without_checks_is_rejected() {
        let (reply, outcome) = post_submit(
            "investor-onboarding",
            r#"{"values": {"kyc_completed": true, "aml_check": false}}"#,
        )
        .unwrap();
        assert!(!outcome.unwrap().is_accepted());
        let json = body(&reply);
        assert_eq!(json["outcome"], "rejected");
        assert_eq!(
            json["message"],
            "Please complete all required documentation before submitting."
        );
    }

    #[test]
    fn submit_with_all_checks_is_accepted() {
        let (reply, outcome) = post_submit(
            "investor-onboarding",
            r#"{"values": {"kyc_completed": true, "aml_check": "on", "suitability_assessment": 1, "investment_amount": 5}}"#,
        )
        .unwrap();
        assert!(outcome.unwrap().is_accepted());
        let json = body(&reply);
        assert_eq!(json["values"]["investment_amount"], 10000.0);
        assert_eq!(json["form"], "investor-onboarding");
    }

    #[test]
    fn empty_body_submits_defaults() {
        let (_, outcome) = post_submit("fund-onboarding", "").unwrap();
        assert!(outcome.unwrap().is_accepted());
    }

    #[test]
    fn arrays_repeat_the_key() {
        let values: serde_json::Map<String, Value> =
            serde_json::from_str(r#"{"services": ["A", "B"], "x": null}"#).unwrap();
        let pairs = submitted_pairs(&values);
        assert_eq!(
            pairs,
            vec![
                ("services".to_string(), "A".to_string()),
                ("services".to_string(), "B".to_string()),
            ]
        );
    }

    #[test]
    fn health_reports_sessions() {
        let json = body(&get_health(3, Utc::now()).unwrap());
        assert_eq!(json["status"], "ok");
        assert_eq!(json["sessions"], 3);
    }
}
