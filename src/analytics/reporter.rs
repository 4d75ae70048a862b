//! Aggregation of the request log for `fundadmin activity`.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use super::events::{Action, RequestEvent};

#[derive(Debug, Default, Serialize)]
pub struct ActivitySummary {
    pub total_requests: usize,
    pub distinct_sessions: usize,
    /// Requests answered with a 4xx/5xx status.
    pub errors: usize,
    /// Page slug → renders, most viewed first.
    pub page_views: Vec<PageViews>,
    pub submissions: Vec<SubmissionStat>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageViews {
    pub page: String,
    pub views: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SubmissionStat {
    pub form: String,
    pub accepted: usize,
    pub rejected: usize,
}

impl SubmissionStat {
    pub fn total(&self) -> usize {
        self.accepted + self.rejected
    }
}

pub fn summarize(events: &[RequestEvent]) -> ActivitySummary {
    let mut sessions: HashSet<&str> = HashSet::new();
    let mut views: HashMap<&str, usize> = HashMap::new();
    let mut submissions: HashMap<&str, SubmissionStat> = HashMap::new();
    let mut errors = 0;

    for event in events {
        if let Some(session) = event.session.as_deref() {
            sessions.insert(session);
        }
        if event.status >= 400 {
            errors += 1;
        }
        let Some(page) = event.page.as_deref() else {
            continue;
        };
        match event.action {
            Action::View => *views.entry(page).or_default() += 1,
            Action::Submit => {
                let stat = submissions.entry(page).or_insert_with(|| SubmissionStat {
                    form: page.to_string(),
                    ..SubmissionStat::default()
                });
                match event.outcome.as_deref() {
                    Some("accepted") => stat.accepted += 1,
                    Some("rejected") => stat.rejected += 1,
                    _ => {}
                }
            }
            Action::Navigate | Action::Other => {}
        }
    }

    let mut page_views: Vec<PageViews> = views
        .into_iter()
        .map(|(page, views)| PageViews {
            page: page.to_string(),
            views,
        })
        .collect();
    page_views.sort_by(|a, b| b.views.cmp(&a.views).then_with(|| a.page.cmp(&b.page)));

    let mut submissions: Vec<SubmissionStat> = submissions.into_values().collect();
    submissions.sort_by(|a, b| b.total().cmp(&a.total()).then_with(|| a.form.cmp(&b.form)));

    ActivitySummary {
        total_requests: events.len(),
        distinct_sessions: sessions.len(),
        errors,
        page_views,
        submissions,
    }
}
