//! Page router and the view description it produces.
//!
//! Rendering is a pure function of the active page (plus, for form pages,
//! the values just submitted and, for the Dashboard, a random source). The
//! resulting [`View`] is encoded as HTML by `web::html` and as JSON by the
//! API; neither encoding adds behaviour.

mod pages;

use chrono::NaiveDate;
use rand::Rng;
use serde::Serialize;

use crate::forms::{self, FormDef, FormValues, Outcome};
use crate::navigation::{self, NavGroup, Page};

pub const APP_TITLE: &str = "💰 Fund Admin System";

pub const FOOTER: [&str; 2] = [
    "💰 Fund Administration System Demo",
    "This is a demonstration application for educational purposes.",
];

// ---------------------------------------------------------------------------
// View description
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct View {
    pub app_title: &'static str,
    /// `None` when the requested identifier matched no page.
    pub page: Option<Page>,
    pub sidebar: &'static [NavGroup],
    pub blocks: Vec<Block>,
    pub footer: [&'static str; 2],
}

impl View {
    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.blocks.iter().filter_map(|b| match b {
            Block::Table(t) => Some(t),
            _ => None,
        })
    }

    pub fn charts(&self) -> impl Iterator<Item = &Chart> {
        self.blocks.iter().filter_map(|b| match b {
            Block::Chart(c) => Some(c),
            _ => None,
        })
    }

    pub fn metrics(&self) -> impl Iterator<Item = &MetricCard> {
        self.blocks.iter().flat_map(|b| match b {
            Block::Metrics { cards } => cards.as_slice(),
            _ => &[][..],
        })
    }

    pub fn notices(&self) -> impl Iterator<Item = &Notice> {
        self.blocks.iter().filter_map(|b| match b {
            Block::Notice(n) => Some(n),
            _ => None,
        })
    }

    pub fn form(&self) -> Option<&FormView> {
        self.blocks.iter().find_map(|b| match b {
            Block::Form(f) => Some(f),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "block", rename_all = "snake_case")]
pub enum Block {
    Header { title: String },
    Subheader { title: String },
    Metrics { cards: Vec<MetricCard> },
    Table(Table),
    Chart(Chart),
    Form(FormView),
    Notice(Notice),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricCard {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Table {
    pub title: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Chart {
    pub title: String,
    pub x_label: Option<String>,
    pub y_label: Option<String>,
    pub kind: ChartKind,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ChartKind {
    Line { x: Vec<String>, series: Vec<Series> },
    Bar { bars: Vec<Bar> },
    Pie { slices: Vec<Slice> },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    pub name: String,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bar {
    pub label: String,
    pub value: f64,
    pub color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Slice {
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeLevel {
    Success,
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub text: String,
}

/// A form page's widgets with their current values.
#[derive(Debug, Clone, Serialize)]
pub struct FormView {
    pub form: &'static FormDef,
    pub values: FormValues,
    pub outcome: Option<Outcome>,
}

/// Widget values carried into one render of a form page.
#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    pub values: FormValues,
    pub outcome: Option<Outcome>,
}

impl FormState {
    /// A freshly opened form: every widget at its default, nothing submitted.
    pub fn pristine(form: &FormDef, today: NaiveDate) -> Self {
        Self {
            values: form.defaults(today),
            outcome: None,
        }
    }

    /// Values just submitted, with the outcome of pressing submit.
    pub fn submitted(form: &FormDef, values: FormValues) -> Self {
        let outcome = form.submit(&values);
        Self {
            values,
            outcome: Some(outcome),
        }
    }
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

/// Map a raw page identifier (slug, display name or sidebar widget key) to
/// a page.
pub fn resolve(identifier: &str) -> Option<Page> {
    Page::parse(identifier)
        .or_else(|| navigation::button_by_key(identifier.trim()).map(|b| b.page))
}

/// Render exactly one page.
///
/// `form` is only consulted on form pages; when absent the form opens with
/// default values. An unresolved target renders the chrome with an empty
/// content area.
pub fn render<R: Rng + ?Sized>(target: Option<Page>, form: Option<FormState>, rng: &mut R) -> View {
    let blocks = match target {
        Some(Page::Dashboard) => pages::dashboard(rng),
        Some(Page::AmlKyc) => pages::aml_kyc(),
        Some(page) => match forms::for_page(page) {
            Some(def) => {
                let state = form.unwrap_or_else(|| FormState::pristine(def, today()));
                pages::form(def, state)
            }
            None => Vec::new(),
        },
        None => Vec::new(),
    };

    View {
        app_title: APP_TITLE,
        page: target,
        sidebar: navigation::sidebar(),
        blocks,
        footer: FOOTER,
    }
}

/// Local calendar date, the default of every date widget.
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Format an integer with comma separators.
pub fn format_thousands(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(ch);
    }
    result.chars().rev().collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(3)
    }

    #[test]
    fn unresolved_identifier_renders_nothing() {
        let view = render(resolve("Reports"), None, &mut rng());
        assert!(view.page.is_none());
        assert!(view.blocks.is_empty());
        assert_eq!(view.sidebar.len(), 4);
    }

    #[test]
    fn each_page_renders_its_own_header() {
        for page in Page::ALL {
            let view = render(Some(page), None, &mut rng());
            assert_eq!(view.page, Some(page));
            let headers: Vec<&str> = view
                .blocks
                .iter()
                .filter_map(|b| match b {
                    Block::Header { title } => Some(title.as_str()),
                    _ => None,
                })
                .collect();
            assert_eq!(headers.len(), 1, "{page}");
        }
    }

    #[test]
    fn pristine_form_has_no_notice() {
        let view = render(Some(Page::ClientOnboarding), None, &mut rng());
        assert!(view.form().unwrap().outcome.is_none());
        assert_eq!(view.notices().count(), 0);
    }

    #[test]
    fn format_thousands_groups_digits() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(4990), "4,990");
        assert_eq!(format_thousands(1_200_000), "1,200,000");
    }

    #[test]
    fn view_serializes_blocks_with_tag() {
        let view = render(Some(Page::AmlKyc), None, &mut rng());
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["page"], "aml-kyc");
        assert_eq!(json["blocks"][0]["block"], "header");
    }
}
