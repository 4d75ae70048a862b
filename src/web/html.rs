//! HTML encoding of a [`View`].
//!
//! Sidebar buttons are tiny POST forms aimed at `/navigate/{slug}`; the
//! form block posts to `/submit/{slug}`. No JavaScript is involved.

use std::fmt::Write;

use super::{charts, frontend};
use crate::forms::{FieldDef, FieldKind, FieldValue};
use crate::navigation::{NavGroup, Page};
use crate::view::{Block, FormView, MetricCard, Notice, NoticeLevel, Table, View};

/// Escape text for element content and quoted attribute values.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Full HTML document for `view`.
pub fn page(view: &View) -> String {
    let title = match view.page {
        Some(page) => format!("{} | {}", page.title(), view.app_title),
        None => view.app_title.to_string(),
    };
    let sidebar = sidebar(view.app_title, view.sidebar, view.page);
    let content: String = view.blocks.iter().map(block).collect();
    let footer = format!(
        "<p><strong>{}</strong></p><p>{}</p>",
        escape_html(view.footer[0]),
        escape_html(view.footer[1])
    );
    frontend::layout(&escape_html(&title), &sidebar, &content, &footer)
}

// ---------------------------------------------------------------------------
// Sidebar
// ---------------------------------------------------------------------------

fn sidebar(app_title: &str, groups: &[NavGroup], active: Option<Page>) -> String {
    let mut out = format!(r#"<div class="brand"><h2>{}</h2></div>"#, escape_html(app_title));
    for group in groups {
        let class = if group.buttons.len() == 1 {
            "nav-buttons single"
        } else {
            "nav-buttons"
        };
        let _ = write!(
            out,
            r#"<div class="nav-group"><h3>{}</h3><div class="{class}">"#,
            escape_html(group.title)
        );
        for button in group.buttons {
            let active_class = if Some(button.page) == active {
                r#" class="active""#
            } else {
                ""
            };
            let _ = write!(
                out,
                r#"<form method="post" action="/navigate/{}"><button type="submit" id="{}" title="{}"{active_class}>{}</button></form>"#,
                button.page.slug(),
                button.key,
                escape_html(button.help),
                escape_html(button.label)
            );
        }
        out.push_str("</div></div>");
    }
    out
}

// ---------------------------------------------------------------------------
// Content blocks
// ---------------------------------------------------------------------------

fn block(block: &Block) -> String {
    match block {
        Block::Header { title } => {
            format!(r#"<div class="main-header"><h1>{}</h1></div>"#, escape_html(title))
        }
        Block::Subheader { title } => {
            format!(r#"<h2 class="subheader">{}</h2>"#, escape_html(title))
        }
        Block::Metrics { cards } => metrics(cards),
        Block::Table(t) => table(t),
        Block::Chart(c) => charts::render(c),
        Block::Form(f) => form(f),
        Block::Notice(n) => notice(n),
    }
}

fn metrics(cards: &[MetricCard]) -> String {
    let mut out = String::from(r#"<div class="metrics">"#);
    for card in cards {
        let _ = write!(
            out,
            r#"<div class="metric-card"><h3>{}</h3><div class="value">{}</div></div>"#,
            escape_html(&card.label),
            escape_html(&card.value)
        );
    }
    out.push_str("</div>");
    out
}

/// Cells that read as numbers (thousands separators allowed) align right.
fn is_numeric(cell: &str) -> bool {
    !cell.is_empty() && cell.replace(',', "").parse::<f64>().is_ok()
}

fn table(t: &Table) -> String {
    let mut out = format!(r#"<table aria-label="{}"><thead><tr>"#, escape_html(&t.title));
    for col in &t.columns {
        let _ = write!(out, "<th>{}</th>", escape_html(col));
    }
    out.push_str("</tr></thead><tbody>");
    for row in &t.rows {
        out.push_str("<tr>");
        for cell in row {
            let class = if is_numeric(cell) { r#" class="num""# } else { "" };
            let _ = write!(out, "<td{class}>{}</td>", escape_html(cell));
        }
        out.push_str("</tr>");
    }
    out.push_str("</tbody></table>");
    out
}

fn notice(n: &Notice) -> String {
    let level = match n.level {
        NoticeLevel::Success => "success",
        NoticeLevel::Info => "info",
        NoticeLevel::Error => "error",
    };
    format!(
        r#"<div class="notice {level}" role="status">{}</div>"#,
        escape_html(&n.text)
    )
}

// ---------------------------------------------------------------------------
// Forms
// ---------------------------------------------------------------------------

fn form(view: &FormView) -> String {
    let def = view.form;
    let mut out = format!(
        r#"<div class="form-container"><form method="post" action="/submit/{}">"#,
        def.page.slug()
    );
    for section in def.sections {
        let _ = write!(out, "<fieldset><legend>{}</legend>", escape_html(section.title));
        for field in section.fields {
            out.push_str(&widget(field, view.values.get(field.key)));
        }
        out.push_str("</fieldset>");
    }
    let _ = write!(
        out,
        r#"<button type="submit" class="primary">{}</button></form></div>"#,
        escape_html(def.submit_label)
    );
    out
}

/// One labelled input. `value` is `None` only for values the form never
/// produced, in which case the widget shows its empty state.
fn widget(field: &FieldDef, value: Option<&FieldValue>) -> String {
    let key = field.key;
    let label = escape_html(field.label);
    let text = value.and_then(FieldValue::as_text).unwrap_or_default();

    let input = match field.kind {
        FieldKind::Text => format!(
            r#"<input type="text" id="{key}" name="{key}" value="{}">"#,
            escape_html(text)
        ),
        FieldKind::TextArea => format!(
            r#"<textarea id="{key}" name="{key}">{}</textarea>"#,
            escape_html(text)
        ),
        FieldKind::Select { options } => select(key, options, value, false),
        FieldKind::MultiSelect { options } => select(key, options, value, true),
        FieldKind::Number(spec) => {
            let current = match value {
                Some(FieldValue::Number(n)) => *n,
                _ => spec.default,
            };
            let max = spec
                .max
                .map(|m| format!(r#" max="{}""#, spec.format(m)))
                .unwrap_or_default();
            format!(
                r#"<input type="number" id="{key}" name="{key}" min="{}"{max} step="{}" value="{}">"#,
                spec.format(spec.min),
                spec.step,
                spec.format(current)
            )
        }
        FieldKind::Date => {
            let date = match value {
                Some(FieldValue::Date(d)) => d.format("%Y-%m-%d").to_string(),
                _ => String::new(),
            };
            format!(r#"<input type="date" id="{key}" name="{key}" value="{date}">"#)
        }
        FieldKind::Checkbox => {
            let checked = if value.is_some_and(FieldValue::is_checked) {
                " checked"
            } else {
                ""
            };
            return format!(
                r#"<div class="field checkbox"><label><input type="checkbox" id="{key}" name="{key}" value="on"{checked}> {label}</label></div>"#
            );
        }
        FieldKind::Slider { options, default } => {
            let current = if text.is_empty() { default } else { text };
            let mut out = String::from(r#"<div class="slider">"#);
            for option in options {
                let checked = if *option == current { " checked" } else { "" };
                let _ = write!(
                    out,
                    r#"<label><input type="radio" name="{key}" value="{}"{checked}> {}</label>"#,
                    escape_html(option),
                    escape_html(option)
                );
            }
            out.push_str("</div>");
            out
        }
    };

    format!(r#"<div class="field"><label for="{key}">{label}</label>{input}</div>"#)
}

fn select(key: &str, options: &[&str], value: Option<&FieldValue>, multiple: bool) -> String {
    let multiple_attr = if multiple { " multiple" } else { "" };
    let mut out = format!(r#"<select id="{key}" name="{key}"{multiple_attr}>"#);
    for option in options {
        let selected = if value.is_some_and(|v| v.selects(option)) {
            " selected"
        } else {
            ""
        };
        let _ = write!(
            out,
            r#"<option value="{}"{selected}>{}</option>"#,
            escape_html(option),
            escape_html(option)
        );
    }
    out.push_str("</select>");
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
