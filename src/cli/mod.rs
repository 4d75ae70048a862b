//! CLI command implementations.
//!
//! Provides subcommand handlers for:
//! - `fundadmin serve`: run the dashboard server
//! - `fundadmin pages`: list navigable pages
//! - `fundadmin render <page>`: render one page as JSON, HTML or text
//! - `fundadmin submit <form>`: evaluate a form submission offline
//! - `fundadmin sample`: print the generated dashboard sample data
//! - `fundadmin activity`: summarize the request log
//! - `fundadmin config show|init|set|reset`: configuration management

use std::fmt::Write;

use anyhow::{Result, bail};
use colored::Colorize;

use crate::analytics::events;
use crate::analytics::reporter::{self, ActivitySummary};
use crate::config;
use crate::forms::{self, FieldKind, FormDef};
use crate::navigation;
use crate::sample::{self, DashboardData};
use crate::view::{self, Block, ChartKind, FormState, NoticeLevel, Table, View};
use crate::web;

/// Output format for listing commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

impl OutputFormat {
    pub fn from_str_opt(s: Option<&str>) -> Self {
        match s {
            Some("json") => Self::Json,
            Some("csv") => Self::Csv,
            _ => Self::Table,
        }
    }
}

/// Output format for `fundadmin render`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderFormat {
    Text,
    Json,
    Html,
}

impl RenderFormat {
    pub fn from_str_opt(s: Option<&str>) -> Self {
        match s {
            Some("json") => Self::Json,
            Some("html") => Self::Html,
            _ => Self::Text,
        }
    }
}

// ---------------------------------------------------------------------------
// fundadmin serve
// ---------------------------------------------------------------------------

/// Start the dashboard server. Flags override the loaded configuration.
pub fn run_serve(addr: Option<String>, no_browser: bool, seed: Option<u64>) -> Result<()> {
    let mut config = config::load();
    if let Some(addr) = addr {
        config.server.addr = addr;
    }
    if no_browser {
        config.server.open_browser = false;
    }
    if seed.is_some() {
        config.sample.seed = seed;
    }
    web::serve(config)
}

// ---------------------------------------------------------------------------
// fundadmin pages
// ---------------------------------------------------------------------------

/// List every page in sidebar order.
pub fn run_pages() -> Result<()> {
    println!("{}", "Pages".bold().cyan());
    println!("{}", "=".repeat(60));
    println!("  {:<30} {:<30}", "Slug", "Title");
    println!("  {}", "-".repeat(58));
    for group in navigation::sidebar() {
        println!("  {}", group.title.bold());
        for button in group.buttons {
            println!(
                "  {:<30} {:<30}",
                button.page.slug(),
                button.page.title()
            );
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// fundadmin render
// ---------------------------------------------------------------------------

/// Render one page the way the server would for a session on that page.
pub fn run_render(page: &str, format: RenderFormat, seed: Option<u64>) -> Result<()> {
    let Some(target) = view::resolve(page) else {
        bail!("unknown page '{page}' (run `fundadmin pages` to list pages)");
    };
    let seed = seed.or(config::load().sample.seed);
    let view = view::render(Some(target), None, &mut sample::rng_from_seed(seed));

    match format {
        RenderFormat::Json => println!("{}", serde_json::to_string_pretty(&view)?),
        RenderFormat::Html => println!("{}", web::html::page(&view)),
        RenderFormat::Text => print!("{}", view_text(&view)),
    }
    Ok(())
}

/// Plain-text rendering of a view for the terminal.
pub fn view_text(view: &View) -> String {
    let mut out = String::new();
    for block in &view.blocks {
        match block {
            Block::Header { title } => {
                let _ = writeln!(out, "{title}\n{}", "=".repeat(60));
            }
            Block::Subheader { title } => {
                let _ = writeln!(out, "\n{title}");
            }
            Block::Metrics { cards } => {
                for card in cards {
                    let _ = writeln!(out, "  {:<24} {}", card.label, card.value);
                }
            }
            Block::Table(t) => out.push_str(&table_text(t)),
            Block::Chart(chart) => {
                let _ = writeln!(out, "  [chart] {}", chart.title);
                match &chart.kind {
                    ChartKind::Line { x, series } => {
                        for s in series {
                            let first = s.values.first().copied().unwrap_or_default();
                            let last = s.values.last().copied().unwrap_or_default();
                            let _ = writeln!(
                                out,
                                "    {:<20} {:>8.2} -> {:>8.2} ({} points)",
                                s.name,
                                first,
                                last,
                                x.len()
                            );
                        }
                    }
                    ChartKind::Bar { bars } => {
                        for b in bars {
                            let _ = writeln!(out, "    {:<20} {}", b.label, b.value);
                        }
                    }
                    ChartKind::Pie { slices } => {
                        let total: f64 = slices.iter().map(|s| s.value).sum();
                        for s in slices {
                            let pct = if total > 0.0 { s.value / total * 100.0 } else { 0.0 };
                            let _ = writeln!(out, "    {:<20} {:>6.1}%", s.label, pct);
                        }
                    }
                }
            }
            Block::Form(form) => {
                for section in form.form.sections {
                    let _ = writeln!(out, "\n  {}", section.title);
                    for field in section.fields {
                        let value = form
                            .values
                            .get(field.key)
                            .map(|v| v.to_string())
                            .unwrap_or_default();
                        let _ = writeln!(
                            out,
                            "    {:<36} {:<14} {}",
                            field.label,
                            kind_name(&field.kind),
                            value
                        );
                    }
                }
                let _ = writeln!(out, "\n  [{}]", form.form.submit_label);
            }
            Block::Notice(n) => {
                let tag = match n.level {
                    NoticeLevel::Success => "ok",
                    NoticeLevel::Info => "info",
                    NoticeLevel::Error => "error",
                };
                let _ = writeln!(out, "  ({tag}) {}", n.text);
            }
        }
    }
    out
}

fn table_text(t: &Table) -> String {
    let mut widths: Vec<usize> = t.columns.iter().map(|c| c.chars().count()).collect();
    for row in &t.rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(cell.chars().count());
            }
        }
    }

    let line = |cells: &[String]| -> String {
        let padded: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(c, &w)| format!("{c:<w$}"))
            .collect();
        format!("  {}\n", padded.join("  ").trim_end())
    };

    let mut out = line(&t.columns);
    let total: usize = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
    let _ = writeln!(out, "  {}", "-".repeat(total));
    for row in &t.rows {
        out.push_str(&line(row));
    }
    out
}

fn kind_name(kind: &FieldKind) -> &'static str {
    match kind {
        FieldKind::Text => "text",
        FieldKind::TextArea => "text area",
        FieldKind::Select { .. } => "select",
        FieldKind::MultiSelect { .. } => "multiselect",
        FieldKind::Number(_) => "number",
        FieldKind::Date => "date",
        FieldKind::Checkbox => "checkbox",
        FieldKind::Slider { .. } => "slider",
    }
}

// ---------------------------------------------------------------------------
// fundadmin submit
// ---------------------------------------------------------------------------

/// Evaluate a submission of `form` with `key=value` field assignments.
///
/// Repeat a key for multi-choice fields; pass `key=on` to tick a checkbox.
pub fn run_submit(form: &str, fields: &[String]) -> Result<()> {
    let def = form_by_name(form)?;
    let pairs = parse_field_args(fields)?;

    for (key, _) in &pairs {
        if def.field(key).is_none() {
            println!(
                "{} ignoring unknown field '{}'",
                "!".yellow().bold(),
                key
            );
        }
    }

    let values = def.normalize(&pairs, view::today());
    let state = FormState::submitted(def, values);

    println!("{}", def.heading.bold().cyan());
    println!("{}", "=".repeat(60));
    for field in def.fields() {
        if let Some(value) = state.values.get(field.key) {
            println!("  {:<36} {}", field.label, value);
        }
    }
    println!();

    match &state.outcome {
        Some(forms::Outcome::Accepted {
            message,
            next_steps,
        }) => {
            println!("{} {}", "✓".green().bold(), message.green());
            if let Some(next) = next_steps {
                println!("  {}", next.dimmed());
            }
        }
        Some(forms::Outcome::Rejected { message }) => {
            println!("{} {}", "✗".red().bold(), message.red());
        }
        None => {}
    }
    Ok(())
}

fn form_by_name(name: &str) -> Result<&'static FormDef> {
    let page = view::resolve(name);
    match page.and_then(forms::for_page) {
        Some(def) => Ok(def),
        None => {
            let known: Vec<&str> = forms::all().iter().map(|f| f.page.slug()).collect();
            bail!("'{name}' is not a form page (forms: {})", known.join(", "))
        }
    }
}

/// Split `key=value` arguments. The value may itself contain `=`.
fn parse_field_args(fields: &[String]) -> Result<Vec<(String, String)>> {
    fields
        .iter()
        .map(|arg| match arg.split_once('=') {
            Some((k, v)) if !k.trim().is_empty() => Ok((k.trim().to_string(), v.to_string())),
            _ => bail!("invalid field '{arg}', expected key=value"),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// fundadmin sample
// ---------------------------------------------------------------------------

/// Print one draw of the dashboard sample data.
pub fn run_sample(format: OutputFormat, seed: Option<u64>) -> Result<()> {
    let seed = seed.or(config::load().sample.seed);
    let data = sample::generate(&mut sample::rng_from_seed(seed));

    match format {
        OutputFormat::Json => {
            let value = serde_json::json!({
                "metrics": data.metrics(),
                "data": data,
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        OutputFormat::Csv => print_sample_csv(&data),
        OutputFormat::Table => print_sample_table(&data),
    }
    Ok(())
}

fn print_sample_table(data: &DashboardData) {
    let metrics = data.metrics();
    println!("{}", "Dashboard Sample Data".bold().cyan());
    println!("{}", "=".repeat(60));
    println!(
        "  {} ${}M",
        "Total AUM:        ".bold(),
        view::format_thousands(u64::from(metrics.total_aum_millions))
    );
    println!("  {} {}", "Total investors:  ".bold(), metrics.total_investors);
    println!("  {} {}", "Active funds:     ".bold(), metrics.active_funds);
    println!("  {} {}", "Pending approvals:".bold(), metrics.pending_approvals);
    println!();

    println!("{}", "Funds".bold().cyan());
    println!(
        "  {:<22} {:>8} {:>10} {:<8} Launch",
        "Fund", "AUM ($M)", "Investors", "Status"
    );
    println!("  {}", "-".repeat(62));
    for (i, fund) in data.funds.iter().enumerate() {
        let line = format!(
            "  {:<22} {:>8} {:>10} {:<8} {}",
            truncate(fund.name, 22),
            fund.aum_millions,
            fund.investors,
            fund.status,
            fund.launch_date
        );
        if i % 2 == 0 {
            println!("{line}");
        } else {
            println!("{}", line.dimmed());
        }
    }
    println!();

    println!("{}", "Performance (first → last)".bold().cyan());
    for series in &data.performance.series {
        let first = series.points.first().copied().unwrap_or_default();
        let last = series.points.last().copied().unwrap_or_default();
        println!(
            "  {:<22} {:>8.2} → {:>8.2}",
            truncate(series.spec.fund, 22),
            first,
            last
        );
    }
}

fn print_sample_csv(data: &DashboardData) {
    let header: Vec<&str> = data
        .performance
        .series
        .iter()
        .map(|s| s.spec.fund)
        .collect();
    println!("date,{}", header.join(","));
    for (k, date) in data.performance.dates.iter().enumerate() {
        let row: Vec<String> = data
            .performance
            .series
            .iter()
            .map(|s| s.points.get(k).map(|p| format!("{p:.4}")).unwrap_or_default())
            .collect();
        println!("{date},{}", row.join(","));
    }
}

// ---------------------------------------------------------------------------
// fundadmin activity
// ---------------------------------------------------------------------------

/// Summarize the request log.
pub fn run_activity(format: OutputFormat, days: Option<u32>) -> Result<()> {
    let logging = config::load().logging;
    let Some(path) = events::log_path(&logging) else {
        bail!("cannot resolve request log path '{}'", logging.path);
    };
    let summary = reporter::summarize(&events::read_since_days(&path, days));

    if summary.total_requests == 0 {
        println!(
            "{}",
            "No requests logged yet. Run `fundadmin serve` and browse the dashboard.".yellow()
        );
        return Ok(());
    }

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summary)?),
        OutputFormat::Csv => print_activity_csv(&summary),
        OutputFormat::Table => print_activity_table(&summary, days),
    }
    Ok(())
}

fn print_activity_table(summary: &ActivitySummary, days: Option<u32>) {
    let title = match days {
        Some(days) => format!("Dashboard Activity (last {days} days)"),
        None => "Dashboard Activity".to_string(),
    };
    println!("{}", title.bold().cyan());
    println!("{}", "=".repeat(50));
    println!("  {} {}", "Requests:".bold(), summary.total_requests);
    println!("  {} {}", "Sessions:".bold(), summary.distinct_sessions);
    println!("  {} {}", "Errors:  ".bold(), summary.errors);
    println!();

    if !summary.page_views.is_empty() {
        println!("{}", "Page Views".bold().cyan());
        for pv in &summary.page_views {
            println!("  {:<32} {:>6}", pv.page, pv.views);
        }
        println!();
    }

    if !summary.submissions.is_empty() {
        println!("{}", "Submissions".bold().cyan());
        println!("  {:<32} {:>8} {:>8}", "Form", "Accepted", "Rejected");
        println!("  {}", "-".repeat(50));
        for s in &summary.submissions {
            println!(
                "  {:<32} {:>8} {:>8}",
                s.form,
                s.accepted.to_string().green(),
                s.rejected.to_string().red()
            );
        }
    }
}

fn print_activity_csv(summary: &ActivitySummary) {
    println!("kind,page,views,accepted,rejected");
    for pv in &summary.page_views {
        println!("view,{},{},,", pv.page, pv.views);
    }
    for s in &summary.submissions {
        println!("submit,{},,{},{}", s.form, s.accepted, s.rejected);
    }
}

// ---------------------------------------------------------------------------
// fundadmin config show | init | set | reset
// ---------------------------------------------------------------------------

/// Show the effective (merged) configuration as TOML.
pub fn run_config_show() -> Result<()> {
    let toml_str = config::show_effective_config()?;
    println!("{}", "Effective fundadmin Configuration".bold().cyan());
    println!("{}", "=".repeat(50));
    println!();
    println!("{toml_str}");

    let global_exists = config::global_config_file().is_some_and(|p| p.exists());
    let project_exists = config::project_config_file().is_some_and(|p| p.exists());
    println!("{}", "Sources (highest priority last):".dimmed());
    println!("  {} built-in defaults", "·".dimmed());
    print_source(global_exists, "~/.fundadmin/config.toml");
    print_source(project_exists, ".fundadmin.toml");
    println!(
        "  {} {}",
        "·".dimmed(),
        "FUNDADMIN_* environment variables".dimmed()
    );
    Ok(())
}

fn print_source(exists: bool, name: &str) {
    if exists {
        println!("  {} {}", "✓".green(), name.dimmed());
    } else {
        println!("  {} {}", "·".dimmed(), format!("{name} (not found)").dimmed());
    }
}

/// Initialize a default config file at `~/.fundadmin/config.toml`.
pub fn run_config_init(force: bool) -> Result<()> {
    let path = config::init_config(force)?;
    println!(
        "{} Config written to {}",
        "✓".green().bold(),
        path.display()
    );
    println!("  {}", "Edit the file to customize the dashboard.".dimmed());
    Ok(())
}

/// Set a single configuration value in the global config file.
pub fn run_config_set(key: &str, value: &str) -> Result<()> {
    config::set_config_value(key, value)?;
    println!("{} Set {} = {}", "✓".green().bold(), key.bold(), value);
    Ok(())
}

/// Reset configuration to defaults.
pub fn run_config_reset() -> Result<()> {
    let path = config::reset_config()?;
    println!(
        "{} Config reset to defaults at {}",
        "✓".green().bold(),
        path.display()
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// Formatting helpers
// ---------------------------------------------------------------------------

/// Truncate a string to `max_len` characters, appending "…" if truncated.
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(1)).collect();
        format!("{kept}…")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::Page;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world", 5), "hell…");
        assert_eq!(truncate("ab", 2), "ab");
        assert_eq!(truncate("Équité", 3), "Éq…");
    }

    #[test]
    fn test_output_format_parsing() {
        assert_eq!(OutputFormat::from_str_opt(None), OutputFormat::Table);
        assert_eq!(OutputFormat::from_str_opt(Some("json")), OutputFormat::Json);
        assert_eq!(OutputFormat::from_str_opt(Some("csv")), OutputFormat::Csv);
        assert_eq!(RenderFormat::from_str_opt(Some("html")), RenderFormat::Html);
        assert_eq!(RenderFormat::from_str_opt(Some("bogus")), RenderFormat::Text);
    }

    #[test]
    fn field_args_split_on_first_equals() {
        let args = vec!["fund_name=A=B".to_string(), "aml_check=on".to_string()];
        let pairs = parse_field_args(&args).unwrap();
        assert_eq!(pairs[0], ("fund_name".to_string(), "A=B".to_string()));
        assert!(parse_field_args(&["novalue".to_string()]).is_err());
        assert!(parse_field_args(&["=x".to_string()]).is_err());
    }

    #[test]
    fn form_lookup_accepts_slug_and_title() {
        assert_eq!(
            form_by_name("investor-onboarding").unwrap().page,
            Page::InvestorOnboarding
        );
        assert_eq!(
            form_by_name("Person Onboarding").unwrap().page,
            Page::PersonOnboarding
        );
        assert!(form_by_name("dashboard").is_err());
    }

    #[test]
    fn text_view_lists_tables_and_metrics() {
        let v = view::render(Some(Page::AmlKyc), None, &mut StdRng::seed_from_u64(1));
        let text = view_text(&v);
        assert!(text.starts_with("🔒 AML / KYC Compliance"));
        assert!(text.contains("156"));
        assert!(text.contains("Applicant Name"));
        assert!(text.contains("[chart] Risk Level Distribution"));
    }

    #[test]
    fn text_view_shows_form_fields() {
        let v = view::render(Some(Page::FundOnboarding), None, &mut StdRng::seed_from_u64(1));
        let text = view_text(&v);
        assert!(text.contains("Management Fee"));
        assert!(text.contains("[Submit Fund Application]"));
    }

    #[test]
    fn table_text_pads_columns() {
        let t = Table {
            title: "T".into(),
            columns: vec!["A".into(), "Bee".into()],
            rows: vec![vec!["long cell".into(), "x".into()]],
        };
        let text = table_text(&t);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "  A          Bee");
        assert_eq!(lines[2], "  long cell  x");
    }
}
