//! Inline SVG rendering of line, bar and pie charts.
//!
//! Each data point carries a `<title>` so browsers show its value on hover.

use std::fmt::Write;

use super::html::escape_html;
use crate::view::{Bar, Chart, ChartKind, Series, Slice};

const WIDTH: f64 = 560.0;
const HEIGHT: f64 = 320.0;
const MARGIN_LEFT: f64 = 52.0;
const MARGIN_RIGHT: f64 = 16.0;
const MARGIN_TOP: f64 = 16.0;
const MARGIN_BOTTOM: f64 = 64.0;
const Y_TICKS: usize = 5;

const PALETTE: [&str; 6] = ["#1f77b4", "#ff7f0e", "#2ca02c", "#d62728", "#9467bd", "#8c564b"];

/// Render a chart as a titled `<div>` holding an SVG.
pub fn render(chart: &Chart) -> String {
    let body = match &chart.kind {
        ChartKind::Line { x, series } => line(x, series, chart),
        ChartKind::Bar { bars } => bar(bars, chart),
        ChartKind::Pie { slices } => pie(slices),
    };
    format!(
        r#"<div class="chart"><h4>{}</h4>{body}</div>"#,
        escape_html(&chart.title)
    )
}

fn color(i: usize) -> &'static str {
    PALETTE[i % PALETTE.len()]
}

fn svg_open() -> String {
    format!(r#"<svg viewBox="0 0 {WIDTH} {HEIGHT}" xmlns="http://www.w3.org/2000/svg" role="img">"#)
}

/// Trim a value for labels: integers print without decimals.
fn label_num(v: f64) -> String {
    if (v - v.round()).abs() < 1e-9 {
        format!("{}", v.round() as i64)
    } else {
        format!("{v:.1}")
    }
}

/// Value range padded so lines never touch the plot edge.
fn y_range(values: impl Iterator<Item = f64>, floor_at_zero: bool) -> (f64, f64) {
    let (mut lo, mut hi) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if !lo.is_finite() || !hi.is_finite() {
        return (0.0, 1.0);
    }
    if floor_at_zero {
        lo = lo.min(0.0);
    }
    if (hi - lo).abs() < f64::EPSILON {
        hi = lo + 1.0;
    }
    let pad = (hi - lo) * 0.05;
    if !floor_at_zero {
        lo -= pad;
    }
    hi += pad;
    (lo, hi)
}

struct Plot {
    lo: f64,
    hi: f64,
}

impl Plot {
    fn inner_width() -> f64 {
        WIDTH - MARGIN_LEFT - MARGIN_RIGHT
    }

    fn inner_height() -> f64 {
        HEIGHT - MARGIN_TOP - MARGIN_BOTTOM
    }

    fn y(&self, v: f64) -> f64 {
        MARGIN_TOP + (self.hi - v) / (self.hi - self.lo) * Self::inner_height()
    }

    fn axes(&self, out: &mut String, chart: &Chart) {
        let x0 = MARGIN_LEFT;
        let y0 = MARGIN_TOP + Self::inner_height();
        let _ = write!(
            out,
            r##"<line x1="{x0}" y1="{MARGIN_TOP}" x2="{x0}" y2="{y0:.1}" stroke="#999"/><line x1="{x0}" y1="{y0:.1}" x2="{:.1}" y2="{y0:.1}" stroke="#999"/>"##,
            WIDTH - MARGIN_RIGHT
        );
        for i in 0..=Y_TICKS {
            let v = self.lo + (self.hi - self.lo) * i as f64 / Y_TICKS as f64;
            let y = self.y(v);
            let _ = write!(
                out,
                r##"<line x1="{x0}" y1="{y:.1}" x2="{:.1}" y2="{y:.1}" stroke="#eee"/><text x="{:.1}" y="{:.1}" text-anchor="end">{}</text>"##,
                WIDTH - MARGIN_RIGHT,
                x0 - 6.0,
                y + 4.0,
                label_num((v * 10.0).round() / 10.0)
            );
        }
        if let Some(label) = &chart.x_label {
            let _ = write!(
                out,
                r#"<text x="{:.1}" y="{:.1}" text-anchor="middle">{}</text>"#,
                MARGIN_LEFT + Self::inner_width() / 2.0,
                HEIGHT - 4.0,
                escape_html(label)
            );
        }
        if let Some(label) = &chart.y_label {
            let _ = write!(
                out,
                r#"<text x="12" y="{:.1}" text-anchor="middle" transform="rotate(-90 12 {:.1})">{}</text>"#,
                MARGIN_TOP + Self::inner_height() / 2.0,
                MARGIN_TOP + Self::inner_height() / 2.0,
                escape_html(label)
            );
        }
    }
}

fn legend(out: &mut String, names: &[(&str, &str)]) {
    let mut x = MARGIN_LEFT;
    let y = HEIGHT - 24.0;
    for (name, fill) in names {
        let _ = write!(
            out,
            r#"<rect x="{x:.1}" y="{:.1}" width="10" height="10" fill="{fill}"/><text x="{:.1}" y="{y:.1}">{}</text>"#,
            y - 9.0,
            x + 14.0,
            escape_html(name)
        );
        x += 24.0 + name.chars().count() as f64 * 6.5;
    }
}

// ---------------------------------------------------------------------------
// Line
// ---------------------------------------------------------------------------

fn line(x: &[String], series: &[Series], chart: &Chart) -> String {
    let plot = {
        let (lo, hi) = y_range(series.iter().flat_map(|s| s.values.iter().copied()), false);
        Plot { lo, hi }
    };
    let step = if x.len() > 1 {
        Plot::inner_width() / (x.len() - 1) as f64
    } else {
        0.0
    };
    let px = |i: usize| MARGIN_LEFT + step * i as f64;

    let mut out = svg_open();
    plot.axes(&mut out, chart);

    for (i, label) in x.iter().enumerate() {
        let _ = write!(
            out,
            r#"<text x="{:.1}" y="{:.1}" text-anchor="middle">{}</text>"#,
            px(i),
            MARGIN_TOP + Plot::inner_height() + 14.0,
            escape_html(short_label(label))
        );
    }

    for (si, s) in series.iter().enumerate() {
        let stroke = color(si);
        let points: Vec<String> = s
            .values
            .iter()
            .enumerate()
            .map(|(i, v)| format!("{:.1},{:.1}", px(i), plot.y(*v)))
            .collect();
        let _ = write!(
            out,
            r#"<polyline fill="none" stroke="{stroke}" stroke-width="2" points="{}"/>"#,
            points.join(" ")
        );
        for (i, v) in s.values.iter().enumerate() {
            let tip = x.get(i).map(String::as_str).unwrap_or_default();
            let _ = write!(
                out,
                r#"<circle cx="{:.1}" cy="{:.1}" r="3" fill="{stroke}"><title>{} {}: {:.2}</title></circle>"#,
                px(i),
                plot.y(*v),
                escape_html(&s.name),
                escape_html(tip),
                v
            );
        }
    }

    let names: Vec<(&str, &str)> = series
        .iter()
        .enumerate()
        .map(|(i, s)| (s.name.as_str(), color(i)))
        .collect();
    legend(&mut out, &names);
    out.push_str("</svg>");
    out
}

/// ISO dates collapse to `MM-DD`; other labels pass through.
fn short_label(label: &str) -> &str {
    if label.len() == 10 && label.as_bytes().get(4) == Some(&b'-') {
        &label[5..]
    } else {
        label
    }
}

// ---------------------------------------------------------------------------
// Bar
// ---------------------------------------------------------------------------

fn bar(bars: &[Bar], chart: &Chart) -> String {
    let plot = {
        let (lo, hi) = y_range(bars.iter().map(|b| b.value), true);
        Plot { lo, hi }
    };
    let slot = Plot::inner_width() / bars.len().max(1) as f64;
    let width = slot * 0.6;

    let mut out = svg_open();
    plot.axes(&mut out, chart);

    for (i, b) in bars.iter().enumerate() {
        let fill = b.color.as_deref().unwrap_or_else(|| color(i));
        let x = MARGIN_LEFT + slot * i as f64 + (slot - width) / 2.0;
        let top = plot.y(b.value);
        let base = plot.y(0.0);
        let _ = write!(
            out,
            r#"<rect x="{x:.1}" y="{top:.1}" width="{width:.1}" height="{:.1}" fill="{}"><title>{}: {}</title></rect>"#,
            (base - top).max(0.0),
            escape_html(fill),
            escape_html(&b.label),
            label_num(b.value)
        );
        let _ = write!(
            out,
            r#"<text x="{:.1}" y="{:.1}" text-anchor="middle">{}</text>"#,
            x + width / 2.0,
            base + 14.0,
            escape_html(&b.label)
        );
    }

    out.push_str("</svg>");
    out
}

// ---------------------------------------------------------------------------
// Pie
// ---------------------------------------------------------------------------

fn pie(slices: &[Slice]) -> String {
    let total: f64 = slices.iter().map(|s| s.value.max(0.0)).sum();
    let (cx, cy, r) = (WIDTH / 2.0, (HEIGHT - 40.0) / 2.0, (HEIGHT - 72.0) / 2.0);

    let mut out = svg_open();
    let mut angle = -std::f64::consts::FRAC_PI_2;

    for (i, s) in slices.iter().enumerate() {
        if total <= 0.0 || s.value <= 0.0 {
            continue;
        }
        let share = s.value / total;
        let tip = format!("{}: {} ({:.1}%)", s.label, label_num(s.value), share * 100.0);

        if share >= 1.0 - 1e-9 {
            let _ = write!(
                out,
                r#"<circle cx="{cx:.1}" cy="{cy:.1}" r="{r:.1}" fill="{}"><title>{}</title></circle>"#,
                color(i),
                escape_html(&tip)
            );
            continue;
        }

        let sweep = share * std::f64::consts::TAU;
        let (x1, y1) = (cx + r * angle.cos(), cy + r * angle.sin());
        let end = angle + sweep;
        let (x2, y2) = (cx + r * end.cos(), cy + r * end.sin());
        let large = u8::from(sweep > std::f64::consts::PI);
        let _ = write!(
            out,
            r##"<path d="M {cx:.1} {cy:.1} L {x1:.2} {y1:.2} A {r:.1} {r:.1} 0 {large} 1 {x2:.2} {y2:.2} Z" fill="{}" stroke="#fff"><title>{}</title></path>"##,
            color(i),
            escape_html(&tip)
        );
        angle = end;
    }

    let labels: Vec<String> = slices
        .iter()
        .map(|s| {
            let pct = if total > 0.0 { s.value / total * 100.0 } else { 0.0 };
            format!("{} {pct:.1}%", s.label)
        })
        .collect();
    let names: Vec<(&str, &str)> = labels
        .iter()
        .enumerate()
        .map(|(i, l)| (l.as_str(), color(i)))
        .collect();
    legend(&mut out, &names);
    out.push_str("</svg>");
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn chart(kind: ChartKind) -> Chart {
        Chart {
            title: "T".to_string(),
            x_label: Some("X".to_string()),
            y_label: Some("Y".to_string()),
            kind,
        }
    }

    #[test]
    fn line_chart_draws_one_polyline_per_series() {
        let svg = render(&chart(ChartKind::Line {
            x: vec!["Jan".into(), "Feb".into(), "Mar".into()],
            series: vec![
                Series {
                    name: "A".into(),
                    values: vec![1.0, 2.0, 3.0],
                },
                Series {
                    name: "B".into(),
                    values: vec![3.0, 2.0, 1.0],
                },
            ],
        }));
        assert_eq!(svg.matches("<polyline").count(), 2);
        assert_eq!(svg.matches("<circle").count(), 6);
        assert!(svg.contains("<title>A Jan: 1.00</title>"));
    }

    #[test]
    fn bar_chart_uses_given_colors() {
        let svg = render(&chart(ChartKind::Bar {
            bars: vec![Bar {
                label: "Low".into(),
                value: 85.0,
                color: Some("#28a745".into()),
            }],
        }));
        assert!(svg.contains(r##"fill="#28a745""##));
        assert!(svg.contains("<title>Low: 85</title>"));
    }

    #[test]
    fn pie_chart_labels_shares() {
        let svg = render(&chart(ChartKind::Pie {
            slices: vec![
                Slice {
                    label: "A".into(),
                    value: 1.0,
                },
                Slice {
                    label: "B".into(),
                    value: 3.0,
                },
            ],
        }));
        assert_eq!(svg.matches("<path").count(), 2);
        assert_eq!(svg.matches(r##"stroke="#fff"><title>"##).count(), 2);
        assert!(svg.contains("<title>B: 3 (75.0%)</title>"));
        assert!(svg.contains("A 25.0%"));
        assert!(svg.contains("B 75.0%"));
    }

    #[test]
    fn single_slice_pie_is_a_circle() {
        let svg = pie(&[Slice {
            label: "All".into(),
            value: 5.0,
        }]);
        assert!(svg.contains("<circle"));
        assert!(!svg.contains("<path"));
    }

    #[test]
    fn empty_charts_do_not_panic() {
        render(&chart(ChartKind::Line {
            x: vec![],
            series: vec![],
        }));
        render(&chart(ChartKind::Bar { bars: vec![] }));
        render(&chart(ChartKind::Pie { slices: vec![] }));
    }

    #[test]
    fn short_label_trims_iso_dates() {
        assert_eq!(short_label("2023-01-31"), "01-31");
        assert_eq!(short_label("Jan"), "Jan");
    }

    #[test]
    fn titles_are_escaped() {
        let mut c = chart(ChartKind::Bar { bars: vec![] });
        c.title = "<b>".into();
        assert!(render(&c).contains("&lt;b&gt;"));
    }
}
