//! Block builders for each kind of page.

use rand::Rng;

use super::{
    Bar, Block, Chart, ChartKind, FormState, FormView, MetricCard, Notice, NoticeLevel, Series,
    Slice, Table, format_thousands,
};
use crate::forms::{FormDef, Outcome};
use crate::sample::{self, compliance};

fn header(title: &str) -> Block {
    Block::Header {
        title: title.to_string(),
    }
}

fn subheader(title: &str) -> Block {
    Block::Subheader {
        title: title.to_string(),
    }
}

fn card(label: &str, value: String) -> MetricCard {
    MetricCard {
        label: label.to_string(),
        value,
    }
}

fn table(title: &str, columns: &[&str], rows: Vec<Vec<String>>) -> Block {
    Block::Table(Table {
        title: title.to_string(),
        columns: columns.iter().map(|c| c.to_string()).collect(),
        rows,
    })
}

// ---------------------------------------------------------------------------
// Dashboard
// ---------------------------------------------------------------------------

/// Overview page. Sample data is regenerated on every call.
pub(super) fn dashboard<R: Rng + ?Sized>(rng: &mut R) -> Vec<Block> {
    let data = sample::generate(rng);
    let metrics = data.metrics();

    let performance = Chart {
        title: "Fund Performance".to_string(),
        x_label: Some("Date".to_string()),
        y_label: Some("Performance Index".to_string()),
        kind: ChartKind::Line {
            x: data.performance.dates.iter().map(|d| d.to_string()).collect(),
            series: data
                .performance
                .series
                .iter()
                .map(|s| Series {
                    name: s.spec.fund.to_string(),
                    values: s.points.clone(),
                })
                .collect(),
        },
    };

    let aum = Chart {
        title: "Assets Under Management by Fund".to_string(),
        x_label: None,
        y_label: None,
        kind: ChartKind::Pie {
            slices: data
                .funds
                .iter()
                .map(|f| Slice {
                    label: f.name.to_string(),
                    value: f64::from(f.aum_millions),
                })
                .collect(),
        },
    };

    let fund_rows = data
        .funds
        .iter()
        .map(|f| {
            vec![
                f.name.to_string(),
                f.aum_millions.to_string(),
                f.investors.to_string(),
                f.status.to_string(),
                f.launch_date.to_string(),
            ]
        })
        .collect();

    let investor_rows = data
        .investors
        .iter()
        .map(|i| {
            vec![
                i.name.to_string(),
                format_thousands(i.amount),
                i.fund.to_string(),
                i.status.to_string(),
            ]
        })
        .collect();

    let activity_rows = data
        .activities
        .iter()
        .map(|a| {
            vec![
                a.date.to_string(),
                a.description.to_string(),
                a.status.to_string(),
            ]
        })
        .collect();

    vec![
        header("📊 Dashboard Overview"),
        Block::Metrics {
            cards: vec![
                card(
                    "💰 Total AUM",
                    format!("${}M", format_thousands(u64::from(metrics.total_aum_millions))),
                ),
                card("👥 Total Investors", metrics.total_investors.to_string()),
                card("📈 Active Funds", metrics.active_funds.to_string()),
                card("⏳ Pending Approvals", metrics.pending_approvals.to_string()),
            ],
        },
        subheader("📈 Fund Performance"),
        Block::Chart(performance),
        subheader("💰 AUM Distribution"),
        Block::Chart(aum),
        subheader("📋 Fund Overview"),
        table(
            "Funds",
            &["Fund Name", "AUM (Million $)", "Investors", "Status", "Launch Date"],
            fund_rows,
        ),
        subheader("💼 Investors"),
        table(
            "Investors",
            &["Investor Name", "Investment Amount ($)", "Fund", "Status"],
            investor_rows,
        ),
        subheader("🔄 Recent Activities"),
        table("Recent Activities", &["Date", "Activity", "Status"], activity_rows),
    ]
}

// ---------------------------------------------------------------------------
// AML / KYC
// ---------------------------------------------------------------------------

pub(super) fn aml_kyc() -> Vec<Block> {
    let overview = compliance::overview();

    let kyc_rows = overview
        .applications
        .iter()
        .map(|a| {
            vec![
                a.applicant.to_string(),
                a.date.to_string(),
                a.status.to_string(),
                a.risk.to_string(),
                a.documents.to_string(),
            ]
        })
        .collect();

    let risk = Chart {
        title: "Risk Level Distribution".to_string(),
        x_label: Some("Risk Level".to_string()),
        y_label: Some("Count".to_string()),
        kind: ChartKind::Bar {
            bars: overview
                .risk_distribution
                .iter()
                .map(|(level, count)| Bar {
                    label: level.to_string(),
                    value: f64::from(*count),
                    color: Some(level.color().to_string()),
                })
                .collect(),
        },
    };

    let timeline = Chart {
        title: "Monthly KYC Applications vs Approvals".to_string(),
        x_label: None,
        y_label: None,
        kind: ChartKind::Line {
            x: overview.timeline.iter().map(|p| p.month.to_string()).collect(),
            series: vec![
                Series {
                    name: "Applications".to_string(),
                    values: overview
                        .timeline
                        .iter()
                        .map(|p| f64::from(p.applications))
                        .collect(),
                },
                Series {
                    name: "Approvals".to_string(),
                    values: overview
                        .timeline
                        .iter()
                        .map(|p| f64::from(p.approvals))
                        .collect(),
                },
            ],
        },
    };

    vec![
        header("🔒 AML / KYC Compliance"),
        Block::Metrics {
            cards: vec![
                card("📋 Total Applications", overview.total_applications.to_string()),
                card("✅ Approved", overview.approved.to_string()),
                card("⏳ Pending Review", overview.pending_review.to_string()),
                card("❌ Rejected", overview.rejected.to_string()),
            ],
        },
        subheader("📋 KYC Applications"),
        table(
            "KYC Applications",
            &["Applicant Name", "Application Date", "Status", "Risk Level", "Documents"],
            kyc_rows,
        ),
        subheader("🎯 Risk Assessment"),
        Block::Chart(risk),
        Block::Chart(timeline),
    ]
}

// ---------------------------------------------------------------------------
// Forms
// ---------------------------------------------------------------------------

pub(super) fn form(def: &'static FormDef, state: FormState) -> Vec<Block> {
    let notices = match &state.outcome {
        Some(Outcome::Accepted {
            message,
            next_steps,
        }) => {
            let mut notices = vec![Notice {
                level: NoticeLevel::Success,
                text: format!("✅ {message}"),
            }];
            if let Some(next) = next_steps {
                notices.push(Notice {
                    level: NoticeLevel::Info,
                    text: next.to_string(),
                });
            }
            notices
        }
        Some(Outcome::Rejected { message }) => vec![Notice {
            level: NoticeLevel::Error,
            text: format!("❌ {message}"),
        }],
        None => Vec::new(),
    };

    let mut blocks = vec![
        header(def.heading),
        Block::Form(FormView {
            form: def,
            values: state.values,
            outcome: state.outcome,
        }),
    ];
    blocks.extend(notices.into_iter().map(Block::Notice));
    blocks
}
