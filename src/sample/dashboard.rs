//! Dashboard overview data: funds, performance, investors, recent activity.

use chrono::NaiveDate;
use rand::Rng;
use serde::Serialize;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Lifecycle state shared by funds and investors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Status {
    Active,
    Pending,
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => f.pad("Active"),
            Self::Pending => f.pad("Pending"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Fund {
    pub name: &'static str,
    /// Assets under management, millions of dollars.
    pub aum_millions: u32,
    pub investors: u32,
    pub status: Status,
    pub launch_date: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Investor {
    pub name: &'static str,
    /// Investment amount in dollars.
    pub amount: u64,
    pub fund: &'static str,
    pub status: Status,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ActivityStatus {
    Completed,
    Pending,
    #[serde(rename = "In Progress")]
    InProgress,
}

impl std::fmt::Display for ActivityStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Completed => f.pad("Completed"),
            Self::Pending => f.pad("Pending"),
            Self::InProgress => f.pad("In Progress"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Activity {
    pub date: &'static str,
    pub description: &'static str,
    pub status: ActivityStatus,
}

/// Trend parameters of one fund's performance index.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesSpec {
    pub fund: &'static str,
    /// Index points gained per month.
    pub slope: f64,
    /// Half-width of the uniform noise added to every point after the first.
    pub jitter: f64,
}

impl SeriesSpec {
    /// Noise-free value at month `k`. Month 0 is pinned at the base; month
    /// `k >= 1` sits `(k - 1) * slope` above it.
    pub fn trend(&self, k: usize) -> f64 {
        if k == 0 {
            BASE_INDEX
        } else {
            BASE_INDEX + (k - 1) as f64 * self.slope
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceSeries {
    #[serde(flatten)]
    pub spec: SeriesSpec,
    pub points: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceTable {
    pub dates: Vec<NaiveDate>,
    pub series: Vec<PerformanceSeries>,
}

/// Headline figures derived from the fund table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DashboardMetrics {
    pub total_aum_millions: u32,
    pub total_investors: u32,
    pub active_funds: usize,
    pub pending_approvals: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardData {
    pub funds: Vec<Fund>,
    pub performance: PerformanceTable,
    pub investors: Vec<Investor>,
    pub activities: Vec<Activity>,
}

impl DashboardData {
    pub fn metrics(&self) -> DashboardMetrics {
        DashboardMetrics {
            total_aum_millions: self.funds.iter().map(|f| f.aum_millions).sum(),
            total_investors: self.funds.iter().map(|f| f.investors).sum(),
            active_funds: self
                .funds
                .iter()
                .filter(|f| f.status == Status::Active)
                .count(),
            pending_approvals: self
                .funds
                .iter()
                .filter(|f| f.status == Status::Pending)
                .count(),
        }
    }
}

// ---------------------------------------------------------------------------
// Literals
// ---------------------------------------------------------------------------

const BASE_INDEX: f64 = 100.0;

/// Year covered by the performance chart.
const PERFORMANCE_YEAR: i32 = 2023;

const FUNDS: [Fund; 4] = [
    Fund {
        name: "Alpha Growth Fund",
        aum_millions: 1250,
        investors: 45,
        status: Status::Active,
        launch_date: "2020-01-15",
    },
    Fund {
        name: "Beta Income Fund",
        aum_millions: 890,
        investors: 32,
        status: Status::Active,
        launch_date: "2019-06-20",
    },
    Fund {
        name: "Gamma Tech Fund",
        aum_millions: 2100,
        investors: 78,
        status: Status::Active,
        launch_date: "2021-03-10",
    },
    Fund {
        name: "Delta Balanced Fund",
        aum_millions: 750,
        investors: 28,
        status: Status::Pending,
        launch_date: "2023-11-01",
    },
];

pub const SERIES: [SeriesSpec; 4] = [
    SeriesSpec {
        fund: "Alpha Growth",
        slope: 2.0,
        jitter: 5.0,
    },
    SeriesSpec {
        fund: "Beta Income",
        slope: 1.5,
        jitter: 3.0,
    },
    SeriesSpec {
        fund: "Gamma Tech",
        slope: 3.0,
        jitter: 8.0,
    },
    SeriesSpec {
        fund: "Delta Balanced",
        slope: 1.8,
        jitter: 4.0,
    },
];

const INVESTORS: [Investor; 5] = [
    Investor {
        name: "John Smith",
        amount: 500_000,
        fund: "Alpha Growth Fund",
        status: Status::Active,
    },
    Investor {
        name: "Sarah Johnson",
        amount: 750_000,
        fund: "Beta Income Fund",
        status: Status::Active,
    },
    Investor {
        name: "Michael Brown",
        amount: 300_000,
        fund: "Gamma Tech Fund",
        status: Status::Pending,
    },
    Investor {
        name: "Emily Davis",
        amount: 1_200_000,
        fund: "Alpha Growth Fund",
        status: Status::Active,
    },
    Investor {
        name: "David Wilson",
        amount: 450_000,
        fund: "Delta Balanced Fund",
        status: Status::Active,
    },
];

const ACTIVITIES: [Activity; 5] = [
    Activity {
        date: "2023-12-15",
        description: "New investor onboarded to Alpha Growth Fund",
        status: ActivityStatus::Completed,
    },
    Activity {
        date: "2023-12-14",
        description: "KYC verification completed for Sarah Johnson",
        status: ActivityStatus::Completed,
    },
    Activity {
        date: "2023-12-13",
        description: "Delta Balanced Fund approval pending",
        status: ActivityStatus::Pending,
    },
    Activity {
        date: "2023-12-12",
        description: "Quarterly report generated for Beta Income Fund",
        status: ActivityStatus::Completed,
    },
    Activity {
        date: "2023-12-11",
        description: "AML check initiated for new client",
        status: ActivityStatus::InProgress,
    },
];

// ---------------------------------------------------------------------------
// Generation
// ---------------------------------------------------------------------------

/// Build the Dashboard tables. Only the performance series consume `rng`.
pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> DashboardData {
    let dates = month_ends(PERFORMANCE_YEAR);
    let series = SERIES
        .iter()
        .map(|spec| PerformanceSeries {
            spec: *spec,
            points: random_walk(spec, dates.len(), rng),
        })
        .collect();

    DashboardData {
        funds: FUNDS.to_vec(),
        performance: PerformanceTable { dates, series },
        investors: INVESTORS.to_vec(),
        activities: ACTIVITIES.to_vec(),
    }
}

fn random_walk<R: Rng + ?Sized>(spec: &SeriesSpec, len: usize, rng: &mut R) -> Vec<f64> {
    (0..len)
        .map(|k| {
            if k == 0 {
                spec.trend(0)
            } else {
                spec.trend(k) + rng.gen_range(-spec.jitter..=spec.jitter)
            }
        })
        .collect()
}

/// Last calendar day of every month of `year`.
fn month_ends(year: i32) -> Vec<NaiveDate> {
    (1..=12u32)
        .filter_map(|month| {
            let (y, m) = if month == 12 {
                (year + 1, 1)
            } else {
                (year, month + 1)
            };
            NaiveDate::from_ymd_opt(y, m, 1)?.pred_opt()
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
