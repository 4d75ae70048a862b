//! Literal AML/KYC overview figures. Identical on every render.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum KycStatus {
    Approved,
    Pending,
    Rejected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Bar colour used by the risk distribution chart.
    pub fn color(self) -> &'static str {
        match self {
            Self::Low => "#28a745",
            Self::Medium => "#ffc107",
            Self::High => "#dc3545",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DocumentState {
    Complete,
    Pending,
    Incomplete,
}

macro_rules! display_as_debug {
    ($($ty:ty),*) => {
        $(impl std::fmt::Display for $ty {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{self:?}")
            }
        })*
    };
}

display_as_debug!(KycStatus, RiskLevel, DocumentState);

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KycApplication {
    pub applicant: &'static str,
    pub date: &'static str,
    pub status: KycStatus,
    pub risk: RiskLevel,
    pub documents: DocumentState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimelinePoint {
    pub month: &'static str,
    pub applications: u32,
    pub approvals: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComplianceOverview {
    pub total_applications: u32,
    pub approved: u32,
    pub pending_review: u32,
    pub rejected: u32,
    pub applications: Vec<KycApplication>,
    pub risk_distribution: Vec<(RiskLevel, u32)>,
    pub timeline: Vec<TimelinePoint>,
}

const APPLICATIONS: [KycApplication; 5] = [
    KycApplication {
        applicant: "John Smith",
        date: "2023-12-10",
        status: KycStatus::Approved,
        risk: RiskLevel::Low,
        documents: DocumentState::Complete,
    },
    KycApplication {
        applicant: "Sarah Johnson",
        date: "2023-12-11",
        status: KycStatus::Pending,
        risk: RiskLevel::Medium,
        documents: DocumentState::Pending,
    },
    KycApplication {
        applicant: "Michael Brown",
        date: "2023-12-12",
        status: KycStatus::Approved,
        risk: RiskLevel::Low,
        documents: DocumentState::Complete,
    },
    KycApplication {
        applicant: "Emily Davis",
        date: "2023-12-13",
        status: KycStatus::Rejected,
        risk: RiskLevel::High,
        documents: DocumentState::Incomplete,
    },
    KycApplication {
        applicant: "David Wilson",
        date: "2023-12-14",
        status: KycStatus::Pending,
        risk: RiskLevel::Medium,
        documents: DocumentState::Pending,
    },
];

const RISK_DISTRIBUTION: [(RiskLevel, u32); 3] = [
    (RiskLevel::Low, 85),
    (RiskLevel::Medium, 45),
    (RiskLevel::High, 26),
];

const TIMELINE: [TimelinePoint; 6] = [
    TimelinePoint { month: "Jan", applications: 12, approvals: 10 },
    TimelinePoint { month: "Feb", applications: 18, approvals: 16 },
    TimelinePoint { month: "Mar", applications: 15, approvals: 14 },
    TimelinePoint { month: "Apr", applications: 22, approvals: 20 },
    TimelinePoint { month: "May", applications: 19, approvals: 18 },
    TimelinePoint { month: "Jun", applications: 25, approvals: 23 },
];

pub fn overview() -> ComplianceOverview {
    ComplianceOverview {
        total_applications: 156,
        approved: 142,
        pending_review: 8,
        rejected: 6,
        applications: APPLICATIONS.to_vec(),
        risk_distribution: RISK_DISTRIBUTION.to_vec(),
        timeline: TIMELINE.to_vec(),
    }
}
