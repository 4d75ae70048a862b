//! Page identifiers, sidebar layout and per-session navigation state.
//!
//! The set of pages is closed: every sidebar control maps to exactly one
//! [`Page`], and activating it replaces the current page unconditionally.
//! There is no history and no URL-to-page mapping.

pub mod session;

use serde::{Deserialize, Serialize};

pub use session::{Session, SessionStore};

// ---------------------------------------------------------------------------
// Page identifiers
// ---------------------------------------------------------------------------

/// One of the dashboard's pages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Page {
    #[default]
    Dashboard,
    FundOnboarding,
    ClientOnboarding,
    PersonOnboarding,
    InvestorOnboarding,
    AmlKyc,
    FundCompanyRelationship,
    IndividualFundRelationship,
}

impl Page {
    /// Every page, in sidebar order.
    pub const ALL: [Page; 8] = [
        Page::Dashboard,
        Page::FundOnboarding,
        Page::ClientOnboarding,
        Page::PersonOnboarding,
        Page::InvestorOnboarding,
        Page::AmlKyc,
        Page::FundCompanyRelationship,
        Page::IndividualFundRelationship,
    ];

    /// Display identifier, as shown to users and accepted by [`Page::from_title`].
    pub fn title(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::FundOnboarding => "Fund Onboarding",
            Self::ClientOnboarding => "Client Onboarding",
            Self::PersonOnboarding => "Person Onboarding",
            Self::InvestorOnboarding => "Investor Onboarding",
            Self::AmlKyc => "AML / KYC",
            Self::FundCompanyRelationship => "Fund/Company Relationship",
            Self::IndividualFundRelationship => "Individual/Fund Relationship",
        }
    }

    /// URL-safe identifier used by navigation and submission routes.
    pub fn slug(self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::FundOnboarding => "fund-onboarding",
            Self::ClientOnboarding => "client-onboarding",
            Self::PersonOnboarding => "person-onboarding",
            Self::InvestorOnboarding => "investor-onboarding",
            Self::AmlKyc => "aml-kyc",
            Self::FundCompanyRelationship => "fund-company-relationship",
            Self::IndividualFundRelationship => "individual-fund-relationship",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Page> {
        Self::ALL.into_iter().find(|p| p.slug() == slug)
    }

    /// Match a display identifier exactly (e.g. `"AML / KYC"`).
    pub fn from_title(title: &str) -> Option<Page> {
        Self::ALL.into_iter().find(|p| p.title() == title)
    }

    /// Accept either a slug or a display identifier.
    pub fn parse(identifier: &str) -> Option<Page> {
        let trimmed = identifier.trim();
        Self::from_slug(trimmed).or_else(|| Self::from_title(trimmed))
    }
}

impl std::fmt::Display for Page {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.title())
    }
}

// ---------------------------------------------------------------------------
// Navigation state
// ---------------------------------------------------------------------------

/// The single value deciding which page is rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationState {
    current: Page,
}

impl NavigationState {
    pub fn current(&self) -> Page {
        self.current
    }

    /// Switch to `page`. No guard against unsaved form input.
    pub fn navigate(&mut self, page: Page) {
        self.current = page;
    }
}

// ---------------------------------------------------------------------------
// Sidebar
// ---------------------------------------------------------------------------

/// A sidebar control bound to one page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavButton {
    pub page: Page,
    pub label: &'static str,
    pub key: &'static str,
    pub help: &'static str,
}

/// A titled group of sidebar controls.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct NavGroup {
    pub title: &'static str,
    pub buttons: &'static [NavButton],
}

const SIDEBAR: [NavGroup; 4] = [
    NavGroup {
        title: "📊 Dashboard",
        buttons: &[NavButton {
            page: Page::Dashboard,
            label: "🏠 Dashboard Overview",
            key: "dashboard_btn",
            help: "View main dashboard",
        }],
    },
    NavGroup {
        title: "📝 Onboarding",
        buttons: &[
            NavButton {
                page: Page::FundOnboarding,
                label: "🏦 Fund Onboarding",
                key: "fund_btn",
                help: "Fund Onboarding",
            },
            NavButton {
                page: Page::ClientOnboarding,
                label: "👥 Client Onboarding",
                key: "client_btn",
                help: "Client Onboarding",
            },
            NavButton {
                page: Page::PersonOnboarding,
                label: "👤 Person Onboarding",
                key: "person_btn",
                help: "Person Onboarding",
            },
            NavButton {
                page: Page::InvestorOnboarding,
                label: "💼 Investor Onboarding",
                key: "investor_btn",
                help: "Investor Onboarding",
            },
        ],
    },
    NavGroup {
        title: "🔒 Compliance & KYC",
        buttons: &[NavButton {
            page: Page::AmlKyc,
            label: "🛡️ AML / KYC",
            key: "aml_btn",
            help: "AML / KYC Compliance",
        }],
    },
    NavGroup {
        title: "🔗 Relationships",
        buttons: &[
            NavButton {
                page: Page::FundCompanyRelationship,
                label: "🏢 Fund/Company",
                key: "fund_company_btn",
                help: "Fund/Company Relationship",
            },
            NavButton {
                page: Page::IndividualFundRelationship,
                label: "🤝 Individual/Fund",
                key: "indiv_fund_btn",
                help: "Individual/Fund Relationship",
            },
        ],
    },
];

/// The sidebar, grouped as displayed.
pub fn sidebar() -> &'static [NavGroup] {
    &SIDEBAR
}

/// Find the sidebar control with the given widget key.
pub fn button_by_key(key: &str) -> Option<&'static NavButton> {
    SIDEBAR
        .iter()
        .flat_map(|g| g.buttons.iter())
        .find(|b| b.key == key)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
