//! The six onboarding and relationship forms.

use super::field::{FieldDef, FieldKind, NumberSpec};
use super::{FormDef, Gate, Section};
use crate::navigation::Page;

// ---------------------------------------------------------------------------
// Shared option lists
// ---------------------------------------------------------------------------

const FUND_NAMES: &[&str] = &[
    "Alpha Growth Fund",
    "Beta Income Fund",
    "Gamma Tech Fund",
    "Delta Balanced Fund",
];

const RISK_SCALE: &[&str] = &["Conservative", "Moderate", "Aggressive"];

const COUNTRIES: &[&str] = &[
    "United States",
    "Canada",
    "United Kingdom",
    "Germany",
    "France",
    "Australia",
];

const INCOME_RANGES: &[&str] = &[
    "$0-$50,000",
    "$50,001-$100,000",
    "$100,001-$250,000",
    "$250,001-$500,000",
    "$500,001+",
];

const NET_WORTH_RANGES: &[&str] = &[
    "$0-$100,000",
    "$100,001-$500,000",
    "$500,001-$1,000,000",
    "$1,000,001-$5,000,000",
    "$5,000,001+",
];

const EXPERIENCE: &[&str] = &["Beginner", "Intermediate", "Advanced", "Professional"];

const PERIODIC: &[&str] = &["Monthly", "Quarterly", "Semi-annually", "Annually"];

const FUND_ROLES: &[&str] = &["Investor", "Fund Manager", "Board Member", "Advisor", "Employee"];

const fn text(key: &'static str, label: &'static str) -> FieldDef {
    FieldDef::new(key, label, FieldKind::Text)
}

const fn select(key: &'static str, label: &'static str, options: &'static [&'static str]) -> FieldDef {
    FieldDef::new(key, label, FieldKind::Select { options })
}

const fn multi(key: &'static str, label: &'static str, options: &'static [&'static str]) -> FieldDef {
    FieldDef::new(key, label, FieldKind::MultiSelect { options })
}

const fn number(key: &'static str, label: &'static str, spec: NumberSpec) -> FieldDef {
    FieldDef::new(key, label, FieldKind::Number(spec))
}

const fn date(key: &'static str, label: &'static str) -> FieldDef {
    FieldDef::new(key, label, FieldKind::Date)
}

const fn checkbox(key: &'static str, label: &'static str) -> FieldDef {
    FieldDef::new(key, label, FieldKind::Checkbox)
}

const fn risk_slider(key: &'static str, label: &'static str) -> FieldDef {
    FieldDef::new(
        key,
        label,
        FieldKind::Slider {
            options: RISK_SCALE,
            default: "Moderate",
        },
    )
}

// ---------------------------------------------------------------------------
// Fund Onboarding
// ---------------------------------------------------------------------------

const FUND_ONBOARDING: FormDef = FormDef {
    page: Page::FundOnboarding,
    heading: "📝 Fund Onboarding",
    sections: &[
        Section {
            title: "Fund Information",
            fields: &[
                text("fund_name", "Fund Name"),
                select(
                    "fund_type",
                    "Fund Type",
                    &["Growth Fund", "Income Fund", "Balanced Fund", "Tech Fund", "Real Estate Fund"],
                ),
                FieldDef::new("investment_strategy", "Investment Strategy", FieldKind::TextArea),
                number("target_aum", "Target AUM (Million $)", NumberSpec::int(1.0, 100.0)),
            ],
        },
        Section {
            title: "Legal Information",
            fields: &[
                text("legal_entity", "Legal Entity Name"),
                select(
                    "jurisdiction",
                    "Jurisdiction",
                    &["Cayman Islands", "Luxembourg", "Ireland", "Singapore", "United States"],
                ),
                date("launch_date", "Expected Launch Date"),
                number(
                    "management_fee",
                    "Management Fee (%)",
                    NumberSpec::ranged(0.0, 5.0, 1.5, 0.1),
                ),
            ],
        },
        Section {
            title: "Risk Profile",
            fields: &[
                risk_slider("risk_level", "Risk Level"),
                number(
                    "min_investment",
                    "Minimum Investment ($)",
                    NumberSpec::int(1000.0, 100_000.0),
                ),
                number("lock_period", "Lock Period (Months)", NumberSpec::int(0.0, 12.0)),
                select("redemption_frequency", "Redemption Frequency", PERIODIC),
                select(
                    "subscription_frequency",
                    "Subscription Frequency",
                    &["Daily", "Weekly", "Monthly", "Quarterly"],
                ),
            ],
        },
    ],
    submit_label: "Submit Fund Application",
    gate: Gate::Open,
    success: "Fund onboarding application submitted successfully!",
    next_steps: Some("Your application will be reviewed within 3-5 business days."),
};

// ---------------------------------------------------------------------------
// Client Onboarding
// ---------------------------------------------------------------------------

const CLIENT_ONBOARDING: FormDef = FormDef {
    page: Page::ClientOnboarding,
    heading: "👥 Client Onboarding",
    sections: &[
        Section {
            title: "Personal Information",
            fields: &[
                text("first_name", "First Name"),
                text("last_name", "Last Name"),
                text("email", "Email Address"),
                text("phone", "Phone Number"),
                date("date_of_birth", "Date of Birth"),
            ],
        },
        Section {
            title: "Address Information",
            fields: &[
                text("address_line1", "Address Line 1"),
                text("address_line2", "Address Line 2"),
                text("city", "City"),
                text("state", "State/Province"),
                text("postal_code", "Postal Code"),
                select("country", "Country", COUNTRIES),
            ],
        },
        Section {
            title: "Financial Information",
            fields: &[
                select("annual_income", "Annual Income Range", INCOME_RANGES),
                select("net_worth", "Net Worth Range", NET_WORTH_RANGES),
                select("investment_experience", "Investment Experience", EXPERIENCE),
                risk_slider("risk_tolerance", "Risk Tolerance"),
            ],
        },
        Section {
            title: "Investment Preferences",
            fields: &[
                multi(
                    "investment_goals",
                    "Investment Goals",
                    &[
                        "Capital Preservation",
                        "Income Generation",
                        "Capital Growth",
                        "Tax Efficiency",
                        "Diversification",
                    ],
                ),
                multi(
                    "preferred_funds",
                    "Preferred Fund Types",
                    &["Growth Funds", "Income Funds", "Balanced Funds", "Tech Funds", "Real Estate Funds"],
                ),
            ],
        },
    ],
    submit_label: "Submit Client Application",
    gate: Gate::Open,
    success: "Client onboarding application submitted successfully!",
    next_steps: Some("KYC verification will be initiated within 24 hours."),
};

// ---------------------------------------------------------------------------
// Person Onboarding
// ---------------------------------------------------------------------------

const PERSON_ONBOARDING: FormDef = FormDef {
    page: Page::PersonOnboarding,
    heading: "👤 Person Onboarding",
    sections: &[
        Section {
            title: "Personal Details",
            fields: &[
                text("first_name", "First Name"),
                text("last_name", "Last Name"),
                text("email", "Email Address"),
                text("phone", "Phone Number"),
                date("date_of_birth", "Date of Birth"),
                select(
                    "nationality",
                    "Nationality",
                    &["US Citizen", "Canadian", "UK Citizen", "German", "French", "Other"],
                ),
            ],
        },
        Section {
            title: "Professional Information",
            fields: &[
                text("job_title", "Job Title"),
                text("company", "Company"),
                select(
                    "industry",
                    "Industry",
                    &["Finance", "Technology", "Healthcare", "Real Estate", "Manufacturing", "Other"],
                ),
                number("years_experience", "Years of Experience", NumberSpec::int(0.0, 5.0)),
            ],
        },
        Section {
            title: "Address Information",
            fields: &[
                text("address_line1", "Address Line 1"),
                text("address_line2", "Address Line 2"),
                text("city", "City"),
                text("state", "State/Province"),
                text("postal_code", "Postal Code"),
                select("country", "Country", COUNTRIES),
            ],
        },
        Section {
            title: "Additional Information",
            fields: &[
                select(
                    "education_level",
                    "Education Level",
                    &[
                        "High School",
                        "Bachelor's Degree",
                        "Master's Degree",
                        "PhD",
                        "Professional Certification",
                    ],
                ),
                multi(
                    "certifications",
                    "Professional Certifications",
                    &["CFA", "CPA", "CAIA", "FRM", "PMP", "None"],
                ),
            ],
        },
    ],
    submit_label: "Submit Person Application",
    gate: Gate::Open,
    success: "Person onboarding application submitted successfully!",
    next_steps: Some("Background verification will be completed within 5-7 business days."),
};

// ---------------------------------------------------------------------------
// Investor Onboarding
// ---------------------------------------------------------------------------

/// Checkboxes that must all be ticked before an investor is accepted.
pub const INVESTOR_COMPLIANCE_CHECKS: &[&str] = &["kyc_completed", "aml_check", "suitability_assessment"];

const INVESTOR_ONBOARDING: FormDef = FormDef {
    page: Page::InvestorOnboarding,
    heading: "💼 Investor Onboarding",
    sections: &[
        Section {
            title: "Investor Information",
            fields: &[
                select(
                    "investor_type",
                    "Investor Type",
                    &["Individual", "Institutional", "Family Office", "Pension Fund", "Endowment"],
                ),
                text("first_name", "First Name"),
                text("last_name", "Last Name"),
                text("email", "Email Address"),
                text("phone", "Phone Number"),
            ],
        },
        Section {
            title: "Investment Details",
            fields: &[
                select("target_fund", "Target Fund", FUND_NAMES),
                number(
                    "investment_amount",
                    "Investment Amount ($)",
                    NumberSpec::int(10_000.0, 100_000.0).with_step(10_000.0),
                ),
                select(
                    "investment_source",
                    "Source of Funds",
                    &["Personal Savings", "Inheritance", "Business Proceeds", "Investment Returns", "Other"],
                ),
            ],
        },
        Section {
            title: "Financial Profile",
            fields: &[
                select("annual_income", "Annual Income Range", INCOME_RANGES),
                select("net_worth", "Net Worth Range", NET_WORTH_RANGES),
                select("investment_experience", "Investment Experience", EXPERIENCE),
                risk_slider("risk_tolerance", "Risk Tolerance"),
            ],
        },
        Section {
            title: "Documentation",
            fields: &[
                checkbox("kyc_completed", "KYC Documentation Completed"),
                checkbox("aml_check", "AML Check Completed"),
                checkbox("suitability_assessment", "Suitability Assessment Completed"),
            ],
        },
    ],
    submit_label: "Submit Investor Application",
    gate: Gate::AllChecked {
        fields: INVESTOR_COMPLIANCE_CHECKS,
        message: "Please complete all required documentation before submitting.",
    },
    success: "Investor onboarding application submitted successfully!",
    next_steps: Some("Your investment will be processed within 2-3 business days."),
};

// ---------------------------------------------------------------------------
// Fund/Company Relationship
// ---------------------------------------------------------------------------

const FUND_COMPANY_RELATIONSHIP: FormDef = FormDef {
    page: Page::FundCompanyRelationship,
    heading: "🔗 Fund / Company Relationship",
    sections: &[
        Section {
            title: "Fund Information",
            fields: &[
                select("fund_name", "Fund Name", FUND_NAMES),
                text("fund_manager", "Fund Manager"),
                text("fund_administrator", "Fund Administrator"),
            ],
        },
        Section {
            title: "Company Information",
            fields: &[
                text("company_name", "Company Name"),
                select(
                    "company_type",
                    "Company Type",
                    &["Investment Manager", "Administrator", "Custodian", "Auditor", "Legal Counsel"],
                ),
                select(
                    "relationship_type",
                    "Relationship Type",
                    &["Primary", "Secondary", "Advisory", "Service Provider"],
                ),
            ],
        },
        Section {
            title: "Relationship Details",
            fields: &[
                date("start_date", "Relationship Start Date"),
                number("contract_value", "Contract Value ($)", NumberSpec::int(0.0, 50_000.0)),
                date("renewal_date", "Contract Renewal Date"),
                select("status", "Status", &["Active", "Pending", "Terminated", "Under Review"]),
            ],
        },
        Section {
            title: "Services Provided",
            fields: &[multi(
                "services",
                "Services",
                &[
                    "Fund Administration",
                    "Custody Services",
                    "Audit Services",
                    "Legal Services",
                    "Compliance Monitoring",
                    "Risk Management",
                ],
            )],
        },
    ],
    submit_label: "Submit Relationship",
    gate: Gate::Open,
    success: "Fund/Company relationship recorded successfully!",
    next_steps: None,
};

// ---------------------------------------------------------------------------
// Individual/Fund Relationship
// ---------------------------------------------------------------------------

const INDIVIDUAL_FUND_RELATIONSHIP: FormDef = FormDef {
    page: Page::IndividualFundRelationship,
    heading: "👤 Individual / Fund Relationship",
    sections: &[
        Section {
            title: "Individual Information",
            fields: &[
                text("individual_name", "Individual Name"),
                select("individual_type", "Individual Type", FUND_ROLES),
                text("email", "Email Address"),
                text("phone", "Phone Number"),
            ],
        },
        Section {
            title: "Fund Information",
            fields: &[
                select("fund_name", "Fund Name", FUND_NAMES),
                select("role_in_fund", "Role in Fund", FUND_ROLES),
                date("start_date", "Start Date"),
            ],
        },
        Section {
            title: "Relationship Details",
            fields: &[
                number("investment_amount", "Investment Amount ($)", NumberSpec::int(0.0, 100_000.0)),
                number(
                    "ownership_percentage",
                    "Ownership Percentage (%)",
                    NumberSpec::ranged(0.0, 100.0, 5.0, 0.1),
                ),
                checkbox("voting_rights", "Voting Rights"),
                checkbox("board_seat", "Board Seat"),
            ],
        },
        Section {
            title: "Additional Information",
            fields: &[
                select(
                    "compensation_type",
                    "Compensation Type",
                    &["Salary", "Performance Fee", "Management Fee", "Carried Interest", "None"],
                ),
                select("reporting_frequency", "Reporting Frequency", PERIODIC),
            ],
        },
    ],
    submit_label: "Submit Relationship",
    gate: Gate::Open,
    success: "Individual/Fund relationship recorded successfully!",
    next_steps: None,
};

/// Every form, in sidebar order.
pub const FORMS: [FormDef; 6] = [
    FUND_ONBOARDING,
    CLIENT_ONBOARDING,
    PERSON_ONBOARDING,
    INVESTOR_ONBOARDING,
    FUND_COMPANY_RELATIONSHIP,
    INDIVIDUAL_FUND_RELATIONSHIP,
];

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn field_keys_are_unique_per_form() {
        for form in &FORMS {
            let mut seen = HashSet::new();
            for field in form.fields() {
                assert!(seen.insert(field.key), "{}: duplicate {}", form.page, field.key);
            }
        }
    }

    #[test]
    fn compliance_checks_are_checkboxes() {
        for key in INVESTOR_COMPLIANCE_CHECKS {
            let field = INVESTOR_ONBOARDING.field(key).unwrap();
            assert_eq!(field.kind, FieldKind::Checkbox);
        }
    }

    #[test]
    fn number_defaults_lie_within_bounds() {
        for form in &FORMS {
            for field in form.fields() {
                if let FieldKind::Number(spec) = field.kind {
                    assert_eq!(spec.clamp(spec.default), spec.default, "{}", field.key);
                }
            }
        }
    }

    #[test]
    fn slider_defaults_are_options() {
        for form in &FORMS {
            for field in form.fields() {
                if let FieldKind::Slider { options, default } = field.kind {
                    assert!(options.contains(&default));
                }
            }
        }
    }
}
