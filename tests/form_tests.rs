/// Form submission tests.
///
/// Investor Onboarding is the only form that can refuse a submission, and
/// only on its three compliance checkboxes. Every other form acknowledges
/// any submission, including an untouched one.
use chrono::NaiveDate;

use fundadmin::forms::catalog::INVESTOR_COMPLIANCE_CHECKS;
use fundadmin::forms::{self, FieldValue, Outcome};
use fundadmin::navigation::Page;

const REJECTION: &str = "Please complete all required documentation before submitting.";

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
}

fn investor() -> &'static forms::FormDef {
    forms::for_page(Page::InvestorOnboarding).unwrap()
}

// ---------------------------------------------------------------------------
// Investor Onboarding gate
// ---------------------------------------------------------------------------

#[test]
fn every_incomplete_checkbox_subset_is_rejected() {
    let def = investor();
    // Bitmask over the three checkboxes; 0b111 (all ticked) is excluded.
    for mask in 0u8..0b111 {
        let pairs: Vec<(&str, &str)> = INVESTOR_COMPLIANCE_CHECKS
            .iter()
            .enumerate()
            .filter(|(i, _)| mask & (1 << *i) != 0)
            .map(|(_, key)| (*key, "on"))
            .collect();
        let values = def.normalize(&pairs, today());
        assert_eq!(
            def.submit(&values),
            Outcome::Rejected { message: REJECTION },
            "mask {mask:03b}"
        );
    }
}

#[test]
fn all_checkboxes_accept_regardless_of_other_fields() {
    let def = investor();
    let checks: Vec<(&str, &str)> = INVESTOR_COMPLIANCE_CHECKS
        .iter()
        .map(|key| (*key, "on"))
        .collect();

    let variants: Vec<Vec<(&str, &str)>> = vec![
        vec![],
        vec![("first_name", ""), ("investment_amount", "-5")],
        vec![
            ("first_name", "Ada"),
            ("investment_amount", "99999999"),
            ("risk_tolerance", "Aggressive"),
            ("annual_income", "not an option"),
        ],
    ];

    for extra in variants {
        let mut pairs = checks.clone();
        pairs.extend(extra);
        let outcome = def.submit(&def.normalize(&pairs, today()));
        assert_eq!(
            outcome,
            Outcome::Accepted {
                message: "Investor onboarding application submitted successfully!",
                next_steps: Some("Your investment will be processed within 2-3 business days."),
            }
        );
    }
}

#[test]
fn false_checkbox_values_do_not_count() {
    let def = investor();
    let values = def.normalize(
        &[
            ("kyc_completed", "on"),
            ("aml_check", "off"),
            ("suitability_assessment", "false"),
        ],
        today(),
    );
    assert!(!def.submit(&values).is_accepted());
}

// ---------------------------------------------------------------------------
// Open forms
// ---------------------------------------------------------------------------

#[test]
fn other_forms_accept_defaults() {
    let expected = [
        (Page::FundOnboarding, "Fund onboarding application submitted successfully!"),
        (Page::ClientOnboarding, "Client onboarding application submitted successfully!"),
        (Page::PersonOnboarding, "Person onboarding application submitted successfully!"),
        (Page::FundCompanyRelationship, "Fund/Company relationship recorded successfully!"),
        (
            Page::IndividualFundRelationship,
            "Individual/Fund relationship recorded successfully!",
        ),
    ];
    for (page, message) in expected {
        let def = forms::for_page(page).unwrap();
        match def.submit(&def.defaults(today())) {
            Outcome::Accepted { message: m, .. } => assert_eq!(m, message),
            other => panic!("{page} rejected defaults: {other:?}"),
        }
    }
}

#[test]
fn relationship_forms_have_no_next_steps() {
    for page in [Page::FundCompanyRelationship, Page::IndividualFundRelationship] {
        let def = forms::for_page(page).unwrap();
        assert!(matches!(
            def.submit(&def.defaults(today())),
            Outcome::Accepted { next_steps: None, .. }
        ));
    }
}

// ---------------------------------------------------------------------------
// Widget normalization
// ---------------------------------------------------------------------------

#[test]
fn numbers_clamp_to_widget_bounds() {
    let def = forms::for_page(Page::FundOnboarding).unwrap();
    let values = def.normalize(
        &[
            ("target_aum", "0"),
            ("management_fee", "12.5"),
            ("min_investment", "10"),
            ("lock_period", "-3"),
        ],
        today(),
    );
    assert_eq!(values["target_aum"], FieldValue::Number(1.0));
    assert_eq!(values["management_fee"], FieldValue::Number(5.0));
    assert_eq!(values["min_investment"], FieldValue::Number(1000.0));
    assert_eq!(values["lock_period"], FieldValue::Number(0.0));
}

#[test]
fn defaults_match_widget_declarations() {
    let def = forms::for_page(Page::FundOnboarding).unwrap();
    let values = def.defaults(today());
    assert_eq!(values["target_aum"], FieldValue::Number(100.0));
    assert_eq!(values["management_fee"], FieldValue::Number(1.5));
    assert_eq!(values["risk_level"], FieldValue::Text("Moderate".into()));
    assert_eq!(values["launch_date"], FieldValue::Date(today()));
}

#[test]
fn absent_fields_take_empty_values() {
    let def = investor();
    let values = def.normalize::<&str, &str>(&[], today());
    for key in INVESTOR_COMPLIANCE_CHECKS {
        assert_eq!(values[*key], FieldValue::Flag(false));
    }
    assert_eq!(values.len(), def.fields().count());
}
