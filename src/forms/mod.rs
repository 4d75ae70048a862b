//! Data-driven form definitions and the submission contract.
//!
//! All six data-entry pages are instances of [`FormDef`]: labelled fields
//! grouped into sections, one submit action, an optional gate and two
//! literal messages. Submitting never stores or forwards anything; the
//! outcome depends only on the gate.

pub mod catalog;
pub mod field;

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::navigation::Page;

pub use field::{FieldDef, FieldKind, FieldValue, NumberSpec};

/// Normalized values of one submission, keyed by field key.
pub type FormValues = BTreeMap<&'static str, FieldValue>;

// ---------------------------------------------------------------------------
// Definitions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Section {
    pub title: &'static str,
    pub fields: &'static [FieldDef],
}

/// Precondition evaluated on submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Gate {
    /// Always accepts.
    Open,
    /// Every listed checkbox must be ticked; otherwise `message` is shown.
    AllChecked {
        fields: &'static [&'static str],
        message: &'static str,
    },
}

impl Gate {
    pub fn passes(&self, values: &FormValues) -> bool {
        match self {
            Self::Open => true,
            Self::AllChecked { fields, .. } => fields
                .iter()
                .all(|key| values.get(key).is_some_and(FieldValue::is_checked)),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct FormDef {
    pub page: Page,
    pub heading: &'static str,
    pub sections: &'static [Section],
    pub submit_label: &'static str,
    pub gate: Gate,
    pub success: &'static str,
    /// "What happens next" note shown under the success message.
    pub next_steps: Option<&'static str>,
}

/// Result of pressing a form's submit button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    Accepted {
        message: &'static str,
        next_steps: Option<&'static str>,
    },
    Rejected {
        message: &'static str,
    },
}

impl Outcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }

    /// Short label for logs: `"accepted"` or `"rejected"`.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Accepted { .. } => "accepted",
            Self::Rejected { .. } => "rejected",
        }
    }
}

impl FormDef {
    pub fn fields(&self) -> impl Iterator<Item = &'static FieldDef> + '_ {
        self.sections.iter().flat_map(|s| s.fields.iter())
    }

    pub fn field(&self, key: &str) -> Option<&'static FieldDef> {
        self.fields().find(|f| f.key == key)
    }

    /// Every field at its widget default.
    pub fn defaults(&self, today: NaiveDate) -> FormValues {
        self.fields()
            .map(|f| (f.key, f.default_value(today)))
            .collect()
    }

    /// Normalize raw `(key, value)` pairs into widget values.
    ///
    /// Keys that are not fields of this form are ignored; fields absent
    /// from `raw` take their widget's "empty" value (unticked checkbox,
    /// default choice, default number).
    pub fn normalize<K, V>(&self, raw: &[(K, V)], today: NaiveDate) -> FormValues
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        self.fields()
            .map(|f| {
                let submitted: Vec<&str> = raw
                    .iter()
                    .filter(|(k, _)| k.as_ref() == f.key)
                    .map(|(_, v)| v.as_ref())
                    .collect();
                (f.key, f.normalize(&submitted, today))
            })
            .collect()
    }

    /// Evaluate the gate and pick the literal outcome.
    pub fn submit(&self, values: &FormValues) -> Outcome {
        if self.gate.passes(values) {
            return Outcome::Accepted {
                message: self.success,
                next_steps: self.next_steps,
            };
        }
        match self.gate {
            Gate::AllChecked { message, .. } => Outcome::Rejected { message },
            Gate::Open => Outcome::Accepted {
                message: self.success,
                next_steps: self.next_steps,
            },
        }
    }
}

/// The form shown on `page`, if that page is a form page.
pub fn for_page(page: Page) -> Option<&'static FormDef> {
    catalog::FORMS.iter().find(|f| f.page == page)
}

pub fn all() -> &'static [FormDef] {
    &catalog::FORMS
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    #[test]
    fn open_gate_accepts_defaults() {
        let form = for_page(Page::FundOnboarding).unwrap();
        let outcome = form.submit(&form.defaults(today()));
        assert_eq!(
            outcome,
            Outcome::Accepted {
                message: "Fund onboarding application submitted successfully!",
                next_steps: Some("Your application will be reviewed within 3-5 business days."),
            }
        );
    }

    #[test]
    fn normalize_ignores_foreign_keys() {
        let form = for_page(Page::FundOnboarding).unwrap();
        let values = form.normalize(&[("not_a_field", "x"), ("fund_name", "Omega")], today());
        assert!(!values.contains_key("not_a_field"));
        assert_eq!(values["fund_name"], FieldValue::Text("Omega".into()));
        assert_eq!(values.len(), form.fields().count());
    }

    #[test]
    fn all_checked_gate_needs_every_box() {
        let gate = Gate::AllChecked {
            fields: &["a", "b"],
            message: "no",
        };
        let mut values = FormValues::new();
        values.insert("a", FieldValue::Flag(true));
        assert!(!gate.passes(&values));
        values.insert("b", FieldValue::Flag(true));
        assert!(gate.passes(&values));
        values.insert("b", FieldValue::Text("on".into()));
        assert!(!gate.passes(&values));
    }

    #[test]
    fn outcome_serializes_with_tag() {
        let json = serde_json::to_string(&Outcome::Rejected { message: "x" }).unwrap();
        assert_eq!(json, r#"{"outcome":"rejected","message":"x"}"#);
    }

    #[test]
    fn only_form_pages_have_forms() {
        assert!(for_page(Page::Dashboard).is_none());
        assert!(for_page(Page::AmlKyc).is_none());
        assert_eq!(all().len(), 6);
    }
}
