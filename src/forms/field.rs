//! Input widgets and the values they produce.
//!
//! Widgets constrain their own input: numbers are clamped into range,
//! choices outside the option list fall back to the default, unparseable
//! dates fall back to today. Nothing here ever reports an error.
use chrono::NaiveDate;
use serde::Serialize;

// ---------------------------------------------------------------------------
// Widget definitions
// ---------------------------------------------------------------------------

/// Bounds and default of a numeric input.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NumberSpec {
    pub min: f64,
    pub max: Option<f64>,
    pub step: f64,
    pub default: f64,
    /// Digits shown after the decimal point; `0` means an integer input.
    pub decimals: u8,
}

impl NumberSpec {
    /// Integer input with a lower bound.
    pub const fn int(min: f64, default: f64) -> Self {
        Self {
            min,
            max: None,
            step: 1.0,
            default,
            decimals: 0,
        }
    }

    pub const fn with_step(mut self, step: f64) -> Self {
        self.step = step;
        self
    }

    /// Decimal input bounded on both sides.
    pub const fn ranged(min: f64, max: f64, default: f64, step: f64) -> Self {
        Self {
            min,
            max: Some(max),
            step,
            default,
            decimals: 2,
        }
    }

    pub fn clamp(&self, value: f64) -> f64 {
        if !value.is_finite() {
            return self.default;
        }
        let value = if self.decimals == 0 { value.round() } else { value };
        let upper = self.max.unwrap_or(f64::MAX);
        value.clamp(self.min, upper)
    }

    pub fn format(&self, value: f64) -> String {
        format!("{:.*}", usize::from(self.decimals), value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    TextArea,
    /// Single choice; the first option is the default.
    Select { options: &'static [&'static str] },
    MultiSelect { options: &'static [&'static str] },
    Number(NumberSpec),
    /// Defaults to today.
    Date,
    Checkbox,
    /// Ordered single choice rendered as a slider.
    Slider {
        options: &'static [&'static str],
        default: &'static str,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FieldDef {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
}

impl FieldDef {
    pub const fn new(key: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self { key, label, kind }
    }

    pub fn default_value(&self, today: NaiveDate) -> FieldValue {
        match self.kind {
            FieldKind::Text | FieldKind::TextArea => FieldValue::Text(String::new()),
            FieldKind::Select { options } => {
                FieldValue::Text(options.first().copied().unwrap_or_default().to_string())
            }
            FieldKind::MultiSelect { .. } => FieldValue::Choices(Vec::new()),
            FieldKind::Number(spec) => FieldValue::Number(spec.default),
            FieldKind::Date => FieldValue::Date(today),
            FieldKind::Checkbox => FieldValue::Flag(false),
            FieldKind::Slider { default, .. } => FieldValue::Text(default.to_string()),
        }
    }

    /// Turn the raw submitted strings for this field into a widget value.
    ///
    /// `raw` holds every value submitted under this field's key, in order.
    /// An empty slice means the field was absent from the submission.
    pub fn normalize(&self, raw: &[&str], today: NaiveDate) -> FieldValue {
        let first = raw.first().copied();
        match self.kind {
            FieldKind::Text | FieldKind::TextArea => {
                FieldValue::Text(first.unwrap_or_default().to_string())
            }
            FieldKind::Select { options } => match first.filter(|v| options.contains(v)) {
                Some(choice) => FieldValue::Text(choice.to_string()),
                None => self.default_value(today),
            },
            FieldKind::Slider { options, default } => {
                let choice = first.filter(|v| options.contains(v)).unwrap_or(default);
                FieldValue::Text(choice.to_string())
            }
            FieldKind::MultiSelect { options } => {
                let mut picked: Vec<String> = Vec::new();
                for value in raw {
                    if options.contains(value) && !picked.iter().any(|p| p == value) {
                        picked.push((*value).to_string());
                    }
                }
                FieldValue::Choices(picked)
            }
            FieldKind::Number(spec) => {
                let parsed = first
                    .and_then(|v| v.trim().parse::<f64>().ok())
                    .unwrap_or(spec.default);
                FieldValue::Number(spec.clamp(parsed))
            }
            FieldKind::Date => {
                let parsed = first.and_then(|v| NaiveDate::parse_from_str(v.trim(), "%Y-%m-%d").ok());
                FieldValue::Date(parsed.unwrap_or(today))
            }
            FieldKind::Checkbox => FieldValue::Flag(raw.iter().any(|v| is_checked(v))),
        }
    }
}

/// Values a browser or API client may send for a ticked checkbox.
fn is_checked(val: &str) -> bool {
    matches!(
        val.trim().to_ascii_lowercase().as_str(),
        "on" | "1" | "true" | "yes" | "checked"
    )
}

// ---------------------------------------------------------------------------
// Values
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Number(f64),
    Date(NaiveDate),
    Flag(bool),
    Choices(Vec<String>),
}

impl FieldValue {
    pub fn is_checked(&self) -> bool {
        matches!(self, Self::Flag(true))
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Whether `option` is the selected (or one of the selected) choices.
    pub fn selects(&self, option: &str) -> bool {
        match self {
            Self::Text(s) => s == option,
            Self::Choices(list) => list.iter().any(|c| c == option),
            _ => false,
        }
    }
}

impl std::fmt::Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(s) => write!(f, "{s}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            Self::Flag(true) => write!(f, "yes"),
            Self::Flag(false) => write!(f, "no"),
            Self::Choices(list) => write!(f, "{}", list.join(", ")),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
