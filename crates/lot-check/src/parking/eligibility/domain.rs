use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Upper bound on suggested lots or permits attached to a decision.
pub const MAX_ALTERNATIVES: usize = 3;

/// Incoming "can I park here" question.
///
/// Fields are read leniently so that a mistyped value reaches the evaluator
/// and comes back as an `error` decision instead of a rejected request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParkingRequest {
    #[serde(
        rename = "license_plate_or_permit_type",
        default,
        deserialize_with = "lenient_text"
    )]
    pub identifier: String,
    #[serde(default, deserialize_with = "lenient_text")]
    pub lot_name: String,
    /// Free-form timestamp, usually `YYYY-MM-DD HH:MM`.
    #[serde(default, deserialize_with = "lenient_optional_text")]
    pub date_time: Option<String>,
    #[serde(default, deserialize_with = "lenient_optional_text")]
    pub user_type: Option<String>,
    #[serde(default, deserialize_with = "truthy")]
    pub disability_placard: bool,
}

impl ParkingRequest {
    pub fn new(identifier: impl Into<String>, lot_name: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            lot_name: lot_name.into(),
            ..Self::default()
        }
    }

    pub fn at(mut self, date_time: impl Into<String>) -> Self {
        self.date_time = Some(date_time.into());
        self
    }

    /// Calendar portion of the timestamp: everything before the first space.
    pub fn date_part(&self) -> Option<&str> {
        let raw = self.date_time.as_deref()?;
        let date = raw.split_once(' ').map_or(raw, |(date, _)| date);
        (!date.is_empty()).then_some(date)
    }
}

/// Strings pass through; `null` is empty; anything else becomes its JSON text.
fn text_of(value: Value) -> String {
    match value {
        Value::String(text) => text,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(text_of)
}

fn lenient_optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(|value| match value {
        Value::Null => None,
        other => Some(text_of(other)),
    })
}

fn truthy<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => false,
        Value::Bool(flag) => flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionStatus {
    Allowed,
    Denied,
    Error,
}

impl DecisionStatus {
    pub fn label(self) -> &'static str {
        match self {
            DecisionStatus::Allowed => "allowed",
            DecisionStatus::Denied => "denied",
            DecisionStatus::Error => "error",
        }
    }
}

/// Outcome of a single eligibility check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    pub status: DecisionStatus,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternatives: Option<Vec<String>>,
}

impl Decision {
    pub fn allowed(lot_name: &str) -> Self {
        Self {
            status: DecisionStatus::Allowed,
            message: format!("You can park in {lot_name}"),
            alternatives: None,
        }
    }

    pub fn denied(message: impl Into<String>, alternatives: Vec<String>) -> Self {
        Self {
            status: DecisionStatus::Denied,
            message: message.into(),
            alternatives: Some(alternatives),
        }
    }

    pub fn error(message: impl Into<String>, alternatives: Vec<String>) -> Self {
        Self {
            status: DecisionStatus::Error,
            message: message.into(),
            alternatives: Some(alternatives),
        }
    }
}
