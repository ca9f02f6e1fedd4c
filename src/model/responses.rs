/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/
use crate::constants::IN_HOUSE_TEAM_TYPE;
use crate::error::AppError;
use pretty_simple_display::{DebugPretty, DisplaySimple};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// Membership type of a team
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TeamType {
    /// Individual developer account
    #[serde(rename = "Individual")]
    Individual,
    /// Standard organization account
    #[serde(rename = "Company/Organization")]
    Company,
    /// Enterprise account distributing in-house
    #[serde(rename = "In-House")]
    InHouse,
    /// Anything the portal adds later
    #[default]
    #[serde(other)]
    Other,
}

/// A team the signed-in account belongs to
#[derive(DebugPretty, DisplaySimple, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    /// Team identifier
    pub team_id: String,
    /// Display name
    #[serde(default)]
    pub name: String,
    /// Membership type
    #[serde(rename = "type", default)]
    pub team_type: TeamType,
    /// Every other field the portal sends
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Team {
    /// Whether the team is an enterprise in-house team
    #[must_use]
    pub fn is_in_house(&self) -> bool {
        self.team_type == TeamType::InHouse
    }
}

/// Sorts teams by display name, then by team identifier, both ascending
pub fn sort_teams(teams: &mut [Team]) {
    teams.sort_by(|a, b| {
        a.name
            .cmp(&b.name)
            .then_with(|| a.team_id.cmp(&b.team_id))
    });
}

/// Message carried by a failed envelope, if the body is one
///
/// The portal signals failure with a non-zero `resultCode`; the human
/// readable reason is in `userString`, falling back to `resultString`.
#[must_use]
pub fn envelope_error(body: &Value) -> Option<String> {
    let object = body.as_object()?;
    let code = object.get("resultCode")?;
    let code = code
        .as_i64()
        .or_else(|| code.as_str().and_then(|s| s.parse().ok()))?;
    if code == 0 {
        return None;
    }
    let message = ["userString", "resultString"]
        .iter()
        .find_map(|key| object.get(*key).and_then(Value::as_str))
        .map(str::to_string)
        .unwrap_or_else(|| format!("resultCode {code}"));
    Some(message)
}

/// Validates the envelope and pulls out `key`
///
/// When `key` is absent from the body the full body is returned.
pub fn unwrap_envelope(body: Value, key: Option<&str>) -> Result<Value, AppError> {
    if let Some(message) = envelope_error(&body) {
        return Err(AppError::Request(message));
    }
    match (key, body) {
        (Some(key), Value::Object(mut object)) if object.contains_key(key) => {
            Ok(object.remove(key).unwrap_or(Value::Null))
        }
        (_, body) => Ok(body),
    }
}

/// Turns an extracted list value into records
///
/// `null` stands for an empty list; anything else that is not an array
/// is an unexpected response.
pub fn into_records(value: Value) -> Result<Vec<Value>, AppError> {
    match value {
        Value::Array(records) => Ok(records),
        Value::Null => Ok(Vec::new()),
        other => Err(AppError::UnexpectedResponse(other.to_string())),
    }
}

/// Converts an XML property list into the JSON value model
pub fn plist_to_json(value: plist::Value) -> Value {
    match value {
        plist::Value::Dictionary(dict) => Value::Object(
            dict.into_iter()
                .map(|(k, v)| (k, plist_to_json(v)))
                .collect(),
        ),
        plist::Value::Array(items) => Value::Array(items.into_iter().map(plist_to_json).collect()),
        plist::Value::Boolean(b) => Value::Bool(b),
        plist::Value::Integer(i) => match (i.as_signed(), i.as_unsigned()) {
            (Some(n), _) => Value::Number(n.into()),
            (None, Some(n)) => Value::Number(n.into()),
            (None, None) => Value::Null,
        },
        plist::Value::Real(f) => Number::from_f64(f).map_or(Value::Null, Value::Number),
        plist::Value::String(s) => Value::String(s),
        plist::Value::Date(date) => Value::String(date.to_xml_format()),
        plist::Value::Data(bytes) => Value::String(hex::encode(bytes)),
        plist::Value::Uid(uid) => Value::Number(uid.get().into()),
        _ => Value::Null,
    }
}
