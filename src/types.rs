//! Type definitions for pts_client
//!
//! Contains the request bodies sent to the delivery backend, the reply shapes
//! it returns, and the typed outcomes the views match on.

use crate::session::SessionToken;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Login form payload
///
/// The backend expects capitalised keys (`Email`, `Password`); lower-case
/// keys are accepted when reading one back.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    #[serde(rename = "Email", alias = "email")]
    pub email: String,
    #[serde(rename = "Password", alias = "password")]
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Both fields are required
    pub fn is_complete(&self) -> bool {
        !self.email.is_empty() && !self.password.is_empty()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"***")
            .finish()
    }
}

/// New account registration data
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationRequest {
    pub email: String,
    pub password: String,
    pub phone: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl fmt::Debug for RegistrationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrationRequest")
            .field("email", &self.email)
            .field("password", &"***")
            .field("phone", &self.phone)
            .field("name", &self.name)
            .field("location", &self.location)
            .finish()
    }
}

/// Order placement form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    pub pickup: String,
    pub drop_off: String,
    pub delivery: String,
    pub package_details: String,
    pub terms: bool,
}

impl OrderRequest {
    /// Names of the fields failing required validation, in form order
    pub fn invalid_fields(&self) -> Vec<&'static str> {
        let mut invalid = Vec::new();
        if self.pickup.is_empty() {
            invalid.push("pickup");
        }
        if self.drop_off.is_empty() {
            invalid.push("dropOff");
        }
        if self.delivery.is_empty() {
            invalid.push("delivery");
        }
        if self.package_details.is_empty() {
            invalid.push("packageDetails");
        }
        if !self.terms {
            invalid.push("terms");
        }
        invalid
    }

    pub fn is_valid(&self) -> bool {
        self.invalid_fields().is_empty()
    }

    /// Back to the pristine form state
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Order identifier as handed out by the backend
///
/// Only ever obtained from a reply or a route parameter; the client never
/// makes one up. Numeric identifiers are kept in their decimal form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct OrderId(String);

impl OrderId {
    pub(crate) fn from_path_segment(segment: &str) -> Option<Self> {
        if segment.is_empty() {
            None
        } else {
            Some(Self(segment.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for OrderId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserialize_lenient_string(deserializer).map(Self)
    }
}

/// Accepts a JSON string or number and yields its text
fn deserialize_lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(text) => text,
        Raw::Number(number) => number.to_string(),
    })
}

/// Order lifecycle state
///
/// Only `pending` and `cancelled` drive client behaviour; anything else is
/// carried through for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OrderStatus {
    Pending,
    Cancelled,
    Other(String),
}

impl OrderStatus {
    pub fn as_str(&self) -> &str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Cancelled => "cancelled",
            OrderStatus::Other(status) => status,
        }
    }

    pub fn is_cancellable(&self) -> bool {
        matches!(self, OrderStatus::Pending)
    }
}

impl From<String> for OrderStatus {
    fn from(status: String) -> Self {
        match status.as_str() {
            "pending" => OrderStatus::Pending,
            "cancelled" => OrderStatus::Cancelled,
            _ => OrderStatus::Other(status),
        }
    }
}

impl From<OrderStatus> for String {
    fn from(status: OrderStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Keys an order identifier may be reported under
const ORDER_ID_KEYS: &[&str] = &["id", "ID", "orderId", "order_id"];
const STATUS_KEYS: &[&str] = &["status", "Status"];

/// Remove the first of `keys` holding a string or a number and return its
/// text. Values of any other type stay in `fields`.
fn take_text(fields: &mut Map<String, Value>, keys: &[&str]) -> Option<String> {
    for key in keys {
        let text = match fields.get(*key) {
            Some(Value::String(text)) => text.clone(),
            Some(Value::Number(number)) => number.to_string(),
            _ => continue,
        };
        fields.remove(*key);
        return Some(text);
    }
    None
}

fn take_order_id(fields: &mut Map<String, Value>) -> Option<OrderId> {
    take_text(fields, ORDER_ID_KEYS).filter(|id| !id.is_empty()).map(OrderId)
}

/// One entry of the order list
///
/// Entries are kept as the backend sent them; `id` and `status` are lifted
/// out when present so the list can link to the detail view.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OrderSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<OrderId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<OrderStatus>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl OrderSummary {
    pub fn from_object(mut fields: Map<String, Value>) -> Self {
        let id = take_order_id(&mut fields);
        let status = take_text(&mut fields, STATUS_KEYS).map(OrderStatus::from);
        Self {
            id,
            status,
            fields,
        }
    }
}

impl<'de> Deserialize<'de> for OrderSummary {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Map::deserialize(deserializer).map(Self::from_object)
    }
}

/// Full order record shown on the detail view
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<OrderId>,
    pub status: OrderStatus,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl<'de> Deserialize<'de> for OrderDetails {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut fields = Map::deserialize(deserializer)?;
        let id = take_order_id(&mut fields);
        let status = take_text(&mut fields, STATUS_KEYS)
            .map(OrderStatus::from)
            .ok_or_else(|| <D::Error as serde::de::Error>::missing_field("status"))?;
        Ok(Self {
            id,
            status,
            fields,
        })
    }
}

/// Reply to a successful order placement
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct OrderConfirmation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<OrderId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl<'de> Deserialize<'de> for OrderConfirmation {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let mut fields = Map::deserialize(deserializer)?;
        let id = take_order_id(&mut fields);
        let message = take_text(&mut fields, &["message"]);
        Ok(Self {
            id,
            message,
            fields,
        })
    }
}

/// User object returned alongside a session token
///
/// The backend's user record is opaque to the client. Well-known fields are
/// picked up under either key casing when they hold text or a number;
/// everything else stays in `fields`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UserProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl UserProfile {
    pub fn from_object(mut fields: Map<String, Value>) -> Self {
        Self {
            id: take_text(&mut fields, &["id", "ID"]),
            name: take_text(&mut fields, &["name", "Name"]),
            email: take_text(&mut fields, &["email", "Email"]),
            phone: take_text(&mut fields, &["phone", "Phone"]),
            location: take_text(&mut fields, &["location", "Location"]),
            fields,
        }
    }
}

impl<'de> Deserialize<'de> for UserProfile {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Map::deserialize(deserializer).map(Self::from_object)
    }
}

/// Raw login reply; either field may be missing
#[derive(Debug, Default, Deserialize)]
pub struct LoginReply {
    #[serde(default)]
    pub token: Option<Value>,
    #[serde(default)]
    pub user: Option<Value>,
}

/// What a login exchange produced
#[derive(Debug, Clone, PartialEq)]
pub enum LoginOutcome {
    Authenticated {
        token: SessionToken,
        user: UserProfile,
    },
    /// The reply lacked a token or a user object
    Rejected,
}

impl LoginReply {
    /// A truthy string or number counts as a token; numbers are kept in
    /// their decimal form. Any JSON object counts as the user.
    pub fn into_outcome(self) -> LoginOutcome {
        let token = match self.token {
            Some(Value::String(token)) if !token.is_empty() => SessionToken::new(token),
            Some(number @ Value::Number(_)) if is_truthy(&number) => {
                SessionToken::new(number.to_string())
            },
            _ => return LoginOutcome::Rejected,
        };
        let user = match self.user {
            Some(Value::Object(user)) => UserProfile::from_object(user),
            _ => return LoginOutcome::Rejected,
        };

        LoginOutcome::Authenticated {
            token,
            user,
        }
    }
}

/// Raw registration reply
#[derive(Debug, Default, Deserialize)]
pub struct RegistrationReply {
    #[serde(default)]
    pub result: Value,
    #[serde(default)]
    pub message: Option<String>,
}

/// What a registration attempt produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationOutcome {
    Registered {
        message: Option<String>,
    },
    Refused {
        message: Option<String>,
    },
}

impl RegistrationReply {
    pub fn into_outcome(self) -> RegistrationOutcome {
        if is_truthy(&self.result) {
            RegistrationOutcome::Registered {
                message: self.message,
            }
        } else {
            RegistrationOutcome::Refused {
                message: self.message.filter(|m| !m.is_empty()),
            }
        }
    }
}

/// JavaScript truthiness of a JSON value
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
