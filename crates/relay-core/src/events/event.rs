//! Event envelope: required type string, optional dispatch target, open
//! JSON payload.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::EventError;

/// Identity of a dispatching object.
///
/// Events carry this in their `target` field so listeners can tell which
/// host dispatched them. Constructed from any string-ish value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TargetId(String);

impl TargetId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TargetId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for TargetId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An event delivered to listeners.
///
/// Only the type string is required. The dispatcher fills in `target` at
/// dispatch time (explicit override, or the registry's owner identity); the
/// payload is an open `serde_json::Value` so callers can attach arbitrary
/// structured data without the envelope knowing its shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    #[serde(rename = "type")]
    event_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    target: Option<TargetId>,
    #[serde(default, skip_serializing_if = "Value::is_null")]
    payload: Value,
}

impl Event {
    /// Create an event with just a type and no payload.
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            target: None,
            payload: Value::Null,
        }
    }

    /// Create an event carrying a pre-built JSON payload.
    pub fn with_payload(event_type: impl Into<String>, payload: Value) -> Self {
        Self {
            event_type: event_type.into(),
            target: None,
            payload,
        }
    }

    /// Create an event by serializing `payload` into the envelope.
    pub fn try_with_payload<T: Serialize>(
        event_type: impl Into<String>,
        payload: &T,
    ) -> Result<Self, EventError> {
        let event_type = event_type.into();
        let payload = serde_json::to_value(payload).map_err(|source| EventError::PayloadEncode {
            event_type: event_type.clone(),
            source,
        })?;
        Ok(Self {
            event_type,
            target: None,
            payload,
        })
    }

    pub fn event_type(&self) -> &str {
        &self.event_type
    }

    /// The dispatching object's identity, if the event has been dispatched
    /// (or an explicit target was supplied).
    pub fn target(&self) -> Option<&TargetId> {
        self.target.as_ref()
    }

    pub(crate) fn set_target(&mut self, target: TargetId) {
        self.target = Some(target);
    }

    pub fn payload(&self) -> &Value {
        &self.payload
    }

    /// Deserialize the payload into a caller type.
    pub fn payload_as<T: DeserializeOwned>(&self) -> Result<T, EventError> {
        serde_json::from_value(self.payload.clone()).map_err(|source| EventError::PayloadDecode {
            event_type: self.event_type.clone(),
            source,
        })
    }
}

impl From<&str> for Event {
    fn from(event_type: &str) -> Self {
        Self::new(event_type)
    }
}

impl From<String> for Event {
    fn from(event_type: String) -> Self {
        Self::new(event_type)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[Event (type={})]", self.event_type)
    }
}
