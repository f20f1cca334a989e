//! Event payload conversion errors.

/// Errors from bridging typed payloads in and out of the event envelope.
#[derive(Debug, thiserror::Error)]
pub enum EventError {
    #[error("failed to encode payload for event `{event_type}`: {source}")]
    PayloadEncode {
        event_type: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to decode payload of event `{event_type}`: {source}")]
    PayloadDecode {
        event_type: String,
        #[source]
        source: serde_json::Error,
    },
}
