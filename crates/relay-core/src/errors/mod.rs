//! Error handling for Relay.
//! `thiserror` only, zero `anyhow`. The dispatch surface itself never
//! fails — absent types and unknown listeners are silent no-ops — so the
//! only errors here are payload conversion errors.

pub mod event_error;

pub use event_error::EventError;
