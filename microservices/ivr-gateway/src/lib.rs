//! IVR Gateway Microservice
//!
//! Thin bridge between an outbound-call trigger API and the Plivo voice
//! platform:
//! - Destination number validation and call placement via the Plivo REST API
//! - Plivo XML responses for the voice-gateway webhook callbacks
//! - Two-language DTMF menu tree (message playback or operator bridge)
//!
//! The service holds no session state between requests; call-flow
//! continuity lives entirely in the callback URLs embedded in the XML.

pub mod config;
pub mod error;
pub mod handlers;
pub mod ivr;
pub mod provider;
pub mod routes;
pub mod trigger;

use std::sync::Arc;

use crate::ivr::CallFlow;
use crate::provider::CallProvider;
use crate::trigger::CallTrigger;

pub use config::Config;
pub use error::{Error, Result};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub trigger: Arc<CallTrigger>,
    pub flow: Arc<CallFlow>,
    pub config: Arc<Config>,
}

impl AppState {
    /// Build state from configuration and an injected provider client.
    pub fn new(config: Config, provider: Arc<dyn CallProvider>) -> Self {
        let flow = Arc::new(CallFlow::new(
            &config.server_url,
            &config.associate_number,
            &config.audio_file_url,
        ));
        let trigger = Arc::new(CallTrigger::new(
            provider,
            &config.from_number,
            &config.server_url,
        ));

        Self {
            trigger,
            flow,
            config: Arc::new(config),
        }
    }
}
