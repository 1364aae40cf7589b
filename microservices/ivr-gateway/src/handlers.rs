//! HTTP handlers for the IVR Gateway

use axum::{
    extract::{FromRequest, Request, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Form, Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::ivr::{CallState, Locale};
use crate::{AppState, Result};

/// Body of `POST /trigger-call`
#[derive(Debug, Deserialize)]
pub struct TriggerCallRequest {
    pub to_number: Option<String>,
}

/// Successful `POST /trigger-call` response
#[derive(Debug, Serialize)]
pub struct TriggerCallResponse {
    pub success: bool,
    pub message: String,
    pub call_uuid: String,
    pub api_id: String,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub service: String,
}

/// Fields the voice gateway reports on callbacks. Only `Digits` drives
/// branching; the rest is logged.
#[derive(Debug, Default, Deserialize)]
pub struct CallbackPayload {
    #[serde(rename = "Digits")]
    pub digits: Option<String>,
    #[serde(rename = "CallUUID")]
    pub call_uuid: Option<String>,
    #[serde(rename = "From")]
    pub from: Option<String>,
    #[serde(rename = "To")]
    pub to: Option<String>,
}

/// Callback body extractor accepting JSON or form encoding.
///
/// A missing or unparseable body degrades to an empty payload so the flow
/// treats it as "no digits collected" instead of failing the call.
pub struct Callback(pub CallbackPayload);

impl<S> FromRequest<S> for Callback
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request(req: Request, state: &S) -> std::result::Result<Self, Self::Rejection> {
        let is_json = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .is_some_and(|content_type| content_type.starts_with("application/json"));

        let payload = if is_json {
            Json::<CallbackPayload>::from_request(req, state)
                .await
                .map(|Json(payload)| payload)
                .unwrap_or_default()
        } else {
            Form::<CallbackPayload>::from_request(req, state)
                .await
                .map(|Form(payload)| payload)
                .unwrap_or_default()
        };

        Ok(Callback(payload))
    }
}

/// Plivo XML response body
pub struct Xml(pub String);

impl IntoResponse for Xml {
    fn into_response(self) -> Response {
        ([(header::CONTENT_TYPE, "application/xml")], self.0).into_response()
    }
}

// ============================================
// Call Trigger Handlers
// ============================================

pub async fn trigger_call(
    State(state): State<AppState>,
    Json(request): Json<TriggerCallRequest>,
) -> Result<Json<TriggerCallResponse>> {
    let placed = state.trigger.trigger(request.to_number.as_deref()).await?;

    Ok(Json(TriggerCallResponse {
        success: true,
        message: "Call initiated successfully".to_string(),
        call_uuid: placed.request_uuid,
        api_id: placed.api_id,
    }))
}

// ============================================
// Health Handlers
// ============================================

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: Utc::now().to_rfc3339(),
        service: "ivr-gateway".to_string(),
    })
}

// ============================================
// IVR Handlers
// ============================================

pub async fn ivr_welcome(State(state): State<AppState>) -> Xml {
    info!("IVR welcome - language selection");
    Xml(state.flow.welcome().to_xml())
}

pub async fn ivr_language_handler(
    State(state): State<AppState>,
    Callback(payload): Callback,
) -> Xml {
    info!(
        digits = ?payload.digits,
        call_uuid = ?payload.call_uuid,
        "Language handler"
    );

    let transition = state
        .flow
        .transition(CallState::LanguageSelect, payload.digits.as_deref());
    info!(next = ?transition.next, "Routing language selection");

    Xml(transition.document.to_xml())
}

pub async fn ivr_menu_english(State(state): State<AppState>) -> Xml {
    info!("English menu");
    Xml(state.flow.menu(Locale::English).to_xml())
}

pub async fn ivr_menu_spanish(State(state): State<AppState>) -> Xml {
    info!("Spanish menu");
    Xml(state.flow.menu(Locale::Spanish).to_xml())
}

pub async fn ivr_english_handler(
    State(state): State<AppState>,
    Callback(payload): Callback,
) -> Xml {
    info!(
        digits = ?payload.digits,
        call_uuid = ?payload.call_uuid,
        "English option handler"
    );

    let transition = state.flow.transition(
        CallState::MenuOption(Locale::English),
        payload.digits.as_deref(),
    );
    info!(next = ?transition.next, "Routing English selection");

    Xml(transition.document.to_xml())
}

pub async fn ivr_spanish_handler(
    State(state): State<AppState>,
    Callback(payload): Callback,
) -> Xml {
    info!(
        digits = ?payload.digits,
        call_uuid = ?payload.call_uuid,
        "Spanish option handler"
    );

    let transition = state.flow.transition(
        CallState::MenuOption(Locale::Spanish),
        payload.digits.as_deref(),
    );
    info!(next = ?transition.next, "Routing Spanish selection");

    Xml(transition.document.to_xml())
}

/// Call-end notification; logging only, no transition target.
pub async fn ivr_hangup(State(state): State<AppState>, Callback(payload): Callback) -> Xml {
    info!(call_uuid = ?payload.call_uuid, from = ?payload.from, "Call ended");
    Xml(state.flow.hangup().to_xml())
}

// ============================================
// Fallback
// ============================================

pub async fn not_found() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({ "error": "Route not found" })),
    )
}
