// SPDX-FileCopyrightText: 2026 Shopwise Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the gateway REST API.

use axum::{
    Json,
    extract::{
        Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use shopwise_core::ShopwiseError;
use shopwise_core::types::{ChatRequest, ConversationMessage};

use crate::server::{GatewayState, HealthState};

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    /// Names of missing required fields, for validation failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub missing: Option<Vec<String>>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            missing: None,
        }
    }

    fn missing_fields(missing: Vec<String>) -> Self {
        Self {
            error: "Missing required fields".to_string(),
            missing: Some(missing),
        }
    }
}

/// Response body for GET /health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    /// Binary version.
    pub version: String,
    pub uptime_secs: u64,
}

/// Query string for GET /v1/conversations/history.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryQuery {
    #[serde(default)]
    pub chatbot_id: Option<String>,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub workspace_id: Option<String>,
    /// Keep only the most recent `limit` messages.
    #[serde(default)]
    pub limit: Option<usize>,
}

/// Response body for GET /v1/conversations/history.
#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub messages: Vec<ConversationMessage>,
}

fn error_response(status: StatusCode, body: ErrorResponse) -> Response {
    (status, Json(body)).into_response()
}

/// POST /v1/chat
///
/// Runs one chat turn. Validation failures answer 400 with the missing
/// field names; every valid request answers 200 with `{reply, context}`.
pub async fn post_chat(
    State(state): State<GatewayState>,
    body: Result<Json<ChatRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match body {
        Ok(body) => body,
        Err(rejection) => {
            return error_response(
                StatusCode::BAD_REQUEST,
                ErrorResponse::new(format!("Invalid request body: {}", rejection.body_text())),
            );
        }
    };

    match state.chat.handle(request).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(ShopwiseError::Validation { missing }) => error_response(
            StatusCode::BAD_REQUEST,
            ErrorResponse::missing_fields(missing),
        ),
        Err(e) => {
            tracing::error!(error = %e, "chat request failed");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::new("Internal server error"),
            )
        }
    }
}

/// GET /v1/conversations/history
pub async fn get_history(
    State(state): State<GatewayState>,
    query: Result<Query<HistoryQuery>, QueryRejection>,
) -> Response {
    let Query(query) = match query {
        Ok(query) => query,
        Err(rejection) => {
            return error_response(
                StatusCode::BAD_REQUEST,
                ErrorResponse::new(format!("Invalid query: {}", rejection.body_text())),
            );
        }
    };

    let present = |v: &Option<String>| v.as_deref().filter(|s| !s.trim().is_empty()).map(str::to_string);
    let (chatbot_id, session_id, workspace_id) = match (
        present(&query.chatbot_id),
        present(&query.session_id),
        present(&query.workspace_id),
    ) {
        (Some(c), Some(s), Some(w)) => (c, s, w),
        (c, s, w) => {
            let missing = [("chatbotId", c), ("sessionId", s), ("workspaceId", w)]
                .into_iter()
                .filter(|(_, value)| value.is_none())
                .map(|(name, _)| name.to_string())
                .collect();
            return error_response(
                StatusCode::BAD_REQUEST,
                ErrorResponse::missing_fields(missing),
            );
        }
    };

    match state
        .chat
        .history(&chatbot_id, &session_id, &workspace_id, query.limit)
        .await
    {
        Ok(messages) => (StatusCode::OK, Json(HistoryResponse { messages })).into_response(),
        Err(e) => {
            tracing::warn!(error = %e, "history lookup failed");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::new("Failed to load conversation history"),
            )
        }
    }
}

/// GET /health
///
/// Unauthenticated liveness check.
pub async fn get_health(State(health): State<HealthState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: health.start_time.elapsed().as_secs(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_body_shape() {
        let body = ErrorResponse::missing_fields(vec!["message".into(), "sessionId".into()]);
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "error": "Missing required fields",
                "missing": ["message", "sessionId"]
            })
        );
    }

    #[test]
    fn plain_error_omits_missing() {
        let json = serde_json::to_string(&ErrorResponse::new("nope")).unwrap();
        assert_eq!(json, r#"{"error":"nope"}"#);
    }

    #[test]
    fn history_query_reads_camel_case() {
        let q: HistoryQuery = serde_json::from_str(
            r#"{"chatbotId": "c", "sessionId": "s", "workspaceId": "w", "limit": 5}"#,
        )
        .unwrap();
        assert_eq!(q.chatbot_id.as_deref(), Some("c"));
        assert_eq!(q.limit, Some(5));
    }
}
