//! DNS-over-HTTP endpoints (RFC 8484 plus question-list forms).
//!
//! ```text
//! GET  /dns-query?dns=<base64url wire query>
//! GET  /dns-query?name=example.com&type=A
//! POST /dns-query   body: wire query, or {"questions":[{"name":..,"type":..}]}
//! ```

use crate::{
    dto::{DohQueryParams, QuestionsBody},
    errors::ApiError,
    negotiation::{is_json_body, negotiate, Negotiated},
    state::AppState,
};
use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{header, HeaderMap, HeaderValue},
    response::{IntoResponse, Response},
};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use ferrous_doh_domain::{DohRequest, DomainError, RequestPayload};

pub async fn doh_get(
    State(state): State<AppState>,
    Query(params): Query<DohQueryParams>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let negotiated = negotiate(&headers);

    let payload = if let Some(encoded) = params.dns.as_deref() {
        let packet = URL_SAFE_NO_PAD
            .decode(encoded.trim_end_matches('='))
            .map_err(|_| DomainError::Decode("invalid base64url dns parameter".to_string()))?;
        RequestPayload::Wire(packet)
    } else if let Some(question) = params.question() {
        RequestPayload::Questions(vec![question?])
    } else {
        return Err(DomainError::Decode("missing dns or name query parameter".to_string()).into());
    };

    resolve(&state, payload, negotiated).await
}

pub async fn doh_post(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, ApiError> {
    let negotiated = negotiate(&headers);

    let payload = if is_json_body(&headers) {
        let body: QuestionsBody = serde_json::from_slice(&body)
            .map_err(|e| DomainError::Decode(format!("invalid JSON body: {}", e)))?;
        RequestPayload::Questions(body.into_questions()?)
    } else {
        RequestPayload::Wire(body.to_vec())
    };

    resolve(&state, payload, negotiated).await
}

async fn resolve(
    state: &AppState,
    payload: RequestPayload,
    negotiated: Negotiated,
) -> Result<Response, ApiError> {
    let request = DohRequest {
        payload,
        format: negotiated.format,
    };

    let response = state.handle_doh.execute(&request).await?;

    Ok((
        [(
            header::CONTENT_TYPE,
            HeaderValue::from_static(negotiated.content_type),
        )],
        response.body,
    )
        .into_response())
}
