use super::resolve_query::{AnswerSource, ResolveQueryUseCase};
use crate::events::{GatewayEvent, GatewayEventEmitter};
use crate::ports::MessageCodec;
use ferrous_doh_domain::{
    DnsMessage, DohRequest, DohResponse, DomainError, RequestPayload, ResponseFormat,
};
use std::sync::Arc;
use tracing::debug;

pub struct HandleDohRequestUseCase {
    resolver: Arc<ResolveQueryUseCase>,
    codec: Arc<dyn MessageCodec>,
    emitter: GatewayEventEmitter,
}

impl HandleDohRequestUseCase {
    pub fn new(resolver: Arc<ResolveQueryUseCase>, codec: Arc<dyn MessageCodec>) -> Self {
        Self {
            resolver,
            codec,
            emitter: GatewayEventEmitter::new_disabled(),
        }
    }

    pub fn with_events(mut self, emitter: GatewayEventEmitter) -> Self {
        self.emitter = emitter;
        self
    }

    pub async fn execute(&self, request: &DohRequest) -> Result<DohResponse, DomainError> {
        self.emitter.emit(GatewayEvent::RequestReceived {
            format: request.format,
        });

        let query = self.decode(&request.payload)?;
        if query.questions.is_empty() {
            return Err(DomainError::Decode("query has no questions".to_string()));
        }

        let resolution = self.resolver.execute(&query).await;

        debug!(
            id = query.id,
            name = %query.questions[0].name,
            record_type = %query.questions[0].record_type,
            cache_hit = resolution.source == AnswerSource::Cache,
            format = request.format.as_str(),
            rcode = resolution.reply.response_code.as_status(),
            "DoH request resolved"
        );

        let body = match request.format {
            ResponseFormat::Wire => self.codec.encode(&resolution.reply)?,
            ResponseFormat::Json => self.codec.encode_json(&resolution.reply)?,
        };

        Ok(DohResponse {
            body,
            format: request.format,
        })
    }

    /// Question payloads go through a synthetic wire query so both forms decode identically.
    fn decode(&self, payload: &RequestPayload) -> Result<DnsMessage, DomainError> {
        match payload {
            RequestPayload::Wire(bytes) => self.codec.decode(bytes),
            RequestPayload::Questions(questions) => {
                if questions.is_empty() {
                    return Err(DomainError::Decode("query has no questions".to_string()));
                }
                let synthetic = DnsMessage::query(fastrand::u16(..), questions.clone());
                let bytes = self.codec.encode(&synthetic)?;
                self.codec.decode(&bytes)
            }
        }
    }
}
