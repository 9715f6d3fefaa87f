use crate::ports::{AnswerStore, UpstreamProber};
use ferrous_doh_domain::{
    DnsMessage, Question, Record, RecordData, RecordType, ResponseCode, UpstreamEndpoint,
};
use std::sync::Arc;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerSource {
    Cache,
    Upstream,
    /// Every upstream failed; the reply is empty with SERVFAIL.
    Failed,
}

#[derive(Debug, Clone)]
pub struct Resolution {
    pub reply: DnsMessage,
    pub source: AnswerSource,
}

/// Cache-first resolution of a decoded query.
pub struct ResolveQueryUseCase {
    endpoints: Arc<[UpstreamEndpoint]>,
    store: Arc<dyn AnswerStore>,
    prober: Arc<dyn UpstreamProber>,
}

impl ResolveQueryUseCase {
    pub fn new(
        endpoints: Vec<UpstreamEndpoint>,
        store: Arc<dyn AnswerStore>,
        prober: Arc<dyn UpstreamProber>,
    ) -> Self {
        Self {
            endpoints: endpoints.into(),
            store,
            prober,
        }
    }

    pub fn endpoints(&self) -> &[UpstreamEndpoint] {
        &self.endpoints
    }

    pub async fn execute(&self, query: &DnsMessage) -> Resolution {
        let mut reply = DnsMessage::reply_to(query);

        for question in &query.questions {
            self.collect_cached(question, &mut reply);
        }

        if !reply.answers.is_empty() {
            debug!(
                id = query.id,
                answers = reply.answers.len(),
                "Answered from cache"
            );
            return Resolution {
                reply,
                source: AnswerSource::Cache,
            };
        }

        match self.prober.probe(query).await {
            Ok(report) => {
                for answer in &report.responses {
                    for record in &answer.response.answers {
                        self.remember(answer.port, &answer.endpoint.host, record);
                        reply.push_answer(record.clone());
                    }
                }

                if reply.answers.is_empty() {
                    if let Some(first) = report.responses.first() {
                        reply.response_code = first.response.response_code;
                    }
                }

                debug!(
                    id = query.id,
                    answers = reply.answers.len(),
                    responded = report.responses.len(),
                    failed = report.failed,
                    "Answered from upstream"
                );

                Resolution {
                    reply,
                    source: AnswerSource::Upstream,
                }
            }
            Err(e) => {
                warn!(id = query.id, error = %e, "Upstream probe failed");
                reply.response_code = ResponseCode::ServFail;
                Resolution {
                    reply,
                    source: AnswerSource::Failed,
                }
            }
        }
    }

    fn collect_cached(&self, question: &Question, reply: &mut DnsMessage) {
        for endpoint in self.endpoints.iter() {
            for port in endpoint.ports() {
                for record in self.store.get(port, &endpoint.host, &question.name) {
                    if let Some(answer) = cached_answer(question, record) {
                        reply.push_answer(answer);
                    }
                }
            }
        }
    }

    fn remember(&self, port: u16, host: &str, record: &Record) {
        if record.ttl == 0 {
            return;
        }
        if self.store.has(port, host, &record.name, record) {
            return;
        }
        let ttl_ms = u64::from(record.ttl) * 1000;
        self.store.set(port, host, &record.name, record.clone(), ttl_ms);
    }
}

/// Shapes a stored record into the answer served for `question`, labelled
/// with the name exactly as the client asked it.
fn cached_answer(question: &Question, record: Record) -> Option<Record> {
    let answer = shape_cached(question, record)?;
    Some(Record {
        name: question.name.clone(),
        ..answer
    })
}

fn shape_cached(question: &Question, record: Record) -> Option<Record> {
    match question.record_type {
        RecordType::A => match record.data {
            RecordData::Address(_) if record.record_type == RecordType::A => Some(record),
            _ => None,
        },
        RecordType::SRV => match record.data {
            RecordData::Srv { port, target, .. } => Some(Record {
                name: record.name,
                record_type: RecordType::A,
                ttl: record.ttl,
                data: RecordData::HostPort { host: target, port },
            }),
            _ => None,
        },
        RecordType::TXT => match record.data {
            RecordData::Text(_) => Some(record),
            _ => None,
        },
        _ => None,
    }
}
