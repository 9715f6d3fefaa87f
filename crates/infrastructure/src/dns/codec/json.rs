//! JSON rendering of DNS messages. Binary payloads are base64 encoded.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use ferrous_doh_domain::{DnsMessage, DomainError, MessageKind, Question, Record, RecordData};
use serde::Serialize;

#[derive(Serialize)]
struct MessageDto<'a> {
    id: u16,
    #[serde(rename = "type")]
    kind: &'static str,
    rcode: &'static str,
    recursion_desired: bool,
    questions: Vec<QuestionDto<'a>>,
    answers: Vec<AnswerDto<'a>>,
}

#[derive(Serialize)]
struct QuestionDto<'a> {
    name: &'a str,
    #[serde(rename = "type")]
    record_type: String,
}

#[derive(Serialize)]
struct AnswerDto<'a> {
    name: &'a str,
    #[serde(rename = "type")]
    record_type: String,
    ttl: u32,
    data: DataDto<'a>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum DataDto<'a> {
    Text(String),
    Srv {
        priority: u16,
        weight: u16,
        port: u16,
        target: &'a str,
    },
    HostPort {
        host: &'a str,
        port: u16,
    },
    Strings(Vec<String>),
}

impl<'a> From<&'a Question> for QuestionDto<'a> {
    fn from(question: &'a Question) -> Self {
        Self {
            name: &question.name,
            record_type: question.record_type.to_string(),
        }
    }
}

impl<'a> From<&'a Record> for AnswerDto<'a> {
    fn from(record: &'a Record) -> Self {
        let data = match &record.data {
            RecordData::Address(ip) => DataDto::Text(ip.to_string()),
            RecordData::Name(target) => DataDto::Text(target.clone()),
            RecordData::Srv {
                priority,
                weight,
                port,
                target,
            } => DataDto::Srv {
                priority: *priority,
                weight: *weight,
                port: *port,
                target,
            },
            RecordData::HostPort { host, port } => DataDto::HostPort { host, port: *port },
            RecordData::Text(strings) => {
                DataDto::Strings(strings.iter().map(|s| STANDARD.encode(s)).collect())
            }
            RecordData::Raw(bytes) => DataDto::Text(STANDARD.encode(bytes)),
        };

        Self {
            name: &record.name,
            record_type: record.record_type.to_string(),
            ttl: record.ttl,
            data,
        }
    }
}

pub fn encode(message: &DnsMessage) -> Result<Vec<u8>, DomainError> {
    let dto = MessageDto {
        id: message.id,
        kind: match message.kind {
            MessageKind::Query => "query",
            MessageKind::Response => "response",
        },
        rcode: message.response_code.as_status(),
        recursion_desired: message.recursion_desired,
        questions: message.questions.iter().map(QuestionDto::from).collect(),
        answers: message.answers.iter().map(AnswerDto::from).collect(),
    };

    serde_json::to_vec(&dto).map_err(|e| DomainError::Encode(e.to_string()))
}
