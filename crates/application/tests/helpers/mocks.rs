use async_trait::async_trait;
use ferrous_doh_application::ports::{
    AnswerStore, EndpointAnswer, MessageCodec, ProbeReport, StoreStats, UpstreamProber,
};
use ferrous_doh_domain::{DnsMessage, DomainError, Record, UpstreamEndpoint};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

type Partition = Vec<(String, Record, u64)>;

/// In-memory store without expiry; keeps the TTL it was given for inspection.
#[derive(Default)]
pub struct MockAnswerStore {
    partitions: Mutex<HashMap<(u16, String), Partition>>,
    sets: AtomicUsize,
}

impl MockAnswerStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_count(&self) -> usize {
        self.sets.load(Ordering::SeqCst)
    }

    pub fn stored_ttl_ms(&self, port: u16, host: &str, record: &Record) -> Option<u64> {
        let partitions = self.partitions.lock().unwrap();
        partitions
            .get(&(port, host.to_string()))?
            .iter()
            .find(|(_, r, _)| r.same_answer(record))
            .map(|(_, _, ttl)| *ttl)
    }
}

impl AnswerStore for MockAnswerStore {
    fn get(&self, port: u16, host: &str, name: &str) -> Vec<Record> {
        let partitions = self.partitions.lock().unwrap();
        partitions
            .get(&(port, host.to_string()))
            .map(|records| {
                records
                    .iter()
                    .filter(|(n, _, _)| n.eq_ignore_ascii_case(name))
                    .map(|(_, r, _)| r.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    fn has(&self, port: u16, host: &str, name: &str, record: &Record) -> bool {
        let partitions = self.partitions.lock().unwrap();
        partitions
            .get(&(port, host.to_string()))
            .is_some_and(|records| {
                records
                    .iter()
                    .any(|(n, r, _)| n.eq_ignore_ascii_case(name) && r.data == record.data)
            })
    }

    fn set(&self, port: u16, host: &str, name: &str, record: Record, ttl_ms: u64) {
        self.sets.fetch_add(1, Ordering::SeqCst);
        let mut partitions = self.partitions.lock().unwrap();
        let records = partitions.entry((port, host.to_string())).or_default();
        records.retain(|(n, r, _)| !(n.eq_ignore_ascii_case(name) && r.data == record.data));
        records.push((name.to_string(), record, ttl_ms));
    }

    fn remove(&self, port: u16, host: &str, name: &str, record: &Record) -> bool {
        let mut partitions = self.partitions.lock().unwrap();
        let Some(records) = partitions.get_mut(&(port, host.to_string())) else {
            return false;
        };
        let before = records.len();
        records.retain(|(n, r, _)| !(n.eq_ignore_ascii_case(name) && r.data == record.data));
        records.len() != before
    }

    fn reset(&self) {
        self.partitions.lock().unwrap().clear();
    }

    fn stats(&self) -> StoreStats {
        let partitions = self.partitions.lock().unwrap();
        StoreStats {
            partitions: partitions.len(),
            records: partitions.values().map(Vec::len).sum(),
        }
    }
}

/// Prober returning a canned outcome and counting invocations.
pub struct MockProber {
    outcome: Mutex<Result<Vec<(UpstreamEndpoint, u16, Vec<Record>)>, DomainError>>,
    calls: AtomicUsize,
}

impl MockProber {
    pub fn answering(answers: Vec<(UpstreamEndpoint, u16, Vec<Record>)>) -> Self {
        Self {
            outcome: Mutex::new(Ok(answers)),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn exhausted() -> Self {
        Self {
            outcome: Mutex::new(Err(DomainError::ProbeExhausted { attempted: 1 })),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UpstreamProber for MockProber {
    async fn probe(&self, query: &DnsMessage) -> Result<ProbeReport, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let outcome = self.outcome.lock().unwrap().clone()?;

        let responses = outcome
            .into_iter()
            .map(|(endpoint, port, answers)| {
                let mut response = DnsMessage::reply_to(query);
                response.answers = answers;
                EndpointAnswer {
                    endpoint,
                    port,
                    response,
                }
            })
            .collect();

        Ok(ProbeReport {
            responses,
            failed: 0,
        })
    }
}

/// Codec that hands out opaque tokens for encoded messages.
#[derive(Default)]
pub struct MockCodec {
    messages: Mutex<Vec<DnsMessage>>,
}

impl MockCodec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_encoded(&self) -> Option<DnsMessage> {
        self.messages.lock().unwrap().last().cloned()
    }
}

impl MessageCodec for MockCodec {
    fn decode(&self, bytes: &[u8]) -> Result<DnsMessage, DomainError> {
        let index = match bytes {
            [b'#', rest @ ..] => std::str::from_utf8(rest)
                .ok()
                .and_then(|s| s.parse::<usize>().ok()),
            _ => None,
        };
        index
            .and_then(|i| self.messages.lock().unwrap().get(i).cloned())
            .ok_or_else(|| DomainError::Decode("unrecognized payload".to_string()))
    }

    fn encode(&self, message: &DnsMessage) -> Result<Vec<u8>, DomainError> {
        let mut messages = self.messages.lock().unwrap();
        messages.push(message.clone());
        Ok(format!("#{}", messages.len() - 1).into_bytes())
    }

    fn encode_json(&self, message: &DnsMessage) -> Result<Vec<u8>, DomainError> {
        self.messages.lock().unwrap().push(message.clone());
        Ok(format!("{{\"answers\":{}}}", message.answers.len()).into_bytes())
    }
}
