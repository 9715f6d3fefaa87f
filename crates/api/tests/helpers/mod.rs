#![allow(dead_code)]

use async_trait::async_trait;
use axum::Router;
use ferrous_doh_api::{create_api_routes, create_doh_routes, AppState};
use ferrous_doh_application::ports::{EndpointAnswer, ProbeReport, UpstreamProber};
use ferrous_doh_application::use_cases::{
    GetCacheStatsUseCase, HandleDohRequestUseCase, ResetCacheUseCase, ResolveQueryUseCase,
};
use ferrous_doh_domain::{DnsMessage, DomainError, Record, UpstreamEndpoint};
use ferrous_doh_infrastructure::dns::{DnsCodec, PartitionedAnswerStore};
use std::net::Ipv4Addr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

pub const ADDRESS: Ipv4Addr = Ipv4Addr::new(93, 184, 216, 34);

/// Answers every A question with `ADDRESS`, or fails when `exhausted`.
pub struct StubProber {
    endpoint: UpstreamEndpoint,
    exhausted: bool,
    calls: AtomicUsize,
}

impl StubProber {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UpstreamProber for StubProber {
    async fn probe(&self, query: &DnsMessage) -> Result<ProbeReport, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.exhausted {
            return Err(DomainError::ProbeExhausted { attempted: 1 });
        }

        let mut response = DnsMessage::reply_to(query);
        for question in &query.questions {
            response.push_answer(Record::a(question.name.clone(), 300, ADDRESS));
        }

        Ok(ProbeReport {
            responses: vec![EndpointAnswer {
                endpoint: self.endpoint.clone(),
                port: self.endpoint.primary_port,
                response,
            }],
            failed: 0,
        })
    }
}

pub fn create_app(exhausted: bool) -> (Router, Arc<StubProber>) {
    let endpoint: UpstreamEndpoint = "10.0.0.1".parse().unwrap();
    let prober = Arc::new(StubProber {
        endpoint: endpoint.clone(),
        exhausted,
        calls: AtomicUsize::new(0),
    });
    let store = Arc::new(PartitionedAnswerStore::new(64));
    let resolver = Arc::new(ResolveQueryUseCase::new(
        vec![endpoint],
        store.clone(),
        prober.clone(),
    ));

    let state = AppState {
        handle_doh: Arc::new(HandleDohRequestUseCase::new(
            resolver,
            Arc::new(DnsCodec::new()),
        )),
        get_cache_stats: Arc::new(GetCacheStatsUseCase::new(store.clone())),
        reset_cache: Arc::new(ResetCacheUseCase::new(store)),
        upstream_count: 1,
    };

    let app = Router::new()
        .merge(create_doh_routes(state.clone()))
        .nest("/api", create_api_routes(state));

    (app, prober)
}
