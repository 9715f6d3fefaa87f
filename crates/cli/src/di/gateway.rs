use crate::server::spawn_event_logger;
use ferrous_doh_api::AppState;
use ferrous_doh_application::events::GatewayEventEmitter;
use ferrous_doh_application::ports::{AnswerStore, MessageCodec, UpstreamProber};
use ferrous_doh_application::use_cases::{
    GetCacheStatsUseCase, HandleDohRequestUseCase, ResetCacheUseCase, ResolveQueryUseCase,
};
use ferrous_doh_domain::Config;
use ferrous_doh_infrastructure::dns::{
    DnsCodec, FailoverProber, NetworkExchange, PartitionedAnswerStore,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

pub struct GatewayServices {
    pub app_state: AppState,
}

impl GatewayServices {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let endpoints = config.endpoints()?;
        if endpoints.is_empty() {
            warn!("No upstream servers configured; every query will fail with SERVFAIL");
        }

        for endpoint in &endpoints {
            info!(
                host = %endpoint.host,
                primary_port = endpoint.primary_port,
                secondary_port = ?endpoint.secondary_port,
                "Upstream registered"
            );
        }

        let emitter = Self::setup_event_logger();

        let store: Arc<dyn AnswerStore> =
            Arc::new(PartitionedAnswerStore::new(config.cache.max_entries));

        let exchange = Arc::new(
            NetworkExchange::new(Duration::from_millis(config.upstream.timeout_ms))
                .with_events(emitter.clone()),
        );
        let prober: Arc<dyn UpstreamProber> = Arc::new(
            FailoverProber::new(endpoints.clone(), exchange).with_events(emitter.clone()),
        );
        let codec: Arc<dyn MessageCodec> = Arc::new(DnsCodec::new());

        let upstream_count = endpoints.len();
        let resolver = Arc::new(ResolveQueryUseCase::new(endpoints, store.clone(), prober));

        info!(
            upstreams = upstream_count,
            max_entries = config.cache.max_entries,
            timeout_ms = config.upstream.timeout_ms,
            "Gateway services initialized"
        );

        Ok(Self {
            app_state: AppState {
                handle_doh: Arc::new(
                    HandleDohRequestUseCase::new(resolver, codec).with_events(emitter),
                ),
                get_cache_stats: Arc::new(GetCacheStatsUseCase::new(store.clone())),
                reset_cache: Arc::new(ResetCacheUseCase::new(store)),
                upstream_count,
            },
        })
    }

    fn setup_event_logger() -> GatewayEventEmitter {
        if tracing::enabled!(tracing::Level::DEBUG) {
            let (emitter, rx) = GatewayEventEmitter::new_enabled();
            spawn_event_logger(rx);
            emitter
        } else {
            GatewayEventEmitter::new_disabled()
        }
    }
}
