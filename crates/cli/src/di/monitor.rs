use routewatch_application::ports::ConnectionSource;
use routewatch_application::services::{DispatchEngine, IdentityCache};
use routewatch_application::use_cases::{PollConnectionsUseCase, ResolveIdentityUseCase};
use routewatch_domain::Config;
use routewatch_infrastructure::output::ConsoleSink;
use routewatch_infrastructure::routeros::RouterOsConnectionSource;
use routewatch_infrastructure::system::{SystemHostnameResolver, WhoisCommand};
use routewatch_jobs::ConnectionMonitorJob;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

pub struct MonitorServices {
    pub cache: Arc<IdentityCache>,
    pub engine: Arc<DispatchEngine>,
    pub monitor: Arc<ConnectionMonitorJob>,
}

impl MonitorServices {
    pub fn new(
        config: &Config,
        source: Arc<dyn ConnectionSource>,
        shutdown: CancellationToken,
    ) -> Self {
        let whois_timeout = Duration::from_secs(config.resolver.whois_timeout);

        let cache = Arc::new(IdentityCache::new());
        let hostname_resolver = Arc::new(SystemHostnameResolver::new());
        let whois = Arc::new(
            WhoisCommand::new(config.resolver.whois_command.clone()).with_timeout(whois_timeout),
        );

        let resolve = Arc::new(
            ResolveIdentityUseCase::new(cache.clone(), hostname_resolver, whois)
                .with_whois_timeout(whois_timeout)
                .with_reverse_dns(config.resolver.reverse_dns),
        );

        let sink = Arc::new(ConsoleSink::stdout(config.output.format));
        let engine = Arc::new(DispatchEngine::new(
            resolve,
            sink,
            config.monitor.max_concurrency,
        ));

        let poll = Arc::new(PollConnectionsUseCase::new(source, engine.clone()));
        let monitor = Arc::new(
            ConnectionMonitorJob::new(poll)
                .with_interval(Duration::from_secs(config.monitor.poll_interval))
                .with_cancellation(shutdown),
        );

        Self {
            cache,
            engine,
            monitor,
        }
    }

    pub async fn connect_router(config: &Config) -> anyhow::Result<Arc<dyn ConnectionSource>> {
        let source = RouterOsConnectionSource::connect(config.router.clone()).await?;
        Ok(Arc::new(source))
    }
}
