use super::ClusterServices;
use kubezone_application::use_cases::{
    AnswerExternalQueryUseCase, ResolveExternalUseCase, TransferZoneUseCase,
};
use kubezone_domain::Config;
use kubezone_infrastructure::dns::StaticNameserverAddresses;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;

pub struct UseCases {
    pub answer_query: Arc<AnswerExternalQueryUseCase>,
    pub transfer_zone: Arc<TransferZoneUseCase>,
}

impl UseCases {
    pub fn new(
        config: &Config,
        cluster: &ClusterServices,
        shutdown: CancellationToken,
    ) -> anyhow::Result<Self> {
        info!(
            zones = ?config.external.zones,
            headless = config.external.headless,
            "Initializing external zone"
        );

        let resolver = Arc::new(ResolveExternalUseCase::new(
            cluster.index.clone(),
            cluster.namespaces.clone(),
            &config.external,
        ));
        let nameservers = Arc::new(StaticNameserverAddresses::from_config(&config.external)?);

        Ok(Self {
            answer_query: Arc::new(AnswerExternalQueryUseCase::new(
                resolver.clone(),
                nameservers.clone(),
                &config.external,
            )),
            transfer_zone: Arc::new(
                TransferZoneUseCase::new(resolver, nameservers, &config.external)
                    .with_cancellation(shutdown),
            ),
        })
    }
}
