use crate::ports::NameserverAddressProvider;
use crate::services::record_builder::parse_name;
use crate::services::{RecordBuilder, SrvDedup};
use crate::use_cases::external::ResolveExternalUseCase;
use hickory_proto::rr::Record;
use kubezone_domain::{zone, DomainError, ExternalConfig, ServiceRecord, Zones};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio_util::sync::{CancellationToken, DropGuard};
use tracing::{debug, info, warn};

/// Batches queued ahead of the consumer before the producer blocks.
const TRANSFER_QUEUE_DEPTH: usize = 2;

/// Ordered batches of a zone transfer.
///
/// The first batch is always the SOA. Dropping the stream stops the
/// producer task.
pub struct TransferStream {
    receiver: mpsc::Receiver<Vec<Record>>,
    _cancel_on_drop: DropGuard,
}

impl TransferStream {
    /// Next batch, or `None` once the transfer is complete.
    pub async fn next_batch(&mut self) -> Option<Vec<Record>> {
        self.receiver.recv().await
    }

    /// Drain the whole transfer.
    pub async fn collect(mut self) -> Vec<Vec<Record>> {
        let mut batches = Vec::new();
        while let Some(batch) = self.next_batch().await {
            batches.push(batch);
        }
        batches
    }
}

pub struct TransferZoneUseCase {
    resolver: Arc<ResolveExternalUseCase>,
    nameservers: Arc<dyn NameserverAddressProvider>,
    builder: Arc<RecordBuilder>,
    zones: Zones,
    headless: bool,
    shutdown: CancellationToken,
}

impl TransferZoneUseCase {
    pub fn new(
        resolver: Arc<ResolveExternalUseCase>,
        nameservers: Arc<dyn NameserverAddressProvider>,
        config: &ExternalConfig,
    ) -> Self {
        Self {
            resolver,
            nameservers,
            builder: Arc::new(RecordBuilder::new(config)),
            zones: config.served_zones(),
            headless: config.headless,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    /// Start a transfer of `zone`.
    ///
    /// A non-zero `requested_serial` at or above the current serial yields a
    /// stream holding only the SOA. Must be called from within a Tokio
    /// runtime.
    pub fn execute(&self, zone: &str, requested_serial: u32) -> Result<TransferStream, DomainError> {
        let zone = zone::normalize(zone);
        if self.zones.matches(&zone) != Some(zone.as_str()) {
            return Err(DomainError::NotAuthoritative(zone));
        }

        let serial = self.resolver.serial();
        let soa = self.builder.soa_record(&zone, serial)?;

        let (tx, receiver) = mpsc::channel(TRANSFER_QUEUE_DEPTH);
        let token = self.shutdown.child_token();
        let stream = TransferStream {
            receiver,
            _cancel_on_drop: token.clone().drop_guard(),
        };

        // Capacity is at least one, so the first batch always fits.
        if tx.try_send(vec![soa.clone()]).is_err() {
            return Ok(stream);
        }

        if requested_serial != 0 && requested_serial >= serial {
            debug!(zone = %zone, serial, requested_serial, "Transfer requester is up to date");
            return Ok(stream);
        }

        info!(zone = %zone, serial, "Starting zone transfer");

        let producer = TransferProducer {
            resolver: Arc::clone(&self.resolver),
            nameservers: Arc::clone(&self.nameservers),
            builder: Arc::clone(&self.builder),
            headless: self.headless,
            zone,
            soa,
            tx,
            token,
        };
        tokio::spawn(producer.run());

        Ok(stream)
    }
}

struct TransferProducer {
    resolver: Arc<ResolveExternalUseCase>,
    nameservers: Arc<dyn NameserverAddressProvider>,
    builder: Arc<RecordBuilder>,
    headless: bool,
    zone: String,
    soa: Record,
    tx: mpsc::Sender<Vec<Record>>,
    token: CancellationToken,
}

impl TransferProducer {
    async fn run(self) {
        match self.produce().await {
            Some(batches) => {
                debug!(zone = %self.zone, batches, "Zone transfer complete");
            }
            None => {
                debug!(zone = %self.zone, "Zone transfer abandoned");
            }
        }
    }

    /// Returns the number of batches sent, or `None` if the consumer went
    /// away first.
    async fn produce(&self) -> Option<usize> {
        let mut sent = 1;

        let ns = match self.builder.ns_record(&self.zone) {
            Ok(ns) => ns,
            Err(e) => {
                warn!(zone = %self.zone, error = %e, "Cannot build NS record");
                return None;
            }
        };
        self.send(vec![ns]).await?;
        sent += 1;

        let ns_name = parse_name(&self.builder.nameserver_name(&self.zone)).ok()?;
        for mut record in self.nameservers.nameserver_addresses(&self.zone, self.headless) {
            record.set_name(ns_name.clone());
            record.set_ttl(self.builder.ttl());
            self.send(vec![record]).await?;
            sent += 1;
        }

        let entries = self.enumerate().await?;

        let mut dedup = SrvDedup::new();
        for entry in entries {
            let domain = entry.domain();
            let owner = match parse_name(&domain) {
                Ok(owner) => owner,
                Err(e) => {
                    debug!(error = %e, "Skipping record with invalid owner");
                    continue;
                }
            };
            let single = std::slice::from_ref(&entry);

            if entry.target_strip == 0 {
                let a = self.builder.a_records(&owner, single);
                if !a.is_empty() {
                    self.send(a).await?;
                    sent += 1;
                }
                let aaaa = self.builder.aaaa_records(&owner, single);
                if !aaaa.is_empty() {
                    self.send(aaaa).await?;
                    sent += 1;
                }
            }

            let (srv, _) = self.builder.srv_records(&owner, single);
            for record in srv {
                if dedup.first_seen(&record) {
                    self.send(vec![record]).await?;
                    sent += 1;
                }
            }
        }

        self.send(vec![self.soa.clone()]).await?;
        Some(sent + 1)
    }

    /// Zone-wide enumeration runs on the blocking pool.
    async fn enumerate(&self) -> Option<Vec<ServiceRecord>> {
        let resolver = Arc::clone(&self.resolver);
        let zone = self.zone.clone();
        let headless = self.headless;
        let task =
            tokio::task::spawn_blocking(move || resolver.external_services(&zone, headless));

        tokio::select! {
            biased;
            _ = self.token.cancelled() => None,
            result = task => match result {
                Ok(entries) => Some(entries),
                Err(e) => {
                    warn!(zone = %self.zone, error = %e, "Zone enumeration failed");
                    None
                }
            },
        }
    }

    async fn send(&self, batch: Vec<Record>) -> Option<()> {
        tokio::select! {
            biased;
            _ = self.token.cancelled() => None,
            result = self.tx.send(batch) => result.ok(),
        }
    }
}
