//! Receivers: per-endpoint fan-out fetchers and aggregators.
//!
//! A [`Receiver`] owns a fixed slot array sized from the list endpoint's
//! `count`, a completion barrier and the relation rows derived after all
//! fetches have finished. [`Aggregator`] is the one implementation; the entity
//! specific parts (endpoint, wire type, record construction, relation
//! projection) live behind [`EntityKind`].
//!
//! Lifecycle:
//!
//! ```text
//! uninitialized --init--> initialized --add_worker--> fetching
//!     --wait--> aggregated --post_process--> post-processed
//! ```
//!
//! CSV accessors return [`Error::InvalidState`] until the receiver is
//! post-processed.

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::client::ApiClient;
use crate::error::{Error, Result};
use crate::export::CsvEntry;
use crate::wait_group::WaitGroup;

pub mod ability;
pub mod moves;
pub mod pokemon;


pub use ability::{AbilityEntry, AbilityKind, AbilityRelation, AbilityResponse};
pub use moves::{MoveEntry, MoveKind, MoveResponse};
pub use pokemon::{MoveRelation, PokemonEntry, PokemonKind, PokemonResponse};

/// Receiver for the `pokemon` endpoint
pub type PokemonReceiver = Aggregator<PokemonKind>;
/// Receiver for the `move` endpoint
pub type MovesReceiver = Aggregator<MoveKind>;
/// Receiver for the `ability` endpoint
pub type AbilityReceiver = Aggregator<AbilityKind>;

/// Where a receiver is in its lifecycle
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReceiverState {
    /// Slot array not allocated yet
    Uninitialized,
    /// Slot array allocated, no workers registered
    Initialized,
    /// Workers registered and running
    Fetching,
    /// Every registered worker has signalled completion
    Aggregated,
    /// Relations derived; CSV accessors are available
    PostProcessed,
}

impl fmt::Display for ReceiverState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ReceiverState::Uninitialized => "uninitialized",
            ReceiverState::Initialized => "initialized",
            ReceiverState::Fetching => "fetching",
            ReceiverState::Aggregated => "aggregated",
            ReceiverState::PostProcessed => "post-processed",
        };
        f.write_str(s)
    }
}

/// Relation type for kinds that derive no relation rows
#[derive(Debug)]
pub enum NoRelation {}

impl CsvEntry for NoRelation {
    fn header(&self) -> Vec<&'static str> {
        match *self {}
    }

    fn to_row(&self) -> Vec<String> {
        match *self {}
    }
}

/// The entity-specific half of a receiver
pub trait EntityKind: Send + Sync + 'static {
    /// List endpoint, relative to the API base URL
    const ENDPOINT: &'static str;

    /// Detail response as decoded from the API
    type Response: DeserializeOwned + Send + 'static;

    /// Normalized record stored in a slot
    type Record: CsvEntry + 'static;

    /// Join row derived from a record's references
    type Relation: CsvEntry + 'static;

    /// Build a record from a detail response, resolving localized text for `lang`
    fn build(response: Self::Response, lang: &str) -> Self::Record;

    /// Project a record's references into join rows, in reference order
    fn relations(record: &Self::Record) -> Vec<Self::Relation>;
}

/// Capability shared by every receiver, so the orchestrator can drive them uniformly
#[async_trait]
pub trait Receiver: Send {
    /// List endpoint this receiver fetches
    fn endpoint(&self) -> &'static str;

    /// Current lifecycle state
    fn state(&self) -> ReceiverState;

    /// Allocate `count` empty slots. Must precede any fetch.
    fn init(&mut self, count: usize) -> Result<()>;

    /// Register one outstanding fetch with the completion barrier.
    ///
    /// Call once per fetch, before [`Receiver::fetch_entries`] for it.
    fn add_worker(&mut self) -> Result<()>;

    /// Spawn a task that fetches `url`, builds the record for `lang` and
    /// stores it in slot `index`. Returns as soon as the task is spawned.
    ///
    /// The task signals the barrier whether or not the fetch succeeds; a
    /// failed fetch leaves its slot empty.
    fn fetch_entries(&mut self, url: String, lang: &str, index: usize) -> Result<()>;

    /// Wait for every registered fetch to signal completion
    async fn wait(&mut self) -> Result<()>;

    /// Derive relation rows from the populated slots. Idempotent.
    fn post_process(&mut self) -> Result<()>;

    /// Populated records in slot order
    fn csv_entries(&self) -> Result<Vec<&dyn CsvEntry>>;

    /// Derived relation rows in slot order, then reference order
    fn csv_relations(&self) -> Result<Vec<&dyn CsvEntry>>;

    /// Number of slots holding a record
    fn fetched(&self) -> usize;

    /// Number of fetches that failed so far
    fn failed(&self) -> usize;
}

/// Generic receiver for one [`EntityKind`]
pub struct Aggregator<K: EntityKind> {
    client: ApiClient,
    state: ReceiverState,
    slots: Arc<[OnceLock<K::Record>]>,
    workers: WaitGroup,
    failures: Arc<AtomicUsize>,
    relations: Vec<K::Relation>,
}

impl<K: EntityKind> Aggregator<K> {
    /// Create an uninitialized receiver that fetches through `client`
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            state: ReceiverState::Uninitialized,
            slots: Arc::from(Vec::new()),
            workers: WaitGroup::new(),
            failures: Arc::new(AtomicUsize::new(0)),
            relations: Vec::new(),
        }
    }

    /// Number of allocated slots
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether no slots are allocated
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Populated records in slot order
    pub fn entries(&self) -> Result<Vec<&K::Record>> {
        self.require_post_processed("read entries")?;
        Ok(self.records().collect())
    }

    /// Derived relation rows
    pub fn relations(&self) -> Result<&[K::Relation]> {
        self.require_post_processed("read relations")?;
        Ok(&self.relations)
    }

    fn records(&self) -> impl Iterator<Item = &K::Record> {
        self.slots.iter().filter_map(OnceLock::get)
    }

    fn invalid_state(&self, operation: &'static str) -> Error {
        Error::InvalidState {
            endpoint: K::ENDPOINT,
            operation,
            state: self.state.to_string(),
        }
    }

    fn require_post_processed(&self, operation: &'static str) -> Result<()> {
        if self.state == ReceiverState::PostProcessed {
            Ok(())
        } else {
            Err(self.invalid_state(operation))
        }
    }
}

#[async_trait]
impl<K: EntityKind> Receiver for Aggregator<K> {
    fn endpoint(&self) -> &'static str {
        K::ENDPOINT
    }

    fn state(&self) -> ReceiverState {
        self.state
    }

    fn init(&mut self, count: usize) -> Result<()> {
        if self.state != ReceiverState::Uninitialized {
            return Err(self.invalid_state("init"));
        }

        self.slots = (0..count).map(|_| OnceLock::new()).collect();
        self.state = ReceiverState::Initialized;
        debug!(endpoint = K::ENDPOINT, count, "Allocated slots");
        Ok(())
    }

    fn add_worker(&mut self) -> Result<()> {
        match self.state {
            ReceiverState::Initialized | ReceiverState::Fetching => {
                self.workers.add();
                self.state = ReceiverState::Fetching;
                Ok(())
            }
            _ => Err(self.invalid_state("add worker")),
        }
    }

    fn fetch_entries(&mut self, url: String, lang: &str, index: usize) -> Result<()> {
        if self.state != ReceiverState::Fetching {
            return Err(self.invalid_state("fetch entries"));
        }

        let done = self.workers.done_guard();
        if index >= self.slots.len() {
            return Err(Error::SlotOutOfRange {
                endpoint: K::ENDPOINT,
                index,
                len: self.slots.len(),
            });
        }

        let client = self.client.clone();
        let slots = Arc::clone(&self.slots);
        let failures = Arc::clone(&self.failures);
        let lang = lang.to_string();

        tokio::spawn(async move {
            let _done = done;

            match client.fetch::<K::Response>(&url).await {
                Ok(response) => {
                    let record = K::build(response, &lang);
                    if slots[index].set(record).is_err() {
                        warn!(endpoint = K::ENDPOINT, index, "Slot already populated");
                    }
                }
                Err(e) => {
                    failures.fetch_add(1, Ordering::Relaxed);
                    warn!(
                        endpoint = K::ENDPOINT,
                        index,
                        url = %url,
                        error_code = e.error_code(),
                        error = %e,
                        "Fetch failed, leaving slot empty"
                    );
                }
            }
        });

        Ok(())
    }

    async fn wait(&mut self) -> Result<()> {
        if self.state == ReceiverState::Uninitialized {
            return Err(self.invalid_state("wait"));
        }

        self.workers.wait().await;

        if matches!(
            self.state,
            ReceiverState::Initialized | ReceiverState::Fetching
        ) {
            self.state = ReceiverState::Aggregated;
            let failed = self.failures.load(Ordering::Relaxed);
            info!(
                endpoint = K::ENDPOINT,
                fetched = self.fetched(),
                failed,
                slots = self.slots.len(),
                "Fetched entries"
            );
            if failed > 0 {
                warn!(
                    endpoint = K::ENDPOINT,
                    failed, "Some entries could not be fetched and will be missing from the output"
                );
            }
        }

        Ok(())
    }

    fn post_process(&mut self) -> Result<()> {
        match self.state {
            ReceiverState::Aggregated | ReceiverState::PostProcessed => {}
            _ => return Err(self.invalid_state("post-process")),
        }

        let relations: Vec<K::Relation> = self.records().flat_map(K::relations).collect();
        debug!(
            endpoint = K::ENDPOINT,
            relations = relations.len(),
            "Derived relations"
        );
        self.relations = relations;
        self.state = ReceiverState::PostProcessed;
        Ok(())
    }

    fn csv_entries(&self) -> Result<Vec<&dyn CsvEntry>> {
        self.require_post_processed("read csv entries")?;
        Ok(self
            .records()
            .map(|record| record as &dyn CsvEntry)
            .collect())
    }

    fn csv_relations(&self) -> Result<Vec<&dyn CsvEntry>> {
        self.require_post_processed("read csv relations")?;
        Ok(self
            .relations
            .iter()
            .map(|relation| relation as &dyn CsvEntry)
            .collect())
    }

    fn fetched(&self) -> usize {
        self.slots.iter().filter(|slot| slot.get().is_some()).count()
    }

    fn failed(&self) -> usize {
        self.failures.load(Ordering::Relaxed)
    }
}
