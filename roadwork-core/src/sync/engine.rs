use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use crate::error::Result;
use crate::model::{Namespace, SyncSet};
use crate::sync::conflict::{resolve, Resolution};
use crate::traits::clock::Clock;
use crate::traits::storage::RecordStore;

/// Per-outcome record counts of one merge.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeReport {
    pub accepted: usize,
    pub server_wins: usize,
    pub client_wins: usize,
    pub overwritten: usize,
    pub unchanged: usize,
    /// Incoming records with no stored counterpart.
    pub adopted: usize,
    /// Stored records the client did not send back; they are not kept.
    pub dropped: usize,
}

impl MergeReport {
    fn record(&mut self, resolution: Resolution) {
        match resolution {
            Resolution::Accepted => self.accepted += 1,
            Resolution::ServerWins => self.server_wins += 1,
            Resolution::ClientWins => self.client_wins += 1,
            Resolution::Overwritten => self.overwritten += 1,
            Resolution::Unchanged => self.unchanged += 1,
        }
    }
}

/// The reconciled set and what happened to get there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOutcome {
    pub merged: SyncSet,
    pub report: MergeReport,
}

/// Merge a client's set into the stored one.
///
/// The result always holds exactly the incoming ids: stored records the client
/// omitted are dropped. Every record that gets a fresh server timestamp gets
/// the same `now`, and no record leaves the merge dirty.
pub fn merge_sets(existing: &SyncSet, mut incoming: SyncSet, now: i64) -> MergeOutcome {
    let mut report = MergeReport::default();

    for (id, stored) in existing {
        let Some(record) = incoming.get_mut(id) else {
            report.dropped += 1;
            continue;
        };

        let resolution = resolve(stored, record);
        debug!(
            id = %id,
            ?resolution,
            stored_status = %stored.status,
            incoming_status = %record.status,
            "record resolved"
        );

        if resolution.takes_server_value() {
            record.status = stored.status;
            record.stamp(stored.server_update_time);
        } else if resolution.takes_new_timestamp() {
            record.stamp(now);
        }
        record.dirty = false;
        report.record(resolution);
    }

    for (id, record) in incoming.iter() {
        if !existing.contains(id) {
            report.adopted += 1;
            debug!(id = %id, dirty = record.dirty, "record adopted");
        }
    }
    for record in incoming.records_mut() {
        record.dirty = false;
    }

    MergeOutcome {
        merged: incoming,
        report,
    }
}

/// How the engine reacts to store failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReconcileOptions {
    /// Return load errors instead of merging against an empty set.
    pub fail_on_load_error: bool,
    /// Return save errors instead of handing back the unsaved merge.
    pub fail_on_save_error: bool,
}

impl Default for ReconcileOptions {
    fn default() -> Self {
        Self {
            fail_on_load_error: false,
            fail_on_save_error: true,
        }
    }
}

/// Load, merge and save, one namespace at a time.
pub struct Reconciler {
    store: Arc<dyn RecordStore>,
    clock: Arc<dyn Clock>,
    options: ReconcileOptions,
    locks: DashMap<Namespace, Arc<Mutex<()>>>,
}

impl Reconciler {
    pub fn new(store: Arc<dyn RecordStore>, clock: Arc<dyn Clock>) -> Self {
        Self::with_options(store, clock, ReconcileOptions::default())
    }

    pub fn with_options(
        store: Arc<dyn RecordStore>,
        clock: Arc<dyn Clock>,
        options: ReconcileOptions,
    ) -> Self {
        Self {
            store,
            clock,
            options,
            locks: DashMap::new(),
        }
    }

    /// Reconcile `incoming` for `namespace`, stamping with the clock's current time.
    pub async fn reconcile(&self, namespace: &Namespace, incoming: SyncSet) -> Result<SyncSet> {
        let lock = self.namespace_lock(namespace);
        let _guard = lock.lock().await;

        // Read under the lock so later calls never stamp an earlier time.
        let now = self.clock.now_millis()?;
        self.reconcile_locked(namespace, incoming, now).await
    }

    /// Same as [`Reconciler::reconcile`] with an explicit timestamp.
    pub async fn reconcile_at(
        &self,
        namespace: &Namespace,
        incoming: SyncSet,
        now: i64,
    ) -> Result<SyncSet> {
        let lock = self.namespace_lock(namespace);
        let _guard = lock.lock().await;
        self.reconcile_locked(namespace, incoming, now).await
    }

    fn namespace_lock(&self, namespace: &Namespace) -> Arc<Mutex<()>> {
        self.locks.entry(namespace.clone()).or_default().clone()
    }

    async fn reconcile_locked(
        &self,
        namespace: &Namespace,
        incoming: SyncSet,
        now: i64,
    ) -> Result<SyncSet> {
        info!(
            team = namespace.team(),
            service = namespace.service(),
            records = incoming.len(),
            dirty = incoming.dirty_count(),
            "reconcile"
        );

        let existing = self.load_existing(namespace).await?;
        let MergeOutcome { merged, report } = merge_sets(&existing, incoming, now);

        info!(
            team = namespace.team(),
            service = namespace.service(),
            accepted = report.accepted,
            server_wins = report.server_wins,
            client_wins = report.client_wins,
            overwritten = report.overwritten,
            unchanged = report.unchanged,
            adopted = report.adopted,
            dropped = report.dropped,
            "merge complete"
        );

        if let Err(e) = self.store.save(namespace, &merged).await {
            if self.options.fail_on_save_error {
                return Err(e);
            }
            error!(namespace = %namespace, error = %e, "save failed, returning unsaved merge");
        }

        Ok(merged)
    }

    async fn load_existing(&self, namespace: &Namespace) -> Result<SyncSet> {
        match self.store.load(namespace).await {
            Ok(Some(set)) => Ok(set),
            Ok(None) => {
                debug!(namespace = %namespace, "nothing stored yet");
                Ok(SyncSet::new())
            }
            Err(e) if self.options.fail_on_load_error => Err(e),
            Err(e) => {
                warn!(namespace = %namespace, error = %e, "load failed, merging against empty set");
                Ok(SyncSet::new())
            }
        }
    }
}
