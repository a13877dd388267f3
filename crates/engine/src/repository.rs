// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Persistence adapter for flight plans.

use async_trait::async_trait;
use fp_core::{Event, ExecutionProgress, FlightPlan, FlightPlanId};
use fp_storage::{StorageError, Store};
use parking_lot::Mutex;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("persistence task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Durable home of flight plans.
#[async_trait]
pub trait FlightPlanRepository: Clone + Send + Sync + 'static {
    async fn save(&self, plan: &FlightPlan) -> Result<(), RepositoryError>;

    /// Record run progress without rewriting the whole plan.
    async fn save_progress(
        &self,
        id: &FlightPlanId,
        progress: &ExecutionProgress,
        at_ms: u64,
    ) -> Result<(), RepositoryError>;

    async fn delete(&self, id: &FlightPlanId) -> Result<(), RepositoryError>;

    /// Look up by ID or unique ID prefix.
    async fn load(&self, id: &str) -> Result<Option<FlightPlan>, RepositoryError>;

    async fn list(&self) -> Result<Vec<FlightPlan>, RepositoryError>;
}

/// Repository backed by the on-disk [`Store`].
#[derive(Clone)]
pub struct StoreRepository {
    store: Arc<Mutex<Store>>,
}

impl StoreRepository {
    pub fn new(store: Store) -> Self {
        Self { store: Arc::new(Mutex::new(store)) }
    }

    /// Append on the blocking pool; WAL writes fsync.
    async fn record(&self, event: Event) -> Result<(), RepositoryError> {
        let store = Arc::clone(&self.store);
        tokio::task::spawn_blocking(move || store.lock().apply(&event)).await??;
        Ok(())
    }

    /// Snapshot the store and truncate its WAL.
    pub async fn checkpoint(&self) -> Result<(), RepositoryError> {
        let store = Arc::clone(&self.store);
        tokio::task::spawn_blocking(move || store.lock().checkpoint()).await??;
        Ok(())
    }
}

#[async_trait]
impl FlightPlanRepository for StoreRepository {
    async fn save(&self, plan: &FlightPlan) -> Result<(), RepositoryError> {
        self.record(Event::FlightPlanSaved { flight_plan: Box::new(plan.clone()) }).await
    }

    async fn save_progress(
        &self,
        id: &FlightPlanId,
        progress: &ExecutionProgress,
        at_ms: u64,
    ) -> Result<(), RepositoryError> {
        self.record(Event::FlightPlanProgress { id: id.clone(), progress: progress.clone(), at_ms })
            .await
    }

    async fn delete(&self, id: &FlightPlanId) -> Result<(), RepositoryError> {
        self.record(Event::FlightPlanDeleted { id: id.clone() }).await
    }

    async fn load(&self, id: &str) -> Result<Option<FlightPlan>, RepositoryError> {
        Ok(self.store.lock().state().get_flight_plan(id).cloned())
    }

    async fn list(&self) -> Result<Vec<FlightPlan>, RepositoryError> {
        Ok(self.store.lock().state().all_flight_plans().into_iter().cloned().collect())
    }
}

#[cfg(any(test, feature = "test-support"))]
mod fake {
    use super::{FlightPlanRepository, RepositoryError};
    use async_trait::async_trait;
    use fp_core::{ExecutionProgress, FlightPlan, FlightPlanId};
    use parking_lot::Mutex;
    use std::collections::HashMap;
    use std::sync::Arc;

    /// Recorded repository call
    #[derive(Debug, Clone, PartialEq)]
    pub enum RepositoryCall {
        Save(FlightPlanId),
        SaveProgress(FlightPlanId, usize),
        Delete(FlightPlanId),
    }

    #[derive(Default)]
    struct FakeRepositoryState {
        plans: HashMap<FlightPlanId, FlightPlan>,
        calls: Vec<RepositoryCall>,
        fail_writes: bool,
    }

    /// In-memory repository for tests
    #[derive(Clone, Default)]
    pub struct FakeRepository {
        inner: Arc<Mutex<FakeRepositoryState>>,
    }

    impl FakeRepository {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn calls(&self) -> Vec<RepositoryCall> {
            self.inner.lock().calls.clone()
        }

        pub fn stored(&self, id: &str) -> Option<FlightPlan> {
            self.inner.lock().plans.get(id).cloned()
        }

        pub fn insert(&self, plan: FlightPlan) {
            self.inner.lock().plans.insert(plan.id.clone(), plan);
        }

        /// Make every write fail until reset.
        pub fn set_fail_writes(&self, fail: bool) {
            self.inner.lock().fail_writes = fail;
        }

        fn write(
            &self,
            call: RepositoryCall,
            f: impl FnOnce(&mut HashMap<FlightPlanId, FlightPlan>),
        ) -> Result<(), RepositoryError> {
            let mut inner = self.inner.lock();
            inner.calls.push(call);
            if inner.fail_writes {
                return Err(RepositoryError::Unavailable("injected failure".to_string()));
            }
            f(&mut inner.plans);
            Ok(())
        }
    }

    #[async_trait]
    impl FlightPlanRepository for FakeRepository {
        async fn save(&self, plan: &FlightPlan) -> Result<(), RepositoryError> {
            let plan = plan.clone();
            self.write(RepositoryCall::Save(plan.id.clone()), |plans| {
                plans.insert(plan.id.clone(), plan);
            })
        }

        async fn save_progress(
            &self,
            id: &FlightPlanId,
            progress: &ExecutionProgress,
            at_ms: u64,
        ) -> Result<(), RepositoryError> {
            let call = RepositoryCall::SaveProgress(id.clone(), progress.last_item_executed);
            self.write(call, |plans| {
                if let Some(plan) = plans.get_mut(id) {
                    if progress.last_item_executed >= plan.progress.last_item_executed {
                        plan.progress = progress.clone();
                        plan.last_update_ms = at_ms;
                    }
                }
            })
        }

        async fn delete(&self, id: &FlightPlanId) -> Result<(), RepositoryError> {
            self.write(RepositoryCall::Delete(id.clone()), |plans| {
                plans.remove(id);
            })
        }

        async fn load(&self, id: &str) -> Result<Option<FlightPlan>, RepositoryError> {
            Ok(self.stored(id))
        }

        async fn list(&self) -> Result<Vec<FlightPlan>, RepositoryError> {
            Ok(self.inner.lock().plans.values().cloned().collect())
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeRepository, RepositoryCall};

#[cfg(test)]
#[path = "repository_tests.rs"]
mod tests;
