use std::future::Future;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::entity::Entity;
use crate::error::{ServiceError, StorageError};

/// Persistence primitives for one entity type.
pub trait StorageBroker<E: Entity>: Send + Sync {
    fn insert(&self, entity: E) -> impl Future<Output = Result<E, StorageError>> + Send;

    /// Returns `Ok(None)` when no record has this key.
    fn select_by_id(
        &self,
        key: E::Key,
    ) -> impl Future<Output = Result<Option<E>, StorageError>> + Send;

    fn select_all(&self) -> impl Future<Output = Result<Vec<E>, StorageError>> + Send;

    fn update(&self, entity: E) -> impl Future<Output = Result<E, StorageError>> + Send;

    fn delete(&self, entity: E) -> impl Future<Output = Result<E, StorageError>> + Send;
}

/// Severity-leveled log sinks. Fire and forget.
pub trait LoggingBroker: Send + Sync {
    fn log_error(&self, error: &ServiceError);

    fn log_critical(&self, error: &ServiceError);

    fn log_warning(&self, message: &str);
}

/// Source of the current time.
pub trait ClockBroker: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// The three broker handles a service works through.
pub struct Brokers<S, L, C> {
    pub storage: Arc<S>,
    pub logging: Arc<L>,
    pub clock: Arc<C>,
}

impl<S, L, C> Brokers<S, L, C> {
    pub fn new(storage: Arc<S>, logging: Arc<L>, clock: Arc<C>) -> Self {
        Self {
            storage,
            logging,
            clock,
        }
    }
}

impl<S, L, C> Clone for Brokers<S, L, C> {
    fn clone(&self) -> Self {
        Self {
            storage: self.storage.clone(),
            logging: self.logging.clone(),
            clock: self.clock.clone(),
        }
    }
}

/// Logging broker backed by `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLoggingBroker;

impl LoggingBroker for TracingLoggingBroker {
    fn log_error(&self, error: &ServiceError) {
        tracing::error!(entity = error.entity(), cause = %error.cause(), "{}", error);
    }

    fn log_critical(&self, error: &ServiceError) {
        tracing::error!(
            severity = "critical",
            entity = error.entity(),
            cause = %error.cause(),
            "{}",
            error
        );
    }

    fn log_warning(&self, message: &str) {
        tracing::warn!("{}", message);
    }
}

/// Clock broker reading the system clock.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl ClockBroker for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

// In-memory implementations for testing
#[cfg(any(test, feature = "test-utils"))]
pub mod memory {
    use super::*;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Mutex, RwLock};

    /// Which storage primitive was called.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub enum StorageOp {
        Insert,
        SelectById,
        SelectAll,
        Update,
        Delete,
    }

    /// A recorded storage call with the key it touched.
    #[derive(Debug, Clone, PartialEq)]
    pub struct StorageCall<K> {
        pub op: StorageOp,
        pub key: Option<K>,
    }

    /// In-memory storage broker that records calls and can be told to fail.
    pub struct InMemoryStorageBroker<E: Entity> {
        records: RwLock<Vec<E>>,
        calls: Mutex<Vec<StorageCall<E::Key>>>,
        failures: Mutex<HashMap<StorageOp, StorageError>>,
    }

    impl<E: Entity> Default for InMemoryStorageBroker<E> {
        fn default() -> Self {
            Self {
                records: RwLock::new(Vec::new()),
                calls: Mutex::new(Vec::new()),
                failures: Mutex::new(HashMap::new()),
            }
        }
    }

    impl<E: Entity> InMemoryStorageBroker<E> {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_records(records: Vec<E>) -> Self {
            let broker = Self::default();
            *broker.records.write().unwrap() = records;
            broker
        }

        /// Make every later call to `op` fail with `error`.
        pub fn fail_on(&self, op: StorageOp, error: StorageError) {
            self.failures.lock().unwrap().insert(op, error);
        }

        pub fn calls(&self) -> Vec<StorageCall<E::Key>> {
            self.calls.lock().unwrap().clone()
        }

        pub fn count(&self, op: StorageOp) -> usize {
            self.calls
                .lock()
                .unwrap()
                .iter()
                .filter(|c| c.op == op)
                .count()
        }

        pub fn records(&self) -> Vec<E> {
            self.records.read().unwrap().clone()
        }

        fn record(&self, op: StorageOp, key: Option<E::Key>) -> Result<(), StorageError> {
            self.calls.lock().unwrap().push(StorageCall { op, key });
            match self.failures.lock().unwrap().get(&op) {
                Some(error) => Err(error.clone()),
                None => Ok(()),
            }
        }
    }

    impl<E: Entity> StorageBroker<E> for InMemoryStorageBroker<E> {
        async fn insert(&self, entity: E) -> Result<E, StorageError> {
            let key = entity.key();
            self.record(StorageOp::Insert, Some(key))?;

            let mut records = self.records.write().unwrap();
            if records.iter().any(|r| r.key() == key) {
                return Err(StorageError::DuplicateKey(key.to_string()));
            }
            records.push(entity.clone());
            Ok(entity)
        }

        async fn select_by_id(&self, key: E::Key) -> Result<Option<E>, StorageError> {
            self.record(StorageOp::SelectById, Some(key))?;
            Ok(self
                .records
                .read()
                .unwrap()
                .iter()
                .find(|r| r.key() == key)
                .cloned())
        }

        async fn select_all(&self) -> Result<Vec<E>, StorageError> {
            self.record(StorageOp::SelectAll, None)?;
            Ok(self.records.read().unwrap().clone())
        }

        async fn update(&self, entity: E) -> Result<E, StorageError> {
            let key = entity.key();
            self.record(StorageOp::Update, Some(key))?;

            let mut records = self.records.write().unwrap();
            match records.iter_mut().find(|r| r.key() == key) {
                Some(existing) => {
                    *existing = entity.clone();
                    Ok(entity)
                }
                None => Err(StorageError::Conflict(key.to_string())),
            }
        }

        async fn delete(&self, entity: E) -> Result<E, StorageError> {
            let key = entity.key();
            self.record(StorageOp::Delete, Some(key))?;

            let mut records = self.records.write().unwrap();
            match records.iter().position(|r| r.key() == key) {
                Some(index) => Ok(records.remove(index)),
                None => Err(StorageError::Conflict(key.to_string())),
            }
        }
    }

    #[derive(Debug, Clone, PartialEq)]
    pub enum LogEntry {
        Error(ServiceError),
        Critical(ServiceError),
        Warning(String),
    }

    /// Logging broker that keeps every entry for inspection.
    #[derive(Default)]
    pub struct RecordingLoggingBroker {
        entries: Mutex<Vec<LogEntry>>,
    }

    impl RecordingLoggingBroker {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn entries(&self) -> Vec<LogEntry> {
            self.entries.lock().unwrap().clone()
        }
    }

    impl LoggingBroker for RecordingLoggingBroker {
        fn log_error(&self, error: &ServiceError) {
            self.entries
                .lock()
                .unwrap()
                .push(LogEntry::Error(error.clone()));
        }

        fn log_critical(&self, error: &ServiceError) {
            self.entries
                .lock()
                .unwrap()
                .push(LogEntry::Critical(error.clone()));
        }

        fn log_warning(&self, message: &str) {
            self.entries
                .lock()
                .unwrap()
                .push(LogEntry::Warning(message.to_string()));
        }
    }

    /// Clock frozen at one instant, counting reads.
    pub struct FixedClock {
        now: DateTime<Utc>,
        reads: AtomicUsize,
    }

    impl FixedClock {
        pub fn new(now: DateTime<Utc>) -> Self {
            Self {
                now,
                reads: AtomicUsize::new(0),
            }
        }

        pub fn reads(&self) -> usize {
            self.reads.load(Ordering::SeqCst)
        }
    }

    impl ClockBroker for FixedClock {
        fn now(&self) -> DateTime<Utc> {
            self.reads.fetch_add(1, Ordering::SeqCst);
            self.now
        }
    }

}
