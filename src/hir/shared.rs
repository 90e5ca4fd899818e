//! Thread-shareable handle around one [`Analyzer`].

use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::analyzer::Analyzer;
use super::config::AnalyzerConfig;

/// Cloneable handle for hosts that serve requests from several threads.
///
/// Readers run concurrently; updates take the write lock, so an update is
/// never observed half-applied.
#[derive(Clone, Debug, Default)]
pub struct SharedAnalyzer {
    inner: Arc<RwLock<Analyzer>>,
}

impl SharedAnalyzer {
    pub fn new(config: AnalyzerConfig) -> Self {
        Self::from_analyzer(Analyzer::new(config))
    }

    pub fn from_analyzer(analyzer: Analyzer) -> Self {
        Self {
            inner: Arc::new(RwLock::new(analyzer)),
        }
    }

    pub fn read(&self) -> RwLockReadGuard<'_, Analyzer> {
        self.inner.read()
    }

    pub fn write(&self) -> RwLockWriteGuard<'_, Analyzer> {
        self.inner.write()
    }

    /// Run a query under the read lock.
    pub fn with<R>(&self, f: impl FnOnce(&Analyzer) -> R) -> R {
        f(&self.inner.read())
    }

    /// Run an update under the write lock.
    pub fn update<R>(&self, f: impl FnOnce(&mut Analyzer) -> R) -> R {
        f(&mut self.inner.write())
    }
}
