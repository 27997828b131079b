//! Explicit, injectable dataset cache.
//!
//! The service owns a [`DatasetSource`] and builds the cleaned [`Dataset`] the
//! first time it is asked for one. Later calls hand out the same
//! `Arc<Dataset>`; nothing mutates it after construction, so readers need no
//! locking. [`DatasetService::invalidate`] is the only way to force a reload.

use super::{Dataset, DatasetSource, LoadError, LoadMetrics, clean};
use once_cell::sync::OnceCell;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

#[derive(Debug)]
pub struct DatasetService<S> {
    source: S,
    cached: OnceCell<Loaded>,
}

#[derive(Debug)]
struct Loaded {
    dataset: Arc<Dataset>,
    metrics: LoadMetrics,
}

impl<S: DatasetSource> DatasetService<S> {
    pub fn new(source: S) -> Self {
        DatasetService { source, cached: OnceCell::new() }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// The cleaned dataset, loading it on first use.
    ///
    /// A failed load caches nothing; the next call tries again.
    pub fn dataset(&self) -> Result<Arc<Dataset>, LoadError> {
        self.cached.get_or_try_init(|| self.load()).map(|loaded| Arc::clone(&loaded.dataset))
    }

    /// Timings of the load that produced the cached dataset, if any.
    pub fn metrics(&self) -> Option<LoadMetrics> {
        self.cached.get().map(|loaded| loaded.metrics)
    }

    pub fn is_loaded(&self) -> bool {
        self.cached.get().is_some()
    }

    /// Drop the cached dataset. Outstanding `Arc`s stay valid; the next call to
    /// [`DatasetService::dataset`] reloads from the source.
    pub fn invalidate(&mut self) {
        if self.cached.take().is_some() {
            info!("Dataset cache invalidated - source={}", self.source.describe());
        }
    }

    fn load(&self) -> Result<Loaded, LoadError> {
        let start = Instant::now();
        info!("Loading dataset - source={}", self.source.describe());

        let rows = self.source.load()?;
        let read = start.elapsed();

        let clean_start = Instant::now();
        let dataset = clean(rows);
        let clean_elapsed = clean_start.elapsed();

        let metrics = LoadMetrics { read, clean: clean_elapsed, total: start.elapsed() };
        info!(
            "Dataset ready - papers={}, read={:.2}s, clean={:.2}s",
            dataset.len(),
            metrics.read.as_secs_f32(),
            metrics.clean.as_secs_f32()
        );

        Ok(Loaded { dataset: Arc::new(dataset), metrics })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RawRecord;
    use crate::dataset::fixtures::sample_rows;
    use crate::dataset::{CsvSource, MemorySource};
    use std::cell::Cell;

    /// Counts how often the service goes back to storage.
    struct CountingSource {
        inner: MemorySource,
        loads: Cell<usize>,
    }

    impl CountingSource {
        fn new(rows: Vec<RawRecord>) -> Self {
            CountingSource { inner: MemorySource::new(rows), loads: Cell::new(0) }
        }
    }

    impl DatasetSource for CountingSource {
        fn load(&self) -> Result<Vec<RawRecord>, LoadError> {
            self.loads.set(self.loads.get() + 1);
            self.inner.load()
        }

        fn describe(&self) -> String {
            "counting".to_string()
        }
    }

    #[test]
    fn loads_once_and_shares_the_dataset() {
        let service = DatasetService::new(CountingSource::new(sample_rows()));
        assert!(!service.is_loaded());
        assert!(service.metrics().is_none());

        let first = service.dataset().unwrap();
        let second = service.dataset().unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(service.source().loads.get(), 1);
        assert_eq!(first.len(), 5);
        assert!(service.is_loaded());

        let metrics = service.metrics().unwrap();
        assert!(metrics.read <= metrics.total);
        assert!(metrics.clean <= metrics.total);
    }

    #[test]
    fn invalidate_forces_a_reload() {
        let mut service = DatasetService::new(CountingSource::new(sample_rows()));
        let before = service.dataset().unwrap();

        service.invalidate();
        assert!(!service.is_loaded());

        let after = service.dataset().unwrap();
        assert_eq!(service.source().loads.get(), 2);
        assert!(!Arc::ptr_eq(&before, &after));
        // The old handle is still usable and equal in content.
        assert_eq!(*before, *after);
    }

    #[test]
    fn failed_load_is_not_cached() {
        let service = DatasetService::new(CsvSource::new("no/such/dir/metadata.csv"));
        assert!(service.dataset().is_err());
        assert!(!service.is_loaded());
        assert!(service.dataset().is_err());
    }
}
