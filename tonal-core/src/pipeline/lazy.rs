//! Load-once backend cell.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use once_cell::sync::OnceCell;
use tracing::{error, info};

use crate::error::LoadError;

type Loader<T> = Box<dyn Fn() -> Result<Arc<T>, LoadError> + Send + Sync>;

/// A shared resource built on first use.
///
/// Concurrent first callers block on a single initialization. The outcome
/// is kept either way: a failed load is never attempted again and every
/// later [`LazyResource::get`] returns the same error. Servers call `get`
/// once before binding and treat failure as fatal.
pub struct LazyResource<T: ?Sized> {
    name: &'static str,
    cell: OnceCell<Result<Arc<T>, Arc<LoadError>>>,
    loader: Loader<T>,
}

impl<T: ?Sized> LazyResource<T> {
    /// Defers `loader` until the first [`get`](Self::get).
    pub fn new<F>(name: &'static str, loader: F) -> Self
    where
        F: Fn() -> Result<Arc<T>, LoadError> + Send + Sync + 'static,
    {
        Self {
            name,
            cell: OnceCell::new(),
            loader: Box::new(loader),
        }
    }

    /// An already-initialized cell.
    pub fn ready(name: &'static str, value: Arc<T>) -> Self
    where
        T: Send + Sync + 'static,
    {
        let reload = Arc::clone(&value);
        Self {
            name,
            cell: OnceCell::with_value(Ok(value)),
            loader: Box::new(move || Ok(Arc::clone(&reload))),
        }
    }

    /// The resource, loading it on the first call.
    pub fn get(&self) -> Result<&Arc<T>, Arc<LoadError>> {
        self.cell
            .get_or_init(|| {
                let start = Instant::now();
                match (self.loader)() {
                    Ok(value) => {
                        info!(
                            resource = self.name,
                            elapsed_ms = start.elapsed().as_millis() as u64,
                            "initialized backend"
                        );
                        Ok(value)
                    }
                    Err(err) => {
                        error!(resource = self.name, error = %err, "backend failed to load");
                        Err(Arc::new(err))
                    }
                }
            })
            .as_ref()
            .map_err(Arc::clone)
    }

    /// Whether a load has already succeeded.
    pub fn is_initialized(&self) -> bool {
        matches!(self.cell.get(), Some(Ok(_)))
    }

    /// Whether a load was attempted and failed.
    pub fn is_failed(&self) -> bool {
        matches!(self.cell.get(), Some(Err(_)))
    }

    /// Label used in logs.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl<T: ?Sized> fmt::Debug for LazyResource<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LazyResource")
            .field("name", &self.name)
            .field("initialized", &self.is_initialized())
            .field("failed", &self.is_failed())
            .finish()
    }
}
