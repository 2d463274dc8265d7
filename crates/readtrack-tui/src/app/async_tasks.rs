use std::future::Future;
use std::sync::Arc;

use readtrack_core::{
    CatalogBook, CreatedEntry, EntryId, EntryUpdate, LibraryEntry, LibraryService, LibraryStats,
    NewEntry, Result,
};
use tokio::runtime::Handle;
use tokio::sync::mpsc::UnboundedSender;

use crate::event::AppEvent;

/// The outcome of a background request, delivered back to the UI loop.
#[derive(Debug)]
pub enum ServiceEvent {
    LibraryLoaded(Result<Vec<LibraryEntry>>),
    StatsLoaded(Result<LibraryStats>),
    SearchFinished(Result<Vec<CatalogBook>>),
    Saved {
        submitted: NewEntry,
        result: Result<CreatedEntry>,
    },
    Updated {
        id: EntryId,
        update: EntryUpdate,
        /// Show the success notice for this kind of change.
        announce: bool,
        result: Result<()>,
    },
    Deleted {
        id: EntryId,
        result: Result<()>,
    },
}

/// Spawns library service requests on the runtime and reports each result as
/// an [`AppEvent::Service`]. Requests are independent: nothing is cancelled
/// or de-duplicated, and results arrive in completion order.
#[derive(Clone)]
pub struct TaskSpawner {
    runtime: Handle,
    service: Arc<dyn LibraryService>,
    tx: UnboundedSender<AppEvent>,
}

impl TaskSpawner {
    pub fn new(
        runtime: Handle,
        service: Arc<dyn LibraryService>,
        tx: UnboundedSender<AppEvent>,
    ) -> Self {
        Self { runtime, service, tx }
    }

    fn spawn<F, Fut>(&self, request: F)
    where
        F: FnOnce(Arc<dyn LibraryService>) -> Fut,
        Fut: Future<Output = ServiceEvent> + Send + 'static,
    {
        let fut = request(Arc::clone(&self.service));
        let tx = self.tx.clone();
        self.runtime.spawn(async move {
            let event = fut.await;
            // The UI may already be gone on shutdown.
            let _ = tx.send(AppEvent::Service(event));
        });
    }

    pub fn load_library(&self) {
        self.spawn(|service| async move {
            ServiceEvent::LibraryLoaded(service.list_books().await)
        });
    }

    pub fn refresh_stats(&self) {
        self.spawn(|service| async move { ServiceEvent::StatsLoaded(service.stats().await) });
    }

    pub fn search(&self, query: String) {
        self.spawn(|service| async move {
            ServiceEvent::SearchFinished(service.search(&query).await)
        });
    }

    pub fn save(&self, submitted: NewEntry) {
        self.spawn(|service| async move {
            let result = service.create(&submitted).await;
            ServiceEvent::Saved { submitted, result }
        });
    }

    pub fn update(&self, id: EntryId, update: EntryUpdate, announce: bool) {
        self.spawn(|service| async move {
            let result = service.update(&id, &update).await;
            ServiceEvent::Updated {
                id,
                update,
                announce,
                result,
            }
        });
    }

    pub fn delete(&self, id: EntryId) {
        self.spawn(|service| async move {
            let result = service.delete(&id).await;
            ServiceEvent::Deleted { id, result }
        });
    }
}
