pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod notify;
pub mod service;
pub mod state;
pub mod view;

pub use client::LibraryClient;
pub use config::{AppConfig, LoggingConfig, ServiceConfig, UiConfig};
pub use error::{Result, TrackerError};
pub use models::*;

pub use notify::{Notifier, Toast, ToastKind};
pub use service::{CreatedEntry, HealthReport, HttpLibraryService, LibraryExport, LibraryService};
pub use state::{DeleteState, Followup, LibraryState, SearchState};
pub use view::{SortKey, StatusFilter, ViewOptions, filter_and_sort};
