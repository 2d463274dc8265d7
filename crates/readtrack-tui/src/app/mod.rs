pub mod async_tasks;
mod books;

use std::time::Instant;

use chrono::Utc;
use readtrack_core::state::Followup;
use readtrack_core::{AppConfig, LibraryEntry, LibraryState, ViewOptions};

use crate::popup::Popup;
use crate::theme::NordTheme;
use async_tasks::{ServiceEvent, TaskSpawner};

/// The two halves of the single page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Search,
    Library,
}

impl Tab {
    pub fn toggle(self) -> Self {
        match self {
            Self::Search => Self::Library,
            Self::Library => Self::Search,
        }
    }
}

/// Whether keystrokes edit a text input or drive commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Insert,
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Insert => write!(f, "INSERT"),
        }
    }
}

/// Main application state.
pub struct App {
    pub should_quit: bool,
    pub mode: Mode,
    pub tab: Tab,

    /// Library, search, view options, delete confirmation and toast.
    pub state: LibraryState,

    /// Selected row in the search results.
    pub search_selected: usize,
    /// Selected row in the filtered library view.
    pub library_selected: usize,

    /// Active popup (if any).
    pub popup: Option<Popup>,

    pub config: AppConfig,

    /// UI Theme
    pub theme: NordTheme,

    tasks: TaskSpawner,
}

impl App {
    pub fn new(config: AppConfig, tasks: TaskSpawner) -> Self {
        let view = ViewOptions::new(config.ui.default_filter, config.ui.default_sort);
        let state = LibraryState::new(view, config.ui.toast_duration());

        Self {
            should_quit: false,
            mode: Mode::Normal,
            tab: Tab::Search,
            state,
            search_selected: 0,
            library_selected: 0,
            popup: None,
            config,
            theme: NordTheme::default(),
            tasks,
        }
    }

    /// Kick off the initial library and stats fetch.
    pub fn load(&mut self) {
        self.tasks.load_library();
        self.tasks.refresh_stats();
    }

    // ─── Events ─────────────────────────────────────────────

    pub fn on_tick(&mut self) {
        self.state.expire_toast(Instant::now());
    }

    /// Apply a finished request. Results are applied as they arrive, so the
    /// last response for an entry wins.
    pub fn handle_service_event(&mut self, event: ServiceEvent) {
        match event {
            ServiceEvent::LibraryLoaded(result) => {
                self.state.apply_entries(result);
                self.clamp_selection();
            }
            ServiceEvent::StatsLoaded(result) => self.state.apply_stats(result),
            ServiceEvent::SearchFinished(result) => {
                self.state.finish_search(result);
                self.search_selected = 0;
            }
            ServiceEvent::Saved { submitted, result } => {
                let followup = self.state.finish_save(submitted, result, Utc::now());
                self.follow(followup);
            }
            ServiceEvent::Updated {
                id,
                update,
                announce,
                result,
            } => {
                if self.state.finish_update(&id, &update, result, Utc::now()) {
                    self.tasks.refresh_stats();
                    if announce {
                        self.state.announce_update(&update);
                    }
                }
                self.clamp_selection();
            }
            ServiceEvent::Deleted { id, result } => {
                let followup = self.state.finish_delete(&id, result);
                self.follow(followup);
                self.clamp_selection();
            }
        }
    }

    fn follow(&self, followup: Followup) {
        if followup == Followup::RefreshStats {
            self.tasks.refresh_stats();
        }
    }

    // ─── Selection ──────────────────────────────────────────

    pub fn visible_entries(&self) -> Vec<&LibraryEntry> {
        self.state.visible_entries()
    }

    pub fn selected_entry(&self) -> Option<&LibraryEntry> {
        self.visible_entries().get(self.library_selected).copied()
    }

    pub fn move_down(&mut self) {
        let len = self.list_len();
        let selected = self.selected_mut();
        if *selected + 1 < len {
            *selected += 1;
        }
    }

    pub fn move_up(&mut self) {
        let selected = self.selected_mut();
        *selected = selected.saturating_sub(1);
    }

    pub fn move_to_top(&mut self) {
        *self.selected_mut() = 0;
    }

    pub fn move_to_bottom(&mut self) {
        let last = self.list_len().saturating_sub(1);
        *self.selected_mut() = last;
    }

    fn list_len(&self) -> usize {
        match self.tab {
            Tab::Search => self.state.search.results.len(),
            Tab::Library => self.visible_entries().len(),
        }
    }

    fn selected_mut(&mut self) -> &mut usize {
        match self.tab {
            Tab::Search => &mut self.search_selected,
            Tab::Library => &mut self.library_selected,
        }
    }

    /// Keep both selections inside their lists after the lists changed.
    pub fn clamp_selection(&mut self) {
        let results = self.state.search.results.len();
        self.search_selected = self.search_selected.min(results.saturating_sub(1));
        let visible = self.visible_entries().len();
        self.library_selected = self.library_selected.min(visible.saturating_sub(1));
    }
}
