use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event as CrosstermEvent, KeyEvent, KeyEventKind};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};

use crate::app::async_tasks::ServiceEvent;

/// Events that the TUI can handle.
#[derive(Debug)]
pub enum AppEvent {
    /// A key press event.
    Key(KeyEvent),
    /// Terminal was resized.
    Resize(u16, u16),
    /// Periodic tick; drives toast expiry.
    Tick,
    /// A background request to the library service finished.
    Service(ServiceEvent),
}

/// Merges terminal input with results sent back by background tasks.
pub struct EventHandler {
    tick_rate: Duration,
    tx: UnboundedSender<AppEvent>,
    rx: UnboundedReceiver<AppEvent>,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
        Self { tick_rate, tx, rx }
    }

    /// Sender handed to background tasks.
    pub fn sender(&self) -> UnboundedSender<AppEvent> {
        self.tx.clone()
    }

    /// Next event. Finished background work is delivered first, otherwise
    /// block on the terminal for at most one tick.
    pub fn next(&mut self) -> Result<AppEvent> {
        // Never disconnected: we hold a sender ourselves.
        if let Ok(event) = self.rx.try_recv() {
            return Ok(event);
        }

        if event::poll(self.tick_rate)? {
            match event::read()? {
                CrosstermEvent::Key(key) if key.kind != KeyEventKind::Release => {
                    Ok(AppEvent::Key(key))
                }
                CrosstermEvent::Resize(w, h) => Ok(AppEvent::Resize(w, h)),
                _ => Ok(AppEvent::Tick),
            }
        } else {
            Ok(AppEvent::Tick)
        }
    }
}
