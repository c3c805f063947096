//! Theme preference service.

use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{PoisonError, RwLock};
use std::thread::{self, JoinHandle};

use super::{PreferenceStore, SettingsError, SettingsResult, Theme};
use crate::config::THEME_PREFERENCE_KEY;

enum WriteCommand {
    Set { key: &'static str, value: String },
    Remove { key: &'static str },
    Flush(Sender<()>),
}

/// Holds the active theme in memory and persists changes in the background.
pub struct ThemeService {
    current: RwLock<Theme>,
    writer: Option<Sender<WriteCommand>>,
    worker: Option<JoinHandle<()>>,
}

impl ThemeService {
    /// Load the saved theme and start the writer thread.
    ///
    /// A missing or unrecognized stored value falls back to the default.
    pub fn open<S: PreferenceStore>(store: S) -> SettingsResult<Self> {
        let theme = match store.get(THEME_PREFERENCE_KEY)? {
            Some(raw) => raw.parse::<Theme>().unwrap_or_else(|e: SettingsError| {
                tracing::warn!("{e}, using default theme");
                Theme::default()
            }),
            None => Theme::default(),
        };

        let (tx, rx) = mpsc::channel();
        let worker = thread::Builder::new()
            .name("preference-writer".into())
            .spawn(move || run_writer(store, rx))?;

        tracing::info!(theme = %theme, "Theme preference loaded");

        Ok(Self {
            current: RwLock::new(theme),
            writer: Some(tx),
            worker: Some(worker),
        })
    }

    /// Active theme.
    pub fn theme(&self) -> Theme {
        *self.current.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Switch theme. Visible immediately, persisted asynchronously.
    pub fn set_theme(&self, theme: Theme) -> SettingsResult<()> {
        // Queue while holding the lock so persisted order matches memory order
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *current = theme;
        self.send(WriteCommand::Set {
            key: THEME_PREFERENCE_KEY,
            value: theme.as_str().to_string(),
        })
    }

    /// Forget the saved theme and return to the default.
    pub fn reset(&self) -> SettingsResult<()> {
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *current = Theme::default();
        self.send(WriteCommand::Remove {
            key: THEME_PREFERENCE_KEY,
        })
    }

    /// Block until every queued write has reached the store.
    pub fn flush(&self) -> SettingsResult<()> {
        let (ack_tx, ack_rx) = mpsc::channel();
        self.send(WriteCommand::Flush(ack_tx))?;
        ack_rx.recv().map_err(|_| SettingsError::WriterStopped)
    }

    fn send(&self, command: WriteCommand) -> SettingsResult<()> {
        self.writer
            .as_ref()
            .ok_or(SettingsError::WriterStopped)?
            .send(command)
            .map_err(|_| SettingsError::WriterStopped)
    }
}

impl Drop for ThemeService {
    fn drop(&mut self) {
        // Closing the channel lets the writer drain and exit
        self.writer.take();
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                tracing::error!("Preference writer panicked");
            }
        }
    }
}

fn run_writer<S: PreferenceStore>(mut store: S, commands: Receiver<WriteCommand>) {
    for command in commands {
        match command {
            WriteCommand::Set { key, value } => {
                if let Err(e) = store.set(key, &value) {
                    tracing::warn!(key, "Failed to persist preference: {e}");
                }
            }
            WriteCommand::Remove { key } => {
                if let Err(e) = store.remove(key) {
                    tracing::warn!(key, "Failed to remove preference: {e}");
                }
            }
            WriteCommand::Flush(ack) => {
                let _ = ack.send(());
            }
        }
    }
    tracing::debug!("Preference writer stopped");
}
