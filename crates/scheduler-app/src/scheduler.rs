//! Application controller.
//!
//! Owns the event store, navigation state and persistence adapter, and turns
//! user intents into state changes plus a fresh view.

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::mpsc::Sender;

use chrono::NaiveDate;
use serde::Serialize;
use scheduler_calendar::{
    project, Event, EventStore, Intent, NavigationController, PeriodModel, SelectionIntent,
    ViewMode,
};
use scheduler_core::{AppError, Config, ConfigError, OpState};
use scheduler_storage::{
    parse_import, transfer::export_document_named, write_export, ExportDocument,
    PersistenceAdapter, EXPORT_FILE_NAME,
};
use tokio::runtime::Handle;

use crate::io::{request_export, request_import, IoMessage};

/// Severity of a user-facing notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// Non-blocking message for the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }

    /// Notice for an error returned by `Scheduler`.
    pub fn from_error(error: &AppError) -> Self {
        let level = if error.is_validation() || matches!(error, AppError::Busy(_)) {
            NoticeLevel::Warning
        } else {
            NoticeLevel::Error
        };
        Self {
            level,
            message: error.user_message().to_string(),
        }
    }
}

/// What handling an intent did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Reference date or view changed; re-render.
    Navigated,
    /// Open the create or edit form.
    Open(SelectionIntent),
    /// An event was created or updated. `notice` is set if saving failed.
    Saved { event: Event, notice: Option<Notice> },
    /// An event was removed.
    Deleted { id: String, notice: Option<Notice> },
    /// The collection was replaced by an import.
    Imported { count: usize, notice: Option<Notice> },
    /// An export file was written.
    Exported { path: PathBuf },
    /// Nothing to do (unknown id, already in that state).
    Unchanged,
}

impl Outcome {
    pub fn notice(&self) -> Option<&Notice> {
        match self {
            Outcome::Saved { notice, .. }
            | Outcome::Deleted { notice, .. }
            | Outcome::Imported { notice, .. } => notice.as_ref(),
            _ => None,
        }
    }
}

/// Everything the presentation layer draws.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewState {
    pub mode: ViewMode,
    pub title: String,
    pub reference_date: NaiveDate,
    pub period: PeriodModel,
    /// Label of the pending import/export, if any.
    pub pending: Option<&'static str>,
}

/// Calendar application state with explicit ownership of all parts.
pub struct Scheduler {
    store: EventStore,
    nav: NavigationController,
    adapter: Box<dyn PersistenceAdapter>,
    op_state: OpState,
    today: NaiveDate,
    export_file_name: String,
}

impl Scheduler {
    /// Load stored events through `adapter` and open the monthly view on `today`.
    pub fn new(adapter: Box<dyn PersistenceAdapter>, today: NaiveDate) -> Self {
        let loaded = adapter.load();
        let store = EventStore::from_events(loaded).unwrap_or_else(|e| {
            tracing::warn!("Stored events failed validation, starting empty: {}", e);
            EventStore::new()
        });

        tracing::info!(
            "Scheduler ready with {} events from {}",
            store.len(),
            adapter.describe()
        );

        Self {
            store,
            nav: NavigationController::new(today),
            adapter,
            op_state: OpState::default(),
            today,
            export_file_name: EXPORT_FILE_NAME.to_string(),
        }
    }

    /// Like `new`, applying the configured default view and export name.
    ///
    /// # Errors
    /// `ConfigError::Invalid` if `calendar.default_view` is not a view name.
    pub fn from_config(
        config: &Config,
        adapter: Box<dyn PersistenceAdapter>,
        today: NaiveDate,
    ) -> Result<Self, AppError> {
        let mode = ViewMode::from_str(&config.calendar.default_view)
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;

        let mut scheduler = Self::new(adapter, today);
        scheduler.nav.switch_view(mode);
        scheduler.export_file_name = config.storage.export_file_name.clone();
        Ok(scheduler)
    }

    pub fn events(&self) -> &[Event] {
        self.store.snapshot()
    }

    pub fn store(&self) -> &EventStore {
        &self.store
    }

    pub fn navigation(&self) -> &NavigationController {
        &self.nav
    }

    pub fn op_state(&self) -> OpState {
        self.op_state
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Update the date used for `GoToToday` and the today marker.
    pub fn set_today(&mut self, today: NaiveDate) {
        self.today = today;
    }

    /// Project the current period.
    pub fn view(&self) -> ViewState {
        let state = self.nav.state();
        let mut period = project(state.reference_date, state.view_mode, self.store.snapshot());
        period.mark_today(self.today);

        ViewState {
            mode: state.view_mode,
            title: self.nav.title(),
            reference_date: state.reference_date,
            period,
            pending: (!self.op_state.can_mutate()).then(|| self.op_state.label()),
        }
    }

    /// Dispatch one user intent.
    ///
    /// # Errors
    /// - `AppError::Validation` for a rejected submission; nothing changes
    /// - `AppError::Busy` for a mutation while an import/export is pending
    pub fn handle(&mut self, intent: Intent) -> Result<Outcome, AppError> {
        match intent {
            Intent::SelectDay(date) => Ok(Outcome::Open(SelectionIntent::Create { date })),
            Intent::SelectEvent(id) => Ok(match self.store.get(&id) {
                Some(event) => Outcome::Open(SelectionIntent::Edit {
                    event: event.clone(),
                }),
                None => {
                    tracing::debug!("Selected unknown event {}", id);
                    Outcome::Unchanged
                }
            }),
            Intent::SwitchView(mode) => {
                self.nav.switch_view(mode);
                Ok(Outcome::Navigated)
            }
            Intent::StepForward => {
                self.nav.step_forward();
                Ok(Outcome::Navigated)
            }
            Intent::StepBackward => {
                self.nav.step_backward();
                Ok(Outcome::Navigated)
            }
            Intent::JumpToDate(date) => {
                self.nav.jump_to_date(date);
                Ok(Outcome::Navigated)
            }
            Intent::GoToToday => {
                self.nav.go_to_today(self.today);
                Ok(Outcome::Navigated)
            }
            Intent::SubmitEvent(draft) => {
                self.ensure_idle()?;
                let event = self.store.upsert(draft)?;
                let notice = self.persist();
                Ok(Outcome::Saved { event, notice })
            }
            Intent::DeleteEvent(id) => {
                self.ensure_idle()?;
                if !self.store.delete(&id) {
                    tracing::debug!("Delete of unknown event {} ignored", id);
                    return Ok(Outcome::Unchanged);
                }
                let notice = self.persist();
                Ok(Outcome::Deleted { id, notice })
            }
        }
    }

    /// Replace every event with `events`.
    ///
    /// # Errors
    /// `AppError::Validation` if any record is malformed; the store is unchanged.
    pub fn import_events(&mut self, events: Vec<Event>) -> Result<Outcome, AppError> {
        self.ensure_idle()?;
        let count = events.len();
        self.store.replace_all(events)?;
        tracing::info!("Imported {} events", count);
        let notice = self.persist();
        Ok(Outcome::Imported { count, notice })
    }

    /// Parse an import payload and replace every event with it.
    ///
    /// # Errors
    /// `AppError::Import` if the text is not a valid event list.
    pub fn import_text(&mut self, text: &str) -> Result<Outcome, AppError> {
        self.ensure_idle()?;
        let events = parse_import(text)?;
        self.import_events(events)
    }

    /// Build an export document of the current events.
    ///
    /// # Errors
    /// `AppError::Storage` if serialization fails.
    pub fn export(&self) -> Result<ExportDocument, AppError> {
        Ok(export_document_named(
            self.store.snapshot(),
            &self.export_file_name,
        )?)
    }

    /// Write an export file into `dir`.
    ///
    /// # Errors
    /// `AppError::Storage` if the file cannot be written.
    pub fn export_to(&self, dir: &Path) -> Result<Outcome, AppError> {
        let path = write_export(dir, &self.export_file_name, self.store.snapshot())?;
        Ok(Outcome::Exported { path })
    }

    /// Start reading `path` in the background. Finish with `apply_io`.
    ///
    /// # Errors
    /// `AppError::Busy` if another import/export is pending.
    pub fn begin_import(
        &mut self,
        runtime: &Handle,
        tx: &Sender<IoMessage>,
        path: PathBuf,
    ) -> Result<(), AppError> {
        if !self.op_state.can_start_import() {
            return Err(AppError::Busy(self.op_state.label()));
        }
        self.op_state = OpState::BusyImport;
        request_import(runtime, tx, path);
        Ok(())
    }

    /// Start writing an export into `dir` in the background. Finish with
    /// `apply_io`.
    ///
    /// # Errors
    /// `AppError::Busy` if another import/export is pending.
    pub fn begin_export(
        &mut self,
        runtime: &Handle,
        tx: &Sender<IoMessage>,
        dir: PathBuf,
    ) -> Result<(), AppError> {
        if !self.op_state.can_start_export() {
            return Err(AppError::Busy(self.op_state.label()));
        }
        self.op_state = OpState::BusyExport;
        request_export(
            runtime,
            tx,
            dir,
            self.export_file_name.clone(),
            self.store.snapshot().to_vec(),
        );
        Ok(())
    }

    /// Apply the result of a background import/export and release the guard.
    ///
    /// # Errors
    /// The I/O error, or an import validation error. The store is unchanged
    /// in both cases.
    pub fn apply_io(&mut self, message: IoMessage) -> Result<Outcome, AppError> {
        match message {
            IoMessage::ImportDone(result) => {
                self.op_state = self.op_state.on_import_done();
                self.import_events(result?)
            }
            IoMessage::ExportDone(result) => {
                self.op_state = self.op_state.on_export_done();
                Ok(Outcome::Exported { path: result? })
            }
        }
    }

    fn ensure_idle(&self) -> Result<(), AppError> {
        if self.op_state.can_mutate() {
            Ok(())
        } else {
            Err(AppError::Busy(self.op_state.label()))
        }
    }

    /// Save the whole store. Memory stays authoritative when this fails.
    fn persist(&mut self) -> Option<Notice> {
        match self.adapter.save(self.store.snapshot()) {
            Ok(()) => None,
            Err(e) => {
                tracing::error!("Failed to save events to {}: {}", self.adapter.describe(), e);
                Some(Notice::warning(e.user_message()))
            }
        }
    }
}
