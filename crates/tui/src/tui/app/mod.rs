use std::mem;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use ratatui::layout::Rect;
use ratatui::style::{Color, Style};

use todolist_core::drag::{DragConfig, DragUpdate, ReorderIntent};
use todolist_core::mail::MailDraft;
use todolist_core::notify::{post_task_notification, Notifier};
use todolist_core::transfer::{self, DEFAULT_EXPORT_FILE};
use todolist_core::{
    Category, Change, DragController, MutationOutcome, TaskStore, TasksService, ValidationError,
    Viewport,
};

use super::buffer::TextBuffer;
use super::constants::*;
use super::layout;
use crate::config::AppConfig;

mod input;
mod mouse;
mod render;

use mouse::PointerPress;

/// Which surface receives keys. Dialogs follow the store's UI flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum InputMode {
    Normal,
    Compose,
    ConfirmDelete,
    Details,
    ExportPath,
    ImportPath,
    Mail,
    Help,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Overlay {
    ExportPath,
    ImportPath,
    Mail(String),
    Help,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfirmChoice {
    Yes,
    No,
}

impl ConfirmChoice {
    fn toggle(self) -> Self {
        match self {
            ConfirmChoice::Yes => ConfirmChoice::No,
            ConfirmChoice::No => ConfirmChoice::Yes,
        }
    }
}

#[derive(Debug, Clone)]
struct StatusMessage {
    text: String,
    kind: StatusKind,
    created_at: Instant,
}

impl StatusMessage {
    fn new<T: Into<String>>(text: T, kind: StatusKind) -> Self {
        Self {
            text: text.into(),
            kind,
            created_at: Instant::now(),
        }
    }

    fn style(&self) -> Style {
        match self.kind {
            StatusKind::Info => Style::default().fg(Color::Cyan),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum StatusKind {
    Info,
    Error,
}

pub(crate) struct App {
    config: AppConfig,
    service: TasksService,
    store: TaskStore,
    notifier: Box<dyn Notifier>,
    selected: usize,
    scroll: usize,
    /// Inner list area from the last draw; mouse positions are resolved against it.
    list_area: Rect,
    tab_hits: Vec<(Rect, Category)>,
    drag: DragController,
    press: Option<PointerPress>,
    cue_at: Option<Instant>,
    overlay: Option<Overlay>,
    input: TextBuffer,
    path_input: TextBuffer,
    confirm_choice: ConfirmChoice,
    status: Option<StatusMessage>,
    should_quit: bool,
}

impl App {
    pub(crate) fn new(
        config: AppConfig,
        service: TasksService,
        notifier: Box<dyn Notifier>,
    ) -> Self {
        let store = service.load();
        Self {
            config,
            service,
            store,
            notifier,
            selected: 0,
            scroll: 0,
            list_area: Rect::default(),
            tab_hits: Vec::new(),
            drag: DragController::new(DragConfig {
                edge_margin: 2,
                scroll_step: 1,
            }),
            press: None,
            cue_at: None,
            overlay: None,
            input: TextBuffer::new(),
            path_input: TextBuffer::new(),
            confirm_choice: ConfirmChoice::No,
            status: None,
            should_quit: false,
        }
    }

    pub(crate) fn on_tick(&mut self) {
        if let Some(status) = &self.status {
            if status.created_at.elapsed() > STATUS_TTL {
                self.status = None;
            }
        }
        if self
            .cue_at
            .is_some_and(|at| at.elapsed() > Duration::from_millis(150))
        {
            self.cue_at = None;
        }
    }

    pub(crate) fn should_quit(&self) -> bool {
        self.should_quit
    }

    fn input_mode(&self) -> InputMode {
        match &self.overlay {
            Some(Overlay::ExportPath) => InputMode::ExportPath,
            Some(Overlay::ImportPath) => InputMode::ImportPath,
            Some(Overlay::Mail(_)) => InputMode::Mail,
            Some(Overlay::Help) => InputMode::Help,
            None => {
                let ui = self.store.ui();
                if ui.show_delete_dialog {
                    InputMode::ConfirmDelete
                } else if ui.show_add_dialog {
                    InputMode::Compose
                } else if ui.show_details_dialog {
                    InputMode::Details
                } else {
                    InputMode::Normal
                }
            }
        }
    }

    fn category(&self) -> Category {
        self.store.selected_category()
    }

    fn update_store(&mut self, update: impl FnOnce(TaskStore) -> TaskStore) {
        let store = mem::take(&mut self.store);
        self.store = update(store);
    }

    fn viewport(&self) -> Viewport {
        layout::viewport(
            self.store.current_tasks(),
            self.list_area.width,
            self.scroll,
            self.list_area.height,
        )
    }

    fn clamp_selection(&mut self) {
        let len = self.store.current_tasks().len();
        self.selected = self.selected.min(len.saturating_sub(1));
        self.scroll = self.scroll.min(len.saturating_sub(1));
    }

    fn ensure_selected_visible(&mut self) {
        if self.selected < self.scroll {
            self.scroll = self.selected;
            return;
        }
        let area = self.list_area;
        if area.height == 0 {
            return;
        }
        let tasks = self.store.current_tasks();
        while self.scroll < self.selected {
            let rows = layout::layout_rows(tasks, area.width, self.scroll, area.height);
            let fits = rows
                .iter()
                .any(|row| row.index == self.selected && row.end() <= i32::from(area.height));
            if fits {
                break;
            }
            self.scroll += 1;
        }
    }

    fn scroll_by(&mut self, delta: i32) {
        let max = self.store.current_tasks().len().saturating_sub(1);
        let step = usize::try_from(delta.unsigned_abs()).unwrap_or(usize::MAX);
        self.scroll = if delta < 0 {
            self.scroll.saturating_sub(step)
        } else {
            self.scroll.saturating_add(step).min(max)
        };
    }

    fn select_next(&mut self) {
        let len = self.store.current_tasks().len();
        if len == 0 {
            return;
        }
        self.selected = (self.selected + 1).min(len - 1);
        self.ensure_selected_visible();
    }

    fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
        self.ensure_selected_visible();
    }

    fn select_first(&mut self) {
        self.selected = 0;
        self.ensure_selected_visible();
    }

    fn select_last(&mut self) {
        self.selected = self.store.current_tasks().len().saturating_sub(1);
        self.ensure_selected_visible();
    }

    fn select_category(&mut self, category: Category) {
        if self.drag.is_dragging() {
            self.cancel_drag();
        }
        if category == self.category() {
            return;
        }
        self.update_store(|store| store.with_selected(category));
        self.selected = 0;
        self.scroll = 0;
        tracing::debug!(%category, "category selected");
    }

    /// Take a mutation result into the app. Returns whether the list changed.
    fn settle(&mut self, outcome: MutationOutcome, message: impl Into<String>) -> bool {
        self.store = outcome.store;
        let changed = match outcome.change {
            Change::Saved(_) => {
                self.set_status_info(message);
                true
            }
            Change::Unsaved(category, err) => {
                self.set_status_error(format!(
                    "{} list changed but was not saved: {}",
                    category.label(),
                    err
                ));
                true
            }
            Change::Unchanged => false,
            Change::Rejected(ValidationError::EmptyText) => {
                self.set_status_error("Enter some text first");
                false
            }
            Change::Rejected(err) => {
                self.set_status_error(err.to_string());
                false
            }
        };
        self.clamp_selection();
        changed
    }

    fn begin_add(&mut self) {
        self.update_store(|store| {
            store.map_ui(|ui| {
                ui.show_add_dialog = true;
                ui.edit_index = None;
                ui.task_text.clear();
            })
        });
        self.input.clear();
        self.set_status_info(STATUS_ENTER_ADD);
    }

    fn begin_edit(&mut self, index: usize) {
        let Some(task) = self.store.current_tasks().get(index).cloned() else {
            self.set_status_info("Nothing to edit");
            return;
        };
        self.input.set(task.clone());
        self.update_store(|store| {
            store.map_ui(|ui| {
                ui.show_details_dialog = false;
                ui.selected_task = None;
                ui.show_add_dialog = true;
                ui.edit_index = Some(index);
                ui.task_text = task;
            })
        });
        self.set_status_info(STATUS_ENTER_EDIT);
    }

    /// Mirror the composer into the store so the snapshot always holds the text being typed.
    fn sync_composer(&mut self) {
        let text = self.input.as_str().to_string();
        self.update_store(|store| store.map_ui(|ui| ui.task_text = text));
    }

    fn submit_composer(&mut self) {
        let text = self.store.ui().task_text.clone();
        match self.store.ui().edit_index {
            Some(index) => {
                let outcome = self.service.edit_task(&self.store, &text, index);
                if self.settle(outcome, "Updated task ✏️") {
                    self.selected = index;
                    self.input.clear();
                }
            }
            None => {
                let outcome = self.service.add_task(&self.store, &text);
                if self.settle(outcome, "Added task ✚") {
                    self.select_last();
                    self.input.clear();
                }
            }
        }
    }

    fn cancel_composer(&mut self) {
        self.update_store(|store| {
            store.map_ui(|ui| {
                ui.show_add_dialog = false;
                ui.edit_index = None;
                ui.task_text.clear();
            })
        });
        self.input.clear();
        self.status = None;
    }

    fn prompt_delete(&mut self, index: usize) {
        let Some(task) = self.store.current_tasks().get(index).cloned() else {
            self.set_status_info("Nothing to delete");
            return;
        };
        self.selected = index;
        self.update_store(|store| {
            store.map_ui(|ui| {
                ui.show_details_dialog = false;
                ui.selected_task = None;
                ui.show_delete_dialog = true;
                ui.task_to_delete = Some(task);
            })
        });
        self.confirm_choice = ConfirmChoice::No;
        self.set_status_info(STATUS_CONFIRM_DELETE);
    }

    fn confirm_delete(&mut self) {
        let Some(task) = self.store.ui().task_to_delete.clone() else {
            self.cancel_delete();
            return;
        };
        let outcome = self.service.delete_task(&self.store, &task);
        if !self.settle(outcome, format!("Deleted '{}' 🗑️", task)) {
            self.set_status_info("Task not found");
        }
    }

    fn cancel_delete(&mut self) {
        self.update_store(|store| {
            store.map_ui(|ui| {
                ui.show_delete_dialog = false;
                ui.task_to_delete = None;
            })
        });
        self.set_status_info("Deletion cancelled");
    }

    fn open_details(&mut self, index: usize) {
        let Some(task) = self.store.current_tasks().get(index).cloned() else {
            self.set_status_info("Nothing to inspect");
            return;
        };
        self.selected = index;
        self.update_store(|store| {
            store.map_ui(|ui| {
                ui.selected_task = Some(task);
                ui.show_details_dialog = true;
            })
        });
        self.set_status_info(STATUS_VIEW_DETAILS);
    }

    fn close_details(&mut self) {
        self.update_store(|store| {
            store.map_ui(|ui| {
                ui.show_details_dialog = false;
                ui.selected_task = None;
            })
        });
        self.status = None;
    }

    fn notify_selected(&mut self) {
        let Some(task) = self.store.ui().selected_task.clone() else {
            return;
        };
        if post_task_notification(self.notifier.as_mut(), &task) {
            self.set_status_info("Notification posted 🔔");
        } else {
            self.set_status_error("Could not post the notification");
        }
    }

    /// Keyboard reorder: move the selected task one slot up (`-1`) or down (`1`).
    fn move_selected(&mut self, step: isize) {
        let len = self.store.current_tasks().len();
        let Some(to) = self.selected.checked_add_signed(step).filter(|to| *to < len) else {
            return;
        };
        let outcome = self.service.reorder_task(&self.store, self.selected, to);
        if self.settle(outcome, "Moved task") {
            self.selected = to;
            self.ensure_selected_visible();
        }
    }

    fn apply_drag_update(&mut self, update: DragUpdate) {
        if update.cue.is_some() {
            self.cue_at = Some(Instant::now());
        }
        if let Some(scroll) = update.scroll {
            self.scroll_by(scroll.delta);
        }
    }

    fn finish_drag(&mut self, intent: Option<ReorderIntent>) {
        let Some(ReorderIntent { from, to }) = intent else {
            return;
        };
        let outcome = self.service.reorder_task(&self.store, from, to);
        if self.settle(outcome, format!("Moved task to position {}", to + 1)) {
            self.selected = to;
        }
    }

    fn cancel_drag(&mut self) {
        self.press = None;
        let intent = self.drag.cancel();
        self.finish_drag(intent);
    }

    pub(crate) fn on_focus_lost(&mut self) {
        self.cancel_drag();
    }

    pub(crate) fn on_resize(&mut self) {
        self.cancel_drag();
    }

    fn begin_export(&mut self) {
        self.path_input.set(DEFAULT_EXPORT_FILE);
        self.overlay = Some(Overlay::ExportPath);
        self.set_status_info(STATUS_EXPORT_PATH);
    }

    fn begin_import(&mut self) {
        self.path_input.set(DEFAULT_EXPORT_FILE);
        self.overlay = Some(Overlay::ImportPath);
        self.set_status_info(STATUS_IMPORT_PATH);
    }

    fn prompted_path(&mut self) -> Option<PathBuf> {
        let raw = self.path_input.as_str().trim();
        if raw.is_empty() {
            self.set_status_error("Enter a file path");
            return None;
        }
        Some(PathBuf::from(raw))
    }

    fn submit_export(&mut self) {
        let Some(path) = self.prompted_path() else {
            return;
        };
        self.overlay = None;
        match transfer::export_tasks(&path, self.store.current_tasks()) {
            Ok(count) => {
                self.set_status_info(format!("Exported {} tasks to {}", count, path.display()))
            }
            Err(err) => self.set_status_error(format!("{:#}", anyhow::Error::from(err))),
        }
    }

    fn submit_import(&mut self) {
        let Some(path) = self.prompted_path() else {
            return;
        };
        self.overlay = None;
        let category = self.category();
        match transfer::import_tasks(&mut self.service, &self.store, category, &path) {
            Ok(outcome) => {
                let message = format!(
                    "Imported {} tasks from {}",
                    outcome.store.tasks(category).len(),
                    path.display()
                );
                self.settle(outcome, message);
                self.selected = 0;
                self.scroll = 0;
            }
            Err(err) => self.set_status_error(format!("{:#}", anyhow::Error::from(err))),
        }
    }

    fn open_mail(&mut self) {
        let category = self.category();
        let draft = MailDraft::backup(category, self.store.current_tasks());
        tracing::info!(%category, subject = %draft.subject, "composed email backup");
        self.overlay = Some(Overlay::Mail(draft.to_mailto()));
        self.set_status_info(STATUS_MAIL);
    }

    fn show_help_overlay(&mut self) {
        self.overlay = Some(Overlay::Help);
        self.set_status_info(STATUS_HELP);
    }

    fn close_overlay(&mut self) {
        self.overlay = None;
        self.status = None;
    }

    pub(crate) fn set_status_info<T: Into<String>>(&mut self, message: T) {
        let mut text = String::from("ℹ️  ");
        text.push_str(&message.into());
        self.status = Some(StatusMessage::new(text, StatusKind::Info));
    }

    pub(crate) fn set_status_error<T: Into<String>>(&mut self, message: T) {
        let mut text = String::from("⚠️  ");
        text.push_str(&message.into());
        self.status = Some(StatusMessage::new(text, StatusKind::Error));
    }
}
