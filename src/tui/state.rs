use super::form_view::{build_form_rows, FormRow, FormViewState, RowKind};
use crate::engine::form_sync::UPDATED_MESSAGE;
use crate::engine::{FormSync, NotificationKind};
use crate::print::{PrintJob, PrintOutcome};
use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::time::Instant;

const PREVIEW_SCROLL_STEP: u16 = 5;

/// Modal overlays. While one is open, keys go to it and nothing else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prompt {
    ConfirmReset,
    Alert(String),
}

/// Work the key handler asks the UI loop to do.
#[derive(Debug, Clone)]
pub enum Effect {
    Print(PrintJob),
    Quit,
}

pub struct AppState {
    pub engine: FormSync,
    pub form: FormViewState,
    pub panel_visible: bool,
    pub prompt: Option<Prompt>,
    pub preview_scroll: u16,
    pub page_width: usize,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(engine: FormSync, page_width: usize) -> Self {
        let mut state = Self {
            engine,
            form: FormViewState::default(),
            panel_visible: true,
            prompt: None,
            preview_scroll: 0,
            page_width,
            start_time: Instant::now(),
        };
        let rows = state.rows();
        state.form.clamp(&rows);
        state
    }

    pub fn rows(&self) -> Vec<FormRow> {
        build_form_rows(&self.engine)
    }

    pub fn handle_key(&mut self, key: KeyEvent, now: Instant, today: NaiveDate) -> Option<Effect> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return Some(Effect::Quit);
        }

        if let Some(prompt) = self.prompt.take() {
            self.handle_prompt_key(prompt, key, now, today);
            return None;
        }

        if self.form.editing {
            self.handle_edit_key(key, now);
            return None;
        }

        let rows = self.rows();
        match key.code {
            KeyCode::Char('q') => return Some(Effect::Quit),
            KeyCode::Up | KeyCode::Char('k') => self.form.step(&rows, -1),
            KeyCode::Down | KeyCode::Char('j') => self.form.step(&rows, 1),
            KeyCode::Home => {
                self.form.selected = 0;
                self.form.clamp(&rows);
            }
            KeyCode::End => self.form.select_kind(&rows, RowKind::AddItem),
            KeyCode::Enter if self.panel_visible => match self.form.selected_kind(&rows) {
                Some(kind) if kind.is_editable() => self.form.editing = true,
                Some(RowKind::AddItem) => self.add_line_item(),
                _ => {}
            },
            KeyCode::Char('a') if self.panel_visible => self.add_line_item(),
            KeyCode::Char('x') | KeyCode::Delete if self.panel_visible => {
                self.remove_selected_line_item()
            }
            KeyCode::Char('u') => {
                self.engine.update_invoice_preview();
                self.engine
                    .show_notification(UPDATED_MESSAGE, NotificationKind::Success, now);
            }
            KeyCode::Char('p') => {
                return Some(Effect::Print(PrintJob::from_preview(
                    self.engine.preview(),
                    self.page_width,
                )));
            }
            KeyCode::Char('r') => self.prompt = Some(Prompt::ConfirmReset),
            KeyCode::Char('t') | KeyCode::Tab => self.panel_visible = !self.panel_visible,
            KeyCode::PageDown => {
                self.preview_scroll = self.preview_scroll.saturating_add(PREVIEW_SCROLL_STEP)
            }
            KeyCode::PageUp => {
                self.preview_scroll = self.preview_scroll.saturating_sub(PREVIEW_SCROLL_STEP)
            }
            _ => {}
        }
        None
    }

    fn handle_prompt_key(&mut self, prompt: Prompt, key: KeyEvent, now: Instant, today: NaiveDate) {
        match prompt {
            Prompt::ConfirmReset => match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                    self.engine.reset_to_default(today, now);
                    self.form.editing = false;
                    let rows = self.rows();
                    self.form.clamp(&rows);
                }
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {}
                // anything else leaves the question open
                _ => self.prompt = Some(Prompt::ConfirmReset),
            },
            // any key dismisses the alert
            Prompt::Alert(_) => {}
        }
    }

    fn handle_edit_key(&mut self, key: KeyEvent, now: Instant) {
        let rows = self.rows();
        let Some(kind) = self.form.selected_kind(&rows) else {
            self.form.editing = false;
            return;
        };

        match key.code {
            KeyCode::Enter | KeyCode::Esc => self.form.editing = false,
            KeyCode::Backspace => {
                let mut value = self.current_value(kind);
                value.pop();
                self.write_value(kind, value, now);
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                let mut value = self.current_value(kind);
                value.push(c);
                self.write_value(kind, value, now);
            }
            _ => {}
        }
    }

    fn current_value(&self, kind: RowKind) -> String {
        match kind {
            RowKind::Field(key) => self.engine.field(key).to_string(),
            RowKind::LineItem(i) => self
                .engine
                .line_items()
                .get(i)
                .unwrap_or_default()
                .to_string(),
            _ => String::new(),
        }
    }

    fn write_value(&mut self, kind: RowKind, value: String, now: Instant) {
        match kind {
            RowKind::Field(key) => self.engine.set_field(key, value, now),
            RowKind::LineItem(i) => {
                if !self.engine.edit_line_item(i, value, now) {
                    self.form.editing = false;
                }
            }
            _ => self.form.editing = false,
        }
    }

    fn add_line_item(&mut self) {
        self.engine.add_line_item();
        let rows = self.rows();
        let last = self.engine.line_items().len() - 1;
        self.form.select_kind(&rows, RowKind::LineItem(last));
    }

    fn remove_selected_line_item(&mut self) {
        let rows = self.rows();
        let Some(RowKind::LineItem(index)) = self.form.selected_kind(&rows) else {
            return;
        };
        if let Err(e) = self.engine.remove_line_item(index) {
            self.prompt = Some(Prompt::Alert(e.to_string()));
            return;
        }
        let rows = self.rows();
        self.form.clamp(&rows);
    }

    pub fn on_print_outcome(&mut self, outcome: PrintOutcome, now: Instant) {
        match outcome {
            PrintOutcome::Printed(path) => self.engine.show_notification(
                format!("Quotation saved to {}", path.display()),
                NotificationKind::Success,
                now,
            ),
            PrintOutcome::Failed(reason) => self.engine.show_notification(
                format!("Print failed: {}", reason),
                NotificationKind::Error,
                now,
            ),
        }
    }

    pub fn uptime(&self) -> String {
        let secs = self.start_time.elapsed().as_secs();
        let h = secs / 3600;
        let m = (secs % 3600) / 60;
        format!("{}h {:02}m", h, m)
    }
}
