use super::debounce::Debouncer;
use super::fields::{Baseline, FieldKey, FormFields};
use super::format::format_input_date;
use super::line_items::{LineItemError, LineItemRow, LineItems};
use super::notify::{Notification, NotificationKind, Notifier, Phase};
use super::preview::{compute_preview, Preview};
use chrono::{Days, NaiveDate};
use std::time::{Duration, Instant};

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(400);
pub const DEFAULT_VALID_DAYS: u64 = 5;
pub const DEFAULT_PLACEHOLDER_ITEM: &str = "New Item";

pub const UPDATED_MESSAGE: &str = "Invoice updated successfully!";
pub const RESET_MESSAGE: &str = "Reset to default values";

/// Which input a debounced recompute belongs to. Every field and every
/// line-item row debounces independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputTarget {
    Field(FieldKey),
    LineItem(usize),
}

/// Tunables for the engine, normally taken from the config file.
#[derive(Debug, Clone)]
pub struct EngineSettings {
    pub debounce: Duration,
    pub notification_display: Duration,
    pub notification_fade: Duration,
    pub valid_days: u64,
    pub placeholder_item: String,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            debounce: DEFAULT_DEBOUNCE,
            notification_display: super::notify::DISPLAY_DURATION,
            notification_fade: super::notify::FADE_DURATION,
            valid_days: DEFAULT_VALID_DAYS,
            placeholder_item: DEFAULT_PLACEHOLDER_ITEM.to_string(),
        }
    }
}

/// Owns the quotation model and keeps the preview in sync with it.
///
/// Structural changes (add, remove, reset) recompute immediately. Keystroke
/// edits only schedule a recompute; it runs from `tick` once the input has
/// been quiet for the debounce period.
#[derive(Debug, Clone)]
pub struct FormSync {
    fields: FormFields,
    line_items: LineItems,
    baseline: Baseline,
    settings: EngineSettings,
    preview: Preview,
    generation: u64,
    debouncer: Debouncer<InputTarget>,
    notifier: Notifier,
}

impl FormSync {
    /// Build an engine holding the baseline values. Dates are left empty and
    /// no preview has been computed yet; see [`FormSync::load`].
    pub fn new(baseline: Baseline, settings: EngineSettings) -> Result<Self, LineItemError> {
        let line_items = LineItems::new(baseline.line_items.clone())?;
        let mut fields = FormFields::new();
        baseline.apply_to(&mut fields);

        Ok(Self {
            fields,
            line_items,
            debouncer: Debouncer::new(settings.debounce),
            notifier: Notifier::new(settings.notification_display, settings.notification_fade),
            baseline,
            settings,
            preview: Preview::default(),
            generation: 0,
        })
    }

    /// Startup sequence: baseline values, today's dates, first preview.
    pub fn load(
        baseline: Baseline,
        settings: EngineSettings,
        today: NaiveDate,
    ) -> Result<Self, LineItemError> {
        let mut engine = Self::new(baseline, settings)?;
        engine.initialize_dates(today);
        engine.update_invoice_preview();
        Ok(engine)
    }

    pub fn initialize_dates(&mut self, today: NaiveDate) {
        let valid_until = today
            .checked_add_days(Days::new(self.settings.valid_days))
            .unwrap_or(today);
        self.fields.set(FieldKey::InvoiceDate, format_input_date(today));
        self.fields.set(FieldKey::ValidUntil, format_input_date(valid_until));
    }

    /// Rows for the line-item editor. Hosts replace their previous rows with
    /// this list wholesale.
    pub fn render_line_items(&self) -> Vec<LineItemRow> {
        self.line_items.rows()
    }

    /// Keystroke on a form field.
    pub fn set_field(&mut self, key: FieldKey, value: impl Into<String>, now: Instant) {
        self.fields.set(key, value);
        self.debouncer.schedule(InputTarget::Field(key), now);
    }

    /// Keystroke on a line-item row. Returns false if the row no longer exists.
    pub fn edit_line_item(&mut self, index: usize, value: impl Into<String>, now: Instant) -> bool {
        if !self.line_items.set(index, value) {
            return false;
        }
        self.debouncer.schedule(InputTarget::LineItem(index), now);
        true
    }

    pub fn remove_line_item(&mut self, index: usize) -> Result<String, LineItemError> {
        match self.line_items.remove(index) {
            Ok(removed) => {
                tracing::debug!(index, remaining = self.line_items.len(), "line item removed");
                self.update_invoice_preview();
                Ok(removed)
            }
            Err(e) => {
                tracing::warn!(index, error = %e, "line item removal rejected");
                Err(e)
            }
        }
    }

    pub fn add_line_item(&mut self) {
        self.line_items.push(self.settings.placeholder_item.clone());
        tracing::info!(count = self.line_items.len(), "line item added");
        self.update_invoice_preview();
    }

    pub fn update_invoice_preview(&mut self) -> &Preview {
        self.preview = compute_preview(&self.fields, &self.line_items);
        self.generation += 1;
        tracing::debug!(generation = self.generation, "preview recomputed");
        &self.preview
    }

    /// Put every field and the line items back to the baseline. Callers are
    /// expected to have confirmed with the user first.
    pub fn reset_to_default(&mut self, today: NaiveDate, now: Instant) {
        self.baseline.apply_to(&mut self.fields);
        self.initialize_dates(today);
        // Baseline items were validated in `new`, so this cannot fail.
        if let Err(e) = self.line_items.replace_all(self.baseline.line_items.clone()) {
            tracing::warn!(error = %e, "baseline line items rejected");
        }
        self.debouncer.cancel_all();
        self.update_invoice_preview();
        tracing::info!("form reset to defaults");
        self.show_notification(RESET_MESSAGE, NotificationKind::Info, now);
    }

    pub fn show_notification(
        &mut self,
        message: impl Into<String>,
        kind: NotificationKind,
        now: Instant,
    ) {
        self.notifier.push(message, kind, now);
    }

    /// Run every debounced recompute that is due and drop expired
    /// notifications. Returns the number of recomputes performed.
    pub fn tick(&mut self, now: Instant) -> usize {
        let due = self.debouncer.take_due(now);
        for _ in &due {
            self.update_invoice_preview();
        }
        self.notifier.prune(now);
        due.len()
    }

    /// Earliest instant at which `tick` has something to do.
    pub fn next_deadline(&self, now: Instant) -> Option<Instant> {
        match (self.debouncer.next_deadline(), self.notifier.next_deadline(now)) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    pub fn fields(&self) -> &FormFields {
        &self.fields
    }

    pub fn field(&self, key: FieldKey) -> &str {
        self.fields.get(key)
    }

    pub fn line_items(&self) -> &LineItems {
        &self.line_items
    }

    pub fn preview(&self) -> &Preview {
        &self.preview
    }

    /// Number of preview recomputations so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn has_pending_input(&self) -> bool {
        self.debouncer.pending_count() > 0
    }

    pub fn notifications(&self, now: Instant) -> Vec<(&Notification, Phase)> {
        self.notifier.active(now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn engine() -> FormSync {
        FormSync::load(Baseline::default(), EngineSettings::default(), today()).unwrap()
    }

    #[test]
    fn test_load_initializes_everything() {
        let e = engine();
        assert_eq!(e.field(FieldKey::InvoiceDate), "2026-10-19");
        assert_eq!(e.field(FieldKey::ValidUntil), "2026-10-24");
        assert_eq!(e.line_items().len(), 9);
        assert_eq!(e.generation(), 1);
        assert_eq!(e.preview().grand_total, "₹12,000.00");
    }

    #[test]
    fn test_empty_baseline_items_rejected() {
        let baseline = Baseline {
            line_items: Vec::new(),
            ..Baseline::default()
        };
        assert!(FormSync::new(baseline, EngineSettings::default()).is_err());
    }

    #[test]
    fn test_valid_until_crosses_month_end() {
        let mut e = engine();
        e.initialize_dates(NaiveDate::from_ymd_opt(2026, 12, 29).unwrap());
        assert_eq!(e.field(FieldKey::InvoiceDate), "2026-12-29");
        assert_eq!(e.field(FieldKey::ValidUntil), "2027-01-03");
    }

    #[test]
    fn test_add_appends_placeholder_and_recomputes() {
        let mut e = engine();
        let before = e.generation();
        e.add_line_item();
        assert_eq!(e.line_items().len(), 10);
        assert_eq!(e.line_items().get(9), Some("New Item"));
        assert_eq!(e.generation(), before + 1);
        assert_eq!(e.preview().items.last().map(String::as_str), Some("New Item"));
    }

    #[test]
    fn test_custom_placeholder() {
        let settings = EngineSettings {
            placeholder_item: "TBD".to_string(),
            ..EngineSettings::default()
        };
        let mut e = FormSync::load(Baseline::default(), settings, today()).unwrap();
        e.add_line_item();
        assert_eq!(e.line_items().get(9), Some("TBD"));
    }

    #[test]
    fn test_remove_rejected_at_one_item() {
        let baseline = Baseline {
            line_items: vec!["Only".to_string()],
            ..Baseline::default()
        };
        let mut e = FormSync::load(baseline, EngineSettings::default(), today()).unwrap();
        let gen = e.generation();

        assert_eq!(e.remove_line_item(0), Err(LineItemError::LastItem));
        assert_eq!(e.line_items().as_slice(), &["Only".to_string()]);
        assert_eq!(e.generation(), gen, "rejected removal must not recompute");
    }

    #[test]
    fn test_edit_is_debounced() {
        let t0 = Instant::now();
        let mut e = engine();
        let gen = e.generation();

        assert!(e.edit_line_item(0, "Landing page", t0));
        assert_eq!(e.line_items().get(0), Some("Landing page"));
        assert_eq!(e.generation(), gen);
        assert_ne!(e.preview().items[0], "Landing page");

        assert_eq!(e.tick(t0 + DEFAULT_DEBOUNCE), 1);
        assert_eq!(e.preview().items[0], "Landing page");
    }

    #[test]
    fn test_edit_out_of_range_ignored() {
        let mut e = engine();
        assert!(!e.edit_line_item(42, "x", Instant::now()));
        assert!(!e.has_pending_input());
    }

    #[test]
    fn test_separate_fields_fire_separately() {
        let t0 = Instant::now();
        let mut e = engine();
        let gen = e.generation();
        e.set_field(FieldKey::ClientName, "Acme", t0);
        e.set_field(FieldKey::ProjectName, "Portal", t0);
        assert_eq!(e.tick(t0 + DEFAULT_DEBOUNCE), 2);
        assert_eq!(e.generation(), gen + 2);
    }

    #[test]
    fn test_reset_cancels_pending_input() {
        let t0 = Instant::now();
        let mut e = engine();
        e.set_field(FieldKey::ClientName, "Acme", t0);
        e.reset_to_default(today(), t0);
        assert!(!e.has_pending_input());
        assert_eq!(e.field(FieldKey::ClientName), "Apna Advertising");
        assert_eq!(e.tick(t0 + DEFAULT_DEBOUNCE), 0);
    }

    #[test]
    fn test_reset_emits_info_notification() {
        let t0 = Instant::now();
        let mut e = engine();
        e.reset_to_default(today(), t0);
        let active = e.notifications(t0);
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].0.message, RESET_MESSAGE);
        assert_eq!(active[0].0.kind, NotificationKind::Info);
    }

    #[test]
    fn test_tick_prunes_notifications() {
        let t0 = Instant::now();
        let mut e = engine();
        e.show_notification("hello", NotificationKind::Success, t0);
        e.tick(t0 + Duration::from_secs(3));
        assert!(e.notifications(t0 + Duration::from_secs(3)).is_empty());
    }

    #[test]
    fn test_next_deadline_prefers_earliest() {
        let t0 = Instant::now();
        let mut e = engine();
        assert!(e.next_deadline(t0).is_none());
        e.show_notification("hello", NotificationKind::Info, t0);
        e.set_field(FieldKey::ClientName, "A", t0);
        assert_eq!(e.next_deadline(t0), Some(t0 + DEFAULT_DEBOUNCE));
    }
}
