use crate::engine::fields::{FieldKey, Section};
use crate::engine::FormSync;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    Heading(Section),
    LineItemsHeading,
    Field(FieldKey),
    LineItem(usize),
    AddItem,
}

impl RowKind {
    pub fn is_selectable(self) -> bool {
        !matches!(self, RowKind::Heading(_) | RowKind::LineItemsHeading)
    }

    pub fn is_editable(self) -> bool {
        matches!(self, RowKind::Field(_) | RowKind::LineItem(_))
    }
}

#[derive(Debug, Clone)]
pub struct FormRow {
    pub kind: RowKind,
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, Default)]
pub struct FormViewState {
    pub selected: usize,
    pub editing: bool,
}

/// Lay out the control panel: one heading per section, every field, then the
/// line-item editor rows and the add row.
pub fn build_form_rows(engine: &FormSync) -> Vec<FormRow> {
    let mut rows = Vec::new();
    let mut current: Option<Section> = None;

    for key in FieldKey::ALL {
        let section = key.section();
        if current != Some(section) {
            rows.push(FormRow {
                kind: RowKind::Heading(section),
                label: section.title().to_string(),
                value: String::new(),
            });
            current = Some(section);
        }
        rows.push(FormRow {
            kind: RowKind::Field(key),
            label: key.label().to_string(),
            value: engine.field(key).to_string(),
        });
    }

    rows.push(FormRow {
        kind: RowKind::LineItemsHeading,
        label: "Line Items".to_string(),
        value: String::new(),
    });
    for row in engine.render_line_items() {
        rows.push(FormRow {
            kind: RowKind::LineItem(row.index),
            label: row.label,
            value: row.value,
        });
    }
    rows.push(FormRow {
        kind: RowKind::AddItem,
        label: "+ Add item".to_string(),
        value: String::new(),
    });

    rows
}

impl FormViewState {
    /// Select the first selectable row at or after the current position.
    pub fn clamp(&mut self, rows: &[FormRow]) {
        if rows.is_empty() {
            self.selected = 0;
            return;
        }
        self.selected = self.selected.min(rows.len() - 1);
        if !rows[self.selected].kind.is_selectable() {
            self.step(rows, 1);
            if !rows[self.selected].kind.is_selectable() {
                self.step(rows, -1);
            }
        }
    }

    /// Move by `delta` selectable rows, stopping at either end.
    pub fn step(&mut self, rows: &[FormRow], delta: i32) {
        let mut pos = self.selected as i64;
        let mut remaining = delta.unsigned_abs();
        let dir: i64 = if delta < 0 { -1 } else { 1 };
        while remaining > 0 {
            let mut next = pos + dir;
            while next >= 0
                && (next as usize) < rows.len()
                && !rows[next as usize].kind.is_selectable()
            {
                next += dir;
            }
            if next < 0 || next as usize >= rows.len() {
                break;
            }
            pos = next;
            remaining -= 1;
        }
        self.selected = pos as usize;
    }

    pub fn select_kind(&mut self, rows: &[FormRow], kind: RowKind) {
        if let Some(pos) = rows.iter().position(|r| r.kind == kind) {
            self.selected = pos;
        }
    }

    pub fn selected_kind(&self, rows: &[FormRow]) -> Option<RowKind> {
        rows.get(self.selected).map(|r| r.kind)
    }
}
