use std::borrow::Cow;
use std::time::Instant;

use super::form_view::{FormRow, RowKind};
use super::state::{AppState, Prompt};
use crate::engine::notify::Phase;
use crate::engine::Preview;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState, Wrap},
    Frame,
};

const NOTIFICATION_WIDTH: u16 = 40;
const NOTIFICATION_HEIGHT: u16 = 3;

pub fn draw(f: &mut Frame, state: &AppState, now: Instant) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(f.area());

    draw_header(f, state, chunks[0]);

    if state.panel_visible {
        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(chunks[1]);
        draw_form(f, state, body[0]);
        draw_preview(f, state, body[1]);
    } else {
        draw_preview(f, state, chunks[1]);
    }

    draw_footer(f, state, chunks[2]);
    draw_notifications(f, state, now);

    if let Some(prompt) = &state.prompt {
        draw_prompt(f, prompt);
    }
}

fn draw_header(f: &mut Frame, state: &AppState, area: Rect) {
    let preview = state.engine.preview();
    let status = if state.engine.has_pending_input() {
        Span::styled(" \u{25cf} pending", Style::default().fg(Color::Yellow))
    } else {
        Span::styled(" \u{2713} up to date", Style::default().fg(Color::Green))
    };

    let line = Line::from(vec![
        Span::raw(" "),
        Span::styled(
            preview.quotation_number.as_str(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(" | Client: {} | Total: ", preview.client_name)),
        Span::styled(
            preview.grand_total.as_str(),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" |"),
        status,
        Span::styled(
            format!(" | Up: {}", state.uptime()),
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    let para = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Quotation Preview "),
    );
    f.render_widget(para, area);
}

fn draw_form(f: &mut Frame, state: &AppState, area: Rect) {
    let rows = state.rows();
    let inner_width = area.width.saturating_sub(2) as usize;
    let label_w = 18usize;
    let delete_w = 2usize;
    let value_w = inner_width.saturating_sub(label_w + delete_w + 2);

    let table_rows: Vec<Row> = rows
        .iter()
        .enumerate()
        .map(|(i, row)| form_row(row, state.form.editing && i == state.form.selected, value_w))
        .collect();

    let title = if state.form.editing {
        " Details (editing) "
    } else {
        " Details "
    };
    let table = Table::new(
        table_rows,
        [
            Constraint::Length(label_w as u16),
            Constraint::Min(0),
            Constraint::Length(delete_w as u16),
        ],
    )
    .block(Block::default().borders(Borders::ALL).title(title))
    .row_highlight_style(Style::default().bg(Color::DarkGray));

    let mut table_state = TableState::default();
    table_state.select(Some(state.form.selected));
    f.render_stateful_widget(table, area, &mut table_state);
}

fn form_row(row: &FormRow, editing: bool, value_w: usize) -> Row<'static> {
    match row.kind {
        RowKind::Heading(_) | RowKind::LineItemsHeading => Row::new(vec![Cell::from(
            row.label.clone(),
        )
        .style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )]),
        RowKind::AddItem => Row::new(vec![
            Cell::from(row.label.clone()).style(Style::default().fg(Color::Green))
        ]),
        RowKind::Field(_) | RowKind::LineItem(_) => {
            let value = if editing {
                // keep the tail visible while typing
                let tail_w = value_w.saturating_sub(1);
                let len = row.value.chars().count();
                let tail: String = row.value.chars().skip(len.saturating_sub(tail_w)).collect();
                format!("{}\u{258f}", tail)
            } else {
                truncate_with_ellipsis(&row.value, value_w).into_owned()
            };
            let value_style = if editing {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            let delete = if matches!(row.kind, RowKind::LineItem(_)) {
                Cell::from("\u{2715}").style(Style::default().fg(Color::Red))
            } else {
                Cell::from("")
            };
            Row::new(vec![
                Cell::from(format!("  {}", row.label)).style(Style::default().fg(Color::White)),
                Cell::from(value).style(value_style),
                delete,
            ])
        }
    }
}

fn draw_preview(f: &mut Frame, state: &AppState, area: Rect) {
    let inner_width = area.width.saturating_sub(2) as usize;
    let lines = preview_lines(state.engine.preview(), inner_width);
    let para = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Preview "))
        .wrap(Wrap { trim: false })
        .scroll((state.preview_scroll, 0));
    f.render_widget(para, area);
}

fn preview_lines(p: &Preview, width: usize) -> Vec<Line<'_>> {
    let dim = Style::default().fg(Color::DarkGray);
    let heading = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let rule = "\u{2500}".repeat(width);

    let mut lines = vec![
        Line::from(Span::styled(
            p.company_name.as_str(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center),
        Line::from(Span::styled(
            p.tagline.as_str(),
            Style::default().add_modifier(Modifier::ITALIC),
        ))
        .alignment(Alignment::Center),
        Line::from(Span::styled(rule.clone(), dim)),
        Line::from(Span::styled(
            "QUOTATION",
            Style::default().add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center),
        Line::from(""),
        labelled("Quotation No: ", &p.quotation_number),
        labelled("Date:         ", &p.date),
        labelled("Valid Until:  ", &p.valid_until),
        Line::from(""),
        Line::from(Span::styled("BILL TO", heading)),
    ];
    for value in [
        &p.client_name,
        &p.client_company,
        &p.client_address,
        &p.client_contact,
    ] {
        if !value.is_empty() {
            lines.push(Line::from(format!("  {}", value)));
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("PROJECT", heading)));
    lines.push(labelled("  Project:      ", &p.project_name));
    lines.push(labelled("  Delivery:     ", &p.delivery));
    lines.push(labelled("  Maintenance:  ", &p.maintenance));
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled(rule.clone(), dim)));
    lines.push(Line::from(vec![
        Span::styled("Description", heading),
        Span::raw("  "),
        Span::styled("Total: ", heading),
        Span::raw(p.items_total.as_str()),
    ]));
    lines.push(Line::from(Span::styled(rule.clone(), dim)));
    for item in &p.items {
        lines.push(Line::from(format!("\u{2022} {}", item)));
    }
    lines.push(Line::from(Span::styled(rule.clone(), dim)));

    lines.push(amount_line("Package Cost", &p.package_cost, Style::default()));
    lines.push(amount_line(
        &p.discount_name,
        &p.discount_amount,
        Style::default().fg(Color::Red),
    ));
    lines.push(amount_line(
        "GRAND TOTAL",
        &p.grand_total,
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
    ));
    lines
}

fn labelled<'a>(label: &'static str, value: &'a str) -> Line<'a> {
    Line::from(vec![
        Span::styled(label, Style::default().fg(Color::DarkGray)),
        Span::raw(value),
    ])
}

fn amount_line<'a>(label: &str, amount: &'a str, style: Style) -> Line<'a> {
    Line::from(vec![
        Span::raw(format!("{}: ", label)),
        Span::styled(amount, style),
    ])
}

fn draw_footer(f: &mut Frame, state: &AppState, area: Rect) {
    let key = Style::default().fg(Color::Yellow);
    let line = if state.prompt.is_some() {
        Line::from(Span::styled(
            "  Answer the prompt to continue",
            Style::default().fg(Color::DarkGray),
        ))
    } else if state.form.editing {
        Line::from(vec![
            Span::styled("  [Enter/Esc]", key),
            Span::raw(" done  "),
            Span::styled("[Backspace]", key),
            Span::raw(" delete  "),
            Span::raw("type to edit"),
        ])
    } else {
        Line::from(vec![
            Span::styled("  [q]", key),
            Span::raw("uit  "),
            Span::styled("[\u{2191}\u{2193}]", key),
            Span::raw(" select  "),
            Span::styled("[Enter]", key),
            Span::raw(" edit  "),
            Span::styled("[a]", key),
            Span::raw("dd  "),
            Span::styled("[x]", key),
            Span::raw(" remove  "),
            Span::styled("[u]", key),
            Span::raw("pdate  "),
            Span::styled("[p]", key),
            Span::raw("rint  "),
            Span::styled("[r]", key),
            Span::raw("eset  "),
            Span::styled("[t]", key),
            Span::raw("oggle  "),
            Span::styled("[PgUp/PgDn]", key),
            Span::raw(" scroll  "),
        ])
    };
    f.render_widget(Paragraph::new(line), area);
}

fn draw_notifications(f: &mut Frame, state: &AppState, now: Instant) {
    let area = f.area();
    let width = NOTIFICATION_WIDTH.min(area.width);
    let x = area.x + area.width - width;
    let mut y = area.y + 1;

    for (n, phase) in state.engine.notifications(now) {
        if y + NOTIFICATION_HEIGHT > area.y + area.height {
            break;
        }
        let (r, g, b) = n.kind.accent();
        let mut style = Style::default().bg(Color::Rgb(r, g, b)).fg(Color::White);
        if phase == Phase::Fading {
            style = style.add_modifier(Modifier::DIM);
        }
        let rect = Rect::new(x, y, width, NOTIFICATION_HEIGHT);
        let text = truncate_with_ellipsis(&n.message, width.saturating_sub(4) as usize);
        f.render_widget(Clear, rect);
        f.render_widget(
            Paragraph::new(text.into_owned())
                .style(style)
                .block(Block::default().borders(Borders::ALL).style(style)),
            rect,
        );
        y += NOTIFICATION_HEIGHT;
    }
}

fn draw_prompt(f: &mut Frame, prompt: &Prompt) {
    let (title, body, hint, color) = match prompt {
        Prompt::ConfirmReset => (
            " Confirm ",
            "Reset all fields to default values?",
            "[y] yes   [n] no",
            Color::Yellow,
        ),
        Prompt::Alert(message) => (" Alert ", message.as_str(), "press any key", Color::Red),
    };

    let area = centered_rect(f.area(), 50, 6);
    let lines = vec![
        Line::from(body),
        Line::from(""),
        Line::from(Span::styled(hint, Style::default().fg(Color::DarkGray))),
    ];
    f.render_widget(Clear, area);
    f.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(color))
                    .title(title),
            ),
        area,
    );
}

fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

fn truncate_with_ellipsis(s: &str, max_width: usize) -> Cow<'_, str> {
    let char_count = s.chars().count();
    if char_count <= max_width {
        Cow::Borrowed(s)
    } else if max_width <= 3 {
        Cow::Owned(".".repeat(max_width))
    } else {
        let end = s
            .char_indices()
            .nth(max_width - 3)
            .map(|(i, _)| i)
            .unwrap_or(s.len());
        Cow::Owned(format!("{}...", &s[..end]))
    }
}
