use super::gauge::{gauge_span, gauge_style};
use crate::{
    app::App,
    editor::buffer::{EditBuffer, EditField},
};
use chrono::NaiveDateTime;
use common::machine::MachineRecord;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

const COLUMN_WIDTHS: [Constraint; 12] = [
    Constraint::Length(13),
    Constraint::Min(12),
    Constraint::Length(14),
    Constraint::Length(15),
    Constraint::Length(14),
    Constraint::Length(4),
    Constraint::Length(9),
    Constraint::Length(14),
    Constraint::Length(15),
    Constraint::Length(15),
    Constraint::Min(26),
    Constraint::Length(19),
];

pub(crate) fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(frame.area());

    render_header(frame, chunks[0], app);
    if app.store.registry().is_empty() {
        render_loading(frame, chunks[1]);
    } else {
        render_table(frame, chunks[1], app);
    }
    render_footer(frame, chunks[2], app);
}

fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let status = if app.store.is_connected() {
        Span::styled("● live", Style::default().fg(Color::Green))
    } else {
        Span::styled("○ offline", Style::default().fg(Color::DarkGray))
    };

    let line = Line::from(vec![
        Span::styled(
            "vigil",
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" — fleet telemetry   "),
        status,
        Span::styled(
            format!("   {} machines", app.store.registry().len()),
            Style::default().fg(Color::DarkGray),
        ),
    ]);

    let paragraph = Paragraph::new(line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(paragraph, area);
}

/// Placeholder shown until the seed pull or the first push fills the
/// registry.
fn render_loading(frame: &mut Frame, area: Rect) {
    let text = vec![
        Line::raw(""),
        Line::raw(""),
        Line::styled("Connecting...", Style::default().fg(Color::Cyan)),
        Line::raw(""),
        Line::styled(
            "waiting for the first fleet snapshot",
            Style::default().fg(Color::DarkGray),
        ),
    ];
    let paragraph = Paragraph::new(text).alignment(Alignment::Center).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(paragraph, area);
}

fn render_table(frame: &mut Frame, area: Rect, app: &App) {
    let header = Row::new([
        "ID", "Hostname", "OS", "IP", "Platform", "CPU", "RAM", "Disk (GB)", "%CPU", "%RAM",
        "Volumes", "Updated",
    ])
    .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));

    let rows: Vec<Row<'static>> = app
        .store
        .registry()
        .iter()
        .map(|(id, record)| machine_row(id, record, app))
        .collect();

    let table = Table::new(rows, COLUMN_WIDTHS)
        .header(header)
        .column_spacing(1)
        .block(
            Block::default()
                .title(" machines ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .row_highlight_style(Style::default().bg(Color::DarkGray));

    let mut state = TableState::default();
    state.select(Some(app.selected));
    frame.render_stateful_widget(table, area, &mut state);
}

fn machine_row(id: &str, record: &MachineRecord, app: &App) -> Row<'static> {
    let buffer = if app.editor.is_editing(id) {
        app.editor.buffer()
    } else {
        None
    };
    let focus = app.editor.field();

    let height = record.disks.len().max(1) as u16;
    Row::new(vec![
        Cell::from(short_id(id)),
        text_cell(&record.hostname, buffer, EditField::Hostname, focus),
        Cell::from(record.os.clone()),
        text_cell(&record.ip, buffer, EditField::Ip, focus),
        text_cell(&record.platform, buffer, EditField::Platform, focus),
        Cell::from(record.cpu_count.to_string()),
        Cell::from(format!("{:.1} GB", record.ram_total)),
        Cell::from(format!("{:.1} / {:.1}", record.disk_used, record.disk_total)),
        Cell::from(gauge_span(record.cpu_percent)),
        Cell::from(gauge_span(record.ram_percent)),
        volumes_cell(record),
        Cell::from(format_timestamp(&record.last_update)),
    ])
    .height(height)
}

/// Cell for an editable column: shows the pending buffer value while the
/// row is in edit mode, with the focused field highlighted.
fn text_cell(
    value: &str,
    buffer: Option<&EditBuffer>,
    field: EditField,
    focus: Option<EditField>,
) -> Cell<'static> {
    let Some(buffer) = buffer else {
        if value.is_empty() {
            return Cell::from(Span::styled("-", Style::default().fg(Color::DarkGray)));
        }
        return Cell::from(value.to_string());
    };

    let pending = match field {
        EditField::Hostname => &buffer.hostname,
        EditField::Ip => &buffer.ip,
        EditField::Platform => &buffer.platform,
    };
    let style = if focus == Some(field) {
        Style::default().fg(Color::Black).bg(Color::Yellow)
    } else {
        Style::default().fg(Color::Yellow)
    };
    Cell::from(Span::styled(format!("{pending}▏"), style))
}

fn volumes_cell(record: &MachineRecord) -> Cell<'static> {
    if record.disks.is_empty() {
        return Cell::from(Span::styled("-", Style::default().fg(Color::DarkGray)));
    }

    let lines: Vec<Line<'static>> = record
        .disks
        .iter()
        .map(|disk| {
            Line::from(vec![
                Span::raw(format!(
                    "{}: {:.1} / {:.1} ",
                    disk.mount, disk.used, disk.total
                )),
                Span::styled(format!("{:>3.0}%", disk.percent), gauge_style(disk.percent)),
            ])
        })
        .collect();
    Cell::from(Text::from(lines))
}

fn render_footer(frame: &mut Frame, area: Rect, app: &App) {
    let hints = if app.editor.is_active() {
        String::from("Tab field · ↑/↓ platform preset · Enter save · Esc cancel")
    } else {
        let mut parts = vec!["↑/↓ select", "e edit"];
        if app.capabilities.save {
            parts.push("s save");
        }
        if app.capabilities.delete {
            parts.push("d delete");
        }
        parts.push("q quit");
        parts.join(" · ")
    };

    let paragraph = Paragraph::new(Line::styled(hints, Style::default().fg(Color::DarkGray)));
    frame.render_widget(paragraph, area);
}

fn short_id(id: &str) -> String {
    const MAX: usize = 12;
    if id.chars().count() > MAX {
        let prefix: String = id.chars().take(MAX).collect();
        return format!("{prefix}…");
    }
    id.to_string()
}

/// The server stamps `last_update` as a naive ISO-8601 string; anything
/// unparsable renders as-is.
fn format_timestamp(raw: &str) -> String {
    if raw.is_empty() {
        return String::from("-");
    }
    match NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        Ok(parsed) => parsed.format("%Y-%m-%d %H:%M:%S").to_string(),
        Err(_) => raw.to_string(),
    }
}
