use super::modal::centered_rect;
use crate::app::{App, LoginField};
use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// The session gate: two credential fields, one submit, a persistent
/// error line. Nothing behind it renders until login succeeds.
pub(crate) fn render(frame: &mut Frame, app: &App) {
    let area = centered_rect(46, 10, frame.area());

    let account_focused = app.login.focus == LoginField::Account;
    let masked = "•".repeat(app.login.password.len());

    let mut text = vec![
        Line::raw(""),
        field_line("Account ", &app.login.account, account_focused),
        field_line("Password", &masked, !account_focused),
        Line::raw(""),
    ];

    if app.login.pending {
        text.push(Line::styled(
            "Authenticating...",
            Style::default().fg(Color::DarkGray),
        ));
    } else if let Some(error) = &app.login.error {
        text.push(Line::styled(
            error.clone(),
            Style::default().fg(Color::Red),
        ));
    } else {
        text.push(Line::styled(
            "Tab to switch · Enter to sign in · Esc to quit",
            Style::default().fg(Color::DarkGray),
        ));
    }

    let paragraph = Paragraph::new(text).alignment(Alignment::Left).block(
        Block::default()
            .title(" vigil — sign in ")
            .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(paragraph, area);
}

fn field_line(label: &str, value: &str, focused: bool) -> Line<'static> {
    let marker = if focused { "▸ " } else { "  " };
    let value_style = if focused {
        Style::default().add_modifier(Modifier::UNDERLINED)
    } else {
        Style::default()
    };

    Line::from(vec![
        Span::raw(marker.to_string()),
        Span::styled(format!("{label}: "), Style::default().fg(Color::DarkGray)),
        Span::styled(value.to_string(), value_style),
    ])
}
