use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

pub(crate) fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Blocking failure alert carrying the raw server text.
pub(crate) fn render_alert(frame: &mut Frame, message: &str) {
    let area = centered_rect(60, 7, frame.area());
    frame.render_widget(Clear, area);

    let text = vec![
        Line::raw(""),
        Line::from(message.to_string()),
        Line::raw(""),
        Line::styled(
            "press Enter to dismiss",
            Style::default().fg(Color::DarkGray),
        ),
    ];
    let paragraph = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title(" Error ")
                .title_style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        );
    frame.render_widget(paragraph, area);
}

/// Interactive confirmation shown before any delete call goes out.
pub(crate) fn render_confirm(frame: &mut Frame, id: &str) {
    let area = centered_rect(48, 7, frame.area());
    frame.render_widget(Clear, area);

    let text = vec![
        Line::raw(""),
        Line::from(format!("Delete machine {id}?")),
        Line::raw(""),
        Line::styled(
            "y to confirm · n to cancel",
            Style::default().fg(Color::DarkGray),
        ),
    ];
    let paragraph = Paragraph::new(text)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title(" Confirm ")
                .title_style(
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                )
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow)),
        );
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::centered_rect;
    use ratatui::layout::Rect;

    #[test]
    fn test_centered_rect() {
        let area = Rect::new(0, 0, 100, 40);
        let popup = centered_rect(60, 8, area);
        assert_eq!(popup, Rect::new(20, 16, 60, 8));
    }

    #[test]
    fn test_centered_rect_clamps_to_area() {
        let area = Rect::new(0, 0, 30, 5);
        let popup = centered_rect(60, 8, area);
        assert_eq!(popup.width, 30);
        assert_eq!(popup.height, 5);
    }
}
