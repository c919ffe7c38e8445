use ratatui::{
    style::{Color, Modifier, Style},
    text::Span,
};

/// Gauge color steps up at these fixed percentages.
pub(crate) const AMBER_THRESHOLD: f64 = 50.0;
pub(crate) const RED_THRESHOLD: f64 = 80.0;

const BAR_WIDTH: usize = 10;

pub(crate) fn gauge_color(percent: f64) -> Color {
    if percent >= RED_THRESHOLD {
        Color::Red
    } else if percent >= AMBER_THRESHOLD {
        Color::Yellow
    } else {
        Color::Green
    }
}

/// Style for a gauge at `percent`. At the red threshold the gauge also
/// blinks, the terminal stand-in for the pulsing alert.
pub(crate) fn gauge_style(percent: f64) -> Style {
    let style = Style::default().fg(gauge_color(percent));
    if percent >= RED_THRESHOLD {
        return style.add_modifier(Modifier::SLOW_BLINK | Modifier::BOLD);
    }
    style
}

pub(crate) fn gauge_bar(percent: f64, width: usize) -> String {
    let clamped = percent.clamp(0.0, 100.0);
    let filled = ((clamped / 100.0) * width as f64).round() as usize;
    let mut bar = "█".repeat(filled.min(width));
    bar.push_str(&"░".repeat(width.saturating_sub(filled)));
    bar
}

pub(crate) fn gauge_span(percent: f64) -> Span<'static> {
    Span::styled(
        format!("{} {:>3.0}%", gauge_bar(percent, BAR_WIDTH), percent),
        gauge_style(percent),
    )
}

#[cfg(test)]
mod tests {
    use super::{gauge_bar, gauge_color, gauge_span, gauge_style};
    use ratatui::style::{Color, Modifier};

    #[test]
    fn test_gauge_color_thresholds() {
        assert_eq!(gauge_color(0.0), Color::Green);
        assert_eq!(gauge_color(49.9), Color::Green);
        assert_eq!(gauge_color(50.0), Color::Yellow);
        assert_eq!(gauge_color(79.9), Color::Yellow);
        assert_eq!(gauge_color(80.0), Color::Red);
        assert_eq!(gauge_color(100.0), Color::Red);
    }

    #[test]
    fn test_alert_blink_only_at_red() {
        assert!(!gauge_style(79.9).add_modifier.contains(Modifier::SLOW_BLINK));
        assert!(gauge_style(80.0).add_modifier.contains(Modifier::SLOW_BLINK));
    }

    #[test]
    fn test_gauge_bar_bounds() {
        assert_eq!(gauge_bar(0.0, 4), "░░░░");
        assert_eq!(gauge_bar(100.0, 4), "████");
        // Out-of-range values clamp instead of overflowing the bar.
        assert_eq!(gauge_bar(250.0, 4), "████");
        assert_eq!(gauge_bar(-5.0, 4), "░░░░");
    }

    #[test]
    fn test_gauge_span_text() {
        let span = gauge_span(50.0);
        assert!(span.content.ends_with("50%"));
    }
}
