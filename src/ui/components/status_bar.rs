use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::ui::theme::Theme;

/// Render a one-line status bar: keybinding hints on the left, free-form
/// status spans on the right.
pub fn render(
    f: &mut Frame,
    keys: &[(&str, &str)],
    status: Vec<Span<'_>>,
    theme: &Theme,
    area: Rect,
) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(area);

    let key_spans: Vec<Span> = keys
        .iter()
        .flat_map(|(key, desc)| {
            vec![
                Span::styled(format!(" {} ", key), theme.help_key),
                Span::styled(format!("{} ", desc), theme.help_desc),
                Span::styled("│", Style::default().fg(theme.border)),
            ]
        })
        .collect();

    let help = Paragraph::new(Line::from(key_spans)).style(theme.status_bar);
    f.render_widget(help, chunks[0]);

    let status = Paragraph::new(Line::from(status))
        .style(theme.status_bar)
        .alignment(Alignment::Right);
    f.render_widget(status, chunks[1]);
}
