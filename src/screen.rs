use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Padding, Paragraph};
use ratatui::Frame;

use curvenav::ui::components::status_bar;
use curvenav::ui::theme::Theme;
use curvenav::BottomNavigationWidget;

use crate::app::App;

/// Rows given to the navigation bar
const NAV_HEIGHT: u16 = 6;

const KEYS: &[(&str, &str)] = &[
    ("←→", "Move"),
    ("1-9", "Select"),
    ("b", "Badge+"),
    ("c", "Clear"),
    ("a", "Anim"),
    ("q", "Quit"),
];

/// Top-level draw function
pub fn draw(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(NAV_HEIGHT),
            Constraint::Length(1),
        ])
        .split(f.area());

    render_header(f, &app.theme, chunks[0]);
    render_page(f, app, chunks[1]);

    let frame = Block::new().padding(Padding::horizontal(1));
    // Taps are hit-tested against the area the cells are laid out in
    app.nav_area = frame.inner(chunks[2]);
    f.render_stateful_widget(
        BottomNavigationWidget::new().block(frame),
        chunks[2],
        &mut app.nav,
    );

    let status = vec![Span::styled(
        if app.nav.is_animating() { "moving " } else { "idle " },
        Style::default().fg(app.theme.fg_dim),
    )];
    status_bar::render(f, KEYS, status, &app.theme, chunks[3]);

    if let Some(ref msg) = app.toast_message {
        render_toast(f, msg, app.toast_is_error, &app.theme);
    }
}

fn render_header(f: &mut Frame, theme: &Theme, area: Rect) {
    let block = Block::default()
        .title(Line::from(Span::styled(" curvenav ", theme.title)))
        .title_alignment(Alignment::Left)
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border));
    let hint = Paragraph::new(Line::from(Span::styled(
        "click an item or use the keys below",
        theme.help_desc,
    )))
    .alignment(Alignment::Right)
    .block(block);
    f.render_widget(hint, area);
}

/// The "page" for the selected item plus a readout of the last transition.
fn render_page(f: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let nav = &app.nav;

    let title = nav
        .selected_id()
        .and_then(|id| nav.get_item_by_id(id))
        .map(|item| format!("{} {}", item.icon.glyph, item.title))
        .unwrap_or_else(|| "nothing selected".into());

    let label = Style::default().fg(theme.fg_dim);
    let value = Style::default().fg(theme.fg);

    let mut lines = vec![
        Line::from(Span::styled(
            title,
            Style::default()
                .fg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )),
        Line::default(),
    ];

    if let Some(t) = nav.last_transition() {
        lines.push(Line::from(vec![
            Span::styled("  last move  ", label),
            Span::styled(
                format!(
                    "{} → {} ({} cells, {}ms{})",
                    t.current.map_or("-".into(), |c| c.to_string()),
                    t.destination,
                    t.difference,
                    t.animation_duration.as_millis(),
                    if t.morph { ", morph" } else { "" },
                ),
                value,
            ),
        ]));
    }

    let badges: Vec<String> = nav
        .items()
        .iter()
        .filter(|item| item.has_badge())
        .map(|item| format!("{}={}", item.title, item.count))
        .collect();
    lines.push(Line::from(vec![
        Span::styled("  badges     ", label),
        Span::styled(
            if badges.is_empty() {
                "none".to_string()
            } else {
                badges.join("  ")
            },
            value,
        ),
    ]));
    lines.push(Line::from(vec![
        Span::styled("  animation  ", label),
        Span::styled(
            if nav.style().has_animation {
                format!("{}ms base", nav.style().animation_duration.as_millis())
            } else {
                "off".to_string()
            },
            value,
        ),
    ]));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme.border));
    f.render_widget(Paragraph::new(lines).block(block), area);
}

/// Render a temporary toast notification at the top-right
fn render_toast(f: &mut Frame, message: &str, is_error: bool, theme: &Theme) {
    let area = f.area();
    if area.width < 8 || area.height < 4 {
        return;
    }
    let width = (message.chars().count() as u16 + 6).min(area.width - 4);
    let x = area.width.saturating_sub(width + 2);
    let toast_area = Rect::new(x, 1, width, 3);

    f.render_widget(Clear, toast_area);

    let color = if is_error { theme.error } else { theme.success };
    let icon = if is_error { " ✗ " } else { " ✓ " };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color));

    let text = Paragraph::new(Line::from(vec![
        Span::styled(icon, Style::default().fg(color).add_modifier(Modifier::BOLD)),
        Span::styled(message, Style::default().fg(theme.fg)),
    ]))
    .block(block);

    f.render_widget(text, toast_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use curvenav::config::Config;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use tokio::sync::mpsc;

    #[test]
    fn draws_page_and_records_nav_area() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut app = App::new(&Config::default(), tx);
        app.show_toast("hello", false);

        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        terminal.draw(|f| draw(f, &mut app)).unwrap();

        assert_eq!(app.nav_area, Rect::new(1, 13, 78, NAV_HEIGHT));
        assert_eq!(app.nav.size(), (78.0, NAV_HEIGHT as f32));

        let buf = terminal.backend().buffer();
        let text: String = buf.content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("Home"));
        assert!(text.contains("hello"));
    }
}
