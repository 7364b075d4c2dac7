//! Paints a [`BottomNavigation`] into a ratatui buffer.
//!
//! Coordinates inside the navigation are terminal cells relative to the
//! widget area: x in columns, y in rows.

use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::{Block, StatefulWidget, Widget};
use unicode_width::UnicodeWidthStr;

use crate::cell::NavigationCell;
use crate::navigation::BottomNavigation;
use crate::units::tint_style;

/// Terminal cells are roughly twice as tall as wide
const CELL_ASPECT: f32 = 2.0;

#[derive(Debug, Default, Clone)]
pub struct BottomNavigationWidget<'a> {
    block: Option<Block<'a>>,
}

impl<'a> BottomNavigationWidget<'a> {
    pub fn new() -> Self {
        Self { block: None }
    }

    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

}

impl StatefulWidget for BottomNavigationWidget<'_> {
    type State = BottomNavigation;

    fn render(self, area: Rect, buf: &mut Buffer, nav: &mut BottomNavigation) {
        let area = match self.block {
            Some(block) => {
                let inner = block.inner(area);
                block.render(area, buf);
                inner
            }
            None => area,
        };
        if area.is_empty() {
            return;
        }

        let (width, height) = nav.size();
        if width != area.width as f32 || height != area.height as f32 {
            nav.measure(area.width as f32, area.height as f32);
        }

        render_curve(nav, area, buf);
        for cell in nav.cells() {
            render_cell(nav, cell, area, buf);
        }
    }
}

/// Write a symbol if `(x, y)` (area-relative) falls inside `area`.
fn put(buf: &mut Buffer, area: Rect, x: i32, y: i32, symbol: &str, style: Style) {
    if x < 0 || y < 0 || x >= area.width as i32 || y >= area.height as i32 {
        return;
    }
    let pos = (area.x + x as u16, area.y + y as u16);
    if let Some(cell) = buf.cell_mut(pos) {
        cell.set_symbol(symbol).set_style(style);
    }
}

fn render_curve(nav: &BottomNavigation, area: Rect, buf: &mut Buffer) {
    let curve = nav.curve();
    let dims = curve.dimensions;
    let band_top = dims.shadow_height.round() as i32;
    let half = (dims.inner_width / 2.0).max(1.0);
    let flatten = 1.0 - 0.5 * curve.bulge();

    let band = Style::default().bg(curve.color.to_color());
    let notch_edge = Style::default().fg(curve.color.to_color());
    let shadow = Style::default().fg(curve.shadow_color.to_color());

    for col in 0..area.width as i32 {
        let dx = (col as f32 + 0.5 - curve.bezier_x()) / half;
        let depth = if dx.abs() < 1.0 {
            ((1.0 - dx * dx) * 2.0 * flatten).round() as i32
        } else {
            0
        };

        match depth {
            0 => {
                put(buf, area, col, band_top - 1, "▁", shadow);
                put(buf, area, col, band_top, " ", band);
            }
            1 => put(buf, area, col, band_top, "▄", notch_edge),
            _ => {}
        }
        for row in band_top + 1..area.height as i32 {
            put(buf, area, col, row, " ", band);
        }
    }
}

fn render_cell(
    nav: &BottomNavigation,
    cell: &NavigationCell,
    area: Rect,
    buf: &mut Buffer,
) {
    let style = cell.style();
    let visuals = cell.visuals();
    let progress = cell.progress();
    let center = cell.center_x();

    // Circle behind the icon, sliding up from below while it grows in
    if progress > 0.0 {
        let rows = style.circle_size.round().max(1.0) as i32;
        let radius = rows as f32 / 2.0;
        let top = visuals.circle_y.round() as i32;
        let circle_center = cell.x() + visuals.circle_x + style.circle_size / 2.0;
        let circle = Style::default().bg(style.circle_color.to_color());

        for r in 0..rows {
            let dy = (r as f32 + 0.5 - radius) / radius;
            let span = (1.0 - dy * dy).max(0.0).sqrt() * radius * CELL_ASPECT;
            let left = (circle_center - span).round() as i32;
            let right = (circle_center + span).round() as i32;
            for col in left..right {
                put(buf, area, col, top + r, " ", circle);
            }
        }

        if visuals.elevation > 0.0 {
            let shadow = Style::default().fg(nav.curve().shadow_color.to_color());
            let left = (circle_center - radius).round() as i32;
            let right = (circle_center + radius).round() as i32;
            for col in left..right {
                put(buf, area, col, top + rows, "▀", shadow);
            }
        }
    }

    // Icon
    let mut icon_style = tint_style(visuals.tint);
    icon_style = if visuals.icon_scale >= 1.0 {
        icon_style.add_modifier(Modifier::BOLD)
    } else if visuals.icon_scale < 0.9 {
        icon_style.add_modifier(Modifier::DIM)
    } else {
        icon_style
    };
    let glyph = cell.icon_glyph();
    let icon_row = (visuals.content_y + style.circle_size / 2.0).round() as i32;
    let icon_col = (center - glyph.width() as f32 / 2.0).floor() as i32;
    put(buf, area, icon_col, icon_row, glyph, icon_style);

    // Badge, top-right of the icon
    let badge = cell.badge_count();
    if !badge.is_empty() {
        let mut badge_style = Style::default()
            .fg(style.count_text_color.to_color())
            .bg(style.count_background_color.to_color());
        if let Some(modifier) = style.count_typeface {
            badge_style = badge_style.add_modifier(modifier);
        }
        let text = format!(" {badge} ");
        let start = icon_col + glyph.width() as i32;
        for (i, ch) in text.chars().enumerate() {
            let mut tmp = [0u8; 4];
            put(
                buf,
                area,
                start + i as i32,
                icon_row - 1,
                ch.encode_utf8(&mut tmp),
                badge_style,
            );
        }
    }

    // Title on the bottom row
    let max = cell.width().floor().max(0.0) as usize;
    let title = truncate(cell.title(), max);
    if !title.is_empty() {
        let row = area.height as i32 - 1;
        let col = (center - title.width() as f32 / 2.0).floor() as i32;
        let title_style = tint_style(visuals.tint).bg(nav.curve().color.to_color());
        for (i, ch) in title.chars().enumerate() {
            let mut tmp = [0u8; 4];
            put(buf, area, col + i as i32, row, ch.encode_utf8(&mut tmp), title_style);
        }
    }
}

/// Cut `text` to at most `max` display columns.
fn truncate(text: &str, max: usize) -> String {
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w > max {
            break;
        }
        used += w;
        out.push(ch);
    }
    out
}
