//! One navigation entry's visual state.
//!
//! A cell owns a single continuous `progress` value (0 = unselected,
//! 1 = selected) and derives every visual from it: content position, tint,
//! icon scale, circle position and elevation.

use std::time::Duration;

use ratatui::style::Modifier;

use crate::animation::icon::IconAnimation;
use crate::animation::{fast_out_slow_in, AnimatedValue, INSTANT};
use crate::item::{IconRef, Item, EMPTY};
use crate::units::{blend, Argb, Density};

/// Disable duration used before any selection has set one
pub const FALLBACK_DURATION: Duration = Duration::from_millis(250);

/// Horizontal offset (dp) the circle flies in from
const CIRCLE_FLY_IN_MARGIN: f32 = 24.0;

/// Circle elevation (dp) per unit of progress
const CIRCLE_ELEVATION: f32 = 4.0;

/// Elevation stays off below this progress to avoid shadow flicker
const ELEVATION_THRESHOLD: f32 = 0.7;

/// Below this progress the icon animation is toggled
const ICON_ANIMATION_THRESHOLD: f32 = 0.1;

/// Badge texts this long or longer are shortened for display
const BADGE_MAX_LEN: usize = 4;

/// Style values the container pushes down to each of its cells.
#[derive(Debug, Clone, PartialEq)]
pub struct CellStyle {
    pub default_icon_color: Argb,
    pub selected_icon_color: Argb,
    pub circle_color: Argb,
    pub count_text_color: Argb,
    pub count_background_color: Argb,
    pub count_typeface: Option<Modifier>,
    pub circle_size: f32,
    pub icon_size: f32,
    pub icon_padding: f32,
    pub title_text_size: f32,
    /// `None` sizes the title to its content
    pub title_height: Option<f32>,
    pub bezier_inner_height: f32,
    pub bezier_shadow_height: f32,
}

/// Snapshot of everything progress drives, in cell-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellVisuals {
    pub content_y: f32,
    pub tint: Argb,
    pub icon_scale: f32,
    pub circle_x: f32,
    pub circle_y: f32,
    pub elevation: f32,
}

#[derive(Debug)]
pub struct NavigationCell {
    title: String,
    icon: IconRef,
    icon_animation: IconAnimation,
    badge_count: String,
    extra_padding: f32,
    style: CellStyle,
    density: Density,

    badge_size: f32,
    badge_text_size: f32,
    circle_top_margin: f32,

    x: f32,
    width: f32,
    height: f32,

    is_enabled_cell: bool,
    is_from_left: bool,
    duration: Option<Duration>,
    progress: AnimatedValue,
    enabling: bool,
}

impl NavigationCell {
    pub fn new(item: &Item, style: CellStyle, density: Density) -> Self {
        let mut cell = Self {
            title: item.title.clone(),
            icon: item.icon.clone(),
            icon_animation: IconAnimation::new(item.icon.frames.clone()),
            badge_count: String::new(),
            extra_padding: density.dp(item.extra_padding),
            style: style.clone(),
            density,
            badge_size: 0.0,
            badge_text_size: 0.0,
            circle_top_margin: 0.0,
            x: 0.0,
            width: 0.0,
            height: 0.0,
            is_enabled_cell: false,
            is_from_left: false,
            duration: None,
            progress: AnimatedValue::new(0.0),
            enabling: false,
        };
        cell.apply_style(style);
        cell.set_badge_count(&item.count);
        cell
    }

    pub fn apply_style(&mut self, style: CellStyle) {
        self.badge_size = style.icon_size * 0.4;
        self.badge_text_size = self.badge_size.abs() * 0.65;
        self.circle_top_margin = style.title_height.unwrap_or(0.0) * 0.25;
        self.style = style;
    }

    pub fn style(&self) -> &CellStyle {
        &self.style
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Glyph to draw right now: the running animation frame, if any.
    pub fn icon_glyph(&self) -> &str {
        self.icon_animation.frame().unwrap_or(self.icon.glyph.as_str())
    }

    pub fn is_icon_animating(&self) -> bool {
        self.icon_animation.is_running()
    }

    /// Displayed badge text, which may be shortened compared to the model.
    pub fn badge_count(&self) -> &str {
        &self.badge_count
    }

    pub fn set_badge_count(&mut self, count: &str) {
        self.badge_count = if count == EMPTY {
            String::new()
        } else if count.chars().count() >= BADGE_MAX_LEN {
            let first: String = count.chars().take(1).collect();
            format!("{first}..")
        } else {
            count.to_string()
        };
    }

    pub fn badge_size(&self) -> f32 {
        self.badge_size
    }

    pub fn badge_text_size(&self) -> f32 {
        self.badge_text_size
    }

    pub fn icon_padding(&self) -> f32 {
        self.style.icon_padding + self.extra_padding
    }

    // ── Geometry ──────────────────────────────────────────────────────

    pub fn set_layout(&mut self, x: f32, width: f32, height: f32) {
        self.x = x;
        self.width = width;
        self.height = height;
    }

    pub fn x(&self) -> f32 {
        self.x
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    pub fn contains_x(&self, x: f32) -> bool {
        x >= self.x && x < self.x + self.width
    }

    // ── Selection state ───────────────────────────────────────────────

    pub fn is_enabled_cell(&self) -> bool {
        self.is_enabled_cell
    }

    pub fn is_from_left(&self) -> bool {
        self.is_from_left
    }

    pub fn set_from_left(&mut self, from_left: bool) {
        self.is_from_left = from_left;
    }

    pub fn duration(&self) -> Option<Duration> {
        self.duration
    }

    pub fn set_duration(&mut self, duration: Duration) {
        self.duration = Some(duration);
    }

    pub fn progress(&self) -> f32 {
        self.progress.value()
    }

    pub fn is_transitioning(&self) -> bool {
        self.progress.is_running()
    }

    /// Mark the cell selected and grow its indicator.
    ///
    /// The flag flips immediately; the visuals follow after a quarter of the
    /// duration so the outgoing cell starts shrinking first.
    pub fn enable_cell(&mut self, animate: bool) {
        if !self.is_enabled_cell {
            self.animate_progress(true, animate);
        }
        self.is_enabled_cell = true;
    }

    pub fn disable_cell(&mut self, animate: bool) {
        if self.is_enabled_cell {
            self.animate_progress(false, animate);
        }
        self.is_enabled_cell = false;
    }

    fn animate_progress(&mut self, enable: bool, animate: bool) {
        let d = self.duration.unwrap_or(FALLBACK_DURATION);
        let delay = if enable { d / 4 } else { Duration::ZERO };
        let duration = if animate { d } else { INSTANT };
        let target = if enable { 1.0 } else { 0.0 };

        self.enabling = enable;
        self.progress
            .animate_to(target, duration, delay, fast_out_slow_in);
        tracing::trace!(
            title = %self.title,
            enable,
            duration_ms = duration.as_millis() as u64,
            "cell progress animation started"
        );
    }

    /// Advance the progress animation and the icon frames.
    pub fn tick(&mut self, dt: Duration) {
        self.icon_animation.tick(dt);
        let before = self.progress.value();
        if let Some(applied) = self.progress.tick(dt) {
            // An instant transition can cross the threshold in a single frame
            if before < ICON_ANIMATION_THRESHOLD || applied.value < ICON_ANIMATION_THRESHOLD {
                if self.enabling {
                    self.icon_animation.start();
                } else {
                    self.icon_animation.stop();
                }
            }
        }
    }

    pub fn visuals(&self) -> CellVisuals {
        let p = self.progress.value();
        let s = &self.style;

        let content_y = (1.0 - p) * (s.bezier_inner_height + s.bezier_shadow_height)
            + p * (self.circle_top_margin + (s.circle_size - s.icon_size) / 2.0);

        let elevation = if p > ELEVATION_THRESHOLD {
            self.density.dp(p * CIRCLE_ELEVATION)
        } else {
            0.0
        };

        let margin = self.density.dp(CIRCLE_FLY_IN_MARGIN);
        let offset = if self.is_from_left { -margin } else { margin };

        CellVisuals {
            content_y,
            tint: blend(s.default_icon_color, s.selected_icon_color, p),
            icon_scale: (1.0 - p) * -0.2 + 1.0,
            circle_x: (1.0 - p) * offset + (self.width - s.circle_size).abs() / 2.0,
            circle_y: (1.0 - p) * self.height + self.circle_top_margin,
            elevation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::ItemSpec;

    fn style() -> CellStyle {
        CellStyle {
            default_icon_color: Argb::rgb(0, 0, 0),
            selected_icon_color: Argb::rgb(255, 255, 255),
            circle_color: Argb::rgb(0, 0x95, 0xB9),
            count_text_color: Argb::WHITE,
            count_background_color: Argb::rgb(0xEF, 0x6C, 0),
            count_typeface: None,
            circle_size: 30.0,
            icon_size: 20.0,
            icon_padding: 1.0,
            title_text_size: 6.0,
            title_height: Some(12.0),
            bezier_inner_height: 3.0,
            bezier_shadow_height: 12.0,
        }
    }

    fn cell() -> NavigationCell {
        let item = ItemSpec::new("Home", "⌂")
            .frames(vec!["a".into(), "b".into()])
            .into_item(0);
        let mut cell = NavigationCell::new(&item, style(), Density::default());
        cell.set_layout(0.0, 50.0, 50.0);
        cell
    }

    fn run(cell: &mut NavigationCell, total: Duration) {
        let step = Duration::from_millis(10);
        let mut elapsed = Duration::ZERO;
        while elapsed < total {
            cell.tick(step);
            elapsed += step;
        }
    }

    #[test]
    fn enable_flips_flag_before_visuals_complete() {
        let mut c = cell();
        c.set_duration(Duration::from_millis(400));
        c.enable_cell(true);
        assert!(c.is_enabled_cell());
        assert_eq!(c.progress(), 0.0);

        // Still inside the 100ms start delay
        run(&mut c, Duration::from_millis(90));
        assert_eq!(c.progress(), 0.0);

        run(&mut c, Duration::from_millis(500));
        assert_eq!(c.progress(), 1.0);
        assert!(!c.is_transitioning());
    }

    #[test]
    fn redundant_enable_does_not_restart() {
        let mut c = cell();
        c.set_duration(Duration::from_millis(200));
        c.enable_cell(true);
        run(&mut c, Duration::from_millis(150));
        let mid = c.progress();
        assert!(mid > 0.0);

        c.enable_cell(true);
        c.tick(Duration::from_millis(10));
        assert!(c.progress() >= mid);
        run(&mut c, Duration::from_millis(100));
        assert_eq!(c.progress(), 1.0);
    }

    #[test]
    fn disable_on_a_never_enabled_cell_is_a_noop() {
        let mut c = cell();
        c.disable_cell(true);
        assert!(!c.is_enabled_cell());
        assert!(!c.is_transitioning());
    }

    #[test]
    fn disable_without_duration_uses_fallback() {
        let mut c = cell();
        c.enable_cell(false);
        run(&mut c, Duration::from_millis(100));
        assert_eq!(c.progress(), 1.0);

        c.disable_cell(true);
        assert!(!c.is_enabled_cell());
        run(&mut c, Duration::from_millis(200));
        assert!(c.progress() > 0.0);
        run(&mut c, Duration::from_millis(60));
        assert_eq!(c.progress(), 0.0);
    }

    #[test]
    fn non_animated_disable_is_near_instant() {
        let mut c = cell();
        c.set_duration(Duration::from_millis(300));
        c.enable_cell(false);
        run(&mut c, Duration::from_millis(100));
        c.disable_cell(false);
        c.tick(Duration::from_millis(10));
        assert_eq!(c.progress(), 0.0);
    }

    #[test]
    fn visuals_at_rest_and_selected() {
        let mut c = cell();
        c.set_from_left(true);
        let rest = c.visuals();
        assert_eq!(rest.content_y, 15.0);
        assert_eq!(rest.tint, Argb::rgb(0, 0, 0));
        assert!((rest.icon_scale - 0.8).abs() < 1e-6);
        assert_eq!(rest.circle_x, -24.0 + 10.0);
        assert_eq!(rest.circle_y, 50.0 + 3.0);
        assert_eq!(rest.elevation, 0.0);

        c.enable_cell(false);
        run(&mut c, Duration::from_millis(100));
        let on = c.visuals();
        assert_eq!(on.content_y, 3.0 + 5.0);
        assert_eq!(on.tint, Argb::rgb(255, 255, 255));
        assert_eq!(on.icon_scale, 1.0);
        assert_eq!(on.circle_x, 10.0);
        assert_eq!(on.circle_y, 3.0);
        assert_eq!(on.elevation, 4.0);
    }

    #[test]
    fn circle_flies_in_from_the_right_by_default() {
        let c = cell();
        assert_eq!(c.visuals().circle_x, 24.0 + 10.0);
    }

    #[test]
    fn long_badges_are_shortened_for_display_only() {
        let mut c = cell();
        c.set_badge_count("12");
        assert_eq!(c.badge_count(), "12");
        c.set_badge_count("1234");
        assert_eq!(c.badge_count(), "1..");
        c.set_badge_count(EMPTY);
        assert_eq!(c.badge_count(), "");
    }

    #[test]
    fn derived_sizes_follow_style() {
        let c = cell();
        assert_eq!(c.badge_size(), 8.0);
        assert!((c.badge_text_size() - 5.2).abs() < 1e-4);
        assert_eq!(c.icon_padding(), 1.0);
    }

    #[test]
    fn icon_animation_starts_on_enable_and_stops_on_disable() {
        let mut c = cell();
        c.set_duration(Duration::from_millis(100));
        c.enable_cell(true);
        run(&mut c, Duration::from_millis(40));
        assert!(c.is_icon_animating());

        run(&mut c, Duration::from_millis(200));
        c.disable_cell(true);
        run(&mut c, Duration::from_millis(200));
        assert!(!c.is_icon_animating());
        assert_eq!(c.icon_glyph(), "⌂");
    }

    #[test]
    fn instant_enable_still_starts_icon_animation() {
        let mut c = cell();
        c.enable_cell(false);
        for _ in 0..20 {
            c.tick(Duration::from_millis(16));
        }
        assert_eq!(c.progress(), 1.0);
        assert!(c.is_icon_animating());

        c.disable_cell(false);
        c.tick(Duration::from_millis(16));
        assert_eq!(c.progress(), 0.0);
        assert!(!c.is_icon_animating());
    }
}
