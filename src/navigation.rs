//! The bottom navigation container.
//!
//! Owns the ordered items and their cells, drives the curve's control point
//! and each cell's progress whenever the selection changes, and exposes the
//! badge and listener surface. Lookups on unknown ids never fail: they
//! return `None`/empty values and mutators become no-ops.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use ratatui::style::Modifier;
use serde::{Deserialize, Deserializer};
use tracing::{debug, trace, warn};

use crate::animation::INSTANT;
use crate::cell::{CellStyle, NavigationCell};
use crate::config::{parse_typeface, Config};
use crate::curve::{CurveDimensions, CurveView};
use crate::error::{CurveNavError, IgnoreReason, PropertyUpdate};
use crate::item::{Item, ItemId, ItemSpec, EMPTY};
use crate::units::{Argb, Density};

/// Extra travel time per cell crossed
const PER_CELL_TRAVEL: Duration = Duration::from_millis(100);

/// Callback taking the affected item.
pub type NavListener = Box<dyn FnMut(&Item)>;

// ─── Direction ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Ltr = 0,
    Rtl = 1,
}

impl TryFrom<i64> for Direction {
    type Error = CurveNavError;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Direction::Ltr),
            1 => Ok(Direction::Rtl),
            other => Err(CurveNavError::InvalidDirection(other.to_string())),
        }
    }
}

impl FromStr for Direction {
    type Err = CurveNavError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ltr" | "0" => Ok(Direction::Ltr),
            "rtl" | "1" => Ok(Direction::Rtl),
            other => Err(CurveNavError::InvalidDirection(other.to_string())),
        }
    }
}

impl<'de> Deserialize<'de> for Direction {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Code(i64),
            Name(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Code(code) => Direction::try_from(code),
            Repr::Name(name) => name.parse(),
        }
        .map_err(serde::de::Error::custom)
    }
}

// ─── Style ──────────────────────────────────────────────────────────────

/// Container-wide style. Sizes are in pixels (already density-scaled).
#[derive(Debug, Clone, PartialEq)]
pub struct NavStyle {
    pub animation_duration: Duration,
    pub has_animation: bool,

    pub default_icon_color: Argb,
    pub selected_icon_color: Argb,
    pub background_color: Argb,
    pub circle_color: Argb,
    pub shadow_color: Argb,
    pub count_text_color: Argb,
    pub count_background_color: Argb,
    pub count_typeface: Option<Modifier>,

    pub cell_height: f32,
    pub circle_size: f32,
    pub icon_size: f32,
    pub icon_padding: f32,
    pub title_text_size: f32,
    pub title_height: Option<f32>,

    pub bezier_shadow_height: f32,
    pub bezier_outer_width: f32,
    pub bezier_outer_height: f32,
    pub bezier_inner_width: f32,
    pub bezier_inner_height: f32,
}

impl Default for NavStyle {
    fn default() -> Self {
        Self {
            animation_duration: Duration::from_millis(200),
            has_animation: true,
            default_icon_color: Argb::WHITE,
            selected_icon_color: Argb::WHITE,
            background_color: Argb(0xFF00_95B9),
            circle_color: Argb(0xFF00_95B9),
            shadow_color: Argb(0x5F21_2121),
            count_text_color: Argb::WHITE,
            count_background_color: Argb(0xFFEF_6C00),
            count_typeface: None,
            cell_height: 90.0,
            circle_size: 48.0,
            icon_size: 48.0,
            icon_padding: 0.0,
            title_text_size: 16.0,
            title_height: None,
            bezier_shadow_height: 8.0,
            bezier_outer_width: 72.0,
            bezier_outer_height: 8.0,
            bezier_inner_width: 124.0,
            bezier_inner_height: 0.0,
        }
    }
}

impl NavStyle {
    pub fn from_config(config: &Config, density: Density) -> Self {
        let layout = &config.layout;
        let colors = &config.colors;
        Self {
            animation_duration: Duration::from_millis(config.animation.duration_ms),
            has_animation: config.animation.enabled,
            default_icon_color: colors.default_icon,
            selected_icon_color: colors.selected_icon,
            background_color: colors.background,
            circle_color: colors.circle,
            shadow_color: colors.shadow,
            count_text_color: colors.count_text,
            count_background_color: colors.count_background,
            count_typeface: layout
                .count_typeface
                .as_deref()
                .and_then(|name| parse_typeface(name).ok().flatten()),
            cell_height: density.dp(layout.cell_height),
            circle_size: density.dp(layout.circle_size),
            icon_size: density.dp(layout.icon_size),
            icon_padding: density.dp(layout.icon_padding),
            title_text_size: layout.title_text_size,
            title_height: None,
            bezier_shadow_height: density.dp(layout.bezier_shadow_height),
            bezier_outer_width: density.dp(layout.bezier_outer_width),
            bezier_outer_height: density.dp(layout.bezier_outer_height),
            bezier_inner_width: density.dp(layout.bezier_inner_width),
            bezier_inner_height: density.dp(layout.bezier_inner_height),
        }
    }

    /// Setting the title height also derives the title text size from it.
    pub fn set_title_height(&mut self, height: f32) {
        self.title_height = Some(height);
        self.title_text_size = height.abs() * 0.6;
    }

    pub fn cell_style(&self) -> CellStyle {
        CellStyle {
            default_icon_color: self.default_icon_color,
            selected_icon_color: self.selected_icon_color,
            circle_color: self.circle_color,
            count_text_color: self.count_text_color,
            count_background_color: self.count_background_color,
            count_typeface: self.count_typeface,
            circle_size: self.circle_size,
            icon_size: self.icon_size,
            icon_padding: self.icon_padding,
            title_text_size: self.title_text_size,
            title_height: self.title_height,
            bezier_inner_height: self.bezier_inner_height,
            bezier_shadow_height: self.bezier_shadow_height,
        }
    }

    pub fn curve_dimensions(&self) -> CurveDimensions {
        CurveDimensions {
            shadow_height: self.bezier_shadow_height,
            outer_width: self.bezier_outer_width,
            outer_height: self.bezier_outer_height,
            inner_width: self.bezier_inner_width,
            inner_height: self.bezier_inner_height,
        }
    }
}

/// Travel time for a selection jump across `difference` cells.
pub fn travel_duration(difference: usize, base: Duration) -> Duration {
    PER_CELL_TRAVEL * difference as u32 + base
}

/// What the last selection change computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub destination: usize,
    /// Position of the previous selection, `None` if nothing was selected
    pub current: Option<usize>,
    pub difference: usize,
    pub calculated_duration: Duration,
    /// Duration actually used for the curve (1ms when not animating)
    pub animation_duration: Duration,
    pub morph: bool,
}

#[derive(Debug, Clone, Copy)]
struct PendingClear {
    item_id: ItemId,
    remaining: Duration,
}

// ─── Container ──────────────────────────────────────────────────────────

pub struct BottomNavigation {
    items: Vec<Item>,
    cells: Vec<NavigationCell>,
    curve: CurveView,
    style: NavStyle,
    density: Density,
    direction: Direction,

    selected_id: Option<ItemId>,
    is_animating: bool,
    call_listener_when_is_selected: bool,
    next_id: ItemId,
    last_transition: Option<Transition>,

    width: f32,
    height: f32,

    pending_clears: Vec<PendingClear>,

    on_show: NavListener,
    on_item_click: NavListener,
    on_item_reselect: NavListener,
}

impl fmt::Debug for BottomNavigation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BottomNavigation")
            .field("items", &self.items)
            .field("selected_id", &self.selected_id)
            .field("is_animating", &self.is_animating)
            .field("direction", &self.direction)
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

impl BottomNavigation {
    pub fn new(style: NavStyle, direction: Direction, density: Density) -> Self {
        let curve = CurveView::new(
            style.background_color,
            style.shadow_color,
            style.curve_dimensions(),
        );
        Self {
            items: Vec::new(),
            cells: Vec::new(),
            curve,
            style,
            density,
            direction,
            selected_id: None,
            is_animating: false,
            call_listener_when_is_selected: false,
            next_id: 0,
            last_transition: None,
            width: 0.0,
            height: 0.0,
            pending_clears: Vec::new(),
            on_show: Box::new(|_| {}),
            on_item_click: Box::new(|_| {}),
            on_item_reselect: Box::new(|_| {}),
        }
    }

    /// Build a container and attach every configured item.
    pub fn from_config(config: &Config) -> Self {
        let density = Density::new(config.layout.density);
        let mut nav = Self::new(
            NavStyle::from_config(config, density),
            config.layout.direction,
            density,
        );
        nav.call_listener_when_is_selected = config.animation.call_listener_when_selected;
        for spec in &config.items {
            nav.attach(spec.clone());
        }
        nav
    }

    // ── Items ─────────────────────────────────────────────────────────

    /// Attach an id-less item declaration, assigning it the next id.
    pub fn attach(&mut self, spec: ItemSpec) -> ItemId {
        let id = self.next_id;
        if spec.selected {
            self.selected_id = Some(id);
        }
        self.add_item(spec.into_item(id));
        id
    }

    pub fn add_item(&mut self, item: Item) {
        let mut cell = NavigationCell::new(&item, self.style.cell_style(), self.density);
        cell.disable_cell(self.style.has_animation);

        debug!(id = item.id, title = %item.title, "item added");
        self.next_id = self.next_id.max(item.id + 1);
        self.cells.push(cell);
        self.items.push(item);
        self.layout_cells();

        // Columns shrank; move the curve and circle onto the new layout
        if self.width > 0.0 {
            self.show_current();
        }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn cells(&self) -> &[NavigationCell] {
        &self.cells
    }

    pub fn curve(&self) -> &CurveView {
        &self.curve
    }

    pub fn style(&self) -> &NavStyle {
        &self.style
    }

    pub fn density(&self) -> Density {
        self.density
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn selected_id(&self) -> Option<ItemId> {
        self.selected_id
    }

    pub fn is_animating(&self) -> bool {
        self.is_animating
    }

    pub fn last_transition(&self) -> Option<Transition> {
        self.last_transition
    }

    pub fn size(&self) -> (f32, f32) {
        (self.width, self.height)
    }

    pub fn call_listener_when_is_selected(&self) -> bool {
        self.call_listener_when_is_selected
    }

    pub fn set_call_listener_when_is_selected(&mut self, enabled: bool) {
        self.call_listener_when_is_selected = enabled;
    }

    // ── Layout ────────────────────────────────────────────────────────

    /// Size the container. Cell, curve, circle and icon sizes are derived
    /// from the height, then the current selection is re-shown without
    /// animation (the first item when nothing is selected yet).
    pub fn measure(&mut self, width: f32, height: f32) {
        self.width = width.max(0.0);
        self.height = height.max(0.0);

        if height > 0.0 {
            self.style.cell_height = height;
        }
        let cell_height = self.style.cell_height;

        let shadow = (self.height * 0.24).floor();
        self.style.bezier_shadow_height = shadow;
        self.style.bezier_inner_height = (self.height * 0.06).floor();
        self.style.set_title_height(shadow);

        self.style.circle_size = (cell_height * 0.6).floor();
        self.style.icon_size = cell_height - (shadow * 2.0 + self.style.bezier_inner_height);
        self.style.bezier_inner_width = (self.style.circle_size * 2.5).floor();

        self.curve.width = self.width;
        self.curve.height = cell_height;
        self.update_views();

        trace!(width, height, "navigation measured");

        self.show_current();
    }

    /// Re-show the selection without animation, falling back to the first
    /// item when nothing is selected yet.
    fn show_current(&mut self) {
        if let Some(id) = self.selected_id.or_else(|| self.items.first().map(|i| i.id)) {
            self.show(id, false);
        }
    }

    /// Visual column of the item at `position`.
    pub fn visual_index(&self, position: usize) -> usize {
        match self.direction {
            Direction::Ltr => position,
            Direction::Rtl => self.items.len() - 1 - position,
        }
    }

    fn layout_cells(&mut self) {
        let count = self.cells.len();
        if count == 0 {
            return;
        }
        let column = self.width / count as f32;
        let height = self.style.cell_height;
        for position in 0..count {
            let x = self.visual_index(position) as f32 * column;
            self.cells[position].set_layout(x, column, height);
        }
    }

    /// Push the container style to every cell and to the curve.
    fn update_views(&mut self) {
        let cell_style = self.style.cell_style();
        for cell in &mut self.cells {
            cell.apply_style(cell_style.clone());
        }
        self.curve.color = self.style.background_color;
        self.curve.shadow_color = self.style.shadow_color;
        self.curve.dimensions = self.style.curve_dimensions();
        self.curve.height = self.style.cell_height;
        self.layout_cells();
    }

    pub fn update_style(&mut self, update: impl FnOnce(&mut NavStyle)) {
        update(&mut self.style);
        self.update_views();
    }

    /// Change a style property by name.
    pub fn set_property(&mut self, name: &str, value: &str) -> PropertyUpdate {
        let outcome = self.try_set_property(name, value.trim());
        match &outcome {
            PropertyUpdate::Applied => debug!(property = name, value, "style property applied"),
            PropertyUpdate::Ignored { field, reason } => {
                warn!(field = %field, ?reason, "style property ignored")
            }
        }
        outcome
    }

    fn try_set_property(&mut self, name: &str, value: &str) -> PropertyUpdate {
        let density = self.density;
        let dp = |v: &str| {
            v.parse::<f32>()
                .map(|v| density.dp(v))
                .map_err(|e| format!("{v}: {e}"))
        };
        let color = |v: &str| v.parse::<Argb>().map_err(|e| e.to_string());
        let flag = |v: &str| v.parse::<bool>().map_err(|e| format!("{v}: {e}"));
        let style = &mut self.style;

        let result = match name {
            "animation_duration" => value
                .parse::<u64>()
                .map(|ms| style.animation_duration = Duration::from_millis(ms))
                .map_err(|e| format!("{value}: {e}")),
            "has_animation" => flag(value).map(|b| style.has_animation = b),
            "default_icon_color" => color(value).map(|c| style.default_icon_color = c),
            "selected_icon_color" => color(value).map(|c| style.selected_icon_color = c),
            "background_color" => color(value).map(|c| style.background_color = c),
            "circle_color" => color(value).map(|c| style.circle_color = c),
            "shadow_color" => color(value).map(|c| style.shadow_color = c),
            "count_text_color" => color(value).map(|c| style.count_text_color = c),
            "count_background_color" => color(value).map(|c| style.count_background_color = c),
            "count_typeface" => parse_typeface(value).map(|m| style.count_typeface = m),
            "circle_size" => dp(value).map(|v| style.circle_size = v),
            "icon_size" => dp(value).map(|v| style.icon_size = v),
            "icon_padding" => dp(value).map(|v| style.icon_padding = v),
            "title_text_size" => value
                .parse::<f32>()
                .map(|v| style.title_text_size = v)
                .map_err(|e| format!("{value}: {e}")),
            "title_height" => dp(value).map(|v| style.set_title_height(v)),
            "bezier_shadow_height" => dp(value).map(|v| style.bezier_shadow_height = v),
            "bezier_outer_width" => dp(value).map(|v| style.bezier_outer_width = v),
            "bezier_outer_height" => dp(value).map(|v| style.bezier_outer_height = v),
            "bezier_inner_width" => dp(value).map(|v| style.bezier_inner_width = v),
            "bezier_inner_height" => dp(value).map(|v| style.bezier_inner_height = v),
            "call_listener_when_selected" => {
                flag(value).map(|b| self.call_listener_when_is_selected = b)
            }
            _ => return PropertyUpdate::ignored(name, IgnoreReason::UnknownField),
        };

        match result {
            Ok(()) => {
                self.update_views();
                PropertyUpdate::Applied
            }
            Err(e) => PropertyUpdate::ignored(name, IgnoreReason::InvalidValue(e)),
        }
    }

    // ── Selection ─────────────────────────────────────────────────────

    /// Select `item_id`: move the curve to its cell, grow its indicator and
    /// shrink every other cell. Unknown ids are accepted and recorded as the
    /// selection even though no cell matches.
    pub fn show(&mut self, item_id: ItemId, animate: bool) {
        let destination = self.get_item_position(item_id);
        let current = self.selected_id.and_then(|id| self.get_item_position(id));

        if let Some(destination) = destination {
            self.animate_curve(destination, current, animate);
        } else {
            trace!(item_id, "show on unknown item");
        }

        for i in 0..self.items.len() {
            if self.items[i].id == item_id {
                self.cells[i].enable_cell(animate);
                (self.on_show)(&self.items[i]);
            } else {
                self.cells[i].disable_cell(animate);
            }
        }
        self.selected_id = Some(item_id);
    }

    fn animate_curve(&mut self, destination: usize, current: Option<usize>, animate: bool) {
        self.is_animating = true;

        let difference = destination.abs_diff(current.unwrap_or(0));
        let calculated = travel_duration(difference, self.style.animation_duration);
        let duration = if animate && self.style.has_animation {
            calculated
        } else {
            INSTANT
        };

        // Morph and fly-in direction compare against the raw previous
        // position, where "nothing selected" sits just left of the row.
        let previous = current.map_or(-1, |c| c as i64);
        let morph = (destination as i64 - previous).abs() > 1;

        self.curve.move_to(self.cells[destination].center_x(), duration);
        if morph {
            self.curve.morph(duration);
        }

        self.cells[destination].set_from_left(destination as i64 > previous);
        for cell in &mut self.cells {
            cell.set_duration(calculated);
        }

        let transition = Transition {
            destination,
            current,
            difference,
            calculated_duration: calculated,
            animation_duration: duration,
            morph,
        };
        debug!(?transition, "selection transition started");
        self.last_transition = Some(transition);
    }

    /// Click handling for the cell showing `item_id`.
    ///
    /// Taps are ignored while the curve is still travelling.
    pub fn tap(&mut self, item_id: ItemId) {
        let Some(pos) = self.get_item_position(item_id) else {
            trace!(item_id, "tap on unknown item");
            return;
        };

        if self.is_showing(item_id) {
            (self.on_item_reselect)(&self.items[pos]);
        }

        if !self.cells[pos].is_enabled_cell() && !self.is_animating {
            self.show(item_id, self.style.has_animation);
            (self.on_item_click)(&self.items[pos]);
        } else if self.call_listener_when_is_selected {
            (self.on_item_click)(&self.items[pos]);
        }
    }

    /// Tap whichever cell covers horizontal coordinate `x`.
    pub fn tap_at(&mut self, x: f32) -> Option<ItemId> {
        let pos = self.cells.iter().position(|c| c.contains_x(x))?;
        let id = self.items[pos].id;
        self.tap(id);
        Some(id)
    }

    /// Advance every running animation and due delayed badge clear.
    pub fn tick(&mut self, dt: Duration) {
        if let Some(frame) = self.curve.tick(dt) {
            if frame.finished {
                self.is_animating = false;
            }
        }

        for cell in &mut self.cells {
            cell.tick(dt);
        }

        let mut due = Vec::new();
        self.pending_clears.retain_mut(|pending| {
            pending.remaining = pending.remaining.saturating_sub(dt);
            if pending.remaining.is_zero() {
                due.push(pending.item_id);
                false
            } else {
                true
            }
        });
        for item_id in due {
            self.clear_count(item_id);
        }
    }

    /// Whether any selection or badge work is still outstanding.
    pub fn needs_tick(&self) -> bool {
        self.is_animating
            || self.curve.is_moving()
            || self.curve.is_morphing()
            || self.cells.iter().any(|c| c.is_transitioning() || c.is_icon_animating())
            || !self.pending_clears.is_empty()
    }

    // ── Lookups ───────────────────────────────────────────────────────

    pub fn is_showing(&self, item_id: ItemId) -> bool {
        self.selected_id == Some(item_id)
    }

    pub fn get_item_by_id(&self, item_id: ItemId) -> Option<&Item> {
        self.items.iter().find(|item| item.id == item_id)
    }

    pub fn get_cell_by_id(&self, item_id: ItemId) -> Option<&NavigationCell> {
        self.get_item_position(item_id).map(|pos| &self.cells[pos])
    }

    pub fn get_item_position(&self, item_id: ItemId) -> Option<usize> {
        self.items.iter().position(|item| item.id == item_id)
    }

    // ── Badges ────────────────────────────────────────────────────────

    /// Store `count` on the item. The cell may display a shortened form;
    /// the item keeps the full text.
    pub fn set_badge_count(&mut self, item_id: ItemId, count: &str) {
        let Some(pos) = self.get_item_position(item_id) else {
            trace!(item_id, "badge update on unknown item");
            return;
        };
        self.items[pos].count = count.to_string();
        self.cells[pos].set_badge_count(count);
    }

    pub fn get_badge_count(&self, item_id: ItemId) -> &str {
        self.get_item_by_id(item_id)
            .map_or(EMPTY, |item| item.count.as_str())
    }

    /// Badge text as a number; 0 when empty, unknown or not numeric.
    pub fn get_item_count(&self, item_id: ItemId) -> i64 {
        let count = self.get_badge_count(item_id);
        if count == EMPTY {
            return 0;
        }
        count.parse().unwrap_or_else(|_| {
            warn!(item_id, count, "badge text is not a number");
            0
        })
    }

    pub fn clear_count(&mut self, item_id: ItemId) {
        let Some(pos) = self.get_item_position(item_id) else {
            return;
        };
        if self.items[pos].has_badge() {
            self.items[pos].count = EMPTY.to_string();
            self.cells[pos].set_badge_count(EMPTY);
        }
    }

    /// Clear the badge after `delay`. There is no handle to cancel it.
    pub fn clear_count_delayed(&mut self, item_id: ItemId, delay: Duration) {
        self.pending_clears.push(PendingClear {
            item_id,
            remaining: delay,
        });
    }

    pub fn clear_badge_counts(&mut self) {
        let ids: Vec<ItemId> = self.items.iter().map(|item| item.id).collect();
        for id in ids {
            self.clear_count(id);
        }
    }

    // ── Listeners ─────────────────────────────────────────────────────

    pub fn set_on_show_listener(&mut self, listener: impl FnMut(&Item) + 'static) {
        self.on_show = Box::new(listener);
    }

    pub fn set_on_item_click_listener(&mut self, listener: impl FnMut(&Item) + 'static) {
        self.on_item_click = Box::new(listener);
    }

    pub fn set_on_item_reselect_listener(&mut self, listener: impl FnMut(&Item) + 'static) {
        self.on_item_reselect = Box::new(listener);
    }
}
