use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use tracing::debug;

use curvenav::config::Config;
use curvenav::ui::theme::Theme;
use curvenav::{BottomNavigation, ItemId};

use crate::event::{Event, NavSignal};

/// Delay before a shown item's badge is cleared
const BADGE_CLEAR_DELAY: Duration = Duration::from_millis(200);

/// How many ticks a toast stays up
const TOAST_TICKS: u16 = 90;

// ── Application State ─────────────────────────────────────────────────

pub struct App {
    pub nav: BottomNavigation,
    pub theme: Theme,
    pub should_quit: bool,

    /// Where the navigation was last drawn, for mouse hit-testing
    pub nav_area: Rect,

    // Toast notification
    pub toast_message: Option<String>,
    pub toast_is_error: bool,
    pub toast_ticks: u16,

    last_tick: Instant,
}

impl App {
    pub fn new(config: &Config, event_tx: mpsc::UnboundedSender<Event>) -> Self {
        let mut nav = BottomNavigation::from_config(config);

        let tx = event_tx.clone();
        nav.set_on_show_listener(move |item| {
            let _ = tx.send(Event::Nav(NavSignal::Shown(item.id)));
        });
        let tx = event_tx.clone();
        nav.set_on_item_click_listener(move |item| {
            let _ = tx.send(Event::Nav(NavSignal::Clicked(item.id)));
        });
        let tx = event_tx;
        nav.set_on_item_reselect_listener(move |item| {
            let _ = tx.send(Event::Nav(NavSignal::Reselected(item.id)));
        });

        Self {
            theme: Theme::for_navigation(nav.style()),
            nav,
            should_quit: false,
            nav_area: Rect::default(),
            toast_message: None,
            toast_is_error: false,
            toast_ticks: 0,
            last_tick: Instant::now(),
        }
    }

    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::Tick => self.on_tick(),
            Event::Resize(_, _) => {}
            Event::Nav(signal) => self.on_nav_signal(signal),
        }
    }

    fn on_tick(&mut self) {
        let now = Instant::now();
        let dt = now.duration_since(self.last_tick);
        self.last_tick = now;

        self.nav.tick(dt);
        self.tick_toast();
    }

    /// Whether the next tick will change anything on screen.
    pub fn needs_redraw(&self) -> bool {
        self.nav.needs_tick() || self.toast_message.is_some()
    }

    /// Handle a key event
    pub fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Left | KeyCode::Char('h') => self.step(-1),
            KeyCode::Right | KeyCode::Char('l') => self.step(1),
            KeyCode::Char(c @ '1'..='9') => {
                let id = c as usize - '1' as usize;
                self.nav.tap(id);
            }
            KeyCode::Char('b') | KeyCode::Char('+') => self.bump_badge(),
            KeyCode::Char('c') => {
                self.nav.clear_badge_counts();
                self.show_toast("Badges cleared", false);
            }
            KeyCode::Char('a') => self.toggle_animation(),
            _ => {}
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        let area = self.nav_area;
        let inside = mouse.column >= area.x
            && mouse.column < area.x + area.width
            && mouse.row >= area.y
            && mouse.row < area.y + area.height;
        if inside {
            let x = (mouse.column - area.x) as f32 + 0.5;
            self.nav.tap_at(x);
        }
    }

    // ── Navigation ────────────────────────────────────────────────────

    /// Tap the visual neighbour of the current selection.
    fn step(&mut self, delta: i32) {
        let count = self.nav.items().len();
        if count == 0 {
            return;
        }
        let position = self
            .nav
            .selected_id()
            .and_then(|id| self.nav.get_item_position(id))
            .unwrap_or(0);
        let column = self.nav.visual_index(position) as i32 + delta;
        if column < 0 || column >= count as i32 {
            return;
        }
        // visual_index is its own inverse
        let target = self.nav.visual_index(column as usize);
        let id = self.nav.items()[target].id;
        self.nav.tap(id);
    }

    fn bump_badge(&mut self) {
        let Some(id) = self.nav.selected_id() else {
            return;
        };
        let next = self.nav.get_item_count(id) + 1;
        self.nav.set_badge_count(id, &next.to_string());
    }

    fn toggle_animation(&mut self) {
        let enabled = !self.nav.style().has_animation;
        let outcome = self
            .nav
            .set_property("has_animation", &enabled.to_string());
        if outcome.is_applied() {
            let msg = if enabled {
                "Animations on"
            } else {
                "Animations off"
            };
            self.show_toast(msg, false);
        } else {
            self.show_toast("Could not change animation setting", true);
        }
    }

    fn on_nav_signal(&mut self, signal: NavSignal) {
        debug!(?signal, "navigation signal");
        match signal {
            NavSignal::Shown(id) => {
                self.nav.clear_count_delayed(id, BADGE_CLEAR_DELAY);
            }
            NavSignal::Clicked(id) => {
                let msg = format!("Opened {}", self.title_of(id));
                self.show_toast(&msg, false);
            }
            NavSignal::Reselected(id) => {
                let msg = format!("Already on {}", self.title_of(id));
                self.show_toast(&msg, false);
            }
        }
    }

    fn title_of(&self, id: ItemId) -> String {
        self.nav
            .get_item_by_id(id)
            .map(|item| item.title.clone())
            .unwrap_or_default()
    }

    // ── Toast Management ──────────────────────────────────────────────

    pub fn show_toast(&mut self, message: &str, is_error: bool) {
        self.toast_message = Some(message.to_string());
        self.toast_is_error = is_error;
        self.toast_ticks = TOAST_TICKS;
    }

    pub fn tick_toast(&mut self) {
        if self.toast_ticks > 0 {
            self.toast_ticks -= 1;
            if self.toast_ticks == 0 {
                self.toast_message = None;
            }
        }
    }
}
