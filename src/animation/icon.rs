//! Frame-based icon animation, the terminal stand-in for an animated
//! vector drawable. Cells start and stop it; nothing else depends on it.

use std::time::Duration;

/// How long each frame is held for
pub const FRAME_INTERVAL: Duration = Duration::from_millis(120);

#[derive(Debug, Clone, Default)]
pub struct IconAnimation {
    frames: Vec<String>,
    running: bool,
    elapsed: Duration,
}

impl IconAnimation {
    pub fn new(frames: Vec<String>) -> Self {
        Self {
            frames,
            running: false,
            elapsed: Duration::ZERO,
        }
    }

    /// Icons without frames are static; start/stop are no-ops for them.
    pub fn is_animatable(&self) -> bool {
        self.frames.len() > 1
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn start(&mut self) {
        if self.is_animatable() && !self.running {
            self.running = true;
            self.elapsed = Duration::ZERO;
        }
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn tick(&mut self, dt: Duration) {
        if self.running {
            self.elapsed = self.elapsed.saturating_add(dt);
        }
    }

    /// Current frame, or `None` when the static glyph should be drawn.
    pub fn frame(&self) -> Option<&str> {
        if !self.running || self.frames.is_empty() {
            return None;
        }
        let step = (self.elapsed.as_millis() / FRAME_INTERVAL.as_millis()) as usize;
        let idx = step % self.frames.len();
        Some(self.frames[idx].as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spinner() -> IconAnimation {
        IconAnimation::new(vec!["◐".into(), "◓".into(), "◑".into(), "◒".into()])
    }

    #[test]
    fn frames_advance_only_while_running() {
        let mut anim = spinner();
        anim.tick(FRAME_INTERVAL);
        assert_eq!(anim.frame(), None);

        anim.start();
        assert_eq!(anim.frame(), Some("◐"));
        anim.tick(FRAME_INTERVAL);
        assert_eq!(anim.frame(), Some("◓"));

        anim.stop();
        assert_eq!(anim.frame(), None);
    }

    #[test]
    fn frame_rate_does_not_depend_on_tick_rate() {
        let mut slow = spinner();
        let mut fast = spinner();
        slow.start();
        fast.start();

        // 240ms as 2 coarse ticks and as 24 fine ones
        slow.tick(FRAME_INTERVAL);
        slow.tick(FRAME_INTERVAL);
        for _ in 0..24 {
            fast.tick(Duration::from_millis(10));
        }
        assert_eq!(slow.frame(), Some("◑"));
        assert_eq!(fast.frame(), slow.frame());
    }

    #[test]
    fn static_icons_never_start() {
        let mut anim = IconAnimation::new(vec!["⌂".into()]);
        anim.start();
        assert!(!anim.is_running());
    }
}
