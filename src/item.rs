use serde::Deserialize;

/// Item identifier, assigned sequentially from 0 on attachment.
pub type ItemId = usize;

/// Badge text meaning "no badge"
pub const EMPTY: &str = "";

/// Opaque icon reference: a glyph plus optional animation frames.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IconRef {
    pub glyph: String,
    pub frames: Vec<String>,
}

impl IconRef {
    pub fn glyph(glyph: impl Into<String>) -> Self {
        Self {
            glyph: glyph.into(),
            frames: Vec::new(),
        }
    }

    pub fn animated(glyph: impl Into<String>, frames: Vec<String>) -> Self {
        Self {
            glyph: glyph.into(),
            frames,
        }
    }
}

/// Model record for one navigation entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub id: ItemId,
    pub title: String,
    pub icon: IconRef,
    pub extra_padding: f32,
    /// Badge text; [`EMPTY`] means no badge.
    pub count: String,
}

impl Item {
    pub fn new(
        id: ItemId,
        title: impl Into<String>,
        icon: IconRef,
        extra_padding: f32,
        count: Option<&str>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            icon,
            extra_padding: extra_padding.max(0.0),
            count: count.unwrap_or(EMPTY).to_string(),
        }
    }

    pub fn has_badge(&self) -> bool {
        self.count != EMPTY
    }
}

/// Id-less item declaration, as it appears in config or at attach time.
#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
#[serde(default)]
pub struct ItemSpec {
    pub title: String,
    pub icon: String,
    /// Animation frames for the icon, if any
    pub frames: Vec<String>,
    pub badge: Option<String>,
    pub padding: f32,
    pub selected: bool,
}

impl ItemSpec {
    pub fn new(title: impl Into<String>, icon: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            icon: icon.into(),
            ..Self::default()
        }
    }

    pub fn badge(mut self, badge: impl Into<String>) -> Self {
        self.badge = Some(badge.into());
        self
    }

    pub fn padding(mut self, padding: f32) -> Self {
        self.padding = padding;
        self
    }

    pub fn selected(mut self) -> Self {
        self.selected = true;
        self
    }

    pub fn frames(mut self, frames: Vec<String>) -> Self {
        self.frames = frames;
        self
    }

    pub fn into_item(self, id: ItemId) -> Item {
        let icon = if self.frames.is_empty() {
            IconRef::glyph(self.icon)
        } else {
            IconRef::animated(self.icon, self.frames)
        };
        Item::new(id, self.title, icon, self.padding, self.badge.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_badge_becomes_empty() {
        let item = ItemSpec::new("Home", "⌂").into_item(0);
        assert_eq!(item.count, EMPTY);
        assert!(!item.has_badge());
    }

    #[test]
    fn spec_carries_badge_padding_and_frames() {
        let item = ItemSpec::new("Sync", "↻")
            .badge("3")
            .padding(2.0)
            .frames(vec!["◐".into(), "◓".into()])
            .into_item(4);
        assert_eq!(item.id, 4);
        assert_eq!(item.count, "3");
        assert_eq!(item.extra_padding, 2.0);
        assert_eq!(item.icon.frames.len(), 2);
    }

    #[test]
    fn negative_padding_is_clamped() {
        let item = Item::new(0, "x", IconRef::glyph("x"), -4.0, None);
        assert_eq!(item.extra_padding, 0.0);
    }
}
