//! Scroll zones of the parallax header.
//!
//! The scroll range is split into three zones by two thresholds derived from
//! the display width. Zones are never stored; they are recomputed from the
//! offset whenever an event needs them.

use super::touch::DragDirection;

/// Fixed thresholds partitioning the scroll range.
///
/// Built once from the display width and immutable afterwards:
/// - `image_full_height = display_width * 3 / 2` (a 2:3 cover image)
/// - `image_height = image_full_height / 3` (the collapsed strip)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoneThresholds {
    image_full_height: i32,
    image_height: i32,
}

impl ZoneThresholds {
    /// Derive thresholds from the display width in pixels (or cells).
    pub fn from_display_width(display_width: i32) -> Self {
        let image_full_height = display_width * 3 / 2;
        Self {
            image_full_height,
            image_height: image_full_height / 3,
        }
    }

    /// Full height of the cover image; the zone B/C boundary.
    pub fn image_full_height(&self) -> i32 {
        self.image_full_height
    }

    /// Height of the image strip that stays visible in the peek state.
    pub fn image_height(&self) -> i32 {
        self.image_height
    }

    /// Zone A/B boundary, also the initial scroll offset.
    pub fn peek_offset(&self) -> i32 {
        self.image_full_height - self.image_height
    }

    /// Classify a scroll offset.
    pub fn classify(&self, scroll_y: i32) -> Zone {
        if scroll_y < self.peek_offset() {
            Zone::Reveal
        } else if scroll_y < self.image_full_height {
            Zone::Peek
        } else {
            Zone::Content
        }
    }

    /// Whether native fling momentum may run at this offset.
    ///
    /// Strictly past the full image height; the boundary itself is excluded.
    pub fn allows_fling(&self, scroll_y: i32) -> bool {
        scroll_y > self.image_full_height
    }

    /// Whether a scroll change carried the view from the content zone back
    /// over the image boundary, meaning momentum must be stopped.
    pub fn crosses_into_header(&self, new_scroll_y: i32, old_scroll_y: i32) -> bool {
        new_scroll_y < self.image_full_height && old_scroll_y > self.image_full_height
    }

    /// Resolve a snap target to an absolute offset.
    pub fn resolve(&self, target: SnapTarget) -> i32 {
        match target {
            SnapTarget::Top => 0,
            SnapTarget::Peek => self.peek_offset(),
            SnapTarget::Collapsed => self.image_full_height,
        }
    }

    /// Offset to snap to after a gesture ending at `scroll_y`, if any.
    pub fn snap_offset(&self, scroll_y: i32, direction: DragDirection) -> Option<i32> {
        snap_target(self.classify(scroll_y), direction).map(|target| self.resolve(target))
    }
}

/// Region of the scroll range an offset falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Zone {
    /// Zone A, `[0, peek_offset)`: the image is mostly or fully revealed.
    Reveal,
    /// Zone B, `[peek_offset, image_full_height)`: only a strip of the image shows.
    Peek,
    /// Zone C, `[image_full_height, ..)`: the header is scrolled away.
    Content,
}

impl Zone {
    /// Short lowercase label for status display and logs.
    pub fn label(self) -> &'static str {
        match self {
            Zone::Reveal => "reveal",
            Zone::Peek => "peek",
            Zone::Content => "content",
        }
    }
}

/// Resting positions a gesture can snap to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SnapTarget {
    /// Offset 0, image fully expanded.
    Top,
    /// The zone A/B boundary.
    Peek,
    /// The full image height, header collapsed.
    Collapsed,
}

/// Snap table: which resting position a gesture ending in `zone` goes to.
///
/// | zone    | drag down | drag up   |
/// |---------|-----------|-----------|
/// | Reveal  | Top       | Peek      |
/// | Peek    | Top       | Collapsed |
/// | Content | none      | none      |
pub fn snap_target(zone: Zone, direction: DragDirection) -> Option<SnapTarget> {
    match (zone, direction) {
        (Zone::Reveal | Zone::Peek, DragDirection::Down) => Some(SnapTarget::Top),
        (Zone::Reveal, DragDirection::Up) => Some(SnapTarget::Peek),
        (Zone::Peek, DragDirection::Up) => Some(SnapTarget::Collapsed),
        (Zone::Content, _) => None,
    }
}
