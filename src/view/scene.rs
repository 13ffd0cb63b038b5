//! Parallax scene widget.
//!
//! The document is the cover image (`image_full_height` rows), an info bar,
//! then the content rows. The image is drawn at half the scroll speed so it
//! slides under the content as the header collapses.

use crate::model::ZoneThresholds;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::Widget,
};

/// Height of the info bar between image and content.
pub const INFO_ROWS: i32 = 3;

/// Shading bands of the cover image, top to bottom.
const IMAGE_BANDS: [&str; 4] = ["·", "░", "▒", "▓"];

/// Title drawn across the middle of the cover image.
const COVER_TITLE: &str = " COVER ";

/// Total document height for a header with `thresholds` and `content_rows`.
pub fn document_height(thresholds: &ZoneThresholds, content_rows: u16) -> i32 {
    thresholds.image_full_height() + INFO_ROWS + i32::from(content_rows)
}

/// What a single document row shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneRow {
    /// Row of the cover image, already shifted for parallax.
    Image(i32),
    /// Row of the info bar.
    Info(i32),
    /// Content item.
    Content(i32),
    /// Past the end of the document.
    Blank,
}

/// Map screen row `screen_row` at offset `scroll_y` to what it shows.
pub fn scene_row(
    thresholds: &ZoneThresholds,
    content_rows: u16,
    scroll_y: i32,
    screen_row: i32,
) -> SceneRow {
    let doc_row = scroll_y + screen_row;
    let full = thresholds.image_full_height();
    if doc_row < full {
        SceneRow::Image(screen_row + scroll_y / 2)
    } else if doc_row < full + INFO_ROWS {
        SceneRow::Info(doc_row - full)
    } else if doc_row < document_height(thresholds, content_rows) {
        SceneRow::Content(doc_row - full - INFO_ROWS)
    } else {
        SceneRow::Blank
    }
}

/// Widget drawing the visible slice of the document.
#[derive(Debug, Clone, Copy)]
pub struct ParallaxScene {
    thresholds: ZoneThresholds,
    content_rows: u16,
    scroll_y: i32,
}

impl ParallaxScene {
    /// Scene at `scroll_y`.
    pub fn new(thresholds: ZoneThresholds, content_rows: u16, scroll_y: i32) -> Self {
        Self {
            thresholds,
            content_rows,
            scroll_y,
        }
    }

    fn image_style(&self, image_row: i32) -> (&'static str, Style) {
        let full = self.thresholds.image_full_height().max(1);
        let band = (image_row.clamp(0, full - 1) * IMAGE_BANDS.len() as i32 / full) as usize;
        let color = match band {
            0 => Color::LightBlue,
            1 => Color::Cyan,
            2 => Color::Green,
            _ => Color::DarkGray,
        };
        (IMAGE_BANDS[band], Style::default().fg(color))
    }
}

impl Widget for ParallaxScene {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let title_row = self.thresholds.image_full_height() / 2;
        for dy in 0..area.height {
            let y = area.y + dy;
            let row = scene_row(
                &self.thresholds,
                self.content_rows,
                self.scroll_y,
                i32::from(dy),
            );
            let line_area = Rect::new(area.x, y, area.width, 1);
            match row {
                SceneRow::Image(image_row) => {
                    let (symbol, style) = self.image_style(image_row);
                    for x in line_area.left()..line_area.right() {
                        buf[(x, y)].set_symbol(symbol).set_style(style);
                    }
                    if image_row == title_row {
                        let title_x =
                            area.x + area.width.saturating_sub(COVER_TITLE.len() as u16) / 2;
                        buf.set_stringn(
                            title_x,
                            y,
                            COVER_TITLE,
                            usize::from(area.width),
                            Style::default().add_modifier(Modifier::BOLD),
                        );
                    }
                }
                SceneRow::Info(info_row) => {
                    let style = Style::default().fg(Color::Black).bg(Color::Yellow);
                    buf.set_style(line_area, style);
                    if info_row == INFO_ROWS / 2 {
                        buf.set_stringn(area.x + 1, y, "Profile", usize::from(area.width), style);
                    }
                }
                SceneRow::Content(item) => {
                    buf.set_stringn(
                        area.x + 1,
                        y,
                        format!("Item {item}"),
                        usize::from(area.width.saturating_sub(1)),
                        Style::default(),
                    );
                }
                SceneRow::Blank => {}
            }
        }
    }
}
