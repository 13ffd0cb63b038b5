//! Acceptance test harness for the terminal shell.
//!
//! Wraps `TuiApp<TestBackend>` with a manual clock and gesture helpers so
//! tests can drive drags, wheel scrolls and animations deterministically.

use crate::config::ResolvedConfig;
use crate::controller::ScrollSurface;
use crate::model::Zone;
use crate::view::{TuiApp, TuiError};
use crate::view_state::HudListener;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::backend::TestBackend;
use ratatui::Terminal;

/// Frame step used when advancing animations.
const FRAME_MS: u64 = 16;

/// Convert a ratatui buffer to a string, one line per row.
///
/// Trailing whitespace is trimmed and empty lines are dropped.
pub(crate) fn buffer_to_string(buffer: &ratatui::buffer::Buffer) -> String {
    let area = buffer.area();
    let mut lines = Vec::new();

    for y in area.top()..area.bottom() {
        let mut line = String::new();
        for x in area.left()..area.right() {
            line.push_str(buffer[(x, y)].symbol());
        }
        let trimmed = line.trim_end();
        if !trimmed.is_empty() {
            lines.push(trimmed.to_string());
        }
    }

    lines.join("\n")
}

/// Test harness for acceptance testing
pub(crate) struct AcceptanceTestHarness {
    app: TuiApp<TestBackend>,
    now_ms: u64,
    column: u16,
}

impl AcceptanceTestHarness {
    /// App on a `width` x `height` terminal with a fixed display width and
    /// smooth scrolls of `smooth_scroll_ms`. The first frame is drawn.
    pub(crate) fn new(width: u16, height: u16, config: ResolvedConfig) -> Result<Self, TuiError> {
        let terminal = Terminal::new(TestBackend::new(width, height))?;
        let mut app = TuiApp::with_terminal(terminal, &config)?;
        app.draw()?;
        Ok(Self {
            app,
            now_ms: 0,
            column: 1,
        })
    }

    /// Config used by most tests: display width 20 (image 30 rows, strip 10,
    /// peek offset 20) and 100 content rows.
    pub(crate) fn default_config() -> ResolvedConfig {
        ResolvedConfig {
            display_width: Some(20),
            content_rows: 100,
            smooth_scroll_ms: 160,
            ..ResolvedConfig::default()
        }
    }

    fn mouse(&mut self, kind: MouseEventKind, row: u16) {
        let event = MouseEvent {
            kind,
            column: self.column,
            row,
            modifiers: KeyModifiers::NONE,
        };
        self.app.handle_mouse(event, self.now_ms);
    }

    /// Press the left button at `row`.
    pub(crate) fn press(&mut self, row: u16) {
        self.mouse(MouseEventKind::Down(MouseButton::Left), row);
    }

    /// Drag to `row`, `step_ms` after the previous event.
    pub(crate) fn drag_to(&mut self, row: u16, step_ms: u64) {
        self.now_ms += step_ms;
        self.mouse(MouseEventKind::Drag(MouseButton::Left), row);
    }

    /// Release the left button at `row`, `step_ms` after the previous event.
    pub(crate) fn release(&mut self, row: u16, step_ms: u64) {
        self.now_ms += step_ms;
        self.mouse(MouseEventKind::Up(MouseButton::Left), row);
    }

    /// Slow drag from `from` to `to` followed by a pause and release, so no
    /// fling is requested.
    pub(crate) fn slow_drag(&mut self, from: u16, to: u16) {
        self.press(from);
        let step: i32 = if to >= from { 1 } else { -1 };
        let mut row = i32::from(from);
        while row != i32::from(to) {
            row += step;
            self.drag_to(u16::try_from(row).unwrap_or(0), 200);
        }
        self.release(to, 500);
    }

    /// Mouse wheel notch.
    pub(crate) fn wheel(&mut self, down: bool) {
        let kind = if down {
            MouseEventKind::ScrollDown
        } else {
            MouseEventKind::ScrollUp
        };
        self.mouse(kind, 0);
    }

    /// Press a key. Returns true if the app asked to quit.
    pub(crate) fn key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> bool {
        self.app.handle_key(KeyEvent::new(code, modifiers), self.now_ms)
    }

    /// Run frames until no animation is left (bounded).
    pub(crate) fn settle(&mut self) {
        for _ in 0..1_000 {
            if !self.app.is_animating() {
                return;
            }
            self.now_ms += FRAME_MS;
            self.app.tick(self.now_ms);
        }
        panic!("animation did not settle");
    }

    /// Current offset.
    pub(crate) fn scroll_y(&self) -> i32 {
        self.app.controller().surface().scroll_y()
    }

    /// Zone of the current offset.
    pub(crate) fn zone(&self) -> Zone {
        self.app.controller().zone()
    }

    /// The host listener.
    pub(crate) fn hud(&self) -> &HudListener {
        self.app.hud()
    }

    /// Direct access to the app.
    pub(crate) fn app_mut(&mut self) -> &mut TuiApp<TestBackend> {
        &mut self.app
    }

    /// Draw and return the screen as text.
    pub(crate) fn screen(&mut self) -> String {
        self.app.draw().expect("draw");
        buffer_to_string(self.app.terminal().backend().buffer())
    }
}
