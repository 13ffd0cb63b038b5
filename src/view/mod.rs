//! Terminal shell (impure): the platform adapter around the controller.
//!
//! Owns the terminal, the simulated scroll surface (through the controller)
//! and the host listener. Mouse gestures become touch events; surface offset
//! changes and synthetic events are pumped back into the controller.

mod input;
mod scene;
mod status_bar;

pub use input::{pointer_input, PointerInput, WheelScroll};
pub use scene::{document_height, scene_row, ParallaxScene, SceneRow, INFO_ROWS};
pub use status_bar::StatusBar;

use crate::config::{ConfigError, ResolvedConfig};
use crate::controller::{downgrade_listener, ParallaxScrollController, ScrollSurface};
use crate::logging::LoggingError;
use crate::model::{TouchEvent, ZoneThresholds};
use crate::view_state::{HudListener, SimulatedSurface};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Layout},
    Terminal,
};
use std::io::{self, Stdout};
use std::rc::Rc;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Upper bound on scroll-change/synthetic-event rounds per pump.
const MAX_PUMP_ROUNDS: usize = 8;

/// Rows reserved for the status bar.
const STATUS_ROWS: u16 = 1;

/// Errors that can occur during TUI operations
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Logging could not be initialized
    #[error("Logging error: {0}")]
    Logging(#[from] LoggingError),
}

/// Main TUI application
///
/// Generic over backend to support testing with TestBackend
pub struct TuiApp<B>
where
    B: Backend,
{
    terminal: Terminal<B>,
    controller: ParallaxScrollController<SimulatedSurface>,
    /// Host listener; the controller only holds a weak reference to it.
    hud: Rc<HudListener>,
    content_rows: u16,
    wheel_step: u16,
    /// Pointer position while the left button is held.
    pointer: Option<(f32, f32)>,
    started: Instant,
}

impl<B> std::fmt::Debug for TuiApp<B>
where
    B: Backend,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TuiApp")
            .field("controller", &self.controller)
            .field("pointer", &self.pointer)
            .finish_non_exhaustive()
    }
}

impl TuiApp<CrosstermBackend<Stdout>> {
    /// Put the terminal in raw mode with mouse capture and build the app.
    pub fn new(config: &ResolvedConfig) -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        stdout.execute(crossterm::event::EnableMouseCapture)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        Self::with_terminal(terminal, config)
    }

    /// Run the main event loop
    ///
    /// Returns when the user quits (q or Ctrl+C). Ticks at frame rate while
    /// an animation runs, otherwise waits for input.
    pub fn run(&mut self) -> Result<(), TuiError> {
        const FRAME_INTERVAL: Duration = Duration::from_millis(16);
        const IDLE_INTERVAL: Duration = Duration::from_millis(500);

        self.draw()?;

        loop {
            let timeout = if self.is_animating() {
                FRAME_INTERVAL
            } else {
                IDLE_INTERVAL
            };

            if event::poll(timeout)? {
                let now = self.now_ms();
                match event::read()? {
                    Event::Key(key) => {
                        if self.handle_key(key, now) {
                            return Ok(());
                        }
                    }
                    Event::Mouse(mouse) => self.handle_mouse(mouse, now),
                    Event::Resize(width, height) => self.handle_resize(width, height),
                    Event::FocusLost => self.cancel_drag(now),
                    _ => {}
                }
            }

            let now = self.now_ms();
            self.tick(now);
            self.draw()?;
        }
    }
}

impl<B> TuiApp<B>
where
    B: Backend,
{
    /// Build the app over an existing terminal.
    ///
    /// The display width comes from the config, or the terminal width.
    pub fn with_terminal(terminal: Terminal<B>, config: &ResolvedConfig) -> Result<Self, TuiError> {
        let size = terminal.size()?;
        let display_width = i32::from(config.display_width.unwrap_or(size.width).max(1));
        let thresholds = ZoneThresholds::from_display_width(display_width);

        let surface = SimulatedSurface::new(
            document_height(&thresholds, config.content_rows),
            i32::from(size.height.saturating_sub(STATUS_ROWS)),
            config.surface_config(),
        );
        let mut controller = ParallaxScrollController::new(surface, display_width);
        let hud = Rc::new(HudListener::default());
        controller.set_listener(Some(downgrade_listener(&hud)));

        info!(
            display_width,
            width = size.width,
            height = size.height,
            "Parallax view created"
        );

        Ok(Self {
            terminal,
            controller,
            hud,
            content_rows: config.content_rows,
            wheel_step: config.wheel_step,
            pointer: None,
            started: Instant::now(),
        })
    }

    fn now_ms(&self) -> u64 {
        u64::try_from(self.started.elapsed().as_millis()).unwrap_or(u64::MAX)
    }

    /// The controller driving the view.
    pub fn controller(&self) -> &ParallaxScrollController<SimulatedSurface> {
        &self.controller
    }

    /// The host listener.
    pub fn hud(&self) -> &HudListener {
        &self.hud
    }

    /// The terminal (for inspecting the rendered buffer).
    pub fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }

    /// Whether the surface is animating.
    pub fn is_animating(&self) -> bool {
        self.controller.surface().is_animating()
    }

    /// Handle a key press. Returns true if the app should quit.
    pub fn handle_key(&mut self, key: KeyEvent, now_ms: u64) -> bool {
        if key.kind != KeyEventKind::Press {
            return false;
        }
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => true,
            KeyCode::Char('q') => true,
            KeyCode::Esc => {
                self.cancel_drag(now_ms);
                false
            }
            _ => false,
        }
    }

    /// Handle a mouse event.
    pub fn handle_mouse(&mut self, mouse: MouseEvent, now_ms: u64) {
        let Some(input) = pointer_input(&mouse, now_ms) else {
            return;
        };
        match input {
            PointerInput::Touch(touch) => {
                self.pointer = if touch.ends_gesture() {
                    None
                } else {
                    Some((touch.x, touch.y))
                };
                self.dispatch_touch(&touch);
            }
            PointerInput::Wheel(direction) => {
                let step = i32::from(self.wheel_step);
                let delta = match direction {
                    WheelScroll::Up => -step,
                    WheelScroll::Down => step,
                };
                self.controller.surface_mut().scroll_by(delta);
                self.pump();
            }
        }
    }

    /// Abort the drag in progress, if any, with a cancel event.
    pub fn cancel_drag(&mut self, now_ms: u64) {
        if let Some((x, y)) = self.pointer.take() {
            debug!("Cancelling drag");
            self.dispatch_touch(&TouchEvent::cancel(x, y, now_ms));
        }
    }

    /// Advance animations to `now_ms`.
    pub fn tick(&mut self, now_ms: u64) {
        self.controller.surface_mut().tick(now_ms);
        self.pump();
    }

    fn handle_resize(&mut self, _width: u16, height: u16) {
        debug!(height, "Handling resize");
        let surface = self.controller.surface_mut();
        let content_height = surface.content_height();
        surface.set_dimensions(content_height, i32::from(height.saturating_sub(STATUS_ROWS)));
        self.pump();
    }

    /// Route a touch event the way the platform does: interception first,
    /// then touch handling.
    fn dispatch_touch(&mut self, touch: &TouchEvent) {
        self.controller.on_intercept_touch_event(touch);
        self.controller.on_touch_event(touch);
        self.pump();
    }

    /// Feed recorded offset changes and synthetic events back into the
    /// controller until the surface is quiet.
    fn pump(&mut self) {
        for _ in 0..MAX_PUMP_ROUNDS {
            let surface = self.controller.surface_mut();
            let changes = surface.take_scroll_changes();
            let synthetic = surface.take_synthetic_events();
            if changes.is_empty() && synthetic.is_empty() {
                return;
            }
            for change in changes {
                self.controller
                    .on_scroll_changed(change.new_scroll_y, change.old_scroll_y);
            }
            for touch in synthetic {
                self.controller.on_intercept_touch_event(&touch);
                self.controller.on_touch_event(&touch);
            }
        }
        warn!("Scroll pump did not settle");
    }

    /// Render the current frame.
    ///
    /// The first completed frame counts as the first layout and releases the
    /// controller's initial scroll.
    pub fn draw(&mut self) -> Result<(), TuiError> {
        self.render()?;
        if self.controller.on_layout_complete() {
            self.pump();
            self.render()?;
        }
        Ok(())
    }

    fn render(&mut self) -> Result<(), TuiError> {
        let scroll_y = self.controller.surface().scroll_y();
        let scene = ParallaxScene::new(self.controller.thresholds(), self.content_rows, scroll_y);
        let status = StatusBar {
            scroll_y,
            zone: self.controller.zone(),
            last_event: self.hud.last_event(),
            gestures: self.hud.gestures(),
        };

        self.terminal.draw(|frame| {
            let [scene_area, status_area] =
                Layout::vertical([Constraint::Min(0), Constraint::Length(STATUS_ROWS)])
                    .areas(frame.area());
            frame.render_widget(scene, scene_area);
            frame.render_widget(status, status_area);
        })?;

        Ok(())
    }
}

/// Initialize and run the TUI with a resolved configuration.
///
/// Note: Logging must be initialized by caller before calling this function.
pub fn run_with_config(config: &ResolvedConfig) -> Result<(), TuiError> {
    let mut app = TuiApp::new(config)?;

    let result = app.run();

    // Always restore terminal state
    restore_terminal()?;

    result
}

/// Restore terminal to normal state
///
/// Disables raw mode, mouse capture, and leaves alternate screen
fn restore_terminal() -> Result<(), TuiError> {
    disable_raw_mode()?;
    io::stdout().execute(crossterm::event::DisableMouseCapture)?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}
