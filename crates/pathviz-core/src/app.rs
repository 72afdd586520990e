//! The Elm-architecture application loop: [`Model`], [`Driver`], [`Effect`],
//! [`Screen`], [`App`].
//!
//! Ordinary messages go through `update` and the loop redraws afterwards.
//! A model that needs to show many frames from inside a single update (an
//! animated search, say) returns [`Effect::Animate`]; the loop then hands it
//! a [`Screen`] through which it presents frames and polls input on its own
//! schedule until it returns.

use std::error::Error;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use crate::canvas::{Canvas, Frame, compute_frame};
use crate::geom::Point;
use crate::messages::Msg;

// ---------------------------------------------------------------------------
// Context (cancellation token)
// ---------------------------------------------------------------------------

/// A cooperative-cancellation token backed by an [`AtomicBool`].
///
/// Clones share the same flag.
#[derive(Clone, Debug)]
pub struct Context {
    done: Arc<AtomicBool>,
}

impl Context {
    /// Create a new, non-cancelled context.
    pub fn new() -> Self {
        Self {
            done: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Whether cancellation has been requested.
    #[inline]
    pub fn is_done(&self) -> bool {
        self.done.load(Ordering::Relaxed)
    }

    /// Request cancellation.
    #[inline]
    pub fn cancel(&self) {
        self.done.store(true, Ordering::Relaxed);
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Effect
// ---------------------------------------------------------------------------

/// A side-effect returned by [`Model::update`].
#[derive(Debug, PartialEq, Eq)]
pub enum Effect {
    /// Call [`Model::animate`] with a live [`Screen`].
    Animate,
    /// Multiple effects, handled in order.
    Batch(Vec<Effect>),
    /// Stop the application loop.
    End,
}

// ---------------------------------------------------------------------------
// Driver trait
// ---------------------------------------------------------------------------

/// Back-end driver (terminal, test double, ...).
pub trait Driver {
    /// Initialise the back-end.
    fn init(&mut self) -> Result<(), Box<dyn Error>>;

    /// Wait up to `timeout` for input and return everything that arrived.
    /// An empty vector means the timeout elapsed.
    fn poll_msgs(&mut self, timeout: Duration) -> Result<Vec<Msg>, Box<dyn Error>>;

    /// Paint a computed frame.
    fn flush(&mut self, frame: Frame) -> Result<(), Box<dyn Error>>;

    /// Clean up / restore the terminal.
    fn close(&mut self);
}

// ---------------------------------------------------------------------------
// Screen
// ---------------------------------------------------------------------------

/// Live access to the driver while a model animates.
pub struct Screen<'a> {
    driver: &'a mut dyn Driver,
    prev: &'a mut Canvas,
    curr: &'a mut Canvas,
}

impl<'a> Screen<'a> {
    pub fn new(driver: &'a mut dyn Driver, prev: &'a mut Canvas, curr: &'a mut Canvas) -> Self {
        Self { driver, prev, curr }
    }

    /// Size of the drawable area.
    pub fn size(&self) -> Point {
        self.curr.bounds().size()
    }

    /// Draw into the back buffer with `draw`, then flush whatever changed.
    pub fn present(&mut self, draw: impl FnOnce(&mut Canvas)) -> Result<(), Box<dyn Error>> {
        draw(self.curr);
        let frame = compute_frame(self.prev, self.curr);
        if !frame.is_empty() {
            self.driver.flush(frame)?;
        }
        self.prev.copy_from(self.curr);
        Ok(())
    }

    /// Poll the driver for input, waiting at most `timeout`.
    pub fn poll(&mut self, timeout: Duration) -> Result<Vec<Msg>, Box<dyn Error>> {
        self.driver.poll_msgs(timeout)
    }
}

// ---------------------------------------------------------------------------
// Model trait
// ---------------------------------------------------------------------------

/// The application model (Elm architecture).
pub trait Model {
    /// Process a message, optionally returning a side-effect.
    fn update(&mut self, msg: Msg) -> Option<Effect>;

    /// Render the current state into `canvas`.
    fn draw(&self, canvas: &mut Canvas);

    /// Run a long update that presents its own frames. Called after `update`
    /// returns [`Effect::Animate`]; the returned effect is handled as if
    /// `update` had produced it.
    fn animate(&mut self, screen: &mut Screen<'_>) -> Result<Option<Effect>, Box<dyn Error>> {
        let _ = screen;
        Ok(None)
    }
}

// ---------------------------------------------------------------------------
// AppConfig / App
// ---------------------------------------------------------------------------

/// Configuration for creating an [`App`].
pub struct AppConfig<M: Model, D: Driver> {
    pub model: M,
    pub driver: D,
    pub width: i32,
    pub height: i32,
    /// How long one idle poll waits for input.
    pub poll_interval: Duration,
}

/// The main application runner.
pub struct App<M: Model, D: Driver> {
    model: M,
    driver: D,
    width: i32,
    height: i32,
    poll_interval: Duration,
}

impl<M: Model, D: Driver> App<M, D> {
    /// Create a new application from a configuration.
    pub fn new(config: AppConfig<M, D>) -> Self {
        Self {
            model: config.model,
            driver: config.driver,
            width: config.width,
            height: config.height,
            poll_interval: config.poll_interval,
        }
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    /// Run the Model-View-Update loop.
    ///
    /// 1. Initialises the driver.
    /// 2. Sends `Msg::Init` through the model.
    /// 3. Loops: update → draw → diff → flush → poll.
    /// 4. Stops when the model returns `Effect::End`. The driver is closed
    ///    on every exit path.
    pub fn run(&mut self) -> Result<(), Box<dyn Error>> {
        self.driver.init()?;
        let ctx = Context::new();
        let mut prev = Canvas::new(self.width, self.height);
        let mut curr = Canvas::new(self.width, self.height);
        let result = self.event_loop(&ctx, &mut prev, &mut curr);
        self.driver.close();
        result
    }

    fn event_loop(
        &mut self,
        ctx: &Context,
        prev: &mut Canvas,
        curr: &mut Canvas,
    ) -> Result<(), Box<dyn Error>> {
        let mut pending = vec![Msg::Init];

        while !ctx.is_done() {
            let needs_draw = !pending.is_empty();
            for msg in pending.drain(..) {
                if let Msg::Screen { .. } = msg {
                    // The terminal may have been cleared; repaint everything.
                    *prev = Canvas::new(0, 0);
                }
                if let Some(effect) = self.model.update(msg) {
                    self.handle_effect(effect, ctx, prev, curr)?;
                }
                if ctx.is_done() {
                    return Ok(());
                }
            }

            if needs_draw {
                self.model.draw(curr);
                let frame = compute_frame(prev, curr);
                if !frame.is_empty() {
                    self.driver.flush(frame)?;
                }
                if prev.bounds() != curr.bounds() {
                    *prev = Canvas::new(self.width, self.height);
                }
                prev.copy_from(curr);
            }

            pending = self.driver.poll_msgs(self.poll_interval)?;
        }
        Ok(())
    }

    fn handle_effect(
        &mut self,
        effect: Effect,
        ctx: &Context,
        prev: &mut Canvas,
        curr: &mut Canvas,
    ) -> Result<(), Box<dyn Error>> {
        match effect {
            Effect::End => ctx.cancel(),
            Effect::Animate => {
                if prev.bounds() != curr.bounds() {
                    *prev = Canvas::new(self.width, self.height);
                }
                let mut screen = Screen::new(&mut self.driver, prev, curr);
                if let Some(next) = self.model.animate(&mut screen)? {
                    self.handle_effect(next, ctx, prev, curr)?;
                }
            }
            Effect::Batch(effects) => {
                for e in effects {
                    self.handle_effect(e, ctx, prev, curr)?;
                    if ctx.is_done() {
                        break;
                    }
                }
            }
        }
        Ok(())
    }
}
