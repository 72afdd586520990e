//! **pathviz-core**: screen and application-loop types for the pathviz
//! visualizer.
//!
//! Geometry primitives, styled glyphs, a diffing canvas, input messages, and
//! the Elm-architecture application loop shared by the search engine, the
//! terminal driver and the visualizer itself.

pub mod app;
pub mod canvas;
pub mod geom;
pub mod glyph;
pub mod messages;
pub mod style;

pub use app::{App, AppConfig, Context, Driver, Effect, Model, Screen};
pub use canvas::{Canvas, Frame, FrameGlyph, compute_frame};
pub use geom::{Point, Range};
pub use glyph::Glyph;
pub use messages::*;
pub use style::{AttrMask, Color, ColorError, Style};
