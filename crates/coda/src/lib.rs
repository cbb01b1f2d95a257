//! Coda: a terminal UI toolkit for a music player.
//!
//! The pipeline each frame: application code builds a [`Node`] tree, hands
//! it to [`layout`] with the terminal dimensions, extracts [`DrawCmd`]s via
//! [`draw`], stable-sorts them by z, and applies them to a [`Renderer`]
//! which diffs against its cell buffer and emits a minimal ANSI frame.
//! Pointer coordinates resolve against the positioned tree through
//! [`tree::click`].
//!
//! Tag parsing, audio playback, settings, and input decoding live outside
//! this crate; it consumes a content tree and coordinates, nothing more.

pub mod draw;
pub mod error;
mod layout;
pub mod node;
pub mod render;
pub mod style;
pub mod term;
pub mod tree;

pub use draw::{DrawCmd, draw, z_sorted};
pub use error::{Error, Result};
pub use layout::{Placed, layout};
pub use node::{Kind, Node};
pub use render::{Cell, ColorMode, Renderer};
pub use style::{Attr, AttrSet, Center, Dir, Gradient, Padding, Rgb, Size, Style};
pub use term::{CursorShape, Term};

// Geometry types are part of the public surface.
pub use geom::{Expanse, Point, Rect};
