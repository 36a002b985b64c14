//! Keyboard chord registration and dispatch
//!
//! This crate binds callbacks to keyboard chords (one base key plus any
//! combination of Ctrl/Shift/Alt) on specific target elements, and
//! normalizes the raw key-event differences between rendering engines so
//! one registry works everywhere:
//! - Converts raw platform key data into a canonical [`Chord`]
//! - Keeps a per-element registry of chord→callback bindings with
//!   conflict detection
//! - Refuses chords known to collide with native browser/OS behavior
//! - Suppresses the default action on key-down and dispatches the
//!   callback on key-up
//!
//! # Architecture
//!
//! ```text
//! host KeyEvent → codec::normalize() → Chord
//!                                        │
//! ShortcutDirectory ─ handler_for() ─▶ DispatchEngine ─▶ ChordRegistry
//!        │                                  │
//!        └─ register(spec, Binding) ────────┴─▶ callback on key-up
//! ```
//!
//! The crate never touches a concrete UI runtime: everything it needs
//! from the outside world goes through the [`Host`] trait, and runtime
//! differences are injected as a [`PlatformQuirks`] capability set.
//!
//! # Registering a chord
//!
//! ```ignore
//! let directory = ShortcutDirectory::new(host, PlatformQuirks::NONE);
//! // Ctrl+F is 256 + 70 in the public integer encoding
//! directory.register("myDiv", 326, Binding::new(|event, _| { /* ... */ }), false)?;
//! ```

pub mod broken;
pub mod codec;
pub mod config;
pub mod directory;
pub mod engine;
pub mod host;
pub mod keycodes;
pub mod registry;
pub mod types;

pub use config::{
    load_config_file, parse_chord, parse_config_yaml, user_config_path, ConfigError,
    ShortcutConfig, ShortcutEntry,
};
pub use directory::ShortcutDirectory;
pub use engine::DispatchEngine;
pub use host::{ElementId, EventHandler, Host, KeyEvent, KeyEventKind, PlatformQuirks};
pub use registry::{Binding, ChordRegistry, RegisterError, ShortcutFn};
pub use types::{Chord, Modifiers, ALT_WEIGHT, CTRL_WEIGHT, SHIFT_WEIGHT};
