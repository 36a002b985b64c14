//! Two-phase dispatch engine, one per target element
//!
//! Key-down decides whether the native default action is suppressed;
//! key-up actually invokes the bound callback. The two phases compute
//! their chord independently with no held-key state, so releasing a
//! modifier mid-press makes the key-up resolve to a different chord
//! than the key-down did. That matches the observed platform behavior
//! this engine reproduces.
//!
//! Modifier-pressed-alone bindings (the bare pseudo-codes in
//! [`crate::keycodes`]) show the asymmetry most clearly: the press
//! still carries the modifier's own flag while the release does not,
//! so the binding dispatches on key-up without the key-down ever
//! having been suppressed.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use tracing::{debug, trace};

use crate::codec;
use crate::host::{ElementId, Host, KeyEvent, KeyEventKind, PlatformQuirks};
use crate::keycodes;
use crate::registry::{Binding, ChordRegistry, RegisterError};
use crate::types::Chord;

/// Dispatch engine bound to one target element's key-down/key-up stream.
pub struct DispatchEngine<H: Host> {
    host: Rc<H>,
    quirks: PlatformQuirks,
    target: ElementId,
    registry: RefCell<ChordRegistry>,
    /// Access-key focus traps, one per Alt+alphanumeric base code
    traps: RefCell<HashMap<u16, ElementId>>,
}

impl<H: Host + 'static> DispatchEngine<H> {
    /// Create an engine for `target` and attach it to the host's native
    /// key events. Called once per target by the directory.
    pub(crate) fn attach(host: Rc<H>, quirks: PlatformQuirks, target: ElementId) -> Rc<Self> {
        let engine = Rc::new(Self {
            host,
            quirks,
            target: target.clone(),
            registry: RefCell::new(ChordRegistry::new()),
            traps: RefCell::new(HashMap::new()),
        });

        let down: Weak<Self> = Rc::downgrade(&engine);
        engine.host.observe(
            &target,
            KeyEventKind::KeyDown,
            Rc::new(move |event| {
                if let Some(engine) = down.upgrade() {
                    engine.on_key_down(event);
                }
            }),
        );

        let up: Weak<Self> = Rc::downgrade(&engine);
        engine.host.observe(
            &target,
            KeyEventKind::KeyUp,
            Rc::new(move |event| {
                if let Some(engine) = up.upgrade() {
                    engine.on_key_up(event);
                }
            }),
        );

        debug!(target = %target, "attached dispatch engine");
        engine
    }

    /// The element this engine is bound to
    pub fn target(&self) -> &ElementId {
        &self.target
    }

    /// Register a binding on this target.
    ///
    /// On success, under the access-key quirk, an Alt+alphanumeric chord
    /// additionally installs a focus-trap element for its base code so
    /// the platform does not intercept the chord before it reaches the
    /// handlers.
    pub fn register(
        &self,
        chord: Chord,
        binding: Binding,
        allow_reserved: bool,
    ) -> Result<(), RegisterError> {
        self.registry
            .borrow_mut()
            .register(chord, binding, allow_reserved)?;

        if self.quirks.needs_access_key_trap && is_access_key_chord(&chord) {
            let mut traps = self.traps.borrow_mut();
            if !traps.contains_key(&chord.code) {
                let trap = self.host.install_access_key_trap(chord.code);
                debug!(code = chord.code, trap = %trap, "installed access-key trap");
                traps.insert(chord.code, trap);
            }
        }
        Ok(())
    }

    /// Pure lookup on this target's registry
    pub fn lookup(&self, chord: &Chord) -> Option<Binding> {
        self.registry.borrow().lookup(chord).cloned()
    }

    /// Early phase: suppress the default action for bound chords.
    fn on_key_down(&self, event: &KeyEvent) {
        let chord = codec::normalize(event, &self.quirks);
        if self.registry.borrow().lookup(&chord).is_none() {
            return;
        }
        trace!(%chord, "suppressing default for bound chord");

        if self.quirks.needs_function_key_suppression && keycodes::is_function_key(chord.code) {
            // Zeroing the reported code keeps the native shortcut from
            // firing alongside ours
            event.set_code(0);
        }

        if self.quirks.needs_access_key_trap && is_access_key_chord(&chord) {
            if let Some(trap) = self.traps.borrow().get(&chord.code) {
                // The platform briefly focuses the trap; pin it to the
                // current scroll offset so the page does not jump
                let (x, y) = self.host.scroll_offset();
                self.host
                    .set_style(trap, &[("left", format!("{x}px")), ("top", format!("{y}px"))]);
            }
        }

        self.host.stop_event(event);
    }

    /// Late phase: invoke the bound callback, then suppress the default.
    fn on_key_up(&self, event: &KeyEvent) {
        let chord = codec::normalize(event, &self.quirks);
        // Clone out of the borrow so the callback may register chords
        let Some(binding) = self.registry.borrow().lookup(&chord).cloned() else {
            return;
        };
        trace!(%chord, "dispatching bound chord");
        let receiver = binding
            .context()
            .cloned()
            .unwrap_or_else(|| self.host.event_target(event));
        binding.call(event, &receiver);
        self.host.stop_event(event);
    }
}

/// Chords the platform treats as access keys: Alt plus a letter or digit
fn is_access_key_chord(chord: &Chord) -> bool {
    chord.mods.alt() && keycodes::is_alphanumeric(chord.code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Modifiers;

    #[test]
    fn test_access_key_chord_shape() {
        let alt_a = Chord::new(b'A' as u16, Modifiers::ALT);
        assert!(is_access_key_chord(&alt_a));

        let ctrl_alt_a = Chord::new(b'A' as u16, Modifiers::CTRL | Modifiers::ALT);
        assert!(is_access_key_chord(&ctrl_alt_a));

        let alt_enter = Chord::new(keycodes::ENTER, Modifiers::ALT);
        assert!(!is_access_key_chord(&alt_enter));

        let bare_a = Chord::bare(b'A' as u16);
        assert!(!is_access_key_chord(&bare_a));
    }
}
