//! Reserved-chord table
//!
//! Chords empirically known to collide with native browser/OS behavior on
//! at least one supported platform: the suppression either cannot be
//! relied on or the binding silently never fires. Registration refuses
//! these unless the caller opts in.
//!
//! Entries are indexed by the combined integer spec (base code plus
//! modifier weights) to stay aligned with the public registration
//! encoding.

use crate::keycodes;
use crate::types::{Chord, ALT_WEIGHT, CTRL_WEIGHT, SHIFT_WEIGHT};

/// Spec → why it cannot be bound reliably. Static, read-only.
static RESERVED: &[(u16, &str)] = &[
    (
        ALT_WEIGHT + keycodes::TAB,
        "Alt+Tab switches between applications and never reaches the page",
    ),
    (
        ALT_WEIGHT + keycodes::F4,
        "Alt+F4 closes the window before the event can be suppressed",
    ),
    (
        ALT_WEIGHT + keycodes::SPACE,
        "Alt+Space opens the window menu",
    ),
    (
        CTRL_WEIGHT + b'W' as u16,
        "Ctrl+W closes the current tab on most browsers",
    ),
    (
        CTRL_WEIGHT + b'T' as u16,
        "Ctrl+T opens a new browser tab",
    ),
    (
        CTRL_WEIGHT + b'N' as u16,
        "Ctrl+N opens a new browser window",
    ),
    (
        CTRL_WEIGHT + b'Q' as u16,
        "Ctrl+Q quits the browser on some platforms",
    ),
    (
        CTRL_WEIGHT + keycodes::PAGE_UP,
        "Ctrl+PageUp switches to the previous tab",
    ),
    (
        CTRL_WEIGHT + keycodes::PAGE_DOWN,
        "Ctrl+PageDown switches to the next tab",
    ),
    (
        CTRL_WEIGHT + ALT_WEIGHT + keycodes::DELETE,
        "Ctrl+Alt+Delete is the system attention sequence",
    ),
    (
        keycodes::PRINT_SCREEN,
        "PrintScreen takes a screenshot and is swallowed by the OS",
    ),
    (
        keycodes::F10,
        "F10 moves focus to the menu bar on some browsers",
    ),
    (
        SHIFT_WEIGHT + keycodes::F10,
        "Shift+F10 opens the context menu",
    ),
];

/// Look up a chord in the reserved table.
///
/// The secondary code of the plus key is folded to its primary before
/// the lookup so both raw encodings hit the same entry.
pub fn is_broken(chord: &Chord) -> Option<&'static str> {
    let mut chord = *chord;
    if chord.code == keycodes::PLUS_SECONDARY {
        chord = chord.with_code(keycodes::PLUS);
    }
    let spec = chord.spec();
    RESERVED
        .iter()
        .find(|(reserved, _)| *reserved == spec)
        .map(|(_, description)| *description)
}
