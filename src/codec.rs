//! ChordCodec: raw key events → canonical chords
//!
//! Rendering engines disagree on what a keypress looks like: most report
//! a one-byte physical code, some report a DOM3-style vendor identifier
//! ("U+00FC") for layout-dependent keys. Normalization folds both forms
//! into one [`Chord`] so a single registry key matches everywhere.
//!
//! The identifier table is built for one keyboard layout (QWERTZ) and is
//! documented to break on others; that is a scope decision, not a bug.

use tracing::trace;

use crate::host::{KeyEvent, PlatformQuirks};
use crate::keycodes;
use crate::types::{Chord, Modifiers};

/// Normalize a raw key event into its canonical chord.
///
/// Total function: unrecognized codes produce a chord that simply will
/// not match any registered binding.
pub fn normalize(event: &KeyEvent, quirks: &PlatformQuirks) -> Chord {
    let mut code = event.code();

    if quirks.uses_vendor_key_identifier {
        if let Some(translated) = event.identifier.as_deref().and_then(identifier_code) {
            trace!(
                identifier = event.identifier.as_deref(),
                raw = code,
                translated,
                "translated vendor key identifier"
            );
            code = translated;
        }
    }

    // Old Gecko reports the plus key with its own secondary code
    if code == keycodes::PLUS_SECONDARY {
        code = keycodes::PLUS;
    }

    Chord::new(code, Modifiers::new(event.ctrl, event.shift, event.alt))
}

/// Translate a DOM3 `"U+XXXX"` key identifier to a base code.
///
/// ASCII letters and digits translate positionally; the fixed table
/// below covers the QWERTZ punctuation and umlaut divergences. Anything
/// else returns `None` and the raw code is used as-is.
fn identifier_code(identifier: &str) -> Option<u16> {
    let hex = identifier.strip_prefix("U+")?;
    let point = u32::from_str_radix(hex, 16).ok()?;
    let ch = char::from_u32(point)?;

    if ch.is_ascii_digit() || ch.is_ascii_uppercase() {
        return Some(ch as u16);
    }
    if ch.is_ascii_lowercase() {
        return Some(ch.to_ascii_uppercase() as u16);
    }

    let code = match ch {
        'ü' | 'Ü' => keycodes::UMLAUT,
        'ß' => keycodes::SHARP_S,
        '+' => keycodes::PLUS,
        '#' => keycodes::HASH,
        '-' => keycodes::MINUS,
        ',' => keycodes::COMMA,
        '.' => keycodes::PERIOD,
        '<' => keycodes::ANGLE_BRACKET,
        _ => return None,
    };
    Some(code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{ElementId, KeyEventKind};

    fn event(code: u16) -> KeyEvent {
        KeyEvent::new(KeyEventKind::KeyDown, code, ElementId::new("el"))
    }

    const IDENT_QUIRK: PlatformQuirks = PlatformQuirks {
        uses_vendor_key_identifier: true,
        needs_access_key_trap: false,
        needs_function_key_suppression: false,
    };

    #[test]
    fn test_raw_code_passthrough() {
        let chord = normalize(&event(70).with_modifiers(true, false, false), &PlatformQuirks::NONE);
        assert_eq!(chord, Chord::new(70, Modifiers::CTRL));
    }

    #[test]
    fn test_identifier_ignored_without_quirk() {
        let chord = normalize(&event(0).with_identifier("U+0046"), &PlatformQuirks::NONE);
        assert_eq!(chord.code, 0);
    }

    #[test]
    fn test_identifier_translates_letters() {
        let chord = normalize(&event(0).with_identifier("U+0046"), &IDENT_QUIRK);
        assert_eq!(chord.code, b'F' as u16);
    }

    #[test]
    fn test_identifier_translates_layout_keys() {
        let chord = normalize(&event(0).with_identifier("U+00FC"), &IDENT_QUIRK);
        assert_eq!(chord.code, keycodes::UMLAUT);

        let chord = normalize(&event(0).with_identifier("U+0023"), &IDENT_QUIRK);
        assert_eq!(chord.code, keycodes::HASH);
    }

    #[test]
    fn test_unknown_identifier_keeps_raw_code() {
        let chord = normalize(&event(42).with_identifier("U+20AC"), &IDENT_QUIRK);
        assert_eq!(chord.code, 42);

        let chord = normalize(&event(42).with_identifier("garbage"), &IDENT_QUIRK);
        assert_eq!(chord.code, 42);
    }

    #[test]
    fn test_secondary_plus_code_folds() {
        // Same physical key, two raw encodings, one chord
        let gecko = normalize(&event(keycodes::PLUS_SECONDARY), &PlatformQuirks::NONE);
        let other = normalize(&event(keycodes::PLUS), &PlatformQuirks::NONE);
        assert_eq!(gecko, other);
        assert_eq!(gecko.code, keycodes::PLUS);
    }

    #[test]
    fn test_identifier_and_raw_agree() {
        // Layout-normalization invariant: every supported encoding of the
        // same physical key yields an identical chord
        let by_code = normalize(&event(keycodes::UMLAUT).with_modifiers(false, false, true), &IDENT_QUIRK);
        let by_ident = normalize(
            &event(0).with_identifier("U+00DC").with_modifiers(false, false, true),
            &IDENT_QUIRK,
        );
        assert_eq!(by_code, by_ident);
    }
}
