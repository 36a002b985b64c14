//! Key code constants and classification helpers
//!
//! Base codes are the legacy platform key codes (one byte), which is what
//! the public integer chord encoding stores in its low 8 bits. The three
//! modifier pseudo-codes exist so a modifier pressed on its own can be
//! bound like any other key.

// Modifier pseudo-codes (modifier pressed alone). Bind these with the
// bare code and no modifier weight: the release event no longer carries
// the modifier's own flag, so the bare chord is what the key-up
// resolves to.
pub const SHIFT: u16 = 16;
pub const CTRL: u16 = 17;
pub const ALT: u16 = 18;

// Control and whitespace
pub const BACKSPACE: u16 = 8;
pub const TAB: u16 = 9;
pub const ENTER: u16 = 13;
pub const PAUSE: u16 = 19;
pub const CAPS_LOCK: u16 = 20;
pub const ESCAPE: u16 = 27;
pub const SPACE: u16 = 32;

// Navigation
pub const PAGE_UP: u16 = 33;
pub const PAGE_DOWN: u16 = 34;
pub const END: u16 = 35;
pub const HOME: u16 = 36;
pub const LEFT: u16 = 37;
pub const UP: u16 = 38;
pub const RIGHT: u16 = 39;
pub const DOWN: u16 = 40;
pub const PRINT_SCREEN: u16 = 44;
pub const INSERT: u16 = 45;
pub const DELETE: u16 = 46;

// Digits are 48..=57 ('0'..'9'), letters 65..=90 ('A'..'Z')

// Function keys
pub const F1: u16 = 112;
pub const F2: u16 = 113;
pub const F3: u16 = 114;
pub const F4: u16 = 115;
pub const F5: u16 = 116;
pub const F6: u16 = 117;
pub const F7: u16 = 118;
pub const F8: u16 = 119;
pub const F9: u16 = 120;
pub const F10: u16 = 121;
pub const F11: u16 = 122;
pub const F12: u16 = 123;

pub const NUM_LOCK: u16 = 144;
pub const SCROLL_LOCK: u16 = 145;

// Punctuation on the assumed (QWERTZ) layout. The plus key has two raw
// codes in the wild: 187 on most engines, 61 on old Gecko. 61 is folded
// to 187 before any table lookup or match.
pub const PLUS: u16 = 187;
pub const PLUS_SECONDARY: u16 = 61;
pub const COMMA: u16 = 188;
pub const MINUS: u16 = 189;
pub const PERIOD: u16 = 190;
pub const HASH: u16 = 191;
pub const SHARP_S: u16 = 219;
pub const ANGLE_BRACKET: u16 = 226;

/// The ü key. Some WebKit builds report the same physical key as
/// [`UMLAUT_ALT`]; registering a chord on `UMLAUT` aliases both codes.
pub const UMLAUT: u16 = 186;
pub const UMLAUT_ALT: u16 = 222;

/// Letter or digit key.
#[inline]
pub const fn is_alphanumeric(code: u16) -> bool {
    matches!(code, 48..=57 | 65..=90)
}

/// F1 through F12.
#[inline]
pub const fn is_function_key(code: u16) -> bool {
    matches!(code, F1..=F12)
}

/// One of the three modifier pseudo-codes.
#[inline]
pub const fn is_modifier(code: u16) -> bool {
    matches!(code, SHIFT | CTRL | ALT)
}

/// Parse a key name from a config string ("s", "7", "enter", "f4", ...).
///
/// Names are matched case-insensitively by the caller (config passes them
/// pre-lowercased). Returns `None` for unknown names.
pub fn from_name(name: &str) -> Option<u16> {
    if name.len() == 1 {
        let c = name.chars().next()?;
        if c.is_ascii_alphanumeric() {
            return Some(c.to_ascii_uppercase() as u16);
        }
    }

    let code = match name {
        "backspace" | "back" => BACKSPACE,
        "tab" => TAB,
        "enter" | "return" => ENTER,
        "pause" => PAUSE,
        "capslock" => CAPS_LOCK,
        "escape" | "esc" => ESCAPE,
        "space" => SPACE,
        "pageup" | "pgup" => PAGE_UP,
        "pagedown" | "pgdown" | "pgdn" => PAGE_DOWN,
        "end" => END,
        "home" => HOME,
        "left" => LEFT,
        "up" => UP,
        "right" => RIGHT,
        "down" => DOWN,
        "printscreen" | "prtsc" => PRINT_SCREEN,
        "insert" | "ins" => INSERT,
        "delete" | "del" => DELETE,
        "f1" => F1,
        "f2" => F2,
        "f3" => F3,
        "f4" => F4,
        "f5" => F5,
        "f6" => F6,
        "f7" => F7,
        "f8" => F8,
        "f9" => F9,
        "f10" => F10,
        "f11" => F11,
        "f12" => F12,
        "numlock" => NUM_LOCK,
        "scrolllock" => SCROLL_LOCK,
        "plus" => PLUS,
        "comma" => COMMA,
        "minus" => MINUS,
        "period" | "dot" => PERIOD,
        "hash" => HASH,
        "sharp_s" | "ss" => SHARP_S,
        "angle" => ANGLE_BRACKET,
        "umlaut" | "ue" => UMLAUT,
        // Modifier pressed alone
        "shiftkey" => SHIFT,
        "ctrlkey" => CTRL,
        "altkey" => ALT,
        _ => return None,
    };
    Some(code)
}

/// Human-readable name for a base code, used in chord display strings.
pub fn name(code: u16) -> String {
    if is_alphanumeric(code) {
        return char::from(code as u8).to_string();
    }
    let named = match code {
        BACKSPACE => "Backspace",
        TAB => "Tab",
        ENTER => "Enter",
        SHIFT => "ShiftKey",
        CTRL => "CtrlKey",
        ALT => "AltKey",
        PAUSE => "Pause",
        CAPS_LOCK => "CapsLock",
        ESCAPE => "Escape",
        SPACE => "Space",
        PAGE_UP => "PageUp",
        PAGE_DOWN => "PageDown",
        END => "End",
        HOME => "Home",
        LEFT => "Left",
        UP => "Up",
        RIGHT => "Right",
        DOWN => "Down",
        PRINT_SCREEN => "PrintScreen",
        INSERT => "Insert",
        DELETE => "Delete",
        NUM_LOCK => "NumLock",
        SCROLL_LOCK => "ScrollLock",
        PLUS | PLUS_SECONDARY => "+",
        COMMA => ",",
        MINUS => "-",
        PERIOD => ".",
        HASH => "#",
        SHARP_S => "ß",
        ANGLE_BRACKET => "<",
        UMLAUT | UMLAUT_ALT => "Ü",
        _ => "",
    };
    if !named.is_empty() {
        return named.to_string();
    }
    if is_function_key(code) {
        return format!("F{}", code - F1 + 1);
    }
    format!("Key{}", code)
}
