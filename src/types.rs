//! Core value types: Modifiers, Chord, and the public integer encoding

use std::fmt;

use crate::keycodes;

/// Spec-encoding weight for Ctrl.
pub const CTRL_WEIGHT: u16 = 256;
/// Spec-encoding weight for Shift.
pub const SHIFT_WEIGHT: u16 = 512;
/// Spec-encoding weight for Alt.
pub const ALT_WEIGHT: u16 = 1024;

/// Modifier keys as a bitfield for efficient storage and comparison
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Modifiers(u8);

impl Modifiers {
    pub const NONE: Modifiers = Modifiers(0);
    pub const CTRL: Modifiers = Modifiers(0b001);
    pub const SHIFT: Modifiers = Modifiers(0b010);
    pub const ALT: Modifiers = Modifiers(0b100);

    /// Create modifiers from individual flags
    pub const fn new(ctrl: bool, shift: bool, alt: bool) -> Self {
        let mut bits = 0u8;
        if ctrl {
            bits |= 0b001;
        }
        if shift {
            bits |= 0b010;
        }
        if alt {
            bits |= 0b100;
        }
        Modifiers(bits)
    }

    /// Check if ctrl is held
    #[inline]
    pub const fn ctrl(self) -> bool {
        self.0 & 0b001 != 0
    }

    /// Check if shift is held
    #[inline]
    pub const fn shift(self) -> bool {
        self.0 & 0b010 != 0
    }

    /// Check if alt is held
    #[inline]
    pub const fn alt(self) -> bool {
        self.0 & 0b100 != 0
    }

    /// Check if no modifiers are held
    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Combine two modifier sets
    #[inline]
    pub const fn union(self, other: Modifiers) -> Modifiers {
        Modifiers(self.0 | other.0)
    }

    /// Exactly Alt, no other modifier.
    #[inline]
    pub const fn is_alt_only(self) -> bool {
        self.0 == 0b100
    }
}

impl std::ops::BitOr for Modifiers {
    type Output = Modifiers;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.union(rhs)
    }
}

impl fmt::Display for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if self.ctrl() {
            parts.push("Ctrl");
        }
        if self.shift() {
            parts.push("Shift");
        }
        if self.alt() {
            parts.push("Alt");
        }
        write!(f, "{}", parts.join("+"))
    }
}

/// A chord: one base key code plus modifier flags.
///
/// Equality is structural; two raw platform encodings of the same physical
/// key normalize to the same `Chord` (see [`crate::codec::normalize`]).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Chord {
    /// Base key code (0..=255), see [`crate::keycodes`]
    pub code: u16,
    /// Modifier flags
    pub mods: Modifiers,
}

impl Chord {
    /// Create a chord from a base code and modifiers.
    ///
    /// The base code must fit in one byte; a larger code would be
    /// silently truncated by [`Chord::spec`].
    pub const fn new(code: u16, mods: Modifiers) -> Self {
        debug_assert!(code <= 0xFF, "base code must fit in one byte");
        Self { code, mods }
    }

    /// Create a chord with no modifiers
    pub const fn bare(code: u16) -> Self {
        Self::new(code, Modifiers::NONE)
    }

    /// Decode the public single-integer chord specification: low 8 bits
    /// base code, +256 Ctrl, +512 Shift, +1024 Alt.
    pub const fn from_spec(spec: u16) -> Self {
        Self {
            code: spec & 0xFF,
            mods: Modifiers::new(
                spec & CTRL_WEIGHT != 0,
                spec & SHIFT_WEIGHT != 0,
                spec & ALT_WEIGHT != 0,
            ),
        }
    }

    /// Encode back to the single-integer specification. Bit-for-bit
    /// inverse of [`Chord::from_spec`] for codes in 0..=255.
    pub const fn spec(&self) -> u16 {
        let mut spec = self.code & 0xFF;
        if self.mods.ctrl() {
            spec += CTRL_WEIGHT;
        }
        if self.mods.shift() {
            spec += SHIFT_WEIGHT;
        }
        if self.mods.alt() {
            spec += ALT_WEIGHT;
        }
        spec
    }

    /// Chord with the same modifiers but a different base code
    pub const fn with_code(&self, code: u16) -> Self {
        Self::new(code, self.mods)
    }
}

impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.mods.is_empty() {
            write!(f, "{}+{}", self.mods, keycodes::name(self.code))
        } else {
            write!(f, "{}", keycodes::name(self.code))
        }
    }
}
