//! Per-target chord registry: bindings, conflict detection, errors

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use thiserror::Error;
use tracing::debug;

use crate::broken;
use crate::host::{ElementId, KeyEvent};
use crate::keycodes;
use crate::types::Chord;

/// Callback invoked on key-up for a bound chord. Receives the event and
/// the receiver element: the binding's explicit context if present,
/// otherwise the event's original target.
pub type ShortcutFn = Rc<dyn Fn(&KeyEvent, &ElementId)>;

/// A registered callback with its optional invocation context.
///
/// The context is resolved once at registration time; dispatch never
/// inspects the callback's shape.
#[derive(Clone)]
pub struct Binding {
    callback: ShortcutFn,
    context: Option<ElementId>,
}

impl Binding {
    /// Binding invoked with the event target as receiver
    pub fn new(callback: impl Fn(&KeyEvent, &ElementId) + 'static) -> Self {
        Self {
            callback: Rc::new(callback),
            context: None,
        }
    }

    /// Binding invoked with an explicit receiver element
    pub fn with_context(
        context: ElementId,
        callback: impl Fn(&KeyEvent, &ElementId) + 'static,
    ) -> Self {
        Self {
            callback: Rc::new(callback),
            context: Some(context),
        }
    }

    pub fn context(&self) -> Option<&ElementId> {
        self.context.as_ref()
    }

    /// Invoke the callback synchronously with an already-resolved receiver
    pub fn call(&self, event: &KeyEvent, receiver: &ElementId) {
        (self.callback)(event, receiver);
    }

    /// Same underlying callback and context (used by alias bookkeeping
    /// and tests)
    pub fn shares_callback(&self, other: &Binding) -> bool {
        Rc::ptr_eq(&self.callback, &other.callback) && self.context == other.context
    }
}

impl fmt::Debug for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Binding")
            .field("context", &self.context)
            .finish_non_exhaustive()
    }
}

/// Why a registration was refused. Both variants are recoverable and
/// local to the `register` call; the prior state is left intact.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegisterError {
    /// The chord is documented as unreliable on at least one supported
    /// platform. Bypass with `allow_reserved`.
    #[error("chord {chord} is reserved by the platform: {description}")]
    Reserved {
        chord: Chord,
        description: &'static str,
    },
    /// The chord already has a binding on this target. Never bypassed.
    #[error("chord {chord} is already bound on this target")]
    Conflict { chord: Chord },
}

/// Chord → binding map owned by exactly one target element.
///
/// Keys are unique: re-registering a bound chord is a conflict, not an
/// overwrite. The one intentional many-to-one mapping is the umlaut-key
/// alias, created as a side effect of a single successful registration.
#[derive(Default)]
pub struct ChordRegistry {
    bindings: HashMap<Chord, Binding>,
}

impl ChordRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a binding for a chord.
    ///
    /// Fails with [`RegisterError::Reserved`] when the chord is in the
    /// reserved table and `allow_reserved` is false, and with
    /// [`RegisterError::Conflict`] when the chord (or its umlaut alias)
    /// is already bound, regardless of `allow_reserved`.
    pub fn register(
        &mut self,
        chord: Chord,
        binding: Binding,
        allow_reserved: bool,
    ) -> Result<(), RegisterError> {
        if !allow_reserved {
            if let Some(description) = broken::is_broken(&chord) {
                return Err(RegisterError::Reserved { chord, description });
            }
        }

        let alias = (chord.code == keycodes::UMLAUT)
            .then(|| chord.with_code(keycodes::UMLAUT_ALT));

        if self.bindings.contains_key(&chord)
            || alias.is_some_and(|a| self.bindings.contains_key(&a))
        {
            return Err(RegisterError::Conflict { chord });
        }

        if let Some(alias) = alias {
            // Some browsers report the umlaut key with the alias code;
            // both must resolve to the same binding
            self.bindings.insert(alias, binding.clone());
        }
        self.bindings.insert(chord, binding);
        debug!(%chord, "registered chord");
        Ok(())
    }

    /// Pure lookup, no side effects
    pub fn lookup(&self, chord: &Chord) -> Option<&Binding> {
        self.bindings.get(chord)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl fmt::Debug for ChordRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChordRegistry")
            .field("bindings", &self.bindings.len())
            .finish()
    }
}
