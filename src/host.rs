//! The host collaborator contract
//!
//! The engine does not talk to any concrete UI runtime. Everything it
//! needs from the outside world (event observation, default-action
//! suppression, element styling, stable element identity, the
//! document-ready signal) is expressed on the [`Host`] trait, and the
//! runtime differences that matter are injected as a [`PlatformQuirks`]
//! capability set instead of being sniffed at dispatch time.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

/// Stable identity for a target element, as produced by [`Host::identify`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ElementId(String);

impl ElementId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Which phase of a press/release cycle an event belongs to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyEventKind {
    KeyDown,
    KeyUp,
}

/// A raw key event as delivered by the host.
///
/// The reported code and the suppression flags are interior-mutable
/// because handlers rewrite them in place while the host still owns the
/// event (function-key zeroing, default-action suppression).
#[derive(Debug)]
pub struct KeyEvent {
    pub kind: KeyEventKind,
    code: Cell<u16>,
    /// Vendor key-identifier string ("U+0041" form), when the host
    /// reports one instead of a reliable code
    pub identifier: Option<String>,
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
    pub target: ElementId,
    default_prevented: Cell<bool>,
    propagation_stopped: Cell<bool>,
}

impl KeyEvent {
    pub fn new(kind: KeyEventKind, code: u16, target: ElementId) -> Self {
        Self {
            kind,
            code: Cell::new(code),
            identifier: None,
            ctrl: false,
            shift: false,
            alt: false,
            target,
            default_prevented: Cell::new(false),
            propagation_stopped: Cell::new(false),
        }
    }

    pub fn with_modifiers(mut self, ctrl: bool, shift: bool, alt: bool) -> Self {
        self.ctrl = ctrl;
        self.shift = shift;
        self.alt = alt;
        self
    }

    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }

    /// The key code as currently reported (handlers may have zeroed it)
    pub fn code(&self) -> u16 {
        self.code.get()
    }

    /// Rewrite the reported code in place
    pub fn set_code(&self, code: u16) {
        self.code.set(code);
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented.get()
    }

    pub fn propagation_stopped(&self) -> bool {
        self.propagation_stopped.get()
    }

    pub fn prevent_default(&self) {
        self.default_prevented.set(true);
    }

    pub fn stop_propagation(&self) {
        self.propagation_stopped.set(true);
    }
}

/// Handler registered with [`Host::observe`]
pub type EventHandler = Rc<dyn Fn(&KeyEvent)>;

/// Runtime capabilities that change how chords are decoded and dispatched.
///
/// Injected once at directory construction; the codec and engine branch
/// only on these flags, never on a host/browser name.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlatformQuirks {
    /// The host reports layout-dependent vendor key identifiers instead
    /// of physical codes for some keys; run them through the translation
    /// table
    pub uses_vendor_key_identifier: bool,
    /// Alt+alphanumeric chords are intercepted as access keys unless a
    /// focus-trap element exists for the base key
    pub needs_access_key_trap: bool,
    /// Bound function keys trigger native shortcuts unless the reported
    /// code is zeroed on key-down
    pub needs_function_key_suppression: bool,
}

impl PlatformQuirks {
    /// A host with no known quirks
    pub const NONE: PlatformQuirks = PlatformQuirks {
        uses_vendor_key_identifier: false,
        needs_access_key_trap: false,
        needs_function_key_suppression: false,
    };
}

/// The DOM-like binding facility the engine delegates to.
///
/// Implementations are expected to be single-threaded; handlers are
/// invoked synchronously from event delivery.
pub trait Host {
    /// Attach a handler to an element's native event stream
    fn observe(&self, element: &ElementId, kind: KeyEventKind, handler: EventHandler);

    /// Suppress the event's default action and stop its propagation
    fn stop_event(&self, event: &KeyEvent) {
        event.prevent_default();
        event.stop_propagation();
    }

    /// The element the event originated on
    fn event_target(&self, event: &KeyEvent) -> ElementId {
        event.target.clone()
    }

    /// Apply inline styles to an element
    fn set_style(&self, element: &ElementId, styles: &[(&str, String)]);

    /// Resolve an application-supplied element reference to its stable id
    fn identify(&self, element: &str) -> ElementId;

    /// Run `callback` once the host document is fully loaded; hosts that
    /// are already loaded invoke it immediately
    fn when_ready(&self, callback: Box<dyn FnOnce()>);

    /// Current scroll offset of the viewport, in pixels
    fn scroll_offset(&self) -> (i32, i32);

    /// Install the off-screen focus-trap element that keeps the platform
    /// from intercepting Alt+`code` as an access key. Only called under
    /// [`PlatformQuirks::needs_access_key_trap`].
    fn install_access_key_trap(&self, code: u16) -> ElementId;
}
