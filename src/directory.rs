//! Shortcut directory: one dispatch engine per target element
//!
//! The directory is an explicit object owned by the application's
//! composition root. It lazily builds an engine+registry pair the first
//! time a target is used, keyed by the host's stable element identity,
//! and exposes the integer chord-spec registration API. Entries live for
//! the directory's lifetime and are never removed.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use tracing::{debug, info, warn};

use crate::engine::DispatchEngine;
use crate::host::{ElementId, Host, PlatformQuirks};
use crate::registry::{Binding, RegisterError};
use crate::types::Chord;

/// Registration captured before the host document was ready
struct Pending {
    element: String,
    spec: u16,
    binding: Binding,
    allow_reserved: bool,
}

/// Per-element shortcut registries with lazy engine attachment.
pub struct ShortcutDirectory<H: Host> {
    host: Rc<H>,
    quirks: PlatformQuirks,
    engines: RefCell<HashMap<ElementId, Rc<DispatchEngine<H>>>>,
    pending: RefCell<Vec<Pending>>,
    ready: Cell<bool>,
}

impl<H: Host + 'static> ShortcutDirectory<H> {
    /// Reserved identity for the document-level target used by
    /// [`ShortcutDirectory::register_global`].
    pub const DOCUMENT: &'static str = "#document";

    /// Create a directory and hook the host's ready signal.
    ///
    /// Registrations made before the signal fires are queued and
    /// replayed in call order once it does; hosts that are already
    /// loaded fire the signal immediately.
    pub fn new(host: Rc<H>, quirks: PlatformQuirks) -> Rc<Self> {
        let directory = Rc::new(Self {
            host: Rc::clone(&host),
            quirks,
            engines: RefCell::new(HashMap::new()),
            pending: RefCell::new(Vec::new()),
            ready: Cell::new(false),
        });

        let weak = Rc::downgrade(&directory);
        host.when_ready(Box::new(move || {
            if let Some(directory) = weak.upgrade() {
                directory.mark_ready();
            }
        }));
        directory
    }

    fn mark_ready(&self) {
        self.ready.set(true);
        let queued = self.pending.borrow_mut().drain(..).collect::<Vec<_>>();
        if !queued.is_empty() {
            info!(count = queued.len(), "replaying queued registrations");
        }
        for entry in queued {
            let chord = Chord::from_spec(entry.spec);
            if let Err(err) =
                self.register_now(&entry.element, chord, entry.binding, entry.allow_reserved)
            {
                warn!(%chord, element = %entry.element, %err, "queued registration failed");
            }
        }
    }

    /// The registry engine for an element, created and attached on first
    /// call. Idempotent.
    ///
    /// Attachment is not deferred by the ready signal: calling this
    /// before the host is ready still observes the element's events
    /// immediately. Only [`ShortcutDirectory::register`] queues.
    pub fn handler_for(&self, element: &str) -> Rc<DispatchEngine<H>> {
        let id = if element == Self::DOCUMENT {
            ElementId::new(Self::DOCUMENT)
        } else {
            self.host.identify(element)
        };
        let mut engines = self.engines.borrow_mut();
        if let Some(engine) = engines.get(&id) {
            return Rc::clone(engine);
        }
        debug!(target = %id, "creating registry for target");
        let engine = DispatchEngine::attach(Rc::clone(&self.host), self.quirks, id.clone());
        engines.insert(id, Rc::clone(&engine));
        engine
    }

    /// Register a chord (public integer encoding) on an element.
    ///
    /// Before the host is ready the call is queued and `Ok(())` is
    /// returned; replay failures are logged, not raised.
    pub fn register(
        &self,
        element: &str,
        spec: u16,
        binding: Binding,
        allow_reserved: bool,
    ) -> Result<(), RegisterError> {
        if !self.ready.get() {
            self.pending.borrow_mut().push(Pending {
                element: element.to_string(),
                spec,
                binding,
                allow_reserved,
            });
            debug!(element, spec, "queued registration until host is ready");
            return Ok(());
        }
        self.register_now(element, Chord::from_spec(spec), binding, allow_reserved)
    }

    /// Register on the document-level target
    pub fn register_global(
        &self,
        spec: u16,
        binding: Binding,
        allow_reserved: bool,
    ) -> Result<(), RegisterError> {
        self.register(Self::DOCUMENT, spec, binding, allow_reserved)
    }

    fn register_now(
        &self,
        element: &str,
        chord: Chord,
        binding: Binding,
        allow_reserved: bool,
    ) -> Result<(), RegisterError> {
        self.handler_for(element).register(chord, binding, allow_reserved)
    }

    /// Whether the host ready signal has fired
    pub fn is_ready(&self) -> bool {
        self.ready.get()
    }
}
