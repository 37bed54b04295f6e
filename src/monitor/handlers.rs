//! Single-handler-per-name notification registry
//!
//! At most one handler is retained per notification name and the first
//! registration wins. Registration lowercases names and strips a leading
//! "on" prefix; removal matches the raw token against stored keys. The
//! asymmetry is deliberate, observable behavior.

use std::collections::HashMap;
use std::rc::Rc;

use crate::monitor::ExitEvent;

/// Shared notification callback
pub type Handler<R> = Rc<dyn Fn(&ExitEvent<R>)>;

/// Registry mapping normalized notification names to handlers
pub struct HandlerMap<R> {
    entries: HashMap<String, Handler<R>>,
}

impl<R> HandlerMap<R> {
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Register `handler` under each whitespace-separated name in `names`
    ///
    /// Names are lowercased and a leading `"on"` prefix is stripped, so
    /// `"onExit"` and `"exit"` land on the same key. A name that already
    /// holds a handler keeps it; the new registration is silently dropped.
    pub fn on(&mut self, names: &str, handler: Handler<R>) {
        for token in names.split_whitespace() {
            let lowered = token.to_lowercase();
            let name = lowered.strip_prefix("on").unwrap_or(&lowered);
            self.entries
                .entry(name.to_string())
                .or_insert_with(|| Rc::clone(&handler));
        }
    }

    /// Unregister `handler` from each whitespace-separated name in `names`
    ///
    /// A name is removed only when the raw token matches a stored key
    /// exactly and the stored handler is `handler` itself. Tokens carrying
    /// an `"on"` prefix or uppercase letters therefore never match keys
    /// normalized by [`on`](Self::on).
    pub fn off(&mut self, names: &str, handler: &Handler<R>) {
        for token in names.split_whitespace() {
            let held = self
                .entries
                .get(token)
                .is_some_and(|current| Rc::ptr_eq(current, handler));
            if held {
                self.entries.remove(token);
            }
        }
    }

    /// Look up the handler registered under `name`, if any
    pub fn get(&self, name: &str) -> Option<Handler<R>> {
        self.entries.get(name).map(Rc::clone)
    }

    /// Number of registered names
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no handler is registered
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<R> Default for HandlerMap<R> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "handlers_tests.rs"]
mod handlers_tests;
