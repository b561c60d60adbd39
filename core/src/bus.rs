//! Synchronous event bus
//!
//! Hooks are stored in subscription order and invoked in that order for every
//! event of their kind. Subscribing returns a [`HookId`] that is the only way
//! to remove the hook again.

use crate::event::{PointerEvent, RenderEvent};

/// Handle returned by a subscription
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HookId(u64);

type RenderHook = Box<dyn FnMut(&mut RenderEvent<'_>)>;
type PointerHook = Box<dyn FnMut(&mut PointerEvent)>;

enum Hook {
    Render(RenderHook),
    Pointer(PointerHook),
}

#[derive(Default)]
pub struct EventBus {
    next_id: u64,
    hooks: Vec<(HookId, Hook)>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe_render(&mut self, hook: impl FnMut(&mut RenderEvent<'_>) + 'static) -> HookId {
        self.push(Hook::Render(Box::new(hook)))
    }

    pub fn subscribe_pointer(&mut self, hook: impl FnMut(&mut PointerEvent) + 'static) -> HookId {
        self.push(Hook::Pointer(Box::new(hook)))
    }

    /// Remove a hook. Returns `false` if it was not subscribed.
    pub fn unsubscribe(&mut self, id: HookId) -> bool {
        let before = self.hooks.len();
        self.hooks.retain(|(hook_id, _)| *hook_id != id);
        self.hooks.len() != before
    }

    pub fn emit_render(&mut self, event: &mut RenderEvent<'_>) {
        for (_, hook) in &mut self.hooks {
            if let Hook::Render(f) = hook {
                f(event);
            }
        }
    }

    pub fn emit_pointer(&mut self, event: &mut PointerEvent) {
        for (_, hook) in &mut self.hooks {
            if let Hook::Pointer(f) = hook {
                f(event);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    fn push(&mut self, hook: Hook) -> HookId {
        let id = HookId(self.next_id);
        self.next_id += 1;
        self.hooks.push((id, hook));
        id
    }
}
