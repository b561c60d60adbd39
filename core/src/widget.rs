//! Shared widget handles and hook registration
//!
//! A [`WidgetHandle`] owns a widget behind `Rc<RefCell<_>>` and remembers the
//! hooks it installed on an [`EventBus`]. The bus only keeps weak references,
//! so dropping the handle is enough to make its hooks inert; calling
//! [`WidgetHandle::unregister`] removes them outright.

use std::cell::{Ref, RefCell, RefMut};
use std::rc::{Rc, Weak};

use tracing::{debug, warn};

use crate::bus::{EventBus, HookId};
use crate::element::{HudElement, HudWidget, Renderable};

#[derive(Debug, Clone, Copy)]
struct Hooks {
    render: HookId,
    pointer: HookId,
}

pub struct WidgetHandle {
    inner: Rc<RefCell<dyn HudWidget>>,
    hooks: Option<Hooks>,
}

impl WidgetHandle {
    pub fn new<R: Renderable>(element: HudElement<R>) -> Self {
        let inner: Rc<RefCell<dyn HudWidget>> = Rc::new(RefCell::new(element));
        Self { inner, hooks: None }
    }

    pub fn is_registered(&self) -> bool {
        self.hooks.is_some()
    }

    /// Install the render and pointer hooks on `bus`
    ///
    /// Returns `false` if the widget is already registered.
    pub fn register(&mut self, bus: &mut EventBus) -> bool {
        if self.hooks.is_some() {
            return false;
        }

        let render_target = Rc::downgrade(&self.inner);
        let render = bus.subscribe_render(move |event| {
            with_widget(&render_target, |w| w.on_render_event(event));
        });

        let pointer_target = Rc::downgrade(&self.inner);
        let pointer = bus.subscribe_pointer(move |event| {
            with_widget(&pointer_target, |w| w.on_pointer_event(event));
        });

        self.hooks = Some(Hooks { render, pointer });
        debug!(widget = %self.inner.borrow().name(), "registered hooks");
        true
    }

    /// Remove this widget's hooks from `bus` and drop any drag in progress
    ///
    /// Returns `false` if the widget was not registered.
    pub fn unregister(&mut self, bus: &mut EventBus) -> bool {
        let Some(hooks) = self.hooks.take() else {
            return false;
        };

        bus.unsubscribe(hooks.render);
        bus.unsubscribe(hooks.pointer);
        self.inner.borrow_mut().cancel_drag();
        debug!(widget = %self.inner.borrow().name(), "unregistered hooks");
        true
    }

    pub fn borrow(&self) -> Ref<'_, dyn HudWidget> {
        self.inner.borrow()
    }

    pub fn borrow_mut(&self) -> RefMut<'_, dyn HudWidget> {
        self.inner.borrow_mut()
    }
}

fn with_widget(target: &Weak<RefCell<dyn HudWidget>>, f: impl FnOnce(&mut dyn HudWidget)) {
    let Some(widget) = target.upgrade() else {
        return;
    };
    match widget.try_borrow_mut() {
        Ok(mut w) => f(&mut *w),
        Err(_) => warn!("widget busy during dispatch, skipping hook"),
    }
}
