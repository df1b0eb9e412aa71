use std::cell::{Cell, RefCell};

use super::area::{Listener, ListenerId, ScrollEvent, ScrollExtent, ScrollSurface, Window};

/// Scroll geometry plus listener table shared by the in-memory surfaces.
#[derive(Default)]
struct SurfaceState {
    extent: Cell<ScrollExtent>,
    listeners: RefCell<Vec<(ListenerId, Listener)>>,
    next_id: Cell<u64>,
}

impl SurfaceState {
    fn new(content_height: f64, visible_height: f64) -> Self {
        let state = Self::default();
        state.extent.set(ScrollExtent {
            content_height,
            scroll_top: 0.0,
            visible_height,
        });
        state
    }

    fn update(&self, change: impl FnOnce(&mut ScrollExtent)) {
        let mut extent = self.extent.get();
        change(&mut extent);
        self.extent.set(extent);
    }

    fn listen(&self, listener: Listener) -> ListenerId {
        let id = ListenerId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        self.listeners.borrow_mut().push((id, listener));
        id
    }

    fn unlisten(&self, id: ListenerId) -> bool {
        let mut listeners = self.listeners.borrow_mut();
        let before = listeners.len();
        listeners.retain(|(registered, _)| *registered != id);
        listeners.len() != before
    }

    fn dispatch(&self, event: ScrollEvent) {
        // snapshot: a listener may unlisten itself while running
        let listeners: Vec<Listener> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();
        for listener in listeners {
            listener(event);
        }
    }

    fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }
}

/// Viewport over an in-memory document.
pub struct MemoryWindow {
    location: String,
    state: SurfaceState,
}

impl MemoryWindow {
    pub fn new(location: impl Into<String>, document_height: f64, viewport_height: f64) -> Self {
        Self {
            location: location.into(),
            state: SurfaceState::new(document_height, viewport_height),
        }
    }

    pub fn scroll_to(&self, scroll_top: f64) {
        self.state.update(|extent| extent.scroll_top = scroll_top);
    }

    /// Scroll so the bottom of the document is in view.
    pub fn scroll_to_bottom(&self) {
        self.state.update(|extent| {
            extent.scroll_top = (extent.content_height - extent.visible_height).max(0.0)
        });
    }

    pub fn grow_document(&self, by: f64) {
        self.state.update(|extent| extent.content_height += by);
    }

    pub fn resize(&self, viewport_height: f64) {
        self.state.update(|extent| extent.visible_height = viewport_height);
    }

    /// Synchronously run every registered listener.
    pub fn dispatch(&self, event: ScrollEvent) {
        self.state.dispatch(event);
    }

    pub fn listener_count(&self) -> usize {
        self.state.listener_count()
    }
}

impl ScrollSurface for MemoryWindow {
    fn extent(&self) -> ScrollExtent {
        self.state.extent.get()
    }

    fn listen(&self, listener: Listener) -> ListenerId {
        self.state.listen(listener)
    }

    fn unlisten(&self, id: ListenerId) -> bool {
        self.state.unlisten(id)
    }
}

impl Window for MemoryWindow {
    fn location(&self) -> String {
        self.location.clone()
    }
}

/// A scrollable element, like a `<div>` with `overflow-y: scroll`.
pub struct MemoryElement {
    state: SurfaceState,
}

impl MemoryElement {
    pub fn new(scroll_height: f64, client_height: f64) -> Self {
        Self {
            state: SurfaceState::new(scroll_height, client_height),
        }
    }

    pub fn scroll_to(&self, scroll_top: f64) {
        self.state.update(|extent| extent.scroll_top = scroll_top);
    }

    pub fn dispatch(&self, event: ScrollEvent) {
        self.state.dispatch(event);
    }

    pub fn listener_count(&self) -> usize {
        self.state.listener_count()
    }
}

impl ScrollSurface for MemoryElement {
    fn extent(&self) -> ScrollExtent {
        self.state.extent.get()
    }

    fn listen(&self, listener: Listener) -> ListenerId {
        self.state.listen(listener)
    }

    fn unlisten(&self, id: ListenerId) -> bool {
        self.state.unlisten(id)
    }
}
