use std::rc::Rc;

/// Events that can move the bottom edge of a scroll area into view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollEvent {
    Scroll,
    Resize,
}

/// Handle returned by [`ScrollSurface::listen`], used to remove the listener.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

pub type Listener = Rc<dyn Fn(ScrollEvent)>;

/// Scroll geometry of a surface, in pixels.
///
/// For the viewport `content_height` is the document height and
/// `visible_height` the viewport height; for an element they are its
/// `scrollHeight` and `clientHeight`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollExtent {
    pub content_height: f64,
    pub scroll_top: f64,
    pub visible_height: f64,
}

impl ScrollExtent {
    pub fn distance_to_bottom(&self) -> f64 {
        self.content_height - self.scroll_top - self.visible_height
    }
}

/// Something that scrolls and reports scroll/resize events.
pub trait ScrollSurface {
    fn extent(&self) -> ScrollExtent;

    /// Register `listener` for scroll and resize events.
    fn listen(&self, listener: Listener) -> ListenerId;

    /// Remove a listener. Returns false when `id` was not registered.
    fn unlisten(&self, id: ListenerId) -> bool;
}

/// The browser-like top level surface: the viewport over the whole document.
pub trait Window: ScrollSurface {
    /// URL of the page currently displayed.
    fn location(&self) -> String;
}

/// Where scrolling is observed.
#[derive(Clone)]
pub enum Area {
    Viewport(Rc<dyn Window>),
    Element(Rc<dyn ScrollSurface>),
}

impl Area {
    pub fn extent(&self) -> ScrollExtent {
        match self {
            Area::Viewport(window) => window.extent(),
            Area::Element(element) => element.extent(),
        }
    }

    pub fn listen(&self, listener: Listener) -> ListenerId {
        match self {
            Area::Viewport(window) => window.listen(listener),
            Area::Element(element) => element.listen(listener),
        }
    }

    pub fn unlisten(&self, id: ListenerId) -> bool {
        match self {
            Area::Viewport(window) => window.unlisten(id),
            Area::Element(element) => element.unlisten(id),
        }
    }

    pub fn is_viewport(&self) -> bool {
        matches!(self, Area::Viewport(_))
    }

    /// documentHeight - scrollTop - viewportHeight for the viewport,
    /// scrollHeight - scrollTop - clientHeight for an element.
    pub fn distance_to_bottom(&self) -> f64 {
        self.extent().distance_to_bottom()
    }
}

impl std::fmt::Debug for Area {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Area::Viewport(_) => f.write_str("Area::Viewport"),
            Area::Element(_) => f.write_str("Area::Element"),
        }
    }
}
