use log::{debug, info, trace, warn};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use tokio::sync::Notify;

use crate::config::{PagerConfig, PagerDefaults, PagerOptions};
use crate::dom::{
    CURRENT_PAGE_ATTR, Container, Fragment, LOADING_CLASS, Listener, ListenerId, ScrollEvent,
    Window,
};
use crate::errors::PagerError;
use crate::http::{FetchFailed, Transport};
use crate::pagination::{Evaluation, PageRequest, PagerState};

/// Loads the next page whenever the observed area is scrolled near its bottom.
///
/// The handle is cheap to clone; clones drive the same pager. Fetches are
/// spawned with [`tokio::task::spawn_local`], so the pager must be attached
/// and driven from inside a [`tokio::task::LocalSet`].
pub struct ScrollPager<T: Transport + 'static> {
    inner: Rc<Inner<T>>,
}

struct Inner<T> {
    container: Rc<dyn Container>,
    config: PagerConfig,
    transport: T,
    state: RefCell<PagerState>,
    listener: Cell<Option<ListenerId>>,
    disposed: Cell<bool>,
    settled: Notify,
}

impl<T: Transport + 'static> Clone for ScrollPager<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T: Transport + 'static> ScrollPager<T> {
    /// Attach a pager to `container` using the default settings.
    pub fn attach(
        container: Rc<dyn Container>,
        window: Rc<dyn Window>,
        transport: T,
        options: PagerOptions,
    ) -> Result<Self, PagerError> {
        Self::attach_with_defaults(container, window, transport, options, &PagerDefaults::default())
    }

    /// Attach a pager, binding scroll/resize listeners and evaluating once
    /// so content already in view triggers a fetch.
    pub fn attach_with_defaults(
        container: Rc<dyn Container>,
        window: Rc<dyn Window>,
        transport: T,
        options: PagerOptions,
        defaults: &PagerDefaults,
    ) -> Result<Self, PagerError> {
        let config = options.resolve(defaults, &window)?;
        let state = PagerState::from_container(container.as_ref())?;

        debug!(
            "Attaching pager at page {}/{} (url: {}, distance: {}px)",
            state.current_page(),
            state.total_pages(),
            config.url(),
            config.distance()
        );

        let pager = Self {
            inner: Rc::new(Inner {
                container,
                config,
                transport,
                state: RefCell::new(state),
                listener: Cell::new(None),
                disposed: Cell::new(false),
                settled: Notify::new(),
            }),
        };

        pager.bind();
        pager.evaluate();
        Ok(pager)
    }

    // --- Triggers ---

    /// Check the scroll position and load the next page if close enough.
    pub fn evaluate(&self) {
        let decision = {
            let state = self.inner.state.borrow();
            let distance_to_bottom = self.inner.config.area().distance_to_bottom();
            state.evaluate(distance_to_bottom, self.inner.config.distance())
        };

        match decision {
            Evaluation::Busy => trace!("Fetch in flight, ignoring evaluation"),
            Evaluation::Wait => trace!("Not scrolled far enough"),
            Evaluation::Finished => self.unbind(),
            Evaluation::Load => self.load(),
        }
    }

    /// Fetch the next page now, regardless of the scroll position.
    ///
    /// Does nothing while a fetch is in flight, once the last page is loaded,
    /// or after [`dispose`](Self::dispose).
    pub fn load(&self) {
        if self.inner.disposed.get() {
            debug!("Load skipped: pager disposed");
            return;
        }
        let Some(request) = self.inner.state.borrow_mut().begin_load() else {
            debug!("Load skipped: fetch in flight or last page reached");
            return;
        };

        self.inner.container.set_class(LOADING_CLASS, true);
        self.inner.config.show_loading();
        info!("Loading page {} from {}", request.page, self.inner.config.url());

        let inner = self.inner.clone();
        tokio::task::spawn_local(async move {
            let outcome = inner.transport.fetch(inner.config.url(), request.page).await;
            ScrollPager { inner }.finish(request, outcome);
        });
    }

    /// Same as [`load`](Self::load); meant for a "try again" control.
    pub fn retry(&self) {
        self.load();
    }

    /// Detach the scroll/resize listener. Safe to call more than once.
    ///
    /// A fetch already in flight still runs to completion, but its outcome is
    /// dropped: nothing is appended and the container attributes, classes and
    /// indicators are left as they are.
    pub fn dispose(&self) {
        self.inner.disposed.set(true);
        self.unbind();
    }

    // --- Observers ---

    pub fn current_page(&self) -> u32 {
        self.inner.state.borrow().current_page()
    }

    pub fn total_pages(&self) -> u32 {
        self.inner.state.borrow().total_pages()
    }

    pub fn is_loading(&self) -> bool {
        self.inner.state.borrow().is_loading()
    }

    pub fn is_done(&self) -> bool {
        self.inner.state.borrow().is_done()
    }

    pub fn is_bound(&self) -> bool {
        self.inner.state.borrow().is_bound()
    }

    /// Resolves once no fetch is in flight.
    pub async fn settled(&self) {
        loop {
            let notified = self.inner.settled.notified();
            if !self.is_loading() {
                return;
            }
            notified.await;
        }
    }

    // --- Listener lifecycle ---

    fn bind(&self) {
        let weak = Rc::downgrade(&self.inner);
        let listener: Listener = Rc::new(move |event: ScrollEvent| {
            if let Some(inner) = weak.upgrade() {
                trace!("{:?} event", event);
                ScrollPager { inner }.evaluate();
            }
        });

        let id = self.inner.config.area().listen(listener);
        self.inner.listener.set(Some(id));
        self.inner.state.borrow_mut().mark_bound();
    }

    fn unbind(&self) {
        if !self.inner.state.borrow_mut().mark_unbound() {
            return;
        }
        if let Some(id) = self.inner.listener.take() {
            self.inner.config.area().unlisten(id);
        }
        info!(
            "Stopped listening at page {}/{}",
            self.current_page(),
            self.total_pages()
        );
    }

    // --- Outcomes ---

    fn finish(&self, request: PageRequest, outcome: Result<Fragment, FetchFailed>) {
        if self.inner.disposed.get() {
            debug!("Dropping page {} outcome of a disposed pager", request.page);
            self.inner.state.borrow_mut().end_load();
            self.inner.settled.notify_waiters();
            return;
        }

        match outcome {
            Ok(fragment) => self.load_succeeded(request, fragment),
            Err(failure) => self.load_failed(request, failure),
        }
        self.inner.settled.notify_waiters();
    }

    fn load_succeeded(&self, request: PageRequest, fragment: Fragment) {
        let inner = &self.inner;

        let page = inner.state.borrow_mut().advance();
        inner.container.set_attribute(CURRENT_PAGE_ATTR, &page.to_string());
        inner.config.hide_error();
        inner.config.hide_loading();

        let fragment = inner.config.hooks().transform(fragment);

        inner.state.borrow_mut().end_load();
        inner.container.set_class(LOADING_CLASS, false);
        inner.container.append(fragment);
        info!("Loaded page {}/{}", request.page, self.total_pages());

        inner.config.hooks().loaded();
    }

    fn load_failed(&self, request: PageRequest, failure: FetchFailed) {
        let inner = &self.inner;
        warn!("Failed to load page {}: {}", request.page, failure);

        inner.config.hide_loading();

        let payload = failure
            .into_payload()
            .map(|payload| inner.config.hooks().transform(payload));

        inner.state.borrow_mut().end_load();
        inner.container.set_class(LOADING_CLASS, false);
        if let Some(payload) = payload {
            inner.container.append(payload);
        }

        inner.config.show_error();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::{MemoryContainer, MemoryElement, MemoryWindow, ToggleIndicator, TOTAL_PAGES_ATTR};
    use crate::pager::testing::{ScriptedTransport, drain};
    use tokio::task::LocalSet;

    const URL: &str = "https://example.com/posts";

    struct Fixture {
        container: Rc<MemoryContainer>,
        window: Rc<MemoryWindow>,
        transport: ScriptedTransport,
        loading: Rc<ToggleIndicator>,
        error: Rc<ToggleIndicator>,
    }

    impl Fixture {
        /// Document 2000px tall in an 800px viewport, not scrolled.
        fn new(current: u32, total: u32) -> Self {
            Self {
                container: Rc::new(MemoryContainer::with_pages(current, total)),
                window: Rc::new(MemoryWindow::new(URL, 2000.0, 800.0)),
                transport: ScriptedTransport::new(),
                loading: Rc::new(ToggleIndicator::new()),
                error: Rc::new(ToggleIndicator::new()),
            }
        }

        fn options(&self) -> PagerOptions {
            PagerOptions::new()
                .with_loading_indicator(self.loading.clone())
                .with_error_indicator(self.error.clone())
        }

        fn attach(&self, options: PagerOptions) -> ScrollPager<ScriptedTransport> {
            ScrollPager::attach(
                self.container.clone(),
                self.window.clone(),
                self.transport.clone(),
                options,
            )
            .unwrap()
        }
    }

    #[tokio::test]
    async fn test_scrolled_near_bottom_loads_next_page() {
        LocalSet::new()
            .run_until(async {
                let fx = Fixture::new(1, 3);
                fx.window.scroll_to(1100.0); // 100px from the bottom
                fx.transport.respond_ok("<li>Item 6</li>");

                let pager = fx.attach(fx.options());
                assert!(pager.is_loading());
                assert!(fx.loading.is_visible());
                assert!(fx.container.has_class(LOADING_CLASS));

                pager.settled().await;

                assert_eq!(fx.transport.requests(), vec![(URL.to_string(), 2)]);
                assert_eq!(pager.current_page(), 2);
                assert_eq!(fx.container.attribute(CURRENT_PAGE_ATTR).as_deref(), Some("2"));
                assert_eq!(fx.container.attribute(TOTAL_PAGES_ATTR).as_deref(), Some("3"));
                assert_eq!(fx.container.inner_html(), "<li>Item 6</li>");
                assert!(!fx.container.has_class(LOADING_CLASS));
                assert!(!fx.loading.is_visible());
                assert!(!fx.error.is_visible());
                assert!(pager.is_bound());
            })
            .await;
    }

    #[tokio::test]
    async fn test_waits_until_scrolled_within_distance() {
        LocalSet::new()
            .run_until(async {
                let fx = Fixture::new(1, 3);
                let pager = fx.attach(fx.options());
                drain().await;

                // 1200px from the bottom
                assert!(fx.transport.requests().is_empty());
                assert!(!pager.is_loading());

                fx.window.scroll_to(931.0); // 269px left
                fx.transport.respond_ok("<li>more</li>");
                fx.window.dispatch(ScrollEvent::Scroll);
                pager.settled().await;

                assert_eq!(fx.transport.requests(), vec![(URL.to_string(), 2)]);
                assert_eq!(pager.current_page(), 2);
            })
            .await;
    }

    #[tokio::test]
    async fn test_resize_also_triggers_evaluation() {
        LocalSet::new()
            .run_until(async {
                let fx = Fixture::new(1, 3);
                let pager = fx.attach(fx.options());

                fx.window.resize(1800.0);
                fx.transport.respond_ok("<li>more</li>");
                fx.window.dispatch(ScrollEvent::Resize);
                pager.settled().await;

                assert_eq!(fx.transport.requests().len(), 1);
            })
            .await;
    }

    #[tokio::test]
    async fn test_no_second_fetch_while_loading() {
        LocalSet::new()
            .run_until(async {
                let fx = Fixture::new(1, 3);
                fx.window.scroll_to_bottom();
                let reply = fx.transport.respond_later();

                let pager = fx.attach(fx.options());
                for _ in 0..5 {
                    fx.window.dispatch(ScrollEvent::Scroll);
                    fx.window.dispatch(ScrollEvent::Resize);
                }
                pager.load();
                pager.retry();
                drain().await;

                assert_eq!(fx.transport.requests().len(), 1);
                assert!(pager.is_loading());
                assert_eq!(fx.loading.show_count(), 1);

                reply.send(Ok(Fragment::new("<li>slow</li>"))).unwrap();
                pager.settled().await;

                assert!(!pager.is_loading());
                assert_eq!(pager.current_page(), 2);
                assert_eq!(fx.container.child_count(), 1);
            })
            .await;
    }

    #[tokio::test]
    async fn test_last_page_never_fetches_and_detaches_on_first_evaluation() {
        LocalSet::new()
            .run_until(async {
                let fx = Fixture::new(3, 3);
                fx.window.scroll_to_bottom();

                let pager = fx.attach(fx.options());
                assert!(!pager.is_bound());
                assert_eq!(fx.window.listener_count(), 0);

                fx.window.dispatch(ScrollEvent::Scroll);
                pager.load();
                pager.dispose();
                drain().await;

                assert!(fx.transport.requests().is_empty());
                assert_eq!(fx.loading.show_count(), 0);
                assert!(pager.is_done());
            })
            .await;
    }

    #[tokio::test]
    async fn test_reaching_last_page_detaches_listener() {
        LocalSet::new()
            .run_until(async {
                let fx = Fixture::new(2, 3);
                fx.window.scroll_to_bottom();
                fx.transport.respond_ok("<li>last</li>");

                let pager = fx.attach(fx.options());
                pager.settled().await;
                assert_eq!(pager.current_page(), 3);
                assert!(pager.is_bound());
                assert_eq!(fx.window.listener_count(), 1);

                // the next evaluation notices the terminal state
                fx.window.dispatch(ScrollEvent::Scroll);
                assert!(!pager.is_bound());
                assert_eq!(fx.window.listener_count(), 0);

                fx.window.dispatch(ScrollEvent::Scroll);
                pager.evaluate();
                drain().await;
                assert_eq!(fx.transport.requests().len(), 1);
            })
            .await;
    }

    #[tokio::test]
    async fn test_error_keeps_page_and_next_scroll_retries_same_page() {
        LocalSet::new()
            .run_until(async {
                let fx = Fixture::new(1, 3);
                fx.window.scroll_to_bottom();
                fx.transport.respond_status(500, Some("<p class=\"oops\">try later</p>"));

                let pager = fx.attach(fx.options());
                pager.settled().await;

                assert_eq!(pager.current_page(), 1);
                assert_eq!(fx.container.attribute(CURRENT_PAGE_ATTR).as_deref(), Some("1"));
                assert!(!fx.loading.is_visible());
                assert!(fx.error.is_visible());
                assert!(!fx.container.has_class(LOADING_CLASS));
                assert_eq!(fx.container.inner_html(), "<p class=\"oops\">try later</p>");

                fx.transport.respond_ok("<li>Item 6</li>");
                fx.window.dispatch(ScrollEvent::Scroll);
                pager.settled().await;

                let pages: Vec<u32> = fx.transport.requests().into_iter().map(|(_, page)| page).collect();
                assert_eq!(pages, vec![2, 2]);
                assert_eq!(pager.current_page(), 2);
                assert!(!fx.error.is_visible());
            })
            .await;
    }

    #[tokio::test]
    async fn test_repeated_failures_show_error_each_time() {
        LocalSet::new()
            .run_until(async {
                let fx = Fixture::new(1, 3);
                let pager = fx.attach(fx.options());

                for _ in 0..3 {
                    fx.transport.respond_network_error();
                    pager.retry();
                    pager.settled().await;
                }

                assert_eq!(fx.error.show_count(), 3);
                assert_eq!(pager.current_page(), 1);
                assert_eq!(fx.container.child_count(), 0);
                assert!(pager.is_bound());
            })
            .await;
    }

    #[tokio::test]
    async fn test_new_content_hook_runs_on_success_and_error() {
        LocalSet::new()
            .run_until(async {
                let fx = Fixture::new(1, 3);
                let options = fx
                    .options()
                    .on_new_content(|fragment| fragment.wrap("div", "marker"));
                let pager = fx.attach(options);

                fx.transport.respond_status(503, Some("<p>busy</p>"));
                pager.load();
                pager.settled().await;

                fx.transport.respond_ok("<li>Item</li>");
                pager.load();
                pager.settled().await;

                let children = fx.container.children();
                assert_eq!(children.len(), 2);
                assert_eq!(children[0].as_html(), r#"<div class="marker"><p>busy</p></div>"#);
                assert_eq!(children[1].as_html(), r#"<div class="marker"><li>Item</li></div>"#);
            })
            .await;
    }

    #[tokio::test]
    async fn test_after_load_fires_only_on_success() {
        LocalSet::new()
            .run_until(async {
                let fx = Fixture::new(1, 4);
                let calls = Rc::new(Cell::new(0));
                let counter = calls.clone();
                let pager = fx.attach(fx.options().after_load(move || counter.set(counter.get() + 1)));

                fx.transport.respond_network_error();
                pager.load();
                pager.settled().await;
                assert_eq!(calls.get(), 0);

                fx.transport.respond_ok("<li>a</li>");
                pager.load();
                pager.settled().await;
                assert_eq!(calls.get(), 1);
            })
            .await;
    }

    #[tokio::test]
    async fn test_element_area_ignores_viewport() {
        LocalSet::new()
            .run_until(async {
                let fx = Fixture::new(1, 2);
                fx.window.scroll_to_bottom();
                let element = Rc::new(MemoryElement::new(3000.0, 500.0));

                let pager = fx.attach(fx.options().with_area(element.clone()));
                drain().await;
                assert!(fx.transport.requests().is_empty());
                assert_eq!(fx.window.listener_count(), 0);
                assert_eq!(element.listener_count(), 1);

                element.scroll_to(2400.0); // 100px from the bottom
                fx.transport.respond_ok("<li>x</li>");
                element.dispatch(ScrollEvent::Scroll);
                pager.settled().await;

                assert_eq!(pager.current_page(), 2);
                element.dispatch(ScrollEvent::Scroll);
                assert_eq!(element.listener_count(), 0);
            })
            .await;
    }

    #[tokio::test]
    async fn test_custom_url_and_distance() {
        LocalSet::new()
            .run_until(async {
                let fx = Fixture::new(4, 9);
                fx.window.scroll_to(700.0); // 500px from the bottom
                fx.transport.respond_ok("<li>x</li>");

                let pager = fx.attach(fx.options().with_url("/feed?tag=rust").with_distance(600.0));
                pager.settled().await;

                assert_eq!(fx.transport.requests(), vec![("/feed?tag=rust".to_string(), 5)]);
                assert_eq!(pager.current_page(), 5);
            })
            .await;
    }

    #[tokio::test]
    async fn test_dispose_detaches_once() {
        LocalSet::new()
            .run_until(async {
                let fx = Fixture::new(1, 3);
                let pager = fx.attach(fx.options());
                assert_eq!(fx.window.listener_count(), 1);

                pager.dispose();
                pager.dispose();
                assert_eq!(fx.window.listener_count(), 0);

                fx.window.scroll_to_bottom();
                fx.window.dispatch(ScrollEvent::Scroll);
                drain().await;
                assert!(fx.transport.requests().is_empty());
            })
            .await;
    }

    #[tokio::test]
    async fn test_dispose_drops_in_flight_outcome() {
        LocalSet::new()
            .run_until(async {
                let fx = Fixture::new(1, 3);
                fx.window.scroll_to_bottom();
                let reply = fx.transport.respond_later();

                let pager = fx.attach(fx.options());
                drain().await;
                pager.dispose();

                reply.send(Ok(Fragment::new("<li>late</li>"))).unwrap();
                pager.settled().await;

                pager.load();
                assert!(!pager.is_loading());
                assert_eq!(fx.transport.requests().len(), 1);
                assert_eq!(pager.current_page(), 1);
                assert_eq!(fx.container.attribute(CURRENT_PAGE_ATTR).as_deref(), Some("1"));
                assert_eq!(fx.container.child_count(), 0);
            })
            .await;
    }

    #[test]
    fn test_invalid_container_is_rejected() {
        let fx = Fixture::new(1, 3);
        let bare = Rc::new(MemoryContainer::new());

        let result = ScrollPager::attach(bare, fx.window.clone(), fx.transport.clone(), fx.options());
        assert!(matches!(result, Err(PagerError::MissingPageAttribute(_))));
        assert_eq!(fx.window.listener_count(), 0);
    }
}
