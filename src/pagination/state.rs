use crate::dom::{CURRENT_PAGE_ATTR, Container, TOTAL_PAGES_ATTR};
use crate::errors::PagerError;

/// Pagination bookkeeping for one pager.
///
/// Holds no I/O: the driver asks it what to do and reports outcomes back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagerState {
    current_page: u32,
    total_pages: u32,
    is_loading: bool,
    is_bound: bool,
}

/// A fetch the driver should perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
}

/// What a scroll/resize evaluation decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Evaluation {
    /// A fetch is in flight; the event is ignored.
    Busy,
    /// The last page is loaded; listeners must be detached.
    Finished,
    /// The bottom is within reach; load the next page.
    Load,
    /// Not scrolled far enough yet.
    Wait,
}

impl PagerState {
    pub fn new(current_page: u32, total_pages: u32) -> Result<Self, PagerError> {
        if current_page < 1 || total_pages < 1 || current_page > total_pages {
            return Err(PagerError::InvalidPageRange {
                current: current_page,
                total: total_pages,
            });
        }

        Ok(Self {
            current_page,
            total_pages,
            is_loading: false,
            is_bound: false,
        })
    }

    /// Read `data-current-page` / `data-total-pages` from the container.
    pub fn from_container(container: &dyn Container) -> Result<Self, PagerError> {
        let current = read_page_attribute(container, CURRENT_PAGE_ATTR)?;
        let total = read_page_attribute(container, TOTAL_PAGES_ATTR)?;
        Self::new(current, total)
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn next_page(&self) -> u32 {
        self.current_page + 1
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn is_bound(&self) -> bool {
        self.is_bound
    }

    pub fn is_done(&self) -> bool {
        self.current_page >= self.total_pages
    }

    pub fn evaluate(&self, distance_to_bottom: f64, distance: f64) -> Evaluation {
        if self.is_loading {
            Evaluation::Busy
        } else if self.is_done() {
            Evaluation::Finished
        } else if distance_to_bottom <= distance {
            Evaluation::Load
        } else {
            Evaluation::Wait
        }
    }

    /// Enter LOADING. Returns `None` while a fetch is in flight or once the
    /// last page has been loaded.
    pub fn begin_load(&mut self) -> Option<PageRequest> {
        if self.is_loading || self.is_done() {
            return None;
        }
        self.is_loading = true;
        Some(PageRequest {
            page: self.next_page(),
        })
    }

    /// The requested page arrived. Returns the new current page.
    ///
    /// The loading flag stays set until [`end_load`](Self::end_load), so
    /// hooks running in between cannot start another fetch.
    pub fn advance(&mut self) -> u32 {
        self.current_page = self.next_page().min(self.total_pages);
        self.current_page
    }

    /// Leave LOADING, whatever the outcome. On failure the page is left
    /// alone so the same page is requested next time.
    pub fn end_load(&mut self) {
        self.is_loading = false;
    }

    pub fn mark_bound(&mut self) {
        self.is_bound = true;
    }

    /// Returns true only for the call that actually unbinds.
    pub fn mark_unbound(&mut self) -> bool {
        std::mem::replace(&mut self.is_bound, false)
    }
}

fn read_page_attribute(container: &dyn Container, name: &'static str) -> Result<u32, PagerError> {
    let value = container
        .attribute(name)
        .ok_or(PagerError::MissingPageAttribute(name))?;

    value
        .trim()
        .parse()
        .map_err(|_| PagerError::InvalidPageAttribute { name, value })
}
