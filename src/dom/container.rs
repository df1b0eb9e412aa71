use std::cell::RefCell;
use std::collections::{BTreeSet, HashMap};

use super::fragment::Fragment;

pub const CURRENT_PAGE_ATTR: &str = "data-current-page";
pub const TOTAL_PAGES_ATTR: &str = "data-total-pages";
pub const LOADING_CLASS: &str = "continuous-loading";

/// The element new pages are appended to.
///
/// Its page attributes are the only state persisted outside the pager.
pub trait Container {
    fn attribute(&self, name: &str) -> Option<String>;
    fn set_attribute(&self, name: &str, value: &str);
    fn set_class(&self, class: &str, enabled: bool);
    fn append(&self, fragment: Fragment);
}

/// Container kept in memory: attributes, classes and appended fragments.
#[derive(Debug, Default)]
pub struct MemoryContainer {
    attributes: RefCell<HashMap<String, String>>,
    classes: RefCell<BTreeSet<String>>,
    children: RefCell<Vec<Fragment>>,
}

impl MemoryContainer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Container carrying the two page attributes.
    pub fn with_pages(current: u32, total: u32) -> Self {
        let container = Self::new();
        container.set_attribute(CURRENT_PAGE_ATTR, &current.to_string());
        container.set_attribute(TOTAL_PAGES_ATTR, &total.to_string());
        container
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.borrow().contains(class)
    }

    pub fn children(&self) -> Vec<Fragment> {
        self.children.borrow().clone()
    }

    pub fn child_count(&self) -> usize {
        self.children.borrow().len()
    }

    /// All appended fragments concatenated.
    pub fn inner_html(&self) -> String {
        self.children.borrow().iter().map(Fragment::as_html).collect()
    }
}

impl Container for MemoryContainer {
    fn attribute(&self, name: &str) -> Option<String> {
        self.attributes.borrow().get(name).cloned()
    }

    fn set_attribute(&self, name: &str, value: &str) {
        self.attributes
            .borrow_mut()
            .insert(name.to_string(), value.to_string());
    }

    fn set_class(&self, class: &str, enabled: bool) {
        let mut classes = self.classes.borrow_mut();
        if enabled {
            classes.insert(class.to_string());
        } else {
            classes.remove(class);
        }
    }

    fn append(&self, fragment: Fragment) {
        self.children.borrow_mut().push(fragment);
    }
}
