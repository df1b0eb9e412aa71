mod hooks;
mod registry;
mod scroll_pager;

#[cfg(test)]
pub(crate) mod testing;

pub use hooks::{AfterLoadHook, Hooks, NewContentHook};
pub use registry::{PagerCommand, PagerRegistry, Trigger};
pub use scroll_pager::ScrollPager;
