use std::rc::Rc;

use crate::dom::Fragment;

pub type NewContentHook = Rc<dyn Fn(Fragment) -> Fragment>;
pub type AfterLoadHook = Rc<dyn Fn()>;

/// Optional callbacks around content insertion.
#[derive(Clone, Default)]
pub struct Hooks {
    /// Sees every payload before it is appended, on success and on error.
    pub new_content: Option<NewContentHook>,
    /// Runs after a successful append only.
    pub after_load: Option<AfterLoadHook>,
}

impl Hooks {
    pub fn transform(&self, fragment: Fragment) -> Fragment {
        match &self.new_content {
            Some(hook) => hook(fragment),
            None => fragment,
        }
    }

    pub fn loaded(&self) {
        if let Some(hook) = &self.after_load {
            hook();
        }
    }
}
