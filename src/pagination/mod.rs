mod state;
mod urls;

pub use state::{Evaluation, PageRequest, PagerState};
pub use urls::build_paginated_url;
