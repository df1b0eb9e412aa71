mod area;
mod container;
mod fragment;
mod indicator;
mod memory;

pub use area::{Area, Listener, ListenerId, ScrollEvent, ScrollExtent, ScrollSurface, Window};
pub use container::{
    Container, CURRENT_PAGE_ATTR, LOADING_CLASS, MemoryContainer, TOTAL_PAGES_ATTR,
};
pub use fragment::Fragment;
pub use indicator::{Indicator, IndicatorStyle, TerminalIndicator, ToggleIndicator};
pub use memory::{MemoryElement, MemoryWindow};
