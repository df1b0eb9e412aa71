pub mod options;
pub mod settings;

pub use options::{PagerConfig, PagerOptions};
pub use settings::{AppConfig, ClientSettings, PagerDefaults};
