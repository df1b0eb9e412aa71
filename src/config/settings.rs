/// Documented defaults every pager starts from.
///
/// The url and area defaults depend on the window the pager is attached
/// to (its location and its viewport), so only the distance lives here.
#[derive(Debug, Clone, PartialEq)]
pub struct PagerDefaults {
    pub distance: f64,
}

impl Default for PagerDefaults {
    fn default() -> Self {
        Self { distance: 270.0 }
    }
}

pub struct ClientSettings {
    pub user_agent: &'static str,
    pub timeout_secs: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            user_agent: "ContinuousPager/0.1",
            timeout_secs: 30,
        }
    }
}

pub struct AppConfig {
    pub pager: PagerDefaults,
    pub client: ClientSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self {
            pager: PagerDefaults::default(),
            client: ClientSettings::default(),
        }
    }
}
