use serde::Deserialize;
use std::fmt;
use std::rc::Rc;

use super::settings::PagerDefaults;
use crate::dom::{Area, Fragment, Indicator, ScrollSurface, Window};
use crate::errors::PagerError;
use crate::pager::Hooks;

/// Caller overrides, merged over [`PagerDefaults`] when a pager is attached.
///
/// `url` and `distance` can come from JSON; the rest only from code.
#[derive(Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PagerOptions {
    pub url: Option<String>,
    pub distance: Option<f64>,
    #[serde(skip)]
    pub area: Option<Area>,
    #[serde(skip)]
    pub loading_indicator: Option<Rc<dyn Indicator>>,
    #[serde(skip)]
    pub error_indicator: Option<Rc<dyn Indicator>>,
    #[serde(skip)]
    pub hooks: Hooks,
}

impl PagerOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    pub fn with_distance(mut self, distance: f64) -> Self {
        self.distance = Some(distance);
        self
    }

    /// Observe a scrollable element instead of the viewport.
    pub fn with_area(mut self, element: Rc<dyn ScrollSurface>) -> Self {
        self.area = Some(Area::Element(element));
        self
    }

    pub fn with_loading_indicator(mut self, indicator: Rc<dyn Indicator>) -> Self {
        self.loading_indicator = Some(indicator);
        self
    }

    pub fn with_error_indicator(mut self, indicator: Rc<dyn Indicator>) -> Self {
        self.error_indicator = Some(indicator);
        self
    }

    pub fn on_new_content(mut self, hook: impl Fn(Fragment) -> Fragment + 'static) -> Self {
        self.hooks.new_content = Some(Rc::new(hook));
        self
    }

    pub fn after_load(mut self, hook: impl Fn() + 'static) -> Self {
        self.hooks.after_load = Some(Rc::new(hook));
        self
    }

    /// Fill every unset option from `defaults` and `window`.
    pub fn resolve(
        self,
        defaults: &PagerDefaults,
        window: &Rc<dyn Window>,
    ) -> Result<PagerConfig, PagerError> {
        let url = self.url.unwrap_or_else(|| window.location());
        if url.trim().is_empty() {
            return Err(PagerError::InvalidOption {
                name: "url",
                reason: "must not be empty".to_string(),
            });
        }

        let distance = self.distance.unwrap_or(defaults.distance);
        if !distance.is_finite() || distance < 0.0 {
            return Err(PagerError::InvalidOption {
                name: "distance",
                reason: format!("expected a non-negative number of pixels, got {distance}"),
            });
        }

        Ok(PagerConfig {
            area: self.area.unwrap_or_else(|| Area::Viewport(window.clone())),
            url,
            distance,
            loading_indicator: self.loading_indicator,
            error_indicator: self.error_indicator,
            hooks: self.hooks,
        })
    }
}

impl fmt::Debug for PagerOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PagerOptions")
            .field("url", &self.url)
            .field("distance", &self.distance)
            .field("area", &self.area)
            .field("loading_indicator", &self.loading_indicator.is_some())
            .field("error_indicator", &self.error_indicator.is_some())
            .finish_non_exhaustive()
    }
}

/// Fully resolved pager configuration. Immutable once built.
pub struct PagerConfig {
    area: Area,
    url: String,
    distance: f64,
    loading_indicator: Option<Rc<dyn Indicator>>,
    error_indicator: Option<Rc<dyn Indicator>>,
    hooks: Hooks,
}

impl PagerConfig {
    pub fn area(&self) -> &Area {
        &self.area
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn hooks(&self) -> &Hooks {
        &self.hooks
    }

    pub fn show_loading(&self) {
        if let Some(indicator) = &self.loading_indicator {
            indicator.show();
        }
    }

    pub fn hide_loading(&self) {
        if let Some(indicator) = &self.loading_indicator {
            indicator.hide();
        }
    }

    pub fn show_error(&self) {
        if let Some(indicator) = &self.error_indicator {
            indicator.show();
        }
    }

    pub fn hide_error(&self) {
        if let Some(indicator) = &self.error_indicator {
            indicator.hide();
        }
    }
}
