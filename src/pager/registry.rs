use log::debug;
use serde::Deserialize;
use std::collections::HashMap;
use std::rc::Rc;
use std::str::FromStr;

use super::scroll_pager::ScrollPager;
use crate::config::{PagerDefaults, PagerOptions};
use crate::dom::{Container, Window};
use crate::errors::PagerError;
use crate::http::Transport;

/// Commands accepted by an already attached pager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PagerCommand {
    Load,
    Retry,
}

impl FromStr for PagerCommand {
    type Err = PagerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "load" => Ok(PagerCommand::Load),
            "retry" => Ok(PagerCommand::Retry),
            other => Err(PagerError::UnknownCommand(other.to_string())),
        }
    }
}

/// What can be applied to a container: an options object attaches a new
/// pager, a command drives the existing one.
///
/// In JSON this is either an object (`{"url": "/more"}`) or one of the
/// strings `"load"` / `"retry"`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Trigger {
    Command(PagerCommand),
    Configure(PagerOptions),
}

impl From<PagerOptions> for Trigger {
    fn from(options: PagerOptions) -> Self {
        Trigger::Configure(options)
    }
}

impl From<PagerCommand> for Trigger {
    fn from(command: PagerCommand) -> Self {
        Trigger::Command(command)
    }
}

/// Owns the pagers of one window, keyed by container.
pub struct PagerRegistry<T: Transport + Clone + 'static> {
    window: Rc<dyn Window>,
    defaults: PagerDefaults,
    transport: T,
    containers: HashMap<String, Rc<dyn Container>>,
    pagers: HashMap<String, ScrollPager<T>>,
}

impl<T: Transport + Clone + 'static> PagerRegistry<T> {
    pub fn new(window: Rc<dyn Window>, transport: T, defaults: PagerDefaults) -> Self {
        Self {
            window,
            defaults,
            transport,
            containers: HashMap::new(),
            pagers: HashMap::new(),
        }
    }

    pub fn insert_container(&mut self, key: impl Into<String>, container: Rc<dyn Container>) {
        self.containers.insert(key.into(), container);
    }

    pub fn get(&self, key: &str) -> Option<&ScrollPager<T>> {
        self.pagers.get(key)
    }

    /// Configure or command the pager of container `key`.
    ///
    /// Configuring a container that already has a pager disposes the old one;
    /// a fetch it still has in flight completes without touching the container.
    pub fn apply(&mut self, key: &str, trigger: Trigger) -> Result<ScrollPager<T>, PagerError> {
        match trigger {
            Trigger::Configure(options) => self.configure(key, options),
            Trigger::Command(command) => self.command(key, command),
        }
    }

    /// Apply the same trigger to several containers, stopping at the first error.
    pub fn apply_all(&mut self, keys: &[&str], trigger: &Trigger) -> Result<(), PagerError> {
        for key in keys {
            self.apply(key, trigger.clone())?;
        }
        Ok(())
    }

    /// Dispose and forget the pager of container `key`.
    pub fn remove(&mut self, key: &str) -> Option<ScrollPager<T>> {
        let pager = self.pagers.remove(key)?;
        pager.dispose();
        Some(pager)
    }

    fn configure(&mut self, key: &str, options: PagerOptions) -> Result<ScrollPager<T>, PagerError> {
        let container = self
            .containers
            .get(key)
            .cloned()
            .ok_or_else(|| PagerError::UnknownContainer(key.to_string()))?;

        if let Some(previous) = self.pagers.remove(key) {
            debug!("Replacing pager of container `{}`", key);
            previous.dispose();
        }

        let pager = ScrollPager::attach_with_defaults(
            container,
            self.window.clone(),
            self.transport.clone(),
            options,
            &self.defaults,
        )?;
        self.pagers.insert(key.to_string(), pager.clone());
        Ok(pager)
    }

    fn command(&self, key: &str, command: PagerCommand) -> Result<ScrollPager<T>, PagerError> {
        let pager = self
            .pagers
            .get(key)
            .ok_or_else(|| PagerError::NotAttached(key.to_string()))?;

        match command {
            PagerCommand::Load => pager.load(),
            PagerCommand::Retry => pager.retry(),
        }
        Ok(pager.clone())
    }
}
