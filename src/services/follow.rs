use anyhow::{Context, Result, bail};
use colored::Colorize;
use log::info;
use std::fs;
use std::path::Path;
use std::rc::Rc;

use crate::cli::FollowArgs;
use crate::config::{AppConfig, PagerOptions};
use crate::dom::{
    CURRENT_PAGE_ATTR, Container, IndicatorStyle, MemoryContainer, MemoryWindow, ScrollEvent,
    TOTAL_PAGES_ATTR, TerminalIndicator,
};
use crate::errors::options_context;
use crate::http::{HttpTransport, Transport};
use crate::pager::ScrollPager;

/// Pixels per terminal row in the simulated viewport.
const LINE_HEIGHT: f64 = 20.0;

/// Terminal session that reads a paginated URL by scrolling to the bottom
/// of an in-memory document until the last page has been appended.
pub struct FollowService {
    config: AppConfig,
    args: FollowArgs,
}

/// How a follow session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FollowSummary {
    pub pages_loaded: u32,
    pub failures: usize,
    pub last_page: u32,
}

impl FollowService {
    pub fn new(config: AppConfig, args: FollowArgs) -> Self {
        Self { config, args }
    }

    /// Must be awaited inside a [`tokio::task::LocalSet`].
    pub async fn run(&self) -> Result<FollowSummary> {
        let transport = HttpTransport::new(&self.config.client)?;
        self.follow(transport).await
    }

    pub(crate) async fn follow<T: Transport + 'static>(&self, transport: T) -> Result<FollowSummary> {
        info!("=== Following {} ===", self.args.url);

        let options = self.build_options()?;
        let window = Rc::new(MemoryWindow::new(
            self.args.url.clone(),
            0.0,
            f64::from(self.args.height) * LINE_HEIGHT,
        ));
        let container = Rc::new(MemoryContainer::new());
        container.set_attribute(CURRENT_PAGE_ATTR, &self.args.current.to_string());
        container.set_attribute(TOTAL_PAGES_ATTR, &self.args.total.to_string());

        let pager = ScrollPager::attach_with_defaults(
            container.clone(),
            window.clone(),
            transport,
            options,
            &self.config.pager,
        )
        .context("Failed to attach pager")?;

        let start_page = pager.current_page();
        let mut printed = 0;
        let mut failures = 0;
        let mut consecutive_failures = 0;

        loop {
            let page_before = pager.current_page();
            pager.settled().await;

            printed += Self::print_new_content(&container, &window, printed);

            if pager.current_page() == page_before && !pager.is_done() {
                failures += 1;
                consecutive_failures += 1;
                if consecutive_failures >= self.args.max_failures {
                    bail!(
                        "Giving up after {} consecutive failures at page {}",
                        consecutive_failures,
                        pager.current_page() + 1
                    );
                }
            } else {
                consecutive_failures = 0;
            }

            // keep reading: bring the bottom into view
            window.scroll_to_bottom();
            window.dispatch(ScrollEvent::Scroll);

            if !pager.is_bound() {
                break;
            }
        }

        let summary = FollowSummary {
            pages_loaded: pager.current_page() - start_page,
            failures,
            last_page: pager.current_page(),
        };
        info!(
            "=== Done: {} pages loaded, {} failures ===",
            summary.pages_loaded, summary.failures
        );
        Ok(summary)
    }

    fn build_options(&self) -> Result<PagerOptions> {
        let mut options = match &self.args.options {
            Some(path) => Self::read_options_file(path)?,
            None => PagerOptions::new(),
        };
        if let Some(distance) = self.args.distance {
            options = options.with_distance(distance);
        }

        Ok(options
            .with_loading_indicator(Rc::new(TerminalIndicator::new(
                "Loading...",
                IndicatorStyle::Progress,
            )))
            .with_error_indicator(Rc::new(TerminalIndicator::new(
                "There was an error loading the content.",
                IndicatorStyle::Failure,
            ))))
    }

    fn read_options_file(path: &Path) -> Result<PagerOptions> {
        let context = options_context(&path.display().to_string());
        let json = fs::read_to_string(path).with_context(|| context.clone())?;
        serde_json::from_str(&json).with_context(|| context)
    }

    /// Print fragments appended since `already_printed` and grow the document
    /// by their height. Returns how many fragments were printed.
    fn print_new_content(container: &MemoryContainer, window: &MemoryWindow, already_printed: usize) -> usize {
        let children = container.children();
        let fresh = &children[already_printed.min(children.len())..];

        for fragment in fresh {
            let lines = fragment.text_lines();
            for line in &lines {
                println!("{}", line);
            }
            println!("{}", "─".repeat(40).dimmed());
            window.grow_document((lines.len() + 1) as f64 * LINE_HEIGHT);
        }

        fresh.len()
    }
}
