//! Core library for gridfilter
//!
//! This crate implements the **Functional Core** of gridfilter: the card
//! filtering engine behind a documentation site's commands page, with no I/O
//! of its own. The `gridfilter` binary is the Imperative Shell that reads
//! pages from disk and prints results.
//!
//! # Module Organization
//!
//! - [`criteria`]: filter configuration and the three match modes
//! - [`version`]: the "at least" version comparison
//! - [`engine`]: the filter engine and the seams it talks through
//!   ([`engine::ItemSource`], [`engine::ControlSource`], [`engine::StateMirror`])
//! - [`location`]: query-string state mirror over a page URL
//! - [`page`]: HTML page model that plays the role of the live document
//!
//! # Example Usage
//!
//! ```rust,ignore
//! use gridfilter_core::{FilterConfig, FilterEngine, Page, UrlState};
//!
//! let config = FilterConfig::default();
//! let page = Page::parse(html, &config)?;
//! let state = UrlState::parse("https://example.com/commands/?group=json")?;
//!
//! let mut engine = FilterEngine::new(&config, page, state);
//! engine.initialize();
//! engine.set_criterion("name", "get");
//!
//! for card in engine.document().visible_cards() {
//!     println!("{}", card.label);
//! }
//! ```

pub mod criteria;
pub mod engine;
pub mod location;
pub mod page;
pub mod version;

pub use criteria::{ConfigError, CriterionConfig, CriterionHook, FilterConfig, MatchMode};
pub use engine::{ControlSource, FilterEngine, ItemSource, StateMirror};
pub use location::{LocationError, UrlState};
pub use page::{Card, Control, ControlKind, Page, PageError, SelectOption};
pub use version::version_greater_or_equal;
