//! In-memory model of a rendered commands page.
//!
//! The HTML is parsed once with `scraper`. Cards and filter controls are
//! copied out into plain structs that the engine can mutate, which stands in
//! for the live document a browser would give us.

use scraper::{ElementRef, Html, Selector as CssSelector};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::criteria::FilterConfig;
use crate::engine::{ControlSource, ItemSource};

/// Error type for page parsing
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    #[error("Invalid CSS selector '{selector}': {message}")]
    InvalidSelector { selector: String, message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlKind {
    Select,
    Input,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    pub visible: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Control {
    pub id: String,
    pub kind: ControlKind,
    pub value: String,
    pub disabled: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<SelectOption>,
}

impl Control {
    fn from_element(id: &str, element: ElementRef<'_>, option_selector: &CssSelector) -> Self {
        let el = element.value();
        let disabled = el.attr("disabled").is_some();

        if el.name() != "select" {
            return Self {
                id: id.to_string(),
                kind: ControlKind::Input,
                value: el.attr("value").unwrap_or_default().to_string(),
                disabled,
                options: Vec::new(),
            };
        }

        let mut selected = None;
        let options: Vec<SelectOption> = element
            .select(option_selector)
            .map(|option| {
                let label = collapse_whitespace(&option.text().collect::<String>());
                let value = option
                    .value()
                    .attr("value")
                    .map(str::to_string)
                    .unwrap_or_else(|| label.clone());
                if option.value().attr("selected").is_some() {
                    selected = Some(value.clone());
                }
                SelectOption {
                    value,
                    label,
                    kind: option.value().attr("data-kind").map(str::to_string),
                    visible: true,
                }
            })
            .collect();

        let value = selected
            .or_else(|| options.first().map(|o| o.value.clone()))
            .unwrap_or_default();

        Self {
            id: id.to_string(),
            kind: ControlKind::Select,
            value,
            disabled,
            options,
        }
    }

    /// Assign a value the way a browser does: a select only takes values it
    /// has an option for and falls back to no selection otherwise.
    fn assign(&mut self, value: &str) {
        self.value = match self.kind {
            ControlKind::Select if !self.options.iter().any(|o| o.value == value) => {
                String::new()
            }
            _ => value.to_string(),
        };
    }

    pub fn visible_options(&self) -> impl Iterator<Item = &SelectOption> {
        self.options.iter().filter(|o| o.visible)
    }
}

/// One item of the grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Card {
    pub label: String,
    /// `data-*` attributes keyed by their dataset name
    pub attributes: BTreeMap<String, String>,
    pub visible: bool,
}

#[derive(Debug, Clone, Default)]
pub struct Page {
    cards: Vec<Card>,
    controls: BTreeMap<String, Control>,
}

impl Page {
    /// Parse a page, collecting the items and the controls named in `config`.
    ///
    /// Controls that are missing from the page are left out; the engine then
    /// treats their criteria as inactive.
    pub fn parse(html: &str, config: &FilterConfig) -> Result<Self, PageError> {
        let document = Html::parse_document(html);

        let item_selector = selector(&config.item_selector)?;
        let cards = document
            .select(&item_selector)
            .map(|element| Card {
                label: card_label(element),
                attributes: dataset(element),
                visible: true,
            })
            .collect();

        let id_selector = selector("[id]")?;
        let option_selector = selector("option")?;
        let mut controls = BTreeMap::new();
        for criterion in &config.criteria {
            let found = document
                .select(&id_selector)
                .find(|el| el.value().id() == Some(criterion.control.as_str()));
            if let Some(element) = found {
                controls.insert(
                    criterion.control.clone(),
                    Control::from_element(&criterion.control, element, &option_selector),
                );
            }
        }

        Ok(Self { cards, controls })
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn visible_cards(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter().filter(|c| c.visible)
    }

    pub fn control(&self, id: &str) -> Option<&Control> {
        self.controls.get(id)
    }

    pub fn controls(&self) -> impl Iterator<Item = &Control> {
        self.controls.values()
    }
}

impl ItemSource for Page {
    fn item_count(&self) -> usize {
        self.cards.len()
    }

    fn attribute(&self, index: usize, name: &str) -> Option<&str> {
        self.cards
            .get(index)?
            .attributes
            .get(name)
            .map(String::as_str)
    }

    fn set_visible(&mut self, index: usize, visible: bool) {
        if let Some(card) = self.cards.get_mut(index) {
            card.visible = visible;
        }
    }
}

impl ControlSource for Page {
    fn value(&self, control: &str) -> Option<String> {
        self.controls.get(control).map(|c| c.value.clone())
    }

    fn set_value(&mut self, control: &str, value: &str) -> bool {
        let Some(control) = self.controls.get_mut(control) else {
            return false;
        };
        control.assign(value);
        true
    }

    fn set_disabled(&mut self, control: &str, disabled: bool) -> bool {
        let Some(control) = self.controls.get_mut(control) else {
            return false;
        };
        control.disabled = disabled;
        true
    }

    fn option_values(&self, control: &str) -> Vec<String> {
        self.controls
            .get(control)
            .map(|c| c.options.iter().map(|o| o.value.clone()).collect())
            .unwrap_or_default()
    }

    fn set_option_visible(&mut self, control: &str, index: usize, visible: bool) {
        if let Some(option) = self
            .controls
            .get_mut(control)
            .and_then(|c| c.options.get_mut(index))
        {
            option.visible = visible;
        }
    }

    fn selected_kind(&self, control: &str) -> Option<String> {
        let control = self.controls.get(control)?;
        control
            .options
            .iter()
            .find(|o| o.value == control.value)?
            .kind
            .clone()
    }
}

fn selector(input: &str) -> Result<CssSelector, PageError> {
    CssSelector::parse(input).map_err(|e| PageError::InvalidSelector {
        selector: input.to_string(),
        message: format!("{e:?}"),
    })
}

/// Convert a `data-*` attribute name to its dataset key (`data-since-version`
/// becomes `sinceVersion`).
pub fn dataset_key(attribute: &str) -> Option<String> {
    let rest = attribute.strip_prefix("data-")?;
    let mut key = String::with_capacity(rest.len());
    let mut upper_next = false;
    for c in rest.chars() {
        if c == '-' {
            if upper_next {
                key.push('-');
            }
            upper_next = true;
        } else if upper_next && c.is_ascii_lowercase() {
            key.push(c.to_ascii_uppercase());
            upper_next = false;
        } else {
            if upper_next {
                key.push('-');
                upper_next = false;
            }
            key.push(c);
        }
    }
    if upper_next {
        key.push('-');
    }
    Some(key)
}

fn dataset(element: ElementRef<'_>) -> BTreeMap<String, String> {
    element
        .value()
        .attrs()
        .filter_map(|(name, value)| Some((dataset_key(name)?, value.to_string())))
        .collect()
}

/// Prefer the card's heading, fall back to all of its text.
fn card_label(element: ElementRef<'_>) -> String {
    let heading = selector("h1, h2, h3, h4, h5, h6")
        .ok()
        .and_then(|s| element.select(&s).next());
    let text: String = match heading {
        Some(h) => h.text().collect(),
        None => element.text().collect(),
    };
    collapse_whitespace(&text)
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
