//! The filter engine.
//!
//! The engine never touches a document or a browser location directly. Items
//! and controls are reached through [`ItemSource`] and [`ControlSource`], and
//! the shareable filter state through [`StateMirror`], so the whole algorithm
//! runs against in-memory fixtures.

use log::{debug, trace};
use std::collections::BTreeMap;

use crate::criteria::{CriterionConfig, CriterionHook, FilterConfig};

/// The collection of displayed items, enumerated in a stable order.
pub trait ItemSource {
    fn item_count(&self) -> usize;

    /// Attribute of item `index` for the criterion `name`, if the item has one.
    fn attribute(&self, index: usize, name: &str) -> Option<&str>;

    fn set_visible(&mut self, index: usize, visible: bool);
}

/// The input controls that supply criterion values.
///
/// Every method is keyed by control id. Controls that do not exist return
/// `None`/`false`/empty and writes to them are ignored.
pub trait ControlSource {
    fn value(&self, control: &str) -> Option<String>;

    /// Returns false when the control does not exist.
    fn set_value(&mut self, control: &str, value: &str) -> bool;

    /// Returns false when the control does not exist.
    fn set_disabled(&mut self, control: &str, disabled: bool) -> bool;

    /// Raw values of the control's selectable options, in document order.
    fn option_values(&self, control: &str) -> Vec<String>;

    fn set_option_visible(&mut self, control: &str, index: usize, visible: bool);

    /// Metadata kind of the currently selected option (`data-kind`).
    fn selected_kind(&self, control: &str) -> Option<String>;
}

/// Key-value view of the page's addressable location.
pub trait StateMirror {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
    fn delete(&mut self, key: &str);

    /// Persist the current state in place of the current history entry.
    fn replace(&mut self);

    /// Remove and return an old-style single value fragment, if present.
    fn take_fragment(&mut self) -> Option<String> {
        None
    }
}

impl StateMirror for BTreeMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        BTreeMap::get(self, key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.insert(key.to_string(), value.to_string());
    }

    fn delete(&mut self, key: &str) {
        self.remove(key);
    }

    fn replace(&mut self) {}
}

/// Whether a hook runs while restoring state or in response to a change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HookPhase {
    Restore,
    Change,
}

#[derive(Debug)]
pub struct FilterEngine<'c, D, S> {
    config: &'c FilterConfig,
    document: D,
    state: S,
    hidden: Vec<usize>,
}

impl<'c, D, S> FilterEngine<'c, D, S>
where
    D: ItemSource + ControlSource,
    S: StateMirror,
{
    pub fn new(config: &'c FilterConfig, document: D, state: S) -> Self {
        Self {
            config,
            document,
            state,
            hidden: Vec::new(),
        }
    }

    pub fn config(&self) -> &FilterConfig {
        self.config
    }

    pub fn document(&self) -> &D {
        &self.document
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    pub fn into_parts(self) -> (D, S) {
        (self.document, self.state)
    }

    /// Indices of the items hidden by the last filter pass, in enumeration order.
    pub fn hidden(&self) -> &[usize] {
        &self.hidden
    }

    pub fn visible_count(&self) -> usize {
        self.document.item_count() - self.hidden.len()
    }

    /// Current value of a criterion, `None` when its control is missing.
    pub fn criterion_value(&self, name: &str) -> Option<String> {
        let criterion = self.config.criterion(name)?;
        self.document.value(&criterion.control)
    }

    /// Restore controls from the addressable state and run the first pass.
    pub fn initialize(&mut self) {
        let config = self.config;
        if let Some(param) = &config.legacy_fragment_param {
            if let Some(fragment) = self.state.take_fragment() {
                debug!("Migrating legacy fragment '{fragment}' to '{param}' parameter");
                self.state.set(param, &fragment);
                self.state.replace();
            }
        }

        for criterion in &config.criteria {
            if let Some(value) = self.state.get(&criterion.name) {
                if !self.document.set_value(&criterion.control, &value) {
                    debug!(
                        "Control '{}' not found, cannot restore '{}'",
                        criterion.control, criterion.name
                    );
                }
            }
            self.run_hook(criterion, HookPhase::Restore);
        }

        self.filter_pass();
    }

    /// Set a criterion's control value and react as if the user changed it.
    pub fn set_criterion(&mut self, name: &str, value: &str) {
        let config = self.config;
        let Some(criterion) = config.criterion(name) else {
            debug!("Unknown criterion '{name}'");
            return;
        };

        if self.document.set_value(&criterion.control, value) {
            self.on_criterion_change(name);
        } else {
            debug!("Control '{}' not found, ignoring change", criterion.control);
        }
    }

    /// React to a changed control value.
    ///
    /// Runs the criterion's hook, mirrors the new value (and any value the
    /// hook cleared) into the addressable state, then re-filters.
    pub fn on_criterion_change(&mut self, name: &str) {
        let config = self.config;
        let Some(criterion) = config.criterion(name) else {
            debug!("Unknown criterion '{name}'");
            return;
        };

        let mut changed = vec![criterion];
        if let Some(cleared) = self.run_hook(criterion, HookPhase::Change) {
            changed.push(cleared);
        }

        for criterion in changed {
            self.sync_state(criterion);
        }
        self.state.replace();

        self.filter_pass();
    }

    /// Recompute visibility of every item from scratch.
    pub fn filter_pass(&mut self) {
        while let Some(index) = self.hidden.pop() {
            self.document.set_visible(index, true);
        }

        let config = self.config;
        let active: Vec<(&CriterionConfig, String)> = config
            .criteria
            .iter()
            .filter_map(|criterion| {
                let value = self.document.value(&criterion.control)?;
                (!value.is_empty()).then_some((criterion, value))
            })
            .collect();

        for index in 0..self.document.item_count() {
            for (criterion, value) in &active {
                let passes = self
                    .document
                    .attribute(index, &criterion.name)
                    .is_some_and(|attribute| criterion.matches(value, attribute));

                if !passes {
                    trace!("Item {index} hidden by '{}'", criterion.name);
                    self.document.set_visible(index, false);
                    self.hidden.push(index);
                    break;
                }
            }
        }

        debug!(
            "Filter pass: {} active criteria, {} of {} items hidden",
            active.len(),
            self.hidden.len(),
            self.document.item_count()
        );
    }

    fn sync_state(&mut self, criterion: &CriterionConfig) {
        let Some(value) = self.document.value(&criterion.control) else {
            debug!(
                "Control '{}' not found, leaving '{}' parameter untouched",
                criterion.control, criterion.name
            );
            return;
        };

        if value.is_empty() {
            self.state.delete(&criterion.name);
        } else {
            self.state.set(&criterion.name, &value);
        }
    }

    /// Run the criterion's hook. Returns the criterion whose value it cleared.
    fn run_hook(
        &mut self,
        criterion: &CriterionConfig,
        phase: HookPhase,
    ) -> Option<&'c CriterionConfig> {
        let config = self.config;
        let hook = criterion.hook.as_ref()?;
        let target = config.criterion(hook.target())?;

        match hook {
            CriterionHook::ScopeVersions {
                core_kind,
                separator,
                ..
            } => {
                let value = self.document.value(&criterion.control).unwrap_or_default();
                let disabled = value.is_empty();
                self.document.set_disabled(&target.control, disabled);

                let cleared = if phase == HookPhase::Change
                    && self.document.set_value(&target.control, "")
                {
                    Some(target)
                } else {
                    None
                };

                if disabled {
                    return cleared;
                }

                let is_core = self
                    .document
                    .selected_kind(&criterion.control)
                    .is_some_and(|kind| kind == *core_kind);

                let options = self.document.option_values(&target.control);
                for (index, option) in options.iter().enumerate() {
                    let visible = if option.contains(*separator) {
                        option.starts_with(&value)
                    } else {
                        is_core
                    };
                    self.document
                        .set_option_visible(&target.control, index, visible);
                }

                cleared
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashMap;

    #[derive(Debug, Clone, Default)]
    struct MockControl {
        value: String,
        disabled: bool,
        options: Vec<(String, Option<String>, bool)>,
    }

    #[derive(Debug, Clone, Default)]
    struct MockDocument {
        items: Vec<(HashMap<String, String>, bool)>,
        controls: HashMap<String, MockControl>,
    }

    impl MockDocument {
        fn commands() -> Self {
            let mut doc = MockDocument::default();
            for (group, version, name) in [
                ("core", "6.2.0", "GETDEL"),
                ("core", "7.0.0", "FUNCTION LOAD"),
                ("core", "1.0.0", "GET"),
                ("json", "json-2.0.0", "JSON.MERGE"),
                ("json", "json-1.0.0", "JSON.GET"),
                ("search", "search-2.8.0", "FT.SEARCH"),
            ] {
                doc.push_item(&[("group", group), ("version", version), ("name", name)]);
            }

            let group = MockControl {
                options: vec![
                    (String::new(), None, true),
                    ("core".into(), Some("core".into()), true),
                    ("json".into(), None, true),
                    ("search".into(), None, true),
                ],
                ..Default::default()
            };
            doc.controls.insert("group-filter".into(), group);

            let version = MockControl {
                options: ["", "6.2.0", "7.0.0", "json-2.0.0", "search-2.8.0"]
                    .into_iter()
                    .map(|v| (v.to_string(), None, true))
                    .collect(),
                ..Default::default()
            };
            doc.controls.insert("version-filter".into(), version);

            doc.controls
                .insert("name-filter".into(), MockControl::default());
            doc
        }

        fn push_item(&mut self, attributes: &[(&str, &str)]) {
            let attributes = attributes
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect();
            self.items.push((attributes, true));
        }

        fn visible_names(&self) -> Vec<&str> {
            self.items
                .iter()
                .filter(|(_, visible)| *visible)
                .map(|(attrs, _)| attrs["name"].as_str())
                .collect()
        }

        fn option_visibility(&self, control: &str) -> Vec<(&str, bool)> {
            self.controls[control]
                .options
                .iter()
                .map(|(value, _, visible)| (value.as_str(), *visible))
                .collect()
        }
    }

    impl ItemSource for MockDocument {
        fn item_count(&self) -> usize {
            self.items.len()
        }

        fn attribute(&self, index: usize, name: &str) -> Option<&str> {
            self.items.get(index)?.0.get(name).map(String::as_str)
        }

        fn set_visible(&mut self, index: usize, visible: bool) {
            if let Some(item) = self.items.get_mut(index) {
                item.1 = visible;
            }
        }
    }

    impl ControlSource for MockDocument {
        fn value(&self, control: &str) -> Option<String> {
            self.controls.get(control).map(|c| c.value.clone())
        }

        fn set_value(&mut self, control: &str, value: &str) -> bool {
            self.controls
                .get_mut(control)
                .map(|c| c.value = value.to_string())
                .is_some()
        }

        fn set_disabled(&mut self, control: &str, disabled: bool) -> bool {
            self.controls
                .get_mut(control)
                .map(|c| c.disabled = disabled)
                .is_some()
        }

        fn option_values(&self, control: &str) -> Vec<String> {
            self.controls
                .get(control)
                .map(|c| c.options.iter().map(|(v, _, _)| v.clone()).collect())
                .unwrap_or_default()
        }

        fn set_option_visible(&mut self, control: &str, index: usize, visible: bool) {
            if let Some(option) = self
                .controls
                .get_mut(control)
                .and_then(|c| c.options.get_mut(index))
            {
                option.2 = visible;
            }
        }

        fn selected_kind(&self, control: &str) -> Option<String> {
            let control = self.controls.get(control)?;
            control
                .options
                .iter()
                .find(|(value, _, _)| *value == control.value)
                .and_then(|(_, kind, _)| kind.clone())
        }
    }

    type State = BTreeMap<String, String>;

    fn state(pairs: &[(&str, &str)]) -> State {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_initialize_without_state_shows_everything() {
        let config = FilterConfig::default();
        let mut engine = FilterEngine::new(&config, MockDocument::commands(), State::new());
        engine.initialize();

        assert!(engine.hidden().is_empty());
        assert_eq!(engine.visible_count(), 6);
        // No group selected, so the version control is disabled.
        assert!(engine.document().controls["version-filter"].disabled);
    }

    #[test]
    fn test_initialize_restores_controls_before_filtering() {
        let config = FilterConfig::default();
        let mut engine = FilterEngine::new(
            &config,
            MockDocument::commands(),
            state(&[("group", "json"), ("version", "2.0.0")]),
        );
        engine.initialize();

        assert_eq!(engine.criterion_value("group").as_deref(), Some("json"));
        assert_eq!(engine.criterion_value("version").as_deref(), Some("2.0.0"));
        assert!(!engine.document().controls["version-filter"].disabled);
        assert_eq!(engine.document().visible_names(), vec!["JSON.MERGE"]);
    }

    #[test]
    fn test_initialize_ignores_unknown_parameters() {
        let config = FilterConfig::default();
        let mut engine = FilterEngine::new(
            &config,
            MockDocument::commands(),
            state(&[("tab", "python"), ("name", "get")]),
        );
        engine.initialize();

        assert_eq!(
            engine.document().visible_names(),
            vec!["GETDEL", "GET", "JSON.GET"]
        );
    }

    #[test]
    fn test_substring_criterion_ignores_case() {
        let config = FilterConfig::default();
        let mut engine = FilterEngine::new(&config, MockDocument::commands(), State::new());
        engine.initialize();

        engine.set_criterion("name", "Search");
        assert_eq!(engine.document().visible_names(), vec!["FT.SEARCH"]);
        assert_eq!(engine.state().get("name").map(String::as_str), Some("Search"));
    }

    #[test]
    fn test_emptying_criterion_deletes_parameter() {
        let config = FilterConfig::default();
        let mut engine = FilterEngine::new(&config, MockDocument::commands(), State::new());
        engine.initialize();

        engine.set_criterion("name", "json");
        assert!(engine.state().contains_key("name"));

        engine.set_criterion("name", "");
        assert!(!engine.state().contains_key("name"));
        assert_eq!(engine.visible_count(), 6);
    }

    #[test]
    fn test_group_change_clears_version_value_and_parameter() {
        let config = FilterConfig::default();
        let mut engine = FilterEngine::new(
            &config,
            MockDocument::commands(),
            state(&[("group", "json"), ("version", "2.0.0")]),
        );
        engine.initialize();

        engine.set_criterion("group", "core");

        assert_eq!(engine.criterion_value("version").as_deref(), Some(""));
        assert!(!engine.state().contains_key("version"));
        assert_eq!(engine.state().get("group").map(String::as_str), Some("core"));
        assert_eq!(
            engine.document().visible_names(),
            vec!["GETDEL", "FUNCTION LOAD", "GET"]
        );
    }

    #[test]
    fn test_core_group_shows_unscoped_versions() {
        let config = FilterConfig::default();
        let mut engine = FilterEngine::new(&config, MockDocument::commands(), State::new());
        engine.initialize();

        engine.set_criterion("group", "core");
        assert_eq!(
            engine.document().option_visibility("version-filter"),
            vec![
                ("", true),
                ("6.2.0", true),
                ("7.0.0", true),
                ("json-2.0.0", false),
                ("search-2.8.0", false),
            ]
        );
    }

    #[test]
    fn test_module_group_shows_only_its_scoped_versions() {
        let config = FilterConfig::default();
        let mut engine = FilterEngine::new(&config, MockDocument::commands(), State::new());
        engine.initialize();

        engine.set_criterion("group", "json");
        assert!(!engine.document().controls["version-filter"].disabled);
        assert_eq!(
            engine.document().option_visibility("version-filter"),
            vec![
                ("", false),
                ("6.2.0", false),
                ("7.0.0", false),
                ("json-2.0.0", true),
                ("search-2.8.0", false),
            ]
        );
    }

    #[test]
    fn test_clearing_group_disables_version() {
        let config = FilterConfig::default();
        let mut engine = FilterEngine::new(
            &config,
            MockDocument::commands(),
            state(&[("group", "core"), ("version", "7.0.0")]),
        );
        engine.initialize();
        assert_eq!(engine.document().visible_names(), vec!["FUNCTION LOAD"]);

        engine.set_criterion("group", "");

        assert!(engine.document().controls["version-filter"].disabled);
        assert!(engine.state().is_empty());
        assert_eq!(engine.visible_count(), 6);

        let json_scoped = vec![
            ("", false),
            ("6.2.0", false),
            ("7.0.0", false),
            ("json-2.0.0", true),
            ("search-2.8.0", false),
        ];
        engine.set_criterion("group", "json");
        assert_eq!(
            engine.document().option_visibility("version-filter"),
            json_scoped
        );

        engine.set_criterion("group", "");
        assert!(engine.document().controls["version-filter"].disabled);
        assert_eq!(
            engine.document().option_visibility("version-filter"),
            json_scoped
        );
    }

    #[test]
    fn test_version_criterion_is_at_least() {
        let config = FilterConfig::default();
        let mut engine = FilterEngine::new(
            &config,
            MockDocument::commands(),
            state(&[("group", "core")]),
        );
        engine.initialize();

        engine.set_criterion("version", "6.2.0");
        assert_eq!(
            engine.document().visible_names(),
            vec!["GETDEL", "FUNCTION LOAD"]
        );
    }

    #[test]
    fn test_missing_control_is_inactive() {
        let config = FilterConfig::default();
        let mut doc = MockDocument::commands();
        doc.controls.remove("name-filter");
        let mut engine = FilterEngine::new(&config, doc, state(&[("name", "json")]));
        engine.initialize();

        assert_eq!(engine.visible_count(), 6);
        assert_eq!(engine.criterion_value("name"), None);

        engine.set_criterion("name", "get");
        assert_eq!(engine.visible_count(), 6);
        // Parameter stays as it was; nothing could be read from the page.
        assert_eq!(engine.state().get("name").map(String::as_str), Some("json"));
    }

    #[test]
    fn test_item_without_attribute_fails_active_criterion() {
        let config = FilterConfig::default();
        let mut doc = MockDocument::commands();
        doc.push_item(&[("group", "core"), ("name", "NOVERSION")]);
        let mut engine = FilterEngine::new(&config, doc, state(&[("group", "core")]));
        engine.initialize();
        assert!(engine.document().visible_names().contains(&"NOVERSION"));

        engine.set_criterion("version", "1.0.0");
        assert!(!engine.document().visible_names().contains(&"NOVERSION"));
    }

    #[test]
    fn test_first_failing_criterion_hides_once() {
        let config = FilterConfig::default();
        let mut engine = FilterEngine::new(
            &config,
            MockDocument::commands(),
            state(&[("group", "json"), ("name", "nothing-matches")]),
        );
        engine.initialize();

        // Every item fails; each index is recorded exactly once.
        assert_eq!(engine.hidden(), &[0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_round_trip_through_state() {
        let config = FilterConfig::default();
        let mut engine = FilterEngine::new(&config, MockDocument::commands(), State::new());
        engine.initialize();
        engine.set_criterion("group", "json");
        engine.set_criterion("name", "get");
        let expected = engine.hidden().to_vec();
        let (_, saved) = engine.into_parts();

        let mut reloaded = FilterEngine::new(&config, MockDocument::commands(), saved);
        reloaded.initialize();

        assert_eq!(reloaded.hidden(), expected.as_slice());
        assert_eq!(reloaded.criterion_value("group").as_deref(), Some("json"));
        assert_eq!(reloaded.criterion_value("name").as_deref(), Some("get"));
    }

    #[test]
    fn test_unknown_criterion_change_is_ignored() {
        let config = FilterConfig::default();
        let mut engine = FilterEngine::new(&config, MockDocument::commands(), State::new());
        engine.initialize();

        engine.set_criterion("tab", "python");
        engine.on_criterion_change("tab");
        assert!(engine.state().is_empty());
        assert_eq!(engine.visible_count(), 6);
    }

    #[derive(Default)]
    struct FragmentState {
        params: State,
        fragment: Option<String>,
        replacements: usize,
    }

    impl StateMirror for FragmentState {
        fn get(&self, key: &str) -> Option<String> {
            StateMirror::get(&self.params, key)
        }
        fn set(&mut self, key: &str, value: &str) {
            StateMirror::set(&mut self.params, key, value)
        }
        fn delete(&mut self, key: &str) {
            StateMirror::delete(&mut self.params, key)
        }
        fn replace(&mut self) {
            self.replacements += 1;
        }
        fn take_fragment(&mut self) -> Option<String> {
            self.fragment.take()
        }
    }

    #[test]
    fn test_legacy_fragment_becomes_group() {
        let config = FilterConfig::default();
        let state = FragmentState {
            fragment: Some("json".into()),
            ..Default::default()
        };
        let mut engine = FilterEngine::new(&config, MockDocument::commands(), state);
        engine.initialize();

        assert_eq!(engine.state().params.get("group").map(String::as_str), Some("json"));
        assert_eq!(engine.state().fragment, None);
        assert_eq!(engine.state().replacements, 1);
        assert_eq!(
            engine.document().visible_names(),
            vec!["JSON.MERGE", "JSON.GET"]
        );
    }

    #[test]
    fn test_each_change_replaces_once() {
        let config = FilterConfig::default();
        let mut engine =
            FilterEngine::new(&config, MockDocument::commands(), FragmentState::default());
        engine.initialize();
        assert_eq!(engine.state().replacements, 0);

        engine.set_criterion("group", "core");
        engine.set_criterion("name", "get");
        assert_eq!(engine.state().replacements, 2);
    }

    // ============================================================================
    // Property tests
    // ============================================================================

    fn arb_document() -> impl Strategy<Value = MockDocument> {
        let item = (
            prop::sample::select(vec!["core", "json", "search"]),
            "[a-z]{0,6}-?[0-9]\\.[0-9]\\.[0-9]",
            "[A-Za-z.]{1,8}",
        );
        prop::collection::vec(item, 0..12).prop_map(|items| {
            let mut doc = MockDocument::commands();
            doc.items.clear();
            for (group, version, name) in items {
                doc.push_item(&[
                    ("group", group),
                    ("version", version.as_str()),
                    ("name", name.as_str()),
                ]);
            }
            doc
        })
    }

    fn arb_values() -> impl Strategy<Value = (String, String, String)> {
        (
            prop::sample::select(vec!["", "core", "json", "search"]),
            prop::sample::select(vec!["", "1.0.0", "2.5", "7.0.0"]),
            "[a-zA-Z.]{0,2}",
        )
            .prop_map(|(g, v, n)| (g.to_string(), v.to_string(), n))
    }

    fn set_values(doc: &mut MockDocument, (group, version, name): &(String, String, String)) {
        doc.set_value("group-filter", group);
        doc.set_value("version-filter", version);
        doc.set_value("name-filter", name);
    }

    proptest! {
        #[test]
        fn prop_empty_criteria_hide_nothing(doc in arb_document()) {
            let config = FilterConfig::default();
            let count = doc.items.len();
            let mut engine = FilterEngine::new(&config, doc, State::new());
            engine.filter_pass();

            prop_assert!(engine.hidden().is_empty());
            prop_assert_eq!(engine.visible_count(), count);
        }

        #[test]
        fn prop_hidden_iff_some_active_criterion_fails(
            mut doc in arb_document(),
            values in arb_values(),
        ) {
            let config = FilterConfig::default();
            set_values(&mut doc, &values);
            let mut engine = FilterEngine::new(&config, doc, State::new());
            engine.filter_pass();

            let doc = engine.document();
            for (index, (attributes, visible)) in doc.items.iter().enumerate() {
                let fails = config.criteria.iter().any(|criterion| {
                    let value = doc.value(&criterion.control).unwrap_or_default();
                    !value.is_empty() && !criterion.matches(&value, &attributes[&criterion.name])
                });
                prop_assert_eq!(*visible, !fails);
                prop_assert_eq!(engine.hidden().contains(&index), fails);
            }
        }

        #[test]
        fn prop_filter_pass_is_idempotent(
            mut doc in arb_document(),
            values in arb_values(),
        ) {
            let config = FilterConfig::default();
            set_values(&mut doc, &values);
            let mut engine = FilterEngine::new(&config, doc, State::new());

            engine.filter_pass();
            let once = engine.hidden().to_vec();
            let once_visible = engine.document().visible_names().len();
            engine.filter_pass();

            prop_assert_eq!(engine.hidden(), once.as_slice());
            prop_assert_eq!(engine.document().visible_names().len(), once_visible);
        }
    }
}
