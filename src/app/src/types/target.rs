use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// How a UI target reacts to an update. Resolved once when the shell registers it.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum TargetKind {
    /// Editable form field, updated through its value
    Input,
    /// Fill bar, updated through its percentage
    ProgressBar,
    /// Checkbox, checked when the value is 1
    Checkbox,
    /// Anything else, updated through its rendered content
    #[default]
    Display,
}

/// Registration of a UI target by the shell
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TargetSpec {
    pub id: String,
    pub kind: TargetKind,
}

/// Current state of one UI target
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UiTarget {
    pub kind: TargetKind,
    pub content: String,
    pub fill_percent: Option<u8>,
    /// `None` while a checkbox has not been told its state
    pub checked: Option<bool>,
}

impl UiTarget {
    pub fn new(kind: TargetKind) -> Self {
        Self {
            kind,
            ..Default::default()
        }
    }
}

/// UI targets addressable by protocol field names
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UiTargets {
    targets: BTreeMap<String, UiTarget>,
}

impl UiTargets {
    /// Replace the registered targets; state of targets that stay registered is kept
    pub fn register(&mut self, specs: Vec<TargetSpec>) {
        let mut previous = std::mem::take(&mut self.targets);
        for spec in specs {
            let target = match previous.remove(&spec.id) {
                Some(existing) if existing.kind == spec.kind => existing,
                _ => UiTarget::new(spec.kind),
            };
            self.targets.insert(spec.id, target);
        }
    }

    pub fn get(&self, id: &str) -> Option<&UiTarget> {
        self.targets.get(id)
    }

    pub fn kind(&self, id: &str) -> Option<TargetKind> {
        self.targets.get(id).map(|t| t.kind)
    }

    /// Set the text of a target. Missing targets are ignored.
    pub fn set_content(&mut self, id: &str, content: impl Into<String>) {
        if let Some(target) = self.targets.get_mut(id) {
            target.content = content.into();
        }
    }

    /// Set the fill of a progress bar target. Missing targets are ignored.
    pub fn set_fill(&mut self, id: &str, percent: u8) {
        if let Some(target) = self.targets.get_mut(id) {
            target.fill_percent = Some(percent.min(100));
        }
    }

    pub fn set_checked(&mut self, id: &str, checked: bool) {
        if let Some(target) = self.targets.get_mut(id) {
            target.checked = Some(checked);
        }
    }

    pub fn content(&self, id: &str) -> Option<&str> {
        self.targets.get(id).map(|t| t.content.as_str())
    }

    /// Put every checkbox back into the indeterminate state
    pub fn neutralize_checkboxes(&mut self) {
        for target in self.targets.values_mut() {
            if target.kind == TargetKind::Checkbox {
                target.checked = None;
            }
        }
    }
}
