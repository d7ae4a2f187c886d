use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Submitter value that starts a firmware upgrade
pub const DOWNLOAD_ACTION: &str = "download";

/// Button that submitted a form
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Submitter {
    pub name: String,
    pub value: String,
}

/// A form submission captured by the shell
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FormSubmission {
    /// Form action, relative to the page or absolute
    pub action: String,
    pub fields: BTreeMap<String, String>,
    pub submitter: Submitter,
}

impl FormSubmission {
    /// Whether the core handles this submission itself. All other submissions
    /// are left to the browser.
    pub fn is_upgrade(&self) -> bool {
        intercepts_submission(&self.submitter.value)
    }

    /// Form body: the form fields with the submitter set on top
    pub fn body(&self) -> BTreeMap<String, String> {
        let mut body = self.fields.clone();
        body.insert(self.submitter.name.clone(), self.submitter.value.clone());
        body
    }
}

pub fn intercepts_submission(submitter_value: &str) -> bool {
    submitter_value == DOWNLOAD_ACTION
}
