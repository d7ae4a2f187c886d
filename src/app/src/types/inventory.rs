use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::version::compare_versions;

/// One raw field of an inventory entry, rendered as text
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImageField {
    pub key: String,
    pub value: String,
}

/// A firmware build offered for one processor family
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FirmwareImage {
    pub processor_family: String,
    pub name: String,
    pub version: String,
    /// Every field of the source entry in delivery order, `name` and `version` included
    pub fields: Vec<ImageField>,
}

impl FirmwareImage {
    fn from_entry(family: &str, entry: &Map<String, Value>) -> Self {
        let fields: Vec<ImageField> = entry
            .iter()
            .map(|(key, value)| ImageField {
                key: key.clone(),
                value: field_text(value),
            })
            .collect();
        let lookup = |key: &str| {
            fields
                .iter()
                .find(|f| f.key == key)
                .map(|f| f.value.clone())
                .unwrap_or_default()
        };

        Self {
            processor_family: family.to_string(),
            name: lookup("name"),
            version: lookup("version"),
            fields,
        }
    }

    /// `family/name`, the identity the device expects in upgrade requests
    pub fn qualified_name(&self) -> String {
        format!("{}/{}", self.processor_family, self.name)
    }
}

/// Text form of a JSON field value: strings unquoted, everything else as JSON
pub fn field_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// All images of one processor family, newest first
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FirmwareFamily {
    pub name: String,
    pub images: Vec<FirmwareImage>,
}

impl FirmwareFamily {
    fn from_list(name: &str, list: &Value) -> Self {
        let mut images: Vec<FirmwareImage> = match list.as_array() {
            Some(entries) => entries
                .iter()
                .filter_map(|entry| match entry.as_object() {
                    Some(entry) => Some(FirmwareImage::from_entry(name, entry)),
                    None => {
                        log::warn!("Skipping malformed firmware entry in {name}: {entry}");
                        None
                    }
                })
                .collect(),
            None => {
                log::warn!("Firmware list for {name} is not a list, treating it as empty");
                Vec::new()
            }
        };
        images.sort_by(|a, b| compare_versions(&a.version, &b.version));

        Self {
            name: name.to_string(),
            images,
        }
    }
}

/// Firmware images grouped by processor family in delivery order
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Inventory {
    families: Vec<FirmwareFamily>,
}

impl Inventory {
    /// Build an inventory from a `family -> [entry]` mapping.
    ///
    /// Never fails: a payload that is not a mapping yields an empty inventory
    /// and a family whose list is malformed is kept with no images.
    pub fn ingest(raw: &Value) -> Self {
        let Some(mapping) = raw.as_object() else {
            log::warn!("Firmware inventory is not a mapping, ignoring it");
            return Self::default();
        };

        Self {
            families: mapping
                .iter()
                .map(|(family, list)| FirmwareFamily::from_list(family, list))
                .collect(),
        }
    }

    /// Build a single-family inventory from a bare entry list
    pub fn from_list(family: &str, raw: &Value) -> Self {
        Self {
            families: vec![FirmwareFamily::from_list(family, raw)],
        }
    }

    pub fn families(&self) -> &[FirmwareFamily] {
        &self.families
    }

    pub fn is_empty(&self) -> bool {
        self.families.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::cmp::Ordering;

    #[test]
    fn families_keep_delivery_order() {
        let inventory = Inventory::ingest(&json!({
            "pic16f88": [],
            "pic16f1847": [],
            "atmega": []
        }));
        let names: Vec<_> = inventory.families().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["pic16f88", "pic16f1847", "atmega"]);
    }

    #[test]
    fn images_are_sorted_newest_first() {
        let inventory = Inventory::ingest(&json!({
            "pic16f88": [
                {"name": "gateway.hex", "version": "4.2"},
                {"name": "gateway.hex", "version": "4.10"},
                {"name": "diagnose.hex", "version": "1.0"},
                {"name": "gateway.hex", "version": "4.3"}
            ]
        }));
        let images = &inventory.families()[0].images;
        let versions: Vec<_> = images.iter().map(|i| i.version.as_str()).collect();
        assert_eq!(versions, ["4.10", "4.3", "4.2", "1.0"]);
        for pair in images.windows(2) {
            assert_ne!(
                compare_versions(&pair[0].version, &pair[1].version),
                Ordering::Greater
            );
        }
    }

    #[test]
    fn images_carry_their_family() {
        let inventory = Inventory::ingest(&json!({
            "a": [{"name": "x", "version": "1"}],
            "b": [{"name": "y", "version": "2"}]
        }));
        for family in inventory.families() {
            assert!(family
                .images
                .iter()
                .all(|image| image.processor_family == family.name));
        }
    }

    #[test]
    fn empty_mapping_yields_no_family() {
        assert!(Inventory::ingest(&json!({})).is_empty());
    }

    #[test]
    fn malformed_payloads_degrade_to_empty() {
        assert!(Inventory::ingest(&json!([1, 2, 3])).is_empty());
        assert!(Inventory::ingest(&Value::Null).is_empty());

        let inventory = Inventory::ingest(&json!({"broken": "nope", "ok": [{"name": "a"}]}));
        assert_eq!(inventory.families().len(), 2);
        assert!(inventory.families()[0].images.is_empty());
        assert_eq!(inventory.families()[1].images.len(), 1);
    }

    #[test]
    fn non_object_entries_are_skipped() {
        let inventory = Inventory::ingest(&json!({"a": [1, {"name": "b", "version": "2"}, null]}));
        assert_eq!(inventory.families()[0].images.len(), 1);
    }

    #[test]
    fn extra_fields_are_kept_as_text() {
        let inventory = Inventory::ingest(&json!({
            "pic16f88": [{"name": "gateway.hex", "version": "6.5", "size": 24576}]
        }));
        let image = &inventory.families()[0].images[0];
        assert_eq!(image.name, "gateway.hex");
        assert_eq!(image.qualified_name(), "pic16f88/gateway.hex");
        assert_eq!(
            image.fields[2],
            ImageField {
                key: "size".to_string(),
                value: "24576".to_string()
            }
        );
    }

    #[test]
    fn numeric_versions_are_accepted() {
        let inventory = Inventory::from_list("files", &json!([{"name": "a", "version": 5}]));
        assert_eq!(inventory.families()[0].images[0].version, "5");
    }
}
