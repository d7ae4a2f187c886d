//! Firmware table synthesis
//!
//! The shell describes the table markup once as a [`TemplateGroup`]; the core
//! instantiates one group per processor family from it. Rendering always
//! starts from the pristine template, so a new inventory fully replaces the
//! groups of the previous one.

use serde::{Deserialize, Serialize};

use super::inventory::{FirmwareFamily, FirmwareImage, Inventory};
use super::target::TargetKind;

/// One element of a template, addressed by its binding name
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TemplateElement {
    pub id: Option<String>,
    pub kind: TargetKind,
    /// Field this element is bound to (`name` or `data-name` in the markup)
    pub binding: Option<String>,
    pub value: String,
    pub content: String,
}

impl TemplateElement {
    /// Inputs receive bound data as their value, every other kind as content
    fn bind(&mut self, text: &str) {
        match self.kind {
            TargetKind::Input => self.value = text.to_string(),
            _ => self.content = text.to_string(),
        }
    }

    fn is_bound_to(&self, field: &str) -> bool {
        self.binding.as_deref() == Some(field)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TemplateRow {
    pub elements: Vec<TemplateElement>,
}

/// A table: caption, group level fields and data rows
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TemplateGroup {
    pub id: Option<String>,
    pub title: Option<TemplateElement>,
    pub elements: Vec<TemplateElement>,
    pub rows: Vec<TemplateRow>,
}

/// An instantiated table as handed to the shell
pub type RenderGroup = TemplateGroup;

impl TemplateGroup {
    fn strip_ids(&mut self) {
        self.id = None;
        for element in self
            .title
            .iter_mut()
            .chain(self.elements.iter_mut())
            .chain(self.rows.iter_mut().flat_map(|row| row.elements.iter_mut()))
        {
            element.id = None;
        }
    }

    /// Text of the caption, if the template has one
    pub fn title_text(&self) -> Option<&str> {
        self.title.as_ref().map(|t| t.content.as_str())
    }
}

/// How inventory data is bound into a template
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BindingSchema {
    /// Write the family name into the group caption
    pub title: bool,
    /// Group level field receiving the family name
    pub family_field: Option<String>,
    /// Bind `name` as `family/name`
    pub qualify_name: bool,
}

impl BindingSchema {
    /// Upgrade page: one captioned table per processor family
    pub fn grouped() -> Self {
        Self {
            title: true,
            family_field: Some("pic".to_string()),
            qualify_name: true,
        }
    }

    /// Plain file list: a single table, fields bound verbatim
    pub fn flat() -> Self {
        Self {
            title: false,
            family_field: None,
            qualify_name: false,
        }
    }
}

impl Default for BindingSchema {
    fn default() -> Self {
        Self::grouped()
    }
}

fn bind_row(
    prototype: &TemplateRow,
    image: &FirmwareImage,
    schema: &BindingSchema,
) -> TemplateRow {
    let mut row = prototype.clone();
    for element in &mut row.elements {
        element.id = None;
    }
    for field in &image.fields {
        let text = if schema.qualify_name && field.key == "name" {
            image.qualified_name()
        } else {
            field.value.clone()
        };
        for element in row.elements.iter_mut().filter(|e| e.is_bound_to(&field.key)) {
            element.bind(&text);
        }
    }
    row
}

fn bind_group(
    mut group: TemplateGroup,
    family: &FirmwareFamily,
    schema: &BindingSchema,
) -> RenderGroup {
    if schema.title {
        if let Some(title) = group.title.as_mut() {
            title.content = family.name.clone();
        }
    }
    if let Some(field) = &schema.family_field {
        for element in group.elements.iter_mut().filter(|e| e.is_bound_to(field)) {
            element.bind(&family.name);
        }
    }

    let rows = match group.rows.first() {
        Some(prototype) => family
            .images
            .iter()
            .map(|image| bind_row(prototype, image, schema))
            .collect(),
        None => {
            log::warn!("Firmware table template has no row, {} stays empty", family.name);
            Vec::new()
        }
    };
    group.rows = rows;
    group
}

/// Instantiate one table per family of `inventory`, in family order.
///
/// The first table keeps the template's identity; every further table is a
/// clone with all ids removed so the page never holds duplicate ids.
pub fn render_tables(
    template: &TemplateGroup,
    inventory: &Inventory,
    schema: &BindingSchema,
) -> Vec<RenderGroup> {
    inventory
        .families()
        .iter()
        .enumerate()
        .map(|(index, family)| {
            let mut group = template.clone();
            if index > 0 {
                group.strip_ids();
            }
            bind_group(group, family, schema)
        })
        .collect()
}
