//! Serde models for the Galaxy `/api/tools` responses.
//!
//! The API discriminates entries by `model_class`; unknown classes are kept
//! but ignored, so new Galaxy releases do not break deserialization.

use serde::Deserialize;

/// One entry of the toolbox listing: a tool, a section of tools, or
/// something else (labels etc.) we skip.
#[derive(Debug, Clone, Deserialize)]
pub struct ToolboxItem {
    #[serde(default)]
    pub model_class: String,
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub version: String,
    /// Tools inside a `ToolSection`.
    #[serde(default)]
    pub elems: Vec<ToolboxItem>,
}

impl ToolboxItem {
    pub fn is_tool(&self) -> bool {
        self.model_class == "Tool"
    }
}

/// All tools of a toolbox listing, flattened. Sections nest one level deep.
pub fn flatten_tools(items: &[ToolboxItem]) -> Vec<&ToolboxItem> {
    let mut tools = Vec::new();
    for item in items {
        if item.is_tool() {
            tools.push(item);
        } else if item.model_class == "ToolSection" {
            tools.extend(item.elems.iter().filter(|e| e.is_tool()));
        }
    }
    tools
}

/// I/O details of one tool (`?io_details=True`).
#[derive(Debug, Clone, Deserialize)]
pub struct ToolIoDetails {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub inputs: Vec<InputParam>,
    #[serde(default)]
    pub outputs: Vec<OutputParam>,
}

/// One node of the input parameter tree.
#[derive(Debug, Clone, Deserialize)]
pub struct InputParam {
    #[serde(default)]
    pub model_class: String,
    #[serde(default)]
    pub name: String,
    /// Accepted datatype extensions (`DataToolParameter` only).
    #[serde(default)]
    pub extensions: Vec<String>,
    #[serde(default)]
    pub edam: EdamInfo,
    /// `Conditional` branches.
    #[serde(default)]
    pub cases: Vec<ConditionalCase>,
    /// `Repeat` body.
    #[serde(default)]
    pub inputs: Vec<InputParam>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct EdamInfo {
    #[serde(default)]
    pub edam_formats: Vec<String>,
    #[serde(default)]
    pub edam_data: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConditionalCase {
    #[serde(default)]
    pub model_class: String,
    #[serde(default)]
    pub inputs: Vec<InputParam>,
}

/// One output entry. Collections (`ToolOutputCollection`) are skipped.
#[derive(Debug, Clone, Deserialize)]
pub struct OutputParam {
    #[serde(default)]
    pub model_class: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub format: String,
    #[serde(default)]
    pub edam_format: Option<String>,
}

/// A flattened data slot with its accepted formats.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IoSlot {
    /// Slot name; nested parameters are `|`-joined (`cond|reads`).
    pub name: String,
    pub formats: Vec<String>,
    pub edam_formats: Vec<String>,
}

impl ToolIoDetails {
    /// Flattened, deduplicated input slots: `DataToolParameter` leaves,
    /// recursing into `Conditional` cases and `Repeat` bodies.
    pub fn input_slots(&self) -> Vec<IoSlot> {
        let mut slots = Vec::new();
        walk_inputs(&self.inputs, "", &mut slots);
        slots
    }

    /// Output slots carrying data (`ToolOutput` entries).
    pub fn output_slots(&self) -> Vec<IoSlot> {
        self.outputs
            .iter()
            .filter(|o| o.model_class == "ToolOutput")
            .map(|o| IoSlot {
                name: o.name.clone(),
                formats: vec![o.format.clone()],
                edam_formats: o.edam_format.iter().cloned().collect(),
            })
            .collect()
    }
}

fn walk_inputs(section: &[InputParam], prefix: &str, out: &mut Vec<IoSlot>) {
    for item in section {
        match item.model_class.as_str() {
            "DataToolParameter" => {
                let slot = IoSlot {
                    name: format!("{prefix}{}", item.name),
                    formats: item.extensions.clone(),
                    edam_formats: item.edam.edam_formats.clone(),
                };
                if !out.contains(&slot) {
                    out.push(slot);
                }
            }
            "Conditional" => {
                let nested = format!("{prefix}{}|", item.name);
                for case in &item.cases {
                    walk_inputs(&case.inputs, &nested, out);
                }
            }
            "Repeat" => {
                let nested = format!("{prefix}{}|", item.name);
                walk_inputs(&item.inputs, &nested, out);
            }
            _ => {}
        }
    }
}
