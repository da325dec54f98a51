//! Typed input declarations for actions and triggers
//!
//! Hosts render these to build configuration forms; the values come back as
//! a JSON object keyed by property name.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::{AxigenError, Result};

/// Input values keyed by property name
pub type Props = Map<String, Value>;

/// One selectable entry of a dropdown
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DropdownOption {
    pub label: String,
    pub value: Value,
}

impl DropdownOption {
    pub fn new(label: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// Options of a dynamic dropdown, resolved against the server
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DropdownState {
    pub disabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    pub options: Vec<DropdownOption>,
}

impl DropdownState {
    pub fn ready(options: Vec<DropdownOption>) -> Self {
        Self {
            disabled: false,
            placeholder: None,
            options,
        }
    }

    /// Disabled, empty dropdown with an explanation
    pub fn unavailable(placeholder: impl Into<String>) -> Self {
        Self {
            disabled: true,
            placeholder: Some(placeholder.into()),
            options: Vec::new(),
        }
    }
}

/// Where a dynamic dropdown gets its options from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DropdownSource {
    Folders,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PropertyKind {
    ShortText,
    SecretText,
    Number,
    Checkbox,
    StaticDropdown { options: Vec<DropdownOption> },
    Dropdown { source: DropdownSource },
}

/// Declaration of one input field
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDef {
    pub name: &'static str,
    pub display_name: &'static str,
    pub description: &'static str,
    pub required: bool,
    #[serde(flatten)]
    pub kind: PropertyKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Value>,
}

impl PropertyDef {
    fn new(
        name: &'static str,
        display_name: &'static str,
        description: &'static str,
        kind: PropertyKind,
    ) -> Self {
        Self {
            name,
            display_name,
            description,
            required: false,
            kind,
            default_value: None,
        }
    }

    pub fn short_text(name: &'static str, display_name: &'static str, description: &'static str) -> Self {
        Self::new(name, display_name, description, PropertyKind::ShortText)
    }

    pub fn secret_text(name: &'static str, display_name: &'static str, description: &'static str) -> Self {
        Self::new(name, display_name, description, PropertyKind::SecretText)
    }

    pub fn number(name: &'static str, display_name: &'static str, description: &'static str) -> Self {
        Self::new(name, display_name, description, PropertyKind::Number)
    }

    pub fn checkbox(name: &'static str, display_name: &'static str, description: &'static str) -> Self {
        Self::new(name, display_name, description, PropertyKind::Checkbox)
    }

    pub fn static_dropdown(
        name: &'static str,
        display_name: &'static str,
        description: &'static str,
        options: Vec<DropdownOption>,
    ) -> Self {
        Self::new(name, display_name, description, PropertyKind::StaticDropdown { options })
    }

    pub fn dropdown(
        name: &'static str,
        display_name: &'static str,
        description: &'static str,
        source: DropdownSource,
    ) -> Self {
        Self::new(name, display_name, description, PropertyKind::Dropdown { source })
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_default(mut self, value: impl Into<Value>) -> Self {
        self.default_value = Some(value.into());
        self
    }
}

/// Check that every required property is present and not null
pub fn check_required(defs: &[PropertyDef], props: &Props) -> Result<()> {
    let missing: Vec<&str> = defs
        .iter()
        .filter(|d| d.required && d.default_value.is_none())
        .filter(|d| props.get(d.name).is_none_or(Value::is_null))
        .map(|d| d.name)
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(AxigenError::InvalidInput(format!(
            "missing required properties: {}",
            missing.join(", ")
        )))
    }
}

/// Deserialize props into a typed input struct
pub fn parse_props<T: DeserializeOwned>(props: &Props) -> Result<T> {
    serde_json::from_value(Value::Object(props.clone()))
        .map_err(|e| AxigenError::InvalidInput(e.to_string()))
}
