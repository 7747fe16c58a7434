//! Declarative settings schemas for provider forms.
//!
//! A [`SettingsSchema`] serializes to the JSON shape the host's form renderer
//! consumes:
//!
//! ```json
//! {
//!   "settings": { "temperature": { "type": "number", "default": 0.7, ... } },
//!   "ui": { "temperature": { "ui:widget": "range", "ui:help": "..." } }
//! }
//! ```
//!
//! Field order is preserved in the serialized output. Bounds are advisory: the
//! host uses them to render widgets, nothing here validates values.

use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};
use serde_json::{Map, Value};

/// JSON type of a setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SettingKind {
    /// Floating point number.
    Number,
    /// Whole number.
    Integer,
    /// Free text.
    String,
    /// Checkbox.
    Boolean,
}

/// One user-tunable setting.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SettingField {
    /// JSON type of the value.
    #[serde(rename = "type")]
    pub kind: SettingKind,
    /// Label shown in the form.
    pub title: String,
    /// Longer explanation.
    pub description: String,
    /// Value used when the user does not change the setting.
    pub default: Value,
    /// Advisory lower bound.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum: Option<Value>,
    /// Advisory upper bound.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum: Option<Value>,
}

impl SettingField {
    fn new(kind: SettingKind, title: impl Into<String>, default: Value) -> Self {
        Self {
            kind,
            title: title.into(),
            description: String::new(),
            default,
            minimum: None,
            maximum: None,
        }
    }

    /// Creates a number setting.
    #[must_use]
    pub fn number(title: impl Into<String>, default: f64) -> Self {
        Self::new(SettingKind::Number, title, Value::from(default))
    }

    /// Creates an integer setting.
    #[must_use]
    pub fn integer(title: impl Into<String>, default: i64) -> Self {
        Self::new(SettingKind::Integer, title, Value::from(default))
    }

    /// Creates a string setting.
    #[must_use]
    pub fn string(title: impl Into<String>, default: impl Into<String>) -> Self {
        Self::new(SettingKind::String, title, Value::String(default.into()))
    }

    /// Creates a boolean setting.
    #[must_use]
    pub fn boolean(title: impl Into<String>, default: bool) -> Self {
        Self::new(SettingKind::Boolean, title, Value::Bool(default))
    }

    /// Sets the description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the advisory bounds.
    #[must_use]
    pub fn range(mut self, minimum: impl Into<Value>, maximum: impl Into<Value>) -> Self {
        self.minimum = Some(minimum.into());
        self.maximum = Some(maximum.into());
        self
    }
}

/// Presentation hints for one setting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UiHint {
    /// Widget name understood by the host, e.g. `range` or `textarea`.
    #[serde(rename = "ui:widget", skip_serializing_if = "Option::is_none")]
    pub widget: Option<String>,
    /// Help text shown under the widget.
    #[serde(rename = "ui:help", skip_serializing_if = "Option::is_none")]
    pub help: Option<String>,
}

impl UiHint {
    /// Creates a hint for the given widget.
    #[must_use]
    pub fn widget(widget: impl Into<String>) -> Self {
        Self {
            widget: Some(widget.into()),
            help: None,
        }
    }

    /// Sets the help text.
    #[must_use]
    pub fn help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }
}

/// A provider's settings schema.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettingsSchema {
    fields: Vec<(String, SettingField)>,
    ui: Vec<(String, UiHint)>,
}

impl SettingsSchema {
    /// Starts building a schema.
    #[must_use]
    pub fn builder() -> SettingsSchemaBuilder {
        SettingsSchemaBuilder::default()
    }

    /// Returns a field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&SettingField> {
        self.fields
            .iter()
            .find_map(|(key, field)| (key == name).then_some(field))
    }

    /// Returns the UI hint for a field.
    #[must_use]
    pub fn ui_hint(&self, name: &str) -> Option<&UiHint> {
        self.ui
            .iter()
            .find_map(|(key, hint)| (key == name).then_some(hint))
    }

    /// Returns field names in declaration order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    /// Returns the default value of every field, keyed by name.
    #[must_use]
    pub fn defaults(&self) -> Map<String, Value> {
        self.fields
            .iter()
            .map(|(name, field)| (name.clone(), field.default.clone()))
            .collect()
    }

    /// Serializes the schema to a JSON value.
    #[must_use]
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

struct Ordered<'a, T>(&'a [(String, T)]);

impl<T: Serialize> Serialize for Ordered<'_, T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, value) in self.0 {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl Serialize for SettingsSchema {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(2))?;
        map.serialize_entry("settings", &Ordered(&self.fields))?;
        map.serialize_entry("ui", &Ordered(&self.ui))?;
        map.end()
    }
}

/// Builder for [`SettingsSchema`].
#[derive(Debug, Default)]
pub struct SettingsSchemaBuilder {
    schema: SettingsSchema,
}

impl SettingsSchemaBuilder {
    /// Adds a field with an optional UI hint. Re-adding a name replaces it.
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, field: SettingField, ui: Option<UiHint>) -> Self {
        let name = name.into();
        self.schema.fields.retain(|(key, _)| *key != name);
        self.schema.ui.retain(|(key, _)| *key != name);

        if let Some(hint) = ui {
            self.schema.ui.push((name.clone(), hint));
        }
        self.schema.fields.push((name, field));
        self
    }

    /// Finishes the schema.
    #[must_use]
    pub fn build(self) -> SettingsSchema {
        self.schema
    }
}
