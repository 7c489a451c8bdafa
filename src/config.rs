use crate::defs::WidgetError;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;

/// Configuration handed to a widget by the shell.
///
/// The shell owns its shape; widgets keep it as-is and may ask for a typed
/// view with [`WidgetConfig::parse`].
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WidgetConfig(pub Value);

impl WidgetConfig {
    pub fn parse<T: DeserializeOwned>(&self) -> Result<T, WidgetError> {
        T::deserialize(&self.0).map_err(|e| WidgetError::InvalidConfig(e.to_string()))
    }

    #[cfg(feature = "csr")]
    pub fn from_js(value: wasm_bindgen::JsValue) -> Result<Self, WidgetError> {
        if value.is_undefined() || value.is_null() {
            return Ok(Self::default());
        }
        serde_wasm_bindgen::from_value(value)
            .map(WidgetConfig)
            .map_err(|e| WidgetError::InvalidConfig(e.to_string()))
    }
}

impl From<Value> for WidgetConfig {
    fn from(value: Value) -> Self {
        WidgetConfig(value)
    }
}

/// Shape of the config the shell ships with the system menu.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemMenuConfig {
    #[serde(rename = "Type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(rename = "Menu", default)]
    pub menu: Vec<MenuEntry>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuEntry {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Location")]
    pub location: String,
}
