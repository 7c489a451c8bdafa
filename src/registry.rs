use crate::{
    config::WidgetConfig,
    defs::{WidgetError, SYSTEM_MENU_KEY},
    host::Host,
    widget::{LogoutWidget, Widget},
};
use std::{collections::HashMap, rc::Rc};

/// Builds a widget for the shell from the shell's config.
pub type WidgetFactory<H> = Rc<dyn Fn(&H, WidgetConfig) -> Box<dyn Widget<H>>>;

/// Name-to-factory table owned by the shell.
pub struct WidgetRegistry<H: Host> {
    factories: HashMap<String, WidgetFactory<H>>,
}

impl<H: Host> Default for WidgetRegistry<H> {
    fn default() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }
}

impl<H: Host> WidgetRegistry<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `factory` under `key`, returning whatever it replaced.
    pub fn set(
        &mut self,
        key: impl Into<String>,
        factory: WidgetFactory<H>,
    ) -> Option<WidgetFactory<H>> {
        let key = key.into();
        let previous = self.factories.insert(key.clone(), factory);
        if previous.is_some() {
            log::warn!("widget {key} was registered twice, keeping the latest");
        } else {
            log::debug!("registered widget {key}");
        }
        previous
    }

    pub fn get(&self, key: &str) -> Option<WidgetFactory<H>> {
        self.factories.get(key).cloned()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.factories.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }

    pub fn create(
        &self,
        key: &str,
        host: &H,
        config: WidgetConfig,
    ) -> Result<Box<dyn Widget<H>>, WidgetError> {
        let factory = self
            .factories
            .get(key)
            .ok_or_else(|| WidgetError::UnknownWidget(key.to_string()))?;
        Ok(factory(host, config))
    }
}

/// Key and factory for the system menu, for the host application to
/// register at startup.
pub fn init<H: Host>() -> (&'static str, WidgetFactory<H>) {
    (
        SYSTEM_MENU_KEY,
        Rc::new(|host: &H, config: WidgetConfig| {
            Box::new(LogoutWidget::create(host, config)) as Box<dyn Widget<H>>
        }),
    )
}

pub fn register<H: Host>(registry: &mut WidgetRegistry<H>) {
    let (key, factory) = init::<H>();
    registry.set(key, factory);
}
