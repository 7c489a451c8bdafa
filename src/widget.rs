use crate::{
    config::WidgetConfig,
    defs::{LOGOUT_TEXT, ROOT_TEXT},
    host::Host,
    logout::logout,
};
use std::rc::Rc;

/// A component the shell can mount: something with a root element and an
/// `open` hook called once it is shown.
pub trait Widget<H: Host> {
    fn root_element(&self) -> H::Element;
    fn open(&self);
}

/// System menu holding the logout control.
pub struct LogoutWidget<H: Host, C = WidgetConfig> {
    root: H::Element,
    control: H::Element,
    config: C,
    // dropping this detaches the click handler
    _on_click: H::Listener,
}

impl<H: Host, C> LogoutWidget<H, C> {
    pub fn create(host: &H, config: C) -> Self {
        let control = host.create_element("div");
        host.set_text(&control, LOGOUT_TEXT);

        let root = host.create_element("div");
        host.set_text(&root, ROOT_TEXT);
        host.append_child(&root, &control);

        let click_host = host.clone();
        let on_click = host.on_click(
            &control,
            Rc::new(move || {
                let host = click_host.clone();
                // overlapping clicks each get their own request
                click_host.spawn(Box::pin(async move {
                    logout(&host).await;
                }));
            }),
        );

        Self {
            root,
            control,
            config,
            _on_click: on_click,
        }
    }

    pub fn control(&self) -> &H::Element {
        &self.control
    }

    pub fn config(&self) -> &C {
        &self.config
    }
}

impl<H: Host, C> Widget<H> for LogoutWidget<H, C> {
    fn root_element(&self) -> H::Element {
        self.root.clone()
    }

    fn open(&self) {
        // TODO: hand off to URL-based navigation once the shell defines it
        log::info!("application started");
    }
}
