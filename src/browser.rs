use crate::{
    config::WidgetConfig,
    defs::{TransportError, WidgetError},
    host::Host,
    registry::{register, WidgetRegistry},
    widget::Widget,
};
use futures::future::LocalBoxFuture;
use gloo_net::http::Request;
use http::StatusCode;
use leptos::task::Executor;
use std::rc::Rc;
use wasm_bindgen::{prelude::*, JsCast};
use web_sys::{Document, HtmlElement, MouseEvent, Window};

/// [`Host`] backed by the page the wasm module was loaded into.
#[derive(Clone)]
pub struct BrowserHost {
    window: Window,
    document: Document,
}

impl BrowserHost {
    /// Also installs the wasm-bindgen task executor if nothing has yet, so
    /// tasks passed to [`Host::spawn`] run.
    pub fn new() -> Result<Self, WidgetError> {
        // already set up is fine
        _ = Executor::init_wasm_bindgen();
        let window = web_sys::window().ok_or(WidgetError::MissingGlobal("window"))?;
        let document = window
            .document()
            .ok_or(WidgetError::MissingGlobal("document"))?;
        Ok(Self { window, document })
    }

    pub fn body(&self) -> Result<HtmlElement, WidgetError> {
        self.document
            .body()
            .ok_or(WidgetError::MissingGlobal("document.body"))
    }
}

/// Click listener registered on an element, removed again on drop.
pub struct ClickListener {
    element: HtmlElement,
    closure: Closure<dyn FnMut(MouseEvent)>,
}

impl Drop for ClickListener {
    fn drop(&mut self) {
        let _ = self
            .element
            .remove_event_listener_with_callback("click", self.closure.as_ref().unchecked_ref());
    }
}

impl Host for BrowserHost {
    type Element = HtmlElement;
    type Listener = ClickListener;

    fn create_element(&self, tag: &str) -> HtmlElement {
        self.document
            .create_element(tag)
            .unwrap_throw()
            .unchecked_into::<HtmlElement>()
    }

    fn set_text(&self, element: &HtmlElement, text: &str) {
        element.set_inner_text(text);
    }

    fn append_child(&self, parent: &HtmlElement, child: &HtmlElement) {
        parent.append_child(child).unwrap_throw();
    }

    fn on_click(&self, element: &HtmlElement, handler: Rc<dyn Fn()>) -> ClickListener {
        let closure =
            Closure::wrap(Box::new(move |_: MouseEvent| handler()) as Box<dyn FnMut(MouseEvent)>);
        element
            .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())
            .unwrap_throw();
        ClickListener {
            element: element.clone(),
            closure,
        }
    }

    fn post(&self, endpoint: &str) -> LocalBoxFuture<'static, Result<StatusCode, TransportError>> {
        let request = Request::post(endpoint).header("Accept", "text/plain");
        Box::pin(async move {
            let response = request
                .send()
                .await
                .map_err(|e| TransportError(e.to_string()))?;
            // the body is plain text and carries nothing we use
            StatusCode::from_u16(response.status()).map_err(|e| TransportError(e.to_string()))
        })
    }

    fn navigate(&self, path: &str) {
        if let Err(e) = self.window.location().set_pathname(path) {
            log::error!("could not navigate to {path}: {e:?}");
        }
    }

    fn alert(&self, message: &str) {
        if let Err(e) = self.window.alert_with_message(message) {
            log::error!("could not show alert: {e:?}");
        }
    }

    fn spawn(&self, task: LocalBoxFuture<'static, ()>) {
        leptos::task::spawn_local(task);
    }
}

impl From<WidgetError> for JsValue {
    fn from(e: WidgetError) -> Self {
        js_sys::Error::new(&e.to_string()).into()
    }
}

/// Loader side of the widget registry: creates widgets by name and attaches
/// them to the page.
#[wasm_bindgen]
pub struct Shell {
    host: BrowserHost,
    registry: WidgetRegistry<BrowserHost>,
    mounted: Vec<Box<dyn Widget<BrowserHost>>>,
}

#[wasm_bindgen]
impl Shell {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<Shell, JsValue> {
        let host = BrowserHost::new()?;
        let mut registry = WidgetRegistry::new();
        register(&mut registry);
        Ok(Shell {
            host,
            registry,
            mounted: Vec::new(),
        })
    }

    /// Creates the widget registered under `key`, appends its root element
    /// to the body, and opens it.
    pub fn mount(&mut self, key: &str, config: JsValue) -> Result<(), JsValue> {
        let config = WidgetConfig::from_js(config)?;
        let body = self.host.body()?;
        let widget = self.registry.create(key, &self.host, config)?;
        body.append_child(&widget.root_element())?;
        widget.open();
        log::debug!("mounted widget {key}");
        self.mounted.push(widget);
        Ok(())
    }

    /// Detaches and drops every mounted widget.
    pub fn unmount_all(&mut self) {
        for widget in self.mounted.drain(..) {
            widget.root_element().remove();
        }
    }

    pub fn keys(&self) -> Vec<String> {
        self.registry.keys().map(str::to_string).collect()
    }
}
