use crate::defs::TransportError;
use futures::future::LocalBoxFuture;
use http::StatusCode;
use std::{fmt::Debug, rc::Rc};

/// Everything a widget touches outside of itself: the document, the network,
/// the location bar, and the event loop.
///
/// Handles are cheap to clone and refer to the same underlying environment.
/// Nothing here is `Send`; a host lives on the UI thread.
pub trait Host: Clone + 'static {
    /// A node in the host's document. Clones refer to the same node.
    type Element: Clone + PartialEq + Debug + 'static;
    /// Keeps a click handler attached for as long as it is held.
    type Listener: 'static;

    fn create_element(&self, tag: &str) -> Self::Element;
    fn set_text(&self, element: &Self::Element, text: &str);
    fn append_child(&self, parent: &Self::Element, child: &Self::Element);
    fn on_click(&self, element: &Self::Element, handler: Rc<dyn Fn()>) -> Self::Listener;

    /// Sends a bodyless POST to `endpoint` and resolves with the response status.
    fn post(&self, endpoint: &str) -> LocalBoxFuture<'static, Result<StatusCode, TransportError>>;

    /// Replaces the path of the current location.
    fn navigate(&self, path: &str);
    /// Blocking, user-facing message box.
    fn alert(&self, message: &str);
    /// Runs `task` on a later turn of the event loop.
    fn spawn(&self, task: LocalBoxFuture<'static, ()>);
}
