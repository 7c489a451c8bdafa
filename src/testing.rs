//! In-memory host used by the unit tests.

use crate::{defs::TransportError, host::Host};
use futures::{
    executor::{LocalPool, LocalSpawner},
    future::LocalBoxFuture,
    task::LocalSpawnExt,
};
use http::StatusCode;
use std::{
    cell::RefCell,
    collections::VecDeque,
    fmt,
    rc::{Rc, Weak},
};

#[derive(Default)]
pub struct Node {
    pub tag: String,
    pub text: String,
    pub children: Vec<MemoryElement>,
    listeners: Vec<Weak<dyn Fn()>>,
}

#[derive(Clone, Default)]
pub struct MemoryElement(Rc<RefCell<Node>>);

impl MemoryElement {
    pub fn tag(&self) -> String {
        self.0.borrow().tag.clone()
    }

    pub fn text(&self) -> String {
        self.0.borrow().text.clone()
    }

    pub fn children(&self) -> Vec<MemoryElement> {
        self.0.borrow().children.clone()
    }

    pub fn live_listeners(&self) -> usize {
        self.0
            .borrow()
            .listeners
            .iter()
            .filter(|l| l.upgrade().is_some())
            .count()
    }

    /// Fires every click handler still attached to this element.
    pub fn click(&self) {
        let handlers: Vec<_> = self
            .0
            .borrow()
            .listeners
            .iter()
            .filter_map(Weak::upgrade)
            .collect();
        for handler in handlers {
            handler();
        }
    }
}

impl PartialEq for MemoryElement {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for MemoryElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let node = self.0.borrow();
        f.debug_struct("MemoryElement")
            .field("tag", &node.tag)
            .field("text", &node.text)
            .field("children", &node.children.len())
            .finish()
    }
}

#[derive(Default)]
struct Recorded {
    responses: VecDeque<Result<StatusCode, TransportError>>,
    requests: Vec<String>,
    navigations: Vec<String>,
    alerts: Vec<String>,
}

#[derive(Clone)]
pub struct MemoryHost {
    recorded: Rc<RefCell<Recorded>>,
    pool: Rc<RefCell<LocalPool>>,
    spawner: LocalSpawner,
}

impl MemoryHost {
    pub fn new() -> Self {
        let pool = LocalPool::new();
        let spawner = pool.spawner();
        Self {
            recorded: Rc::default(),
            pool: Rc::new(RefCell::new(pool)),
            spawner,
        }
    }

    /// Queues the result of the next `post`.
    pub fn respond(&self, response: Result<StatusCode, TransportError>) {
        self.recorded.borrow_mut().responses.push_back(response);
    }

    /// Drives spawned tasks until none can make progress.
    pub fn run(&self) {
        self.pool.borrow_mut().run_until_stalled();
    }

    pub fn requests(&self) -> Vec<String> {
        self.recorded.borrow().requests.clone()
    }

    pub fn navigations(&self) -> Vec<String> {
        self.recorded.borrow().navigations.clone()
    }

    pub fn alerts(&self) -> Vec<String> {
        self.recorded.borrow().alerts.clone()
    }
}

impl Host for MemoryHost {
    type Element = MemoryElement;
    type Listener = Rc<dyn Fn()>;

    fn create_element(&self, tag: &str) -> MemoryElement {
        let element = MemoryElement::default();
        element.0.borrow_mut().tag = tag.to_string();
        element
    }

    fn set_text(&self, element: &MemoryElement, text: &str) {
        element.0.borrow_mut().text = text.to_string();
    }

    fn append_child(&self, parent: &MemoryElement, child: &MemoryElement) {
        parent.0.borrow_mut().children.push(child.clone());
    }

    fn on_click(&self, element: &MemoryElement, handler: Rc<dyn Fn()>) -> Rc<dyn Fn()> {
        element
            .0
            .borrow_mut()
            .listeners
            .push(Rc::downgrade(&handler));
        handler
    }

    fn post(&self, endpoint: &str) -> LocalBoxFuture<'static, Result<StatusCode, TransportError>> {
        let mut recorded = self.recorded.borrow_mut();
        recorded.requests.push(endpoint.to_string());
        let response = recorded
            .responses
            .pop_front()
            .unwrap_or_else(|| Err(TransportError("no response scripted".to_string())));
        Box::pin(async move { response })
    }

    fn navigate(&self, path: &str) {
        self.recorded.borrow_mut().navigations.push(path.to_string());
    }

    fn alert(&self, message: &str) {
        self.recorded.borrow_mut().alerts.push(message.to_string());
    }

    fn spawn(&self, task: LocalBoxFuture<'static, ()>) {
        self.spawner
            .spawn_local(task)
            .expect("local pool to accept tasks");
    }
}
