//! In-memory document.

use std::cell::RefCell;
use std::collections::{
    BTreeMap,
    HashMap,
};
use std::fmt;
use std::rc::Rc;

use super::{
    ClickHandler,
    Page,
    PageError,
};

/// Handle to a node of a [`VirtualPage`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

/// One element of a [`VirtualPage`].
#[derive(Debug, Clone, Default)]
struct VirtualNode {
    /// Element name, e.g. `button`
    tag: String,
    /// Attributes by name
    attributes: BTreeMap<String, String>,
    /// Text content
    text: String,
    /// Child elements in order
    children: Vec<NodeId>,
}

/// A minimal document kept in memory.
///
/// Containers are registered under the selector the toggle will ask for,
/// so no selector engine is needed. Clicks are simulated with
/// [`click`](Self::click).
#[derive(Default)]
pub struct VirtualPage {
    /// Every element, indexed by [`NodeId`]
    nodes: RefCell<Vec<VirtualNode>>,
    /// Attributes of the `<html>` element
    root_attributes: RefCell<BTreeMap<String, String>>,
    /// Elements reachable through a selector
    containers: RefCell<HashMap<String, NodeId>>,
    /// Click handler per element
    handlers: RefCell<HashMap<NodeId, Rc<dyn Fn()>>>,
}

impl VirtualPage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an element to the document body.
    pub fn add_element(&self, tag: &str, attributes: &[(&str, &str)], text: &str) -> NodeId {
        let node = VirtualNode {
            tag: tag.to_string(),
            attributes: attributes.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect(),
            text: text.to_string(),
            children: Vec::new(),
        };
        let mut nodes = self.nodes.borrow_mut();
        nodes.push(node);
        NodeId(nodes.len() - 1)
    }

    /// Adds a container element reachable through `selector`.
    pub fn add_container(&self, selector: &str) -> NodeId {
        let id = self.add_element("div", &[], "");
        self.containers.borrow_mut().insert(selector.to_string(), id);
        id
    }

    /// Adds an element carrying `attribute="key"`.
    pub fn add_marked(&self, attribute: &str, key: &str, text: &str) -> NodeId {
        self.add_element("span", &[(attribute, key)], text)
    }

    #[must_use]
    pub fn text(&self, id: NodeId) -> Option<String> {
        self.nodes.borrow().get(id.0).map(|node| node.text.clone())
    }

    #[must_use]
    pub fn tag(&self, id: NodeId) -> Option<String> {
        self.nodes.borrow().get(id.0).map(|node| node.tag.clone())
    }

    #[must_use]
    pub fn attribute(&self, id: NodeId, name: &str) -> Option<String> {
        self.nodes.borrow().get(id.0).and_then(|node| node.attributes.get(name).cloned())
    }

    #[must_use]
    pub fn root_attribute(&self, name: &str) -> Option<String> {
        self.root_attributes.borrow().get(name).cloned()
    }

    #[must_use]
    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        self.nodes.borrow().get(id.0).map(|node| node.children.clone()).unwrap_or_default()
    }

    /// All elements whose `id` attribute equals `dom_id`.
    #[must_use]
    pub fn elements_with_id(&self, dom_id: &str) -> Vec<NodeId> {
        self.nodes
            .borrow()
            .iter()
            .enumerate()
            .filter(|(_, node)| node.attributes.get("id").is_some_and(|v| v == dom_id))
            .map(|(index, _)| NodeId(index))
            .collect()
    }

    /// Runs the click handler of `id`. Returns false if it has none.
    pub fn click(&self, id: NodeId) -> bool {
        // released before running so the handler may touch the page
        let handler = self.handlers.borrow().get(&id).cloned();
        handler.is_some_and(|handler| {
            handler();
            true
        })
    }

    /// Runs `f` on the node, or fails if `id` is unknown.
    fn with_node<T>(
        &self,
        id: NodeId,
        f: impl FnOnce(&mut VirtualNode) -> T,
    ) -> Result<T, PageError> {
        self.nodes.borrow_mut().get_mut(id.0).map(f).ok_or(PageError::UnknownElement)
    }
}

impl Page for VirtualPage {
    type Element = NodeId;

    fn marked_elements(&self, attribute: &str) -> Vec<(NodeId, String)> {
        self.nodes
            .borrow()
            .iter()
            .enumerate()
            .filter_map(|(index, node)| {
                node.attributes.get(attribute).map(|key| (NodeId(index), key.clone()))
            })
            .collect()
    }

    fn set_text(&self, element: &NodeId, text: &str) {
        if self.with_node(*element, |node| node.text = text.to_string()).is_err() {
            tracing::debug!(?element, "Ignoring text for unknown element");
        }
    }

    fn set_attribute(&self, element: &NodeId, name: &str, value: &str) -> Result<(), PageError> {
        self.with_node(*element, |node| {
            node.attributes.insert(name.to_string(), value.to_string());
        })
    }

    fn set_root_attribute(&self, name: &str, value: &str) -> Result<(), PageError> {
        self.root_attributes.borrow_mut().insert(name.to_string(), value.to_string());
        Ok(())
    }

    fn create_button(&self, id: &str, class_name: &str) -> Result<NodeId, PageError> {
        Ok(self.add_element("button", &[("id", id), ("class", class_name)], ""))
    }

    fn on_click(&self, element: &NodeId, handler: ClickHandler) -> Result<(), PageError> {
        if self.nodes.borrow().get(element.0).is_none() {
            return Err(PageError::UnknownElement);
        }
        self.handlers.borrow_mut().insert(*element, Rc::from(handler));
        Ok(())
    }

    fn prepend_to(&self, selector: &str, element: &NodeId) -> Result<bool, PageError> {
        let Some(container) = self.containers.borrow().get(selector).copied() else {
            return Ok(false);
        };
        self.with_node(container, |node| node.children.insert(0, *element))?;
        Ok(true)
    }
}

impl fmt::Debug for VirtualPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VirtualPage")
            .field("nodes", &self.nodes)
            .field("root_attributes", &self.root_attributes)
            .field("containers", &self.containers)
            .field("handlers", &"<HashMap<NodeId, Rc<dyn Fn()>>>")
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::cell::Cell;

    use googletest::prelude::*;
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn marked_elements_in_document_order() {
        let page = VirtualPage::new();
        let first = page.add_marked("data-i18n", "nav.home", "");
        page.add_element("p", &[], "plain");
        let second = page.add_marked("data-i18n", "nav.contact", "");

        let marked = page.marked_elements("data-i18n");

        assert_that!(
            marked,
            elements_are![
                eq(&(first, "nav.home".to_string())),
                eq(&(second, "nav.contact".to_string()))
            ]
        );
    }

    #[rstest]
    fn set_text_and_attributes() {
        let page = VirtualPage::new();
        let id = page.add_element("a", &[], "old");

        page.set_text(&id, "new");
        page.set_attribute(&id, "title", "hint").unwrap();
        page.set_root_attribute("dir", "rtl").unwrap();

        assert_that!(page.text(id), some(eq("new")));
        assert_that!(page.attribute(id, "title"), some(eq("hint")));
        assert_that!(page.root_attribute("dir"), some(eq("rtl")));
    }

    #[rstest]
    fn unknown_element_is_rejected() {
        let page = VirtualPage::new();

        assert_that!(page.set_attribute(&NodeId(7), "a", "b"), err(eq(&PageError::UnknownElement)));
    }

    #[rstest]
    fn create_button_sets_id_and_class() {
        let page = VirtualPage::new();

        let button = page.create_button("switcher", "btn").unwrap();

        assert_that!(page.tag(button), some(eq("button")));
        assert_that!(page.elements_with_id("switcher"), elements_are![eq(&button)]);
        assert_that!(page.attribute(button, "class"), some(eq("btn")));
    }

    #[rstest]
    fn prepend_inserts_as_first_child() {
        let page = VirtualPage::new();
        let container = page.add_container("header .actions");
        let a = page.add_element("a", &[], "");
        let b = page.add_element("b", &[], "");

        assert_that!(page.prepend_to("header .actions", &a), ok(eq(&true)));
        assert_that!(page.prepend_to("header .actions", &b), ok(eq(&true)));

        assert_that!(page.children(container), elements_are![eq(&b), eq(&a)]);
    }

    #[rstest]
    fn prepend_without_container_reports_false() {
        let page = VirtualPage::new();
        let a = page.add_element("a", &[], "");

        assert_that!(page.prepend_to("header", &a), ok(eq(&false)));
    }

    #[rstest]
    fn click_runs_registered_handler() {
        let page = VirtualPage::new();
        let button = page.create_button("b", "").unwrap();
        let clicks = Rc::new(Cell::new(0));
        let counter = Rc::clone(&clicks);

        page.on_click(&button, Box::new(move || counter.set(counter.get() + 1))).unwrap();

        assert_that!(page.click(button), eq(true));
        assert_that!(page.click(button), eq(true));
        assert_that!(clicks.get(), eq(2));
    }

    #[rstest]
    fn click_without_handler_does_nothing() {
        let page = VirtualPage::new();
        let button = page.create_button("b", "").unwrap();

        assert_that!(page.click(button), eq(false));
    }
}
