//! `web_sys::Document` backed page.

use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;
use web_sys::{
    Document,
    Element,
};

use crate::page::{
    ClickHandler,
    Page,
    PageError,
};

#[derive(Debug, Clone)]
pub struct DomPage {
    /// Document of the page
    document: Document,
}

impl DomPage {
    /// The document of the current window.
    pub fn new() -> Result<Self, PageError> {
        let document =
            web_sys::window().and_then(|window| window.document()).ok_or(PageError::NoDocument)?;
        Ok(Self { document })
    }
}

impl Page for DomPage {
    type Element = Element;

    fn marked_elements(&self, attribute: &str) -> Vec<(Element, String)> {
        let nodes = match self.document.query_selector_all(&format!("[{attribute}]")) {
            Ok(nodes) => nodes,
            Err(e) => {
                tracing::warn!(error = ?e, "Failed to query marked elements");
                return Vec::new();
            }
        };

        (0..nodes.length())
            .filter_map(|index| nodes.item(index))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .filter_map(|element| {
                let key = element.get_attribute(attribute)?;
                Some((element, key))
            })
            .collect()
    }

    fn set_text(&self, element: &Element, text: &str) {
        element.set_text_content(Some(text));
    }

    fn set_attribute(&self, element: &Element, name: &str, value: &str) -> Result<(), PageError> {
        element.set_attribute(name, value).map_err(dom_error)
    }

    fn set_root_attribute(&self, name: &str, value: &str) -> Result<(), PageError> {
        self.document
            .document_element()
            .ok_or(PageError::NoDocument)?
            .set_attribute(name, value)
            .map_err(dom_error)
    }

    fn create_button(&self, id: &str, class_name: &str) -> Result<Element, PageError> {
        let button = self.document.create_element("button").map_err(dom_error)?;
        button.set_id(id);
        button.set_class_name(class_name);
        button.set_attribute("type", "button").map_err(dom_error)?;
        Ok(button)
    }

    fn on_click(&self, element: &Element, handler: ClickHandler) -> Result<(), PageError> {
        let closure = Closure::wrap(handler);
        element
            .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())
            .map_err(dom_error)?;
        // lives as long as the page
        closure.forget();
        Ok(())
    }

    fn prepend_to(&self, selector: &str, element: &Element) -> Result<bool, PageError> {
        let Some(container) = self.document.query_selector(selector).map_err(dom_error)? else {
            return Ok(false);
        };
        let first = container.first_child();
        container.insert_before(element, first.as_ref()).map_err(dom_error)?;
        Ok(true)
    }
}

/// Converts a thrown JS value into a [`PageError`].
fn dom_error(error: JsValue) -> PageError {
    PageError::Dom(error.as_string().unwrap_or_else(|| format!("{error:?}")))
}
