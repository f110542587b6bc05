//! Document access used by the translation components.
//!
//! The components never touch a concrete DOM; they go through [`Page`],
//! which the browser backend and [`VirtualPage`] implement.

/// In-memory document
mod virtual_page;

use thiserror::Error;
pub use virtual_page::{
    NodeId,
    VirtualPage,
};

/// Handler attached to a control's click event.
pub type ClickHandler = Box<dyn Fn()>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PageError {
    #[error("Document is not available")]
    NoDocument,

    #[error("Unknown element")]
    UnknownElement,

    #[error("DOM operation failed: {0}")]
    Dom(String),
}

/// The document operations the translation layer needs.
pub trait Page {
    type Element: Clone;

    /// Elements carrying `attribute`, in document order, with the attribute's value.
    fn marked_elements(&self, attribute: &str) -> Vec<(Self::Element, String)>;

    /// Replaces the element's text content.
    fn set_text(&self, element: &Self::Element, text: &str);

    fn set_attribute(
        &self,
        element: &Self::Element,
        name: &str,
        value: &str,
    ) -> Result<(), PageError>;

    /// Sets an attribute on the root (`<html>`) element.
    fn set_root_attribute(&self, name: &str, value: &str) -> Result<(), PageError>;

    /// Creates a detached `<button>` with the given id and class.
    fn create_button(&self, id: &str, class_name: &str) -> Result<Self::Element, PageError>;

    fn on_click(&self, element: &Self::Element, handler: ClickHandler) -> Result<(), PageError>;

    /// Inserts `element` as the first child of the first element matching
    /// `selector`. Returns `Ok(false)` if nothing matches.
    fn prepend_to(&self, selector: &str, element: &Self::Element) -> Result<bool, PageError>;
}
