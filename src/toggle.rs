//! Header control offering the other language.

use std::cell::{
    Cell,
    RefCell,
};
use std::fmt;
use std::rc::Rc;

use crate::config::ToggleSettings;
use crate::page::{
    Page,
    PageError,
};
use crate::types::LanguageCode;

/// Receives the language the user asked to switch to.
pub type SwitchListener = Rc<dyn Fn(LanguageCode)>;

/// Shared between the toggle and the click handler on the page.
type ListenerSlot = Rc<RefCell<Option<SwitchListener>>>;

/// The language switch button.
///
/// The control is created once and owned here; its label always names the
/// language a click would switch *to*.
pub struct LanguageToggle<P: Page> {
    /// Document the control lives in
    page: Rc<P>,
    /// Id, class and insertion point
    settings: ToggleSettings,
    /// The control, once created
    control: RefCell<Option<P::Element>>,
    /// Active language as of the last label update.
    shown_for: Rc<Cell<Option<LanguageCode>>>,
    /// Receives switch requests
    listener: ListenerSlot,
}

impl<P: Page> LanguageToggle<P> {
    #[must_use]
    pub fn new(page: Rc<P>, settings: ToggleSettings) -> Self {
        Self {
            page,
            settings,
            control: RefCell::new(None),
            shown_for: Rc::new(Cell::new(None)),
            listener: Rc::new(RefCell::new(None)),
        }
    }

    /// Creates and inserts the control on first use, then refreshes its label.
    ///
    /// The control is owned as soon as it exists, so a failure while wiring
    /// it up never leads to a second control on the next call.
    pub fn render(&self, current: LanguageCode) -> Result<(), PageError> {
        let created = {
            let mut control = self.control.borrow_mut();
            if control.is_some() {
                None
            } else {
                let element =
                    self.page.create_button(&self.settings.element_id, &self.settings.class_name)?;
                *control = Some(element.clone());
                Some(element)
            }
        };
        if let Some(element) = created {
            self.attach(&element)?;
        }
        self.update_label(current)
    }

    /// Hooks the click handler to `element` and places it in the header.
    fn attach(&self, element: &P::Element) -> Result<(), PageError> {
        let shown_for = Rc::clone(&self.shown_for);
        let listener = Rc::clone(&self.listener);
        self.page.on_click(element, Box::new(move || {
            dispatch(&shown_for, &listener);
        }))?;

        if !self.page.prepend_to(&self.settings.container_selector, element)? {
            tracing::warn!(
                selector = %self.settings.container_selector,
                "Language toggle container not found; control is not shown"
            );
        }
        tracing::debug!(id = %self.settings.element_id, "Created language toggle");
        Ok(())
    }

    /// Labels the control with the language `current` switches to.
    pub fn update_label(&self, current: LanguageCode) -> Result<(), PageError> {
        self.shown_for.set(Some(current));

        let control = self.control.borrow();
        let Some(element) = control.as_ref() else {
            return Ok(());
        };

        let target = current.toggle_target().profile();
        self.page.set_text(element, target.toggle_label);
        self.page.set_attribute(element, "aria-label", target.switch_prompt)?;
        self.page.set_attribute(element, "title", target.switch_prompt)?;
        Ok(())
    }

    /// Registers the switch listener, replacing any previous one.
    pub fn on_activate(&self, listener: impl Fn(LanguageCode) + 'static) {
        *self.listener.borrow_mut() = Some(Rc::new(listener));
    }

    /// Same as a click on the control. Returns the language requested, if a
    /// listener received it.
    pub fn activate(&self) -> Option<LanguageCode> {
        dispatch(&self.shown_for, &self.listener)
    }

    /// The control, once rendered.
    #[must_use]
    pub fn control(&self) -> Option<P::Element> {
        self.control.borrow().clone()
    }
}

/// Sends the language the current label names to the listener, if any.
fn dispatch(
    shown_for: &Cell<Option<LanguageCode>>,
    listener: &RefCell<Option<SwitchListener>>,
) -> Option<LanguageCode> {
    let target = shown_for.get()?.toggle_target();
    // cloned out so the listener can re-enter the toggle
    let listener = listener.borrow().clone()?;
    listener(target);
    Some(target)
}

impl<P: Page> fmt::Debug for LanguageToggle<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LanguageToggle")
            .field("settings", &self.settings)
            .field("rendered", &self.control.borrow().is_some())
            .field("shown_for", &self.shown_for.get())
            .field("has_listener", &self.listener.borrow().is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use googletest::prelude::*;
    use rstest::*;

    use super::*;
    use crate::page::{
        ClickHandler,
        NodeId,
        VirtualPage,
    };

    const CONTAINER: &str = "header .flex.items-center.gap-4";

    #[fixture]
    fn page() -> Rc<VirtualPage> {
        let page = VirtualPage::new();
        page.add_container(CONTAINER);
        Rc::new(page)
    }

    fn toggle(page: &Rc<VirtualPage>) -> LanguageToggle<VirtualPage> {
        LanguageToggle::new(Rc::clone(page), ToggleSettings::default())
    }

    fn recorder(toggle: &LanguageToggle<VirtualPage>) -> Rc<RefCell<Vec<LanguageCode>>> {
        let received = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&received);
        toggle.on_activate(move |lang| sink.borrow_mut().push(lang));
        received
    }

    #[rstest]
    fn render_inserts_control_as_first_child(page: Rc<VirtualPage>) {
        let container = page.add_container("other");
        let toggle = LanguageToggle::new(
            Rc::clone(&page),
            ToggleSettings { container_selector: "other".to_string(), ..ToggleSettings::default() },
        );
        let existing = page.add_element("a", &[], "CTA");
        page.prepend_to("other", &existing).unwrap();

        toggle.render(LanguageCode::Ar).unwrap();

        let control = toggle.control().unwrap();
        assert_that!(page.children(container), elements_are![eq(&control), eq(&existing)]);
        assert_that!(page.attribute(control, "id"), some(eq("language-switcher-btn")));
    }

    #[rstest]
    fn render_twice_creates_one_control(page: Rc<VirtualPage>) {
        let toggle = toggle(&page);

        toggle.render(LanguageCode::Ar).unwrap();
        toggle.render(LanguageCode::En).unwrap();

        assert_that!(page.elements_with_id("language-switcher-btn"), len(eq(1)));
        assert_that!(page.text(toggle.control().unwrap()), some(eq("عربي")));
    }

    #[rstest]
    #[case::arabic_active(LanguageCode::Ar, "EN", "Switch to English")]
    #[case::english_active(LanguageCode::En, "عربي", "التبديل إلى العربية")]
    fn label_names_the_other_language(
        page: Rc<VirtualPage>,
        #[case] current: LanguageCode,
        #[case] label: &str,
        #[case] prompt: &str,
    ) {
        let toggle = toggle(&page);

        toggle.render(current).unwrap();

        let control = toggle.control().unwrap();
        assert_that!(page.text(control), some(eq(label)));
        assert_that!(page.attribute(control, "aria-label"), some(eq(prompt)));
        assert_that!(page.attribute(control, "title"), some(eq(prompt)));
    }

    #[rstest]
    fn update_label_before_render_is_noop(page: Rc<VirtualPage>) {
        let toggle = toggle(&page);

        assert_that!(toggle.update_label(LanguageCode::En), ok(anything()));
        assert_that!(toggle.control(), none());
        // the label state is still tracked for the next click
        toggle.on_activate(|_| {});
        assert_that!(toggle.activate(), some(eq(LanguageCode::Ar)));
    }

    #[rstest]
    fn missing_container_still_owns_control(page: Rc<VirtualPage>) {
        let toggle = LanguageToggle::new(
            Rc::clone(&page),
            ToggleSettings {
                container_selector: "nowhere".to_string(),
                ..ToggleSettings::default()
            },
        );

        toggle.render(LanguageCode::Ar).unwrap();
        toggle.render(LanguageCode::Ar).unwrap();

        assert_that!(toggle.control(), some(anything()));
        assert_that!(page.elements_with_id("language-switcher-btn"), len(eq(1)));
    }

    /// Page whose click wiring always fails.
    #[derive(Debug, Default)]
    struct BrokenClicks {
        /// Backing document
        inner: VirtualPage,
    }

    impl Page for BrokenClicks {
        type Element = NodeId;

        fn marked_elements(&self, attribute: &str) -> Vec<(NodeId, String)> {
            self.inner.marked_elements(attribute)
        }

        fn set_text(&self, element: &NodeId, text: &str) {
            self.inner.set_text(element, text);
        }

        fn set_attribute(&self, element: &NodeId, name: &str, value: &str) -> Result<(), PageError> {
            self.inner.set_attribute(element, name, value)
        }

        fn set_root_attribute(&self, name: &str, value: &str) -> Result<(), PageError> {
            self.inner.set_root_attribute(name, value)
        }

        fn create_button(&self, id: &str, class_name: &str) -> Result<NodeId, PageError> {
            self.inner.create_button(id, class_name)
        }

        fn on_click(&self, _element: &NodeId, _handler: ClickHandler) -> Result<(), PageError> {
            Err(PageError::Dom("listener rejected".to_string()))
        }

        fn prepend_to(&self, selector: &str, element: &NodeId) -> Result<bool, PageError> {
            self.inner.prepend_to(selector, element)
        }
    }

    #[rstest]
    fn failed_wiring_does_not_duplicate_control() {
        let page = Rc::new(BrokenClicks::default());
        let toggle = LanguageToggle::new(Rc::clone(&page), ToggleSettings::default());

        assert_that!(
            toggle.render(LanguageCode::Ar),
            err(eq(&PageError::Dom("listener rejected".to_string())))
        );
        assert_that!(toggle.render(LanguageCode::Ar), ok(anything()));

        assert_that!(page.inner.elements_with_id("language-switcher-btn"), len(eq(1)));
        assert_that!(page.inner.text(toggle.control().unwrap()), some(eq("EN")));
    }

    #[rstest]
    fn click_reports_other_language(page: Rc<VirtualPage>) {
        let toggle = toggle(&page);
        let received = recorder(&toggle);
        toggle.render(LanguageCode::Ar).unwrap();

        assert_that!(page.click(toggle.control().unwrap()), eq(true));

        assert_that!(received.borrow().as_slice(), elements_are![eq(&LanguageCode::En)]);
    }

    #[rstest]
    fn click_follows_latest_label(page: Rc<VirtualPage>) {
        let toggle = toggle(&page);
        let received = recorder(&toggle);
        toggle.render(LanguageCode::Ar).unwrap();

        toggle.update_label(LanguageCode::En).unwrap();
        page.click(toggle.control().unwrap());

        assert_that!(received.borrow().as_slice(), elements_are![eq(&LanguageCode::Ar)]);
    }

    #[rstest]
    fn re_registration_replaces_listener(page: Rc<VirtualPage>) {
        let toggle = toggle(&page);
        let first = recorder(&toggle);
        let second = recorder(&toggle);
        toggle.render(LanguageCode::Ar).unwrap();

        assert_that!(toggle.activate(), some(eq(LanguageCode::En)));

        assert_that!(first.borrow().as_slice(), is_empty());
        assert_that!(second.borrow().as_slice(), len(eq(1)));
    }

    #[rstest]
    fn activate_without_listener_does_nothing(page: Rc<VirtualPage>) {
        let toggle = toggle(&page);
        toggle.render(LanguageCode::Ar).unwrap();

        assert_that!(toggle.activate(), none());
    }

    #[rstest]
    fn listener_may_update_label_during_click(page: Rc<VirtualPage>) {
        let toggle = Rc::new(toggle(&page));
        let weak = Rc::downgrade(&toggle);
        toggle.on_activate(move |lang| {
            if let Some(toggle) = weak.upgrade() {
                toggle.update_label(lang).unwrap();
            }
        });
        toggle.render(LanguageCode::Ar).unwrap();
        let control = toggle.control().unwrap();

        page.click(control);
        assert_that!(page.text(control), some(eq("عربي")));

        page.click(control);
        assert_that!(page.text(control), some(eq("EN")));
    }
}
