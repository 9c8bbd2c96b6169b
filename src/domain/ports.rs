use crate::domain::model::{ElementId, SubmissionOutcome, SubmissionRequest};
use crate::domain::selector::{ElementTree, Selector};
use crate::utils::error::Result;
use async_trait::async_trait;

/// The slice of a page document the components are allowed to touch.
///
/// Class-list and inline-style access are derived from the `class` and
/// `style` attributes, so an implementation only has to provide tree
/// queries, attribute storage, text, and form-control values.
pub trait Document: ElementTree {
    fn root(&self) -> ElementId;
    fn body(&self) -> Option<ElementId>;
    /// URL of the page, used to resolve relative form actions.
    fn location(&self) -> Option<&str>;

    /// Matching elements in document order.
    fn query_all(&self, selector: &Selector) -> Vec<ElementId>;
    /// Matching descendants of `scope` (excluding `scope`) in document order.
    fn query_all_within(&self, scope: ElementId, selector: &Selector) -> Vec<ElementId>;

    fn set_attribute(&mut self, el: ElementId, name: &str, value: &str);
    fn remove_attribute(&mut self, el: ElementId, name: &str);

    fn text_content(&self, el: ElementId) -> String;
    fn set_text_content(&mut self, el: ElementId, text: &str);

    /// Current value of a form control, `None` for non-controls.
    fn value(&self, el: ElementId) -> Option<String>;
    fn set_value(&mut self, el: ElementId, value: &str);
    /// Restores every control inside `form` to its default value.
    fn reset_form(&mut self, form: ElementId);

    fn query(&self, selector: &Selector) -> Option<ElementId> {
        self.query_all(selector).into_iter().next()
    }

    fn query_within(&self, scope: ElementId, selector: &Selector) -> Option<ElementId> {
        self.query_all_within(scope, selector).into_iter().next()
    }

    fn attribute(&self, el: ElementId, name: &str) -> Option<String> {
        self.attribute_value(el, name).map(str::to_string)
    }

    fn has_class(&self, el: ElementId, class: &str) -> bool {
        self.has_class_name(el, class)
    }

    fn add_class(&mut self, el: ElementId, class: &str) {
        self.toggle_class(el, class, Some(true));
    }

    fn remove_class(&mut self, el: ElementId, class: &str) {
        self.toggle_class(el, class, Some(false));
    }

    /// Flips `class`, or forces it on/off when `force` is set. Returns whether
    /// the class is present afterwards.
    fn toggle_class(&mut self, el: ElementId, class: &str, force: Option<bool>) -> bool {
        let mut classes: Vec<String> = self
            .attribute_value(el, "class")
            .map(|list| list.split_ascii_whitespace().map(str::to_string).collect())
            .unwrap_or_default();
        let present = classes.iter().any(|c| c == class);
        let want = force.unwrap_or(!present);
        if want == present {
            return present;
        }
        if want {
            classes.push(class.to_string());
        } else {
            classes.retain(|c| c != class);
        }
        self.set_attribute(el, "class", &classes.join(" "));
        want
    }

    fn style_property(&self, el: ElementId, property: &str) -> Option<String> {
        self.attribute_value(el, "style").and_then(|style| {
            parse_style(style)
                .into_iter()
                .find(|(name, _)| name == property)
                .map(|(_, value)| value)
        })
    }

    /// Sets an inline style property; an empty value removes it.
    fn set_style_property(&mut self, el: ElementId, property: &str, value: &str) {
        let mut decls: Vec<(String, String)> = self
            .attribute_value(el, "style")
            .map(parse_style)
            .unwrap_or_default();
        decls.retain(|(name, _)| name != property);
        if !value.is_empty() {
            decls.push((property.to_string(), value.to_string()));
        }
        if decls.is_empty() {
            self.remove_attribute(el, "style");
        } else {
            let style = decls
                .iter()
                .map(|(name, value)| format!("{}: {};", name, value))
                .collect::<Vec<_>>()
                .join(" ");
            self.set_attribute(el, "style", &style);
        }
    }
}

fn parse_style(style: &str) -> Vec<(String, String)> {
    style
        .split(';')
        .filter_map(|decl| {
            let (name, value) = decl.split_once(':')?;
            let name = name.trim().to_ascii_lowercase();
            let value = value.trim();
            (!name.is_empty() && !value.is_empty()).then(|| (name, value.to_string()))
        })
        .collect()
}

/// Synchronous string key-value persistence, shaped like `localStorage`.
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Result<Option<String>>;
    fn set_item(&mut self, key: &str, value: &str) -> Result<()>;
}

/// Sends a contact form submission somewhere and classifies the response.
#[async_trait]
pub trait FormTransport: Send + Sync {
    async fn send(&self, request: &SubmissionRequest) -> SubmissionOutcome;
}
