use crate::domain::model::ElementId;
use crate::domain::ports::Document;
use crate::domain::selector::{ElementTree, Selector};

const FORM_CONTROLS: [&str; 3] = ["input", "textarea", "select"];

/// Description of an element to append to a [`MemoryDocument`].
#[derive(Debug, Clone, Default)]
pub struct Element {
    tag: String,
    attributes: Vec<(String, String)>,
    text: String,
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            ..Default::default()
        }
    }

    pub fn id(self, id: &str) -> Self {
        self.attr("id", id)
    }

    pub fn class(mut self, class: &str) -> Self {
        match self.attributes.iter_mut().find(|(k, _)| k == "class") {
            Some((_, list)) => {
                list.push(' ');
                list.push_str(class);
            }
            None => self.attributes.push(("class".to_string(), class.to_string())),
        }
        self
    }

    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attributes.retain(|(k, _)| k != name);
        self.attributes.push((name.to_string(), value.to_string()));
        self
    }

    pub fn text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }
}

#[derive(Debug, Clone)]
struct Node {
    tag: String,
    parent: Option<ElementId>,
    children: Vec<ElementId>,
    attributes: Vec<(String, String)>,
    text: String,
    // dirty value of a form control; `None` falls back to the default value
    value: Option<String>,
}

/// Arena-backed document tree for headless runs and tests.
#[derive(Debug, Clone)]
pub struct MemoryDocument {
    nodes: Vec<Node>,
    root: ElementId,
    body: ElementId,
    location: Option<String>,
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDocument {
    /// An empty `<html><head></head><body></body></html>` document.
    pub fn new() -> Self {
        let mut doc = Self {
            nodes: Vec::new(),
            root: ElementId::new(0),
            body: ElementId::new(0),
            location: None,
        };
        doc.root = doc.push_node(None, Element::new("html"));
        doc.push_node(Some(doc.root), Element::new("head"));
        doc.body = doc.push_node(Some(doc.root), Element::new("body"));
        doc
    }

    pub fn with_location(mut self, url: &str) -> Self {
        self.location = Some(url.to_string());
        self
    }

    pub fn append(&mut self, parent: ElementId, element: Element) -> ElementId {
        self.push_node(Some(parent), element)
    }

    pub fn append_to_body(&mut self, element: Element) -> ElementId {
        self.push_node(Some(self.body), element)
    }

    pub fn tag(&self, el: ElementId) -> &str {
        &self.nodes[el.index()].tag
    }

    pub fn children(&self, el: ElementId) -> &[ElementId] {
        &self.nodes[el.index()].children
    }

    fn push_node(&mut self, parent: Option<ElementId>, element: Element) -> ElementId {
        let id = ElementId::new(self.nodes.len());
        self.nodes.push(Node {
            tag: element.tag,
            parent,
            children: Vec::new(),
            attributes: element.attributes,
            text: element.text,
            value: None,
        });
        if let Some(parent) = parent {
            self.nodes[parent.index()].children.push(id);
        }
        id
    }

    fn node(&self, el: ElementId) -> &Node {
        &self.nodes[el.index()]
    }

    fn node_mut(&mut self, el: ElementId) -> &mut Node {
        &mut self.nodes[el.index()]
    }

    fn descendants(&self, scope: ElementId) -> Vec<ElementId> {
        let mut out = Vec::new();
        let mut stack: Vec<ElementId> = self.node(scope).children.iter().rev().copied().collect();
        while let Some(el) = stack.pop() {
            out.push(el);
            stack.extend(self.node(el).children.iter().rev().copied());
        }
        out
    }

    fn is_control(&self, el: ElementId) -> bool {
        FORM_CONTROLS.contains(&self.node(el).tag.as_str())
    }

    fn default_value(&self, el: ElementId) -> String {
        let node = self.node(el);
        if node.tag == "textarea" {
            node.text.clone()
        } else {
            self.attribute_value(el, "value").unwrap_or_default().to_string()
        }
    }
}

impl ElementTree for MemoryDocument {
    fn parent(&self, el: ElementId) -> Option<ElementId> {
        self.node(el).parent
    }

    fn tag_name(&self, el: ElementId) -> &str {
        &self.node(el).tag
    }

    fn attribute_value(&self, el: ElementId, name: &str) -> Option<&str> {
        self.node(el)
            .attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

impl Document for MemoryDocument {
    fn root(&self) -> ElementId {
        self.root
    }

    fn body(&self) -> Option<ElementId> {
        Some(self.body)
    }

    fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    fn query_all(&self, selector: &Selector) -> Vec<ElementId> {
        std::iter::once(self.root)
            .chain(self.descendants(self.root))
            .filter(|el| selector.matches(self, *el))
            .collect()
    }

    fn query_all_within(&self, scope: ElementId, selector: &Selector) -> Vec<ElementId> {
        self.descendants(scope)
            .into_iter()
            .filter(|el| selector.matches(self, *el))
            .collect()
    }

    fn set_attribute(&mut self, el: ElementId, name: &str, value: &str) {
        let attributes = &mut self.node_mut(el).attributes;
        match attributes.iter_mut().find(|(k, _)| k == name) {
            Some((_, v)) => *v = value.to_string(),
            None => attributes.push((name.to_string(), value.to_string())),
        }
    }

    fn remove_attribute(&mut self, el: ElementId, name: &str) {
        self.node_mut(el).attributes.retain(|(k, _)| k != name);
    }

    fn text_content(&self, el: ElementId) -> String {
        let mut text = self.node(el).text.clone();
        for child in self.descendants(el) {
            text.push_str(&self.node(child).text);
        }
        text
    }

    fn set_text_content(&mut self, el: ElementId, text: &str) {
        let children = std::mem::take(&mut self.node_mut(el).children);
        for child in children {
            self.node_mut(child).parent = None;
        }
        self.node_mut(el).text = text.to_string();
    }

    fn value(&self, el: ElementId) -> Option<String> {
        if !self.is_control(el) {
            return None;
        }
        Some(
            self.node(el)
                .value
                .clone()
                .unwrap_or_else(|| self.default_value(el)),
        )
    }

    fn set_value(&mut self, el: ElementId, value: &str) {
        if self.is_control(el) {
            self.node_mut(el).value = Some(value.to_string());
        }
    }

    fn reset_form(&mut self, form: ElementId) {
        for el in self.descendants(form) {
            if self.is_control(el) {
                self.node_mut(el).value = None;
            }
        }
    }
}
