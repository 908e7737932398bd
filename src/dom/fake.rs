use std::cell::{Cell, RefCell};
use std::collections::{BTreeSet, HashMap};

use super::{Dom, ScrollMode};

#[derive(Debug, Default, Clone)]
pub struct FakeNode {
    pub id: Option<String>,
    pub classes: BTreeSet<String>,
    pub styles: HashMap<String, String>,
    pub attrs: HashMap<String, String>,
    pub text: String,
    pub value: String,
    pub checked: bool,
    pub disabled: bool,
    pub top: f64,
    pub in_view: bool,
    pub resets: usize,
}

/// In-memory page used by the component tests. Nodes are indexes.
#[derive(Default)]
pub struct FakeDom {
    nodes: RefCell<Vec<FakeNode>>,
    pub header: Cell<Option<f64>>,
    pub scroll_locked: Cell<bool>,
    pub scrolls: RefCell<Vec<(f64, ScrollMode)>>,
    pub focused: Cell<Option<usize>>,
    /// Viewport height. When set, `in_viewport` is computed from `top` and
    /// the last scroll position instead of the node's `in_view` flag.
    pub viewport: Cell<Option<f64>>,
}

impl FakeDom {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn node(&self) -> usize {
        let mut nodes = self.nodes.borrow_mut();
        nodes.push(FakeNode::default());
        nodes.len() - 1
    }

    pub fn node_with_id(&self, id: &str) -> usize {
        let node = self.node();
        self.edit(node, |n| n.id = Some(id.to_string()));
        node
    }

    pub fn node_with_classes(&self, classes: &[&str]) -> usize {
        let node = self.node();
        for class in classes {
            self.add_class(&node, class);
        }
        node
    }

    pub fn edit(&self, node: usize, f: impl FnOnce(&mut FakeNode)) {
        f(&mut self.nodes.borrow_mut()[node]);
    }

    pub fn get(&self, node: usize) -> FakeNode {
        self.nodes.borrow()[node].clone()
    }

    pub fn style(&self, node: usize, property: &str) -> Option<String> {
        self.get(node).styles.get(property).cloned()
    }
}

impl Dom for FakeDom {
    type Node = usize;

    fn add_class(&self, node: &usize, class: &str) {
        self.edit(*node, |n| {
            n.classes.insert(class.to_string());
        });
    }

    fn remove_class(&self, node: &usize, class: &str) {
        self.edit(*node, |n| {
            n.classes.remove(class);
        });
    }

    fn has_class(&self, node: &usize, class: &str) -> bool {
        self.nodes.borrow()[*node].classes.contains(class)
    }

    fn set_style(&self, node: &usize, property: &str, value: &str) {
        self.edit(*node, |n| {
            n.styles.insert(property.to_string(), value.to_string());
        });
    }

    fn text(&self, node: &usize) -> String {
        self.get(*node).text
    }

    fn set_text(&self, node: &usize, text: &str) {
        self.edit(*node, |n| n.text = text.to_string());
    }

    fn attribute(&self, node: &usize, name: &str) -> Option<String> {
        self.get(*node).attrs.get(name).cloned()
    }

    fn value(&self, node: &usize) -> String {
        self.get(*node).value
    }

    fn set_value(&self, node: &usize, value: &str) {
        self.edit(*node, |n| n.value = value.to_string());
    }

    fn is_checked(&self, node: &usize) -> bool {
        self.get(*node).checked
    }

    fn set_checked(&self, node: &usize, checked: bool) {
        self.edit(*node, |n| n.checked = checked);
    }

    fn is_disabled(&self, node: &usize) -> bool {
        self.get(*node).disabled
    }

    fn set_disabled(&self, node: &usize, disabled: bool) {
        self.edit(*node, |n| n.disabled = disabled);
    }

    fn focus(&self, node: &usize) {
        self.focused.set(Some(*node));
    }

    fn reset_form(&self, form: &usize) {
        self.edit(*form, |n| n.resets += 1);
    }

    fn in_viewport(&self, node: &usize) -> bool {
        let node = self.get(*node);
        match self.viewport.get() {
            Some(height) => {
                let scroll_y = self.scrolls.borrow().last().map_or(0.0, |(top, _)| *top);
                node.top >= scroll_y && node.top < scroll_y + height
            }
            None => node.in_view,
        }
    }

    fn page_top(&self, node: &usize) -> f64 {
        self.get(*node).top
    }

    fn header_height(&self) -> Option<f64> {
        self.header.get()
    }

    fn scroll_to(&self, top: f64, mode: ScrollMode) {
        self.scrolls.borrow_mut().push((top, mode));
    }

    fn set_scroll_locked(&self, locked: bool) {
        self.scroll_locked.set(locked);
    }

    fn element_by_id(&self, id: &str) -> Option<usize> {
        self.nodes
            .borrow()
            .iter()
            .position(|n| n.id.as_deref() == Some(id))
    }
}
