use log::debug;

use crate::components::scroll_reveal::reveal_if_in_view;
use crate::config::{classes, ALL_CATEGORY};
use crate::dom::Dom;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter(String);

impl Filter {
    pub fn new(category: impl Into<String>) -> Self {
        Self(category.into())
    }

    pub fn category(&self) -> &str {
        &self.0
    }

    pub fn shows(&self, category: &str) -> bool {
        self.0 == ALL_CATEGORY || self.0 == category
    }
}

/// A node tagged with the category it belongs to.
#[derive(Debug, Clone)]
pub struct Tagged<N> {
    pub node: N,
    pub category: String,
}

impl<N> Tagged<N> {
    pub fn new(node: N, category: impl Into<String>) -> Self {
        Self {
            node,
            category: category.into(),
        }
    }
}

pub struct EventFilter<N> {
    controls: Vec<Tagged<N>>,
    cards: Vec<Tagged<N>>,
}

impl<N: Clone + PartialEq> EventFilter<N> {
    pub fn new(controls: Vec<Tagged<N>>, cards: Vec<Tagged<N>>) -> Self {
        Self { controls, cards }
    }

    pub fn select<D: Dom<Node = N>>(&self, dom: &D, category: &str) {
        let filter = Filter::new(category);
        debug!("Applying event filter {}", filter.category());

        for control in &self.controls {
            if control.category == category {
                dom.add_class(&control.node, classes::ACTIVE);
            } else {
                dom.remove_class(&control.node, classes::ACTIVE);
            }
        }

        for card in &self.cards {
            if filter.shows(&card.category) {
                dom.remove_class(&card.node, classes::HIDDEN);
                // A visibility change does not reliably fire the observer.
                reveal_if_in_view(dom, &card.node);
            } else {
                dom.add_class(&card.node, classes::HIDDEN);
                dom.remove_class(&card.node, classes::REVEALED);
            }
        }
    }
}
