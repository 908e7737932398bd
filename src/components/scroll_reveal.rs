use log::{debug, info};

use crate::config::{classes, REVEAL_THRESHOLD};
use crate::dom::Dom;

/// One intersection report from the observer.
#[derive(Debug, Clone)]
pub struct Sighting<N> {
    pub node: N,
    pub intersecting: bool,
    pub ratio: f64,
}

/// Elements tagged for scroll-reveal. Revealing is one-way: scrolling an
/// element back out of view does not hide it again.
pub struct ScrollReveal<N> {
    nodes: Vec<N>,
}

impl<N: Clone + PartialEq> ScrollReveal<N> {
    pub fn new(nodes: Vec<N>) -> Self {
        Self { nodes }
    }

    pub fn nodes(&self) -> &[N] {
        &self.nodes
    }

    /// Without observer support everything is shown up front, otherwise the
    /// content would stay invisible forever.
    pub fn install<D: Dom<Node = N>>(&self, dom: &D, observer_supported: bool) {
        if observer_supported {
            debug!("Observing {} reveal elements", self.nodes.len());
            return;
        }
        info!("IntersectionObserver unavailable, revealing all elements");
        for node in &self.nodes {
            reveal(dom, node);
        }
    }

    /// Reveals the sighted elements and returns how many were newly revealed.
    /// Elements are never unobserved, since a filtered card can lose its
    /// reveal and has to be caught again on its next sighting.
    pub fn on_sightings<D: Dom<Node = N>>(
        &self,
        dom: &D,
        sightings: impl IntoIterator<Item = Sighting<N>>,
    ) -> usize {
        sightings
            .into_iter()
            .filter(|s| s.intersecting && s.ratio >= REVEAL_THRESHOLD)
            .filter(|s| !dom.has_class(&s.node, classes::REVEALED))
            .map(|s| reveal(dom, &s.node))
            .count()
    }
}

pub fn reveal<D: Dom>(dom: &D, node: &D::Node) {
    dom.add_class(node, classes::REVEALED);
}

/// Already revealed nodes are skipped so the geometry query is not repeated.
pub fn reveal_if_in_view<D: Dom>(dom: &D, node: &D::Node) {
    if !dom.has_class(node, classes::REVEALED) && dom.in_viewport(node) {
        reveal(dom, node);
    }
}
