use std::cell::Cell;

use crate::config::classes;
use crate::dom::Dom;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Main,
    AllEvents,
}

/// The two full-page containers. Exactly one of them is shown.
pub struct ViewToggle<N> {
    main: N,
    events: N,
    current: Cell<View>,
}

impl<N: Clone + PartialEq> ViewToggle<N> {
    pub fn new(main: N, events: N) -> Self {
        Self {
            main,
            events,
            current: Cell::new(View::Main),
        }
    }

    pub fn current(&self) -> View {
        self.current.get()
    }

    /// Writes both containers so the page matches `view` whatever state the
    /// markup started in.
    pub fn render<D: Dom<Node = N>>(&self, dom: &D, view: View) {
        let (shown, hidden) = match view {
            View::Main => (&self.main, &self.events),
            View::AllEvents => (&self.events, &self.main),
        };
        dom.add_class(hidden, classes::HIDDEN);
        dom.remove_class(shown, classes::HIDDEN);
        self.current.set(view);
    }
}
