//! Owns every page component and performs the actions that span more than
//! one of them. Timer-driven steps come back as [`Deferred`] values for the
//! caller to schedule; nothing in here touches a clock.

use log::{debug, info};

use crate::components::anchors::{route_anchor, scroll_to_section, AnchorAction};
use crate::components::contact_form::{ContactForm, ContactTransport, SubmitOutcome};
use crate::components::event_filter::EventFilter;
use crate::components::hero_slideshow::HeroSlideshow;
use crate::components::menu::{MenuTimer, MobileMenu};
use crate::components::scroll_reveal::{reveal, ScrollReveal, Sighting};
use crate::components::view_toggle::{View, ViewToggle};
use crate::config::{ALL_CATEGORY, REVEAL_AFTER_SCROLL_MS};
use crate::dom::{Dom, ScrollMode};

#[derive(Debug, Clone, PartialEq)]
pub enum Deferred<N> {
    Menu(MenuTimer),
    Reveal { node: N, after_ms: u32 },
}

impl<N> Deferred<N> {
    pub fn after_ms(&self) -> u32 {
        match self {
            Deferred::Menu(timer) => timer.after_ms,
            Deferred::Reveal { after_ms, .. } => *after_ms,
        }
    }
}

/// Components found on the page. Anything missing from the markup is `None`
/// and its behavior is simply absent.
pub struct SiteParts<N> {
    pub menu: Option<MobileMenu<N>>,
    pub views: Option<ViewToggle<N>>,
    pub filter: Option<EventFilter<N>>,
    pub reveal: ScrollReveal<N>,
    pub slideshow: Option<HeroSlideshow<N>>,
    pub contact: Option<ContactForm<N>>,
}

impl<N: Clone + PartialEq> Default for SiteParts<N> {
    fn default() -> Self {
        Self {
            menu: None,
            views: None,
            filter: None,
            reveal: ScrollReveal::new(Vec::new()),
            slideshow: None,
            contact: None,
        }
    }
}

pub struct Site<D: Dom> {
    dom: D,
    parts: SiteParts<D::Node>,
}

impl<D: Dom> Site<D> {
    pub fn new(dom: D, parts: SiteParts<D::Node>) -> Self {
        Self { dom, parts }
    }

    pub fn dom(&self) -> &D {
        &self.dom
    }

    pub fn view(&self) -> View {
        self.parts
            .views
            .as_ref()
            .map(|views| views.current())
            .unwrap_or(View::Main)
    }

    pub fn is_menu_panel(&self, node: &D::Node) -> bool {
        self.parts
            .menu
            .as_ref()
            .is_some_and(|menu| menu.panel() == node)
    }

    pub fn menu_open(&self) -> bool {
        self.parts.menu.as_ref().is_some_and(|menu| menu.is_open())
    }

    pub fn open_menu(&self) -> Vec<Deferred<D::Node>> {
        self.parts
            .menu
            .as_ref()
            .and_then(|menu| menu.open(&self.dom))
            .map(Deferred::Menu)
            .into_iter()
            .collect()
    }

    pub fn close_menu(&self) -> Vec<Deferred<D::Node>> {
        self.parts
            .menu
            .as_ref()
            .and_then(|menu| menu.close(&self.dom))
            .map(Deferred::Menu)
            .into_iter()
            .collect()
    }

    pub fn on_escape(&self) -> Vec<Deferred<D::Node>> {
        if !self.menu_open() {
            return Vec::new();
        }
        self.close_menu()
    }

    /// Handles a click on an in-page link. `None` means the click was not
    /// ours and the browser's default should run.
    pub fn on_anchor(&self, href: &str) -> Option<Vec<Deferred<D::Node>>> {
        let has_views = self.parts.views.is_some();
        match route_anchor(href, self.view()) {
            AnchorAction::Ignore => None,
            AnchorAction::ShowEvents if has_views => Some(self.show_events()),
            AnchorAction::ShowMain(id) if has_views => Some(self.show_main(Some(&id))),
            AnchorAction::ShowEvents => None,
            AnchorAction::ShowMain(id) | AnchorAction::Scroll(id) => {
                scroll_to_section(&self.dom, &id).map(|_| Vec::new())
            }
        }
    }

    pub fn show_events(&self) -> Vec<Deferred<D::Node>> {
        let deferred = self.close_menu();
        let Some(views) = &self.parts.views else {
            return deferred;
        };
        info!("Showing all events");
        views.render(&self.dom, View::AllEvents);
        // Scroll first so the filter's viewport checks see the final position.
        self.dom.scroll_to(0.0, ScrollMode::Instant);
        self.select_filter(ALL_CATEGORY);
        deferred
    }

    pub fn show_main(&self, target: Option<&str>) -> Vec<Deferred<D::Node>> {
        let mut deferred = self.close_menu();
        let Some(views) = &self.parts.views else {
            return deferred;
        };
        info!("Showing main view");
        views.render(&self.dom, View::Main);
        if let Some(node) = target.and_then(|id| scroll_to_section(&self.dom, id)) {
            deferred.push(Deferred::Reveal {
                node,
                after_ms: REVEAL_AFTER_SCROLL_MS,
            });
        }
        deferred
    }

    pub fn select_filter(&self, category: &str) {
        if let Some(filter) = &self.parts.filter {
            filter.select(&self.dom, category);
        }
    }

    pub fn fire(&self, deferred: Deferred<D::Node>) {
        match deferred {
            Deferred::Menu(timer) => {
                if let Some(menu) = &self.parts.menu {
                    menu.on_timer(&self.dom, timer.ticket);
                }
            }
            Deferred::Reveal { node, .. } => reveal(&self.dom, &node),
        }
    }

    pub fn reveal_targets(&self) -> &[D::Node] {
        self.parts.reveal.nodes()
    }

    pub fn install_reveal(&self, observer_supported: bool) {
        self.parts.reveal.install(&self.dom, observer_supported);
    }

    pub fn on_sightings(
        &self,
        sightings: impl IntoIterator<Item = Sighting<D::Node>>,
    ) {
        let revealed = self.parts.reveal.on_sightings(&self.dom, sightings);
        if revealed > 0 {
            debug!("Revealed {} elements", revealed);
        }
    }

    /// Shows the first slide. Returns false when there is nothing to cycle,
    /// in which case no timer should be started.
    pub fn start_slideshow(&self) -> bool {
        match &self.parts.slideshow {
            Some(slideshow) => {
                slideshow.show_first(&self.dom);
                true
            }
            None => {
                debug!("No hero slides, slideshow disabled");
                false
            }
        }
    }

    pub fn advance_slideshow(&self) {
        if let Some(slideshow) = &self.parts.slideshow {
            slideshow.advance(&self.dom);
        }
    }

    pub fn has_contact_form(&self) -> bool {
        self.parts.contact.is_some()
    }

    pub async fn submit_contact<T: ContactTransport>(&self, transport: &T) -> Option<SubmitOutcome> {
        let form = self.parts.contact.as_ref()?;
        Some(form.submit(&self.dom, transport).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::event_filter::Tagged;
    use crate::config::classes;
    use crate::dom::fake::FakeDom;

    struct Nodes {
        panel: usize,
        content: usize,
        main: usize,
        events: usize,
        all_control: usize,
        music_control: usize,
        music_card: usize,
        food_card: usize,
        about: usize,
    }

    fn site() -> (Site<FakeDom>, Nodes) {
        let dom = FakeDom::new();
        let n = Nodes {
            panel: dom.node_with_classes(&[classes::HIDDEN]),
            content: dom.node_with_classes(&[classes::SLID_OUT]),
            main: dom.node(),
            events: dom.node_with_classes(&[classes::HIDDEN]),
            all_control: dom.node(),
            music_control: dom.node(),
            music_card: dom.node(),
            food_card: dom.node(),
            about: dom.node_with_id("about"),
        };
        dom.edit(n.about, |node| node.top = 900.0);
        dom.header.set(Some(60.0));

        let parts = SiteParts {
            menu: Some(MobileMenu::new(n.panel, n.content)),
            views: Some(ViewToggle::new(n.main, n.events)),
            filter: Some(EventFilter::new(
                vec![
                    Tagged::new(n.all_control, "all"),
                    Tagged::new(n.music_control, "music"),
                ],
                vec![Tagged::new(n.music_card, "music"), Tagged::new(n.food_card, "food")],
            )),
            reveal: ScrollReveal::new(vec![n.music_card, n.food_card]),
            ..SiteParts::default()
        };
        (Site::new(dom, parts), n)
    }

    fn fire_all(site: &Site<FakeDom>, deferred: Vec<Deferred<usize>>) {
        for d in deferred {
            site.fire(d);
        }
    }

    #[test]
    fn test_show_events_resets_filter_and_closes_menu() {
        let (site, n) = site();
        let dom = site.dom();
        fire_all(&site, site.open_menu());
        assert!(site.menu_open());
        site.select_filter("music");
        assert!(dom.has_class(&n.food_card, classes::HIDDEN));
        dom.edit(n.food_card, |node| node.in_view = true);

        let deferred = site.show_events();

        assert!(!site.menu_open());
        assert_eq!(site.view(), View::AllEvents);
        assert!(dom.has_class(&n.main, classes::HIDDEN));
        assert!(!dom.has_class(&n.events, classes::HIDDEN));
        assert!(dom.has_class(&n.all_control, classes::ACTIVE));
        assert!(!dom.has_class(&n.music_control, classes::ACTIVE));
        assert!(!dom.has_class(&n.food_card, classes::HIDDEN));
        assert!(dom.has_class(&n.food_card, classes::REVEALED));
        assert!(!dom.has_class(&n.music_card, classes::REVEALED));
        assert_eq!(dom.scrolls.borrow().last(), Some(&(0.0, ScrollMode::Instant)));

        fire_all(&site, deferred);
        assert!(dom.has_class(&n.panel, classes::HIDDEN));
        assert!(!dom.scroll_locked.get());
    }

    #[test]
    fn test_show_events_checks_viewport_after_scrolling_to_top() {
        let (site, n) = site();
        let dom = site.dom();
        dom.viewport.set(Some(800.0));
        dom.edit(n.music_card, |node| node.top = 2100.0);
        dom.edit(n.food_card, |node| node.top = 200.0);
        dom.scroll_to(2000.0, ScrollMode::Smooth);

        site.show_events();

        // Only the card on screen at the top of the page is revealed.
        assert!(dom.has_class(&n.food_card, classes::REVEALED));
        assert!(!dom.has_class(&n.music_card, classes::REVEALED));
    }

    #[test]
    fn test_card_reshown_offscreen_is_revealed_by_later_sighting() {
        let (site, n) = site();
        let dom = site.dom();
        let seen = |node| Sighting { node, intersecting: true, ratio: 0.5 };
        site.install_reveal(true);

        site.on_sightings(vec![seen(n.music_card)]);
        assert!(dom.has_class(&n.music_card, classes::REVEALED));

        site.select_filter("food");
        assert!(dom.has_class(&n.music_card, classes::HIDDEN));
        assert!(!dom.has_class(&n.music_card, classes::REVEALED));

        // Shown again while off-screen: nothing reveals it yet.
        site.select_filter("all");
        assert!(!dom.has_class(&n.music_card, classes::HIDDEN));
        assert!(!dom.has_class(&n.music_card, classes::REVEALED));
        assert!(site.reveal_targets().contains(&n.music_card));

        // Scrolled into view later, the observer still reports it.
        site.on_sightings(vec![seen(n.music_card)]);
        assert!(dom.has_class(&n.music_card, classes::REVEALED));
    }

    #[test]
    fn test_show_main_scrolls_to_target_and_defers_reveal() {
        let (site, n) = site();
        site.show_events();

        let deferred = site.show_main(Some("about"));

        assert_eq!(site.view(), View::Main);
        assert_eq!(
            deferred,
            vec![Deferred::Reveal { node: n.about, after_ms: REVEAL_AFTER_SCROLL_MS }]
        );
        assert_eq!(site.dom().scrolls.borrow().last(), Some(&(840.0, ScrollMode::Smooth)));
        assert!(!site.dom().has_class(&n.about, classes::REVEALED));
        fire_all(&site, deferred);
        assert!(site.dom().has_class(&n.about, classes::REVEALED));
    }

    #[test]
    fn test_show_main_without_target_only_swaps() {
        let (site, n) = site();
        site.show_events();
        let scrolls = site.dom().scrolls.borrow().len();
        assert!(site.show_main(None).is_empty());
        assert!(!site.dom().has_class(&n.main, classes::HIDDEN));
        assert_eq!(site.dom().scrolls.borrow().len(), scrolls);
    }

    #[test]
    fn test_anchor_routing() {
        let (site, _) = site();
        assert_eq!(site.on_anchor("#"), None);
        assert_eq!(site.on_anchor("#missing"), None);
        assert_eq!(site.on_anchor("#about"), Some(Vec::new()));
        assert_eq!(site.view(), View::Main);

        assert!(site.on_anchor("#all-events").is_some());
        assert_eq!(site.view(), View::AllEvents);

        assert!(site.on_anchor("#about").is_some());
        assert_eq!(site.view(), View::Main);
    }

    #[test]
    fn test_anchor_without_views_falls_back_to_scroll() {
        let dom = FakeDom::new();
        dom.node_with_id("contact");
        let site = Site::new(dom, SiteParts::default());
        assert_eq!(site.on_anchor("#all-events"), None);
        assert_eq!(site.on_anchor("#contact"), Some(Vec::new()));
    }

    #[test]
    fn test_escape_only_closes_open_menu() {
        let (site, n) = site();
        assert!(site.on_escape().is_empty());
        fire_all(&site, site.open_menu());
        let deferred = site.on_escape();
        assert_eq!(deferred.len(), 1);
        fire_all(&site, deferred);
        assert!(site.dom().has_class(&n.panel, classes::HIDDEN));
    }

    #[test]
    fn test_overlay_detection() {
        let (site, n) = site();
        assert!(site.is_menu_panel(&n.panel));
        assert!(!site.is_menu_panel(&n.content));
    }

    #[test]
    fn test_empty_page_does_nothing() {
        let site = Site::new(FakeDom::new(), SiteParts::default());
        assert!(!site.start_slideshow());
        site.advance_slideshow();
        assert!(site.open_menu().is_empty());
        assert!(site.show_events().is_empty());
        assert!(!site.has_contact_form());
    }
}
