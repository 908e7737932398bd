//! Browser wiring: finds the page's elements, builds the [`Site`] and hooks
//! its actions up to DOM events, timers and the intersection observer.

use std::rc::Rc;

use gloo_timers::callback::{Interval, Timeout};
use log::{debug, error, info, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{
    Element, Event, EventTarget, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, KeyboardEvent,
};

use crate::components::contact_form::{ContactForm, ContactFormHandles, HttpTransport};
use crate::components::event_filter::{EventFilter, Tagged};
use crate::components::hero_slideshow::HeroSlideshow;
use crate::components::menu::MobileMenu;
use crate::components::scroll_reveal::{ScrollReveal, Sighting};
use crate::components::view_toggle::ViewToggle;
use crate::config::{ids, selectors, CATEGORY_ATTR, REVEAL_THRESHOLD, SLIDE_INTERVAL_MS};
use crate::dom::{Dom, WebDom};
use crate::error::MountError;
use crate::site::{Deferred, Site, SiteParts};

type WebSite = Site<WebDom>;

/// Elements that only trigger actions; the site itself never writes to them.
struct Triggers {
    menu_button: Option<Element>,
    menu_close: Option<Element>,
    menu_panel: Option<Element>,
    menu_links: Vec<Element>,
    anchors: Vec<Element>,
    filter_controls: Vec<Tagged<Element>>,
    contact_form: Option<Element>,
}

pub fn start() -> Result<(), MountError> {
    let dom = WebDom::new()?;
    if dom.document().ready_state() != "loading" {
        return mount(dom);
    }
    let document = dom.document().clone();
    listen(&document, "DOMContentLoaded", move |_| {
        if let Err(e) = mount(dom.clone()) {
            error!("Failed to mount site behaviors: {}", e);
        }
    })
}

fn mount(dom: WebDom) -> Result<(), MountError> {
    let (triggers, parts) = discover(&dom);
    let site = Rc::new(Site::new(dom, parts));

    bind_menu(&site, &triggers)?;
    bind_anchors(&site, &triggers)?;
    bind_filters(&site, &triggers)?;
    bind_reveal(&site);
    bind_slideshow(&site);
    bind_contact_form(&site, &triggers)?;

    info!("Site behaviors mounted");
    Ok(())
}

fn listen(
    target: &EventTarget,
    event: &'static str,
    handler: impl FnMut(Event) + 'static,
) -> Result<(), MountError> {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target
        .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        .map_err(|e| MountError::Listener {
            event,
            reason: format!("{:?}", e),
        })?;
    closure.forget();
    Ok(())
}

fn schedule(site: &Rc<WebSite>, deferred: Vec<Deferred<Element>>) {
    for d in deferred {
        let site = Rc::clone(site);
        let after_ms = d.after_ms();
        Timeout::new(after_ms, move || site.fire(d)).forget();
    }
}

fn discover(dom: &WebDom) -> (Triggers, SiteParts<Element>) {
    let menu_panel = dom.element_by_id(ids::MENU_PANEL);
    let menu_content = menu_panel
        .as_ref()
        .and_then(|panel| dom.query(Some(panel), selectors::MENU_CONTENT));
    let menu = match (menu_panel.clone(), menu_content) {
        (Some(panel), Some(content)) => Some(MobileMenu::new(panel, content)),
        _ => {
            debug!("Mobile menu not found");
            None
        }
    };
    let menu_links = menu_panel
        .as_ref()
        .map(|panel| dom.query_all(Some(panel), selectors::MENU_LINKS))
        .unwrap_or_default();

    let views = match (
        dom.element_by_id(ids::MAIN_VIEW),
        dom.element_by_id(ids::EVENTS_VIEW),
    ) {
        (Some(main), Some(events)) => Some(ViewToggle::new(main, events)),
        _ => {
            debug!("View containers not found, view toggle disabled");
            None
        }
    };

    let tagged = |selector: &str| -> Vec<Tagged<Element>> {
        dom.query_all(None, selector)
            .into_iter()
            .filter_map(|el| {
                let category = dom.attribute(&el, CATEGORY_ATTR)?;
                Some(Tagged::new(el, category.trim()))
            })
            .collect()
    };
    let filter_controls = tagged(selectors::FILTER_CONTROLS);
    let cards = tagged(selectors::EVENT_CARDS);
    let mut reveal_targets = dom.query_all(None, selectors::REVEAL);
    for card in &cards {
        if !reveal_targets.contains(&card.node) {
            reveal_targets.push(card.node.clone());
        }
    }
    let filter = (!cards.is_empty()).then(|| EventFilter::new(filter_controls.clone(), cards));

    let slides = dom
        .element_by_id(ids::HERO_SLIDES)
        .map(|container| dom.query_all(Some(&container), selectors::HERO_SLIDE))
        .unwrap_or_default();

    let contact_form = dom.element_by_id(ids::CONTACT_FORM);
    let contact = contact_form
        .as_ref()
        .and_then(|form| contact_handles(dom, form))
        .map(ContactForm::new);

    let triggers = Triggers {
        menu_button: dom.element_by_id(ids::MENU_BUTTON),
        menu_close: dom.element_by_id(ids::MENU_CLOSE),
        menu_panel,
        menu_links,
        anchors: dom.query_all(None, selectors::FRAGMENT_LINKS),
        filter_controls,
        contact_form,
    };
    let parts = SiteParts {
        menu,
        views,
        filter,
        reveal: ScrollReveal::new(reveal_targets),
        slideshow: HeroSlideshow::new(slides),
        contact,
    };
    (triggers, parts)
}

fn contact_handles(dom: &WebDom, form: &Element) -> Option<ContactFormHandles<Element>> {
    let required = |id: &str| {
        let el = dom.element_by_id(id);
        if el.is_none() {
            warn!("Contact form field #{} missing", id);
        }
        el
    };
    let agree = required(ids::AGREE)?;
    Some(ContactFormHandles {
        form: form.clone(),
        name: required(ids::NAME)?,
        email: required(ids::EMAIL)?,
        phone: dom.element_by_id(ids::PHONE),
        message: required(ids::MESSAGE)?,
        agree_label: agree.next_element_sibling(),
        agree,
        submit: dom.query(Some(form), selectors::SUBMIT)?,
        status: dom.element_by_id(ids::FORM_STATUS),
    })
}

fn bind_menu(site: &Rc<WebSite>, triggers: &Triggers) -> Result<(), MountError> {
    if let Some(button) = &triggers.menu_button {
        let site = site.clone();
        listen(button, "click", move |_| schedule(&site, site.open_menu()))?;
    }
    if let Some(button) = &triggers.menu_close {
        let site = site.clone();
        listen(button, "click", move |_| schedule(&site, site.close_menu()))?;
    }
    if let Some(panel) = &triggers.menu_panel {
        let site = site.clone();
        listen(panel, "click", move |e: Event| {
            let on_overlay = e
                .target()
                .and_then(|target| target.dyn_into::<Element>().ok())
                .is_some_and(|target| site.is_menu_panel(&target));
            if on_overlay {
                schedule(&site, site.close_menu());
            }
        })?;
    }
    for link in &triggers.menu_links {
        let site = site.clone();
        listen(link, "click", move |_| schedule(&site, site.close_menu()))?;
    }

    let document = site.dom().document().clone();
    let site = site.clone();
    listen(&document, "keydown", move |e: Event| {
        if let Some(e) = e.dyn_ref::<KeyboardEvent>() {
            if e.key() == "Escape" {
                schedule(&site, site.on_escape());
            }
        }
    })
}

fn bind_anchors(site: &Rc<WebSite>, triggers: &Triggers) -> Result<(), MountError> {
    for anchor in &triggers.anchors {
        let site = site.clone();
        let link = anchor.clone();
        listen(anchor, "click", move |e: Event| {
            let Some(href) = site.dom().attribute(&link, "href") else {
                return;
            };
            if let Some(deferred) = site.on_anchor(&href) {
                e.prevent_default();
                schedule(&site, deferred);
            }
        })?;
    }
    Ok(())
}

fn bind_filters(site: &Rc<WebSite>, triggers: &Triggers) -> Result<(), MountError> {
    for control in &triggers.filter_controls {
        let site = site.clone();
        let category = control.category.clone();
        listen(&control.node, "click", move |e: Event| {
            e.prevent_default();
            site.select_filter(&category);
        })?;
    }
    Ok(())
}

fn bind_reveal(site: &Rc<WebSite>) {
    let supported = js_sys::Reflect::has(
        site.dom().window(),
        &JsValue::from_str("IntersectionObserver"),
    )
    .unwrap_or(false);
    site.install_reveal(supported);
    if !supported || site.reveal_targets().is_empty() {
        return;
    }

    let handler_site = site.clone();
    let callback = Closure::<dyn FnMut(js_sys::Array, IntersectionObserver)>::new(
        move |entries: js_sys::Array, _observer: IntersectionObserver| {
            let sightings = entries
                .iter()
                .filter_map(|entry| entry.dyn_into::<IntersectionObserverEntry>().ok())
                .map(|entry| Sighting {
                    node: entry.target(),
                    intersecting: entry.is_intersecting(),
                    ratio: entry.intersection_ratio(),
                });
            // Targets stay observed: the filter can clear a card's reveal.
            handler_site.on_sightings(sightings);
        },
    );

    let options = IntersectionObserverInit::new();
    options.set_threshold(&JsValue::from_f64(REVEAL_THRESHOLD));
    let observer =
        match IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &options) {
            Ok(observer) => observer,
            Err(e) => {
                warn!("IntersectionObserver rejected: {:?}", e);
                site.install_reveal(false);
                return;
            }
        };
    callback.forget();
    for node in site.reveal_targets() {
        observer.observe(node);
    }
}

fn bind_slideshow(site: &Rc<WebSite>) {
    if !site.start_slideshow() {
        return;
    }
    let site = site.clone();
    Interval::new(SLIDE_INTERVAL_MS, move || site.advance_slideshow()).forget();
}

fn bind_contact_form(site: &Rc<WebSite>, triggers: &Triggers) -> Result<(), MountError> {
    let Some(form) = &triggers.contact_form else {
        debug!("No contact form on this page");
        return Ok(());
    };
    if !site.has_contact_form() {
        warn!("Contact form incomplete, submissions disabled");
    }
    let site = site.clone();
    let transport = Rc::new(HttpTransport::new());
    listen(form, "submit", move |e: Event| {
        e.prevent_default();
        let site = site.clone();
        let transport = transport.clone();
        wasm_bindgen_futures::spawn_local(async move {
            if let Some(outcome) = site.submit_contact(&*transport).await {
                debug!("Contact form outcome: {:?}", outcome);
            }
        });
    })
}
