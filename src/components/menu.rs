//! Mobile slide-in menu.
//!
//! The open/close sequence is a small state machine. Transitions that have to
//! wait for a CSS transition hand back a [`MenuTimer`]; whoever owns the
//! timers arms it and calls [`MobileMenu::on_timer`] when it fires. Every
//! transition bumps the ticket, so a timer left over from an earlier
//! open/close never acts on the current state.

use std::cell::RefCell;

use log::debug;

use crate::config::{classes, MENU_OPEN_DELAY_MS, MENU_TRANSITION_MS};
use crate::dom::Dom;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuPhase {
    Closed,
    Opening,
    Open,
    Closing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuEffect {
    ShowPanel,
    HidePanel,
    LockScroll,
    UnlockScroll,
    SlideIn,
    SlideOut,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuTimer {
    pub after_ms: u32,
    pub ticket: u64,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct Transition {
    pub effects: Vec<MenuEffect>,
    pub timer: Option<MenuTimer>,
}

#[derive(Debug)]
pub struct MenuMachine {
    phase: MenuPhase,
    ticket: u64,
}

impl Default for MenuMachine {
    fn default() -> Self {
        Self {
            phase: MenuPhase::Closed,
            ticket: 0,
        }
    }
}

impl MenuMachine {
    pub fn phase(&self) -> MenuPhase {
        self.phase
    }

    pub fn is_open(&self) -> bool {
        matches!(self.phase(), MenuPhase::Opening | MenuPhase::Open)
    }

    fn arm(&mut self, after_ms: u32) -> Option<MenuTimer> {
        self.ticket += 1;
        Some(MenuTimer {
            after_ms,
            ticket: self.ticket,
        })
    }

    pub fn open(&mut self) -> Transition {
        if self.is_open() {
            return Transition::default();
        }
        self.phase = MenuPhase::Opening;
        Transition {
            effects: vec![MenuEffect::ShowPanel, MenuEffect::LockScroll],
            timer: self.arm(MENU_OPEN_DELAY_MS),
        }
    }

    pub fn close(&mut self) -> Transition {
        if !self.is_open() {
            return Transition::default();
        }
        self.phase = MenuPhase::Closing;
        Transition {
            effects: vec![MenuEffect::SlideOut],
            timer: self.arm(MENU_TRANSITION_MS),
        }
    }

    pub fn on_timer(&mut self, ticket: u64) -> Transition {
        if ticket != self.ticket {
            debug!("Ignoring stale menu timer {}", ticket);
            return Transition::default();
        }
        match self.phase {
            MenuPhase::Opening => {
                self.phase = MenuPhase::Open;
                Transition {
                    effects: vec![MenuEffect::SlideIn],
                    timer: None,
                }
            }
            MenuPhase::Closing => {
                self.phase = MenuPhase::Closed;
                Transition {
                    effects: vec![MenuEffect::HidePanel, MenuEffect::UnlockScroll],
                    timer: None,
                }
            }
            MenuPhase::Open | MenuPhase::Closed => Transition::default(),
        }
    }
}

/// The overlay panel plus the sliding content inside it.
pub struct MobileMenu<N> {
    panel: N,
    content: N,
    machine: RefCell<MenuMachine>,
}

impl<N: Clone + PartialEq> MobileMenu<N> {
    pub fn new(panel: N, content: N) -> Self {
        Self {
            panel,
            content,
            machine: RefCell::new(MenuMachine::default()),
        }
    }

    pub fn panel(&self) -> &N {
        &self.panel
    }

    pub fn is_open(&self) -> bool {
        self.machine.borrow().is_open()
    }

    pub fn open<D: Dom<Node = N>>(&self, dom: &D) -> Option<MenuTimer> {
        let transition = self.machine.borrow_mut().open();
        self.apply(dom, transition)
    }

    pub fn close<D: Dom<Node = N>>(&self, dom: &D) -> Option<MenuTimer> {
        let transition = self.machine.borrow_mut().close();
        self.apply(dom, transition)
    }

    pub fn on_timer<D: Dom<Node = N>>(&self, dom: &D, ticket: u64) {
        let transition = self.machine.borrow_mut().on_timer(ticket);
        self.apply(dom, transition);
    }

    fn apply<D: Dom<Node = N>>(&self, dom: &D, transition: Transition) -> Option<MenuTimer> {
        for effect in transition.effects {
            match effect {
                MenuEffect::ShowPanel => dom.remove_class(&self.panel, classes::HIDDEN),
                MenuEffect::HidePanel => dom.add_class(&self.panel, classes::HIDDEN),
                MenuEffect::LockScroll => dom.set_scroll_locked(true),
                MenuEffect::UnlockScroll => dom.set_scroll_locked(false),
                MenuEffect::SlideIn => dom.remove_class(&self.content, classes::SLID_OUT),
                MenuEffect::SlideOut => dom.add_class(&self.content, classes::SLID_OUT),
            }
        }
        transition.timer
    }
}
