//! Mobile navigation drawer state.
//!
//! The drawer is either open or closed. Every transition yields a
//! [`MenuTransition`] describing what the shell must mirror into the DOM:
//! the drawer and toggle classes, the body scroll lock, `aria-expanded`, and on
//! opening the per-item stagger delays.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MenuState {
    #[default]
    Closed,
    Open,
}

impl MenuState {
    pub fn is_open(self) -> bool {
        self == Self::Open
    }
}

/// Why the menu is being closed without a toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    LinkClicked,
    BackdropClicked,
    Escape,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MenuTransition {
    pub state: MenuState,
    /// Transition delays in seconds, one per menu item; empty unless opening.
    pub stagger: Vec<f64>,
}

#[derive(Debug, Clone)]
pub struct Menu {
    state: MenuState,
    item_count: usize,
    stagger_base: f64,
    stagger_step: f64,
}

impl Menu {
    pub fn new(item_count: usize, stagger_base: f64, stagger_step: f64) -> Self {
        Self {
            state: MenuState::Closed,
            item_count,
            stagger_base,
            stagger_step,
        }
    }

    pub fn state(&self) -> MenuState {
        self.state
    }

    /// Adopt whatever the DOM currently shows.
    pub fn sync(&mut self, open: bool) {
        self.state = if open { MenuState::Open } else { MenuState::Closed };
    }

    /// Flip the menu, or force it open/closed when `force` is given.
    pub fn toggle(&mut self, force: Option<bool>) -> MenuTransition {
        let open = force.unwrap_or(!self.state.is_open());
        self.sync(open);
        let stagger = if open {
            (0..self.item_count)
                .map(|i| self.stagger_base + i as f64 * self.stagger_step)
                .collect()
        } else {
            Vec::new()
        };
        MenuTransition {
            state: self.state,
            stagger,
        }
    }

    pub fn close(&mut self, reason: CloseReason) -> MenuTransition {
        tracing::debug!(?reason, "closing menu");
        self.toggle(Some(false))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_flips_state() {
        let mut m = Menu::new(3, 0.1, 0.08);
        assert_eq!(m.toggle(None).state, MenuState::Open);
        assert_eq!(m.toggle(None).state, MenuState::Closed);
    }

    #[test]
    fn forcing_open_twice_stays_open() {
        let mut m = Menu::new(2, 0.1, 0.08);
        m.toggle(Some(true));
        let t = m.toggle(Some(true));
        assert_eq!(t.state, MenuState::Open);
        assert!(m.state().is_open());
    }

    #[test]
    fn stagger_only_on_open() {
        let mut m = Menu::new(3, 0.1, 0.08);
        let opened = m.toggle(None);
        assert_eq!(opened.stagger.len(), 3);
        assert!((opened.stagger[0] - 0.1).abs() < 1e-9);
        assert!((opened.stagger[2] - 0.26).abs() < 1e-9);
        assert!(m.close(CloseReason::LinkClicked).stagger.is_empty());
    }

    #[test]
    fn every_close_reason_closes_from_any_state() {
        for reason in [CloseReason::LinkClicked, CloseReason::BackdropClicked, CloseReason::Escape] {
            let mut m = Menu::new(1, 0.1, 0.08);
            assert_eq!(m.close(reason).state, MenuState::Closed);
            m.toggle(None);
            assert_eq!(m.close(reason).state, MenuState::Closed);
        }
    }
}
