//! Scroll-position effects and in-page anchor navigation.
//!
//! Each effect is a pure function of the current scroll offset and page
//! geometry. The shell registers one scroll listener per effect and writes the
//! results straight to the DOM.

use crate::config::SiteConfig;

/// Percentage of the scrollable height already scrolled.
///
/// Unclamped: inconsistent geometry can push it past `[0, 100]`, and a page
/// no taller than the viewport yields a non-finite value.
pub fn progress_percent(scroll_y: f64, document_height: f64, viewport_height: f64) -> f64 {
    scroll_y / (document_height - viewport_height) * 100.0
}

/// Thresholds for the scroll-driven effects.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollEffects {
    pub back_to_top_after: f64,
    pub header_scrolled_after: f64,
    pub section_offset: f64,
    pub parallax_base: f64,
    pub parallax_step: f64,
}

impl Default for ScrollEffects {
    fn default() -> Self {
        Self::from_config(&SiteConfig::default())
    }
}

impl ScrollEffects {
    pub fn from_config(config: &SiteConfig) -> Self {
        Self {
            back_to_top_after: config.back_to_top_after,
            header_scrolled_after: config.header_scrolled_after,
            section_offset: config.section_offset,
            parallax_base: config.parallax_base,
            parallax_step: config.parallax_step,
        }
    }

    pub fn back_to_top_visible(&self, scroll_y: f64) -> bool {
        scroll_y > self.back_to_top_after
    }

    pub fn header_scrolled(&self, scroll_y: f64) -> bool {
        scroll_y > self.header_scrolled_after
    }

    /// Index of the last section (document order) whose top, less the
    /// section offset, has been scrolled past.
    pub fn active_section(&self, section_tops: &[f64], scroll_y: f64) -> Option<usize> {
        section_tops
            .iter()
            .rposition(|&top| scroll_y >= top - self.section_offset)
    }

    /// Vertical translation in pixels for the `index`-th parallax shape.
    pub fn parallax_offset(&self, index: usize, scroll_y: f64) -> f64 {
        let speed = self.parallax_base + index as f64 * self.parallax_step;
        -(scroll_y * speed)
    }
}

/// The single nav link pointing at `section_id`, if any.
pub fn active_link<S: AsRef<str>>(hrefs: &[Option<S>], section_id: Option<&str>) -> Option<usize> {
    let id = section_id?;
    hrefs.iter().position(|href| {
        href.as_ref()
            .and_then(|h| AsRef::<str>::as_ref(h).strip_prefix('#'))
            .is_some_and(|h| h == id)
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnchorAction<'a> {
    /// Let the browser handle the click.
    Ignore,
    /// Suppress the jump and smooth-scroll to the element matching the selector.
    ScrollTo(&'a str),
}

/// Decide what a click on a link with this `href` should do.
pub fn anchor_action(href: &str) -> AnchorAction<'_> {
    if href == "#" || !href.starts_with('#') {
        AnchorAction::Ignore
    } else {
        AnchorAction::ScrollTo(href)
    }
}

/// Document-relative scroll target for an element whose viewport-relative top
/// is `rect_top`, keeping `offset` pixels of clearance for the fixed header.
pub fn anchor_scroll_top(rect_top: f64, scroll_y: f64, offset: f64) -> f64 {
    rect_top + scroll_y - offset
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn back_to_top_threshold_is_exclusive() {
        let fx = ScrollEffects::default();
        for s in [0.0, 250.0, 499.9, 500.0] {
            assert!(!fx.back_to_top_visible(s), "{s}");
        }
        for s in [500.1, 501.0, 5000.0] {
            assert!(fx.back_to_top_visible(s), "{s}");
        }
    }

    #[test]
    fn header_toggles_past_thirty() {
        let fx = ScrollEffects::default();
        assert!(!fx.header_scrolled(30.0));
        assert!(fx.header_scrolled(31.0));
    }

    #[test]
    fn progress_is_monotonic_for_fixed_geometry() {
        let mut last = f64::NEG_INFINITY;
        for step in 0..=40 {
            let p = progress_percent(step as f64 * 50.0, 3000.0, 1000.0);
            assert!(p >= last);
            last = p;
        }
        assert_eq!(progress_percent(2000.0, 3000.0, 1000.0), 100.0);
    }

    #[test]
    fn progress_on_short_page_is_not_finite() {
        assert!(!progress_percent(0.0, 800.0, 800.0).is_finite());
        assert!(!progress_percent(10.0, 800.0, 800.0).is_finite());
    }

    #[test]
    fn active_section_is_last_passed() {
        let fx = ScrollEffects::default();
        let tops = [0.0, 800.0, 1600.0];
        assert_eq!(fx.active_section(&tops, 0.0), Some(0));
        assert_eq!(fx.active_section(&tops, 599.0), Some(0));
        assert_eq!(fx.active_section(&tops, 600.0), Some(1));
        assert_eq!(fx.active_section(&tops, 5000.0), Some(2));
        assert_eq!(fx.active_section(&[900.0], 100.0), None);
        assert_eq!(fx.active_section(&[], 100.0), None);
    }

    #[test]
    fn at_most_one_link_is_active() {
        let hrefs = [Some("#hero"), Some("#about"), None, Some("#about"), Some("/blog")];
        assert_eq!(active_link(&hrefs, Some("about")), Some(1));
        assert_eq!(active_link(&hrefs, Some("pricing")), None);
        assert_eq!(active_link(&hrefs, None), None);
    }

    #[test]
    fn parallax_speeds_up_per_shape() {
        let fx = ScrollEffects::default();
        assert!((fx.parallax_offset(0, 100.0) + 10.0).abs() < 1e-9);
        assert!((fx.parallax_offset(2, 100.0) + 20.0).abs() < 1e-9);
        assert_eq!(fx.parallax_offset(3, 0.0), 0.0);
    }

    #[test]
    fn bare_hash_links_are_ignored() {
        assert_eq!(anchor_action("#"), AnchorAction::Ignore);
        assert_eq!(anchor_action("/about"), AnchorAction::Ignore);
        assert_eq!(anchor_action("#contact"), AnchorAction::ScrollTo("#contact"));
    }

    #[test]
    fn anchor_target_leaves_header_clearance() {
        assert_eq!(anchor_scroll_top(400.0, 1000.0, 80.0), 1320.0);
        assert_eq!(anchor_scroll_top(-200.0, 1000.0, 80.0), 720.0);
    }
}
