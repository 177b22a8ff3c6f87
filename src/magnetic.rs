//! Pointer-following offset for magnetic buttons.

/// Axis-aligned box in viewport coordinates, as reported by
/// `getBoundingClientRect`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn center(&self) -> (f64, f64) {
        (self.left + self.width / 2.0, self.top + self.height / 2.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    /// Mouse-like, matches `(pointer: fine)`.
    Fine,
    Coarse,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Magnet {
    strength: f64,
}

impl Magnet {
    /// `None` on coarse pointers: touch devices get no magnetism.
    pub fn for_pointer(kind: PointerKind, strength: f64) -> Option<Self> {
        match kind {
            PointerKind::Fine => Some(Self { strength }),
            PointerKind::Coarse => None,
        }
    }

    /// Translation pulling `rect` toward the pointer at `(x, y)`.
    pub fn offset(&self, rect: &Rect, x: f64, y: f64) -> (f64, f64) {
        let (cx, cy) = rect.center();
        ((x - cx) * self.strength, (y - cy) * self.strength)
    }

    /// Offset once the pointer leaves.
    pub fn rest(&self) -> (f64, f64) {
        (0.0, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RECT: Rect = Rect {
        left: 100.0,
        top: 50.0,
        width: 200.0,
        height: 60.0,
    };

    #[test]
    fn coarse_pointers_disable_the_effect() {
        assert!(Magnet::for_pointer(PointerKind::Coarse, 0.4).is_none());
        assert!(Magnet::for_pointer(PointerKind::Fine, 0.4).is_some());
    }

    #[test]
    fn pulls_forty_percent_toward_pointer() {
        let m = Magnet::for_pointer(PointerKind::Fine, 0.4).unwrap();
        assert_eq!(m.offset(&RECT, 200.0, 80.0), (0.0, 0.0));
        let (x, y) = m.offset(&RECT, 300.0, 50.0);
        assert!((x - 40.0).abs() < 1e-9);
        assert!((y + 12.0).abs() < 1e-9);
        assert_eq!(m.rest(), (0.0, 0.0));
    }
}
