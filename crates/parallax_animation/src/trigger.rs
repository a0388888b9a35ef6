//! Scroll trigger geometry
//!
//! A trigger region is described relative to a reference element: each edge pairs a
//! point on the element with a point on the viewport, and the edge is reached when
//! the two line up. `"top top"` is reached when the element's top meets the
//! viewport's top; `"bottom top"` when the element's bottom does.

use crate::tween::clamp_progress;
use parallax_core::{ConfigError, Rect, Result, Size};
use std::str::FromStr;

/// Supplies the reference element's position and the viewport size
pub trait TriggerLayout {
    /// Document-space bounds of the reference element
    fn reference_bounds(&self) -> Rect;

    /// Current viewport size
    fn viewport(&self) -> Size;

    /// Current document scroll offset
    fn scroll_offset(&self) -> f32 {
        0.0
    }
}

/// A point along one axis of a box
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Anchor {
    /// Fraction of the extent (`top` = 0, `center` = 0.5, `bottom` = 1, `"80%"`)
    Fraction(f32),
    /// Fixed distance from the start, in pixels (`"100px"`)
    Pixels(f32),
}

impl Anchor {
    pub const TOP: Anchor = Anchor::Fraction(0.0);
    pub const CENTER: Anchor = Anchor::Fraction(0.5);
    pub const BOTTOM: Anchor = Anchor::Fraction(1.0);

    /// Distance from the start of a box of the given extent
    pub fn resolve(&self, extent: f32) -> f32 {
        match self {
            Anchor::Fraction(f) => f * extent,
            Anchor::Pixels(px) => *px,
        }
    }

    fn parse(token: &str) -> Option<Self> {
        let anchor = match token {
            "top" => Some(Anchor::TOP),
            "center" => Some(Anchor::CENTER),
            "bottom" => Some(Anchor::BOTTOM),
            _ => {
                if let Some(pct) = token.strip_suffix('%') {
                    pct.parse::<f32>().ok().map(|v| Anchor::Fraction(v / 100.0))
                } else {
                    token
                        .strip_suffix("px")
                        .unwrap_or(token)
                        .parse::<f32>()
                        .ok()
                        .map(Anchor::Pixels)
                }
            }
        };
        anchor.filter(|anchor| match anchor {
            Anchor::Fraction(v) | Anchor::Pixels(v) => v.is_finite(),
        })
    }
}

/// One edge of a trigger region
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TriggerEdge {
    /// Point on the reference element
    pub element: Anchor,
    /// Point on the viewport
    pub viewport: Anchor,
}

impl TriggerEdge {
    pub const fn new(element: Anchor, viewport: Anchor) -> Self {
        Self { element, viewport }
    }

    /// Scroll offset at which the element point meets the viewport point
    pub fn resolve(&self, bounds: Rect, viewport: Size) -> f32 {
        bounds.top() + self.element.resolve(bounds.height())
            - self.viewport.resolve(viewport.height)
    }
}

impl FromStr for TriggerEdge {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut tokens = s.split_whitespace();
        let parsed = match (tokens.next(), tokens.next(), tokens.next()) {
            (Some(element), Some(viewport), None) => Anchor::parse(element)
                .zip(Anchor::parse(viewport))
                .map(|(element, viewport)| TriggerEdge::new(element, viewport)),
            _ => None,
        };
        parsed.ok_or_else(|| ConfigError::InvalidTriggerEdge(s.to_string()))
    }
}

/// Start and end edges of a scroll-bound animation
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TriggerRegion {
    pub start: TriggerEdge,
    pub end: TriggerEdge,
}

impl TriggerRegion {
    pub const fn new(start: TriggerEdge, end: TriggerEdge) -> Self {
        Self { start, end }
    }

    /// Parse both edges, e.g. `("top top", "bottom top")`
    pub fn parse(start: &str, end: &str) -> Result<Self> {
        Ok(Self::new(start.parse()?, end.parse()?))
    }

    /// Resolve against the current layout
    pub fn resolve(&self, bounds: Rect, viewport: Size) -> ResolvedRegion {
        ResolvedRegion::new(
            self.start.resolve(bounds, viewport),
            self.end.resolve(bounds, viewport),
        )
    }
}

impl Default for TriggerRegion {
    /// From the element's top reaching the viewport top until its bottom does
    fn default() -> Self {
        Self::new(
            TriggerEdge::new(Anchor::TOP, Anchor::TOP),
            TriggerEdge::new(Anchor::BOTTOM, Anchor::TOP),
        )
    }
}

/// A trigger region resolved to document scroll offsets
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ResolvedRegion {
    pub start: f32,
    pub end: f32,
}

impl ResolvedRegion {
    pub const fn new(start: f32, end: f32) -> Self {
        Self { start, end }
    }

    /// Raw progress of a scroll offset through the region, clamped to [0, 1].
    ///
    /// An empty or inverted region behaves as a step at `start`.
    pub fn progress(&self, scroll_offset: f32) -> f32 {
        let span = self.end - self.start;
        if span <= 0.0 || !span.is_finite() {
            return if scroll_offset >= self.start { 1.0 } else { 0.0 };
        }
        clamp_progress((scroll_offset - self.start) / span)
    }
}
