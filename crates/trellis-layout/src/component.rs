//! The sizing-negotiation contract every layout participant implements.

use trellis_core::{Bounds, LayoutError, Size};

/// A component's answer to a space offer.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SpaceRequest {
    /// Width the component will use; never more than offered
    pub width: f64,
    /// Height the component will use; never more than offered
    pub height: f64,
    /// Fixed-width component that is taking all it was offered and needs more
    pub wants_width: bool,
    /// Fixed-height component that is taking all it was offered and needs more
    pub wants_height: bool,
}

impl SpaceRequest {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    /// Set the "wants more" flags.
    pub fn with_wants(mut self, wants_width: bool, wants_height: bool) -> Self {
        self.wants_width = wants_width;
        self.wants_height = wants_height;
        self
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

/// Anything that can be placed in a grid cell.
///
/// Implementations must be deterministic and monotonic: offering more space
/// never shrinks the request, and a component satisfied at some size stays
/// satisfied at any larger size. `requested_size` must never return more than
/// it was offered in either dimension; the solver treats that as a fatal
/// [`LayoutError::ContractViolation`].
///
/// Calling back into a top-level layout from inside these methods is not
/// supported.
pub trait Component {
    /// Smallest width this component can be drawn at.
    fn minimum_width(&self) -> f64;

    /// Smallest height this component can be drawn at.
    fn minimum_height(&self) -> f64;

    /// Whether extra horizontal space is of no use to this component.
    fn is_fixed_width(&self) -> bool;

    /// Whether extra vertical space is of no use to this component.
    fn is_fixed_height(&self) -> bool;

    /// Negotiate space: given an offer, report what would be used.
    fn requested_size(&self, offered: Size) -> Result<SpaceRequest, LayoutError>;

    /// Receive the final allocation and lay out any children inside it.
    fn apply_layout(&mut self, bounds: Bounds) -> Result<(), LayoutError>;
}
