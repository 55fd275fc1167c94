//! A leaf component with a minimum size.

use trellis_core::{Bounds, LayoutError, Size};

use crate::component::{Component, SpaceRequest};

/// Rectangular leaf that needs at least `min_width` x `min_height`.
///
/// Along a flexible axis a block happily takes whatever it is given. Along a
/// fixed axis it only ever uses its minimum, and reports that it wants more
/// whenever it is offered less.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Block {
    pub min_width: f64,
    pub min_height: f64,
    pub fixed_width: bool,
    pub fixed_height: bool,
    bounds: Option<Bounds>,
}

impl Block {
    /// A block that is flexible along both axes.
    pub fn new(min_width: f64, min_height: f64) -> Self {
        Self {
            min_width: min_width.max(0.0),
            min_height: min_height.max(0.0),
            ..Default::default()
        }
    }

    /// A block that is fixed along both axes.
    pub fn fixed(width: f64, height: f64) -> Self {
        Self::new(width, height)
            .with_fixed_width(true)
            .with_fixed_height(true)
    }

    pub fn with_fixed_width(mut self, fixed: bool) -> Self {
        self.fixed_width = fixed;
        self
    }

    pub fn with_fixed_height(mut self, fixed: bool) -> Self {
        self.fixed_height = fixed;
        self
    }

    /// Where the block was last laid out.
    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }
}

impl Component for Block {
    fn minimum_width(&self) -> f64 {
        self.min_width
    }

    fn minimum_height(&self) -> f64 {
        self.min_height
    }

    fn is_fixed_width(&self) -> bool {
        self.fixed_width
    }

    fn is_fixed_height(&self) -> bool {
        self.fixed_height
    }

    fn requested_size(&self, offered: Size) -> Result<SpaceRequest, LayoutError> {
        Ok(SpaceRequest::new(
            offered.width.min(self.min_width),
            offered.height.min(self.min_height),
        )
        .with_wants(
            self.fixed_width && offered.width < self.min_width,
            self.fixed_height && offered.height < self.min_height,
        ))
    }

    fn apply_layout(&mut self, bounds: Bounds) -> Result<(), LayoutError> {
        self.bounds = Some(bounds);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_never_exceeds_offer() {
        let block = Block::new(40.0, 30.0);
        let request = block.requested_size(Size::new(25.0, 100.0)).unwrap();
        assert_eq!(request.size(), Size::new(25.0, 30.0));
        // Flexible blocks never flag themselves as wanting more
        assert!(!request.wants_width);
        assert!(!request.wants_height);
    }

    #[test]
    fn test_fixed_block_wants_more_when_short() {
        let block = Block::fixed(40.0, 30.0);

        let short = block.requested_size(Size::new(25.0, 30.0)).unwrap();
        assert!(short.wants_width);
        assert!(!short.wants_height);

        let exact = block.requested_size(Size::new(40.0, 30.0)).unwrap();
        assert!(!exact.wants_width);
        assert_eq!(exact.size(), Size::new(40.0, 30.0));

        let roomy = block.requested_size(Size::new(400.0, 300.0)).unwrap();
        assert_eq!(roomy.size(), Size::new(40.0, 30.0));
    }

    #[test]
    fn test_apply_layout_records_bounds() {
        let mut block = Block::new(1.0, 1.0);
        assert!(block.bounds().is_none());
        block.apply_layout(Bounds::new(3.0, 4.0, 5.0, 6.0)).unwrap();
        assert_eq!(block.bounds(), Some(Bounds::new(3.0, 4.0, 5.0, 6.0)));
    }
}
