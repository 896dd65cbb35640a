//! Read access to element layout.

use std::collections::HashMap;

use wirebeam_core::{geometry::Bounds, identifier::Id};

/// Source of element bounding boxes, in viewport coordinates.
///
/// `None` means the element is not mounted (yet). Beam code treats that as
/// "not ready" rather than as an error.
pub trait LayoutSource {
    fn bounding_rect(&self, element: Id) -> Option<Bounds>;
}

impl LayoutSource for HashMap<Id, Bounds> {
    fn bounding_rect(&self, element: Id) -> Option<Bounds> {
        self.get(&element).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_layout_source() {
        let mut layout = HashMap::new();
        let rect = Bounds::from_rect(1.0, 2.0, 3.0, 4.0);
        layout.insert(Id::new("present"), rect);

        assert_eq!(layout.bounding_rect(Id::new("present")), Some(rect));
        assert_eq!(layout.bounding_rect(Id::new("absent")), None);
    }
}
