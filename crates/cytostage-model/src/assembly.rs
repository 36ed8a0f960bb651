use crate::element::{PartElement, Placement};
use cytostage_topology::Vector3;

/// A group of elements that move as one rigid unit. Children are laid out
/// relative to the composite origin at construction; afterwards the only
/// permitted motion is through `set_base_place`, which carries every child
/// along and so preserves all relative offsets.
#[derive(Clone, Debug)]
pub struct CompositePart {
    name: String,
    base_place: Placement,
    children: Vec<PartElement>,
}

impl CompositePart {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            base_place: Placement::identity(),
            children: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn base_place(&self) -> Placement {
        self.base_place
    }

    /// Add a child at its local placement. Only valid before the composite
    /// has been repositioned.
    pub fn push(&mut self, mut child: PartElement, local: Placement) {
        child.place(local);
        self.children.push(child);
    }

    pub fn children(&self) -> &[PartElement] {
        &self.children
    }

    /// Reposition the whole composite. Every child translates by the same
    /// delta, so relative offsets are invariant.
    pub fn set_base_place(&mut self, base: Placement) {
        let delta = Vector3::new(
            base.x - self.base_place.x,
            base.y - self.base_place.y,
            base.z - self.base_place.z,
        );
        for child in &mut self.children {
            child.shift(delta);
        }
        self.base_place = base;
    }

    pub fn into_children(self) -> Vec<PartElement> {
        self.children
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{ParameterSet, PartCategory};
    use cytostage_base::Guid;
    use cytostage_topology::SolidBuilder;

    fn block(name: &str) -> PartElement {
        let solid = SolidBuilder::box_solid(10.0, 10.0, 10.0).unwrap();
        PartElement::new(
            Guid::new(),
            name,
            PartCategory::Generic,
            ParameterSet::new(),
            solid,
        )
    }

    #[test]
    fn base_place_preserves_relative_offsets() {
        let mut composite = CompositePart::new("pair");
        composite.push(block("a"), Placement::at(0.0, 0.0, 0.0));
        composite.push(block("b"), Placement::at(25.0, -5.0, 3.0));

        let before: Vec<_> = composite.children().iter().map(|c| c.placement).collect();
        composite.set_base_place(Placement::at(100.0, 40.0, -7.0));
        let after: Vec<_> = composite.children().iter().map(|c| c.placement).collect();

        let dx = after[1].x - after[0].x;
        let dy = after[1].y - after[0].y;
        let dz = after[1].z - after[0].z;
        assert!((dx - (before[1].x - before[0].x)).abs() < 1.0e-12);
        assert!((dy - (before[1].y - before[0].y)).abs() < 1.0e-12);
        assert!((dz - (before[1].z - before[0].z)).abs() < 1.0e-12);
        assert!((after[0].x - 100.0).abs() < 1.0e-12);
    }

    #[test]
    fn repeated_base_places_are_absolute_not_cumulative() {
        let mut composite = CompositePart::new("single");
        composite.push(block("a"), Placement::at(1.0, 2.0, 3.0));
        composite.set_base_place(Placement::at(10.0, 0.0, 0.0));
        composite.set_base_place(Placement::at(10.0, 0.0, 0.0));
        let child = &composite.children()[0];
        assert!((child.placement.x - 11.0).abs() < 1.0e-12);
        assert!((child.placement.y - 2.0).abs() < 1.0e-12);
    }
}
