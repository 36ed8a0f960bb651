use crate::assembly::CompositePart;
use crate::bom::{BomLine, merge_bom};
use crate::element::PartElement;
use cytostage_base::{Error, Result, Units};

/// Ordered, name-unique collection of part elements. Insertion order is the
/// document order, so identical build scripts produce identical documents.
#[derive(Clone, Debug)]
pub struct Document {
    name: String,
    units: Units,
    elements: Vec<PartElement>,
}

impl Document {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            units: Units::metric_mm(),
            elements: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn units(&self) -> Units {
        self.units
    }

    pub fn add(&mut self, element: PartElement) -> Result<()> {
        if self.elements.iter().any(|e| e.name == element.name) {
            return Err(Error::InvalidParameter(format!(
                "duplicate element name: {}",
                element.name
            )));
        }
        self.elements.push(element);
        Ok(())
    }

    /// Absorb a composite, keeping its children contiguous in document order.
    pub fn add_composite(&mut self, composite: CompositePart) -> Result<()> {
        for child in composite.into_children() {
            self.add(child)?;
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PartElement> {
        self.elements.iter()
    }

    pub fn get(&self, name: &str) -> Option<&PartElement> {
        self.elements.iter().find(|e| e.name == name)
    }

    pub fn bom(&self) -> Vec<BomLine> {
        merge_bom(self.elements.iter().flat_map(|e| e.hardware.iter()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{ParameterSet, PartCategory};
    use cytostage_base::Guid;
    use cytostage_topology::SolidBuilder;

    fn block(name: &str) -> PartElement {
        let solid = SolidBuilder::box_solid(5.0, 5.0, 5.0).unwrap();
        PartElement::new(
            Guid::new(),
            name,
            PartCategory::Generic,
            ParameterSet::new(),
            solid,
        )
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let mut doc = Document::new("test");
        doc.add(block("slider")).unwrap();
        assert!(doc.add(block("slider")).is_err());
        assert_eq!(doc.len(), 1);
        assert!(doc.get("slider").is_some());
        assert!(doc.get("missing").is_none());
    }

    #[test]
    fn bom_aggregates_element_hardware() {
        let mut doc = Document::new("test");
        doc.add(block("a").with_hardware(vec![BomLine::new(4, "bolt M3x16")]))
            .unwrap();
        doc.add(block("b").with_hardware(vec![
            BomLine::new(4, "bolt M3x16"),
            BomLine::new(2, "nut M3"),
        ]))
        .unwrap();
        let bom = doc.bom();
        assert_eq!(
            bom,
            vec![BomLine::new(8, "bolt M3x16"), BomLine::new(2, "nut M3")]
        );
    }
}
