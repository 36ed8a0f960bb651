mod assembly;
mod bom;
mod document;
mod element;

pub use assembly::CompositePart;
pub use bom::{BomLine, merge_bom};
pub use document::Document;
pub use element::{ParameterSet, ParameterValue, PartCategory, PartElement, Placement};
