//! Schema declaration: object types, field kinds, and selection trees

pub mod registry;
pub mod selection;

pub use registry::{FieldKind, ObjectType, TypeRegistry};
pub use selection::SelectionNode;
