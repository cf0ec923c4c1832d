pub mod style;
pub mod unit;
pub mod value;

pub use style::{MediaRule, PropertyMap, QueryBlock, StyleDefinition};
pub use unit::{Bind, Scope};
pub use value::{Value, ValuePart};
