pub mod registry;

pub use registry::{TypesDataBuilder, not_needed};
