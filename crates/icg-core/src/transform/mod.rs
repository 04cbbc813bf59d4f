pub mod name_normalizer;
pub mod type_adapter;

pub use type_adapter::resolve_type_adapter;
