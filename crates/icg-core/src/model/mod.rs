pub mod adapter;
pub mod operations;
pub mod schemas;
pub mod types;

pub use adapter::{TypeAdapter, TypeAdapterItem};
pub use operations::*;
pub use schemas::*;
pub use types::{NormalizedName, SupportingFile};
