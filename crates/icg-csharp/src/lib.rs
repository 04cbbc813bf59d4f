pub mod base;
pub mod emitters;
pub mod generator;
pub mod influx;
pub mod type_mapper;

pub use base::CSharpClientCodegen;
pub use generator::{ApiGroup, CSharpGenerator, Generation, GeneratorError, build, generate_with};
pub use influx::InfluxCSharpGenerator;
