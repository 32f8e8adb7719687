pub mod engine;
pub mod generator;
pub mod naming;
pub mod package_name;
pub mod renderer;
pub mod selection;
pub mod type_mapping;

pub use crate::domain::model::{
    GenerationReport, JavaSource, ObjectDescription, RenderResult, SkippedField,
};
pub use crate::domain::ports::{ConfigProvider, MetadataSource, Pipeline, Storage};
pub use crate::utils::error::Result;
