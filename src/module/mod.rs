//! Deferred native logger resolution

pub mod descriptor;
pub mod registry;

pub use descriptor::{ModuleDescriptor, ModuleResolution};
pub use registry::{
    AsyncConstructor, ConstructorFn, ModuleRegistry, CONSOLE_CONSTRUCTOR, CONSOLE_MODULE,
    JSON_CONSTRUCTOR, JSON_MODULE,
};
