//! Client code generator
//!
//! Renders extracted client declarations into wrapper code.

pub mod go;

#[cfg(test)]
mod tests;

use crate::error::CliResult;
use shugen_compiler::Package;

/// Trait for client code generators
pub trait Generator {
    /// Render the generated source text for a package.
    ///
    /// Rendering is deterministic: the same package always yields the same text.
    fn render(&self, package: &Package) -> CliResult<String>;
}

/// Render Go client wrappers for a package
pub fn generate_client_code(package: &Package) -> CliResult<String> {
    let generator = go::GoClientGenerator::new()?;
    generator.render(package)
}
