pub mod config;
pub mod error;
pub mod naming;
pub mod output;
pub mod request;

pub use config::{EntityConfig, GgenConfig, TagPolicy};
pub use error::{ConfigError, GeneratorError};
pub use request::{GenerationRequest, HelperKind, ModifierKind};

/// A generated file with path and content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub path: String,
    pub content: String,
}

/// Trait for dialect generators that turn one request into one source file.
pub trait CodeGenerator {
    /// File extension of the emitted dialect, without the leading dot.
    fn extension(&self) -> &'static str;

    /// Render the file for `request`. `invocation` is embedded in the
    /// generated-file banner so the output can be traced to its command.
    fn generate(
        &self,
        request: &GenerationRequest,
        invocation: &str,
    ) -> Result<GeneratedFile, GeneratorError>;
}
