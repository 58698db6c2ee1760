use ggen_core::naming::output_file_name;
use ggen_core::{CodeGenerator, GeneratedFile, GenerationRequest, GeneratorError};

use crate::emitters;

/// Go fluent-API boilerplate generator.
pub struct GoGenerator;

impl CodeGenerator for GoGenerator {
    fn extension(&self) -> &'static str {
        "go"
    }

    fn generate(
        &self,
        request: &GenerationRequest,
        invocation: &str,
    ) -> Result<GeneratedFile, GeneratorError> {
        Ok(GeneratedFile {
            path: output_file_name(&request.entity, self.extension()),
            content: emitters::file::emit_file(request, invocation)?,
        })
    }
}
