use minijinja::{AutoEscape, Environment, context};

use ggen_core::{GenerationRequest, GeneratorError};

use super::helpers::emit_helpers;
use super::imports::resolve_imports;
use super::modifiers::{conf_method, emit_modifiers};
use crate::ast::{GoFile, GoMethod, GoSection};

/// Banner of the response helper section.
const HELPERS_BANNER: &str = "Response helpers";

/// Emit the complete `<instance>_gen.go` source for a request.
pub fn emit_file(request: &GenerationRequest, invocation: &str) -> Result<String, GeneratorError> {
    render_file(&build_file(request, invocation))
}

/// Assemble banner, package, imports, `Conf()`, modifiers and helpers, in that order.
pub fn build_file(request: &GenerationRequest, invocation: &str) -> GoFile {
    let instance = request.instance();

    let mut methods = Vec::new();
    if request.configurable {
        methods.push(conf_method(&request.entity, &instance));
    }
    methods.extend(emit_modifiers(request));

    let mut sections = vec![GoSection {
        banner: None,
        methods,
    }];

    let helpers = emit_helpers(request);
    if !helpers.is_empty() {
        sections.push(GoSection {
            banner: Some(HELPERS_BANNER.to_string()),
            methods: helpers,
        });
    }

    GoFile {
        command: invocation.trim().to_string(),
        package: request.package.clone(),
        imports: resolve_imports(request),
        sections,
    }
}

/// Render a Go file model to source text.
pub fn render_file(file: &GoFile) -> Result<String, GeneratorError> {
    let mut env = Environment::new();
    env.set_trim_blocks(true);
    env.set_lstrip_blocks(true);
    env.set_auto_escape_callback(|_| AutoEscape::None);
    env.add_template("file.go.j2", include_str!("../../templates/file.go.j2"))
        .map_err(template_error)?;
    let tmpl = env.get_template("file.go.j2").map_err(template_error)?;

    let sections: Vec<minijinja::Value> = file.sections.iter().map(section_to_ctx).collect();

    tmpl.render(context! {
        command => file.command.clone(),
        package => file.package.clone(),
        imports => file.imports.clone(),
        sections => sections,
    })
    .map_err(template_error)
}

fn section_to_ctx(section: &GoSection) -> minijinja::Value {
    let methods: Vec<minijinja::Value> = section.methods.iter().map(method_to_ctx).collect();
    context! {
        banner => section.banner.clone(),
        methods => methods,
    }
}

fn method_to_ctx(method: &GoMethod) -> minijinja::Value {
    let params: Vec<String> = method.params.iter().map(ToString::to_string).collect();
    context! {
        doc => method.doc.clone(),
        receiver => method.receiver.clone(),
        receiver_type => method.receiver_type.clone(),
        name => method.name.clone(),
        params => params,
        returns => method.returns.clone(),
        body => method.body.clone(),
    }
}

fn template_error(err: minijinja::Error) -> GeneratorError {
    GeneratorError::Template(err.to_string())
}
