use ggen_core::{GenerationRequest, ModifierKind};

use crate::ast::{GoMethod, GoParam};

/// Emit one chainable modifier method per requested tag, in request order.
///
/// Repeated tags are emitted repeatedly; Go rejects the duplicate
/// declaration at compile time, so strict mode refuses them up front.
pub fn emit_modifiers(request: &GenerationRequest) -> Vec<GoMethod> {
    let instance = request.instance();
    request
        .modifiers
        .iter()
        .map(|kind| modifier_method(*kind, &request.entity, &instance))
        .collect()
}

/// `Conf()` swaps the entity's request config.
pub fn conf_method(entity: &str, instance: &str) -> GoMethod {
    GoMethod {
        doc: "Conf receives custom request config definition, e.g. custom headers, custom OData mod"
            .to_string(),
        receiver: instance.to_string(),
        receiver_type: entity.to_string(),
        name: "Conf".to_string(),
        params: vec![GoParam::new("config", "*RequestConfig")],
        returns: format!("*{entity}"),
        body: vec![
            format!("{instance}.config = config"),
            format!("return {instance}"),
        ],
    }
}

/// Build the method for one modifier: forward the arguments to the
/// `modifiers.Add<Kind>` accumulator and return the receiver for chaining.
pub fn modifier_method(kind: ModifierKind, entity: &str, instance: &str) -> GoMethod {
    let (doc, params) = match kind {
        ModifierKind::Select => (
            "Select adds $select OData modifier",
            vec![GoParam::new("oDataSelect", "string")],
        ),
        ModifierKind::Expand => (
            "Expand adds $expand OData modifier",
            vec![GoParam::new("oDataExpand", "string")],
        ),
        ModifierKind::Filter => (
            "Filter adds $filter OData modifier",
            vec![GoParam::new("oDataFilter", "string")],
        ),
        ModifierKind::Top => (
            "Top adds $top OData modifier",
            vec![GoParam::new("oDataTop", "int")],
        ),
        ModifierKind::Skip => (
            "Skip adds $skiptoken OData modifier",
            vec![GoParam::new("skipToken", "string")],
        ),
        ModifierKind::OrderBy => (
            "OrderBy adds $orderby OData modifier",
            vec![
                GoParam::new("oDataOrderBy", "string"),
                GoParam::new("ascending", "bool"),
            ],
        ),
    };

    let args: Vec<&str> = params.iter().map(|p| p.name.as_str()).collect();
    let forward = format!("{instance}.modifiers.Add{kind}({})", args.join(", "));

    GoMethod {
        doc: doc.to_string(),
        receiver: instance.to_string(),
        receiver_type: entity.to_string(),
        name: kind.to_string(),
        params,
        returns: format!("*{entity}"),
        body: vec![forward, format!("return {instance}")],
    }
}
