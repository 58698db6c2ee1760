use ggen_core::{GenerationRequest, HelperKind};

use crate::ast::{GoMethod, JSON_IMPORT};

/// Payload shape the helpers decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Shape<'a> {
    Collection { item: &'a str },
    Item,
}

impl<'a> Shape<'a> {
    fn of(request: &'a GenerationRequest) -> Option<Self> {
        if !request.emits_helpers() {
            return None;
        }
        match request.item.as_deref() {
            Some(item) if request.is_collection => Some(Shape::Collection { item }),
            _ => Some(Shape::Item),
        }
    }
}

/// Emit response helper methods on `<Entity>Resp`, in request order.
///
/// Empty for a collection with no item type, whatever helpers were asked for.
pub fn emit_helpers(request: &GenerationRequest) -> Vec<GoMethod> {
    let Some(shape) = Shape::of(request) else {
        log::debug!(
            "collection {} has no item type, skipping response helpers",
            request.entity
        );
        return Vec::new();
    };
    let instance = request.instance();
    request
        .helpers
        .iter()
        .map(|kind| helper_method(*kind, shape, &request.entity, &instance))
        .collect()
}

/// Imports the body of a helper needs.
pub fn required_imports(kind: HelperKind, is_collection: bool) -> &'static [&'static str] {
    match (kind, is_collection) {
        (HelperKind::Data, true) => &[],
        (HelperKind::Data, false) => &[JSON_IMPORT],
        (HelperKind::Normalized, _) => &[],
        (HelperKind::ToMap, _) => &[JSON_IMPORT],
    }
}

fn helper_method(kind: HelperKind, shape: Shape<'_>, entity: &str, instance: &str) -> GoMethod {
    let resp = format!("{instance}Resp");
    let (doc, returns, body) = match (kind, shape) {
        (HelperKind::Data, Shape::Collection { item }) => (
            "Data response helper",
            format!("[]{item}Resp"),
            vec![
                format!("collection, _ := normalizeODataCollection(*{resp})"),
                format!("{instance} := []{item}Resp{{}}"),
                "for _, item := range collection {".to_string(),
                format!("\t{instance} = append({instance}, {item}Resp(item))"),
                "}".to_string(),
                format!("return {instance}"),
            ],
        ),
        (HelperKind::Data, Shape::Item) => (
            "Data response helper",
            format!("*{entity}Info"),
            vec![
                format!("data := NormalizeODataItem(*{resp})"),
                format!("res := &{entity}Info{{}}"),
                "_ = json.Unmarshal(data, res)".to_string(),
                "return res".to_string(),
            ],
        ),
        (HelperKind::Normalized, Shape::Collection { .. }) => (
            "Normalized returns normalized body",
            "[]byte".to_string(),
            vec![
                format!("normalized, _ := NormalizeODataCollection(*{resp})"),
                "return normalized".to_string(),
            ],
        ),
        (HelperKind::Normalized, Shape::Item) => (
            "Normalized returns normalized body",
            "[]byte".to_string(),
            vec![format!("return NormalizeODataItem(*{resp})")],
        ),
        (HelperKind::ToMap, Shape::Collection { .. }) => (
            "ToMap unmarshals response to generic map",
            "[]map[string]interface{}".to_string(),
            vec![
                format!("data, _ := NormalizeODataCollection(*{resp})"),
                "var res []map[string]interface{}".to_string(),
                "_ = json.Unmarshal(data, &res)".to_string(),
                "return res".to_string(),
            ],
        ),
        (HelperKind::ToMap, Shape::Item) => (
            "ToMap unmarshals response to generic map",
            "map[string]interface{}".to_string(),
            vec![
                format!("data := NormalizeODataItem(*{resp})"),
                "var res map[string]interface{}".to_string(),
                "_ = json.Unmarshal(data, &res)".to_string(),
                "return res".to_string(),
            ],
        ),
    };

    GoMethod {
        doc: doc.to_string(),
        receiver: resp,
        receiver_type: format!("{entity}Resp"),
        name: kind.to_string(),
        params: Vec::new(),
        returns,
        body,
    }
}
