//! Editor-facing block definitions and toolbox, generated from the registry.
//!
//! Produces two JSON artifacts:
//! 1. **Block definitions** in the editor's JSON block format, one entry per
//!    registered kind
//! 2. **Category toolbox** listing every kind under its category
//!
//! Both are derived from [`Registry`] so they cannot drift from what the
//! generator understands.

use serde_json::{json, Map, Value};

use blockscene_codegen::Registry;
use blockscene_types::{Arg, BlockShape, Category, FieldKind, InputSpec, VariableDefault};

// ══════════════════════════════════════════════════════════════════════════════
// Block definitions
// ══════════════════════════════════════════════════════════════════════════════

/// Every registered block kind as an editor block definition, in
/// registration order.
pub fn block_definitions(registry: &Registry) -> Value {
    Value::Array(
        registry
            .iter()
            .map(|def| block_definition(&def.shape))
            .collect(),
    )
}

/// [`block_definitions`] serialized to a string.
pub fn block_definitions_json(registry: &Registry) -> String {
    block_definitions(registry).to_string()
}

fn block_definition(shape: &BlockShape) -> Value {
    let mut def = Map::new();
    def.insert("type".into(), json!(shape.kind));
    def.insert("message0".into(), json!(shape.message));
    if !shape.args.is_empty() {
        def.insert(
            "args0".into(),
            Value::Array(shape.args.iter().map(arg_definition).collect()),
        );
    }
    match shape.output {
        Some(tag) => {
            def.insert("output".into(), json!(tag));
        }
        None => {
            def.insert("previousStatement".into(), Value::Null);
            def.insert("nextStatement".into(), Value::Null);
        }
    }
    def.insert("inputsInline".into(), json!(shape.inputs_inline));
    def.insert("colour".into(), json!(shape.category.hue()));
    def.insert("tooltip".into(), json!(shape.tooltip));
    Value::Object(def)
}

fn arg_definition(arg: &Arg) -> Value {
    match arg {
        Arg::Field(field) => match field.kind {
            FieldKind::Text { default } => json!({
                "type": "field_input",
                "name": field.name,
                "text": default,
            }),
            FieldKind::Number { default } => json!({
                "type": "field_number",
                "name": field.name,
                "value": default,
            }),
            FieldKind::Colour { default } => json!({
                "type": "field_colour",
                "name": field.name,
                "colour": default,
            }),
            FieldKind::Checkbox { default } => json!({
                "type": "field_checkbox",
                "name": field.name,
                "checked": default,
            }),
            FieldKind::Dropdown { options } => json!({
                "type": "field_dropdown",
                "name": field.name,
                "options": options
                    .iter()
                    .map(|(label, value)| json!([label, value]))
                    .collect::<Vec<_>>(),
            }),
            FieldKind::Variable { tag, default } => {
                let variable = match default {
                    VariableDefault::FirstOfType { fallback } => fallback.to_string(),
                    VariableDefault::Fresh { prefix } => format!("{prefix}_1"),
                };
                json!({
                    "type": "field_variable",
                    "name": field.name,
                    "variable": variable,
                    "variableTypes": [tag],
                    "defaultType": tag,
                })
            }
        },
        Arg::Input(InputSpec::Value { name, accepts }) => json!({
            "type": "input_value",
            "name": name,
            "check": accepts,
        }),
        Arg::Input(InputSpec::Statement { name }) => json!({
            "type": "input_statement",
            "name": name,
        }),
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Toolbox
// ══════════════════════════════════════════════════════════════════════════════

/// A category toolbox with every registered kind, categories in canonical
/// order, empty categories omitted.
pub fn toolbox(registry: &Registry) -> Value {
    let contents: Vec<Value> = Category::ALL
        .iter()
        .filter_map(|&category| {
            let blocks: Vec<Value> = registry
                .iter()
                .filter(|def| def.shape.category == category)
                .map(|def| json!({ "kind": "block", "type": def.kind() }))
                .collect();
            if blocks.is_empty() {
                return None;
            }
            Some(json!({
                "kind": "category",
                "name": category.name(),
                "colour": category.hue().to_string(),
                "contents": blocks,
            }))
        })
        .collect();
    json!({ "kind": "categoryToolbox", "contents": contents })
}

/// [`toolbox`] serialized to a string.
pub fn toolbox_json(registry: &Registry) -> String {
    toolbox(registry).to_string()
}

#[cfg(test)]
mod tests {
    use blockscene_codegen::registry;

    use super::*;

    fn definition(kind: &str) -> Value {
        block_definitions(registry())
            .as_array()
            .unwrap()
            .iter()
            .find(|d| d["type"] == kind)
            .cloned()
            .unwrap()
    }

    #[test]
    fn test_one_definition_per_kind() {
        let defs = block_definitions(registry());
        assert_eq!(defs.as_array().unwrap().len(), registry().len());
    }

    #[test]
    fn test_statement_definition() {
        let def = definition("create_shape");
        assert!(def["previousStatement"].is_null());
        assert!(def.get("previousStatement").is_some());
        assert!(def.get("output").is_none());
        assert_eq!(def["args0"][0]["type"], "field_variable");
        assert_eq!(def["args0"][0]["variableTypes"], json!(["SHAPE"]));
        assert_eq!(def["args0"][0]["variable"], "shape_1");
        assert_eq!(def["args0"][1]["check"], json!(["SHAPE"]));
        assert_eq!(def["args0"][2]["check"], json!(["COORDS"]));
    }

    #[test]
    fn test_expression_definition() {
        let def = definition("lightbulb");
        assert_eq!(def["output"], "LIGHT");
        assert!(def.get("nextStatement").is_none());
        assert_eq!(def["args0"][1]["type"], "field_colour");
        assert_eq!(def["args0"][1]["colour"], "#ffffff");
    }

    #[test]
    fn test_statement_input_and_dropdown() {
        let on_click = definition("on_click");
        assert_eq!(on_click["args0"][1]["type"], "input_statement");
        let texture = definition("texture_material");
        assert_eq!(texture["args0"][0]["options"][0], json!(["wood", "wood"]));
    }

    #[test]
    fn test_toolbox_lists_every_kind_once() {
        let tb = toolbox(registry());
        assert_eq!(tb["kind"], "categoryToolbox");
        let mut kinds: Vec<String> = tb["contents"]
            .as_array()
            .unwrap()
            .iter()
            .flat_map(|c| c["contents"].as_array().unwrap().clone())
            .map(|b| b["type"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(kinds.len(), registry().len());
        kinds.sort();
        kinds.dedup();
        assert_eq!(kinds.len(), registry().len());
    }

    #[test]
    fn test_toolbox_category_order() {
        let tb = toolbox(registry());
        let names: Vec<&str> = tb["contents"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["name"].as_str().unwrap())
            .collect();
        assert_eq!(
            names,
            vec!["Camera", "Lighting", "Materials", "Physics", "Shapes", "Events", "Scene", "Values", "Variables"]
        );
    }
}
