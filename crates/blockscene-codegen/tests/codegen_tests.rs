//! End-to-end generation tests: editor JSON → parser → generator → script.

use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use blockscene_codegen::{
    generate, generate_block, generate_with, registry, CodegenOptions, Registry, RuntimeOp,
};
use blockscene_types::{Block, Workspace};

// ══════════════════════════════════════════════════════════════════════════════
// Helpers: fixtures
// ══════════════════════════════════════════════════════════════════════════════

fn doc(blocks: Vec<Value>, variables: Vec<Value>) -> Value {
    json!({
        "blocks": { "languageVersion": 0, "blocks": blocks },
        "variables": variables,
    })
}

fn var(id: &str, name: &str, tag: &str) -> Value {
    json!({ "id": id, "name": name, "type": tag })
}

/// Link `blocks` into one statement chain via nested `next` connections.
fn chain(blocks: Vec<Value>) -> Value {
    let mut iter = blocks.into_iter().rev();
    let mut head = iter.next().expect("empty chain");
    for mut block in iter {
        block["next"] = json!({ "block": head });
        head = block;
    }
    head
}

fn coords(id: &str, x: f64, y: f64, z: f64) -> Value {
    json!({ "type": "coords", "id": id, "fields": { "X": x, "Y": y, "Z": z } })
}

fn number(id: &str, n: f64) -> Value {
    json!({ "type": "math_number", "id": id, "fields": { "NUM": n } })
}

fn colour_material(id: &str, hex: &str) -> Value {
    json!({
        "type": "color_material",
        "id": id,
        "inputs": {
            "COLOR": { "block": { "type": "colour_picker", "id": format!("{id}-c"), "fields": { "COLOUR": hex } } }
        }
    })
}

fn shape_block(kind: &str, id: &str, material: Option<Value>) -> Value {
    let mut block = json!({ "type": kind, "id": id });
    if let Some(material) = material {
        block["inputs"] = json!({ "MATERIAL": { "block": material } });
    }
    block
}

fn create_shape(id: &str, var_id: Option<&str>, shape: Value, at: Value) -> Value {
    let mut block = json!({
        "type": "create_shape",
        "id": id,
        "inputs": {
            "SHAPE": { "block": shape },
            "COORDS": { "block": at },
        }
    });
    if let Some(var_id) = var_id {
        block["fields"] = json!({ "VAR": { "id": var_id } });
    }
    block
}

fn sky(id: &str, hex: &str) -> Value {
    json!({ "type": "set_sky_color", "id": id, "fields": { "COLOR": hex } })
}

// ══════════════════════════════════════════════════════════════════════════════
// Helpers: pipeline
// ══════════════════════════════════════════════════════════════════════════════

fn workspace(doc: &Value) -> Workspace {
    let result = blockscene_parser::parse(&doc.to_string(), registry());
    if result.errors.has_errors() {
        panic!(
            "parse errors:\n{}",
            result
                .errors
                .errors
                .iter()
                .map(|e| format!("  [{}] {}", e.code, e.message))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }
    result.workspace.expect("no workspace after successful parse")
}

fn compile(doc: &Value) -> String {
    generate(&workspace(doc))
}

fn block_code(doc: &Value, id: &str) -> String {
    generate_block(&workspace(doc), registry(), &CodegenOptions::default(), id)
        .expect("block not found")
}

// ══════════════════════════════════════════════════════════════════════════════
// Missing inputs and defaults
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_missing_mandatory_input_emits_nothing() {
    let d = doc(vec![json!({ "type": "create_shape", "id": "cs" })], vec![]);
    assert_eq!(block_code(&d, "cs"), "");
    assert_eq!(compile(&d), "");
}

#[test]
fn test_missing_input_drops_line_from_chain() {
    let d = doc(
        vec![chain(vec![
            sky("a", "#000001"),
            json!({ "type": "move_camera", "id": "cam" }),
            sky("b", "#000002"),
        ])],
        vec![],
    );
    assert_eq!(
        compile(&d),
        "threeD.setSkyColor(\"#000001\");\nthreeD.setSkyColor(\"#000002\");"
    );
}

#[test]
fn test_shape_without_material_empties_create_shape() {
    let d = doc(
        vec![create_shape(
            "cs",
            Some("vx"),
            shape_block("box", "b1", None),
            coords("c", 1.0, 2.0, 3.0),
        )],
        vec![var("vx", "X", "SHAPE")],
    );
    assert_eq!(compile(&d), "");
}

#[test]
fn test_create_shape_with_material() {
    let d = doc(
        vec![create_shape(
            "cs",
            Some("vx"),
            shape_block("box", "b1", Some(colour_material("m1", "#ff0000"))),
            coords("c", 1.0, 2.0, 3.0),
        )],
        vec![var("vx", "X", "SHAPE")],
    );
    assert_eq!(
        compile(&d),
        r##"X = [{ id: "b1", type: "box", props: { m: [{ id: "m1", type: "color", props: { c: "#ff0000" }}], s: 1 }}]; await threeD.createShape(X, [1,2,3]);"##
    );
}

#[test]
fn test_move_shape_towards_shape_defaults() {
    let d = doc(
        vec![json!({ "type": "move_shape_towards_shape", "id": "m" })],
        vec![],
    );
    assert_eq!(
        compile(&d),
        "threeD.moveShapeTowardsShape(shape_1, shape_2, 1);"
    );
}

#[test]
fn test_number_input_default_and_override() {
    let unset = doc(
        vec![json!({ "type": "set_ambient_light_intensity", "id": "a" })],
        vec![],
    );
    assert_eq!(compile(&unset), "threeD.setAmbientLightIntensity(1);");

    let set = doc(
        vec![json!({
            "type": "set_ambient_light_intensity",
            "id": "a",
            "inputs": { "INTENSITY": { "block": number("n", 0.25) } }
        })],
        vec![],
    );
    assert_eq!(compile(&set), "threeD.setAmbientLightIntensity(0.25);");
}

#[test]
fn test_connected_block_wins_over_shadow() {
    let shadow_only = doc(
        vec![json!({
            "type": "set_ambient_light_intensity",
            "id": "a",
            "inputs": { "INTENSITY": { "shadow": number("s", 2.0) } }
        })],
        vec![],
    );
    assert_eq!(compile(&shadow_only), "threeD.setAmbientLightIntensity(2);");

    let both = doc(
        vec![json!({
            "type": "set_ambient_light_intensity",
            "id": "a",
            "inputs": { "INTENSITY": { "shadow": number("s", 2.0), "block": number("b", 3.0) } }
        })],
        vec![],
    );
    assert_eq!(compile(&both), "threeD.setAmbientLightIntensity(3);");
}

// ══════════════════════════════════════════════════════════════════════════════
// Ordering and assembly
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_chain_order_is_next_order() {
    let blocks = vec![sky("a", "#000001"), sky("b", "#000002"), sky("c", "#000003")];
    let forward = compile(&doc(vec![chain(blocks.clone())], vec![]));
    let reversed = compile(&doc(
        vec![chain(blocks.into_iter().rev().collect())],
        vec![],
    ));

    let forward_lines: Vec<&str> = forward.lines().collect();
    let mut reversed_lines: Vec<&str> = reversed.lines().collect();
    reversed_lines.reverse();
    assert_eq!(forward_lines.len(), 3);
    assert_eq!(forward_lines, reversed_lines);
    assert!(forward_lines[0].contains("#000001"));
}

#[test]
fn test_top_level_chains_joined_without_trailing_newline() {
    let d = doc(
        vec![
            sky("a", "#000001"),
            json!({ "type": "move_camera", "id": "empty" }),
            number("floating", 7.0),
            sky("b", "#000002"),
        ],
        vec![],
    );
    let script = compile(&d);
    assert_eq!(
        script,
        "threeD.setSkyColor(\"#000001\");\nthreeD.setSkyColor(\"#000002\");"
    );
    assert!(!script.ends_with('\n'));
}

#[test]
fn test_disabled_blocks_emit_nothing() {
    let mut disabled = sky("b", "#000002");
    disabled["enabled"] = json!(false);
    let d = doc(
        vec![chain(vec![sky("a", "#000001"), disabled, sky("c", "#000003")])],
        vec![],
    );
    assert_eq!(
        compile(&d),
        "threeD.setSkyColor(\"#000001\");\nthreeD.setSkyColor(\"#000003\");"
    );
}

#[test]
fn test_long_chain_generates_without_recursion() {
    let mut ws = Workspace::new();
    let mut prev = None;
    for i in 0..100_000 {
        let r = ws.insert(Block::statement(format!("s{i}"), "set_sky_color"));
        match prev {
            Some(p) => ws.link_next(p, r),
            None => ws.push_top_block(r),
        }
        prev = Some(r);
    }
    let script = generate(&ws);
    assert_eq!(script.lines().count(), 100_000);
    assert!(script
        .lines()
        .all(|line| line == "threeD.setSkyColor(\"#87ceeb\");"));
}

// ══════════════════════════════════════════════════════════════════════════════
// Variables
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_unset_creators_get_distinct_names() {
    let make = |id: &str| {
        create_shape(
            id,
            None,
            shape_block("sphere", &format!("{id}-s"), Some(colour_material(&format!("{id}-m"), "#00ff00"))),
            coords(&format!("{id}-c"), 0.0, 0.0, 0.0),
        )
    };
    let script = compile(&doc(vec![chain(vec![make("a"), make("b")])], vec![]));
    let lines: Vec<&str> = script.lines().collect();
    assert!(lines[0].starts_with("shape_1 = "), "{}", lines[0]);
    assert!(lines[0].ends_with("await threeD.createShape(shape_1, [0,0,0]);"));
    assert!(lines[1].starts_with("shape_2 = "), "{}", lines[1]);
}

#[test]
fn test_unset_creators_skip_declared_names() {
    let make = |id: &str| {
        create_shape(
            id,
            None,
            shape_block("cone", &format!("{id}-s"), Some(colour_material(&format!("{id}-m"), "#00ff00"))),
            coords(&format!("{id}-c"), 0.0, 0.0, 0.0),
        )
    };
    let script = compile(&doc(
        vec![chain(vec![make("a"), make("b")])],
        vec![var("v1", "shape_1", "SHAPE")],
    ));
    let lines: Vec<&str> = script.lines().collect();
    assert!(lines[0].starts_with("shape_2 = "));
    assert!(lines[1].starts_with("shape_3 = "));
}

#[test]
fn test_pickers_default_to_first_variable_of_type() {
    let d = doc(
        vec![json!({ "type": "set_mass", "id": "m" })],
        vec![
            var("l", "lamp", "LIGHT"),
            var("s1", "ball", "SHAPE"),
            var("s2", "cube", "SHAPE"),
        ],
    );
    assert_eq!(compile(&d), "threeD.setMass(ball, 1);");
}

#[test]
fn test_colliding_variable_names_stay_distinct() {
    let d = doc(
        vec![chain(vec![
            json!({ "type": "set_mass", "id": "a", "fields": { "VAR": { "id": "v1" } } }),
            json!({ "type": "set_mass", "id": "b", "fields": { "VAR": { "id": "v2" } } }),
        ])],
        vec![var("v1", "my shape", "SHAPE"), var("v2", "my_shape", "SHAPE")],
    );
    assert_eq!(
        compile(&d),
        "threeD.setMass(my_shape, 1);\nthreeD.setMass(my_shape_2, 1);"
    );
}

#[test]
fn test_unresolvable_variable_propagates() {
    let d = doc(
        vec![json!({ "type": "set_mass", "id": "a", "fields": { "VAR": { "id": "gone" } } })],
        vec![],
    );
    assert_eq!(compile(&d), "threeD.setMass(gone, 1);");
}

// ══════════════════════════════════════════════════════════════════════════════
// Async
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_only_async_operations_are_awaited() {
    let light = json!({
        "type": "create_light",
        "id": "cl",
        "inputs": {
            "LIGHT": { "block": { "type": "lightbulb", "id": "lb" } },
            "COORDS": { "block": coords("lc", 0.0, 5.0, 0.0) },
        }
    });
    let shape = create_shape(
        "cs",
        None,
        shape_block("box", "b", Some(colour_material("m", "#123456"))),
        coords("sc", 0.0, 0.0, 0.0),
    );
    let d = doc(
        vec![chain(vec![
            sky("s", "#000000"),
            light,
            json!({ "type": "set_light_intensity", "id": "li" }),
            shape,
            json!({ "type": "move_shape_towards_shape", "id": "mv" }),
        ])],
        vec![],
    );
    let script = compile(&d);
    let lines: Vec<&str> = script.lines().collect();
    assert_eq!(lines.len(), 5);
    let awaited: Vec<bool> = lines.iter().map(|l| l.contains("await ")).collect();
    assert_eq!(awaited, vec![false, true, false, true, false]);
    assert_eq!(
        lines[1],
        r##"light_1 = [{ id: "lb", type: "lightbulb", props: { b: 1, c: "#ffffff" }}]; await threeD.createLight(light_1, [0,5,0]);"##
    );
    // no LIGHT variable is declared, so the picker uses its literal fallback
    assert_eq!(lines[2], "threeD.setLightIntensity(light_1, 1);");
}

#[test]
fn test_create_shape_and_add_to() {
    let d = doc(
        vec![json!({
            "type": "create_shape_and_add_to",
            "id": "ca",
            "fields": { "VAR": { "id": "c" }, "PARENT": { "id": "p" } },
            "inputs": {
                "SHAPE": { "block": shape_block("cylinder", "cy", Some(json!({ "type": "texture_material", "id": "t" }))) },
                "COORDS": { "block": coords("xyz", 0.0, 1.0, 0.0) },
            }
        })],
        vec![var("p", "base", "SHAPE"), var("c", "pole", "SHAPE")],
    );
    assert_eq!(
        compile(&d),
        r#"pole = [{ id: "cy", type: "cylinder", props: { m: [{ id: "t", type: "texture", props: { t: "wood" }}], s: 1 }}]; await threeD.createShapeAndAddTo(pole, base, [0,1,0]);"#
    );
}

// ══════════════════════════════════════════════════════════════════════════════
// Runtime operations
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_calls_follow_registered_runtime_op() {
    let mut reg = Registry::standard();
    let mut def = *reg.get("set_sky_color").unwrap();
    def.runtime_op = Some(RuntimeOp::SetAmbientLightIntensity);
    reg.register(def);

    let ws = workspace(&doc(vec![sky("s", "#102030")], vec![]));
    assert_eq!(
        generate_with(&ws, &reg, &CodegenOptions::default()),
        r##"threeD.setAmbientLightIntensity("#102030");"##
    );
}

// ══════════════════════════════════════════════════════════════════════════════
// Descriptors and literals
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_lightbulb_descriptor_is_stable() {
    let d = doc(
        vec![json!({
            "type": "lightbulb",
            "id": "abc123",
            "fields": { "COLOR": "#ffffff" },
            "inputs": { "BRIGHTNESS": { "block": number("n", 5.0) } }
        })],
        vec![],
    );
    let expected = r##"[{ id: "abc123", type: "lightbulb", props: { b: 5, c: "#ffffff" }}]"##;
    for _ in 0..100 {
        assert_eq!(block_code(&d, "abc123"), expected);
    }
}

#[test]
fn test_spotlight_defaults() {
    let d = doc(vec![json!({ "type": "spotlight", "id": "sp" })], vec![]);
    assert_eq!(
        block_code(&d, "sp"),
        r##"[{ id: "sp", type: "spotlight", props: { b: 1, a: 45, c: "#ffffff" }}]"##
    );
}

#[test]
fn test_custom_object_material_is_optional() {
    let bare = doc(
        vec![json!({
            "type": "custom_object",
            "id": "co",
            "fields": { "NAME": "duck", "MODEL": "duck.glb" }
        })],
        vec![],
    );
    assert_eq!(
        block_code(&bare, "co"),
        r#"[{ id: "co", type: "custom", props: { o: new threeD.customObject("duck.glb", "duck") }}]"#
    );

    let with_material = doc(
        vec![json!({
            "type": "custom_object",
            "id": "co",
            "fields": { "NAME": "duck", "MODEL": "duck.glb" },
            "inputs": { "MATERIAL": { "block": { "type": "texture_material", "id": "t", "fields": { "TEXTURE": "marble" } } } }
        })],
        vec![],
    );
    assert_eq!(
        block_code(&with_material, "co"),
        r#"[{ id: "co", type: "custom", props: { o: new threeD.customObject("duck.glb", "duck"), m: [{ id: "t", type: "texture", props: { t: "marble" }}] }}]"#
    );
}

#[test]
fn test_free_text_is_escaped() {
    let d = doc(
        vec![json!({
            "type": "custom_object",
            "id": "co",
            "fields": { "NAME": "a\"); alert(1); (\"", "MODEL": "m.glb" }
        })],
        vec![],
    );
    let code = block_code(&d, "co");
    assert!(code.contains(r#""a\"); alert(1); (\"""#), "{code}");
}

// ══════════════════════════════════════════════════════════════════════════════
// Nesting
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_on_click_indents_body() {
    let d = doc(
        vec![json!({
            "type": "on_click",
            "id": "oc",
            "fields": { "VAR": { "id": "b" } },
            "inputs": {
                "DO": { "block": chain(vec![
                    json!({ "type": "set_mass", "id": "m" }),
                    sky("s", "#ffffff"),
                ]) }
            }
        })],
        vec![var("b", "ball", "SHAPE")],
    );
    assert_eq!(
        compile(&d),
        "threeD.onClick(ball, async () => {\n  threeD.setMass(ball, 1);\n  threeD.setSkyColor(\"#ffffff\");\n});"
    );
}

#[test]
fn test_on_click_empty_body() {
    let d = doc(vec![json!({ "type": "on_click", "id": "oc" })], vec![]);
    assert_eq!(compile(&d), "threeD.onClick(shape_1, async () => {\n});");
}

// ══════════════════════════════════════════════════════════════════════════════
// Options
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_runtime_namespace_and_indent_options() {
    let d = doc(
        vec![json!({
            "type": "on_click",
            "id": "oc",
            "inputs": { "DO": { "block": sky("s", "#ffffff") } }
        })],
        vec![],
    );
    let options = CodegenOptions {
        runtime_namespace: "scene".into(),
        indent: "\t".into(),
        ..CodegenOptions::default()
    };
    assert_eq!(
        generate_with(&workspace(&d), registry(), &options),
        "scene.onClick(shape_1, async () => {\n\tscene.setSkyColor(\"#ffffff\");\n});"
    );
}

#[test]
fn test_check_sockets_drops_mismatched_connections() {
    let d = doc(
        vec![create_shape(
            "cs",
            Some("v"),
            json!({ "type": "lightbulb", "id": "lb" }),
            coords("c", 0.0, 0.0, 0.0),
        )],
        vec![var("v", "thing", "SHAPE")],
    );
    let ws = workspace(&d);

    let lenient = generate_with(&ws, registry(), &CodegenOptions::default());
    assert!(lenient.starts_with("thing = [{ id: \"lb\", type: \"lightbulb\""));

    let strict = CodegenOptions {
        check_sockets: true,
        ..CodegenOptions::default()
    };
    assert_eq!(generate_with(&ws, registry(), &strict), "");
}

#[test]
fn test_generation_is_deterministic() {
    let d = doc(
        vec![chain(vec![
            create_shape(
                "a",
                None,
                shape_block("box", "ab", Some(colour_material("am", "#ff00ff"))),
                coords("ac", 1.0, 0.0, -1.0),
            ),
            json!({ "type": "move_shape_towards_shape", "id": "mv" }),
        ])],
        vec![var("x", "x", "SHAPE")],
    );
    let ws = workspace(&d);
    let first = generate(&ws);
    for _ in 0..100 {
        assert_eq!(generate(&ws), first);
    }
}
