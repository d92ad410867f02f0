//! Browser-side tests for the JS-facing entry points that take JS values.
//! Run with `wasm-pack test --headless --firefox`.

#![cfg(target_arch = "wasm32")]

use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

const WORKSPACE: &str = r##"{ "blocks": { "languageVersion": 0, "blocks": [
    { "type": "set_sky_color", "id": "sky", "fields": { "COLOR": "#000000" } }
] } }"##;

#[wasm_bindgen_test]
fn compile_with_default_options() {
    let out = blockscene_wasm::compile_with_options(WORKSPACE, JsValue::UNDEFINED).unwrap();
    let json: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(json["script"], "threeD.setSkyColor(\"#000000\");");
}

#[wasm_bindgen_test]
fn compile_with_namespace_option() {
    let options = js_object(&[("runtime_namespace", "scene")]);
    let out = blockscene_wasm::compile_with_options(WORKSPACE, options).unwrap();
    let json: serde_json::Value = serde_json::from_str(&out).unwrap();
    assert_eq!(json["script"], "scene.setSkyColor(\"#000000\");");
}

#[wasm_bindgen_test]
fn new_block_fields_for_unknown_kind_fails() {
    assert!(blockscene_wasm::new_block_fields("{}", "teapot").is_err());
}

fn js_object(entries: &[(&str, &str)]) -> JsValue {
    use serde::Serialize;

    let map: std::collections::BTreeMap<&str, &str> = entries.iter().copied().collect();
    map.serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .unwrap()
}
