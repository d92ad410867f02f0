//! Light creation and adjustment, plus the light descriptors.

use blockscene_types::{Block, BlockShape, Category, Order, SocketTag};

use super::{colour, fresh, input, line, picker, BlockDef, Registry, COORDS, LIGHT, NUMBER};
use crate::generator::Generator;
use crate::runtime::RuntimeOp;

const CREATE_LIGHT: BlockShape = BlockShape {
    kind: "create_light",
    message: "create light as %1 %2 at %3",
    args: &[
        fresh("VAR", SocketTag::Light, "light"),
        input("LIGHT", LIGHT),
        input("COORDS", COORDS),
    ],
    output: None,
    category: Category::Lighting,
    tooltip: "Create a light and place it in the scene.",
    inputs_inline: false,
};

const MOVE_LIGHT_ALONG: BlockShape = BlockShape {
    kind: "move_light_along",
    message: "move light %1 along %2",
    args: &[
        picker("VAR", SocketTag::Light, "light_1"),
        input("COORDS", COORDS),
    ],
    output: None,
    category: Category::Lighting,
    tooltip: "Move a light by the given offset.",
    inputs_inline: true,
};

const SET_AMBIENT_LIGHT_INTENSITY: BlockShape = BlockShape {
    kind: "set_ambient_light_intensity",
    message: "set ambient light intensity to %1",
    args: &[input("INTENSITY", NUMBER)],
    output: None,
    category: Category::Lighting,
    tooltip: "Set the intensity of the scene's ambient light.",
    inputs_inline: true,
};

const SET_LIGHT_INTENSITY: BlockShape = BlockShape {
    kind: "set_light_intensity",
    message: "set intensity of %1 to %2",
    args: &[
        picker("VAR", SocketTag::Light, "light_1"),
        input("INTENSITY", NUMBER),
    ],
    output: None,
    category: Category::Lighting,
    tooltip: "Set the intensity of a light.",
    inputs_inline: true,
};

const LIGHTBULB: BlockShape = BlockShape {
    kind: "lightbulb",
    message: "lightbulb brightness %1 colour %2",
    args: &[input("BRIGHTNESS", NUMBER), colour("COLOR", "#ffffff")],
    output: Some(SocketTag::Light),
    category: Category::Lighting,
    tooltip: "A point light.",
    inputs_inline: true,
};

const SPOTLIGHT: BlockShape = BlockShape {
    kind: "spotlight",
    message: "spotlight brightness %1 angle %2 colour %3",
    args: &[
        input("BRIGHTNESS", NUMBER),
        input("ANGLE", NUMBER),
        colour("COLOR", "#ffffff"),
    ],
    output: Some(SocketTag::Light),
    category: Category::Lighting,
    tooltip: "A cone-shaped light.",
    inputs_inline: true,
};

pub(crate) fn register(reg: &mut Registry) {
    reg.register(BlockDef::statement(
        CREATE_LIGHT,
        create_light,
        Some(RuntimeOp::CreateLight),
    ));
    reg.register(BlockDef::statement(
        MOVE_LIGHT_ALONG,
        move_light_along,
        Some(RuntimeOp::MoveLightAlong),
    ));
    reg.register(BlockDef::statement(
        SET_AMBIENT_LIGHT_INTENSITY,
        set_ambient_light_intensity,
        Some(RuntimeOp::SetAmbientLightIntensity),
    ));
    reg.register(BlockDef::statement(
        SET_LIGHT_INTENSITY,
        set_light_intensity,
        Some(RuntimeOp::SetLightIntensity),
    ));
    reg.register(BlockDef::value(LIGHTBULB, lightbulb, None));
    reg.register(BlockDef::value(SPOTLIGHT, spotlight, None));
}

fn create_light(g: &mut Generator<'_>, block: &Block) -> String {
    let Some(light) = g.value_to_code(block, "LIGHT", Order::Assignment) else {
        return String::new();
    };
    let Some(coords) = g.value_to_code(block, "COORDS", Order::None) else {
        return String::new();
    };
    let var = g.variable_field(block, "VAR");
    let call = g.runtime_call(block, &[var.clone(), coords]);
    format!("{var} = {light}; {call};")
}

fn move_light_along(g: &mut Generator<'_>, block: &Block) -> String {
    let Some(coords) = g.value_to_code(block, "COORDS", Order::None) else {
        return String::new();
    };
    let var = g.variable_field(block, "VAR");
    line(g.runtime_call(block, &[var, coords]))
}

fn set_ambient_light_intensity(g: &mut Generator<'_>, block: &Block) -> String {
    let intensity = g
        .value_to_code(block, "INTENSITY", Order::None)
        .unwrap_or_else(|| "1".to_string());
    line(g.runtime_call(block, &[intensity]))
}

fn set_light_intensity(g: &mut Generator<'_>, block: &Block) -> String {
    let var = g.variable_field(block, "VAR");
    let intensity = g
        .value_to_code(block, "INTENSITY", Order::None)
        .unwrap_or_else(|| "1".to_string());
    line(g.runtime_call(block, &[var, intensity]))
}

fn lightbulb(g: &mut Generator<'_>, block: &Block) -> Option<(String, Order)> {
    let brightness = g
        .value_to_code(block, "BRIGHTNESS", Order::None)
        .unwrap_or_else(|| "1".to_string());
    let colour = g.field_literal(block, "COLOR");
    let code = g.descriptor(block, "lightbulb", &[("b", brightness), ("c", colour)]);
    Some((code, Order::Atomic))
}

fn spotlight(g: &mut Generator<'_>, block: &Block) -> Option<(String, Order)> {
    let brightness = g
        .value_to_code(block, "BRIGHTNESS", Order::None)
        .unwrap_or_else(|| "1".to_string());
    let angle = g
        .value_to_code(block, "ANGLE", Order::None)
        .unwrap_or_else(|| "45".to_string());
    let colour = g.field_literal(block, "COLOR");
    let code = g.descriptor(
        block,
        "spotlight",
        &[("b", brightness), ("a", angle), ("c", colour)],
    );
    Some((code, Order::Atomic))
}
