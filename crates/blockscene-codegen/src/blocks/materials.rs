use blockscene_types::{Block, BlockShape, Category, Order, SocketTag};

use super::{colour, dropdown, input, BlockDef, Registry, COLOUR};
use crate::generator::Generator;

const COLOUR_PICKER: BlockShape = BlockShape {
    kind: "colour_picker",
    message: "%1",
    args: &[colour("COLOUR", "#ff0000")],
    output: Some(SocketTag::Colour),
    category: Category::Materials,
    tooltip: "A colour.",
    inputs_inline: true,
};

const COLOR_MATERIAL: BlockShape = BlockShape {
    kind: "color_material",
    message: "colour material %1",
    args: &[input("COLOR", COLOUR)],
    output: Some(SocketTag::Material),
    category: Category::Materials,
    tooltip: "A plain coloured material.",
    inputs_inline: true,
};

const TEXTURE_MATERIAL: BlockShape = BlockShape {
    kind: "texture_material",
    message: "texture %1",
    args: &[dropdown(
        "TEXTURE",
        &[
            ("wood", "wood"),
            ("brick", "brick"),
            ("grass", "grass"),
            ("marble", "marble"),
            ("metal", "metal"),
        ],
    )],
    output: Some(SocketTag::Material),
    category: Category::Materials,
    tooltip: "A textured material.",
    inputs_inline: true,
};

pub(crate) fn register(reg: &mut Registry) {
    reg.register(BlockDef::value(COLOUR_PICKER, colour_picker, None));
    reg.register(BlockDef::value(COLOR_MATERIAL, color_material, None));
    reg.register(BlockDef::value(TEXTURE_MATERIAL, texture_material, None));
}

fn colour_picker(g: &mut Generator<'_>, block: &Block) -> Option<(String, Order)> {
    Some((g.field_literal(block, "COLOUR"), Order::Atomic))
}

fn color_material(g: &mut Generator<'_>, block: &Block) -> Option<(String, Order)> {
    let colour = g.value_to_code(block, "COLOR", Order::None)?;
    let code = g.descriptor(block, "color", &[("c", colour)]);
    Some((code, Order::Atomic))
}

fn texture_material(g: &mut Generator<'_>, block: &Block) -> Option<(String, Order)> {
    let texture = g.field_literal(block, "TEXTURE");
    let code = g.descriptor(block, "texture", &[("t", texture)]);
    Some((code, Order::Atomic))
}
