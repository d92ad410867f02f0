use blockscene_types::{Block, BlockShape, Category};

use super::{colour, line, BlockDef, Registry};
use crate::generator::Generator;
use crate::runtime::RuntimeOp;

const SET_SKY_COLOR: BlockShape = BlockShape {
    kind: "set_sky_color",
    message: "set sky colour to %1",
    args: &[colour("COLOR", "#87ceeb")],
    output: None,
    category: Category::Scene,
    tooltip: "Set the background colour of the scene.",
    inputs_inline: true,
};

pub(crate) fn register(reg: &mut Registry) {
    reg.register(BlockDef::statement(
        SET_SKY_COLOR,
        set_sky_color,
        Some(RuntimeOp::SetSkyColor),
    ));
}

fn set_sky_color(g: &mut Generator<'_>, block: &Block) -> String {
    let colour = g.field_literal(block, "COLOR");
    line(g.runtime_call(block, &[colour]))
}
