use blockscene_types::{Block, BlockShape, Category, Order};

use super::{input, line, BlockDef, Registry, COORDS};
use crate::generator::Generator;
use crate::runtime::RuntimeOp;

const MOVE_CAMERA: BlockShape = BlockShape {
    kind: "move_camera",
    message: "move camera to %1",
    args: &[input("COORDS", COORDS)],
    output: None,
    category: Category::Camera,
    tooltip: "Move the camera to the given coordinates.",
    inputs_inline: true,
};

pub(crate) fn register(reg: &mut Registry) {
    reg.register(BlockDef::statement(
        MOVE_CAMERA,
        move_camera,
        Some(RuntimeOp::MoveCamera),
    ));
}

fn move_camera(g: &mut Generator<'_>, block: &Block) -> String {
    let Some(coords) = g.value_to_code(block, "COORDS", Order::None) else {
        return String::new();
    };
    line(g.runtime_call(block, &[coords]))
}
