use blockscene_types::{Block, BlockShape, Category, Order, SocketTag};

use super::{input, line, picker, BlockDef, Registry, NUMBER};
use crate::generator::Generator;
use crate::runtime::RuntimeOp;

const SET_MASS: BlockShape = BlockShape {
    kind: "set_mass",
    message: "set mass of %1 to %2",
    args: &[
        picker("VAR", SocketTag::Shape, "shape_1"),
        input("MASS", NUMBER),
    ],
    output: None,
    category: Category::Physics,
    tooltip: "Set the mass of a shape. Zero makes it static.",
    inputs_inline: true,
};

pub(crate) fn register(reg: &mut Registry) {
    reg.register(BlockDef::statement(
        SET_MASS,
        set_mass,
        Some(RuntimeOp::SetMass),
    ));
}

fn set_mass(g: &mut Generator<'_>, block: &Block) -> String {
    let var = g.variable_field(block, "VAR");
    let mass = g
        .value_to_code(block, "MASS", Order::None)
        .unwrap_or_else(|| "1".to_string());
    line(g.runtime_call(block, &[var, mass]))
}
