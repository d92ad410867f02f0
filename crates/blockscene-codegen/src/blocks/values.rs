//! Literal values and variable getters.

use blockscene_types::{Block, BlockShape, Category, Order, SocketTag};

use super::{number, picker, BlockDef, Registry};
use crate::generator::Generator;

const COORDS: BlockShape = BlockShape {
    kind: "coords",
    message: "x %1 y %2 z %3",
    args: &[number("X", 0.0), number("Y", 0.0), number("Z", 0.0)],
    output: Some(SocketTag::Coords),
    category: Category::Values,
    tooltip: "A point in the scene.",
    inputs_inline: true,
};

const MATH_NUMBER: BlockShape = BlockShape {
    kind: "math_number",
    message: "%1",
    args: &[number("NUM", 0.0)],
    output: Some(SocketTag::Number),
    category: Category::Values,
    tooltip: "A number.",
    inputs_inline: true,
};

const GET_SHAPE: BlockShape = BlockShape {
    kind: "get_shape",
    message: "%1",
    args: &[picker("VAR", SocketTag::Shape, "shape_1")],
    output: Some(SocketTag::Shape),
    category: Category::Variables,
    tooltip: "The shape stored in a variable.",
    inputs_inline: true,
};

const GET_LIGHT: BlockShape = BlockShape {
    kind: "get_light",
    message: "%1",
    args: &[picker("VAR", SocketTag::Light, "light_1")],
    output: Some(SocketTag::Light),
    category: Category::Variables,
    tooltip: "The light stored in a variable.",
    inputs_inline: true,
};

pub(crate) fn register(reg: &mut Registry) {
    reg.register(BlockDef::value(COORDS, coords, None));
    reg.register(BlockDef::value(MATH_NUMBER, math_number, None));
    reg.register(BlockDef::value(GET_SHAPE, get_variable, None));
    reg.register(BlockDef::value(GET_LIGHT, get_variable, None));
}

fn coords(g: &mut Generator<'_>, block: &Block) -> Option<(String, Order)> {
    let x = g.field_number(block, "X");
    let y = g.field_number(block, "Y");
    let z = g.field_number(block, "Z");
    Some((format!("[{x},{y},{z}]"), Order::Atomic))
}

fn math_number(g: &mut Generator<'_>, block: &Block) -> Option<(String, Order)> {
    Some((g.field_number(block, "NUM"), Order::Atomic))
}

fn get_variable(g: &mut Generator<'_>, block: &Block) -> Option<(String, Order)> {
    Some((g.variable_field(block, "VAR"), Order::Atomic))
}
