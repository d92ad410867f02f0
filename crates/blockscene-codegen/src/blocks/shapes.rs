//! Shape creation, movement, and the shape descriptors.

use blockscene_types::{Arg, Block, BlockShape, Category, Order, SocketTag};

use super::{
    fresh, input, line, picker, text, BlockDef, Registry, COORDS, MATERIAL, NUMBER, SHAPE,
};
use crate::generator::Generator;
use crate::runtime::RuntimeOp;

const CREATE_SHAPE: BlockShape = BlockShape {
    kind: "create_shape",
    message: "create shape as %1 %2 at %3",
    args: &[
        fresh("VAR", SocketTag::Shape, "shape"),
        input("SHAPE", SHAPE),
        input("COORDS", COORDS),
    ],
    output: None,
    category: Category::Shapes,
    tooltip: "Create a shape and place it in the scene.",
    inputs_inline: false,
};

const CREATE_SHAPE_AND_ADD_TO: BlockShape = BlockShape {
    kind: "create_shape_and_add_to",
    message: "create shape as %1 %2 add to %3 at %4",
    args: &[
        fresh("VAR", SocketTag::Shape, "shape"),
        input("SHAPE", SHAPE),
        picker("PARENT", SocketTag::Shape, "shape_1"),
        input("COORDS", COORDS),
    ],
    output: None,
    category: Category::Shapes,
    tooltip: "Create a shape as a child of another shape.",
    inputs_inline: false,
};

const MOVE_SHAPE_TOWARDS_SHAPE: BlockShape = BlockShape {
    kind: "move_shape_towards_shape",
    message: "move %1 towards %2 by %3 steps",
    args: &[
        picker("SHAPE1", SocketTag::Shape, "shape_1"),
        picker("SHAPE2", SocketTag::Shape, "shape_2"),
        input("STEPS", NUMBER),
    ],
    output: None,
    category: Category::Shapes,
    tooltip: "Move one shape towards another.",
    inputs_inline: true,
};

const PRIMITIVE_ARGS: &[Arg] = &[input("MATERIAL", MATERIAL), input("SCALE", NUMBER)];

/// Primitive shapes share one argument layout and one rule; the descriptor
/// type is the block kind.
const fn primitive(kind: &'static str, message: &'static str, tooltip: &'static str) -> BlockShape {
    BlockShape {
        kind,
        message,
        args: PRIMITIVE_ARGS,
        output: Some(SocketTag::Shape),
        category: Category::Shapes,
        tooltip,
        inputs_inline: true,
    }
}

const CUSTOM_OBJECT: BlockShape = BlockShape {
    kind: "custom_object",
    message: "custom object %1 model %2 material %3",
    args: &[
        text("NAME", "object"),
        text("MODEL", "model.glb"),
        input("MATERIAL", MATERIAL),
    ],
    output: Some(SocketTag::Shape),
    category: Category::Shapes,
    tooltip: "A shape loaded from a model file.",
    inputs_inline: true,
};

pub(crate) fn register(reg: &mut Registry) {
    reg.register(BlockDef::statement(
        CREATE_SHAPE,
        create_shape,
        Some(RuntimeOp::CreateShape),
    ));
    reg.register(BlockDef::statement(
        CREATE_SHAPE_AND_ADD_TO,
        create_shape_and_add_to,
        Some(RuntimeOp::CreateShapeAndAddTo),
    ));
    reg.register(BlockDef::statement(
        MOVE_SHAPE_TOWARDS_SHAPE,
        move_shape_towards_shape,
        Some(RuntimeOp::MoveShapeTowardsShape),
    ));
    for shape in [
        primitive("box", "box with material %1 scale %2", "A box."),
        primitive("sphere", "sphere with material %1 scale %2", "A sphere."),
        primitive("cylinder", "cylinder with material %1 scale %2", "A cylinder."),
        primitive("cone", "cone with material %1 scale %2", "A cone."),
    ] {
        reg.register(BlockDef::value(shape, primitive_shape, None));
    }
    reg.register(BlockDef::value(
        CUSTOM_OBJECT,
        custom_object,
        Some(RuntimeOp::CustomObject),
    ));
}

fn create_shape(g: &mut Generator<'_>, block: &Block) -> String {
    let Some(shape) = g.value_to_code(block, "SHAPE", Order::Assignment) else {
        return String::new();
    };
    let Some(coords) = g.value_to_code(block, "COORDS", Order::None) else {
        return String::new();
    };
    let var = g.variable_field(block, "VAR");
    let call = g.runtime_call(block, &[var.clone(), coords]);
    format!("{var} = {shape}; {call};")
}

fn create_shape_and_add_to(g: &mut Generator<'_>, block: &Block) -> String {
    let Some(shape) = g.value_to_code(block, "SHAPE", Order::Assignment) else {
        return String::new();
    };
    let Some(coords) = g.value_to_code(block, "COORDS", Order::None) else {
        return String::new();
    };
    let var = g.variable_field(block, "VAR");
    let parent = g.variable_field(block, "PARENT");
    let call = g.runtime_call(block, &[var.clone(), parent, coords]);
    format!("{var} = {shape}; {call};")
}

fn move_shape_towards_shape(g: &mut Generator<'_>, block: &Block) -> String {
    let shape = g.variable_field(block, "SHAPE1");
    let target = g.variable_field(block, "SHAPE2");
    let steps = g
        .value_to_code(block, "STEPS", Order::None)
        .unwrap_or_else(|| "1".to_string());
    line(g.runtime_call(block, &[shape, target, steps]))
}

fn primitive_shape(g: &mut Generator<'_>, block: &Block) -> Option<(String, Order)> {
    let material = g.value_to_code(block, "MATERIAL", Order::None)?;
    let scale = g
        .value_to_code(block, "SCALE", Order::None)
        .unwrap_or_else(|| "1".to_string());
    let code = g.descriptor(block, &block.kind, &[("m", material), ("s", scale)]);
    Some((code, Order::Atomic))
}

fn custom_object(g: &mut Generator<'_>, block: &Block) -> Option<(String, Order)> {
    let model = g.field_literal(block, "MODEL");
    let name = g.field_literal(block, "NAME");
    let object = g.runtime_call(block, &[model, name]);
    let mut props = vec![("o", object)];
    if let Some(material) = g.value_to_code(block, "MATERIAL", Order::None) {
        props.push(("m", material));
    }
    let code = g.descriptor(block, "custom", &props);
    Some((code, Order::Atomic))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitives_share_layout() {
        let reg = crate::blocks::registry();
        let a = reg.get("box").unwrap().shape;
        let b = reg.get("cone").unwrap().shape;
        assert_eq!(a.args, b.args);
        assert_eq!(a.output, Some(SocketTag::Shape));
        assert!(a.message.starts_with("box"));
    }
}
