use blockscene_types::{Block, BlockShape, Category, SocketTag};

use super::{line, picker, statements, BlockDef, Registry};
use crate::generator::Generator;
use crate::runtime::RuntimeOp;

const ON_CLICK: BlockShape = BlockShape {
    kind: "on_click",
    message: "when %1 is clicked %2",
    args: &[
        picker("VAR", SocketTag::Shape, "shape_1"),
        statements("DO"),
    ],
    output: None,
    category: Category::Events,
    tooltip: "Run the enclosed blocks every time the shape is clicked.",
    inputs_inline: false,
};

pub(crate) fn register(reg: &mut Registry) {
    reg.register(BlockDef::statement(
        ON_CLICK,
        on_click,
        Some(RuntimeOp::OnClick),
    ));
}

/// The handler body runs asynchronously, so awaited statements are legal
/// inside it.
fn on_click(g: &mut Generator<'_>, block: &Block) -> String {
    let var = g.variable_field(block, "VAR");
    let body = g.statement_to_code(block, "DO");
    let handler = if body.is_empty() {
        "async () => {\n}".to_string()
    } else {
        format!("async () => {{\n{body}\n}}")
    };
    line(g.runtime_call(block, &[var, handler]))
}
