//! The runtime target adapter contract.
//!
//! Generated scripts call a fixed surface on the runtime namespace object
//! (`threeD` by default). Each operation has a fixed arity and is either
//! synchronous or asynchronous; asynchronous operations must be awaited
//! before later statements can reference what they create.
//!
//! ```text
//! moveCamera(coords)
//! onClick(shape, handler)
//! createLight(light, coords)                       async
//! moveLightAlong(light, coords)
//! setAmbientLightIntensity(intensity)
//! setLightIntensity(light, intensity)
//! setMass(shape, mass)
//! createShapeAndAddTo(shape, parent, coords)       async
//! createShape(shape, coords)                       async
//! moveShapeTowardsShape(shape, target, steps)
//! setSkyColor(colour)
//! new customObject(model, name)
//! ```

use serde::Serialize;

/// One operation of the runtime surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RuntimeOp {
    MoveCamera,
    OnClick,
    CreateLight,
    MoveLightAlong,
    SetAmbientLightIntensity,
    SetLightIntensity,
    SetMass,
    CreateShapeAndAddTo,
    CreateShape,
    MoveShapeTowardsShape,
    SetSkyColor,
    CustomObject,
}

impl RuntimeOp {
    pub const ALL: [RuntimeOp; 12] = [
        RuntimeOp::MoveCamera,
        RuntimeOp::OnClick,
        RuntimeOp::CreateLight,
        RuntimeOp::MoveLightAlong,
        RuntimeOp::SetAmbientLightIntensity,
        RuntimeOp::SetLightIntensity,
        RuntimeOp::SetMass,
        RuntimeOp::CreateShapeAndAddTo,
        RuntimeOp::CreateShape,
        RuntimeOp::MoveShapeTowardsShape,
        RuntimeOp::SetSkyColor,
        RuntimeOp::CustomObject,
    ];

    /// The member name on the runtime namespace.
    pub fn name(self) -> &'static str {
        match self {
            RuntimeOp::MoveCamera => "moveCamera",
            RuntimeOp::OnClick => "onClick",
            RuntimeOp::CreateLight => "createLight",
            RuntimeOp::MoveLightAlong => "moveLightAlong",
            RuntimeOp::SetAmbientLightIntensity => "setAmbientLightIntensity",
            RuntimeOp::SetLightIntensity => "setLightIntensity",
            RuntimeOp::SetMass => "setMass",
            RuntimeOp::CreateShapeAndAddTo => "createShapeAndAddTo",
            RuntimeOp::CreateShape => "createShape",
            RuntimeOp::MoveShapeTowardsShape => "moveShapeTowardsShape",
            RuntimeOp::SetSkyColor => "setSkyColor",
            RuntimeOp::CustomObject => "customObject",
        }
    }

    /// Number of positional arguments.
    pub fn arity(self) -> usize {
        match self {
            RuntimeOp::MoveCamera
            | RuntimeOp::SetAmbientLightIntensity
            | RuntimeOp::SetSkyColor => 1,
            RuntimeOp::OnClick
            | RuntimeOp::CreateLight
            | RuntimeOp::MoveLightAlong
            | RuntimeOp::SetLightIntensity
            | RuntimeOp::SetMass
            | RuntimeOp::CreateShape
            | RuntimeOp::CustomObject => 2,
            RuntimeOp::CreateShapeAndAddTo | RuntimeOp::MoveShapeTowardsShape => 3,
        }
    }

    /// Whether calls must be `await`ed.
    pub fn is_async(self) -> bool {
        matches!(
            self,
            RuntimeOp::CreateShape | RuntimeOp::CreateShapeAndAddTo | RuntimeOp::CreateLight
        )
    }

    /// Whether the operation is a constructor invoked with `new`.
    pub fn is_constructor(self) -> bool {
        matches!(self, RuntimeOp::CustomObject)
    }
}

/// Render a call to `op` on the runtime namespace `ns`.
///
/// Asynchronous operations are prefixed with `await`, constructors with
/// `new`. No trailing semicolon.
pub fn call(ns: &str, op: RuntimeOp, args: &[String]) -> String {
    debug_assert_eq!(
        args.len(),
        op.arity(),
        "{} takes {} arguments",
        op.name(),
        op.arity()
    );
    let prefix = if op.is_constructor() {
        "new "
    } else if op.is_async() {
        "await "
    } else {
        ""
    };
    format!("{prefix}{ns}.{}({})", op.name(), args.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn async_ops_are_awaited() {
        let code = call(
            "threeD",
            RuntimeOp::CreateShape,
            &["box_1".into(), "[0,0,0]".into()],
        );
        assert_eq!(code, "await threeD.createShape(box_1, [0,0,0])");
    }

    #[test]
    fn sync_ops_are_plain_calls() {
        let code = call("threeD", RuntimeOp::SetSkyColor, &["\"#000000\"".into()]);
        assert_eq!(code, "threeD.setSkyColor(\"#000000\")");
    }

    #[test]
    fn constructors_use_new() {
        let code = call(
            "scene",
            RuntimeOp::CustomObject,
            &["\"duck.glb\"".into(), "\"duck\"".into()],
        );
        assert_eq!(code, "new scene.customObject(\"duck.glb\", \"duck\")");
    }

    #[test]
    fn exactly_three_async_ops() {
        let asyncs: Vec<&str> = RuntimeOp::ALL
            .iter()
            .filter(|op| op.is_async())
            .map(|op| op.name())
            .collect();
        assert_eq!(asyncs, vec!["createLight", "createShapeAndAddTo", "createShape"]);
    }

    #[test]
    fn names_are_unique() {
        let mut names: Vec<&str> = RuntimeOp::ALL.iter().map(|op| op.name()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), RuntimeOp::ALL.len());
    }
}
