//! Checks that generated modules are valid Python.
//!
//! Requires the `testing` feature and a `python3` on PATH; the test is a
//! no-op when no interpreter is found.

use pypoet_codegen::{
    Block, DocString, Module, NO_ARGS, NoopFormatter,
    testing::{PythonChecker, assert_generates_valid_code},
};

#[test]
fn test_generated_module_compiles() {
    if !PythonChecker::is_available() {
        eprintln!("python3 not found, skipping");
        return;
    }

    let module = Module::new("shapes")
        .append(Block::statement("import math"))
        .append(
            Block::class("Circle", NO_ARGS)
                .docstring(DocString::new("A circle.").arg("radius"))
                .append(
                    Block::define("__init__", ["self", "radius"])
                        .append(Block::statement("self.radius = radius")),
                )
                .append(
                    Block::define("area", ["self"])
                        .docstring(DocString::new("Area.").returns("float"))
                        .returns("math.pi * self.radius ** 2"),
                ),
        )
        .append(
            Block::define("largest", ["circles"])
                .append(Block::statement("best = None"))
                .append(
                    Block::for_loop("c", "circles").append(
                        Block::if_("best is None or c.area() > best.area()")
                            .append(Block::statement("best = c")),
                    ),
                )
                .returns("best"),
        );

    assert_generates_valid_code(
        |dir| {
            module.write_to(dir, &NoopFormatter)?;
            Ok(())
        },
        &PythonChecker,
    )
    .unwrap();
}
