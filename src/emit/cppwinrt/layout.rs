use super::helpers::ANIMATION_CONTROLLER;
use super::{direct, start_animations};
use crate::emit::builder::CodeBuilder;
use crate::emit::factory::{EmitContext, SourceLayout};
use crate::foundation::error::{CodegenError, CodegenResult};
use crate::plan::order::EmissionOrder;
use crate::plan::storage::field_name;

const BIND_CONTROLLERS: &str = "BindAnimationControllers";
const INDENT: &str = "    ";

const INCLUDES: &[&str] = &[
    "#include <winrt/Windows.Foundation.h>",
    "#include <winrt/Windows.Foundation.Numerics.h>",
    "#include <winrt/Windows.UI.h>",
    "#include <winrt/Windows.UI.Composition.h>",
];

/// One scoped block per controller entry: fetch the controller from the started property, apply
/// the pause flag, then start the controller's own bindings on it.
pub(super) fn deferred_bind(ctx: &mut EmitContext<'_>) -> CodegenResult<String> {
    let entries = ctx.scheduler.controllers().entries().to_vec();
    let mut b = CodeBuilder::new();
    b.line(format!("void {BIND_CONTROLLERS}()"));
    b.open_scope();
    for entry in &entries {
        ctx.use_helper(ANIMATION_CONTROLLER);
        let target = ctx.call_factory_from_for(entry.controller, ctx.node(entry.target).object)?;
        if !target.is_stored() {
            return Err(CodegenError::invariant(
                ctx.node(entry.target).label(),
                "controller target has no stored field",
            ));
        }
        let property = ctx.stringifier.string(&entry.property);
        let paused = ctx.stringifier.bool(entry.paused);
        let steps = ctx
            .scheduler
            .schedule_controller(ctx.graph, ctx.registry, entry.controller)?;

        b.open_scope();
        if ctx.config.description_comments {
            let text = format!(
                "{} on {}.{}",
                ctx.node(entry.controller).name,
                ctx.node(entry.target).name,
                entry.property
            );
            b.comment(&text);
        }
        b.line(format!(
            "auto controller = GetAnimationController({}, {property}, {paused});",
            direct(&target)
        ));
        start_animations(ctx, entry.controller, &mut b, "controller", &steps)?;
        b.close_scope();
    }
    b.close_scope();
    tracing::debug!(controllers = entries.len(), "deferred bind emitted");
    Ok(b.finish())
}

/// Constructor initializing stored fields in emission order, then one accessor per root.
pub(super) fn entry(ctx: &EmitContext<'_>, order: &EmissionOrder) -> CodegenResult<String> {
    let class = ctx.stringifier.identifier(&ctx.config.class_name);
    let mut b = CodeBuilder::new();
    b.line("public:");
    b.line(format!("{class}(Compositor const& compositor)"));
    b.line(format!("{INDENT}: _c{{ compositor }}"));
    b.open_scope();
    for idx in order.iter() {
        let node = ctx.node(idx);
        if let Some(id) = node.field_id {
            b.line(format!("{} = {}();", field_name(node.category, id), node.name));
        }
    }
    b.line(format!("{BIND_CONTROLLERS}();"));
    b.close_scope();

    for &root in &ctx.graph.roots {
        let idx = ctx.registry.require(root)?;
        let node = ctx.node(idx);
        let Some(id) = node.field_id else {
            return Err(CodegenError::invariant(node.label(), "root has no stored field"));
        };
        b.blank();
        b.line(format!(
            "{} Get{}() const",
            ctx.stringifier.field_type_name(node.type_name),
            node.name
        ));
        b.open_scope();
        b.line(format!("return {};", field_name(node.category, id)));
        b.close_scope();
    }
    Ok(b.finish())
}

/// Header plus the class shell around the units.
pub(super) fn source_layout(ctx: &EmitContext<'_>) -> CodegenResult<SourceLayout> {
    let s = ctx.stringifier;
    let class = s.identifier(&ctx.config.class_name);
    let namespace = s.namespace(&ctx.config.namespace);
    let root = ctx
        .graph
        .roots
        .first()
        .ok_or_else(|| CodegenError::validation("scene graph declares no roots"))?;
    let root_node = ctx.node(ctx.registry.require(*root)?);
    let root_type = s.field_type_name(root_node.type_name);

    let mut header = String::new();
    header.push_str("#pragma once\n");
    header.push_str("// Generated by scenegen. Do not edit.\n");
    header.push_str(&format!("{}\n", INCLUDES[3]));
    header.push('\n');
    header.push_str(&format!("namespace {namespace}\n{{\n"));
    header.push_str(&format!(
        "{INDENT}winrt::Windows::UI::Composition::{root_type} Create{class}(winrt::Windows::UI::Composition::Compositor const& compositor);\n"
    ));
    header.push_str("}\n");

    let mut prologue = String::new();
    prologue.push_str("// Generated by scenegen. Do not edit.\n");
    prologue.push_str(&format!("#include \"{class}.h\"\n"));
    prologue.push_str("#include <variant>\n");
    for include in INCLUDES {
        prologue.push_str(&format!("{include}\n"));
    }
    prologue.push('\n');
    for using in [
        "winrt::Windows::Foundation",
        "winrt::Windows::Foundation::Numerics",
        "winrt::Windows::UI",
        "winrt::Windows::UI::Composition",
    ] {
        prologue.push_str(&format!("using namespace {using};\n"));
    }
    prologue.push('\n');
    prologue.push_str(&format!("namespace {namespace}\n{{\n"));
    prologue.push_str(&format!("{INDENT}class {class} final\n{INDENT}{{\n"));
    let member = INDENT.repeat(2);
    prologue.push_str(&format!("{member}using TSelf = {class};\n"));
    prologue.push_str(&format!(
        "{member}static constexpr int64_t c_durationTicks{{ {} }};\n",
        ctx.config.default_duration.ticks
    ));
    prologue.push_str(&format!("{member}Compositor const _c{{ nullptr }};\n"));
    for category in ctx.registry.stored_categories() {
        prologue.push('\n');
        prologue.push_str(&format!("{member}// {category}\n"));
        for idx in ctx.registry.stored_in(category) {
            let node = ctx.node(idx);
            let Some(id) = node.field_id else { continue };
            prologue.push_str(&format!(
                "{member}{} {}{{ nullptr }};\n",
                s.field_type_name(node.type_name),
                field_name(category, id)
            ));
        }
    }
    prologue.push('\n');

    let mut epilogue = String::new();
    epilogue.push_str(&format!("{INDENT}}};\n\n"));
    epilogue.push_str(&format!(
        "{INDENT}{root_type} Create{class}(Compositor const& compositor)\n{INDENT}{{\n"
    ));
    epilogue.push_str(&format!(
        "{member}return {class}(compositor).Get{}();\n",
        root_node.name
    ));
    epilogue.push_str(&format!("{INDENT}}}\n"));
    epilogue.push_str("}\n");

    Ok(SourceLayout {
        header,
        prologue,
        epilogue,
        body_depth: 2,
    })
}
