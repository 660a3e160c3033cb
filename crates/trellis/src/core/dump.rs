use std::io::Write;

use comfy_table::{Cell, Color as CellColor, ContentArrangement, Table, presets::UTF8_FULL};
use termcolor::{Buffer, Color, ColorSpec, WriteColor};

use crate::{
    core::{id::NodeId, tree::Tree},
    error::{Error, Result},
    geom::Rect,
};

/// Traverses a subtree and returns an indented, colored listing of each
/// node's kind, name, rect and state. This is a debug function.
pub fn dump(tree: &Tree, root: impl Into<NodeId>) -> Result<String> {
    let mut buffer = Buffer::ansi();
    dump_node(&mut buffer, tree, root.into(), 0)?;
    Ok(String::from_utf8_lossy(buffer.as_slice()).into_owned())
}

/// Like [`dump`], without color codes.
pub fn dump_plain(tree: &Tree, root: impl Into<NodeId>) -> Result<String> {
    let mut buffer = Buffer::no_color();
    dump_node(&mut buffer, tree, root.into(), 0)?;
    Ok(String::from_utf8_lossy(buffer.as_slice()).into_owned())
}

/// Render a subtree as a table with one row per node, in pre-order.
pub fn dump_table(tree: &Tree, root: impl Into<NodeId>) -> Result<String> {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["node", "kind", "name", "rect", "flags"]);
    for id in tree.subtree_pre_order(root.into()) {
        let node = tree.node(id).ok_or(Error::NodeNotFound(id))?;
        let depth = depth_of(tree, id);
        table.add_row(vec![
            Cell::new(format!("{}{id:?}", "  ".repeat(depth))).fg(CellColor::Green),
            Cell::new(node.kind()),
            Cell::new(node.name().unwrap_or("")),
            Cell::new(fmt_rect(&tree.absolute_rect(id)?)),
            Cell::new(flags(tree, id).join(", ")),
        ]);
    }
    Ok(table.to_string())
}

/// Number of ancestors of a node.
fn depth_of(tree: &Tree, id: NodeId) -> usize {
    let mut depth = 0;
    let mut cur = tree.parent_of(id);
    while let Some(p) = cur {
        depth += 1;
        cur = tree.parent_of(p);
    }
    depth
}

/// `x, y, w × h`
fn fmt_rect(r: &Rect) -> String {
    format!("{}, {}, {} × {}", r.pos.x, r.pos.y, r.size.x, r.size.y)
}

/// State indicators for a node.
fn flags(tree: &Tree, id: NodeId) -> Vec<&'static str> {
    let mut out = Vec::new();
    if let Some(node) = tree.node(id) {
        if node.hidden() {
            out.push("hidden");
        }
        if node.layout_dirty() {
            out.push("dirty");
        }
    }
    if !tree.is_enabled(id) {
        out.push("disabled");
    }
    out
}

/// Helper to write an indented, colored label followed by a value.
fn write_field(buffer: &mut Buffer, indent: &str, label: &str, value: &str) -> Result<()> {
    write!(buffer, "{indent}  ")?;
    buffer.set_color(ColorSpec::new().set_fg(Some(Color::Green)))?;
    write!(buffer, "{label}")?;
    buffer.reset()?;
    writeln!(buffer, " {value}")?;
    Ok(())
}

/// Walk a node subtree and emit formatted debug output.
fn dump_node(buffer: &mut Buffer, tree: &Tree, id: NodeId, level: usize) -> Result<()> {
    let node = tree.node(id).ok_or(Error::NodeNotFound(id))?;
    let indent = "    ".repeat(level);

    write!(buffer, "{indent}")?;
    buffer.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)).set_bold(true))?;
    write!(buffer, "{}", node.kind())?;
    buffer.reset()?;
    if let Some(name) = node.name() {
        write!(buffer, " \"{name}\"")?;
    }
    write!(buffer, " {id:?}")?;

    for (i, flag) in flags(tree, id).iter().enumerate() {
        write!(buffer, "{}", if i == 0 { " " } else { ", " })?;
        let color = match *flag {
            "hidden" => Color::Yellow,
            "disabled" => Color::Red,
            _ => Color::Magenta,
        };
        buffer.set_color(ColorSpec::new().set_fg(Some(color)))?;
        write!(buffer, "{flag}")?;
        buffer.reset()?;
    }
    writeln!(buffer)?;

    write_field(buffer, &indent, "rect:", &fmt_rect(&node.rect()))?;

    if !node.hidden() {
        for child in tree.children_of(id) {
            dump_node(buffer, tree, *child, level + 1)?;
        }
    }
    Ok(())
}
