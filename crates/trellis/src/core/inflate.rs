//! Build widget subtrees from description trees.
//!
//! A [`Desc`] is plain serde data: a widget kind, an optional name, layout
//! parameters, free-form properties and children. The [`Inflater`] owns a
//! registry of factories keyed by kind and turns descriptions into nodes.

use std::{collections::HashMap, fmt};

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::{
    core::{id::NodeId, tree::Tree},
    error::{Error, Result},
    geom::{Axis, Sides},
    layout::{Align, Dim, Lp},
    widget::Widget,
    widgets::{Blank, Book, Container, MinProxy, NinePatchButton, NinePatchToggle, Tab, TabGroup, TableRow},
};

/// Layout parameters as they appear in a description.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LpDesc {
    /// Horizontal dimension.
    pub dx: Dim,
    /// Vertical dimension.
    pub dy: Dim,
    /// Share of leftover space.
    pub weight: f32,
    /// Horizontal alignment.
    pub align_x: Align,
    /// Vertical alignment.
    pub align_y: Align,
}

impl From<LpDesc> for Lp {
    fn from(d: LpDesc) -> Self {
        Self::min()
            .dx(d.dx)
            .dy(d.dy)
            .weight(d.weight)
            .align(Axis::X, d.align_x)
            .align(Axis::Y, d.align_y)
    }
}

/// A node in a description tree.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Desc {
    /// Widget kind, looked up in the inflater's registry.
    pub kind: String,
    /// Name for [`Tree::find`] lookups.
    #[serde(default)]
    pub name: Option<String>,
    /// Layout parameters.
    #[serde(default)]
    pub lp: LpDesc,
    /// Kind-specific properties.
    #[serde(default)]
    pub props: Map<String, Value>,
    /// Children, in order.
    #[serde(default)]
    pub children: Vec<Self>,
}

impl Desc {
    /// A description of the given kind with no children.
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            ..Self::default()
        }
    }

    /// Set the name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the layout parameters.
    pub fn lp(mut self, lp: LpDesc) -> Self {
        self.lp = lp;
        self
    }

    /// Set a property.
    pub fn prop(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.props.insert(key.into(), value.into());
        self
    }

    /// Append a child.
    pub fn child(mut self, child: Self) -> Self {
        self.children.push(child);
        self
    }
}

/// Typed access to a description's properties.
#[derive(Debug, Clone, Copy)]
pub struct Props<'a> {
    /// Kind, for error messages.
    kind: &'a str,
    /// Raw properties.
    map: &'a Map<String, Value>,
}

impl<'a> Props<'a> {
    /// Error for a property of the wrong shape.
    fn invalid(&self, key: &str, want: &str) -> Error {
        Error::Inflate(format!("{}: property {key:?} must be {want}", self.kind))
    }

    /// A numeric property.
    pub fn f32(&self, key: &str) -> Result<Option<f32>> {
        match self.map.get(key) {
            None => Ok(None),
            Some(v) => v
                .as_f64()
                .map(|n| Some(n as f32))
                .ok_or_else(|| self.invalid(key, "a number")),
        }
    }

    /// A boolean property.
    pub fn bool(&self, key: &str) -> Result<Option<bool>> {
        match self.map.get(key) {
            None => Ok(None),
            Some(v) => v
                .as_bool()
                .map(Some)
                .ok_or_else(|| self.invalid(key, "a boolean")),
        }
    }

    /// A string property.
    pub fn str(&self, key: &str) -> Result<Option<&'a str>> {
        match self.map.get(key) {
            None => Ok(None),
            Some(v) => v
                .as_str()
                .map(Some)
                .ok_or_else(|| self.invalid(key, "a string")),
        }
    }

    /// Border widths: a single number for all sides, or `[left, top, right,
    /// bottom]`.
    pub fn sides(&self, key: &str) -> Result<Sides> {
        let want = "a number or four numbers";
        match self.map.get(key) {
            None => Ok(Sides::default()),
            Some(Value::Array(a)) => {
                let v: Vec<f32> = a
                    .iter()
                    .map(|n| n.as_f64().map(|n| n as f32))
                    .collect::<Option<_>>()
                    .ok_or_else(|| self.invalid(key, want))?;
                match v.as_slice() {
                    [l, t, r, b] => Ok(Sides::try_new(*l, *t, *r, *b)?),
                    _ => Err(self.invalid(key, want)),
                }
            }
            Some(v) => {
                let n = v.as_f64().ok_or_else(|| self.invalid(key, want))? as f32;
                Ok(Sides::try_new(n, n, n, n)?)
            }
        }
    }

    /// A name path: `"a/b/c"` or `["a", "b", "c"]`.
    pub fn path(&self, key: &str) -> Result<Vec<String>> {
        let want = "a path string or a list of names";
        match self.map.get(key) {
            None => Ok(Vec::new()),
            Some(Value::String(s)) => Ok(s
                .split('/')
                .filter(|p| !p.is_empty())
                .map(str::to_owned)
                .collect()),
            Some(Value::Array(a)) => a
                .iter()
                .map(|v| v.as_str().map(str::to_owned))
                .collect::<Option<_>>()
                .ok_or_else(|| self.invalid(key, want)),
            Some(_) => Err(self.invalid(key, want)),
        }
    }
}

/// Builds a widget from its properties.
pub type Factory = Box<dyn Fn(&Props<'_>) -> Result<Box<dyn Widget>>>;

/// How a container takes its inflated children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Adopt {
    /// Plain attach, in order.
    Append,
    /// Pushed as book pages; the last one ends up shown.
    Pages,
    /// Attached as tabs; the first one marked `checked` is activated.
    Tabs,
}

/// A registered kind.
struct Entry {
    /// Widget constructor.
    build: Factory,
    /// Child handling.
    adopt: Adopt,
}

/// Registry of widget factories keyed by kind name.
pub struct Inflater {
    /// Factories.
    kinds: HashMap<String, Entry>,
}

impl fmt::Debug for Inflater {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut kinds: Vec<&String> = self.kinds.keys().collect();
        kinds.sort();
        f.debug_struct("Inflater").field("kinds", &kinds).finish()
    }
}

impl Default for Inflater {
    fn default() -> Self {
        Self::new()
    }
}

impl Inflater {
    /// An inflater knowing the built-in widgets.
    pub fn new() -> Self {
        let mut inf = Self::empty();
        inf.add("row", Adopt::Append, |_| Ok(Box::new(Container::row())));
        inf.add("column", Adopt::Append, |_| Ok(Box::new(Container::column())));
        inf.add("pile", Adopt::Append, |_| Ok(Box::new(Container::pile())));
        inf.add("container", Adopt::Append, |p| {
            Ok(Box::new(
                Container::trivial().with_clip(p.bool("clip")?.unwrap_or(false)),
            ))
        });
        inf.add("table", Adopt::Append, |_| Ok(Box::new(Container::table())));
        inf.add("table_row", Adopt::Append, |_| Ok(Box::new(TableRow::new())));
        inf.add("tab_group", Adopt::Tabs, |_| Ok(Box::new(TabGroup::new())));
        inf.add("tab", Adopt::Append, |p| Ok(Box::new(Tab::new(p.sides("borders")?))));
        inf.add("book", Adopt::Pages, |_| Ok(Box::new(Book::new())));
        inf.add("blank", Adopt::Append, |_| Ok(Box::new(Blank)));
        inf.add("nine_patch_button", Adopt::Append, |p| {
            Ok(Box::new(NinePatchButton::new(p.sides("borders")?)))
        });
        inf.add("nine_patch_toggle", Adopt::Append, |p| {
            let mut t = NinePatchToggle::new(p.sides("borders")?);
            t.toggle.set_checked(p.bool("checked")?.unwrap_or(false));
            Ok(Box::new(t))
        });
        inf.add("min_proxy", Adopt::Append, |p| {
            let mut proxy = MinProxy::new(p.path("target")?);
            if let Some(root) = p.str("root")? {
                proxy = proxy.with_root(root);
            }
            Ok(Box::new(proxy))
        });
        inf
    }

    /// An inflater with no kinds registered.
    pub fn empty() -> Self {
        Self {
            kinds: HashMap::new(),
        }
    }

    /// Register a built-in kind.
    fn add(
        &mut self,
        kind: &str,
        adopt: Adopt,
        build: impl Fn(&Props<'_>) -> Result<Box<dyn Widget>> + 'static,
    ) {
        self.kinds.insert(
            kind.to_owned(),
            Entry {
                build: Box::new(build),
                adopt,
            },
        );
    }

    /// Register a kind. Children of the kind are attached in order. A
    /// previous registration under the same name is replaced.
    pub fn register(
        &mut self,
        kind: impl Into<String>,
        build: impl Fn(&Props<'_>) -> Result<Box<dyn Widget>> + 'static,
    ) {
        let kind = kind.into();
        debug!(%kind, "register widget kind");
        self.add(&kind, Adopt::Append, build);
    }

    /// Is a kind registered?
    pub fn knows(&self, kind: &str) -> bool {
        self.kinds.contains_key(kind)
    }

    /// Inflate a description and attach it under `parent`. On failure
    /// nothing is left in the tree.
    pub fn inflate(&self, tree: &mut Tree, parent: impl Into<NodeId>, desc: &Desc) -> Result<NodeId> {
        let node = self.build(tree, desc)?;
        if let Err(e) = tree.attach(parent, node) {
            tree.remove_subtree(node)?;
            return Err(e);
        }
        Ok(node)
    }

    /// Parse a JSON description and inflate it under `parent`.
    pub fn inflate_json(&self, tree: &mut Tree, parent: impl Into<NodeId>, json: &str) -> Result<NodeId> {
        let desc: Desc = serde_json::from_str(json).map_err(|e| Error::Inflate(e.to_string()))?;
        self.inflate(tree, parent, &desc)
    }

    /// Inflate a description into a detached subtree.
    pub fn build(&self, tree: &mut Tree, desc: &Desc) -> Result<NodeId> {
        let entry = self
            .kinds
            .get(&desc.kind)
            .ok_or_else(|| Error::Inflate(format!("unknown widget kind {:?}", desc.kind)))?;
        let props = Props {
            kind: &desc.kind,
            map: &desc.props,
        };
        let widget = (entry.build)(&props)?;
        let node = tree.create_detached_boxed(widget, desc.lp.into());
        if let Err(e) = self.populate(tree, node, entry.adopt, desc) {
            tree.remove_subtree(node)?;
            return Err(e);
        }
        Ok(node)
    }

    /// Name a freshly built node and inflate its children into it.
    fn populate(&self, tree: &mut Tree, node: NodeId, adopt: Adopt, desc: &Desc) -> Result<()> {
        if let Some(name) = &desc.name {
            tree.set_name(node, name.as_str())?;
        }
        let mut checked = None;
        for child_desc in &desc.children {
            let child = self.build(tree, child_desc)?;
            let attached = match adopt {
                Adopt::Append | Adopt::Tabs => tree.attach(node, child),
                Adopt::Pages => Book::push(tree, node, child),
            };
            if let Err(e) = attached {
                tree.remove_subtree(child)?;
                return Err(e);
            }
            if checked.is_none() && child_desc.props.get("checked") == Some(&Value::Bool(true)) {
                checked = Some(child);
            }
        }
        if let (Adopt::Tabs, Some(tab)) = (adopt, checked) {
            TabGroup::activate(tree, node, tab)?;
        }
        debug!(kind = %desc.kind, children = desc.children.len(), "inflated");
        Ok(())
    }
}
