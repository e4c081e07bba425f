//! Traversal of JSON syntax trees.
//!
//! Trees are walked generically: every JSON object carrying a `nodeType` is
//! a node, wherever it sits. Typed views over individual node kinds
//! implement [`NodeView`] and are extracted with [`find_typed`].

use serde::Deserialize;
use serde_json::Value;

/// Pre-order iterator over the nodes of a syntax tree.
#[derive(Debug, Clone)]
pub struct Nodes<'a> {
    stack: Vec<&'a Value>,
}

impl<'a> Iterator for Nodes<'a> {
    type Item = &'a Value;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(value) = self.stack.pop() {
            match value {
                Value::Object(fields) => {
                    self.stack.extend(fields.values().rev());
                    if fields.contains_key("nodeType") {
                        return Some(value);
                    }
                }
                Value::Array(items) => self.stack.extend(items.iter().rev()),
                _ => {}
            }
        }
        None
    }
}

/// Returns every node of `tree`, the root included, in pre-order.
pub fn nodes(tree: &Value) -> Nodes<'_> {
    Nodes { stack: vec![tree] }
}

/// Returns the `nodeType` of a node.
pub fn node_type(node: &Value) -> Option<&str> {
    node.get("nodeType").and_then(Value::as_str)
}

/// Returns every node of the given kind.
pub fn find_all<'a>(kind: &'a str, tree: &'a Value) -> impl Iterator<Item = &'a Value> + 'a {
    nodes(tree).filter(move |node| node_type(node) == Some(kind))
}

/// A typed view over one kind of syntax-tree node.
pub trait NodeView: Sized {
    /// The `nodeType` this view applies to.
    const NODE_TYPE: &'static str;

    /// Extracts the view, or `None` if the node lacks a required field.
    fn from_node(node: &Value) -> Option<Self>;
}

/// Returns typed views of every node of kind `T::NODE_TYPE`.
///
/// Nodes missing fields the view requires are skipped.
pub fn find_typed<'a, T: NodeView + 'a>(tree: &'a Value) -> impl Iterator<Item = T> + 'a {
    find_all(T::NODE_TYPE, tree).filter_map(T::from_node)
}

/// An `import` statement.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportDirective {
    /// Resolved path of the imported file.
    pub absolute_path: String,
    /// Id of the source unit the import resolved to at compile time.
    pub source_unit: i64,
}

impl NodeView for ImportDirective {
    const NODE_TYPE: &'static str = "ImportDirective";

    fn from_node(node: &Value) -> Option<Self> {
        Self::deserialize(node).ok()
    }
}

/// A contract, library or interface declaration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractDefinition {
    /// Declared name.
    pub name: String,
    /// `src` descriptor of the declaration.
    pub src: String,
    /// `contract`, `library` or `interface`.
    #[serde(default)]
    pub contract_kind: Option<String>,
}

impl NodeView for ContractDefinition {
    const NODE_TYPE: &'static str = "ContractDefinition";

    fn from_node(node: &Value) -> Option<Self> {
        Self::deserialize(node).ok()
    }
}
