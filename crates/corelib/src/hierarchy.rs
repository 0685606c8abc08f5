//! Transform hierarchy: parented scene nodes resolved by depth-first traversal.
//!
//! Each node's world matrix is `parent_world * local`. The accumulated matrix
//! is passed down the recursion, so siblings never observe each other's
//! transforms.

use crate::{
    Mat4,
    error::{CoreError, CoreResult},
    transform::Transform,
};

/// Index of a node inside a [`SceneTree`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Clone, Debug)]
pub struct SceneNode {
    pub name: String,
    pub local: Transform,
    /// Slot in the mesh manifest drawn at this node, if any.
    pub mesh: Option<usize>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl SceneNode {
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// Resolved node: world matrix plus the mesh slot it draws.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WorldNode {
    pub id: NodeId,
    pub world: Mat4,
    pub mesh: Option<usize>,
}

#[derive(Clone, Debug, Default)]
pub struct SceneTree {
    nodes: Vec<SceneNode>,
    roots: Vec<NodeId>,
}

impl SceneTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn add_root(
        &mut self,
        name: impl Into<String>,
        local: Transform,
        mesh: Option<usize>,
    ) -> CoreResult<NodeId> {
        let id = self.push(name.into(), local, mesh, None)?;
        self.roots.push(id);
        Ok(id)
    }

    pub fn add_child(
        &mut self,
        parent: NodeId,
        name: impl Into<String>,
        local: Transform,
        mesh: Option<usize>,
    ) -> CoreResult<NodeId> {
        self.node(parent)?;
        let id = self.push(name.into(), local, mesh, Some(parent))?;
        self.nodes[parent.0].children.push(id);
        Ok(id)
    }

    fn push(
        &mut self,
        name: String,
        local: Transform,
        mesh: Option<usize>,
        parent: Option<NodeId>,
    ) -> CoreResult<NodeId> {
        if self.find(&name).is_some() {
            return Err(CoreError::DuplicateName(name));
        }
        let id = NodeId(self.nodes.len());
        self.nodes.push(SceneNode {
            name,
            local,
            mesh,
            parent,
            children: Vec::new(),
        });
        Ok(id)
    }

    pub fn node(&self, id: NodeId) -> CoreResult<&SceneNode> {
        self.nodes.get(id.0).ok_or(CoreError::UnknownNode(id.0))
    }

    pub fn set_local(&mut self, id: NodeId, local: Transform) -> CoreResult<()> {
        let node = self
            .nodes
            .get_mut(id.0)
            .ok_or(CoreError::UnknownNode(id.0))?;
        node.local = local;
        Ok(())
    }

    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.nodes
            .iter()
            .position(|n| n.name == name)
            .map(NodeId)
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    /// Resolve every node in depth-first pre-order (roots in insertion order).
    /// `base` is applied above all roots, e.g. the view matrix.
    pub fn world_matrices(&self, base: Mat4) -> Vec<WorldNode> {
        let mut out = Vec::with_capacity(self.nodes.len());
        for &root in &self.roots {
            self.visit(root, base, &mut out);
        }
        out
    }

    fn visit(&self, id: NodeId, parent_world: Mat4, out: &mut Vec<WorldNode>) {
        let node = &self.nodes[id.0];
        let world = parent_world * node.local.matrix();
        out.push(WorldNode {
            id,
            world,
            mesh: node.mesh,
        });
        for &child in &node.children {
            self.visit(child, world, out);
        }
    }
}
