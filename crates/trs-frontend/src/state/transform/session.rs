//! Per-drag snapshot of the selected nodes

use glam::Vec3;
use trs_core::{NodeId, NodeStore, NodeTransformChange, Trs, TransformOperation};

/// Pre-drag transforms of one selected node
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformEntry {
    pub node: NodeId,
    pub parent_from_node_before: Trs,
    pub world_from_node_before: Trs,
}

impl TransformEntry {
    fn capture(nodes: &dyn NodeStore, node: NodeId) -> Option<Self> {
        Some(Self {
            node,
            parent_from_node_before: nodes.parent_transform(node)?,
            world_from_node_before: nodes.world_transform(node)?,
        })
    }
}

/// Anchor of a selection: mean translation, mean scale, rotation of the last node.
pub fn compute_anchor(nodes: &dyn NodeStore, selection: &[NodeId]) -> Option<Trs> {
    let worlds: Vec<Trs> = selection
        .iter()
        .filter_map(|&node| nodes.world_transform(node))
        .collect();
    let last = worlds.last()?;
    let count = worlds.len() as f32;
    let translation = worlds.iter().map(|w| w.translation).sum::<Vec3>() / count;
    let scale = worlds.iter().map(|w| w.scale).sum::<Vec3>() / count;
    Some(Trs::new(translation, last.rotation, scale))
}

/// Snapshot of the selection taken when a drag (or a numeric anchor edit) starts.
///
/// Every update is computed from the `*_before` transforms, never from the
/// current node state, so repeated updates do not compound.
#[derive(Debug, Clone)]
pub struct TransformSession {
    pub entries: Vec<TransformEntry>,
    pub anchor_initial: Trs,
    pub anchor: Trs,
    /// World position of the hover hit that started the drag
    pub initial_drag_position: Vec3,
    /// Camera to `initial_drag_position`
    pub initial_drag_distance: f32,
    /// Set once any node actually changed
    pub touched: bool,
}

impl TransformSession {
    /// Snapshot `selection`; `None` when no selected node resolves.
    pub fn capture(nodes: &dyn NodeStore, selection: &[NodeId]) -> Option<Self> {
        let entries: Vec<TransformEntry> = selection
            .iter()
            .filter_map(|&node| TransformEntry::capture(nodes, node))
            .collect();
        if entries.is_empty() {
            return None;
        }
        let anchor = compute_anchor(nodes, selection)?;
        Some(Self {
            entries,
            anchor_initial: anchor,
            anchor,
            initial_drag_position: anchor.translation,
            initial_drag_distance: 0.0,
            touched: false,
        })
    }

    pub fn with_drag_start(mut self, position: Vec3, camera_position: Vec3) -> Self {
        self.initial_drag_position = position;
        self.initial_drag_distance = camera_position.distance(position);
        self
    }

    pub fn is_single(&self) -> bool {
        self.entries.len() == 1
    }

    /// Re-read the snapshot of `node` after an external change.
    pub fn refresh(&mut self, nodes: &dyn NodeStore, node: NodeId) -> bool {
        let Some(entry) = self.entries.iter_mut().find(|e| e.node == node) else {
            return false;
        };
        match TransformEntry::capture(nodes, node) {
            Some(fresh) => {
                *entry = fresh;
                true
            }
            None => false,
        }
    }

    /// Write `world_from(entry)` to every unlocked entry and move the anchor.
    ///
    /// An entry whose new world transform equals its snapshot gets its exact
    /// parent transform back instead, so a zero delta is bit-identical.
    pub fn apply(
        &mut self,
        nodes: &mut dyn NodeStore,
        anchor: Trs,
        world_from: impl Fn(&TransformEntry) -> Trs,
    ) {
        self.anchor = anchor;
        for entry in &self.entries {
            if nodes.is_transform_locked(entry.node) {
                continue;
            }
            let world = world_from(entry);
            if world == entry.world_from_node_before {
                if nodes.parent_transform(entry.node) != Some(entry.parent_from_node_before) {
                    if let Err(e) = nodes.set_parent_transform(entry.node, entry.parent_from_node_before) {
                        tracing::warn!("Failed to restore node transform: {}", e);
                    }
                }
                continue;
            }
            if !world.is_finite() {
                tracing::warn!("Skipping non-finite transform for node {}", entry.node);
                continue;
            }
            match nodes.set_world_transform(entry.node, world) {
                Ok(()) => self.touched = true,
                Err(e) => tracing::warn!("Failed to set node transform: {}", e),
            }
        }
    }

    /// Undo record of the session, `None` when nothing was touched.
    pub fn into_operation(
        self,
        nodes: &dyn NodeStore,
        description: impl Into<String>,
    ) -> Option<TransformOperation> {
        if !self.touched {
            return None;
        }
        let mut operation = TransformOperation::new(description);
        for entry in self.entries {
            let after = nodes
                .parent_transform(entry.node)
                .unwrap_or(entry.parent_from_node_before);
            operation.push(NodeTransformChange {
                node: entry.node,
                parent_from_node_before: entry.parent_from_node_before,
                parent_from_node_after: after,
            });
        }
        Some(operation)
    }
}
