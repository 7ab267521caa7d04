//! Undoable transform operations and a simple operation stack

use crate::scene::{NodeId, NodeStore, SceneError};
use crate::transform::Trs;

/// Parent-relative transform of one node before and after an edit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeTransformChange {
    pub node: NodeId,
    pub parent_from_node_before: Trs,
    pub parent_from_node_after: Trs,
}

/// One compound undo record covering every node touched by a single edit.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformOperation {
    pub description: String,
    pub changes: Vec<NodeTransformChange>,
}

impl TransformOperation {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            changes: Vec::new(),
        }
    }

    pub fn push(&mut self, change: NodeTransformChange) {
        self.changes.push(change);
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.changes.iter().map(|c| c.node)
    }

    /// Restore every node's before-transform.
    pub fn undo(&self, nodes: &mut dyn NodeStore) -> Result<(), SceneError> {
        for change in self.changes.iter().rev() {
            nodes.set_parent_transform(change.node, change.parent_from_node_before)?;
        }
        Ok(())
    }

    /// Re-apply every node's after-transform.
    pub fn redo(&self, nodes: &mut dyn NodeStore) -> Result<(), SceneError> {
        for change in &self.changes {
            nodes.set_parent_transform(change.node, change.parent_from_node_after)?;
        }
        Ok(())
    }
}

/// Receiver of finished operations.
pub trait UndoSink {
    fn push(&mut self, operation: TransformOperation);
}

/// Linear undo / redo history.
#[derive(Debug, Default)]
pub struct OperationStack {
    executed: Vec<TransformOperation>,
    undone: Vec<TransformOperation>,
}

impl OperationStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn can_undo(&self) -> bool {
        !self.executed.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.undone.is_empty()
    }

    pub fn len(&self) -> usize {
        self.executed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.executed.is_empty()
    }

    pub fn last(&self) -> Option<&TransformOperation> {
        self.executed.last()
    }

    /// Undo the latest operation; returns the nodes whose transforms changed.
    pub fn undo(&mut self, nodes: &mut dyn NodeStore) -> Result<Vec<NodeId>, SceneError> {
        let Some(operation) = self.executed.pop() else {
            return Ok(Vec::new());
        };
        if let Err(e) = operation.undo(nodes) {
            tracing::warn!("Undo of '{}' failed: {}", operation.description, e);
            self.executed.push(operation);
            return Err(e);
        }
        tracing::debug!("Undo: {}", operation.description);
        let touched = operation.nodes().collect();
        self.undone.push(operation);
        Ok(touched)
    }

    /// Redo the latest undone operation; returns the nodes whose transforms changed.
    pub fn redo(&mut self, nodes: &mut dyn NodeStore) -> Result<Vec<NodeId>, SceneError> {
        let Some(operation) = self.undone.pop() else {
            return Ok(Vec::new());
        };
        if let Err(e) = operation.redo(nodes) {
            tracing::warn!("Redo of '{}' failed: {}", operation.description, e);
            self.undone.push(operation);
            return Err(e);
        }
        tracing::debug!("Redo: {}", operation.description);
        let touched = operation.nodes().collect();
        self.executed.push(operation);
        Ok(touched)
    }
}

impl UndoSink for OperationStack {
    fn push(&mut self, operation: TransformOperation) {
        tracing::debug!(
            "Recorded '{}' ({} nodes)",
            operation.description,
            operation.changes.len()
        );
        self.executed.push(operation);
        self.undone.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Scene;
    use glam::Vec3;

    fn moved_scene() -> (Scene, NodeId, TransformOperation) {
        let mut scene = Scene::new();
        let node = scene.add_node("n", None, Trs::from_translation(Vec3::new(0.1, 0.2, 0.3)));
        let before = scene.parent_transform(node).unwrap();
        let after = before.translated(Vec3::new(1.0, 0.0, 0.0));
        scene.set_parent_transform(node, after).unwrap();

        let mut op = TransformOperation::new("Move");
        op.push(NodeTransformChange {
            node,
            parent_from_node_before: before,
            parent_from_node_after: after,
        });
        (scene, node, op)
    }

    #[test]
    fn test_undo_redo_roundtrip() {
        let (mut scene, node, op) = moved_scene();
        let before = op.changes[0].parent_from_node_before;
        let after = op.changes[0].parent_from_node_after;

        let mut stack = OperationStack::new();
        stack.push(op);
        assert!(stack.can_undo());

        let touched = stack.undo(&mut scene).unwrap();
        assert_eq!(touched, vec![node]);
        assert_eq!(scene.parent_transform(node), Some(before));
        assert!(stack.can_redo());

        stack.redo(&mut scene).unwrap();
        assert_eq!(scene.parent_transform(node), Some(after));
    }

    #[test]
    fn test_push_clears_redo() {
        let (mut scene, _, op) = moved_scene();
        let mut stack = OperationStack::new();
        stack.push(op.clone());
        stack.undo(&mut scene).unwrap();
        stack.push(op);
        assert!(!stack.can_redo());
        assert_eq!(stack.len(), 1);
    }

    #[test]
    fn test_undo_empty_stack() {
        let mut scene = Scene::new();
        let mut stack = OperationStack::new();
        assert!(stack.undo(&mut scene).unwrap().is_empty());
        assert!(stack.redo(&mut scene).unwrap().is_empty());
    }
}
