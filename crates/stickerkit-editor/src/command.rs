//! Commands the editor sends to its host, batched per apply step.

use crate::placement::ClusterLayout;
use crate::pose::PoseUpdate;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use stickerkit_core::{ElementId, Visibility};

/// One change to the host's view tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HostCommand {
    /// Set the listed pose fields on an element.
    UpdatePose { id: ElementId, update: PoseUpdate },
    /// Position the action buttons and pose the cluster container.
    PlaceCluster { layout: ClusterLayout },
    /// Show or hide the action cluster.
    ClusterVisibility { visibility: Visibility },
    /// Show or hide the focus decoration on an element.
    Highlight { id: ElementId, visibility: Visibility },
    /// Move an element to the top of the paint order.
    BringToFront { id: ElementId },
    /// Move the action cluster to the top of the paint order.
    BringClusterToFront,
    /// Remove an element from the tree.
    Remove { id: ElementId },
}

/// Commands committed to the host in one pass.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommitBatch {
    commands: SmallVec<[HostCommand; 8]>,
}

impl CommitBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: HostCommand) {
        self.commands.push(command);
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn commands(&self) -> &[HostCommand] {
        &self.commands
    }

    pub fn iter(&self) -> std::slice::Iter<'_, HostCommand> {
        self.commands.iter()
    }
}

impl IntoIterator for CommitBatch {
    type Item = HostCommand;
    type IntoIter = smallvec::IntoIter<[HostCommand; 8]>;

    fn into_iter(self) -> Self::IntoIter {
        self.commands.into_iter()
    }
}

impl<'a> IntoIterator for &'a CommitBatch {
    type Item = &'a HostCommand;
    type IntoIter = std::slice::Iter<'a, HostCommand>;

    fn into_iter(self) -> Self::IntoIter {
        self.commands.iter()
    }
}

impl FromIterator<HostCommand> for CommitBatch {
    fn from_iter<I: IntoIterator<Item = HostCommand>>(iter: I) -> Self {
        Self {
            commands: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_keeps_order() {
        let mut batch = CommitBatch::new();
        assert!(batch.is_empty());
        batch.push(HostCommand::Highlight {
            id: ElementId::new(1),
            visibility: Visibility::Hidden,
        });
        batch.push(HostCommand::ClusterVisibility {
            visibility: Visibility::Hidden,
        });
        batch.push(HostCommand::Remove {
            id: ElementId::new(1),
        });
        assert_eq!(batch.len(), 3);
        assert_eq!(
            batch.commands().last(),
            Some(&HostCommand::Remove {
                id: ElementId::new(1)
            })
        );
    }

    #[test]
    fn test_command_wire_format() {
        let json = serde_json::to_string(&HostCommand::UpdatePose {
            id: ElementId::new(2),
            update: PoseUpdate::translation(1.0, 2.0),
        })
        .unwrap();
        assert_eq!(
            json,
            r#"{"kind":"update_pose","id":2,"update":{"translation_x":1.0,"translation_y":2.0}}"#
        );
    }
}
