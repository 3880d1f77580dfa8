//! In-memory host.
//!
//! `SceneHost` keeps elements in paint order and applies every command the
//! editor sends, the way a real view tree would. It also records each
//! committed batch so callers can inspect exactly what was sent and in
//! which order. Used by the demo binary, the integration tests and benches.
//!
//! The batch log keeps only the most recent [`DEFAULT_BATCH_LIMIT`] batches
//! unless told otherwise; a limit of 0 turns recording off.

use crate::command::{CommitBatch, HostCommand};
use crate::host::EditorHost;
use crate::placement::ClusterLayout;
use crate::pose::ElementPose;
use stickerkit_core::{ElementId, Point, Visibility};
use tracing::warn;

/// Number of committed batches a new scene remembers.
pub const DEFAULT_BATCH_LIMIT: usize = 256;

/// One element in the scene.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneElement {
    pub id: ElementId,
    pub layout_origin: Point,
    pub pose: ElementPose,
    pub highlighted: bool,
}

/// An entry in the paint order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaintItem {
    Element(ElementId),
    Cluster,
}

/// A minimal view tree implementing [`EditorHost`].
#[derive(Debug, Clone)]
pub struct SceneHost {
    parent_origin: Point,
    elements: Vec<SceneElement>,
    paint_order: Vec<PaintItem>,
    cluster_visibility: Visibility,
    cluster_layout: Option<ClusterLayout>,
    batches: Vec<CommitBatch>,
    batch_limit: usize,
    next_id: u64,
}

impl SceneHost {
    /// Creates an empty scene whose surface sits at `parent_origin` on screen.
    pub fn new(parent_origin: Point) -> Self {
        Self {
            parent_origin,
            elements: Vec::new(),
            paint_order: vec![PaintItem::Cluster],
            cluster_visibility: Visibility::Hidden,
            cluster_layout: None,
            batches: Vec::new(),
            batch_limit: DEFAULT_BATCH_LIMIT,
            next_id: 1,
        }
    }

    /// Adds an untransformed element and returns its id. New elements paint
    /// below the cluster.
    pub fn add_element(&mut self, layout_origin: Point, width: f64, height: f64) -> ElementId {
        let id = ElementId::new(self.next_id);
        self.insert(id, layout_origin, ElementPose::with_size(width, height));
        id
    }

    /// Inserts an element with an explicit id and pose.
    pub fn insert(&mut self, id: ElementId, layout_origin: Point, pose: ElementPose) {
        self.next_id = self.next_id.max(id.raw() + 1);
        self.remove_element(id);
        self.elements.push(SceneElement {
            id,
            layout_origin,
            pose,
            highlighted: false,
        });
        let cluster_at = self
            .paint_order
            .iter()
            .position(|item| *item == PaintItem::Cluster)
            .unwrap_or(self.paint_order.len());
        self.paint_order.insert(cluster_at, PaintItem::Element(id));
    }

    pub fn element(&self, id: ElementId) -> Option<&SceneElement> {
        self.elements.iter().find(|e| e.id == id)
    }

    fn element_mut(&mut self, id: ElementId) -> Option<&mut SceneElement> {
        self.elements.iter_mut().find(|e| e.id == id)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Moves an element's layout box, as a relayout would.
    pub fn set_layout_origin(&mut self, id: ElementId, origin: Point) -> bool {
        match self.element_mut(id) {
            Some(element) => {
                element.layout_origin = origin;
                true
            }
            None => false,
        }
    }

    /// Removes an element behind the editor's back.
    pub fn remove_element(&mut self, id: ElementId) -> bool {
        let before = self.elements.len();
        self.elements.retain(|e| e.id != id);
        self.paint_order.retain(|item| *item != PaintItem::Element(id));
        self.elements.len() != before
    }

    /// Bottom-to-top paint order.
    pub fn paint_order(&self) -> &[PaintItem] {
        &self.paint_order
    }

    pub fn cluster_visibility(&self) -> Visibility {
        self.cluster_visibility
    }

    pub fn cluster_layout(&self) -> Option<&ClusterLayout> {
        self.cluster_layout.as_ref()
    }

    /// Ids of elements currently showing the focus decoration.
    pub fn highlighted(&self) -> Vec<ElementId> {
        self.elements
            .iter()
            .filter(|e| e.highlighted)
            .map(|e| e.id)
            .collect()
    }

    /// The recorded batches, oldest first.
    pub fn batches(&self) -> &[CommitBatch] {
        &self.batches
    }

    pub fn batch_limit(&self) -> usize {
        self.batch_limit
    }

    /// Caps the batch log at `limit` entries, dropping the oldest ones.
    pub fn set_batch_limit(&mut self, limit: usize) {
        self.batch_limit = limit;
        self.trim_batches();
    }

    fn trim_batches(&mut self) {
        if self.batches.len() > self.batch_limit {
            let excess = self.batches.len() - self.batch_limit;
            self.batches.drain(..excess);
        }
    }

    pub fn clear_batches(&mut self) {
        self.batches.clear();
    }

    fn raise(&mut self, item: PaintItem) {
        if let Some(index) = self.paint_order.iter().position(|i| *i == item) {
            let item = self.paint_order.remove(index);
            self.paint_order.push(item);
        }
    }

    fn execute(&mut self, command: &HostCommand) {
        match command {
            HostCommand::UpdatePose { id, update } => match self.element_mut(*id) {
                Some(element) => element.pose.apply(update),
                None => warn!("pose update for missing element {}", id),
            },
            HostCommand::PlaceCluster { layout } => self.cluster_layout = Some(*layout),
            HostCommand::ClusterVisibility { visibility } => self.cluster_visibility = *visibility,
            HostCommand::Highlight { id, visibility } => match self.element_mut(*id) {
                Some(element) => element.highlighted = visibility.is_visible(),
                None => warn!("highlight for missing element {}", id),
            },
            HostCommand::BringToFront { id } => self.raise(PaintItem::Element(*id)),
            HostCommand::BringClusterToFront => self.raise(PaintItem::Cluster),
            HostCommand::Remove { id } => {
                if !self.remove_element(*id) {
                    warn!("remove of missing element {}", id);
                }
            }
        }
    }
}

impl Default for SceneHost {
    fn default() -> Self {
        Self::new(Point::ZERO)
    }
}

impl EditorHost for SceneHost {
    fn layout_origin(&self, id: ElementId) -> Option<Point> {
        self.element(id).map(|e| e.layout_origin)
    }

    fn pose(&self, id: ElementId) -> Option<ElementPose> {
        self.element(id).map(|e| e.pose)
    }

    fn parent_origin(&self) -> Point {
        self.parent_origin
    }

    fn apply(&mut self, batch: CommitBatch) {
        for command in &batch {
            self.execute(command);
        }
        if self.batch_limit > 0 {
            self.batches.push(batch);
            self.trim_batches();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pose::PoseUpdate;

    #[test]
    fn test_new_elements_paint_below_cluster() {
        let mut scene = SceneHost::default();
        let a = scene.add_element(Point::ZERO, 10.0, 10.0);
        let b = scene.add_element(Point::ZERO, 10.0, 10.0);
        assert_eq!(
            scene.paint_order(),
            &[PaintItem::Element(a), PaintItem::Element(b), PaintItem::Cluster]
        );
    }

    #[test]
    fn test_apply_executes_in_order_and_records() {
        let mut scene = SceneHost::default();
        let a = scene.add_element(Point::ZERO, 10.0, 10.0);
        let b = scene.add_element(Point::ZERO, 10.0, 10.0);

        let batch: CommitBatch = vec![
            HostCommand::UpdatePose {
                id: a,
                update: PoseUpdate::translation(5.0, 6.0),
            },
            HostCommand::BringToFront { id: a },
            HostCommand::BringClusterToFront,
            HostCommand::Remove { id: b },
        ]
        .into_iter()
        .collect();
        scene.apply(batch);

        assert_eq!(scene.element(a).unwrap().pose.translation_x, 5.0);
        assert_eq!(
            scene.paint_order(),
            &[PaintItem::Element(a), PaintItem::Cluster]
        );
        assert!(scene.element(b).is_none());
        assert_eq!(scene.batches().len(), 1);
    }

    #[test]
    fn test_batch_log_keeps_most_recent() {
        let mut scene = SceneHost::default();
        let a = scene.add_element(Point::ZERO, 10.0, 10.0);
        assert_eq!(scene.batch_limit(), DEFAULT_BATCH_LIMIT);
        scene.set_batch_limit(2);
        for x in 1..=5 {
            let mut batch = CommitBatch::new();
            batch.push(HostCommand::UpdatePose {
                id: a,
                update: PoseUpdate::translation(f64::from(x), 0.0),
            });
            scene.apply(batch);
        }

        assert_eq!(scene.batches().len(), 2);
        assert_eq!(
            scene.batches()[0].commands()[0],
            HostCommand::UpdatePose {
                id: a,
                update: PoseUpdate::translation(4.0, 0.0),
            }
        );
        // Commands still execute when the log is full
        assert_eq!(scene.element(a).unwrap().pose.translation_x, 5.0);

        scene.set_batch_limit(0);
        assert!(scene.batches().is_empty());
        scene.apply(CommitBatch::new());
        assert!(scene.batches().is_empty());
    }

    #[test]
    fn test_layout_bounds_from_host() {
        let mut scene = SceneHost::default();
        let a = scene.add_element(Point::new(10.0, 20.0), 30.0, 40.0);
        let bounds = scene.layout_bounds(a).unwrap();
        assert_eq!(bounds.right, 40.0);
        assert_eq!(bounds.bottom, 60.0);
        assert!(!scene.contains(ElementId::new(99)));
    }
}
