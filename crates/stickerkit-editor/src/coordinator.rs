//! Edit-mode coordinator.
//!
//! Owns the focus, the focused element's [`TransformState`], the latest
//! [`ClusterLayout`] and the action bindings. Every host-facing event
//! stages commands and ends in exactly one [`EditCoordinator::commit`], so
//! the host never sees a half-applied update.
//!
//! Entry points never return errors: faults are logged and the event is
//! reported as not consumed. A gesture can therefore never be stranded in
//! its dragging phase by an error raised halfway through.

use crate::command::{CommitBatch, HostCommand};
use crate::focus::FocusManager;
use crate::gesture::{GestureController, MoveGesture, ResizeRotateGesture};
use crate::host::{EditorHost, LayoutPhase};
use crate::placement::{self, ClusterLayout};
use crate::pose::{PoseUpdate, TransformState};
use std::collections::HashMap;
use stickerkit_core::{ActionRole, EditorError, ElementId, Point, Visibility};
use stickerkit_settings::EditorConfig;
use tracing::{debug, info, warn};

/// Instant actions bound to a tap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TapAction {
    Delete,
    Pin,
}

/// What a button does.
#[derive(Debug)]
enum ActionBinding {
    Tap(TapAction),
    Drag(Box<dyn GestureController>),
}

fn default_bindings(config: &EditorConfig) -> HashMap<ActionRole, ActionBinding> {
    let mut bindings = HashMap::with_capacity(ActionRole::ALL.len());
    bindings.insert(ActionRole::Delete, ActionBinding::Tap(TapAction::Delete));
    bindings.insert(ActionRole::Pin, ActionBinding::Tap(TapAction::Pin));
    bindings.insert(
        ActionRole::Move,
        ActionBinding::Drag(Box::new(MoveGesture::new())),
    );
    bindings.insert(
        ActionRole::ResizeRotate,
        ActionBinding::Drag(Box::new(ResizeRotateGesture::new(config.gesture.clone()))),
    );
    bindings
}

/// Drives one editing overlay on top of a host view tree.
#[derive(Debug)]
pub struct EditCoordinator<H: EditorHost> {
    host: H,
    config: EditorConfig,
    focus: FocusManager,
    target: Option<TransformState>,
    layout: Option<ClusterLayout>,
    bindings: HashMap<ActionRole, ActionBinding>,
    active: Option<ActionRole>,
    pending: CommitBatch,
}

impl<H: EditorHost> EditCoordinator<H> {
    /// Creates a coordinator with the default configuration.
    pub fn new(host: H) -> Self {
        Self::with_config(host, EditorConfig::default())
    }

    pub fn with_config(host: H, config: EditorConfig) -> Self {
        let bindings = default_bindings(&config);
        Self {
            host,
            config,
            focus: FocusManager::new(),
            target: None,
            layout: None,
            bindings,
            active: None,
            pending: CommitBatch::new(),
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn focused(&self) -> Option<ElementId> {
        self.focus.focused_id()
    }

    /// Geometry of the focused element.
    pub fn transform_state(&self) -> Option<&TransformState> {
        self.target.as_ref()
    }

    /// The last committed cluster layout.
    pub fn cluster_layout(&self) -> Option<&ClusterLayout> {
        self.layout.as_ref()
    }

    /// Role holding the live gesture session, if any.
    pub fn active_gesture(&self) -> Option<ActionRole> {
        self.active
    }

    // Focus

    /// Handles a tap on an element: toggles focus on the focused element,
    /// otherwise moves the focus to it.
    pub fn tap_element(&mut self, id: ElementId) -> bool {
        if self.focus.is_focused(id) {
            return self.exit();
        }
        self.enter(id)
    }

    /// Handles a tap on empty space.
    pub fn tap_background(&mut self) -> bool {
        self.exit()
    }

    /// Focuses `id`, exiting the previous target first.
    pub fn enter(&mut self, id: ElementId) -> bool {
        match self.try_enter(id) {
            Ok(()) => true,
            Err(err) => {
                warn!("enter({}) ignored: {}", id, err);
                false
            }
        }
    }

    fn try_enter(&mut self, id: ElementId) -> Result<(), EditorError> {
        let origin = self
            .host
            .layout_origin(id)
            .ok_or(EditorError::UnknownElement { id })?;
        let pose = self
            .host
            .pose(id)
            .ok_or(EditorError::UnknownElement { id })?;

        // The previous target is fully torn down and committed before the
        // new one is set up.
        if self.focus.focused_id().is_some() {
            self.exit();
        }

        let state = TransformState::new(id, origin, self.host.parent_origin(), pose);
        self.focus.focus(id);
        self.target = Some(state);
        self.pending.push(HostCommand::Highlight {
            id,
            visibility: Visibility::Visible,
        });
        self.stage_placement();
        self.pending.push(HostCommand::ClusterVisibility {
            visibility: Visibility::Visible,
        });
        info!("Editing {}", id);
        self.commit();
        Ok(())
    }

    /// Leaves edit mode. Returns false when nothing was focused.
    pub fn exit(&mut self) -> bool {
        if !self.stage_exit() {
            return false;
        }
        self.commit();
        true
    }

    fn stage_exit(&mut self) -> bool {
        let Some(id) = self.focus.clear() else {
            return false;
        };
        self.cancel_active();
        self.target = None;
        self.layout = None;
        self.pending.push(HostCommand::Highlight {
            id,
            visibility: Visibility::Hidden,
        });
        self.pending.push(HostCommand::ClusterVisibility {
            visibility: Visibility::Hidden,
        });
        info!("Stopped editing {}", id);
        true
    }

    // Tap actions

    /// Brings the focused element and the cluster to the front.
    pub fn pin(&mut self) -> bool {
        match self.try_pin() {
            Ok(()) => true,
            Err(err) => {
                warn!("pin ignored: {}", err);
                false
            }
        }
    }

    fn try_pin(&mut self) -> Result<(), EditorError> {
        let id = self.ensure_target()?;
        self.pending.push(HostCommand::BringToFront { id });
        self.pending.push(HostCommand::BringClusterToFront);
        // Reordering can drop a relative placement in some hosts
        if let Some(layout) = self.layout {
            self.pending.push(HostCommand::PlaceCluster { layout });
        }
        debug!("pinned {}", id);
        self.commit();
        Ok(())
    }

    /// Leaves edit mode and removes the focused element.
    pub fn delete(&mut self) -> bool {
        match self.try_delete() {
            Ok(()) => true,
            Err(err) => {
                warn!("delete ignored: {}", err);
                false
            }
        }
    }

    fn try_delete(&mut self) -> Result<(), EditorError> {
        let id = self.ensure_target()?;
        self.stage_exit();
        self.pending.push(HostCommand::Remove { id });
        info!("Deleted {}", id);
        self.commit();
        Ok(())
    }

    /// Handles a tap on an action button.
    pub fn tap_action(&mut self, role: ActionRole) -> bool {
        if let Some(active) = self.active {
            warn!(
                "tap on {} ignored: {}",
                role,
                EditorError::GestureInProgress { role: active }
            );
            return false;
        }
        if role.is_drag() {
            warn!(
                "tap ignored: {}",
                EditorError::UnsupportedInteraction { role }
            );
            return false;
        }
        match self.bindings.get(&role) {
            Some(ActionBinding::Tap(TapAction::Delete)) => self.delete(),
            Some(ActionBinding::Tap(TapAction::Pin)) => self.pin(),
            _ => {
                warn!("no tap action bound to {}", role);
                false
            }
        }
    }

    /// The action button under a screen point, if the cluster is showing.
    pub fn hit_test(&self, point: Point) -> Option<ActionRole> {
        self.layout
            .as_ref()
            .and_then(|layout| layout.role_at(point, self.config.cluster.hit_radius()))
    }

    // Drag gestures

    pub fn pointer_down(&mut self, role: ActionRole, pointer: Point) -> bool {
        match self.try_pointer_down(role, pointer) {
            Ok(()) => true,
            Err(err) => {
                warn!("pointer-down on {} ignored: {}", role, err);
                false
            }
        }
    }

    fn try_pointer_down(&mut self, role: ActionRole, pointer: Point) -> Result<(), EditorError> {
        if let Some(active) = self.active {
            return Err(EditorError::GestureInProgress { role: active });
        }
        if !role.is_drag() {
            return Err(EditorError::UnsupportedInteraction { role });
        }
        ensure_finite(pointer)?;
        self.ensure_target()?;
        let state = self.target.ok_or(EditorError::NotFocused)?;
        let controller = self.drag_controller(role)?;
        controller.on_down(pointer, &state)?;
        self.active = Some(role);
        Ok(())
    }

    pub fn pointer_move(&mut self, role: ActionRole, pointer: Point) -> bool {
        match self.try_pointer_move(role, pointer) {
            Ok(()) => true,
            Err(err) => {
                warn!("pointer-move on {} ignored: {}", role, err);
                false
            }
        }
    }

    fn try_pointer_move(&mut self, role: ActionRole, pointer: Point) -> Result<(), EditorError> {
        if self.active != Some(role) {
            return Err(EditorError::NoActiveGesture { role });
        }
        ensure_finite(pointer)?;
        if let Err(err) = self.ensure_target() {
            self.cancel_active();
            return Err(err);
        }
        let update = self.drag_controller(role)?.on_move(pointer)?;
        if let Some(update) = update {
            self.apply_update(update)?;
            self.commit();
        }
        Ok(())
    }

    pub fn pointer_up(&mut self, role: ActionRole, pointer: Point) -> bool {
        match self.try_pointer_up(role, pointer) {
            Ok(()) => true,
            Err(err) => {
                warn!("pointer-up on {} ignored: {}", role, err);
                false
            }
        }
    }

    fn try_pointer_up(&mut self, role: ActionRole, pointer: Point) -> Result<(), EditorError> {
        if self.active != Some(role) {
            return Err(EditorError::NoActiveGesture { role });
        }
        self.active = None;
        self.drag_controller(role)?.on_up(pointer)
    }

    /// Cancels the gesture on `role`. Behaves like pointer-up: the last
    /// applied pose stays.
    pub fn pointer_cancel(&mut self, role: ActionRole) -> bool {
        if self.active != Some(role) {
            warn!(
                "pointer-cancel on {} ignored: {}",
                role,
                EditorError::NoActiveGesture { role }
            );
            return false;
        }
        self.cancel_active();
        true
    }

    fn cancel_active(&mut self) {
        if let Some(role) = self.active.take() {
            if let Ok(controller) = self.drag_controller(role) {
                controller.cancel();
            }
            debug!("cancelled {} gesture", role);
        }
    }

    fn drag_controller(
        &mut self,
        role: ActionRole,
    ) -> Result<&mut Box<dyn GestureController>, EditorError> {
        match self.bindings.get_mut(&role) {
            Some(ActionBinding::Drag(controller)) => Ok(controller),
            _ => Err(EditorError::UnsupportedInteraction { role }),
        }
    }

    // Apply

    /// Returns the focused id, exiting edit mode when the host lost it.
    fn ensure_target(&mut self) -> Result<ElementId, EditorError> {
        let id = self.focus.focused_id().ok_or(EditorError::NotFocused)?;
        if !self.host.contains(id) {
            self.exit();
            return Err(EditorError::UnknownElement { id });
        }
        Ok(id)
    }

    fn apply_update(&mut self, update: PoseUpdate) -> Result<(), EditorError> {
        let target = self.target.as_mut().ok_or(EditorError::NotFocused)?;
        target.apply(&update);
        let id = target.id;
        self.pending.push(HostCommand::UpdatePose { id, update });
        self.stage_placement();
        Ok(())
    }

    fn stage_placement(&mut self) {
        if let Some(state) = self.target.as_ref() {
            let layout = placement::recompute(state);
            self.layout = Some(layout);
            self.pending.push(HostCommand::PlaceCluster { layout });
        }
    }

    /// Sends everything staged so far to the host in one batch.
    pub fn commit(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        let batch = std::mem::take(&mut self.pending);
        debug!("committing {} command(s)", batch.len());
        self.host.apply(batch);
    }
}

fn ensure_finite(pointer: Point) -> Result<(), EditorError> {
    if pointer.is_finite() {
        Ok(())
    } else {
        Err(EditorError::DegenerateGeometry {
            reason: format!("non-finite pointer {}", pointer),
        })
    }
}

impl<H: EditorHost> LayoutPhase for EditCoordinator<H> {
    fn on_children_bounds_known(&mut self) {
        let Some(id) = self.focus.focused_id() else {
            return;
        };
        match self.host.layout_origin(id) {
            Some(origin) => {
                let parent_origin = self.host.parent_origin();
                if let Some(target) = self.target.as_mut() {
                    target.layout_origin = origin;
                    target.parent_origin = parent_origin;
                }
            }
            None => {
                warn!("{}", EditorError::UnknownElement { id });
                self.exit();
            }
        }
    }

    fn on_request_redraw(&mut self) {
        match (self.focus.focused_id(), self.layout) {
            (Some(id), Some(layout)) => {
                self.pending.push(HostCommand::Highlight {
                    id,
                    visibility: Visibility::Visible,
                });
                self.pending.push(HostCommand::PlaceCluster { layout });
                self.pending.push(HostCommand::ClusterVisibility {
                    visibility: Visibility::Visible,
                });
            }
            _ => self.pending.push(HostCommand::ClusterVisibility {
                visibility: Visibility::Hidden,
            }),
        }
        self.commit();
    }

    fn on_post_layout(&mut self) {
        if self.focus.focused_id().is_none() {
            return;
        }
        self.stage_placement();
        self.commit();
    }
}
