use stickerkit_core::ElementId;

/// Tracks the single element that is focused for editing.
///
/// `FocusManager` only records the id. Showing and hiding the highlight and
/// the action cluster is the coordinator's job, which always clears the old
/// focus before setting a new one.
#[derive(Debug, Clone, Default)]
pub struct FocusManager {
    /// The focused element, if any
    focused_id: Option<ElementId>,
}

impl FocusManager {
    /// Creates a new `FocusManager` with nothing focused.
    ///
    /// # Examples
    ///
    /// ```
    /// use stickerkit_editor::focus::FocusManager;
    ///
    /// let manager = FocusManager::new();
    /// assert_eq!(manager.focused_id(), None);
    /// ```
    pub fn new() -> Self {
        Self { focused_id: None }
    }

    /// Returns the focused element.
    pub fn focused_id(&self) -> Option<ElementId> {
        self.focused_id
    }

    pub fn is_focused(&self, id: ElementId) -> bool {
        self.focused_id == Some(id)
    }

    /// Focuses `id`.
    ///
    /// # Panics
    ///
    /// In debug builds, when another element is still focused: callers must
    /// `clear()` first.
    pub fn focus(&mut self, id: ElementId) {
        debug_assert!(
            self.focused_id.is_none() || self.focused_id == Some(id),
            "focus({id}) while {:?} is still focused",
            self.focused_id
        );
        self.focused_id = Some(id);
    }

    /// Clears the focus and returns what was focused.
    pub fn clear(&mut self) -> Option<ElementId> {
        self.focused_id.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_focus_and_clear() {
        let mut manager = FocusManager::new();
        manager.focus(ElementId::new(4));
        assert!(manager.is_focused(ElementId::new(4)));
        assert_eq!(manager.clear(), Some(ElementId::new(4)));
        assert_eq!(manager.clear(), None);
    }
}
