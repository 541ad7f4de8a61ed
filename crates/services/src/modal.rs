//! Modal Host contract: the ways a dialog shell can ask to be closed.

/// Where a pointer press landed inside an open dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerTarget {
    /// The dimmed backdrop around the dialog.
    Overlay,
    /// Anything inside the dialog container.
    Content,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseTrigger {
    CloseButton,
    Pointer(PointerTarget),
    Escape,
}

impl CloseTrigger {
    /// Presses inside the dialog content never close it.
    pub fn closes(self) -> bool {
        !matches!(self, CloseTrigger::Pointer(PointerTarget::Content))
    }
}
