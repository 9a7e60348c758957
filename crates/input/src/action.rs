use serde::{Deserialize, Serialize};

/// The actions a grip point listens to.
///
/// Hosts bind physical buttons to these names; the core refers to them only
/// through [`GripAction::name`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GripAction {
    /// Grab or release the nearest grabbable.
    Grab,
    /// Forward an interaction to the touched or held object.
    Interact,
}

impl GripAction {
    pub const ALL: [GripAction; 2] = [GripAction::Grab, GripAction::Interact];

    /// The action name queried on an [`InputSource`](crate::InputSource).
    pub fn name(self) -> &'static str {
        match self {
            Self::Grab => "grab",
            Self::Interact => "interact",
        }
    }
}

impl std::fmt::Display for GripAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
