//=========================================================================
// Scene Errors
//=========================================================================
//
// Wiring errors between scenes. Both variants mean a transition was built
// wrong, so the run loop treats them as fatal.
//
//=========================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    /// An item was added to a group the scene never created.
    UnknownGroup(String),

    /// A transition payload lacked a group the next scene requires.
    MissingPayloadKey(&'static str),
}

impl std::fmt::Display for SceneError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownGroup(name) => write!(f, "Unknown group: {}", name),
            Self::MissingPayloadKey(key) => write!(f, "Missing payload key: {}", key),
        }
    }
}

impl std::error::Error for SceneError {}

//=========================================================================
// Unit Tests
//=========================================================================
