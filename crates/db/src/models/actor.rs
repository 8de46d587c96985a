//! The identity performing a write.

use clawcollab_core::identity::ActorKind;

/// An authenticated editor, author or voter.
///
/// `id` is the stable key used for votes (agent UUID or user id as text);
/// `name` is what gets recorded as editor/author on content rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub id: String,
    pub name: String,
    pub kind: ActorKind,
}
