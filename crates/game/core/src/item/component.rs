//! Composite attack loadouts.
//!
//! A creature's attack inventory is a list of [`AttackComponent`]s. A leaf is
//! a single weapon; a group bundles components (dual wielding, a quiver and a
//! bow, ...) and reports the sum of its children. Children are owned, so a
//! group can never contain itself or one of its ancestors.

use crate::error::{ErrorSeverity, GameError};

use super::Item;

/// Errors raised by tree composition.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CompositionError {
    #[error("cannot {operation} children on leaf component '{name}'")]
    UnsupportedOperation {
        operation: &'static str,
        name: String,
    },
}

impl GameError for CompositionError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            CompositionError::UnsupportedOperation { .. } => "COMPOSITION_UNSUPPORTED_OPERATION",
        }
    }
}

/// Named, ordered collection of child components.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AttackGroup {
    name: String,
    children: Vec<AttackComponent>,
}

impl AttackGroup {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AttackComponent {
    Leaf(Item),
    Group(AttackGroup),
}

impl AttackComponent {
    pub fn leaf(item: Item) -> Self {
        AttackComponent::Leaf(item)
    }

    pub fn group(name: impl Into<String>) -> Self {
        AttackComponent::Group(AttackGroup::new(name))
    }

    /// Builds a group from already-assembled children.
    pub fn group_of(name: impl Into<String>, children: Vec<AttackComponent>) -> Self {
        AttackComponent::Group(AttackGroup {
            name: name.into(),
            children,
        })
    }

    pub fn name(&self) -> &str {
        match self {
            AttackComponent::Leaf(item) => item.name(),
            AttackComponent::Group(group) => &group.name,
        }
    }

    /// Recursive damage total; leaves sum their item's damage profile.
    pub fn total_damage(&self) -> u32 {
        match self {
            AttackComponent::Leaf(item) => item.damage_profile().total(),
            AttackComponent::Group(group) => group
                .children
                .iter()
                .fold(0u32, |acc, child| acc.saturating_add(child.total_damage())),
        }
    }

    /// Ordered children; always empty for a leaf.
    pub fn children(&self) -> &[AttackComponent] {
        match self {
            AttackComponent::Leaf(_) => &[],
            AttackComponent::Group(group) => &group.children,
        }
    }

    pub fn add_child(&mut self, child: AttackComponent) -> Result<(), CompositionError> {
        match self {
            AttackComponent::Leaf(item) => Err(CompositionError::UnsupportedOperation {
                operation: "add",
                name: item.name().to_owned(),
            }),
            AttackComponent::Group(group) => {
                group.children.push(child);
                Ok(())
            }
        }
    }

    /// Removes and returns the first direct child named `name`.
    pub fn remove_child(&mut self, name: &str) -> Result<Option<AttackComponent>, CompositionError> {
        match self {
            AttackComponent::Leaf(item) => Err(CompositionError::UnsupportedOperation {
                operation: "remove",
                name: item.name().to_owned(),
            }),
            AttackComponent::Group(group) => Ok(group
                .children
                .iter()
                .position(|child| child.name() == name)
                .map(|index| group.children.remove(index))),
        }
    }

    /// Number of leaves in this subtree.
    pub fn leaf_count(&self) -> usize {
        match self {
            AttackComponent::Leaf(_) => 1,
            AttackComponent::Group(group) => group.children.iter().map(Self::leaf_count).sum(),
        }
    }
}
