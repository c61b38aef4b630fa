//! Payload type tags used to select among overloads of one trigger.

use std::any::{type_name, Any, TypeId};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Type-erased payload carried from `fire_with` to the matching callback.
pub type Payload = Box<dyn Any + Send>;

/// Tag describing the payload shape a callback answers to.
///
/// `None` is a shape of its own: a trigger fired without a payload only
/// matches callbacks registered without one, and the reverse holds too.
/// Typed tags compare by `TypeId`; the name is for diagnostics only.
#[derive(Clone, Copy, Debug)]
pub enum PayloadKind {
    None,
    Typed { id: TypeId, name: &'static str },
}

impl PayloadKind {
    /// Tag for payloads of type `P`.
    pub fn of<P: Any>() -> Self {
        PayloadKind::Typed {
            id: TypeId::of::<P>(),
            name: type_name::<P>(),
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, PayloadKind::None)
    }

    /// Human readable name of the payload type, `"none"` when absent.
    pub fn name(&self) -> &'static str {
        match self {
            PayloadKind::None => "none",
            PayloadKind::Typed { name, .. } => *name,
        }
    }
}

impl PartialEq for PayloadKind {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (PayloadKind::None, PayloadKind::None) => true,
            (PayloadKind::Typed { id: a, .. }, PayloadKind::Typed { id: b, .. }) => a == b,
            _ => false,
        }
    }
}

impl Eq for PayloadKind {}

impl Hash for PayloadKind {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            PayloadKind::None => 0u8.hash(state),
            PayloadKind::Typed { id, .. } => {
                1u8.hash(state);
                id.hash(state);
            }
        }
    }
}

impl fmt::Display for PayloadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn none_only_equals_none() {
        assert_eq!(PayloadKind::None, PayloadKind::None);
        assert_ne!(PayloadKind::None, PayloadKind::of::<i32>());
        assert_ne!(PayloadKind::of::<()>(), PayloadKind::None);
    }

    #[test]
    fn typed_kinds_compare_by_type() {
        assert_eq!(PayloadKind::of::<i32>(), PayloadKind::of::<i32>());
        assert_ne!(PayloadKind::of::<i32>(), PayloadKind::of::<i64>());
        assert_ne!(PayloadKind::of::<String>(), PayloadKind::of::<&'static str>());
    }

    #[test]
    fn kinds_hash_consistently_with_eq() {
        let mut set = HashSet::new();
        set.insert(PayloadKind::None);
        set.insert(PayloadKind::of::<bool>());
        set.insert(PayloadKind::of::<bool>());
        set.insert(PayloadKind::of::<u8>());

        assert_eq!(set.len(), 3);
    }

    #[test]
    fn name_reports_type() {
        assert_eq!(PayloadKind::None.name(), "none");
        assert_eq!(PayloadKind::of::<bool>().name(), "bool");
        assert!(PayloadKind::of::<String>().to_string().ends_with("String"));
    }
}
