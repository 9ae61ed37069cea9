use std::marker::PhantomData;
use std::sync::atomic::{AtomicUsize, Ordering};

/// A process-local identifier that is handed out by an [`IdAllocator`].
///
/// These ids are only used for identity within a running graph or project.
/// They are never persisted as identity.
pub trait LocalIdentifier: Copy + Eq + std::hash::Hash + std::fmt::Debug {
    fn from_usize(id: usize) -> Self;

    fn as_usize(self) -> usize;
}

/// Hands out monotonically increasing ids.
///
/// Each graph-construction context owns its allocator.
#[derive(Debug)]
pub struct IdAllocator<Id> {
    next: AtomicUsize,
    _id: PhantomData<fn() -> Id>,
}

impl<Id: LocalIdentifier> IdAllocator<Id> {
    pub fn new() -> Self {
        Self::starting_at(0)
    }

    pub fn starting_at(first: usize) -> Self {
        Self {
            next: AtomicUsize::new(first),
            _id: PhantomData,
        }
    }

    pub fn next_id(&self) -> Id {
        Id::from_usize(self.next.fetch_add(1, Ordering::Relaxed))
    }

    /// The number of ids handed out so far (relative to the first id).
    pub fn peek(&self) -> usize {
        self.next.load(Ordering::Relaxed)
    }
}

impl<Id: LocalIdentifier> Default for IdAllocator<Id> {
    fn default() -> Self {
        Self::new()
    }
}

#[macro_export]
macro_rules! local_identifier {
    ($id_name: ident) => {
        #[derive(
            Debug,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            serde::Serialize,
            serde::Deserialize,
            Clone,
            Copy,
            Hash,
        )]
        pub struct $id_name(pub usize);

        impl $crate::util::LocalIdentifier for $id_name {
            fn from_usize(id: usize) -> Self {
                Self(id)
            }

            fn as_usize(self) -> usize {
                self.0
            }
        }

        impl std::fmt::Display for $id_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}
