//! Equipment ownership lookup.

use std::collections::HashMap;

use super::{HikeId, ItemId, ParticipantId};

/// Resolves which participant owns a pinned equipment assignment.
///
/// Implemented by the persistence layer; only clothing and rest items are
/// ever queried.
///
/// # Examples
///
/// ```
/// use u_hike::models::{HikeId, ItemId, OwnershipLookup, ParticipantId};
///
/// struct NobodyOwnsAnything;
///
/// impl OwnershipLookup for NobodyOwnsAnything {
///     fn owner_of(&self, _hike: HikeId, _item: ItemId) -> Option<ParticipantId> {
///         None
///     }
/// }
///
/// assert!(NobodyOwnsAnything.owner_of(HikeId::new(1), ItemId::new(2)).is_none());
/// ```
pub trait OwnershipLookup: Send + Sync {
    /// Returns the owner of `item` on `hike`, or `None` if none is recorded.
    fn owner_of(&self, hike: HikeId, item: ItemId) -> Option<ParticipantId>;
}

impl<T: OwnershipLookup + ?Sized> OwnershipLookup for &T {
    fn owner_of(&self, hike: HikeId, item: ItemId) -> Option<ParticipantId> {
        (**self).owner_of(hike, item)
    }
}

/// In-memory ownership table keyed by `(hike, item)`.
#[derive(Debug, Clone, Default)]
pub struct OwnershipRegistry {
    owners: HashMap<(HikeId, ItemId), ParticipantId>,
}

impl OwnershipRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `owner` for `item` on `hike`, returning the previous owner.
    pub fn assign(
        &mut self,
        hike: HikeId,
        item: ItemId,
        owner: ParticipantId,
    ) -> Option<ParticipantId> {
        self.owners.insert((hike, item), owner)
    }

    /// Builder form of [`OwnershipRegistry::assign`].
    pub fn with_owner(mut self, hike: HikeId, item: ItemId, owner: ParticipantId) -> Self {
        self.assign(hike, item, owner);
        self
    }

    /// Forgets the owner of `item` on `hike`.
    pub fn release(&mut self, hike: HikeId, item: ItemId) -> Option<ParticipantId> {
        self.owners.remove(&(hike, item))
    }

    pub fn len(&self) -> usize {
        self.owners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.owners.is_empty()
    }
}

impl OwnershipLookup for OwnershipRegistry {
    fn owner_of(&self, hike: HikeId, item: ItemId) -> Option<ParticipantId> {
        self.owners.get(&(hike, item)).copied()
    }
}
