//=========================================================================
// Scorable Registry
//=========================================================================
//
// Owns the scorable objects present in the level.
//
// Objects are stored by PointId in a BTreeMap so enumeration order is
// stable. Callers that mutate while walking the set take an `ids()`
// snapshot first.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::BTreeMap;

use log::{debug, warn};

//=== Internal Dependencies ===============================================

use super::scorable::{GamePoint, PointId, Scorable};

//=== ScorableRegistry ====================================================

/// Collection of the scorable objects currently present in the world.
pub struct ScorableRegistry<T: Scorable = GamePoint> {
    objects: BTreeMap<PointId, T>,
    next_id: u32,
}

impl<T: Scorable> ScorableRegistry<T> {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            objects: BTreeMap::new(),
            next_id: 0,
        }
    }

    //--- Population -------------------------------------------------------

    /// Adds an object and returns its id. Ids are never reused.
    pub fn spawn(&mut self, object: T) -> PointId {
        let id = PointId(self.next_id);
        self.next_id += 1;
        self.objects.insert(id, object);
        id
    }

    /// Removes an object from the world.
    pub fn despawn(&mut self, id: PointId) -> Option<T> {
        let removed = self.objects.remove(&id);
        if removed.is_some() {
            debug!("Despawned {:?}", id);
        } else {
            warn!("Despawn requested for unknown {:?}", id);
        }
        removed
    }

    //--- Queries ----------------------------------------------------------

    pub fn get(&self, id: PointId) -> Option<&T> {
        self.objects.get(&id)
    }

    pub fn get_mut(&mut self, id: PointId) -> Option<&mut T> {
        self.objects.get_mut(&id)
    }

    /// Snapshot of the ids currently present, in ascending order.
    pub fn ids(&self) -> Vec<PointId> {
        self.objects.keys().copied().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (PointId, &T)> {
        self.objects.iter().map(|(id, object)| (*id, object))
    }

    /// Sum of the point values of every object present.
    pub fn total_points(&self) -> u32 {
        self.objects
            .values()
            .fold(0u32, |sum, object| sum.saturating_add(object.point_value()))
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    //--- Contact ----------------------------------------------------------

    /// Forwards a character contact to the object.
    ///
    /// Returns true if the object delivered a scoring event.
    pub fn contact(&mut self, id: PointId) -> bool {
        match self.objects.get_mut(&id) {
            Some(object) => object.contact(id),
            None => {
                debug!("Contact with absent {:?} ignored", id);
                false
            }
        }
    }
}

impl<T: Scorable> Default for ScorableRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
