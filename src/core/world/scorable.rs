//=========================================================================
// Scorable Objects
//=========================================================================
//
// Capability interface for world entities that grant points, plus the
// listener handles they use to announce that they were collected.
//
// Architecture:
//   Session ──subscribe(ScoreListener)──> Scorable (holds listeners)
//                                            │ contact()
//   Session <──── ScoreEvent (crossbeam) ────┘
//
// A scorable object emits at most one ScoreEvent over its lifetime.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::sync::atomic::{AtomicU64, Ordering};

use crossbeam_channel::Sender;
use log::debug;

//=== PointId =============================================================

/// Identifier of a scorable object inside a [`super::ScorableRegistry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PointId(pub(crate) u32);

impl PointId {
    /// Returns the raw registry index.
    pub fn raw(self) -> u32 {
        self.0
    }
}

//=== ScoreEvent ==========================================================

/// Emitted by a scorable object when the character touches it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreEvent {
    /// The object that was collected.
    pub point: PointId,

    /// Points granted by the object.
    pub points: u32,
}

//=== ScoreListener =======================================================

/// Process-unique identifier of a listener handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

impl ListenerId {
    fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// Subscription handle a scorable object holds for each interested party.
///
/// Cloning a listener yields a handle with the same [`ListenerId`], so the
/// owner can attach one listener to many objects and detach it again by id.
#[derive(Debug, Clone)]
pub struct ScoreListener {
    id: ListenerId,
    sender: Sender<ScoreEvent>,
}

impl ScoreListener {
    /// Wraps the sending half of a score channel in a fresh listener.
    pub fn new(sender: Sender<ScoreEvent>) -> Self {
        Self {
            id: ListenerId::next(),
            sender,
        }
    }

    pub fn id(&self) -> ListenerId {
        self.id
    }

    /// Delivers an event. Returns false if the receiving side is gone.
    pub fn notify(&self, event: ScoreEvent) -> bool {
        self.sender.send(event).is_ok()
    }
}

//=== Scorable Trait ======================================================

/// Capability interface of anything the session can collect points from.
pub trait Scorable {
    /// Points granted when collected.
    fn point_value(&self) -> u32;

    /// Attaches a listener. Attaching the same listener id twice replaces
    /// the earlier handle.
    fn subscribe(&mut self, listener: ScoreListener);

    /// Detaches a listener. Returns true if it was attached.
    fn unsubscribe(&mut self, id: ListenerId) -> bool;

    /// Called by contact detection when the character touches the object.
    ///
    /// Returns true if a scoring event was delivered to at least one
    /// listener.
    fn contact(&mut self, point: PointId) -> bool;
}

//=== GamePoint ===========================================================

/// Standard collectable worth a fixed number of points.
#[derive(Debug, Clone)]
pub struct GamePoint {
    points: u32,
    listeners: Vec<ScoreListener>,
    scored: bool,
}

impl GamePoint {
    pub fn new(points: u32) -> Self {
        Self {
            points,
            listeners: Vec::new(),
            scored: false,
        }
    }

    /// Returns true once the scoring event has been delivered.
    pub fn is_scored(&self) -> bool {
        self.scored
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl Scorable for GamePoint {
    fn point_value(&self) -> u32 {
        self.points
    }

    fn subscribe(&mut self, listener: ScoreListener) {
        self.listeners.retain(|l| l.id() != listener.id());
        self.listeners.push(listener);
    }

    fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|l| l.id() != id);
        self.listeners.len() != before
    }

    fn contact(&mut self, point: PointId) -> bool {
        if self.scored {
            return false;
        }

        let event = ScoreEvent {
            point,
            points: self.points,
        };

        let mut delivered = 0;
        for listener in &self.listeners {
            if listener.notify(event) {
                delivered += 1;
            }
        }

        if delivered == 0 {
            debug!("Contact with {:?} had no listeners", point);
            return false;
        }

        self.scored = true;
        true
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam_channel::unbounded;

    #[test]
    fn listener_ids_are_unique() {
        let (tx, _rx) = unbounded();
        let a = ScoreListener::new(tx.clone());
        let b = ScoreListener::new(tx);
        assert_ne!(a.id(), b.id());
        assert_eq!(a.id(), a.clone().id());
    }

    #[test]
    fn contact_without_listeners_keeps_point_collectable() {
        let mut point = GamePoint::new(5);
        assert!(!point.contact(PointId(0)));
        assert!(!point.is_scored());
    }

    #[test]
    fn contact_delivers_event_once() {
        let (tx, rx) = unbounded();
        let mut point = GamePoint::new(7);
        point.subscribe(ScoreListener::new(tx));

        assert!(point.contact(PointId(3)));
        assert!(!point.contact(PointId(3)));

        let events: Vec<_> = rx.try_iter().collect();
        assert_eq!(events, vec![ScoreEvent { point: PointId(3), points: 7 }]);
        assert!(point.is_scored());
    }

    #[test]
    fn subscribe_same_listener_twice_keeps_one_handle() {
        let (tx, rx) = unbounded();
        let listener = ScoreListener::new(tx);
        let mut point = GamePoint::new(1);

        point.subscribe(listener.clone());
        point.subscribe(listener);
        assert_eq!(point.listener_count(), 1);

        point.contact(PointId(0));
        assert_eq!(rx.try_iter().count(), 1);
    }

    #[test]
    fn unsubscribe_detaches_by_id() {
        let (tx, rx) = unbounded();
        let listener = ScoreListener::new(tx);
        let mut point = GamePoint::new(2);

        point.subscribe(listener.clone());
        assert!(point.unsubscribe(listener.id()));
        assert!(!point.unsubscribe(listener.id()));

        assert!(!point.contact(PointId(0)));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn dropped_receiver_counts_as_undelivered() {
        let (tx, rx) = unbounded();
        let mut point = GamePoint::new(4);
        point.subscribe(ScoreListener::new(tx));
        drop(rx);

        assert!(!point.contact(PointId(0)));
        assert!(!point.is_scored());
    }
}
