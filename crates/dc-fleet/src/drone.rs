//! Drones and the lifecycle state machine that drives them.

use std::collections::VecDeque;
use std::fmt;

use dc_core::{Coordinate, DroneId, OrderId, Path, Tick};

use crate::{FleetError, FleetResult, Order};

// ── DroneStatus ───────────────────────────────────────────────────────────────

/// Which fleet partition a drone belongs to.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DroneStatus {
    /// Idle and available for assignment.
    #[default]
    Free,
    /// Holds an order but has no path for its current leg yet.
    AwaitingPlanning,
    /// Following a planned path.
    Delivering,
}

impl DroneStatus {
    pub const ALL: [DroneStatus; 3] = [
        DroneStatus::Free,
        DroneStatus::AwaitingPlanning,
        DroneStatus::Delivering,
    ];

    /// Label used in logs and output columns.
    pub fn as_str(self) -> &'static str {
        match self {
            DroneStatus::Free             => "free",
            DroneStatus::AwaitingPlanning => "awaiting_planning",
            DroneStatus::Delivering       => "delivering",
        }
    }
}

impl fmt::Display for DroneStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which half of a delivery the drone is flying.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Leg {
    /// Current location → order origin.
    Pickup,
    /// Order origin → order destination.
    Dropoff,
}

/// What a single [`Drone::update`] call did.
#[derive(Clone, Debug, PartialEq)]
pub enum DroneEvent {
    /// Advanced one waypoint; the path is not yet exhausted.
    Moved { to: Coordinate },
    /// The replan flag was set; the drone dropped its path and is waiting for
    /// a new one.
    Replanning,
    /// Reached the order origin; the drop-off leg now needs a path.
    PickedUp(OrderId),
    /// Reached the order destination.  Carries the completed order.
    Delivered(Order),
}

// ── Drone ─────────────────────────────────────────────────────────────────────

/// A single delivery drone.
///
/// All state changes go through the lifecycle methods
/// ([`accept_order`][Self::accept_order], [`receive_path`][Self::receive_path],
/// [`update`][Self::update], [`request_replan`][Self::request_replan]); each
/// rejects calls made from the wrong status with
/// [`FleetError::InvalidTransition`].
#[derive(Clone, Debug)]
pub struct Drone {
    id:             DroneId,
    location:       Coordinate,
    warehouse:      Coordinate,
    status:         DroneStatus,
    order:          Option<Order>,
    leg:            Option<Leg>,
    destination:    Coordinate,
    path:           VecDeque<Coordinate>,
    needs_planning: bool,
    delivered:      u32,
}

impl Drone {
    /// A free drone parked at `warehouse`.
    pub fn new(id: DroneId, warehouse: Coordinate) -> Self {
        Self {
            id,
            location:       warehouse,
            warehouse,
            status:         DroneStatus::Free,
            order:          None,
            leg:            None,
            destination:    warehouse,
            path:           VecDeque::new(),
            needs_planning: false,
            delivered:      0,
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn id(&self) -> DroneId {
        self.id
    }

    #[inline]
    pub fn location(&self) -> Coordinate {
        self.location
    }

    /// The warehouse the drone was created at.
    #[inline]
    pub fn warehouse(&self) -> Coordinate {
        self.warehouse
    }

    #[inline]
    pub fn status(&self) -> DroneStatus {
        self.status
    }

    pub fn order(&self) -> Option<&Order> {
        self.order.as_ref()
    }

    pub fn leg(&self) -> Option<Leg> {
        self.leg
    }

    /// Target of the current leg.  Equals `location` while free.
    #[inline]
    pub fn destination(&self) -> Coordinate {
        self.destination
    }

    /// Waypoints still ahead, nearest first.
    pub fn remaining_path(&self) -> impl ExactSizeIterator<Item = &Coordinate> {
        self.path.iter()
    }

    #[inline]
    pub fn needs_planning(&self) -> bool {
        self.needs_planning
    }

    /// Orders this drone has completed so far.
    #[inline]
    pub fn delivered_count(&self) -> u32 {
        self.delivered
    }

    // ── Lifecycle ─────────────────────────────────────────────────────────

    /// `FREE → AWAITING_PLANNING`: take `order` and head for its origin.
    pub fn accept_order(&mut self, mut order: Order) -> FleetResult<()> {
        self.expect_status(DroneStatus::Free, "accept an order")?;
        order.mark_assigned();
        self.destination    = order.origin;
        self.order          = Some(order);
        self.leg            = Some(Leg::Pickup);
        self.needs_planning = true;
        self.path.clear();
        self.status         = DroneStatus::AwaitingPlanning;
        Ok(())
    }

    /// `AWAITING_PLANNING → DELIVERING`: attach a planned path for the
    /// current leg.
    ///
    /// Leading waypoints equal to the current location are dropped, so the
    /// first `update` always makes progress.
    pub fn receive_path(&mut self, path: Path) -> FleetResult<()> {
        self.expect_status(DroneStatus::AwaitingPlanning, "receive a path")?;
        self.path = path.into_waypoints().into();
        while self.path.front() == Some(&self.location) {
            self.path.pop_front();
        }
        self.needs_planning = false;
        self.status         = DroneStatus::Delivering;
        Ok(())
    }

    /// Ask for a fresh path mid-delivery.  Takes effect on the next
    /// [`update`][Self::update].
    pub fn request_replan(&mut self) -> FleetResult<()> {
        self.expect_status(DroneStatus::Delivering, "request a replan")?;
        self.needs_planning = true;
        Ok(())
    }

    /// Advance one step along the current path and evaluate arrival.
    ///
    /// This is the only method that moves a drone out of `DELIVERING`:
    /// - replan flag set → `AWAITING_PLANNING` (path discarded, no movement);
    /// - pickup path exhausted → `AWAITING_PLANNING` for the drop-off leg;
    /// - drop-off path exhausted → order `DELIVERED`, drone `FREE`.
    pub fn update(&mut self, now: Tick) -> FleetResult<DroneEvent> {
        self.expect_status(DroneStatus::Delivering, "update")?;

        if self.needs_planning {
            self.path.clear();
            self.status = DroneStatus::AwaitingPlanning;
            return Ok(DroneEvent::Replanning);
        }

        if let Some(next) = self.path.pop_front() {
            self.location = next;
        }
        if !self.path.is_empty() {
            return Ok(DroneEvent::Moved { to: self.location });
        }

        self.arrive(now)
    }

    fn arrive(&mut self, now: Tick) -> FleetResult<DroneEvent> {
        match self.leg {
            Some(Leg::Pickup) => {
                let order = self.order.as_ref().ok_or(FleetError::MissingOrder(self.id))?;
                let picked = order.id;
                self.destination    = order.destination;
                self.leg            = Some(Leg::Dropoff);
                self.needs_planning = true;
                self.status         = DroneStatus::AwaitingPlanning;
                Ok(DroneEvent::PickedUp(picked))
            }
            Some(Leg::Dropoff) | None => {
                let mut order = self.order.take().ok_or(FleetError::MissingOrder(self.id))?;
                order.mark_delivered(now);
                self.delivered     += 1;
                self.destination    = self.location;
                self.leg            = None;
                self.needs_planning = false;
                self.status         = DroneStatus::Free;
                Ok(DroneEvent::Delivered(order))
            }
        }
    }

    fn expect_status(&self, want: DroneStatus, action: &'static str) -> FleetResult<()> {
        if self.status == want {
            Ok(())
        } else {
            Err(FleetError::InvalidTransition { drone: self.id, from: self.status, action })
        }
    }
}
