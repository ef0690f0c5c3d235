//! Depot re-routing.

use bus_core::RouteId;
use bus_fleet::Bus;

use crate::{PolicyContext, PolicyError, PolicyResult};

/// Decides whether a bus standing at the depot should switch routes.
///
/// Return `Some(route)` to reassign the bus; it then heads for the second
/// stop of `route`, so every route a policy hands out should start at the
/// depot.  Returning the bus's current route restarts it from the top of
/// that route.  Return `None` to leave the bus where it is in its cycle.
///
/// # Example
///
/// ```rust,ignore
/// /// Put every bus on route 3 after 10:00.
/// struct MorningSwitch;
///
/// impl ReroutePolicy for MorningSwitch {
///     fn reroute(&mut self, bus: &Bus, ctx: &PolicyContext<'_>) -> Option<RouteId> {
///         (ctx.now.hour() >= 10 && bus.route() != RouteId(3)).then_some(RouteId(3))
///     }
/// }
/// ```
pub trait ReroutePolicy {
    fn reroute(&mut self, bus: &Bus, ctx: &PolicyContext<'_>) -> Option<RouteId>;
}

/// Buses stay on the route they started with.
#[derive(Copy, Clone, Debug, Default)]
pub struct KeepRoute;

impl ReroutePolicy for KeepRoute {
    #[inline]
    fn reroute(&mut self, _bus: &Bus, _ctx: &PolicyContext<'_>) -> Option<RouteId> {
        None
    }
}

/// Each depot visit moves the bus to the next route in a fixed rotation.
///
/// A bus on a route outside the rotation joins it at the first entry.
#[derive(Clone, Debug)]
pub struct RotateRoutes {
    rotation: Vec<RouteId>,
}

impl RotateRoutes {
    pub fn new(rotation: Vec<RouteId>) -> PolicyResult<Self> {
        if rotation.is_empty() {
            return Err(PolicyError::EmptyRotation);
        }
        for (i, r) in rotation.iter().enumerate() {
            if rotation[..i].contains(r) {
                return Err(PolicyError::DuplicateInRotation(*r));
            }
        }
        Ok(Self { rotation })
    }

    pub fn rotation(&self) -> &[RouteId] {
        &self.rotation
    }
}

impl ReroutePolicy for RotateRoutes {
    fn reroute(&mut self, bus: &Bus, _ctx: &PolicyContext<'_>) -> Option<RouteId> {
        let next = match self.rotation.iter().position(|&r| r == bus.route()) {
            Some(i) => self.rotation[(i + 1) % self.rotation.len()],
            None => self.rotation[0],
        };
        (next != bus.route()).then_some(next)
    }
}
