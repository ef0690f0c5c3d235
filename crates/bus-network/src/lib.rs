//! `bus-network` — the static and semi-static parts of the transit system:
//! stops, routes, and the riders who move between them.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                    |
//! |-------------|-------------------------------------------------------------|
//! | [`person`]  | `Person`, `PersonState`, `PersonStore` (rider arena)        |
//! | [`stop`]    | `BusStop` — waiting line + arrival schedule                 |
//! | [`route`]   | `Route`, `RouteRegistry`                                    |
//! | [`network`] | `TransitNetwork`, `TransitNetworkBuilder`                   |
//! | [`error`]   | `NetworkError`, `NetworkResult<T>`                          |
//!
//! # Ownership
//!
//! Entities refer to each other by typed ID, never by reference.  The
//! `PersonStore` owns every rider ever materialized; stops and buses hold
//! `PersonId`s.  A rider who arrives is dropped from every live list but
//! stays in the store as a record for post-run analysis.
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.           |

pub mod error;
pub mod network;
pub mod person;
pub mod route;
pub mod stop;


pub use error::{NetworkError, NetworkResult};
pub use network::{TransitNetwork, TransitNetworkBuilder};
pub use person::{Person, PersonState, PersonStore};
pub use route::{Route, RouteRegistry};
pub use stop::BusStop;
