//! `usra-core`: foundation building blocks shared by the engine crates.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod clock;
pub mod config;
pub mod entity;
pub mod error;
pub mod id;
pub mod value_object;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{EngineConfig, TelemetryConfig};
pub use entity::Entity;
pub use error::{DomainError, DomainResult};
pub use id::{AssignmentId, RoleId, UserId};
pub use value_object::ValueObject;
