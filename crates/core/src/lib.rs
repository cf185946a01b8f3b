#![deny(unsafe_code)]
//! Core simulation types for flowfield, a 3D vector-field particle-advection
//! demo.
//!
//! The pipeline: [`GridField`] samples an analytic velocity formula on a
//! regular lattice; [`VelocityField`] turns those samples into a continuous
//! function via per-axis RBF interpolation; [`ParticleSet`] advects a cloud
//! of particles through it with a fixed Euler time step; and
//! [`SimulationSession`] owns the whole lot and exposes the controller
//! operations (intensity scaling, direction override, particle reset, field
//! regeneration) that external drivers forward user input to.
//!
//! Rendering, windowing, and frame timing live outside this crate: a driver
//! calls [`SimulationSession::step`] once per frame and reads positions back.

pub mod error;
pub mod grid;
pub mod params;
pub mod particles;
pub mod prng;
pub mod session;
pub mod velocity;

pub use error::{InterpolationBuildError, ParameterError, SimError};
pub use flowfield_rbf::RbfKernel;
pub use grid::{direction_vector, FieldVariant, GridField, DOMAIN_MAX, DOMAIN_MIN};
pub use params::SimulationParameters;
pub use particles::ParticleSet;
pub use prng::Xorshift64;
pub use session::SimulationSession;
pub use velocity::VelocityField;
