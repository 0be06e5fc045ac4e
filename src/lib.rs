pub mod simulation;
pub mod configuration;
pub mod benchmark;

pub use simulation::states::{Body, BodyHandle, BodyKind, NVec2, Slot, System};
pub use simulation::params::{Parameters, SPEED_OF_LIGHT, STANDARD_GRAVITY};
pub use simulation::error::SimulationError;
pub use simulation::forces::{AccelSet, Acceleration, UniformGravity};
pub use simulation::integrator::euler_integrator;
pub use simulation::collision::{find_contacts, resolve_contacts, BroadPhase, BruteForce, Contact};
pub use simulation::world::World;
pub use simulation::scenario::Scenario;
pub use simulation::driver::FixedTimestep;

pub use configuration::config::{BodyConfig, RunConfig, ScenarioConfig, WorldConfig};

pub use benchmark::benchmark::bench_step;
