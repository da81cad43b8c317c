// legwork-core: geometry kernel, data model, config and errors for procedural biped legs.

pub mod config;
pub mod error;
pub mod math;
pub mod path;
pub mod plane;
pub mod types;

pub mod prelude {
    pub use crate::config::{
        CharacterConfig, GaitConfig, HeadConfig, HipsConfig, IdleConfig, LegConfig,
    };
    pub use crate::error::{ConfigError, LegworkError};
    pub use crate::plane::{Plane, Projector};
    pub use crate::types::{Foot, Hips, Segment, Stance, Step};
}
