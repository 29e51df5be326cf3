//! Render-thread engine and the control protocol that drives it.
//!
//! The control thread owns a [`CommandSender`]; the render thread owns the
//! [`RenderEngine`] holding the other end of the ring. Effect state, filter
//! masks and delay contents are only ever touched from `render_block`.

pub mod command;
pub mod config;
pub mod effects;
pub mod render;
pub mod status;

pub use command::{command_channel, Command, CommandReceiver, CommandSender};
pub use config::{ConfigError, ConfigResult, EngineConfig};
pub use effects::{Effect, EffectFlags, EffectState};
pub use render::RenderEngine;
pub use status::{latest_status, status_channel, EngineStatus};
