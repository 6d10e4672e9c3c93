//! Data models for the Splunk REST API resources used by the setup tools.

mod common;
mod context;
mod datamodels;
mod indexes;
mod macros;
mod passwords;
mod server;
mod tags;

pub use common::*;
pub use context::*;
pub use datamodels::*;
pub use indexes::*;
pub use macros::*;
pub use passwords::*;
pub use server::*;
pub use tags::*;
