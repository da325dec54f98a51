//! Connector triggers
//!
//! Polling triggers that emit new items to a workflow. Each trigger instance
//! keeps its state in a host-provided key/value store.

mod new_email;

pub use new_email::{NewEmailPolling, NewEmailReceived, parse_mail_date};

use serde_json::Value;

use crate::error::Result;
use crate::piece::PieceContext;
use crate::props::{PropertyDef, Props};
use crate::store::KeyValueStore;

/// A polling trigger exposed to the host
pub trait Trigger: Send + Sync {
    fn name(&self) -> &'static str;
    fn display_name(&self) -> &'static str;
    fn description(&self) -> &'static str;
    fn props(&self) -> Vec<PropertyDef>;

    /// Example of one emitted item
    fn sample_data(&self) -> Value;

    fn on_enable(&self, ctx: &PieceContext, props: &Props, store: &dyn KeyValueStore) -> Result<()>;
    fn on_disable(&self, ctx: &PieceContext, props: &Props, store: &dyn KeyValueStore) -> Result<()>;

    /// One poll cycle; returns the new items, oldest first
    fn run(&self, ctx: &PieceContext, props: &Props, store: &dyn KeyValueStore) -> Result<Vec<Value>>;

    /// Sample of recent items; does not change trigger state
    fn test(&self, ctx: &PieceContext, props: &Props, store: &dyn KeyValueStore) -> Result<Vec<Value>>;
}

/// All triggers, in registration order
pub fn all() -> Vec<Box<dyn Trigger>> {
    vec![Box::new(NewEmailReceived)]
}
