//! Connector registration
//!
//! A [`Piece`] is what a host automation platform loads: it lists the
//! available actions and triggers, declares their inputs and executes them.

use log::{info, warn};
use serde::Serialize;
use std::sync::Arc;

use crate::actions::{self, Action, ActionOutput};
use crate::auth::{self, AuthValidation};
use crate::client::{AxigenClient, Transport};
use crate::config::AxigenCredentials;
use crate::error::{AxigenError, Result};
use crate::fields;
use crate::props::{DropdownSource, DropdownState, PropertyDef, Props, check_required};
use crate::store::KeyValueStore;
use crate::triggers::{self, Trigger};

/// Per-invocation context handed to actions and triggers
#[derive(Clone)]
pub struct PieceContext {
    credentials: AxigenCredentials,
    transport: Arc<dyn Transport>,
}

impl PieceContext {
    pub fn new(credentials: AxigenCredentials, transport: Arc<dyn Transport>) -> Self {
        Self {
            credentials,
            transport,
        }
    }

    pub fn credentials(&self) -> &AxigenCredentials {
        &self.credentials
    }

    pub fn transport(&self) -> &Arc<dyn Transport> {
        &self.transport
    }

    /// Build a fresh client (with no session) for this invocation
    pub fn client(&self) -> Result<AxigenClient> {
        AxigenClient::new(self.credentials.clone(), self.transport.clone())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    Action,
    Trigger,
}

/// Description of one action or trigger
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationInfo {
    pub kind: OperationKind,
    pub name: &'static str,
    pub display_name: &'static str,
    pub description: &'static str,
    pub props: Vec<PropertyDef>,
}

/// The Axigen connector as seen by a host
pub struct Piece {
    pub display_name: &'static str,
    pub description: &'static str,
    pub categories: Vec<&'static str>,
    actions: Vec<Box<dyn Action>>,
    triggers: Vec<Box<dyn Trigger>>,
}

impl Piece {
    /// The connector with all its actions and triggers
    pub fn axigen() -> Self {
        Self {
            display_name: "Axigen",
            description: "Mail operations and new-mail polling for Axigen Mail Server",
            categories: vec!["COMMUNICATION"],
            actions: actions::all(),
            triggers: triggers::all(),
        }
    }

    /// Inputs needed to authenticate (server, username, password)
    pub fn auth_props(&self) -> Vec<PropertyDef> {
        auth::auth_props()
    }

    /// Check credentials by logging in once
    pub fn validate_auth(&self, credentials: &AxigenCredentials, transport: Arc<dyn Transport>) -> AuthValidation {
        auth::validate_credentials(credentials, transport)
    }

    /// All actions and triggers with their declared inputs
    pub fn operations(&self) -> Vec<OperationInfo> {
        let actions = self.actions.iter().map(|a| OperationInfo {
            kind: OperationKind::Action,
            name: a.name(),
            display_name: a.display_name(),
            description: a.description(),
            props: a.props(),
        });
        let triggers = self.triggers.iter().map(|t| OperationInfo {
            kind: OperationKind::Trigger,
            name: t.name(),
            display_name: t.display_name(),
            description: t.description(),
            props: t.props(),
        });
        actions.chain(triggers).collect()
    }

    pub fn action(&self, name: &str) -> Option<&dyn Action> {
        self.actions.iter().find(|a| a.name() == name).map(|a| a.as_ref())
    }

    pub fn trigger(&self, name: &str) -> Option<&dyn Trigger> {
        self.triggers.iter().find(|t| t.name() == name).map(|t| t.as_ref())
    }

    /// Validate inputs and run an action
    pub fn run_action(&self, name: &str, ctx: &PieceContext, props: &Props) -> Result<ActionOutput> {
        let action = self
            .action(name)
            .ok_or_else(|| AxigenError::InvalidInput(format!("unknown action: {}", name)))?;
        check_required(&action.props(), props)?;

        info!("Running action {}", name);
        action.run(ctx, props).inspect_err(|e| warn!("Action {} failed: {}", name, e))
    }

    /// Look up a trigger and validate its inputs
    pub fn prepared_trigger(&self, name: &str, props: &Props) -> Result<&dyn Trigger> {
        let trigger = self
            .trigger(name)
            .ok_or_else(|| AxigenError::InvalidInput(format!("unknown trigger: {}", name)))?;
        check_required(&trigger.props(), props)?;
        Ok(trigger)
    }

    pub fn enable_trigger(&self, name: &str, ctx: &PieceContext, props: &Props, store: &dyn KeyValueStore) -> Result<()> {
        self.prepared_trigger(name, props)?.on_enable(ctx, props, store)
    }

    pub fn disable_trigger(&self, name: &str, ctx: &PieceContext, props: &Props, store: &dyn KeyValueStore) -> Result<()> {
        self.prepared_trigger(name, props)?.on_disable(ctx, props, store)
    }

    pub fn poll_trigger(
        &self,
        name: &str,
        ctx: &PieceContext,
        props: &Props,
        store: &dyn KeyValueStore,
    ) -> Result<Vec<serde_json::Value>> {
        self.prepared_trigger(name, props)?.run(ctx, props, store)
    }

    pub fn test_trigger(
        &self,
        name: &str,
        ctx: &PieceContext,
        props: &Props,
        store: &dyn KeyValueStore,
    ) -> Result<Vec<serde_json::Value>> {
        self.prepared_trigger(name, props)?.test(ctx, props, store)
    }

    /// Resolve the options of a dynamic dropdown
    ///
    /// Never fails; problems are reported through a disabled dropdown.
    pub fn dropdown_options(
        &self,
        source: DropdownSource,
        credentials: Option<&AxigenCredentials>,
        transport: Arc<dyn Transport>,
    ) -> DropdownState {
        match source {
            DropdownSource::Folders => fields::folder_options(credentials, transport),
        }
    }
}
