//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, OutputFormat};
use crate::config::ProviderConfig;
use crate::engine::{Action, Engine, LookupResult, Plan};
use crate::error::{Error, Result, ResultExt};
use crate::manifest::{load_manifest, DataDecl, Manifest};
use crate::resource::KINDS;
use crate::state::StateManager;
use serde_json::{json, Value};

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Plan => self.plan().await,
            Commands::Apply => self.apply().await,
            Commands::Destroy => self.destroy().await,
            Commands::Import { kind, address, id } => self.import(kind, address, id).await,
            Commands::Lookup { kind, query, many } => self.lookup(kind, query, *many).await,
            Commands::Validate => self.validate(),
            Commands::Kinds => self.kinds(),
        }
    }

    /// Load the manifest named with `-f`
    fn load_manifest(&self) -> Result<Manifest> {
        let path = self
            .cli
            .manifest
            .as_ref()
            .ok_or_else(|| Error::config("Manifest file not specified (use -f flag)"))?;
        load_manifest(path)
    }

    /// Provider settings from the manifest if one is given, else from the
    /// environment alone
    fn provider_config(&self) -> Result<ProviderConfig> {
        match &self.cli.manifest {
            Some(path) => Ok(load_manifest(path)?.provider),
            None => Ok(ProviderConfig::default()),
        }
    }

    fn engine(&self, provider: &ProviderConfig) -> Result<Engine> {
        let client = provider.build_client()?;
        let state = StateManager::from_file(&self.cli.state)
            .with_context(|| format!("Cannot open state file {}", self.cli.state.display()))?;
        Ok(Engine::new(client, state))
    }

    async fn plan(&self) -> Result<()> {
        let manifest = self.load_manifest()?;
        let engine = self.engine(&manifest.provider)?;
        let plan = engine.plan(&manifest).await?;

        match self.cli.format {
            OutputFormat::Json => self.output_message(&serde_json::to_value(&plan)?),
            OutputFormat::Pretty => print_plan(&plan),
        }
        Ok(())
    }

    async fn apply(&self) -> Result<()> {
        let manifest = self.load_manifest()?;
        let engine = self.engine(&manifest.provider)?;
        let stats = engine.apply(&manifest).await?;

        self.output_message(&json!({
            "type": "APPLY",
            "stats": stats
        }));
        Ok(())
    }

    async fn destroy(&self) -> Result<()> {
        let engine = self.engine(&self.provider_config()?)?;
        let deleted = engine.destroy().await?;

        self.output_message(&json!({
            "type": "DESTROY",
            "deleted": deleted
        }));
        Ok(())
    }

    async fn import(&self, kind: &str, address: &str, id: &str) -> Result<()> {
        let engine = self.engine(&self.provider_config()?)?;
        let data = engine.import(kind, address, id).await?;

        self.output_message(&json!({
            "type": "IMPORT",
            "address": address,
            "kind": kind,
            "id": data.id(),
            "attributes": data.attributes()
        }));
        Ok(())
    }

    async fn lookup(&self, kind: &str, query: &str, many: bool) -> Result<()> {
        let engine = self.engine(&self.provider_config()?)?;
        let decl = DataDecl {
            kind: kind.to_string(),
            name: kind.to_string(),
            query: query.to_string(),
            many,
        };

        let result = match engine.lookup(&decl).await? {
            LookupResult::One(None) => Value::Null,
            LookupResult::One(Some(data)) => json!({
                "id": data.id(),
                "attributes": data.attributes()
            }),
            LookupResult::Many(set) => serde_json::to_value(set)?,
        };

        self.output_message(&json!({
            "type": "LOOKUP",
            "kind": kind,
            "query": query,
            "result": result
        }));
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        let manifest = self.load_manifest()?;

        self.output_message(&json!({
            "type": "LOG",
            "log": {
                "level": "INFO",
                "message": format!(
                    "Manifest is valid with {} resources and {} data blocks",
                    manifest.resources.len(),
                    manifest.data.len()
                )
            }
        }));
        Ok(())
    }

    fn kinds(&self) -> Result<()> {
        self.output_message(&json!({
            "type": "KINDS",
            "kinds": KINDS
        }));
        Ok(())
    }

    /// Output a message
    fn output_message(&self, msg: &Value) {
        match self.cli.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string(msg).unwrap_or_default());
            }
            OutputFormat::Pretty => {
                println!("{}", serde_json::to_string_pretty(msg).unwrap_or_default());
            }
        }
    }
}

fn print_plan(plan: &Plan) {
    for change in &plan.changes {
        let id = change
            .id
            .as_deref()
            .map(|id| format!(" (id {id})"))
            .unwrap_or_default();
        match (&change.action, &change.replaced_kind) {
            (Action::Replace, Some(old)) => println!(
                "{:>3} {} [{} -> {}]{id}",
                change.action.symbol(),
                change.address,
                old,
                change.kind
            ),
            _ => println!(
                "{:>3} {} [{}]{id}",
                change.action.symbol(),
                change.address,
                change.kind
            ),
        }
        for attribute in &change.changed {
            println!("      ~ {attribute}");
        }
    }

    for outcome in &plan.data {
        let found = match &outcome.result {
            LookupResult::One(Some(data)) => format!("id {}", data.id()),
            LookupResult::One(None) => "no match".to_string(),
            LookupResult::Many(set) => format!("{} match(es)", set.ids.len()),
        };
        println!(" <= data.{} [{}]: {found}", outcome.name, outcome.kind);
    }

    println!();
    println!("Plan: {}", plan.summary());
}
