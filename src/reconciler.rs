//! Reconciler for provisioning the plan catalog.
//!
//! This module implements the provisioning run: it compares the plan catalog
//! with the plans Razorpay already holds, creates the missing ones, and hands
//! every plan identifier off to the parameter store. Re-running is safe
//! because creation is keyed on the plan name.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{Instrument, error, info, info_span, warn};
use uuid::Uuid;

use crate::config::{Credentials, Environment, PLAN_CATALOG, PlanSpec, Settings};
use crate::error::Result;
use crate::planner::{DiffEngine, PlannedAction, parameter_name};
use crate::razorpay::{RazorpayClient, RemotePlan};
use crate::store::ParameterStore;

/// Reconciler for the plan catalog of one environment.
#[derive(Debug)]
pub struct Reconciler<'a> {
    /// Target environment.
    environment: Environment,
    /// Product segment of parameter names.
    product: String,
    /// Plans that should exist.
    catalog: &'a [PlanSpec],
    /// Razorpay client.
    client: RazorpayClient,
    /// Diff engine.
    diff_engine: DiffEngine,
}

/// Result of processing one catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum EntryOutcome {
    /// The plan was created during this run.
    Created {
        /// The plan Razorpay returned.
        plan: RemotePlan,
    },
    /// The plan already existed.
    Skipped {
        /// The existing plan.
        plan: RemotePlan,
    },
    /// Creating the plan failed.
    Failed {
        /// Catalog name of the plan.
        name: String,
        /// Why creation failed.
        error: String,
    },
}

impl EntryOutcome {
    /// Returns the plan name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Created { plan } | Self::Skipped { plan } => plan.name(),
            Self::Failed { name, .. } => name,
        }
    }

    /// Returns the remote plan for created and skipped entries.
    #[must_use]
    pub const fn plan(&self) -> Option<&RemotePlan> {
        match self {
            Self::Created { plan } | Self::Skipped { plan } => Some(plan),
            Self::Failed { .. } => None,
        }
    }
}

/// A plan identifier written to the parameter store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredParameter {
    /// Parameter name.
    pub name: String,
    /// Stored plan identifier.
    pub plan_id: String,
    /// Name of the plan the identifier belongs to.
    pub plan_name: String,
}

/// A parameter that could not be written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PersistenceFailure {
    /// Parameter name.
    pub name: String,
    /// Why the write failed.
    pub error: String,
}

/// Summary of a provisioning run.
#[derive(Debug, Serialize)]
pub struct ReconcileSummary {
    /// Identifier of this run, also attached to its log span.
    pub run_id: Uuid,
    /// Target environment.
    pub environment: Environment,
    /// When the run finished.
    pub completed_at: DateTime<Utc>,
    /// Number of plans created.
    pub created: usize,
    /// Number of plans that already existed.
    pub skipped: usize,
    /// Number of plans that could not be created.
    pub failed: usize,
    /// Number of plans present after the run.
    pub total: usize,
    /// Per-entry outcomes, in catalog order.
    pub outcomes: Vec<EntryOutcome>,
    /// Parameters written.
    pub stored: Vec<StoredParameter>,
    /// Parameters that could not be written.
    pub persistence_failures: Vec<PersistenceFailure>,
}

impl ReconcileSummary {
    /// Builds a summary, deriving the counts from the outcomes.
    #[must_use]
    pub fn new(
        run_id: Uuid,
        environment: Environment,
        outcomes: Vec<EntryOutcome>,
        stored: Vec<StoredParameter>,
        persistence_failures: Vec<PersistenceFailure>,
    ) -> Self {
        let created = outcomes
            .iter()
            .filter(|o| matches!(o, EntryOutcome::Created { .. }))
            .count();
        let skipped = outcomes
            .iter()
            .filter(|o| matches!(o, EntryOutcome::Skipped { .. }))
            .count();
        let failed = outcomes.len() - created - skipped;

        Self {
            run_id,
            environment,
            completed_at: Utc::now(),
            created,
            skipped,
            failed,
            total: created + skipped,
            outcomes,
            stored,
            persistence_failures,
        }
    }

    /// Returns true if at least one plan exists after the run.
    ///
    /// Parameter store failures do not affect this.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.total > 0
    }
}

/// What a dry run found for one catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreviewEntry {
    /// Plan name.
    pub name: String,
    /// Whether the plan would be created.
    pub create: bool,
    /// Identifier of the existing plan, if any.
    pub plan_id: Option<String>,
    /// Parameter the identifier would be stored under.
    pub parameter: String,
}

/// Result of a dry run.
#[derive(Debug, Serialize)]
pub struct PlanPreview {
    /// Target environment.
    pub environment: Environment,
    /// Number of plans Razorpay already holds, including ones outside the catalog.
    pub remote_count: usize,
    /// Per-entry findings, in catalog order.
    pub entries: Vec<PreviewEntry>,
}

impl PlanPreview {
    /// Returns the number of plans that would be created.
    #[must_use]
    pub fn create_count(&self) -> usize {
        self.entries.iter().filter(|e| e.create).count()
    }
}

/// Stored value of one catalog entry's parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParameterStatus {
    /// Plan name.
    pub plan_name: String,
    /// Parameter name.
    pub parameter: String,
    /// Stored plan identifier, if present.
    pub value: Option<String>,
    /// Read failure, if the store could not be queried.
    pub error: Option<String>,
}

impl<'a> Reconciler<'a> {
    /// Creates a reconciler for the built-in plan catalog.
    #[must_use]
    pub fn new(environment: Environment, product: &str, client: RazorpayClient) -> Self {
        Self {
            environment,
            product: product.to_string(),
            catalog: PLAN_CATALOG,
            client,
            diff_engine: DiffEngine::new(),
        }
    }

    /// Resolves the environment's credentials and creates a reconciler.
    ///
    /// No request is sent to Razorpay here, so a missing credential fails
    /// the run before any network I/O.
    ///
    /// # Errors
    ///
    /// Returns an error if the credential pair is missing or the HTTP client
    /// cannot be created.
    pub fn connect<F>(settings: &Settings, environment: Environment, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let credentials = Credentials::resolve(environment, lookup)?;
        let client = RazorpayClient::new(&settings.api_base_url, credentials)?;
        Ok(Self::new(environment, &settings.product, client))
    }

    /// Replaces the plan catalog.
    #[must_use]
    pub fn with_catalog(mut self, catalog: &'a [PlanSpec]) -> Self {
        self.catalog = catalog;
        self
    }

    /// Performs a full provisioning run.
    ///
    /// Catalog entries are processed in order; a failed creation is recorded
    /// and the run moves on to the next entry. A failed listing is logged and
    /// treated as an empty remote set. Parameter store failures are logged and
    /// recorded but never fail the run.
    pub async fn reconcile<S>(&self, store: &S) -> ReconcileSummary
    where
        S: ParameterStore + ?Sized,
    {
        let run_id = Uuid::new_v4();
        let span = info_span!("reconcile", %run_id, environment = %self.environment);

        async {
            info!("Initializing subscription plans for {} environment", self.environment);

            let remote = self.existing_plans().await;

            let mut outcomes = Vec::with_capacity(self.catalog.len());
            for action in self.diff_engine.compute(self.catalog, &remote) {
                outcomes.push(self.apply(action).await);
            }

            let (stored, failures) = self.persist(&outcomes, store).await;

            let summary = ReconcileSummary::new(run_id, self.environment, outcomes, stored, failures);
            info!(
                "Created: {}, skipped: {}, failed: {}, total: {}",
                summary.created, summary.skipped, summary.failed, summary.total
            );

            summary
        }
        .instrument(span)
        .await
    }

    /// Lists the plans Razorpay already holds, or none if the listing fails.
    async fn existing_plans(&self) -> Vec<RemotePlan> {
        match self.client.list_plans().await {
            Ok(remote) => {
                info!("Found {} existing plan(s)", remote.len());
                remote
            }
            Err(err) => {
                error!("Error listing plans: {err}");
                if let Some(body) = err.response_body() {
                    error!("Response: {body}");
                }
                Vec::new()
            }
        }
    }

    /// Applies the planned action for one catalog entry.
    async fn apply(&self, action: PlannedAction<'_>) -> EntryOutcome {
        match action {
            PlannedAction::Existing { spec, remote } => {
                info!("Skipping '{}' (already exists as {})", spec.name(), remote.id);
                EntryOutcome::Skipped {
                    plan: remote.clone(),
                }
            }
            PlannedAction::Create(spec) => {
                info!("Creating '{}'", spec.name());
                match self.client.create_plan(spec).await {
                    Ok(plan) => {
                        info!("Created '{}' with ID: {}", spec.name(), plan.id);
                        EntryOutcome::Created { plan }
                    }
                    Err(err) => {
                        error!("Error creating plan '{}': {err}", spec.name());
                        if let Some(body) = err.response_body() {
                            error!("Response: {body}");
                        }
                        EntryOutcome::Failed {
                            name: spec.name().to_string(),
                            error: err.to_string(),
                        }
                    }
                }
            }
        }
    }

    /// Writes the identifier of every created or skipped plan.
    async fn persist<S>(
        &self,
        outcomes: &[EntryOutcome],
        store: &S,
    ) -> (Vec<StoredParameter>, Vec<PersistenceFailure>)
    where
        S: ParameterStore + ?Sized,
    {
        let mut stored = Vec::new();
        let mut failures = Vec::new();

        for plan in outcomes.iter().filter_map(EntryOutcome::plan) {
            let name = parameter_name(&self.product, self.environment, plan.name());
            let description = format!("Razorpay plan ID for {}", plan.name());

            match store.put(&name, &plan.id, &description).await {
                Ok(()) => {
                    info!("Stored {name} = {}", plan.id);
                    stored.push(StoredParameter {
                        name,
                        plan_id: plan.id.clone(),
                        plan_name: plan.name().to_string(),
                    });
                }
                Err(err) => {
                    error!("Failed to store {name}: {err}");
                    failures.push(PersistenceFailure {
                        name,
                        error: err.to_string(),
                    });
                }
            }
        }

        if stored.is_empty() && !failures.is_empty() {
            warn!(
                "Could not store plan IDs in {}; they will need to be configured manually",
                store.backend_type()
            );
        }

        (stored, failures)
    }

    /// Shows what a run would do without creating plans or writing parameters.
    ///
    /// # Errors
    ///
    /// Returns an error if the existing plans cannot be listed.
    pub async fn preview(&self) -> Result<PlanPreview> {
        info!("Previewing subscription plans for {} environment", self.environment);

        let remote = self.client.list_plans().await?;

        let entries = self
            .diff_engine
            .compute(self.catalog, &remote)
            .into_iter()
            .map(|action| {
                let name = action.spec().name();
                let create = action.is_create();
                let plan_id = match action {
                    PlannedAction::Existing { remote, .. } => Some(remote.id.clone()),
                    PlannedAction::Create(_) => None,
                };
                PreviewEntry {
                    name: name.to_string(),
                    create,
                    plan_id,
                    parameter: parameter_name(&self.product, self.environment, name),
                }
            })
            .collect();

        Ok(PlanPreview {
            environment: self.environment,
            remote_count: remote.len(),
            entries,
        })
    }
}

/// Reads the stored identifier of every catalog entry.
///
/// A read failure is recorded for that entry and the remaining entries are
/// still read.
pub async fn parameter_status<S>(
    store: &S,
    product: &str,
    environment: Environment,
    catalog: &[PlanSpec],
) -> Vec<ParameterStatus>
where
    S: ParameterStore + ?Sized,
{
    let mut statuses = Vec::with_capacity(catalog.len());

    for spec in catalog {
        let parameter = parameter_name(product, environment, spec.name());
        let (value, error) = match store.get(&parameter).await {
            Ok(value) => (value, None),
            Err(err) => {
                warn!("Failed to read {parameter}: {err}");
                (None, Some(err.to_string()))
            }
        };

        statuses.push(ParameterStatus {
            plan_name: spec.name().to_string(),
            parameter,
            value,
            error,
        });
    }

    statuses
}

impl std::fmt::Display for ReconcileSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let status = if self.is_success() { "successful" } else { "failed" };
        writeln!(f, "Provisioning {status} ({}):", self.environment)?;
        writeln!(f, "  Created: {}", self.created)?;
        writeln!(f, "  Skipped: {}", self.skipped)?;
        writeln!(f, "  Failed:  {}", self.failed)?;
        writeln!(f, "  Total:   {}", self.total)?;

        if !self.persistence_failures.is_empty() {
            writeln!(f, "  Parameter store errors:")?;
            for failure in &self.persistence_failures {
                writeln!(f, "    - {}: {}", failure.name, failure.error)?;
            }
        }

        Ok(())
    }
}
