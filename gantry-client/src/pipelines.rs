//! Pipeline resolution and triggering

use crate::ControlPlane;
use crate::cluster::ClusterClient;
use crate::error::Result;
use gantry_core::domain::{PipelineInvocation, ResourceKey, ResourceKind, TriggerReceipt};
use gantry_core::environment::PromotionRequest;
use gantry_core::manifest::BuildConfigManifest;
use gantry_core::{Action, action, params};

impl<C: ClusterClient> ControlPlane<C> {
    // =============================================================================
    // Resolve and trigger
    // =============================================================================

    /// Resolve the pipeline for an action, build its parameters and fire it
    ///
    /// `repo_url` overrides the `REPO` parameter; when absent it is
    /// resolved from the app's BuildConfig git source (per-app actions),
    /// the qa implementation pipeline's git source (qa actions), or the
    /// default product repository (product-wide actions).
    pub async fn resolve_and_trigger(
        &self,
        product: &str,
        action: &Action,
        repo_url: Option<&str>,
    ) -> Result<TriggerReceipt> {
        let repo = self.resolve_repo(product, action, repo_url).await?;
        let parameters = params::for_action(&self.naming, product, action, &repo, &self.product_repo);
        let invocation = PipelineInvocation::new(
            action.pipeline_name(),
            self.naming.cicd(product),
            parameters,
        );
        self.execute(&invocation).await
    }

    /// Trigger one already-resolved pipeline invocation
    ///
    /// Fetches the pipeline BuildConfig and fires it with the invocation's
    /// parameters. Fetch failure or trigger rejection aborts the whole
    /// invocation; no partial effect is observable through this client.
    pub async fn execute(&self, invocation: &PipelineInvocation) -> Result<TriggerReceipt> {
        let key = ResourceKey::new(
            ResourceKind::BuildConfig,
            invocation.namespace.clone(),
            invocation.pipeline.clone(),
        );
        let pipeline = self.client.fetch(&key).await?;
        let receipt = self.client.trigger(&pipeline, &invocation.parameters).await?;

        tracing::info!(
            pipeline = %invocation.pipeline,
            namespace = %invocation.namespace,
            build = receipt.build.as_deref(),
            "pipeline triggered"
        );
        Ok(receipt)
    }

    async fn resolve_repo(
        &self,
        product: &str,
        action: &Action,
        repo_url: Option<&str>,
    ) -> Result<String> {
        if let Some(url) = repo_url {
            return Ok(url.to_string());
        }
        match action {
            Action::Build { app } | Action::Release { app } | Action::Promote { app, .. } => {
                self.repo_url(product, app).await
            }
            // The qa wrapper is handed the repository of the pipeline that
            // actually implements the tests.
            Action::Qa { environment } => {
                let key = ResourceKey::new(
                    ResourceKind::BuildConfig,
                    self.naming.cicd(product),
                    action::qa_impl_pipeline(environment),
                );
                let doc = self.client.fetch(&key).await?;
                Ok(BuildConfigManifest::from_value(doc).git_repository()?)
            }
            _ => Ok(self.product_repo.clone()),
        }
    }

    // =============================================================================
    // Per-action helpers
    // =============================================================================

    /// Build one application
    pub async fn trigger_build(
        &self,
        product: &str,
        app: &str,
        repo_url: Option<&str>,
    ) -> Result<TriggerReceipt> {
        let action = Action::Build {
            app: app.to_string(),
        };
        self.resolve_and_trigger(product, &action, repo_url).await
    }

    /// Build every application in the product
    pub async fn trigger_build_all(&self, product: &str) -> Result<TriggerReceipt> {
        self.resolve_and_trigger(product, &Action::BuildAll, None)
            .await
    }

    /// Release one application
    pub async fn trigger_release(&self, product: &str, app: &str) -> Result<TriggerReceipt> {
        let action = Action::Release {
            app: app.to_string(),
        };
        self.resolve_and_trigger(product, &action, None).await
    }

    /// Release every application in the product
    pub async fn trigger_release_all(&self, product: &str) -> Result<TriggerReceipt> {
        self.resolve_and_trigger(product, &Action::ReleaseAll, None)
            .await
    }

    /// Promote a product (or one application) into its next environment
    pub async fn trigger_promotion(&self, request: &PromotionRequest) -> Result<TriggerReceipt> {
        self.resolve_and_trigger(&request.product, &request.action(), None)
            .await
    }

    /// Swap the live production slot
    pub async fn trigger_promote_to_live(&self, product: &str) -> Result<TriggerReceipt> {
        self.resolve_and_trigger(product, &Action::PromoteToLive, None)
            .await
    }

    /// Run the qa suite against an environment
    pub async fn trigger_qa(&self, product: &str, environment: &str) -> Result<TriggerReceipt> {
        let action = Action::Qa {
            environment: environment.to_string(),
        };
        self.resolve_and_trigger(product, &action, None).await
    }
}
