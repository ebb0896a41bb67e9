//! Pipeline actions and name resolution
//!
//! Maps an action to the name of the pipeline BuildConfig that performs it,
//! inside the product's CI/CD namespace. This table is the concrete output
//! of the promotion state model: promoting into "prod" always routes
//! through the single `*-to-prod` pipeline regardless of which color slot
//! is live, while promotions between non-prod environments are named after
//! the *current* environment.

use crate::environment;
use serde::{Deserialize, Serialize};

/// A deliverable action the control plane can trigger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    /// Build a single application
    Build { app: String },
    /// Build every application in the product
    BuildAll,
    /// Release a single application
    Release { app: String },
    /// Release every application in the product
    ReleaseAll,
    /// Promote a single application into the next environment
    Promote {
        app: String,
        environment: String,
        next: String,
    },
    /// Promote every application into the next environment
    PromoteAll { environment: String, next: String },
    /// Swap the live production slot
    PromoteToLive,
    /// Run the qa suite against an environment
    Qa { environment: String },
}

impl Action {
    /// Resolve the name of the pipeline that performs this action
    ///
    /// For `Qa` this is the wrapper pipeline external callers invoke; the
    /// implementation pipeline is resolved with [`qa_impl_pipeline`].
    pub fn pipeline_name(&self) -> String {
        match self {
            Action::Build { app } => format!("build-{}", app),
            Action::BuildAll => "build-all".to_string(),
            Action::Release { app } => format!("release-{}", app),
            Action::ReleaseAll => "release-all".to_string(),
            Action::Promote {
                app,
                environment,
                next,
            } => {
                if environment::is_prod(next) {
                    format!("promote-to-prod-{}", app)
                } else {
                    format!("promote-{}-{}", environment, app)
                }
            }
            Action::PromoteAll { environment, next } => {
                if environment::is_prod(next) {
                    "promote-all-to-prod".to_string()
                } else {
                    format!("promote-all-{}", environment)
                }
            }
            Action::PromoteToLive => "promote-to-live".to_string(),
            Action::Qa { environment } => qa_pipeline(environment),
        }
    }

    /// The application this action is scoped to, if any
    pub fn app(&self) -> Option<&str> {
        match self {
            Action::Build { app } | Action::Release { app } | Action::Promote { app, .. } => {
                Some(app)
            }
            _ => None,
        }
    }

    /// Whether this action promotes between environments
    pub fn is_promotion(&self) -> bool {
        matches!(self, Action::Promote { .. } | Action::PromoteAll { .. })
    }
}

/// Name of the qa wrapper pipeline for an environment
///
/// Blue/green collapse into the "prod" bucket: there is one qa pipeline for
/// production, whichever slot is live.
pub fn qa_pipeline(environment: &str) -> String {
    format!("qa-{}", environment::naming_bucket(environment))
}

/// Name of the qa implementation pipeline (the one that actually runs the
/// tests; the wrapper invokes it)
pub fn qa_impl_pipeline(environment: &str) -> String {
    format!("qa-{}-impl", environment::naming_bucket(environment))
}
