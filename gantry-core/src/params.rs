//! Pipeline parameter building
//!
//! Produces the environment-variable set injected into a pipeline trigger.
//! The `repo` argument is the already-resolved value for `REPO` (explicit
//! URL, the app's BuildConfig git source, or the default product
//! repository); resolving it is the caller's job since it may need a
//! cluster round trip.

use crate::action::Action;
use crate::naming::Naming;
use std::collections::HashMap;

/// Build the parameter set for one pipeline invocation
///
/// Every action carries `PRODUCT`. Per-app actions add `MICROSERVICE` and
/// the default product repository under `PRODUCT_REPO`; promotions add
/// `PROJECT` (the target environment's namespace); qa runs add `ENV`.
/// `promote-to-live` takes only `PRODUCT`.
pub fn for_action(
    naming: &Naming,
    product: &str,
    action: &Action,
    repo: &str,
    product_repo: &str,
) -> HashMap<String, String> {
    let mut params = HashMap::new();

    match action {
        Action::Build { app } | Action::Release { app } | Action::Promote { app, .. } => {
            params.insert("REPO".to_string(), repo.to_string());
            params.insert("PRODUCT".to_string(), naming.prod(product));
            params.insert("MICROSERVICE".to_string(), app.clone());
            params.insert("PRODUCT_REPO".to_string(), product_repo.to_string());
        }
        Action::BuildAll => {
            params.insert("REPO".to_string(), repo.to_string());
            params.insert("PRODUCT".to_string(), naming.prod(product));
        }
        Action::ReleaseAll | Action::PromoteAll { .. } => {
            params.insert("REPO".to_string(), repo.to_string());
            params.insert("PRODUCT".to_string(), product.to_string());
        }
        Action::Qa { environment } => {
            params.insert("REPO".to_string(), repo.to_string());
            params.insert("PRODUCT".to_string(), product.to_string());
            params.insert("ENV".to_string(), environment.clone());
        }
        Action::PromoteToLive => {
            params.insert("PRODUCT".to_string(), product.to_string());
        }
    }

    if let Action::Promote { next, .. } | Action::PromoteAll { next, .. } = action {
        params.insert("PROJECT".to_string(), naming.namespace(product, next));
    }

    params
}
