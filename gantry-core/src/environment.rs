//! Promotion state model
//!
//! Environments progress dev → test → staging → {blue, green} → prod.
//! Blue and green are two interchangeable production-facing slots; for
//! pipeline naming they collapse into a single "prod" bucket, but they stay
//! distinct as *current* environments. Which slot is live is an external
//! input: nothing here decides a blue/green swap.
//!
//! The model is deliberately table-driven and permissive: any pair of
//! environment strings is accepted and only changes which pipeline name is
//! built. No legal-transition checking is done.

use crate::action::Action;

/// First environment of the progression
pub const DEV: &str = "dev";
/// Intermediate test environment
pub const TEST: &str = "test";
/// Intermediate staging environment
pub const STAGING: &str = "staging";
/// Blue production slot
pub const BLUE: &str = "blue";
/// Green production slot
pub const GREEN: &str = "green";
/// Terminal target of a promotion
pub const PROD: &str = "prod";

/// Whether the environment is one of the two production color slots
pub fn is_production_slot(env: &str) -> bool {
    env == BLUE || env == GREEN
}

/// The naming bucket an environment falls into
///
/// Blue and green collapse to "prod"; every other environment names itself.
pub fn naming_bucket(env: &str) -> &str {
    if is_production_slot(env) { PROD } else { env }
}

/// Whether a promotion target is the production bucket
pub fn is_prod(env: &str) -> bool {
    env == PROD
}

/// A request to promote a product (or one of its applications) from one
/// environment into the next
///
/// `app == None` means "promote every application in the product".
#[derive(Debug, Clone)]
pub struct PromotionRequest {
    /// Product being promoted
    pub product: String,
    /// Environment the artifact currently sits in
    pub environment: String,
    /// Environment being promoted into
    pub next: String,
    /// Single application, or None for all
    pub app: Option<String>,
}

impl PromotionRequest {
    /// The pipeline action this promotion maps to
    pub fn action(&self) -> Action {
        match &self.app {
            Some(app) => Action::Promote {
                app: app.clone(),
                environment: self.environment.clone(),
                next: self.next.clone(),
            },
            None => Action::PromoteAll {
                environment: self.environment.clone(),
                next: self.next.clone(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_slots_collapse_to_prod() {
        assert_eq!(naming_bucket(BLUE), PROD);
        assert_eq!(naming_bucket(GREEN), PROD);
        assert_eq!(naming_bucket(TEST), TEST);
        assert_eq!(naming_bucket(DEV), DEV);
    }

    #[test]
    fn test_arbitrary_environments_are_accepted() {
        // Permissive by design: unknown names are just names.
        assert_eq!(naming_bucket("perf"), "perf");
        assert!(!is_production_slot("perf"));
    }

    #[test]
    fn test_promotion_request_maps_to_action() {
        let req = PromotionRequest {
            product: "myproduct".to_string(),
            environment: TEST.to_string(),
            next: STAGING.to_string(),
            app: Some("basket".to_string()),
        };
        assert!(matches!(req.action(), Action::Promote { .. }));

        let req = PromotionRequest {
            product: "myproduct".to_string(),
            environment: STAGING.to_string(),
            next: PROD.to_string(),
            app: None,
        };
        assert!(matches!(req.action(), Action::PromoteAll { .. }));
    }
}
