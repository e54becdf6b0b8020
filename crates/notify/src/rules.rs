//! Per-run notification rule resolution.

use std::collections::HashMap;

use duewatch_core::types::DbId;
use duewatch_core::EffectiveRule;
use duewatch_db::models::NotificationRule;
use duewatch_db::repositories::NotificationRuleRepo;
use duewatch_db::DbPool;

/// The resolved rules for one dispatch run.
///
/// Built from a single batched read of the distinct project ids in the
/// run's candidate set; `resolve` never touches the database again.
/// The set lives only for the run; it is not a cross-run cache.
pub struct RuleSet {
    rules: HashMap<DbId, EffectiveRule>,
    fallback: EffectiveRule,
}

impl RuleSet {
    /// Build a rule set from stored rows and the configured fallback
    /// `days_before`.
    pub fn new(stored: Vec<NotificationRule>, default_days_before: i32) -> Self {
        let rules = stored
            .into_iter()
            .map(|r| {
                (
                    r.project_id,
                    EffectiveRule {
                        days_before: r.days_before,
                        notify_line: r.notify_line,
                        notify_email: r.notify_email,
                    },
                )
            })
            .collect();
        Self {
            rules,
            fallback: EffectiveRule::fallback(default_days_before),
        }
    }

    /// Load the stored rules for the given projects in one round trip.
    pub async fn load(
        pool: &DbPool,
        project_ids: &[DbId],
        default_days_before: i32,
    ) -> Result<Self, sqlx::Error> {
        let stored = NotificationRuleRepo::list_for_projects(pool, project_ids).await?;
        Ok(Self::new(stored, default_days_before))
    }

    /// The effective rule for a project: the stored rule verbatim, or
    /// the fallback (both channels on) when none is configured.
    pub fn resolve(&self, project_id: DbId) -> EffectiveRule {
        self.rules.get(&project_id).copied().unwrap_or(self.fallback)
    }
}
