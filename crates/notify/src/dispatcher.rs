//! The reminder dispatch run.
//!
//! One [`Dispatcher::run`] call is one linear pass: query candidates in
//! the look-ahead window, resolve per-project rules, drop pairs already
//! logged today, attempt each eligible channel, and append successful
//! sends to the ledger. Delivery failures are isolated per attempt; only
//! database errors abort the run. There is no internal retry; the next
//! externally scheduled run re-evaluates the ledger and tries again.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::{Days, NaiveDate};
use serde::Serialize;

use duewatch_core::message::Reminder;
use duewatch_core::rules::within_window;
use duewatch_core::types::DbId;
use duewatch_core::Channel;
use duewatch_db::models::{DeadlineCandidate, Profile, SentPair};
use duewatch_db::repositories::{DeadlineRepo, NotificationLogRepo, ProfileRepo};
use duewatch_db::DbPool;

use crate::config::{NotifyConfig, MAX_LOOKAHEAD_DAYS};
use crate::delivery::email::truncate_detail;
use crate::delivery::{EmailDelivery, EmailError, LineDelivery, LineTransport};
use crate::delivery::{EmailSender, LineSender};
use crate::rules::RuleSet;

// ---------------------------------------------------------------------------
// Results
// ---------------------------------------------------------------------------

/// One failed email attempt, kept for operator visibility in the run
/// summary. Never fatal for the run.
#[derive(Debug, Clone, Serialize)]
pub struct EmailFailure {
    /// Recipient address the attempt targeted.
    pub to: String,
    /// Provider HTTP status; `0` when the request never completed
    /// (network error, timeout).
    pub status: u16,
    /// Truncated provider error detail.
    pub detail: String,
}

/// Counters and errors accumulated over one dispatch run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    /// Successful sends across all channels.
    pub sent: u32,
    /// Successful LINE sends.
    pub sent_line: u32,
    /// Successful email sends.
    pub sent_email: u32,
    /// Candidates examined after the per-project window filter.
    pub deadlines_checked: u32,
    /// Non-fatal email delivery failures.
    pub email_errors: Vec<EmailFailure>,
}

/// Fatal run errors. Per-attempt delivery failures never surface here.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// The persistence layer was unreachable or a query failed.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

// ---------------------------------------------------------------------------
// Dispatcher
// ---------------------------------------------------------------------------

/// The run coordinator: owns the pool, channel senders, and config.
///
/// Not internally re-entrant; the external scheduler is expected to let
/// each run finish before triggering the next.
pub struct Dispatcher {
    pool: DbPool,
    config: NotifyConfig,
    line: Arc<dyn LineSender>,
    email: Arc<dyn EmailSender>,
}

impl Dispatcher {
    /// Build a dispatcher with the real LINE and Resend transports.
    ///
    /// A missing Resend key still constructs an email sender; the run
    /// loop never calls it in that case (channel skipped up front).
    pub fn new(pool: DbPool, config: NotifyConfig) -> Self {
        let line = Arc::new(LineDelivery::new(config.line_channel_token.clone()));
        let email = Arc::new(EmailDelivery::new(
            config.resend_api_key.clone().unwrap_or_default(),
            config.from_email.clone(),
        ));
        Self::with_senders(pool, config, line, email)
    }

    /// Build a dispatcher with explicit senders (test seam).
    pub fn with_senders(
        pool: DbPool,
        config: NotifyConfig,
        line: Arc<dyn LineSender>,
        email: Arc<dyn EmailSender>,
    ) -> Self {
        Self {
            pool,
            config,
            line,
            email,
        }
    }

    fn push_configured(&self) -> bool {
        self.config.line_channel_token.is_some()
    }

    fn email_configured(&self) -> bool {
        self.config.resend_api_key.is_some()
    }

    /// Execute one dispatch pass for the given calendar day.
    ///
    /// `today` is resolved once by the caller so every comparison in the
    /// run uses the same date source.
    pub async fn run(&self, today: NaiveDate) -> Result<RunSummary, DispatchError> {
        let mut summary = RunSummary::default();

        // Querying: wide look-ahead, narrowed per project below.
        let window_end = today
            .checked_add_days(Days::new(MAX_LOOKAHEAD_DAYS))
            .unwrap_or(NaiveDate::MAX);
        let candidates = DeadlineRepo::list_candidates(&self.pool, today, window_end).await?;
        if candidates.is_empty() {
            tracing::info!("No deadlines in the look-ahead window");
            return Ok(summary);
        }

        // Filtering: resolve rules once per distinct project, then apply
        // each project's days_before cutoff.
        let project_ids = distinct(candidates.iter().map(|c| c.project_id));
        let rules =
            RuleSet::load(&self.pool, &project_ids, self.config.default_days_before).await?;
        let candidates: Vec<DeadlineCandidate> = candidates
            .into_iter()
            .filter(|c| within_window(c.due_date, today, rules.resolve(c.project_id).days_before))
            .collect();
        if candidates.is_empty() {
            tracing::info!("No deadlines inside any project's reminder window");
            return Ok(summary);
        }
        summary.deadlines_checked = candidates.len() as u32;

        // Batched reads: recipient profiles and today's ledger entries.
        // The dedup set is complete before any dispatch begins, so
        // processing order cannot affect outcomes within the run.
        let deadline_ids: Vec<DbId> = candidates.iter().map(|c| c.id).collect();
        let assignee_ids = distinct(candidates.iter().map(|c| c.assignee_id));

        let profiles: HashMap<DbId, Profile> =
            ProfileRepo::list_by_ids(&self.pool, &assignee_ids)
                .await?
                .into_iter()
                .map(|p| (p.id, p))
                .collect();

        let mut sent_today: HashSet<SentPair> =
            NotificationLogRepo::list_sent_on_day(&self.pool, &deadline_ids, today)
                .await?
                .into_iter()
                .collect();

        // Dispatching: sequential pass, one candidate at a time.
        for candidate in &candidates {
            let rule = rules.resolve(candidate.project_id);
            let Some(profile) = profiles.get(&candidate.assignee_id) else {
                tracing::debug!(
                    deadline_id = candidate.id,
                    assignee_id = candidate.assignee_id,
                    "Assignee has no profile row, skipping"
                );
                continue;
            };

            let reminder = Reminder {
                project_name: &candidate.project_name,
                title: &candidate.title,
                due_date: candidate.due_date,
                description: candidate.description.as_deref(),
            };
            let text = reminder.text();

            if rule.notify_line {
                self.attempt_line(candidate, profile, &text, &mut sent_today, &mut summary)
                    .await?;
            }
            if rule.notify_email {
                self.attempt_email(candidate, profile, &reminder, &mut sent_today, &mut summary)
                    .await?;
            }
        }

        tracing::info!(
            sent = summary.sent,
            sent_line = summary.sent_line,
            sent_email = summary.sent_email,
            deadlines_checked = summary.deadlines_checked,
            email_errors = summary.email_errors.len(),
            "Dispatch run complete"
        );
        Ok(summary)
    }

    /// One LINE attempt for one candidate. Provider failures are logged
    /// and dropped; the next scheduled run retries naturally.
    async fn attempt_line(
        &self,
        candidate: &DeadlineCandidate,
        profile: &Profile,
        text: &str,
        sent_today: &mut HashSet<SentPair>,
        summary: &mut RunSummary,
    ) -> Result<(), DispatchError> {
        let pair = SentPair {
            deadline_id: candidate.id,
            channel: Channel::Line,
        };
        if sent_today.contains(&pair) {
            return Ok(());
        }
        // Silent skip when the recipient is unreachable over LINE.
        let Some(transport) = LineTransport::select(self.push_configured(), profile) else {
            return Ok(());
        };

        match self.line.send(&transport, text).await {
            Ok(()) => {
                let label = transport.recipient_label(profile);
                let inserted =
                    NotificationLogRepo::insert(&self.pool, candidate.id, &label, Channel::Line)
                        .await?;
                sent_today.insert(pair);
                if inserted {
                    summary.sent += 1;
                    summary.sent_line += 1;
                }
            }
            Err(e) => {
                tracing::warn!(
                    deadline_id = candidate.id,
                    error = %e,
                    "LINE delivery failed"
                );
            }
        }
        Ok(())
    }

    /// One email attempt for one candidate. Provider failures land in
    /// the summary's error list and never abort the run.
    async fn attempt_email(
        &self,
        candidate: &DeadlineCandidate,
        profile: &Profile,
        reminder: &Reminder<'_>,
        sent_today: &mut HashSet<SentPair>,
        summary: &mut RunSummary,
    ) -> Result<(), DispatchError> {
        if !self.email_configured() {
            return Ok(());
        }
        let Some(to) = profile.email.as_deref().filter(|v| !v.is_empty()) else {
            return Ok(());
        };
        let pair = SentPair {
            deadline_id: candidate.id,
            channel: Channel::Email,
        };
        if sent_today.contains(&pair) {
            return Ok(());
        }

        match self
            .email
            .send(to, &reminder.subject(), &reminder.html())
            .await
        {
            Ok(()) => {
                let inserted =
                    NotificationLogRepo::insert(&self.pool, candidate.id, to, Channel::Email)
                        .await?;
                sent_today.insert(pair);
                if inserted {
                    summary.sent += 1;
                    summary.sent_email += 1;
                }
            }
            Err(EmailError::Provider { status, detail }) => {
                tracing::warn!(
                    deadline_id = candidate.id,
                    to,
                    status,
                    "Email delivery rejected by provider"
                );
                summary.email_errors.push(EmailFailure {
                    to: to.to_string(),
                    status,
                    detail,
                });
            }
            Err(EmailError::Request(e)) => {
                tracing::warn!(deadline_id = candidate.id, to, error = %e, "Email request failed");
                summary.email_errors.push(EmailFailure {
                    to: to.to_string(),
                    status: 0,
                    detail: truncate_detail(&e.to_string()),
                });
            }
        }
        Ok(())
    }
}

/// Collect distinct ids preserving first-seen order.
fn distinct(ids: impl Iterator<Item = DbId>) -> Vec<DbId> {
    let mut seen = HashSet::new();
    ids.filter(|id| seen.insert(*id)).collect()
}
