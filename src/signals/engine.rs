//! Portfolio management decision stage.

use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;
use tracing::{debug, info, warn};

use super::lookup::SignalSet;
use super::prompt::build_messages;
use super::validation::{self, DecisionPolicy, RiskLimits};
use crate::config::ManagerConfig;
use crate::error::{PortfolioError, Result};
use crate::logging::{ReasoningSink, TracingReasoningSink};
use crate::metrics::Metrics;
use crate::models::{AgentMessage, AgentState, Decision, PortfolioSnapshot};
use crate::services::{CompletionError, CompletionService, OpenRouterClient, UnavailableCompletionService};

/// Name of the message this stage appends to the log.
pub const DECISION_MESSAGE_NAME: &str = "portfolio_management";
/// Label shown alongside the decision when reasoning display is on.
pub const REASONING_LABEL: &str = "Portfolio Management Agent";

/// Where a decision's content came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DecisionSource {
    Live,
    Fallback,
}

impl DecisionSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            DecisionSource::Live => "live",
            DecisionSource::Fallback => "fallback",
        }
    }
}

/// Decision content plus its provenance.
#[derive(Debug, Clone, PartialEq)]
pub struct DecisionOutcome {
    /// JSON-encoded decision text, as forwarded to the message log.
    pub content: String,
    pub source: DecisionSource,
}

impl DecisionOutcome {
    fn fallback() -> Self {
        Self {
            content: Decision::fallback_content(),
            source: DecisionSource::Fallback,
        }
    }

    /// Parse the content. Live pass-through content may not be valid JSON.
    pub fn parsed(&self) -> std::result::Result<Decision, serde_json::Error> {
        validation::parse_decision(&self.content)
    }

    pub fn into_message(self) -> AgentMessage {
        AgentMessage::new(DECISION_MESSAGE_NAME, self.content)
    }
}

/// Makes the final trading decision from the team's signals.
///
/// Exactly one completion call per decision, no retries. Any completion failure
/// yields the fixed fallback decision instead of an error.
pub struct PortfolioManager {
    completion: Arc<dyn CompletionService>,
    reasoning: Arc<dyn ReasoningSink>,
    policy: DecisionPolicy,
    metrics: Option<Arc<Metrics>>,
}

impl PortfolioManager {
    pub fn new(completion: Arc<dyn CompletionService>) -> Self {
        Self {
            completion,
            reasoning: Arc::new(TracingReasoningSink),
            policy: DecisionPolicy::default(),
            metrics: None,
        }
    }

    /// Wire up the OpenRouter client, or the unavailable stand-in when no key is configured.
    pub fn from_config(config: &ManagerConfig) -> std::result::Result<Self, CompletionError> {
        let completion: Arc<dyn CompletionService> = match OpenRouterClient::from_config(config)? {
            Some(client) => {
                info!(model = client.model(), base_url = %config.base_url, "completion service configured");
                Arc::new(client)
            }
            None => {
                warn!("OPENROUTER_API_KEY not set, every decision will use the fallback");
                Arc::new(UnavailableCompletionService)
            }
        };
        Ok(Self::new(completion).with_policy(config.policy))
    }

    pub fn with_policy(mut self, policy: DecisionPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_reasoning_sink(mut self, sink: Arc<dyn ReasoningSink>) -> Self {
        self.reasoning = sink;
        self
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn policy(&self) -> DecisionPolicy {
        self.policy
    }

    /// Run the stage over orchestrator state: select the signals, decide, and
    /// return the state with the decision message appended.
    pub async fn run(&self, state: AgentState) -> Result<AgentState> {
        let (state, _) = self.run_with_outcome(state).await?;
        Ok(state)
    }

    /// Like [`PortfolioManager::run`], also reporting where the decision came from.
    pub async fn run_with_outcome(&self, state: AgentState) -> Result<(AgentState, DecisionSource)> {
        let cash = state.data.portfolio.cash;
        if !cash.is_finite() || cash < 0.0 {
            return Err(PortfolioError::InvalidState(format!(
                "portfolio cash must be a non-negative number, got {cash}"
            )));
        }

        let signals = match SignalSet::from_messages(&state.messages) {
            Ok(signals) => signals,
            Err(e) => {
                if let Some(metrics) = &self.metrics {
                    metrics.missing_signal_total.inc();
                }
                return Err(e);
            }
        };

        let outcome = self
            .decide(&signals, &state.data.portfolio, state.metadata.show_reasoning)
            .await;
        let source = outcome.source;

        let AgentState {
            mut messages,
            data,
            metadata,
        } = state;
        messages.push(outcome.into_message());

        Ok((
            AgentState {
                messages,
                data,
                metadata,
            },
            source,
        ))
    }

    /// Request one decision for the given signals and portfolio.
    pub async fn decide(
        &self,
        signals: &SignalSet,
        portfolio: &PortfolioSnapshot,
        show_reasoning: bool,
    ) -> DecisionOutcome {
        let messages = build_messages(signals, portfolio);

        let started = Instant::now();
        let result = self.completion.complete(&messages).await;
        if let Some(metrics) = &self.metrics {
            metrics
                .completion_duration_seconds
                .observe(started.elapsed().as_secs_f64());
        }

        let outcome = match result {
            Ok(content) => self.apply_policy(content, signals, portfolio),
            Err(e) => {
                warn!(error = %e, "completion failed, using fallback decision");
                DecisionOutcome::fallback()
            }
        };

        debug!(source = outcome.source.as_str(), "portfolio decision ready");
        if let Some(metrics) = &self.metrics {
            metrics.record_decision(outcome.source);
        }
        if show_reasoning {
            self.reasoning.show(REASONING_LABEL, &outcome.content);
        }

        outcome
    }

    fn apply_policy(&self, content: String, signals: &SignalSet, portfolio: &PortfolioSnapshot) -> DecisionOutcome {
        let limits = RiskLimits::from_content(&signals.risk);

        match self.policy {
            DecisionPolicy::PassThrough => {
                match validation::parse_decision(&content) {
                    Ok(decision) => {
                        for violation in validation::check(&decision, portfolio, &limits) {
                            warn!(%violation, "live decision breaks a trading rule, forwarding unchanged");
                        }
                    }
                    Err(e) => warn!(error = %e, "live decision is not valid decision JSON, forwarding unchanged"),
                }
                DecisionOutcome {
                    content,
                    source: DecisionSource::Live,
                }
            }
            DecisionPolicy::Enforce => {
                let decision = match validation::parse_decision(&content) {
                    Ok(decision) => decision,
                    Err(e) => {
                        warn!(error = %e, "live decision is unparsable, using fallback decision");
                        return DecisionOutcome::fallback();
                    }
                };
                let violations = validation::check(&decision, portfolio, &limits);
                if violations.is_empty() {
                    return DecisionOutcome {
                        content: validation::strip_code_fence(&content).to_string(),
                        source: DecisionSource::Live,
                    };
                }
                for violation in &violations {
                    warn!(%violation, "clamping live decision");
                }
                let enforced = validation::enforce(decision, portfolio, &limits);
                match enforced.to_content() {
                    Ok(content) => DecisionOutcome {
                        content,
                        source: DecisionSource::Live,
                    },
                    Err(e) => {
                        warn!(error = %e, "clamped decision failed to serialize, using fallback decision");
                        DecisionOutcome::fallback()
                    }
                }
            }
        }
    }
}
