//! Human-readable investment report for a finalized decision.
//!
//! Every field is optional. Absent signals, absent nested keys and non-numeric
//! values in numeric slots all render as [`NO_DATA`]; formatting never fails.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::lookup::{find_signal, SignalSource};
use super::weights::SignalWeights;
use crate::models::{AgentSignal, Decision, TradeAction};

pub const NO_DATA: &str = "无数据";
pub const NO_ANALYSIS: &str = "无详细分析";

/// A decision together with its rendered report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormattedDecision {
    pub action: TradeAction,
    pub quantity: u64,
    pub confidence: f64,
    pub agent_signals: Vec<AgentSignal>,
    pub report: String,
}

impl FormattedDecision {
    pub fn from_decision(decision: &Decision) -> Self {
        format_decision(
            decision.action,
            decision.quantity,
            decision.confidence,
            &decision.agent_signals,
            &decision.reasoning,
        )
    }
}

fn number(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) => format!("{v:.decimals$}"),
        None => NO_DATA.to_string(),
    }
}

fn percent(value: Option<f64>, decimals: usize) -> String {
    match value {
        Some(v) => format!("{:.decimals$}%", v * 100.0),
        None => NO_DATA.to_string(),
    }
}

fn out_of_ten(value: Option<&Value>) -> String {
    match value {
        Some(v) => format!("{}/10", text(Some(v), NO_DATA)),
        None => NO_DATA.to_string(),
    }
}

/// Strings render bare; other JSON values render as JSON.
fn text(value: Option<&Value>, missing: &str) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => missing.to_string(),
        Some(other) => other.to_string(),
    }
}

/// Read-only view over one optional signal.
struct SignalView<'a>(Option<&'a AgentSignal>);

impl<'a> SignalView<'a> {
    fn find(signals: &'a [AgentSignal], source: SignalSource) -> Self {
        Self(find_signal(signals, source.signal_name()))
    }

    fn label(&self) -> &'static str {
        self.0.map(|s| s.signal.label()).unwrap_or(NO_DATA)
    }

    fn confidence(&self) -> String {
        percent(self.0.map(|s| s.confidence), 0)
    }

    fn value(&self, path: &[&str]) -> Option<&'a Value> {
        self.0.and_then(|s| s.lookup(path))
    }

    fn numeric(&self, path: &[&str]) -> Option<f64> {
        self.value(path).and_then(Value::as_f64)
    }

    fn details(&self, key: &str) -> String {
        text(self.value(&["reasoning", key, "details"]), NO_DATA)
    }

    fn metric(&self, strategy: &str, metric: &str) -> Option<f64> {
        self.numeric(&["strategy_signals", strategy, "metrics", metric])
    }
}

fn weight(source: SignalSource) -> u32 {
    SignalWeights::percent(source).unwrap_or_default()
}

/// Render the report. Pure: identical inputs give identical output.
pub fn format_decision(
    action: TradeAction,
    quantity: u64,
    confidence: f64,
    agent_signals: &[AgentSignal],
    reasoning: &str,
) -> FormattedDecision {
    let fundamental = SignalView::find(agent_signals, SignalSource::Fundamentals);
    let valuation = SignalView::find(agent_signals, SignalSource::Valuation);
    let technical = SignalView::find(agent_signals, SignalSource::Technical);
    let sentiment = SignalView::find(agent_signals, SignalSource::Sentiment);
    let risk = SignalView::find(agent_signals, SignalSource::RiskManagement);

    let report = format!(
        "
====================================
          投资分析报告
====================================

一、策略分析

1. 基本面分析 (权重{w_fundamental}%):
   信号: {f_label}
   置信度: {f_confidence}
   要点:
   - 盈利能力: {f_profitability}
   - 增长情况: {f_growth}
   - 财务健康: {f_health}
   - 估值水平: {f_ratios}

2. 估值分析 (权重{w_valuation}%):
   信号: {v_label}
   置信度: {v_confidence}
   要点:
   - DCF估值: {v_dcf}
   - 所有者收益法: {v_owner}

3. 技术分析 (权重{w_technical}%):
   信号: {t_label}
   置信度: {t_confidence}
   要点:
   - 趋势跟踪: ADX={t_adx}
   - 均值回归: RSI(14)={t_rsi}
   - 动量指标:
     * 1月动量={t_m1}
     * 3月动量={t_m3}
     * 6月动量={t_m6}
   - 波动性: {t_vol}

4. 情绪分析 (权重{w_sentiment}%):
   信号: {s_label}
   置信度: {s_confidence}
   分析: {s_reasoning}

二、风险评估
风险评分: {r_score}
主要指标:
- 波动率: {r_vol}
- 最大回撤: {r_drawdown}
- VaR(95%): {r_var}
- 市场风险: {r_market}

三、投资建议
操作建议: {action_label}
交易数量: {quantity}股
决策置信度: {confidence_pct}

四、决策依据
{reasoning}

====================================",
        w_fundamental = weight(SignalSource::Fundamentals),
        f_label = fundamental.label(),
        f_confidence = fundamental.confidence(),
        f_profitability = fundamental.details("profitability_signal"),
        f_growth = fundamental.details("growth_signal"),
        f_health = fundamental.details("financial_health_signal"),
        f_ratios = fundamental.details("price_ratios_signal"),
        w_valuation = weight(SignalSource::Valuation),
        v_label = valuation.label(),
        v_confidence = valuation.confidence(),
        v_dcf = valuation.details("dcf_analysis"),
        v_owner = valuation.details("owner_earnings_analysis"),
        w_technical = weight(SignalSource::Technical),
        t_label = technical.label(),
        t_confidence = technical.confidence(),
        t_adx = number(technical.metric("trend_following", "adx"), 2),
        t_rsi = number(technical.metric("mean_reversion", "rsi_14"), 2),
        t_m1 = percent(technical.metric("momentum", "momentum_1m"), 2),
        t_m3 = percent(technical.metric("momentum", "momentum_3m"), 2),
        t_m6 = percent(technical.metric("momentum", "momentum_6m"), 2),
        t_vol = percent(technical.metric("volatility", "historical_volatility"), 2),
        w_sentiment = weight(SignalSource::Sentiment),
        s_label = sentiment.label(),
        s_confidence = sentiment.confidence(),
        s_reasoning = text(sentiment.value(&["reasoning"]), NO_ANALYSIS),
        r_score = out_of_ten(risk.value(&["risk_score"])),
        r_vol = percent(risk.numeric(&["risk_metrics", "volatility"]), 1),
        r_drawdown = percent(risk.numeric(&["risk_metrics", "max_drawdown"]), 1),
        r_var = percent(risk.numeric(&["risk_metrics", "value_at_risk_95"]), 1),
        r_market = out_of_ten(risk.value(&["risk_metrics", "market_risk_score"])),
        action_label = action.label(),
        quantity = quantity,
        confidence_pct = percent(Some(confidence), 0),
        reasoning = reasoning,
    );

    FormattedDecision {
        action,
        quantity,
        confidence,
        agent_signals: agent_signals.to_vec(),
        report,
    }
}
