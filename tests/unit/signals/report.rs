//! Unit tests for the report formatter

use portfolio_manager::models::{AgentSignal, Decision, SignalDirection, TradeAction};
use portfolio_manager::signals::report::{format_decision, FormattedDecision, NO_ANALYSIS, NO_DATA};
use serde_json::json;

fn full_signals() -> Vec<AgentSignal> {
    vec![
        AgentSignal::new("fundamental_analysis", SignalDirection::Bullish, 0.8).with_reasoning(json!({
            "profitability_signal": {"details": "ROE 18%"},
            "growth_signal": {"details": "Revenue growth 12%"},
            "financial_health_signal": {"details": "Low leverage"},
            "price_ratios_signal": {"details": "P/E 14"}
        })),
        AgentSignal::new("valuation_analysis", SignalDirection::Bearish, 0.67).with_reasoning(json!({
            "dcf_analysis": {"details": "Intrinsic value below price"},
            "owner_earnings_analysis": {"details": "Gap -20%"}
        })),
        AgentSignal::new("technical_analysis", SignalDirection::Neutral, 0.5).with_detail(
            "strategy_signals",
            json!({
                "trend_following": {"metrics": {"adx": 23.456}},
                "mean_reversion": {"metrics": {"rsi_14": 61.2}},
                "momentum": {"metrics": {"momentum_1m": 0.0312, "momentum_3m": -0.05, "momentum_6m": 0.1}},
                "volatility": {"metrics": {"historical_volatility": 0.254}}
            }),
        ),
        AgentSignal::new("sentiment_analysis", SignalDirection::Bullish, 0.6)
            .with_reasoning(json!("News flow is positive")),
        AgentSignal::new("risk_management", SignalDirection::Hold, 1.0)
            .with_detail("risk_score", json!(4))
            .with_detail(
                "risk_metrics",
                json!({
                    "volatility": 0.213,
                    "max_drawdown": -0.125,
                    "value_at_risk_95": -0.031,
                    "market_risk_score": 6
                }),
            ),
    ]
}

#[test]
fn test_renders_every_section() {
    let formatted = format_decision(TradeAction::Buy, 100, 0.75, &full_signals(), "Weighted toward fundamentals");
    let report = &formatted.report;

    assert!(report.contains("1. 基本面分析 (权重30%):"));
    assert!(report.contains("   信号: 看多\n   置信度: 80%"));
    assert!(report.contains("- 盈利能力: ROE 18%"));
    assert!(report.contains("- 估值水平: P/E 14"));
    assert!(report.contains("2. 估值分析 (权重35%):"));
    assert!(report.contains("- DCF估值: Intrinsic value below price"));
    assert!(report.contains("- 所有者收益法: Gap -20%"));
    assert!(report.contains("   信号: 中性\n   置信度: 50%"));
    assert!(report.contains("趋势跟踪: ADX=23.46"));
    assert!(report.contains("RSI(14)=61.20"));
    assert!(report.contains("1月动量=3.12%"));
    assert!(report.contains("3月动量=-5.00%"));
    assert!(report.contains("6月动量=10.00%"));
    assert!(report.contains("- 波动性: 25.40%"));
    assert!(report.contains("分析: News flow is positive"));
    assert!(report.contains("风险评分: 4/10"));
    assert!(report.contains("- 波动率: 21.3%"));
    assert!(report.contains("- 最大回撤: -12.5%"));
    assert!(report.contains("- VaR(95%): -3.1%"));
    assert!(report.contains("- 市场风险: 6/10"));
    assert!(report.contains("操作建议: 买入"));
    assert!(report.contains("交易数量: 100股"));
    assert!(report.contains("决策置信度: 75%"));
    assert!(report.contains("四、决策依据\nWeighted toward fundamentals"));
}

#[test]
fn test_passes_decision_fields_through() {
    let signals = full_signals();
    let formatted = format_decision(TradeAction::Sell, 7, 0.4, &signals, "why");
    assert_eq!(formatted.action, TradeAction::Sell);
    assert_eq!(formatted.quantity, 7);
    assert_eq!(formatted.confidence, 0.4);
    assert_eq!(formatted.agent_signals, signals);
}

#[test]
fn test_is_pure() {
    let signals = full_signals();
    let first = format_decision(TradeAction::Hold, 0, 0.7, &signals, "same");
    let second = format_decision(TradeAction::Hold, 0, 0.7, &signals, "same");
    assert_eq!(first, second);
}

#[test]
fn test_missing_nested_fields_render_placeholder() {
    let mut signals = full_signals();
    // Technical signal without any strategy detail
    signals[2] = AgentSignal::new("technical_analysis", SignalDirection::Bullish, 0.9);
    // Fundamentals without a growth entry
    signals[0].reasoning = Some(json!({"profitability_signal": {"details": "ROE 18%"}}));

    let report = format_decision(TradeAction::Hold, 0, 0.5, &signals, "").report;
    assert!(report.contains(&format!("ADX={NO_DATA}")));
    assert!(report.contains(&format!("RSI(14)={NO_DATA}")));
    assert!(report.contains(&format!("6月动量={NO_DATA}")));
    assert!(report.contains(&format!("- 波动性: {NO_DATA}")));
    assert!(report.contains(&format!("- 增长情况: {NO_DATA}")));
    assert!(report.contains("- 盈利能力: ROE 18%"));
}

#[test]
fn test_non_numeric_metric_renders_placeholder() {
    let mut signals = full_signals();
    signals[4] = AgentSignal::new("risk_management", SignalDirection::Hold, 1.0).with_detail(
        "risk_metrics",
        json!({"volatility": "n/a", "max_drawdown": null, "market_risk_score": "high"}),
    );

    let report = format_decision(TradeAction::Hold, 0, 0.5, &signals, "").report;
    assert!(report.contains(&format!("- 波动率: {NO_DATA}")));
    assert!(report.contains(&format!("- 最大回撤: {NO_DATA}")));
    assert!(report.contains(&format!("- VaR(95%): {NO_DATA}")));
    assert!(report.contains(&format!("风险评分: {NO_DATA}")));
    // Scores are displayed, not formatted, so text values show as-is
    assert!(report.contains("- 市场风险: high/10"));
}

#[test]
fn test_missing_signals_render_placeholder() {
    let report = format_decision(TradeAction::Hold, 0, 0.7, &[], "nothing upstream").report;
    assert!(report.contains(&format!("   信号: {NO_DATA}\n   置信度: {NO_DATA}")));
    assert!(report.contains(&format!("分析: {NO_ANALYSIS}")));
    assert!(report.contains(&format!("风险评分: {NO_DATA}")));
    assert!(report.contains("操作建议: 持有"));
    assert!(report.contains("决策置信度: 70%"));
}

#[test]
fn test_structured_sentiment_reasoning_renders_as_json() {
    let mut signals = full_signals();
    signals[3].reasoning = Some(json!({"news_count": 12}));
    let report = format_decision(TradeAction::Hold, 0, 0.5, &signals, "").report;
    assert!(report.contains(r#"分析: {"news_count":12}"#));
}

#[test]
fn test_formats_fallback_decision() {
    let formatted = FormattedDecision::from_decision(&Decision::fallback());
    assert!(formatted.report.contains("   信号: 看空\n   置信度: 67%"));
    assert!(formatted.report.contains("操作建议: 持有"));
    assert!(formatted.report.contains("交易数量: 0股"));
}
