//! Instruction and data messages sent to the completion service.

use serde::{Deserialize, Serialize};

use super::lookup::{SignalSet, SignalSource};
use super::weights::SignalWeights;
use crate::models::PortfolioSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}

fn weight(source: SignalSource) -> u32 {
    SignalWeights::percent(source).unwrap_or_default()
}

/// Role, weights, hard constraints, procedure and output shape.
pub fn system_instruction() -> String {
    format!(
        "你是一名投资组合经理，负责根据团队的分析做出最终交易决策。
你的工作是根据团队的分析做出交易决策，同时严格遵守风险管理约束。

风险管理约束：
- 你绝对不能超过风险经理指定的最大持仓规模
- 你必须遵循风险管理建议的交易操作（buy/sell/hold）
- 这些是硬性约束，不能被其他信号覆盖

在权衡不同信号的方向和时机时：
1. 估值分析（{valuation}%权重）
   - 公允价值评估的主要驱动因素
   - 确定价格是否提供了良好的入场/出场点

2. 基本面分析（{fundamentals}%权重）
   - 业务质量和增长评估
   - 确定长期潜力的信心

3. 技术分析（{technical}%权重）
   - 次要确认
   - 帮助确定入场/出场时机

4. 情绪分析（{sentiment}%权重）
   - 最后的考虑因素
   - 可以在风险限制内影响仓位大小

决策过程应为：
1. 首先检查风险管理约束
2. 然后评估估值信号
3. 接着评估基本面信号
4. 使用技术分析确定时机
5. 考虑情绪进行最终调整

在你的输出中提供以下内容：
- \"action\": \"buy\" | \"sell\" | \"hold\"
- \"quantity\": <非负整数，hold时为0>
- \"confidence\": <0到1之间的浮点数>
- \"agent_signals\": <包含代理名称（agent_name）、信号（signal: bullish | bearish | neutral）及其信心（confidence）的代理信号列表>
- \"reasoning\": <决策的简明解释，包括你如何权衡信号>

交易规则：
- 绝不超出风险管理仓位限制
- 只有在有可用现金时才能买入
- 只有在有股票可卖时才能卖出
- 卖出数量必须 ≤ 当前持仓
- 买入数量必须 ≤ 风险管理中的最大持仓规模",
        valuation = weight(SignalSource::Valuation),
        fundamentals = weight(SignalSource::Fundamentals),
        technical = weight(SignalSource::Technical),
        sentiment = weight(SignalSource::Sentiment),
    )
}

/// The five signal payloads and the portfolio snapshot.
pub fn data_message(signals: &SignalSet, portfolio: &PortfolioSnapshot) -> String {
    format!(
        "根据以下团队的分析，做出你的交易决策。

技术分析交易信号: {technical}
基本面分析交易信号: {fundamentals}
情绪分析交易信号: {sentiment}
估值分析交易信号: {valuation}
风险管理交易信号: {risk}

当前投资组合如下:
投资组合:
现金: {cash:.2}
当前持仓: {stock} 股

你的输出中仅包含action、quantity、reasoning、confidence和agent_signals，并以JSON格式输出。不要包含任何JSON标记。

记住，action必须是buy、sell或hold。
只有在有可用现金时才能买入。
只有在有股票可卖时才能卖出。",
        technical = signals.technical,
        fundamentals = signals.fundamentals,
        sentiment = signals.sentiment,
        valuation = signals.valuation,
        risk = signals.risk,
        cash = portfolio.cash,
        stock = portfolio.stock,
    )
}

/// `[system, user]` pair for one decision request.
pub fn build_messages(signals: &SignalSet, portfolio: &PortfolioSnapshot) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(system_instruction()),
        ChatMessage::user(data_message(signals, portfolio)),
    ]
}
