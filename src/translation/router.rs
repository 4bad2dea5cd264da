//! 引擎路由
//!
//! 法律风格要求逐字、术语锁定的输出，交给刚性引擎；
//! 其余风格交给上下文引擎。

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::translation::types::{TranslationConfiguration, TranslationStyle};

/// 翻译引擎类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EngineKind {
    /// 固定词汇、逐字翻译的 NMT 风格引擎
    Rigid,
    /// 通用的上下文生成式引擎
    Contextual,
}

impl EngineKind {
    /// 界面展示名称
    pub fn label(&self) -> &'static str {
        match self {
            EngineKind::Rigid => "MarianMT (Rigid/Strict)",
            EngineKind::Contextual => "Gemini Neural (Contextual)",
        }
    }
}

impl fmt::Display for EngineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 仅由风格决定的引擎
pub fn engine_for_style(style: TranslationStyle) -> EngineKind {
    match style {
        TranslationStyle::Legal => EngineKind::Rigid,
        TranslationStyle::Formal
        | TranslationStyle::Academic
        | TranslationStyle::Colloquial
        | TranslationStyle::Marketing => EngineKind::Contextual,
    }
}

/// 为配置选择翻译引擎
pub fn select_engine(config: &TranslationConfiguration) -> EngineKind {
    engine_for_style(config.style)
}
