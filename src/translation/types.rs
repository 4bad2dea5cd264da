//! 翻译工作台的数据模型
//!
//! 包含翻译配置、风格/领域等固定枚举以及支持的语言列表。

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::translation::error::{helpers::validation_error, TranslationResult};
use crate::translation::glossary::CustomGlossary;
use crate::translation::router::{select_engine, EngineKind};

/// 支持的语言
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Language {
    pub code: &'static str,
    pub name: &'static str,
}

/// 支持的语言列表
pub const SUPPORTED_LANGUAGES: &[Language] = &[
    Language { code: "pt-BR", name: "Portuguese (BR)" },
    Language { code: "en-US", name: "English (US)" },
    Language { code: "es-ES", name: "Spanish (ES)" },
    Language { code: "fr-FR", name: "French (FR)" },
    Language { code: "de-DE", name: "German (DE)" },
    Language { code: "it-IT", name: "Italian (IT)" },
    Language { code: "zh-CN", name: "Chinese (Simplified)" },
    Language { code: "ja-JP", name: "Japanese" },
    Language { code: "ru-RU", name: "Russian" },
    Language { code: "ar-SA", name: "Arabic" },
    Language { code: "ko-KR", name: "Korean" },
    Language { code: "nl-NL", name: "Dutch" },
    Language { code: "tr-TR", name: "Turkish" },
    Language { code: "pl-PL", name: "Polish" },
    Language { code: "sv-SE", name: "Swedish" },
    Language { code: "hi-IN", name: "Hindi" },
];

/// 检查语言标签是否受支持
pub fn is_supported_language(code: &str) -> bool {
    SUPPORTED_LANGUAGES.iter().any(|lang| lang.code == code)
}

/// 翻译风格
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TranslationStyle {
    Legal,
    Formal,
    Academic,
    Colloquial,
    Marketing,
}

impl TranslationStyle {
    pub const ALL: [TranslationStyle; 5] = [
        TranslationStyle::Legal,
        TranslationStyle::Formal,
        TranslationStyle::Academic,
        TranslationStyle::Colloquial,
        TranslationStyle::Marketing,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TranslationStyle::Legal => "Legal",
            TranslationStyle::Formal => "Formal",
            TranslationStyle::Academic => "Academic",
            TranslationStyle::Colloquial => "Colloquial",
            TranslationStyle::Marketing => "Marketing",
        }
    }

    /// 创意型风格（允许更高的采样温度）
    pub fn is_creative(&self) -> bool {
        matches!(self, TranslationStyle::Marketing | TranslationStyle::Colloquial)
    }
}

impl fmt::Display for TranslationStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TranslationStyle {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        TranslationStyle::ALL
            .iter()
            .copied()
            .find(|style| style.as_str().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| format!("未知的翻译风格: {}", value))
    }
}

/// 法律领域
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LegalDomain {
    General,
    Contracts,
    Criminal,
    Tax,
}

impl LegalDomain {
    pub const ALL: [LegalDomain; 4] = [
        LegalDomain::General,
        LegalDomain::Contracts,
        LegalDomain::Criminal,
        LegalDomain::Tax,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LegalDomain::General => "General",
            LegalDomain::Contracts => "Contracts",
            LegalDomain::Criminal => "Criminal",
            LegalDomain::Tax => "Tax",
        }
    }

    /// 界面展示用的领域名称
    pub fn label(&self, lang: UiLanguage) -> &'static str {
        match (lang, self) {
            (UiLanguage::En, LegalDomain::General) => "General/Civil",
            (UiLanguage::En, LegalDomain::Contracts) => "Contracts/Corporate",
            (UiLanguage::En, LegalDomain::Criminal) => "Criminal Law",
            (UiLanguage::En, LegalDomain::Tax) => "Tax/Fiscal",
            (UiLanguage::Pt, LegalDomain::General) => "Geral/Cível",
            (UiLanguage::Pt, LegalDomain::Contracts) => "Contratos/Corporativo",
            (UiLanguage::Pt, LegalDomain::Criminal) => "Direito Penal",
            (UiLanguage::Pt, LegalDomain::Tax) => "Tributário/Fiscal",
        }
    }
}

impl fmt::Display for LegalDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LegalDomain {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        LegalDomain::ALL
            .iter()
            .copied()
            .find(|domain| domain.as_str().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| format!("未知的法律领域: {}", value))
    }
}

/// 日期格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DateStyle {
    Jurisdiction,
    #[serde(rename = "ISO")]
    Iso,
    Custom,
}

impl fmt::Display for DateStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DateStyle::Jurisdiction => "jurisdiction",
            DateStyle::Iso => "ISO",
            DateStyle::Custom => "custom",
        })
    }
}

/// 上下文引擎可用的模型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AiModel {
    #[serde(rename = "gemini-3-pro-preview")]
    Gemini3Pro,
    #[serde(rename = "gemini-2.5-flash")]
    Gemini25Flash,
}

impl AiModel {
    pub fn as_str(&self) -> &'static str {
        match self {
            AiModel::Gemini3Pro => "gemini-3-pro-preview",
            AiModel::Gemini25Flash => "gemini-2.5-flash",
        }
    }
}

impl fmt::Display for AiModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 界面语言
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UiLanguage {
    Pt,
    #[default]
    En,
}

/// 单次请求的翻译配置
///
/// 当前引擎不作为字段存储，而是通过 [`TranslationConfiguration::active_engine`]
/// 按风格实时计算，因此不会出现引擎与风格不一致的情况。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TranslationConfiguration {
    pub source_lang: String,
    pub target_lang: String,
    pub jurisdiction: String,
    pub style: TranslationStyle,
    pub format_numeric: bool,
    pub date_style: DateStyle,
    pub model: AiModel,
    pub legal_domain: LegalDomain,
    pub custom_terms: CustomGlossary,
}

impl Default for TranslationConfiguration {
    fn default() -> Self {
        Self {
            source_lang: "pt-BR".to_string(),
            target_lang: "en-US".to_string(),
            jurisdiction: "US".to_string(),
            style: TranslationStyle::Legal,
            format_numeric: false,
            date_style: DateStyle::Jurisdiction,
            model: AiModel::Gemini3Pro,
            legal_domain: LegalDomain::General,
            custom_terms: CustomGlossary::default(),
        }
    }
}

impl TranslationConfiguration {
    /// 当前配置对应的翻译引擎
    pub fn active_engine(&self) -> EngineKind {
        select_engine(self)
    }

    /// 验证来自外部的配置
    pub fn validate(&self) -> TranslationResult<()> {
        if !is_supported_language(&self.source_lang) {
            return Err(validation_error(format!(
                "不支持的源语言: {}",
                self.source_lang
            )));
        }

        if !is_supported_language(&self.target_lang) {
            return Err(validation_error(format!(
                "不支持的目标语言: {}",
                self.target_lang
            )));
        }

        if self.jurisdiction.trim().is_empty() {
            return Err(validation_error("司法管辖区不能为空"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_configuration() {
        let config = TranslationConfiguration::default();

        assert_eq!(config.source_lang, "pt-BR");
        assert_eq!(config.target_lang, "en-US");
        assert_eq!(config.style, TranslationStyle::Legal);
        assert_eq!(config.legal_domain, LegalDomain::General);
        assert!(config.custom_terms.is_empty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_unknown_language() {
        let config = TranslationConfiguration {
            target_lang: "xx-XX".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = TranslationConfiguration {
            jurisdiction: "  ".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_camel_case_payload_ignores_active_engine() {
        let payload = r#"{
            "sourceLang": "en-US",
            "targetLang": "pt-BR",
            "style": "Marketing",
            "legalDomain": "Tax",
            "dateStyle": "ISO",
            "model": "gemini-2.5-flash",
            "activeEngine": "Rigid"
        }"#;

        let config: TranslationConfiguration = serde_json::from_str(payload).unwrap();
        assert_eq!(config.style, TranslationStyle::Marketing);
        assert_eq!(config.legal_domain, LegalDomain::Tax);
        assert_eq!(config.date_style, DateStyle::Iso);
        assert_eq!(config.model, AiModel::Gemini25Flash);
        assert_eq!(config.jurisdiction, "US");
        assert_eq!(config.active_engine(), EngineKind::Contextual);
    }

    #[test]
    fn test_enum_parsing_is_case_insensitive() {
        assert_eq!("legal".parse::<TranslationStyle>(), Ok(TranslationStyle::Legal));
        assert_eq!(" TAX ".parse::<LegalDomain>(), Ok(LegalDomain::Tax));
        assert!("poetry".parse::<TranslationStyle>().is_err());
    }

    #[test]
    fn test_domain_labels() {
        assert_eq!(LegalDomain::Criminal.label(UiLanguage::En), "Criminal Law");
        assert_eq!(LegalDomain::Tax.label(UiLanguage::Pt), "Tributário/Fiscal");
    }
}
