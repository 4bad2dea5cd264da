//! 提示词组装
//!
//! 上下文引擎使用共享的组装器：结构保持规则 → 风格指令 → 术语指令，
//! 各块之间以空行分隔。刚性引擎使用独立的组装器，自带全部规则，
//! 不依赖共享组装器，便于将来替换为真正的非生成式引擎。

use crate::translation::config::constants;
use crate::translation::glossary::{merged_terms, GlossaryTerm};
use crate::translation::types::{LegalDomain, TranslationConfiguration, TranslationStyle, UiLanguage};

/// 采样参数
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplingParams {
    pub temperature: f32,
    pub max_output_tokens: Option<u32>,
}

/// 组装完成的提示词
#[derive(Debug, Clone, PartialEq)]
pub struct ComposedPrompt {
    pub system_instructions: String,
    pub user_payload: String,
    pub sampling: SamplingParams,
}

/// 指令组装能力
pub trait InstructionComposer: Send + Sync {
    fn compose(&self, text: &str, config: &TranslationConfiguration) -> ComposedPrompt;
}

const STRUCTURAL_RULES: &str = "\
# System
You are a translator specialised in structured documents.
Your absolute priority is to preserve the STRUCTURAL INTEGRITY of the original document.

# Strict layout rules (checklist)
1. HEADINGS: keep the same count, order and hierarchy of heading tags (<H1>, <H2>, ...).
2. TABLES: keep table-cell tags (<TAB[rXcY]>) exactly. Do not add or remove cells.
3. FOOTNOTES: keep <FOOTNOTE id=\"X\"> tags with the exact same id.
4. CROSS-REFERENCES: keep <XREF target=\"X\"> unchanged.

Never translate tag attributes (e.g. id=\"1\", target=\"§3\").
Translate only the human-readable text content.";

const LEGAL_DIRECTIVE: &str = "\
# Mode: Legal
- Use precise legal terminology in a technical, impersonal register.
- Preserve legal citations and statutory references rigorously.
- Keep the solemn tone and the sentence structure typical of legal instruments.
- Render terms such as \"Agreement\" as \"Contract\" or \"Accord\" according to the legal usage of the target jurisdiction.";

const FORMAL_DIRECTIVE: &str = "\
# Mode: Corporate formal
- Use polished language with long, well-structured sentences.
- Avoid slang, contractions and colloquialisms.
- Focus on clarity, professionalism and corporate etiquette.";

const ACADEMIC_DIRECTIVE: &str = "\
# Mode: Academic
- Use a scientific register with conceptual rigour and objectivity.
- Preserve citations and bibliographic references exactly.
- Prefer learned vocabulary and passive constructions where appropriate.";

const COLLOQUIAL_DIRECTIVE: &str = "\
# Mode: Colloquial
- Use short, direct and simple sentences.
- Choose vocabulary accessible to the general public.
- Allow contractions and natural idiomatic expressions.";

const MARKETING_DIRECTIVE: &str = "\
# Mode: Marketing
- Culturally adapt the message to the target audience (transcreation).
- Preserve the emotional and persuasive impact.
- The style must be engaging, creative and fluent, favouring effect over literalness.";

/// 结构保持规则（与引擎无关）
pub fn structural_rules() -> &'static str {
    STRUCTURAL_RULES
}

/// 风格指令
pub fn style_directive(style: TranslationStyle) -> &'static str {
    match style {
        TranslationStyle::Legal => LEGAL_DIRECTIVE,
        TranslationStyle::Formal => FORMAL_DIRECTIVE,
        TranslationStyle::Academic => ACADEMIC_DIRECTIVE,
        TranslationStyle::Colloquial => COLLOQUIAL_DIRECTIVE,
        TranslationStyle::Marketing => MARKETING_DIRECTIVE,
    }
}

fn glossary_lines(terms: &[GlossaryTerm]) -> String {
    terms
        .iter()
        .map(|term| format!("- {}", term.directive()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// 术语指令，合并后没有任何术语时返回 `None`
pub fn glossary_directive(domain: LegalDomain, custom_terms: &[GlossaryTerm]) -> Option<String> {
    let terms = merged_terms(domain, custom_terms);
    if terms.is_empty() {
        return None;
    }

    let mut block = format!(
        "# Glossary and terminology (mandatory)\n\
         The following mappings are MANDATORY and override any default vocabulary. \
         Use exactly these target terms for the listed source terms, with no variations, \
         to stay consistent with the translation memory. \
         If a source term is listed more than once, the last entry wins.\n\n{}",
        glossary_lines(&terms)
    );

    if domain != LegalDomain::General {
        block.push_str(&format!(
            "\n\nFor terms not listed, use the standard vocabulary of the {} domain.",
            domain.label(UiLanguage::En)
        ));
    }

    Some(block)
}

/// 上下文引擎的采样温度
pub fn contextual_temperature(style: TranslationStyle) -> f32 {
    if style.is_creative() {
        constants::CREATIVE_TEMPERATURE
    } else {
        constants::PRECISE_TEMPERATURE
    }
}

/// 用户内容：配置变量按固定顺序排列，最后是原文
pub fn user_payload(text: &str, config: &TranslationConfiguration) -> String {
    format!(
        "# Configuration\n\
         - source_lang: {}\n\
         - target_lang: {}\n\
         - jurisdiction: {}\n\
         - style: {}\n\
         - format_numeric: {}\n\
         - date_style: {}\n\
         - domain: {}\n\n\
         # Input\n{}",
        config.source_lang,
        config.target_lang,
        config.jurisdiction,
        config.style,
        config.format_numeric,
        config.date_style,
        config.legal_domain,
        text
    )
}

/// 上下文引擎共享的组装器
#[derive(Debug, Clone, Copy, Default)]
pub struct ContextualComposer;

impl InstructionComposer for ContextualComposer {
    fn compose(&self, text: &str, config: &TranslationConfiguration) -> ComposedPrompt {
        let mut blocks = vec![
            structural_rules().to_string(),
            style_directive(config.style).to_string(),
        ];
        if let Some(glossary) = glossary_directive(config.legal_domain, config.custom_terms.as_slice()) {
            blocks.push(glossary);
        }

        ComposedPrompt {
            system_instructions: blocks.join("\n\n"),
            user_payload: user_payload(text, config),
            sampling: SamplingParams {
                temperature: contextual_temperature(config.style),
                max_output_tokens: None,
            },
        }
    }
}

/// 使用共享组装器组装提示词
pub fn compose(text: &str, config: &TranslationConfiguration) -> ComposedPrompt {
    ContextualComposer.compose(text, config)
}

/// 刚性引擎的独立组装器
#[derive(Debug, Clone, Copy)]
pub struct RigidComposer {
    pub max_output_tokens: u32,
}

impl Default for RigidComposer {
    fn default() -> Self {
        Self {
            max_output_tokens: constants::DEFAULT_RIGID_MAX_OUTPUT_TOKENS,
        }
    }
}

impl InstructionComposer for RigidComposer {
    fn compose(&self, text: &str, config: &TranslationConfiguration) -> ComposedPrompt {
        let terms = merged_terms(config.legal_domain, config.custom_terms.as_slice());
        let glossary = if terms.is_empty() {
            "(none)".to_string()
        } else {
            terms
                .iter()
                .map(GlossaryTerm::directive)
                .collect::<Vec<_>>()
                .join("\n")
        };

        let system_instructions = format!(
            "*** ENGINE: MarianMT (rigid neural machine translation) ***\n\
             Target behavior: fixed-vocabulary, literal NMT output.\n\n\
             CRITICAL NMT RULES:\n\
             1. STRICT GLOSSARY ENFORCEMENT: you MUST use the glossary terms below. No synonyms. \
             If a source term is listed more than once, the last entry wins.\n\
             2. PRESERVE TAGS EXACTLY: every markup tag (<H1>, <TAB[rXcY]>, <FOOTNOTE id=\"X\">, \
             <XREF target=\"X\">) must appear in the output exactly as in the input, \
             with the same count and order. Never translate tag attributes.\n\
             3. LITERAL STYLE: do not be creative or natural at the cost of accuracy. \
             Be dry and precise, like standard NMT output for legal texts.\n\n\
             GLOSSARY:\n{}",
            glossary
        );

        let user_payload = format!(
            "TASK: Translate strictly from {} to {}.\n\nINPUT TEXT:\n{}",
            config.source_lang, config.target_lang, text
        );

        ComposedPrompt {
            system_instructions,
            user_payload,
            sampling: SamplingParams {
                temperature: constants::RIGID_TEMPERATURE,
                max_output_tokens: Some(self.max_output_tokens),
            },
        }
    }
}
