//! 术语表存储
//!
//! 系统术语按法律领域划分且只读；自定义术语由用户在会话内增删。
//! 每次请求时两者合并，系统术语在前，自定义术语在后。

use serde::{Deserialize, Serialize};

use crate::translation::types::LegalDomain;

/// 术语来源
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TermDomain {
    General,
    Contracts,
    Criminal,
    Tax,
    Custom,
}

impl From<LegalDomain> for TermDomain {
    fn from(domain: LegalDomain) -> Self {
        match domain {
            LegalDomain::General => TermDomain::General,
            LegalDomain::Contracts => TermDomain::Contracts,
            LegalDomain::Criminal => TermDomain::Criminal,
            LegalDomain::Tax => TermDomain::Tax,
        }
    }
}

/// 强制性的术语映射
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlossaryTerm {
    pub id: String,
    pub source: String,
    pub target: String,
    pub domain: TermDomain,
}

impl GlossaryTerm {
    /// 提示词中使用的 `source -> target` 形式
    pub fn directive(&self) -> String {
        format!("{} -> {}", self.source, self.target)
    }
}

// (id, source, target)
type SystemEntry = (&'static str, &'static str, &'static str);

const CONTRACTS_TERMS: &[SystemEntry] = &[
    ("c1", "Rescisão", "Termination"),
    ("c2", "Dolo", "Willful Misconduct"),
    ("c3", "Culpa", "Negligence"),
    ("c4", "Foro", "Venue"),
    ("c5", "Objeto", "Subject Matter"),
];

const CRIMINAL_TERMS: &[SystemEntry] = &[
    ("p1", "Réu", "Defendant"),
    ("p2", "Dolo", "Intent/Malice"),
    ("p3", "Sentença", "Judgment"),
    ("p4", "Habeas Corpus", "Habeas Corpus"),
    ("p5", "Denúncia", "Indictment/Complaint"),
];

const TAX_TERMS: &[SystemEntry] = &[
    ("t1", "Imposto de Renda", "Income Tax"),
    ("t2", "Receita Federal", "Internal Revenue Service (equivalent)"),
    ("t3", "Fato Gerador", "Taxable Event"),
    ("t4", "Aliquota", "Tax Rate"),
    ("t5", "Isenção", "Exemption"),
];

fn system_entries(domain: LegalDomain) -> &'static [SystemEntry] {
    match domain {
        LegalDomain::General => &[],
        LegalDomain::Contracts => CONTRACTS_TERMS,
        LegalDomain::Criminal => CRIMINAL_TERMS,
        LegalDomain::Tax => TAX_TERMS,
    }
}

/// 指定领域的系统术语
pub fn system_terms(domain: LegalDomain) -> Vec<GlossaryTerm> {
    system_entries(domain)
        .iter()
        .map(|(id, source, target)| GlossaryTerm {
            id: id.to_string(),
            source: source.to_string(),
            target: target.to_string(),
            domain: domain.into(),
        })
        .collect()
}

/// 合并系统术语和自定义术语
///
/// 顺序固定：系统术语在前，自定义术语在后，不去重。
/// 同一源词出现多次时，由术语指令声明"最后一条生效"。
pub fn merged_terms(domain: LegalDomain, custom_terms: &[GlossaryTerm]) -> Vec<GlossaryTerm> {
    let mut terms = system_terms(domain);
    terms.extend_from_slice(custom_terms);
    terms
}

/// 用户自定义术语
///
/// 保持插入顺序，空的源词或目标词会被静默忽略。
/// 反序列化时每一条都经过与 [`CustomGlossary::add`] 相同的检查。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<CustomTermEntry>", into = "Vec<GlossaryTerm>")]
pub struct CustomGlossary {
    terms: Vec<GlossaryTerm>,
}

/// 外部传入的自定义术语，`domain` 字段即使存在也会被忽略
#[derive(Debug, Deserialize)]
struct CustomTermEntry {
    #[serde(default)]
    id: String,
    #[serde(default)]
    source: String,
    #[serde(default)]
    target: String,
}

impl From<Vec<CustomTermEntry>> for CustomGlossary {
    fn from(entries: Vec<CustomTermEntry>) -> Self {
        let mut glossary = Self::new();
        for entry in entries {
            glossary.insert(entry.id, &entry.source, &entry.target);
        }
        glossary
    }
}

impl From<CustomGlossary> for Vec<GlossaryTerm> {
    fn from(glossary: CustomGlossary) -> Self {
        glossary.terms
    }
}

impl CustomGlossary {
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加术语，输入为空时不做任何修改并返回 `None`
    pub fn add(&mut self, source: &str, target: &str) -> Option<&GlossaryTerm> {
        self.insert(String::new(), source, target)
    }

    fn insert(&mut self, id: String, source: &str, target: &str) -> Option<&GlossaryTerm> {
        let source = source.trim();
        let target = target.trim();
        if source.is_empty() || target.is_empty() {
            tracing::debug!("忽略空的自定义术语");
            return None;
        }

        let id = match id.trim() {
            "" => uuid::Uuid::new_v4().to_string(),
            id => id.to_string(),
        };
        self.terms.push(GlossaryTerm {
            id,
            source: source.to_string(),
            target: target.to_string(),
            domain: TermDomain::Custom,
        });
        self.terms.last()
    }

    /// 按ID删除术语，返回是否删除成功
    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.terms.len();
        self.terms.retain(|term| term.id != id);
        self.terms.len() != before
    }

    pub fn as_slice(&self) -> &[GlossaryTerm] {
        &self.terms
    }

    pub fn iter(&self) -> impl Iterator<Item = &GlossaryTerm> {
        self.terms.iter()
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_general_domain_has_no_system_terms() {
        assert!(system_terms(LegalDomain::General).is_empty());
        assert_eq!(system_terms(LegalDomain::Contracts).len(), 5);
    }

    #[test]
    fn test_merged_terms_length_for_every_domain() {
        let mut custom = CustomGlossary::new();
        custom.add("Cláusula", "Clause");
        custom.add("Rescisão", "Rescission");

        for domain in LegalDomain::ALL {
            let merged = merged_terms(domain, custom.as_slice());
            assert_eq!(merged.len(), system_terms(domain).len() + custom.len());
        }
    }

    #[test]
    fn test_merged_terms_order_and_duplicates() {
        let mut custom = CustomGlossary::new();
        custom.add("Rescisão", "Rescission");

        let merged = merged_terms(LegalDomain::Contracts, custom.as_slice());
        assert_eq!(merged[0].source, "Rescisão");
        assert_eq!(merged[0].target, "Termination");
        assert_eq!(merged[0].domain, TermDomain::Contracts);

        let last = merged.last().unwrap();
        assert_eq!(last.target, "Rescission");
        assert_eq!(last.domain, TermDomain::Custom);
    }

    #[test]
    fn test_add_rejects_empty_inputs() {
        let mut custom = CustomGlossary::new();

        assert!(custom.add("", "Clause").is_none());
        assert!(custom.add("Cláusula", "").is_none());
        assert!(custom.add("   ", "Clause").is_none());
        assert!(custom.is_empty());

        let term = custom.add("  Cláusula ", "Clause").cloned().unwrap();
        assert_eq!(term.source, "Cláusula");
        assert_eq!(custom.len(), 1);
    }

    #[test]
    fn test_remove_and_insertion_order() {
        let mut custom = CustomGlossary::new();
        let first = custom.add("A", "1").unwrap().id.clone();
        custom.add("B", "2");
        custom.add("C", "3");

        assert!(custom.remove(&first));
        assert!(!custom.remove(&first));

        let sources: Vec<&str> = custom.iter().map(|t| t.source.as_str()).collect();
        assert_eq!(sources, vec!["B", "C"]);
    }

    #[test]
    fn test_deserialize_drops_empty_terms() {
        let custom: CustomGlossary = serde_json::from_str(
            r#"[
                {"id": "x", "source": "", "target": "Penalty", "domain": "Custom"},
                {"id": "y", "source": "  Multa ", "target": "Penalty", "domain": "Contracts"},
                {"source": "Prazo", "target": "   "},
                {"source": "Foro", "target": "Venue"}
            ]"#,
        )
        .unwrap();

        assert_eq!(custom.len(), 2);
        let first = &custom.as_slice()[0];
        assert_eq!(first.id, "y");
        assert_eq!(first.source, "Multa");
        assert_eq!(first.domain, TermDomain::Custom);
        assert!(!custom.as_slice()[1].id.is_empty());

        let json = serde_json::to_value(&custom).unwrap();
        assert_eq!(json[0]["source"], "Multa");
        assert_eq!(json.as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_directive_format() {
        let term = &system_terms(LegalDomain::Contracts)[0];
        assert_eq!(term.directive(), "Rescisão -> Termination");
    }
}
