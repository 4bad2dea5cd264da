//! 术语复核
//!
//! 纯本地检查，不调用外部服务：对每个术语判断源词是否出现在原文中、
//! 目标词是否出现在译文中（均不区分大小写），只返回原文中出现过的术语。

use serde::Serialize;

use crate::translation::glossary::GlossaryTerm;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewFinding {
    pub term: GlossaryTerm,
    pub found_in_source: bool,
    pub found_in_target: bool,
    pub compliant: bool,
}

/// 比对原文与译文中的术语使用情况
pub fn compare(source: &str, target: &str, terms: &[GlossaryTerm]) -> Vec<ReviewFinding> {
    // 统一转为小写后做子串匹配
    let source = source.to_lowercase();
    let target = target.to_lowercase();

    terms
        .iter()
        .filter_map(|term| {
            if !source.contains(&term.source.to_lowercase()) {
                return None;
            }

            let found_in_target = target.contains(&term.target.to_lowercase());
            Some(ReviewFinding {
                term: term.clone(),
                found_in_source: true,
                found_in_target,
                compliant: found_in_target,
            })
        })
        .collect()
}

/// 不合规的术语数量
pub fn violations(findings: &[ReviewFinding]) -> usize {
    findings.iter().filter(|finding| !finding.compliant).count()
}
