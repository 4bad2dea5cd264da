//! 翻译系统核心模块
//!
//! - **服务层** (`service.rs`): 统一的对外接口，负责引擎选择、审计、复核和统计
//! - **引擎层** (`engine.rs`): 刚性与上下文两种翻译后端
//!
//! ```text
//! TranslationService (service.rs)
//!     ├── TranslationEngine (engine.rs)
//!     │       └── InstructionComposer (prompt.rs)
//!     ├── ComplianceAuditor (audit.rs)
//!     ├── compare (review.rs)
//!     └── Assistant (assist.rs)
//! ```

pub mod engine;
pub mod service;

pub use engine::{EngineOutput, EngineStatus, TranslationEngine};
pub use service::{HealthLevel, HealthStatus, ServiceStats, ServiceStatsSnapshot, TranslationService};
