//! Rule engine auditing ADEx data exchange and indicator configuration.
//!
//! The engine works on already-fetched [`Snapshots`](adex_model::Snapshots):
//! it partitions indicators, classifies request periods once, then evaluates
//! every rule of the fixed catalog and returns a fresh [`ValidationReport`].
//!
//! ```no_run
//! use adex_model::Snapshots;
//! use adex_validate::{ValidationOptions, run_validation};
//!
//! let snapshots = Snapshots::default();
//! match run_validation(&snapshots, &ValidationOptions::default()) {
//!     Ok(report) => println!("{} findings", report.total_findings()),
//!     Err(err) => eprintln!("{}", err.user_message()),
//! }
//! ```

pub mod catalog;
pub mod checks;
pub mod context;
pub mod engine;
pub mod error;
pub mod options;
pub mod partition;
pub mod period;
pub mod tables;
pub mod version;

pub use catalog::{Cell, Finding, RuleDefinition, RuleKey, RuleResult, RunStatus, ValidationReport};
pub use checks::indicators::distinct_implementer_types;
pub use context::{PeriodAnalysis, RequestRef, RuleContext};
pub use engine::{RULES, RuleDescriptor, Scope, run_validation};
pub use error::{Result, ValidationError};
pub use options::{PeriodConflictMode, ValidationOptions, VersionPolicy};
pub use partition::{IndicatorPartition, categorize};
pub use period::{PeriodClass, PeriodKind, PeriodType, Periodicity, classify, classify_mixed, is_relative};
pub use tables::{ImplementerType, ImplementerTypes, is_iso3_code};
pub use version::Version;
