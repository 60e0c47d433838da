//! Plan the generation of Syzygy endgame tablebases.
//!
//! Generating the table for an endgame requires the tables of all endgames
//! reachable by captures and promotions. Given the requested endgames, this
//! crate computes the transitive closure of their dependencies and writes
//! a Makefile that invokes the table generator in a valid order.
//!
//! # Example
//!
//! ```
//! use syzygy_deps::{plan, Options, SyzygyOracle};
//!
//! let config = Options::default().resolve()?;
//! let makefile = plan(["KPvK"], &SyzygyOracle::new(), &config)?;
//!
//! let rule = makefile.rule("KPvK.rtbz").expect("rule for requested table");
//! assert_eq!(
//!     rule.prerequisites,
//!     ["KQvK.rtbz", "KRvK.rtbz", "KBvK.rtbz", "KNvK.rtbz"]
//! );
//!
//! print!("{makefile}");
//! # Ok::<_, syzygy_deps::Error>(())
//! ```
//!
//! # Errors
//!
//! See [`Error`] for possible error conditions.

#![doc(html_root_url = "https://docs.rs/syzygy-deps/0.1.0")]
#![warn(missing_debug_implementations)]

mod closure;
mod config;
mod errors;
mod makefile;
mod material;
mod naming;
mod oracle;
mod types;

pub use crate::{
    closure::{close, Closure, Node},
    config::{BuildConfiguration, Options, Suffixes, DEFAULT_TBGEN},
    errors::{ConfigurationConflict, Error, InvalidIdentifier},
    makefile::{Makefile, Rule, Variable, AGGREGATE_TARGET},
    material::{Material, ParseMaterialError, MAX_DEPENDENCIES, MAX_SIDE_PIECES},
    naming::{artifact_metric, artifact_name, generator_variable},
    oracle::{DependencyOracle, SyzygyOracle},
    types::{Family, Identifier, Metric, Metrics},
};

/// Computes the dependency closure of `requested` and emits build rules
/// for it.
///
/// Nothing is emitted unless every identifier is valid.
///
/// # Errors
///
/// Errors with [`Error::InvalidIdentifier`] if the oracle rejects any
/// requested identifier or prerequisite.
pub fn plan<I, O>(requested: I, oracle: &O, config: &BuildConfiguration) -> Result<Makefile, Error>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
    O: DependencyOracle + ?Sized,
{
    let closure = close(requested, oracle, config.one_king())?;
    Ok(Makefile::emit(&closure, config))
}

/// Like [`plan()`], but resolves `options` first.
///
/// # Errors
///
/// Errors with [`Error::ConfigurationConflict`] if the options can not be
/// resolved, or see [`plan()`].
pub fn plan_with_options<I, O>(requested: I, oracle: &O, options: Options) -> Result<Makefile, Error>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
    O: DependencyOracle + ?Sized,
{
    let config = options.resolve()?;
    plan(requested, oracle, &config)
}
