use tracing::debug;

use crate::{
    errors::ConfigurationConflict,
    types::{Family, Metric, Metrics},
};

/// Generator for pawnless tables, unless configured otherwise.
pub const DEFAULT_TBGEN: &str = "rtbgen";

/// Unresolved options, as given on the command line. Unset values are
/// derived from the generator names by [`Options::resolve()`].
#[derive(Debug, Clone, Default)]
pub struct Options {
    pub threads: Option<usize>,
    /// Only produce WDL tables.
    pub wdl: bool,
    /// Only produce DTZ tables.
    pub dtz: bool,
    pub stats: bool,
    /// Reduce memory usage by temporarily saving tables to disk during
    /// compression.
    pub disk: bool,
    pub tbgen: Option<String>,
    pub tbgenp: Option<String>,
    pub wdl_suffix: Option<String>,
    pub dtz_suffix: Option<String>,
    pub pawnless_wdl_suffix: Option<String>,
    pub pawnless_dtz_suffix: Option<String>,
    pub one_king: Option<bool>,
}

/// File name suffixes, including the leading dot.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Suffixes {
    pub wdl: String,
    pub dtz: String,
    pub pawnless_wdl: String,
    pub pawnless_dtz: String,
}

impl Suffixes {
    pub fn get(&self, metric: Metric, pawns: bool) -> &str {
        match (metric, pawns) {
            (Metric::Wdl, true) => &self.wdl,
            (Metric::Dtz, true) => &self.dtz,
            (Metric::Wdl, false) => &self.pawnless_wdl,
            (Metric::Dtz, false) => &self.pawnless_dtz,
        }
    }

    fn validate(&self, metrics: Metrics) -> Result<(), ConfigurationConflict> {
        for (option, suffix) in [
            ("wdl_suffix", &self.wdl),
            ("dtz_suffix", &self.dtz),
            ("pawnless_wdl_suffix", &self.pawnless_wdl),
            ("pawnless_dtz_suffix", &self.pawnless_dtz),
        ] {
            if suffix.is_empty() {
                return Err(ConfigurationConflict::EmptySuffix { option });
            }
            if suffix
                .chars()
                .any(|ch| ch.is_whitespace() || ch == ':' || ch == '/')
            {
                return Err(ConfigurationConflict::InvalidSuffix {
                    option,
                    suffix: suffix.clone(),
                });
            }
        }

        if metrics == Metrics::all() {
            for (wdl_option, wdl, dtz_option, dtz) in [
                ("wdl_suffix", &self.wdl, "dtz_suffix", &self.dtz),
                (
                    "pawnless_wdl_suffix",
                    &self.pawnless_wdl,
                    "pawnless_dtz_suffix",
                    &self.pawnless_dtz,
                ),
            ] {
                if wdl == dtz {
                    return Err(ConfigurationConflict::AmbiguousSuffix {
                        wdl_option,
                        dtz_option,
                        suffix: wdl.clone(),
                    });
                }
            }
        }

        Ok(())
    }
}

/// Fully resolved configuration of a build. Immutable once constructed.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct BuildConfiguration {
    threads: Option<usize>,
    metrics: Metrics,
    stats: bool,
    disk: bool,
    suffixes: Suffixes,
    one_king: bool,
    tbgen: String,
    tbgenp: String,
}

impl Options {
    /// Fills in all defaults and checks for conflicts.
    ///
    /// The pawn-bearing generator defaults to the pawnless generator with a
    /// `p` appended. Suffixes default to the table family recognized in the
    /// respective generator name, and single-king mode is enabled unless the
    /// pawn-bearing generator is for suicide or giveaway chess.
    ///
    /// # Errors
    ///
    /// See [`ConfigurationConflict`].
    pub fn resolve(self) -> Result<BuildConfiguration, ConfigurationConflict> {
        if self.threads == Some(0) {
            return Err(ConfigurationConflict::ZeroThreads);
        }

        let tbgen = self.tbgen.unwrap_or_else(|| DEFAULT_TBGEN.to_owned());
        if tbgen.trim().is_empty() {
            return Err(ConfigurationConflict::EmptyGenerator { option: "tbgen" });
        }
        let tbgenp = self.tbgenp.unwrap_or_else(|| format!("{tbgen}p"));
        if tbgenp.trim().is_empty() {
            return Err(ConfigurationConflict::EmptyGenerator { option: "tbgenp" });
        }

        let pawnless = Family::detect(&tbgen, false);
        let pawnful = Family::detect(&tbgenp, true);

        let suffixes = Suffixes {
            wdl: self
                .wdl_suffix
                .unwrap_or_else(|| pawnful.ext(Metric::Wdl).to_owned()),
            dtz: self
                .dtz_suffix
                .unwrap_or_else(|| pawnful.ext(Metric::Dtz).to_owned()),
            pawnless_wdl: self
                .pawnless_wdl_suffix
                .unwrap_or_else(|| pawnless.ext(Metric::Wdl).to_owned()),
            pawnless_dtz: self
                .pawnless_dtz_suffix
                .unwrap_or_else(|| pawnless.ext(Metric::Dtz).to_owned()),
        };

        let metrics = Metrics::from_flags(self.wdl, self.dtz);
        suffixes.validate(metrics)?;

        let config = BuildConfiguration {
            threads: self.threads,
            metrics,
            stats: self.stats,
            disk: self.disk,
            suffixes,
            one_king: self.one_king.unwrap_or(pawnful.one_king()),
            tbgen,
            tbgenp,
        };

        debug!(?pawnless, ?pawnful, ?config, "resolved build configuration");
        Ok(config)
    }
}

impl BuildConfiguration {
    pub fn threads(&self) -> Option<usize> {
        self.threads
    }

    /// Kinds of tables produced by each generator run.
    pub fn metrics(&self) -> Metrics {
        self.metrics
    }

    pub fn stats(&self) -> bool {
        self.stats
    }

    pub fn disk(&self) -> bool {
        self.disk
    }

    pub fn suffixes(&self) -> &Suffixes {
        &self.suffixes
    }

    /// Whether `KvK` is a trivial base case that is never generated.
    pub fn one_king(&self) -> bool {
        self.one_king
    }

    /// Name of the generator for pawn-bearing or pawnless tables.
    pub fn generator(&self, pawns: bool) -> &str {
        if pawns {
            &self.tbgenp
        } else {
            &self.tbgen
        }
    }

    /// Full command line for the generator, without the endgame argument.
    pub fn generator_command(&self, pawns: bool) -> String {
        let mut builder = vec![self.generator(pawns).to_owned()];
        if let Some(threads) = self.threads {
            builder.push("--threads".to_owned());
            builder.push(threads.to_string());
        }
        if self.metrics == Metrics::WDL {
            builder.push("--wdl".to_owned());
        } else if self.metrics == Metrics::DTZ {
            builder.push("--dtz".to_owned());
        }
        if self.stats {
            builder.push("--stats".to_owned());
        }
        if self.disk {
            builder.push("--disk".to_owned());
        }
        builder.join(" ")
    }
}
