use std::{borrow::Borrow, fmt};

use bitflags::bitflags;

/// Name of a material configuration, like `KQvKR`.
///
/// Identifiers handed out by a [`DependencyOracle`](crate::DependencyOracle)
/// are canonical. Identifiers built by hand may be in any spelling the oracle
/// accepts.
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Identifier(String);

impl Identifier {
    pub fn new(identifier: impl Into<String>) -> Identifier {
        Identifier(identifier.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Tests if the configuration contains pawns, which selects the
    /// pawn-bearing generator and suffixes.
    pub fn has_pawns(&self) -> bool {
        self.0.contains('P')
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Identifier {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Identifier {
    fn from(identifier: &str) -> Identifier {
        Identifier::new(identifier)
    }
}

impl From<String> for Identifier {
    fn from(identifier: String) -> Identifier {
        Identifier(identifier)
    }
}

/// Type of a table file.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Metric {
    /// Win/draw/loss.
    Wdl,
    /// Distance to zeroing.
    Dtz,
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match *self {
            Metric::Wdl => "wdl",
            Metric::Dtz => "dtz",
        })
    }
}

bitflags! {
    /// Set of table files produced by a generator run.
    #[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
    pub struct Metrics: u8 {
        const WDL = 1 << 0;
        const DTZ = 1 << 1;
    }
}

impl Metrics {
    /// Interprets the `--wdl` and `--dtz` generator flags. Each flag alone
    /// restricts the run to one kind of file. Without a restriction (or with
    /// both flags) both kinds are produced.
    pub fn from_flags(wdl: bool, dtz: bool) -> Metrics {
        match (wdl, dtz) {
            (true, false) => Metrics::WDL,
            (false, true) => Metrics::DTZ,
            _ => Metrics::all(),
        }
    }
}

/// Family of table generators, determining file extensions and whether
/// kings are royal.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Family {
    /// Standard chess, `rtbgen`.
    Regular,
    /// Atomic chess, `atbgen`.
    Atomic,
    /// Suicide chess, `stbgen`.
    Suicide,
    /// Giveaway chess, `gtbgen`.
    Giveaway,
}

impl Family {
    /// Families recognized by generator name, in order of precedence.
    const RECOGNIZED: [Family; 3] = [Family::Atomic, Family::Suicide, Family::Giveaway];

    const fn prefix(self) -> char {
        match self {
            Family::Regular => 'r',
            Family::Atomic => 'a',
            Family::Suicide => 's',
            Family::Giveaway => 'g',
        }
    }

    /// Conventional name of the generator for this family, e.g. `atbgenp`
    /// for pawn-bearing atomic tables.
    pub fn generator_name(self, pawns: bool) -> String {
        format!("{}tbgen{}", self.prefix(), if pawns { "p" } else { "" })
    }

    /// Detects the family by looking for a conventional generator name in
    /// `generator`, which may be a path or a wrapped command.
    pub fn detect(generator: &str, pawns: bool) -> Family {
        Family::RECOGNIZED
            .into_iter()
            .find(|family| generator.contains(&family.generator_name(pawns)))
            .unwrap_or(Family::Regular)
    }

    /// File extension, including the leading dot.
    pub const fn ext(self, metric: Metric) -> &'static str {
        match (self, metric) {
            (Family::Regular, Metric::Wdl) => ".rtbw",
            (Family::Regular, Metric::Dtz) => ".rtbz",
            (Family::Atomic, Metric::Wdl) => ".atbw",
            (Family::Atomic, Metric::Dtz) => ".atbz",
            (Family::Suicide, Metric::Wdl) => ".stbw",
            (Family::Suicide, Metric::Dtz) => ".stbz",
            (Family::Giveaway, Metric::Wdl) => ".gtbw",
            (Family::Giveaway, Metric::Dtz) => ".gtbz",
        }
    }

    /// Whether the king is royal, so that there is exactly one king per side
    /// and `KvK` is a trivial draw.
    pub const fn one_king(self) -> bool {
        !matches!(self, Family::Suicide | Family::Giveaway)
    }
}
