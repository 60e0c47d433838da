use crate::{
    config::BuildConfiguration,
    types::{Identifier, Metric, Metrics},
};

/// The table that names a build artifact. DTZ tables are generated last, so
/// they stand for the whole run, unless only WDL tables are requested.
pub fn artifact_metric(metrics: Metrics) -> Metric {
    if metrics.contains(Metrics::DTZ) {
        Metric::Dtz
    } else {
        Metric::Wdl
    }
}

/// File name of the table generated for `identifier`, like `KRPvKR.rtbz`.
pub fn artifact_name(identifier: &Identifier, config: &BuildConfiguration) -> String {
    let suffix = config
        .suffixes()
        .get(artifact_metric(config.metrics()), identifier.has_pawns());
    format!("{identifier}{suffix}")
}

/// Makefile variable holding the generator command for pawn-bearing or
/// pawnless tables.
pub fn generator_variable(pawns: bool) -> &'static str {
    if pawns {
        "TBGENP"
    } else {
        "TBGEN"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Options;

    #[test]
    fn test_artifact_metric() {
        assert_eq!(artifact_metric(Metrics::all()), Metric::Dtz);
        assert_eq!(artifact_metric(Metrics::DTZ), Metric::Dtz);
        assert_eq!(artifact_metric(Metrics::WDL), Metric::Wdl);
    }

    #[test]
    fn test_artifact_name() {
        let config = Options {
            dtz_suffix: Some(".pz".to_owned()),
            ..Options::default()
        }
        .resolve()
        .expect("no conflict");

        assert_eq!(artifact_name(&"KRvK".into(), &config), "KRvK.rtbz");
        assert_eq!(artifact_name(&"KRPvKR".into(), &config), "KRPvKR.pz");
    }

    #[test]
    fn test_artifact_name_wdl_only() {
        let config = Options {
            wdl: true,
            tbgen: Some("atbgen".to_owned()),
            ..Options::default()
        }
        .resolve()
        .expect("no conflict");

        assert_eq!(artifact_name(&"KQvK".into(), &config), "KQvK.atbw");
        assert_eq!(artifact_name(&"KPvKP".into(), &config), "KPvKP.atbw");
    }

    #[test]
    fn test_generator_variable() {
        assert_eq!(generator_variable(false), "TBGEN");
        assert_eq!(generator_variable(true), "TBGENP");
    }
}
