use crate::{errors::InvalidIdentifier, material::Material, types::Identifier};

/// Knowledge about which tables must exist before a table can be generated.
///
/// Implementations are queried on demand and need not cache anything.
pub trait DependencyOracle {
    /// Returns the canonical spelling of `identifier`.
    ///
    /// Canonicalizing a canonical identifier must return it unchanged.
    ///
    /// # Errors
    ///
    /// Errors with [`InvalidIdentifier`] if `identifier` is malformed.
    fn normalize(&self, identifier: &str) -> Result<Identifier, InvalidIdentifier>;

    /// Returns the identifiers of the tables that `identifier` immediately
    /// depends on.
    ///
    /// The relation must be acyclic. With `single_king` the
    /// [`terminal()`](DependencyOracle::terminal) is treated as a trivial base
    /// case.
    ///
    /// # Errors
    ///
    /// Errors with [`InvalidIdentifier`] if `identifier` is not known.
    fn immediate_prerequisites(
        &self,
        identifier: &Identifier,
        single_king: bool,
    ) -> Result<Vec<Identifier>, InvalidIdentifier>;

    /// The configuration without any prerequisites.
    fn terminal(&self) -> Identifier;
}

/// Dependencies of Syzygy tables, following promotions and captures.
#[derive(Debug, Default, Copy, Clone)]
pub struct SyzygyOracle {
    _priv: (),
}

impl SyzygyOracle {
    pub fn new() -> SyzygyOracle {
        SyzygyOracle::default()
    }

    fn material(identifier: &str) -> Result<Material, InvalidIdentifier> {
        identifier
            .parse::<Material>()
            .map_err(|err| InvalidIdentifier::new(identifier, err))
    }
}

impl DependencyOracle for SyzygyOracle {
    fn normalize(&self, identifier: &str) -> Result<Identifier, InvalidIdentifier> {
        Ok(Identifier::from(
            SyzygyOracle::material(identifier)?
                .into_normalized()
                .to_string(),
        ))
    }

    fn immediate_prerequisites(
        &self,
        identifier: &Identifier,
        single_king: bool,
    ) -> Result<Vec<Identifier>, InvalidIdentifier> {
        Ok(SyzygyOracle::material(identifier.as_str())?
            .dependencies(single_king)
            .iter()
            .map(|dep| Identifier::from(dep.to_string()))
            .collect())
    }

    fn terminal(&self) -> Identifier {
        Identifier::from("KvK")
    }
}
