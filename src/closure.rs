use std::collections::VecDeque;

use rustc_hash::FxHashSet;
use tracing::{debug, trace};

use crate::{errors::InvalidIdentifier, oracle::DependencyOracle, types::Identifier};

/// A closed identifier with its immediate prerequisites.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Node {
    pub identifier: Identifier,
    pub prerequisites: Vec<Identifier>,
}

/// Transitive closure of a set of requested identifiers.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct Closure {
    requested: Vec<Identifier>,
    nodes: Vec<Node>,
}

impl Closure {
    /// Requested identifiers, canonical and without duplicates, in the
    /// order they were first requested.
    pub fn requested(&self) -> &[Identifier] {
        &self.requested
    }

    /// Closed identifiers in breadth-first discovery order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn identifiers(&self) -> impl Iterator<Item = &Identifier> + '_ {
        self.nodes.iter().map(|node| &node.identifier)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Expands `initial` to all identifiers it transitively depends on. Each
/// canonical identifier is visited exactly once.
///
/// The order only depends on the order of `initial` and the answers of the
/// oracle. With `single_king` the oracle's terminal is considered closed
/// from the start, so it is neither expanded nor part of the result.
///
/// # Errors
///
/// Aborts with the first [`InvalidIdentifier`] reported by the oracle.
pub fn close<I, O>(initial: I, oracle: &O, single_king: bool) -> Result<Closure, InvalidIdentifier>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
    O: DependencyOracle + ?Sized,
{
    let mut requested = Vec::new();
    let mut seen = FxHashSet::default();
    let mut queue = VecDeque::new();

    for identifier in initial {
        let identifier = oracle.normalize(identifier.as_ref())?;
        if seen.insert(identifier.clone()) {
            requested.push(identifier.clone());
        }
        queue.push_back(identifier);
    }

    let mut closed = FxHashSet::default();
    if single_king {
        closed.insert(oracle.terminal());
    }

    let mut nodes = Vec::new();

    // All queued identifiers are canonical.
    while let Some(identifier) = queue.pop_front() {
        if closed.contains(&identifier) {
            trace!(%identifier, "already closed");
            continue;
        }
        closed.insert(identifier.clone());

        let prerequisites = oracle
            .immediate_prerequisites(&identifier, single_king)?
            .iter()
            .map(|prerequisite| oracle.normalize(prerequisite.as_str()))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(%identifier, prerequisites = prerequisites.len(), "closed");

        queue.extend(prerequisites.iter().cloned());
        nodes.push(Node {
            identifier,
            prerequisites,
        });
    }

    Ok(Closure { requested, nodes })
}

#[cfg(test)]
mod tests {
    use rustc_hash::FxHashMap;

    use super::*;

    /// Oracle over a fixed graph. Identifiers are case insensitive, with
    /// upper case being canonical.
    struct GraphOracle {
        edges: FxHashMap<&'static str, Vec<&'static str>>,
    }

    impl GraphOracle {
        fn new(edges: &[(&'static str, &[&'static str])]) -> GraphOracle {
            GraphOracle {
                edges: edges
                    .iter()
                    .map(|&(from, to)| (from, to.to_vec()))
                    .collect(),
            }
        }
    }

    impl DependencyOracle for GraphOracle {
        fn normalize(&self, identifier: &str) -> Result<Identifier, InvalidIdentifier> {
            let canonical = identifier.to_ascii_uppercase();
            if self.edges.contains_key(canonical.as_str()) {
                Ok(Identifier::from(canonical))
            } else {
                Err(InvalidIdentifier::new(identifier, "unknown"))
            }
        }

        fn immediate_prerequisites(
            &self,
            identifier: &Identifier,
            _single_king: bool,
        ) -> Result<Vec<Identifier>, InvalidIdentifier> {
            self.edges
                .get(identifier.as_str())
                .map(|deps| deps.iter().copied().map(Identifier::from).collect())
                .ok_or_else(|| InvalidIdentifier::new(identifier.as_str(), "unknown"))
        }

        fn terminal(&self) -> Identifier {
            Identifier::from("T")
        }
    }

    fn order(closure: &Closure) -> Vec<&str> {
        closure.identifiers().map(Identifier::as_str).collect()
    }

    fn abc() -> GraphOracle {
        GraphOracle::new(&[("A", &["B", "C"]), ("B", &["C"]), ("C", &[])])
    }

    #[test]
    fn test_breadth_first_order() {
        let closure = close(["A"], &abc(), false).expect("valid");
        assert_eq!(order(&closure), ["A", "B", "C"]);
        assert_eq!(closure.nodes()[0].prerequisites, ["B", "C"].map(Identifier::from));
        assert_eq!(closure.nodes()[1].prerequisites, ["C"].map(Identifier::from));
        assert!(closure.nodes()[2].prerequisites.is_empty());
    }

    #[test]
    fn test_duplicate_requests() {
        let once = close(["A"], &abc(), false).expect("valid");
        let twice = close(["A", "a"], &abc(), false).expect("valid");
        assert_eq!(order(&once), order(&twice));
        assert_eq!(twice.requested(), ["A"].map(Identifier::from));
    }

    #[test]
    fn test_request_order_preserved() {
        let closure = close(["C", "A"], &abc(), false).expect("valid");
        assert_eq!(order(&closure), ["C", "A", "B"]);
        assert_eq!(closure.requested(), ["C", "A"].map(Identifier::from));
    }

    #[test]
    fn test_deep_chain() {
        let oracle = GraphOracle::new(&[
            ("E", &["D"]),
            ("D", &["C", "B"]),
            ("C", &["A"]),
            ("B", &["A"]),
            ("A", &[]),
        ]);
        let closure = close(["E"], &oracle, false).expect("valid");
        assert_eq!(order(&closure), ["E", "D", "C", "B", "A"]);
    }

    #[test]
    fn test_single_king_terminal() {
        let oracle = GraphOracle::new(&[("D", &["T"]), ("T", &[])]);

        let closure = close(["D"], &oracle, true).expect("valid");
        assert_eq!(order(&closure), ["D"]);
        assert_eq!(closure.nodes()[0].prerequisites, ["T"].map(Identifier::from));

        let closure = close(["D"], &oracle, false).expect("valid");
        assert_eq!(order(&closure), ["D", "T"]);
    }

    #[test]
    fn test_requested_terminal() {
        let oracle = GraphOracle::new(&[("T", &[])]);
        let closure = close(["T"], &oracle, true).expect("valid");
        assert!(closure.is_empty());
        assert_eq!(closure.requested(), ["T"].map(Identifier::from));
    }

    #[test]
    fn test_invalid_request() {
        assert_eq!(
            close(["A", "X"], &abc(), false),
            Err(InvalidIdentifier::new("X", "unknown"))
        );
    }

    #[test]
    fn test_invalid_prerequisite() {
        let oracle = GraphOracle::new(&[("A", &["B"]), ("B", &["Z"])]);
        assert_eq!(
            close(["A"], &oracle, false),
            Err(InvalidIdentifier::new("Z", "unknown"))
        );
    }

    #[test]
    fn test_empty_request() {
        let closure = close(Vec::<String>::new(), &abc(), false).expect("valid");
        assert!(closure.is_empty());
        assert!(closure.requested().is_empty());
    }
}
