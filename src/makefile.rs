use std::fmt;

use crate::{
    closure::Closure,
    config::BuildConfiguration,
    naming::{artifact_name, generator_variable},
};

/// Target that builds all requested tables.
pub const AGGREGATE_TARGET: &str = "all";

/// A variable assignment, `NAME = value`.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Variable {
    pub name: &'static str,
    pub value: String,
}

/// A rule with an optional single-line recipe.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Rule {
    pub target: String,
    pub prerequisites: Vec<String>,
    pub recipe: Option<String>,
}

/// Build rules for a set of tables, in the order they are written.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Makefile {
    pub variables: Vec<Variable>,
    /// The [`AGGREGATE_TARGET`] rule, depending on the requested tables.
    pub aggregate: Rule,
    /// One rule per closed table.
    pub rules: Vec<Rule>,
}

impl Makefile {
    /// Emits a rule for every table in `closure`, with the immediate
    /// prerequisites of the table and a recipe invoking the matching
    /// generator.
    pub fn emit(closure: &Closure, config: &BuildConfiguration) -> Makefile {
        let variables = [false, true]
            .into_iter()
            .map(|pawns| Variable {
                name: generator_variable(pawns),
                value: config.generator_command(pawns),
            })
            .collect();

        let aggregate = Rule {
            target: AGGREGATE_TARGET.to_owned(),
            prerequisites: closure
                .requested()
                .iter()
                .map(|identifier| artifact_name(identifier, config))
                .collect(),
            recipe: None,
        };

        let rules = closure
            .nodes()
            .iter()
            .map(|node| Rule {
                target: artifact_name(&node.identifier, config),
                prerequisites: node
                    .prerequisites
                    .iter()
                    .map(|prerequisite| artifact_name(prerequisite, config))
                    .collect(),
                recipe: Some(format!(
                    "$({}) {}",
                    generator_variable(node.identifier.has_pawns()),
                    node.identifier
                )),
            })
            .collect();

        Makefile {
            variables,
            aggregate,
            rules,
        }
    }

    /// Finds the rule for `target`.
    pub fn rule(&self, target: &str) -> Option<&Rule> {
        self.rules.iter().find(|rule| rule.target == target)
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:", self.target)?;
        for prerequisite in &self.prerequisites {
            write!(f, " {prerequisite}")?;
        }
        if let Some(ref recipe) = self.recipe {
            write!(f, "\n\t{recipe}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Makefile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for variable in &self.variables {
            writeln!(f, "{} = {}", variable.name, variable.value)?;
        }
        writeln!(f)?;
        writeln!(f, "{}", self.aggregate)?;
        for rule in &self.rules {
            writeln!(f)?;
            writeln!(f, "{rule}")?;
        }
        Ok(())
    }
}
