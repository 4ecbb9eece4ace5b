//! Shared argument graphs.
//!
//! An [`ArgumentSet`] is a cheap handle over one backing graph: cloning
//! the handle aliases the graph, so a mutation through any clone is
//! visible to all of them. [`ArgumentSet::snapshot`] produces an
//! independent copy for tentative mutation.

use std::cell::RefCell;
use std::fmt::Write as _;
use std::rc::Rc;

use indexmap::IndexSet;
use tracing::trace;

use crate::{Argument, ArgumentId, Proposition};

#[derive(Debug, Clone, Default)]
struct Graph {
    arguments: Vec<Argument>,
    propositions: IndexSet<Proposition>,
}

/// Handle to a shared graph of arguments and the propositions they
/// mention.
#[derive(Debug, Clone, Default)]
pub struct ArgumentSet {
    graph: Rc<RefCell<Graph>>,
}

impl ArgumentSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.graph.borrow().arguments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.borrow().arguments.is_empty()
    }

    /// Adds an argument to the graph, re-keying it first when an id
    /// override is given. Visible through every handle alias.
    pub fn add_argument(&self, mut argument: Argument, id: Option<ArgumentId>) {
        if let Some(id) = id {
            argument.id = id;
        }
        let mut graph = self.graph.borrow_mut();
        graph.propositions.insert(argument.conclusion.clone());
        for p in argument.premises.iter().chain(argument.exceptions.iter()) {
            graph.propositions.insert(p.clone());
        }
        trace!(argument = %argument.id, "argument added");
        graph.arguments.push(argument);
    }

    /// Registers a proposition node, returning it unchanged.
    pub fn add_proposition(&self, proposition: Proposition) -> Proposition {
        self.graph.borrow_mut().propositions.insert(proposition.clone());
        proposition
    }

    /// Arguments concluding exactly `p`, in insertion order.
    pub fn get_arguments(&self, p: &Proposition) -> Vec<Argument> {
        self.graph
            .borrow()
            .arguments
            .iter()
            .filter(|a| a.conclusion == *p)
            .cloned()
            .collect()
    }

    /// Arguments concluding the negation of `p`.
    pub fn get_arguments_con(&self, p: &Proposition) -> Vec<Argument> {
        self.get_arguments(&p.negate())
    }

    /// Every argument in the graph, in insertion order.
    pub fn arguments(&self) -> Vec<Argument> {
        self.graph.borrow().arguments.clone()
    }

    /// Every proposition mentioned by the graph, in first-seen order.
    pub fn propositions(&self) -> Vec<Proposition> {
        self.graph.borrow().propositions.iter().cloned().collect()
    }

    /// Independent deep copy of the backing graph.
    pub fn snapshot(&self) -> ArgumentSet {
        ArgumentSet {
            graph: Rc::new(RefCell::new(self.graph.borrow().clone())),
        }
    }

    /// Plain-text listing of the graph; `debug` adds the proposition
    /// inventory.
    pub fn render(&self, debug: bool) -> String {
        let graph = self.graph.borrow();
        let mut out = String::new();
        for argument in &graph.arguments {
            let _ = writeln!(out, "argument {}: {}", argument.id, argument);
        }
        if debug {
            for p in &graph.propositions {
                let _ = writeln!(out, "proposition {p}");
            }
        }
        out
    }

    /// Graphviz rendering: box nodes for propositions, ellipse nodes
    /// for arguments, dashed edges for exceptions.
    pub fn to_dot(&self) -> String {
        let graph = self.graph.borrow();
        let mut out = String::from("digraph argument_set {\n    rankdir=RL;\n");
        for p in &graph.propositions {
            let _ = writeln!(out, "    \"{p}\" [shape=box];");
        }
        for argument in &graph.arguments {
            let node = format!("arg:{}", argument.id);
            let _ = writeln!(out, "    \"{node}\" [shape=ellipse];");
            let _ = writeln!(out, "    \"{node}\" -> \"{}\";", argument.conclusion);
            for premise in &argument.premises {
                let _ = writeln!(out, "    \"{premise}\" -> \"{node}\";");
            }
            for exception in &argument.exceptions {
                let _ = writeln!(out, "    \"{exception}\" -> \"{node}\" [style=dashed];");
            }
        }
        out.push_str("}\n");
        out
    }
}
