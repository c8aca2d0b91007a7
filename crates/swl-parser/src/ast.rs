//! Owned AST for a swl program.
//!
//! The grammar is closed: a program is exactly one `switch`, whose body is a
//! list of `case` branches and one `default`, each holding `print` actions.
//! The tree cannot express nested switches.
//!
//! [`Node`] is a borrowed view over the four node kinds. Tree walkers match
//! on it exhaustively, so adding a node kind forces every walker to handle it.

use serde::Serialize;
use swl_common::token::Token;

/// `switch (I) { case* default }`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Switch {
    /// The token inside `switch (...)`. Should be the identifier `I`.
    pub variable: Token,
    pub cases: Vec<Case>,
    /// `None` when the `default` branch is missing from the source.
    pub default: Option<DefaultBranch>,
}

/// `case N: print+ break;`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Case {
    /// The `NUMBER` token after `case`.
    pub value: Token,
    pub actions: Vec<Print>,
}

/// `default: print+`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DefaultBranch {
    pub actions: Vec<Print>,
}

/// `print("text");`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Print {
    /// The string literal; its lexeme is the text without quotes.
    pub text: Token,
}

impl Print {
    pub fn text(&self) -> &str {
        &self.text.lexeme
    }
}

/// A reference to any node in the tree.
#[derive(Debug, Clone, Copy)]
pub enum Node<'a> {
    Switch(&'a Switch),
    Case(&'a Case),
    Default(&'a DefaultBranch),
    Print(&'a Print),
}

impl<'a> Node<'a> {
    /// Direct children in source order.
    pub fn children(self) -> Vec<Node<'a>> {
        match self {
            Node::Switch(switch) => switch
                .cases
                .iter()
                .map(Node::Case)
                .chain(switch.default.iter().map(Node::Default))
                .collect(),
            Node::Case(case) => case.actions.iter().map(Node::Print).collect(),
            Node::Default(default) => default.actions.iter().map(Node::Print).collect(),
            Node::Print(_) => Vec::new(),
        }
    }
}

impl Switch {
    pub fn as_node(&self) -> Node<'_> {
        Node::Switch(self)
    }

    /// Case value lexemes in declaration order.
    pub fn case_values(&self) -> Vec<&str> {
        self.cases.iter().map(|c| c.value.lexeme.as_str()).collect()
    }
}

/// Shape of a tree with positions and lexeme spelling ignored: the case
/// values and the action texts of every branch. Two parses of the same
/// program laid out differently have equal shapes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shape {
    pub variable: String,
    pub cases: Vec<(String, Vec<String>)>,
    pub default: Option<Vec<String>>,
}

impl Shape {
    pub fn of(switch: &Switch) -> Self {
        let texts = |actions: &[Print]| actions.iter().map(|p| p.text().to_string()).collect();
        Shape {
            variable: switch.variable.lexeme.clone(),
            cases: switch
                .cases
                .iter()
                .map(|c| (c.value.lexeme.clone(), texts(&c.actions)))
                .collect(),
            default: switch.default.as_ref().map(|d| texts(&d.actions)),
        }
    }
}
