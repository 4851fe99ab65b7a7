//! Fact and extraction result types

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// Predicate name → distinct arguments of its arity 1 facts.
///
/// Membership has set semantics. Insertion order (first occurrence in the
/// source) is kept only so that rendered output is stable between runs.
pub type Arity1Index = IndexMap<String, IndexSet<String>>;

/// Arguments of a recognized fact
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Arguments {
    /// `name(arg).`
    Unary(String),
    /// `name(arg1, arg2).`
    Binary(String, String),
}

/// A single parsed occurrence of `name(args).`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fact {
    /// Predicate name
    pub name: String,

    /// Arguments with quote markers stripped
    pub arguments: Arguments,
}

impl Fact {
    /// Number of arguments (1 or 2)
    pub fn arity(&self) -> usize {
        match self.arguments {
            Arguments::Unary(_) => 1,
            Arguments::Binary(_, _) => 2,
        }
    }
}

/// Render an argument so that it reads back as the same value: barewords
/// stay bare, anything else is single-quoted.
fn display_argument(arg: &str) -> Cow<'_, str> {
    let bare = !arg.is_empty()
        && !arg.starts_with('\'')
        && !arg.contains(|c: char| c.is_whitespace() || c == ',' || c == ')');
    if bare {
        Cow::Borrowed(arg)
    } else {
        Cow::Owned(format!("'{}'", arg))
    }
}

impl fmt::Display for Fact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.arguments {
            Arguments::Unary(arg) => write!(f, "{}({}).", self.name, display_argument(arg)),
            Arguments::Binary(a, b) => write!(
                f,
                "{}({}, {}).",
                self.name,
                display_argument(a),
                display_argument(b)
            ),
        }
    }
}

/// An arity 2 fact: `predicate(subject, object).`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Relation {
    /// Predicate name
    pub predicate: String,

    /// First argument
    pub subject: String,

    /// Second argument
    pub object: String,
}

impl Relation {
    /// Create a relation from its three parts
    pub fn new(
        predicate: impl Into<String>,
        subject: impl Into<String>,
        object: impl Into<String>,
    ) -> Self {
        Self {
            predicate: predicate.into(),
            subject: subject.into(),
            object: object.into(),
        }
    }
}

impl From<(String, String, String)> for Relation {
    fn from((predicate, subject, object): (String, String, String)) -> Self {
        Self {
            predicate,
            subject,
            object,
        }
    }
}

impl From<Relation> for (String, String, String) {
    fn from(relation: Relation) -> Self {
        (relation.predicate, relation.subject, relation.object)
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}({}, {}).",
            self.predicate,
            display_argument(&self.subject),
            display_argument(&self.object)
        )
    }
}

/// Result of extracting facts from one text
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extraction {
    /// Arity 1 facts, deduplicated per predicate
    pub arity1: Arity1Index,

    /// Arity 2 facts in source order, duplicates kept
    pub arity2: Vec<Relation>,
}

impl Extraction {
    /// Route one fact to the collection matching its arity
    pub fn insert(&mut self, fact: Fact) {
        match fact.arguments {
            Arguments::Unary(arg) => {
                self.arity1.entry(fact.name).or_default().insert(arg);
            }
            Arguments::Binary(subject, object) => {
                self.arity2.push(Relation {
                    predicate: fact.name,
                    subject,
                    object,
                });
            }
        }
    }

    /// True when no fact was extracted
    pub fn is_empty(&self) -> bool {
        self.arity1.is_empty() && self.arity2.is_empty()
    }

    /// Distinct arity 1 entries plus all arity 2 entries
    pub fn fact_count(&self) -> usize {
        self.arity1.values().map(IndexSet::len).sum::<usize>() + self.arity2.len()
    }

    /// Find the first arity 1 predicate whose argument set holds `argument`
    pub fn category_of(&self, argument: &str) -> Option<&str> {
        self.arity1
            .iter()
            .find(|(_, args)| args.contains(argument))
            .map(|(name, _)| name.as_str())
    }

    /// Split into the arity 1 index and the arity 2 triples
    pub fn into_parts(self) -> (Arity1Index, Vec<(String, String, String)>) {
        let triples = self.arity2.into_iter().map(Into::into).collect();
        (self.arity1, triples)
    }
}

impl FromIterator<Fact> for Extraction {
    fn from_iter<I: IntoIterator<Item = Fact>>(iter: I) -> Self {
        let mut extraction = Extraction::default();
        for fact in iter {
            extraction.insert(fact);
        }
        extraction
    }
}
