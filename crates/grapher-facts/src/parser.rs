//! Scan free text for `name(arg).` and `name(arg1, arg2).` facts

use crate::config::ExtractorConfig;
use crate::types::{Arguments, Extraction, Fact};
use regex::{Captures, Regex};
use std::borrow::Cow;
use std::sync::OnceLock;
use tracing::{debug, trace};

/// One or two arguments, each either a non-empty `'quoted'` payload or a
/// bareword. A bareword cannot open with a quote, so `'it\'s'` is rejected
/// instead of being read as a bareword with quotes in it.
///
/// The name is not anchored: in `_hidden(x).` the scan finds `hidden(x).`.
static FACT_PATTERN: OnceLock<Regex> = OnceLock::new();

#[allow(clippy::expect_used)]
fn fact_pattern() -> &'static Regex {
    FACT_PATTERN.get_or_init(|| {
        Regex::new(
            r"(?x)
            (?P<name> [A-Za-z][A-Za-z0-9_]* )
            \s* \( \s*
            (?: '(?P<q1>[^']+)' | (?P<b1>[^\s,)'][^\s,)]*) )
            (?:
                \s* , \s*
                (?: '(?P<q2>[^']+)' | (?P<b2>[^\s,)'][^\s,)]*) )
            )?
            \s* \) \s* \.
            ",
        )
        .expect("fact pattern is a valid literal regex")
    })
}

/// Iterate over every recognized fact in `text`, left to right.
///
/// Matches never overlap. Fragments that do not fit the fact grammar,
/// including facts with zero or more than two arguments, are skipped.
pub fn facts(text: &str) -> impl Iterator<Item = Fact> + '_ {
    fact_pattern()
        .captures_iter(text)
        .filter_map(|caps| fact_from_captures(&caps))
}

fn fact_from_captures(caps: &Captures<'_>) -> Option<Fact> {
    let name = caps.name("name")?.as_str().to_string();
    let first = argument(caps, "q1", "b1")?;
    let arguments = match argument(caps, "q2", "b2") {
        Some(second) => Arguments::Binary(first, second),
        None => Arguments::Unary(first),
    };
    Some(Fact { name, arguments })
}

fn argument(caps: &Captures<'_>, quoted: &str, bare: &str) -> Option<String> {
    caps.name(quoted)
        .or_else(|| caps.name(bare))
        .map(|m| m.as_str().to_string())
}

/// Extract arity 1 and arity 2 facts from `text` in a single pass.
///
/// # Examples
///
/// ```
/// use grapher_facts::{extract, Relation};
///
/// let extraction = extract("pred1('arg1'). pred2(arg2, 'arg3'). pred1(arg1).");
///
/// assert_eq!(extraction.arity1["pred1"].len(), 1);
/// assert_eq!(extraction.arity2, vec![Relation::new("pred2", "arg2", "arg3")]);
/// ```
pub fn extract(text: &str) -> Extraction {
    facts(text).collect()
}

/// Remove Markdown code fences that fact generators wrap around their output.
///
/// Every ```` ```prolog ```` marker is removed first, then every remaining
/// ```` ``` ````. The content between the fences is left untouched.
pub fn strip_code_fences(text: &str) -> String {
    text.replace("```prolog", "").replace("```", "")
}

/// Configurable fact extractor
#[derive(Debug, Clone, Default)]
pub struct FactExtractor {
    config: ExtractorConfig,
}

impl FactExtractor {
    /// Create a new extractor
    pub fn new(config: ExtractorConfig) -> Self {
        Self { config }
    }

    /// Extractor configuration
    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Extract facts from `text`, applying the configured pre-processing
    pub fn extract(&self, text: &str) -> Extraction {
        let text = if self.config.strip_code_fences && text.contains("```") {
            Cow::Owned(strip_code_fences(text))
        } else {
            Cow::Borrowed(text)
        };

        let extraction: Extraction = facts(&text)
            .inspect(|fact| trace!(arity = fact.arity(), fact = %fact, "matched fact"))
            .collect();

        debug!(
            predicates = extraction.arity1.len(),
            arity1 = extraction.arity1.values().map(|args| args.len()).sum::<usize>(),
            arity2 = extraction.arity2.len(),
            "extracted facts"
        );

        extraction
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(text: &str) -> Vec<Fact> {
        facts(text).collect()
    }

    #[test]
    fn test_facts_in_source_order() {
        let found = collect("b(x). a(y, z). c('w').");
        let names: Vec<&str> = found.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_quoted_argument_keeps_inner_spaces() {
        let found = collect("city('New York').");
        assert_eq!(found[0].arguments, Arguments::Unary("New York".to_string()));
    }

    #[test]
    fn test_bareword_keeps_punctuation() {
        let found = collect("version(v1.2-rc). email(a@b.c, x:y).");
        assert_eq!(found[0].arguments, Arguments::Unary("v1.2-rc".to_string()));
        assert_eq!(
            found[1].arguments,
            Arguments::Binary("a@b.c".to_string(), "x:y".to_string())
        );
    }

    #[test]
    fn test_zero_and_three_arguments_skipped() {
        assert!(collect("halt(). p().").is_empty());
        assert!(collect("p(a, b, c). q('a', 'b', 'c').").is_empty());
    }

    #[test]
    fn test_missing_period_skipped() {
        assert!(collect("p(a)\nq(b, c)").is_empty());
    }

    #[test]
    fn test_name_starts_at_first_letter() {
        let names: Vec<String> = collect("9lives(cat). _hidden(x). éa(y). lives9(dog).")
            .into_iter()
            .map(|f| f.name)
            .collect();
        assert_eq!(names, vec!["lives", "hidden", "a", "lives9"]);
    }

    #[test]
    fn test_suffix_name_keeps_arguments() {
        let found = collect("_hidden(x).");
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].arguments, Arguments::Unary("x".to_string()));
    }

    #[test]
    fn test_name_with_underscore_and_digits() {
        let found = collect("part_of_2(wheel, car).");
        assert_eq!(found[0].name, "part_of_2");
    }

    #[test]
    fn test_nested_terms_skipped() {
        assert!(collect("p(f(x)). q(g(a), b).").is_empty());
    }

    #[test]
    fn test_empty_quotes_skipped() {
        assert!(collect("p('').").is_empty());
    }

    #[test]
    fn test_escaped_quote_unsupported() {
        assert!(collect(r"said('it\'s').").is_empty());
    }

    #[test]
    fn test_bareword_with_inner_quote() {
        let found = collect("said(it's).");
        assert_eq!(found[0].arguments, Arguments::Unary("it's".to_string()));
    }

    #[test]
    fn test_fact_spanning_lines() {
        let found = collect("relation(\n    'a',\n    'b'\n)\n.");
        assert_eq!(
            found[0].arguments,
            Arguments::Binary("a".to_string(), "b".to_string())
        );
    }

    #[test]
    fn test_facts_in_prose() {
        let text = "The notes say person(ada). and then, later, knows(ada, babbage). Done.";
        let found = collect(text);
        assert_eq!(found.len(), 2);
        assert_eq!(found[1].name, "knows");
    }

    #[test]
    fn test_strip_code_fences() {
        let text = "```prolog\nperson(ada).\n```\n";
        assert_eq!(strip_code_fences(text), "\nperson(ada).\n\n");
        assert_eq!(strip_code_fences("no fences"), "no fences");
    }

    #[test]
    fn test_extractor_strips_fences_when_configured() {
        let text = "```prolog\nknows(```ada```, babbage).\n```";
        let extractor = FactExtractor::new(ExtractorConfig {
            strip_code_fences: true,
        });
        assert_eq!(extractor.extract(text).arity2[0].subject, "ada");
        assert_eq!(extract(text).arity2[0].subject, "```ada```");
    }

    #[test]
    fn test_default_extractor_matches_free_function() {
        let text = "p(a). q(a, b). p(b). q(a, b).";
        assert_eq!(FactExtractor::default().extract(text), extract(text));
    }
}
