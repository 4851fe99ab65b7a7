//! End-to-end fact generation with the mock provider

use grapher_facts::prompt::DEFAULT_ONTOLOGY;
use grapher_facts::{
    ChunkStrategy, FactGenerator, GeneratorConfig, Relation, TextChunker,
};
use grapher_llm::MockProvider;

#[test]
fn test_generated_facts_extract_cleanly() {
    let mut provider = MockProvider::default();
    provider.add_response(
        "Ada Lovelace worked with Charles Babbage.",
        "```prolog\nworked_with('Ada Lovelace', 'Charles Babbage').\n```",
    );
    provider.add_response(
        "Babbage designed the Analytical Engine.",
        "```prolog\ndesigned('Charles Babbage', 'Analytical Engine').\n```",
    );
    let generator = FactGenerator::new(provider.clone(), GeneratorConfig::default());
    let chunker = TextChunker::new(ChunkStrategy::ByParagraph, 60);

    let generation = generator.generate_from_text(
        "Ada Lovelace worked with Charles Babbage.\n\nBabbage designed the Analytical Engine.",
        &chunker,
    );

    assert_eq!(generation.chunks, 2);
    assert!(generation.failures.is_empty());
    assert_eq!(
        generation.extraction().arity2,
        vec![
            Relation::new("worked_with", "Ada Lovelace", "Charles Babbage"),
            Relation::new("designed", "Charles Babbage", "Analytical Engine"),
        ]
    );
    assert_eq!(provider.call_count(), 2);
    assert!(provider.calls()[0].0.contains(DEFAULT_ONTOLOGY));
}

#[test]
fn test_provider_error_becomes_error_line() {
    let mut provider = MockProvider::new("p(a, b).");
    provider.add_error("second");
    let generator = FactGenerator::new(provider, GeneratorConfig::default());

    let generation = generator.generate_facts(&["first".to_string(), "second".to_string()]);

    assert_eq!(generation.facts, "p(a, b).\nError: LLM error: Mock error\n");
    assert_eq!(generation.failures.len(), 1);
    assert_eq!(generation.failures[0].chunk, 2);
    assert_eq!(generation.extraction().arity2.len(), 1);
}
