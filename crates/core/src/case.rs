//! Case conversion across the nine supported naming conventions
//!
//! Word characters follow the ASCII definition (`[A-Za-z0-9_]`). Anything
//! else, including accented letters, counts as a separator when splitting
//! into words.

use serde::Serialize;

/// A named case transform
#[derive(Clone, Copy, Serialize)]
pub struct CaseConversion {
    pub name: &'static str,
    pub id: &'static str,
    #[serde(skip)]
    pub convert: fn(&str) -> String,
    pub example: &'static str,
}

/// Every supported conversion
pub static CONVERSIONS: [CaseConversion; 9] = [
    CaseConversion {
        name: "camelCase",
        id: "camel",
        convert: to_camel_case,
        example: "helloWorldExample",
    },
    CaseConversion {
        name: "PascalCase",
        id: "pascal",
        convert: to_pascal_case,
        example: "HelloWorldExample",
    },
    CaseConversion {
        name: "snake_case",
        id: "snake",
        convert: to_snake_case,
        example: "hello_world_example",
    },
    CaseConversion {
        name: "kebab-case",
        id: "kebab",
        convert: to_kebab_case,
        example: "hello-world-example",
    },
    CaseConversion {
        name: "UPPER_CASE",
        id: "upper",
        convert: to_constant_case,
        example: "HELLO_WORLD_EXAMPLE",
    },
    CaseConversion {
        name: "lowercase",
        id: "lower",
        convert: to_lower_case,
        example: "hello world example",
    },
    CaseConversion {
        name: "UPPERCASE",
        id: "upperall",
        convert: to_upper_case,
        example: "HELLO WORLD EXAMPLE",
    },
    CaseConversion {
        name: "Title Case",
        id: "title",
        convert: to_title_case,
        example: "Hello World Example",
    },
    CaseConversion {
        name: "Sentence case",
        id: "sentence",
        convert: to_sentence_case,
        example: "Hello world example",
    },
];

/// Output of one registry entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConvertedCase {
    pub name: &'static str,
    pub id: &'static str,
    pub output: String,
}

/// Look up a conversion by id
pub fn find_conversion(id: &str) -> Option<&'static CaseConversion> {
    CONVERSIONS.iter().find(|conversion| conversion.id == id)
}

/// Convert `text` with the conversion named `id`
///
/// Unknown ids return the input unchanged.
pub fn convert(text: &str, id: &str) -> String {
    match find_conversion(id) {
        Some(conversion) => (conversion.convert)(text),
        None => text.to_string(),
    }
}

/// Run every registered conversion over `text`
pub fn convert_all(text: &str) -> Vec<ConvertedCase> {
    CONVERSIONS
        .iter()
        .map(|conversion| ConvertedCase {
            name: conversion.name,
            id: conversion.id,
            output: (conversion.convert)(text),
        })
        .collect()
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

// ============================================================================
// Boundary recasing (camel, Pascal)
// ============================================================================

/// Recase every char that starts a word or is an uppercase letter, then drop
/// whitespace. Only those chars are touched: `HELLO world` stays shouty.
fn recase_boundaries(text: &str, lower_first: bool) -> String {
    let mut result = String::with_capacity(text.len());
    let mut prev: Option<char> = None;

    for (index, c) in text.char_indices() {
        let at_boundary = is_word_char(c) && !prev.is_some_and(is_word_char);
        if at_boundary || c.is_ascii_uppercase() {
            if index == 0 && lower_first {
                result.extend(c.to_lowercase());
            } else {
                result.extend(c.to_uppercase());
            }
        } else if !c.is_whitespace() {
            result.push(c);
        }
        prev = Some(c);
    }

    result
}

pub fn to_camel_case(text: &str) -> String {
    recase_boundaries(text, true)
}

pub fn to_pascal_case(text: &str) -> String {
    recase_boundaries(text, false)
}

// ============================================================================
// Word splitting (snake, kebab, UPPER_CASE)
// ============================================================================

/// Collapse non-word runs into single spaces, then split on spaces and on
/// lower-to-upper camel boundaries.
///
/// Leading or trailing separators produce empty words, so `" hi "` splits
/// into `["", "hi", ""]`.
fn split_words(text: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut prev_is_word = false;
    let mut in_separator = false;

    for c in text.chars() {
        if !is_word_char(c) {
            if !in_separator {
                words.push(std::mem::take(&mut current));
                in_separator = true;
            }
            prev_is_word = false;
            continue;
        }

        if c.is_ascii_uppercase() && prev_is_word {
            words.push(std::mem::take(&mut current));
        }
        current.push(c);
        prev_is_word = true;
        in_separator = false;
    }
    words.push(current);

    words
}

fn join_words(text: &str, separator: &str, upper: bool) -> String {
    split_words(text)
        .iter()
        .map(|word| {
            if upper {
                word.to_uppercase()
            } else {
                word.to_lowercase()
            }
        })
        .collect::<Vec<_>>()
        .join(separator)
}

pub fn to_snake_case(text: &str) -> String {
    join_words(text, "_", false)
}

pub fn to_kebab_case(text: &str) -> String {
    join_words(text, "-", false)
}

/// `UPPER_CASE`, a.k.a. constant case
pub fn to_constant_case(text: &str) -> String {
    join_words(text, "_", true)
}

// ============================================================================
// Whole-string conversions
// ============================================================================

pub fn to_lower_case(text: &str) -> String {
    text.to_lowercase()
}

pub fn to_upper_case(text: &str) -> String {
    text.to_uppercase()
}

/// Capitalize every run that starts with a word char and extends to the next
/// whitespace; the rest of the run is lowercased.
pub fn to_title_case(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut in_word = false;

    for c in text.chars() {
        if c.is_whitespace() {
            in_word = false;
            result.push(c);
        } else if in_word {
            result.extend(c.to_lowercase());
        } else if is_word_char(c) {
            in_word = true;
            result.extend(c.to_uppercase());
        } else {
            result.push(c);
        }
    }

    result
}

pub fn to_sentence_case(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => {
            let mut sentence: String = first.to_uppercase().collect();
            sentence.push_str(&chars.as_str().to_lowercase());
            sentence
        }
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "hello world example";

    // ============================================================================
    // Registry tests
    // ============================================================================

    #[test]
    fn test_registry_examples_match_sample() {
        for conversion in CONVERSIONS.iter() {
            assert_eq!(
                (conversion.convert)(SAMPLE),
                conversion.example,
                "conversion {} disagrees with its example",
                conversion.id
            );
        }
    }

    #[test]
    fn test_registry_ids_are_unique() {
        let mut ids: Vec<&str> = CONVERSIONS.iter().map(|c| c.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), CONVERSIONS.len());
    }

    #[test]
    fn test_convert_dispatches_by_id() {
        assert_eq!(convert(SAMPLE, "camel"), "helloWorldExample");
        assert_eq!(convert(SAMPLE, "kebab"), "hello-world-example");
    }

    #[test]
    fn test_convert_unknown_id_returns_input() {
        assert_eq!(convert("Some Text", "spongebob"), "Some Text");
    }

    #[test]
    fn test_convert_all_preserves_registry_order() {
        let outputs = convert_all("foo bar");
        assert_eq!(outputs.len(), 9);
        assert_eq!(outputs[0].id, "camel");
        assert_eq!(outputs[0].output, "fooBar");
        assert_eq!(outputs[8].id, "sentence");
        assert_eq!(outputs[8].output, "Foo bar");
    }

    #[test]
    fn test_empty_input_is_empty_for_every_conversion() {
        for conversion in CONVERSIONS.iter() {
            assert_eq!((conversion.convert)(""), "", "conversion {}", conversion.id);
        }
    }

    // ============================================================================
    // camelCase / PascalCase tests
    // ============================================================================

    #[test]
    fn test_camel_single_word() {
        assert_eq!(to_camel_case("hello"), "hello");
        assert_eq!(to_pascal_case("hello"), "Hello");
    }

    #[test]
    fn test_camel_from_pascal() {
        assert_eq!(to_camel_case("HelloWorld"), "helloWorld");
    }

    #[test]
    fn test_camel_from_snake_keeps_underscores() {
        // `_` is a word char, so `hello_world` has no inner word boundary.
        assert_eq!(to_camel_case("hello_world"), "hello_world");
    }

    #[test]
    fn test_camel_from_kebab_keeps_dashes() {
        assert_eq!(to_camel_case("hello-world"), "hello-World");
    }

    #[test]
    fn test_camel_only_touches_boundary_chars() {
        assert_eq!(to_camel_case("HELLO world"), "hELLOWorld");
    }

    #[test]
    fn test_camel_collapses_all_whitespace() {
        assert_eq!(to_camel_case("  foo \t bar\nbaz "), "FooBarBaz");
    }

    #[test]
    fn test_pascal_multi_word() {
        assert_eq!(to_pascal_case("the quick fox"), "TheQuickFox");
    }

    // ============================================================================
    // snake / kebab / UPPER_CASE tests
    // ============================================================================

    #[test]
    fn test_snake_from_camel() {
        assert_eq!(to_snake_case("helloWorldExample"), "hello_world_example");
    }

    #[test]
    fn test_snake_from_punctuation() {
        assert_eq!(to_snake_case("hello, world!"), "hello_world_");
    }

    #[test]
    fn test_snake_keeps_edge_separators() {
        assert_eq!(to_snake_case(" hi "), "_hi_");
    }

    #[test]
    fn test_snake_splits_every_capital() {
        assert_eq!(to_snake_case("HTTPServer"), "h_t_t_p_server");
    }

    #[test]
    fn test_snake_leading_capital_is_not_split() {
        assert_eq!(to_snake_case("Hello"), "hello");
    }

    #[test]
    fn test_kebab_from_pascal() {
        assert_eq!(to_kebab_case("HelloWorld"), "hello-world");
    }

    #[test]
    fn test_kebab_from_snake() {
        // `_` is a word char and survives as part of the word.
        assert_eq!(to_kebab_case("hello_world"), "hello_world");
    }

    #[test]
    fn test_constant_case() {
        assert_eq!(to_constant_case("helloWorld example"), "HELLO_WORLD_EXAMPLE");
    }

    #[test]
    fn test_non_ascii_letters_split_words() {
        assert_eq!(to_snake_case("café au lait"), "caf_au_lait");
    }

    // ============================================================================
    // Whole-string conversion tests
    // ============================================================================

    #[test]
    fn test_lower_and_upper() {
        assert_eq!(to_lower_case("Hello WORLD"), "hello world");
        assert_eq!(to_upper_case("Hello world"), "HELLO WORLD");
    }

    #[test]
    fn test_title_case() {
        assert_eq!(to_title_case("hELLO wORLD"), "Hello World");
    }

    #[test]
    fn test_title_case_runs_extend_to_whitespace() {
        assert_eq!(to_title_case("hello-WORLD foo"), "Hello-world Foo");
        assert_eq!(to_title_case("'quoted' text"), "'Quoted' Text");
    }

    #[test]
    fn test_sentence_case() {
        assert_eq!(to_sentence_case("hELLO World"), "Hello world");
        assert_eq!(to_sentence_case("x"), "X");
        assert_eq!(to_sentence_case(""), "");
    }
}
