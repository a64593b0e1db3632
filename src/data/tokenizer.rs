// ============================================================
// Layer 4 — Treebank Word Tokenizer
// ============================================================
// Splits review text into word and punctuation tokens using the
// Penn Treebank conventions GloVe's vocabulary was built with:
//
//   "i don't like it, really."  →  i | do | n't | like | it | , | really | .
//   "\"wow\" (truly)"           →  `` | wow | '' | ( | truly | )
//
// The text is first cut into sentences at runs of . ! ? that
// are followed by whitespace, so the final period of every
// sentence becomes its own token. Each sentence then goes
// through the regex substitution passes below, in order, and
// the result is split on whitespace.
//
// Abbreviations are not special-cased: "mr. smith" yields
// "mr" | "." | "smith".
//
// Reference: Penn Treebank tokenization guidelines
//            regex crate documentation

use std::sync::OnceLock;

use regex::Regex;

use crate::domain::traits::WordTokenizer;

/// One substitution pass: every match of `pattern` becomes `replacement`.
struct Rule {
    pattern:     Regex,
    replacement: &'static str,
}

fn re(s: &str) -> Regex {
    Regex::new(s).expect("built-in tokenizer regex must compile")
}

fn rule(pattern: &str, replacement: &'static str) -> Rule {
    Rule { pattern: re(pattern), replacement }
}

/// Sentence boundary: terminal punctuation, optional closers, whitespace
fn sentence_end() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| re(r#"[.!?]+["')\]]*\s+"#))
}

/// Quotes at the start of words
fn starting_quotes() -> &'static [Rule] {
    static RULES: OnceLock<Vec<Rule>> = OnceLock::new();
    RULES.get_or_init(|| {
        vec![
            rule(r"([«“‘„]|`+)", " ${1} "),
            rule(r#"^""#, "``"),
            rule(r"(``)", " ${1} "),
            rule(r#"([ (\[{<])("|'')"#, "${1} `` "),
            // a quote opening a one-letter word, unless it reads as a clitic
            rule(r"(')([\w&&[^mtsdnMTSDN]])\b", "${1} ${2}"),
        ]
    })
}

fn punctuation() -> &'static [Rule] {
    static RULES: OnceLock<Vec<Rule>> = OnceLock::new();
    RULES.get_or_init(|| {
        vec![
            rule(r#"([^.])(\.)([\])}>"']*)\s*$"#, "${1} ${2} ${3} "),
            rule(r"([:,])([^\d])", " ${1} ${2}"),
            rule(r"([:,])$", " ${1} "),
            rule(r"\.{2,}", " ${0} "),
            rule(r"[;@#$%&]", " ${0} "),
            rule(r#"([^.])(\.)([\])}>"']*)\s*$"#, "${1} ${2}${3} "),
            rule(r"[?!]", " ${0} "),
            rule(r"([^'])' ", "${1} ' "),
            rule(r"\*", " ${0} "),
            // parentheses and brackets
            rule(r"[\]\[(){}<>]", " ${0} "),
            // double dashes
            rule(r"--", " -- "),
        ]
    })
}

/// Closing quotes and clitics; the text is padded with spaces first
fn ending_quotes() -> &'static [Rule] {
    static RULES: OnceLock<Vec<Rule>> = OnceLock::new();
    RULES.get_or_init(|| {
        vec![
            rule(r"([»”’])", " ${1} "),
            rule(r"''", " '' "),
            rule(r#"""#, " '' "),
            rule(r"([^' ])('[sS]|'[mM]|'[dD]|') ", "${1} ${2} "),
            rule(r"([^' ])('ll|'LL|'re|'RE|'ve|'VE|n't|N'T) ", "${1} ${2} "),
        ]
    })
}

/// Fused words split into two tokens: cannot, gonna, 'tis, ...
fn contractions() -> &'static [Rule] {
    static RULES: OnceLock<Vec<Rule>> = OnceLock::new();
    RULES.get_or_init(|| {
        vec![
            rule(r"(?i)\b(can)(not)\b", " ${1} ${2} "),
            rule(r"(?i)\b(d)('ye)\b", " ${1} ${2} "),
            rule(r"(?i)\b(gim)(me)\b", " ${1} ${2} "),
            rule(r"(?i)\b(gon)(na)\b", " ${1} ${2} "),
            rule(r"(?i)\b(got)(ta)\b", " ${1} ${2} "),
            rule(r"(?i)\b(lem)(me)\b", " ${1} ${2} "),
            rule(r"(?i)\b(more)('n)\b", " ${1} ${2} "),
            rule(r"(?i)\b(wan)(na)(\s)", " ${1} ${2}${3}"),
            rule(r"(?i) ('t)(is)\b", " ${1} ${2} "),
            rule(r"(?i) ('t)(was)\b", " ${1} ${2} "),
        ]
    })
}

fn apply(rules: &[Rule], text: String) -> String {
    rules.iter().fold(text, |acc, r| {
        r.pattern.replace_all(&acc, r.replacement).into_owned()
    })
}

/// Cut `text` after every sentence-final punctuation run.
fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start     = 0usize;
    for m in sentence_end().find_iter(text) {
        let end = m.start() + m.as_str().trim_end().len();
        sentences.push(&text[start..end]);
        start = m.end();
    }
    if start < text.len() {
        sentences.push(&text[start..]);
    }
    sentences
}

// ─── TreebankTokenizer ────────────────────────────────────────────────────────
/// Penn-Treebank style word tokenizer. Stateless; the compiled
/// rules are shared process-wide.
#[derive(Debug, Clone, Copy, Default)]
pub struct TreebankTokenizer;

impl TreebankTokenizer {
    pub fn new() -> Self {
        Self
    }

    fn tokenize_sentence(&self, sentence: &str, out: &mut Vec<String>) {
        let text = apply(starting_quotes(), sentence.to_string());
        let text = apply(punctuation(), text);
        let text = apply(ending_quotes(), format!(" {text} "));
        let text = apply(contractions(), text);
        out.extend(text.split_whitespace().map(str::to_string));
    }
}

impl WordTokenizer for TreebankTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        let mut tokens = Vec::new();
        for sentence in split_sentences(text) {
            self.tokenize_sentence(sentence, &mut tokens);
        }
        tokens
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn tok(text: &str) -> Vec<String> {
        TreebankTokenizer::new().tokenize(text)
    }

    #[test]
    fn test_plain_words() {
        assert_eq!(tok("good movie good"), ["good", "movie", "good"]);
    }

    #[test]
    fn test_empty_and_blank_text() {
        assert!(tok("").is_empty());
        assert!(tok("   \n ").is_empty());
    }

    #[test]
    fn test_punctuation_is_split_off() {
        assert_eq!(
            tok("good movie, really good."),
            ["good", "movie", ",", "really", "good", "."]
        );
        assert_eq!(tok("what?! no"), ["what", "?", "!", "no"]);
        assert_eq!(tok("(brilliant)"), ["(", "brilliant", ")"]);
    }

    #[test]
    fn test_contractions_are_split() {
        assert_eq!(tok("i don't like it"), ["i", "do", "n't", "like", "it"]);
        assert_eq!(tok("i can't believe it"), ["i", "ca", "n't", "believe", "it"]);
        assert_eq!(tok("it's great"), ["it", "'s", "great"]);
        assert_eq!(tok("we'll see"), ["we", "'ll", "see"]);
        assert_eq!(tok("i cannot"), ["i", "can", "not"]);
    }

    #[test]
    fn test_quotes_are_normalised() {
        assert_eq!(tok("\"wow\" she said"), ["``", "wow", "''", "she", "said"]);
    }

    #[test]
    fn test_quote_before_single_letter_word_is_split() {
        assert_eq!(tok("an 'x rated film"), ["an", "'", "x", "rated", "film"]);
        assert_eq!(tok("'a grade"), ["'", "a", "grade"]);
        // clitic letters stay attached
        assert_eq!(tok("i'm in"), ["i", "'m", "in"]);
        assert_eq!(tok("he'd go"), ["he", "'d", "go"]);
        // longer words are left alone
        assert_eq!(tok("'hello there"), ["'hello", "there"]);
    }

    #[test]
    fn test_every_sentence_ends_with_a_period_token() {
        assert_eq!(
            tok("great film. loved it."),
            ["great", "film", ".", "loved", "it", "."]
        );
    }

    #[test]
    fn test_numbers_keep_their_commas() {
        assert_eq!(tok("3,000 extras"), ["3,000", "extras"]);
    }

    #[test]
    fn test_ellipsis_is_one_token() {
        assert_eq!(tok("wait... what"), ["wait", "...", "what"]);
    }

    #[test]
    fn test_split_sentences() {
        assert_eq!(split_sentences("a b. c d! e"), ["a b.", "c d!", "e"]);
        assert_eq!(split_sentences("no boundary"), ["no boundary"]);
    }
}
