//! Built-in rule tables.

mod english;
mod serbian;

use msf_protocol::{LemmaValue, RuleTables};

pub const BUILTIN: [&str; 3] = ["eng", "eng-case", "srp"];

pub fn builtin(language: &str) -> Option<RuleTables> {
    match language {
        "eng" => Some(english::tables()),
        "eng-case" => Some(english::case_only_tables()),
        "srp" => Some(serbian::tables()),
        _ => None,
    }
}

fn lemma_values(pairs: &[(&str, &str)]) -> Vec<LemmaValue> {
    pairs.iter().map(|(lemma, value)| LemmaValue::new(lemma, value)).collect()
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|item| item.to_string()).collect()
}
