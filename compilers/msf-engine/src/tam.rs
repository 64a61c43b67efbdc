//! Tense/aspect/mood/voice/polarity from auxiliaries and particles.

use std::collections::BTreeSet;

use msf_protocol::feature::{ASPECT, MOOD, POLARITY, TENSE, VERB_FORM, VOICE};
use msf_protocol::{FeatureMap, HigherCopula, NodeId, UposSet};
use msf_tree::Node;

use crate::error::{EngineError, OracleError, Result};
use crate::oracle::{Ambiguity, Answers, Choice, DecisionPoint, Resolution};
use crate::profile::LanguageProfile;

/// Everything the resolver may look at for one head.
#[derive(Debug, Clone)]
pub struct TamInput<'a> {
    pub head: &'a Node,
    /// TAM dependents in linear order.
    pub auxiliaries: &'a [Node],
    /// Earliest `nsubj`/`expl` dependent.
    pub first_subject: Option<NodeId>,
    pub question_mark: bool,
    /// Sentence text, for prompts.
    pub context: &'a str,
}

struct TamState<'p> {
    feats: FeatureMap,
    separator: &'p str,
}

impl<'p> TamState<'p> {
    fn new(separator: &'p str) -> Self {
        Self { feats: FeatureMap::new(), separator }
    }

    fn get(&self, name: &str) -> Option<&str> {
        self.feats.get(name).map(String::as_str).filter(|v| !v.is_empty())
    }

    fn set(&mut self, name: &str, value: &str) {
        self.feats.insert(name.to_string(), value.to_string());
    }

    fn set_if_absent(&mut self, name: &str, value: &str) {
        if self.get(name).is_none() {
            self.set(name, value);
        }
    }

    fn append(&mut self, name: &str, value: &str) {
        let separator = self.separator;
        let entry = self.feats.entry(name.to_string()).or_default();
        if !entry.is_empty() {
            entry.push_str(separator);
        }
        entry.push_str(value);
    }

    fn finish(mut self) -> FeatureMap {
        self.feats.retain(|_, value| !value.is_empty());
        self.feats
    }
}

fn first_with<'a>(input: &TamInput<'a>, lemma: &str) -> Option<&'a Node> {
    input.auxiliaries.iter().find(|aux| aux.lemma == lemma)
}

/// True when nothing but `lemma` and negation is left to consume.
fn only_left(profile: &LanguageProfile, lemmas: &BTreeSet<&str>, lemma: &str) -> bool {
    lemmas.iter().all(|l| *l == lemma || profile.is_negation(l))
}

fn is_past_participle(node: &Node) -> bool {
    node.feat(VERB_FORM) == Some("Part") && node.feat(TENSE) == Some("Past")
}

fn higher_copula<'a>(rule: &HigherCopula, copulas: &[&'a Node]) -> Option<&'a Node> {
    let picked = match rule {
        HigherCopula::First => None,
        HigherCopula::WithoutSuffix(suffix) => copulas.iter().find(|c| !c.form.ends_with(suffix.as_str())),
        HigherCopula::WithPrefix(prefix) => copulas.iter().find(|c| c.form.starts_with(prefix.as_str())),
    };
    picked.or_else(|| copulas.first()).copied()
}

fn out_of_range(head: NodeId, kind: Ambiguity, answer: Choice) -> EngineError {
    EngineError::AmbiguityUnresolved {
        head,
        source: OracleError::OutOfRange { answer, options: kind.options().to_vec() },
    }
}

fn children_forms(input: &TamInput<'_>) -> String {
    input.auxiliaries.iter().map(|aux| aux.form.as_str()).collect::<Vec<_>>().join(" ")
}

/// Runs the auxiliary rules in order. Returns `Pending` at the first question
/// not covered by `answers`; the caller asks and runs again.
pub fn resolve_tam(
    profile: &LanguageProfile,
    input: &TamInput<'_>,
    answers: &Answers,
) -> Result<Resolution<FeatureMap>> {
    let head = input.head;
    let verbal = head.is(UposSet::VERBAL);
    let lexicon = profile.auxiliaries();
    let mut state = TamState::new(profile.separator());
    let mut lemmas: BTreeSet<&str> = input.auxiliaries.iter().map(|aux| aux.lemma.as_str()).collect();
    let unhandled = |reason: &str, lemmas: &[&str]| {
        EngineError::unhandled(head.id, reason, lemmas.iter().map(|l| l.to_string()).collect())
    };

    // 1. Subject-auxiliary inversion
    let first_aux = input.auxiliaries.iter().map(|aux| aux.id).min();
    if let (Some(aux), Some(subject)) = (first_aux, input.first_subject) {
        if aux < subject {
            if input.question_mark {
                state.set(MOOD, "Int");
            } else {
                match answers.get(&Ambiguity::Inversion) {
                    None => {
                        let prompt = format!(
                            "Does \"{}\" head a question in \"{}\"?",
                            head.form, input.context
                        );
                        return Ok(Resolution::Pending(DecisionPoint::new(head.id, Ambiguity::Inversion, prompt)));
                    }
                    Some(Choice::Interrogative) => state.set(MOOD, "Int"),
                    Some(Choice::Conditional) => state.set(MOOD, "Cnd"),
                    Some(Choice::NoneOfTheAbove) => {}
                    Some(other) => return Err(out_of_range(head.id, Ambiguity::Inversion, *other)),
                }
            }
        }
    }

    // 2. Infinitive marker
    if let Some(marker) = lexicon.infinitive.as_deref() {
        if verbal {
            state.set(VERB_FORM, if lemmas.contains(marker) { "Inf" } else { "Fin" });
        }
        lemmas.remove(marker);
    }

    // 3. Provisional polarity
    let negated = lemmas.iter().any(|l| profile.is_negation(l));
    state.set(POLARITY, if negated { "Neg" } else { "Pos" });

    // 4. Do-support
    if let Some(lemma) = lexicon.do_support.as_deref().filter(|l| lemmas.contains(l)) {
        if !verbal {
            return Err(unhandled("do-support on a non-verbal head", &[lemma]));
        }
        if let Some(tense) = first_with(input, lemma).and_then(|aux| aux.feat(TENSE)) {
            state.set(TENSE, tense);
        }
        lemmas.remove(lemma);
    }

    // 5. Copula: progressive, passive or finite copula
    if let Some(lemma) = lexicon.copula.as_deref().filter(|l| lemmas.contains(l)) {
        let copulas: Vec<&Node> = input.auxiliaries.iter().filter(|aux| aux.lemma == lemma).collect();
        let higher = match copulas.as_slice() {
            [single] => {
                if verbal {
                    let form = head.feat(VERB_FORM);
                    let tense = head.feat(TENSE);
                    if form == Some("Ger") || (form == Some("Part") && tense == Some("Pres")) {
                        state.set(ASPECT, "Prog");
                    } else if is_past_participle(head) {
                        state.set(VOICE, "Pass");
                    } else if lexicon.copula_finite_fallback {
                        state.set(TENSE, single.feat(TENSE).unwrap_or("Pres"));
                        state.set(MOOD, single.feat(MOOD).unwrap_or("Ind"));
                        state.set_if_absent(ASPECT, "Imp");
                    } else {
                        return Err(unhandled("copular auxiliary on a non-participle verb", &[lemma]));
                    }
                }
                Some(*single)
            }
            [_, _] => {
                state.set(ASPECT, "Prog");
                if verbal {
                    state.set(VOICE, "Pass");
                }
                higher_copula(&lexicon.higher_copula, &copulas)
            }
            _ => return Err(unhandled("three or more copular auxiliaries", &[lemma])),
        };

        if verbal {
            state.set_if_absent(VOICE, "Act");
        }

        if let Some(higher) = higher {
            if only_left(profile, &lemmas, lemma) && state.get(VERB_FORM) != Some("Inf") {
                if let Some(tense) = higher.feat(TENSE) {
                    state.set(TENSE, tense);
                }
                if !verbal {
                    if let Some(mood) = higher.feat(MOOD) {
                        state.set_if_absent(MOOD, mood);
                    }
                    if let Some(form) = higher.feat(VERB_FORM) {
                        state.set_if_absent(VERB_FORM, form);
                    }
                }
            }
        }
        lemmas.remove(lemma);
    }

    // 6. Get-passive
    if let Some(lemma) = lexicon.get_passive.as_deref().filter(|l| lemmas.contains(l)) {
        let node = match first_with(input, lemma) {
            Some(node) if node.deprel.contains("pass") => node,
            _ => return Err(unhandled("get-auxiliary without a passive relation", &[lemma])),
        };
        state.set(VOICE, "Pass");
        if only_left(profile, &lemmas, lemma) {
            if let Some(tense) = node.feat(TENSE) {
                state.set(TENSE, tense);
            }
            if let Some(form) = node.feat(VERB_FORM) {
                state.set(VERB_FORM, form);
            }
        }
        lemmas.remove(lemma);
    }

    // 7. Perfect
    if let Some(lemma) = lexicon.perfect.as_deref().filter(|l| lemmas.contains(l)) {
        if verbal && !is_past_participle(head) {
            return Err(unhandled("perfect auxiliary on a non-participle verb", &[lemma]));
        }
        state.append(ASPECT, "Perf");
        if only_left(profile, &lemmas, lemma) && state.get(VERB_FORM) != Some("Inf") {
            if let Some(tense) = first_with(input, lemma).and_then(|aux| aux.feat(TENSE)) {
                state.set(TENSE, tense);
            }
        }
        lemmas.remove(lemma);
    }

    // 8. Future
    if let Some(lemma) = lexicon.future.as_deref().filter(|l| lemmas.contains(l)) {
        state.set(TENSE, "Fut");
        lemmas.remove(lemma);
    }

    // 9. Conditional or future in the past
    if let Some(lemma) = lexicon.conditional.as_deref().filter(|l| lemmas.contains(l)) {
        match answers.get(&Ambiguity::ConditionalAux) {
            None => {
                let prompt = format!(
                    "What does \"{}\" stand for in \"{}\"?\nhead: \"{}\"\nauxiliaries: \"{}\"",
                    lemma,
                    input.context,
                    head.form,
                    children_forms(input)
                );
                return Ok(Resolution::Pending(DecisionPoint::new(head.id, Ambiguity::ConditionalAux, prompt)));
            }
            Some(Choice::Conditional) => state.append(MOOD, "Cnd"),
            Some(Choice::FutureInPast) => {
                state.set(TENSE, "Past");
                state.append(ASPECT, "Prosp");
            }
            Some(other) => return Err(out_of_range(head.id, Ambiguity::ConditionalAux, *other)),
        }
        lemmas.remove(lemma);
    }

    // 10. Modality
    let modals: Vec<&str> = lemmas.iter().copied().filter(|l| profile.modality(l).is_some()).collect();
    if let Some(last) = modals.last() {
        if let Some(lemma) = lexicon.past_modal.as_deref().filter(|l| lemmas.contains(l)) {
            match answers.get(&Ambiguity::PastModal) {
                None => {
                    let prompt = format!(
                        "What does \"{}\" stand for in \"{}\"?\nhead: \"{}\"\nauxiliaries: \"{}\"",
                        lemma,
                        input.context,
                        head.form,
                        children_forms(input)
                    );
                    return Ok(Resolution::Pending(DecisionPoint::new(head.id, Ambiguity::PastModal, prompt)));
                }
                Some(Choice::Conditional) => state.append(MOOD, "Cnd"),
                Some(Choice::Past) => state.set(TENSE, "Past"),
                Some(other) => return Err(out_of_range(head.id, Ambiguity::PastModal, *other)),
            }
        }

        let mut tag = profile.modality(last).unwrap_or(*last).to_string();
        if negated {
            tag = format!("neg({})", tag);
            state.feats.remove(POLARITY);
        }
        state.append(MOOD, &tag);

        for modal in &modals {
            lemmas.remove(modal);
        }
    }
    lemmas.retain(|l| !profile.is_negation(l));

    // 11. Leftovers
    if !lemmas.is_empty() {
        let left: Vec<&str> = lemmas.into_iter().collect();
        return Err(unhandled("unhandled auxiliaries", &left));
    }

    Ok(Resolution::Resolved(state.finish()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use msf_protocol::Upos;
    use msf_tree::feats::parse_features;
    use test_case::test_case;

    fn node(id: u32, form: &str, lemma: &str, upos: Upos, feats: &str, deprel: &str) -> Node {
        Node {
            id: NodeId::word(id),
            form: form.to_string(),
            lemma: lemma.to_string(),
            upos: Some(upos),
            feats: parse_features(feats).unwrap(),
            head: NodeId::word(9),
            deprel: deprel.to_string(),
        }
    }

    fn aux(id: u32, form: &str, lemma: &str, feats: &str) -> Node {
        node(id, form, lemma, Upos::Aux, feats, "aux")
    }

    fn run(language: &str, head: &Node, auxiliaries: &[Node], answers: &Answers) -> Result<Resolution<FeatureMap>> {
        let profile = LanguageProfile::builtin(language).unwrap();
        let input = TamInput {
            head,
            auxiliaries,
            first_subject: Some(NodeId::word(1)),
            question_mark: false,
            context: "test sentence",
        };
        resolve_tam(&profile, &input, answers)
    }

    fn resolved(result: Result<Resolution<FeatureMap>>) -> String {
        match result.unwrap() {
            Resolution::Resolved(feats) => msf_tree::feats::format_features(&feats),
            Resolution::Pending(point) => panic!("unexpected question {:?}", point.kind),
        }
    }

    #[test_case("eating", "VerbForm=Part|Tense=Pres", &[("is", "be", "Mood=Ind|Tense=Pres|VerbForm=Fin")],
        "Aspect=Prog|Polarity=Pos|Tense=Pres|VerbForm=Fin|Voice=Act" ; "progressive")]
    #[test_case("eaten", "VerbForm=Part|Tense=Past", &[("was", "be", "Mood=Ind|Tense=Past|VerbForm=Fin")],
        "Polarity=Pos|Tense=Past|VerbForm=Fin|Voice=Pass" ; "passive")]
    #[test_case("eaten", "VerbForm=Part|Tense=Past", &[("has", "have", "Tense=Pres")],
        "Aspect=Perf|Polarity=Pos|Tense=Pres|VerbForm=Fin" ; "perfect")]
    #[test_case("eat", "VerbForm=Inf", &[("did", "do", "Tense=Past"), ("not", "not", "")],
        "Polarity=Neg|Tense=Past|VerbForm=Fin" ; "negated do-support")]
    #[test_case("eat", "VerbForm=Inf", &[("must", "must", ""), ("not", "not", "")],
        "Mood=neg(Nec)|VerbForm=Fin" ; "negated modal")]
    #[test_case("eat", "VerbForm=Inf", &[("to", "to", "")],
        "Polarity=Pos|VerbForm=Inf" ; "infinitive")]
    #[test_case("eat", "VerbForm=Inf", &[("will", "will", "")],
        "Polarity=Pos|Tense=Fut|VerbForm=Fin" ; "future")]
    #[test_case("eat", "VerbForm=Inf", &[("may", "may", ""), ("should", "should", "")],
        "Mood=Des|Polarity=Pos|VerbForm=Fin" ; "last modal in lemma order wins")]
    fn test_english_auxiliaries(form: &str, feats: &str, auxiliaries: &[(&str, &str, &str)], expected: &str) {
        let head = node(9, form, form, Upos::Verb, feats, "root");
        let auxes: Vec<Node> = auxiliaries
            .iter()
            .enumerate()
            .map(|(i, (form, lemma, feats))| aux(i as u32 + 2, form, lemma, feats))
            .collect();

        assert_eq!(resolved(run("eng", &head, &auxes, &Answers::new())), expected);
    }

    #[test]
    fn test_two_copulas_pick_the_finite_one() {
        let head = node(9, "eaten", "eat", Upos::Verb, "VerbForm=Part|Tense=Past", "root");
        let auxes = vec![
            aux(2, "is", "be", "Mood=Ind|Tense=Pres|VerbForm=Fin"),
            aux(3, "being", "be", "VerbForm=Ger"),
        ];
        assert_eq!(
            resolved(run("eng", &head, &auxes, &Answers::new())),
            "Aspect=Prog|Polarity=Pos|Tense=Pres|VerbForm=Fin|Voice=Pass"
        );
    }

    #[test]
    fn test_copula_on_nominal_head_inherits_mood() {
        let head = node(9, "doctor", "doctor", Upos::Noun, "Number=Sing", "root");
        let auxes = vec![aux(2, "was", "be", "Mood=Ind|Tense=Past|VerbForm=Fin")];
        assert_eq!(
            resolved(run("eng", &head, &auxes, &Answers::new())),
            "Mood=Ind|Polarity=Pos|Tense=Past|VerbForm=Fin"
        );
    }

    #[test]
    fn test_get_passive() {
        let head = node(9, "fired", "fire", Upos::Verb, "VerbForm=Part|Tense=Past", "root");
        let auxes = vec![node(2, "got", "get", Upos::Aux, "Tense=Past|VerbForm=Fin", "aux:pass")];
        assert_eq!(
            resolved(run("eng", &head, &auxes, &Answers::new())),
            "Polarity=Pos|Tense=Past|VerbForm=Fin|Voice=Pass"
        );

        let active = vec![aux(2, "got", "get", "Tense=Past")];
        assert!(matches!(
            run("eng", &head, &active, &Answers::new()),
            Err(EngineError::UnhandledConstruction { .. })
        ));
    }

    #[test]
    fn test_unhandled_constructions() {
        let noun = node(9, "idea", "idea", Upos::Noun, "", "root");
        assert!(matches!(
            run("eng", &noun, &[aux(2, "does", "do", "Tense=Pres")], &Answers::new()),
            Err(EngineError::UnhandledConstruction { .. })
        ));

        let verb = node(9, "eat", "eat", Upos::Verb, "VerbForm=Inf", "root");
        let copulas = vec![aux(2, "is", "be", ""), aux(3, "been", "be", ""), aux(4, "being", "be", "")];
        assert!(matches!(
            run("eng", &verb, &copulas, &Answers::new()),
            Err(EngineError::UnhandledConstruction { .. })
        ));

        match run("eng", &verb, &[aux(2, "ought", "ought", "")], &Answers::new()) {
            Err(EngineError::UnhandledConstruction { lemmas, .. }) => assert_eq!(lemmas, vec!["ought"]),
            other => panic!("expected leftover auxiliaries, got {:?}", other),
        }
    }

    #[test]
    fn test_conditional_auxiliary_asks_once() {
        let head = node(9, "go", "go", Upos::Verb, "VerbForm=Inf", "root");
        let auxes = vec![aux(2, "would", "would", "VerbForm=Fin")];

        match run("eng", &head, &auxes, &Answers::new()).unwrap() {
            Resolution::Pending(point) => {
                assert_eq!(point.kind, Ambiguity::ConditionalAux);
                assert_eq!(point.options, vec![Choice::Conditional, Choice::FutureInPast]);
            }
            other => panic!("expected a question, got {:?}", other),
        }

        let mut answers = Answers::new();
        answers.insert(Ambiguity::ConditionalAux, Choice::FutureInPast);
        assert_eq!(
            resolved(run("eng", &head, &auxes, &answers)),
            "Aspect=Prosp|Polarity=Pos|Tense=Past|VerbForm=Fin"
        );

        answers.insert(Ambiguity::ConditionalAux, Choice::Past);
        assert!(matches!(
            run("eng", &head, &auxes, &answers),
            Err(EngineError::AmbiguityUnresolved { .. })
        ));
    }

    #[test]
    fn test_could_as_past() {
        let head = node(9, "swim", "swim", Upos::Verb, "VerbForm=Inf", "root");
        let auxes = vec![aux(2, "could", "could", "VerbForm=Fin")];

        let mut answers = Answers::new();
        answers.insert(Ambiguity::PastModal, Choice::Past);
        assert_eq!(
            resolved(run("eng", &head, &auxes, &answers)),
            "Mood=Pot|Polarity=Pos|Tense=Past|VerbForm=Fin"
        );

        answers.insert(Ambiguity::PastModal, Choice::Conditional);
        assert_eq!(
            resolved(run("eng", &head, &auxes, &answers)),
            "Mood=Cnd,Pot|Polarity=Pos|VerbForm=Fin"
        );
    }

    #[test]
    fn test_inversion() {
        let profile = LanguageProfile::builtin("eng").unwrap();
        let head = node(9, "eating", "eat", Upos::Verb, "VerbForm=Part|Tense=Pres", "root");
        let auxes = vec![aux(1, "Is", "be", "Mood=Ind|Tense=Pres|VerbForm=Fin")];
        let mut input = TamInput {
            head: &head,
            auxiliaries: &auxes,
            first_subject: Some(NodeId::word(2)),
            question_mark: true,
            context: "Is he eating ?",
        };

        assert_eq!(
            resolved(resolve_tam(&profile, &input, &Answers::new())),
            "Aspect=Prog|Mood=Int|Polarity=Pos|Tense=Pres|VerbForm=Fin|Voice=Act"
        );

        input.question_mark = false;
        match resolve_tam(&profile, &input, &Answers::new()).unwrap() {
            Resolution::Pending(point) => assert_eq!(point.kind, Ambiguity::Inversion),
            other => panic!("expected a question, got {:?}", other),
        }

        let mut answers = Answers::new();
        answers.insert(Ambiguity::Inversion, Choice::NoneOfTheAbove);
        let feats = match resolve_tam(&profile, &input, &answers).unwrap() {
            Resolution::Resolved(feats) => feats,
            other => panic!("expected features, got {:?}", other),
        };
        assert!(!feats.contains_key(MOOD));
    }

    #[test_case(Choice::Interrogative, "Aspect=Prog|Mood=Int|Polarity=Pos|Tense=Past|VerbForm=Fin|Voice=Act" ; "question")]
    #[test_case(Choice::Conditional, "Aspect=Prog|Mood=Cnd|Polarity=Pos|Tense=Past|VerbForm=Fin|Voice=Act" ; "conditional")]
    #[test_case(Choice::NoneOfTheAbove, "Aspect=Prog|Polarity=Pos|Tense=Past|VerbForm=Fin|Voice=Act" ; "neither")]
    fn test_inversion_answers(choice: Choice, expected: &str) {
        let profile = LanguageProfile::builtin("eng").unwrap();
        let head = node(9, "eating", "eat", Upos::Verb, "VerbForm=Part|Tense=Pres", "root");
        let auxes = vec![aux(1, "Were", "be", "Mood=Sub|Tense=Past|VerbForm=Fin")];
        let input = TamInput {
            head: &head,
            auxiliaries: &auxes,
            first_subject: Some(NodeId::word(2)),
            question_mark: false,
            context: "Were he eating",
        };
        let mut answers = Answers::new();
        answers.insert(Ambiguity::Inversion, choice);

        assert_eq!(resolved(resolve_tam(&profile, &input, &answers)), expected);
    }

    #[test_case(("je", "Tense=Pres"), ("bio", "Tense=Past"), "Aspect=Prog|Polarity=Pos|Tense=Past|Voice=Pass" ; "prefixed form wins")]
    #[test_case(("sam", "Tense=Pres"), ("jesam", "Tense=Past"), "Aspect=Prog|Polarity=Pos|Tense=Pres|Voice=Pass" ; "first form otherwise")]
    fn test_serbian_two_copulas(first: (&str, &str), second: (&str, &str), expected: &str) {
        let head = node(9, "radio", "raditi", Upos::Verb, "Gender=Masc|Tense=Past|VerbForm=Part", "root");
        let auxes = vec![aux(2, first.0, "biti", first.1), aux(3, second.0, "biti", second.1)];
        assert_eq!(resolved(run("srp", &head, &auxes, &Answers::new())), expected);
    }

    #[test]
    fn test_serbian_finite_copula_fallback() {
        let head = node(9, "raditi", "raditi", Upos::Verb, "VerbForm=Inf", "root");
        let auxes = vec![aux(2, "bi", "biti", "Mood=Cnd|VerbForm=Fin")];
        assert_eq!(
            resolved(run("srp", &head, &auxes, &Answers::new())),
            "Aspect=Imp|Mood=Cnd|Polarity=Pos|Tense=Pres|Voice=Act"
        );
    }

    #[test]
    fn test_serbian_future_and_negation() {
        let head = node(9, "doći", "doći", Upos::Verb, "VerbForm=Inf", "root");
        let auxes = vec![aux(2, "ne", "ne", ""), aux(3, "će", "hteti", "")];
        assert_eq!(
            resolved(run("srp", &head, &auxes, &Answers::new())),
            "Polarity=Neg|Tense=Fut"
        );
    }

    #[test]
    fn test_resolution_is_deterministic() {
        let head = node(9, "eaten", "eat", Upos::Verb, "VerbForm=Part|Tense=Past", "root");
        let auxes = vec![
            aux(2, "would", "would", ""),
            aux(3, "have", "have", "VerbForm=Inf"),
            aux(4, "been", "be", "VerbForm=Part|Tense=Past"),
        ];
        let mut answers = Answers::new();
        answers.insert(Ambiguity::ConditionalAux, Choice::Conditional);

        let first = resolved(run("eng", &head, &auxes, &answers));
        for _ in 0..5 {
            assert_eq!(resolved(run("eng", &head, &auxes, &answers)), first);
        }
        assert_eq!(first, "Aspect=Perf|Mood=Cnd|Polarity=Pos|VerbForm=Fin|Voice=Pass");
    }
}
