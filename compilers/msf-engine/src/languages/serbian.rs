use msf_protocol::{
    AuxiliaryLexicon, ClassifierRules, DegreeLexicon, DeterminerRule, HigherCopula, RelationLayout,
    RetainedMorphology, RuleTables, SubjectPolicy, Upos,
};

use super::{lemma_values, strings};
use crate::profile::RULES_VERSION;

const CASES: &[(&str, &str)] = &[
    ("u", "Ine"),
    ("na", "Sup"),
    ("iz", "Ela"),
    ("od", "Abl"),
    ("do", "Ter"),
    ("sa", "Com"),
    ("s", "Com"),
    ("bez", "Abe"),
    ("za", "Ben"),
    ("o", "Del"),
    ("po", "Perl"),
    ("kroz", "Perl"),
    ("prema", "All"),
    ("kod", "Ade"),
    ("pod", "Sub"),
    ("nad", "Sup+Rem"),
    ("pred", "Ante"),
    ("iza", "Post"),
    ("između", "Inter"),
    ("oko", "Circ"),
    ("tokom", "TempPerl"),
    ("posle", "Subseq"),
    ("pre", "Antr"),
    ("kao", "Comp"),
    ("i", "Cum"),
    ("ili", "Alter"),
    ("ali", "Advers"),
    ("a", "Advers"),
    ("ako", "Cond"),
    ("jer", "Cause"),
    ("kada", "TempCond"),
    ("kad", "TempCond"),
    ("dok", ""),
    ("da", ""),
];

const MODALITIES: &[(&str, &str)] = &[("moći", "Pot"), ("trebati", "Nec"), ("sve", "Pot")];

const DISCOURSE_PARTICLES: &[&str] = &[
    "bilo", "li", "i", "ni", "niti", "zar", "tako", "god", "evo", "valjda", "npr.", "dakle",
    "naime", "tj.", "možda", "čak", "štaviše", "međutim",
];

fn determiners() -> Vec<DeterminerRule> {
    vec![
        DeterminerRule::new("ovaj", &[("Dem", "Prox")]),
        DeterminerRule::new("taj", &[("Dem", "Med")]),
        DeterminerRule::new("onaj", &[("Dem", "Dist")]),
        DeterminerRule::new("neki", &[("Definite", "Ind")]),
        DeterminerRule::new("jedan", &[("Definite", "Ind")]),
        DeterminerRule::new("nijedan", &[("Definite", "Ind"), ("PronType", "Neg")]),
        DeterminerRule::new("nikakav", &[("Definite", "Ind"), ("PronType", "Neg")]),
    ]
}

pub fn tables() -> RuleTables {
    RuleTables {
        version: RULES_VERSION,
        language: "srp".into(),
        separator: ";".into(),
        relation_layout: RelationLayout::CaseOnly,
        subject_policy: SubjectPolicy::Serbian,
        case_map: lemma_values(CASES),
        marker_map: Vec::new(),
        determiners: determiners(),
        modalities: lemma_values(MODALITIES),
        auxiliaries: AuxiliaryLexicon {
            infinitive: None,
            negation: strings(&["ne"]),
            do_support: None,
            copula: Some("biti".into()),
            get_passive: None,
            perfect: None,
            future: Some("hteti".into()),
            conditional: None,
            past_modal: None,
            copula_finite_fallback: true,
            higher_copula: HigherCopula::WithPrefix("bi".into()),
        },
        degree: DegreeLexicon {
            comparative: strings(&["više"]),
            superlative: strings(&["najviše"]),
            intensifiers: strings(&["sve"]),
        },
        classifier: ClassifierRules {
            // parataxis stays: the subject policy looks at it
            ignored_deprels: strings(&["punct", "reparandum"]),
            tam_excluded_lemmas: Vec::new(),
            tam_excluded_deprels: strings(&["advmod"]),
            tam_blocked_heads: vec![Upos::Sconj, Upos::Part],
            relation_excluded_upos: vec![Upos::Part, Upos::Cconj],
            relation_allowed_lemmas: Vec::new(),
            discourse_particles: strings(DISCOURSE_PARTICLES),
            retained_morphology: vec![RetainedMorphology { upos: Upos::Cconj, deprel: "discourse".into() }],
        },
    }
}
