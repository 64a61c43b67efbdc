use msf_protocol::{
    AuxiliaryLexicon, ClassifierRules, DegreeLexicon, DeterminerRule, HigherCopula, RelationLayout,
    RuleTables, SubjectPolicy, Upos,
};

use super::{lemma_values, strings};
use crate::profile::RULES_VERSION;

// Empty values stand for the lemma itself.
const CASES: &[(&str, &str)] = &[
    ("to", "Dat"),
    ("with", "Com"),
    ("of", "Gen"),
    ("'s", "Gen"),
    ("from", "Abl"),
    ("for", "Ben"),
    ("on", "Sup"),
    ("above", "Sup+Rem"),
    ("atop", "Sup+Prox"),
    ("at", "Loc"),
    ("in", "Ine"),
    ("into", "Ine+All"),
    ("onto", "Sup+All"),
    ("through", "Perl+Ess"),
    ("by", "Inst"),
    ("and", "Cum"),
    ("or", "Alter"),
    ("nor", "neg(Alter)"),
    ("under", "Sub"),
    ("near", "Ade"),
    ("around", "Circ"),
    ("against", "Rev"),
    ("without", "Abe"),
    ("like", "Comp"),
    ("as", "Adv"),
    ("along", "Perl"),
    ("during", "TempPerl"),
    ("across", "Prol"),
    ("inside", "Ine+Ess"),
    ("outside", "Ela+Ess"),
    ("after", "Subseq"),
    ("ago", "Antr"),
    ("before", "Antr"),
    ("behind", "Post"),
    ("amid", ""),
    ("amidst", ""),
    ("among", ""),
    ("upon", ""),
    ("unto", ""),
    ("about", ""),
    ("throughout", ""),
    ("beyond", ""),
];

const MARKERS: &[(&str, &str)] = &[
    ("when", "TempCond"),
    ("whenever", ""),
    ("where", ""),
    ("if", "Cond"),
    ("so", "Conseq"),
    ("and", "Cum"),
    ("but", "Advers"),
    ("for", "Ben"),
    ("or", "Alter"),
    ("nor", "neg(Alter)"),
    ("because", "Cause"),
    ("since", "TempCause"),
    ("after", "Subseq"),
    ("as", ""),
    ("while", ""),
    ("until", ""),
    ("till", ""),
    ("everywhere", ""),
    ("then", "Res"),
];

/// Cases and markers merged into one `Case` inventory.
const MERGED_CASES: &[(&str, &str)] = &[
    ("to", "Lat"),
    ("with", "Com"),
    ("of", "Gen"),
    ("'s", "Gen"),
    ("from", "Abl"),
    ("for", "Ben"),
    ("on", "Ade"),
    ("above", "Sup"),
    ("atop", "Adt"),
    ("at", "Loc"),
    ("in", "Ine"),
    ("into", "Ill"),
    ("onto", "Spl"),
    ("through", "Inx"),
    ("by", "Chz"),
    ("and", "Conj"),
    ("or", "Disj"),
    ("nor", "Nnor"),
    ("under", "Sub"),
    ("near", "Prx"),
    ("around", "Cir"),
    ("against", "Adv"),
    ("without", "Abe"),
    ("like", "Sem"),
    ("as", "Ess"),
    ("along", "Lng"),
    ("during", "Dur"),
    ("across", "Crs"),
    ("inside", "Ine"),
    ("outside", "Ext"),
    ("after", "Tps"),
    ("ago", ""),
    ("before", "Tan"),
    ("behind", "Pst"),
    ("amid", "Ces"),
    ("amidst", "Ces"),
    ("among", "Ces"),
    ("upon", "Tem"),
    ("unto", "Ter"),
    ("about", ""),
    ("throughout", "Tot"),
    ("beyond", "Pst"),
    ("when", "Temp"),
    ("whenever", ""),
    ("where", ""),
    ("if", "Cnd"),
    ("so", "Cnsq"),
    ("but", "Advs"),
    ("because", "Reas"),
    ("since", "Teg"),
    ("while", "Temp"),
    ("until", "Ttr"),
    ("till", "Ttr"),
    ("everywhere", ""),
    ("then", "Cnsq"),
];

const MODALITIES: &[(&str, &str)] = &[
    ("shall", "Des"),
    ("should", "Des"),
    ("must", "Nec"),
    ("may", "Prms"),
    ("might", "Prms"),
    ("can", "Pot"),
    ("could", "Pot"),
];

fn determiners() -> Vec<DeterminerRule> {
    vec![
        DeterminerRule::new("a", &[("Definite", "Ind")]),
        DeterminerRule::new("an", &[("Definite", "Ind")]),
        DeterminerRule::new("another", &[("Definite", "Ind")]),
        DeterminerRule::new("the", &[("Definite", "Def")]),
        DeterminerRule::new("no", &[("Definite", "Ind")]),
        DeterminerRule::new("this", &[("Dem", "Prox")]),
        DeterminerRule::new("these", &[("Dem", "Prox")]),
        DeterminerRule::new("that", &[("Dem", "Dist")]),
        DeterminerRule::new("those", &[("Dem", "Dist")]),
    ]
}

fn auxiliaries() -> AuxiliaryLexicon {
    AuxiliaryLexicon {
        infinitive: Some("to".into()),
        negation: strings(&["not"]),
        do_support: Some("do".into()),
        copula: Some("be".into()),
        get_passive: Some("get".into()),
        perfect: Some("have".into()),
        future: Some("will".into()),
        conditional: Some("would".into()),
        past_modal: Some("could".into()),
        copula_finite_fallback: false,
        higher_copula: HigherCopula::WithoutSuffix("ing".into()),
    }
}

fn classifier() -> ClassifierRules {
    ClassifierRules {
        ignored_deprels: strings(&["punct", "reparandum", "parataxis"]),
        tam_excluded_lemmas: strings(&["'s"]),
        tam_excluded_deprels: Vec::new(),
        tam_blocked_heads: Vec::new(),
        relation_excluded_upos: vec![Upos::Part],
        relation_allowed_lemmas: strings(&["'s"]),
        discourse_particles: Vec::new(),
        retained_morphology: Vec::new(),
    }
}

pub fn tables() -> RuleTables {
    RuleTables {
        version: RULES_VERSION,
        language: "eng".into(),
        separator: ",".into(),
        relation_layout: RelationLayout::Split,
        subject_policy: SubjectPolicy::English,
        case_map: lemma_values(CASES),
        marker_map: lemma_values(MARKERS),
        determiners: determiners(),
        modalities: lemma_values(MODALITIES),
        auxiliaries: auxiliaries(),
        degree: DegreeLexicon {
            comparative: strings(&["more"]),
            superlative: strings(&["most"]),
            intensifiers: Vec::new(),
        },
        classifier: classifier(),
    }
}

/// English with every relational dependent written to `Case`.
pub fn case_only_tables() -> RuleTables {
    RuleTables {
        language: "eng-case".into(),
        separator: ";".into(),
        relation_layout: RelationLayout::CaseOnly,
        case_map: lemma_values(MERGED_CASES),
        marker_map: Vec::new(),
        ..tables()
    }
}
