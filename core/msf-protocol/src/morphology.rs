use alloc::collections::BTreeMap;
use alloc::string::String;
use core::fmt;
use core::str::FromStr;

use rkyv::{Archive, Deserialize, Serialize};

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

use bitflags::bitflags;

/// UD feature map, kept sorted by feature name.
pub type FeatureMap = BTreeMap<String, String>;

/// Universal part-of-speech tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "UPPERCASE"))]
#[archive(check_bytes)]
#[repr(u8)]
pub enum Upos {
    Adj = 0,
    Adp = 1,
    Adv = 2,
    Aux = 3,
    Cconj = 4,
    Det = 5,
    Intj = 6,
    Noun = 7,
    Num = 8,
    Part = 9,
    Pron = 10,
    Propn = 11,
    Punct = 12,
    Sconj = 13,
    Sym = 14,
    Verb = 15,
    X = 16,
}

impl Upos {
    pub const ALL: [Upos; 17] = [
        Upos::Adj,
        Upos::Adp,
        Upos::Adv,
        Upos::Aux,
        Upos::Cconj,
        Upos::Det,
        Upos::Intj,
        Upos::Noun,
        Upos::Num,
        Upos::Part,
        Upos::Pron,
        Upos::Propn,
        Upos::Punct,
        Upos::Sconj,
        Upos::Sym,
        Upos::Verb,
        Upos::X,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Upos::Adj => "ADJ",
            Upos::Adp => "ADP",
            Upos::Adv => "ADV",
            Upos::Aux => "AUX",
            Upos::Cconj => "CCONJ",
            Upos::Det => "DET",
            Upos::Intj => "INTJ",
            Upos::Noun => "NOUN",
            Upos::Num => "NUM",
            Upos::Part => "PART",
            Upos::Pron => "PRON",
            Upos::Propn => "PROPN",
            Upos::Punct => "PUNCT",
            Upos::Sconj => "SCONJ",
            Upos::Sym => "SYM",
            Upos::Verb => "VERB",
            Upos::X => "X",
        }
    }

    /// The single-bit set for this tag.
    pub fn flag(&self) -> UposSet {
        UposSet::from_bits_truncate(1u32 << (*self as u32))
    }
}

impl fmt::Display for Upos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Upos {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Upos::ALL.iter().copied().find(|tag| tag.as_str() == s).ok_or(())
    }
}

bitflags! {
    /// Sets of UPOS tags, used for the word-class tests of the engine.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
    pub struct UposSet: u32 {
        const ADJ = 1 << 0;
        const ADP = 1 << 1;
        const ADV = 1 << 2;
        const AUX = 1 << 3;
        const CCONJ = 1 << 4;
        const DET = 1 << 5;
        const INTJ = 1 << 6;
        const NOUN = 1 << 7;
        const NUM = 1 << 8;
        const PART = 1 << 9;
        const PRON = 1 << 10;
        const PROPN = 1 << 11;
        const PUNCT = 1 << 12;
        const SCONJ = 1 << 13;
        const SYM = 1 << 14;
        const VERB = 1 << 15;
        const X = 1 << 16;

        const VERBAL = Self::VERB.bits();
        const NOMINAL = Self::NOUN.bits() | Self::PROPN.bits() | Self::PRON.bits() | Self::NUM.bits();
        const FUNCTIONAL = Self::AUX.bits() | Self::PART.bits();
        const MODIFIABLE = Self::NOMINAL.bits() | Self::ADJ.bits() | Self::ADV.bits();
        const GRADABLE = Self::ADJ.bits() | Self::ADV.bits();
    }
}

impl UposSet {
    /// Membership test that treats a missing tag as "not in any set".
    pub fn has(&self, upos: Option<Upos>) -> bool {
        upos.map_or(false, |tag| self.contains(tag.flag()))
    }
}

/// Feature names written by the engine.
pub mod feature {
    pub const CASE: &str = "Case";
    pub const REL_TYPE: &str = "RelType";
    pub const MOOD: &str = "Mood";
    pub const TENSE: &str = "Tense";
    pub const ASPECT: &str = "Aspect";
    pub const VOICE: &str = "Voice";
    pub const VERB_FORM: &str = "VerbForm";
    pub const POLARITY: &str = "Polarity";
    pub const DEFINITE: &str = "Definite";
    pub const DEGREE: &str = "Degree";
    pub const INTENSE: &str = "Intense";
    pub const NUMBER: &str = "Number";
    pub const PERSON: &str = "Person";
    pub const GENDER: &str = "Gender";

    /// Features a placeholder subject inherits from its predicate.
    pub const AGREEMENT: [&str; 3] = [NUMBER, PERSON, GENDER];

    /// TAM features a verbal head falls back to from its own morphology.
    pub const VERBAL_TAM: [&str; 6] = [MOOD, TENSE, ASPECT, VOICE, VERB_FORM, POLARITY];
}
