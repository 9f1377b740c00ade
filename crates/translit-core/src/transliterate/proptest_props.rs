//! Property-based tests for the transliterator.
//!
//! Generates random mixes of Greek letters, combining marks, and ASCII (and
//! of pointed Hebrew in any mark order) and checks that determinism,
//! normalization insensitivity, and pass-through hold for every input.

use proptest::prelude::*;
use unicode_normalization::UnicodeNormalization;

use super::*;
use crate::table::{LoadOptions, MappingTable};

const TABLE: &str = "α\ta\nά\ta\nὰ\ta\nἀ\ta\nἁ\tha\nβ\tb\nγ\tg\nγγ\tng\nε\te\nέ\te\nι\ti\n\
                     ί\ti\nλ\tl\nο\to\nό\to\nσ\ts\nς\ts\nφ\tf\nω\tō\nῶ\tō\nᾧ\thōi\n";

const POINTED_TABLE: &str = "בּ\tb\nב\tv\nשׁ\tsh\nשׂ\ts\nי\ty\n\
                             \u{05B0}\tə\n\u{05B5}\tē\n\u{05B8}\tā\n";

fn load() -> MappingTable {
    parse(TABLE)
}

fn parse(tsv: &str) -> MappingTable {
    MappingTable::parse(
        tsv,
        &LoadOptions {
            strip_bom: false,
            header: false,
        },
    )
    .unwrap()
}

fn opts() -> TransliterateOptions {
    TransliterateOptions {
        case: CasePolicy::Lowercase,
        output_form: OutputForm::Nfc,
        max_unmapped: usize::MAX,
    }
}

fn arb_char() -> impl Strategy<Value = char> {
    prop_oneof![
        6 => prop::sample::select(vec![
            'α', 'β', 'γ', 'ε', 'ι', 'λ', 'ο', 'σ', 'ς', 'φ', 'ω', 'ά', 'ἁ', 'ῶ', 'ᾧ',
        ]),
        2 => prop::sample::select(vec!['\u{0301}', '\u{0300}', '\u{0313}', '\u{0314}', '\u{0345}']),
        2 => prop::sample::select(vec![' ', '5', ',', '.', 'x', '\n']),
    ]
}

fn arb_input() -> impl Strategy<Value = String> {
    prop::collection::vec(arb_char(), 0..40).prop_map(|chars| chars.into_iter().collect())
}

fn arb_pointed() -> impl Strategy<Value = String> {
    let chars = prop_oneof![
        3 => prop::sample::select(vec!['ב', 'ש', 'י']),
        4 => prop::sample::select(vec![
            '\u{05B0}', '\u{05B5}', '\u{05B8}', '\u{05BC}', '\u{05C1}', '\u{05C2}', '\u{0596}',
        ]),
    ];
    prop::collection::vec(chars, 0..30).prop_map(|chars| chars.into_iter().collect())
}

proptest! {
    #[test]
    fn loading_twice_gives_same_output(input in arb_input()) {
        let a = load();
        let b = load();
        let out_a = Transliterator::with_options(&a, opts()).transliterate(&input);
        let out_b = Transliterator::with_options(&b, opts()).transliterate(&input);
        prop_assert_eq!(out_a, out_b);
    }

    #[test]
    fn normalization_insensitive(input in arb_input()) {
        let table = load();
        let translit = Transliterator::with_options(&table, opts());
        let raw = translit.transliterate(&input).output;
        let nfc: String = input.nfc().collect();
        let nfd: String = input.nfd().collect();
        prop_assert_eq!(&raw, &translit.transliterate(&nfc).output);
        prop_assert_eq!(&raw, &translit.transliterate(&nfd).output);
    }

    #[test]
    fn pointing_order_is_irrelevant(input in arb_pointed()) {
        let table = parse(POINTED_TABLE);
        let translit = Transliterator::with_options(&table, opts());
        let raw = translit.transliterate(&input);
        let nfd: String = input.nfd().collect();
        let from_nfd = translit.transliterate(&nfd);
        prop_assert_eq!(&raw.output, &from_nfd.output);
        prop_assert_eq!(raw.unmapped_total, from_nfd.unmapped_total);
        for u in &raw.unmapped {
            prop_assert!(input.is_char_boundary(u.byte_offset));
        }
    }

    #[test]
    fn ascii_passes_through(input in "[0-9 ,.!?x-]{0,30}") {
        let table = load();
        let result = Transliterator::with_options(&table, opts()).transliterate(&input);
        prop_assert_eq!(&result.output, &input);
        prop_assert_eq!(result.unmapped_total, input.chars().count());
        for (u, c) in result.unmapped.iter().zip(input.chars()) {
            prop_assert_eq!(u.ch, c);
        }
    }

    #[test]
    fn unmapped_offsets_are_char_boundaries(input in arb_input()) {
        let table = load();
        let result = Transliterator::with_options(&table, opts()).transliterate(&input);
        for u in &result.unmapped {
            prop_assert!(input.is_char_boundary(u.byte_offset));
            prop_assert!(u.byte_offset < input.len());
        }
    }
}

#[test]
fn nfc_and_nfd_keys_agree() {
    let table = load();
    for entry in table.entries() {
        let nfc: String = entry.source.nfc().collect();
        let nfd: String = entry.source.nfd().collect();
        assert_eq!(table.lookup(&nfc), table.lookup(&nfd), "{}", entry.source);
        assert_eq!(table.lookup(&nfc), Some(entry.target.as_str()));
    }
}
