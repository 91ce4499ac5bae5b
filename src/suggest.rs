//! Spelling suggestions for misspelled opcodes, using edit distance 1.
//!
//! A candidate is one edit away from the input: a single character deletion,
//! insertion, substitution, or adjacent-pair transposition. Candidates are
//! generated in that fixed order (within each operation by ascending position,
//! and within insertion/substitution by ascending letter), and the first one
//! that passes the caller's membership test wins.
//!
//! Inserted and substituted characters come from an explicit alphabet. The
//! opcode vocabulary is uppercase-only, so opcode correction uses
//! [`OPCODE_ALPHABET`].

/// The alphabet opcode suggestions draw from: uppercase `A`–`Z`.
pub const OPCODE_ALPHABET: [char; 26] = [
    'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M',
    'N', 'O', 'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z',
];

/// The first edit-distance-1 neighbor of `word` accepted by `is_known`, in
/// generation order.
pub fn suggest<F>(word: &str, alphabet: &[char], is_known: F) -> Option<String>
where
    F: Fn(&str) -> bool,
{
    neighbors(word, alphabet).into_iter().find(|candidate| is_known(candidate))
}

/// Every string within one edit of `word`, in the fixed generation order:
/// deletions, insertions, substitutions, transpositions.
///
/// Substitutions that reproduce the input are skipped. The list may still
/// contain duplicates (for example, deleting either of two equal adjacent
/// characters); first-match lookup makes that harmless.
pub fn neighbors(word: &str, alphabet: &[char]) -> Vec<String> {
    let chars: Vec<char> = word.chars().collect();
    let mut close_words = Vec::new();

    // deletion
    for i in 0..chars.len() {
        let mut candidate = chars.clone();
        candidate.remove(i);
        close_words.push(candidate.into_iter().collect());
    }
    // insertion
    for i in 0..=chars.len() {
        for &letter in alphabet {
            let mut candidate = chars.clone();
            candidate.insert(i, letter);
            close_words.push(candidate.into_iter().collect());
        }
    }
    // substitution
    for i in 0..chars.len() {
        for &letter in alphabet {
            if chars[i] == letter {
                continue;
            }
            let mut candidate = chars.clone();
            candidate[i] = letter;
            close_words.push(candidate.into_iter().collect());
        }
    }
    // transposition
    for i in 0..chars.len().saturating_sub(1) {
        let mut candidate = chars.clone();
        candidate.swap(i, i + 1);
        close_words.push(candidate.into_iter().collect());
    }

    close_words
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::ops::Opcode;

    fn known(candidate: &str) -> bool {
        Opcode::parse(candidate).is_some()
    }

    #[test]
    fn deletion_repair() {
        // "MVEI" is "MOVEI" missing its 'O'; the repair is an insertion.
        assert_eq!(Some("MOVEI".to_string()),
                   suggest("MVEI", &OPCODE_ALPHABET, known));
    }

    #[test]
    fn insertion_repair() {
        // "ADDX" has one extra letter; the repair is a deletion.
        assert_eq!(Some("ADD".to_string()),
                   suggest("ADDX", &OPCODE_ALPHABET, known));
    }

    #[test]
    fn substitution_repair() {
        assert_eq!(Some("MUL".to_string()),
                   suggest("MUW", &OPCODE_ALPHABET, known));
    }

    #[test]
    fn transposition_repair() {
        assert_eq!(Some("INC".to_string()),
                   suggest("NIC", &OPCODE_ALPHABET, known));
    }

    #[test]
    fn hopeless_tokens_get_no_suggestion() {
        assert_eq!(None, suggest("WXYZQ", &OPCODE_ALPHABET, known));
        assert_eq!(None, suggest("", &OPCODE_ALPHABET, known));
    }

    #[test]
    fn every_opcode_survives_single_corruptions() {
        for descriptor in crate::ops::OPCODES.iter() {
            let mnemonic = descriptor.opcode.mnemonic();
            // Corrupt by appending a letter; deleting it is always a repair.
            let corrupted = format!("{}Q", mnemonic);
            let suggestion = suggest(&corrupted, &OPCODE_ALPHABET, known);
            assert!(suggestion.is_some(), "no repair for {:?}", corrupted);
        }
    }

    #[test]
    fn generation_order_is_deletions_first() {
        let neighborhood = neighbors("AB", &['A', 'B']);
        assert_eq!("B", neighborhood[0]); // delete 'A'
        assert_eq!("A", neighborhood[1]); // delete 'B'
        assert_eq!("AAB", neighborhood[2]); // first insertion
        assert_eq!("BA", neighborhood[neighborhood.len() - 1]); // transposition last
    }
}
