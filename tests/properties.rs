use huffman_coder::{
    decode, decode_str, encode, encode_symbols, encode_with, Code, CodeTable, CodebookError, Error,
    FrequencyTable, Tree,
};
use rand_chacha::{
    rand_core::{RngCore, SeedableRng},
    ChaCha8Rng,
};
use test_case::test_case;

fn code_strings(table: &CodeTable<char>) -> Vec<(char, String)> {
    table.iter().map(|(symbol, code)| (*symbol, code.to_string())).collect()
}

/// Text drawn from a skewed alphabet, so codes of many different lengths show up.
fn random_text(rng: &mut ChaCha8Rng, len: usize) -> String {
    const ALPHABET: &[char] = &[
        'e', 't', 'a', 'o', 'i', 'n', ' ', 's', 'h', 'r', '\n', '\t', 'ß', 'λ', '\\', '✓',
    ];
    (0..len)
        .map(|_| {
            let roll = rng.next_u32() as usize;
            // the lower of two draws favours the front of the alphabet
            let a = roll % ALPHABET.len();
            let b = (roll >> 8) % ALPHABET.len();
            ALPHABET[a.min(b)]
        })
        .collect()
}

#[test_case("a" ; "one character")]
#[test_case("aaaa" ; "one symbol repeated")]
#[test_case("ab" ; "two symbols")]
#[test_case("aabbbcc" ; "three symbols")]
#[test_case("abracadabra" ; "uneven counts")]
#[test_case("the quick brown fox jumps over the lazy dog" ; "pangram")]
#[test_case("tabs\tand\nnewlines\r\n" ; "control characters")]
#[test_case("naïve café, Ελληνικά ✓" ; "non ascii")]
fn round_trip(text: &str) -> anyhow::Result<()> {
    let (encoded, table) = encode(text)?;

    for symbol in text.chars() {
        assert!(table.get(&symbol).is_some(), "{:?} has no code", symbol);
    }
    assert_eq!(table.len(), FrequencyTable::count(text.chars()).len());
    assert!(table.is_prefix_free());
    assert!(table.iter().all(|(_, code)| !code.is_empty()));
    assert_eq!(encoded.len(), text.chars().count());

    assert_eq!(decode(&encoded.to_bits(), &table)?.into_iter().collect::<String>(), text);
    assert_eq!(decode_str(&encoded.to_string(), &table)?, text);

    let tree = Tree::from_sequence(text.chars())?;
    assert_eq!(tree.decode(&encoded.to_bits())?.into_iter().collect::<String>(), text);
    Ok(())
}

#[test]
fn single_symbol_table() -> anyhow::Result<()> {
    let (encoded, table) = encode("aaaa")?;
    assert_eq!(code_strings(&table), vec![('a', "0".to_string())]);
    let codes: Vec<String> = encoded.codes().iter().map(Code::to_string).collect();
    assert_eq!(codes, vec!["0"; 4]);
    Ok(())
}

#[test]
fn most_frequent_symbol_gets_the_shortest_code() -> anyhow::Result<()> {
    let text = "aabbbcc";
    let (encoded, table) = encode(text)?;
    let len = |symbol| table.get(&symbol).map(Code::len).unwrap_or_default();
    assert!(len('b') < len('a'));
    assert!(len('b') < len('c'));
    assert_eq!(len('a'), len('c'));

    let frequencies = FrequencyTable::count(text.chars());
    assert_eq!(table.weighted_length(&frequencies), Some(encoded.bit_len()));
    assert!(encoded.bit_len() <= table.fixed_width_length(text.chars().count()));
    Ok(())
}

#[test_case("aabbbcc", 11 ; "three symbols")]
#[test_case("abracadabra", 23 ; "five symbols")]
#[test_case("aaaaaaaabbbbccd", 25 ; "skewed counts")]
fn encoded_length_is_optimal(text: &str, optimal_bits: usize) -> anyhow::Result<()> {
    let (encoded, _) = encode(text)?;
    assert_eq!(encoded.bit_len(), optimal_bits);
    Ok(())
}

#[test]
fn empty_input_is_an_error() {
    assert!(matches!(encode(""), Err(Error::EmptyInput)));
    assert!(matches!(
        Tree::<char>::from_sequence(std::iter::empty()),
        Err(Error::EmptyInput)
    ));
}

#[test]
fn encoding_is_deterministic() -> anyhow::Result<()> {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let text = random_text(&mut rng, 2_000);
    let (first_encoded, first_table) = encode(&text)?;
    for _ in 0..5 {
        let (encoded, table) = encode(&text)?;
        assert_eq!(table, first_table);
        assert_eq!(encoded, first_encoded);
    }
    Ok(())
}

/// Generate random texts of varying length, encode them and check that
/// decoding gives back the original, with a valid prefix-free code.
#[test]
fn random_texts_round_trip() -> anyhow::Result<()> {
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    for round in 0..50 {
        let len = 1 + (rng.next_u32() as usize % (round * 40 + 1));
        let text = random_text(&mut rng, len);
        let (encoded, table) = encode(&text)?;
        assert!(table.is_prefix_free());
        assert!(encoded.bit_len() <= table.fixed_width_length(len));
        assert_eq!(decode_str(&encoded.to_string(), &table)?, text);
    }
    Ok(())
}

#[test]
fn generic_symbols() -> anyhow::Result<()> {
    let words: Vec<&str> = "to be or not to be".split(' ').collect();
    let (encoded, table) = encode_symbols(&words)?;
    assert_eq!(table.len(), 4);
    assert!(table.is_prefix_free());
    assert_eq!(decode(&encoded.to_bits(), &table)?, words);
    Ok(())
}

#[test]
fn codebook_round_trip() -> anyhow::Result<()> {
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let text = random_text(&mut rng, 500);
    let (encoded, table) = encode(&text)?;
    let parsed = CodeTable::parse_codebook(&table.format_codebook())?;
    assert_eq!(parsed, table);
    assert_eq!(decode_str(&encoded.to_string(), &parsed)?, text);
    Ok(())
}

#[test]
fn sharded_counts_build_the_same_code() -> anyhow::Result<()> {
    let mut rng = ChaCha8Rng::seed_from_u64(11);
    let text: Vec<char> = random_text(&mut rng, 3_000).chars().collect();

    let mut shards = text.chunks(700).map(|shard| FrequencyTable::count(shard.iter().copied()));
    let mut merged = shards.next().expect("at least one shard");
    for shard in shards {
        merged.merge(shard);
    }
    assert_eq!(merged.total(), text.len());

    let whole = Tree::from_sequence(text.iter().copied())?.codes();
    assert_eq!(Tree::new(merged)?.codes(), whole);
    Ok(())
}

#[test]
fn foreign_tables_must_be_prefix_free() {
    let code = |bits: &str| -> Code { bits.parse().unwrap() };
    let overlapping = CodeTable::new(vec![('a', code("0")), ('b', code("01"))]);
    assert!(matches!(
        overlapping,
        Err(Error::InvalidCodebook {
            reason: CodebookError::NotPrefixFree,
            ..
        })
    ));
}

#[test]
fn foreign_table_round_trips() -> anyhow::Result<()> {
    let code = |bits: &str| -> Code { bits.parse().unwrap() };
    let table = CodeTable::new(vec![('a', code("0")), ('b', code("10")), ('c', code("11"))])?;
    let text: Vec<char> = "abcab".chars().collect();
    let encoded = encode_with(&text, &table)?;
    assert_eq!(encoded.to_string(), "01011010");
    assert_eq!(decode(&encoded.to_bits(), &table)?, text);
    Ok(())
}
