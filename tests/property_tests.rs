use huffman::{
    bits_to_bytes, tabulate, Codec, Codeword, DecodeError, RebuildError, MAX_CODE_BITS, TABLE_SIZE,
};
use proptest::prelude::*;

fn table_for(data: &[u8]) -> [u16; TABLE_SIZE] {
    let mut table = [0_u16; TABLE_SIZE];
    tabulate(&mut table, data);
    table
}

/// First pair of codewords where one is a prefix of the other.
fn prefix_pair(codes: &[Codeword]) -> Option<(Codeword, Codeword)> {
    for (i, a) in codes.iter().enumerate() {
        for b in codes.iter().skip(i + 1) {
            let n = a.bit_length.min(b.bit_length);
            // Widened so a 16 bit prefix does not shift a u16 by its full width.
            let mask = !(0xffff_u32 >> n) as u16;
            if a.bits & mask == b.bits & mask {
                return Some((*a, *b));
            }
        }
    }
    None
}

/// Fibonacci weights on the first 24 symbols, which make the deepest codes exactly 16 bits.
fn sixteen_bit_table() -> [u16; TABLE_SIZE] {
    let mut table = [0_u16; TABLE_SIZE];
    let (mut a, mut b) = (1_u16, 1_u16);
    for slot in table.iter_mut().take(24) {
        *slot = a;
        (a, b) = (b, a.saturating_add(b));
    }
    table
}

proptest! {
    #[test]
    fn test_roundtrip(data in prop::collection::vec(any::<u8>(), 0..2000)) {
        let codec = Codec::new(Some(&table_for(&data))).unwrap();

        let mut encoded = vec![0_u8; codec.encode_upper_bound(data.len())];
        let bits = codec.encode(&mut encoded, &data).unwrap();
        prop_assert!(bits_to_bytes(bits) <= codec.encode_upper_bound(data.len()));

        let mut decoded = vec![0_u8; codec.decode_upper_bound(bits)];
        let len = codec.decode(&mut decoded, &encoded, bits).unwrap();
        prop_assert!(len <= codec.decode_upper_bound(bits));
        prop_assert_eq!(&decoded[..len], &data[..]);
    }

    #[test]
    fn test_roundtrip_with_foreign_table(
        data in prop::collection::vec(any::<u8>(), 0..500),
        weights in prop::collection::vec(0..400u16, TABLE_SIZE),
    ) {
        // Any table works for any input, since the floor gives every symbol a code.
        let mut table = [0_u16; TABLE_SIZE];
        table.copy_from_slice(&weights);
        let Ok(codec) = Codec::new(Some(&table)) else {
            return Ok(());
        };
        let (encoded, bits) = codec.encode_to_vec(&data).unwrap();
        prop_assert_eq!(codec.decode_to_vec(&encoded, bits).unwrap(), data);
    }

    #[test]
    fn test_floor_and_prefix_free(weights in prop::collection::vec(any::<u16>(), TABLE_SIZE)) {
        let mut table = [0_u16; TABLE_SIZE];
        table.copy_from_slice(&weights);
        let mut codec = Codec::empty();
        match codec.rebuild(Some(&table)) {
            // Random u16 weights are almost never skewed enough, but it is a valid outcome.
            Err(RebuildError::CodeTooLong { .. }) => return Ok(()),
            Err(e) => panic!("unexpected rebuild error {:?}", e),
            Ok(()) => {}
        }

        let codes = codec.codes();
        prop_assert!(codes.iter().all(|c| c.bit_length > 0));
        prop_assert!(codes.iter().all(|c| c.bit_length <= 16));
        prop_assert_eq!(codes.iter().map(|c| c.bit_length).min(), Some(codec.min_bits()));
        prop_assert_eq!(codes.iter().map(|c| c.bit_length).max(), Some(codec.max_bits()));

        // The tree is full, so the Kraft sum is exactly one.
        let kraft: u64 = codes.iter().map(|c| 1_u64 << (16 - c.bit_length)).sum();
        prop_assert_eq!(kraft, 1 << 16);

        if let Some((a, b)) = prefix_pair(codes) {
            prop_assert!(false, "{} is a prefix of {}", a, b);
        }
    }

    #[test]
    fn test_determinism(data in prop::collection::vec(any::<u8>(), 0..300)) {
        let table = table_for(&data);
        let first = Codec::new(Some(&table)).unwrap();
        let mut second = Codec::new(None).unwrap();
        second.rebuild(Some(&table)).unwrap();
        prop_assert_eq!(first.codes(), second.codes());
    }

    #[test]
    fn test_overflow_rollback(
        start in prop::collection::vec(any::<u16>(), TABLE_SIZE),
        data in prop::collection::vec(any::<u8>(), 1..300),
        hot in any::<u8>(),
    ) {
        let mut table = [0_u16; TABLE_SIZE];
        table.copy_from_slice(&start);
        table[hot as usize] = u16::MAX;
        let before = table;

        let mut input = data;
        input.push(hot);
        prop_assert!(!tabulate(&mut table, &input));
        prop_assert_eq!(table, before);
    }

    #[test]
    fn test_truncated_codeword(data in prop::collection::vec(any::<u8>(), 1..300)) {
        let codec = Codec::new(Some(&table_for(&data))).unwrap();
        let (encoded, bits) = codec.encode_to_vec(&data).unwrap();

        let last = codec.codeword(data[data.len() - 1]).bit_length as usize;
        prop_assume!(last > 1);
        prop_assert_eq!(
            codec.decode_to_vec(&encoded, bits - 1),
            Err(DecodeError::TruncatedCodeword)
        );
    }
}

#[test]
fn tabulate_is_additive() {
    let mut table = [0_u16; TABLE_SIZE];
    tabulate(&mut table, b"AAAAAA");
    tabulate(&mut table, b"BBBCC");
    assert_eq!(table, table_for(b"AAAAAABBBCC"));
}

#[test]
fn sixteen_bit_codes_are_prefix_free() {
    let codec = Codec::new(Some(&sixteen_bit_table())).unwrap();
    assert_eq!(codec.max_bits(), MAX_CODE_BITS);
    let longest = codec
        .codes()
        .iter()
        .filter(|c| c.bit_length == MAX_CODE_BITS)
        .count();
    assert!(longest >= 2);
    assert_eq!(prefix_pair(codec.codes()), None);
}

#[test]
fn prefix_pair_spots_full_width_duplicates() {
    let code = Codeword {
        bit_length: 16,
        bits: 0xbeef,
    };
    assert_eq!(prefix_pair(&[code, code]), Some((code, code)));
}
