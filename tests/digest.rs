use std::collections::HashSet;

use proptest::prelude::*;
use tachyon_digest::crypto::hash::md5::Md5;
use tachyon_digest::encoding::{Newlines, TextEncoding};
use tachyon_digest::{digest, digest_bytes, digest_with, try_digest, verify, DigestOptions, Error};

fn reference(data: &[u8]) -> String {
    format!("{:x}", md5::compute(data))
}

#[test]
fn known_answers() {
    assert_eq!(digest(""), "d41d8cd98f00b204e9800998ecf8427e");
    assert_eq!(digest("hello"), "5d41402abc4b2a76b9719d911017c592");
    assert_eq!(digest("world"), "7d793037a0760186574b0282f2f435e7");
    assert_eq!(digest("message digest"), "f96b697d7cb7938d525a2f31aaf161d0");
    assert_eq!(
        digest("abcdefghijklmnopqrstuvwxyz"),
        "c3fcd3d76192e4007dfb496cca67e13b"
    );
    assert_eq!(
        digest("ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789"),
        "d174ab98d277d9f5a5611c2c9f419d9f"
    );
}

#[test]
fn block_boundary_lengths() {
    for len in [0usize, 55, 56, 63, 64, 1000] {
        let input: String = (0..len).map(|i| (b'a' + (i % 26) as u8) as char).collect();
        assert_eq!(digest(&input), reference(input.as_bytes()), "length {}", len);
    }
}

#[test]
fn cjk_input_is_utf8_expanded() {
    let input = "\u{8bed}\u{97f3}\u{7ffb}\u{8bd1} speech translation";
    assert_eq!(input.len(), 4 * 3 + 19);
    assert_eq!(digest(input), reference(input.as_bytes()));
}

#[test]
fn signing_string_shape() {
    // appid + query + salt + key, assembled by the caller
    let signing = format!("{}{}{}{}", "20240101000000001", "\u{4f60}\u{597d}", "1718000000000", "secretkey");
    let sign = digest(&signing);
    assert_eq!(sign, reference(signing.as_bytes()));
    assert!(verify(&signing, &sign, &DigestOptions::default()).unwrap());
}

#[test]
fn missing_input_is_rejected() {
    match try_digest(None) {
        Err(Error::InvalidArgument(msg)) => assert!(msg.contains("missing")),
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn short_corpus_has_no_collisions() {
    let mut seen = HashSet::new();
    for a in 0u8..128 {
        for b in [b'a', b'b', b'z', b'0'] {
            let input = format!("{}{}", a as char, b as char);
            assert!(seen.insert(digest(&input)), "collision on {:?}", input);
        }
    }
}

#[test]
fn concurrent_callers_agree() {
    let inputs: Vec<String> = (0..64).map(|i| format!("request-{}-\u{4e2d}", i)).collect();
    let expected: Vec<String> = inputs.iter().map(|s| digest(s)).collect();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| scope.spawn(|| inputs.iter().map(|s| digest(s)).collect::<Vec<_>>()))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}

proptest! {
    #[test]
    fn digest_is_deterministic(s in ".*") {
        prop_assert_eq!(digest(&s), digest(&s));
    }

    #[test]
    fn digest_is_32_lowercase_hex(s in ".*") {
        let hex = digest(&s);
        prop_assert_eq!(hex.len(), 32);
        prop_assert!(hex.bytes().all(|c| matches!(c, b'0'..=b'9' | b'a'..=b'f')));
    }

    #[test]
    fn bmp_text_matches_reference(s in "[\\u{0}-\\u{d7ff}\\u{e000}-\\u{ffff}]{0,200}") {
        prop_assert_eq!(digest(&s), reference(s.as_bytes()));
    }

    #[test]
    fn utf8_option_matches_reference(s in ".*") {
        let options = DigestOptions { encoding: TextEncoding::Utf8, newlines: Newlines::Preserve };
        prop_assert_eq!(digest_with(&s, &options), reference(s.as_bytes()));
    }

    #[test]
    fn bytes_match_reference(data in proptest::collection::vec(any::<u8>(), 0..600)) {
        prop_assert_eq!(digest_bytes(&data), reference(&data));
    }

    #[test]
    fn streaming_matches_oneshot(
        data in proptest::collection::vec(any::<u8>(), 0..400),
        split in 0usize..400,
    ) {
        let split = split.min(data.len());
        let mut md5 = Md5::new();
        md5.update(&data[..split]);
        md5.update(&data[split..]);
        prop_assert_eq!(md5.finalize(), Md5::oneshot(&data));
    }
}
