#![no_main]
use std::cell::RefCell;

use arbitrary::Arbitrary;
use json5_parse::{ParserOptions, parse_with_options};
use libfuzzer_sys::{fuzz_mutator, fuzz_target, fuzzer_mutate};
use rand::rngs::SmallRng;
use rand::{Rng, RngCore, SeedableRng};
use serde_json::{Map, Value};

const HEADER: usize = 1; // option flags

thread_local! {
    static RNG: RefCell<SmallRng> =
        RefCell::new(SmallRng::from_os_rng());
}

/// Whitespace and comments, spliced between generated documents.
static TRIVIA_TABLE: &[&[u8]] = &[
    b" ",
    b"\t",
    b"\n",
    b"\r",
    b"// line comment\n",
    b"/* block */",
    b"/** stars **/",
    b"/* multi\nline */",
];

fn with_rng<F, R>(f: F) -> R
where
    F: FnOnce(&mut SmallRng) -> R,
{
    RNG.with(|cell| f(&mut cell.borrow_mut()))
}

fn mutator(data: &mut [u8], size: usize, max_size: usize, seed: u32) -> usize {
    if size < HEADER || seed.is_multiple_of(10) {
        data[0] = with_rng(|rng| rng.next_u32() as u8);

        let mut prefix = HEADER;
        let limit = max_size - prefix;
        prefix += append_trivia(&mut data[prefix..], limit);
        let limit = max_size - prefix;
        prefix += append_value(&mut data[prefix..], size, limit);
        let limit = max_size - prefix;
        prefix += append_trivia(&mut data[prefix..], limit);

        prefix
    } else {
        fuzzer_mutate(data, size, max_size)
    }
}

/// Appends up to eight trivia snippets to `buf` without exceeding `limit`.
/// Returns the number of bytes written.
fn append_trivia(buf: &mut [u8], limit: usize) -> usize {
    with_rng(|rng| {
        if limit == 0 {
            return 0;
        }

        let count = rng.random_range(1..=limit.min(8));
        let mut written = 0;

        for _ in 0..count {
            let t = TRIVIA_TABLE[rng.random_range(0..TRIVIA_TABLE.len())];
            if written + t.len() > limit {
                break;
            }

            buf[written..written + t.len()].copy_from_slice(t);
            written += t.len();
        }
        written
    })
}

fn append_value(data: &mut [u8], size: usize, limit: usize) -> usize {
    let value = loop {
        let s = with_rng(|rng| rng.random_range(size / 2..=size * 2).min(limit));
        let bytes: Vec<u8> = with_rng(|rng| (0..s).map(|_| rng.random::<u8>()).collect());
        if let Ok(value) = ArbitraryValue::arbitrary(&mut arbitrary::Unstructured::new(&bytes)) {
            break value;
        }
    };

    let serialized = serde_json::to_vec(&value.0).expect("Failed to serialize arbitrary value");

    let len = serialized.len().min(limit);
    data[..len].copy_from_slice(&serialized[..len]);

    len
}

fuzz_mutator!(|data: &mut [u8], size: usize, max_size: usize, seed: u32| {
    mutator(data, size, max_size, seed)
});

#[derive(Debug)]
struct ArbitraryValue(Value);

impl<'a> Arbitrary<'a> for ArbitraryValue {
    fn arbitrary(u: &mut arbitrary::Unstructured<'_>) -> arbitrary::Result<Self> {
        let value = match u.choose_index(21)? {
            0 => Value::Null,
            1 => Value::Bool(u.arbitrary()?),
            2 => Value::from(u.arbitrary::<i64>()?),
            3 => {
                let n: f64 = u.arbitrary()?;
                Value::Number(
                    serde_json::Number::from_f64(n).ok_or(arbitrary::Error::IncorrectFormat)?,
                )
            }
            4..=10 => Value::String(u.arbitrary()?),
            11..=15 => {
                let elems: Vec<ArbitraryValue> = u.arbitrary()?;
                Value::Array(elems.into_iter().map(|v| v.0).collect())
            }
            _ => {
                let m: Vec<(String, ArbitraryValue)> = u.arbitrary()?;
                Value::Object(m.into_iter().map(|(k, v)| (k, v.0)).collect::<Map<_, _>>())
            }
        };
        Ok(ArbitraryValue(value))
    }
}

fn parser(data: &[u8]) {
    let Some((&flags, data)) = data.split_first() else {
        return;
    };

    let options = ParserOptions {
        max_depth: usize::from(flags >> 2) + 1,
        allow_control_characters: flags & 1 != 0,
        unicode_escapes: flags & 2 != 0,
    };

    let Ok(value) = parse_with_options(data, options) else {
        return;
    };

    // Printed values never need escapes and may carry raw control characters
    // decoded from the input.
    let reparse_options = ParserOptions {
        max_depth: options.max_depth,
        ..ParserOptions::default()
    };
    let printed = value.to_string();
    let reparsed = parse_with_options(&printed, reparse_options)
        .unwrap_or_else(|err| panic!("{printed:?} did not re-parse: {err}"));
    assert_eq!(reparsed, value, "{printed:?}");
}

fuzz_target!(|data: &[u8]| parser(data));
