use quickcheck::QuickCheck;

use super::utils::{ChunkedReader, array_source};
use crate::{DecoderOptions, Lookup, LookupResult, TargetIndex, Value, decode};

/// Whether `ours` and `theirs` denote the same JSON value.
fn same(ours: &Value, theirs: &serde_json::Value) -> bool {
    match (ours, theirs) {
        (Value::Null, serde_json::Value::Null) => true,
        (Value::Boolean(a), serde_json::Value::Bool(b)) => a == b,
        (Value::Number(a), serde_json::Value::Number(b)) => b.as_f64() == Some(*a),
        (Value::String(a), serde_json::Value::String(b)) => a == b,
        (Value::Array(a), serde_json::Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(a, b)| same(a, b))
        }
        (Value::Object(a), serde_json::Value::Object(b)) => {
            a.len() == b.len()
                && a.iter()
                    .all(|(key, a)| b.get(key).is_some_and(|b| same(a, b)))
        }
        _ => false,
    }
}

fn tests() -> u64 {
    #[cfg(not(miri))]
    let tests = if is_ci::cached() { 10_000 } else { 1_000 };
    #[cfg(miri)]
    let tests = 10;
    tests
}

/// Property: looking up any ordinal of an arbitrary array, read in arbitrary
/// chunks through an arbitrarily small buffer, yields exactly the element an
/// in-memory parser finds there, or `NotFound` past the end.
#[test]
fn lookup_matches_in_memory_parse_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(elements: Vec<Value>, index: usize, splits: Vec<usize>, capacity: usize) -> bool {
        let src = array_source(&elements, ", ");
        let Ok(reference) = serde_json::from_str::<Vec<serde_json::Value>>(&src) else {
            return false;
        };
        let index = index % (elements.len() + 2);

        let options = DecoderOptions {
            buffer_capacity: 1 + capacity % 16,
            ..Default::default()
        };
        let reader = ChunkedReader::new(src.as_bytes(), splits);
        let result = Lookup::new(options).find(reader, TargetIndex::new(index));

        match (result, reference.get(index)) {
            (Ok(LookupResult::Found(found)), Some(expected)) => {
                let ok = same(&found, expected) && found == elements[index];
                if !ok {
                    dbg!(&src, index, &found, expected);
                }
                ok
            }
            (Ok(LookupResult::NotFound), None) => true,
            (other, expected) => {
                dbg!(&src, index, other, expected);
                false
            }
        }
    }

    QuickCheck::new()
        .tests(tests())
        .quickcheck(prop as fn(Vec<Value>, usize, Vec<usize>, usize) -> bool);
}

/// Property: full iteration yields every element, in order, and then ends.
#[test]
fn decode_yields_every_element_quickcheck() {
    #[allow(clippy::needless_pass_by_value)]
    fn prop(elements: Vec<Value>, splits: Vec<usize>) -> bool {
        let src = array_source(&elements, ",\n  ");
        let mut decoder = decode(ChunkedReader::new(src.as_bytes(), splits));
        let decoded: Result<Vec<Value>, _> = decoder.by_ref().collect();

        match decoded {
            Ok(decoded) => {
                decoded == elements
                    && decoder.is_finished()
                    && decoder.elements_emitted() == elements.len()
                    && decoder.position().offset == src.len()
            }
            Err(err) => {
                dbg!(&src, err);
                false
            }
        }
    }

    QuickCheck::new()
        .tests(tests())
        .quickcheck(prop as fn(Vec<Value>, Vec<usize>) -> bool);
}
