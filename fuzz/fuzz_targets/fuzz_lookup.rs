#![no_main]
use std::io::{self, Read};

use arbitrary::Arbitrary;
use jsonseek::{DecoderOptions, Lookup, LookupResult, TargetIndex, Value};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Case {
    target: u16,
    buffer_capacity: u8,
    splits: Vec<u8>,
    data: Vec<u8>,
}

/// Hands out `data` in short reads whose sizes come from `splits`.
struct Chunked<'a> {
    data: &'a [u8],
    splits: &'a [u8],
    next: usize,
}

impl Read for Chunked<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let want = match self.splits {
            [] => self.data.len(),
            splits => 1 + usize::from(splits[self.next % splits.len()]),
        };
        self.next += 1;
        let n = want.min(buf.len()).min(self.data.len());
        buf[..n].copy_from_slice(&self.data[..n]);
        self.data = &self.data[n..];
        Ok(n)
    }
}

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
            a.len() == b.len() && a.iter().all(|(k, a)| b.get(k).is_some_and(|b| same(a, b)))
        }
        _ => false,
    }
}

fuzz_target!(|case: Case| {
    let options = DecoderOptions {
        buffer_capacity: usize::from(case.buffer_capacity),
        ..Default::default()
    };
    let target = usize::from(case.target);
    let reader = Chunked {
        data: &case.data,
        splits: &case.splits,
        next: 0,
    };
    let ours = Lookup::new(options).find(reader, TargetIndex::new(target));

    // Only documents the reference accepts pin down the outcome; anything it
    // rejects may still hold a well-formed prefix up to the target.
    let Ok(reference) = serde_json::from_slice::<Vec<serde_json::Value>>(&case.data) else {
        return;
    };
    match (ours, reference.get(target)) {
        (Ok(LookupResult::Found(found)), Some(expected)) => {
            assert!(same(&found, expected), "{found} != {expected}");
        }
        (Ok(LookupResult::NotFound), None) => {}
        (ours, expected) => panic!("lookup {target}: {ours:?}, reference {expected:?}"),
    }
});
