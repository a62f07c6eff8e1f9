use std::{
    cell::Cell,
    io::{self, Read},
    rc::Rc,
};

use crate::Value;

/// Renders `values` as a top-level array, separated by `sep`.
pub(crate) fn array_source(values: &[Value], sep: &str) -> String {
    let items: Vec<String> = values.iter().map(ToString::to_string).collect();
    format!("[{}]", items.join(sep))
}

/// Hands out its bytes in chunks whose sizes are taken, cyclically, from
/// `splits` (each at least one byte).
pub(crate) struct ChunkedReader<'a> {
    data: &'a [u8],
    splits: Vec<usize>,
    next_split: usize,
}

impl<'a> ChunkedReader<'a> {
    pub(crate) fn new(data: &'a [u8], splits: Vec<usize>) -> Self {
        Self {
            data,
            splits,
            next_split: 0,
        }
    }
}

impl Read for ChunkedReader<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let want = if self.splits.is_empty() {
            self.data.len()
        } else {
            let split = self.splits[self.next_split % self.splits.len()];
            self.next_split += 1;
            1 + split % 7
        };
        let n = want.min(buf.len()).min(self.data.len());
        buf[..n].copy_from_slice(&self.data[..n]);
        self.data = &self.data[n..];
        Ok(n)
    }
}

/// Fails every read, counting the attempts.
#[derive(Default)]
pub(crate) struct FailingReader {
    pub(crate) reads: Rc<Cell<usize>>,
}

impl Read for FailingReader {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        self.reads.set(self.reads.get() + 1);
        Err(io::Error::other("source must not be read"))
    }
}

/// Serves `data`, then fails as if the host tore the stream down.
pub(crate) struct TornReader<'a> {
    pub(crate) data: &'a [u8],
}

impl Read for TornReader<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.data.is_empty() {
            return Err(io::Error::new(io::ErrorKind::BrokenPipe, "stream torn down"));
        }
        let n = buf.len().min(self.data.len());
        buf[..n].copy_from_slice(&self.data[..n]);
        self.data = &self.data[n..];
        Ok(n)
    }
}

/// Shared view of what a [`TrackedReader`] has done.
#[derive(Clone, Default)]
pub(crate) struct Tracker {
    pub(crate) bytes_read: Rc<Cell<usize>>,
    pub(crate) dropped: Rc<Cell<bool>>,
}

impl Tracker {
    pub(crate) fn bytes_read(&self) -> usize {
        self.bytes_read.get()
    }

    pub(crate) fn dropped(&self) -> bool {
        self.dropped.get()
    }
}

/// Wraps a reader, recording the bytes handed out and when it is dropped.
pub(crate) struct TrackedReader<R> {
    inner: R,
    tracker: Tracker,
}

impl<R: Read> TrackedReader<R> {
    pub(crate) fn new(inner: R) -> (Self, Tracker) {
        let tracker = Tracker::default();
        (
            Self {
                inner,
                tracker: tracker.clone(),
            },
            tracker,
        )
    }
}

impl<R: Read> Read for TrackedReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.tracker
            .bytes_read
            .set(self.tracker.bytes_read.get() + n);
        Ok(n)
    }
}

impl<R> Drop for TrackedReader<R> {
    fn drop(&mut self) {
        self.tracker.dropped.set(true);
    }
}
