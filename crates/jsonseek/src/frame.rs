use crate::value::{Array, Map, Value};

/// Stack entry – one per open container inside the current element
#[derive(Debug)]
pub(crate) enum Frame {
    Array(Array),
    Object {
        map: Map,
        pending_key: Option<String>, // key waiting for its value
    },
}

impl Frame {
    pub(crate) fn new_array_frame() -> Self {
        Frame::Array(Array::new())
    }

    pub(crate) fn new_object_frame() -> Self {
        Frame::Object {
            map: Map::new(),
            pending_key: None,
        }
    }

    fn into_value(self) -> Value {
        match self {
            Frame::Array(array) => Value::Array(array),
            Frame::Object { map, .. } => Value::Object(map),
        }
    }
}

/// Open containers of the element being decoded, outermost first.
///
/// The top-level array itself is never on the stack: an empty stack means the
/// decoder is positioned directly inside the top-level array.
#[derive(Debug, Default)]
pub(crate) struct FrameStack {
    stack: Vec<Frame>,
}

impl FrameStack {
    pub(crate) fn new() -> Self {
        Self {
            stack: Vec::with_capacity(16),
        }
    }

    pub(crate) fn depth(&self) -> usize {
        self.stack.len()
    }

    pub(crate) fn last(&self) -> Option<&Frame> {
        self.stack.last()
    }

    pub(crate) fn push(&mut self, frame: Frame) {
        self.stack.push(frame);
    }

    /// Closes the innermost container and returns it as a value.
    pub(crate) fn pop(&mut self) -> Option<Value> {
        self.stack.pop().map(Frame::into_value)
    }

    pub(crate) fn set_pending_key(&mut self, key: String) {
        match self.stack.last_mut() {
            Some(Frame::Object { pending_key, .. }) => *pending_key = Some(key),
            _ => debug_assert!(false, "property name outside of an object"),
        }
    }

    /// Attaches a completed value to the innermost open container.
    ///
    /// Returns the value back when no container is open, i.e. when it is a
    /// complete top-level element.
    pub(crate) fn attach(&mut self, value: Value) -> Option<Value> {
        match self.stack.last_mut() {
            None => Some(value),
            Some(Frame::Array(array)) => {
                array.push(value);
                None
            }
            Some(Frame::Object { map, pending_key }) => {
                debug_assert!(pending_key.is_some(), "object value without a key");
                if let Some(key) = pending_key.take() {
                    map.insert(key, value);
                }
                None
            }
        }
    }

    pub(crate) fn clear(&mut self) {
        self.stack = Vec::new();
    }
}

#[cfg(test)]
mod tests {
    use super::{Frame, FrameStack};
    use crate::value::{Map, Value};

    #[test]
    fn builds_nested_values_inside_out() {
        let mut frames = FrameStack::new();
        frames.push(Frame::new_object_frame());
        frames.set_pending_key("xs".into());
        frames.push(Frame::new_array_frame());
        assert_eq!(frames.depth(), 2);

        assert!(frames.attach(Value::Number(1.0)).is_none());
        assert!(frames.attach(Value::Null).is_none());
        let inner = frames.pop().unwrap();
        assert!(frames.attach(inner).is_none());

        let outer = frames.pop().unwrap();
        assert_eq!(frames.depth(), 0);

        let mut expected = Map::new();
        expected.insert(
            "xs".into(),
            Value::Array(vec![Value::Number(1.0), Value::Null]),
        );
        assert_eq!(frames.attach(outer), Some(Value::Object(expected)));
    }

    #[test]
    fn duplicate_keys_keep_the_last_value() {
        let mut frames = FrameStack::new();
        frames.push(Frame::new_object_frame());
        for n in [1.0, 2.0] {
            frames.set_pending_key("k".into());
            frames.attach(Value::Number(n));
        }
        let Some(Value::Object(ref map)) = frames.pop() else {
            panic!("expected an object");
        };
        assert_eq!(map.get("k"), Some(&Value::Number(2.0)));
    }
}
