use std::fmt;

/// One piece of a scanned template
#[derive(Clone, Debug, PartialEq)]
pub enum Marker {
    /// Text that is never touched by the renderer
    Text(String),
    /// A `{@name}` token
    Token(String),
    /// A `{@each:name}` tag
    BlockStart(String),
    /// A `{@endeach:name}` tag
    BlockEnd(String),
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Marker::Text(ref s) => write!(f, "{}", s),
            Marker::Token(ref n) => write!(f, "{{@{}}}", n),
            Marker::BlockStart(ref n) => write!(f, "{{@each:{}}}", n),
            Marker::BlockEnd(ref n) => write!(f, "{{@endeach:{}}}", n),
        }
    }
}
