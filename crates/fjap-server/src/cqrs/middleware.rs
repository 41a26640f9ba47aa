/// Marker for write operations (POST, PUT, PATCH, DELETE)
pub trait Command {
    const KIND: RequestKind = RequestKind::Command;
}

/// Marker for read operations (GET)
pub trait Query {
    const KIND: RequestKind = RequestKind::Query;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Command,
    Query,
}

impl RequestKind {
    pub fn is_write(self) -> bool {
        matches!(self, RequestKind::Command)
    }
}
