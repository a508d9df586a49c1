use fake::Dummy;

/// Defines board data structure. The `gid` is an opaque identifier owned by
/// the data API; the client never interprets it.
///
#[derive(Clone, Debug, Dummy, PartialEq, Eq)]
pub struct Board {
    pub gid: String,
    pub name: String,
}
