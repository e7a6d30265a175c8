//! Commit records and their three-line wire format

use stopmo_core::{ContentDigest, Error, IncrementalHasher, Result};

/// Identifier of a single commit
///
/// Ids are digests of the log text the commit extends plus the commit
/// timestamp, so they are unique per repository history rather than
/// content-addressed: committing identical content at two different times
/// yields two distinct ids.
#[derive(Copy, Clone, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct CommitId(ContentDigest);

impl CommitId {
    /// Wrap an existing digest
    pub const fn from_digest(digest: ContentDigest) -> Self {
        Self(digest)
    }

    /// Derive the id for the next commit from the log text it will extend
    /// and a millisecond timestamp
    pub fn derive(log_text: &str, ts_unix_ms: u64) -> Self {
        let mut hasher = IncrementalHasher::new();
        hasher.update(log_text.as_bytes());
        hasher.update(ts_unix_ms.to_string().as_bytes());
        Self(hasher.finalize())
    }

    /// The underlying digest
    pub fn digest(&self) -> &ContentDigest {
        &self.0
    }

    /// Render as lowercase hex
    pub fn to_hex(&self) -> String {
        self.0.to_hex()
    }

    /// Parse from a hex string
    pub fn from_hex(text: &str) -> Result<Self> {
        Ok(Self(ContentDigest::from_hex(text)?))
    }
}

impl std::fmt::Debug for CommitId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CommitId({})", self.0)
    }
}

impl std::fmt::Display for CommitId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One entry of the commit log
///
/// Created once per successful commit and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRecord {
    pub id: CommitId,
    pub author: String,
    pub message: String,
}

impl CommitRecord {
    /// Create a new record
    pub fn new(id: CommitId, author: String, message: String) -> Self {
        Self {
            id,
            author,
            message,
        }
    }

    /// Render the record in its three-line log form:
    /// ```text
    /// commit <id>
    /// Author: <author>
    /// <message>
    /// ```
    pub fn serialize(&self) -> String {
        format!("commit {}\nAuthor: {}\n{}", self.id, self.author, self.message)
    }

    /// Parse a record from its three-line log form
    pub fn deserialize(block: &str) -> Result<Self> {
        let mut lines = block.lines();

        let header = lines
            .next()
            .ok_or_else(|| Error::MalformedRecord("empty record".to_string()))?;
        let id_hex = header
            .strip_prefix("commit ")
            .ok_or_else(|| Error::MalformedRecord(format!("bad header line: {header}")))?;
        let id = CommitId::from_hex(id_hex)?;

        let author_line = lines
            .next()
            .ok_or_else(|| Error::MalformedRecord("missing author line".to_string()))?;
        let author = author_line
            .strip_prefix("Author: ")
            .ok_or_else(|| Error::MalformedRecord(format!("bad author line: {author_line}")))?;

        let message = lines
            .next()
            .ok_or_else(|| Error::MalformedRecord("missing message line".to_string()))?;
        if lines.next().is_some() {
            return Err(Error::MalformedRecord(
                "record has more than three lines".to_string(),
            ));
        }

        Ok(Self {
            id,
            author: author.to_string(),
            message: message.to_string(),
        })
    }
}
