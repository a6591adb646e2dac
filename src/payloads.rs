/// Code-execution request bodies sent during a load test.
use serde::{Deserialize, Serialize};

/// A single source file inside an execution request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceFile {
    /// Optional file name; some runtimes (compiled languages) need one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// File contents.
    pub content: String,
}

impl SourceFile {
    pub fn anonymous(content: impl Into<String>) -> Self {
        Self {
            name: None,
            content: content.into(),
        }
    }

    pub fn named(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            content: content.into(),
        }
    }
}

/// Body of `POST /api/v2/execute`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payload {
    pub language: String,
    pub version: String,
    pub files: Vec<SourceFile>,
}

impl Payload {
    pub fn new(
        language: impl Into<String>,
        version: impl Into<String>,
        files: Vec<SourceFile>,
    ) -> Self {
        Self {
            language: language.into(),
            version: version.into(),
            files,
        }
    }
}

/// Ordered, non-empty set of payloads selected round-robin by request index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayloadSet {
    payloads: Vec<Payload>,
}

impl PayloadSet {
    /// Build a set from explicit payloads. Returns `None` for an empty list,
    /// since round-robin selection needs at least one entry.
    pub fn new(payloads: Vec<Payload>) -> Option<Self> {
        if payloads.is_empty() {
            None
        } else {
            Some(Self { payloads })
        }
    }

    /// Payload for request `index`: `payloads[index mod len]`.
    pub fn select(&self, index: usize) -> &Payload {
        &self.payloads[index % self.payloads.len()]
    }

    pub fn len(&self) -> usize {
        self.payloads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.payloads.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Payload> {
        self.payloads.iter()
    }
}

impl Default for PayloadSet {
    /// Three small workloads: an interpreted script, a JIT runtime, and a
    /// compiled program, each summing 0..100.
    fn default() -> Self {
        Self {
            payloads: vec![
                Payload::new(
                    "python",
                    "3.12.0",
                    vec![SourceFile::anonymous("print(sum(range(100)))")],
                ),
                Payload::new(
                    "javascript",
                    "20.11.1",
                    vec![SourceFile::anonymous(
                        "console.log(Array.from({length:100}, (_, i) => i).reduce((a, b) => a + b, 0));",
                    )],
                ),
                Payload::new(
                    "cpp",
                    "10.2.0",
                    vec![SourceFile::named(
                        "main.cpp",
                        "#include <iostream>\nint main() { int sum = 0; for(int i=0; i<100; i++) sum += i; std::cout << sum << std::endl; return 0; }",
                    )],
                ),
            ],
        }
    }
}
