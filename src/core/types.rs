//! Core types shared across Stratum modules

use serde::Serialize;
use serde::ser::{SerializeMap, Serializer};
use std::collections::{BTreeMap, HashMap};
use std::path::PathBuf;

/// Classification of a minimal lexical unit.
///
/// The kind set is part of the boundary contract with downstream consumers;
/// `Symbol` is reserved in that contract even though the current scanner
/// emits punctuation as singleton `Other` tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TokenKind {
    Whitespace,
    Newline,
    Word,
    String,
    Comment,
    Keyword,
    Number,
    Symbol,
    Other,
}

/// One token produced by the tokenizer.
///
/// Concatenating the `text` of every token in sequence reproduces the source
/// file byte for byte.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub text: String,
    pub kind: TokenKind,
    /// 1-based source line of the token's first character.
    pub line: usize,
    /// 0-based column of the token's first character.
    pub column: usize,
    /// Brace/bracket/paren nesting level. Closing delimiters are recorded at
    /// the enclosing depth, not the depth of the body they close.
    pub depth: usize,
    /// Structured documentation, present on `/** ... */` comment tokens.
    pub doc: Option<DocComment>,
}

/// Recognized documentation tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DocTagKind {
    Author,
    Version,
    Since,
    See,
    Return,
    Deprecated,
    Params,
    Throws,
}

impl DocTagKind {
    /// Maps an `@tag` word (without the `@`) to its canonical kind.
    /// Returns `None` for tags outside the recognized set.
    pub fn parse(tag: &str) -> Option<Self> {
        match tag {
            "author" => Some(Self::Author),
            "version" => Some(Self::Version),
            "since" => Some(Self::Since),
            "see" => Some(Self::See),
            "return" | "returns" => Some(Self::Return),
            "deprecated" => Some(Self::Deprecated),
            "param" | "params" => Some(Self::Params),
            "throws" | "exception" => Some(Self::Throws),
            _ => None,
        }
    }

    /// Whether the tag consumes the following word as a nested-map key.
    pub fn takes_key(self) -> bool {
        matches!(self, Self::Params | Self::Throws)
    }
}

/// Value of one documentation tag: free text, or a name-keyed map for
/// `params` and `throws`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DocTagValue {
    Text(String),
    Entries(BTreeMap<String, String>),
}

/// Structured representation of a `/** ... */` comment.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DocComment {
    pub description: String,
    #[serde(flatten)]
    pub tags: BTreeMap<DocTagKind, DocTagValue>,
}

impl DocComment {
    /// Free text of a tag, if present and textual.
    pub fn tag_text(&self, kind: DocTagKind) -> Option<&str> {
        match self.tags.get(&kind) {
            Some(DocTagValue::Text(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Nested entries of a `params`/`throws` tag.
    pub fn tag_entries(&self, kind: DocTagKind) -> Option<&BTreeMap<String, String>> {
        match self.tags.get(&kind) {
            Some(DocTagValue::Entries(m)) => Some(m),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Public,
    Private,
    Protected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberKind {
    Constructor,
    Accessor,
    Method,
    Field,
}

/// A type annotation: a dot-joined name with at most one nested generic
/// argument (`Map<string>` parses fully; further arguments are skipped).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeRef {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtype: Option<Box<TypeRef>>,
}

impl TypeRef {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            subtype: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Parameter {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub declared_type: Option<TypeRef>,
    pub optional: bool,
    /// Single token following `=`. Multi-token default expressions are not
    /// captured (known limitation).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
}

/// One declared member of a class, recovered best-effort.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassMember {
    pub name: String,
    pub kind: MemberKind,
    pub visibility: Visibility,
    pub is_static: bool,
    pub is_readonly: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc: Option<DocComment>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub declared_type: Option<TypeRef>,
    /// Populated for constructors and methods only.
    pub parameters: Vec<Parameter>,
}

/// Structural metadata for one declared class.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassType {
    pub name: String,
    /// Project-relative path of the declaring file.
    pub file: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_class: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc: Option<DocComment>,
    /// Members in declaration order; a re-declared name replaces the earlier
    /// entry in place.
    pub members: Vec<ClassMember>,
    /// Class names imported by the declaring file before this declaration.
    pub imported_class_names: Vec<String>,
}

impl ClassType {
    pub fn member(&self, name: &str) -> Option<&ClassMember> {
        self.members.iter().find(|m| m.name == name)
    }

    /// Inserts a member, replacing any prior member of the same name while
    /// keeping its declaration position.
    pub fn insert_member(&mut self, member: ClassMember) {
        if let Some(existing) = self.members.iter_mut().find(|m| m.name == member.name) {
            *existing = member;
        } else {
            self.members.push(member);
        }
    }
}

/// Per-file analysis result. Lives only for the duration of one file's
/// analysis; the file's class contributions persist in the registry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedFile {
    pub path: PathBuf,
    /// Classes declared at depth 0.
    pub classes: Vec<String>,
    /// Resolved project-relative import paths.
    pub imports: Vec<PathBuf>,
}

/// Name-keyed class registry, one global namespace per build invocation.
///
/// Iteration follows first-insertion order; re-analysis of a class name
/// overwrites the entry without moving it (intentional, supports iterative
/// builds).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClassRegistry {
    order: Vec<String>,
    classes: HashMap<String, ClassType>,
}

impl ClassRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, class: ClassType) {
        if !self.classes.contains_key(&class.name) {
            self.order.push(class.name.clone());
        }
        self.classes.insert(class.name.clone(), class);
    }

    pub fn get(&self, name: &str) -> Option<&ClassType> {
        self.classes.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut ClassType> {
        self.classes.get_mut(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.classes.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Class names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Classes in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &ClassType> {
        self.order.iter().filter_map(|n| self.classes.get(n))
    }
}

impl Serialize for ClassRegistry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.order.len()))?;
        for class in self.iter() {
            map.serialize_entry(&class.name, class)?;
        }
        map.end()
    }
}

/// The two artifacts the pipeline exposes outward, plus per-file detail.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    /// Dependency-safe file ordering: seeds first, then dependency order,
    /// then unreachable files in discovery order.
    pub ordered: Vec<PathBuf>,
    pub registry: ClassRegistry,
    pub files: Vec<ParsedFile>,
}

impl AnalysisReport {
    pub fn class_count(&self) -> usize {
        self.registry.len()
    }

    pub fn member_count(&self) -> usize {
        self.registry.iter().map(|c| c.members.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bare_class(name: &str, file: &str) -> ClassType {
        ClassType {
            name: name.to_string(),
            file: PathBuf::from(file),
            base_class: None,
            doc: None,
            members: vec![],
            imported_class_names: vec![],
        }
    }

    #[test]
    fn test_registry_overwrite_keeps_position() {
        let mut registry = ClassRegistry::new();
        registry.insert(bare_class("A", "a.ts"));
        registry.insert(bare_class("B", "b.ts"));
        registry.insert(bare_class("C", "c.ts"));

        // Re-register B from another file: value replaced, position kept.
        registry.insert(bare_class("B", "b2.ts"));

        let names: Vec<&str> = registry.names().collect();
        assert_eq!(names, vec!["A", "B", "C"]);
        assert_eq!(registry.get("B").unwrap().file, PathBuf::from("b2.ts"));
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_member_replacement() {
        let mut class = bare_class("A", "a.ts");

        let field = |name: &str, vis: Visibility| ClassMember {
            name: name.to_string(),
            kind: MemberKind::Field,
            visibility: vis,
            is_static: false,
            is_readonly: false,
            doc: None,
            declared_type: None,
            parameters: vec![],
        };

        class.insert_member(field("x", Visibility::Public));
        class.insert_member(field("y", Visibility::Public));
        class.insert_member(field("x", Visibility::Private));

        assert_eq!(class.members.len(), 2);
        assert_eq!(class.members[0].name, "x");
        assert_eq!(class.members[0].visibility, Visibility::Private);
    }

    #[test]
    fn test_doc_tag_dispatch() {
        assert_eq!(DocTagKind::parse("returns"), Some(DocTagKind::Return));
        assert_eq!(DocTagKind::parse("exception"), Some(DocTagKind::Throws));
        assert_eq!(DocTagKind::parse("todo"), None);
        assert!(DocTagKind::Params.takes_key());
        assert!(!DocTagKind::See.takes_key());
    }
}
