//! Structural analyzer
//!
//! Walks one file's token sequence to recognize import statements and class
//! declarations/members, updating the class registry. The pass tracks only
//! depth-0 declarations and depth-1 members of the currently open class;
//! everything deeper is skipped. Member extraction is best-effort by design:
//! ambiguous shapes are recorded with whatever was recovered, never rejected.

use crate::core::types::{
    ClassMember, ClassRegistry, ClassType, DocComment, MemberKind, Parameter, ParsedFile, Token,
    TokenKind, TypeRef, Visibility,
};
use crate::error::AnalyzeError;
use std::path::{Component, Path, PathBuf};

/// Mutable state of one build invocation: the global class registry plus the
/// per-file results. Constructed fresh per run; nothing persists across runs.
#[derive(Debug, Default)]
pub struct AnalysisContext {
    /// Source extension relative imports are normalized to (without the dot).
    extension: String,
    pub registry: ClassRegistry,
    pub files: Vec<ParsedFile>,
}

impl AnalysisContext {
    pub fn new(extension: impl Into<String>) -> Self {
        Self {
            extension: extension.into(),
            registry: ClassRegistry::new(),
            files: Vec::new(),
        }
    }

    /// Analyzes one file's tokens, updating the registry. `path` must be
    /// project-relative; it becomes the declaring file of every class the
    /// file declares at depth 0.
    pub fn analyze_file(
        &mut self,
        path: &Path,
        tokens: &[Token],
    ) -> Result<ParsedFile, AnalyzeError> {
        let mut parsed = ParsedFile {
            path: path.to_path_buf(),
            classes: Vec::new(),
            imports: Vec::new(),
        };
        let mut imported_names: Vec<String> = Vec::new();
        let mut pending_doc: Option<DocComment> = None;
        let mut current_class: Option<String> = None;

        let mut i = 0;
        while i < tokens.len() {
            let token = &tokens[i];
            match token.kind {
                TokenKind::Comment => {
                    if let Some(doc) = &token.doc {
                        pending_doc = Some(doc.clone());
                    }
                    i += 1;
                }
                TokenKind::Keyword
                    if (token.text == "import" || token.text == "export")
                        && token.depth == 0 =>
                {
                    let scan = read_import(tokens, i);
                    if let Some(specifier) = &scan.specifier
                        && let Some(resolved) = self.resolve_import(path, specifier)?
                    {
                        parsed.imports.push(resolved);
                        imported_names.extend(scan.names.iter().cloned());
                    }
                    i = scan.next;
                }
                TokenKind::Keyword if token.text == "class" => {
                    if token.depth != 0 {
                        return Err(AnalyzeError::WrongBlockLevel {
                            file: path.to_path_buf(),
                            line: token.line,
                        });
                    }
                    match read_class_header(tokens, i) {
                        Some(header) => {
                            self.registry.insert(ClassType {
                                name: header.name.clone(),
                                file: path.to_path_buf(),
                                base_class: header.base,
                                doc: pending_doc.take(),
                                members: Vec::new(),
                                imported_class_names: imported_names.clone(),
                            });
                            parsed.classes.push(header.name.clone());
                            current_class = Some(header.name);
                            i = header.next;
                        }
                        None => i += 1,
                    }
                }
                _ if current_class.is_some() && token.depth == 1 && starts_member(token) => {
                    let (member, next) = read_member(tokens, i, pending_doc.take());
                    if let Some(name) = &current_class
                        && let Some(class) = self.registry.get_mut(name)
                    {
                        class.insert_member(member);
                    }
                    i = next;
                }
                _ => {
                    if token.text == "}" && token.depth == 0 {
                        current_class = None;
                    }
                    i += 1;
                }
            }
        }

        self.files.push(parsed.clone());
        Ok(parsed)
    }

    /// Resolves an import specifier against the importing file's directory
    /// into a project-relative path with a normalized extension. Bare
    /// specifiers are external modules and resolve to `None`; a relative
    /// specifier escaping the project root is fatal.
    fn resolve_import(
        &self,
        file: &Path,
        specifier: &str,
    ) -> Result<Option<PathBuf>, AnalyzeError> {
        if !specifier.starts_with('.') {
            return Ok(None);
        }

        let base = file.parent().unwrap_or_else(|| Path::new(""));
        let mut stack: Vec<std::ffi::OsString> = Vec::new();
        for component in base.join(specifier).components() {
            match component {
                Component::CurDir => {}
                Component::ParentDir => {
                    if stack.pop().is_none() {
                        return Err(AnalyzeError::UnresolvedImport {
                            specifier: specifier.to_string(),
                            file: file.to_path_buf(),
                        });
                    }
                }
                other => stack.push(other.as_os_str().to_os_string()),
            }
        }

        let mut resolved: PathBuf = stack.iter().collect();
        resolved.set_extension(&self.extension);
        Ok(Some(resolved))
    }
}

fn is_significant(token: &Token) -> bool {
    !matches!(
        token.kind,
        TokenKind::Whitespace | TokenKind::Newline | TokenKind::Comment
    )
}

fn next_significant(tokens: &[Token], from: usize) -> Option<usize> {
    (from..tokens.len()).find(|&i| is_significant(&tokens[i]))
}

fn prev_significant(tokens: &[Token], from: usize) -> Option<usize> {
    (0..from).rev().find(|&i| is_significant(&tokens[i]))
}

/// A Word (or the `constructor` keyword) opens a member declaration.
fn starts_member(token: &Token) -> bool {
    token.kind == TokenKind::Word
        || (token.kind == TokenKind::Keyword && token.text == "constructor")
}

struct ImportScan {
    /// Word tokens between `import` and `from` (the imported class names).
    names: Vec<String>,
    /// Quoted module specifier, without its quotes.
    specifier: Option<String>,
    next: usize,
}

/// Lookahead for one import or re-export statement starting at its opening
/// keyword. The construct is keyed on `from` followed by a String (so
/// `export { A } from "./a"` contributes an edge like an import does);
/// side-effect imports (`import "./x"`) with no name list are tolerated.
fn read_import(tokens: &[Token], import_idx: usize) -> ImportScan {
    let mut names = Vec::new();
    let mut idx = import_idx + 1;
    while idx < tokens.len() {
        let token = &tokens[idx];
        if !is_significant(token) {
            idx += 1;
            continue;
        }
        match token.kind {
            TokenKind::Word => names.push(token.text.clone()),
            TokenKind::String => {
                return ImportScan {
                    names,
                    specifier: Some(strip_quotes(&token.text)),
                    next: idx + 1,
                };
            }
            TokenKind::Keyword if token.text == "from" => {
                if let Some(s) = next_significant(tokens, idx + 1)
                    && tokens[s].kind == TokenKind::String
                {
                    return ImportScan {
                        names,
                        specifier: Some(strip_quotes(&tokens[s].text)),
                        next: s + 1,
                    };
                }
                break;
            }
            // A malformed statement ends at `;` or at the next declaration.
            TokenKind::Keyword if token.text == "import" || token.text == "class" => break,
            _ if token.text == ";" => break,
            _ => {}
        }
        idx += 1;
    }
    ImportScan {
        names: Vec::new(),
        specifier: None,
        next: idx,
    }
}

fn strip_quotes(text: &str) -> String {
    if text.len() >= 2 {
        text[1..text.len() - 1].to_string()
    } else {
        text.to_string()
    }
}

struct ClassHeader {
    name: String,
    base: Option<String>,
    next: usize,
}

/// Lookahead for a class declaration header starting at the `class` keyword:
/// name, optional `extends Base` (dotted, optionally generic).
fn read_class_header(tokens: &[Token], class_idx: usize) -> Option<ClassHeader> {
    let name_idx = next_significant(tokens, class_idx + 1)?;
    if tokens[name_idx].kind != TokenKind::Word {
        return None;
    }
    let name = tokens[name_idx].text.clone();

    let mut base = None;
    let mut idx = name_idx + 1;
    while idx < tokens.len() {
        let token = &tokens[idx];
        if !is_significant(token) {
            idx += 1;
            continue;
        }
        if token.text == "{" || token.text == ";" {
            break;
        }
        if token.kind == TokenKind::Keyword
            && token.text == "extends"
            && let Some((ty, after)) = read_type_ref(tokens, idx + 1)
        {
            base = Some(ty.name);
            idx = after;
            continue;
        }
        idx += 1;
    }

    Some(ClassHeader { name, base, next: idx })
}

/// Lookahead for a type reference: a Word, extended by `.`-joined Words,
/// optionally followed by `<` and exactly one nested type reference.
fn read_type_ref(tokens: &[Token], from: usize) -> Option<(TypeRef, usize)> {
    let start = next_significant(tokens, from)?;
    if tokens[start].kind != TokenKind::Word {
        return None;
    }
    let mut ty = TypeRef::new(tokens[start].text.clone());
    let mut idx = start + 1;

    // Dotted name parts.
    while let Some(dot) = next_significant(tokens, idx) {
        if tokens[dot].text != "." {
            break;
        }
        let Some(part) = next_significant(tokens, dot + 1) else {
            break;
        };
        if tokens[part].kind != TokenKind::Word {
            break;
        }
        ty.name.push('.');
        ty.name.push_str(&tokens[part].text);
        idx = part + 1;
    }

    // Single generic argument.
    if let Some(open) = next_significant(tokens, idx)
        && tokens[open].text == "<"
        && let Some((subtype, after)) = read_type_ref(tokens, open + 1)
    {
        ty.subtype = Some(Box::new(subtype));
        idx = after;
        if let Some(close) = next_significant(tokens, idx)
            && tokens[close].text == ">"
        {
            idx = close + 1;
        }
    }

    Some((ty, idx))
}

/// Reads one member declaration starting at its name token (depth 1 inside a
/// class body). Never fails: whatever was recovered is recorded.
fn read_member(
    tokens: &[Token],
    name_idx: usize,
    doc: Option<DocComment>,
) -> (ClassMember, usize) {
    let name_token = &tokens[name_idx];
    let base_depth = name_token.depth;
    let is_constructor = name_token.kind == TokenKind::Keyword;

    // Walk backward over contiguous keywords to collect modifiers.
    let mut visibility = Visibility::Public;
    let mut is_static = false;
    let mut is_readonly = false;
    let mut accessor = false;
    let mut back = name_idx;
    while let Some(prev) = prev_significant(tokens, back) {
        if tokens[prev].kind != TokenKind::Keyword {
            break;
        }
        match tokens[prev].text.as_str() {
            "private" => visibility = Visibility::Private,
            "protected" => visibility = Visibility::Protected,
            "public" => visibility = Visibility::Public,
            "static" => is_static = true,
            "readonly" => is_readonly = true,
            "get" | "set" => accessor = true,
            _ => {}
        }
        back = prev;
    }

    // Forward scan to the member's terminator: a depth-1 `;`, or the
    // matching close of a body `{`.
    let mut declared_type = None;
    let mut parameters = Vec::new();
    let mut saw_parens = false;
    let mut idx = name_idx + 1;
    let mut next = tokens.len();
    while idx < tokens.len() {
        let token = &tokens[idx];
        if !is_significant(token) {
            idx += 1;
            continue;
        }
        if token.depth < base_depth {
            // The class closed before a terminator; leave it to the caller.
            next = idx;
            break;
        }
        if token.depth == base_depth {
            match token.text.as_str() {
                ";" => {
                    next = idx + 1;
                    break;
                }
                ":" if declared_type.is_none() => {
                    if let Some((ty, after)) = read_type_ref(tokens, idx + 1) {
                        declared_type = Some(ty);
                        idx = after;
                        continue;
                    }
                }
                "(" if !saw_parens => {
                    saw_parens = true;
                    let (params, after) = read_parameters(tokens, idx);
                    parameters = params;
                    idx = after;
                    continue;
                }
                "{" => {
                    // Body: the matching close is the first `}` recorded at
                    // this depth.
                    idx += 1;
                    while idx < tokens.len() {
                        let body = &tokens[idx];
                        if body.depth < base_depth
                            || (body.depth == base_depth && body.text == "}")
                        {
                            break;
                        }
                        idx += 1;
                    }
                    next = (idx + 1).min(tokens.len());
                    break;
                }
                _ => {}
            }
        }
        idx += 1;
    }

    let kind = if is_constructor {
        MemberKind::Constructor
    } else if accessor {
        MemberKind::Accessor
    } else if saw_parens {
        MemberKind::Method
    } else {
        MemberKind::Field
    };

    let parameters = match kind {
        MemberKind::Constructor | MemberKind::Method => parameters,
        _ => Vec::new(),
    };

    let member = ClassMember {
        name: name_token.text.clone(),
        kind,
        visibility,
        is_static,
        is_readonly,
        doc,
        declared_type,
        parameters,
    };
    (member, next)
}

/// Parses a parameter list starting at its `(`. Splits on `,` at the list's
/// own depth; each parameter is a name, an optional `?`, a declared type
/// after `:`, and a single-token default after `=`.
fn read_parameters(tokens: &[Token], open_idx: usize) -> (Vec<Parameter>, usize) {
    let paren_depth = tokens[open_idx].depth;
    let list_depth = paren_depth + 1;
    let mut params = Vec::new();
    let mut current: Option<Parameter> = None;

    let mut idx = open_idx + 1;
    while idx < tokens.len() {
        let token = &tokens[idx];
        if !is_significant(token) {
            idx += 1;
            continue;
        }
        if token.depth <= paren_depth {
            // The close paren is recorded at the paren's own depth.
            if token.text == ")" {
                idx += 1;
            }
            break;
        }
        if token.depth == list_depth {
            match token.text.as_str() {
                "," => {
                    if let Some(p) = current.take() {
                        params.push(p);
                    }
                }
                "?" => {
                    if let Some(p) = current.as_mut() {
                        p.optional = true;
                    }
                }
                ":" => {
                    if let Some((ty, after)) = read_type_ref(tokens, idx + 1) {
                        if let Some(p) = current.as_mut() {
                            p.declared_type = Some(ty);
                        }
                        idx = after;
                        continue;
                    }
                }
                "=" => {
                    if let Some(value) = next_significant(tokens, idx + 1) {
                        if let Some(p) = current.as_mut() {
                            p.default_value = Some(tokens[value].text.clone());
                        }
                        idx = value + 1;
                        continue;
                    }
                }
                _ if token.kind == TokenKind::Word && current.is_none() => {
                    current = Some(Parameter {
                        name: token.text.clone(),
                        declared_type: None,
                        optional: false,
                        default_value: None,
                    });
                }
                _ => {}
            }
        }
        idx += 1;
    }

    if let Some(p) = current.take() {
        params.push(p);
    }
    (params, idx)
}
