//! Core analysis pipeline: tokenizer, doc-comment extraction, structural
//! analysis.

pub mod analyzer;
pub mod doc;
pub mod tokenizer;
pub mod types;

pub use analyzer::AnalysisContext;
pub use tokenizer::tokenize;
pub use types::{
    AnalysisReport, ClassMember, ClassRegistry, ClassType, DocComment, DocTagKind, DocTagValue,
    MemberKind, Parameter, ParsedFile, Token, TokenKind, TypeRef, Visibility,
};
