//! Markdown documentation rendering
//!
//! Renders the class registry as API documentation: classes grouped by the
//! folder of their declaring file, folders and classes alphabetical, member
//! signatures with their doc-comment text and parameter tables.

use anyhow::Result;

use std::collections::BTreeMap;
use std::io::Write;
use std::path::PathBuf;

use super::Formatter;
use crate::core::types::{
    ClassMember, ClassRegistry, ClassType, DocComment, DocTagKind, DocTagValue, MemberKind,
    ParsedFile, TypeRef, Visibility,
};

pub struct MarkdownFormatter;

impl Formatter for MarkdownFormatter {
    fn write_header(&mut self, output: &mut dyn Write) -> Result<()> {
        writeln!(output, "# API Documentation")?;
        writeln!(output)?;
        Ok(())
    }

    fn write_ordering(&mut self, output: &mut dyn Write, files: &[PathBuf]) -> Result<()> {
        writeln!(output, "## Build order")?;
        writeln!(output)?;
        for (i, path) in files.iter().enumerate() {
            writeln!(output, "{}. `{}`", i + 1, path.display())?;
        }
        writeln!(output)?;
        Ok(())
    }

    fn write_imports(&mut self, _output: &mut dyn Write, _files: &[ParsedFile]) -> Result<()> {
        // Import lists are machine-facing; the rendered docs skip them.
        Ok(())
    }

    fn write_classes(&mut self, output: &mut dyn Write, registry: &ClassRegistry) -> Result<()> {
        // Group by originating folder, alphabetical in both dimensions.
        let mut groups: BTreeMap<String, Vec<&ClassType>> = BTreeMap::new();
        for class in registry.iter() {
            let folder = class
                .file
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| ".".to_string());
            groups.entry(folder).or_default().push(class);
        }

        for (folder, mut classes) in groups {
            classes.sort_by(|a, b| a.name.cmp(&b.name));
            writeln!(output, "## {}", folder)?;
            writeln!(output)?;
            for class in classes {
                write_class(output, class)?;
            }
        }
        Ok(())
    }

    fn write_footer(&mut self, _output: &mut dyn Write) -> Result<()> {
        Ok(())
    }
}

fn write_class(output: &mut dyn Write, class: &ClassType) -> Result<()> {
    writeln!(output, "### {}", class.name)?;
    writeln!(output)?;
    writeln!(output, "Defined in `{}`.", class.file.display())?;
    if let Some(base) = &class.base_class {
        writeln!(output, "Extends `{}`.", base)?;
    }
    writeln!(output)?;

    if let Some(doc) = &class.doc {
        write_doc(output, doc)?;
    }

    if !class.members.is_empty() {
        writeln!(output, "#### Members")?;
        writeln!(output)?;
        for member in &class.members {
            writeln!(output, "- `{}`", signature(member))?;
            if let Some(doc) = &member.doc {
                if !doc.description.is_empty() {
                    writeln!(output, "  {}", doc.description)?;
                }
                if let Some(params) = doc.tag_entries(DocTagKind::Params) {
                    for (name, text) in params {
                        writeln!(output, "  - `{}`: {}", name, text)?;
                    }
                }
                if let Some(ret) = doc.tag_text(DocTagKind::Return) {
                    writeln!(output, "  - returns {}", ret)?;
                }
            }
        }
        writeln!(output)?;
    }
    Ok(())
}

fn write_doc(output: &mut dyn Write, doc: &DocComment) -> Result<()> {
    if !doc.description.is_empty() {
        writeln!(output, "{}", doc.description)?;
        writeln!(output)?;
    }
    for (kind, value) in &doc.tags {
        // Params/throws render with their owning member; class-level text
        // tags get a simple line each.
        if let DocTagValue::Text(text) = value
            && !text.is_empty()
        {
            writeln!(output, "*{:?}*: {}", kind, text)?;
        }
    }
    writeln!(output)?;
    Ok(())
}

/// Human-readable one-line member signature.
fn signature(member: &ClassMember) -> String {
    let mut out = String::new();
    match member.visibility {
        Visibility::Private => out.push_str("private "),
        Visibility::Protected => out.push_str("protected "),
        Visibility::Public => {}
    }
    if member.is_static {
        out.push_str("static ");
    }
    if member.is_readonly {
        out.push_str("readonly ");
    }
    out.push_str(&member.name);

    if matches!(member.kind, MemberKind::Constructor | MemberKind::Method) {
        out.push('(');
        for (i, param) in member.parameters.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            out.push_str(&param.name);
            if param.optional {
                out.push('?');
            }
            if let Some(ty) = &param.declared_type {
                out.push_str(": ");
                out.push_str(&type_name(ty));
            }
            if let Some(default) = &param.default_value {
                out.push_str(" = ");
                out.push_str(default);
            }
        }
        out.push(')');
    }

    if let Some(ty) = &member.declared_type {
        out.push_str(": ");
        out.push_str(&type_name(ty));
    }
    out
}

fn type_name(ty: &TypeRef) -> String {
    match &ty.subtype {
        Some(sub) => format!("{}<{}>", ty.name, type_name(sub)),
        None => ty.name.clone(),
    }
}
