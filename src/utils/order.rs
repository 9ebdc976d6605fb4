//! Dependency-ordered file sequencing
//!
//! Produces the total file ordering consumed by the bundling stage: seed
//! files first, then every class's declaring file after the declaring files
//! of its base class and imported classes, then files unreachable through
//! the class graph in discovery order.
//!
//! Cycles are not detected or reported: the visited guard terminates the
//! walk, and classes on a cycle land in an arbitrary but deterministic
//! position. This mirrors the behavior the bundler has always relied on and
//! is a documented limitation.

use crate::core::types::ClassRegistry;
use std::collections::HashSet;
use std::path::PathBuf;

/// One step of the explicit depth-first walk. Using a frame stack instead of
/// call recursion keeps deep inheritance chains off the call stack.
enum Frame<'a> {
    Enter(&'a str),
    Exit(&'a str),
}

/// Depth-first post-order over base-class and import edges, visiting classes
/// in registry order. Unknown names (external types) are skipped.
pub fn order_classes(registry: &ClassRegistry) -> Vec<String> {
    let mut placed: HashSet<&str> = HashSet::new();
    let mut ordered: Vec<String> = Vec::new();
    let mut stack: Vec<Frame> = Vec::new();

    for name in registry.names() {
        stack.push(Frame::Enter(name));
        while let Some(frame) = stack.pop() {
            match frame {
                Frame::Enter(name) => {
                    let Some(class) = registry.get(name) else {
                        continue;
                    };
                    if !placed.insert(name) {
                        continue;
                    }
                    stack.push(Frame::Exit(name));
                    // Dependencies first: base class, then imports in order.
                    // Reversed here because the stack pops last-in first.
                    for imported in class.imported_class_names.iter().rev() {
                        stack.push(Frame::Enter(imported.as_str()));
                    }
                    if let Some(base) = &class.base_class {
                        stack.push(Frame::Enter(base.as_str()));
                    }
                }
                Frame::Exit(name) => ordered.push(name.to_string()),
            }
        }
    }

    ordered
}

/// Derives the total file ordering: `seeds` first in given order, then the
/// declaring files of the dependency-ordered classes (deduplicated when
/// several classes share a file), then any remaining discovered file in
/// discovery order. Every discovered file appears exactly once.
pub fn order_files(
    registry: &ClassRegistry,
    discovered: &[PathBuf],
    seeds: &[PathBuf],
) -> Vec<PathBuf> {
    let mut result: Vec<PathBuf> = Vec::new();
    let mut seen: HashSet<PathBuf> = HashSet::new();

    for seed in seeds {
        if seen.insert(seed.clone()) {
            result.push(seed.clone());
        }
    }

    for name in order_classes(registry) {
        if let Some(class) = registry.get(&name)
            && seen.insert(class.file.clone())
        {
            result.push(class.file.clone());
        }
    }

    for file in discovered {
        if seen.insert(file.clone()) {
            result.push(file.clone());
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::ClassType;
    use std::path::Path;

    fn class(name: &str, file: &str, base: Option<&str>, imports: &[&str]) -> ClassType {
        ClassType {
            name: name.to_string(),
            file: PathBuf::from(file),
            base_class: base.map(String::from),
            doc: None,
            members: vec![],
            imported_class_names: imports.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn registry(classes: Vec<ClassType>) -> ClassRegistry {
        let mut registry = ClassRegistry::new();
        for c in classes {
            registry.insert(c);
        }
        registry
    }

    fn index_of(files: &[PathBuf], name: &str) -> usize {
        files
            .iter()
            .position(|p| p == Path::new(name))
            .unwrap_or_else(|| panic!("{name} missing from {files:?}"))
    }

    #[test]
    fn test_base_class_file_precedes() {
        let registry = registry(vec![
            class("B", "b.ts", Some("A"), &[]),
            class("A", "a.ts", None, &[]),
        ]);
        let discovered = [PathBuf::from("a.ts"), PathBuf::from("b.ts")];
        let files = order_files(&registry, &discovered, &[]);
        assert!(index_of(&files, "a.ts") < index_of(&files, "b.ts"));
        assert_eq!(files.len(), 2);
    }

    #[test]
    fn test_import_edges_order_files() {
        // C imports B, B extends A: a < b < c regardless of registry order.
        let registry = registry(vec![
            class("C", "c.ts", None, &["B"]),
            class("B", "b.ts", Some("A"), &[]),
            class("A", "a.ts", None, &[]),
        ]);
        let discovered: Vec<PathBuf> =
            ["a.ts", "b.ts", "c.ts"].iter().map(PathBuf::from).collect();
        let files = order_files(&registry, &discovered, &[]);
        assert!(index_of(&files, "a.ts") < index_of(&files, "b.ts"));
        assert!(index_of(&files, "b.ts") < index_of(&files, "c.ts"));
    }

    #[test]
    fn test_external_base_is_skipped() {
        // An unresolved base class is an external type, not an error.
        let registry = registry(vec![class("A", "a.ts", Some("Renderer"), &[])]);
        let files = order_files(&registry, &[PathBuf::from("a.ts")], &[]);
        assert_eq!(files, vec![PathBuf::from("a.ts")]);
    }

    #[test]
    fn test_cycle_terminates() {
        let registry = registry(vec![
            class("A", "a.ts", None, &["B"]),
            class("B", "b.ts", None, &["A"]),
        ]);
        let order = order_classes(&registry);
        assert_eq!(order.len(), 2);
        assert!(order.contains(&"A".to_string()));
        assert!(order.contains(&"B".to_string()));

        // Deterministic across runs.
        assert_eq!(order, order_classes(&registry));
    }

    #[test]
    fn test_seeds_come_first() {
        let registry = registry(vec![
            class("B", "b.ts", Some("A"), &[]),
            class("A", "a.ts", None, &[]),
        ]);
        let discovered: Vec<PathBuf> =
            ["a.ts", "b.ts", "main.ts"].iter().map(PathBuf::from).collect();
        let seeds = [PathBuf::from("main.ts"), PathBuf::from("b.ts")];
        let files = order_files(&registry, &discovered, &seeds);
        assert_eq!(files[0], PathBuf::from("main.ts"));
        assert_eq!(files[1], PathBuf::from("b.ts"));
        // Seeded b.ts is not repeated later.
        assert_eq!(files.iter().filter(|p| **p == PathBuf::from("b.ts")).count(), 1);
        assert_eq!(files.len(), 3);
    }

    #[test]
    fn test_unreachable_files_append_in_discovery_order() {
        let registry = registry(vec![class("A", "a.ts", None, &[])]);
        let discovered: Vec<PathBuf> = ["z.ts", "a.ts", "m.ts"]
            .iter()
            .map(PathBuf::from)
            .collect();
        let files = order_files(&registry, &discovered, &[]);
        assert_eq!(
            files,
            vec![
                PathBuf::from("a.ts"),
                PathBuf::from("z.ts"),
                PathBuf::from("m.ts"),
            ]
        );
    }

    #[test]
    fn test_shared_file_deduplicated() {
        let registry = registry(vec![
            class("One", "pair.ts", None, &[]),
            class("Two", "pair.ts", Some("One"), &[]),
        ]);
        let files = order_files(&registry, &[PathBuf::from("pair.ts")], &[]);
        assert_eq!(files, vec![PathBuf::from("pair.ts")]);
    }

    #[test]
    fn test_deep_chain_stays_off_call_stack() {
        // A 10k-deep inheritance chain must not recurse.
        let mut classes = vec![class("C0", "c0.ts", None, &[])];
        for i in 1..10_000 {
            classes.push(class(
                &format!("C{i}"),
                &format!("c{i}.ts"),
                Some(&format!("C{}", i - 1)),
                &[],
            ));
        }
        // Register in reverse so the walk starts from the deep end.
        classes.reverse();
        let registry = registry(classes);
        let order = order_classes(&registry);
        assert_eq!(order.len(), 10_000);
        assert_eq!(order[0], "C0");
        assert_eq!(order[9_999], "C9999");
    }
}
