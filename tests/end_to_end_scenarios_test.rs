//! End-to-end scenarios against the public API, mirroring spec.md §8's
//! concrete walkthroughs: index a small tree, then query it the way the
//! CLI and MCP tool layer both would.

use std::fs;

use cog::indexing::Maintainer;
use cog::parsing::GrammarRegistry;
use cog::storage::query::{self, QueryArgs};
use cog::storage::IndexStore;
use tempfile::TempDir;

fn maintainer_in(dir: &TempDir) -> Maintainer {
    let store = IndexStore::load(dir.path().join(".cog").join("index.scip")).unwrap();
    Maintainer::new(dir.path().to_path_buf(), GrammarRegistry::new(), store)
}

#[test]
fn finds_a_go_function_definition() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("main.go"), "package main\n\nfunc hello() {}\n").unwrap();
    let maintainer = maintainer_in(&dir);
    maintainer.reindex_path(&dir.path().join("main.go")).unwrap();

    let result = query::find(maintainer.store(), &QueryArgs { name: Some("hello".into()), ..Default::default() });
    let results = result["results"].as_array().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["path"], "main.go");
    assert_eq!(results[0]["line"], 2);
    assert_eq!(results[0]["name"], "hello");
    assert_eq!(results[0]["kind"], 17);
}

#[test]
fn lists_symbols_in_a_python_class_in_file_order() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("m.py"),
        "class MyClass:\n    def my_method(self):\n        pass\n",
    )
    .unwrap();
    let maintainer = maintainer_in(&dir);
    maintainer.reindex_path(&dir.path().join("m.py")).unwrap();

    let result = query::symbols(maintainer.store(), &QueryArgs { file: Some("m.py".into()), ..Default::default() });
    let symbols = result["symbols"].as_array().unwrap();
    assert_eq!(symbols.len(), 2);
    assert_eq!(symbols[0]["name"], "MyClass");
    assert_eq!(symbols[0]["kind"], 7);
    assert_eq!(symbols[1]["name"], "my_method");
    assert_eq!(symbols[1]["kind"], 26);
}

#[test]
fn find_skips_a_flow_type_annotation_and_matches_the_function() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("a.js"),
        "// @flow\nfunction greet(name: string): string {\n  return name;\n}\n",
    )
    .unwrap();
    let maintainer = maintainer_in(&dir);
    maintainer.reindex_path(&dir.path().join("a.js")).unwrap();

    let greet = query::find(maintainer.store(), &QueryArgs { name: Some("greet".into()), ..Default::default() });
    let results = greet["results"].as_array().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["name"], "greet");
    assert_eq!(results[0]["kind"], 17);
    assert_eq!(results[0]["line"], 2);

    let string_type = query::find(maintainer.store(), &QueryArgs { name: Some("string".into()), ..Default::default() });
    assert!(string_type["results"].as_array().unwrap().is_empty());
}

#[test]
fn rename_carries_results_to_the_new_path() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("x.rs"), "fn foo() {}\n").unwrap();
    let maintainer = maintainer_in(&dir);
    maintainer.reindex_path(&dir.path().join("x.rs")).unwrap();

    cog::indexing::transaction::rename(&maintainer, &dir.path().join("x.rs"), &dir.path().join("y.rs")).unwrap();

    let found = query::find(maintainer.store(), &QueryArgs { name: Some("foo".into()), ..Default::default() });
    let results = found["results"].as_array().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["path"], "y.rs");
    assert_eq!(results[0]["line"], 1);
    assert!(!maintainer.store().with_index(|index| index.find_document("x.rs").is_some()));
}

#[test]
fn structure_summarizes_by_top_level_directory() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("src")).unwrap();
    fs::create_dir_all(dir.path().join("tests")).unwrap();
    fs::write(
        dir.path().join("src/a.go"),
        "package main\n\nfunc One() {}\nfunc Two() {}\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("src/b.go"),
        "package main\n\ntype Thing struct {\n\tX int\n}\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("tests/t.go"),
        "package tests\n\nfunc TestIt() {}\n",
    )
    .unwrap();
    let maintainer = maintainer_in(&dir);
    let stats = maintainer.index_all(cog::indexing::walker::DEFAULT_PATTERN);
    assert_eq!(stats.files_indexed, 3);

    let structure = query::structure(maintainer.store());
    assert_eq!(structure["structure"]["src"]["documents"], 2);
    assert_eq!(structure["structure"]["src"]["symbols_by_kind"]["17"], 2);
    assert_eq!(structure["structure"]["src"]["symbols_by_kind"]["49"], 1);
    assert_eq!(structure["structure"]["tests"]["documents"], 1);
    assert_eq!(structure["structure"]["tests"]["symbols_by_kind"]["17"], 1);
}

#[test]
fn edit_is_rolled_back_when_the_replacement_leaves_invalid_source_unreadable() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("a.rs");
    fs::write(&file, "fn foo() {}\n").unwrap();
    let maintainer = maintainer_in(&dir);
    maintainer.reindex_path(&file).unwrap();

    let before = fs::read_to_string(&file).unwrap();
    let result = cog::cli::commands::edit::run(&maintainer, &file, "does not appear", "replacement");
    assert!(result.is_err());
    assert_eq!(fs::read_to_string(&file).unwrap(), before);

    let found = query::find(maintainer.store(), &QueryArgs { name: Some("foo".into()), ..Default::default() });
    assert_eq!(found["results"].as_array().unwrap().len(), 1);
}

#[test]
fn delete_removes_the_document_from_the_store() {
    let dir = TempDir::new().unwrap();
    let file = dir.path().join("a.rs");
    fs::write(&file, "fn foo() {}\n").unwrap();
    let maintainer = maintainer_in(&dir);
    maintainer.reindex_path(&file).unwrap();

    cog::cli::commands::delete::run(&maintainer, &file).unwrap();

    assert!(!file.exists());
    let found = query::find(maintainer.store(), &QueryArgs { name: Some("foo".into()), ..Default::default() });
    assert!(found["results"].as_array().unwrap().is_empty());
}
