// tests/classifier_test.rs
use smartcommit::classifier::{classify, FileClassifier};
use smartcommit::config::load_config;
use smartcommit::domain::CommitCategory;
use std::path::Path;

fn files(paths: &[&str]) -> Vec<String> {
    paths.iter().map(|p| p.to_string()).collect()
}

#[test]
fn test_category_does_not_depend_on_file_order() {
    let forward = classify(&files(&["a.py", "b.py"]));
    let backward = classify(&files(&["b.py", "a.py"]));

    assert_eq!(forward.category, CommitCategory::Feat);
    assert_eq!(forward.category, backward.category);
}

#[test]
fn test_larger_mixed_set_is_order_independent() {
    let mut set = files(&[
        "README.md",
        "docs/usage.md",
        "src/app.ts",
        "tests/app.test.js",
        "package.json",
        "docs/api.md",
    ]);
    let first = classify(&set).category;
    set.reverse();
    assert_eq!(classify(&set).category, first);
    assert_eq!(first, CommitCategory::Docs);
}

#[test]
fn test_empty_list_is_initial_commit() {
    let result = classify(&[]);
    assert_eq!(result.category, CommitCategory::Chore);
    assert_eq!(result.summary, "Initial commit");
}

#[test]
fn test_readme_only_is_docs() {
    assert_eq!(classify(&files(&["README.md"])).category, CommitCategory::Docs);
}

#[test]
fn test_test_prefixed_python_file_is_feat() {
    // Both `\.py$` (feat) and `test_` (test) match; feat is declared first.
    let result = classify(&files(&["test_foo.py"]));
    assert_eq!(result.category, CommitCategory::Feat);
    assert_eq!(result.summary, "Add Python functionality");
}

#[test]
fn test_summary_templates() {
    assert_eq!(
        classify(&files(&["web/app.js", "web/util.ts"])).summary,
        "Add 2 JS/TS files"
    );
    assert_eq!(
        classify(&files(&["error_codes.txt"])).summary,
        "Fix issues in 1 file"
    );
    assert_eq!(
        classify(&files(&["spec/runner.rb", "spec/helper.rb"])).summary,
        "Add tests for 2 files"
    );
    assert_eq!(
        classify(&files(&["Cargo.lock", ".gitignore", "settings.yml"])).summary,
        "Update configuration"
    );
}

#[test]
fn test_configured_patterns_from_fixture() {
    let fixture = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/smartcommit.toml");
    let config = load_config(Some(&fixture)).unwrap();
    let classifier = FileClassifier::with_config(&config.classifier).unwrap();

    assert_eq!(
        classifier.classify(&files(&["manual.adoc"])).category,
        CommitCategory::Docs
    );
    assert_eq!(
        classifier.classify(&files(&["e2e/login.rb"])).category,
        CommitCategory::Test
    );
    // Built-in rows still come first.
    assert_eq!(
        classifier.classify(&files(&["e2e/login.py"])).category,
        CommitCategory::Feat
    );
}
