// Copyright (c) remint contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Round-trip tests for the zero-plugin transform.
//!
//! A transform with no plugins must reproduce its input byte-for-byte,
//! comments and whitespace included. This is the baseline invariant of
//! minimal-diff printing: output only ever differs where a plugin made an
//! edit.
//!
//! # Test Organization
//!
//! - Fixture-based tests: one test per fixture file in `tests/fixtures/`
//! - Inline tests: individual test cases for specific Java constructs

use difference::assert_diff;
use itertools::Itertools;
use remint::{prettify_error, transform_str, TransformError, TransformOptions};
use std::path::PathBuf;

/// Helper to visualize whitespace differences in test output
fn visualize(s: &str) -> String {
    s.replace(' ', "▩").lines().join("↩\n")
}

/// Helper to perform a zero-plugin round-trip on source text
fn assert_roundtrip(input: &str, label: &str) {
    let result = match transform_str(input, label, TransformOptions::new()) {
        Ok(result) => result,
        Err(TransformError::Parse(e)) => panic!("{}", prettify_error(input, &e, label)),
        Err(e) => panic!("{e}"),
    };

    if result.code() != input {
        let got = visualize(result.code());
        let expected = visualize(input);
        assert_diff!(expected.as_ref(), got.as_ref(), "", 0);
    }
}

/// Helper to load and test a fixture file
fn assert_roundtrip_fixture(fixture_name: &str) {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("tests");
    path.push("fixtures");
    path.push(fixture_name);

    let contents = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", fixture_name, e));

    assert_roundtrip(&contents, fixture_name);
}

// =============================================================================
// Fixture-based round-trip tests
// =============================================================================

#[test]
fn roundtrip_fixture_mock_annotation() {
    assert_roundtrip_fixture("mock_annotation.java");
}

#[test]
fn roundtrip_fixture_module_info() {
    assert_roundtrip_fixture("module_info.java");
}

#[test]
fn roundtrip_fixture_mixed_members() {
    assert_roundtrip_fixture("mixed_members.java");
}

// =============================================================================
// Inline round-trip tests for specific constructs
// =============================================================================

#[test]
fn roundtrip_plain_class() {
    assert_roundtrip(
        r#"package com.example;

class Main {
    public static void main(String[] args) {
        System.out.println("hello");
    }
}
"#,
        "plain_class",
    );
}

#[test]
fn roundtrip_no_package() {
    assert_roundtrip(
        r#"import java.util.List;

class Bare {
}
"#,
        "no_package",
    );
}

#[test]
fn roundtrip_static_and_wildcard_imports() {
    assert_roundtrip(
        r#"package a.b;

import static java.lang.Math.max;
import java.util.*;

class C {
}
"#,
        "static_and_wildcard_imports",
    );
}

#[test]
fn roundtrip_annotation_with_array_arguments() {
    assert_roundtrip(
        r#"package a.b;

@SuppressWarnings({"unchecked", "rawtypes"})
public class Raw {
}
"#,
        "annotation_with_array_arguments",
    );
}

#[test]
fn roundtrip_text_block_with_braces() {
    assert_roundtrip(
        "package a.b;\n\nclass T {\n    String json = \"\"\"\n        { \"key\": \"}\" }\n        \"\"\";\n}\n",
        "text_block_with_braces",
    );
}

#[test]
fn roundtrip_stray_semicolons() {
    assert_roundtrip(
        r#"package a.b;

class A {
}
;
class B {
}
"#,
        "stray_semicolons",
    );
}

#[test]
fn roundtrip_record_with_components() {
    assert_roundtrip(
        r#"package a.b;

public record Point(int x, int y) {
    Point {
        if (x < 0) throw new IllegalArgumentException();
    }
}
"#,
        "record_with_components",
    );
}

#[test]
fn roundtrip_sealed_hierarchy() {
    assert_roundtrip(
        r#"package a.b;

public sealed interface Shape permits Circle, Square {
}

non-sealed interface Circle extends Shape {
}
"#,
        "sealed_hierarchy",
    );
}

#[test]
fn roundtrip_open_module() {
    assert_roundtrip(
        r#"open module com.example.app {
    requires transitive java.sql;
    exports com.example.app to com.example.client;
}
"#,
        "open_module",
    );
}

#[test]
fn roundtrip_comments_between_declarations() {
    assert_roundtrip(
        r#"package a.b;

// imports
import java.util.List; // the only one

/* the type */
class C {
    // body comment
}
"#,
        "comments_between_declarations",
    );
}

#[test]
fn roundtrip_package_annotation() {
    assert_roundtrip(
        "@Deprecated\npackage a.b;\n",
        "package_annotation",
    );
}

#[test]
fn roundtrip_empty_file() {
    assert_roundtrip("", "empty_file");
}

#[test]
fn roundtrip_no_trailing_newline() {
    assert_roundtrip("package a.b;\n\nclass C {\n}", "no_trailing_newline");
}

// =============================================================================
// Untouched trees stay verbatim even when plugins ran
// =============================================================================

#[test]
fn roundtrip_with_read_only_plugin() {
    use remint::{NodeKind, NodeMut, Plugin};

    let source = "/* kept */\npackage   a.b ;\n\nimport java.util.List;\n\nclass C {\n}\n";
    let plugin = Plugin::new().on(NodeKind::Import, |mut node: NodeMut<'_>| {
        // Reading properties materializes but never mutates.
        let _ = node.static_import()?;
        let _ = node.qualified_identifier()?;
        Ok(())
    });
    let result = transform_str(source, "read_only", TransformOptions::new().with_plugin(plugin))
        .expect("transform error");
    assert_eq!(result.code(), source);
}
