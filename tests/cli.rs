//! End-to-end tests of the `mdx-sitemap` binary.
//!
//! Each test runs in its own temp directory so the default `config.toml`
//! lookup finds nothing unless the test writes one.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

// ===========================================================================
// Helpers
// ===========================================================================

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// Temp workspace with a small docs tree under `content/docs`.
fn workspace() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let docs = tmp.path().join("content/docs");
    write(&docs, "index.mdx", "---\ntitle: Welcome\n---\nStart here.\n");
    write(&docs, "api/index.mdx", "---\ntitle: API\n---\nEndpoints.\n");
    write(
        &docs,
        "api/overview.mdx",
        "---\ntitle: Overview\n---\nimport { X } from 'x';\n\nDetails.\n",
    );
    write(&docs, "meta.json", "{}");
    tmp
}

fn cmd(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("mdx-sitemap").unwrap();
    cmd.current_dir(dir).env_remove("MDX_SITEMAP_LOG");
    cmd
}

// ===========================================================================
// sitemap
// ===========================================================================

#[test]
fn sitemap_writes_sorted_urls() {
    let tmp = workspace();

    cmd(tmp.path())
        .arg("sitemap")
        .assert()
        .success()
        .stdout(predicate::str::contains("with 3 URLs"));

    let xml = fs::read_to_string(tmp.path().join("public/sitemap.xml")).unwrap();
    let locs: Vec<&str> = xml
        .lines()
        .filter_map(|l| l.trim().strip_prefix("<loc>"))
        .filter_map(|l| l.strip_suffix("</loc>"))
        .collect();
    assert_eq!(
        locs,
        vec![
            "https://s.ee/docs/",
            "https://s.ee/docs/api/",
            "https://s.ee/docs/api/overview/",
        ]
    );
    assert!(xml.contains("<priority>1.0</priority>"));
    assert!(xml.contains("<priority>0.8</priority>"));
}

#[test]
fn flags_override_base_url_and_output() {
    let tmp = workspace();

    cmd(tmp.path())
        .args([
            "sitemap",
            "--base-url",
            "https://example.com/handbook/",
            "--output",
            "out/map.xml",
        ])
        .assert()
        .success();

    let xml = fs::read_to_string(tmp.path().join("out/map.xml")).unwrap();
    assert!(xml.contains("<loc>https://example.com/handbook/api/</loc>"));
    assert!(!tmp.path().join("public/sitemap.xml").exists());
}

#[test]
fn config_file_is_read() {
    let tmp = workspace();
    fs::rename(tmp.path().join("content"), tmp.path().join("site")).unwrap();
    write(
        tmp.path(),
        "config.toml",
        "content_root = \"site/docs\"\n[sitemap]\noutput = \"dist/sitemap.xml\"\n",
    );

    cmd(tmp.path()).arg("sitemap").assert().success();
    assert!(tmp.path().join("dist/sitemap.xml").is_file());
}

#[test]
fn missing_content_root_fails() {
    let tmp = TempDir::new().unwrap();

    cmd(tmp.path())
        .arg("sitemap")
        .assert()
        .failure()
        .stderr(predicate::str::contains("content/docs"));
    assert!(!tmp.path().join("public").exists());
}

#[test]
fn collision_fails_and_keeps_previous_sitemap() {
    let tmp = workspace();
    write(&tmp.path().join("content/docs"), "api.mdx", "# Clash");
    write(tmp.path(), "public/sitemap.xml", "previous");

    cmd(tmp.path())
        .arg("sitemap")
        .assert()
        .failure()
        .stderr(predicate::str::contains("api.mdx"));
    assert_eq!(
        fs::read_to_string(tmp.path().join("public/sitemap.xml")).unwrap(),
        "previous"
    );
}

#[test]
fn invalid_config_fails() {
    let tmp = workspace();
    write(tmp.path(), "config.toml", "base_url = \"ftp://nope\"\n");

    cmd(tmp.path())
        .arg("sitemap")
        .assert()
        .failure()
        .stderr(predicate::str::contains("base_url"));
}

// ===========================================================================
// export / build
// ===========================================================================

#[test]
fn export_writes_markdown_files() {
    let tmp = workspace();

    cmd(tmp.path())
        .arg("export")
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 3 pages"));

    let dir = tmp.path().join("public/llms.mdx");
    assert_eq!(
        fs::read_to_string(dir.join("index.md")).unwrap(),
        "# Welcome\n\nStart here.\n"
    );
    assert_eq!(
        fs::read_to_string(dir.join("api/overview.md")).unwrap(),
        "# Overview\n\nDetails.\n"
    );
    assert!(dir.join("api.md").is_file());
}

#[test]
fn build_writes_both_outputs() {
    let tmp = workspace();

    cmd(tmp.path())
        .arg("build")
        .assert()
        .success()
        .stdout(predicate::str::contains("Generated:"))
        .stdout(predicate::str::contains("Exported 3 pages"));

    assert!(tmp.path().join("public/sitemap.xml").is_file());
    assert!(tmp.path().join("public/llms.mdx/index.md").is_file());
}

#[test]
fn build_with_bad_frontmatter_writes_nothing() {
    let tmp = workspace();
    write(
        &tmp.path().join("content/docs"),
        "broken.mdx",
        "---\ntitle: [oops\n---\n",
    );

    cmd(tmp.path()).arg("build").assert().failure();
    assert!(!tmp.path().join("public").exists());
}

// ===========================================================================
// scan / check / gen-config
// ===========================================================================

#[test]
fn scan_prints_json_manifest() {
    let tmp = workspace();

    let out = cmd(tmp.path()).arg("scan").assert().success().get_output().stdout.clone();
    let rows: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(rows.as_array().unwrap().len(), 3);
    assert_eq!(rows[0]["url"], "https://s.ee/docs/");
    assert_eq!(rows[0]["title"], "Welcome");
    assert_eq!(rows[2]["markdown_url"], "https://s.ee/docs/llms.mdx/api/overview");
}

#[test]
fn check_writes_nothing() {
    let tmp = workspace();

    cmd(tmp.path())
        .arg("check")
        .assert()
        .success()
        .stdout(predicate::str::contains("3 pages, no route collisions"));
    assert!(!tmp.path().join("public").exists());
}

#[test]
fn gen_config_prints_parseable_toml() {
    let tmp = TempDir::new().unwrap();

    let out = cmd(tmp.path())
        .arg("gen-config")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("[sitemap]"));
    toml::from_str::<toml::Value>(&text).unwrap();
}
