use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;
use temps_menu_import::{ImportReport, SiteStore};

fn fixture(dir: &TempDir) -> (PathBuf, PathBuf) {
    let site = dir.path().join("site.json");
    let mut store = SiteStore::new("http://example.com");
    store.add_page("about", "About Us");
    store.save(&site).expect("Failed to write site snapshot");

    let menus = dir.path().join("menus.json");
    fs::write(
        &menus,
        r#"{ "location": "primary", "name": "Main", "items": [
            { "slug": "about", "page": "about" },
            { "slug": "pricing", "page": "pricing" },
            { "slug": "docs", "url": "/docs" }
        ] }"#,
    )
    .expect("Failed to write menu document");
    (site, menus)
}

fn run_temps(site: &Path, menus: &Path, extra: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_temps"))
        .args(["menu", "import"])
        .arg(menus)
        .arg("--site")
        .arg(site)
        .args(extra)
        .env_remove("RUST_LOG")
        .env_remove("TEMPS_MENU_BASE_URL")
        .env("TEMPS_LOG_LEVEL", "debug")
        .output()
        .expect("Failed to run temps binary")
}

/// `--json` stdout is exactly the report; logs and warnings stay on stderr
#[test]
fn test_json_output_is_parseable() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let (site, menus) = fixture(&dir);

    let output = run_temps(
        &site,
        &menus,
        &["--json", "--dry-run", "--missing", "default"],
    );
    assert!(
        output.status.success(),
        "temps failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8(output.stdout)?;
    let report: ImportReport = serde_json::from_str(&stdout)?;
    assert_eq!(report.summary.items_created, 2);
    assert_eq!(report.summary.items_skipped, 1);

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("--missing=default without --default"));
    assert!(stderr.contains("Menu import finished"));
    Ok(())
}

/// Without `--dry-run` the snapshot on disk gains the imported menu
#[test]
fn test_import_persists_snapshot() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let (site, menus) = fixture(&dir);

    let output = run_temps(&site, &menus, &["--json"]);
    assert!(output.status.success());

    let store = SiteStore::load(&site)?;
    let menu = store.menu_by_name("Main").expect("menu should be saved");
    assert_eq!(menu.items.len(), 2);
    Ok(())
}

/// A missing menu document exits non-zero and writes nothing to stdout
#[test]
fn test_missing_document_exits_with_error() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    let (site, _) = fixture(&dir);

    let output = run_temps(&site, &dir.path().join("missing.json"), &["--json"]);
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("doesn't exist"));
    Ok(())
}
