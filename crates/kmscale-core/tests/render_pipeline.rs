/*
 * render_pipeline.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Integration tests for the catalog/citation render pipeline.
 */

//! Integration tests for the render pipeline.
//!
//! These tests load the fixture project under `tests/fixtures/project`
//! through its project file and check the joined output end to end.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeZone, Utc};
use kmscale_core::writers::markdown;
use kmscale_core::{
    DiagnosticKind, OutputFormat, ProjectConfig, RenderOutput, check_join, load_sources, render,
    render_at, write_to_string,
};
use tempfile::TempDir;

fn fixture_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/project")
}

fn fixed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, 1, 12, 30, 0).unwrap()
}

fn render_fixture() -> RenderOutput {
    let config = ProjectConfig::discover(fixture_dir()).expect("Failed to load project file");
    let (sources, io_diagnostics) = config.read_sources();
    assert!(io_diagnostics.is_empty(), "fixture files should all be readable");
    render_at(&sources, fixed_time())
}

/// Copy the fixture project into a temp directory so tests can break it.
fn copy_fixture() -> TempDir {
    let temp = TempDir::new().expect("Failed to create temp directory");
    let db = temp.path().join("database");
    fs::create_dir_all(&db).expect("Failed to create database dir");
    for entry in fs::read_dir(fixture_dir().join("database")).unwrap() {
        let entry = entry.unwrap();
        fs::copy(entry.path(), db.join(entry.file_name())).unwrap();
    }
    fs::copy(
        fixture_dir().join("_kmscale.yml"),
        temp.path().join("_kmscale.yml"),
    )
    .unwrap();
    temp
}

#[test]
fn test_catalogs_and_total() {
    let output = render_fixture();
    let names: Vec<_> = output.catalogs.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["forecasting", "downscaling", "global"]);

    let counts: Vec<_> = output.catalogs.iter().map(|c| c.rows.len()).collect();
    assert_eq!(counts, vec![2, 1, 2]);
    assert_eq!(output.total_rows, 5);
    assert_eq!(output.last_updated, "2025-06-01 12:30 UTC");
}

#[test]
fn test_stray_entry_is_reported() {
    let output = render_fixture();
    assert_eq!(output.diagnostics.len(), 1);
    let diagnostic = &output.diagnostics[0];
    assert_eq!(diagnostic.code.as_deref(), Some("K-1-5"));
    assert_eq!(diagnostic.source.as_deref(), Some("forecasting"));
}

#[test]
fn test_forecasting_table() {
    let output = render_fixture();
    let table = output.catalogs[0].table();
    let mut buf = Vec::new();
    markdown::write_table(&table, &mut buf).unwrap();

    insta::assert_snapshot!(String::from_utf8(buf).unwrap(), @r"
    | Title | Year | Resolution | Architecture | Authors | Links | Tags |
    | --- | --- | --- | --- | --- | --- | --- |
    | Probabilistic Weather Forecasting with Hierarchical Graph Neural Networks | 2024 | nordic: 2.5 km \| mid latitudes: 10 km | Graph neural network. Hierarchical mesh | Joel Oskarsson, Tomas Landelius, Marc Peter Deisenroth et al. | [landing](https://arxiv.org/abs/2406.04759) [pdf](https://arxiv.org/pdf/2406.04759.pdf) | `lam` `gnn` `probabilistic` |
    | In-house limited-area emulator | 2025 | 25 km in -> 2.5 km out | U-Net backbone |  | [code](https://github.com/example/lam-emulator) | `lam` |
    ");
}

#[test]
fn test_citation_fields_win() {
    let output = render_fixture();

    let corrdiff = &output.catalogs[1].rows[0];
    assert_eq!(
        corrdiff.title,
        "Residual Diffusion Modeling for Km-scale Atmospheric Downscaling"
    );
    assert_eq!(corrdiff.year, "2023");
    assert_eq!(corrdiff.authors, "Morteza Mardani, Noah Brenowitz");
    assert_eq!(corrdiff.resolution, "25 km in -> 2 km out");
    assert_eq!(corrdiff.architecture, "Diffusion");
    // A pdf field suppresses the arXiv-derived pdf link.
    let labels: Vec<_> = corrdiff.links.iter().map(|l| l.label.as_str()).collect();
    assert_eq!(labels, vec!["pdf", "landing"]);

    let graphcast = &output.catalogs[2].rows[0];
    assert_eq!(graphcast.resolution, "0.25 deg");
    assert_eq!(
        graphcast.authors,
        "Remi Lam, Alvaro Sanchez-Gonzalez, Matthew Willson et al."
    );
    assert_eq!(graphcast.links[1].url, "https://doi.org/10.1126/science.adi2336");
}

#[test]
fn test_unmatched_record_uses_catalog_fields() {
    let output = render_fixture();
    let numeric = &output.catalogs[2].rows[1];
    assert_eq!(numeric.id.as_deref(), Some("42"));
    assert_eq!(numeric.title, "Numeric identifier record");
    assert_eq!(numeric.year, "2022");
    assert_eq!(numeric.resolution, "~9 km (TCo1279)");
    assert_eq!(numeric.authors, "");
    assert!(numeric.links.is_empty());
    assert!(numeric.tags.is_empty());
}

#[test]
fn test_render_recomputes_identically() {
    let config = ProjectConfig::discover(fixture_dir()).unwrap();
    let (sources, _) = config.read_sources();
    let first = render(&sources);
    let second = render(&sources);
    assert_eq!(first.catalogs, second.catalogs);
    assert_eq!(first.total_rows, second.total_rows);
}

#[test]
fn test_check_join() {
    let config = ProjectConfig::discover(fixture_dir()).unwrap();
    let (sources, _) = config.read_sources();
    let diagnostics = check_join(&load_sources(&sources));

    let summary: Vec<_> = diagnostics
        .iter()
        .map(|d| (d.code.as_deref().unwrap_or(""), d.kind))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("K-3-2", DiagnosticKind::Info),
            ("K-3-2", DiagnosticKind::Info),
            ("K-3-3", DiagnosticKind::Note),
        ]
    );
    assert!(diagnostics[2].problem.as_deref().unwrap().contains("unused2020_entry"));
    assert!(diagnostics.iter().all(|d| !d.is_problem()));
}

#[test]
fn test_broken_and_missing_sources_degrade() {
    let temp = copy_fixture();
    let db = temp.path().join("database");
    fs::write(db.join("km_downscaling_and_generative.yaml"), "papers: {not: a list}\n").unwrap();
    fs::remove_file(db.join("global_drivers_priors.yaml")).unwrap();

    let config = ProjectConfig::discover(temp.path()).unwrap();
    let (sources, io_diagnostics) = config.read_sources();
    assert_eq!(io_diagnostics.len(), 1);
    assert_eq!(io_diagnostics[0].code.as_deref(), Some("K-4-1"));

    let output = render_at(&sources, fixed_time());
    let counts: Vec<_> = output.catalogs.iter().map(|c| c.rows.len()).collect();
    assert_eq!(counts, vec![2, 0, 0]);
    assert_eq!(output.total_rows, 2);
    assert!(
        output
            .diagnostics
            .iter()
            .any(|d| d.code.as_deref() == Some("K-1-4"))
    );
}

#[test]
fn test_unparseable_bibliography_keeps_catalog_rows() {
    let temp = copy_fixture();
    fs::write(temp.path().join("database/references.bib"), "@misc{broken,\n  title = {oops\n").unwrap();

    let config = ProjectConfig::discover(temp.path()).unwrap();
    let (sources, _) = config.read_sources();
    let output = render_at(&sources, fixed_time());

    assert_eq!(output.total_rows, 5);
    assert!(
        output
            .diagnostics
            .iter()
            .any(|d| d.code.as_deref() == Some("K-2-1"))
    );
    // Without citations every title falls back to the catalog or "Untitled".
    assert_eq!(output.catalogs[0].rows[0].title, "Untitled");
    assert_eq!(output.catalogs[0].rows[1].title, "In-house limited-area emulator");
}

#[test]
fn test_bad_bibliography_entries_only_affect_themselves() {
    let temp = copy_fixture();
    let bib = temp.path().join("database/references.bib");
    let mut text = fs::read_to_string(&bib).unwrap();
    text.push_str("\n@misc{unused2020_entry, title = {Replacement}}\n");
    text.push_str("\n@article{stray2021, journal = notdefined, title = {Stray}}\n");
    fs::write(&bib, text).unwrap();

    let config = ProjectConfig::discover(temp.path()).unwrap();
    let (sources, _) = config.read_sources();
    let output = render_at(&sources, fixed_time());

    let codes: Vec<_> = output
        .diagnostics
        .iter()
        .filter_map(|d| d.code.as_deref())
        .filter(|code| code.starts_with("K-2"))
        .collect();
    assert_eq!(codes, vec!["K-2-2", "K-2-3"]);
    assert_eq!(
        output.catalogs[0].rows[0].title,
        "Probabilistic Weather Forecasting with Hierarchical Graph Neural Networks"
    );
    assert_eq!(output.catalogs[2].rows[0].year, "2023");
}

#[test]
fn test_writers_agree_on_content() {
    let output = render_fixture();

    let markdown = write_to_string(&output, OutputFormat::Markdown);
    assert!(markdown.starts_with("## Km-scale forecasting models\n"));
    assert!(markdown.ends_with("Total papers: 5 (last updated 2025-06-01 12:30 UTC)\n"));

    let html = write_to_string(&output, OutputFormat::Html);
    assert_eq!(html.matches("<section class=\"catalog\"").count(), 3);
    assert!(html.contains("<span class=\"total\">5</span>"));

    let json: serde_json::Value =
        serde_json::from_str(&write_to_string(&output, OutputFormat::Json)).unwrap();
    assert_eq!(json["total_rows"], 5);
    assert_eq!(json["catalogs"][2]["rows"][0]["resolution"], "0.25 deg");
}
