use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn form_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", content).unwrap();
    file
}

fn config_file(content: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    write!(file, "{}", content).unwrap();
    file
}

#[test]
fn transform_file() {
    let form = form_file("[row gap:8][col col:6]Name[/col][/row]");
    let mut cmd = cargo_bin_cmd!("lean-grid");
    cmd.arg("transform").arg(form.path());

    cmd.assert().success().stdout(concat!(
        r#"<div class="grid-row" style="--grid-gap: 8px;">"#,
        r#"<div class="grid-col" data-col="6">Name</div></div>"#
    ));
}

#[test]
fn transform_stdin() {
    let mut cmd = cargo_bin_cmd!("lean-grid");
    cmd.arg("transform").arg("-").write_stdin("[col]x[/col]");

    cmd.assert()
        .success()
        .stdout(r#"<div class="grid-col" data-col="12">x</div>"#);
}

#[test]
fn transform_with_lean_forms_preset() {
    let mut cmd = cargo_bin_cmd!("lean-grid");
    cmd.arg("transform")
        .arg("-")
        .arg("--preset")
        .arg("lean-forms")
        .write_stdin("[lfcf7-row][/lfcf7-row]");

    cmd.assert().success().stdout(
        r#"<div class="lf-row" style="--lf-gap: 16px;"></div><!-- /lf-row -->"#,
    );
}

#[test]
fn config_file_overrides_preset() {
    let config = config_file("[grid]\nrow_class = \"my-row\"\n");
    let mut cmd = cargo_bin_cmd!("lean-grid");
    cmd.arg("transform")
        .arg("-")
        .arg("--preset")
        .arg("lean-forms")
        .arg("--config")
        .arg(config.path())
        .write_stdin("[lfcf7-row][/lfcf7-row]");

    cmd.assert().success().stdout(
        r#"<div class="my-row" style="--lf-gap: 16px;"></div><!-- /my-row -->"#,
    );
}

#[test]
fn transform_legacy_flag() {
    let mut cmd = cargo_bin_cmd!("lean-grid");
    cmd.arg("transform")
        .arg("-")
        .arg("--legacy")
        .write_stdin("[row gap:1][row gap:2]x[/row]y[/row]");

    cmd.assert()
        .success()
        .stdout(predicate::str::ends_with("y[/row]"));
}

#[test]
fn transform_with_config_file() {
    let config = config_file("[grid]\nrow_class = \"layout\"\ndefault_gap = 4\n");
    let mut cmd = cargo_bin_cmd!("lean-grid");
    cmd.arg("transform")
        .arg("-")
        .arg("--config")
        .arg(config.path())
        .write_stdin("[row][/row]");

    cmd.assert()
        .success()
        .stdout(r#"<div class="layout" style="--grid-gap: 4px;"></div>"#);
}

#[test]
fn transform_with_grid_feature_disabled() {
    let config = config_file("[features]\ngrid = false\n");
    let mut cmd = cargo_bin_cmd!("lean-grid");
    cmd.arg("transform")
        .arg("-")
        .arg("--config")
        .arg(config.path())
        .write_stdin("[row][/row]");

    cmd.assert().success().stdout("[row][/row]");
}

#[test]
fn transform_rejects_invalid_config() {
    let config = config_file("[grid]\nrow_tag = \"col\"\n");
    let mut cmd = cargo_bin_cmd!("lean-grid");
    cmd.arg("transform")
        .arg("-")
        .arg("--config")
        .arg(config.path())
        .write_stdin("[row][/row]");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("row_tag and col_tag must differ"));
}

#[test]
fn transform_missing_file() {
    let mut cmd = cargo_bin_cmd!("lean-grid");
    cmd.arg("transform").arg("/nonexistent/form.txt");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("failed to read /nonexistent/form.txt"));
}

#[test]
fn transform_unknown_preset() {
    let mut cmd = cargo_bin_cmd!("lean-grid");
    cmd.arg("transform").arg("-").arg("--preset").arg("bootstrap");

    cmd.assert()
        .failure()
        .stderr(
            predicate::str::contains("unknown preset 'bootstrap'")
                .and(predicate::str::contains("available: lean-forms")),
        );
}

#[test]
fn inspect_ast_tag() {
    let form = form_file("[row gap:8]x[/row]");
    let mut cmd = cargo_bin_cmd!("lean-grid");
    cmd.arg("inspect").arg(form.path());

    cmd.assert().success().stdout(
        predicate::str::contains("<document>")
            .and(predicate::str::contains("<row gap=\"8\">"))
            .and(predicate::str::contains("<text>x</text>")),
    );
}

#[test]
fn inspect_token_simple() {
    let mut cmd = cargo_bin_cmd!("lean-grid");
    cmd.arg("inspect")
        .arg("-")
        .arg("--format")
        .arg("token-simple")
        .write_stdin("[col]");

    cmd.assert()
        .success()
        .stdout("OPEN_TAG \"[col]\"\n");
}

#[test]
fn inspect_invalid_format() {
    let mut cmd = cargo_bin_cmd!("lean-grid");
    cmd.arg("inspect")
        .arg("-")
        .arg("--format")
        .arg("ast-xml")
        .write_stdin("[col]");

    cmd.assert().failure().stderr(
        predicate::str::contains("invalid format: ast-xml")
            .and(predicate::str::contains("token-simple")),
    );
}

#[test]
fn row_tag_generator() {
    let mut cmd = cargo_bin_cmd!("lean-grid");
    cmd.arg("row-tag").arg("--gap").arg("24").arg("--class").arg("contact");

    cmd.assert()
        .success()
        .stdout("[row gap:24 class:contact][/row]\n");
}

#[test]
fn col_tag_generator_wraps_stdin() {
    let mut cmd = cargo_bin_cmd!("lean-grid");
    cmd.arg("col-tag")
        .arg("--col")
        .arg("6")
        .arg("--md")
        .arg("4")
        .arg("--name")
        .arg("lfcf7-col")
        .arg("--wrap")
        .write_stdin("[email* your-email]");

    cmd.assert()
        .success()
        .stdout("[lfcf7-col col:6 md:4][email* your-email][/lfcf7-col]");
}

#[test]
fn list_formats() {
    let mut cmd = cargo_bin_cmd!("lean-grid");
    cmd.arg("list-formats");

    cmd.assert().success().stdout(
        predicate::str::contains("token-json")
            .and(predicate::str::contains("ast-yaml"))
            .and(predicate::str::contains("html")),
    );
}

#[test]
fn features_listing() {
    let config = config_file("[features]\nentries = true\n");
    let mut cmd = cargo_bin_cmd!("lean-grid");
    cmd.arg("features").arg("--config").arg(config.path());

    cmd.assert().success().stdout(
        predicate::str::is_match(r"grid\s+enabled\s+Grid System")
            .unwrap()
            .and(predicate::str::is_match(r"entries\s+enabled").unwrap())
            .and(predicate::str::is_match(r"form_presets\s+disabled").unwrap()),
    );
}
