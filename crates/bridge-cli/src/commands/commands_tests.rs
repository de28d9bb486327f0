use std::fs;
use std::path::{Path, PathBuf};

use bridge_core::Colors;
use indoc::indoc;

use super::check::{self, CheckArgs};
use super::generate::{self, GenArgs};
use super::loader::{load_project, load_resolved};
use super::types::list_types;
use super::*;

const SERVICE_JSON: &str = indoc! {r#"
    {
      "path": "service.json",
      "decls": [
        { "name": "UserService", "node": { "kind": "interface", "methods": [
          { "name": "SaveUser", "ty": { "kind": "function",
            "params": [{ "kind": "ident", "name": "SaveUserRequest" }],
            "results": [{ "kind": "ident", "name": "error" }] } }
        ] } },
        { "name": "SaveUserRequest", "node": { "kind": "struct", "fields": [
          { "names": ["U"], "ty": { "kind": "pointer", "target": { "kind": "ident", "name": "User" } } }
        ] } }
      ]
    }
"#};

const USERS_JSON: &str = indoc! {r#"
    {
      "path": "users.json",
      "decls": [
        { "name": "User", "node": { "kind": "struct", "fields": [
          { "names": ["Name"], "ty": { "kind": "ident", "name": "string" } }
        ] } }
      ]
    }
"#};

fn write_inputs(dir: &Path, files: &[(&str, &str)]) -> Vec<PathBuf> {
    files
        .iter()
        .map(|(name, json)| {
            let path = dir.join(name);
            fs::write(&path, json).unwrap();
            path
        })
        .collect()
}

fn gen_args(files: Vec<PathBuf>, output: PathBuf) -> GenArgs {
    GenArgs {
        files,
        service: "UserService".to_string(),
        namespace: String::new(),
        operation: None,
        references: false,
        package: "restclient".to_string(),
        client_prefix: String::new(),
        client_suffix: "Client".to_string(),
        known_codecs: Vec::new(),
        output: Some(output),
        color: false,
    }
}

#[test]
fn load_reads_files_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let files = write_inputs(
        dir.path(),
        &[("a.json", SERVICE_JSON), ("b.json", USERS_JSON)],
    );

    let project = load_project(&files).unwrap();

    assert!(project.diagnostics().is_empty());
    let paths: Vec<_> = project.files().iter().map(|f| f.path.as_str()).collect();
    assert_eq!(paths, ["service.json", "users.json"]);
}

#[test]
fn load_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.json");

    let err = load_project(&[missing]).unwrap_err();

    assert!(matches!(err, CommandError::Read { .. }));
    assert!(err.to_string().starts_with("failed to read '"));
}

#[test]
fn load_rejects_resolution_errors() {
    let dir = tempfile::tempdir().unwrap();
    let bad = r#"{ "decls": [
        { "name": "A", "node": { "kind": "qualified", "package": "nope", "name": "B" } }
    ] }"#;
    let files = write_inputs(dir.path(), &[("bad.json", bad)]);

    let err = load_resolved(&files, false).unwrap_err();

    // The unknown import also leaves `nope.B` unresolved.
    assert_eq!(
        err.to_string(),
        "aborting due to 1 errors and 1 warnings"
    );
}

#[test]
fn check_strict_fails_on_warnings() {
    let dir = tempfile::tempdir().unwrap();
    let files = write_inputs(dir.path(), &[("service.json", SERVICE_JSON)]);

    let lenient = check::run(CheckArgs {
        files: files.clone(),
        strict: false,
        color: false,
    });
    let strict = check::run(CheckArgs {
        files,
        strict: true,
        color: false,
    });

    assert!(lenient.is_ok());
    assert!(matches!(
        strict,
        Err(CommandError::Rejected {
            errors: 0,
            warnings: 1
        })
    ));
}

#[test]
fn types_listing() {
    let dir = tempfile::tempdir().unwrap();
    let files = write_inputs(
        dir.path(),
        &[("a.json", SERVICE_JSON), ("b.json", USERS_JSON)],
    );
    let project = load_project(&files).unwrap();

    let listing = list_types(project.registry(), Colors::OFF);

    assert_eq!(
        listing,
        indoc! {"
            UserService      RecordType      UserService
            SaveUserRequest  RecordType      SaveUserRequest
            User             RecordType      User
        "}
    );
}

#[test]
fn gen_writes_one_file_per_output() {
    let dir = tempfile::tempdir().unwrap();
    let files = write_inputs(
        dir.path(),
        &[("a.json", SERVICE_JSON), ("b.json", USERS_JSON)],
    );
    let out = dir.path().join("out");

    generate::run(gen_args(files, out.clone())).unwrap();

    let mut written: Vec<_> = fs::read_dir(&out)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    written.sort();
    assert_eq!(written, ["client.txt", "ops.txt", "readers.txt", "writers.txt"]);
    assert_eq!(
        fs::read_to_string(out.join("writers.txt")).unwrap(),
        indoc! {"
            package restclient

            func Write_SaveUserRequest(SaveUserRequest) [record]
              U *User via Write_User

            func Write_User(User) [record]
              Name string via Write_string (supplied)

        "}
    );
}

#[test]
fn gen_unknown_service() {
    let dir = tempfile::tempdir().unwrap();
    let files = write_inputs(dir.path(), &[("b.json", USERS_JSON)]);

    let err = generate::run(gen_args(files, dir.path().join("out"))).unwrap_err();

    assert_eq!(
        err.to_string(),
        "no service `UserService` in namespace ``"
    );
    assert!(!dir.path().join("out").exists());
}
