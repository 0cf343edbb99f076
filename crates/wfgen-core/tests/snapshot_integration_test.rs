//! Integration tests for loading snapshots from disk and resolving names
//! across files of one compilation.

use tempfile::TempDir;
use wfgen_core::{Compilation, Error, SemanticModel, SymbolResolver};

const SNAPSHOT: &str = r#"
name: Billing
references:
  - System.Threading.Tasks.Task
  - Temporalio.Activities.ActivityAttribute
files:
  - path: src/Activities/BillingActivities.cs
    namespace: Billing.Activities
    usings: [System.Threading.Tasks, Temporalio.Activities, Billing.Models]
    types:
      - name: BillingActivities
        members:
          - name: ChargeAsync
            attributes: [Activity]
            returns: Task<Receipt>
            parameters:
              - { name: invoice, type: Invoice }
  - path: src/Models/Invoice.cs
    namespace: Billing.Models
    types:
      - name: Invoice
        kind: record
      - name: Receipt
        kind: record
"#;

fn write_snapshot(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_load_yaml_and_resolve_across_files() {
    let dir = TempDir::new().unwrap();
    let path = write_snapshot(&dir, "billing.yaml", SNAPSHOT);

    let compilation = Compilation::load(&path).unwrap();
    let model = SemanticModel::new(&compilation);
    let activities = compilation.type_declarations().next().unwrap();
    let scope = activities.scope();

    assert_eq!(
        model.resolve_type_name(scope, "Invoice").as_deref(),
        Some("Billing.Models.Invoice")
    );
    assert_eq!(
        model.resolve_attribute(scope, "Activity").as_deref(),
        Some("Temporalio.Activities.ActivityAttribute")
    );
    assert!(model.find_type("Billing.Models.Receipt").is_some());
}

#[test]
fn test_load_json_matches_yaml() {
    let dir = TempDir::new().unwrap();
    let yaml = Compilation::from_yaml(SNAPSHOT).unwrap();
    let json = serde_json::to_string(&yaml).unwrap();
    let path = write_snapshot(&dir, "billing.json", &json);

    let loaded = Compilation::load(&path).unwrap();
    assert_eq!(loaded.name, "Billing");
    assert_eq!(loaded.files.len(), 2);
    assert_eq!(
        loaded.files[0].types[0].members[0].returns,
        "Task<Receipt>"
    );
}

#[test]
fn test_load_unsupported_extension() {
    let dir = TempDir::new().unwrap();
    let path = write_snapshot(&dir, "billing.cs", SNAPSHOT);
    assert!(matches!(
        Compilation::load(&path),
        Err(Error::UnsupportedSnapshot { .. })
    ));
}

#[test]
fn test_load_missing_file() {
    let dir = TempDir::new().unwrap();
    let result = Compilation::load(dir.path().join("absent.yaml"));
    assert!(matches!(result, Err(Error::Io(_))));
}

#[test]
fn test_load_invalid_yaml() {
    let dir = TempDir::new().unwrap();
    let path = write_snapshot(&dir, "broken.yaml", "files: [");
    assert!(matches!(Compilation::load(&path), Err(Error::Yaml(_))));
}
