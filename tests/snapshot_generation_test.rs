use anyhow::Result;
use force_codegen::{
    CodegenEngine, JpaClassGenerator, LocalStorage, SnapshotMetadataSource, TomlConfig,
};
use std::io::Read;
use tempfile::TempDir;

const SNAPSHOT: &str = r#"{
  "sobjects": [
    {
      "name": "Account",
      "label": "Account",
      "fields": [
        {"name": "Id", "type": "id"},
        {"name": "Name", "type": "string", "length": 255},
        {"name": "OwnerId", "type": "reference", "referenceTo": ["User"]},
        {"name": "SomeCustomField__c", "type": "string", "length": 100, "createable": true, "updateable": true}
      ]
    },
    {
      "name": "NewCustomObject__c",
      "label": "New Custom Object",
      "custom": true,
      "fields": [
        {"name": "Id", "type": "id"},
        {"name": "Account__c", "type": "reference", "referenceTo": ["Account"], "createable": true, "updateable": true},
        {"name": "Due_Date__c", "type": "date", "createable": true, "updateable": true},
        {"name": "Attachment__c", "type": "base64", "createable": true, "updateable": true}
      ]
    }
  ]
}"#;

async fn write_snapshot(dir: &TempDir) -> Result<String> {
    let path = dir.path().join("metadata.json");
    tokio::fs::write(&path, SNAPSHOT).await?;
    Ok(path.to_str().unwrap().to_string())
}

#[tokio::test]
async fn test_generate_from_toml_and_snapshot() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let snapshot_path = write_snapshot(&temp_dir).await?;
    let output_dir = temp_dir.path().join("src/main/java");
    let output_dir = output_dir.to_str().unwrap().replace('\\', "/");

    let config = TomlConfig::from_toml_str(&format!(
        r#"
[generator]
package_name = "com.deadbeef.model"
output_dir = "{}"
objects = ["NewCustomObject__c"]
include_references = true
snapshot = "{}"
"#,
        output_dir,
        snapshot_path.replace('\\', "/")
    ))?;
    force_codegen::utils::validation::Validate::validate(&config)?;

    let metadata =
        SnapshotMetadataSource::load(&LocalStorage::new(temp_dir.path()), "metadata.json").await?;
    let settings = config.settings(false)?;
    let storage = LocalStorage::new(settings.output_path.clone());
    let engine = CodegenEngine::new(JpaClassGenerator::new(storage, metadata, settings));

    let report = engine.run(&config.generator.objects).await?;
    assert_eq!(report.classes, vec!["Account", "NewCustomObject"]);
    assert_eq!(report.files_written, 2);

    let custom = std::fs::read_to_string(
        temp_dir
            .path()
            .join("src/main/java/com/deadbeef/model/NewCustomObject.java"),
    )?;
    assert!(custom.contains("@Table(name = \"NewCustomObject__c\")"));
    assert!(custom.contains("@ManyToOne(fetch = FetchType.LAZY)"));
    assert!(custom.contains("private Account account;"));
    assert!(custom.contains("@Temporal(TemporalType.DATE)"));
    assert!(custom.contains("private Date dueDate;"));
    assert!(custom.contains("private byte[] attachment;"));
    assert!(custom.contains("public Date getDueDate() {"));

    Ok(())
}

#[tokio::test]
async fn test_archive_output_from_snapshot() -> Result<()> {
    let temp_dir = TempDir::new()?;
    write_snapshot(&temp_dir).await?;
    let output_dir = temp_dir.path().join("out");

    let config = TomlConfig::from_toml_str(
        r#"
[generator]
package_name = "com.deadbeef"
objects = ["*"]
archive = true
"#,
    )?;

    let metadata =
        SnapshotMetadataSource::load(&LocalStorage::new(temp_dir.path()), "metadata.json").await?;
    let mut settings = config.settings(false)?;
    settings.output_path = output_dir.to_str().unwrap().to_string();
    let generator = JpaClassGenerator::new(
        LocalStorage::new(output_dir.clone()),
        metadata,
        settings,
    );

    let report = generator
        .generate_jpa_classes(&config.generator.objects)
        .await?;
    assert!(report.output_path.ends_with("generated-sources.zip"));

    let zip_data = std::fs::read(output_dir.join("generated-sources.zip"))?;
    let mut archive = zip::ZipArchive::new(std::io::Cursor::new(zip_data))?;
    assert_eq!(archive.len(), 2);

    let mut account = String::new();
    archive
        .by_name("com/deadbeef/Account.java")?
        .read_to_string(&mut account)?;
    assert!(account.contains("public class Account extends BaseForceObject {"));
    assert!(!output_dir.join("com").exists());

    Ok(())
}

#[tokio::test]
async fn test_invalid_package_in_config_writes_nothing() -> Result<()> {
    let temp_dir = TempDir::new()?;
    write_snapshot(&temp_dir).await?;
    let output_dir = temp_dir.path().join("out");

    let config = TomlConfig::from_toml_str(
        r#"
[generator]
package_name = "com.deadbeef."
objects = ["Account"]
"#,
    )?;

    let metadata =
        SnapshotMetadataSource::load(&LocalStorage::new(temp_dir.path()), "metadata.json").await?;
    let mut settings = config.settings(false)?;
    settings.output_path = output_dir.to_str().unwrap().to_string();
    let generator = JpaClassGenerator::new(LocalStorage::new(output_dir.clone()), metadata, settings);

    let err = generator
        .generate_jpa_classes(&config.generator.objects)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Invalid package name: com.deadbeef.");
    assert!(!output_dir.exists());

    Ok(())
}
