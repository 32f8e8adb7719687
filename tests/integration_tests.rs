use force_codegen::{
    CodegenEngine, ForceApiClient, ForceAuth, ForceCredentials, GeneratorSettings,
    JpaClassGenerator, LocalStorage,
};
use httpmock::prelude::*;
use tempfile::TempDir;

fn account_describe() -> serde_json::Value {
    serde_json::json!({
        "name": "Account",
        "label": "Account",
        "custom": false,
        "queryable": true,
        "fields": [
            {"name": "Id", "type": "id", "length": 18, "nillable": false},
            {"name": "Name", "type": "string", "length": 255, "nillable": false, "createable": true, "updateable": true},
            {"name": "OwnerId", "type": "reference", "referenceTo": ["User"], "nillable": false, "createable": true, "updateable": true},
            {"name": "AnnualRevenue", "type": "currency", "createable": true, "updateable": true},
            {"name": "SomeCustomField__c", "type": "string", "length": 100, "custom": true, "createable": true, "updateable": true}
        ]
    })
}

fn credentials(server: &MockServer) -> ForceAuth {
    ForceAuth::Password(ForceCredentials {
        login_url: server.base_url(),
        username: "me@example.com".to_string(),
        password: "secret".to_string(),
        client_id: "key".to_string(),
        client_secret: "shh".to_string(),
    })
}

#[tokio::test]
async fn test_end_to_end_generation_over_http() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();

    let token_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/services/oauth2/token")
            .body_contains("grant_type=password")
            .body_contains("username=me%40example.com");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "access_token": "session-token",
                "instance_url": server.base_url(),
                "token_type": "Bearer"
            }));
    });

    let describe_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/services/data/v52.0/sobjects/Account/describe/")
            .header("Authorization", "Bearer session-token");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(account_describe());
    });

    let client = ForceApiClient::new(credentials(&server), "v52.0").unwrap();
    let storage = LocalStorage::new(output_path.clone());
    let settings = GeneratorSettings::new("com.deadbeef.model", output_path.clone());
    let engine = CodegenEngine::new(JpaClassGenerator::new(storage, client, settings));

    let report = engine.run(&["Account".to_string()]).await.unwrap();

    token_mock.assert();
    describe_mock.assert();
    assert_eq!(report.classes, vec!["Account"]);
    assert_eq!(report.files_written, 1);

    let generated = temp_dir.path().join("com/deadbeef/model/Account.java");
    let source = std::fs::read_to_string(generated).unwrap();
    assert!(source.starts_with("// Generated by force-codegen from the Account object."));
    assert!(source.contains("package com.deadbeef.model;"));
    assert!(source.contains("import java.math.BigDecimal;"));
    assert!(source.contains("@ManyToOne(fetch = FetchType.EAGER)"));
    assert!(source.contains("private ForceOwner owner;"));
    assert!(source.contains("private BigDecimal annualRevenue;"));
    assert!(source.contains("@Column(name = \"SomeCustomField__c\", length = 100)"));
    assert!(!source.contains("private String name;"));
}

#[tokio::test]
async fn test_invalid_package_name_fails_before_any_io() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().join("out");

    let server = MockServer::start();
    let token_mock = server.mock(|when, then| {
        when.method(POST).path("/services/oauth2/token");
        then.status(200).json_body(serde_json::json!({
            "access_token": "session-token",
            "instance_url": server.base_url()
        }));
    });

    let client = ForceApiClient::new(credentials(&server), "v52.0").unwrap();
    let storage = LocalStorage::new(output_path.clone());
    let mut settings = GeneratorSettings::new("com.deadbeef", output_path.to_str().unwrap());
    settings.set_package_name("1");
    let generator = JpaClassGenerator::new(storage, client, settings);

    let err = generator.generate_jpa_classes(&[]).await.unwrap_err();

    assert_eq!(err.to_string(), "Invalid package name: 1");
    assert_eq!(token_mock.hits(), 0);
    assert!(!output_path.exists());
}

#[tokio::test]
async fn test_wildcard_uses_describe_global() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();

    let global_mock = server.mock(|when, then| {
        when.method(GET).path("/services/data/v52.0/sobjects/");
        then.status(200).json_body(serde_json::json!({
            "encoding": "UTF-8",
            "maxBatchSize": 200,
            "sobjects": [
                {"name": "Account", "label": "Account", "custom": false, "queryable": true},
                {"name": "AccountHistory", "label": "Account History", "custom": false, "queryable": false}
            ]
        }));
    });

    let describe_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/services/data/v52.0/sobjects/Account/describe/");
        then.status(200).json_body(account_describe());
    });

    let auth = ForceAuth::Session {
        access_token: "existing-token".to_string(),
        instance_url: format!("{}/", server.base_url()),
    };
    let client = ForceApiClient::new(auth, "v52.0").unwrap();
    let storage = LocalStorage::new(output_path.clone());
    let settings = GeneratorSettings::new("com.deadbeef", output_path);
    let generator = JpaClassGenerator::new(storage, client, settings);

    let report = generator
        .generate_jpa_classes(&["*".to_string()])
        .await
        .unwrap();

    global_mock.assert();
    describe_mock.assert();
    assert_eq!(report.classes, vec!["Account"]);
}

#[tokio::test]
async fn test_login_failure_is_an_auth_error() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/services/oauth2/token");
        then.status(400).json_body(serde_json::json!({
            "error": "invalid_grant",
            "error_description": "authentication failure"
        }));
    });

    let client = ForceApiClient::new(credentials(&server), "v52.0").unwrap();
    let generator = JpaClassGenerator::new(
        LocalStorage::new(output_path.clone()),
        client,
        GeneratorSettings::new("com.deadbeef", output_path),
    );

    let err = generator
        .generate_jpa_classes(&["Account".to_string()])
        .await
        .unwrap_err();

    assert_eq!(
        err.to_string(),
        "Authentication failed: invalid_grant: authentication failure"
    );
}

#[tokio::test]
async fn test_unknown_object_is_reported_by_name() {
    let temp_dir = TempDir::new().unwrap();
    let output_path = temp_dir.path().to_str().unwrap().to_string();

    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET)
            .path("/services/data/v52.0/sobjects/Nope__c/describe/");
        then.status(404).json_body(serde_json::json!([
            {"errorCode": "NOT_FOUND", "message": "The requested resource does not exist"}
        ]));
    });

    let auth = ForceAuth::Session {
        access_token: "existing-token".to_string(),
        instance_url: server.base_url(),
    };
    let generator = JpaClassGenerator::new(
        LocalStorage::new(output_path.clone()),
        ForceApiClient::new(auth, "v52.0").unwrap(),
        GeneratorSettings::new("com.deadbeef", output_path.clone()),
    );

    let err = generator
        .generate_jpa_classes(&["Nope__c".to_string()])
        .await
        .unwrap_err();

    assert_eq!(err.to_string(), "Object not found: Nope__c");
    assert_eq!(std::fs::read_dir(&output_path).unwrap().count(), 0);
}
