use clap::Parser;
use force_codegen::config::toml_config::TomlConfig;
use force_codegen::domain::ports::MetadataSource;
use force_codegen::utils::error::{CodegenError, ErrorSeverity};
use force_codegen::utils::{logger, validation::Validate};
use force_codegen::{
    CliConfig, CodegenEngine, ForceApiClient, JpaClassGenerator, LocalStorage,
    SnapshotMetadataSource,
};

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting force-codegen");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => fail(e),
    };

    // Validation runs before any metadata call or file write.
    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        fail(e);
    }

    let result = match &config.generator.snapshot {
        Some(snapshot) => {
            let metadata = match SnapshotMetadataSource::load(&LocalStorage::new("."), snapshot).await {
                Ok(metadata) => metadata,
                Err(e) => fail(e),
            };
            generate(&config, metadata, cli.dry_run).await
        }
        None => {
            let metadata = match config
                .auth()
                .and_then(|auth| ForceApiClient::with_timeout(auth, config.api_version(), config.timeout()))
            {
                Ok(client) => client,
                Err(e) => fail(e),
            };
            generate(&config, metadata, cli.dry_run).await
        }
    };

    match result {
        Ok(report) => {
            tracing::info!(
                "Generated {} classes in package {}",
                report.classes.len(),
                report.package_name
            );
            println!(
                "Generated {} classes into {}",
                report.classes.len(),
                report.output_path
            );
            for class in &report.classes {
                println!("  {}", class);
            }
        }
        Err(e) => fail(e),
    }
}

async fn generate<M: MetadataSource>(
    config: &TomlConfig,
    metadata: M,
    dry_run: bool,
) -> force_codegen::Result<force_codegen::domain::model::GenerationReport> {
    let settings = config.settings(dry_run)?;
    let storage = LocalStorage::new(settings.output_path.clone());
    let generator = JpaClassGenerator::new(storage, metadata, settings);
    let engine = CodegenEngine::new(generator);
    engine.run(&config.generator.objects).await
}

fn fail(e: CodegenError) -> ! {
    tracing::error!(
        "Code generation failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("{}", e.user_friendly_message());
    eprintln!("Suggestion: {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}
