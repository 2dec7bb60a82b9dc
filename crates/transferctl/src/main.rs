// # transferctl
//
// Thin command-line driver over transfer-core. It parses flags, builds the
// provider configuration, wires the REST clients and a state store, and runs
// one lifecycle operation. No lifecycle logic lives here.
//
// ## Commands
//
// - `create --config FILE`: create a job from a JSON record
// - `read ID`: refresh a job
// - `update ID --config FILE`: patch a job to match a JSON record
// - `delete ID`: logically delete a job
// - `import PROJECT/JOB`: adopt an existing job
// - `ca-certs [--instance I | --instance-self-link L] [--project P]`
//
// ## Environment
//
// - `TRANSFER_PROJECT`: default project
// - `GOOGLE_OAUTH_ACCESS_TOKEN`: OAuth2 bearer token
// - `TRANSFER_STATE_PATH`: state file (in-memory state when unset)
// - `TRANSFER_PROVIDER_CONFIG`: provider JSON (endpoints, timeouts, retry windows)
// - `TRANSFER_LOG_LEVEL`: trace, debug, info, warn, error
//
// ## Example
//
// ```bash
// export GOOGLE_OAUTH_ACCESS_TOKEN=$(gcloud auth print-access-token)
// export TRANSFER_PROJECT=my-project
// export TRANSFER_STATE_PATH=$HOME/.local/state/transferctl/state.json
//
// transferctl create --config demos/transfer_job.json
// transferctl delete 1234567890
// ```

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{Level, error, info, warn};
use tracing_subscriber::FmtSubscriber;
use transfer_core::traits::{StateRecord, StateStore};
use transfer_core::{
    CaCertsLookup, Error, FileStateStore, MemoryStateStore, ProviderConfig, ReadOutcome,
    SqlCaCertsDataSource, TransferJobController, TransferJobResource,
};
use transfer_provider_gcp::{SqlAdminRestClient, StorageTransferRestClient};

/// Exit codes
///
/// - 0: Success
/// - 1: Configuration or identifier error
/// - 2: Runtime error (remote, transport, state)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TransferExitCode {
    Success = 0,
    ConfigError = 1,
    RuntimeError = 2,
}

impl From<TransferExitCode> for ExitCode {
    fn from(code: TransferExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

#[derive(Parser, Debug)]
#[command(name = "transferctl")]
#[command(about = "Manage storage transfer jobs and look up Cloud SQL server CAs", long_about = None)]
#[command(version)]
struct Cli {
    /// Default project for jobs and lookups that do not name one
    #[arg(long, env = "TRANSFER_PROJECT")]
    project: Option<String>,

    /// OAuth2 access token
    #[arg(long, env = "GOOGLE_OAUTH_ACCESS_TOKEN", hide_env_values = true)]
    access_token: Option<String>,

    /// State file; in-memory state when unset
    #[arg(long, env = "TRANSFER_STATE_PATH")]
    state: Option<PathBuf>,

    /// Provider configuration file (JSON)
    #[arg(long, env = "TRANSFER_PROVIDER_CONFIG")]
    provider_config: Option<PathBuf>,

    /// Log level
    #[arg(long, env = "TRANSFER_LOG_LEVEL", default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create a transfer job
    Create {
        /// Job record (JSON)
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Refresh a transfer job from the API
    Read {
        /// Bare job id
        id: String,
    },
    /// Patch a transfer job to match a record
    Update {
        /// Bare job id
        id: String,
        /// Planned job record (JSON)
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Logically delete a transfer job
    Delete {
        /// Bare job id
        id: String,
    },
    /// Adopt an existing transfer job
    Import {
        /// `{projectId}/{transferJobName}`
        import_id: String,
    },
    /// List the server CA certificates of a Cloud SQL instance
    CaCerts(CaCertsArgs),
}

#[derive(Args, Debug)]
struct CaCertsArgs {
    /// Instance name
    #[arg(long, conflicts_with = "instance_self_link")]
    instance: Option<String>,

    /// Instance self link
    #[arg(long)]
    instance_self_link: Option<String>,

    /// Project of the instance
    #[arg(long)]
    project: Option<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match build_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {:#}", e);
            return TransferExitCode::ConfigError.into();
        }
    };

    let log_level = match parse_log_level(&cli.log_level) {
        Ok(level) => level,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return TransferExitCode::ConfigError.into();
        }
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return TransferExitCode::ConfigError.into();
    }

    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return TransferExitCode::RuntimeError.into();
        }
    };

    let code = rt.block_on(async {
        match run(cli, config).await {
            Ok(()) => TransferExitCode::Success,
            Err(e) => {
                error!("{:#}", e);
                exit_code_for(&e)
            }
        }
    });

    code.into()
}

/// Provider configuration: file first, then flag/env overrides
fn build_config(cli: &Cli) -> Result<ProviderConfig> {
    let mut config = match &cli.provider_config {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse {}", path.display()))?
        }
        None => ProviderConfig::new(),
    };

    if let Some(project) = &cli.project {
        config.project = Some(project.clone());
    }
    if let Some(token) = &cli.access_token {
        config.access_token = token.clone();
    }

    config.validate()?;
    Ok(config)
}

fn parse_log_level(value: &str) -> std::result::Result<Level, String> {
    match value.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        other => Err(format!(
            "log level '{}' is not valid. Valid levels: trace, debug, info, warn, error",
            other
        )),
    }
}

/// Configuration and identifier problems are the caller's to fix
fn exit_code_for(error: &anyhow::Error) -> TransferExitCode {
    match error.downcast_ref::<Error>() {
        Some(Error::Config(_) | Error::InvalidIdentifier(_)) => TransferExitCode::ConfigError,
        _ => TransferExitCode::RuntimeError,
    }
}

async fn run(cli: Cli, config: ProviderConfig) -> Result<()> {
    let store = open_store(cli.state.as_deref()).await?;

    match cli.command {
        Command::Create { config: path } => {
            let planned = load_resource(&path)?;
            let controller = job_controller(&config)?;
            let created = controller.create(&planned).await?;
            save(store.as_ref(), &created).await?;
            print_resource(&created)
        }
        Command::Read { id } => {
            let controller = job_controller(&config)?;
            let prior = prior_state(store.as_ref(), &id).await?;
            match controller.read(&prior).await? {
                ReadOutcome::Found(resource) => {
                    save(store.as_ref(), &resource).await?;
                    print_resource(&resource)
                }
                ReadOutcome::Absent => {
                    warn!("Transfer job {} no longer exists; dropping local state", id);
                    store.delete_record(&id).await?;
                    Ok(())
                }
            }
        }
        Command::Update { id, config: path } => {
            let planned = load_resource(&path)?;
            let controller = job_controller(&config)?;
            let prior = match store.get_record(&id).await? {
                Some(record) => record.resource,
                None => {
                    let mut stub = prior_state(store.as_ref(), &id).await?;
                    stub.project = planned.project.clone();
                    controller
                        .read(&stub)
                        .await?
                        .found()
                        .ok_or_else(|| Error::not_found(format!("transfer job {} not found", id)))?
                }
            };
            let updated = controller.update(&prior, &planned).await?;
            save(store.as_ref(), &updated).await?;
            print_resource(&updated)
        }
        Command::Delete { id } => {
            let controller = job_controller(&config)?;
            let prior = prior_state(store.as_ref(), &id).await?;
            controller.delete(&prior).await?;
            store.delete_record(&id).await?;
            Ok(())
        }
        Command::Import { import_id } => {
            let controller = job_controller(&config)?;
            let imported = controller.import(&import_id).await?;
            save(store.as_ref(), &imported).await?;
            print_resource(&imported)
        }
        Command::CaCerts(args) => {
            let lookup = CaCertsLookup::new(Box::new(SqlAdminRestClient::new(&config)?), &config);
            let query = SqlCaCertsDataSource {
                instance: args.instance,
                instance_self_link: args.instance_self_link,
                project: args.project,
                ..Default::default()
            };
            let result = lookup.lookup(&query).await?;
            println!("{}", serde_json::to_string_pretty(&result)?);
            Ok(())
        }
    }
}

fn job_controller(config: &ProviderConfig) -> Result<TransferJobController> {
    let client = StorageTransferRestClient::new(config)?;
    Ok(TransferJobController::new(Box::new(client), config))
}

async fn open_store(path: Option<&Path>) -> Result<Box<dyn StateStore>> {
    match path {
        Some(path) => {
            let store = FileStateStore::new(path).await?;
            info!("Using state file {}", store.path().display());
            Ok(Box::new(store))
        }
        None => Ok(Box::new(MemoryStateStore::new())),
    }
}

/// Stored record for `id`, else a stub naming the job by id alone
async fn prior_state(store: &dyn StateStore, id: &str) -> Result<TransferJobResource> {
    Ok(match store.get_record(id).await? {
        Some(record) => record.resource,
        None => TransferJobResource {
            id: Some(id.to_string()),
            ..Default::default()
        },
    })
}

fn load_resource(path: &Path) -> Result<TransferJobResource> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::config(format!("Failed to read {}: {}", path.display(), e)))?;
    let resource = serde_json::from_str(&content)
        .map_err(|e| Error::config(format!("Failed to parse {}: {}", path.display(), e)))?;
    Ok(resource)
}

async fn save(store: &dyn StateStore, resource: &TransferJobResource) -> Result<()> {
    let id = resource
        .id
        .as_deref()
        .ok_or_else(|| Error::invalid_identifier("transfer job has no id"))?;
    store
        .set_record(id, &StateRecord::new(resource.clone()))
        .await?;
    store.flush().await?;
    Ok(())
}

fn print_resource(resource: &TransferJobResource) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&redacted(resource))?);
    Ok(())
}

/// Copy of `resource` with the AWS secret masked for display
fn redacted(resource: &TransferJobResource) -> TransferJobResource {
    let mut shown = resource.clone();
    if let Some(key) = shown
        .transfer_spec
        .as_mut()
        .and_then(|spec| spec.aws_s3_data_source.as_mut())
        .and_then(|s3| s3.aws_access_key.as_mut())
    {
        key.secret_access_key = "<REDACTED>".to_string();
    }
    shown
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use transfer_core::resource::{AwsAccessKeyBlock, AwsS3DataBlock, TransferSpecBlock};

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_update_command() {
        let cli = Cli::try_parse_from([
            "transferctl",
            "--project",
            "p1",
            "--access-token",
            "token",
            "update",
            "123",
            "--config",
            "job.json",
        ])
        .unwrap();

        assert_eq!(cli.project.as_deref(), Some("p1"));
        match cli.command {
            Command::Update { id, config } => {
                assert_eq!(id, "123");
                assert_eq!(config, PathBuf::from("job.json"));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_ca_certs_inputs_conflict() {
        let result = Cli::try_parse_from([
            "transferctl",
            "ca-certs",
            "--instance",
            "db-1",
            "--instance-self-link",
            "projects/p/instances/db-1",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_build_config_from_file_and_flags() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("provider.json");
        std::fs::write(&path, r#"{"project":"from-file","retry":{"delete_timeout_secs":30}}"#)
            .unwrap();

        let cli = Cli::try_parse_from([
            "transferctl",
            "--provider-config",
            path.to_str().unwrap(),
            "--access-token",
            "token",
            "read",
            "1",
        ])
        .unwrap();
        let config = build_config(&cli).unwrap();
        assert_eq!(config.retry.delete_timeout_secs, 30);
        assert_eq!(config.access_token, "token");

        let cli = Cli::try_parse_from([
            "transferctl",
            "--provider-config",
            path.to_str().unwrap(),
            "--project",
            "from-flag",
            "read",
            "1",
        ])
        .unwrap();
        assert_eq!(build_config(&cli).unwrap().project.as_deref(), Some("from-flag"));
    }

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(parse_log_level("DEBUG").unwrap(), Level::DEBUG);
        assert!(parse_log_level("verbose").is_err());
    }

    #[test]
    fn test_exit_code_mapping() {
        let config: anyhow::Error = Error::config("missing").into();
        assert_eq!(exit_code_for(&config), TransferExitCode::ConfigError);

        let identifier: anyhow::Error = Error::invalid_identifier("bad id").into();
        assert_eq!(exit_code_for(&identifier), TransferExitCode::ConfigError);

        let remote: anyhow::Error = Error::api(500, "boom").into();
        assert_eq!(exit_code_for(&remote), TransferExitCode::RuntimeError);

        let io: anyhow::Error = std::io::Error::other("disk").into();
        assert_eq!(exit_code_for(&io), TransferExitCode::RuntimeError);
    }

    #[test]
    fn test_redacted_masks_secret_only() {
        let resource = TransferJobResource {
            transfer_spec: Some(TransferSpecBlock {
                aws_s3_data_source: Some(AwsS3DataBlock {
                    bucket_name: "b".to_string(),
                    aws_access_key: Some(AwsAccessKeyBlock {
                        access_key_id: "AKIA".to_string(),
                        secret_access_key: "secret".to_string(),
                    }),
                }),
                ..Default::default()
            }),
            ..Default::default()
        };

        let shown = serde_json::to_string(&redacted(&resource)).unwrap();
        assert!(!shown.contains("\"secret\""));
        assert!(shown.contains("AKIA"));
    }

    #[tokio::test]
    async fn test_save_and_prior_state_round_trip() {
        let store = MemoryStateStore::new();
        let resource = TransferJobResource {
            id: Some("42".to_string()),
            description: "kept".to_string(),
            ..Default::default()
        };
        save(&store, &resource).await.unwrap();

        let prior = prior_state(&store, "42").await.unwrap();
        assert_eq!(prior.description, "kept");

        let stub = prior_state(&store, "missing").await.unwrap();
        assert_eq!(stub.id.as_deref(), Some("missing"));
        assert!(stub.name.is_none());
    }
}
