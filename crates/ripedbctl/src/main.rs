// # ripedbctl - RIPE Database object reconciler CLI
//
// This binary is a thin host around `ripedb-core`:
// 1. Reading configuration from environment variables
// 2. Initializing logging and the runtime
// 3. Building the REST client and the reconciler
// 4. Mapping one subcommand onto one reconciler operation
//
// Object logic (assembly, validation, filtering, identifiers) lives in
// `ripedb-core`; this file only parses, dispatches and prints.
//
// ## Configuration
//
// ### Endpoint
// - `RIPEDB_ENDPOINT`: REST API base URL (default `https://rest.db.ripe.net`)
// - `RIPEDB_SOURCE`: Source name (default `RIPE`)
// - `RIPEDB_TIMEOUT_SECS`: Request timeout in seconds (default 30)
// - `RIPEDB_DRY_RUN`: `true` to validate writes without committing them
//
// ### Credentials
// - `RIPEDB_USER`: Maintainer name, for basic auth (optional)
// - `RIPEDB_PASSWORD`: Maintainer password
// - `RIPEDB_CERTIFICATE` / `RIPEDB_KEY`: X.509 pair (not supported by the REST client)
//
// ### Logging
// - `RIPEDB_LOG_LEVEL`: trace, debug, info, warn, error (default warn). Logs go to
//   stderr; stdout carries JSON results only.
//
// ## Example
//
// ```bash
// export RIPEDB_SOURCE=TEST
// export RIPEDB_ENDPOINT=https://rest-test.db.ripe.net
// export RIPEDB_USER=EXAMPLE-MNT
// export RIPEDB_PASSWORD=secret
//
// ripedbctl get aut-num AS3333
// ripedbctl create as-set.json
// ripedbctl delete as-set:AS-EXAMPLE
// ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use ripedb_client_rest::RestClient;
use ripedb_core::config::DEFAULT_TIMEOUT_SECS;
use ripedb_core::{AuthConfig, ClientConfig, ObjectModel, Reconciler, functions};
use serde_json::Value;
use std::env;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{Level, debug, error};
use tracing_subscriber::FmtSubscriber;

/// Exit codes for the CLI
///
/// - 0: Success
/// - 1: Configuration or startup error
/// - 2: Runtime error
/// - 3: Object not found
#[derive(Debug, Clone, Copy)]
enum CtlExitCode {
    /// Operation completed
    Success = 0,
    /// Configuration error or startup failure
    ConfigError = 1,
    /// Operation failed
    RuntimeError = 2,
    /// The object does not exist remotely
    NotFound = 3,
}

impl From<CtlExitCode> for ExitCode {
    fn from(code: CtlExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

#[derive(Parser, Debug)]
#[command(name = "ripedbctl")]
#[command(about = "Reconcile RIPE Database objects from JSON definitions", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Look up an object and print its read-only view
    Get {
        /// Object class (e.g. aut-num)
        class: String,
        /// Primary key (e.g. AS3333)
        key: String,
    },

    /// Read a managed object by identifier
    Read {
        /// Identifier `<class>:<primary_key>`
        id: String,
    },

    /// Create an object from a JSON model file
    Create {
        /// Path to an ObjectModel JSON file
        file: PathBuf,
    },

    /// Replace an object from a JSON model file
    Update {
        /// Path to an ObjectModel JSON file
        file: PathBuf,
    },

    /// Delete an object by identifier
    #[command(alias = "rm")]
    Delete {
        /// Identifier `<class>:<primary_key>`
        id: String,
    },

    /// Turn an identifier into a model without contacting the server
    Import {
        /// Identifier `<class>:<primary_key>`
        id: String,
    },

    /// Evaluate an attribute lookup function
    #[command(name = "fn")]
    Function {
        /// Function name (get_first, get_all)
        name: String,
        /// Path to a JSON list of {name, value} attributes
        attributes: PathBuf,
        /// Attribute name to look up
        key: String,
    },
}

/// Application configuration
struct Config {
    client: ClientConfig,
    log_level: String,
}

impl Config {
    /// Load configuration from environment variables
    fn from_env() -> Result<Self> {
        let mut client = ClientConfig::new();

        if let Ok(endpoint) = env::var("RIPEDB_ENDPOINT") {
            client.endpoint = endpoint;
        }
        if let Ok(source) = env::var("RIPEDB_SOURCE") {
            client.source = source;
        }

        client.timeout_secs = match env::var("RIPEDB_TIMEOUT_SECS") {
            Ok(raw) => raw.trim().parse().with_context(|| {
                format!("RIPEDB_TIMEOUT_SECS must be a number of seconds. Got: {}", raw)
            })?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        client.dry_run = match env::var("RIPEDB_DRY_RUN") {
            Ok(raw) => parse_bool(&raw)
                .with_context(|| format!("RIPEDB_DRY_RUN must be true or false. Got: {}", raw))?,
            Err(_) => false,
        };

        client.auth = auth_from_parts(
            env::var("RIPEDB_USER").ok(),
            env::var("RIPEDB_PASSWORD").ok(),
            env::var("RIPEDB_CERTIFICATE").ok(),
            env::var("RIPEDB_KEY").ok(),
        )?;

        Ok(Self {
            client,
            log_level: env::var("RIPEDB_LOG_LEVEL").unwrap_or_else(|_| "warn".to_string()),
        })
    }

    /// Validate the configuration
    fn validate(&self) -> Result<()> {
        self.client.validate()?;

        if self.client.timeout_secs > 600 {
            anyhow::bail!(
                "RIPEDB_TIMEOUT_SECS must be between 1 and 600 seconds. Got: {}",
                self.client.timeout_secs
            );
        }

        if self.client.endpoint.starts_with("http://")
            && matches!(self.client.auth, AuthConfig::Password { .. })
        {
            eprintln!(
                "WARNING: RIPEDB_ENDPOINT uses HTTP (not HTTPS) while a password is configured. \
                 Credentials will be sent in clear text."
            );
        }

        parse_level(&self.log_level)?;

        Ok(())
    }
}

/// Pick the credentials implied by the set variables
fn auth_from_parts(
    user: Option<String>,
    password: Option<String>,
    certificate: Option<String>,
    key: Option<String>,
) -> Result<AuthConfig> {
    let nonempty = |value: Option<String>| value.filter(|v| !v.is_empty());
    let (user, password) = (nonempty(user), nonempty(password));
    let (certificate, key) = (nonempty(certificate), nonempty(key));

    if certificate.is_some() || key.is_some() {
        if password.is_some() {
            anyhow::bail!("Set either RIPEDB_PASSWORD or RIPEDB_CERTIFICATE/RIPEDB_KEY, not both");
        }
        return Ok(AuthConfig::Certificate {
            certificate: certificate.unwrap_or_default(),
            key: key.unwrap_or_default(),
        });
    }

    match (user, password) {
        (user, Some(password)) => Ok(AuthConfig::Password { user, password }),
        (Some(_), None) => anyhow::bail!(
            "RIPEDB_USER is set but RIPEDB_PASSWORD is not. \
             Set it via: export RIPEDB_PASSWORD=your_password"
        ),
        (None, None) => Ok(AuthConfig::Anonymous),
    }
}

fn parse_bool(raw: &str) -> Result<bool> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "" | "0" | "false" | "no" | "off" => Ok(false),
        other => anyhow::bail!("not a boolean: {}", other),
    }
}

fn parse_level(raw: &str) -> Result<Level> {
    match raw.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => anyhow::bail!(
            "RIPEDB_LOG_LEVEL '{}' is not valid. \
             Valid levels: trace, debug, info, warn, error",
            raw
        ),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Load configuration from environment
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {:#}", e);
            return CtlExitCode::ConfigError.into();
        }
    };

    // Validate configuration
    if let Err(e) = config.validate() {
        eprintln!("Configuration validation error: {:#}", e);
        return CtlExitCode::ConfigError.into();
    }

    // Initialize tracing
    let log_level = parse_level(&config.log_level).unwrap_or(Level::WARN);
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return CtlExitCode::ConfigError.into();
    }

    let client = match RestClient::new(&config.client) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return CtlExitCode::ConfigError.into();
        }
    };
    debug!("Using {:?}", client);

    let reconciler = Reconciler::new(Arc::new(client));

    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return CtlExitCode::RuntimeError.into();
        }
    };

    let result = rt.block_on(async {
        match run(&reconciler, cli.command).await {
            Ok(output) => match serde_json::to_string_pretty(&output) {
                Ok(json) => {
                    println!("{}", json);
                    CtlExitCode::Success
                }
                Err(e) => {
                    error!("Failed to render output: {}", e);
                    CtlExitCode::RuntimeError
                }
            },
            Err(e) => {
                eprintln!("Error: {:#}", e);
                exit_code_for(&e)
            }
        }
    });

    result.into()
}

fn exit_code_for(err: &anyhow::Error) -> CtlExitCode {
    match err.downcast_ref::<ripedb_core::Error>() {
        Some(e) if e.is_not_found() => CtlExitCode::NotFound,
        _ => CtlExitCode::RuntimeError,
    }
}

/// Run one subcommand and return its JSON result
async fn run(reconciler: &Reconciler, command: Command) -> Result<Value> {
    let output = match command {
        Command::Get { class, key } => {
            serde_json::to_value(reconciler.read_data_source(&class, &key).await?)?
        }
        Command::Read { id } => {
            let model = reconciler.import(&id)?;
            serde_json::to_value(reconciler.read(model).await?)?
        }
        Command::Create { file } => {
            let model = load_model(&file).await?;
            serde_json::to_value(reconciler.create(model).await?)?
        }
        Command::Update { file } => {
            let model = load_model(&file).await?;
            serde_json::to_value(reconciler.update(model).await?)?
        }
        Command::Delete { id } => {
            let model = reconciler.import(&id)?;
            reconciler.delete(&model).await?;
            serde_json::json!({ "deleted": model.id })
        }
        Command::Import { id } => serde_json::to_value(reconciler.import(&id)?)?,
        Command::Function {
            name,
            attributes,
            key,
        } => {
            let function = functions::lookup(&name).with_context(|| {
                format!("Unknown function '{}'. Available: get_first, get_all", name)
            })?;
            let attributes = load_json(&attributes).await?;
            function.run(&[attributes, Value::String(key)])?
        }
    };

    Ok(output)
}

async fn load_json(path: &Path) -> Result<Value> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("Invalid JSON in {}", path.display()))
}

async fn load_model(path: &Path) -> Result<ObjectModel> {
    let value = load_json(path).await?;
    serde_json::from_value(value)
        .with_context(|| {
            format!(
                "{} is not an object model (class, value, attributes)",
                path.display()
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subcommands_parse() {
        let cli = Cli::try_parse_from(["ripedbctl", "get", "aut-num", "AS3333"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Get { ref class, ref key } if class == "aut-num" && key == "AS3333"
        ));

        let cli =
            Cli::try_parse_from(["ripedbctl", "fn", "get_all", "attrs.json", "mnt-by"]).unwrap();
        assert!(matches!(cli.command, Command::Function { ref name, .. } if name == "get_all"));

        let cli = Cli::try_parse_from(["ripedbctl", "rm", "as-set:AS-EXAMPLE"]).unwrap();
        assert!(matches!(cli.command, Command::Delete { .. }));

        assert!(Cli::try_parse_from(["ripedbctl", "read"]).is_err());
    }

    #[test]
    fn test_auth_anonymous_by_default() {
        let auth = auth_from_parts(None, None, None, None).unwrap();
        assert_eq!(auth, AuthConfig::Anonymous);
    }

    #[test]
    fn test_auth_password_with_optional_user() {
        let auth = auth_from_parts(None, Some("secret".into()), None, None).unwrap();
        assert_eq!(
            auth,
            AuthConfig::Password {
                user: None,
                password: "secret".into()
            }
        );

        let user = Some("EXAMPLE-MNT".to_string());
        let auth = auth_from_parts(user, Some("secret".into()), None, None).unwrap();
        assert!(matches!(
            auth,
            AuthConfig::Password { user: Some(ref u), .. } if u == "EXAMPLE-MNT"
        ));
    }

    #[test]
    fn test_auth_user_without_password_rejected() {
        assert!(auth_from_parts(Some("EXAMPLE-MNT".into()), None, None, None).is_err());
    }

    #[test]
    fn test_auth_half_certificate_fails_validation() {
        let certificate = Some("-----BEGIN CERTIFICATE-----".to_string());
        let auth = auth_from_parts(None, None, certificate, None).unwrap();
        assert!(auth.validate().is_err());
    }

    #[test]
    fn test_auth_password_and_certificate_conflict() {
        let result = auth_from_parts(
            None,
            Some("secret".into()),
            Some("cert".into()),
            Some("key".into()),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_bool() {
        assert!(parse_bool("TRUE").unwrap());
        assert!(!parse_bool("0").unwrap());
        assert!(parse_bool("maybe").is_err());
    }

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("DEBUG").unwrap(), Level::DEBUG);
        assert!(parse_level("verbose").is_err());
    }

    #[test]
    fn test_not_found_exit_code() {
        let err = anyhow::Error::from(ripedb_core::Error::remote_read(
            "aut-num:AS1",
            ripedb_core::Error::not_found("aut-num AS1"),
        ));
        assert!(matches!(exit_code_for(&err), CtlExitCode::NotFound));

        let err = anyhow::Error::from(ripedb_core::Error::auth("denied"));
        assert!(matches!(exit_code_for(&err), CtlExitCode::RuntimeError));
    }
}
