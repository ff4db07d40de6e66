//! RegBase command-line tool.
//!
//! Reads and writes vendor-scoped settings from scripts and installers
//! through the same facade the library exposes.
//!
//! # Usage
//!
//! ```text
//! regbase [OPTIONS] <COMMAND>
//!
//! Commands:
//!   get       Print a setting as text
//!   get-int   Print a setting as an integer
//!   set       Store a text setting
//!   set-int   Store an integer setting
//!   keys      Print every entry name of a section, colon-terminated
//!   values    Print every entry of a section as `name=value` lines
//!   exists    Print whether a section (or a raw path) exists
//!   init      Write the effective settings to the settings file
//!
//! Options:
//!   --config <PATH>       Settings file [env: REGBASE_CONFIG]
//!   --product <ID>        Product id [default: settings `default_product`]
//!   --hive <HIVE>         Override the namespace root hive
//!   --base <PATH>         Override the namespace root base path (unknown product ids only)
//!   --alternate-view      Address the alternate 32/64-bit view
//!   --store-file <PATH>   Use the TOML file store at PATH [env: REGBASE_STORE_FILE]
//! ```
//!
//! Reads always succeed and print the default when nothing is stored.
//! Writes exit non-zero when the store rejects them.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use regbase::infrastructure::host_store::open_native_store;
use regbase::infrastructure::storage::config::{self, BackendKind, Settings};
use regbase::{ConfigStore, Hive, HostStore, ProductId, StoreView};

// ── CLI argument definitions ──────────────────────────────────────────────────

/// Read and write vendor-scoped settings in the host store.
#[derive(Debug, Parser)]
#[command(name = "regbase", version)]
struct Cli {
    /// Settings file.  Defaults to `config.toml` in the platform config directory.
    #[arg(long, env = "REGBASE_CONFIG")]
    config: Option<PathBuf>,

    /// Product id selecting the vendor base path (0-3).
    #[arg(long, short)]
    product: Option<u16>,

    /// Hive of the namespace root (`local_machine`/`HKLM` or `current_user`/`HKCU`).
    #[arg(long)]
    hive: Option<Hive>,

    /// Base path overriding the namespace root.
    ///
    /// Requires a `--product` outside the product table; a known id would
    /// replace the override before the command runs.
    #[arg(long)]
    base: Option<String>,

    /// Address the alternate 32/64-bit view of the store.
    #[arg(long)]
    alternate_view: bool,

    /// Use the TOML file store at this path instead of the configured backend.
    #[arg(long, env = "REGBASE_STORE_FILE")]
    store_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print a setting as text.
    Get {
        key: String,
        #[arg(long, short)]
        section: Option<String>,
        #[arg(long, short, default_value = "")]
        default: String,
    },
    /// Print a setting as an integer.
    GetInt {
        key: String,
        #[arg(long, short)]
        section: Option<String>,
        #[arg(long, short, default_value_t = 0, allow_hyphen_values = true)]
        default: i32,
    },
    /// Store a text setting.
    Set {
        key: String,
        value: String,
        #[arg(long, short)]
        section: Option<String>,
    },
    /// Store an integer setting.
    SetInt {
        key: String,
        #[arg(allow_hyphen_values = true)]
        value: i32,
        #[arg(long, short)]
        section: Option<String>,
    },
    /// Print every entry name of a section, colon-terminated.
    Keys {
        #[arg(long, short)]
        section: Option<String>,
        #[arg(long, short, default_value = "")]
        default: String,
    },
    /// Print every entry of a section as `name=value` lines.
    Values {
        #[arg(long, short)]
        section: Option<String>,
    },
    /// Print whether a section exists.
    Exists {
        #[arg(long, short)]
        section: Option<String>,
        /// Raw container path under the root hive, ignoring the base path.
        #[arg(long, conflicts_with = "section")]
        path: Option<String>,
    },
    /// Write the effective settings (including command-line overrides) to
    /// the settings file.
    Init,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut settings = match &cli.config {
        Some(path) => config::load_settings_from(path),
        None => config::load_settings(),
    }
    .context("failed to load regbase settings")?;

    // Initialise structured logging.  Level is overridden by `RUST_LOG`.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&settings.logging.log_level)),
        )
        .init();

    apply_overrides(&cli, &mut settings);
    debug!("effective store settings: {:?}", settings.store);

    if matches!(cli.command, Command::Init) {
        return write_settings(cli.config.as_deref(), &settings);
    }

    let product = ProductId(cli.product.unwrap_or(settings.store.default_product.0));
    check_base_override(cli.base.as_deref(), product)?;

    let store = open_native_store(&settings.store).context("failed to open the host store")?;
    let facade = ConfigStore::with_root(store, settings.store.namespace_root(), settings.store.view);
    if let Some(base) = &cli.base {
        let hive = facade.namespace_root().hive;
        facade.set_namespace_root(base.clone(), hive);
    }

    let output = execute(&facade, cli.command, product)?;
    println!("{output}");
    Ok(())
}

/// Folds command-line overrides into the loaded settings.
fn apply_overrides(cli: &Cli, settings: &mut Settings) {
    if let Some(hive) = cli.hive {
        settings.store.hive = hive;
    }
    if cli.alternate_view {
        settings.store.view = StoreView::Alternate;
    }
    if let Some(path) = &cli.store_file {
        settings.store.backend = BackendKind::File;
        settings.store.file_path = Some(path.clone());
    }
}

/// Saves `settings` to `path`, or to the platform settings file.
fn write_settings(path: Option<&Path>, settings: &Settings) -> anyhow::Result<()> {
    match path {
        Some(path) => config::save_settings_to(path, settings),
        None => config::save_settings(settings),
    }
    .context("failed to write regbase settings")?;
    info!("settings written");
    Ok(())
}

/// Rejects a `--base` override that the product lookup would discard.
fn check_base_override(base: Option<&str>, product: ProductId) -> anyhow::Result<()> {
    match (base, product.family()) {
        (Some(base), Some(family)) => bail!(
            "--base {base:?} has no effect for product {product} ({family:?}); \
             pass a --product outside the product table"
        ),
        _ => Ok(()),
    }
}

/// Runs one subcommand and returns the text to print.
fn execute<S: HostStore>(
    facade: &ConfigStore<S>,
    command: Command,
    product: ProductId,
) -> anyhow::Result<String> {
    let output = match command {
        Command::Get {
            key,
            section,
            default,
        } => facade.get_string(section.as_deref(), &key, &default, product),
        Command::GetInt {
            key,
            section,
            default,
        } => facade
            .get_int(section.as_deref(), &key, default, product)
            .to_string(),
        Command::Set {
            key,
            value,
            section,
        } => {
            facade
                .set_string(section.as_deref(), &key, &value, product)
                .with_context(|| format!("failed to set `{key}`"))?;
            String::new()
        }
        Command::SetInt {
            key,
            value,
            section,
        } => {
            facade
                .set_int(section.as_deref(), &key, value, product)
                .with_context(|| format!("failed to set `{key}`"))?;
            String::new()
        }
        Command::Keys { section, default } => {
            facade.get_keys(section.as_deref(), "", &default, product)
        }
        Command::Values { section } => facade
            .get_values(section.as_deref(), product)
            .into_iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join("\n"),
        Command::Exists {
            path: Some(path), ..
        } => facade
            .container_exists_at(facade.namespace_root().hive, &path)
            .to_string(),
        Command::Exists { section, .. } => facade
            .container_exists(section.as_deref(), product)
            .to_string(),
        Command::Init => bail!("`init` does not address the host store"),
    };
    Ok(output)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use clap::CommandFactory;
    use regbase::infrastructure::host_store::memory::InMemoryStore;

    use super::*;

    fn run(facade: &ConfigStore<InMemoryStore>, args: &[&str]) -> String {
        let cli = Cli::try_parse_from(std::iter::once("regbase").chain(args.iter().copied()))
            .expect("arguments must parse");
        let product = ProductId(cli.product.unwrap_or(0));
        execute(facade, cli.command, product).expect("command must succeed")
    }

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_set_then_get_prints_stored_value() {
        let facade = ConfigStore::new(InMemoryStore::new());

        run(&facade, &["set", "AuthCode", "ABC123", "--section", "UserInfo"]);

        assert_eq!(run(&facade, &["get", "AuthCode", "-s", "UserInfo"]), "ABC123");
    }

    #[test]
    fn test_get_missing_prints_default() {
        let facade = ConfigStore::new(InMemoryStore::new());
        assert_eq!(run(&facade, &["get", "Missing", "-s", "UserInfo", "-d", "N/A"]), "N/A");
    }

    #[test]
    fn test_set_int_accepts_negative_values() {
        let facade = ConfigStore::new(InMemoryStore::new());

        run(&facade, &["set-int", "Offset", "-5", "-s", "Limits"]);

        assert_eq!(run(&facade, &["get-int", "Offset", "-s", "Limits", "-d", "-1"]), "-5");
    }

    #[test]
    fn test_keys_and_values_list_section_contents() {
        let facade = ConfigStore::new(InMemoryStore::new());
        run(&facade, &["set", "a", "1", "-s", "Section"]);
        run(&facade, &["set-int", "b", "2", "-s", "Section"]);

        assert_eq!(run(&facade, &["keys", "-s", "Section"]), "a:b:");
        assert_eq!(run(&facade, &["values", "-s", "Section"]), "a=1\nb=2");
        assert_eq!(run(&facade, &["exists", "-s", "Section"]), "true");
        assert_eq!(run(&facade, &["exists", "-s", "Other"]), "false");
    }

    #[test]
    fn test_product_flag_selects_family() {
        let facade = ConfigStore::new(InMemoryStore::new());
        run(&facade, &["--product", "3", "set", "Edition", "nosdb"]);

        assert_eq!(run(&facade, &["-p", "0", "get", "Edition", "-d", "none"]), "none");
        assert_eq!(run(&facade, &["-p", "3", "get", "Edition"]), "nosdb");
    }

    #[test]
    fn test_base_override_requires_unknown_product() {
        assert!(check_base_override(Some(r"Software\Custom"), ProductId(0)).is_err());
        assert!(check_base_override(Some(r"Software\Custom"), ProductId(42)).is_ok());
        assert!(check_base_override(None, ProductId(0)).is_ok());
    }

    #[test]
    fn test_exists_with_raw_path_ignores_base_path() {
        let facade = ConfigStore::new(InMemoryStore::new());
        run(&facade, &["set", "Edition", "grid", "-s", "UserInfo"]);

        assert_eq!(
            run(&facade, &["exists", "--path", r"Software\Alachisoft\NCache\UserInfo"]),
            "true"
        );
        assert_eq!(run(&facade, &["exists", "--path", r"Software\Elsewhere"]), "false");
        assert!(Cli::try_parse_from(["regbase", "exists", "-s", "A", "--path", "B"]).is_err());
    }

    #[test]
    fn test_init_writes_effective_settings() {
        // Arrange
        let dir = std::env::temp_dir().join(format!("regbase_cli_{}", uuid::Uuid::new_v4()));
        let path = dir.join("config.toml");
        let cli = Cli::try_parse_from(["regbase", "--hive", "HKCU", "init"])
            .expect("arguments must parse");
        let mut settings = Settings::default();
        apply_overrides(&cli, &mut settings);

        // Act
        write_settings(Some(&path), &settings).expect("settings must be written");

        // Assert
        let restored = config::load_settings_from(&path).expect("settings must load");
        assert_eq!(restored.store.hive, Hive::CurrentUser);
        assert_eq!(restored, settings);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_overrides_switch_to_file_backend_and_alternate_view() {
        let cli = Cli::try_parse_from([
            "regbase",
            "--hive",
            "HKCU",
            "--alternate-view",
            "--store-file",
            "/tmp/regbase-store.toml",
            "exists",
        ])
        .expect("arguments must parse");
        let mut settings = Settings::default();

        apply_overrides(&cli, &mut settings);

        assert_eq!(settings.store.hive, Hive::CurrentUser);
        assert_eq!(settings.store.view, StoreView::Alternate);
        assert_eq!(settings.store.backend, BackendKind::File);
        assert_eq!(
            settings.store.file_path,
            Some(PathBuf::from("/tmp/regbase-store.toml"))
        );
    }
}
