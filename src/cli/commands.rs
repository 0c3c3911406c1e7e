//! Command dispatch

use std::io;
use std::path::Path;

use clap::CommandFactory;
use tracing::{debug, instrument};

use crate::application::services::CatalogService;
use crate::application::ApplicationError;
use crate::cli::args::{Cli, Commands, ConfigCommands};
use crate::cli::menu::Menu;
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, local_config_path, Settings};
use crate::domain::DomainError;
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::InfraError;

pub fn execute_command(cli: &Cli) -> CliResult<()> {
    // Completions must work even with a broken config file
    if let Some(Commands::Completion { shell }) = &cli.command {
        return cmd_completion(*shell);
    }

    let cwd =
        std::env::current_dir().map_err(|e| InfraError::io("resolve working directory", e))?;
    let settings = Settings::load(Some(&cwd))?.with_data_file(cli.file.clone());
    debug!("settings: {:?}", settings);
    let container = ServiceContainer::new(settings);

    match &cli.command {
        None | Some(Commands::Menu) => cmd_menu(&container),
        Some(Commands::List) => cmd_list(&container),
        Some(Commands::Show { id }) => cmd_show(&container, id),
        Some(Commands::Dependents { id }) => cmd_dependents(&container, id),
        Some(Commands::Tree) => cmd_tree(&container),
        Some(Commands::Config { command }) => match command {
            ConfigCommands::Show => cmd_config_show(&container),
            ConfigCommands::Template => {
                output::info(&Settings::template());
                Ok(())
            }
            ConfigCommands::Path => cmd_config_path(&cwd),
        },
        Some(Commands::Completion { shell }) => cmd_completion(*shell),
    }
}

/// Load the configured data file into a fresh catalog, warning about bad rows.
fn load_catalog(container: &ServiceContainer) -> CliResult<CatalogService> {
    let mut catalog = container.catalog_service();
    let report = catalog.load_file(&container.settings.data_file)?;
    for rejected in &report.rejected {
        output::warning(&format!(
            "skipped line {}: {} ({})",
            rejected.line_number, rejected.line, rejected.reason
        ));
    }
    Ok(catalog)
}

#[instrument(skip(container))]
fn cmd_menu(container: &ServiceContainer) -> CliResult<()> {
    let mut catalog = container.catalog_service();
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut menu = Menu::new(
        &mut catalog,
        &container.settings.data_file,
        stdin.lock(),
        stdout.lock(),
    );
    menu.run().map_err(|e| InfraError::io("interactive menu", e))?;
    Ok(())
}

#[instrument(skip(container))]
fn cmd_list(container: &ServiceContainer) -> CliResult<()> {
    let catalog = load_catalog(container)?;
    if catalog.tree().is_empty() {
        output::warning(&format!(
            "no courses in {}",
            container.settings.data_file.display()
        ));
        return Ok(());
    }
    for course in catalog.courses() {
        output::info(course);
    }
    Ok(())
}

#[instrument(skip(container))]
fn cmd_show(container: &ServiceContainer, id: &str) -> CliResult<()> {
    let catalog = load_catalog(container)?;
    let course = catalog.find(id);
    if course.is_sentinel() {
        return Err(not_found(&catalog, id));
    }
    output::header(&course);
    output::detail(&output::prerequisites_line(&course));
    Ok(())
}

#[instrument(skip(container))]
fn cmd_dependents(container: &ServiceContainer, id: &str) -> CliResult<()> {
    let catalog = load_catalog(container)?;
    if catalog.find(id).is_sentinel() {
        return Err(not_found(&catalog, id));
    }

    let dependents = catalog.dependents(id);
    if dependents.is_empty() {
        output::success(&format!(
            "no course requires {}, it can be deleted",
            catalog.normalize(id)
        ));
        return Ok(());
    }
    output::header(&format!("Required by {}:", catalog.normalize(id)));
    for course in dependents {
        output::detail(course);
    }
    Ok(())
}

#[instrument(skip(container))]
fn cmd_tree(container: &ServiceContainer) -> CliResult<()> {
    let catalog = load_catalog(container)?;
    let tree = catalog.tree();
    match tree.to_termtree() {
        Some(shape) => {
            output::header(&format!(
                "{} course(s), height {}",
                tree.len(),
                tree.height()
            ));
            print!("{shape}");
        }
        None => output::warning("course list is empty"),
    }
    Ok(())
}

fn cmd_config_show(container: &ServiceContainer) -> CliResult<()> {
    let toml = container.settings.to_toml()?;
    output::info(&toml);
    Ok(())
}

fn cmd_config_path(cwd: &Path) -> CliResult<()> {
    match global_config_path() {
        Some(path) => output::action("Global", &path.display()),
        None => output::warning("no global config directory on this platform"),
    }
    output::action("Local", &local_config_path(cwd).display());
    Ok(())
}

fn cmd_completion(shell: clap_complete::Shell) -> CliResult<()> {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, name, &mut io::stdout());
    Ok(())
}

fn not_found(catalog: &CatalogService, id: &str) -> CliError {
    ApplicationError::from(DomainError::CourseNotFound(catalog.normalize(id))).into()
}
