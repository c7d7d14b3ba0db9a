use crate::console::ConsoleSink;
use crate::errors::CliError;
use crate::GlobalOpts;
use clap::Args;
use glue_config::{Config, ManifestLocation};
use glue_logger as logger;
use glue_resolver::{ManifestResolver, ResolvedManifest, SymbolUniverse};
use std::path::PathBuf;
use tracing::info;

#[derive(Args, Debug, Clone, Default)]
pub struct ResolveCommand {
    /// Manifest files, resolved in order. Defaults to the configured manifest location.
    pub manifests: Vec<PathBuf>,

    /// Symbol universe JSON describing the host's types
    #[arg(short, long)]
    pub symbols: Option<PathBuf>,

    /// Write the resolved manifest here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Exit with an error when any entry was dropped
    #[arg(long)]
    pub fail_on_notice: bool,
}

pub fn handle_resolve(cmd: ResolveCommand, opts: &GlobalOpts) -> Result<(), CliError> {
    let config = Config::load()?;

    let symbols = cmd
        .symbols
        .or_else(|| config.symbols_path.as_ref().map(PathBuf::from))
        .ok_or(CliError::NoSymbols)?;
    let manifests = if cmd.manifests.is_empty() {
        let cwd = std::env::current_dir().map_err(CliError::CurrentDir)?;
        vec![ManifestLocation::from_config(&config, &cwd).path()]
    } else {
        cmd.manifests
    };

    logger::spinner_start("Resolving manifests");
    let result = resolve_all(&symbols, &manifests);
    logger::spinner_stop();
    let (resolved, notices) = result?;

    let json = resolved.to_json_string()?;
    match cmd.output {
        Some(path) => {
            std::fs::write(&path, format!("{json}\n"))
                .map_err(|source| CliError::Output { path: path.clone(), source })?;
            if !opts.quiet {
                logger::success(&format!("Wrote {}", path.display()));
            }
        }
        None => println!("{}", json),
    }

    if notices > 0 && (cmd.fail_on_notice || config.fail_on_notice()) {
        return Err(CliError::NoticesReported(notices));
    }
    Ok(())
}

/// Resolve `manifests` in order against one universe, merging the results.
fn resolve_all(
    symbols: &std::path::Path,
    manifests: &[PathBuf],
) -> Result<(ResolvedManifest, usize), CliError> {
    let universe = SymbolUniverse::load_from_path(symbols)?;
    logger::debug(&format!(
        "Loaded {} symbols from {}",
        universe.len(),
        symbols.display()
    ));

    let resolver = ManifestResolver::new(&universe);
    let mut sink = ConsoleSink::new();
    let mut resolved = ResolvedManifest::default();

    for path in manifests {
        info!("Resolving {}", path.display());
        let pass = resolver
            .resolve_file(path, &mut sink)
            .map_err(|source| CliError::Manifest {
                path: path.clone(),
                source,
            })?;
        resolved = resolved.merge(pass);
    }

    Ok((resolved, sink.count()))
}
