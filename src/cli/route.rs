//! CLI route: dispatch parsed commands to the manifest library.

use crate::cli::parse::{Commands, ModeCommands};
use crate::config::{ConfigLoader, ManifestConfig};
use crate::error::ApiError;
use crate::identify;
use crate::manifest::{verify, ErrorPolicy, Manifest, ManifestBuilder, VerifyReport, WalkerConfig};
use crate::mode::{self, FileModeBits, SpecialFlags};
use crate::output::{OutputConfig, Printer};
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Execution context: merged configuration for one invocation
pub struct RunContext {
    config: ManifestConfig,
    /// Reload configuration for each command's root (no explicit file given)
    per_root: bool,
}

/// Per-invocation overrides shared by the tree-walking commands
struct WalkFlags<'a> {
    depth: Option<usize>,
    follow_symlinks: bool,
    ignore: &'a [String],
    jobs: Option<usize>,
    abort_on_error: bool,
}

impl RunContext {
    /// Load configuration from `config_path`, or from the usual sources.
    ///
    /// Without an explicit file, tree-walking commands pick up the
    /// `.fsmanifest.toml` of the root they walk.
    pub fn new(config_path: Option<PathBuf>) -> Result<Self, ApiError> {
        match config_path {
            Some(path) => Self::with_config(ConfigLoader::load_from_file(&path)?),
            None => Ok(Self {
                config: validated(ConfigLoader::load(Path::new("."))?)?,
                per_root: true,
            }),
        }
    }

    /// Use `config` for every command, whatever root it walks.
    pub fn with_config(config: ManifestConfig) -> Result<Self, ApiError> {
        Ok(Self {
            config: validated(config)?,
            per_root: false,
        })
    }

    pub fn config(&self) -> &ManifestConfig {
        &self.config
    }

    /// Configuration that applies to a walk of `root`.
    fn config_for(&self, root: &Path) -> Result<Cow<'_, ManifestConfig>, ApiError> {
        if !self.per_root {
            return Ok(Cow::Borrowed(&self.config));
        }
        let dir = if root.is_dir() {
            root
        } else {
            root.parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or(Path::new("."))
        };
        let config = validated(ConfigLoader::load(dir)?)?;
        debug!(root = %dir.display(), "Loaded configuration for walk root");
        Ok(Cow::Owned(config))
    }

    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        debug!(command = command_name(command), "Executing command");
        match command {
            Commands::Id {
                paths,
                metadata,
                absolute,
                format,
                depth,
                follow_symlinks,
                jobs,
                abort_on_error,
            } => {
                let mut output = self.config.output.clone();
                output.include_metadata |= *metadata;
                output.use_absolute_paths |= *absolute;
                if let Some(format) = format {
                    output.format = *format;
                }
                let flags = WalkFlags {
                    depth: *depth,
                    follow_symlinks: *follow_symlinks,
                    ignore: &[],
                    jobs: *jobs,
                    abort_on_error: *abort_on_error,
                };
                self.handle_id(paths, output, &flags)
            }
            Commands::Manifest {
                root,
                output,
                depth,
                follow_symlinks,
                ignore,
                jobs,
                abort_on_error,
            } => {
                let flags = WalkFlags {
                    depth: *depth,
                    follow_symlinks: *follow_symlinks,
                    ignore,
                    jobs: *jobs,
                    abort_on_error: *abort_on_error,
                };
                self.handle_manifest(root, output.as_deref(), &flags)
            }
            Commands::Verify {
                manifest,
                root,
                follow_symlinks,
            } => {
                let flags = WalkFlags {
                    depth: None,
                    follow_symlinks: *follow_symlinks,
                    ignore: &[],
                    jobs: None,
                    abort_on_error: false,
                };
                self.handle_verify(manifest, root, &flags)
            }
            Commands::Mode { command } => handle_mode(command),
        }
    }

    fn builder(&self, root: &Path, flags: &WalkFlags<'_>) -> Result<ManifestBuilder, ApiError> {
        let config = self.config_for(root)?;
        let mut walker: WalkerConfig = config.effective_walker();
        if flags.depth.is_some() {
            walker.max_depth = flags.depth;
        }
        walker.follow_symlinks |= flags.follow_symlinks;
        walker.ignore_patterns.extend(flags.ignore.iter().cloned());

        let policy = if flags.abort_on_error {
            ErrorPolicy::Abort
        } else {
            config.build.error_policy
        };

        Ok(ManifestBuilder::new(root.to_path_buf())
            .with_walker_config(walker)
            .with_error_policy(policy)
            .with_parallelism(flags.jobs.unwrap_or(config.build.jobs)))
    }

    fn handle_id(
        &self,
        paths: &[PathBuf],
        output: OutputConfig,
        flags: &WalkFlags<'_>,
    ) -> Result<String, ApiError> {
        if paths.is_empty() {
            let stdin = std::io::stdin();
            let id = identify::identify(stdin.lock())?;
            return Ok(id.to_string());
        }

        // A lone file prints its bare identifier.
        if let [single] = paths {
            if !single.is_dir() && !output.include_metadata {
                let report = self.builder(single, flags)?.build()?;
                if let Some(entry) = report.entries.first() {
                    return Ok(entry.content_id().to_string());
                }
            }
        }

        let mut blocks = Vec::new();
        for path in paths {
            let report = self.builder(path, flags)?.build()?;
            let printer = Printer::for_target(output.clone(), path)?;
            if !report.entries.is_empty() {
                blocks.push(printer.render_all(&report.entries));
            }
        }
        Ok(blocks.join("\n"))
    }

    fn handle_manifest(
        &self,
        root: &Path,
        destination: Option<&Path>,
        flags: &WalkFlags<'_>,
    ) -> Result<String, ApiError> {
        let report = self.builder(root, flags)?.build()?;
        let failures = report.failures.len();
        let manifest = Manifest::new(report.entries);

        match destination {
            Some(path) => {
                manifest.write_to(path)?;
                info!(path = %path.display(), entries = manifest.len(), "Manifest written");
                Ok(format!(
                    "Wrote {} entries to {} ({} skipped)",
                    manifest.len(),
                    path.display(),
                    failures
                ))
            }
            None => Ok(manifest.to_json()?),
        }
    }

    fn handle_verify(
        &self,
        manifest_path: &Path,
        root: &Path,
        flags: &WalkFlags<'_>,
    ) -> Result<String, ApiError> {
        let manifest = Manifest::read_from(manifest_path)?;
        let builder = self.builder(root, flags)?;
        let report = verify(&manifest, &builder)?;

        if report.is_clean() {
            return Ok(format!("OK: {} entries match", manifest.len()));
        }
        Err(ApiError::VerificationFailed {
            root: root.to_path_buf(),
            drift: report.drift(),
            details: format_verify_report(&report),
        })
    }
}

fn validated(config: ManifestConfig) -> Result<ManifestConfig, ApiError> {
    config
        .validate()
        .map_err(|errors| ApiError::ConfigError(errors.join("; ")))?;
    Ok(config)
}

fn handle_mode(command: &ModeCommands) -> Result<String, ApiError> {
    match command {
        ModeCommands::Decode { mode: input } => {
            let decoded = mode::decode(input)?;
            Ok(format_mode(&decoded))
        }
        ModeCommands::Encode {
            file_type,
            perm,
            flags,
        } => {
            let special = flags
                .iter()
                .fold(SpecialFlags::empty(), |acc, f| acc | SpecialFlags::from(*f));
            let value = FileModeBits::from_octal(*file_type, *perm).with_special(special);
            Ok(mode::encode(&value))
        }
    }
}

fn format_mode(value: &FileModeBits) -> String {
    let special = if value.special().is_empty() {
        "none".to_string()
    } else {
        value
            .special()
            .iter_names()
            .map(|(name, _)| name.to_lowercase())
            .collect::<Vec<_>>()
            .join(",")
    };
    format!(
        "mode:  {}\ntype:  {}\nperm:  {:04o}\nspecial:  {}",
        value,
        value.file_type(),
        value.octal(),
        special
    )
}

fn format_verify_report(report: &VerifyReport) -> String {
    let mut lines = Vec::new();
    for path in &report.missing {
        lines.push(format!("missing:  {}", path));
    }
    for path in &report.added {
        lines.push(format!("added:  {}", path));
    }
    for change in &report.changed {
        let fields = change
            .fields
            .iter()
            .map(|f| f.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        lines.push(format!("changed:  {} ({})", change.path, fields));
    }
    for path in &report.unreadable {
        lines.push(format!("unreadable:  {}", path));
    }
    lines.join("\n")
}

/// Command name used in logs.
pub fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Id { .. } => "id",
        Commands::Manifest { .. } => "manifest",
        Commands::Verify { .. } => "verify",
        Commands::Mode { .. } => "mode",
    }
}
