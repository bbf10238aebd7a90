//! Navigation menu commands

use anyhow::Context;
use clap::{Args, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use temps_menu_import::{
    ImportMode, ImportOptions, ImportReport, ItemOutcome, MenuImporter, MenuReport,
    MissingPolicy, SiteContext, SiteStore,
};
use tracing::debug;

/// Navigation menu management commands
#[derive(Args)]
pub struct MenuCommand {
    #[command(subcommand)]
    pub command: MenuSubcommand,
}

#[derive(Subcommand)]
pub enum MenuSubcommand {
    /// Import navigation menus from a JSON document
    Import(ImportMenuCommand),
}

/// Import navigation menus from a JSON document
#[derive(Args)]
pub struct ImportMenuCommand {
    /// Path to the menu document (a menu object or an array of menus)
    pub file: PathBuf,

    /// How to treat items whose slug already exists: update, skip, append
    #[arg(long, default_value = "append")]
    pub mode: ImportMode,

    /// What to do when a referenced page is missing: create, skip, default
    #[arg(long, default_value = "skip")]
    pub missing: MissingPolicy,

    /// Page path used when --missing=default
    #[arg(long = "default")]
    pub default_path: Option<String>,

    /// Site snapshot (JSON) to import into
    #[arg(long, env = "TEMPS_MENU_SITE")]
    pub site: PathBuf,

    /// Home URL used for relative links; overrides the snapshot's base_url
    #[arg(long, env = "TEMPS_MENU_BASE_URL")]
    pub base_url: Option<String>,

    /// Run the import without writing the site snapshot back
    #[arg(long, default_value = "false")]
    pub dry_run: bool,

    /// Print the import report as JSON
    #[arg(long, default_value = "false")]
    pub json: bool,
}

impl MenuCommand {
    pub fn execute(self) -> anyhow::Result<()> {
        match self.command {
            MenuSubcommand::Import(cmd) => execute_import(cmd),
        }
    }
}

fn execute_import(cmd: ImportMenuCommand) -> anyhow::Result<()> {
    let mut store = SiteStore::load(&cmd.site)
        .with_context(|| format!("Failed to load site snapshot: {}", cmd.site.display()))?;

    let base_url = cmd
        .base_url
        .clone()
        .or_else(|| store.base_url.clone())
        .ok_or_else(|| {
            anyhow::anyhow!(
                "No base URL: pass --base-url or set base_url in {}",
                cmd.site.display()
            )
        })?;
    debug!("Using base URL {}", base_url);
    let site = SiteContext::new(&base_url)?;

    let options = ImportOptions::new(cmd.mode, cmd.missing, cmd.default_path.clone());
    if options.missing == MissingPolicy::Default && options.default_path.is_none() {
        eprintln!(
            "{} --missing=default without --default: missing pages will be skipped",
            "⚠".bright_yellow()
        );
    }

    if !cmd.json {
        print_banner(&cmd, &options);
    }

    let report = MenuImporter::new(&mut store, site, options).import_file(&cmd.file)?;

    if cmd.dry_run {
        debug!("Dry run, not writing {}", cmd.site.display());
    } else {
        store
            .save(&cmd.site)
            .with_context(|| format!("Failed to write site snapshot: {}", cmd.site.display()))?;
    }

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report, cmd.dry_run);
    }

    Ok(())
}

fn print_banner(cmd: &ImportMenuCommand, options: &ImportOptions) {
    println!();
    println!(
        "{}",
        "═══════════════════════════════════════════════════════════════".bright_blue()
    );
    println!(
        "{}",
        "                     Import Navigation Menus                    "
            .bright_blue()
            .bold()
    );
    println!(
        "{}",
        "═══════════════════════════════════════════════════════════════".bright_blue()
    );
    println!();
    println!(
        "{} Reading menus from: {}",
        "→".bright_blue(),
        cmd.file.display()
    );
    println!(
        "{} Site snapshot: {}{}",
        "→".bright_blue(),
        cmd.site.display(),
        if cmd.dry_run { " (dry run)" } else { "" }
    );
    println!(
        "{} Mode: {}, missing pages: {}",
        "→".bright_blue(),
        options.mode.as_str().bright_cyan(),
        options.missing.as_str().bright_cyan()
    );
    println!();
}

fn print_report(report: &ImportReport, dry_run: bool) {
    for menu in &report.menus {
        print_menu(menu);
    }

    let summary = &report.summary;
    let rule = "═══════════════════════════════════════════════════════════════";
    println!();
    if report.is_clean() {
        println!("{}", rule.bright_green());
        println!("{} Menus imported successfully!", "✓".bright_green());
        println!("{}", rule.bright_green());
    } else {
        println!("{}", rule.bright_yellow());
        println!("{} Menus imported with skipped entries", "⚠".bright_yellow());
        println!("{}", rule.bright_yellow());
    }
    println!();
    println!(
        "  {} {} processed, {} created, {} skipped",
        "Menus:".bright_white(),
        summary.menus_processed,
        summary.menus_created,
        summary.menus_skipped
    );
    println!(
        "  {} {} created, {} updated, {} unchanged, {} skipped",
        "Items:".bright_white(),
        summary.items_created.to_string().bright_green(),
        summary.items_updated.to_string().bright_cyan(),
        summary.items_unchanged,
        summary.items_skipped.to_string().bright_yellow()
    );
    for (reason, count) in &summary.skipped_by_reason {
        println!("    {} {}", format!("{}:", reason).bright_white(), count);
    }
    if dry_run {
        println!();
        println!(
            "  {} Dry run: the site snapshot was not modified.",
            "ℹ".bright_blue()
        );
    }
    println!();
}

fn print_menu(menu: &MenuReport) {
    if let Some(reason) = menu.skipped {
        println!(
            "  {} {} {}",
            "✗".bright_red(),
            menu.label.bright_cyan(),
            format!("(skipped: {})", reason).bright_red()
        );
        return;
    }

    let mut flags = Vec::new();
    if menu.created {
        flags.push("created");
    }
    if menu.renamed {
        flags.push("renamed");
    }
    let flags = if flags.is_empty() {
        String::new()
    } else {
        format!(" ({})", flags.join(", "))
    };
    let id = menu
        .menu_id
        .map(|id| format!(" #{}", id))
        .unwrap_or_default();
    println!("  {} {}{}{}", "✓".bright_green(), menu.label.bright_cyan(), id, flags);

    println!(
        "    {:<6} {:<28} {:<12} {}",
        "POS".bright_white().bold(),
        "SLUG".bright_white().bold(),
        "STATUS".bright_white().bold(),
        "DETAIL".bright_white().bold()
    );
    for item in &menu.items {
        let slug = item.slug.as_deref().unwrap_or("-");
        let (status, detail) = match &item.outcome {
            ItemOutcome::Created { id } => ("created".bright_green(), format!("#{}", id)),
            ItemOutcome::Updated { id } => ("updated".bright_cyan(), format!("#{}", id)),
            ItemOutcome::Unchanged { id } => ("unchanged".normal(), format!("#{}", id)),
            ItemOutcome::Skipped { reason, detail } => (
                "skipped".bright_yellow(),
                format!("{}: {}", reason, detail),
            ),
        };
        println!("    {:<6} {:<28} {:<12} {}", item.position, slug, status, detail);
    }
}
