use super::traits::PackageView;
use crate::args::OutputFormat;
use crate::presentation::view_models::{
    CommandResultViewModel, ErrorViewModel, InitViewModel, RefreshEvent,
};
use anyhow::Result;
use is_terminal::IsTerminal;
use owo_colors::OwoColorize;
use pkgcache_runtime::RefreshReport;
use pkgcache_types::{PackagePage, StoredPackage};
use serde::Serialize;

const MAX_NAME_WIDTH: usize = 40;

pub struct ConsoleView {
    format: OutputFormat,
    color: bool,
}

impl ConsoleView {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            color: std::io::stdout().is_terminal(),
        }
    }

    fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }

    fn print_json<T: Serialize>(&self, value: &T) -> Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }

    fn header(&self, text: &str) -> String {
        if self.color {
            text.bold().to_string()
        } else {
            text.to_string()
        }
    }

    fn highlight(&self, text: &str) -> String {
        if self.color {
            text.cyan().to_string()
        } else {
            text.to_string()
        }
    }
}

impl PackageView for ConsoleView {
    fn render_refresh_event(&self, event: RefreshEvent) -> Result<()> {
        // Progress is for humans only; JSON output is the final report
        if self.is_json() {
            return Ok(());
        }

        match event {
            RefreshEvent::ToolStarted {
                program,
                timeout_secs,
            } => {
                println!("Running {} (timeout {}s)...", program, timeout_secs);
            }
            RefreshEvent::RawCaptured { path } => {
                println!("Raw output saved to {}", path.display());
            }
            RefreshEvent::Parsed { records } => {
                println!("Parsed {} packages", records);
            }
            RefreshEvent::Stored { done, total } => {
                println!("  {}/{} processed", done, total);
            }
            RefreshEvent::Completed { skipped, .. } => {
                if skipped > 0 {
                    println!("Skipped {} incomplete records", skipped);
                }
            }
        }
        Ok(())
    }

    fn render_refresh_report(&self, report: &RefreshReport) -> Result<()> {
        if self.is_json() {
            return self.print_json(report);
        }

        println!("{}", report.message);
        Ok(())
    }

    fn render_package_page(&self, page: &PackagePage) -> Result<()> {
        if self.is_json() {
            return self.print_json(page);
        }

        if page.packages.is_empty() {
            if page.total == 0 {
                println!("No packages found.");
            } else {
                println!(
                    "No packages on page {} ({} packages, {} pages).",
                    page.current_page, page.total, page.total_pages
                );
            }
            return Ok(());
        }

        let names: Vec<String> = page
            .packages
            .iter()
            .map(|p| truncate(&p.name, MAX_NAME_WIDTH))
            .collect();
        let name_width = column_width("NAME", names.iter().map(String::as_str));
        let id_width = column_width("ID", page.packages.iter().map(|p| p.package_id.as_str()));

        println!(
            "{}",
            self.header(&format!(
                "{:<name_width$}  {:<id_width$}  VERSION",
                "NAME", "ID"
            ))
        );
        println!("{}", "-".repeat(name_width + id_width + 4 + "VERSION".len()));

        for (package, name) in page.packages.iter().zip(&names) {
            println!(
                "{:<name_width$}  {}  {}",
                name,
                self.highlight(&format!("{:<id_width$}", package.package_id)),
                package.version
            );
        }

        println!();
        println!(
            "Page {}/{} ({} packages)",
            page.current_page, page.total_pages, page.total
        );
        Ok(())
    }

    fn render_package(&self, package: &StoredPackage) -> Result<()> {
        if self.is_json() {
            return self.print_json(package);
        }

        println!("{}", self.header(&package.name));
        println!("  Id:         {}", self.highlight(&package.package_id));
        println!("  Version:    {}", package.version);
        println!("  First seen: {}", package.created_at);
        println!("  Last seen:  {}", package.updated_at);
        Ok(())
    }

    fn render_init(&self, result: &InitViewModel) -> Result<()> {
        if self.is_json() {
            return self.print_json(result);
        }

        if result.config_written {
            println!("Wrote default config to {}", result.config_path.display());
        } else {
            println!(
                "Config already exists at {} (use --force to overwrite)",
                result.config_path.display()
            );
        }
        println!("Database ready at {}", result.db_path.display());
        println!();
        println!("Next steps:");
        println!("  pkgcache index refresh     # Import installed packages");
        println!("  pkgcache package list      # Browse the cache");
        Ok(())
    }

    fn render_command_result(&self, result: &CommandResultViewModel) -> Result<()> {
        if self.is_json() {
            return self.print_json(result);
        }

        println!("{}", result.message);
        Ok(())
    }

    fn render_error(&self, error: &anyhow::Error) {
        if self.is_json() {
            let envelope = ErrorViewModel::new(error.to_string());
            match serde_json::to_string_pretty(&envelope) {
                Ok(json) => println!("{}", json),
                Err(_) => eprintln!("Error: {}", error),
            }
        } else {
            eprintln!("Error: {}", error);
        }
    }
}

fn column_width<'a>(title: &str, values: impl Iterator<Item = &'a str>) -> usize {
    values
        .map(|v| v.chars().count())
        .max()
        .unwrap_or(0)
        .max(title.len())
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", kept)
}
