//! Assertions over the CLI's JSON responses.

use anyhow::{Context, Result};
use serde_json::Value;

/// Assert a refresh succeeded and stored `expected` packages.
pub fn assert_refresh_count(json: &Value, expected: u64) -> Result<()> {
    if json["success"] != Value::Bool(true) {
        anyhow::bail!("Expected success=true, got {}", json);
    }

    let count = json["count"].as_u64().context("Expected numeric 'count'")?;
    if count != expected {
        anyhow::bail!("Expected {} packages stored, got {}", expected, count);
    }

    let message = json["message"].as_str().context("Expected 'message'")?;
    let expected_message = format!("{} packages stored/updated", expected);
    if message != expected_message {
        anyhow::bail!("Expected message {:?}, got {:?}", expected_message, message);
    }

    Ok(())
}

/// Assert a failure response whose error mentions `needle`.
pub fn assert_failure_mentions(json: &Value, needle: &str) -> Result<()> {
    if json["success"] != Value::Bool(false) {
        anyhow::bail!("Expected success=false, got {}", json);
    }

    let error = json["error"].as_str().context("Expected 'error' string")?;
    if !error.contains(needle) {
        anyhow::bail!("Expected error to mention {:?}, got {:?}", needle, error);
    }

    Ok(())
}

/// Assert the paging envelope of a package listing.
pub fn assert_page(json: &Value, total: u64, current_page: u64, total_pages: u64) -> Result<()> {
    let actual = (
        json["Total"].as_u64().context("Expected 'Total'")?,
        json["CurrentPage"].as_u64().context("Expected 'CurrentPage'")?,
        json["TotalPages"].as_u64().context("Expected 'TotalPages'")?,
    );

    if actual != (total, current_page, total_pages) {
        anyhow::bail!(
            "Expected (Total, CurrentPage, TotalPages) = {:?}, got {:?}",
            (total, current_page, total_pages),
            actual
        );
    }

    Ok(())
}

/// Identifiers on the page, in response order.
pub fn package_ids(json: &Value) -> Result<Vec<String>> {
    let packages = json["Packages"]
        .as_array()
        .context("Expected 'Packages' array in JSON")?;

    packages
        .iter()
        .enumerate()
        .map(|(i, p)| {
            p["package_id"]
                .as_str()
                .map(String::from)
                .with_context(|| format!("Package {} missing package_id", i))
        })
        .collect()
}

/// Assert the page lists exactly `expected` identifiers, in order.
pub fn assert_package_ids(json: &Value, expected: &[&str]) -> Result<()> {
    let ids = package_ids(json)?;
    if ids != expected {
        anyhow::bail!("Expected packages {:?}, got {:?}", expected, ids);
    }
    Ok(())
}
