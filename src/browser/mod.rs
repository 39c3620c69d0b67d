use anyhow::{Context, Result};

/// Fill the {score} and {unit} placeholders in a link template
pub fn build_link(template: &str, score: u32, unit: &str) -> String {
    template
        .replace("{score}", &score.to_string())
        .replace("{unit}", unit)
}

/// Open a URL in the user's default browser
///
/// # Errors
/// Returns error if browser cannot be opened (e.g., no browser available)
pub fn open_url(url: &str) -> Result<()> {
    webbrowser::open(url)
        .with_context(|| format!("Failed to open browser for URL: {}", url))?;
    Ok(())
}
