use crate::cli::args::CliArgs;
use crate::output::{OutputFormat, Theme};

pub fn validate(args: &CliArgs) -> Result<(), String> {
    if let Some(raw) = args.height.as_deref() {
        crate::utils::parse_range(raw).map_err(|e| format!("invalid --height '{raw}': {e}"))?;
    }
    if let Some(raw) = args.weight.as_deref() {
        crate::utils::parse_range(raw).map_err(|e| format!("invalid --weight '{raw}': {e}"))?;
    }
    if let Some(raw) = args.page.as_deref() {
        crate::utils::parse_page_number(raw).map_err(|e| format!("invalid --page: {e}"))?;
    }
    if let Some(raw) = args.theme.as_deref() {
        if Theme::parse(raw).is_none() {
            return Err(format!("invalid --theme '{raw}', expected light or dark"));
        }
    }
    if let Some(raw) = args.output_format.as_deref() {
        if OutputFormat::parse(raw).is_none() {
            return Err(format!("invalid --output-format '{raw}', expected text or json"));
        }
    }
    if args.limit == Some(0) {
        return Err("invalid --limit, expected positive integer".to_string());
    }
    if args.concurrency == Some(0) {
        return Err("invalid --concurrency, expected positive integer".to_string());
    }
    if let Some(url) = args.api_url.as_deref() {
        if reqwest::Url::parse(url).is_err() {
            return Err(format!("invalid --api URL: {url}"));
        }
    }
    Ok(())
}
