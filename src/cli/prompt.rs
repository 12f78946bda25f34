use anyhow::Result;
use std::io::{self, BufRead, Write};

pub fn prompt(message: &str) -> Result<String> {
    print!("{}", message);
    io::stdout().flush()?;
    let mut buf = String::new();
    io::stdin().lock().read_line(&mut buf)?;
    Ok(buf.trim_end_matches('\n').trim_end_matches('\r').to_string())
}

/// Prompt with a default shown in brackets; empty input keeps the default.
pub fn prompt_with_default(label: &str, default: Option<&str>) -> Result<String> {
    let message = match default {
        Some(d) if !d.is_empty() => format!("  {} [{}]: ", label, d),
        _ => format!("  {}: ", label),
    };
    let answer = prompt(&message)?;
    if answer.trim().is_empty() {
        Ok(default.unwrap_or_default().to_string())
    } else {
        Ok(answer.trim().to_string())
    }
}

pub fn confirm(question: &str) -> Result<bool> {
    let answer = prompt(question)?;
    Ok(is_yes(&answer))
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}
