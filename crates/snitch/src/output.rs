use libsnitch_core::SnitchError;

/// Print an error and its suggestions to stderr
pub fn output_error(err: &SnitchError) {
    eprintln!("error: {}", err);
    let suggestions = err.suggestions();
    if !suggestions.is_empty() {
        eprintln!();
        eprintln!("Suggestions:");
        for suggestion in suggestions {
            eprintln!("  - {}", suggestion);
        }
    }
}
