use indicatif::ProgressStyle;

/// Spinner style shown while an operation is in flight.
/// Yellow braille-frame spinner followed by the current message.
pub fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template("\x1b[33m{spinner}\x1b[0m {wide_msg}")
        .unwrap()
        .tick_strings(&["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"])
}

/// Style used when an operation finishes successfully.
pub fn ok_style() -> ProgressStyle {
    ProgressStyle::with_template("\x1b[32m✔\x1b[0m {wide_msg}").unwrap()
}

/// Style used when an operation fails.
pub fn err_style() -> ProgressStyle {
    ProgressStyle::with_template("\x1b[31m✘\x1b[0m {wide_msg}").unwrap()
}
